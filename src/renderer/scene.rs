//! Scene assembly from a render snapshot

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::{Rect, RenderSnapshot};

const NET_THICKNESS: f32 = 2.0;
const NET_DASH: f32 = 10.0;
const NET_GAP: f32 = 10.0;
const BALL_SEGMENTS: u32 = 24;
const SHINE_RADIUS: f32 = 2.0;
const SHINE_OFFSET: Vec2 = Vec2::new(-2.0, -2.0);

fn paddle(rect: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    shapes::rect(rect.x, rect.y, rect.width, rect.height, color)
}

/// Build the frame's triangle list in field coordinates, back to front
pub fn build_scene(snapshot: &RenderSnapshot) -> Vec<Vertex> {
    let mut vertices = shapes::rect(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT, colors::TABLE);

    vertices.extend(shapes::dashed_hline(
        0.0,
        FIELD_WIDTH,
        FIELD_HEIGHT / 2.0,
        NET_THICKNESS,
        NET_DASH,
        NET_GAP,
        colors::NET,
    ));

    vertices.extend(paddle(&snapshot.player, colors::PLAYER_PADDLE));
    vertices.extend(paddle(&snapshot.opponent, colors::OPPONENT_PADDLE));

    vertices.extend(shapes::circle(
        snapshot.ball_pos,
        snapshot.ball_radius,
        colors::BALL,
        BALL_SEGMENTS,
    ));
    vertices.extend(shapes::circle(
        snapshot.ball_pos + SHINE_OFFSET,
        SHINE_RADIUS,
        colors::BALL_SHINE,
        8,
    ));

    if snapshot.paused || snapshot.outcome.is_some() {
        vertices.extend(shapes::rect(
            0.0,
            0.0,
            FIELD_WIDTH,
            FIELD_HEIGHT,
            colors::OVERLAY,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, TargetScore};

    fn snapshot() -> RenderSnapshot {
        GameState::new(TargetScore::default(), 5).snapshot(false)
    }

    fn with_color(vertices: &[Vertex], color: [f32; 4]) -> Vec<&Vertex> {
        vertices.iter().filter(|v| v.color == color).collect()
    }

    #[test]
    fn test_table_drawn_first() {
        let vertices = build_scene(&snapshot());
        assert!(vertices[..6].iter().all(|v| v.color == colors::TABLE));
    }

    #[test]
    fn test_paddles_match_snapshot() {
        let snap = snapshot();
        let vertices = build_scene(&snap);

        let player = with_color(&vertices, colors::PLAYER_PADDLE);
        assert_eq!(player.len(), 6);
        let (top, bottom) = (snap.player.y, snap.player.y + snap.player.height);
        assert!(
            player
                .iter()
                .all(|v| v.position[1] >= top && v.position[1] <= bottom)
        );

        let opponent = with_color(&vertices, colors::OPPONENT_PADDLE);
        assert_eq!(opponent.len(), 6);
        assert!(opponent.iter().all(|v| v.position[1] < FIELD_HEIGHT / 2.0));
    }

    #[test]
    fn test_net_across_center() {
        let vertices = build_scene(&snapshot());
        let net = with_color(&vertices, colors::NET);
        assert!(!net.is_empty());
        assert!(
            net.iter()
                .all(|v| (v.position[1] - FIELD_HEIGHT / 2.0).abs() <= NET_THICKNESS / 2.0)
        );
    }

    #[test]
    fn test_ball_centered_on_snapshot() {
        let snap = snapshot();
        let vertices = build_scene(&snap);
        let ball = with_color(&vertices, colors::BALL);
        assert_eq!(ball.len(), (BALL_SEGMENTS * 3) as usize);
        assert_eq!(Vec2::from(ball[0].position), snap.ball_pos);
    }

    #[test]
    fn test_overlay_only_when_paused() {
        let mut snap = snapshot();
        assert!(with_color(&build_scene(&snap), colors::OVERLAY).is_empty());
        snap.paused = true;
        assert_eq!(with_color(&build_scene(&snap), colors::OVERLAY).len(), 6);
    }
}
