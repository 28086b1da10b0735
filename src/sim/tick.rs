//! Fixed timestep simulation tick
//!
//! Core game loop that advances the rally deterministically, one tick at a time.

use rand::Rng;

use super::collision::{resolve_paddle, resolve_side_walls};
use super::opponent;
use super::state::{GameEvent, GameState, Side};
use crate::consts::*;

/// Serve the opening rally at 0-0
pub fn start_match(state: &mut GameState) {
    state.outcome = None;
    serve(state);
    log::info!(
        "Match started: seed {}, target {} points, {:?} serves",
        state.seed,
        state.score.target_score,
        state.score.server()
    );
}

/// Reset the ball for a new rally, served by whoever the current score says
pub fn serve(state: &mut GameState) {
    let server = state.score.server();
    let spread = state.rng.random_range(-SERVE_SPREAD..SERVE_SPREAD);
    state.ball.serve(server, spread);
}

/// Advance the game state by one tick
///
/// Returns the events produced this tick; at most one of them is a
/// `PointScored` or `MatchOver`. Once the match is over this is a no-op.
pub fn tick(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.is_over() {
        return events;
    }
    state.time_ticks += 1;

    // Move ball
    state.ball.pos += state.ball.vel;

    if resolve_side_walls(&mut state.ball) {
        events.push(GameEvent::WallBounce);
    }

    opponent::track(&mut state.opponent, state.ball.pos.x, OPPONENT_MAX_SPEED);

    if let Some(speed) = resolve_paddle(&mut state.ball, &state.player, Side::Player) {
        events.push(GameEvent::PaddleHit {
            side: Side::Player,
            speed,
        });
    }
    if let Some(speed) = resolve_paddle(&mut state.ball, &state.opponent, Side::Opponent) {
        events.push(GameEvent::PaddleHit {
            side: Side::Opponent,
            speed,
        });
    }

    // Scoring: past the player's goal line the opponent wins the point and vice versa
    let scorer = if state.ball.pos.y > FIELD_HEIGHT {
        Some(Side::Opponent)
    } else if state.ball.pos.y < 0.0 {
        Some(Side::Player)
    } else {
        None
    };

    if let Some(scorer) = scorer {
        events.push(award_point(state, scorer));
    }

    events
}

/// Record a point for `scorer`, then either end the match or serve the next rally
pub fn award_point(state: &mut GameState, scorer: Side) -> GameEvent {
    state.score.award(scorer);
    let score = state.score;

    if let Some(outcome) = score.outcome() {
        state.ball.stop();
        state.outcome = Some(outcome);
        log::info!(
            "Match over {}-{} (target {}), winner: {:?}",
            outcome.player_score,
            outcome.opponent_score,
            outcome.target_score,
            outcome.winner
        );
        return GameEvent::MatchOver(outcome);
    }

    log::debug!(
        "Point to {:?}: {}-{}",
        scorer,
        score.player_score,
        score.opponent_score
    );
    serve(state);
    GameEvent::PointScored {
        scorer,
        player_score: score.player_score,
        opponent_score: score.opponent_score,
    }
}
