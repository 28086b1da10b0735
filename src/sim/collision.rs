//! Collision detection and response
//!
//! The field is a rectangle: side walls reflect the ball, paddles redirect it
//! with an angle that depends on where along the paddle it landed.

use glam::Vec2;

use super::state::{Ball, Paddle, Side};
use crate::consts::{BALL_MAX_SPEED, BALL_SPEED_INCREMENT, FIELD_WIDTH, MAX_BOUNCE_ANGLE};

/// Reflect the ball off the left/right walls
///
/// Flips the horizontal velocity and clamps the ball back inside the field.
/// Returns true if a wall was hit.
pub fn resolve_side_walls(ball: &mut Ball) -> bool {
    let min_x = ball.radius;
    let max_x = FIELD_WIDTH - ball.radius;
    if ball.pos.x >= min_x && ball.pos.x <= max_x {
        return false;
    }
    ball.vel.x = -ball.vel.x;
    ball.pos.x = ball.pos.x.clamp(min_x, max_x);
    true
}

/// Whether the ball is in contact with `paddle` while travelling toward `side`
///
/// Requires vertical overlap between the ball and the paddle's band, incoming
/// vertical velocity, and the ball center within the paddle's horizontal extent.
pub fn paddle_contact(ball: &Ball, paddle: &Paddle, side: Side) -> bool {
    let overlaps_band = ball.pos.y + ball.radius >= paddle.pos.y
        && ball.pos.y - ball.radius <= paddle.pos.y + paddle.height;
    overlaps_band && side.is_incoming(ball.vel.y) && paddle.spans_x(ball.pos.x)
}

/// Where the ball struck the paddle: -1 at the left edge, 0 center, 1 right edge
pub fn hit_offset(ball_x: f32, paddle: &Paddle) -> f32 {
    let half = paddle.width / 2.0;
    ((ball_x - paddle.center_x()) / half).clamp(-1.0, 1.0)
}

/// Outgoing velocity for a ball struck by `side` at `offset` with scalar `speed`
pub fn bounce_velocity(offset: f32, speed: f32, side: Side) -> Vec2 {
    let angle = MAX_BOUNCE_ANGLE * offset;
    Vec2::new(
        speed * angle.sin(),
        side.outgoing_dir() * speed * angle.cos(),
    )
}

/// Resolve a paddle collision for `side`, returning the new speed on a hit
pub fn resolve_paddle(ball: &mut Ball, paddle: &Paddle, side: Side) -> Option<f32> {
    if !paddle_contact(ball, paddle, side) {
        return None;
    }
    let offset = hit_offset(ball.pos.x, paddle);
    ball.speed = (ball.speed + BALL_SPEED_INCREMENT).min(BALL_MAX_SPEED);
    ball.vel = bounce_velocity(offset, ball.speed, side);
    Some(ball.speed)
}
