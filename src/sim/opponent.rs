//! CPU opponent behaviour
//!
//! Bounded-speed pursuit of the ball's horizontal position. No prediction and no
//! randomness: the speed cap is the only thing that lets the opponent miss.

use super::state::Paddle;

/// Move `paddle` toward `target_x` by at most `max_speed`, snapping onto it when close
///
/// Returns the horizontal distance actually moved (after field clamping).
pub fn track(paddle: &mut Paddle, target_x: f32, max_speed: f32) -> f32 {
    let before = paddle.pos.x;
    let dx = target_x - paddle.center_x();
    let step = dx.clamp(-max_speed, max_speed);
    paddle.set_x(paddle.pos.x + step);
    paddle.pos.x - before
}
