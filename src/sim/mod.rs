//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per step, velocities in pixels per tick
//! - Seeded RNG only (serve spread)
//! - No rendering or platform dependencies

pub mod collision;
pub mod opponent;
pub mod rules;
pub mod state;
pub mod tick;

pub use collision::{
    bounce_velocity, hit_offset, paddle_contact, resolve_paddle, resolve_side_walls,
};
pub use rules::{is_deuce, is_match_over, is_player_serving, winner};
pub use state::{
    Ball, GameEvent, GameState, MatchOutcome, MatchState, Paddle, Rect, RenderSnapshot, Side,
    TargetScore, field_center,
};
pub use tick::{award_point, serve, start_match, tick};
