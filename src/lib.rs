//! Smash Pong - single-player arcade table tennis
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddles, serve rules, scoring)
//! - `controller`: Match state machine and result reporting
//! - `game_loop`: Fixed-timestep loop driver with injectable clock/scheduler
//! - `app`: Screen navigation between menu, match and leaderboard
//! - `input`: Pointer to field coordinate mapping
//! - `leaderboard`: Result submission and leaderboard queries
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedural sound effects
//! - `settings`: Player preferences and match configuration

pub mod app;
pub mod audio;
pub mod controller;
pub mod game_loop;
pub mod input;
pub mod leaderboard;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{App, Screen};
pub use controller::{MatchController, MatchPhase};
pub use game_loop::{Clock, FrameOutcome, FrameScheduler, FrameSink, GameLoop};
pub use settings::Settings;
pub use sim::{GameEvent, GameState, MatchOutcome, Side, TargetScore};

/// Game configuration constants
///
/// Distances are logical field pixels; speeds are pixels per tick.
pub mod consts {
    /// Fixed simulation timestep (one tick, 60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Same timestep in milliseconds (what the loop driver accumulates)
    pub const SIM_DT_MS: f64 = SIM_DT * 1000.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta fed into the accumulator (tab switches, debugger stalls)
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

    /// Field dimensions (logical canvas size, y grows downward)
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 80.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Gap between a paddle and its goal line
    pub const PADDLE_MARGIN: f32 = 10.0;
    /// Top edge of the player's paddle (bottom of the field)
    pub const PLAYER_PADDLE_Y: f32 = FIELD_HEIGHT - PADDLE_HEIGHT - PADDLE_MARGIN;
    /// Top edge of the opponent's paddle (top of the field)
    pub const OPPONENT_PADDLE_Y: f32 = PADDLE_MARGIN;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_INITIAL_SPEED: f32 = 5.0;
    pub const BALL_MAX_SPEED: f32 = 12.0;
    /// Speed gained on every paddle hit (additive, clamped to max)
    pub const BALL_SPEED_INCREMENT: f32 = 0.5;
    /// Largest deflection from vertical off a paddle edge (45 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
    /// Serve horizontal spread, relative to the unit vertical component
    pub const SERVE_SPREAD: f32 = 0.75;

    /// Opponent paddle pursuit speed cap
    pub const OPPONENT_MAX_SPEED: f32 = 5.0;

    /// Match configuration
    pub const MIN_TARGET_SCORE: u32 = 5;
    pub const DEFAULT_TARGET_SCORE: u32 = 11;
    /// Delay between game over and the leaderboard screen
    pub const GAME_OVER_HANDOFF_MS: f64 = 3000.0;

    /// Leaderboard
    pub const LEADERBOARD_LIMIT: usize = 20;
    pub const DEFAULT_PLAYER_NAME: &str = "Player 1";
    pub const MAX_PLAYER_NAME_LEN: usize = 100;
}
