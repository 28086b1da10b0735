//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]; the loop driver owns it
//! and nothing else holds a reference between ticks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rules;
use crate::consts::*;

/// One side of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human player, defends the bottom goal line
    Player,
    /// CPU opponent, defends the top goal line
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Vertical direction of a ball struck by this side (y grows downward)
    pub fn outgoing_dir(self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Opponent => 1.0,
        }
    }

    /// Whether a ball with this vertical velocity is travelling toward this side
    pub fn is_incoming(self, vel_y: f32) -> bool {
        match self {
            Side::Player => vel_y > 0.0,
            Side::Opponent => vel_y < 0.0,
        }
    }
}

/// Points needed in total to finish a match (minimum enforced, no maximum)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetScore(u32);

impl TargetScore {
    /// Build a target score, raising anything below the minimum to the minimum
    pub fn new(points: u32) -> Self {
        Self(points.max(MIN_TARGET_SCORE))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for TargetScore {
    fn default() -> Self {
        Self(DEFAULT_TARGET_SCORE)
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Scalar speed; `vel.length() == speed` after every serve and paddle hit
    pub speed: f32,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: field_center(),
            vel: Vec2::ZERO,
            speed: BALL_INITIAL_SPEED,
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    /// Place the ball at center field and launch it from the given server
    ///
    /// `spread` is the horizontal component before normalization, expected in
    /// `[-SERVE_SPREAD, SERVE_SPREAD]`.
    pub fn serve(&mut self, server: Side, spread: f32) {
        self.pos = field_center();
        self.speed = BALL_INITIAL_SPEED;
        let dir = Vec2::new(spread, server.outgoing_dir()).normalize();
        self.vel = dir * self.speed;
    }

    /// Halt the ball in place (match over)
    pub fn stop(&mut self) {
        self.vel = Vec2::ZERO;
    }
}

/// A paddle, positioned by its top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Centered paddle with its top edge at `y`
    pub fn new(y: f32) -> Self {
        Self {
            pos: Vec2::new((FIELD_WIDTH - PADDLE_WIDTH) / 2.0, y),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        }
    }

    pub fn player() -> Self {
        Self::new(PLAYER_PADDLE_Y)
    }

    pub fn opponent() -> Self {
        Self::new(OPPONENT_PADDLE_Y)
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    /// Set the left edge, clamped to `[0, FIELD_WIDTH - width]`
    ///
    /// Non-finite input is ignored and the paddle stays put.
    pub fn set_x(&mut self, x: f32) {
        if !x.is_finite() {
            return;
        }
        self.pos.x = x.clamp(0.0, (FIELD_WIDTH - self.width).max(0.0));
    }

    /// Center the paddle on `x` (pointer position), clamped to the field
    pub fn set_center_x(&mut self, x: f32) {
        self.set_x(x - self.width / 2.0);
    }

    /// Whether `x` lies within the paddle's horizontal extent (edges inclusive)
    pub fn spans_x(&self, x: f32) -> bool {
        x >= self.pos.x && x <= self.pos.x + self.width
    }
}

/// Score pair plus the configured target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub player_score: u32,
    pub opponent_score: u32,
    pub target_score: u32,
}

impl MatchState {
    pub fn new(target: TargetScore) -> Self {
        Self {
            player_score: 0,
            opponent_score: 0,
            target_score: target.get(),
        }
    }

    pub fn total(&self) -> u32 {
        self.player_score + self.opponent_score
    }

    pub fn score_of(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_score,
            Side::Opponent => self.opponent_score,
        }
    }

    /// Add one point for `side`
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Player => self.player_score += 1,
            Side::Opponent => self.opponent_score += 1,
        }
    }

    pub fn is_deuce(&self) -> bool {
        rules::is_deuce(self.player_score, self.opponent_score, self.target_score)
    }

    /// Who serves the next rally at this score
    pub fn server(&self) -> Side {
        if rules::is_player_serving(self.player_score, self.opponent_score, self.target_score) {
            Side::Player
        } else {
            Side::Opponent
        }
    }

    pub fn is_over(&self) -> bool {
        rules::is_match_over(self.player_score, self.opponent_score, self.target_score)
    }

    /// Final result, once the terminal condition holds
    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.is_over().then(|| MatchOutcome {
            winner: rules::winner(self.player_score, self.opponent_score),
            player_score: self.player_score,
            opponent_score: self.opponent_score,
            target_score: self.target_score,
        })
    }
}

/// Final result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// `None` when the scores are level (even target split down the middle)
    pub winner: Option<Side>,
    pub player_score: u32,
    pub opponent_score: u32,
    pub target_score: u32,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball struck a paddle; `speed` is the post-hit scalar speed
    PaddleHit { side: Side, speed: f32 },
    /// Ball bounced off a side wall
    WallBounce,
    /// A point was won and a new rally served
    PointScored {
        scorer: Side,
        player_score: u32,
        opponent_score: u32,
    },
    /// The last point of the match was played
    MatchOver(MatchOutcome),
}

/// Axis-aligned rectangle for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<&Paddle> for Rect {
    fn from(paddle: &Paddle) -> Self {
        Self {
            x: paddle.pos.x,
            y: paddle.pos.y,
            width: paddle.width,
            height: paddle.height,
        }
    }
}

/// Read-only view of the state handed to the renderer and HUD each frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub ball_pos: Vec2,
    pub ball_radius: f32,
    pub player: Rect,
    pub opponent: Rect,
    pub player_score: u32,
    pub opponent_score: u32,
    pub target_score: u32,
    pub server: Side,
    pub paused: bool,
    pub outcome: Option<MatchOutcome>,
}

/// Complete simulation state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the serve RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub ball: Ball,
    pub player: Paddle,
    pub opponent: Paddle,
    pub score: MatchState,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Set once the terminal condition is reached; ticks are no-ops afterwards
    pub outcome: Option<MatchOutcome>,
}

impl GameState {
    /// Fresh match at 0-0 with the ball at rest on center field
    ///
    /// The first rally is served by [`super::tick::start_match`].
    pub fn new(target: TargetScore, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ball: Ball::default(),
            player: Paddle::player(),
            opponent: Paddle::opponent(),
            score: MatchState::new(target),
            time_ticks: 0,
            outcome: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn snapshot(&self, paused: bool) -> RenderSnapshot {
        RenderSnapshot {
            ball_pos: self.ball.pos,
            ball_radius: self.ball.radius,
            player: Rect::from(&self.player),
            opponent: Rect::from(&self.opponent),
            player_score: self.score.player_score,
            opponent_score: self.score.opponent_score,
            target_score: self.score.target_score,
            server: self.score.server(),
            paused,
            outcome: self.outcome,
        }
    }
}

pub fn field_center() -> Vec2 {
    Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0)
}
