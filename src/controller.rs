//! Match controller
//!
//! Owns one match from start to finish:
//!
//! ```text
//! NotStarted -> InProgress <-> Paused
//!                    |            |
//!                    v            v
//!                Concluded      Quit   (Quit is also reachable from InProgress)
//! ```
//!
//! Conclusion produces exactly one result report for the leaderboard and,
//! after a fixed delay, signals the hand-off to the leaderboard screen.

use crate::consts::{DEFAULT_PLAYER_NAME, GAME_OVER_HANDOFF_MS};
use crate::leaderboard::GameResultRequest;
use crate::sim::{self, GameEvent, GameState, MatchOutcome, RenderSnapshot, Side, TargetScore};

/// Lifecycle of a single match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    NotStarted,
    InProgress,
    Paused,
    /// Terminal: the last point has been played
    Concluded,
    /// Terminal: the player left for the menu mid-match
    Quit,
}

impl MatchPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchPhase::Concluded | MatchPhase::Quit)
    }
}

/// Drives a [`GameState`] through the match lifecycle
#[derive(Debug, Clone)]
pub struct MatchController {
    phase: MatchPhase,
    state: GameState,
    player_name: String,
    /// Filled on conclusion, taken once by the host
    report: Option<GameResultRequest>,
    /// Host time (ms) at which the match concluded
    concluded_at: Option<f64>,
    handoff_done: bool,
}

impl MatchController {
    pub fn new(target: TargetScore, player_name: impl Into<String>, seed: u64) -> Self {
        let player_name = player_name.into();
        let player_name = if player_name.trim().is_empty() {
            DEFAULT_PLAYER_NAME.to_string()
        } else {
            player_name
        };
        Self {
            phase: MatchPhase::NotStarted,
            state: GameState::new(target, seed),
            player_name,
            report: None,
            concluded_at: None,
            handoff_done: false,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.state.outcome
    }

    /// Whether the player serves the current (or next) rally
    pub fn is_player_serving(&self) -> bool {
        self.state.score.server() == Side::Player
    }

    /// Begin the match: scores at zero, first rally served
    pub fn start(&mut self) -> bool {
        if self.phase != MatchPhase::NotStarted {
            log::warn!("Ignoring start in phase {:?}", self.phase);
            return false;
        }
        sim::start_match(&mut self.state);
        self.phase = MatchPhase::InProgress;
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != MatchPhase::InProgress {
            return false;
        }
        self.phase = MatchPhase::Paused;
        log::info!("Paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != MatchPhase::Paused {
            return false;
        }
        self.phase = MatchPhase::InProgress;
        log::info!("Resumed");
        true
    }

    /// Pause if playing, resume if paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            MatchPhase::InProgress => self.pause(),
            MatchPhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Abandon the match; no result is reported
    pub fn quit(&mut self) -> bool {
        if !matches!(self.phase, MatchPhase::InProgress | MatchPhase::Paused) {
            return false;
        }
        self.phase = MatchPhase::Quit;
        log::info!(
            "Quit at {}-{}",
            self.state.score.player_score,
            self.state.score.opponent_score
        );
        true
    }

    /// Run one simulation tick if the match is in progress
    ///
    /// `now_ms` is only used to time the leaderboard hand-off after the final point.
    pub fn tick(&mut self, now_ms: f64) -> Vec<GameEvent> {
        if self.phase != MatchPhase::InProgress {
            return Vec::new();
        }
        let events = sim::tick(&mut self.state);
        if let Some(outcome) = events.iter().find_map(|event| match event {
            GameEvent::MatchOver(outcome) => Some(*outcome),
            _ => None,
        }) {
            self.conclude(outcome, now_ms);
        }
        events
    }

    fn conclude(&mut self, outcome: MatchOutcome, now_ms: f64) {
        self.phase = MatchPhase::Concluded;
        self.concluded_at = Some(now_ms);
        self.report = Some(GameResultRequest {
            player_name: self.player_name.clone(),
            player_score: outcome.player_score,
            cpu_score: outcome.opponent_score,
            target_score: outcome.target_score,
        });
    }

    /// Position the player paddle's left edge (ignored once the match is over)
    pub fn set_player_x(&mut self, x: f32) {
        if !self.phase.is_terminal() {
            self.state.player.set_x(x);
        }
    }

    /// Center the player paddle on a pointer position (ignored once the match is over)
    pub fn set_player_center(&mut self, x: f32) {
        if !self.phase.is_terminal() {
            self.state.player.set_center_x(x);
        }
    }

    /// The final result to submit, handed out exactly once
    pub fn take_report(&mut self) -> Option<GameResultRequest> {
        self.report.take()
    }

    /// True once, when the post-match delay has elapsed
    pub fn handoff_due(&mut self, now_ms: f64) -> bool {
        match self.concluded_at {
            Some(at) if !self.handoff_done && now_ms - at >= GAME_OVER_HANDOFF_MS => {
                self.handoff_done = true;
                true
            }
            _ => false,
        }
    }

    /// Whether the concluded match is still waiting for its hand-off
    pub fn awaiting_handoff(&self) -> bool {
        self.phase == MatchPhase::Concluded && !self.handoff_done
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.state.snapshot(self.phase == MatchPhase::Paused)
    }

    /// Direct access for scripted play (demo autopilot, tests)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
