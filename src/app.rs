//! Screen navigation
//!
//! ```text
//! Menu --start--> Playing --quit--> Menu
//!   |               |
//!   |          (game over + delay)
//!   v               v
//! Leaderboard <-----+   --back--> Menu
//! ```

use crate::controller::{MatchController, MatchPhase};
use crate::leaderboard::LeaderboardEntry;
use crate::settings::Settings;

/// Which screen the host shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Leaderboard,
}

/// Top-level application state shared by the host callbacks
#[derive(Debug)]
pub struct App {
    screen: Screen,
    pub settings: Settings,
    active: Option<MatchController>,
    leaderboard: Vec<LeaderboardEntry>,
    leaderboard_loading: bool,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            screen: Screen::Menu,
            settings,
            active: None,
            leaderboard: Vec::new(),
            leaderboard_loading: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn active(&self) -> Option<&MatchController> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut MatchController> {
        self.active.as_mut()
    }

    /// Commit a target score from the menu input (minimum enforced)
    pub fn set_target_score(&mut self, value: u32) -> u32 {
        self.settings.set_target_score(value);
        self.settings.save();
        self.settings.target_score
    }

    pub fn set_player_name(&mut self, name: &str) {
        self.settings.player_name = name.trim().to_string();
        self.settings.save();
    }

    /// Begin a fresh match with the current settings
    pub fn start_match(&mut self, seed: u64) -> &mut MatchController {
        let mut controller =
            MatchController::new(self.settings.target(), self.settings.player_name.clone(), seed);
        controller.start();
        self.screen = Screen::Playing;
        self.active.insert(controller)
    }

    /// Leave a match in progress without reporting it
    pub fn quit_to_menu(&mut self) {
        if let Some(mut controller) = self.active.take() {
            controller.quit();
        }
        self.screen = Screen::Menu;
    }

    /// Switch to the leaderboard; the host then fetches and calls [`App::set_leaderboard`]
    pub fn show_leaderboard(&mut self) {
        if let Some(controller) = &self.active
            && !controller.phase().is_terminal()
        {
            log::warn!("Leaving an unfinished match for the leaderboard");
        }
        self.active = None;
        self.leaderboard.clear();
        self.leaderboard_loading = true;
        self.screen = Screen::Leaderboard;
    }

    pub fn set_leaderboard(&mut self, entries: Vec<LeaderboardEntry>) {
        log::info!("Leaderboard loaded ({} entries)", entries.len());
        self.leaderboard = entries;
        self.leaderboard_loading = false;
    }

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        &self.leaderboard
    }

    pub fn leaderboard_loading(&self) -> bool {
        self.leaderboard_loading
    }

    pub fn back_to_menu(&mut self) {
        self.screen = Screen::Menu;
    }

    /// Whether the loop should keep running for the active match
    pub fn wants_frames(&self) -> bool {
        self.active.as_ref().is_some_and(|c| {
            c.phase() == MatchPhase::InProgress || c.awaiting_handoff()
        })
    }
}

/// HUD label for the target: the match ends once this many points are played
pub fn target_label(target_score: u32) -> String {
    format!("{target_score} points total")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MIN_TARGET_SCORE;
    use crate::leaderboard::Winner;

    #[test]
    fn test_starts_on_menu() {
        let app = App::new(Settings::default());
        assert_eq!(app.screen(), Screen::Menu);
        assert!(app.active().is_none());
        assert!(!app.wants_frames());
    }

    #[test]
    fn test_start_uses_settings() {
        let mut app = App::new(Settings::default());
        assert_eq!(app.set_target_score(2), MIN_TARGET_SCORE);
        app.set_player_name("  Ada ");

        let ctrl = app.start_match(9);
        assert_eq!(ctrl.phase(), MatchPhase::InProgress);
        assert_eq!(ctrl.player_name(), "Ada");
        assert_eq!(ctrl.state().score.target_score, MIN_TARGET_SCORE);
        assert_eq!(app.screen(), Screen::Playing);
        assert!(app.wants_frames());
    }

    #[test]
    fn test_target_label_counts_total_points() {
        assert_eq!(target_label(11), "11 points total");
        assert!(!target_label(5).contains("First to"));
    }

    #[test]
    fn test_quit_returns_to_menu() {
        let mut app = App::new(Settings::default());
        app.start_match(1);
        app.quit_to_menu();
        assert_eq!(app.screen(), Screen::Menu);
        assert!(app.active().is_none());
    }

    #[test]
    fn test_paused_match_wants_no_frames() {
        let mut app = App::new(Settings::default());
        app.start_match(1).pause();
        assert!(!app.wants_frames());
        if let Some(ctrl) = app.active_mut() {
            ctrl.resume();
        }
        assert!(app.wants_frames());
    }

    #[test]
    fn test_leaderboard_round_trip() {
        let mut app = App::new(Settings::default());
        app.show_leaderboard();
        assert_eq!(app.screen(), Screen::Leaderboard);
        assert!(app.leaderboard_loading());

        app.set_leaderboard(vec![LeaderboardEntry {
            id: 1,
            name: "Ada".into(),
            score: 6,
            opponent_score: 5,
            date: "2025-01-01T00:00:00".into(),
            winner: Winner::Player,
            target_score: 11,
        }]);
        assert!(!app.leaderboard_loading());
        assert_eq!(app.leaderboard().len(), 1);

        app.back_to_menu();
        assert_eq!(app.screen(), Screen::Menu);
    }
}
