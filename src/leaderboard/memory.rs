//! In-process leaderboard store
//!
//! Applies the same rules as the hosted service: name normalization, winner
//! derivation, auto-incrementing ids and a UTC timestamp per record. Used by the
//! native demo and by tests.

use std::cell::{Cell, RefCell};

use chrono::{SecondsFormat, Utc};

use super::{GameRecord, GameResultRequest, LeaderboardError, LeaderboardService, Winner};
use crate::consts::{DEFAULT_PLAYER_NAME, MAX_PLAYER_NAME_LEN};

/// Records kept sorted by player score, highest first
#[derive(Debug, Default)]
pub struct MemoryLeaderboard {
    records: RefCell<Vec<GameRecord>>,
    next_id: Cell<u64>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Insert a record in rank order; returns the 1-indexed rank it landed at
    ///
    /// Equal scores keep submission order.
    fn insert(&self, record: GameRecord) -> usize {
        let mut records = self.records.borrow_mut();
        let score = record.player_score;
        match records.iter().position(|r| score > r.player_score) {
            Some(i) => {
                records.insert(i, record);
                i + 1
            }
            None => {
                records.push(record);
                records.len()
            }
        }
    }
}

/// Trim, default when blank, cap the length
pub fn normalize_player_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return DEFAULT_PLAYER_NAME.to_string();
    }
    trimmed.chars().take(MAX_PLAYER_NAME_LEN).collect()
}

impl LeaderboardService for MemoryLeaderboard {
    async fn submit(&self, request: &GameResultRequest) -> Result<GameRecord, LeaderboardError> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);

        let record = GameRecord {
            id,
            player_name: normalize_player_name(&request.player_name),
            player_score: request.player_score,
            cpu_score: request.cpu_score,
            winner: Winner::from_scores(request.player_score, request.cpu_score),
            target_score: request.target_score,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        let rank = self.insert(record.clone());
        log::debug!("Stored game #{id} at rank {rank}");
        Ok(record)
    }

    async fn top(&self, limit: usize) -> Result<Vec<GameRecord>, LeaderboardError> {
        Ok(self.records.borrow().iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::tests::block_on;
    use chrono::DateTime;

    fn submit(board: &MemoryLeaderboard, name: &str, player: u32, cpu: u32) -> GameRecord {
        let request = GameResultRequest {
            player_name: name.to_string(),
            player_score: player,
            cpu_score: cpu,
            target_score: player + cpu,
        };
        block_on(board.submit(&request)).expect("memory submit never fails")
    }

    #[test]
    fn test_ids_increment() {
        let board = MemoryLeaderboard::new();
        assert!(board.is_empty());
        assert_eq!(submit(&board, "A", 1, 4).id, 1);
        assert_eq!(submit(&board, "B", 2, 3).id, 2);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_winner_rule() {
        let board = MemoryLeaderboard::new();
        assert_eq!(submit(&board, "A", 3, 2).winner, Winner::Player);
        assert_eq!(submit(&board, "A", 2, 3).winner, Winner::Cpu);
        // A drawn match is credited to the cpu
        assert_eq!(submit(&board, "A", 3, 3).winner, Winner::Cpu);
    }

    #[test]
    fn test_name_normalization() {
        assert_eq!(normalize_player_name("  Ada  "), "Ada");
        assert_eq!(normalize_player_name(""), DEFAULT_PLAYER_NAME);
        assert_eq!(normalize_player_name("\t \n"), DEFAULT_PLAYER_NAME);
        let long = "x".repeat(150);
        assert_eq!(normalize_player_name(&long).chars().count(), MAX_PLAYER_NAME_LEN);
    }

    #[test]
    fn test_created_at_is_rfc3339() {
        let board = MemoryLeaderboard::new();
        let record = submit(&board, "A", 1, 4);
        assert!(DateTime::parse_from_rfc3339(&record.created_at).is_ok());
    }

    #[test]
    fn test_top_orders_by_score() {
        let board = MemoryLeaderboard::new();
        submit(&board, "low", 1, 4);
        submit(&board, "high", 6, 5);
        submit(&board, "mid-first", 3, 2);
        submit(&board, "mid-second", 3, 2);

        let top = block_on(board.top(3)).expect("top");
        let names: Vec<&str> = top.iter().map(|r| r.player_name.as_str()).collect();
        assert_eq!(names, ["high", "mid-first", "mid-second"]);

        assert!(block_on(board.top(0)).expect("top").is_empty());
    }
}
