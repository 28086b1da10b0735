//! Match results and the leaderboard
//!
//! Results are submitted once per concluded match and the top records are read
//! back for the leaderboard screen. Every call is best-effort: failures are
//! logged at this boundary and replaced with `None` / an empty list, so the game
//! never stalls or crashes on the network.

pub mod http;
pub mod memory;

use std::fmt;
use std::future::Future;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_PLAYER_NAME;

pub use http::HttpLeaderboard;
pub use memory::MemoryLeaderboard;

fn default_player_name() -> String {
    DEFAULT_PLAYER_NAME.to_string()
}

/// Result of one match, as submitted to the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResultRequest {
    #[serde(default = "default_player_name")]
    pub player_name: String,
    pub player_score: u32,
    pub cpu_score: u32,
    pub target_score: u32,
}

/// Which side a stored record credits with the win
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Player,
    Cpu,
}

impl Winner {
    /// Service rule: the player wins only with a strictly higher score
    pub fn from_scores(player_score: u32, cpu_score: u32) -> Self {
        if player_score > cpu_score {
            Winner::Player
        } else {
            Winner::Cpu
        }
    }
}

/// A stored match record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: u64,
    pub player_name: String,
    pub player_score: u32,
    pub cpu_score: u32,
    pub winner: Winner,
    pub target_score: u32,
    /// ISO 8601 timestamp as sent by the service
    pub created_at: String,
}

/// One leaderboard row, shaped for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub id: u64,
    pub name: String,
    pub score: u32,
    pub opponent_score: u32,
    pub date: String,
    pub winner: Winner,
    pub target_score: u32,
}

impl From<GameRecord> for LeaderboardEntry {
    fn from(record: GameRecord) -> Self {
        Self {
            id: record.id,
            name: record.player_name,
            score: record.player_score,
            opponent_score: record.cpu_score,
            date: record.created_at,
            winner: record.winner,
            target_score: record.target_score,
        }
    }
}

/// One leaderboard row, e.g. `Ada 6-5 W (to 11) 1/1/2025`
///
/// Rank is left to the list that holds the rows.
impl fmt::Display for LeaderboardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = match self.winner {
            Winner::Player => "W",
            Winner::Cpu => "L",
        };
        write!(
            f,
            "{} {}-{} {} (to {}) {}",
            self.name,
            self.score,
            self.opponent_score,
            result,
            self.target_score,
            format_date(&self.date)
        )
    }
}

/// Why a leaderboard call failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    /// The request never got a response
    Network(String),
    /// The service answered with a non-success status
    Status(u16),
    /// The response body wasn't the expected JSON
    Decode(String),
    /// No transport on this target
    Unsupported,
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Status(status) => write!(f, "HTTP error! status: {status}"),
            Self::Decode(msg) => write!(f, "invalid response body: {msg}"),
            Self::Unsupported => write!(f, "leaderboard transport not available on this platform"),
        }
    }
}

impl std::error::Error for LeaderboardError {}

/// A place match results are stored and ranked
pub trait LeaderboardService {
    /// Store a result, returning the stored record
    fn submit(
        &self,
        request: &GameResultRequest,
    ) -> impl Future<Output = Result<GameRecord, LeaderboardError>>;

    /// Best records by player score, highest first
    fn top(&self, limit: usize) -> impl Future<Output = Result<Vec<GameRecord>, LeaderboardError>>;
}

/// Submit a result; failures are logged and yield `None`
pub async fn save_game_result<S: LeaderboardService>(
    service: &S,
    request: &GameResultRequest,
) -> Option<GameRecord> {
    match service.submit(request).await {
        Ok(record) => {
            log::info!(
                "Saved game result #{} ({} {}-{})",
                record.id,
                record.player_name,
                record.player_score,
                record.cpu_score
            );
            Some(record)
        }
        Err(e) => {
            log::error!("Failed to save game result: {e}");
            None
        }
    }
}

/// Fetch the leaderboard; failures are logged and yield an empty list
pub async fn fetch_leaderboard<S: LeaderboardService>(
    service: &S,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    match service.top(limit).await {
        Ok(records) => records
            .into_iter()
            .take(limit)
            .map(LeaderboardEntry::from)
            .collect(),
        Err(e) => {
            log::error!("Failed to fetch leaderboard: {e}");
            Vec::new()
        }
    }
}

/// Render a record timestamp as a short `M/D/YYYY` date
///
/// Accepts RFC 3339 and naive `YYYY-MM-DDTHH:MM:SS[.fff]` forms; anything else
/// is shown as-is.
pub fn format_date(created_at: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(created_at) {
        return dt.format("%-m/%-d/%Y").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(created_at, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%-m/%-d/%Y").to_string();
    }
    created_at.to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    /// Drive a future that never actually waits (in-memory service, failing stubs)
    pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
        let mut future = pin!(future);
        let mut cx = Context::from_waker(Waker::noop());
        loop {
            if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
                return output;
            }
        }
    }

    struct Offline;

    impl LeaderboardService for Offline {
        async fn submit(&self, _: &GameResultRequest) -> Result<GameRecord, LeaderboardError> {
            Err(LeaderboardError::Status(500))
        }

        async fn top(&self, _: usize) -> Result<Vec<GameRecord>, LeaderboardError> {
            Err(LeaderboardError::Network("connection refused".into()))
        }
    }

    fn request(name: &str, player: u32, cpu: u32) -> GameResultRequest {
        GameResultRequest {
            player_name: name.to_string(),
            player_score: player,
            cpu_score: cpu,
            target_score: player + cpu,
        }
    }

    #[test]
    fn test_failures_become_defaults() {
        assert_eq!(block_on(save_game_result(&Offline, &request("A", 3, 2))), None);
        assert!(block_on(fetch_leaderboard(&Offline, 10)).is_empty());
    }

    #[test]
    fn test_save_and_fetch_round_trip() {
        let service = MemoryLeaderboard::new();
        let saved = block_on(save_game_result(&service, &request("Ada", 4, 1))).expect("saved");
        assert_eq!(saved.winner, Winner::Player);
        block_on(save_game_result(&service, &request("Bob", 6, 5)));

        let entries = block_on(fetch_leaderboard(&service, 10));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Bob");
        assert_eq!((entries[1].score, entries[1].opponent_score), (4, 1));
    }

    #[test]
    fn test_request_json_shape() {
        let json = serde_json::to_value(request("Ada", 3, 2)).expect("serialize");
        assert_eq!(json["player_name"], "Ada");
        assert_eq!(json["cpu_score"], 2);

        let parsed: GameResultRequest =
            serde_json::from_str(r#"{"player_score":1,"cpu_score":4,"target_score":5}"#)
                .expect("deserialize");
        assert_eq!(parsed.player_name, DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn test_record_from_service_json() {
        let body = r#"[{"id":7,"player_name":"Ada","player_score":3,"cpu_score":2,
            "winner":"player","target_score":5,"created_at":"2025-03-04T10:20:30"}]"#;
        let records: Vec<GameRecord> = serde_json::from_str(body).expect("decode");
        assert_eq!(records[0].winner, Winner::Player);
        let entry = LeaderboardEntry::from(records[0].clone());
        assert_eq!(format_date(&entry.date), "3/4/2025");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-12-01T08:00:00+00:00"), "12/1/2024");
        assert_eq!(format_date("2024-12-01T08:00:00.123456"), "12/1/2024");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_entry_row_has_no_rank() {
        let entry = LeaderboardEntry {
            id: 3,
            name: "Ada".into(),
            score: 6,
            opponent_score: 5,
            date: "2025-01-01T00:00:00Z".into(),
            winner: Winner::Player,
            target_score: 11,
        };
        assert_eq!(entry.to_string(), "Ada 6-5 W (to 11) 1/1/2025");

        let lost = LeaderboardEntry {
            winner: Winner::Cpu,
            ..entry
        };
        assert!(lost.to_string().starts_with("Ada 6-5 L"));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(LeaderboardError::Status(503).to_string(), "HTTP error! status: 503");
    }
}
