//! Table-tennis serve and scoring rules
//!
//! Pure functions of the score pair. The serve changes hands every two points,
//! and every point once both sides reach `target - 1` (deuce). A match ends when
//! the total number of points played equals the target.

use super::state::Side;

/// Both sides have reached at least `target - 1` points
pub fn is_deuce(player_score: u32, opponent_score: u32, target_score: u32) -> bool {
    let threshold = target_score.saturating_sub(1);
    player_score >= threshold && opponent_score >= threshold
}

/// Whether the player serves the rally that starts at this score
pub fn is_player_serving(player_score: u32, opponent_score: u32, target_score: u32) -> bool {
    let total = player_score + opponent_score;
    if is_deuce(player_score, opponent_score, target_score) {
        let points_in_deuce = total - 2 * target_score.saturating_sub(1);
        points_in_deuce % 2 == 0
    } else {
        (total / 2) % 2 == 0
    }
}

/// Terminal condition: total points played equals the target
pub fn is_match_over(player_score: u32, opponent_score: u32, target_score: u32) -> bool {
    player_score + opponent_score == target_score
}

/// Side with the strictly higher score, `None` when level
pub fn winner(player_score: u32, opponent_score: u32) -> Option<Side> {
    match player_score.cmp(&opponent_score) {
        std::cmp::Ordering::Greater => Some(Side::Player),
        std::cmp::Ordering::Less => Some(Side::Opponent),
        std::cmp::Ordering::Equal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_serve_rotation_examples() {
        assert!(is_player_serving(0, 0, 11));
        assert!(is_player_serving(1, 0, 11));
        assert!(!is_player_serving(2, 0, 11));
        assert!(!is_player_serving(1, 2, 11));
        assert!(is_player_serving(2, 2, 11));
    }

    #[test]
    fn test_deuce_serve_rotation() {
        assert!(is_deuce(10, 10, 11));
        assert!(is_player_serving(10, 10, 11));
        assert!(!is_player_serving(11, 10, 11));
        assert!(is_player_serving(11, 11, 11));
        assert!(!is_player_serving(11, 12, 11));
        assert!(!is_deuce(10, 9, 11));
    }

    #[test]
    fn test_match_over_is_total_points() {
        assert!(!is_match_over(3, 1, 5));
        assert!(is_match_over(3, 2, 5));
        assert!(is_match_over(5, 0, 5));
        assert!(!is_match_over(5, 1, 5));
    }

    #[test]
    fn test_winner() {
        assert_eq!(winner(3, 2), Some(Side::Player));
        assert_eq!(winner(1, 4), Some(Side::Opponent));
        assert_eq!(winner(3, 3), None);
    }

    proptest! {
        #[test]
        fn prop_serve_changes_every_two_points_below_deuce(
            target in 5u32..40,
            player in 0u32..40,
            opponent in 0u32..40,
        ) {
            let total = player + opponent;
            // Compare with the score two points later, staying out of deuce
            prop_assume!(!is_deuce(player, opponent, target));
            prop_assume!(!is_deuce(player + 2, opponent, target));
            let now = is_player_serving(player, opponent, target);
            let later = is_player_serving(player + 2, opponent, target);
            prop_assert_ne!(now, later);
            if total % 2 == 0 && !is_deuce(player + 1, opponent, target) {
                prop_assert_eq!(now, is_player_serving(player + 1, opponent, target));
            }
        }

        #[test]
        fn prop_serve_changes_every_point_in_deuce(
            target in 5u32..40,
            extra_player in 0u32..10,
            extra_opponent in 0u32..10,
        ) {
            let player = target - 1 + extra_player;
            let opponent = target - 1 + extra_opponent;
            let now = is_player_serving(player, opponent, target);
            prop_assert_ne!(now, is_player_serving(player + 1, opponent, target));
            prop_assert_ne!(now, is_player_serving(player, opponent + 1, target));
        }
    }
}
