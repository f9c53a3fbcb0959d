use serde::Serialize;

use super::gamification::{GamificationState, Level};

/// One employee considered for the leaderboard, already scored.
#[derive(Debug, Clone)]
pub struct LeaderboardCandidate {
    pub employee_id: i64,
    pub name: String,
    pub state: GamificationState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based position inside the ranked page.
    pub rank: usize,
    pub employee_id: i64,
    pub name: String,
    pub points: u32,
    pub level: Level,
    pub is_me: bool,
}

/// Sorts candidates by points, highest first, and keeps the top `limit`.
///
/// The sort is stable, so employees with equal points keep the order they
/// were fetched in. Ranks are relative to `candidates` only.
pub fn rank_leaderboard(
    mut candidates: Vec<LeaderboardCandidate>,
    requester_id: i64,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    candidates.sort_by(|a, b| b.state.points.cmp(&a.state.points));

    candidates
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, c)| LeaderboardEntry {
            rank: idx + 1,
            employee_id: c.employee_id,
            is_me: c.employee_id == requester_id,
            points: c.state.points,
            level: c.state.level,
            name: c.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::calculate_gamification;
    use crate::scoring::fixtures::present_run;
    use pretty_assertions::assert_eq;

    fn candidate(employee_id: i64, name: &str, days: i64) -> LeaderboardCandidate {
        LeaderboardCandidate {
            employee_id,
            name: name.to_string(),
            state: calculate_gamification(&present_run(1, days)),
        }
    }

    #[test]
    fn sorted_descending_with_ranks() {
        let board = rank_leaderboard(
            vec![candidate(1, "Ani", 3), candidate(2, "Budi", 20), candidate(3, "Citra", 10)],
            3,
            10,
        );

        let names: Vec<_> = board.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Budi", "Citra", "Ani"]);
        assert_eq!(board.iter().map(|e| e.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
        for pair in board.windows(2) {
            assert!(pair[0].points >= pair[1].points);
        }
        assert_eq!(board.iter().filter(|e| e.is_me).count(), 1);
        assert!(board[1].is_me);
    }

    #[test]
    fn ties_keep_input_order() {
        let board = rank_leaderboard(
            vec![
                candidate(5, "Eko", 5),
                candidate(4, "Dewi", 5),
                candidate(6, "Fajar", 12),
                candidate(7, "Gita", 5),
            ],
            0,
            10,
        );
        let ids: Vec<_> = board.iter().map(|e| e.employee_id).collect();
        assert_eq!(ids, vec![6, 5, 4, 7]);
        assert!(board.iter().all(|e| !e.is_me));
    }

    #[test]
    fn limit_truncates_and_may_drop_the_requester() {
        let board = rank_leaderboard(
            vec![candidate(1, "Ani", 1), candidate(2, "Budi", 2), candidate(3, "Citra", 3)],
            1,
            2,
        );
        assert_eq!(board.len(), 2);
        assert!(board.iter().all(|e| e.employee_id != 1));
    }

    #[test]
    fn empty_input() {
        assert!(rank_leaderboard(Vec::new(), 1, 10).is_empty());
    }
}
