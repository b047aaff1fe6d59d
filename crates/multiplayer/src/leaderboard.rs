use std::collections::HashSet;

use serde::Serialize;

use crate::protocol::ScoreEntry;

/// One row of the in-game leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStanding {
    pub name: String,
    pub score: u32,
    pub dead: bool,
}

/// Score-sorted view of every player seen this session
///
/// Scores are kept per player across snapshots, in the order players first
/// appeared. A player missing from a later snapshot keeps their row. Once a
/// player is reported dead they stay dead and their score is frozen at the
/// last value seen while alive.
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    scores: Vec<(String, u32)>,
    dead: HashSet<String>,
    standings: Vec<PlayerStanding>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a `SCORES` snapshot and rebuild the standings
    pub fn apply_snapshot(&mut self, entries: &[ScoreEntry]) {
        for entry in entries {
            if entry.status.is_dead() {
                self.dead.insert(entry.name.clone());
            }
            let frozen = self.dead.contains(&entry.name);

            match self.scores.iter_mut().find(|(name, _)| *name == entry.name) {
                Some((_, score)) if !frozen => *score = entry.score,
                Some(_) => {}
                // First sighting: take the reported score even if already dead
                None => self.scores.push((entry.name.clone(), entry.score)),
            }
        }

        let mut standings: Vec<PlayerStanding> = self
            .scores
            .iter()
            .map(|(name, score)| PlayerStanding {
                name: name.clone(),
                score: *score,
                dead: self.dead.contains(name),
            })
            .collect();
        // Stable sort: ties keep first-arrival order
        standings.sort_by(|a, b| b.score.cmp(&a.score));

        tracing::debug!(players = standings.len(), dead = self.dead.len(), "leaderboard updated");
        self.standings = standings;
    }

    pub fn standings(&self) -> &[PlayerStanding] {
        &self.standings
    }

    pub fn is_dead(&self, name: &str) -> bool {
        self.dead.contains(name)
    }

    pub fn len(&self) -> usize {
        self.standings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{PlayerStatus, ServerMessage};

    fn entries(text: &str) -> Vec<ScoreEntry> {
        match text.parse::<ServerMessage>().unwrap() {
            ServerMessage::Scores(entries) => entries,
            other => panic!("expected scores, got {:?}", other),
        }
    }

    #[test]
    fn test_sorted_descending_with_dead_marked() {
        let mut board = Leaderboard::new();
        board.apply_snapshot(&entries("SCORES\nA:500\nB:800:DEAD\nC:300"));

        let rows: Vec<_> = board
            .standings()
            .iter()
            .map(|s| (s.name.as_str(), s.score, s.dead))
            .collect();
        assert_eq!(
            rows,
            vec![("B", 800, true), ("A", 500, false), ("C", 300, false)]
        );
    }

    #[test]
    fn test_ties_keep_arrival_order() {
        let mut board = Leaderboard::new();
        board.apply_snapshot(&entries("SCORES\nzed:100:0\namy:100:0\nbob:200:0"));
        let names: Vec<_> = board.standings().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["bob", "zed", "amy"]);
    }

    #[test]
    fn test_dead_is_sticky() {
        let mut board = Leaderboard::new();
        board.apply_snapshot(&[ScoreEntry {
            name: "A".to_string(),
            score: 10,
            status: PlayerStatus::Delta(-1),
        }]);
        board.apply_snapshot(&[ScoreEntry {
            name: "A".to_string(),
            score: 10,
            status: PlayerStatus::Delta(0),
        }]);
        assert!(board.is_dead("A"));
        assert!(board.standings()[0].dead);
    }

    fn rows(board: &Leaderboard) -> Vec<(&str, u32, bool)> {
        board
            .standings()
            .iter()
            .map(|s| (s.name.as_str(), s.score, s.dead))
            .collect()
    }

    #[test]
    fn test_dead_player_keeps_last_live_score() {
        let mut board = Leaderboard::new();
        board.apply_snapshot(&entries("SCORES\nA:500:1\nB:300:1"));
        board.apply_snapshot(&entries("SCORES\nA:900:-1\nB:300:1"));
        assert_eq!(rows(&board), vec![("A", 500, true), ("B", 300, false)]);

        // Later reports for a dead player never move their score
        board.apply_snapshot(&entries("SCORES\nA:2000:0"));
        assert_eq!(rows(&board)[0], ("A", 500, true));
    }

    #[test]
    fn test_missing_players_stay_on_the_board() {
        let mut board = Leaderboard::new();
        board.apply_snapshot(&entries("SCORES\nA:500:1\nB:300:1"));
        board.apply_snapshot(&entries("SCORES\nA:900:-1\nB:300:1"));
        board.apply_snapshot(&entries("SCORES\nB:400:1"));

        assert_eq!(board.len(), 2);
        assert_eq!(rows(&board), vec![("A", 500, true), ("B", 400, false)]);
    }

    #[test]
    fn test_ties_use_first_arrival_not_latest_snapshot() {
        let mut board = Leaderboard::new();
        board.apply_snapshot(&entries("SCORES\nzed:100:0\namy:50:0"));
        board.apply_snapshot(&entries("SCORES\namy:100:0\nzed:100:0"));
        let names: Vec<_> = board.standings().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["zed", "amy"]);
    }
}
