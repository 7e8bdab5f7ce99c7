//! Fastest-solve leaderboard, kept sorted and capped, persisted as TOML.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::utils::constants::game_constants::LEADERBOARD_CAPACITY;

/// One recorded solve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub time_ms: u64,
}

/// Top solves in ascending time order.
#[derive(Resource, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Leaderboard {
    #[serde(default)]
    entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Records a solve. A full board only accepts times strictly better than
    /// the current worst. Returns whether the entry was placed.
    pub fn add_score(&mut self, name: &str, time_ms: u64) -> bool {
        let entry = ScoreEntry {
            name: name.to_string(),
            time_ms,
        };
        if self.entries.len() < LEADERBOARD_CAPACITY {
            self.insert_in_order(entry);
            return true;
        }
        let worst = self.entries[self.entries.len() - 1].time_ms;
        if time_ms < worst {
            self.insert_in_order(entry);
            self.entries.truncate(LEADERBOARD_CAPACITY);
            return true;
        }
        false
    }

    // Ties keep the earlier solve ahead.
    fn insert_in_order(&mut self, entry: ScoreEntry) {
        let at = self
            .entries
            .iter()
            .position(|e| entry.time_ms < e.time_ms)
            .unwrap_or(self.entries.len());
        self.entries.insert(at, entry);
    }

    /// Reads the board from `path`; missing or corrupt files yield an empty
    /// board. Entries are re-sorted defensively in case the file was edited.
    pub fn load_or_default(path: &str) -> Leaderboard {
        let mut board = match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Leaderboard>(&contents) {
                Ok(board) => board,
                Err(e) => {
                    warn!("Could not parse {path}: {e}. Starting with an empty leaderboard.");
                    Leaderboard::default()
                }
            },
            Err(_) => Leaderboard::default(),
        };
        board.entries.sort_by_key(|e| e.time_ms);
        board.entries.truncate(LEADERBOARD_CAPACITY);
        board
    }

    /// Writes the board to `path`; failure is logged and otherwise ignored.
    pub fn save(&self, path: &str) {
        match toml::to_string_pretty(self) {
            Ok(contents) => {
                if let Err(e) = fs::write(path, contents) {
                    warn!("Could not write {path}: {e}");
                }
            }
            Err(e) => warn!("Could not serialize leaderboard: {e}"),
        }
    }
}
