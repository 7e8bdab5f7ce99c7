//! User-configurable key table: which key triggers which face turn.
//!
//! Persisted as a small TOML file next to the game. A missing or unreadable
//! file falls back to the defaults (and writes them out), so the game always
//! starts.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;

use crate::utils::moves::Move;

/// Default layout: left hand turns clockwise, right hand counter-clockwise.
pub const DEFAULT_KEYBINDS: [(&str, &str); 12] = [
    ("Q", "R"),
    ("P", "R'"),
    ("W", "L"),
    ("O", "L'"),
    ("E", "U"),
    ("I", "U'"),
    ("R", "D"),
    ("U", "D'"),
    ("F", "F"),
    ("J", "F'"),
    ("G", "B"),
    ("H", "B'"),
];

/// On-disk shape: `[binds]` table of key name to move symbol.
#[derive(Serialize, Deserialize, Default)]
struct KeybindsFile {
    binds: BTreeMap<String, String>,
}

/// Resolved key table consulted by the input layer.
#[derive(Resource)]
pub struct Keybinds {
    map: HashMap<KeyCode, Move>,
}

impl Default for Keybinds {
    fn default() -> Self {
        Keybinds::from_entries(
            DEFAULT_KEYBINDS
                .iter()
                .map(|(key, mv)| (key.to_string(), mv.to_string())),
        )
    }
}

impl Keybinds {
    /// The move bound to `key`, if any.
    pub fn move_for(&self, key: KeyCode) -> Option<Move> {
        self.map.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Builds a table from (key name, move symbol) pairs. Entries that name
    /// an unbindable key or an illegal move are skipped with a warning
    /// rather than failing the whole table.
    fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Keybinds {
        let mut map = HashMap::new();
        for (name, symbol) in entries {
            let Some(key) = key_from_name(&name) else {
                warn!("Ignoring keybind for unknown key {name:?}");
                continue;
            };
            let Some(mv) = Move::parse(&symbol) else {
                warn!("Ignoring keybind {name:?} with illegal move {symbol:?}");
                continue;
            };
            if map.insert(key, mv).is_some() {
                warn!("Key {name:?} bound twice, keeping the last entry");
            }
        }
        map.shrink_to_fit();
        Keybinds { map }
    }

    /// Reads the key table from `path`. A missing file writes the defaults
    /// out; a corrupt file logs and falls back without touching the disk.
    pub fn load_or_default(path: &str) -> Keybinds {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<KeybindsFile>(&contents) {
                Ok(file) => Keybinds::from_entries(file.binds),
                Err(e) => {
                    warn!("Could not parse {path}: {e}. Using default keybinds.");
                    Keybinds::default()
                }
            },
            Err(_) => {
                let binds = Keybinds::default();
                info!("No keybinds file found, writing defaults to {path}");
                binds.save(path);
                binds
            }
        }
    }

    /// Writes the table to `path`; failure is logged and otherwise ignored.
    pub fn save(&self, path: &str) {
        let mut file = KeybindsFile::default();
        for (key, mv) in &self.map {
            if let Some(name) = key_name(*key) {
                file.binds.insert(name.to_string(), mv.to_string());
            }
        }
        match toml::to_string_pretty(&file) {
            Ok(contents) => {
                if let Err(e) = fs::write(path, contents) {
                    warn!("Could not write {path}: {e}");
                }
            }
            Err(e) => warn!("Could not serialize keybinds: {e}"),
        }
    }
}

/// Bindable keys are letters and digits; everything else is reserved for
/// the fixed control keys.
fn key_from_name(name: &str) -> Option<KeyCode> {
    let upper = name.trim().to_ascii_uppercase();
    let key = match upper.as_str() {
        "A" => KeyCode::KeyA,
        "B" => KeyCode::KeyB,
        "C" => KeyCode::KeyC,
        "D" => KeyCode::KeyD,
        "E" => KeyCode::KeyE,
        "F" => KeyCode::KeyF,
        "G" => KeyCode::KeyG,
        "H" => KeyCode::KeyH,
        "I" => KeyCode::KeyI,
        "J" => KeyCode::KeyJ,
        "K" => KeyCode::KeyK,
        "L" => KeyCode::KeyL,
        "M" => KeyCode::KeyM,
        "N" => KeyCode::KeyN,
        "O" => KeyCode::KeyO,
        "P" => KeyCode::KeyP,
        "Q" => KeyCode::KeyQ,
        "R" => KeyCode::KeyR,
        "S" => KeyCode::KeyS,
        "T" => KeyCode::KeyT,
        "U" => KeyCode::KeyU,
        "V" => KeyCode::KeyV,
        "W" => KeyCode::KeyW,
        "X" => KeyCode::KeyX,
        "Y" => KeyCode::KeyY,
        "Z" => KeyCode::KeyZ,
        "0" => KeyCode::Digit0,
        "1" => KeyCode::Digit1,
        "2" => KeyCode::Digit2,
        "3" => KeyCode::Digit3,
        "4" => KeyCode::Digit4,
        "5" => KeyCode::Digit5,
        "6" => KeyCode::Digit6,
        "7" => KeyCode::Digit7,
        "8" => KeyCode::Digit8,
        "9" => KeyCode::Digit9,
        _ => return None,
    };
    Some(key)
}

fn key_name(key: KeyCode) -> Option<&'static str> {
    let name = match key {
        KeyCode::KeyA => "A",
        KeyCode::KeyB => "B",
        KeyCode::KeyC => "C",
        KeyCode::KeyD => "D",
        KeyCode::KeyE => "E",
        KeyCode::KeyF => "F",
        KeyCode::KeyG => "G",
        KeyCode::KeyH => "H",
        KeyCode::KeyI => "I",
        KeyCode::KeyJ => "J",
        KeyCode::KeyK => "K",
        KeyCode::KeyL => "L",
        KeyCode::KeyM => "M",
        KeyCode::KeyN => "N",
        KeyCode::KeyO => "O",
        KeyCode::KeyP => "P",
        KeyCode::KeyQ => "Q",
        KeyCode::KeyR => "R",
        KeyCode::KeyS => "S",
        KeyCode::KeyT => "T",
        KeyCode::KeyU => "U",
        KeyCode::KeyV => "V",
        KeyCode::KeyW => "W",
        KeyCode::KeyX => "X",
        KeyCode::KeyY => "Y",
        KeyCode::KeyZ => "Z",
        KeyCode::Digit0 => "0",
        KeyCode::Digit1 => "1",
        KeyCode::Digit2 => "2",
        KeyCode::Digit3 => "3",
        KeyCode::Digit4 => "4",
        KeyCode::Digit5 => "5",
        KeyCode::Digit6 => "6",
        KeyCode::Digit7 => "7",
        KeyCode::Digit8 => "8",
        KeyCode::Digit9 => "9",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_table_covers_all_twelve_moves() {
        let binds = Keybinds::default();
        assert_eq!(binds.len(), 12);
        let bound: HashSet<Move> = binds.map.values().copied().collect();
        assert_eq!(bound.len(), 12, "each move bound exactly once");
        for mv in Move::ALL {
            assert!(bound.contains(&mv), "move {mv} unbound");
        }
    }

    #[test]
    fn default_bindings_match_the_classic_layout() {
        let binds = Keybinds::default();
        assert_eq!(binds.move_for(KeyCode::KeyQ), Move::parse("R"));
        assert_eq!(binds.move_for(KeyCode::KeyP), Move::parse("R'"));
        assert_eq!(binds.move_for(KeyCode::KeyG), Move::parse("B"));
        assert_eq!(binds.move_for(KeyCode::KeyZ), None);
    }

    #[test]
    fn file_entries_parse_into_the_table() {
        let contents = "[binds]\nQ = \"R\"\n3 = \"U'\"\n";
        let file: KeybindsFile = toml::from_str(contents).unwrap();
        let binds = Keybinds::from_entries(file.binds);
        assert_eq!(binds.move_for(KeyCode::KeyQ), Move::parse("R"));
        assert_eq!(binds.move_for(KeyCode::Digit3), Move::parse("U'"));
        assert_eq!(binds.len(), 2);
    }

    #[test]
    fn bad_entries_are_skipped_not_fatal() {
        let entries = vec![
            ("Enter".to_string(), "R".to_string()), // reserved key
            ("Q".to_string(), "R2".to_string()),    // illegal move
            ("W".to_string(), "L".to_string()),
        ];
        let binds = Keybinds::from_entries(entries);
        assert_eq!(binds.len(), 1);
        assert_eq!(binds.move_for(KeyCode::KeyW), Move::parse("L"));
    }

    #[test]
    fn serialized_defaults_parse_back_identically() {
        let binds = Keybinds::default();
        let mut file = KeybindsFile::default();
        for (key, mv) in &binds.map {
            file.binds
                .insert(key_name(*key).unwrap().to_string(), mv.to_string());
        }
        let contents = toml::to_string_pretty(&file).unwrap();
        let reparsed: KeybindsFile = toml::from_str(&contents).unwrap();
        let rebuilt = Keybinds::from_entries(reparsed.binds);
        assert_eq!(rebuilt.map, binds.map);
    }

    #[test]
    fn key_names_round_trip() {
        for (name, _) in DEFAULT_KEYBINDS {
            let key = key_from_name(name).unwrap();
            assert_eq!(key_name(key), Some(name));
        }
    }
}
