use std::collections::HashSet;

use thiserror::Error;

use crate::models::{RosterMember, Stat, MAX_DV, MAX_LEVEL, MIN_LEVEL, MOVE_SLOTS};

/// One reason a member cannot be committed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("You must select exactly 4 moves ({found}/4 selected)")]
    MoveCount { found: usize },

    #[error("{0} is selected more than once")]
    DuplicateMove(String),

    #[error("{0} is not in this creature's movepool")]
    MoveNotInMovepool(String),

    #[error("{stat} DV {value} is outside 0-15")]
    DeterminantOutOfRange { stat: Stat, value: u8 },

    #[error("Level {0} is outside 1-100")]
    LevelOutOfRange(u8),
}

/// Every rule `member` breaks. Empty means it may be committed.
pub fn validate_composition(member: &RosterMember) -> Vec<Violation> {
    let mut violations = Vec::new();

    if member.selected_moves.len() != MOVE_SLOTS {
        violations.push(Violation::MoveCount {
            found: member.selected_moves.len(),
        });
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for name in &member.selected_moves {
        if !seen.insert(name.as_str()) {
            if reported.insert(name.as_str()) {
                violations.push(Violation::DuplicateMove(name.clone()));
            }
            continue;
        }
        if !member.movepool.iter().any(|m| m == name) {
            violations.push(Violation::MoveNotInMovepool(name.clone()));
        }
    }

    for (stat, value) in member.dvs.iter() {
        if value > MAX_DV {
            violations.push(Violation::DeterminantOutOfRange { stat, value });
        }
    }

    if !(MIN_LEVEL..=MAX_LEVEL).contains(&member.level) {
        violations.push(Violation::LevelOutOfRange(member.level));
    }

    violations
}
