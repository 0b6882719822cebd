//! Roster members: creatures customized for the team.

use serde::{Deserialize, Serialize};

use super::catalog::{CatalogEntry, Sprites};
use super::stats::{Stat, StatBlock};
use crate::store::Record;

/// Lowest allowed level.
pub const MIN_LEVEL: u8 = 1;

/// Highest allowed level.
pub const MAX_LEVEL: u8 = 100;

/// Highest allowed determinant value.
pub const MAX_DV: u8 = 15;

/// Number of move slots a committed member must fill.
pub const MOVE_SLOTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum MemberState {
    /// Added with defaults, no committed moves.
    Draft,
    /// Validated, derived stats computed.
    Customized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RosterMember {
    pub id: i64,
    pub name: String,
    pub types: Vec<String>,
    pub base_stats: StatBlock<u16>,
    pub movepool: Vec<String>,
    #[serde(default)]
    pub sprites: Sprites,
    pub level: u8,
    pub dvs: StatBlock<u8>,
    pub selected_moves: Vec<String>,
    pub derived_stats: Option<StatBlock<u16>>,
    pub state: MemberState,
    /// Insertion ordinal; the roster is listed in ascending slot order.
    #[serde(default)]
    pub slot: u32,
}

impl RosterMember {
    /// Fresh draft for a creature entry: level 100, all DVs 15, no moves.
    /// Returns `None` for items.
    pub fn draft(entry: &CatalogEntry) -> Option<Self> {
        let creature = entry.as_creature()?;
        Some(Self {
            id: entry.id,
            name: entry.name.clone(),
            types: creature.types.clone(),
            base_stats: creature.base_stats,
            movepool: creature.movepool.clone(),
            sprites: creature.sprites.clone(),
            level: MAX_LEVEL,
            dvs: StatBlock::uniform(MAX_DV),
            selected_moves: Vec::new(),
            derived_stats: None,
            state: MemberState::Draft,
            slot: 0,
        })
    }

    pub fn is_customized(&self) -> bool {
        self.state == MemberState::Customized
    }

    /// Set the level, clamped into [1, 100].
    pub fn set_level(&mut self, level: i64) {
        self.level = level.clamp(MIN_LEVEL as i64, MAX_LEVEL as i64) as u8;
    }

    /// Set one determinant value, clamped into [0, 15].
    pub fn set_dv(&mut self, stat: Stat, value: i64) {
        self.dvs.set(stat, value.clamp(0, MAX_DV as i64) as u8);
    }

    /// Pull the level and every DV back into range.
    pub fn clamp_ranges(&mut self) {
        self.set_level(i64::from(self.level));
        for stat in Stat::ALL {
            self.set_dv(stat, i64::from(self.dvs.get(stat)));
        }
    }

    /// Replace the selected moves. Blank names are dropped, order is kept.
    pub fn set_moves<I, S>(&mut self, moves: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_moves = moves
            .into_iter()
            .map(Into::into)
            .map(|m: String| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();
    }

    /// Put `name` in move slot `slot` (0-3). Filling a slot past the end
    /// appends; a blank name empties the slot. Returns false for slots
    /// outside 0-3.
    pub fn set_move(&mut self, slot: usize, name: &str) -> bool {
        if slot >= MOVE_SLOTS {
            return false;
        }
        let name = name.trim();
        match (slot < self.selected_moves.len(), name.is_empty()) {
            (true, true) => {
                self.selected_moves.remove(slot);
            }
            (true, false) => self.selected_moves[slot] = name.to_string(),
            (false, true) => {}
            (false, false) => self.selected_moves.push(name.to_string()),
        }
        true
    }
}

impl Record for RosterMember {
    fn key(&self) -> String {
        self.id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreaturePayload, EntityKind, ItemCategory, ItemPayload};

    fn creature_entry() -> CatalogEntry {
        CatalogEntry {
            id: 6,
            name: "charizard".to_string(),
            entity: EntityKind::Creature(CreaturePayload {
                types: vec!["fire".to_string(), "flying".to_string()],
                base_stats: StatBlock {
                    hp: 78,
                    attack: 84,
                    defense: 78,
                    special: 85,
                    speed: 100,
                },
                movepool: vec!["flamethrower".to_string(), "slash".to_string()],
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_draft_defaults() {
        let member = RosterMember::draft(&creature_entry()).expect("creature draft");
        assert_eq!(member.level, 100);
        assert_eq!(member.dvs, StatBlock::uniform(15));
        assert!(member.selected_moves.is_empty());
        assert_eq!(member.state, MemberState::Draft);
        assert!(member.derived_stats.is_none());
    }

    #[test]
    fn test_draft_rejects_items() {
        let item = CatalogEntry {
            id: 17,
            name: "potion".to_string(),
            entity: EntityKind::Item(ItemPayload {
                category: ItemCategory::Healing,
                cost: 300,
                effect: String::new(),
                sprite: None,
                heal_amount: Some(20),
                usable_in_battle: true,
                generation: 1,
            }),
        };
        assert!(RosterMember::draft(&item).is_none());
    }

    #[test]
    fn test_setters_clamp() {
        let mut member = RosterMember::draft(&creature_entry()).expect("creature draft");
        member.set_level(0);
        assert_eq!(member.level, 1);
        member.set_level(250);
        assert_eq!(member.level, 100);
        member.set_dv(Stat::Attack, -3);
        assert_eq!(member.dvs.attack, 0);
        member.set_dv(Stat::Speed, 99);
        assert_eq!(member.dvs.speed, 15);
    }

    #[test]
    fn test_clamp_ranges() {
        let mut member = RosterMember::draft(&creature_entry()).expect("creature draft");
        member.level = 250;
        member.dvs.attack = 99;
        member.dvs.special = 7;
        member.clamp_ranges();
        assert_eq!(member.level, 100);
        assert_eq!(member.dvs.attack, 15);
        assert_eq!(member.dvs.special, 7);

        member.level = 0;
        member.clamp_ranges();
        assert_eq!(member.level, 1);
    }

    #[test]
    fn test_set_moves_drops_blanks() {
        let mut member = RosterMember::draft(&creature_entry()).expect("creature draft");
        member.set_moves(["slash", "", "  ", "flamethrower"]);
        assert_eq!(member.selected_moves, vec!["slash", "flamethrower"]);
    }

    #[test]
    fn test_set_move_edits_one_slot() {
        let mut member = RosterMember::draft(&creature_entry()).expect("creature draft");
        assert!(member.set_move(0, "slash"));
        assert!(member.set_move(3, "flamethrower"));
        assert_eq!(member.selected_moves, vec!["slash", "flamethrower"]);

        assert!(member.set_move(0, "flamethrower"));
        assert_eq!(member.selected_moves, vec!["flamethrower", "flamethrower"]);

        assert!(member.set_move(1, " "));
        assert_eq!(member.selected_moves, vec!["flamethrower"]);

        assert!(!member.set_move(4, "slash"));
        assert_eq!(member.selected_moves.len(), 1);
    }
}
