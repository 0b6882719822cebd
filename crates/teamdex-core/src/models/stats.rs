//! The five battle stats and per-stat value blocks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum Stat {
    Hp,
    Attack,
    Defense,
    Special,
    Speed,
}

impl Stat {
    /// All stats in display order.
    pub const ALL: [Stat; 5] = [
        Stat::Hp,
        Stat::Attack,
        Stat::Defense,
        Stat::Special,
        Stat::Speed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stat::Hp => "hp",
            Stat::Attack => "attack",
            Stat::Defense => "defense",
            Stat::Special => "special",
            Stat::Speed => "speed",
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One value per stat. Used for base stats, DVs and derived stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct StatBlock<T> {
    pub hp: T,
    pub attack: T,
    pub defense: T,
    pub special: T,
    pub speed: T,
}

impl<T: Copy> StatBlock<T> {
    /// Block with the same value for every stat.
    pub fn uniform(value: T) -> Self {
        Self {
            hp: value,
            attack: value,
            defense: value,
            special: value,
            speed: value,
        }
    }

    pub fn get(&self, stat: Stat) -> T {
        match stat {
            Stat::Hp => self.hp,
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Special => self.special,
            Stat::Speed => self.speed,
        }
    }

    pub fn set(&mut self, stat: Stat, value: T) {
        match stat {
            Stat::Hp => self.hp = value,
            Stat::Attack => self.attack = value,
            Stat::Defense => self.defense = value,
            Stat::Special => self.special = value,
            Stat::Speed => self.speed = value,
        }
    }

    /// Build a new block by applying `f` to every stat.
    pub fn from_fn(mut f: impl FnMut(Stat) -> T) -> Self {
        Self {
            hp: f(Stat::Hp),
            attack: f(Stat::Attack),
            defense: f(Stat::Defense),
            special: f(Stat::Special),
            speed: f(Stat::Speed),
        }
    }

    /// Iterate `(stat, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Stat, T)> + '_ {
        Stat::ALL.iter().map(move |&stat| (stat, self.get(stat)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_block_get_set() {
        let mut block = StatBlock::uniform(0u8);
        block.set(Stat::Special, 12);
        assert_eq!(block.get(Stat::Special), 12);
        assert_eq!(block.get(Stat::Hp), 0);
    }

    #[test]
    fn test_stat_block_iter_order() {
        let block = StatBlock {
            hp: 1u16,
            attack: 2,
            defense: 3,
            special: 4,
            speed: 5,
        };
        let stats: Vec<Stat> = block.iter().map(|(s, _)| s).collect();
        assert_eq!(stats, Stat::ALL.to_vec());
        let values: Vec<u16> = block.iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }
}
