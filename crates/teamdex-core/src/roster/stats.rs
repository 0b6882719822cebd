//! Derived stat formulas.
//!
//! HP:    floor(((base + dv) * 2 + 63) * level / 100) + level + 10
//! Other: floor(((base + dv) * 2 + 63) * level / 100) + 5

use crate::models::{RosterMember, Stat, StatBlock};

/// One derived stat. Pure and deterministic.
pub fn derive_stat(stat: Stat, base: u16, dv: u8, level: u8) -> u16 {
    let level = u32::from(level);
    let scaled = ((u32::from(base) + u32::from(dv)) * 2 + 63) * level / 100;
    let value = match stat {
        Stat::Hp => scaled + level + 10,
        _ => scaled + 5,
    };
    value.min(u32::from(u16::MAX)) as u16
}

/// All five derived stats of `member` from its base stats, DVs and level.
pub fn compute_derived_stats(member: &RosterMember) -> StatBlock<u16> {
    derive_stats(&member.base_stats, &member.dvs, member.level)
}

pub fn derive_stats(base: &StatBlock<u16>, dvs: &StatBlock<u8>, level: u8) -> StatBlock<u16> {
    StatBlock::from_fn(|stat| derive_stat(stat, base.get(stat), dvs.get(stat), level))
}
