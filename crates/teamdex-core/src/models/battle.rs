//! Request payload for the external battle-evaluation service.

use serde::{Deserialize, Serialize};

use super::roster::RosterMember;
use super::stats::StatBlock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum BossTrainer {
    Blue,
    Giovanni,
    Lance,
}

impl BossTrainer {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "blue" => Some(BossTrainer::Blue),
            "giovanni" => Some(BossTrainer::Giovanni),
            "lance" => Some(BossTrainer::Lance),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum Algorithm {
    Greedy,
    Dp,
    #[default]
    Dijkstra,
}

impl Algorithm {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "greedy" => Some(Algorithm::Greedy),
            "dp" => Some(Algorithm::Dp),
            "dijkstra" => Some(Algorithm::Dijkstra),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct BattleRequest {
    pub player_team: Vec<BattleMember>,
    pub boss_trainer: BossTrainer,
    pub algorithm: Algorithm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_level: Option<u8>,
}

/// A committed roster member as the battle service expects it.
/// `moves` carries only the four selected moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct BattleMember {
    pub id: i64,
    pub name: String,
    pub types: Vec<String>,
    pub base_stats: StatBlock<u16>,
    pub moves: Vec<String>,
    pub level: u8,
    pub dvs: StatBlock<u8>,
    pub calculated_stats: StatBlock<u16>,
}

impl BattleMember {
    /// `None` while the member is still a draft.
    pub fn from_member(member: &RosterMember) -> Option<Self> {
        let calculated_stats = member.derived_stats?;
        if !member.is_customized() {
            return None;
        }
        Some(Self {
            id: member.id,
            name: member.name.clone(),
            types: member.types.clone(),
            base_stats: member.base_stats,
            moves: member.selected_moves.clone(),
            level: member.level,
            dvs: member.dvs,
            calculated_stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battle_request_wire_shape() {
        let request = BattleRequest {
            player_team: Vec::new(),
            boss_trainer: BossTrainer::Giovanni,
            algorithm: Algorithm::default(),
            player_level: None,
        };
        let value = serde_json::to_value(&request).expect("serialize request");
        assert_eq!(value["bossTrainer"], "giovanni");
        assert_eq!(value["algorithm"], "dijkstra");
        assert!(value.get("playerTeam").is_some());
        assert!(value.get("playerLevel").is_none());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(BossTrainer::parse("Lance"), Some(BossTrainer::Lance));
        assert_eq!(BossTrainer::parse("brock"), None);
        assert_eq!(Algorithm::parse("DP"), Some(Algorithm::Dp));
    }
}
