use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::stats::compute_derived_stats;
use super::validation::{validate_composition, Violation};
use crate::models::{
    Algorithm, BattleMember, BattleRequest, BossTrainer, CatalogEntry, MemberState, RosterMember,
};
use crate::store::{collections, LocalStore, StoreError};

/// Maximum team size.
pub const MAX_ROSTER_SIZE: usize = 6;

/// Why a roster mutation was refused. Returned as data so callers can show
/// it; only storage failures travel as errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterRejection {
    #[error("Your team is full (6 members). Remove one first.")]
    RosterFull,

    #[error("#{0} is already on your team")]
    DuplicateMember(i64),

    #[error("{} composition problem(s): {}", .0.len(), join_violations(.0))]
    CompositionInvalid(Vec<Violation>),

    #[error("#{0} is not a creature")]
    NotACreature(i64),

    #[error("Add at least one member to your team")]
    EmptyRoster,

    #[error("#{0} has not been customized yet")]
    Uncommitted(i64),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterOutcome {
    /// Appended at `position`.
    Added { position: usize },
    /// Overwritten in place at `position`.
    Updated { position: usize },
    Rejected(RosterRejection),
}

impl RosterOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, RosterOutcome::Rejected(_))
    }
}

/// The active team: at most six members with distinct ids, kept in
/// insertion order.
///
/// Every read-modify-write goes through one async mutex so the size check
/// and the write cannot interleave with another mutation.
pub struct RosterManager {
    store: Arc<LocalStore>,
    write_lock: Mutex<()>,
}

impl RosterManager {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Members in insertion order.
    pub async fn list_roster(&self) -> Result<Vec<RosterMember>, StoreError> {
        let mut members: Vec<RosterMember> = self.store.get_all(collections::ROSTER).await?;
        members.sort_by_key(|m| (m.slot, m.id));
        Ok(members)
    }

    pub async fn get_member(&self, id: i64) -> Result<Option<RosterMember>, StoreError> {
        self.store.get(collections::ROSTER, &id.to_string()).await
    }

    /// Add `entry` as a fresh draft: level 100, all DVs 15, no moves.
    pub async fn add_draft(&self, entry: &CatalogEntry) -> Result<RosterOutcome, StoreError> {
        let Some(draft) = RosterMember::draft(entry) else {
            return Ok(self.reject(RosterRejection::NotACreature(entry.id)));
        };

        let _guard = self.write_lock.lock().await;
        let roster = self.list_roster().await?;
        if roster.iter().any(|m| m.id == draft.id) {
            return Ok(self.reject(RosterRejection::DuplicateMember(draft.id)));
        }
        self.upsert_locked(draft, &roster).await
    }

    /// Overwrite the member with the same id in place, or append it.
    /// Fails with `RosterFull` when appending to a full team.
    ///
    /// Level and DVs are clamped into range. A customized member keeps that
    /// state only while it still validates, with its derived stats
    /// recomputed; otherwise it is stored as a draft.
    pub async fn add_or_update_member(
        &self,
        mut member: RosterMember,
    ) -> Result<RosterOutcome, StoreError> {
        normalize(&mut member);
        let _guard = self.write_lock.lock().await;
        let roster = self.list_roster().await?;
        self.upsert_locked(member, &roster).await
    }

    /// Validate `member`, compute its derived stats and store it as
    /// customized. Every violation is reported at once.
    pub async fn commit_member(
        &self,
        mut member: RosterMember,
    ) -> Result<RosterOutcome, StoreError> {
        let violations = validate_composition(&member);
        if !violations.is_empty() {
            return Ok(self.reject(RosterRejection::CompositionInvalid(violations)));
        }

        member.state = MemberState::Customized;
        self.add_or_update_member(member).await
    }

    /// Returns whether the member was on the team.
    pub async fn remove_member(&self, id: i64) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let removed = self.store.delete(collections::ROSTER, &id.to_string()).await?;
        if removed {
            info!(id, "Removed roster member");
        }
        Ok(removed)
    }

    pub async fn clear_roster(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.store.clear(collections::ROSTER).await?;
        info!("Cleared roster");
        Ok(())
    }

    /// Build the payload for the battle-evaluation service. Every member
    /// must be customized and still pass `validate_composition`.
    pub async fn battle_request(
        &self,
        boss_trainer: BossTrainer,
        algorithm: Algorithm,
    ) -> Result<Result<BattleRequest, RosterRejection>, StoreError> {
        let roster = self.list_roster().await?;
        if roster.is_empty() {
            return Ok(Err(RosterRejection::EmptyRoster));
        }

        let mut player_team = Vec::with_capacity(roster.len());
        for member in &roster {
            let Some(battle_member) = BattleMember::from_member(member) else {
                return Ok(Err(RosterRejection::Uncommitted(member.id)));
            };
            let violations = validate_composition(member);
            if !violations.is_empty() {
                return Ok(Err(RosterRejection::CompositionInvalid(violations)));
            }
            player_team.push(battle_member);
        }

        Ok(Ok(BattleRequest {
            player_team,
            boss_trainer,
            algorithm,
            player_level: None,
        }))
    }

    async fn upsert_locked(
        &self,
        mut member: RosterMember,
        roster: &[RosterMember],
    ) -> Result<RosterOutcome, StoreError> {
        if let Some((position, existing)) =
            roster.iter().enumerate().find(|(_, m)| m.id == member.id)
        {
            member.slot = existing.slot;
            self.store.put(collections::ROSTER, &member).await?;
            debug!(id = member.id, position, "Updated roster member");
            return Ok(RosterOutcome::Updated { position });
        }

        if roster.len() >= MAX_ROSTER_SIZE {
            return Ok(self.reject(RosterRejection::RosterFull));
        }

        member.slot = roster.iter().map(|m| m.slot + 1).max().unwrap_or(0);
        self.store.put(collections::ROSTER, &member).await?;
        info!(id = member.id, name = %member.name, "Added roster member");
        Ok(RosterOutcome::Added {
            position: roster.len(),
        })
    }

    fn reject(&self, rejection: RosterRejection) -> RosterOutcome {
        warn!(reason = %rejection, "Roster change rejected");
        RosterOutcome::Rejected(rejection)
    }
}

/// Clamp ranges and keep `state` and `derived_stats` consistent with the
/// member's current composition.
fn normalize(member: &mut RosterMember) {
    member.clamp_ranges();
    if member.is_customized() && validate_composition(member).is_empty() {
        member.derived_stats = Some(compute_derived_stats(member));
    } else {
        member.state = MemberState::Draft;
        member.derived_stats = None;
    }
}
