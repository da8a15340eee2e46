//! Owner and manager administration.
//!
//! A market has exactly one owner and a set of managers. Only the owner may
//! change the set or transfer ownership; the owner is privileged for manager
//! operations without being a member of the set. Revoking an actor that is
//! not currently a manager is an idempotent success — the access check is on
//! the caller, not on the target's membership.

use std::collections::BTreeSet;

use opentender_types::{ActorId, MarketError, Result};
use tracing::info;

/// Owner + manager set with owner-only mutation.
#[derive(Debug, Clone)]
pub struct AccessControl {
    owner: ActorId,
    managers: BTreeSet<ActorId>,
}

impl AccessControl {
    #[must_use]
    pub fn new(owner: ActorId) -> Self {
        Self {
            owner,
            managers: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn owner(&self) -> ActorId {
        self.owner
    }

    #[must_use]
    pub fn is_owner(&self, actor: ActorId) -> bool {
        self.owner == actor
    }

    #[must_use]
    pub fn is_manager(&self, actor: ActorId) -> bool {
        self.managers.contains(&actor)
    }

    /// Owner or manager: the privilege level required by curation calls.
    #[must_use]
    pub fn is_privileged(&self, actor: ActorId) -> bool {
        self.is_owner(actor) || self.is_manager(actor)
    }

    /// Managers in stable order.
    #[must_use]
    pub fn managers(&self) -> Vec<ActorId> {
        self.managers.iter().copied().collect()
    }

    /// Add `actor` to the manager set. Owner-only.
    pub fn add_manager(&mut self, caller: ActorId, actor: ActorId) -> Result<()> {
        self.require_owner(caller)?;
        if !self.managers.insert(actor) {
            return Err(MarketError::DuplicateManager(actor));
        }
        Ok(())
    }

    /// Remove `actor` from the manager set. Owner-only. Returns whether the
    /// actor was actually a member; removing a non-member still succeeds.
    pub fn revoke_manager(&mut self, caller: ActorId, actor: ActorId) -> Result<bool> {
        self.require_owner(caller)?;
        Ok(self.managers.remove(&actor))
    }

    /// Transfer ownership. Owner-only; the manager set is untouched and the
    /// previous owner keeps nothing. Returns the previous owner.
    pub fn change_owner(&mut self, caller: ActorId, new_owner: ActorId) -> Result<ActorId> {
        self.require_owner(caller)?;
        let previous = self.owner;
        self.owner = new_owner;
        info!(%previous, %new_owner, "ownership transferred");
        Ok(previous)
    }

    fn require_owner(&self, caller: ActorId) -> Result<()> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(MarketError::AccessDenied { actor: caller })
        }
    }
}
