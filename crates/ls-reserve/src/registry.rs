//! `ReservationRegistry` — at most one live claim per target.
//!
//! Claims are keyed by target in a `BTreeMap`, so every query that walks the
//! registry (`reserved_by`, `release_claimant`, hashing for desync checks)
//! sees the same order on every participant.
//!
//! Each successful claim carries a fresh token.  A handle only releases the
//! exact claim it was issued for: once a target has been released and
//! re-reserved by someone else, the old handle is stale and releasing it
//! does nothing.

use std::collections::BTreeMap;

use ls_core::ActorId;

use crate::{ReserveError, ReserveResult};

/// Proof of one claim.  Returned by [`ReservationRegistry::reserve`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReservationHandle {
    pub target:   ActorId,
    pub claimant: ActorId,
    token:        u64,
}

#[derive(Copy, Clone, Debug)]
struct Claim {
    claimant: ActorId,
    token:    u64,
}

#[derive(Default, Debug)]
pub struct ReservationRegistry {
    claims:     BTreeMap<ActorId, Claim>,
    next_token: u64,
}

impl ReservationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `target` for `claimant`.  First successful claim wins; any
    /// further claim fails until the holder releases.
    pub fn reserve(&mut self, target: ActorId, claimant: ActorId) -> ReserveResult<ReservationHandle> {
        if target == claimant {
            return Err(ReserveError::SelfClaim(target));
        }
        if let Some(held) = self.claims.get(&target) {
            return Err(ReserveError::AlreadyHeld { target, holder: held.claimant });
        }
        let token = self.next_token;
        self.next_token += 1;
        self.claims.insert(target, Claim { claimant, token });
        Ok(ReservationHandle { target, claimant, token })
    }

    #[inline]
    pub fn is_reserved(&self, target: ActorId) -> bool {
        self.claims.contains_key(&target)
    }

    pub fn holder(&self, target: ActorId) -> Option<ActorId> {
        self.claims.get(&target).map(|c| c.claimant)
    }

    /// `true` while `handle` is the live claim on its target.
    pub fn is_live(&self, handle: ReservationHandle) -> bool {
        self.claims
            .get(&handle.target)
            .is_some_and(|c| c.token == handle.token)
    }

    /// Release the claim `handle` was issued for.  Stale handles are ignored
    /// and return `false`.
    pub fn release(&mut self, handle: ReservationHandle) -> bool {
        if !self.is_live(handle) {
            return false;
        }
        self.claims.remove(&handle.target);
        true
    }

    /// Release every claim held by `claimant` (it was destroyed or given a
    /// new order).  Returns the freed targets in ascending order.
    pub fn release_claimant(&mut self, claimant: ActorId) -> Vec<ActorId> {
        let freed: Vec<ActorId> = self.reserved_by(claimant).collect();
        for t in &freed {
            self.claims.remove(t);
        }
        freed
    }

    /// Forcibly drop the claim on `target` (the target was destroyed).
    /// Returns the previous holder.
    pub fn release_target(&mut self, target: ActorId) -> Option<ActorId> {
        self.claims.remove(&target).map(|c| c.claimant)
    }

    /// Targets currently held by `claimant`, ascending.
    pub fn reserved_by(&self, claimant: ActorId) -> impl Iterator<Item = ActorId> + '_ {
        self.claims
            .iter()
            .filter(move |(_, c)| c.claimant == claimant)
            .map(|(&t, _)| t)
    }

    /// `(target, holder)` pairs in ascending target order.
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, ActorId)> + '_ {
        self.claims.iter().map(|(&t, c)| (t, c.claimant))
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
