//! Unit tests for ls-reserve.

#[cfg(test)]
mod registry {
    use ls_core::ActorId;

    use crate::{ReservationRegistry, ReserveError};

    const DOCK: ActorId = ActorId(10);
    const PAD: ActorId = ActorId(11);
    const A: ActorId = ActorId(1);
    const B: ActorId = ActorId(2);

    #[test]
    fn first_claim_wins_in_the_same_tick() {
        let mut reg = ReservationRegistry::new();
        let h = reg.reserve(DOCK, A).unwrap();
        assert_eq!(h.target, DOCK);
        assert_eq!(h.claimant, A);
        assert_eq!(reg.reserve(DOCK, B), Err(ReserveError::AlreadyHeld { target: DOCK, holder: A }));
        assert!(reg.is_reserved(DOCK));
        assert_eq!(reg.holder(DOCK), Some(A));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn holder_cannot_claim_twice() {
        let mut reg = ReservationRegistry::new();
        reg.reserve(DOCK, A).unwrap();
        assert!(reg.reserve(DOCK, A).is_err());
    }

    #[test]
    fn self_claim_rejected() {
        let mut reg = ReservationRegistry::new();
        assert_eq!(reg.reserve(A, A), Err(ReserveError::SelfClaim(A)));
        assert!(reg.is_empty());
    }

    #[test]
    fn release_frees_for_next_claimant() {
        let mut reg = ReservationRegistry::new();
        let h = reg.reserve(DOCK, A).unwrap();
        assert!(reg.release(h));
        assert!(!reg.is_reserved(DOCK));
        assert!(reg.reserve(DOCK, B).is_ok());
    }

    #[test]
    fn stale_handle_does_not_release_a_newer_claim() {
        let mut reg = ReservationRegistry::new();
        let old = reg.reserve(DOCK, A).unwrap();
        reg.release(old);
        let new = reg.reserve(DOCK, B).unwrap();
        assert!(!reg.is_live(old));
        assert!(!reg.release(old));
        assert!(reg.is_live(new));
        assert_eq!(reg.holder(DOCK), Some(B));

        // Same claimant re-reserving also gets a distinct handle.
        reg.release(new);
        let again = reg.reserve(DOCK, B).unwrap();
        assert_ne!(again, new);
        assert!(!reg.release(new));
        assert!(reg.is_reserved(DOCK));
    }

    #[test]
    fn release_claimant_frees_everything_it_holds() {
        let mut reg = ReservationRegistry::new();
        reg.reserve(PAD, A).unwrap();
        reg.reserve(DOCK, A).unwrap();
        let other = reg.reserve(ActorId(12), B).unwrap();
        assert_eq!(reg.reserved_by(A).collect::<Vec<_>>(), vec![DOCK, PAD]);
        assert_eq!(reg.release_claimant(A), vec![DOCK, PAD]);
        assert_eq!(reg.len(), 1);
        assert!(reg.is_live(other));
    }

    #[test]
    fn release_target_on_destruction() {
        let mut reg = ReservationRegistry::new();
        let h = reg.reserve(DOCK, A).unwrap();
        assert_eq!(reg.release_target(DOCK), Some(A));
        assert_eq!(reg.release_target(DOCK), None);
        assert!(!reg.release(h));
    }

    /// Interleave claims and releases from three claimants over two targets
    /// and check the single-holder invariant after every step.
    #[test]
    fn at_most_one_holder_under_interleaving() {
        let mut reg = ReservationRegistry::new();
        let claimants = [A, B, ActorId(3)];
        let targets = [DOCK, PAD];
        let mut held = Vec::new();
        for step in 0..60u32 {
            let who = claimants[(step % 3) as usize];
            let what = targets[((step / 3) % 2) as usize];
            let was_reserved = reg.is_reserved(what);
            match reg.reserve(what, who) {
                Ok(h) => {
                    assert!(!was_reserved);
                    held.push(h);
                }
                Err(ReserveError::AlreadyHeld { holder, .. }) => {
                    assert!(was_reserved);
                    assert_eq!(reg.holder(what), Some(holder));
                }
                Err(e) => panic!("unexpected {e}"),
            }
            if step % 4 == 3 {
                if let Some(h) = held.pop() {
                    reg.release(h);
                }
            }
            for t in targets {
                assert!(reg.iter().filter(|&(x, _)| x == t).count() <= 1);
            }
        }
    }
}
