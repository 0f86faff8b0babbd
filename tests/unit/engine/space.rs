//! Tests for the constraint space: variable creation, propagation, cloning

#[cfg(test)]
mod tests {
    use nmbr9::engine::propagators::{Linear, Relation};
    use nmbr9::engine::space::Space;

    // Verifies constants, booleans, and ranges get the requested domains
    // Verified by creating every variable as a boolean
    #[test]
    fn test_variable_creation() {
        let mut space = Space::new();
        let x = space.new_var(2, 5);
        let b = space.new_bool();
        let c = space.constant(7);
        let many = space.new_vars(3, -1, 1);
        assert_eq!(space.variable_count(), 6);
        assert_eq!((space.min(x), space.max(x)), (2, 5));
        assert_eq!(space.size(b), 2);
        assert_eq!(space.value(c), Some(7));
        assert!(many.iter().all(|&v| space.size(v) == 3));
        assert_eq!(space.variables().count(), 6);
        assert_eq!(x.to_string(), "x0");
    }

    // Tests that a posted constraint filters on the first propagation
    // Verified by not scheduling propagators when they are posted
    #[test]
    fn test_post_schedules_propagator() {
        let mut space = Space::new();
        let x = space.new_var(0, 10);
        let y = space.new_var(0, 10);
        space.post(Linear::new(&[(1, x), (1, y)], Relation::Le, 4));
        assert_eq!(space.propagator_count(), 1);
        assert!(space.propagate().is_ok());
        assert_eq!(space.max(x), 4);
        assert_eq!(space.max(y), 4);
        assert!(space.take_propagations() >= 1);
        assert_eq!(space.propagations(), 0);
    }

    // Tests that domain changes wake the watching propagators in a chain
    // Verified by dropping the wake call after a domain change
    #[test]
    fn test_changes_wake_watchers() {
        let mut space = Space::new();
        let x = space.new_var(0, 10);
        let y = space.new_var(0, 10);
        let z = space.new_var(0, 10);
        space.post(Linear::less_equal(x, y));
        space.post(Linear::less_equal(y, z));
        space.propagate().ok();
        space.set_min(x, 6).ok();
        assert!(space.propagate().is_ok());
        assert_eq!(space.min(y), 6);
        assert_eq!(space.min(z), 6);
    }

    // Tests that a wipe-out marks the space as failed for good
    // Verified by resetting the failed flag after propagation
    #[test]
    fn test_failure_is_sticky() {
        let mut space = Space::new();
        let x = space.new_var(0, 3);
        let y = space.new_var(0, 3);
        space.post(Linear::new(&[(1, x), (1, y)], Relation::Ge, 7));
        assert!(space.propagate().is_err());
        assert!(space.is_failed());
        assert!(space.propagate().is_err());
    }

    // Tests that clones share constraints yet keep separate domains
    // Verified by cloning the domains by reference
    #[test]
    fn test_clone_keeps_domains_apart() {
        let mut space = Space::new();
        let x = space.new_var(0, 5);
        let y = space.new_var(0, 5);
        space.post(Linear::new(&[(1, x), (-1, y)], Relation::Eq, 0));
        space.propagate().ok();

        let mut left = space.clone();
        let mut right = space.clone();
        left.assign(x, 2).ok();
        right.assign(x, 4).ok();
        assert!(left.propagate().is_ok());
        assert!(right.propagate().is_ok());
        assert_eq!(left.value(y), Some(2));
        assert_eq!(right.value(y), Some(4));
        assert_eq!(space.size(y), 6);
    }

    // Tests retain keeps only accepted values and fails on an empty result
    // Verified by inverting the keep predicate
    #[test]
    fn test_retain() {
        let mut space = Space::new();
        let x = space.new_var(0, 9);
        assert_eq!(space.retain(x, |v| v % 3 == 0), Ok(true));
        assert_eq!(space.values(x).collect::<Vec<_>>(), vec![0, 3, 6, 9]);
        assert!(space.retain(x, |v| v > 100).is_err());
        assert!(space.is_failed());
    }

    // Tests that bound operations report whether anything changed
    // Verified by always returning true from set_max
    #[test]
    fn test_change_reporting() {
        let mut space = Space::new();
        let x = space.new_var(0, 9);
        assert_eq!(space.set_max(x, 9), Ok(false));
        assert_eq!(space.set_max(x, 5), Ok(true));
        assert_eq!(space.remove(x, 7), Ok(false));
        assert_eq!(space.remove(x, 5), Ok(true));
        assert_eq!(space.max(x), 4);
        assert!(space.contains(x, 4));
        assert!(!space.is_assigned(x));
    }

    // Tests popping a frame undoes propagation and clears a failure inside it
    // Verified by keeping the failed flag across pop_frame
    #[test]
    fn test_pop_frame_backtracks() {
        let mut space = Space::new();
        let x = space.new_var(0, 5);
        let y = space.new_var(0, 5);
        space.post(Linear::new(&[(1, x), (-1, y)], Relation::Eq, 0));
        assert!(space.propagate().is_ok());

        space.push_frame();
        space.assign(x, 3).ok();
        assert!(space.propagate().is_ok());
        assert_eq!(space.value(y), Some(3));
        space.remove(y, 3).ok();
        assert!(space.propagate().is_err());
        assert!(space.is_failed());

        assert!(space.pop_frame());
        assert!(!space.is_failed());
        assert_eq!(space.size(x), 6);
        assert_eq!(space.size(y), 6);
        assert_eq!(space.frame_depth(), 0);
        assert!(space.propagate().is_ok());
        assert!(!space.pop_frame());
    }

    // Tests a snapshot is independent of later backtracking
    // Verified by sharing the domain store with the snapshot
    #[test]
    fn test_snapshot_survives_backtracking() {
        let mut space = Space::new();
        let x = space.new_var(0, 5);
        space.push_frame();
        space.assign(x, 4).ok();
        let snapshot = space.snapshot();
        space.pop_frame();
        assert_eq!(snapshot.value(x), Some(4));
        assert_eq!(snapshot.frame_depth(), 0);
        assert_eq!(space.value(x), None);
    }
}
