//! Tests for indexed lookup over variables and constants

#[cfg(test)]
mod tests {
    use nmbr9::engine::propagators::{Element, ElementConst};
    use nmbr9::engine::space::Space;

    // Verifies indices whose entry cannot equal the result are removed
    // Verified by keeping every index in range
    #[test]
    fn test_element_prunes_index() {
        let mut space = Space::new();
        let a = space.new_var(0, 2);
        let b = space.new_var(5, 6);
        let c = space.constant(3);
        let index = space.new_var(-3, 9);
        let result = space.new_var(5, 10);
        space.post(Element::new(&[a, b, c], index, result));
        assert!(space.propagate().is_ok());
        assert_eq!(space.value(index), Some(1));
        assert_eq!((space.min(result), space.max(result)), (5, 6));
    }

    // Tests a fixed index makes entry and result equal
    // Verified by only narrowing the result
    #[test]
    fn test_element_fixed_index_links_domains() {
        let mut space = Space::new();
        let a = space.new_var(0, 4);
        let b = space.new_var(0, 4);
        let index = space.new_var(0, 1);
        let result = space.new_var(2, 3);
        space.post(Element::new(&[a, b], index, result));
        space.assign(index, 0).ok();
        assert!(space.propagate().is_ok());
        assert_eq!(space.values(a).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(space.size(b), 5);
        space.assign(a, 3).ok();
        assert!(space.propagate().is_ok());
        assert_eq!(space.value(result), Some(3));
    }

    // Tests the result bounds follow the hull of the candidate entries
    // Verified by using the first candidate only
    #[test]
    fn test_element_result_hull() {
        let mut space = Space::new();
        let a = space.constant(1);
        let b = space.constant(4);
        let c = space.constant(9);
        let index = space.new_var(0, 1);
        let result = space.new_var(0, 20);
        space.post(Element::new(&[a, b, c], index, result));
        assert!(space.propagate().is_ok());
        assert_eq!((space.min(result), space.max(result)), (1, 4));
    }

    // Tests constant lookup narrows index and result to supported pairs
    // Verified by skipping the retain on the result
    #[test]
    fn test_element_const() {
        let mut space = Space::new();
        let index = space.new_var(0, 3);
        let result = space.new_var(4, 8);
        space.post(ElementConst::new(&[0, 4, 4, 9], index, result));
        assert!(space.propagate().is_ok());
        assert_eq!(space.values(index).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(space.value(result), Some(4));
    }

    // Tests no supported entry is a failure
    // Verified by leaving the index untouched when nothing matches
    #[test]
    fn test_element_const_failure() {
        let mut space = Space::new();
        let index = space.new_var(0, 2);
        let result = space.new_var(5, 6);
        space.post(ElementConst::new(&[0, 1, 2], index, result));
        assert!(space.propagate().is_err());
    }
}
