use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

use bitvec::prelude::*;

/// Identifier of a state within an automaton.
///
/// States have no payload, they are dense non-negative integers starting
/// at 0.
pub type StateId = u32;

/// A growable set of [`StateId`] backed by a bitmap.
///
/// The bitmap is organized in bytes, bit `i % 8` of byte `i / 8` tells
/// whether `i` is in the set. The bitmap grows as needed for accommodating
/// larger state identifiers, and it never shrinks unless the set is
/// explicitly cleared.
///
/// Two sets are equal when they contain the same states, no matter how much
/// each of them has grown. For instance, a set where `1000` was inserted and
/// then removed is equal to a set that never contained anything.
///
/// This type is used for representing the accepting states of an automaton,
/// epsilon-closures, and the groups of NFA states that become a single DFA
/// state during the subset construction.
#[derive(Clone, Default)]
pub struct StateSet {
    // The length of this bitmap is always a multiple of 8, which means that
    // the raw bytes never contain bits that are not part of the bitmap.
    bits: BitVec<u8, Lsb0>,
}

impl StateSet {
    /// Creates a new empty set.
    pub fn new() -> Self {
        Self { bits: BitVec::new() }
    }

    /// Creates a new empty set that can hold states lower than `capacity`
    /// without growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { bits: BitVec::repeat(false, capacity.div_ceil(8) * 8) }
    }

    /// Creates a set containing a single state.
    pub fn singleton(state: StateId) -> Self {
        let mut set = Self::new();
        set.insert(state);
        set
    }

    /// Returns the number of states that the set can hold without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Returns true if `state` is in the set.
    #[inline]
    pub fn contains(&self, state: StateId) -> bool {
        let index = state as usize;
        index < self.bits.len() && self.bits[index]
    }

    /// Adds a state to the set.
    ///
    /// Returns `true` if the state was not in the set.
    pub fn insert(&mut self, state: StateId) -> bool {
        let index = state as usize;
        if index >= self.bits.len() {
            self.bits.resize((index / 8 + 1) * 8, false);
        }
        !self.bits.replace(index, true)
    }

    /// Removes a state from the set.
    ///
    /// Returns `true` if the state was in the set. Removing a state that is
    /// beyond the current capacity is a no-op.
    pub fn remove(&mut self, state: StateId) -> bool {
        let index = state as usize;
        if index < self.bits.len() {
            self.bits.replace(index, false)
        } else {
            false
        }
    }

    /// Returns true if the set doesn't contain any state.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Returns the number of states in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Removes all the states from the set, releasing the bitmap.
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Removes the lowest state in the set and returns it.
    ///
    /// Returns `None` if the set is empty.
    pub fn pop(&mut self) -> Option<StateId> {
        let index = self.bits.first_one()?;
        self.bits.set(index, false);
        Some(index as StateId)
    }

    /// Returns an iterator that yields the states in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { bits: self.bits.as_bitslice(), next: 0 }
    }

    /// Adds the states in `other` to this set.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.resize(other.bits.len(), false);
        }
        for (dst, src) in self
            .bits
            .as_raw_mut_slice()
            .iter_mut()
            .zip(other.bits.as_raw_slice())
        {
            *dst |= *src;
        }
    }

    /// Removes from this set the states that are not in `other`.
    pub fn intersect_with(&mut self, other: &StateSet) {
        let common = other.bits.as_raw_slice().len();
        let raw = self.bits.as_raw_mut_slice();
        for (dst, src) in raw.iter_mut().zip(other.bits.as_raw_slice()) {
            *dst &= *src;
        }
        if raw.len() > common {
            raw[common..].fill(0);
        }
    }

    /// Returns a new set with the states that are in `self` or `other`.
    pub fn union(&self, other: &StateSet) -> StateSet {
        let mut result = self.clone();
        result.union_with(other);
        result
    }

    /// Returns a new set with the states that are in both `self` and
    /// `other`.
    pub fn intersection(&self, other: &StateSet) -> StateSet {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Returns true if `self` and `other` have at least one state in common.
    ///
    /// This is equivalent to `!self.intersection(other).is_empty()`, but
    /// doesn't allocate a new set.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.bits
            .as_raw_slice()
            .iter()
            .zip(other.bits.as_raw_slice())
            .any(|(a, b)| a & b != 0)
    }

    /// Adds `8 * n` to every state in the set.
    ///
    /// This is done by prepending `n` zeroed bytes to the bitmap.
    pub fn shift_up(&mut self, n: usize) {
        let mut shifted = BitVec::repeat(false, n * 8);
        shifted.extend_from_bitslice(self.bits.as_bitslice());
        self.bits = shifted;
    }

    /// Returns a copy of this set where `offset` was added to every state.
    pub fn offset_by(&self, offset: StateId) -> StateSet {
        if offset % 8 == 0 {
            let mut shifted = self.clone();
            shifted.shift_up(offset as usize / 8);
            shifted
        } else {
            self.iter().map(|state| state + offset).collect()
        }
    }

    /// Returns the bytes in the bitmap up to the last non-zero one.
    fn significant_bytes(&self) -> &[u8] {
        let raw = self.bits.as_raw_slice();
        let len =
            raw.iter().rposition(|byte| *byte != 0).map_or(0, |i| i + 1);
        &raw[..len]
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        let (short, long) = if self.bits.len() <= other.bits.len() {
            (self.bits.as_raw_slice(), other.bits.as_raw_slice())
        } else {
            (other.bits.as_raw_slice(), self.bits.as_raw_slice())
        };
        // The bytes in the longer bitmap that don't exist in the shorter one
        // must be zero.
        short == &long[..short.len()]
            && long[short.len()..].iter().all(|byte| *byte == 0)
    }
}

impl Eq for StateSet {}

impl Hash for StateSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant_bytes().hash(state)
    }
}

impl Debug for StateSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = StateSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<StateId> for StateSet {
    fn extend<I: IntoIterator<Item = StateId>>(&mut self, iter: I) {
        for state in iter {
            self.insert(state);
        }
    }
}

impl<const N: usize> From<[StateId; N]> for StateSet {
    fn from(states: [StateId; N]) -> Self {
        states.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = StateId;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl BitOrAssign<&StateSet> for StateSet {
    fn bitor_assign(&mut self, rhs: &StateSet) {
        self.union_with(rhs)
    }
}

impl BitAndAssign<&StateSet> for StateSet {
    fn bitand_assign(&mut self, rhs: &StateSet) {
        self.intersect_with(rhs)
    }
}

impl BitOr for &StateSet {
    type Output = StateSet;

    fn bitor(self, rhs: &StateSet) -> StateSet {
        self.union(rhs)
    }
}

impl BitAnd for &StateSet {
    type Output = StateSet;

    fn bitand(self, rhs: &StateSet) -> StateSet {
        self.intersection(rhs)
    }
}

/// Iterator over the states in a [`StateSet`], in ascending order.
///
/// Returned by [`StateSet::iter`].
pub struct Iter<'a> {
    bits: &'a BitSlice<u8, Lsb0>,
    next: usize,
}

impl Iterator for Iter<'_> {
    type Item = StateId;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.bits.get(self.next..)?.first_one()?;
        let index = self.next + offset;
        self.next = index + 1;
        Some(index as StateId)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{StateId, StateSet};

    #[test]
    fn insert_and_remove() {
        let mut s = StateSet::new();

        assert!(s.is_empty());
        assert!(s.insert(103));
        assert!(!s.insert(103));
        assert!(s.insert(7));
        assert!(s.insert(0));

        assert!(s.contains(0));
        assert!(s.contains(7));
        assert!(s.contains(103));
        assert!(!s.contains(102));
        assert!(!s.contains(104));
        assert!(!s.contains(100_000));
        assert_eq!(s.len(), 3);
        assert_eq!(s.capacity(), 104);

        assert!(s.remove(7));
        assert!(!s.remove(7));
        assert!(!s.remove(100_000));
        assert!(!s.contains(7));
        assert_eq!(s.capacity(), 104);

        let mut t = StateSet::new();
        for n in (100..1000).step_by(5) {
            assert!(t.is_empty());
            t.insert(n);
            assert!(!t.is_empty());
            t.remove(n);
        }
        assert!(t.is_empty());
    }

    #[test]
    fn contains_is_exact() {
        let mut s = StateSet::new();
        for n in (100..1000).step_by(3) {
            s.insert(n);
        }
        for n in (100..1000).step_by(3) {
            assert!(s.contains(n));
            assert!(!s.contains(n - 1));
            assert!(!s.contains(n + 1));
        }
        for n in 0..100 {
            assert!(!s.contains(n));
        }
    }

    #[test]
    fn equality_ignores_capacity() {
        let a = StateSet::from([1, 10, 20, 50, 600]);
        let b = StateSet::from([600, 50, 20, 10, 1]);
        let c = StateSet::from([1, 10, 20, 50]);
        let d = StateSet::from([1, 10, 20, 50, 600, 601]);
        let e = StateSet::from([1, 10, 20, 50, 601]);

        assert_eq!(StateSet::new(), StateSet::default());
        assert_eq!(a, a.clone());
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_ne!(a, c);
        assert_ne!(c, a);
        assert_ne!(a, d);
        assert_ne!(d, a);
        assert_ne!(a, e);
        assert_ne!(e, a);

        // Same states, different growth histories.
        let mut grown = StateSet::from([3, 9]);
        grown.insert(5000);
        grown.remove(5000);
        let small = StateSet::from([9, 3]);

        assert!(grown.capacity() > small.capacity());
        assert_eq!(grown, small);
        assert_eq!(small, grown);
        assert_eq!(StateSet::with_capacity(4096), StateSet::new());

        let mut cleared = StateSet::from([1, 2, 3]);
        cleared.clear();
        assert_eq!(cleared, StateSet::new());
        assert_eq!(cleared.capacity(), 0);
    }

    #[test]
    fn hash_is_consistent_with_eq() {
        use std::collections::HashSet;

        let mut grown = StateSet::from([3, 9]);
        grown.insert(5000);
        grown.remove(5000);

        let mut set = HashSet::new();
        set.insert(StateSet::from([3, 9]));

        assert!(set.contains(&grown));
        assert!(!set.insert(grown));
    }

    #[test]
    fn union_and_intersection() {
        let mut a = StateSet::new();
        let mut b = StateSet::new();
        let mut union = StateSet::new();
        let mut intersection = StateSet::new();

        for n in (0..1000).step_by(2) {
            a.insert(n);
            union.insert(n);
        }
        for n in (0..1000).step_by(3) {
            b.insert(n);
            union.insert(n);
        }
        for n in (0..1000).step_by(6) {
            intersection.insert(n);
        }

        assert_eq!(&a | &b, union);
        assert_eq!(&a & &b, intersection);

        let mut c = a.clone();
        c |= &b;
        assert_eq!(c, union);

        let mut c = a.clone();
        c &= &b;
        assert_eq!(c, intersection);
    }

    #[test]
    fn union_keeps_states_beyond_shorter_operand() {
        let short = StateSet::from([1, 2]);
        let long = StateSet::from([2, 900]);

        assert_eq!(short.union(&long), StateSet::from([1, 2, 900]));
        assert_eq!(long.union(&short), StateSet::from([1, 2, 900]));
    }

    #[test]
    fn intersection_drops_states_beyond_shorter_operand() {
        let short = StateSet::from([1, 2]);
        let long = StateSet::from([2, 900]);

        assert_eq!(short.intersection(&long), StateSet::from([2]));
        assert_eq!(long.intersection(&short), StateSet::from([2]));
    }

    #[test]
    fn set_algebra() {
        let a = StateSet::from([0, 5, 17, 64, 300]);
        let b = StateSet::from([5, 6, 64, 1000]);
        let c = StateSet::from([5, 17, 1000, 2000]);

        assert_eq!(&a | &b, &b | &a);
        assert_eq!(&a & &b, &b & &a);
        assert_eq!(&(&a & &b) & &c, &a & &(&b & &c));
        assert_eq!(&(&a | &b) | &c, &a | &(&b | &c));
        assert_eq!(&a | &a, a);
        assert_eq!(&a & &a, a);
    }

    #[test]
    fn intersects() {
        let a = StateSet::from([1, 64, 300]);

        assert!(a.intersects(&StateSet::from([300])));
        assert!(StateSet::from([300, 4000]).intersects(&a));
        assert!(!a.intersects(&StateSet::from([2, 65, 301, 4000])));
        assert!(!a.intersects(&StateSet::new()));
        assert!(!StateSet::new().intersects(&StateSet::new()));
    }

    #[test]
    fn shift_up() {
        let original = StateSet::from([0, 3, 8, 21, 300]);

        for n in [0, 1, 3, 40] {
            let mut shifted = original.clone();
            shifted.shift_up(n);

            let expected: Vec<StateId> =
                original.iter().map(|s| s + 8 * n as StateId).collect();

            assert_eq!(shifted.iter().collect::<Vec<_>>(), expected);
            assert_eq!(shifted.len(), original.len());
        }
    }

    #[test]
    fn offset_by() {
        let original = StateSet::from([0, 3, 8, 21]);

        assert_eq!(original.offset_by(16), StateSet::from([16, 19, 24, 37]));
        assert_eq!(original.offset_by(5), StateSet::from([5, 8, 13, 26]));
        assert_eq!(original.offset_by(0), original);
    }

    #[test]
    fn iter_and_pop() {
        let mut s = StateSet::from([42, 7, 8, 0, 1023]);

        assert_eq!(s.iter().collect::<Vec<_>>(), vec![0, 7, 8, 42, 1023]);
        // Iterating doesn't consume the set.
        assert_eq!(s.iter().count(), 5);
        assert_eq!((&s).into_iter().last(), Some(1023));

        assert_eq!(s.pop(), Some(0));
        assert_eq!(s.pop(), Some(7));
        assert_eq!(s.pop(), Some(8));
        assert_eq!(s.pop(), Some(42));
        assert_eq!(s.pop(), Some(1023));
        assert_eq!(s.pop(), None);
        assert!(s.is_empty());
        assert_eq!(s.iter().next(), None);
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", StateSet::from([9, 2, 31])), "{2, 9, 31}");
        assert_eq!(format!("{:?}", StateSet::new()), "{}");
    }
}
