use std::collections::HashSet;

use super::card_group::{CardGroup, GroupName};
use super::hand::{merge_by_name, HandComposition, HandElement};

/// Generates every hand composition of a fixed size that respects a range
/// per group.
///
/// The search walks the groups in name order. At each group it tries every
/// allowed count, from the most cards down to the fewest, then moves on to
/// the next group with what is left of the hand. Branches that can no
/// longer land on exactly the hand size are cut as soon as that is known.
///
/// Every produced composition carries one element for every group,
/// zero-count ones included.
#[derive(Debug, Clone)]
pub struct CompositionEnumerator<N> {
    /// Allowed range for each group, sorted by name.
    ranges: Vec<HandElement<N>>,
    hand_size: usize,
    /// Smallest number of cards the groups from an index onwards must take.
    suffix_min: Vec<usize>,
    /// Largest number of cards the groups from an index onwards can take.
    suffix_max: Vec<usize>,
}

impl<N: GroupName> CompositionEnumerator<N> {
    /// Create an enumerator from range elements.
    ///
    /// Ranges sharing a name are merged into one by adding their bounds. A
    /// range with `minimum > maximum` can never be satisfied and makes the
    /// result empty.
    pub fn new<I>(hand_size: usize, ranges: I) -> Self
    where
        I: IntoIterator<Item = HandElement<N>>,
    {
        let ranges = merge_by_name(ranges.into_iter().collect());

        let mut suffix_min = vec![0; ranges.len() + 1];
        let mut suffix_max = vec![0; ranges.len() + 1];
        for (idx, range) in ranges.iter().enumerate().rev() {
            suffix_min[idx] = suffix_min[idx + 1] + range.minimum();
            suffix_max[idx] = suffix_max[idx + 1] + range.maximum();
        }

        Self {
            ranges,
            hand_size,
            suffix_min,
            suffix_max,
        }
    }

    /// Create an enumerator using each group's `[minimum, maximum]`.
    pub fn from_groups<'a, I>(hand_size: usize, groups: I) -> Self
    where
        I: IntoIterator<Item = &'a CardGroup<N>>,
        N: 'a,
    {
        Self::new(hand_size, groups.into_iter().map(CardGroup::range))
    }

    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    /// Run the search.
    ///
    /// An empty set is a valid answer; it means no hand of this size fits
    /// the ranges.
    ///
    /// # Example
    /// ```
    /// use deck_odds::core::{CardGroup, CompositionEnumerator};
    ///
    /// let groups = vec![CardGroup::new("Ace", 4), CardGroup::new("Filler", 36)];
    /// let hands = CompositionEnumerator::from_groups(5, &groups).enumerate();
    /// // zero to four aces, the rest filler
    /// assert_eq!(hands.len(), 5);
    /// ```
    pub fn enumerate(&self) -> HashSet<HandComposition<N>> {
        let mut out = HashSet::new();
        let mut current = Vec::with_capacity(self.ranges.len());
        self.descend(0, self.hand_size, &mut current, &mut out);
        out
    }

    fn descend(
        &self,
        depth: usize,
        budget: usize,
        current: &mut Vec<HandElement<N>>,
        out: &mut HashSet<HandComposition<N>>,
    ) {
        if depth == self.ranges.len() {
            if budget == 0 {
                out.insert(HandComposition::from_sorted(current.clone()));
            }
            return;
        }

        // The rest of the groups must be able to absorb exactly `budget`.
        if budget < self.suffix_min[depth] || budget > self.suffix_max[depth] {
            return;
        }

        let range = &self.ranges[depth];
        let upper = range.maximum().min(budget);
        for count in (range.minimum()..=upper).rev() {
            current.push(HandElement::exact(range.name().clone(), count));
            self.descend(depth + 1, budget - count, current, out);
            current.pop();
        }
    }
}
