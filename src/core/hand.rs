use std::collections::BTreeSet;
use std::fmt;

use super::card_group::GroupName;

/// How many cards of one group a hand holds.
///
/// Inside a finished [`HandComposition`] `minimum == maximum` and both are
/// the exact count. While enumerating, the same shape carries the allowed
/// range for a group.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandElement<N> {
    name: N,
    minimum: usize,
    maximum: usize,
}

impl<N: GroupName> HandElement<N> {
    /// Exactly `count` cards of the group.
    pub fn exact(name: N, count: usize) -> Self {
        Self {
            name,
            minimum: count,
            maximum: count,
        }
    }

    /// Anywhere between `minimum` and `maximum` cards of the group.
    pub fn range(name: N, minimum: usize, maximum: usize) -> Self {
        Self {
            name,
            minimum,
            maximum,
        }
    }

    pub fn name(&self) -> &N {
        &self.name
    }

    pub fn minimum(&self) -> usize {
        self.minimum
    }

    pub fn maximum(&self) -> usize {
        self.maximum
    }

    /// The drawn count. For a range this is the lower bound.
    pub fn count(&self) -> usize {
        self.minimum
    }

    pub fn is_exact(&self) -> bool {
        self.minimum == self.maximum
    }
}

/// One distinguishable hand: a drawn count for every group of a deck.
///
/// Elements are kept sorted by group name with one element per name, so two
/// compositions compare and hash equal exactly when every group has the same
/// count. Compositions produced by an [`Analyzer`](crate::analysis::Analyzer)
/// include zero-count elements for groups that were not drawn.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandComposition<N> {
    elements: Vec<HandElement<N>>,
}

impl<N: GroupName> HandComposition<N> {
    /// Build a composition from exact elements in any order.
    ///
    /// Elements naming the same group are merged by adding their counts.
    pub fn new(elements: Vec<HandElement<N>>) -> Self {
        Self {
            elements: merge_by_name(elements),
        }
    }

    /// Build a composition from `(name, count)` pairs.
    ///
    /// # Example
    /// ```
    /// use deck_odds::core::HandComposition;
    ///
    /// let a = HandComposition::from_counts([("Ace", 1), ("Filler", 4)]);
    /// let b = HandComposition::from_counts([("Filler", 4), ("Ace", 1)]);
    /// assert_eq!(a, b);
    /// assert_eq!(a.total(), 5);
    /// ```
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (N, usize)>,
    {
        Self::new(
            counts
                .into_iter()
                .map(|(name, count)| HandElement::exact(name, count))
                .collect(),
        )
    }

    /// Caller guarantees the elements are sorted and unique by name.
    pub(crate) fn from_sorted(elements: Vec<HandElement<N>>) -> Self {
        debug_assert!(elements.windows(2).all(|w| w[0].name < w[1].name));
        Self { elements }
    }

    pub fn elements(&self) -> &[HandElement<N>] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HandElement<N>> {
        self.elements.iter()
    }

    /// Number of groups represented, including zero-count ones.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Total number of cards in the hand.
    pub fn total(&self) -> usize {
        self.elements.iter().map(HandElement::count).sum()
    }

    /// How many cards of `name` the hand holds. Absent groups hold zero.
    pub fn count_of(&self, name: &N) -> usize {
        self.elements
            .binary_search_by(|e| e.name.cmp(name))
            .map(|idx| self.elements[idx].count())
            .unwrap_or(0)
    }

    /// True if at least one card of `name` was drawn.
    pub fn contains(&self, name: &N) -> bool {
        self.count_of(name) > 0
    }

    /// Elements with a non-zero count.
    pub fn drawn(&self) -> impl Iterator<Item = &HandElement<N>> + '_ {
        self.elements.iter().filter(|e| e.count() > 0)
    }

    /// A copy with a zero-count element for every name in `names` that is
    /// not already present.
    pub fn padded<'a, I>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = &'a N>,
        N: 'a,
    {
        let mut elements = self.elements.clone();
        for name in names {
            if self.elements.binary_search_by(|e| e.name.cmp(name)).is_err() {
                elements.push(HandElement::exact(name.clone(), 0));
            }
        }
        Self::new(elements)
    }

    /// True when the composition has exactly one element per name in
    /// `names` and nothing else. Repeated names count once.
    pub fn is_complete_for<'a, I>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = &'a N>,
        N: 'a,
    {
        let names: BTreeSet<&N> = names.into_iter().collect();
        names.len() == self.elements.len() && self.elements.iter().all(|e| names.contains(&e.name))
    }
}

/// Sort by name and merge elements sharing a name by adding their bounds.
pub(crate) fn merge_by_name<N: Ord>(mut elements: Vec<HandElement<N>>) -> Vec<HandElement<N>> {
    elements.sort_by(|a, b| a.name.cmp(&b.name));
    elements.dedup_by(|next, kept| {
        if next.name == kept.name {
            kept.minimum += next.minimum;
            kept.maximum += next.maximum;
            true
        } else {
            false
        }
    });
    elements
}

impl<'a, N> IntoIterator for &'a HandComposition<N> {
    type Item = &'a HandElement<N>;
    type IntoIter = std::slice::Iter<'a, HandElement<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<N: GroupName + fmt::Display> fmt::Display for HandComposition<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        write!(f, "[")?;
        for e in self.drawn() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{} x{}", e.name(), e.count())?;
        }
        write!(f, "]")
    }
}
