use std::fmt::Debug;
use std::hash::Hash;

use super::error::{OddsError, Result};
use super::hand::HandElement;

/// Anything that can identify a card group.
///
/// Names have to be totally ordered so hands have one canonical layout, and
/// hashable so hands can be deduplicated. `Debug` is used for error messages.
pub trait GroupName: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> GroupName for T {}

/// A named set of indistinguishable cards inside a deck.
///
/// `minimum` and `maximum` bound how many of these cards a hand may contain
/// for it to be enumerated. A fresh group from [`CardGroup::new`] accepts any
/// count from zero up to its size.
///
/// Groups are values. Changing the size creates a new group, see
/// [`CardGroup::resized`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardGroup<N> {
    name: N,
    size: usize,
    minimum: usize,
    maximum: usize,
}

impl<N: GroupName> CardGroup<N> {
    /// Create a group that can be drawn anywhere from zero to `size` times.
    ///
    /// # Example
    /// ```
    /// use deck_odds::core::CardGroup;
    ///
    /// let aces = CardGroup::new("Ace", 4);
    /// assert_eq!(aces.size(), 4);
    /// assert_eq!(aces.minimum(), 0);
    /// assert_eq!(aces.maximum(), 4);
    /// ```
    pub fn new(name: N, size: usize) -> Self {
        Self {
            name,
            size,
            minimum: 0,
            maximum: size,
        }
    }

    /// Create a group restricted to hands holding between `minimum` and
    /// `maximum` of its cards.
    ///
    /// # Example
    /// ```
    /// use deck_odds::core::CardGroup;
    ///
    /// assert!(CardGroup::with_range("Ace", 4, 1, 2).is_ok());
    /// assert!(CardGroup::with_range("Ace", 4, 2, 1).is_err());
    /// assert!(CardGroup::with_range("Ace", 4, 0, 5).is_err());
    /// ```
    pub fn with_range(name: N, size: usize, minimum: usize, maximum: usize) -> Result<Self> {
        let group = Self {
            name,
            size,
            minimum,
            maximum,
        };
        group.validate()?;
        Ok(group)
    }

    pub fn name(&self) -> &N {
        &self.name
    }

    /// Number of copies in the deck.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn minimum(&self) -> usize {
        self.minimum
    }

    pub fn maximum(&self) -> usize {
        self.maximum
    }

    /// True when every count from zero to the size is allowed.
    pub fn is_unrestricted(&self) -> bool {
        self.minimum == 0 && self.maximum == self.size
    }

    /// Check `minimum <= maximum <= size`.
    ///
    /// Groups built through the constructors always pass, but deserialized
    /// groups have not been checked yet.
    pub fn validate(&self) -> Result<()> {
        if self.minimum > self.maximum {
            return Err(OddsError::MinimumExceedsMaximum {
                group: format!("{:?}", self.name),
                minimum: self.minimum,
                maximum: self.maximum,
            });
        }
        if self.maximum > self.size {
            return Err(OddsError::MaximumExceedsSize {
                group: format!("{:?}", self.name),
                maximum: self.maximum,
                size: self.size,
            });
        }
        Ok(())
    }

    /// A copy of this group holding `size` cards.
    ///
    /// The maximum is clamped to the new size and the minimum to the new
    /// maximum, so the result is always valid. An unrestricted group stays
    /// unrestricted.
    pub fn resized(&self, size: usize) -> Self {
        let maximum = if self.maximum == self.size {
            size
        } else {
            self.maximum.min(size)
        };
        Self {
            name: self.name.clone(),
            size,
            minimum: self.minimum.min(maximum),
            maximum,
        }
    }

    /// An unrestricted copy of this group holding `size` cards.
    ///
    /// Used for what is left of the group after a hand was drawn from it.
    /// The range constrained the hand that was drawn, not later draws.
    pub fn remainder(&self, size: usize) -> Self {
        Self::new(self.name.clone(), size)
    }

    /// The enumeration range for this group.
    pub(crate) fn range(&self) -> HandElement<N> {
        HandElement::range(self.name.clone(), self.minimum, self.maximum)
    }
}
