//! Flat, storable form of an analyzer's enumeration.
//!
//! Enumerating a large deck is the expensive part of building an
//! [`Analyzer`]. An [`EnumerationRecord`] keeps the hand size, the groups and
//! every composition so a later run can skip the search. The record is
//! only trusted when it describes exactly the deck being built, see
//! [`EnumerationRecord::accepts`].
//!
//! With the `serde` feature the record converts to and from JSON.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use thiserror::Error;

use crate::analysis::Analyzer;
use crate::core::{CardGroup, GroupName, HandComposition, HandElement};

/// Errors reading or writing a stored record.
#[cfg(feature = "serde")]
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Failed to (de)serialize enumeration record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Hand size, groups and compositions of one analyzer.
///
/// Each hand is a list of `(name, drawn, maximum)` elements where `drawn`
/// and `maximum` are both the exact count.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationRecord<N> {
    pub hand_size: usize,
    pub groups: Vec<CardGroup<N>>,
    pub hands: Vec<Vec<HandElement<N>>>,
}

impl<N: GroupName> EnumerationRecord<N> {
    pub fn from_analyzer(analyzer: &Analyzer<N>) -> Self {
        Self {
            hand_size: analyzer.hand_size(),
            groups: analyzer.groups().cloned().collect(),
            hands: analyzer
                .combinations()
                .iter()
                .map(|hand| hand.elements().to_vec())
                .collect(),
        }
    }

    /// True when this record can stand in for enumerating `groups` at
    /// `hand_size`.
    ///
    /// The hand size has to match, the groups have to be the same set
    /// (name, size, minimum and maximum) and every stored hand has to be a
    /// complete, exact composition of the right size inside the group
    /// ranges. Anything else means the record is stale or damaged.
    pub fn accepts(&self, hand_size: usize, groups: &[CardGroup<N>]) -> bool {
        if self.hand_size != hand_size {
            return false;
        }
        let stored: BTreeSet<&CardGroup<N>> = self.groups.iter().collect();
        let fresh: BTreeSet<&CardGroup<N>> = groups.iter().collect();
        if stored != fresh {
            return false;
        }

        self.hands.iter().all(|elements| {
            let unique = elements.windows(2).all(|w| w[0].name() < w[1].name());
            unique
                && elements.len() == fresh.len()
                && elements.iter().map(HandElement::count).sum::<usize>() == hand_size
                && elements.iter().zip(fresh.iter()).all(|(e, g)| {
                    e.is_exact()
                        && e.name() == g.name()
                        && (g.minimum()..=g.maximum()).contains(&e.count())
                })
        })
    }

    /// The stored hands as compositions.
    pub fn into_combinations(self) -> Vec<HandComposition<N>> {
        self.hands.into_iter().map(HandComposition::new).collect()
    }
}

#[cfg(feature = "serde")]
impl<N> EnumerationRecord<N>
where
    N: GroupName + serde::Serialize + serde::de::DeserializeOwned,
{
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> Analyzer<String> {
        Analyzer::new(
            "deck",
            3,
            vec![
                CardGroup::new("Ace".to_string(), 4),
                CardGroup::with_range("King".to_string(), 4, 1, 2).unwrap(),
                CardGroup::new("Filler".to_string(), 12),
            ],
        )
        .unwrap()
    }

    fn groups_of(analyzer: &Analyzer<String>) -> Vec<CardGroup<String>> {
        analyzer.groups().cloned().collect()
    }

    #[test]
    fn test_accepts_own_record() {
        let a = analyzer();
        let record = a.to_record();
        assert_eq!(record.hands.len(), a.len());

        let mut shuffled = groups_of(&a);
        shuffled.reverse();
        assert!(record.accepts(3, &shuffled));
    }

    #[test]
    fn test_rejects_mismatches() {
        let a = analyzer();
        let record = a.to_record();
        let groups = groups_of(&a);

        assert!(!record.accepts(4, &groups));

        let mut resized = groups.clone();
        resized[0] = resized[0].resized(3);
        assert!(!record.accepts(3, &resized));

        let mut extra = groups.clone();
        extra.push(CardGroup::new("Queen".to_string(), 1));
        assert!(!record.accepts(3, &extra));

        let mut restricted = groups;
        restricted[1] = CardGroup::with_range("Filler".to_string(), 12, 0, 1).unwrap();
        assert!(!record.accepts(3, &restricted));
    }

    #[test]
    fn test_rejects_damaged_hands() {
        let a = analyzer();
        let groups = groups_of(&a);

        let mut short = a.to_record();
        short.hands[0].pop();
        assert!(!short.accepts(3, &groups));

        let mut wrong_total = a.to_record();
        let first = wrong_total.hands[0][0].clone();
        wrong_total.hands[0][0] = HandElement::exact(first.name().clone(), first.count() + 1);
        assert!(!wrong_total.accepts(3, &groups));

        let mut ranged = a.to_record();
        let first = ranged.hands[0][0].clone();
        ranged.hands[0][0] = HandElement::range(first.name().clone(), first.count(), 9);
        assert!(!ranged.accepts(3, &groups));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip_is_accepted() {
        let a = analyzer();
        let json = a.to_record().to_json().unwrap();
        let record: EnumerationRecord<String> = EnumerationRecord::from_json(&json).unwrap();
        assert!(record.accepts(3, &groups_of(&a)));
        assert_eq!(record.into_combinations(), a.combinations());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_invalid_deserialized_group_fails_on_build() {
        use crate::core::OddsError;

        let json = r#"{"name":"Ace","size":4,"minimum":2,"maximum":1}"#;
        let group: CardGroup<String> = serde_json::from_str(json).unwrap();
        let err = Analyzer::new("bad", 1, vec![group, CardGroup::new("x".to_string(), 3)])
            .unwrap_err();
        assert!(matches!(err, OddsError::MinimumExceedsMaximum { .. }));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_garbage_json_is_an_error() {
        assert!(matches!(
            EnumerationRecord::<String>::from_json("{not json"),
            Err(RecordError::Json(_))
        ));
    }
}
