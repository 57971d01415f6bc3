use tracing::debug;

use crate::core::{CardGroup, GroupName, Result};
use crate::record::EnumerationRecord;

use super::analyzer::{collect_groups, Analyzer};

/// # AnalyzerBuilder
///
/// Collects the pieces of an [`Analyzer`] and builds it. The hand size
/// defaults to 5 and the deck to no groups, which fails to build.
///
/// A previously stored [`EnumerationRecord`] can be offered with
/// [`AnalyzerBuilder::cached`]. It is only used if it describes exactly
/// this deck and hand size; otherwise it is dropped and the compositions
/// are enumerated again.
///
/// ## Examples
///
/// ```
/// use deck_odds::analysis::AnalyzerBuilder;
/// use deck_odds::core::CardGroup;
///
/// let analyzer = AnalyzerBuilder::new("aces")
///     .hand_size(5)
///     .group(CardGroup::new("Ace", 4))
///     .group(CardGroup::new("Filler", 36))
///     .build()
///     .unwrap();
///
/// // Reuse the enumeration on the next run
/// let record = analyzer.to_record();
/// let again = AnalyzerBuilder::new("aces")
///     .hand_size(5)
///     .groups(vec![CardGroup::new("Ace", 4), CardGroup::new("Filler", 36)])
///     .cached(record)
///     .build()
///     .unwrap();
/// assert_eq!(analyzer.combinations(), again.combinations());
/// ```
#[derive(Debug, Clone)]
pub struct AnalyzerBuilder<N> {
    name: String,
    hand_size: usize,
    groups: Vec<CardGroup<N>>,
    cached: Option<EnumerationRecord<N>>,
}

impl<N: GroupName> AnalyzerBuilder<N> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand_size: 5,
            groups: Vec::new(),
            cached: None,
        }
    }

    /// Set the number of cards drawn.
    pub fn hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Add one group to the deck.
    pub fn group(mut self, group: CardGroup<N>) -> Self {
        self.groups.push(group);
        self
    }

    /// Add several groups to the deck.
    pub fn groups<I>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = CardGroup<N>>,
    {
        self.groups.extend(groups);
        self
    }

    /// Offer a stored enumeration to skip the search.
    pub fn cached(mut self, record: EnumerationRecord<N>) -> Self {
        self.cached = Some(record);
        self
    }

    /// Validate and build the analyzer.
    ///
    /// Validation is the same whether or not the cached record is used.
    pub fn build(self) -> Result<Analyzer<N>> {
        let Some(record) = self.cached else {
            return Analyzer::new(self.name, self.hand_size, self.groups);
        };

        if !record.accepts(self.hand_size, &self.groups) {
            debug!(name = %self.name, "Cached enumeration doesn't match the deck, enumerating");
            return Analyzer::new(self.name, self.hand_size, self.groups);
        }

        let (groups, deck_size) = collect_groups(self.groups, self.hand_size)?;
        let mut combinations = record.into_combinations();
        combinations.sort_unstable();
        combinations.dedup();
        debug!(
            name = %self.name,
            num_combinations = combinations.len(),
            "Using cached enumeration"
        );
        Ok(Analyzer::from_parts(
            self.name,
            self.hand_size,
            deck_size,
            groups,
            combinations,
        ))
    }
}
