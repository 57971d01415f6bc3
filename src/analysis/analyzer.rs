use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, instrument, trace};

use crate::core::{
    BinomialTable, CardGroup, CompositionEnumerator, GroupName, HandComposition, OddsError, Result,
};
use crate::record::EnumerationRecord;

use super::cache::AnalyzerKey;
use super::probability;

/// Every hand a deck can produce, with the exact probability of each.
///
/// An analyzer is built once from a list of card groups and a hand size.
/// Construction validates the deck and enumerates all compositions; after
/// that nothing changes. [`Analyzer::excavate`] and [`Analyzer::optimize`]
/// return new analyzers instead of changing this one, which also makes an
/// analyzer safe to share between threads.
///
/// # Example
/// ```
/// use deck_odds::analysis::Analyzer;
/// use deck_odds::core::CardGroup;
///
/// let analyzer = Analyzer::new(
///     "aces",
///     5,
///     vec![CardGroup::new("Ace", 4), CardGroup::new("Filler", 36)],
/// )
/// .unwrap();
///
/// let at_least_one = analyzer.probability(|hand| hand.contains(&"Ace"));
/// assert!((at_least_one - 0.4271).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer<N> {
    name: String,
    hand_size: usize,
    deck_size: usize,
    groups: BTreeMap<N, CardGroup<N>>,
    combinations: Vec<HandComposition<N>>,
    /// `C(deck_size, hand_size)`
    denominator: u64,
}

impl<N: GroupName> Analyzer<N> {
    /// Validate the deck and enumerate every composition of `hand_size`
    /// cards.
    ///
    /// # Errors
    ///
    /// Fails on duplicate group names, invalid group ranges, a deck that is
    /// empty or larger than [`MAX_POPULATION`](crate::core::MAX_POPULATION)
    /// and a hand larger than the deck. A hand size that no composition can
    /// satisfy is not an error, the analyzer is simply empty.
    #[instrument(level = "trace", skip(name, groups))]
    pub fn new<I>(name: impl Into<String>, hand_size: usize, groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = CardGroup<N>>,
    {
        let name = name.into();
        let (groups, deck_size) = collect_groups(groups, hand_size)?;

        let start = Instant::now();
        let mut combinations: Vec<_> =
            CompositionEnumerator::from_groups(hand_size, groups.values())
                .enumerate()
                .into_iter()
                .collect();
        combinations.sort_unstable();
        debug!(
            name = %name,
            deck_size,
            hand_size,
            num_groups = groups.len(),
            num_combinations = combinations.len(),
            elapsed = ?start.elapsed(),
            "Enumerated hand compositions"
        );

        Ok(Self::from_parts(name, hand_size, deck_size, groups, combinations))
    }

    /// Build from compositions that are already known to match the deck.
    pub(crate) fn from_parts(
        name: String,
        hand_size: usize,
        deck_size: usize,
        groups: BTreeMap<N, CardGroup<N>>,
        combinations: Vec<HandComposition<N>>,
    ) -> Self {
        let denominator = BinomialTable::global().lookup(deck_size, hand_size);
        Self {
            name,
            hand_size,
            deck_size,
            groups,
            combinations,
            denominator,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    /// Total number of cards in the deck.
    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    /// Groups in name order.
    pub fn groups(&self) -> impl Iterator<Item = &CardGroup<N>> + '_ {
        self.groups.values()
    }

    pub fn group(&self, name: &N) -> Option<&CardGroup<N>> {
        self.groups.get(name)
    }

    /// All compositions, sorted.
    pub fn combinations(&self) -> &[HandComposition<N>] {
        &self.combinations
    }

    /// Number of compositions.
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    /// True when no hand of this size fits the group ranges.
    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// Structural identity of the deck and hand size, used as a cache key.
    pub fn key(&self) -> AnalyzerKey<N> {
        AnalyzerKey::new(self.groups.values().cloned().collect(), self.hand_size)
    }

    /// The flat form of this analyzer that can be stored and handed back to
    /// [`AnalyzerBuilder::cached`](super::AnalyzerBuilder::cached).
    pub fn to_record(&self) -> EnumerationRecord<N> {
        EnumerationRecord::from_analyzer(self)
    }

    /// Probability of drawing exactly `hand` from this deck.
    ///
    /// Groups missing from `hand` count as zero. Hands that do not hold
    /// exactly [`hand_size`](Analyzer::hand_size) cards, or that draw from
    /// groups this deck doesn't have, have probability 0.
    pub fn probability_of(&self, hand: &HandComposition<N>) -> f64 {
        if hand.total() != self.hand_size {
            return 0.0;
        }
        self.weight(hand)
    }

    /// Unchecked on the hand total.
    fn weight(&self, hand: &HandComposition<N>) -> f64 {
        let table = BinomialTable::global();
        // The product of the drawn groups never exceeds C(deck, hand), so
        // it can't overflow.
        let ways = hand.drawn().fold(1u128, |ways, element| {
            let size = self.groups.get(element.name()).map_or(0, CardGroup::size);
            ways * u128::from(table.lookup(size, element.count()))
        });
        ways as f64 / self.denominator as f64
    }

    /// Each composition paired with its probability.
    pub fn weighted(&self) -> impl Iterator<Item = (&HandComposition<N>, f64)> + '_ {
        self.combinations.iter().map(|hand| (hand, self.weight(hand)))
    }

    /// Probability that the drawn hand satisfies `predicate`.
    pub fn probability<P>(&self, predicate: P) -> f64
    where
        P: Fn(&HandComposition<N>) -> bool,
    {
        probability::sum_probability(self.weighted(), predicate)
    }

    /// Summed probability of a chosen subset of compositions.
    ///
    /// Duplicates are counted once for every time they appear.
    pub fn probability_of_all<'a, I>(&self, hands: I) -> f64
    where
        I: IntoIterator<Item = &'a HandComposition<N>>,
        N: 'a,
    {
        hands.into_iter().map(|h| self.probability_of(h)).sum()
    }

    /// `P(event | given)`, zero when `given` can't happen.
    pub fn conditional_probability<E, G>(&self, event: E, given: G) -> f64
    where
        E: Fn(&HandComposition<N>) -> bool,
        G: Fn(&HandComposition<N>) -> bool,
    {
        probability::conditional_probability(self.weighted(), event, given)
    }

    /// Probability weighted sum of `selector` over the hands where it is
    /// positive.
    ///
    /// See [`probability::expected_value`] for why non-positive values are
    /// skipped.
    pub fn expected_value<S>(&self, selector: S) -> f64
    where
        S: Fn(&HandComposition<N>) -> f64,
    {
        probability::expected_value(self.weighted(), selector)
    }

    /// Expected value of `selector` over the hands passing `filter`,
    /// normalised by the probability of passing. Zero when nothing passes.
    pub fn conditional_expected_value<F, S>(&self, filter: F, selector: S) -> f64
    where
        F: Fn(&HandComposition<N>) -> bool,
        S: Fn(&HandComposition<N>) -> f64,
    {
        probability::conditional_expected_value(self.weighted(), filter, selector)
    }

    /// Number of compositions matching `predicate`. This counts distinct
    /// hands, it is not weighted.
    pub fn count<P>(&self, predicate: P) -> usize
    where
        P: Fn(&HandComposition<N>) -> bool,
    {
        self.combinations.iter().filter(|h| predicate(h)).count()
    }

    /// Remove `hand` from the deck and look at what can still be drawn.
    ///
    /// Each group loses the cards `hand` holds of it and groups that run
    /// out are dropped. Group ranges applied to the first hand only, so the
    /// groups left behind are unrestricted. The new hand size is `new_hand_size`, or this
    /// analyzer's hand size when `None`, capped at the cards left.
    ///
    /// # Errors
    ///
    /// [`OddsError::UnknownGroup`] or [`OddsError::HandExceedsGroup`] when
    /// `hand` can't be drawn from this deck, and
    /// [`OddsError::EmptyExcavation`] when the resulting hand size is zero.
    ///
    /// # Example
    /// ```
    /// use deck_odds::analysis::Analyzer;
    /// use deck_odds::core::{CardGroup, HandComposition};
    ///
    /// let analyzer = Analyzer::new(
    ///     "aces",
    ///     5,
    ///     vec![CardGroup::new("Ace", 4), CardGroup::new("Filler", 36)],
    /// )
    /// .unwrap();
    /// let opening = HandComposition::from_counts([("Ace", 1), ("Filler", 4)]);
    ///
    /// // Look three cards deeper
    /// let rest = analyzer.excavate(&opening, Some(3)).unwrap();
    /// assert_eq!(rest.deck_size(), 35);
    /// assert_eq!(rest.group(&"Ace").unwrap().size(), 3);
    /// ```
    #[instrument(level = "trace", skip(self, hand), fields(name = %self.name))]
    pub fn excavate(
        &self,
        hand: &HandComposition<N>,
        new_hand_size: Option<usize>,
    ) -> Result<Analyzer<N>> {
        for element in hand.drawn() {
            let group = self
                .groups
                .get(element.name())
                .ok_or_else(|| OddsError::UnknownGroup(format!("{:?}", element.name())))?;
            if element.count() > group.size() {
                return Err(OddsError::HandExceedsGroup {
                    group: format!("{:?}", element.name()),
                    drawn: element.count(),
                    size: group.size(),
                });
            }
        }

        let remaining: Vec<CardGroup<N>> = self
            .groups
            .values()
            .filter_map(|group| {
                let left = group.size() - hand.count_of(group.name());
                (left > 0).then(|| group.remainder(left))
            })
            .collect();
        let population: usize = remaining.iter().map(CardGroup::size).sum();
        let hand_size = new_hand_size.unwrap_or(self.hand_size).min(population);
        if hand_size == 0 {
            return Err(OddsError::EmptyExcavation);
        }

        trace!(population, hand_size, removed = hand.total(), "Excavating");
        Analyzer::new(self.name.clone(), hand_size, remaining)
    }

    /// Collapse every group not named in `keep` into one miscellaneous
    /// group.
    ///
    /// `misc` receives the number of cards to cover and must return a group
    /// of exactly that size. It is not called when the kept groups already
    /// make up the whole deck. Names in `keep` that aren't in the deck are
    /// ignored.
    ///
    /// Fewer groups means far fewer compositions, so this is worth doing
    /// before expensive queries that only look at a few groups.
    ///
    /// # Errors
    ///
    /// [`OddsError::InvalidOptimization`] when the kept groups hold no
    /// cards, and [`OddsError::MiscGroupSize`] when `misc` returns a group
    /// of the wrong size.
    ///
    /// # Example
    /// ```
    /// use deck_odds::analysis::Analyzer;
    /// use deck_odds::core::CardGroup;
    ///
    /// let analyzer = Analyzer::new(
    ///     "deck",
    ///     5,
    ///     vec![
    ///         CardGroup::new("Ace", 4),
    ///         CardGroup::new("King", 4),
    ///         CardGroup::new("Queen", 4),
    ///         CardGroup::new("Jack", 4),
    ///     ],
    /// )
    /// .unwrap();
    /// let small = analyzer
    ///     .optimize(&["Ace"], |size| CardGroup::new("Other", size))
    ///     .unwrap();
    /// assert_eq!(small.deck_size(), 16);
    /// assert!(small.len() < analyzer.len());
    /// ```
    pub fn optimize<F>(&self, keep: &[N], misc: F) -> Result<Analyzer<N>>
    where
        F: FnOnce(usize) -> CardGroup<N>,
    {
        let mut groups: Vec<CardGroup<N>> = keep
            .iter()
            .filter_map(|name| self.groups.get(name))
            .cloned()
            .collect();
        groups.sort();
        groups.dedup();

        let kept: usize = groups.iter().map(CardGroup::size).sum();
        if kept == 0 || kept > self.deck_size {
            return Err(OddsError::InvalidOptimization {
                kept,
                deck_size: self.deck_size,
            });
        }

        let misc_size = self.deck_size - kept;
        if misc_size > 0 {
            let group = misc(misc_size);
            if group.size() != misc_size {
                return Err(OddsError::MiscGroupSize {
                    expected: misc_size,
                    actual: group.size(),
                });
            }
            groups.push(group);
        }

        debug!(
            name = %self.name,
            kept_groups = groups.len(),
            misc_size,
            "Optimizing analyzer"
        );
        Analyzer::new(self.name.clone(), self.hand_size, groups)
    }
}

/// Index groups by name and check the deck is usable.
pub(crate) fn collect_groups<N, I>(
    groups: I,
    hand_size: usize,
) -> Result<(BTreeMap<N, CardGroup<N>>, usize)>
where
    N: GroupName,
    I: IntoIterator<Item = CardGroup<N>>,
{
    let mut by_name = BTreeMap::new();
    for group in groups {
        group.validate()?;
        let name = group.name().clone();
        if by_name.insert(name.clone(), group).is_some() {
            return Err(OddsError::DuplicateGroup(format!("{:?}", name)));
        }
    }

    let deck_size: usize = by_name.values().map(CardGroup::size).sum();
    let list: Vec<CardGroup<N>> = by_name.values().cloned().collect();
    probability::validate(&list, deck_size, hand_size)?;
    Ok((by_name, deck_size))
}
