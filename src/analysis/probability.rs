//! Hypergeometric probability of hand compositions and the aggregate folds
//! built on top of it.
//!
//! The probability of a composition is the number of ways to draw it,
//! the product of `C(size, count)` over the drawn groups, divided by the
//! number of hands `C(deck_size, hand_size)`. The division happens once at
//! the very end so rounding only happens once.
//!
//! The aggregate functions take an iterator of `(composition, probability)`
//! pairs, like the one returned by
//! [`Analyzer::weighted`](super::Analyzer::weighted), so they can be
//! used over any subset of an analyzer's compositions.

use crate::core::{
    BinomialTable, CardGroup, GroupName, HandComposition, OddsError, Result, MAX_POPULATION,
};

/// Probability of drawing exactly `hand` when drawing `hand_size` cards
/// from a deck of `deck_size` made of `groups`.
///
/// Cards of the deck that are not in any group count as one more unnamed
/// group, which supplies whatever `hand` leaves short of `hand_size`. The
/// numerator is therefore the product of `C(size, count)` over the drawn
/// groups times `C(rest, hand_size - drawn)`. When the groups cover the
/// whole deck and `hand` is complete, `rest` is zero and the second factor
/// is 1. Otherwise this differs from the bare product over the drawn
/// groups.
///
/// Returns 0 when `hand` holds more than `hand_size` cards, draws more
/// cards from a group than it holds, or is short and there is no unnamed
/// rest to fill it.
///
/// # Errors
///
/// Fails when the deck itself is malformed: invalid group ranges, groups
/// larger than the deck, a hand larger than the deck or a deck that does
/// not fit in the binomial table.
///
/// # Example
/// ```
/// use deck_odds::analysis::hypergeometric;
/// use deck_odds::core::{CardGroup, HandComposition};
///
/// let groups = vec![CardGroup::new("Ace", 4), CardGroup::new("Filler", 36)];
/// let one_ace = HandComposition::from_counts([("Ace", 1), ("Filler", 4)]);
/// let p = hypergeometric(&one_ace, &groups, 40, 5).unwrap();
/// assert!((p - 0.358_081).abs() < 1e-6);
/// ```
pub fn hypergeometric<N: GroupName>(
    hand: &HandComposition<N>,
    groups: &[CardGroup<N>],
    deck_size: usize,
    hand_size: usize,
) -> Result<f64> {
    validate(groups, deck_size, hand_size)?;

    let table = BinomialTable::global();
    let denominator = table.lookup(deck_size, hand_size);
    if hand.total() > hand_size {
        return Ok(0.0);
    }

    let mut ways: u128 = 1;
    let mut named = 0;
    for element in hand.drawn() {
        let size = groups
            .iter()
            .find(|g| g.name() == element.name())
            .map(CardGroup::size)
            .unwrap_or(0);
        named += element.count();
        ways *= u128::from(table.lookup(size, element.count()));
    }
    // Whatever the named groups did not cover comes from the unnamed rest.
    let rest = deck_size - groups.iter().map(CardGroup::size).sum::<usize>();
    ways *= u128::from(table.lookup(rest, hand_size - named));

    Ok(ways as f64 / denominator as f64)
}

/// Checks shared by every probability calculation.
pub(crate) fn validate<N: GroupName>(
    groups: &[CardGroup<N>],
    deck_size: usize,
    hand_size: usize,
) -> Result<()> {
    if deck_size == 0 || deck_size > MAX_POPULATION {
        return Err(OddsError::DeckSizeOutOfRange(deck_size));
    }
    for group in groups {
        group.validate()?;
    }
    let total: usize = groups.iter().map(CardGroup::size).sum();
    if total > deck_size {
        return Err(OddsError::GroupsExceedDeck { total, deck_size });
    }
    if hand_size > deck_size {
        return Err(OddsError::HandExceedsDeck {
            hand_size,
            deck_size,
        });
    }
    Ok(())
}

/// Sum of the probabilities of the compositions matching `predicate`.
pub fn sum_probability<'a, N, I, P>(weighted: I, predicate: P) -> f64
where
    N: 'a,
    I: IntoIterator<Item = (&'a HandComposition<N>, f64)>,
    P: Fn(&HandComposition<N>) -> bool,
{
    weighted
        .into_iter()
        .filter(|(hand, _)| predicate(hand))
        .map(|(_, p)| p)
        .sum()
}

/// Probability weighted sum of `selector`.
///
/// Compositions where the selector is zero or negative are left out of the
/// sum entirely. For zero this changes nothing, for negative values it
/// means they never pull the result down. Callers that need signed values
/// should fold [`Analyzer::weighted`](super::Analyzer::weighted) themselves.
pub fn expected_value<'a, N, I, S>(weighted: I, selector: S) -> f64
where
    N: 'a,
    I: IntoIterator<Item = (&'a HandComposition<N>, f64)>,
    S: Fn(&HandComposition<N>) -> f64,
{
    weighted
        .into_iter()
        .filter_map(|(hand, p)| {
            let value = selector(hand);
            (value > 0.0).then_some(p * value)
        })
        .sum()
}

/// Expected value of `selector` given that `filter` holds.
///
/// Zero when no composition passes the filter.
pub fn conditional_expected_value<'a, N, I, F, S>(weighted: I, filter: F, selector: S) -> f64
where
    N: 'a,
    I: IntoIterator<Item = (&'a HandComposition<N>, f64)>,
    F: Fn(&HandComposition<N>) -> bool,
    S: Fn(&HandComposition<N>) -> f64,
{
    let (weighted_value, mass) = weighted
        .into_iter()
        .filter(|(hand, _)| filter(hand))
        .fold((0.0, 0.0), |(value, mass), (hand, p)| {
            (value + p * selector(hand), mass + p)
        });
    if mass == 0.0 {
        0.0
    } else {
        weighted_value / mass
    }
}

/// `P(event | given)`. Zero when `given` never happens.
pub fn conditional_probability<'a, N, I, E, G>(weighted: I, event: E, given: G) -> f64
where
    N: 'a,
    I: IntoIterator<Item = (&'a HandComposition<N>, f64)>,
    E: Fn(&HandComposition<N>) -> bool,
    G: Fn(&HandComposition<N>) -> bool,
{
    let (joint, mass) = weighted
        .into_iter()
        .filter(|(hand, _)| given(hand))
        .fold((0.0, 0.0), |(joint, mass), (hand, p)| {
            if event(hand) {
                (joint + p, mass + p)
            } else {
                (joint, mass + p)
            }
        });
    if mass == 0.0 {
        0.0
    } else {
        joint / mass
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::core::choose;

    fn ace_deck() -> Vec<CardGroup<&'static str>> {
        vec![CardGroup::new("Ace", 4), CardGroup::new("Filler", 36)]
    }

    #[test]
    fn test_one_ace_in_five() {
        let hand = HandComposition::from_counts([("Ace", 1), ("Filler", 4)]);
        let p = hypergeometric(&hand, &ace_deck(), 40, 5).unwrap();
        let ways = choose(4, 1).unwrap() * choose(36, 4).unwrap();
        let expected = ways as f64 / choose(40, 5).unwrap() as f64;
        assert_relative_eq!(p, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_unnamed_rest_of_deck() {
        // only the aces are named, the other 36 cards are implied
        let groups = vec![CardGroup::new("Ace", 4)];
        let hand = HandComposition::from_counts([("Ace", 1)]);
        let p = hypergeometric(&hand, &groups, 40, 1).unwrap();
        assert_relative_eq!(p, 0.1, epsilon = 1e-12);

        let hand = HandComposition::from_counts([("Ace", 2)]);
        let p = hypergeometric(&hand, &groups, 40, 5).unwrap();
        let ways = choose(4, 2).unwrap() * choose(36, 3).unwrap();
        let expected = ways as f64 / choose(40, 5).unwrap() as f64;
        assert_relative_eq!(p, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_wrong_total_is_zero() {
        let short = HandComposition::from_counts([("Ace", 1), ("Filler", 1)]);
        assert_eq!(hypergeometric(&short, &ace_deck(), 40, 5).unwrap(), 0.0);
        let long = HandComposition::from_counts([("Ace", 2), ("Filler", 4)]);
        assert_eq!(hypergeometric(&long, &ace_deck(), 40, 5).unwrap(), 0.0);
    }

    #[test]
    fn test_drawing_more_than_a_group_holds_is_zero() {
        let hand = HandComposition::from_counts([("Ace", 5)]);
        assert_eq!(hypergeometric(&hand, &ace_deck(), 40, 5).unwrap(), 0.0);
    }

    #[test]
    fn test_validation() {
        let hand = HandComposition::from_counts([("Ace", 1)]);
        assert_eq!(
            hypergeometric(&hand, &ace_deck(), 39, 1),
            Err(OddsError::GroupsExceedDeck {
                total: 40,
                deck_size: 39
            })
        );
        assert_eq!(
            hypergeometric(&hand, &ace_deck(), 40, 41),
            Err(OddsError::HandExceedsDeck {
                hand_size: 41,
                deck_size: 40
            })
        );
        assert_eq!(
            hypergeometric(&hand, &ace_deck(), 61, 5),
            Err(OddsError::DeckSizeOutOfRange(61))
        );
        assert_eq!(
            hypergeometric::<&str>(&HandComposition::new(vec![]), &[], 0, 0),
            Err(OddsError::DeckSizeOutOfRange(0))
        );
    }

    #[test]
    fn test_aggregates_on_empty_input() {
        let empty: Vec<(&HandComposition<&str>, f64)> = Vec::new();
        assert_eq!(sum_probability(empty.clone(), |_| true), 0.0);
        assert_eq!(expected_value(empty.clone(), |_| 1.0), 0.0);
        assert_eq!(
            conditional_expected_value(empty.clone(), |_| true, |_| 1.0),
            0.0
        );
        assert_eq!(conditional_probability(empty, |_| true, |_| true), 0.0);
    }

    #[test]
    fn test_expected_value_skips_non_positive() {
        let a = HandComposition::from_counts([("a", 1)]);
        let b = HandComposition::from_counts([("b", 1)]);
        let weighted = vec![(&a, 0.5), (&b, 0.5)];
        let ev = expected_value(weighted.iter().copied(), |h| {
            if h.contains(&"a") {
                2.0
            } else {
                -10.0
            }
        });
        assert_relative_eq!(ev, 1.0);

        let cev = conditional_expected_value(
            weighted.iter().copied(),
            |_| true,
            |h| if h.contains(&"a") { 2.0 } else { -10.0 },
        );
        assert_relative_eq!(cev, -4.0);
    }
}
