//! Deck comparison framework
//!
//! This module compares several decks side by side. Each deck is analyzed
//! at every configured hand size and a set of named categories (any
//! function of an [`Analyzer`](crate::analysis::Analyzer)) is evaluated on
//! each. Results can then be ranked per category and hand size.
//!
//! # Example
//!
//! ```
//! use deck_odds::comparison::ComparisonBuilder;
//! use deck_odds::core::CardGroup;
//!
//! let deck = |starters: usize| {
//!     vec![
//!         CardGroup::new("Starter", starters),
//!         CardGroup::new("Other", 40 - starters),
//!     ]
//! };
//!
//! let result = ComparisonBuilder::new()
//!     .deck("8 starters", deck(8))
//!     .deck("12 starters", deck(12))
//!     .deck("10 starters", deck(10))
//!     .category("open starter", |a| a.probability(|h| h.contains(&"Starter")))
//!     .hand_sizes([5, 6])
//!     .build()
//!     .unwrap()
//!     .run()
//!     .unwrap();
//!
//! for (rank, (deck, p)) in result.rankings("open starter", 5).unwrap().iter().enumerate() {
//!     println!("{}. {} - {:.2}%", rank + 1, deck, p * 100.0);
//! }
//! assert_eq!(result.best("open starter", 6).unwrap().unwrap().0, "12 starters");
//! ```

mod builder;
mod config;
mod error;
mod result;
mod runner;

pub use builder::ComparisonBuilder;
pub use config::{ComparisonConfig, RankOrder};
pub use error::{ComparisonError, Result};
pub use result::{ComparisonResult, Configuration};
pub use runner::DeckComparison;

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::analysis::Analyzer;
    use crate::core::{CardGroup, OddsError};

    fn deck(starters: usize) -> Vec<CardGroup<&'static str>> {
        vec![
            CardGroup::new("Starter", starters),
            CardGroup::new("Other", 40 - starters),
        ]
    }

    #[test_log::test]
    fn test_run_and_rank() {
        let result = ComparisonBuilder::new()
            .deck("eight", deck(8))
            .deck("twelve", deck(12))
            .deck("ten", deck(10))
            .category("open starter", |a| {
                a.probability(|h| h.contains(&"Starter"))
            })
            .category("starters", |a| {
                a.expected_value(|h| h.count_of(&"Starter") as f64)
            })
            .hand_sizes([5, 6])
            .build()
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(result.configurations().len(), 6);
        assert_eq!(result.categories().len(), 2);

        let ranked: Vec<_> = result
            .rankings("open starter", 5)
            .unwrap()
            .into_iter()
            .map(|(d, _)| d)
            .collect();
        assert_eq!(ranked, vec!["twelve", "ten", "eight"]);

        let direct = Analyzer::new("ten", 6, deck(10))
            .unwrap()
            .probability(|h| h.contains(&"Starter"));
        assert_relative_eq!(
            result.value("ten", 6, "open starter").unwrap(),
            direct,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            result.value("eight", 5, "starters").unwrap(),
            5.0 * 8.0 / 40.0,
            epsilon = 1e-12
        );
        assert!(result.value("nine", 5, "starters").is_none());
    }

    #[test]
    fn test_ascending_order() {
        let result = ComparisonBuilder::new()
            .deck("eight", deck(8))
            .deck("twelve", deck(12))
            .category("brick", |a| {
                a.probability(|h| !h.contains(&"Starter"))
            })
            .order(RankOrder::Ascending)
            .build()
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(result.best("brick", 5).unwrap().unwrap().0, "twelve");
    }

    #[test]
    fn test_unknown_category() {
        let result = ComparisonBuilder::new()
            .deck("eight", deck(8))
            .category("c", |_| 1.0)
            .build()
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(
            result.rankings("missing", 5).unwrap_err(),
            ComparisonError::UnknownCategory("missing".to_string())
        );
        assert!(result.best("c", 7).unwrap().is_none());
    }

    #[test]
    fn test_invalid_deck_fails_run() {
        let comparison = ComparisonBuilder::new()
            .deck("small", vec![CardGroup::new("Starter", 3)])
            .category("c", |_| 1.0)
            .hand_sizes([5])
            .build()
            .unwrap();
        assert_eq!(
            comparison.run().unwrap_err(),
            ComparisonError::InvalidDeck(OddsError::HandExceedsDeck {
                hand_size: 5,
                deck_size: 3
            })
        );
    }
}
