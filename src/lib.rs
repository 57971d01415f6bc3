//! Deck Odds
//!
//! Exact probabilities for drawing cards from a deck described by named
//! groups of interchangeable cards.
//!
//! Instead of sampling, every distinguishable hand composition is
//! enumerated once and weighted by the multivariate hypergeometric
//! distribution. Queries are then plain sums over those weighted hands.
//!
//! # Core
//!
//! The [`core`] module holds the building blocks: the precomputed
//! [`core::BinomialTable`], [`core::CardGroup`] for a deck entry,
//! [`core::HandComposition`] for a drawn hand and the
//! [`core::CompositionEnumerator`] that lists every hand.
//!
//! ```
//! use deck_odds::core::{CardGroup, CompositionEnumerator};
//!
//! let groups = vec![CardGroup::new("Ace", 4), CardGroup::new("Filler", 36)];
//! let hands = CompositionEnumerator::from_groups(2, &groups).enumerate();
//! // no aces, one ace or two aces
//! assert_eq!(hands.len(), 3);
//! ```
//!
//! # Analysis
//!
//! An [`analysis::Analyzer`] owns a deck and its enumeration and answers
//! probability and expected value queries. It can also derive new
//! analyzers for the rest of the deck after a hand is drawn (excavation),
//! or for a deck collapsed down to the groups that matter (optimization).
//!
//! ```
//! use deck_odds::analysis::Analyzer;
//! use deck_odds::core::CardGroup;
//!
//! let analyzer = Analyzer::new(
//!     "aces",
//!     5,
//!     vec![CardGroup::new("Ace", 4), CardGroup::new("Filler", 36)],
//! )
//! .unwrap();
//! let p = analyzer.probability(|h| h.contains(&"Ace"));
//! assert!((p - 0.4271).abs() < 1e-4);
//! ```
//!
//! # Comparison
//!
//! The [`comparison`] module runs the same queries over several decks and
//! hand sizes and ranks the results.
//!
//! # Records
//!
//! With the `serde` feature an analyzer's enumeration can be stored as an
//! [`record::EnumerationRecord`] and reused by a later build.
#![deny(clippy::all)]

/// Groups, hands, binomial coefficients and enumeration.
pub mod core;

pub mod analysis;

pub mod comparison;

pub mod record;
