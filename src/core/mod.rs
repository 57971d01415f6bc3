/// Precomputed binomial coefficients.
mod binomial;
/// Export `BinomialTable`, `choose` and the population bound.
pub use self::binomial::{choose, BinomialTable, MAX_POPULATION};

/// Module for the named card groups a deck is made of.
mod card_group;
/// Export `CardGroup` and the `GroupName` bound.
pub use self::card_group::{CardGroup, GroupName};

/// Canonical hand representation.
mod hand;
/// Export `HandElement` and `HandComposition`.
pub use self::hand::{HandComposition, HandElement};

/// Recursive search over every hand composition.
mod enumerate;
/// Export `CompositionEnumerator`.
pub use self::enumerate::CompositionEnumerator;

mod error;
pub use self::error::{OddsError, Result};
