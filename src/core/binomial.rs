use super::error::{OddsError, Result};

/// Largest population the table covers. Every deck handled by the crate
/// has to fit inside this bound.
pub const MAX_POPULATION: usize = 60;

const ROWS: usize = MAX_POPULATION + 1;

/// Built during const evaluation so an overflow is a compile error rather
/// than a wrapped value.
static TABLE: BinomialTable = BinomialTable::build();

/// Pascal's triangle up to `MAX_POPULATION`.
///
/// `C(60, 30)` is a little above `1.1e17` so every entry fits in a `u64`.
/// There is exactly one table for the whole process, reach it with
/// [`BinomialTable::global`].
#[derive(Debug)]
pub struct BinomialTable {
    rows: [[u64; ROWS]; ROWS],
}

impl BinomialTable {
    const fn build() -> Self {
        let mut rows = [[0u64; ROWS]; ROWS];
        let mut n = 0;
        while n < ROWS {
            rows[n][0] = 1;
            let mut k = 1;
            while k <= n {
                // rows[n - 1][n] is still zero which gives C(n, n) = 1
                rows[n][k] = match rows[n - 1][k - 1].checked_add(rows[n - 1][k]) {
                    Some(v) => v,
                    None => panic!("binomial coefficient does not fit in u64"),
                };
                k += 1;
            }
            n += 1;
        }
        BinomialTable { rows }
    }

    /// The process wide table.
    pub fn global() -> &'static BinomialTable {
        &TABLE
    }

    /// Number of ways to pick `k` items out of `n`.
    ///
    /// Returns 0 when `k > n`. Fails with
    /// [`OddsError::PopulationTooLarge`] when `n` is past the table.
    ///
    /// # Example
    /// ```
    /// use deck_odds::core::BinomialTable;
    ///
    /// let table = BinomialTable::global();
    /// assert_eq!(table.choose(40, 5).unwrap(), 658_008);
    /// assert_eq!(table.choose(4, 5).unwrap(), 0);
    /// assert!(table.choose(61, 5).is_err());
    /// ```
    pub fn choose(&self, n: usize, k: usize) -> Result<u64> {
        if n > MAX_POPULATION {
            return Err(OddsError::PopulationTooLarge(n));
        }
        Ok(self.lookup(n, k))
    }

    /// Same as [`BinomialTable::choose`] but accepts negative `k`, which
    /// always has zero ways.
    pub fn choose_signed(&self, n: usize, k: i64) -> Result<u64> {
        match usize::try_from(k) {
            Ok(k) => self.choose(n, k),
            Err(_) if n > MAX_POPULATION => Err(OddsError::PopulationTooLarge(n)),
            Err(_) => Ok(0),
        }
    }

    /// Unchecked on `n`; callers have already validated the population.
    #[inline]
    pub(crate) fn lookup(&self, n: usize, k: usize) -> u64 {
        debug_assert!(n <= MAX_POPULATION);
        if k > n {
            0
        } else {
            self.rows[n][k]
        }
    }
}

/// Shortcut for `BinomialTable::global().choose(n, k)`.
pub fn choose(n: usize, k: usize) -> Result<u64> {
    TABLE.choose(n, k)
}
