//! Validated search parameters.
//!
//! Raw values coming from the command line or the interactive prompt are
//! checked here, once, before any search starts. The search itself never
//! re-validates.

use serde::Serialize;

use crate::error::NearMissError;

/// Smallest accepted exponent (inclusive).
pub const MIN_EXPONENT: i64 = 3;
/// Largest accepted exponent (exclusive).
pub const MAX_EXPONENT: i64 = 12;
/// The bound must be strictly greater than this.
pub const MIN_BOUND: i64 = 10;
/// First value taken by both `x` and `y`.
pub const START: u64 = 10;

/// Exponent `n` and upper bound `k` for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchParameters {
    n: u32,
    k: u64,
}

impl SearchParameters {
    /// Build parameters, rejecting `n` outside `[3, 12)` and `k <= 10`.
    pub fn new(n: i64, k: i64) -> Result<Self, NearMissError> {
        let n = validate_exponent(n)?;
        let k = validate_bound(k)?;
        Ok(Self { n, k })
    }

    /// Parse both values from text (surrounding whitespace ignored).
    pub fn parse(n: &str, k: &str) -> Result<Self, NearMissError> {
        Self::new(parse_integer("n", n)?, parse_integer("k", k)?)
    }

    pub fn exponent(&self) -> u32 {
        self.n
    }

    pub fn bound(&self) -> u64 {
        self.k
    }

    /// Number of `(x, y)` pairs the search visits: `(k - 9)^2`.
    ///
    /// `u128` because the square outgrows `u64` once `k` passes `2^32`.
    pub fn pair_count(&self) -> u128 {
        let side = (self.k - START + 1) as u128;
        side * side
    }
}

pub fn validate_exponent(n: i64) -> Result<u32, NearMissError> {
    if (MIN_EXPONENT..MAX_EXPONENT).contains(&n) {
        Ok(n as u32)
    } else {
        Err(NearMissError::InvalidExponent(n))
    }
}

pub fn validate_bound(k: i64) -> Result<u64, NearMissError> {
    if k > MIN_BOUND {
        Ok(k as u64)
    } else {
        Err(NearMissError::InvalidBound(k))
    }
}

pub fn parse_integer(field: &'static str, input: &str) -> Result<i64, NearMissError> {
    input.trim().parse().map_err(|_| NearMissError::Parse {
        field,
        input: input.trim().to_string(),
    })
}
