//! Nearest n-th powers around `x^n + y^n`.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::root::integer_root;

/// The n-th powers bracketing a sum of two n-th powers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerNeighbor {
    /// `x^n + y^n`.
    pub sum: BigUint,
    /// Largest integer with `z^n <= sum`.
    pub z: BigUint,
    /// `sum - z^n`.
    pub miss_below: BigUint,
    /// `(z + 1)^n - sum`, always positive.
    pub miss_above: BigUint,
}

impl PowerNeighbor {
    pub fn of(x: u64, y: u64, n: u32) -> Self {
        let sum = BigUint::from(x).pow(n) + BigUint::from(y).pow(n);
        Self::around(sum, n)
    }

    /// Bracket an arbitrary value between consecutive n-th powers.
    pub fn around(sum: BigUint, n: u32) -> Self {
        let z = integer_root(&sum, n);
        let lower = z.pow(n);
        let upper = (&z + 1u32).pow(n);
        debug_assert!(lower <= sum && sum < upper);
        Self {
            miss_below: &sum - lower,
            miss_above: upper - &sum,
            sum,
            z,
        }
    }

    /// Distance to the nearer of the two bracketing powers.
    pub fn miss(&self) -> &BigUint {
        std::cmp::min(&self.miss_below, &self.miss_above)
    }

    /// True when the sum is itself an n-th power.
    pub fn is_exact(&self) -> bool {
        self.miss_below.is_zero()
    }
}
