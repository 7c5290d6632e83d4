//! Exact integer n-th roots of arbitrary-precision values.
//!
//! A floating-point `v.powf(1.0 / n)` is only used to seed the iteration.
//! The integer Newton step below never lands under the true floor root once
//! it has been applied, so iterating until it stops decreasing yields the
//! floor root. The result is then checked against `z^n <= v < (z+1)^n`
//! with exact comparisons and nudged if the check fails.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

/// Largest `z` with `z^n <= value`.
///
/// `n` must be at least 1.
pub fn integer_root(value: &BigUint, n: u32) -> BigUint {
    assert!(n >= 1, "root degree must be positive");
    if n == 1 || value.is_zero() {
        return value.clone();
    }

    let mut z = newton_step(value, n, &initial_estimate(value, n));
    loop {
        let next = newton_step(value, n, &z);
        if next >= z {
            break;
        }
        z = next;
    }

    while z.pow(n) > *value {
        z -= 1u32;
    }
    while (&z + 1u32).pow(n) <= *value {
        z += 1u32;
    }
    z
}

/// One integer Newton step for `f(z) = z^n - value`.
///
/// For any positive `z` the result is at least the floor root.
fn newton_step(value: &BigUint, n: u32, z: &BigUint) -> BigUint {
    let n_big = BigUint::from(n);
    ((&n_big - 1u32) * z + value / z.pow(n - 1)) / n_big
}

/// A positive starting point close to the root.
fn initial_estimate(value: &BigUint, n: u32) -> BigUint {
    if let Some(approx) = value.to_f64().filter(|v| v.is_finite()) {
        let root = approx.powf(1.0 / n as f64).ceil();
        if root >= 1.0 && root < u64::MAX as f64 {
            return BigUint::from(root as u64);
        }
    }
    // 2^ceil(bits / n) is always above the root.
    let bits = value.bits();
    BigUint::one() << ((bits + n as u64 - 1) / n as u64)
}
