//! Per-pair evaluation records and the running best.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::{Serialize, Serializer};

use crate::neighbor::PowerNeighbor;

/// Scoring of one `(x, y)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationRecord {
    pub x: u64,
    pub y: u64,
    #[serde(serialize_with = "decimal")]
    pub z: BigUint,
    #[serde(serialize_with = "decimal")]
    pub miss_below: BigUint,
    #[serde(serialize_with = "decimal")]
    pub miss_above: BigUint,
    #[serde(serialize_with = "decimal")]
    pub miss: BigUint,
    /// `miss / sum`, for display. Comparisons use [`EvaluationRecord::beats`].
    pub relative_miss: f64,
    #[serde(skip)]
    pub sum: BigUint,
}

impl EvaluationRecord {
    pub fn evaluate(x: u64, y: u64, n: u32) -> Self {
        Self::from_neighbor(x, y, PowerNeighbor::of(x, y, n))
    }

    pub fn from_neighbor(x: u64, y: u64, neighbor: PowerNeighbor) -> Self {
        debug_assert!(!neighbor.sum.is_zero());
        let miss = neighbor.miss().clone();
        Self {
            x,
            y,
            relative_miss: ratio(&miss, &neighbor.sum),
            miss,
            z: neighbor.z,
            miss_below: neighbor.miss_below,
            miss_above: neighbor.miss_above,
            sum: neighbor.sum,
        }
    }

    /// Strictly smaller relative miss, decided exactly by cross-multiplying.
    pub fn beats(&self, other: &BestResult) -> bool {
        &self.miss * &other.sum < &other.miss * &self.sum
    }

    pub fn is_exact(&self) -> bool {
        self.miss.is_zero()
    }
}

/// Smallest relative miss found so far.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestResult {
    pub x: u64,
    pub y: u64,
    #[serde(serialize_with = "decimal")]
    pub z: BigUint,
    #[serde(serialize_with = "decimal")]
    pub miss: BigUint,
    pub relative_miss: f64,
    #[serde(skip)]
    pub sum: BigUint,
}

impl From<&EvaluationRecord> for BestResult {
    fn from(record: &EvaluationRecord) -> Self {
        Self {
            x: record.x,
            y: record.y,
            z: record.z.clone(),
            miss: record.miss.clone(),
            relative_miss: record.relative_miss,
            sum: record.sum.clone(),
        }
    }
}

/// Holds the running best and decides when it improves.
#[derive(Debug, Default)]
pub struct BestTracker {
    best: Option<BestResult>,
}

impl BestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the best if `record` is strictly better (or nothing is held
    /// yet). Returns the new best when it changed; ties keep the earlier one.
    pub fn offer(&mut self, record: &EvaluationRecord) -> Option<&BestResult> {
        let improved = match &self.best {
            None => true,
            Some(best) => record.beats(best),
        };
        if improved {
            self.best = Some(BestResult::from(record));
            self.best.as_ref()
        } else {
            None
        }
    }

    pub fn best(&self) -> Option<&BestResult> {
        self.best.as_ref()
    }

    pub fn into_best(self) -> Option<BestResult> {
        self.best
    }
}

/// `num / den` as an `f64`, scaling both down first so neither converts to
/// infinity.
pub fn ratio(num: &BigUint, den: &BigUint) -> f64 {
    let shift = den.bits().saturating_sub(1000);
    let num = (num >> shift).to_f64().unwrap_or(f64::NAN);
    let den = (den >> shift).to_f64().unwrap_or(f64::NAN);
    num / den
}

fn decimal<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_record() {
        let rec = EvaluationRecord::evaluate(10, 10, 3);
        assert_eq!(rec.z, BigUint::from(12u32));
        assert_eq!(rec.miss_below, BigUint::from(272u32));
        assert_eq!(rec.miss_above, BigUint::from(197u32));
        assert_eq!(rec.miss, BigUint::from(197u32));
        assert_eq!(rec.relative_miss, 0.0985);
    }

    #[test]
    fn tracker_keeps_first_on_tie() {
        let mut tracker = BestTracker::new();
        let first = EvaluationRecord::evaluate(10, 11, 3);
        let mirrored = EvaluationRecord::evaluate(11, 10, 3);
        assert!(tracker.offer(&first).is_some());
        assert!(tracker.offer(&mirrored).is_none());
        let best = tracker.best().unwrap();
        assert_eq!((best.x, best.y), (10, 11));
    }

    #[test]
    fn tracker_replaces_on_strict_improvement() {
        let mut tracker = BestTracker::new();
        tracker.offer(&EvaluationRecord::evaluate(10, 10, 3));
        // 9^3 + 10^3 = 12^3 + 1
        let better = EvaluationRecord::evaluate(9, 10, 3);
        let best = tracker.offer(&better).unwrap();
        assert_eq!(best.miss, BigUint::from(1u32));
        assert!(tracker.into_best().unwrap().relative_miss < 0.0985);
    }

    #[test]
    fn ratio_survives_huge_values() {
        let den = BigUint::from(1u32) << 5000u32;
        let num = BigUint::from(1u32) << 4999u32;
        assert_eq!(ratio(&num, &den), 0.5);
    }

    #[test]
    fn serializes_big_values_as_strings() {
        let rec = EvaluationRecord::evaluate(10, 10, 3);
        let json = serde_json::to_value(BestResult::from(&rec)).unwrap();
        assert_eq!(json["z"], "12");
        assert_eq!(json["miss"], "197");
        assert_eq!(json["x"], 10);
        assert!(json.get("sum").is_none());
    }
}
