//! String distance metrics consumed by the tree.

mod levenshtein;

pub use levenshtein::{levenshtein, Levenshtein};

use crate::r#type::DistanceNum;

/// A distance function over strings.
///
/// The tree treats the metric as a black box, but its correctness depends on
/// the metric-space axioms holding:
///
/// - identity: `distance(x, x) == 0`, and `distance(x, y) == 0` only when
///   `x == y`
/// - symmetry: `distance(x, y) == distance(y, x)`
/// - triangle inequality: `distance(x, z) <= distance(x, y) + distance(y, z)`
///
/// The triangle inequality in particular is what makes search pruning sound;
/// none of these properties are re-verified at runtime. The metric must also
/// be deterministic: a metric that answers differently for the same pair of
/// words will corrupt the tree's distance keys.
pub trait Metric {
    /// The unsigned integer type distances are measured in.
    type Distance: DistanceNum;

    /// Distance between `a` and `b`.
    fn distance(&self, a: &str, b: &str) -> Self::Distance;
}
