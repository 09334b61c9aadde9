// Rescale a batch of market metrics into [0,1] against the batch's own min/max.

/// Added to the denominator so near-zero ranges never divide by exactly zero.
pub const EPSILON: f64 = 1e-12;

/// Min-max normalise `values`.
///
/// - empty input gives empty output
/// - a uniform series maps to all 1.0
/// - NaN entries are skipped when finding min/max and stay NaN in their own slot;
///   an all-NaN series counts as uniform
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let Some((min, max)) = bounds(values) else {
        return vec![1.0; values.len()];
    };
    if max == min {
        return vec![1.0; values.len()];
    }
    // Halved so a span wider than f64::MAX stays finite; halving is exact.
    let (lo, range) = (min / 2.0, max / 2.0 - min / 2.0 + EPSILON / 2.0);
    values.iter().map(|x| (x / 2.0 - lo) / range).collect()
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|x| !x.is_nan())
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
}
