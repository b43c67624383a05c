//! Vector distance utilities shared by every strategy.

/// Squared Euclidean distance between two descriptors.
///
/// Components are `f32` but the sum is accumulated in `f64` so long
/// descriptors (64 or 128 elements) don't lose precision.
/// Both slices must have the same length; extra elements are ignored.
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum()
}

/// Euclidean distance between two descriptors
pub fn euclidean(a: &[f32], b: &[f32]) -> f64 {
    squared_euclidean(a, b).sqrt()
}

/// Sum of squared distances over `(source, target)` index pairs
pub fn total_squared_distance<A, B>(
    sources: &[A],
    targets: &[B],
    pairs: impl IntoIterator<Item = (usize, usize)>,
) -> f64
where
    A: AsRef<[f32]>,
    B: AsRef<[f32]>,
{
    pairs
        .into_iter()
        .map(|(s, t)| squared_euclidean(sources[s].as_ref(), targets[t].as_ref()))
        .sum()
}
