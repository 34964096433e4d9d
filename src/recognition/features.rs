// src/recognition/features.rs
//! Fixed-length stroke features

use crate::input::types::GesturePoint;

/// Flatten the first `max_points` points into `[x0, y0, x1, y1, ...]`.
///
/// Longer strokes are truncated (not resampled); shorter ones are
/// zero-padded, so the result is always `2 * max_points` long.
pub fn flatten_points(points: &[GesturePoint], max_points: usize) -> Vec<f32> {
    let mut features = Vec::with_capacity(max_points * 2);
    for point in points.iter().take(max_points) {
        features.push(point.x);
        features.push(point.y);
    }
    features.resize(max_points * 2, 0.0);
    features
}

/// Squared Euclidean distance over the query's components.
///
/// Components missing from `stored` compare against zero, so samples
/// recorded with a smaller point budget remain comparable.
pub fn squared_distance(query: &[f32], stored: &[f32]) -> f32 {
    query
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let d = q - stored.get(i).copied().unwrap_or(0.0);
            d * d
        })
        .sum()
}
