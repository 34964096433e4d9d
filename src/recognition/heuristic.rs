// src/recognition/heuristic.rs
//! Closed-form shape classification
//!
//! Classifies a stroke as circle, triangle or square from its bounding box,
//! radial spread around the centroid and convex hull vertex count. No
//! trained state is involved, which makes this the guaranteed fallback
//! whenever a learned backend is missing or broken.

use crate::config::constants::{heuristic::*, symbols};
use crate::input::types::GesturePoint;
use std::cmp::Ordering;
use std::fmt;

/// Shape vocabulary of the heuristic and learned backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Circle,
    Triangle,
    Square,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Circle => symbols::CIRCLE,
            Shape::Triangle => symbols::TRIANGLE,
            Shape::Square => symbols::SQUARE,
        }
    }

    /// Class index emitted by learned backends (index 0 was trained as "dot")
    pub fn from_class_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Shape::Circle),
            1 => Some(Shape::Triangle),
            2 => Some(Shape::Square),
            _ => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned bounds of a stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds {
    fn of(points: &[GesturePoint]) -> Self {
        points.iter().fold(
            Bounds {
                min_x: f32::INFINITY,
                max_x: f32::NEG_INFINITY,
                min_y: f32::INFINITY,
                max_y: f32::NEG_INFINITY,
            },
            |b, p| Bounds {
                min_x: b.min_x.min(p.x),
                max_x: b.max_x.max(p.x),
                min_y: b.min_y.min(p.y),
                max_y: b.max_y.max(p.y),
            },
        )
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Long side over short side, each floored at epsilon
    pub fn aspect(&self) -> f32 {
        let w = self.width().max(GEOMETRY_EPSILON);
        let h = self.height().max(GEOMETRY_EPSILON);
        w.max(h) / w.min(h)
    }
}

/// Geometric measurements the decision rules run on
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeGeometry {
    pub point_count: usize,
    pub bounds: Bounds,
    pub centroid: GesturePoint,
    pub aspect: f32,
    pub mean_radius: f32,
    /// Sample standard deviation of the radius over the mean radius
    pub radial_uniformity: f32,
    pub hull_size: usize,
}

impl ShapeGeometry {
    /// Measure a stroke; `None` when there are no points
    pub fn measure(points: &[GesturePoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let n = points.len() as f32;
        let bounds = Bounds::of(points);
        let centroid = GesturePoint::new(
            points.iter().map(|p| p.x).sum::<f32>() / n,
            points.iter().map(|p| p.y).sum::<f32>() / n,
        );

        let radii: Vec<f32> = points.iter().map(|p| p.distance(&centroid)).collect();
        let mean_radius = radii.iter().sum::<f32>() / n;
        let stddev = if points.len() > 1 {
            let variance = radii
                .iter()
                .map(|r| (r - mean_radius).powi(2))
                .sum::<f32>()
                / (n - 1.0);
            variance.sqrt()
        } else {
            0.0
        };
        let radial_uniformity = if mean_radius < GEOMETRY_EPSILON {
            1.0
        } else {
            stddev / mean_radius
        };

        Some(Self {
            point_count: points.len(),
            bounds,
            centroid,
            aspect: bounds.aspect(),
            mean_radius,
            radial_uniformity,
            hull_size: convex_hull(points).len(),
        })
    }

    /// Apply the decision rules in order; first match wins
    pub fn decide(&self) -> Shape {
        if self.hull_size >= 4 && self.aspect < SQUARE_HULL_MAX_ASPECT {
            Shape::Square
        } else if self.hull_size == 3 {
            Shape::Triangle
        } else if self.radial_uniformity < CIRCLE_MAX_RADIAL_UNIFORMITY {
            Shape::Circle
        } else if self.aspect < DENSE_SQUARE_MAX_ASPECT
            && self.point_count > DENSE_SQUARE_MIN_POINTS
        {
            Shape::Square
        } else if self.point_count > DENSE_TRIANGLE_MIN_POINTS {
            Shape::Triangle
        } else {
            Shape::Circle
        }
    }
}

/// Classify a stroke; `None` for an empty stroke.
///
/// One or two points are the degenerate circle (a dot).
pub fn classify_shape(points: &[GesturePoint]) -> Option<Shape> {
    if points.is_empty() {
        return None;
    }
    if points.len() <= DEGENERATE_MAX_POINTS {
        return Some(Shape::Circle);
    }
    ShapeGeometry::measure(points).map(|geometry| geometry.decide())
}

/// Convex hull by Andrew's monotone chain.
///
/// Points are sorted lexicographically and deduplicated first. Collinear
/// boundary points are dropped (`cross <= 0` pops), so they never count as
/// hull vertices. The hull is returned counter-clockwise without repeating
/// the first vertex.
pub fn convex_hull(points: &[GesturePoint]) -> Vec<GesturePoint> {
    let mut sorted: Vec<GesturePoint> = points.to_vec();
    sorted.sort_by(lexicographic);
    sorted.dedup_by(|a, b| a.x == b.x && a.y == b.y);

    if sorted.len() < 3 {
        return sorted;
    }

    let mut lower: Vec<GesturePoint> = Vec::with_capacity(sorted.len());
    for p in &sorted {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], p) <= 0.0
        {
            lower.pop();
        }
        lower.push(*p);
    }

    let mut upper: Vec<GesturePoint> = Vec::with_capacity(sorted.len());
    for p in sorted.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], p) <= 0.0
        {
            upper.pop();
        }
        upper.push(*p);
    }

    // Endpoints of each chain are the start of the other.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

fn lexicographic(a: &GesturePoint, b: &GesturePoint) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

/// Z component of (a - o) x (b - o); positive for a left turn
fn cross(o: &GesturePoint, a: &GesturePoint, b: &GesturePoint) -> f32 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}
