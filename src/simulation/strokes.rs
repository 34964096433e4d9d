//! Synthetic stroke generation
//! Location: src/simulation/strokes.rs

use crate::input::types::GesturePoint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeShape {
    Circle,
    Triangle,
    Square,
    Line,
}

impl StrokeShape {
    pub const ALL: [StrokeShape; 4] = [
        StrokeShape::Circle,
        StrokeShape::Triangle,
        StrokeShape::Square,
        StrokeShape::Line,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrokeShape::Circle => "circle",
            StrokeShape::Triangle => "triangle",
            StrokeShape::Square => "square",
            StrokeShape::Line => "line",
        }
    }
}

/// Placement and jitter of generated strokes
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct StrokeConfig {
    pub center: (f32, f32),
    pub size: f32,
    /// Maximum per-axis jitter, in the same units as `size`
    pub noise: f32,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            center: (0.0, 0.0),
            size: 1.0,
            noise: 0.0,
        }
    }
}

/// Seeded generator of hand-drawn-looking strokes.
///
/// Outlines start at the same vertex (or angle) every time, so strokes of
/// one shape line up point-for-point apart from jitter.
pub struct StrokeGenerator {
    rng: StdRng,
    config: StrokeConfig,
}

impl StrokeGenerator {
    pub fn new(seed: u64, config: StrokeConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(seed, StrokeConfig::default())
    }

    pub fn with_noise(mut self, noise: f32) -> Self {
        self.config.noise = noise.abs();
        self
    }

    pub fn config(&self) -> &StrokeConfig {
        &self.config
    }

    pub fn generate(&mut self, shape: StrokeShape, point_count: usize) -> Vec<GesturePoint> {
        let outline = match shape {
            StrokeShape::Circle => self.circle_outline(point_count),
            StrokeShape::Triangle => {
                let r = self.config.size / 2.0;
                let vertices = [
                    (0.0, r),
                    (r * (TAU / 3.0 + TAU / 4.0).cos(), r * (TAU / 3.0 + TAU / 4.0).sin()),
                    (r * (2.0 * TAU / 3.0 + TAU / 4.0).cos(), r * (2.0 * TAU / 3.0 + TAU / 4.0).sin()),
                ];
                polygon_outline(&vertices, point_count)
            }
            StrokeShape::Square => {
                let h = self.config.size / 2.0;
                polygon_outline(&[(-h, -h), (h, -h), (h, h), (-h, h)], point_count)
            }
            StrokeShape::Line => {
                let h = self.config.size / 2.0;
                (0..point_count)
                    .map(|i| {
                        let t = if point_count > 1 {
                            i as f32 / (point_count - 1) as f32
                        } else {
                            0.0
                        };
                        (-h + t * self.config.size, 0.0)
                    })
                    .collect()
            }
        };

        let (cx, cy) = self.config.center;
        outline
            .into_iter()
            .map(|(x, y)| {
                let (jx, jy) = self.jitter();
                GesturePoint::new(cx + x + jx, cy + y + jy)
            })
            .collect()
    }

    /// `count` strokes of each shape, labelled by shape name
    pub fn labelled_set(
        &mut self,
        shapes: &[StrokeShape],
        count: usize,
        point_count: usize,
    ) -> Vec<(StrokeShape, Vec<GesturePoint>)> {
        let mut set = Vec::with_capacity(shapes.len() * count);
        for &shape in shapes {
            for _ in 0..count {
                set.push((shape, self.generate(shape, point_count)));
            }
        }
        set
    }

    fn circle_outline(&self, point_count: usize) -> Vec<(f32, f32)> {
        let r = self.config.size / 2.0;
        (0..point_count)
            .map(|i| {
                let angle = TAU * i as f32 / point_count.max(1) as f32;
                (r * angle.cos(), r * angle.sin())
            })
            .collect()
    }

    fn jitter(&mut self) -> (f32, f32) {
        let noise = self.config.noise;
        if noise == 0.0 {
            return (0.0, 0.0);
        }
        (
            self.rng.gen_range(-noise..=noise),
            self.rng.gen_range(-noise..=noise),
        )
    }
}

/// Points spread evenly along a closed polygon's perimeter
fn polygon_outline(vertices: &[(f32, f32)], point_count: usize) -> Vec<(f32, f32)> {
    let edges: Vec<((f32, f32), (f32, f32))> = vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(&a, &b)| (a, b))
        .collect();
    let lengths: Vec<f32> = edges
        .iter()
        .map(|((ax, ay), (bx, by))| ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt())
        .collect();
    let perimeter: f32 = lengths.iter().sum();

    (0..point_count)
        .map(|i| {
            let mut distance = perimeter * i as f32 / point_count.max(1) as f32;
            for (((ax, ay), (bx, by)), &length) in edges.iter().zip(&lengths) {
                if distance <= length {
                    let t = if length > 0.0 { distance / length } else { 0.0 };
                    return (ax + t * (bx - ax), ay + t * (by - ay));
                }
                distance -= length;
            }
            vertices[0]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_counts() {
        let mut generator = StrokeGenerator::seeded(7);
        for shape in StrokeShape::ALL {
            assert_eq!(generator.generate(shape, 24).len(), 24);
            assert!(generator.generate(shape, 0).is_empty());
        }
    }

    #[test]
    fn test_same_seed_same_strokes() {
        let mut a = StrokeGenerator::seeded(42).with_noise(0.05);
        let mut b = StrokeGenerator::seeded(42).with_noise(0.05);
        assert_eq!(
            a.generate(StrokeShape::Circle, 16),
            b.generate(StrokeShape::Circle, 16)
        );
    }

    #[test]
    fn test_noise_is_bounded() {
        let mut clean = StrokeGenerator::seeded(1);
        let mut noisy = StrokeGenerator::seeded(1).with_noise(0.1);
        let reference = clean.generate(StrokeShape::Square, 32);
        let jittered = noisy.generate(StrokeShape::Square, 32);
        for (r, j) in reference.iter().zip(&jittered) {
            assert!((r.x - j.x).abs() <= 0.1 + 1e-6);
            assert!((r.y - j.y).abs() <= 0.1 + 1e-6);
        }
    }

    #[test]
    fn test_square_visits_corners() {
        let mut generator = StrokeGenerator::seeded(0);
        let square = generator.generate(StrokeShape::Square, 8);
        assert_eq!(square[0], GesturePoint::new(-0.5, -0.5));
        assert_eq!(square[2], GesturePoint::new(0.5, -0.5));
        assert_eq!(square[4], GesturePoint::new(0.5, 0.5));
    }

    #[test]
    fn test_circle_radius() {
        let mut generator = StrokeGenerator::new(
            3,
            StrokeConfig {
                center: (10.0, -4.0),
                size: 4.0,
                noise: 0.0,
            },
        );
        let center = GesturePoint::new(10.0, -4.0);
        for point in generator.generate(StrokeShape::Circle, 12) {
            assert!((point.distance(&center) - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_labelled_set() {
        let mut generator = StrokeGenerator::seeded(9);
        let set = generator.labelled_set(&[StrokeShape::Circle, StrokeShape::Square], 3, 10);
        assert_eq!(set.len(), 6);
        assert_eq!(set[0].0, StrokeShape::Circle);
        assert_eq!(set[5].0, StrokeShape::Square);
    }
}
