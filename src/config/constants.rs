// src/config/constants.rs
//! System-wide configuration constants

/// Tap sequencing constants
pub mod input {
    pub const DEFAULT_DOUBLE_TAP_INTERVAL_MS: u64 = 300;
    pub const MIN_DOUBLE_TAP_INTERVAL_MS: u64 = 10;
    pub const MAX_DOUBLE_TAP_INTERVAL_MS: u64 = 5_000;

    /// Longest burst that maps to an action
    pub const MAX_BURST_TAPS: u32 = 4;
}

/// Feature extraction and routing constants
pub mod recognition {
    pub const DEFAULT_MAX_POINTS: usize = 16;
    pub const MIN_MAX_POINTS: usize = 1;
    pub const MAX_MAX_POINTS: usize = 4096;

    /// Points fed to a learned backend (x/y interleaved, so twice as many floats)
    pub const DEFAULT_BACKEND_INPUT_POINTS: usize = 64;

    pub const AUTO_MODE: &str = "auto";
    pub const SHAPE_MODEL: &str = "shape_model";
    pub const LETTER_MODEL: &str = "letter_model";

    /// Auto routing sends strokes up to this many points to the shape model
    pub const AUTO_SHAPE_MAX_POINTS: usize = 6;
}

/// Geometric shape heuristic thresholds
pub mod heuristic {
    pub const GEOMETRY_EPSILON: f32 = 1e-6;
    pub const SQUARE_HULL_MAX_ASPECT: f32 = 1.3;
    pub const CIRCLE_MAX_RADIAL_UNIFORMITY: f32 = 0.25;
    pub const DENSE_SQUARE_MAX_ASPECT: f32 = 1.2;
    pub const DENSE_SQUARE_MIN_POINTS: usize = 12;
    pub const DENSE_TRIANGLE_MIN_POINTS: usize = 10;
    pub const DEGENERATE_MAX_POINTS: usize = 2;
}

/// Symbol vocabulary
pub mod symbols {
    pub const CIRCLE: &str = "circle";
    pub const TRIANGLE: &str = "triangle";
    pub const SQUARE: &str = "square";
    /// Legacy alias folded into `circle`
    pub const DOT: &str = "dot";
}

/// Built-in command table
pub mod commands {
    pub const DEFAULT_TRIANGLE_COMMAND: &str = "copy";
    pub const DEFAULT_CIRCLE_COMMAND: &str = "paste";
    pub const DEFAULT_SQUARE_COMMAND: &str = "custom";
    pub const DEFAULT_DOT_COMMAND: &str = "paste";
}

/// File locations
pub mod paths {
    pub const DEFAULT_CONFIG_FILE: &str = "config/gesture.toml";
    pub const LOCAL_CONFIG_FILE: &str = "config/gesture.local.toml";
    pub const USER_CONFIG_DIR: &str = ".config/gesture-core";
    pub const DEFAULT_PROFILE_PATH: &str = "config/gestures.json";
    pub const DEFAULT_COMMAND_MAP_PATH: &str = "config/commands.json";
    pub const DEFAULT_MODEL_REGISTRY_PATH: &str = "config/models.json";

    /// Environment variables with this prefix override configuration keys
    pub const ENV_PREFIX: &str = "GESTURE_";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_bounds_are_ordered() {
        assert!(input::MIN_DOUBLE_TAP_INTERVAL_MS < input::DEFAULT_DOUBLE_TAP_INTERVAL_MS);
        assert!(input::DEFAULT_DOUBLE_TAP_INTERVAL_MS < input::MAX_DOUBLE_TAP_INTERVAL_MS);
    }

    #[test]
    fn test_max_points_bounds_are_ordered() {
        assert!(recognition::MIN_MAX_POINTS <= recognition::DEFAULT_MAX_POINTS);
        assert!(recognition::DEFAULT_MAX_POINTS <= recognition::MAX_MAX_POINTS);
    }
}
