//! Coarse screen geometry of a video.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum distance between a measured ratio and a target ratio.
///
/// Wide enough to absorb the rounding of common encodes (1920x1080, 1080x1920,
/// 854x480).
pub const ASPECT_TOLERANCE: f64 = 0.1;

/// Slack for floating point error when a ratio sits exactly on the tolerance edge.
const TOLERANCE_EPSILON: f64 = 1e-9;

const LANDSCAPE_RATIO: f64 = 16.0 / 9.0;
const PORTRAIT_RATIO: f64 = 9.0 / 16.0;

/// Geometry category used to choose the object key prefix of a published video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geometry {
    /// 16:9
    Landscape,
    /// 9:16
    Portrait,
    /// Anything else
    Other,
}

impl Geometry {
    /// Classify frame dimensions.
    ///
    /// Returns `None` when either dimension is zero.
    pub fn from_dimensions(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let ratio = width as f64 / height as f64;
        let geometry = if within_tolerance(ratio, LANDSCAPE_RATIO) {
            Geometry::Landscape
        } else if within_tolerance(ratio, PORTRAIT_RATIO) {
            Geometry::Portrait
        } else {
            Geometry::Other
        };

        Some(geometry)
    }

    /// Aspect ratio label reported by the classifier.
    pub fn ratio_label(&self) -> &'static str {
        match self {
            Geometry::Landscape => "16:9",
            Geometry::Portrait => "9:16",
            Geometry::Other => "other",
        }
    }

    /// Object key prefix.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            Geometry::Landscape => "landscape",
            Geometry::Portrait => "portrait",
            Geometry::Other => "other",
        }
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key_prefix())
    }
}

fn within_tolerance(ratio: f64, target: f64) -> bool {
    (ratio - target).abs() <= ASPECT_TOLERANCE + TOLERANCE_EPSILON
}
