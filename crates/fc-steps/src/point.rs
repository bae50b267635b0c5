//! Move targets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target of a move. Axes left as `None` keep their current position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Point {
    /// Point with all three axes set.
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    /// Point that only moves the Z axis.
    pub fn z(z: f64) -> Self {
        Self {
            z: Some(z),
            ..Self::default()
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let axes: Vec<String> = [("X", self.x), ("Y", self.y), ("Z", self.z)]
            .iter()
            .filter_map(|(name, v)| v.map(|v| format!("{}={}", name, v)))
            .collect();
        if axes.is_empty() {
            write!(f, "(no axes)")
        } else {
            write!(f, "{}", axes.join(" "))
        }
    }
}
