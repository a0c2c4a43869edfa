//! Zone classification in ALMG coordinate space.
//!
//! A point is a triple of normalized scores: X (entropy), Y (ambiguity) and
//! Z (legitimacy). The zone bands overlap, so rules are evaluated in a fixed
//! order from the most benign band outward and the first match wins.

use crate::error::{AlmgError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named region of the coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Green,
    Gold,
    Yellow,
    Red,
    Purple,
    /// The gap region matched by no band.
    Unclassified,
}

/// Membership test for one band. All comparisons are strict.
struct Band {
    zone: Zone,
    matches: fn(f64, f64, f64) -> bool,
}

/// Evaluation order matters: first match wins.
const BANDS: [Band; 5] = [
    Band {
        zone: Zone::Green,
        matches: |x, y, z| x < 0.3 && y < 0.3 && z > 0.8,
    },
    Band {
        zone: Zone::Gold,
        matches: |x, y, z| x < 0.5 && y < 0.5 && z > 0.7,
    },
    Band {
        zone: Zone::Yellow,
        matches: |x, y, z| x < 0.8 && y < 0.8 && z > 0.4,
    },
    Band {
        zone: Zone::Red,
        matches: |x, y, z| x < 0.95 && y < 0.85 && z > 0.2,
    },
    Band {
        zone: Zone::Purple,
        matches: |x, y, z| x > 0.9 && y > 0.85 && z < 0.2,
    },
];

impl Zone {
    /// All ranked zones in increasing severity.
    pub const RANKED: [Zone; 5] = [Zone::Green, Zone::Gold, Zone::Yellow, Zone::Red, Zone::Purple];

    /// Position on the severity scale (Green = 0 … Purple = 4).
    /// `Unclassified` has no rank.
    pub fn severity(self) -> Option<u8> {
        match self {
            Zone::Green => Some(0),
            Zone::Gold => Some(1),
            Zone::Yellow => Some(2),
            Zone::Red => Some(3),
            Zone::Purple => Some(4),
            Zone::Unclassified => None,
        }
    }

    /// Inverse of [`Zone::severity`].
    pub fn from_severity(rank: u8) -> Option<Zone> {
        Self::RANKED.get(rank as usize).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Green => "Green",
            Zone::Gold => "Gold",
            Zone::Yellow => "Yellow",
            Zone::Red => "Red",
            Zone::Purple => "Purple",
            Zone::Unclassified => "Unclassified",
        }
    }

    /// Display color used by the website renderer.
    pub fn hex_color(self) -> &'static str {
        match self {
            Zone::Green => "#10b981",
            Zone::Gold => "#f59e0b",
            Zone::Yellow => "#eab308",
            Zone::Red => "#ef4444",
            Zone::Purple => "#8b5cf6",
            Zone::Unclassified => "#9ca3af",
        }
    }

    /// ANSI escape that starts this zone's terminal color.
    pub fn ansi_color(self) -> &'static str {
        match self {
            Zone::Green => "\x1b[92m",
            Zone::Gold => "\x1b[93m",
            Zone::Yellow => "\x1b[33m",
            Zone::Red => "\x1b[91m",
            Zone::Purple => "\x1b[95m",
            Zone::Unclassified => "\x1b[90m",
        }
    }

    /// Glyph used when plotting a trajectory.
    pub fn glyph(self) -> char {
        match self {
            Zone::Green => '●',
            Zone::Gold => '◉',
            Zone::Yellow => '○',
            Zone::Red => '◎',
            Zone::Purple => '◯',
            Zone::Unclassified => '?',
        }
    }

    /// Zone name wrapped in its terminal color (or plain when `color` is off).
    pub fn colored(self, color: bool) -> String {
        if color {
            format!("{}{}\x1b[0m", self.ansi_color(), self.as_str())
        } else {
            self.as_str().to_string()
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that a coordinate is a finite number in [0, 1].
pub fn validate_coordinate(axis: char, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(AlmgError::InvalidCoordinate { axis, value })
    }
}

/// Classify a triple into its zone. Out-of-range input is rejected.
pub fn classify(x: f64, y: f64, z: f64) -> Result<Zone> {
    let x = validate_coordinate('x', x)?;
    let y = validate_coordinate('y', y)?;
    let z = validate_coordinate('z', z)?;

    let zone = BANDS
        .iter()
        .find(|band| (band.matches)(x, y, z))
        .map(|band| band.zone)
        .unwrap_or(Zone::Unclassified);
    tracing::debug!("classified ({x}, {y}, {z}) as {zone}");
    Ok(zone)
}

/// Overall risk in [0, 1]: rises with entropy and ambiguity, falls with legitimacy.
pub fn risk_score(x: f64, y: f64, z: f64) -> f64 {
    x * 0.3 + y * 0.3 + (1.0 - z) * 0.4
}
