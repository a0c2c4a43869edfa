//! Session statistics derived from a trajectory.
//!
//! A [`Summary`] is never edited directly; it is recomputed from the
//! trajectory every time the trajectory changes.

use crate::session::Point;
use crate::zone::Zone;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Qualitative trend of zone severity across a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftDirection {
    Stable,
    TowardGreen,
    TowardGold,
    TowardYellow,
    TowardRed,
    TowardPurple,
    /// Not enough ranked points to tell.
    #[default]
    Unknown,
}

impl DriftDirection {
    /// Drift that ends in `zone`. `Unclassified` has no direction.
    pub fn toward(zone: Zone) -> Self {
        match zone {
            Zone::Green => Self::TowardGreen,
            Zone::Gold => Self::TowardGold,
            Zone::Yellow => Self::TowardYellow,
            Zone::Red => Self::TowardRed,
            Zone::Purple => Self::TowardPurple,
            Zone::Unclassified => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::TowardGreen => "toward_green",
            Self::TowardGold => "toward_gold",
            Self::TowardYellow => "toward_yellow",
            Self::TowardRed => "toward_red",
            Self::TowardPurple => "toward_purple",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DriftDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change of zone between two adjacent points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Transition {
    /// Turn of the later point.
    pub turn: u32,
    #[serde(rename = "from")]
    pub from_zone: Zone,
    #[serde(rename = "to")]
    pub to_zone: Zone,
}

/// Aggregate statistics for a trajectory.
///
/// Averages and the dominant zone are `None` ("no data") for an empty
/// trajectory and serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Summary {
    pub avg_x: Option<f64>,
    pub avg_y: Option<f64>,
    pub avg_z: Option<f64>,
    pub dominant_zone: Option<Zone>,
    pub drift_direction: DriftDirection,
    pub transitions: Vec<Transition>,
}

impl Summary {
    pub fn compute(points: &[Point]) -> Self {
        Self {
            avg_x: mean(points.iter().map(|p| p.x)),
            avg_y: mean(points.iter().map(|p| p.y)),
            avg_z: mean(points.iter().map(|p| p.z)),
            dominant_zone: dominant_zone(points),
            drift_direction: drift_direction(points),
            transitions: transitions(points),
        }
    }

    pub fn has_data(&self) -> bool {
        self.avg_x.is_some()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Most frequent zone; ties go to the zone seen first.
fn dominant_zone(points: &[Point]) -> Option<Zone> {
    let mut counts: HashMap<Zone, usize> = HashMap::new();
    for point in points {
        *counts.entry(point.zone).or_insert(0) += 1;
    }
    let max = counts.values().copied().max()?;
    points
        .iter()
        .map(|p| p.zone)
        .find(|zone| counts.get(zone) == Some(&max))
}

fn transitions(points: &[Point]) -> Vec<Transition> {
    points
        .windows(2)
        .filter(|pair| pair[0].zone != pair[1].zone)
        .map(|pair| Transition {
            turn: pair[1].turn,
            from_zone: pair[0].zone,
            to_zone: pair[1].zone,
        })
        .collect()
}

/// Compare early severity against recent severity.
///
/// Unclassified points are skipped. Below four ranked points the first and
/// last are compared; otherwise the means of the first and last halves
/// (the middle point of an odd count belongs to neither). Each side is
/// rounded to the nearest zone before comparing.
fn drift_direction(points: &[Point]) -> DriftDirection {
    let ranks: Vec<f64> = points
        .iter()
        .filter_map(|p| p.zone.severity())
        .map(f64::from)
        .collect();
    let n = ranks.len();
    if n < 2 {
        return DriftDirection::Unknown;
    }

    let (early, recent) = if n < 4 {
        (ranks[0], ranks[n - 1])
    } else {
        let half = n / 2;
        (
            ranks[..half].iter().sum::<f64>() / half as f64,
            ranks[n - half..].iter().sum::<f64>() / half as f64,
        )
    };

    let early = early.round() as u8;
    let recent = recent.round() as u8;
    if early == recent {
        return DriftDirection::Stable;
    }
    Zone::from_severity(recent)
        .map(DriftDirection::toward)
        .unwrap_or(DriftDirection::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(turn: u32, zone: Zone) -> Point {
        Point {
            turn,
            x: 0.5,
            y: 0.5,
            z: 0.5,
            zone,
            topic: None,
            timestamp: None,
        }
    }

    fn trajectory(zones: &[Zone]) -> Vec<Point> {
        zones
            .iter()
            .enumerate()
            .map(|(i, z)| point(i as u32 + 1, *z))
            .collect()
    }

    #[test]
    fn test_empty_trajectory_has_no_data() {
        let summary = Summary::compute(&[]);
        assert!(!summary.has_data());
        assert!(summary.avg_x.is_none());
        assert!(summary.avg_y.is_none());
        assert!(summary.avg_z.is_none());
        assert!(summary.dominant_zone.is_none());
        assert_eq!(summary.drift_direction, DriftDirection::Unknown);
        assert!(summary.transitions.is_empty());
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_averages() {
        let mut points = trajectory(&[Zone::Green, Zone::Gold]);
        points[0].x = 0.2;
        points[1].x = 0.4;
        points[0].z = 0.9;
        points[1].z = 0.7;
        let summary = Summary::compute(&points);
        assert!((summary.avg_x.unwrap() - 0.3).abs() < 1e-9);
        assert!((summary.avg_y.unwrap() - 0.5).abs() < 1e-9);
        assert!((summary.avg_z.unwrap() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_dominant_zone_by_count() {
        let points = trajectory(&[Zone::Green, Zone::Red, Zone::Red, Zone::Gold]);
        assert_eq!(Summary::compute(&points).dominant_zone, Some(Zone::Red));
    }

    #[test]
    fn test_dominant_zone_tie_goes_to_first_seen() {
        let points = trajectory(&[Zone::Yellow, Zone::Green, Zone::Green, Zone::Yellow]);
        assert_eq!(Summary::compute(&points).dominant_zone, Some(Zone::Yellow));

        let points = trajectory(&[Zone::Gold, Zone::Red]);
        assert_eq!(Summary::compute(&points).dominant_zone, Some(Zone::Gold));
    }

    #[test]
    fn test_transitions_record_later_turn() {
        let points = trajectory(&[Zone::Green, Zone::Gold, Zone::Yellow]);
        let summary = Summary::compute(&points);
        assert_eq!(
            summary.transitions,
            vec![
                Transition {
                    turn: 2,
                    from_zone: Zone::Green,
                    to_zone: Zone::Gold
                },
                Transition {
                    turn: 3,
                    from_zone: Zone::Gold,
                    to_zone: Zone::Yellow
                },
            ]
        );
        assert_eq!(summary.drift_direction, DriftDirection::TowardYellow);
    }

    #[test]
    fn test_no_transitions_when_zone_repeats() {
        let points = trajectory(&[Zone::Red, Zone::Red, Zone::Red]);
        let summary = Summary::compute(&points);
        assert!(summary.transitions.is_empty());
        assert_eq!(summary.drift_direction, DriftDirection::Stable);
    }

    #[test]
    fn test_single_point_drift_unknown() {
        let summary = Summary::compute(&trajectory(&[Zone::Gold]));
        assert_eq!(summary.drift_direction, DriftDirection::Unknown);
        assert_eq!(summary.dominant_zone, Some(Zone::Gold));
    }

    #[test]
    fn test_drift_toward_green_when_improving() {
        let points = trajectory(&[Zone::Red, Zone::Red, Zone::Green, Zone::Green]);
        assert_eq!(
            Summary::compute(&points).drift_direction,
            DriftDirection::TowardGreen
        );
    }

    #[test]
    fn test_drift_uses_halves_for_longer_sessions() {
        // Early half mean 0.5 -> Gold (rounds half away from zero), recent half mean 3 -> Red.
        let points = trajectory(&[
            Zone::Green,
            Zone::Gold,
            Zone::Purple,
            Zone::Yellow,
            Zone::Purple,
        ]);
        assert_eq!(
            Summary::compute(&points).drift_direction,
            DriftDirection::TowardRed
        );
    }

    #[test]
    fn test_drift_stable_when_halves_round_equal() {
        let points = trajectory(&[Zone::Green, Zone::Purple, Zone::Yellow, Zone::Yellow]);
        assert_eq!(
            Summary::compute(&points).drift_direction,
            DriftDirection::Stable
        );
    }

    #[test]
    fn test_drift_ignores_unclassified() {
        let points = trajectory(&[Zone::Unclassified, Zone::Green, Zone::Unclassified, Zone::Red]);
        assert_eq!(
            Summary::compute(&points).drift_direction,
            DriftDirection::TowardRed
        );

        let points = trajectory(&[Zone::Unclassified, Zone::Unclassified, Zone::Gold]);
        assert_eq!(
            Summary::compute(&points).drift_direction,
            DriftDirection::Unknown
        );
    }

    #[test]
    fn test_drift_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&DriftDirection::TowardPurple).unwrap(),
            "\"toward_purple\""
        );
        assert_eq!(DriftDirection::TowardGold.to_string(), "toward_gold");
    }

    #[test]
    fn test_transition_field_names() {
        let t = Transition {
            turn: 4,
            from_zone: Zone::Yellow,
            to_zone: Zone::Red,
        };
        let value = serde_json::to_value(t).unwrap();
        assert_eq!(value["turn"], 4);
        assert_eq!(value["from"], "Yellow");
        assert_eq!(value["to"], "Red");
    }
}
