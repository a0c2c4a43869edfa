use crate::error::Result;
use crate::summary::Summary;
use crate::zone::{classify, Zone};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One classified conversational turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Point {
    /// 1-based position in the trajectory.
    pub turn: u32,
    /// Entropy, in [0, 1].
    pub x: f64,
    /// Ambiguity, in [0, 1].
    pub y: f64,
    /// Legitimacy, in [0, 1].
    pub z: f64,
    pub zone: Zone,
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A tracking session: an ordered trajectory plus the summary derived from it.
///
/// The trajectory can only grow through [`Session::add_point`], which keeps
/// the summary in step with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    session_id: String,
    model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    trajectory: Vec<Point>,
    summary: Summary,
}

impl Session {
    pub fn new(model: Option<String>) -> Self {
        let id = Uuid::new_v4().simple().to_string();
        Self {
            session_id: id[..8].to_string(),
            model,
            created_at: Some(Utc::now()),
            trajectory: Vec::new(),
            summary: Summary::default(),
        }
    }

    /// Assemble a session from an already validated trajectory.
    pub(crate) fn from_parts(
        session_id: String,
        model: Option<String>,
        created_at: Option<DateTime<Utc>>,
        trajectory: Vec<Point>,
    ) -> Self {
        let summary = Summary::compute(&trajectory);
        Self {
            session_id,
            model,
            created_at,
            trajectory,
            summary,
        }
    }

    /// Classify a triple, append it as the next turn, and refresh the summary.
    ///
    /// On an invalid coordinate the session is left untouched.
    pub fn add_point(&mut self, x: f64, y: f64, z: f64, topic: Option<String>) -> Result<&Point> {
        let zone = classify(x, y, z)?;
        let turn = self.next_turn();
        self.trajectory.push(Point {
            turn,
            x,
            y,
            z,
            zone,
            topic: topic.filter(|t| !t.is_empty()),
            timestamp: Some(Utc::now()),
        });
        self.summary = Summary::compute(&self.trajectory);
        tracing::debug!(session = %self.session_id, turn, %zone, "added point");

        Ok(&self.trajectory[self.trajectory.len() - 1])
    }

    /// Turn number the next point will receive.
    pub fn next_turn(&self) -> u32 {
        self.trajectory.last().map(|p| p.turn + 1).unwrap_or(1)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn trajectory(&self) -> &[Point] {
        &self.trajectory
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn len(&self) -> usize {
        self.trajectory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }
}
