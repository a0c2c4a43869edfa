//! Text reports for a session.
//!
//! Used by both `--analyze` and the interactive `summary` command.

use almg_core::session::{Point, Session};
use almg_core::summary::{Summary, Transition};
use almg_core::zone::risk_score;

/// Report generator for terminal output.
pub struct ReportGenerator;

impl ReportGenerator {
    /// Full report for a stored session.
    pub fn analysis_report(session: &Session, color: bool) -> String {
        let summary = session.summary();
        let mut report = String::new();

        report.push_str(&format!("\nSession: {}\n", session.session_id()));
        report.push_str(&format!("Model: {}\n", session.model().unwrap_or("Unknown")));
        if let Some(created) = session.created_at() {
            report.push_str(&format!("Created: {}\n", created.format("%Y-%m-%d %H:%M UTC")));
        }
        report.push_str(&format!("Points: {}\n", session.len()));

        report.push_str("\nAverages:\n");
        report.push_str(&format!("  X (Entropy):    {}\n", format_average(summary.avg_x)));
        report.push_str(&format!("  Y (Ambiguity):  {}\n", format_average(summary.avg_y)));
        report.push_str(&format!("  Z (Legitimacy): {}\n", format_average(summary.avg_z)));

        report.push_str(&format!(
            "\nDominant Zone: {}\n",
            summary
                .dominant_zone
                .map(|z| z.colored(color))
                .unwrap_or_else(|| "no data".into())
        ));
        report.push_str(&format!("Drift: {}\n", summary.drift_direction));

        if !summary.transitions.is_empty() {
            report.push_str("\nZone Transitions:\n");
            for transition in &summary.transitions {
                report.push_str(&format!("  - {}\n", format_transition(transition)));
            }
        }

        report
    }

    /// Short summary block for the interactive `summary` command.
    pub fn summary_block(summary: &Summary, color: bool) -> String {
        if !summary.has_data() {
            return "  No data yet. Add some points first.\n".into();
        }

        let mut block = String::new();
        block.push_str(&format!("\n  Avg X (Entropy):    {}\n", format_average(summary.avg_x)));
        block.push_str(&format!("  Avg Y (Ambiguity):  {}\n", format_average(summary.avg_y)));
        block.push_str(&format!("  Avg Z (Legitimacy): {}\n", format_average(summary.avg_z)));
        if let Some(zone) = summary.dominant_zone {
            block.push_str(&format!("  Dominant Zone:      {}\n", zone.colored(color)));
        }
        block.push_str(&format!("  Drift Direction:    {}\n", summary.drift_direction));
        if !summary.transitions.is_empty() {
            block.push_str("  Zone Transitions:\n");
            for transition in &summary.transitions {
                block.push_str(&format!("    - {}\n", format_transition(transition)));
            }
        }
        block
    }

    /// Feedback printed after a point is added.
    pub fn point_feedback(point: &Point, color: bool) -> String {
        format!(
            "  → X={:.2}, Y={:.2}, Z={:.2}\n  → Zone: {}\n  → Risk Score: {:.2}\n",
            point.x,
            point.y,
            point.z,
            point.zone.colored(color),
            risk_score(point.x, point.y, point.z)
        )
    }
}

/// Two decimals, or "no data" for an empty trajectory.
pub fn format_average(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "no data".into(),
    }
}

pub fn format_transition(transition: &Transition) -> String {
    format!(
        "Turn {}: {} → {}",
        transition.turn, transition.from_zone, transition.to_zone
    )
}
