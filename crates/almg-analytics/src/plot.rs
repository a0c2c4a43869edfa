//! ASCII plot of a trajectory, X (entropy) across, Z (legitimacy) down.

use almg_core::config::PlotConfig;
use almg_core::session::Session;
use almg_core::zone::Zone;

/// Smallest grid that still has distinct 0 and 1 edges.
const MIN_SIDE: usize = 2;

pub struct TrajectoryPlot {
    width: usize,
    height: usize,
}

impl TrajectoryPlot {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(MIN_SIDE),
            height: height.max(MIN_SIDE),
        }
    }

    pub fn from_config(config: &PlotConfig) -> Self {
        Self::new(config.width, config.height)
    }

    /// Grid cell for a point: `(row, col)`, row 0 is Z = 1.
    pub fn cell(&self, x: f64, z: f64) -> (usize, usize) {
        let col = (x * (self.width - 1) as f64).floor().max(0.0) as usize;
        let row = ((1.0 - z) * (self.height - 1) as f64).floor().max(0.0) as usize;
        (row.min(self.height - 1), col.min(self.width - 1))
    }

    /// Plot rows only, without frame or legend. Later points overwrite earlier ones.
    pub fn grid(&self, session: &Session) -> Vec<String> {
        let mut grid = vec![vec![' '; self.width]; self.height];
        for point in session.trajectory() {
            let (row, col) = self.cell(point.x, point.z);
            grid[row][col] = point.zone.glyph();
        }
        grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }

    /// Framed plot with axis labels and legend.
    pub fn render(&self, session: &Session) -> String {
        tracing::debug!(
            "Plotting {} points on a {}x{} grid",
            session.len(),
            self.width,
            self.height
        );

        let rule = "─".repeat(self.width);
        let mut out = String::new();
        out.push_str("\n  ALMG Trajectory (X vs Z)\n");
        out.push_str(&format!("  Z=1.0 {}\n", rule));
        for row in self.grid(session) {
            out.push_str(&format!("       │{}│\n", row));
        }
        out.push_str(&format!("  Z=0.0 {}\n", rule));
        out.push_str(&format!(
            "        X=0{}X=1.0\n",
            " ".repeat(self.width.saturating_sub(8))
        ));

        let legend: Vec<String> = Zone::RANKED
            .iter()
            .chain(std::iter::once(&Zone::Unclassified))
            .map(|zone| format!("{} {}", zone.glyph(), zone))
            .collect();
        out.push_str(&format!("\n  Legend: {}\n", legend.join("  ")));
        out
    }
}

impl Default for TrajectoryPlot {
    fn default() -> Self {
        Self::from_config(&PlotConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_corners() {
        let plot = TrajectoryPlot::new(40, 20);
        assert_eq!(plot.cell(0.0, 1.0), (0, 0));
        assert_eq!(plot.cell(1.0, 0.0), (19, 39));
        assert_eq!(plot.cell(0.5, 0.5), (9, 19));
    }

    #[test]
    fn test_tiny_grid_is_widened() {
        let plot = TrajectoryPlot::new(0, 1);
        assert_eq!(plot.cell(1.0, 0.0), (1, 1));
    }

    #[test]
    fn test_grid_places_glyphs() {
        let mut session = Session::new(None);
        session.add_point(0.0, 0.1, 1.0, None).unwrap();
        session.add_point(0.75, 0.78, 0.45, None).unwrap();

        let plot = TrajectoryPlot::new(10, 5);
        let grid = plot.grid(&session);
        assert_eq!(grid.len(), 5);
        assert!(grid.iter().all(|row| row.chars().count() == 10));
        assert_eq!(grid[0].chars().next(), Some('●'));
        // x=0.75 -> col 6, z=0.45 -> row 2
        assert_eq!(grid[2].chars().nth(6), Some('○'));
    }

    #[test]
    fn test_later_point_overwrites_earlier() {
        let mut session = Session::new(None);
        session.add_point(0.1, 0.1, 0.95, None).unwrap();
        session.add_point(0.1, 0.4, 0.95, None).unwrap();

        let grid = TrajectoryPlot::new(10, 5).grid(&session);
        assert_eq!(grid[0].chars().nth(0), Some('◉'));
    }

    #[test]
    fn test_render_frame_and_legend() {
        let session = Session::new(None);
        let out = TrajectoryPlot::default().render(&session);
        assert!(out.contains("ALMG Trajectory (X vs Z)"));
        assert!(out.contains(&format!("Z=1.0 {}", "─".repeat(40))));
        assert_eq!(out.matches('│').count(), 40);
        assert!(out.contains("Legend: ● Green  ◉ Gold  ○ Yellow  ◎ Red  ◯ Purple  ? Unclassified"));
    }
}
