use crate::chart::{Beat, ChartDoc, NoteRecord};
use crate::curve::ControlPoint;
use crate::error::CharterError;
use crate::{fraction, normalize, Charter, CharterConfig};
use std::sync::Arc;

/// Explicit state of one editing session: the working chart, the
/// in-progress control points, and the live configuration.
///
/// The chart lives behind an `Arc` that is replaced wholesale on every
/// commit, never mutated in place. A renderer (or playback loop) on
/// another thread holds its own [`EditSession::snapshot`] and keeps
/// seeing a consistent note list while a commit happens.
pub struct EditSession {
    charter: Charter,
    control_points: Vec<ControlPoint>,
    chart: Arc<ChartDoc>,
}

impl EditSession {
    pub fn new(config: CharterConfig) -> Self {
        EditSession {
            charter: Charter::new(config),
            control_points: Vec::new(),
            chart: Arc::new(ChartDoc::default()),
        }
    }

    /// Start a session from an existing chart, normalizing its x-axis
    /// onto the configured target range.
    pub fn import(config: CharterConfig, mut chart: ChartDoc) -> Self {
        normalize::normalize(&mut chart.note, config.x_target_range);
        log::info!("imported chart with {} notes", chart.note.len());
        EditSession {
            charter: Charter::new(config),
            control_points: Vec::new(),
            chart: Arc::new(chart),
        }
    }

    pub fn config(&self) -> &CharterConfig {
        self.charter.config()
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }

    /// Current chart snapshot; cheap to clone and safe to hand to a
    /// renderer thread.
    pub fn snapshot(&self) -> Arc<ChartDoc> {
        Arc::clone(&self.chart)
    }

    pub fn push_point(&mut self, point: ControlPoint) {
        self.control_points.push(point);
    }

    pub fn clear_points(&mut self) {
        self.control_points.clear();
    }

    /// Notes the current sketch would produce, without committing them.
    pub fn preview(&self, start_beat: Beat) -> Result<Vec<NoteRecord>, CharterError> {
        self.charter.sketch(&self.control_points, start_beat)
    }

    /// Commit the current sketch: place its notes, append them to a copy
    /// of the chart, and swap the copy in. The control points are
    /// consumed. On failure the chart (and any snapshot already handed
    /// out) is left exactly as it was.
    pub fn commit(&mut self, start_beat: Beat) -> Result<usize, CharterError> {
        let notes = self.charter.sketch(&self.control_points, start_beat)?;
        let placed = notes.len();
        if placed > 0 {
            let mut next = ChartDoc::clone(&self.chart);
            next.note.extend(notes);
            self.chart = Arc::new(next);
        }
        self.control_points.clear();
        Ok(placed)
    }

    /// Snap a continuous time coordinate onto the configured grid.
    pub fn snap_time(&self, time: f64) -> Result<Beat, CharterError> {
        self.charter.snap_time(time)
    }

    /// Chart ready for writing out, with every beat fraction reduced
    /// under the configured policy.
    pub fn export(&self) -> ChartDoc {
        let mut chart = ChartDoc::clone(&self.chart);
        fraction::simplify_chart(&mut chart, self.config().simplify_policy);
        chart
    }
}
