pub mod chart;
pub mod color;
pub mod curve;
pub mod error;
pub mod fraction;
pub mod normalize;
pub mod placer;
pub mod session;
pub mod snap;
pub mod spline;

use chart::{Beat, NoteRecord};
use curve::ControlPoint;
use error::CharterError;
use fraction::SimplifyPolicy;
use placer::NotePlacer;
use snap::BeatSnapper;

/// Live charting configuration, fed by the editing surface.
#[derive(Clone, Debug)]
pub struct CharterConfig {
    /// Curve samples (and notes) per control-point segment.
    pub density: usize,
    /// Bulge bias in [0, 1]; 0.5 keeps segment midpoints on the line.
    pub shape_factor: f64,
    /// Beat grid denominator for snapping, e.g. 4 for a 1/4 grid.
    pub subdivision: u32,
    /// Fraction-simplification policy applied on export.
    pub simplify_policy: SimplifyPolicy,
    /// Width the x-axis is normalized to on import.
    pub x_target_range: i64,
}

impl Default for CharterConfig {
    fn default() -> Self {
        CharterConfig {
            density: 16,
            shape_factor: 0.5,
            subdivision: 4,
            simplify_policy: SimplifyPolicy::Strict,
            x_target_range: 512,
        }
    }
}

/// Orchestrates the sketch-to-notes pipeline: curve fit, resampling and
/// beat-grid placement. Pure over its inputs; the chart itself is owned
/// by the surrounding [`session::EditSession`].
pub struct Charter {
    config: CharterConfig,
}

impl Charter {
    pub fn new(config: CharterConfig) -> Self {
        Charter { config }
    }

    pub fn config(&self) -> &CharterConfig {
        &self.config
    }

    /// Convert a sketched set of control points into beat-stamped notes
    /// starting at `start_beat`.
    ///
    /// Fewer than two points yields no notes. A degenerate sketch
    /// (non-increasing x) aborts the operation without touching any
    /// chart state.
    pub fn sketch(
        &self,
        points: &[ControlPoint],
        start_beat: Beat,
    ) -> Result<Vec<NoteRecord>, CharterError> {
        let curve = curve::generate(points, self.config.density, self.config.shape_factor)?;
        if curve.is_empty() {
            log::debug!("sketch with {} control points placed nothing", points.len());
            return Ok(Vec::new());
        }

        let placer = NotePlacer::new(self.config.density, points.len());
        let notes = placer.place(&curve, start_beat);
        log::info!(
            "placed {} notes from {} control points starting at beat {:?}",
            notes.len(),
            points.len(),
            start_beat
        );
        Ok(notes)
    }

    /// Snap a continuous time coordinate onto the configured grid.
    pub fn snap_time(&self, time: f64) -> Result<Beat, CharterError> {
        BeatSnapper::new(self.config.subdivision).snap(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charter_config_default() {
        let config = CharterConfig::default();
        assert_eq!(config.density, 16);
        assert_eq!(config.subdivision, 4);
        assert_eq!(config.x_target_range, 512);
        assert!((config.shape_factor - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sketch_end_to_end() {
        let charter = Charter::new(CharterConfig {
            density: 4,
            ..CharterConfig::default()
        });
        let points = [
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(10.0, 2.0),
            ControlPoint::new(20.0, 0.0),
        ];

        let notes = charter.sketch(&points, Beat::new(0, 0, 48)).unwrap();

        // density 4, two segments -> 8 samples -> 8 notes
        assert_eq!(notes.len(), 8);
        // step = 48 / (4 * 3) = 4
        assert_eq!(notes[0].beat, Beat::new(0, 0, 48));
        assert_eq!(notes[1].beat, Beat::new(0, 4, 48));
        assert_eq!(notes[0].x, Some(0));
        assert_eq!(notes[7].x, Some(20));
    }

    #[test]
    fn test_sketch_with_one_point_is_a_no_op() {
        let charter = Charter::new(CharterConfig::default());
        let notes = charter
            .sketch(&[ControlPoint::new(3.0, 4.0)], Beat::new(0, 0, 4))
            .unwrap();
        assert!(notes.is_empty());
    }

    #[test]
    fn test_snap_time_uses_configured_subdivision() {
        let charter = Charter::new(CharterConfig::default());
        assert_eq!(charter.snap_time(1.26).unwrap(), Beat::new(1, 1, 4));
    }
}
