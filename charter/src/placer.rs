use crate::chart::{Beat, NoteRecord};
use crate::curve::CurvePoint;

/// Walks a resampled curve and stamps one note per sample onto the beat
/// grid, spacing them by an even grid increment from the start beat.
#[derive(Clone, Copy, Debug)]
pub struct NotePlacer {
    /// Samples per curve segment (same value the curve was generated with).
    pub density: usize,
    /// Number of control points behind the curve.
    pub point_count: usize,
}

impl NotePlacer {
    pub fn new(density: usize, point_count: usize) -> Self {
        NotePlacer {
            density,
            point_count,
        }
    }

    /// Emit one note per curve sample, starting at `start_beat`.
    ///
    /// Sample `i` lands at grid index
    /// `start + i * (denominator / (density * point_count))`, with the
    /// step computed by truncating integer division. When the start
    /// denominator is smaller than `density * point_count` the step
    /// truncates to zero and every note stacks on the start beat; that
    /// arithmetic is what existing charts were produced with, so it is
    /// kept as-is and only warned about.
    pub fn place(&self, curve: &[CurvePoint], start_beat: Beat) -> Vec<NoteRecord> {
        if curve.is_empty() {
            return Vec::new();
        }
        if start_beat.denominator == 0 || self.density == 0 || self.point_count == 0 {
            log::warn!(
                "cannot place notes: denominator {} density {} point count {}",
                start_beat.denominator,
                self.density,
                self.point_count
            );
            return Vec::new();
        }

        let den = start_beat.denominator as u64;
        let base = start_beat.grid_index();
        let step = den / (self.density as u64 * self.point_count as u64);
        if step == 0 {
            log::warn!(
                "beat step truncated to zero (denominator {} < {} samples per measure); \
                 all {} notes will share the start beat",
                den,
                self.density * self.point_count,
                curve.len()
            );
        }

        curve
            .iter()
            .enumerate()
            .map(|(i, sample)| {
                let index = base + i as u64 * step;
                let beat = Beat::new(
                    (index / den) as u32,
                    (index % den) as u32,
                    start_beat.denominator,
                );
                NoteRecord::new(beat, sample.x.round() as i64)
            })
            .collect()
    }
}
