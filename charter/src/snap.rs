use crate::chart::Beat;
use crate::error::CharterError;

/// Snaps continuous time positions onto the beat grid.
///
/// Snapping is always on: every time coordinate coming from the editing
/// surface goes through here before it can become part of a chart.
#[derive(Clone, Copy, Debug)]
pub struct BeatSnapper {
    /// Grid denominator, e.g. 4 for a quarter-beat grid.
    pub subdivision: u32,
}

impl BeatSnapper {
    pub fn new(subdivision: u32) -> Self {
        BeatSnapper { subdivision }
    }

    /// Snap `time` (in measures) to the nearest grid position.
    ///
    /// Rounds the fractional part to the nearest `1/subdivision`,
    /// carrying into the next measure when it rounds all the way up.
    /// Negative times clamp to beat zero; the editing surface never
    /// produces them.
    pub fn snap(&self, time: f64) -> Result<Beat, CharterError> {
        if self.subdivision == 0 {
            return Err(CharterError::InvalidDenominator(0));
        }

        let time = time.max(0.0);
        let mut measure = time.floor() as u32;
        let fractional = time - time.floor();
        let mut numerator = (fractional * self.subdivision as f64).round() as u32;
        if numerator == self.subdivision {
            numerator = 0;
            measure += 1;
        }

        Ok(Beat::new(measure, numerator, self.subdivision))
    }
}
