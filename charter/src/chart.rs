use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A rational time position: `measure + numerator / denominator`.
///
/// Serialized as the 3-element integer array `[measure, numerator,
/// denominator]` used by `.mc` chart files. A denominator of 0 is the
/// invalid sentinel some charts carry; operations that need a positive
/// denominator reject it, everything else passes it through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 3]", into = "[u32; 3]")]
pub struct Beat {
    pub measure: u32,
    pub numerator: u32,
    pub denominator: u32,
}

impl Beat {
    pub fn new(measure: u32, numerator: u32, denominator: u32) -> Self {
        Beat {
            measure,
            numerator,
            denominator,
        }
    }

    /// The beat as a real number of measures.
    pub fn value(&self) -> f64 {
        if self.denominator == 0 {
            return self.measure as f64;
        }
        self.measure as f64 + self.numerator as f64 / self.denominator as f64
    }

    /// Absolute grid index at this beat's own denominator:
    /// `measure * denominator + numerator`.
    pub fn grid_index(&self) -> u64 {
        self.measure as u64 * self.denominator as u64 + self.numerator as u64
    }
}

impl From<[u32; 3]> for Beat {
    fn from(raw: [u32; 3]) -> Self {
        Beat::new(raw[0], raw[1], raw[2])
    }
}

impl From<Beat> for [u32; 3] {
    fn from(beat: Beat) -> Self {
        [beat.measure, beat.numerator, beat.denominator]
    }
}

/// One note as stored in a chart document.
///
/// `x` is the horizontal coordinate (raw editing-surface units until the
/// chart is normalized); `endbeat` marks the end of a duration note and
/// shares the start beat's denominator. Both are omitted from JSON when
/// absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub beat: Beat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endbeat: Option<Beat>,
}

impl NoteRecord {
    pub fn new(beat: Beat, x: i64) -> Self {
        NoteRecord {
            beat,
            x: Some(x),
            endbeat: None,
        }
    }
}

/// A chart document: the ordered note list plus whatever other keys the
/// file carries (`meta`, `time`, ...), preserved verbatim so a load/save
/// round-trip only rewrites what the pipeline touched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartDoc {
    #[serde(default)]
    pub note: Vec<NoteRecord>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ChartDoc {
    /// Load a chart from a `.mc` JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read chart file: {}", path.display()))?;
        let chart = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse chart file: {}", path.display()))?;
        Ok(chart)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    /// Save the chart as `.mc` JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write chart file: {}", path.display()))?;
        Ok(())
    }
}
