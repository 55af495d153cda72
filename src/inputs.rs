// Collaborator data contract
// Scene cuts, audio peaks, and the emotion summary are produced by the
// upstream analysis tools; the CLI loads them as JSON documents. Field
// aliases accept the column names the scene detector exports.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ReelRankError, Result};
use crate::timecode;

/// A timecode as collaborators emit it: `"HH:MM:SS.mmm"` text or raw seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeField {
    Seconds(f64),
    Text(String),
}

impl TimeField {
    /// Resolve to seconds. Text goes through the timecode parser; numeric
    /// values are taken as-is but must be finite.
    pub fn to_seconds(&self) -> Result<f64> {
        match self {
            TimeField::Seconds(v) if v.is_finite() => Ok(*v),
            TimeField::Seconds(v) => Err(ReelRankError::Timecode {
                input: v.to_string(),
                reason: "not a finite number".to_string(),
            }),
            TimeField::Text(text) => timecode::parse_timecode(text),
        }
    }
}

impl From<f64> for TimeField {
    fn from(secs: f64) -> Self {
        TimeField::Seconds(secs)
    }
}

impl From<&str> for TimeField {
    fn from(text: &str) -> Self {
        TimeField::Text(text.to_string())
    }
}

/// One visually coherent unit of the source video, from scene-cut detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// 1-based label assigned by the scene detector
    #[serde(default, alias = "Segment")]
    pub index: Option<usize>,
    #[serde(alias = "Start_Time")]
    pub start_time: TimeField,
    #[serde(alias = "End_Time")]
    pub end_time: TimeField,
}

impl Segment {
    pub fn new(start_time: impl Into<TimeField>, end_time: impl Into<TimeField>) -> Self {
        Self {
            index: None,
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

/// A timestamped high-energy audio event from loudness analysis.
///
/// `score` (0-100 in practice) is carried through as metadata; the fusion
/// formula counts peak occurrences only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioPeak {
    pub time: TimeField,
    #[serde(default)]
    pub score: u32,
}

impl AudioPeak {
    pub fn new(time: impl Into<TimeField>, score: u32) -> Self {
        Self {
            time: time.into(),
            score,
        }
    }
}

/// Whole-video aggregate from facial-emotion analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionSummary {
    /// Frames the detector managed to analyze
    #[serde(default)]
    pub analyzed_frames: u64,
    /// Frames whose dominant emotion was in the high-value set
    #[serde(default)]
    pub excitement_score: u64,
    /// Per-emotion counts, when the detector reports them
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tally: BTreeMap<String, u64>,
}

impl EmotionSummary {
    pub fn new(analyzed_frames: u64, excitement_score: u64) -> Self {
        Self {
            analyzed_frames,
            excitement_score,
            tally: BTreeMap::new(),
        }
    }

    /// Fraction of analyzed frames that carried a high-value emotion.
    pub fn excitement_rate(&self) -> f64 {
        self.excitement_score as f64 / self.analyzed_frames.max(1) as f64
    }
}

/// A single timestamped emotion observation. A timeline of these enables
/// per-segment emotion attribution instead of one video-wide density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionFrame {
    pub time: TimeField,
    /// Dominant emotion label for the frame (e.g. "happy")
    pub dominant: String,
}

impl EmotionFrame {
    pub fn new(time: impl Into<TimeField>, dominant: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            dominant: dominant.into(),
        }
    }
}

/// All collaborator outputs for one analysis run, threaded as one typed
/// value from loading through scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisBundle {
    pub segments: Vec<Segment>,
    pub peaks: Vec<AudioPeak>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<EmotionSummary>,
    /// Optional per-frame emotion timeline; enables windowed attribution
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<EmotionFrame>,
}

impl AnalysisBundle {
    /// Load a bundle from individual collaborator output files.
    pub fn from_files(
        segments: &Path,
        peaks: &Path,
        emotion: Option<&Path>,
        frames: Option<&Path>,
    ) -> Result<Self> {
        Ok(Self {
            segments: load_json(segments)?,
            peaks: load_json(peaks)?,
            emotion: emotion.map(load_json).transpose()?,
            frames: frames.map(load_json).transpose()?.unwrap_or_default(),
        })
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(ReelRankError::FileNotFound(path.display().to_string()));
    }

    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_field_accepts_both_forms() {
        let text: TimeField = serde_json::from_str("\"00:00:05.500\"").unwrap();
        assert_eq!(text.to_seconds().unwrap(), 5.5);

        let number: TimeField = serde_json::from_str("12.25").unwrap();
        assert_eq!(number.to_seconds().unwrap(), 12.25);
    }

    #[test]
    fn test_time_field_rejects_non_finite() {
        assert!(TimeField::Seconds(f64::NAN).to_seconds().is_err());
        assert!(TimeField::Seconds(f64::INFINITY).to_seconds().is_err());
    }

    #[test]
    fn test_segment_accepts_detector_column_names() {
        let json = r#"{"Segment": 1, "Start_Time": "00:00:00.000", "End_Time": "00:00:10.000"}"#;
        let segment: Segment = serde_json::from_str(json).unwrap();
        assert_eq!(segment.index, Some(1));
        assert_eq!(segment.start_time.to_seconds().unwrap(), 0.0);
        assert_eq!(segment.end_time.to_seconds().unwrap(), 10.0);
    }

    #[test]
    fn test_peak_score_defaults_to_zero() {
        let peak: AudioPeak = serde_json::from_str(r#"{"time": "00:00:08"}"#).unwrap();
        assert_eq!(peak.score, 0);
    }

    #[test]
    fn test_excitement_rate_survives_zero_frames() {
        let summary = EmotionSummary::new(0, 0);
        assert_eq!(summary.excitement_rate(), 0.0);
    }

    #[test]
    fn test_bundle_from_files() {
        let dir = tempfile::TempDir::new().unwrap();

        let segments_path = dir.path().join("segments.json");
        std::fs::write(
            &segments_path,
            r#"[{"Start_Time": "00:00:00.000", "End_Time": "00:00:10.000"}]"#,
        )
        .unwrap();

        let peaks_path = dir.path().join("peaks.json");
        std::fs::write(&peaks_path, r#"[{"time": "00:00:05.500", "score": 90}]"#).unwrap();

        let emotion_path = dir.path().join("emotion.json");
        std::fs::write(
            &emotion_path,
            r#"{"analyzed_frames": 10, "excitement_score": 2, "tally": {"happy": 2}}"#,
        )
        .unwrap();

        let bundle =
            AnalysisBundle::from_files(&segments_path, &peaks_path, Some(&emotion_path), None)
                .unwrap();

        assert_eq!(bundle.segments.len(), 1);
        assert_eq!(bundle.peaks.len(), 1);
        let emotion = bundle.emotion.unwrap();
        assert_eq!(emotion.excitement_score, 2);
        assert_eq!(emotion.tally.get("happy"), Some(&2));
        assert!(bundle.frames.is_empty());
    }

    #[test]
    fn test_bundle_missing_file_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");

        let result = AnalysisBundle::from_files(&missing, &missing, None, None);
        assert!(matches!(result, Err(ReelRankError::FileNotFound(_))));
    }
}
