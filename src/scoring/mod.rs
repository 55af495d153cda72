// Fusion Scoring Engine
// Turns collaborator signals into one comparable highlight score per segment

pub mod emotion;
pub mod fusion;
pub mod peaks;


use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::EMOTION_WEIGHT_DEFAULT;

/// How to treat an input item whose timecode fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParsePolicy {
    /// Drop the offending item and record a diagnostic
    #[default]
    Skip,
    /// Propagate the parse error to the caller
    Abort,
}

/// Tunable fusion parameters.
#[derive(Debug, Clone)]
pub struct FusionConfig {
    /// Points per high-emotion frame, per second of segment duration
    pub emotion_weight: f64,
    pub policy: ParsePolicy,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            emotion_weight: EMOTION_WEIGHT_DEFAULT,
            policy: ParsePolicy::Skip,
        }
    }
}

impl FusionConfig {
    pub fn with_weight(emotion_weight: f64) -> Self {
        Self {
            emotion_weight,
            ..Self::default()
        }
    }
}

/// A segment with its fused score components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSegment {
    /// 1-based label carried from scene detection
    pub segment: usize,
    pub start_timecode: String,
    pub end_timecode: String,
    pub start_secs: f64,
    pub end_secs: f64,
    pub duration: f64,
    pub audio_peaks: usize,
    pub emotion_bonus: f64,
    /// audio_peaks + emotion_bonus
    pub highlight_score: f64,
}

/// An input item that was clamped or skipped during scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable reason token (R_*)
    pub code: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Ranked output of one fusion run. Segments are sorted by highlight score,
/// highest first; equal scores keep their input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedHighlights {
    pub segments: Vec<ScoredSegment>,
    pub diagnostics: Vec<Diagnostic>,
    pub emotion_weight: f64,
    pub generated_at: DateTime<Utc>,
}

impl RankedHighlights {
    pub fn new(emotion_weight: f64) -> Self {
        Self {
            segments: Vec::new(),
            diagnostics: Vec::new(),
            emotion_weight,
            generated_at: Utc::now(),
        }
    }

    /// The highest-scoring segment, if any were ranked.
    pub fn top(&self) -> Option<&ScoredSegment> {
        self.segments.first()
    }

    pub fn add_diagnostic(&mut self, code: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(code, message));
    }
}
