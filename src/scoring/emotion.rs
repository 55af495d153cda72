// Emotion impact model
// One excitement density for the whole video, or windowed attribution when
// a per-frame timeline is available.

use crate::constants::{HIGH_VALUE_EMOTIONS, R_FRAME_BAD_TIMECODE};
use crate::error::Result;
use crate::inputs::{EmotionFrame, EmotionSummary};

use super::{Diagnostic, ParsePolicy};

/// Excitement density: score contribution per second of segment duration.
///
/// The `max(analyzed_frames, 1)` floor keeps videos with no analyzable
/// faces at zero bonus instead of faulting on division. This is deliberate
/// recovery, not masking: zero analyzed frames means zero excitement.
pub fn density_per_second(summary: &EmotionSummary, weight: f64) -> f64 {
    let frames = summary.analyzed_frames.max(1) as f64;
    (summary.excitement_score as f64 / frames) * weight
}

/// Whether a dominant-emotion label counts toward excitement.
pub fn is_high_value(emotion: &str) -> bool {
    HIGH_VALUE_EMOTIONS
        .iter()
        .any(|e| e.eq_ignore_ascii_case(emotion))
}

/// An emotion frame with its time resolved to seconds.
#[derive(Debug, Clone)]
pub struct ResolvedFrame {
    pub time: f64,
    pub high_value: bool,
}

/// Resolve frame times up front so the per-segment pass is a plain scan.
/// Frames with unparseable times are skipped with a diagnostic, or abort,
/// per the policy.
pub fn resolve_frames(
    frames: &[EmotionFrame],
    policy: ParsePolicy,
) -> Result<(Vec<ResolvedFrame>, Vec<Diagnostic>)> {
    let mut resolved = Vec::with_capacity(frames.len());
    let mut diagnostics = Vec::new();

    for (i, frame) in frames.iter().enumerate() {
        match frame.time.to_seconds() {
            Ok(time) if time >= 0.0 => resolved.push(ResolvedFrame {
                time,
                high_value: is_high_value(&frame.dominant),
            }),
            Ok(time) => {
                diagnostics.push(Diagnostic::new(
                    R_FRAME_BAD_TIMECODE,
                    format!("frame {} at {}s dropped", i + 1, time),
                ));
            }
            Err(e) => match policy {
                ParsePolicy::Abort => return Err(e),
                ParsePolicy::Skip => {
                    diagnostics.push(Diagnostic::new(
                        R_FRAME_BAD_TIMECODE,
                        format!("frame {}: {}", i + 1, e),
                    ));
                }
            },
        }
    }

    Ok((resolved, diagnostics))
}

/// Windowed variant of the impact model: award `weight` points for each
/// high-value frame falling inside `[start, end)`.
pub fn windowed_bonus(frames: &[ResolvedFrame], weight: f64, start: f64, end: f64) -> f64 {
    let hits = frames
        .iter()
        .filter(|f| f.high_value && f.time >= start && f.time < end)
        .count();

    hits as f64 * weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_formula() {
        let summary = EmotionSummary::new(10, 2);
        assert!((density_per_second(&summary, 5.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_density_zero_frames_is_zero_not_a_fault() {
        let summary = EmotionSummary::new(0, 0);
        assert_eq!(density_per_second(&summary, 5.0), 0.0);
    }

    #[test]
    fn test_density_scales_with_weight() {
        let summary = EmotionSummary::new(10, 5);
        let low = density_per_second(&summary, 1.0);
        let high = density_per_second(&summary, 10.0);
        assert!(high > low);
    }

    #[test]
    fn test_high_value_set() {
        assert!(is_high_value("happy"));
        assert!(is_high_value("Surprise"));
        assert!(is_high_value("fear"));
        assert!(!is_high_value("neutral"));
        assert!(!is_high_value("sad"));
    }

    #[test]
    fn test_windowed_bonus_counts_only_high_value_in_window() {
        let frames = vec![
            ResolvedFrame { time: 1.0, high_value: true },
            ResolvedFrame { time: 5.0, high_value: false },
            ResolvedFrame { time: 9.0, high_value: true },
            ResolvedFrame { time: 12.0, high_value: true },
        ];

        // Two high-value frames inside [0, 10)
        assert_eq!(windowed_bonus(&frames, 5.0, 0.0, 10.0), 10.0);
        // Frame at exactly the window end belongs to the next window
        assert_eq!(windowed_bonus(&frames, 5.0, 10.0, 20.0), 5.0);
    }

    #[test]
    fn test_resolve_frames_skips_bad_times() {
        let frames = vec![
            EmotionFrame::new("00:00:01", "happy"),
            EmotionFrame::new("garbage", "happy"),
            EmotionFrame::new(-2.0, "surprise"),
        ];

        let (resolved, diagnostics) = resolve_frames(&frames, ParsePolicy::Skip).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_resolve_frames_abort_policy() {
        let frames = vec![EmotionFrame::new("garbage", "happy")];
        assert!(resolve_frames(&frames, ParsePolicy::Abort).is_err());
    }
}
