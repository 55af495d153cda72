// Fusion and ranking engine
// Combines peak density and emotion impact into a single score per segment,
// then ranks the full set.

use std::cmp::Ordering;

use crate::constants::{
    R_EMOTION_OVERFLOW, R_NO_SEGMENTS, R_SEGMENT_BAD_TIMECODE, R_SEGMENT_NEGATIVE,
    R_SEGMENT_REVERSED,
};
use crate::error::Result;
use crate::inputs::{AudioPeak, EmotionFrame, EmotionSummary, Segment};
use crate::timecode::format_timecode;

use super::emotion::{self, ResolvedFrame};
use super::{peaks, Diagnostic, FusionConfig, ParsePolicy, RankedHighlights, ScoredSegment};

/// The emotion signal a ranking run scores against.
enum EmotionSignal<'a> {
    /// One density applied uniformly across every segment
    Global(f64),
    /// Timestamped frames attributed to the segment containing them
    Windowed(&'a [ResolvedFrame], f64),
}

/// Score every segment against the video-wide emotion summary and rank the
/// result, highest score first.
///
/// No segment is dropped for scoring zero; structurally invalid segments
/// are clamped or skipped per the config policy, with diagnostics. Empty
/// input yields an empty ranking, not an error.
pub fn score_and_rank(
    segments: &[Segment],
    audio_peaks: &[AudioPeak],
    summary: &EmotionSummary,
    config: &FusionConfig,
) -> Result<RankedHighlights> {
    let mut out = RankedHighlights::new(config.emotion_weight);

    let excitement = effective_excitement(summary, &mut out.diagnostics);
    let effective = EmotionSummary {
        excitement_score: excitement,
        ..summary.clone()
    };
    let density = emotion::density_per_second(&effective, config.emotion_weight);

    rank(segments, audio_peaks, EmotionSignal::Global(density), config, &mut out)?;
    Ok(out)
}

/// Windowed variant: the emotion bonus comes from timestamped frames that
/// fall inside each segment, instead of one global density.
pub fn score_and_rank_timeline(
    segments: &[Segment],
    audio_peaks: &[AudioPeak],
    frames: &[EmotionFrame],
    config: &FusionConfig,
) -> Result<RankedHighlights> {
    let mut out = RankedHighlights::new(config.emotion_weight);

    let (resolved, frame_diags) = emotion::resolve_frames(frames, config.policy)?;
    out.diagnostics.extend(frame_diags);

    rank(
        segments,
        audio_peaks,
        EmotionSignal::Windowed(&resolved, config.emotion_weight),
        config,
        &mut out,
    )?;
    Ok(out)
}

fn rank(
    segments: &[Segment],
    audio_peaks: &[AudioPeak],
    signal: EmotionSignal<'_>,
    config: &FusionConfig,
    out: &mut RankedHighlights,
) -> Result<()> {
    if segments.is_empty() {
        out.add_diagnostic(R_NO_SEGMENTS, "no segments supplied; nothing to rank");
        return Ok(());
    }

    let (peak_times, peak_diags) = peaks::resolve_peaks(audio_peaks, config.policy)?;
    out.diagnostics.extend(peak_diags);

    for (i, segment) in segments.iter().enumerate() {
        let label = segment.index.unwrap_or(i + 1);

        let window = resolve_window(segment, label, config.policy, &mut out.diagnostics)?;
        let Some((start, end)) = window else {
            continue;
        };

        let duration = end - start;
        let peak_count = peaks::count_peaks_in_window(&peak_times, start, end);
        let emotion_bonus = match &signal {
            EmotionSignal::Global(density) => density * duration,
            EmotionSignal::Windowed(frames, weight) => {
                emotion::windowed_bonus(frames, *weight, start, end)
            }
        };
        let highlight_score = peak_count as f64 + emotion_bonus;

        log::debug!(
            "segment {}: [{:.3}, {:.3}) peaks={} bonus={:.2} score={:.2}",
            label,
            start,
            end,
            peak_count,
            emotion_bonus,
            highlight_score
        );

        out.segments.push(ScoredSegment {
            segment: label,
            start_timecode: format_timecode(start),
            end_timecode: format_timecode(end),
            start_secs: start,
            end_secs: end,
            duration,
            audio_peaks: peak_count,
            emotion_bonus,
            highlight_score,
        });
    }

    // sort_by is stable: equal scores keep their input order
    out.segments.sort_by(|a, b| {
        b.highlight_score
            .partial_cmp(&a.highlight_score)
            .unwrap_or(Ordering::Equal)
    });

    Ok(())
}

/// Resolve a segment's window to seconds, clamping structural problems.
///
/// Returns `Ok(None)` when the segment was skipped under `ParsePolicy::Skip`.
fn resolve_window(
    segment: &Segment,
    label: usize,
    policy: ParsePolicy,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Option<(f64, f64)>> {
    let resolved = segment
        .start_time
        .to_seconds()
        .and_then(|start| segment.end_time.to_seconds().map(|end| (start, end)));

    let (mut start, mut end) = match resolved {
        Ok(window) => window,
        Err(e) => match policy {
            ParsePolicy::Abort => return Err(e),
            ParsePolicy::Skip => {
                diagnostics.push(Diagnostic::new(
                    R_SEGMENT_BAD_TIMECODE,
                    format!("segment {}: {}", label, e),
                ));
                return Ok(None);
            }
        },
    };

    if start < 0.0 || end < 0.0 {
        diagnostics.push(Diagnostic::new(
            R_SEGMENT_NEGATIVE,
            format!("segment {}: negative bound clamped to zero", label),
        ));
        start = start.max(0.0);
        end = end.max(0.0);
    }

    if end < start {
        diagnostics.push(Diagnostic::new(
            R_SEGMENT_REVERSED,
            format!(
                "segment {}: end {:.3}s before start {:.3}s; clamped to zero duration",
                label, end, start
            ),
        ));
        end = start;
    }

    Ok(Some((start, end)))
}

/// Check the `excitement_score <= analyzed_frames` invariant, clamping with
/// a diagnostic on violation.
fn effective_excitement(summary: &EmotionSummary, diagnostics: &mut Vec<Diagnostic>) -> u64 {
    if summary.excitement_score > summary.analyzed_frames {
        diagnostics.push(Diagnostic::new(
            R_EMOTION_OVERFLOW,
            format!(
                "excitement_score {} exceeds analyzed_frames {}; clamped",
                summary.excitement_score, summary.analyzed_frames
            ),
        ));
        summary.analyzed_frames
    } else {
        summary.excitement_score
    }
}
