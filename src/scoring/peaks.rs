// Peak density scorer
// Counts audio peaks inside a segment's time window.

use crate::constants::{R_PEAK_BAD_TIMECODE, R_PEAK_NEGATIVE};
use crate::error::Result;
use crate::inputs::AudioPeak;

use super::{Diagnostic, ParsePolicy};

/// Count peaks falling inside `[start, end)`.
///
/// The window is half-open so a peak landing exactly on a boundary is
/// attributed to the following segment, never to both. A zero-duration
/// window can contain no peaks.
pub fn count_peaks_in_window(peak_times: &[f64], start: f64, end: f64) -> usize {
    peak_times.iter().filter(|&&t| t >= start && t < end).count()
}

/// Resolve peak times to seconds once, before the per-segment scan.
///
/// Peaks at negative times are structurally invalid and always skipped with
/// a diagnostic. Unparseable times are skipped or abort, per the policy.
pub fn resolve_peaks(
    peaks: &[AudioPeak],
    policy: ParsePolicy,
) -> Result<(Vec<f64>, Vec<Diagnostic>)> {
    let mut times = Vec::with_capacity(peaks.len());
    let mut diagnostics = Vec::new();

    for (i, peak) in peaks.iter().enumerate() {
        let time = match peak.time.to_seconds() {
            Ok(t) => t,
            Err(e) => match policy {
                ParsePolicy::Abort => return Err(e),
                ParsePolicy::Skip => {
                    diagnostics.push(Diagnostic::new(
                        R_PEAK_BAD_TIMECODE,
                        format!("peak {}: {}", i + 1, e),
                    ));
                    continue;
                }
            },
        };

        if time < 0.0 {
            diagnostics.push(Diagnostic::new(
                R_PEAK_NEGATIVE,
                format!("peak {} at {}s dropped", i + 1, time),
            ));
            continue;
        }

        times.push(time);
    }

    Ok((times, diagnostics))
}
