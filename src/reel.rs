// Reel planning
// Picks the strongest ranked segments and lays them out in presentation
// order for the downstream stitching step. Cut points only; encoding is a
// collaborator's job.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::scoring::{RankedHighlights, ScoredSegment};

/// One cut in a planned reel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelCut {
    pub segment: usize,
    pub start_secs: f64,
    pub end_secs: f64,
    pub start_timecode: String,
    pub end_timecode: String,
    pub highlight_score: f64,
}

/// A chronological stitch plan over the top-scoring segments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReelPlan {
    pub cuts: Vec<ReelCut>,
    pub total_duration: f64,
}

impl ReelPlan {
    /// An empty plan means nothing scored above zero.
    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }
}

/// Select up to `top_n` segments with a positive highlight score, then
/// order them chronologically for stitching.
pub fn plan_reel(ranked: &RankedHighlights, top_n: usize) -> ReelPlan {
    let mut picked: Vec<&ScoredSegment> = ranked
        .segments
        .iter()
        .filter(|s| s.highlight_score > 0.0)
        .take(top_n)
        .collect();

    picked.sort_by(|a, b| {
        a.start_secs
            .partial_cmp(&b.start_secs)
            .unwrap_or(Ordering::Equal)
    });

    let cuts: Vec<ReelCut> = picked
        .into_iter()
        .map(|s| ReelCut {
            segment: s.segment,
            start_secs: s.start_secs,
            end_secs: s.end_secs,
            start_timecode: s.start_timecode.clone(),
            end_timecode: s.end_timecode.clone(),
            highlight_score: s.highlight_score,
        })
        .collect();

    let total_duration = cuts.iter().map(|c| c.end_secs - c.start_secs).sum();

    ReelPlan {
        cuts,
        total_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{AudioPeak, EmotionSummary, Segment};
    use crate::scoring::fusion::score_and_rank;
    use crate::scoring::FusionConfig;

    fn ranked_fixture() -> RankedHighlights {
        // Segment 2 gets two peaks, segment 4 one, segments 1 and 3 none
        let segments = vec![
            Segment::new("00:00:00.000", "00:00:10.000"),
            Segment::new("00:00:10.000", "00:00:20.000"),
            Segment::new("00:00:20.000", "00:00:30.000"),
            Segment::new("00:00:30.000", "00:00:40.000"),
        ];
        let peaks = vec![
            AudioPeak::new(12.0, 90),
            AudioPeak::new(15.0, 95),
            AudioPeak::new(35.0, 88),
        ];

        score_and_rank(
            &segments,
            &peaks,
            &EmotionSummary::default(),
            &FusionConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_plan_keeps_only_positive_scores() {
        let plan = plan_reel(&ranked_fixture(), 10);

        assert_eq!(plan.cuts.len(), 2);
        assert!(plan.cuts.iter().all(|c| c.highlight_score > 0.0));
    }

    #[test]
    fn test_plan_is_chronological() {
        let plan = plan_reel(&ranked_fixture(), 10);

        let starts: Vec<f64> = plan.cuts.iter().map(|c| c.start_secs).collect();
        let mut sorted = starts.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(starts, sorted);
    }

    #[test]
    fn test_plan_respects_top_n() {
        let plan = plan_reel(&ranked_fixture(), 1);

        // The single strongest segment survives the cut
        assert_eq!(plan.cuts.len(), 1);
        assert_eq!(plan.cuts[0].segment, 2);
    }

    #[test]
    fn test_plan_total_duration() {
        let plan = plan_reel(&ranked_fixture(), 10);
        assert!((plan.total_duration - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_zero_scores_gives_empty_plan() {
        let segments = vec![Segment::new("00:00:00.000", "00:00:10.000")];
        let ranked = score_and_rank(
            &segments,
            &[],
            &EmotionSummary::default(),
            &FusionConfig::default(),
        )
        .unwrap();

        let plan = plan_reel(&ranked, 3);
        assert!(plan.is_empty());
        assert_eq!(plan.total_duration, 0.0);
    }
}
