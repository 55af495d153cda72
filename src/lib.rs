// Reelrank - Highlight Fusion Library Entry Point

pub mod constants;
pub mod error;
pub mod inputs;
pub mod reel;
pub mod scoring;
pub mod timecode;

pub use error::{ReelRankError, Result};
pub use inputs::{AnalysisBundle, AudioPeak, EmotionFrame, EmotionSummary, Segment, TimeField};
pub use reel::{plan_reel, ReelPlan};
pub use scoring::fusion::{score_and_rank, score_and_rank_timeline};
pub use scoring::{Diagnostic, FusionConfig, ParsePolicy, RankedHighlights, ScoredSegment};
