// Reelrank Constants
// Reference values match the collaborator contract. Do not change without
// updating DESIGN.md.

// ----- Fusion -----

// Points per high-emotion frame, per second of segment duration
pub const EMOTION_WEIGHT_DEFAULT: f64 = 5.0;

// Dominant emotions that count toward the excitement score
pub const HIGH_VALUE_EMOTIONS: [&str; 3] = ["happy", "surprise", "fear"];

// ----- Reel planning -----

// Maximum clips stitched into a reel by default
pub const DEFAULT_REEL_CLIPS: usize = 3;

// ----- Stable Reason Tokens -----
// Use these for machine-parseable diagnostics. Format: R_<CATEGORY>_<DETAIL>

// Segment diagnostics
pub const R_SEGMENT_BAD_TIMECODE: &str = "R_SEGMENT_BAD_TIMECODE";
pub const R_SEGMENT_NEGATIVE: &str = "R_SEGMENT_NEGATIVE";
pub const R_SEGMENT_REVERSED: &str = "R_SEGMENT_REVERSED";

// Peak diagnostics
pub const R_PEAK_BAD_TIMECODE: &str = "R_PEAK_BAD_TIMECODE";
pub const R_PEAK_NEGATIVE: &str = "R_PEAK_NEGATIVE";

// Emotion diagnostics
pub const R_EMOTION_OVERFLOW: &str = "R_EMOTION_OVERFLOW";
pub const R_FRAME_BAD_TIMECODE: &str = "R_FRAME_BAD_TIMECODE";

// General diagnostics
pub const R_NO_SEGMENTS: &str = "R_NO_SEGMENTS";
