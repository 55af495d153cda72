// Reelrank CLI binary

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

use reelrank::constants::{DEFAULT_REEL_CLIPS, EMOTION_WEIGHT_DEFAULT};
use reelrank::inputs::AnalysisBundle;
use reelrank::reel::{plan_reel, ReelPlan};
use reelrank::scoring::fusion::{score_and_rank, score_and_rank_timeline};
use reelrank::scoring::{FusionConfig, ParsePolicy, RankedHighlights};

#[derive(Parser)]
#[command(name = "reelrank")]
#[command(about = "Ranks video highlight segments from multimodal analysis output", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score segments and print the ranked list
    Rank {
        #[command(flatten)]
        inputs: InputArgs,

        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Plan a highlight reel from the top-scoring segments
    Reel {
        #[command(flatten)]
        inputs: InputArgs,

        /// Maximum clips in the reel
        #[arg(long, default_value_t = DEFAULT_REEL_CLIPS)]
        top: usize,

        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Scene segments JSON (from scene-cut detection)
    #[arg(long)]
    segments: PathBuf,

    /// Audio peaks JSON (from loudness analysis)
    #[arg(long)]
    peaks: PathBuf,

    /// Emotion summary JSON; without it the emotion bonus is zero
    #[arg(long)]
    emotion: Option<PathBuf>,

    /// Per-frame emotion timeline JSON; enables windowed attribution
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Points per high-emotion frame, per second of segment duration
    #[arg(long, default_value_t = EMOTION_WEIGHT_DEFAULT)]
    weight: f64,

    /// How to treat items whose timecodes fail to parse
    #[arg(long, value_enum, default_value = "skip")]
    on_bad_timecode: BadTimecode,
}

#[derive(Clone, Copy, ValueEnum)]
enum BadTimecode {
    /// Drop the item and report a diagnostic
    Skip,
    /// Fail the whole run
    Abort,
}

impl From<BadTimecode> for ParsePolicy {
    fn from(value: BadTimecode) -> Self {
        match value {
            BadTimecode::Skip => ParsePolicy::Skip,
            BadTimecode::Abort => ParsePolicy::Abort,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rank { inputs, json } => cmd_rank(inputs, json),
        Commands::Reel { inputs, top, json } => cmd_reel(inputs, top, json),
    }
}

fn rank_from_files(inputs: &InputArgs) -> Result<RankedHighlights> {
    let bundle = AnalysisBundle::from_files(
        &inputs.segments,
        &inputs.peaks,
        inputs.emotion.as_deref(),
        inputs.frames.as_deref(),
    )?;

    let config = FusionConfig {
        emotion_weight: inputs.weight,
        policy: inputs.on_bad_timecode.into(),
    };

    let ranked = if !bundle.frames.is_empty() {
        score_and_rank_timeline(&bundle.segments, &bundle.peaks, &bundle.frames, &config)?
    } else {
        let summary = bundle.emotion.unwrap_or_default();
        score_and_rank(&bundle.segments, &bundle.peaks, &summary, &config)?
    };

    Ok(ranked)
}

fn cmd_rank(inputs: InputArgs, json: bool) -> Result<()> {
    let ranked = rank_from_files(&inputs)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    if ranked.segments.is_empty() {
        println!("No segments to rank.");
        print_diagnostics(&ranked);
        return Ok(());
    }

    println!(
        "{:>7}  {:>14}  {:>14}  {:>9}  {:>6}  {:>8}  {:>8}",
        "Segment", "Start", "End", "Duration", "Peaks", "Bonus", "Score"
    );
    println!("{}", "-".repeat(78));

    for seg in &ranked.segments {
        println!(
            "{:>7}  {:>14}  {:>14}  {:>9.2}  {:>6}  {:>8.2}  {:>8.2}",
            seg.segment,
            seg.start_timecode,
            seg.end_timecode,
            seg.duration,
            seg.audio_peaks,
            seg.emotion_bonus,
            seg.highlight_score
        );
    }

    if let Some(top) = ranked.top() {
        println!();
        println!(
            "Top highlight: {} -> {} (score {:.2})",
            top.start_timecode, top.end_timecode, top.highlight_score
        );
    }

    print_diagnostics(&ranked);
    Ok(())
}

fn cmd_reel(inputs: InputArgs, top: usize, json: bool) -> Result<()> {
    let ranked = rank_from_files(&inputs)?;
    let plan = plan_reel(&ranked, top);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    if plan.is_empty() {
        println!("No segments scored above zero; nothing to stitch.");
        print_diagnostics(&ranked);
        return Ok(());
    }

    print_plan(&plan);
    print_diagnostics(&ranked);
    Ok(())
}

fn print_plan(plan: &ReelPlan) {
    println!(
        "{:>7}  {:>14}  {:>14}  {:>8}",
        "Segment", "Start", "End", "Score"
    );
    println!("{}", "-".repeat(50));

    for cut in &plan.cuts {
        println!(
            "{:>7}  {:>14}  {:>14}  {:>8.2}",
            cut.segment, cut.start_timecode, cut.end_timecode, cut.highlight_score
        );
    }

    println!();
    println!(
        "Reel: {} cuts, {:.2}s total",
        plan.cuts.len(),
        plan.total_duration
    );
}

fn print_diagnostics(ranked: &RankedHighlights) {
    if ranked.diagnostics.is_empty() {
        return;
    }

    println!();
    println!("Diagnostics:");
    for d in &ranked.diagnostics {
        println!("  [{}] {}", d.code, d.message);
    }
}
