use anyhow::Result;
use colored::Colorize;
use form_coach::{ExerciseProfile, FrameResult, TrackingMode, WorkoutSummary};
use serde::Serialize;

use crate::config::OutputFormat;

/// One line of machine-readable replay output
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Record<'a> {
    Frame {
        timestamp_ms: u64,
        #[serde(flatten)]
        result: &'a FrameResult,
    },
    Summary {
        #[serde(flatten)]
        summary: &'a WorkoutSummary,
        frames_skipped: u64,
    },
}

/// Render one processed frame. `time_based` selects hold progress over the rep count.
pub fn frame_line(
    timestamp_ms: u64,
    result: &FrameResult,
    time_based: bool,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(&Record::Frame {
            timestamp_ms,
            result,
        })?),
        OutputFormat::Text => Ok(frame_text(timestamp_ms, result, time_based)),
    }
}

fn frame_text(timestamp_ms: u64, result: &FrameResult, time_based: bool) -> String {
    let angle = match result.angle {
        Some(angle) => format!("{:>6.1}°", angle),
        None => format!("{:>7}", "--"),
    };

    let feedback = if result.rep_counted {
        result.feedback.green().bold()
    } else if result.angle.is_none() {
        result.feedback.yellow()
    } else {
        result.feedback.normal()
    };

    let progress = if time_based {
        format!("hold {:>6.1}s", result.hold_ms as f64 / 1000.0)
    } else {
        format!("reps {:>3} {:<7}", result.rep_count, result.rep_state.to_string())
    };

    format!(
        "[{:>9.3}s] {}  {}  score {:>4.1}  {}",
        timestamp_ms as f64 / 1000.0,
        angle,
        progress,
        result.form_score,
        feedback
    )
}

pub fn summary(summary: &WorkoutSummary, frames_skipped: u64, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(&Record::Summary {
            summary,
            frames_skipped,
        })?),
        OutputFormat::Text => Ok(summary_text(summary, frames_skipped)),
    }
}

fn summary_text(summary: &WorkoutSummary, frames_skipped: u64) -> String {
    let mut lines = vec![
        String::new(),
        "Workout Summary".bold().to_string(),
        "────────────────────────────────".to_string(),
        format!("Exercise:  {} ({})", summary.exercise.display_name(), summary.side),
        format!("Reps:      {}", summary.reps.to_string().cyan()),
        format!("Best hold: {:.1}s", summary.best_hold_ms as f64 / 1000.0),
        format!(
            "Frames:    {} processed, {} unreliable ({:.0}% tracked)",
            summary.frames_processed,
            summary.frames_unreliable,
            summary.tracking_quality() * 100.0
        ),
    ];
    if frames_skipped > 0 {
        lines.push(format!("Skipped:   {} malformed lines", frames_skipped).yellow().to_string());
    }
    lines.join("\n")
}

/// Catalogue listing for `form-coach exercises`
pub fn catalogue(profiles: &[ExerciseProfile], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(profiles)?);
    }

    let mut lines = vec![format!(
        "{:<12} {:<16} {:<40} {}",
        "NAME".bold(),
        "PATTERN".bold(),
        "JOINTS".bold(),
        "TRACKING".bold()
    )];

    for profile in profiles {
        let triple = profile.triple();
        let joints = format!("{} > {} > {}", triple.first, triple.vertex, triple.last);
        let tracking = match profile.tracking {
            TrackingMode::Reps {
                down_threshold,
                up_threshold,
                direction,
            } => format!(
                "reps ({:?}) down {} / up {}",
                direction, down_threshold, up_threshold
            )
            .to_lowercase(),
            TrackingMode::Hold {
                min_valid,
                max_valid,
            } => format!("hold {}-{}", min_valid, max_valid),
        };

        lines.push(format!(
            "{:<12} {:<16} {:<40} {}",
            profile.kind.name(),
            format!("{:?}", profile.kind.pattern()),
            joints,
            tracking
        ));
    }

    Ok(lines.join("\n"))
}
