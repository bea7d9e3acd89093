use anyhow::{Context, Result};
use clap::Args;
use form_coach::{ExerciseKind, PoseFrame, Side, WorkoutSession, WorkoutSummary};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::config::{Config, OutputFormat};
use crate::output;

#[derive(Args)]
pub struct ReplayCommand {
    /// NDJSON file of pose frames, or `-` for stdin
    input: PathBuf,

    /// Exercise to track (defaults to session.exercise from config)
    #[arg(short, long)]
    exercise: Option<String>,

    /// Body side to track: left or right
    #[arg(short, long)]
    side: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Landmarks below this confidence are ignored (0-1)
    #[arg(long)]
    min_confidence: Option<f32>,

    /// Only print the final summary
    #[arg(long)]
    summary_only: bool,
}

/// Outcome of streaming one input through a session
#[derive(Debug)]
pub struct ReplayReport {
    pub summary: WorkoutSummary,
    pub frames_skipped: u64,
}

impl ReplayCommand {
    pub async fn execute(self, config: Config) -> Result<()> {
        let kind: ExerciseKind = match &self.exercise {
            Some(name) => name.parse()?,
            None => config.session.exercise_kind()?,
        };
        let side: Side = match &self.side {
            Some(name) => name.parse()?,
            None => config.session.side()?,
        };
        let format = self.format.unwrap_or(config.output.format);

        let mut engine = config.engine.apply_env()?;
        if let Some(min_confidence) = self.min_confidence {
            engine.min_confidence = min_confidence;
        }
        engine.validate()?;
        let min_confidence = engine.min_confidence;

        let session = WorkoutSession::start(kind, side, engine);
        tracing::info!(
            session = %session.id(),
            input = %self.input.display(),
            min_confidence,
            "Replaying pose stream"
        );
        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        let report = if self.input.as_os_str() == "-" {
            let reader = BufReader::new(tokio::io::stdin());
            replay(reader, session, format, self.summary_only, &mut out).await?
        } else {
            let file = tokio::fs::File::open(&self.input)
                .await
                .with_context(|| format!("Failed to open {}", self.input.display()))?;
            replay(BufReader::new(file), session, format, self.summary_only, &mut out).await?
        };

        writeln!(out, "{}", output::summary(&report.summary, report.frames_skipped, format)?)?;
        Ok(())
    }
}

/// Feed every NDJSON line from `reader` through `session`, writing one line per frame.
///
/// Blank lines are ignored. Lines that fail to decode are logged and skipped.
pub async fn replay<R, W>(
    reader: R,
    mut session: WorkoutSession,
    format: OutputFormat,
    summary_only: bool,
    out: &mut W,
) -> Result<ReplayReport>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let time_based = session.pipeline().profile().is_time_based();
    let mut lines = reader.lines();
    let mut line_number = 0u64;
    let mut frames_skipped = 0u64;

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }

        let frame = match PoseFrame::from_json(&line) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(line = line_number, error = %e, "Skipping malformed frame");
                frames_skipped += 1;
                continue;
            }
        };

        let result = session.process_frame(&frame);
        if !summary_only {
            writeln!(
                out,
                "{}",
                output::frame_line(frame.timestamp_ms, &result, time_based, format)?
            )?;
        }
    }

    tracing::debug!(lines = line_number, frames_skipped, "Input exhausted");

    Ok(ReplayReport {
        summary: session.finish(),
        frames_skipped,
    })
}
