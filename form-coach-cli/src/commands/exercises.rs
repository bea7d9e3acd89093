use anyhow::Result;
use clap::Args;
use form_coach::{ExerciseKind, ExerciseProfile, Side};

use crate::config::{Config, OutputFormat};
use crate::output;

#[derive(Args)]
pub struct ExercisesCommand {
    /// Show joints for this side of the body
    #[arg(short, long, default_value = "left")]
    side: String,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

impl ExercisesCommand {
    pub async fn execute(self, config: Config) -> Result<()> {
        let side: Side = self.side.parse()?;
        let format = self.format.unwrap_or(config.output.format);

        let profiles: Vec<ExerciseProfile> = ExerciseKind::all()
            .into_iter()
            .map(|kind| ExerciseProfile::for_exercise(kind, side))
            .collect();

        println!("{}", output::catalogue(&profiles, format)?);
        Ok(())
    }
}
