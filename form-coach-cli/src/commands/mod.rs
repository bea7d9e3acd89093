mod config_cmd;
mod exercises;
mod replay;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

pub use exercises::ExercisesCommand;
pub use replay::{replay, ReplayCommand, ReplayReport};

#[derive(Parser)]
#[command(name = "form-coach")]
#[command(about = "Exercise form tracking from pose landmark streams", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "FORM_COACH_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an NDJSON pose stream through the tracker
    Replay(ReplayCommand),

    /// List supported exercises and their thresholds
    Exercises(ExercisesCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        let config_file = Config::resolve_path(self.config.as_deref())?;

        match self.command {
            Commands::Replay(cmd) => cmd.execute(Config::load_from(&config_file)?).await,
            Commands::Exercises(cmd) => cmd.execute(Config::load_from(&config_file)?).await,
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => {
                    config_cmd::show_config(&Config::load_from(&config_file)?).await
                }
                ConfigSubcommands::Path => config_cmd::show_path(&config_file).await,
                ConfigSubcommands::Init { force } => {
                    config_cmd::init_config(&config_file, force).await
                }
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_replay_arguments() {
        let cli = Cli::try_parse_from([
            "form-coach",
            "replay",
            "frames.ndjson",
            "--exercise",
            "squat",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose());
        assert!(matches!(cli.command, Commands::Replay(_)));
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["form-coach", "replay", "-", "--format", "xml"]).is_err());
    }
}
