//! FFmpeGUI
//!
//! Converts a media file with an external ffmpeg: pick an input, choose
//! format, bitrate and mono, and the matching ffmpeg command is built and
//! run (or only printed in testing mode). Default directories and the
//! testing flag live in an INI settings file.

mod actions;
mod conversion;
mod core;
mod error;
mod logging;
mod settings;
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::actions::App;
use crate::conversion::{Invocation, Invoker};
use crate::core::{Bitrate, ConversionRequest, OutputFormat};
use crate::settings::{parse_bool, program_dir, SettingsStore, DEFAULT_SETTINGS_PATH};

#[derive(Parser)]
#[command(name = "ffmpegui", about = "Front-end for converting media files with ffmpeg", version)]
struct Cli {
    /// Path to the settings file
    #[arg(short, long, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,

    /// Show debug output in the terminal
    #[arg(short, long)]
    verbose: bool,

    /// Without a subcommand the interactive console opens
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one file
    Convert {
        /// File to convert
        #[arg(short, long)]
        input: String,

        /// Output directory (defaults to the input's directory)
        #[arg(short, long, default_value = "")]
        output_dir: String,

        /// New file name, optionally with an extension that overrides --format
        #[arg(short, long, default_value = "")]
        name: String,

        /// MP3, MP4, WAV or WebM
        #[arg(short, long, default_value = "MP3")]
        format: OutputFormat,

        /// Default, 320, 256, 192, 128 or 96
        #[arg(short, long, default_value = "Default")]
        bitrate: Bitrate,

        /// Downmix to one channel
        #[arg(long)]
        mono: bool,

        /// Only print the ffmpeg command
        #[arg(long)]
        dry_run: bool,

        /// Do not wait for Enter after ffmpeg finishes
        #[arg(long)]
        no_pause: bool,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Print the current settings
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change one or more settings
    Set {
        /// Default input directory (`__file__` for the program directory)
        #[arg(long)]
        path_in: Option<String>,

        /// Default output directory (`__file__` for the program directory)
        #[arg(long)]
        path_out: Option<String>,

        /// Testing mode: yes/no, on/off, true/false or 1/0
        #[arg(long, value_parser = parse_testing)]
        testing: Option<bool>,
    },
    /// Restore factory settings
    Reset,
}

fn parse_testing(value: &str) -> Result<bool, String> {
    parse_bool(value).ok_or_else(|| format!("'{value}' is not a boolean"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let store = SettingsStore::new(&cli.settings);
    if let Err(e) = store.ensure_exists() {
        log::warn!("{e}; continuing with default settings");
    }

    match cli.command {
        None => {
            let app = App::new(store, Invoker::default()).context("failed to start runtime")?;
            let mut terminal = ui::Terminal::new().context("failed to open terminal")?;
            ui::run(&app, &mut terminal)?;
        }
        Some(Commands::Convert {
            input,
            output_dir,
            name,
            format,
            bitrate,
            mono,
            dry_run,
            no_pause,
        }) => {
            let request = ConversionRequest::new(input)
                .output_directory(output_dir)
                .requested_filename(name)
                .format(format)
                .bitrate(bitrate)
                .mono(mono);

            let invoker = Invoker::default().pause_after(!no_pause);
            let app = App::new(store, invoker)
                .context("failed to start runtime")?
                .force_dry_run(dry_run);

            match app.convert(&request)? {
                Invocation::DryRun { .. } => log::info!("Dry run, nothing converted"),
                Invocation::Completed { output_path } => println!("Wrote {output_path}"),
            }
        }
        Some(Commands::Settings { action }) => run_settings_command(&store, action)?,
    }

    Ok(())
}

fn run_settings_command(store: &SettingsStore, action: SettingsCommands) -> Result<()> {
    match action {
        SettingsCommands::Show { json } => {
            let resolved = store.load().resolved(&program_dir());
            if json {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
            } else {
                println!("Settings file:    {}", store.path().display());
                println!("Input directory:  {}", resolved.input_dir.display());
                println!("Output directory: {}", resolved.output_dir.display());
                println!("Testing mode:     {}", resolved.testing_mode);
                if let Some(log_path) = logging::get_log_file_path() {
                    println!("Log file:         {}", log_path.display());
                }
            }
        }
        SettingsCommands::Set {
            path_in,
            path_out,
            testing,
        } => {
            let mut settings = store.load();
            if let Some(path_in) = path_in {
                settings.default_input_dir = path_in;
            }
            if let Some(path_out) = path_out {
                settings.default_output_dir = path_out;
            }
            if let Some(testing) = testing {
                settings.testing_mode = testing;
            }
            store
                .apply(&settings)
                .with_context(|| format!("failed to update {}", store.path().display()))?;
            println!("Settings saved.");
        }
        SettingsCommands::Reset => {
            store
                .reset()
                .with_context(|| format!("failed to reset {}", store.path().display()))?;
            println!("Settings restored to defaults.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_set_only_changes_named_values() {
        let temp_dir = TempDir::new().unwrap();
        let store = SettingsStore::new(temp_dir.path().join("settings.ini"));
        std::fs::write(
            store.path(),
            concat!(
                "[DEFAULT]\npath_in = __file__\npath_out = __file__\ntesting = False\n\n",
                "[CURRENT]\npath_in = /mine/in\npath_out = /mine/out\ntesting = perhaps\n",
            ),
        )
        .unwrap();

        let set_testing = SettingsCommands::Set {
            path_in: None,
            path_out: None,
            testing: Some(true),
        };
        run_settings_command(&store, set_testing).unwrap();

        let settings = store.try_load().unwrap();
        assert_eq!(settings.default_input_dir, "/mine/in");
        assert_eq!(settings.default_output_dir, "/mine/out");
        assert!(settings.testing_mode);
    }

    #[test]
    fn test_parse_testing_rejects_unknown_literal() {
        assert_eq!(parse_testing("on"), Ok(true));
        assert!(parse_testing("perhaps").is_err());
    }
}
