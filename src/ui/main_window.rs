//! Main console window: the conversion form and the action prompt

use rustyline::error::ReadlineError;

use super::prompt::{ask_parsed, ask_path, ask_yes_no, Prompter};
use super::settings_window::{settings_form, SettingsOutcome};
use crate::actions::{Action, App};
use crate::conversion::Invocation;
use crate::core::{Bitrate, ConversionRequest, OutputFormat};
use crate::settings::ResolvedSettings;

fn labels<T: Copy>(items: &[T], label: fn(T) -> &'static str) -> String {
    items.iter().map(|item| label(*item)).collect::<Vec<_>>().join("/")
}

/// Fill in a conversion request
///
/// The input prompt starts in the default input directory and the output
/// prompt holds the default output directory; clearing it writes next to
/// the input file.
pub fn conversion_form(
    p: &mut impl Prompter,
    defaults: &ResolvedSettings,
) -> rustyline::Result<ConversionRequest> {
    let mut input_initial = defaults.input_dir.to_string_lossy().into_owned();
    if !input_initial.is_empty() && !input_initial.ends_with(std::path::MAIN_SEPARATOR) {
        input_initial.push(std::path::MAIN_SEPARATOR);
    }

    let input_path = ask_path(p, "Input file: ", &input_initial)?;
    let output_directory = ask_path(
        p,
        "Output directory (blank = next to input): ",
        &defaults.output_dir.to_string_lossy(),
    )?;
    let requested_filename = p
        .ask("New file name (blank = original name): ", "")?
        .trim()
        .to_string();

    let format_prompt = format!("Format [{}]: ", labels(&OutputFormat::ALL, OutputFormat::label));
    let output_format: OutputFormat =
        ask_parsed(p, &format_prompt, OutputFormat::default().label())?;

    let bitrate_prompt = format!("Bitrate kbps [{}]: ", labels(&Bitrate::ALL, Bitrate::label));
    let bitrate: Bitrate = ask_parsed(p, &bitrate_prompt, Bitrate::default().label())?;

    let mono = ask_yes_no(p, "Make mono (yes/no): ", false)?;

    Ok(ConversionRequest {
        input_path,
        output_directory,
        requested_filename,
        output_format,
        bitrate,
        mono,
    })
}

pub fn print_help() {
    println!("Commands:");
    for action in Action::MAIN_MENU {
        println!("  {:<10} {}", action.name(), action.description());
    }
    println!("Ctrl-C cancels the current form, Ctrl-D quits.");
    println!();
}

/// Run one action; `Ok(false)` means quit
pub fn dispatch(app: &App, p: &mut impl Prompter, action: Action) -> rustyline::Result<bool> {
    match action {
        Action::Convert => {
            let request = conversion_form(p, &app.resolved_settings())?;
            match app.convert(&request) {
                Ok(Invocation::DryRun { .. }) => {
                    println!("Testing mode is on, nothing was converted.");
                }
                Ok(Invocation::Completed { output_path }) => {
                    println!("Wrote {output_path}");
                }
                Err(e) => {
                    log::error!("Conversion failed: {e}");
                    println!("Error: {e}");
                }
            }
        }
        Action::OpenSettings => match settings_form(p, &app.resolved_settings())? {
            SettingsOutcome::Apply(settings) => match app.apply_settings(&settings) {
                Ok(()) => println!("Settings saved."),
                Err(e) => {
                    log::error!("Failed to save settings: {e}");
                    println!("Error: {e}");
                }
            },
            SettingsOutcome::Cancel => println!("Settings unchanged."),
        },
        Action::ApplySettings | Action::CancelSettings => {
            println!("Open the settings form first.");
        }
        Action::ResetSettings => match app.reset_settings() {
            Ok(()) => println!("Settings restored to defaults."),
            Err(e) => println!("Error: {e}"),
        },
        Action::Help => print_help(),
        Action::Quit => return Ok(false),
    }
    Ok(true)
}

/// Interactive loop until Quit or end of input
pub fn run(app: &App, p: &mut impl Prompter) -> rustyline::Result<()> {
    println!("FFmpeGUI (settings: {})", app.store().path().display());
    print_help();

    loop {
        let line = match p.ask_command("ffmpegui> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return Ok(()),
            Err(e) => return Err(e),
        };
        if line.trim().is_empty() {
            continue;
        }

        let action = match line.parse::<Action>() {
            Ok(action) => action,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match dispatch(app, p, action) {
            Ok(true) => {}
            Ok(false) | Err(ReadlineError::Eof) => return Ok(()),
            Err(ReadlineError::Interrupted) => println!("Cancelled."),
            Err(e) => return Err(e),
        }
    }
}
