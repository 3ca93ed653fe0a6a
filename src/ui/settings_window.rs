//! Settings form
//!
//! Shows the default directories with `__file__` already resolved, so
//! applying the form stores real paths.

use super::prompt::{ask_parsed, ask_path, ask_yes_no, Prompter};
use crate::actions::Action;
use crate::settings::{ResolvedSettings, Settings};

/// How the user left the settings form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsOutcome {
    Apply(Settings),
    Cancel,
}

pub fn settings_form(
    p: &mut impl Prompter,
    current: &ResolvedSettings,
) -> rustyline::Result<SettingsOutcome> {
    println!("Settings");

    let default_input_dir = ask_path(
        p,
        "Default input directory: ",
        &current.input_dir.to_string_lossy(),
    )?;
    let default_output_dir = ask_path(
        p,
        "Default output directory: ",
        &current.output_dir.to_string_lossy(),
    )?;
    let testing_mode = ask_yes_no(p, "Testing mode (yes/no): ", current.testing_mode)?;

    loop {
        let choice: Action = ask_parsed(p, "Apply or cancel? ", Action::ApplySettings.name())?;
        match choice {
            Action::ApplySettings => {
                return Ok(SettingsOutcome::Apply(Settings {
                    default_input_dir,
                    default_output_dir,
                    testing_mode,
                }));
            }
            Action::CancelSettings => return Ok(SettingsOutcome::Cancel),
            _ => println!("Type 'apply' or 'cancel'."),
        }
    }
}
