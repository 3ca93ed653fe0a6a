//! Application actions
//!
//! The named commands a front-end can trigger, and the handlers that
//! carry them out against the settings file and the converter.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tokio::runtime::Runtime;

use crate::conversion::{ConversionCommand, Invocation, Invoker};
use crate::core::{ConversionRequest, UnknownLabel};
use crate::error::{ConfigError, ConvertError, PathError};
use crate::settings::{
    program_dir, ResolvedSettings, Settings, SettingsStore, KEY_TESTING, SECTION_CURRENT,
};

/// Commands reachable from the main window and the settings window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Convert,
    OpenSettings,
    ApplySettings,
    CancelSettings,
    ResetSettings,
    Help,
    Quit,
}

impl Action {
    /// Actions offered at the main prompt
    pub const MAIN_MENU: [Action; 5] = [
        Self::Convert,
        Self::OpenSettings,
        Self::ResetSettings,
        Self::Help,
        Self::Quit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Convert => "convert",
            Self::OpenSettings => "settings",
            Self::ApplySettings => "apply",
            Self::CancelSettings => "cancel",
            Self::ResetSettings => "reset",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Convert => "Fill in the conversion form and run ffmpeg",
            Self::OpenSettings => "Edit default directories and testing mode",
            Self::ApplySettings => "Save the edited settings",
            Self::CancelSettings => "Discard the edited settings",
            Self::ResetSettings => "Restore factory settings",
            Self::Help => "Show this help",
            Self::Quit => "Exit",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let action = match s.as_str() {
            "convert" | "c" | "start" => Self::Convert,
            "settings" | "s" => Self::OpenSettings,
            "apply" | "a" => Self::ApplySettings,
            "cancel" => Self::CancelSettings,
            "reset" => Self::ResetSettings,
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => {
                return Err(UnknownLabel::new(
                    "action",
                    &s,
                    Self::MAIN_MENU.iter().map(|a| a.name()),
                ));
            }
        };
        Ok(action)
    }
}

/// Handlers behind the actions
///
/// Owns the runtime the converter runs on; callers block on each
/// conversion, so only one runs at a time.
pub struct App {
    store: SettingsStore,
    invoker: Invoker,
    runtime: Runtime,
    force_dry_run: bool,
    program_dir: PathBuf,
}

impl App {
    pub fn new(store: SettingsStore, invoker: Invoker) -> std::io::Result<Self> {
        Ok(Self {
            store,
            invoker,
            runtime: Runtime::new()?,
            force_dry_run: false,
            program_dir: program_dir(),
        })
    }

    /// Dry-run every conversion regardless of the testing setting
    pub fn force_dry_run(mut self, force: bool) -> Self {
        self.force_dry_run = force;
        self
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// Settings with `__file__` replaced by the program directory
    pub fn resolved_settings(&self) -> ResolvedSettings {
        self.store.load().resolved(&self.program_dir)
    }

    /// Convert: build the command, then run it or print it
    ///
    /// The testing flag is re-read from disk for every call.
    pub fn convert(&self, request: &ConversionRequest) -> Result<Invocation, ConvertError> {
        let command = ConversionCommand::build(request)?;
        let dry_run = self.force_dry_run || self.testing_mode();

        log::info!("Output file: {}", command.output_path());
        if !dry_run {
            check_paths_exist(request, &command)?;
        }

        Ok(self.runtime.block_on(self.invoker.invoke(&command, dry_run))?)
    }

    fn testing_mode(&self) -> bool {
        self.store
            .get_bool(KEY_TESTING, SECTION_CURRENT)
            .unwrap_or_else(|e| {
                log::warn!("Could not read testing mode: {e}");
                self.store.defaults().testing_mode
            })
    }

    /// ApplySettings: overwrite the current values
    pub fn apply_settings(&self, settings: &Settings) -> Result<(), ConfigError> {
        self.store.apply(settings)
    }

    /// ResetSettings: fall back to the factory values
    pub fn reset_settings(&self) -> Result<(), ConfigError> {
        self.store.reset()
    }
}

fn check_paths_exist(
    request: &ConversionRequest,
    command: &ConversionCommand,
) -> Result<(), PathError> {
    if !Path::new(&request.input_path).is_file() {
        return Err(PathError::InputNotFound(request.input_path.clone()));
    }

    let directory = &command.output().directory;
    if !directory.is_empty() && !Path::new(directory).is_dir() {
        return Err(PathError::OutputDirNotFound(directory.clone()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Bitrate;
    use crate::error::InvocationError;
    use tempfile::TempDir;

    fn app_in(dir: &TempDir, tool: &str) -> App {
        let store = SettingsStore::new(dir.path().join("settings.ini"));
        store.ensure_exists().unwrap();
        App::new(store, Invoker::new(tool).pause_after(false)).unwrap()
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!("convert".parse::<Action>().unwrap(), Action::Convert);
        assert_eq!("Start".parse::<Action>().unwrap(), Action::Convert);
        assert_eq!("s".parse::<Action>().unwrap(), Action::OpenSettings);
        assert_eq!("exit".parse::<Action>().unwrap(), Action::Quit);
        assert!("burn".parse::<Action>().is_err());
    }

    #[test]
    fn test_action_names_parse_back() {
        for action in Action::MAIN_MENU {
            assert_eq!(action.name().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_convert_in_testing_mode_only_renders() {
        let temp_dir = TempDir::new().unwrap();
        let app = app_in(&temp_dir, "ffmpeg");
        app.store().set("/in", "/out", true).unwrap();

        // Input does not exist; a dry run does not care
        let request = ConversionRequest::new("/nowhere/song.flac").bitrate(Bitrate::K256);
        let result = app.convert(&request).unwrap();

        assert_eq!(
            result,
            Invocation::DryRun {
                rendered: "ffmpeg -i \"/nowhere/song.flac\" -b:a 256k \"/nowhere/song.mp3\""
                    .to_string()
            }
        );
    }

    #[test]
    fn test_force_dry_run_overrides_setting() {
        let temp_dir = TempDir::new().unwrap();
        let app = app_in(&temp_dir, "no-such-converter-binary").force_dry_run(true);

        let result = app.convert(&ConversionRequest::new("/x/a.wav")).unwrap();
        assert!(matches!(result, Invocation::DryRun { .. }));
    }

    #[test]
    fn test_live_convert_rejects_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let app = app_in(&temp_dir, "ffmpeg");

        let missing = temp_dir.path().join("missing.flac");
        let request = ConversionRequest::new(missing.to_string_lossy());
        let err = app.convert(&request).unwrap_err();

        assert!(matches!(err, ConvertError::Path(PathError::InputNotFound(_))));
    }

    #[test]
    fn test_live_convert_rejects_missing_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let app = app_in(&temp_dir, "ffmpeg");
        let input = temp_dir.path().join("song.flac");
        std::fs::write(&input, b"").unwrap();

        let missing_dir = temp_dir.path().join("nope");
        let request = ConversionRequest::new(input.to_string_lossy())
            .output_directory(missing_dir.to_string_lossy());
        let err = app.convert(&request).unwrap_err();

        assert!(matches!(err, ConvertError::Path(PathError::OutputDirNotFound(_))));
    }

    #[test]
    fn test_convert_rejects_empty_input() {
        let temp_dir = TempDir::new().unwrap();
        let app = app_in(&temp_dir, "ffmpeg");

        let err = app.convert(&ConversionRequest::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Path(PathError::EmptyInputPath)));
    }

    #[cfg(unix)]
    #[test]
    fn test_live_convert_reports_exit_status() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("song.flac");
        std::fs::write(&input, b"").unwrap();
        let request = ConversionRequest::new(input.to_string_lossy());

        let ok = app_in(&temp_dir, "true").convert(&request).unwrap();
        assert!(matches!(ok, Invocation::Completed { .. }));

        let err = app_in(&temp_dir, "false").convert(&request).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Invocation(InvocationError::ExitStatus { code: 1 })
        ));
    }

    #[test]
    fn test_apply_and_reset_settings() {
        let temp_dir = TempDir::new().unwrap();
        let app = app_in(&temp_dir, "ffmpeg");

        let settings = Settings {
            default_input_dir: "/music".to_string(),
            default_output_dir: "/converted".to_string(),
            testing_mode: true,
        };
        app.apply_settings(&settings).unwrap();
        assert_eq!(app.store().load(), settings);

        app.reset_settings().unwrap();
        assert_eq!(app.store().load(), Settings::default());
    }

    #[test]
    fn test_resolved_settings_replace_sentinel() {
        let temp_dir = TempDir::new().unwrap();
        let app = app_in(&temp_dir, "ffmpeg");

        let resolved = app.resolved_settings();
        assert_eq!(resolved.input_dir, program_dir());
        assert_eq!(resolved.output_dir, program_dir());
    }
}
