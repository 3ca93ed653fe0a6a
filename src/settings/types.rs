//! Settings values and sentinel resolution

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Path value meaning "the program's own directory"
pub const FILE_SENTINEL: &str = "__file__";

/// Key names shared by both sections of the settings file
pub const KEY_PATH_IN: &str = "path_in";
pub const KEY_PATH_OUT: &str = "path_out";
pub const KEY_TESTING: &str = "testing";

/// User preferences as stored on disk
///
/// Paths are kept as written, so either may still be [`FILE_SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory the input file prompt starts in
    pub default_input_dir: String,
    /// Directory the output directory prompt starts in
    pub default_output_dir: String,
    /// Print the ffmpeg command instead of running it
    pub testing_mode: bool,
}

impl Default for Settings {
    /// Factory values, identical to the `[DEFAULT]` section of a fresh file
    fn default() -> Self {
        Self {
            default_input_dir: FILE_SENTINEL.to_string(),
            default_output_dir: FILE_SENTINEL.to_string(),
            testing_mode: false,
        }
    }
}

impl Settings {
    /// Replace sentinel paths with `program_dir`
    pub fn resolved(&self, program_dir: &Path) -> ResolvedSettings {
        ResolvedSettings {
            input_dir: resolve_dir(&self.default_input_dir, program_dir),
            output_dir: resolve_dir(&self.default_output_dir, program_dir),
            testing_mode: self.testing_mode,
        }
    }
}

/// Settings with every sentinel turned into a real directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSettings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub testing_mode: bool,
}

fn resolve_dir(value: &str, program_dir: &Path) -> PathBuf {
    if value == FILE_SENTINEL {
        program_dir.to_path_buf()
    } else {
        PathBuf::from(value)
    }
}

/// Directory that `__file__` stands for
///
/// The folder holding the running executable, or the working directory
/// if that cannot be determined.
pub fn program_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Parse a config boolean
///
/// Accepts yes/no, on/off, true/false and 1/0 in any letter case.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Render a boolean the way the settings file stores it
pub fn format_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_all_literals() {
        for literal in ["yes", "on", "true", "1", "YES", "True", " On "] {
            assert_eq!(parse_bool(literal), Some(true), "{literal}");
        }
        for literal in ["no", "off", "false", "0", "NO", "False", "oFF"] {
            assert_eq!(parse_bool(literal), Some(false), "{literal}");
        }
    }

    #[test]
    fn test_parse_bool_rejects_other_values() {
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
        assert_eq!(parse_bool("2"), None);
    }

    #[test]
    fn test_format_bool() {
        assert_eq!(format_bool(true), "True");
        assert_eq!(format_bool(false), "False");
    }

    #[test]
    fn test_default_settings_use_sentinel() {
        let settings = Settings::default();
        assert_eq!(settings.default_input_dir, FILE_SENTINEL);
        assert_eq!(settings.default_output_dir, FILE_SENTINEL);
        assert!(!settings.testing_mode);
    }

    #[test]
    fn test_resolved_replaces_only_sentinels() {
        let settings = Settings {
            default_input_dir: FILE_SENTINEL.to_string(),
            default_output_dir: "/music/out".to_string(),
            testing_mode: true,
        };
        let resolved = settings.resolved(Path::new("/opt/ffmpegui"));

        assert_eq!(resolved.input_dir, PathBuf::from("/opt/ffmpegui"));
        assert_eq!(resolved.output_dir, PathBuf::from("/music/out"));
        assert!(resolved.testing_mode);
    }

    #[test]
    fn test_program_dir_is_not_empty() {
        assert!(!program_dir().as_os_str().is_empty());
    }
}
