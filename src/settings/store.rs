//! INI-backed settings file
//!
//! The file has two sections: `[DEFAULT]` holds factory values and
//! `[CURRENT]` holds what the user applied. Every read goes back to disk,
//! so edits made by hand between operations are always picked up.

use ini::{EscapePolicy, Ini, ParseOption, WriteOption};
use std::fs;
use std::path::{Path, PathBuf};

use super::types::{
    format_bool, parse_bool, Settings, KEY_PATH_IN, KEY_PATH_OUT, KEY_TESTING,
};
use crate::error::ConfigError;

pub const SECTION_DEFAULT: &str = "DEFAULT";
pub const SECTION_CURRENT: &str = "CURRENT";

/// Where the settings file lives unless `--settings` says otherwise
pub const DEFAULT_SETTINGS_PATH: &str = "resources/settings.ini";

/// Content written when no settings file exists yet
const BOOTSTRAP_CONTENT: &str = "\
; Default values can be edited freely as long as paths point to existing directories
; and the testing value is a boolean.
; Accepted booleans: yes/no, on/off, true/false, 1/0.
; A default path of __file__ means the program's own directory.

; To reset settings, delete this file and restart the program, or remove every value
; under [CURRENT]. Keep the [CURRENT] section title itself when doing the latter.

[DEFAULT]
path_in = __file__
path_out = __file__
testing = False

[CURRENT]
";

/// Handle to the settings file on disk
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the settings file with factory content if it is missing
    ///
    /// Never touches an existing file. Returns `true` when a file was written.
    pub fn ensure_exists(&self) -> Result<bool, ConfigError> {
        if self.path.is_file() {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        fs::write(&self.path, BOOTSTRAP_CONTENT).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;

        log::info!("Created settings file at {}", self.path.display());
        Ok(true)
    }

    /// Read a string value
    ///
    /// Keys missing from `section` fall back to `[DEFAULT]`.
    pub fn get(&self, key: &str, section: &str) -> Result<String, ConfigError> {
        let ini = self.read()?;
        lookup(&ini, section, key)
    }

    /// Read a boolean value, see [`parse_bool`] for the accepted literals
    pub fn get_bool(&self, key: &str, section: &str) -> Result<bool, ConfigError> {
        let value = self.get(key, section)?;
        parse_bool(&value).ok_or_else(|| ConfigError::InvalidBoolean {
            key: key.to_string(),
            value,
        })
    }

    /// Overwrite the three `[CURRENT]` values and rewrite the file
    ///
    /// `[DEFAULT]` and any other sections are written back unchanged.
    /// Comments in the file do not survive the rewrite.
    pub fn set(&self, path_in: &str, path_out: &str, testing: bool) -> Result<(), ConfigError> {
        let mut ini = self.read()?;

        for (key, value) in [
            (KEY_PATH_IN, path_in),
            (KEY_PATH_OUT, path_out),
            (KEY_TESTING, format_bool(testing)),
        ] {
            remove_key(&mut ini, SECTION_CURRENT, key);
            ini.with_section(Some(SECTION_CURRENT)).set(key, value);
        }

        self.write(&ini)?;
        log::debug!(
            "Saved settings: path_in={path_in}, path_out={path_out}, testing={testing}"
        );
        Ok(())
    }

    /// Persist a full [`Settings`] value into `[CURRENT]`
    pub fn apply(&self, settings: &Settings) -> Result<(), ConfigError> {
        self.set(
            &settings.default_input_dir,
            &settings.default_output_dir,
            settings.testing_mode,
        )
    }

    /// Drop every `[CURRENT]` value so reads fall back to `[DEFAULT]`
    ///
    /// The section header itself is kept.
    pub fn reset(&self) -> Result<(), ConfigError> {
        let mut ini = self.read()?;

        match ini.section_mut(Some(SECTION_CURRENT)) {
            Some(props) => {
                let keys: Vec<String> = props.iter().map(|(k, _)| k.to_string()).collect();
                for key in keys {
                    props.remove(&key);
                }
            }
            None => {
                return Err(ConfigError::MissingSection(SECTION_CURRENT.to_string()));
            }
        }

        self.write(&ini)?;
        log::info!("Settings reset to defaults");
        Ok(())
    }

    /// Current settings, falling back to factory values per key
    ///
    /// A bad value only replaces that one field; the other fields keep
    /// what the file holds.
    pub fn load(&self) -> Settings {
        let ini = match self.read() {
            Ok(ini) => ini,
            Err(e) => {
                log::warn!("Using default settings: {e}");
                return self.defaults();
            }
        };

        let input_dir = lookup(&ini, SECTION_CURRENT, KEY_PATH_IN);
        let output_dir = lookup(&ini, SECTION_CURRENT, KEY_PATH_OUT);
        let testing = testing_in(&ini, SECTION_CURRENT);
        if let (Ok(input_dir), Ok(output_dir), Ok(testing)) = (&input_dir, &output_dir, &testing) {
            log::debug!("Loaded settings from {}", self.path.display());
            return Settings {
                default_input_dir: input_dir.clone(),
                default_output_dir: output_dir.clone(),
                testing_mode: *testing,
            };
        }

        let defaults = self.defaults();
        Settings {
            default_input_dir: or_default(input_dir, defaults.default_input_dir),
            default_output_dir: or_default(output_dir, defaults.default_output_dir),
            testing_mode: or_default(testing, defaults.testing_mode),
        }
    }

    /// Current settings, or the error that prevented reading them
    pub fn try_load(&self) -> Result<Settings, ConfigError> {
        self.try_section(SECTION_CURRENT)
    }

    /// Factory values from `[DEFAULT]`, or built-in ones if that fails too
    pub fn defaults(&self) -> Settings {
        self.try_section(SECTION_DEFAULT).unwrap_or_else(|e| {
            log::warn!("Using built-in default settings: {e}");
            Settings::default()
        })
    }

    fn try_section(&self, section: &str) -> Result<Settings, ConfigError> {
        let ini = self.read()?;

        Ok(Settings {
            default_input_dir: lookup(&ini, section, KEY_PATH_IN)?,
            default_output_dir: lookup(&ini, section, KEY_PATH_OUT)?,
            testing_mode: testing_in(&ini, section)?,
        })
    }

    fn read(&self) -> Result<Ini, ConfigError> {
        let content = fs::read_to_string(&self.path).map_err(|source| ConfigError::Read {
            path: self.path.clone(),
            source,
        })?;

        // Backslashes in Windows paths must stay literal
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };

        Ini::load_from_str_opt(&content, opt).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, ini: &Ini) -> Result<(), ConfigError> {
        let opt = WriteOption {
            escape_policy: EscapePolicy::Nothing,
            kv_separator: " = ",
            ..WriteOption::default()
        };

        ini.write_to_file_opt(&self.path, opt)
            .map_err(|source| ConfigError::Write {
                path: self.path.clone(),
                source,
            })
    }
}

fn find_key<'a>(ini: &'a Ini, section: &str, key: &str) -> Option<&'a str> {
    ini.section(Some(section)).and_then(|props| {
        props
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

fn lookup(ini: &Ini, section: &str, key: &str) -> Result<String, ConfigError> {
    let has_section = section == SECTION_DEFAULT || ini.section(Some(section)).is_some();
    if !has_section {
        return Err(ConfigError::MissingSection(section.to_string()));
    }

    find_key(ini, section, key)
        .or_else(|| find_key(ini, SECTION_DEFAULT, key))
        .map(str::to_string)
        .ok_or_else(|| ConfigError::MissingKey {
            section: section.to_string(),
            key: key.to_string(),
        })
}

fn testing_in(ini: &Ini, section: &str) -> Result<bool, ConfigError> {
    let value = lookup(ini, section, KEY_TESTING)?;
    parse_bool(&value).ok_or_else(|| ConfigError::InvalidBoolean {
        key: KEY_TESTING.to_string(),
        value,
    })
}

fn or_default<T>(value: Result<T, ConfigError>, default: T) -> T {
    value.unwrap_or_else(|e| {
        log::warn!("Using default value: {e}");
        default
    })
}

fn remove_key(ini: &mut Ini, section: &str, key: &str) {
    if let Some(props) = ini.section_mut(Some(section)) {
        let existing: Vec<String> = props
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(k, _)| k.to_string())
            .collect();
        for k in existing {
            props.remove(&k);
        }
    }
}
