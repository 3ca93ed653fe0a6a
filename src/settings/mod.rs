//! Persistent user settings
//!
//! Default directories and the testing flag, stored in an INI file.

mod store;
mod types;

pub use store::{SettingsStore, DEFAULT_SETTINGS_PATH, SECTION_CURRENT};
pub use types::{parse_bool, program_dir, ResolvedSettings, Settings, KEY_TESTING};
