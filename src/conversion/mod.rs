//! Conversion command building and execution
//!
//! Builds the ffmpeg invocation for a request and runs it, either for
//! real or as a printed dry run.

mod command;
mod ffmpeg;

pub use command::ConversionCommand;
pub use ffmpeg::{Invocation, Invoker};

use std::path::{Path, PathBuf};

use crate::error::InvocationError;

/// Program name of the external converter
pub const FFMPEG: &str = "ffmpeg";

/// Find the executable to spawn for `tool`
///
/// A bare name is looked for in `resources/bin/` next to our own
/// executable first, then on PATH. Anything with a directory component
/// must point at an existing file.
pub fn locate_tool(tool: &Path) -> Result<PathBuf, InvocationError> {
    let not_found = || InvocationError::ToolNotFound(tool.display().to_string());

    if tool.components().count() > 1 {
        return if tool.is_file() {
            Ok(tool.to_path_buf())
        } else {
            Err(not_found())
        };
    }

    if let Some(bundled) = bundled_path(tool) {
        log::debug!("Found {} at bundled path: {:?}", tool.display(), bundled);
        return Ok(bundled);
    }

    which::which(tool).map_err(|e| {
        log::debug!("{} not on PATH: {e}", tool.display());
        not_found()
    })
}

fn bundled_path(tool: &Path) -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;

    let mut file_name = tool.as_os_str().to_os_string();
    if tool.extension().is_none() {
        file_name.push(std::env::consts::EXE_SUFFIX);
    }

    let local_path = exe_dir.join("resources").join("bin").join(file_name);
    local_path.is_file().then_some(local_path)
}
