//! FFmpeg subprocess handling

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use super::{locate_tool, ConversionCommand, FFMPEG};
use crate::error::InvocationError;

/// What an invocation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Testing mode: the command line that would have run
    DryRun { rendered: String },
    /// ffmpeg ran and exited successfully
    Completed { output_path: String },
}

/// Runs conversion commands against an external ffmpeg
#[derive(Debug, Clone)]
pub struct Invoker {
    tool: PathBuf,
    pause_after: bool,
}

impl Default for Invoker {
    fn default() -> Self {
        Self::new(FFMPEG)
    }
}

impl Invoker {
    /// `tool` is either a bare program name looked up at run time or a path
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            pause_after: true,
        }
    }

    /// Wait for Enter after ffmpeg finishes so its report stays readable
    pub fn pause_after(mut self, pause: bool) -> Self {
        self.pause_after = pause;
        self
    }

    /// Run `command`, or only print it when `dry_run` is set
    ///
    /// A live run inherits the console, announces completion, pauses if
    /// enabled, and only then reports a non-zero exit status.
    pub async fn invoke(
        &self,
        command: &ConversionCommand,
        dry_run: bool,
    ) -> Result<Invocation, InvocationError> {
        if dry_run {
            let rendered = command.render(&self.display_name());
            log::debug!("Testing mode, not running: {rendered}");
            println!("{rendered}");
            return Ok(Invocation::DryRun { rendered });
        }

        let program = locate_tool(&self.tool)?;
        log::info!("Running: {}", command.render(&self.display_name()));
        log::debug!("Using {} with {:?}", program.display(), command.arguments());

        let status = Command::new(&program)
            .args(command.argv())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| InvocationError::Spawn {
                tool: program.clone(),
                source,
            })?;

        println!("Conversion ended.");
        if self.pause_after {
            pause().await?;
        }

        if status.success() {
            log::info!("Successfully converted: {}", command.output_path());
            return Ok(Invocation::Completed {
                output_path: command.output_path().to_string(),
            });
        }

        let err = match status.code() {
            Some(code) => InvocationError::ExitStatus { code },
            None => InvocationError::Terminated,
        };
        log::error!("Conversion failed: {err}");
        Err(err)
    }

    fn display_name(&self) -> String {
        self.tool
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| FFMPEG.to_string())
    }
}

async fn pause() -> Result<(), InvocationError> {
    tokio::task::spawn_blocking(|| {
        print!("Press Enter to continue...");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line).map(|_| ())
    })
    .await
    .map_err(|e| InvocationError::Pause(io::Error::other(e)))?
    .map_err(InvocationError::Pause)
}
