//! ffmpeg argument construction
//!
//! The invocation is always `ffmpeg -i <input> [-ac 1] [-b:a <N>k] <output>`
//! in that order. Arguments are kept as a list and handed to the process
//! spawner directly, so no shell quoting is involved.

use std::fmt;

use crate::core::{ConversionRequest, ResolvedOutputPath};
use crate::error::PathError;

/// One logical argument of the invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArg {
    Input(String),
    MonoDownmix,
    Bitrate(u32),
    Output(String),
}

impl CommandArg {
    /// Process tokens for this argument
    fn tokens(&self) -> Vec<String> {
        match self {
            Self::Input(path) => vec!["-i".to_string(), path.clone()],
            Self::MonoDownmix => vec!["-ac".to_string(), "1".to_string()],
            Self::Bitrate(kbps) => vec!["-b:a".to_string(), format!("{kbps}k")],
            Self::Output(path) => vec![path.clone()],
        }
    }
}

impl fmt::Display for CommandArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(path) => write!(f, "-i \"{path}\""),
            Self::MonoDownmix => f.write_str("-ac 1"),
            Self::Bitrate(kbps) => write!(f, "-b:a {kbps}k"),
            Self::Output(path) => write!(f, "\"{path}\""),
        }
    }
}

/// A fully built conversion, ready for the invoker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionCommand {
    output: ResolvedOutputPath,
    output_path: String,
    args: Vec<CommandArg>,
}

impl ConversionCommand {
    /// Build the command for a request
    ///
    /// Pure: nothing on disk is checked here.
    pub fn build(request: &ConversionRequest) -> Result<Self, PathError> {
        let output = ResolvedOutputPath::resolve(request)?;
        let output_path = output.to_path_string();

        if output_path == request.input_path {
            return Err(PathError::OutputIsInput(output_path));
        }

        let mut args = vec![CommandArg::Input(request.input_path.clone())];
        if request.mono {
            args.push(CommandArg::MonoDownmix);
        }
        if let Some(kbps) = request.bitrate.kbps() {
            args.push(CommandArg::Bitrate(kbps));
        }
        args.push(CommandArg::Output(output_path.clone()));

        Ok(Self {
            output,
            output_path,
            args,
        })
    }

    pub fn output(&self) -> &ResolvedOutputPath {
        &self.output
    }

    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    /// Arguments grouped per flag, e.g. `["-i", in, "-ac 1", "-b:a 192k", out]`
    pub fn arguments(&self) -> Vec<String> {
        self.args
            .iter()
            .flat_map(|arg| match arg {
                CommandArg::Input(path) => vec!["-i".to_string(), path.clone()],
                CommandArg::Output(path) => vec![path.clone()],
                flag => vec![flag.to_string()],
            })
            .collect()
    }

    /// Arguments split into individual process tokens
    pub fn argv(&self) -> Vec<String> {
        self.args.iter().flat_map(CommandArg::tokens).collect()
    }

    /// Human-readable command line, paths in double quotes
    pub fn render(&self, tool: &str) -> String {
        let mut line = tool.to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string());
        }
        line
    }
}
