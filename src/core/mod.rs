//! Conversion request model
//!
//! This module contains:
//! - Output format and bitrate selector values
//! - The per-attempt conversion request
//! - Output path resolution (directory fallback, extension precedence)

mod bitrate;
mod output_path;
mod request;

pub use bitrate::{Bitrate, OutputFormat, UnknownLabel};
pub use output_path::ResolvedOutputPath;
pub use request::ConversionRequest;
