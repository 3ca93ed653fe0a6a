//! Output file naming
//!
//! Paths are handled as plain strings so that both `/` and `\` act as
//! separators regardless of the host platform; the form fields carry
//! whatever the user typed or the file dialog returned.

use super::ConversionRequest;
use crate::error::PathError;

/// Where the converted file goes, split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputPath {
    pub directory: String,
    pub base_name: String,
    /// Without the leading dot
    pub extension: String,
}

impl ResolvedOutputPath {
    /// Work out the output location for a request
    ///
    /// Directory: `output_directory`, or the input's directory when empty.
    ///
    /// Name and extension, first match wins:
    /// 1. no requested name: the input's name with its extension trimmed,
    ///    plus the format's extension
    /// 2. requested name with a real extension: that name and extension
    ///    as typed, overriding the format
    /// 3. requested name without one: the name plus the format's extension
    ///
    /// In case 1 the trim removes any of the extension's characters from
    /// both ends of the name, not just the suffix, so `"calm.flac"` becomes
    /// `"m"`. This matches how earlier releases named files.
    pub fn resolve(request: &ConversionRequest) -> Result<Self, PathError> {
        let input = request.input_path.as_str();
        if input.trim().is_empty() {
            return Err(PathError::EmptyInputPath);
        }

        let (input_dir, input_name) = split_dir(input);
        if input_name.is_empty() {
            return Err(PathError::MissingFileName(input.to_string()));
        }

        let directory = if request.output_directory.is_empty() {
            input_dir.to_string()
        } else {
            request.output_directory.clone()
        };

        let requested = request.requested_filename.as_str();
        let (base_name, extension) = if requested.is_empty() {
            let (_, input_ext) = split_ext(input_name);
            let base = trim_chars(input_name, input_ext);
            (base.to_string(), request.output_format.extension())
        } else {
            match split_ext(requested) {
                (stem, ext) if !ext.is_empty() && ext != "." => {
                    (stem.to_string(), ext[1..].to_string())
                }
                _ => (requested.to_string(), request.output_format.extension()),
            }
        };

        if base_name.is_empty() {
            return Err(PathError::EmptyOutputName(input.to_string()));
        }

        Ok(Self {
            directory,
            base_name,
            extension,
        })
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.base_name, self.extension)
    }

    /// Directory and file name joined into one path
    pub fn to_path_string(&self) -> String {
        join_path(&self.directory, &self.file_name())
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Split into directory and final component
///
/// Trailing separators are dropped from the directory unless it is the root.
pub fn split_dir(path: &str) -> (&str, &str) {
    match path.rfind(is_separator) {
        Some(idx) => {
            let head = &path[..idx];
            let trimmed = head.trim_end_matches(is_separator);
            let dir = if trimmed.is_empty() { &path[..=idx] } else { trimmed };
            (dir, &path[idx + 1..])
        }
        None => ("", path),
    }
}

/// Split off the extension of the final component, dot included
///
/// Leading dots of a name do not start an extension, so `".bashrc"` has
/// none while `"clip."` has `"."`.
pub fn split_ext(path: &str) -> (&str, &str) {
    let name_start = path.rfind(is_separator).map_or(0, |idx| idx + 1);
    let name = &path[name_start..];

    match name.rfind('.') {
        Some(dot) if name[..dot].chars().any(|c| c != '.') => {
            let at = name_start + dot;
            (&path[..at], &path[at..])
        }
        _ => (path, ""),
    }
}

/// Trim every character found in `chars` from both ends of `name`
fn trim_chars<'a>(name: &'a str, chars: &str) -> &'a str {
    if chars.is_empty() {
        return name;
    }
    name.trim_matches(|c: char| chars.contains(c))
}

/// Join using the separator the directory already uses
pub fn join_path(directory: &str, file_name: &str) -> String {
    if directory.is_empty() {
        return file_name.to_string();
    }
    if directory.ends_with(is_separator) {
        return format!("{directory}{file_name}");
    }

    let separator = directory
        .rfind(is_separator)
        .and_then(|idx| directory[idx..].chars().next())
        .unwrap_or(std::path::MAIN_SEPARATOR);

    format!("{directory}{separator}{file_name}")
}
