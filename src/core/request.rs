//! What the user asked for on the main form

use super::{Bitrate, OutputFormat};

/// One conversion attempt, built fresh from the form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionRequest {
    /// File to convert
    pub input_path: String,
    /// Where to write; empty means next to the input
    pub output_directory: String,
    /// New file name, optionally with an extension; empty keeps the input's name
    pub requested_filename: String,
    pub output_format: OutputFormat,
    pub bitrate: Bitrate,
    /// Downmix to a single channel
    pub mono: bool,
}

impl ConversionRequest {
    pub fn new(input_path: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Self::default()
        }
    }

    pub fn output_directory(mut self, dir: impl Into<String>) -> Self {
        self.output_directory = dir.into();
        self
    }

    pub fn requested_filename(mut self, name: impl Into<String>) -> Self {
        self.requested_filename = name.into();
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn bitrate(mut self, bitrate: Bitrate) -> Self {
        self.bitrate = bitrate;
        self
    }

    pub fn mono(mut self, mono: bool) -> Self {
        self.mono = mono;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_uses_selector_defaults() {
        let request = ConversionRequest::new("/music/a.flac");
        assert_eq!(request.input_path, "/music/a.flac");
        assert!(request.output_directory.is_empty());
        assert!(request.requested_filename.is_empty());
        assert_eq!(request.output_format, OutputFormat::Mp3);
        assert_eq!(request.bitrate, Bitrate::Default);
        assert!(!request.mono);
    }

    #[test]
    fn test_builder_sets_fields() {
        let request = ConversionRequest::new("in.wav")
            .output_directory("/out")
            .requested_filename("clip")
            .format(OutputFormat::WebM)
            .bitrate(Bitrate::K96)
            .mono(true);

        assert_eq!(request.output_directory, "/out");
        assert_eq!(request.requested_filename, "clip");
        assert_eq!(request.output_format, OutputFormat::WebM);
        assert_eq!(request.bitrate, Bitrate::K96);
        assert!(request.mono);
    }
}
