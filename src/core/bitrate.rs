//! Output format and bitrate choices
//!
//! Both mirror the selector widgets: each variant has a display label,
//! and labels parse back case-insensitively.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A selector label that matches no variant
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownLabel {
    kind: &'static str,
    value: String,
    expected: String,
}

impl UnknownLabel {
    pub(crate) fn new(
        kind: &'static str,
        value: &str,
        labels: impl Iterator<Item = &'static str>,
    ) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: labels.collect::<Vec<_>>().join(", "),
        }
    }
}

/// Container the converter should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Mp3,
    Mp4,
    Wav,
    WebM,
}

impl OutputFormat {
    /// Selector order
    pub const ALL: [OutputFormat; 4] = [Self::Mp3, Self::Mp4, Self::Wav, Self::WebM];

    pub fn label(self) -> &'static str {
        match self {
            Self::Mp3 => "MP3",
            Self::Mp4 => "MP4",
            Self::Wav => "WAV",
            Self::WebM => "WebM",
        }
    }

    /// File extension, the lower-cased label
    pub fn extension(self) -> String {
        self.label().to_lowercase()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|format| format.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                UnknownLabel::new("format", s, Self::ALL.iter().map(|f| f.label()))
            })
    }
}

/// Target audio bitrate
///
/// `Default` leaves the choice to ffmpeg and adds no flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bitrate {
    #[default]
    Default,
    K320,
    K256,
    K192,
    K128,
    K96,
}

impl Bitrate {
    /// Selector order
    pub const ALL: [Bitrate; 6] = [
        Self::Default,
        Self::K320,
        Self::K256,
        Self::K192,
        Self::K128,
        Self::K96,
    ];

    /// Rate in kbps, `None` for `Default`
    pub fn kbps(self) -> Option<u32> {
        match self {
            Self::Default => None,
            Self::K320 => Some(320),
            Self::K256 => Some(256),
            Self::K192 => Some(192),
            Self::K128 => Some(128),
            Self::K96 => Some(96),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::K320 => "320",
            Self::K256 => "256",
            Self::K192 => "192",
            Self::K128 => "128",
            Self::K96 => "96",
        }
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Bitrate {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_suffix(['k', 'K']).unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|bitrate| bitrate.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                UnknownLabel::new("bitrate", s, Self::ALL.iter().map(|b| b.label()))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_extension_is_lowercase_label() {
        assert_eq!(OutputFormat::Mp3.extension(), "mp3");
        assert_eq!(OutputFormat::Mp4.extension(), "mp4");
        assert_eq!(OutputFormat::Wav.extension(), "wav");
        assert_eq!(OutputFormat::WebM.extension(), "webm");
    }

    #[test]
    fn test_format_parses_case_insensitively() {
        assert_eq!("webm".parse::<OutputFormat>().unwrap(), OutputFormat::WebM);
        assert_eq!("WebM".parse::<OutputFormat>().unwrap(), OutputFormat::WebM);
        assert_eq!(" mp3 ".parse::<OutputFormat>().unwrap(), OutputFormat::Mp3);
        assert!("ogg".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_unknown_format_lists_choices() {
        let err = "flac".parse::<OutputFormat>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown format 'flac' (expected one of: MP3, MP4, WAV, WebM)"
        );
    }

    #[test]
    fn test_bitrate_kbps() {
        assert_eq!(Bitrate::Default.kbps(), None);
        assert_eq!(Bitrate::K320.kbps(), Some(320));
        assert_eq!(Bitrate::K96.kbps(), Some(96));
    }

    #[test]
    fn test_bitrate_parses_labels() {
        assert_eq!("Default".parse::<Bitrate>().unwrap(), Bitrate::Default);
        assert_eq!("default".parse::<Bitrate>().unwrap(), Bitrate::Default);
        assert_eq!("192".parse::<Bitrate>().unwrap(), Bitrate::K192);
        assert_eq!("128k".parse::<Bitrate>().unwrap(), Bitrate::K128);
        assert!("64".parse::<Bitrate>().is_err());
    }

    #[test]
    fn test_every_label_round_trips() {
        for format in OutputFormat::ALL {
            assert_eq!(format.label().parse::<OutputFormat>().unwrap(), format);
        }
        for bitrate in Bitrate::ALL {
            assert_eq!(bitrate.label().parse::<Bitrate>().unwrap(), bitrate);
        }
    }
}
