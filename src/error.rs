//! Error types for conversion operations.

/// A render option that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsError {
    /// Text size must be at least one pixel
    TextSize(u32),
    /// Font aspect must be a finite, positive ratio
    FontAspect(f64),
    /// Edge threshold must lie in 0.0..=1.0
    EdgeThreshold(f64),
    /// Rune mode name is not recognised
    UnknownRuneMode(String),
    /// Configuration text could not be parsed
    Malformed(String),
}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionsError::TextSize(value) => {
                write!(f, "text size must be greater than 0, got {}", value)
            }
            OptionsError::FontAspect(value) => {
                write!(f, "font aspect must be greater than 0, got {}", value)
            }
            OptionsError::EdgeThreshold(value) => {
                write!(f, "edge threshold must be between 0 and 1, got {}", value)
            }
            OptionsError::UnknownRuneMode(name) => write!(f, "unknown rune mode: {}", name),
            OptionsError::Malformed(reason) => write!(f, "malformed render options: {}", reason),
        }
    }
}

impl std::error::Error for OptionsError {}

/// Error type for image and animation conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Render options are missing or out of range
    InvalidOptions(OptionsError),
    /// Image or GIF bytes are corrupt or unsupported
    Decode(String),
    /// GIF stream declares no frames
    EmptyAnimation,
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::InvalidOptions(err) => write!(f, "invalid render options: {}", err),
            ConvertError::Decode(reason) => write!(f, "failed to decode image: {}", reason),
            ConvertError::EmptyAnimation => write!(f, "gif has no frames"),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::InvalidOptions(err) => Some(err),
            _ => None,
        }
    }
}

impl From<OptionsError> for ConvertError {
    fn from(err: OptionsError) -> Self {
        ConvertError::InvalidOptions(err)
    }
}

impl From<image::ImageError> for ConvertError {
    fn from(err: image::ImageError) -> Self {
        ConvertError::Decode(err.to_string())
    }
}

impl From<gif::DecodingError> for ConvertError {
    fn from(err: gif::DecodingError) -> Self {
        ConvertError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field() {
        let err = ConvertError::from(OptionsError::TextSize(0));
        assert_eq!(
            err.to_string(),
            "invalid render options: text size must be greater than 0, got 0"
        );
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;

        let err = ConvertError::InvalidOptions(OptionsError::FontAspect(-1.0));
        assert!(err.source().is_some());
        assert!(ConvertError::EmptyAnimation.source().is_none());
    }
}
