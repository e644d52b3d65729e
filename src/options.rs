//! Render options shared by every conversion call.

use std::str::FromStr;

use crate::error::OptionsError;

/// Character set used to draw the glyph grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum RuneMode {
    /// Printable ASCII ramp
    #[default]
    Ascii,
    /// Block and shade ramp
    Unicode,
    Dots,
    Rectangles,
    Bars,
    Loading,
}

impl RuneMode {
    /// All modes in settings-panel order.
    pub const ALL: [RuneMode; 6] = [
        RuneMode::Ascii,
        RuneMode::Unicode,
        RuneMode::Dots,
        RuneMode::Rectangles,
        RuneMode::Bars,
        RuneMode::Loading,
    ];

    /// Whether this mode draws from the Unicode ramps.
    #[inline]
    pub fn is_unicode(self) -> bool {
        self != RuneMode::Ascii
    }

    pub fn name(self) -> &'static str {
        match self {
            RuneMode::Ascii => "ASCII",
            RuneMode::Unicode => "UNICODE",
            RuneMode::Dots => "DOTS",
            RuneMode::Rectangles => "RECTANGLES",
            RuneMode::Bars => "BARS",
            RuneMode::Loading => "LOADING",
        }
    }
}

impl std::fmt::Display for RuneMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuneMode {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        RuneMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| OptionsError::UnknownRuneMode(trimmed.to_string()))
    }
}

/// Settings for converting one image into a glyph grid.
///
/// A glyph cell covers `text_size` source pixels horizontally and
/// `text_size * font_aspect` pixels vertically.
///
/// ## Example
///
/// ```rust
/// use glyphcast_core::{RenderOptions, RuneMode};
///
/// let options = RenderOptions {
///     text_size: 8,
///     rune_mode: RuneMode::Unicode,
///     ..Default::default()
/// };
/// assert!(options.validate().is_ok());
/// assert_eq!(options.cell_size(), (8, 18));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Glyph cell width in source pixels
    pub text_size: u32,
    /// Glyph cell height as a multiple of `text_size`
    pub font_aspect: f64,
    /// Reserved for edge-aware rendering; currently has no effect
    pub directional_render: bool,
    /// Reserved for edge-aware rendering; currently has no effect
    pub edge_threshold: f64,
    /// Use the bright-to-dark ramp instead of dark-to-bright
    pub reverse_chars: bool,
    /// Stretch cell brightness around the midpoint
    pub high_contrast: bool,
    pub rune_mode: RuneMode,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            text_size: 10,
            font_aspect: 2.3,
            directional_render: false,
            edge_threshold: 0.6,
            reverse_chars: true,
            high_contrast: true,
            rune_mode: RuneMode::Ascii,
        }
    }
}

impl RenderOptions {
    /// Build a validated set of options.
    pub fn new(
        text_size: u32,
        font_aspect: f64,
        directional_render: bool,
        edge_threshold: f64,
        reverse_chars: bool,
        high_contrast: bool,
        rune_mode: RuneMode,
    ) -> Result<Self, OptionsError> {
        let options = Self {
            text_size,
            font_aspect,
            directional_render,
            edge_threshold,
            reverse_chars,
            high_contrast,
            rune_mode,
        };
        options.validate()?;
        Ok(options)
    }

    /// Check that every field is in range.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.text_size == 0 {
            return Err(OptionsError::TextSize(self.text_size));
        }
        if !self.font_aspect.is_finite() || self.font_aspect <= 0.0 {
            return Err(OptionsError::FontAspect(self.font_aspect));
        }
        if !(0.0..=1.0).contains(&self.edge_threshold) {
            return Err(OptionsError::EdgeThreshold(self.edge_threshold));
        }
        Ok(())
    }

    /// Glyph cell size in source pixels as (width, height).
    ///
    /// The height is truncated toward zero and never drops below one pixel.
    pub fn cell_size(&self) -> (u32, u32) {
        let width = self.text_size.max(1);
        let height = (f64::from(self.text_size) * self.font_aspect) as u32;
        (width, height.max(1))
    }

    /// Parse options from TOML text and validate them.
    ///
    /// Keys that are absent keep their default value.
    ///
    /// ```toml
    /// text_size = 6
    /// font_aspect = 2.0
    /// rune_mode = "UNICODE"
    /// ```
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, OptionsError> {
        let options: Self =
            toml::from_str(s).map_err(|err| OptionsError::Malformed(err.to_string()))?;
        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = RenderOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.text_size, 10);
        assert!(options.reverse_chars);
        assert!(options.high_contrast);
        assert_eq!(options.rune_mode, RuneMode::Ascii);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        let err = RenderOptions::new(0, 2.0, false, 0.5, false, false, RuneMode::Ascii);
        assert_eq!(err, Err(OptionsError::TextSize(0)));

        let err = RenderOptions::new(8, 0.0, false, 0.5, false, false, RuneMode::Ascii);
        assert_eq!(err, Err(OptionsError::FontAspect(0.0)));

        let err = RenderOptions::new(8, f64::NAN, false, 0.5, false, false, RuneMode::Ascii);
        assert!(matches!(err, Err(OptionsError::FontAspect(_))));

        let err = RenderOptions::new(8, 2.0, false, 1.5, false, false, RuneMode::Ascii);
        assert_eq!(err, Err(OptionsError::EdgeThreshold(1.5)));
    }

    #[test]
    fn test_cell_size() {
        let options = RenderOptions {
            text_size: 10,
            font_aspect: 2.0,
            ..Default::default()
        };
        assert_eq!(options.cell_size(), (10, 20));

        let options = RenderOptions {
            text_size: 3,
            font_aspect: 0.1,
            ..Default::default()
        };
        assert_eq!(options.cell_size(), (3, 1));
    }

    #[test]
    fn test_rune_mode_parse() {
        assert_eq!("ascii".parse::<RuneMode>(), Ok(RuneMode::Ascii));
        assert_eq!(" BARS ".parse::<RuneMode>(), Ok(RuneMode::Bars));
        assert_eq!("Loading".parse::<RuneMode>(), Ok(RuneMode::Loading));
        assert_eq!(
            "braille".parse::<RuneMode>(),
            Err(OptionsError::UnknownRuneMode("braille".into()))
        );
    }

    #[test]
    fn test_rune_mode_display_round_trips() {
        for mode in RuneMode::ALL {
            assert_eq!(mode.to_string().parse::<RuneMode>(), Ok(mode));
        }
        assert!(!RuneMode::Ascii.is_unicode());
        assert!(RuneMode::Dots.is_unicode());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_str() {
        let options = RenderOptions::from_toml_str(
            "text_size = 6\nfont_aspect = 2.0\nrune_mode = \"UNICODE\"\n",
        )
        .unwrap();
        assert_eq!(options.text_size, 6);
        assert_eq!(options.rune_mode, RuneMode::Unicode);
        assert!(options.high_contrast);

        let err = RenderOptions::from_toml_str("text_size = 0").unwrap_err();
        assert_eq!(err, OptionsError::TextSize(0));

        let err = RenderOptions::from_toml_str("text_size = \"big\"").unwrap_err();
        assert!(matches!(err, OptionsError::Malformed(_)));
    }
}
