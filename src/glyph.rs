//! Brightness to glyph mapping.

/// ASCII ramp, darkest glyph first.
pub const ASCII_DARK_TO_BRIGHT: &str =
    "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/\\|()1{}[]?-_+~<>i!lI;:,^`. ";

/// ASCII ramp, brightest glyph first.
pub const ASCII_BRIGHT_TO_DARK: &str =
    " .`^,:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Unicode ramp, darkest glyph first.
pub const UNICODE_DARK_TO_BRIGHT: &str = "█▉▊▋▌▍▎▏▓▒░■□@&%$#*+=-~:;!,\".^`' ";

/// Unicode ramp, brightest glyph first.
pub const UNICODE_BRIGHT_TO_DARK: &str = " '`^.\",!;:~-=+*#$%&@□■░▒▓▏▎▍▌▋▊▉█";

/// An ordered, never empty run of glyphs used to quantise brightness.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ramp {
    glyphs: Vec<char>,
}

#[allow(clippy::len_without_is_empty)]
impl Ramp {
    /// Build a ramp from the characters of `s`.
    ///
    /// Returns None for an empty string.
    pub fn new(s: &str) -> Option<Self> {
        let glyphs: Vec<char> = s.chars().collect();
        if glyphs.is_empty() {
            None
        } else {
            Some(Self { glyphs })
        }
    }

    /// One of the four built-in ramps.
    pub fn builtin(unicode: bool, reverse: bool) -> Self {
        let source = match (unicode, reverse) {
            (false, false) => ASCII_DARK_TO_BRIGHT,
            (false, true) => ASCII_BRIGHT_TO_DARK,
            (true, false) => UNICODE_DARK_TO_BRIGHT,
            (true, true) => UNICODE_BRIGHT_TO_DARK,
        };
        Self {
            glyphs: source.chars().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Ramp position for a brightness in 0.0..=1.0.
    ///
    /// 0.0 selects the first glyph and 1.0 the last; values in between are
    /// truncated, not rounded.
    #[inline]
    pub fn index_for(&self, luminance: f64) -> usize {
        let last = self.glyphs.len().saturating_sub(1);
        ((luminance.clamp(0.0, 1.0) * last as f64) as usize).min(last)
    }

    #[inline]
    pub fn glyph_for(&self, luminance: f64) -> char {
        self.glyphs[self.index_for(luminance)]
    }
}

/// Glyph for a brightness using one of the built-in ramps.
///
/// ## Example
///
/// ```rust
/// use glyphcast_core::glyph_for_luminance;
///
/// assert_eq!(glyph_for_luminance(0.0, false, false), '$');
/// assert_eq!(glyph_for_luminance(1.0, false, false), ' ');
/// assert_eq!(glyph_for_luminance(0.0, true, true), ' ');
/// assert_eq!(glyph_for_luminance(1.0, true, true), '█');
/// ```
pub fn glyph_for_luminance(luminance: f64, unicode: bool, reverse: bool) -> char {
    let ramp = Ramp::builtin(unicode, reverse);
    let glyph = ramp.glyph_for(luminance);
    log::trace!(
        "brightness: {:.2} | character: {} | character index: {}",
        luminance,
        glyph,
        ramp.index_for(luminance)
    );
    glyph
}
