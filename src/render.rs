//! Image to glyph grid conversion.

use image::{GenericImageView, Pixel};

use crate::animation::AnimationFrame;
use crate::compositor::{composite_gif, is_gif};
use crate::error::ConvertError;
use crate::glyph::Ramp;
use crate::grid::GlyphGrid;
use crate::luminance::sample_luminance;
use crate::options::RenderOptions;
use crate::sizing::{grid_dimensions, CellLayout};

/// Result of converting an asset: a single grid or an animation.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderedAsset {
    /// Still image
    Still(GlyphGrid),
    /// Pre-rendered animation frames, in playback order
    Animated(Vec<AnimationFrame>),
}

impl RenderedAsset {
    /// Text of the first (or only) frame.
    pub fn first_text(&self) -> String {
        match self {
            RenderedAsset::Still(grid) => grid.to_text(),
            RenderedAsset::Animated(frames) => frames
                .first()
                .map(|frame| frame.text.clone())
                .unwrap_or_default(),
        }
    }

    #[inline]
    pub fn is_animated(&self) -> bool {
        matches!(self, RenderedAsset::Animated(_))
    }
}

/// Convert an image into a glyph grid.
///
/// The image is divided into `text_size` x `text_size * font_aspect` pixel
/// cells; each cell is sampled for brightness and mapped to a glyph.
/// `directional_render` and `edge_threshold` are accepted but do not
/// affect the output.
///
/// ## Example
///
/// ```rust
/// use glyphcast_core::{render_image, RenderOptions};
/// use image::{Luma, GrayImage};
///
/// let img = GrayImage::from_pixel(100, 50, Luma([255]));
/// let options = RenderOptions {
///     text_size: 10,
///     font_aspect: 2.0,
///     reverse_chars: false,
///     high_contrast: false,
///     ..Default::default()
/// };
///
/// let grid = render_image(&img, &options).unwrap();
/// assert_eq!(grid.dimensions(), (10, 3));
/// assert_eq!(grid.char_at(0, 0), Some(' '));
/// ```
pub fn render_image<I>(img: &I, options: &RenderOptions) -> Result<GlyphGrid, ConvertError>
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    options.validate()?;

    let (img_width, img_height) = img.dimensions();
    let (char_width, char_height) = options.cell_size();
    let (cols, rows) = grid_dimensions(img_width, img_height, char_width, char_height);
    let layout = CellLayout::new(img_width, img_height, cols, rows);

    let ramp = Ramp::builtin(options.rune_mode.is_unicode(), options.reverse_chars);

    log::debug!(
        "converting {}x{} image into {}x{} grid (cell {}x{}, {} glyph ramp)",
        img_width,
        img_height,
        cols,
        rows,
        layout.cell_width,
        layout.cell_height,
        ramp.len()
    );
    let mut grid = GlyphGrid::filled(cols as usize, rows as usize, ' ');

    for row in 0..rows {
        for col in 0..cols {
            let luma = sample_luminance(img, layout.cell(row, col), options.high_contrast);
            let glyph = ramp.glyph_for(luma);
            log::trace!("cell ({}, {}) brightness {:.2} -> {:?}", row, col, luma, glyph);
            grid.set(row as usize, col as usize, glyph);
        }
    }

    Ok(grid)
}

/// Decode still image bytes and convert them.
pub fn render_still_bytes(bytes: &[u8], options: &RenderOptions) -> Result<GlyphGrid, ConvertError> {
    options.validate()?;
    let format = image::guess_format(bytes)?;
    let img = image::load_from_memory_with_format(bytes, format)?;
    log::info!(
        "loaded {:?} image {}x{}",
        format,
        img.width(),
        img.height()
    );
    let grid = render_image(&img, options)?;
    log::info!("finished image conversion");
    Ok(grid)
}

/// Composite a GIF and convert every frame.
///
/// Frame durations come from the GIF delays (hundredths of a second).
pub fn render_gif_bytes(bytes: &[u8], options: &RenderOptions) -> Result<Vec<AnimationFrame>, ConvertError> {
    options.validate()?;
    let frames = composite_gif(bytes)?;
    let mut animation = Vec::with_capacity(frames.len());
    for frame in &frames {
        let grid = render_image(&frame.image, options)?;
        animation.push(AnimationFrame::from_composited(grid.to_text(), frame));
    }
    log::info!("finished gif conversion ({} frames)", animation.len());
    Ok(animation)
}

/// Convert raw asset bytes, choosing the GIF path when the bytes are a GIF.
///
/// GIFs always go through compositing, so a single-frame GIF yields a
/// one-frame animation.
pub fn render_bytes(bytes: &[u8], options: &RenderOptions) -> Result<RenderedAsset, ConvertError> {
    if is_gif(bytes) {
        render_gif_bytes(bytes, options).map(RenderedAsset::Animated)
    } else {
        render_still_bytes(bytes, options).map(RenderedAsset::Still)
    }
}
