//! Animated GIF decoding into fully composited frames.
//!
//! GIF frames are patches drawn onto a shared logical canvas. Each patch
//! carries a disposal method telling the player what to do with the canvas
//! once the frame has been shown. This module replays that model and emits
//! an owned copy of the canvas after every frame.

use std::io::Cursor;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use gif::DisposalMethod;
use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::ConvertError;

/// Fully transparent black, used when the background color is unknown.
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// One full-canvas image after applying a frame and all prior disposal.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositedFrame {
    /// Owned canvas snapshot, logical-screen sized
    pub image: RgbaImage,
    /// Display time in hundredths of a second
    pub delay: u16,
}

impl CompositedFrame {
    /// Display time as a `Duration`.
    #[inline]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.delay) * 10)
    }
}

/// Check whether the bytes start with a GIF signature.
pub fn is_gif(bytes: &[u8]) -> bool {
    matches!(image::guess_format(bytes), Ok(ImageFormat::Gif))
}

/// Decode an animated GIF into composited frames.
///
/// Frames come back in stream order, one per GIF frame, each sized to the
/// logical screen. Any decoding fault, including a panic inside the
/// decoder, is reported as [`ConvertError::Decode`] and no frames are
/// returned.
///
/// ## Example
///
/// ```rust,ignore
/// let bytes = std::fs::read("spinner.gif")?;
/// let frames = glyphcast_core::composite_gif(&bytes)?;
/// for frame in &frames {
///     println!("{}x{} for {:?}", frame.image.width(), frame.image.height(), frame.duration());
/// }
/// ```
pub fn composite_gif(bytes: &[u8]) -> Result<Vec<CompositedFrame>, ConvertError> {
    match panic::catch_unwind(AssertUnwindSafe(|| decode_frames(bytes))) {
        Ok(result) => result,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            log::warn!("gif decoder panicked: {}", reason);
            Err(ConvertError::Decode(format!("panic while decoding gif: {}", reason)))
        }
    }
}

fn decode_frames(bytes: &[u8]) -> Result<Vec<CompositedFrame>, ConvertError> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = options.read_info(Cursor::new(bytes))?;

    let width = u32::from(decoder.width());
    let height = u32::from(decoder.height());
    let global_palette = decoder.global_palette().map(<[u8]>::to_vec);
    let bg_index = decoder.bg_color();

    log::debug!("gif logical screen {}x{}", width, height);

    let mut canvas: Option<Canvas> = None;
    let mut frames = Vec::new();

    while let Some(frame) = decoder.read_next_frame()? {
        let palette = frame
            .palette
            .as_deref()
            .or(global_palette.as_deref())
            .unwrap_or(&[]);

        let working = canvas.get_or_insert_with(|| {
            let background = bg_index
                .and_then(|index| palette_color(palette, index, frame.transparent))
                .unwrap_or(TRANSPARENT);
            Canvas::new(width, height, background)
        });

        frames.push(working.step(frame, palette));
    }

    finish(frames)
}

fn finish(frames: Vec<CompositedFrame>) -> Result<Vec<CompositedFrame>, ConvertError> {
    if frames.is_empty() {
        return Err(ConvertError::EmptyAnimation);
    }
    log::info!("composited {} gif frames", frames.len());
    Ok(frames)
}

/// Working canvas shared across frames.
struct Canvas {
    pixels: RgbaImage,
    background: Rgba<u8>,
}

impl Canvas {
    fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, background),
            background,
        }
    }

    /// Draw one frame, snapshot the result, then apply its disposal.
    fn step(&mut self, frame: &gif::Frame<'_>, palette: &[u8]) -> CompositedFrame {
        let saved = match frame.dispose {
            DisposalMethod::Previous => Some(self.pixels.clone()),
            _ => None,
        };

        self.draw_patch(frame, palette);

        let emitted = CompositedFrame {
            image: self.pixels.clone(),
            delay: frame.delay,
        };

        log::debug!(
            "frame at ({}, {}) {}x{} dispose {:?}",
            frame.left,
            frame.top,
            frame.width,
            frame.height,
            frame.dispose
        );

        match frame.dispose {
            DisposalMethod::Background => self.clear_patch(frame),
            DisposalMethod::Previous => {
                if let Some(saved) = saved {
                    self.pixels = saved;
                }
            }
            DisposalMethod::Any | DisposalMethod::Keep => {}
        }

        emitted
    }

    fn draw_patch(&mut self, frame: &gif::Frame<'_>, palette: &[u8]) {
        let patch_width = usize::from(frame.width);
        for (i, &index) in frame.buffer.iter().enumerate() {
            let Some((x, y)) = self.canvas_position(frame, i % patch_width, i / patch_width) else {
                continue;
            };
            let Some(src) = palette_color(palette, usize::from(index), frame.transparent) else {
                continue;
            };
            let dst = self.pixels.get_pixel_mut(x, y);
            *dst = blend_over(src, *dst);
        }
    }

    fn clear_patch(&mut self, frame: &gif::Frame<'_>) {
        let x0 = u32::from(frame.left).min(self.pixels.width());
        let y0 = u32::from(frame.top).min(self.pixels.height());
        let x1 = (u32::from(frame.left) + u32::from(frame.width)).min(self.pixels.width());
        let y1 = (u32::from(frame.top) + u32::from(frame.height)).min(self.pixels.height());
        for y in y0..y1 {
            for x in x0..x1 {
                self.pixels.put_pixel(x, y, self.background);
            }
        }
    }

    fn canvas_position(&self, frame: &gif::Frame<'_>, px: usize, py: usize) -> Option<(u32, u32)> {
        if px >= usize::from(frame.width) || py >= usize::from(frame.height) {
            return None;
        }
        let x = u32::from(frame.left) + px as u32;
        let y = u32::from(frame.top) + py as u32;
        (x < self.pixels.width() && y < self.pixels.height()).then_some((x, y))
    }
}

/// Color of a palette entry; the transparent index maps to [`TRANSPARENT`].
///
/// Returns None when the index is outside the palette.
fn palette_color(palette: &[u8], index: usize, transparent: Option<u8>) -> Option<Rgba<u8>> {
    let rgb = palette.get(index * 3..index * 3 + 3)?;
    if transparent.map(usize::from) == Some(index) {
        return Some(TRANSPARENT);
    }
    Some(Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

/// Porter-Duff source-over for straight (non-premultiplied) alpha.
fn blend_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    match src[3] {
        0 => dst,
        255 => src,
        src_alpha => {
            let sa = u32::from(src_alpha);
            let da = u32::from(dst[3]) * (255 - sa) / 255;
            let out_alpha = sa + da;
            let channel = |s: u8, d: u8| -> u8 {
                ((u32::from(s) * sa + u32::from(d) * da) / out_alpha) as u8
            };
            Rgba([
                channel(src[0], dst[0]),
                channel(src[1], dst[1]),
                channel(src[2], dst[2]),
                out_alpha as u8,
            ])
        }
    }
}
