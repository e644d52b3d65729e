//! # glyphcast-core
//!
//! Convert still images and animated GIFs into glyph art for terminal
//! display, and play the animated result back frame by frame.
//!
//! This crate provides:
//! - Per-cell brightness sampling and mapping onto character ramps
//! - Grid conversion driven by text size and font aspect settings
//! - GIF compositing that honours frame offsets, transparency and disposal
//! - A scheduler-agnostic animation player with stale-tick rejection
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for render options
//! - `toml` - Load render options from TOML text
//!
//! ## Example
//!
//! ```rust,ignore
//! use glyphcast_core::{render_bytes, AnimationPlayer, RenderOptions, RenderedAsset};
//!
//! let bytes = std::fs::read("cat.gif")?;
//! match render_bytes(&bytes, &RenderOptions::default())? {
//!     RenderedAsset::Still(grid) => println!("{grid}"),
//!     RenderedAsset::Animated(frames) => {
//!         let mut player = AnimationPlayer::new(frames, vec!["esc".into()]);
//!         let first_tick = player.start();
//!         // hand `first_tick` to the host scheduler
//!     }
//! }
//! ```

mod animation;
mod compositor;
mod error;
mod glyph;
mod grid;
mod luminance;
mod options;
pub mod render;
mod scheduler;
mod sizing;

pub use animation::{
    AnimationFrame, AnimationPlayer, AnimationState, PlayerEvent, ScheduledTick, SessionId, TickEvent,
};
pub use compositor::{composite_gif, is_gif, CompositedFrame};
pub use error::{ConvertError, OptionsError};
pub use glyph::{
    glyph_for_luminance, Ramp, ASCII_BRIGHT_TO_DARK, ASCII_DARK_TO_BRIGHT, UNICODE_BRIGHT_TO_DARK,
    UNICODE_DARK_TO_BRIGHT,
};
pub use grid::GlyphGrid;
pub use luminance::{apply_contrast, relative_luminance, sample_luminance};
pub use options::{RenderOptions, RuneMode};
pub use render::{render_bytes, render_gif_bytes, render_image, render_still_bytes, RenderedAsset};
pub use scheduler::TickScheduler;
pub use sizing::{grid_dimensions, CellLayout, CellRect};
