//! Palette generation: seed-color harmonies, k-means extraction from pixel
//! buffers, and WCAG contrast checks, all over an Oklch [`color::Color`].

pub mod backends;
pub mod cli;
pub mod color;
pub mod contrast;
pub mod error;
pub mod harmony;
pub mod ingest;
pub mod parse;
pub mod pipeline;
pub mod preview;
pub mod report;
pub mod service;

pub use color::Color;
pub use error::PaletteError;
pub use service::{GenerationRequest, Palette, PaletteService, RawRequest};
