use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::color::Color;
use crate::error::{PaletteError, Result};
use crate::harmony::{self, HarmonyKind};
use crate::pipeline::cluster::{PixelClusterer, DEFAULT_K, MAX_K, MIN_K};
use crate::pipeline::sample::PixelBuffer;

/// An ordered list of colors. Index order carries meaning for consumers and is
/// preserved from generation through export.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Palette {
    pub colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn hex_codes(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }
}

impl From<Vec<Color>> for Palette {
    fn from(colors: Vec<Color>) -> Self {
        Self { colors }
    }
}

/// A palette generation request.
#[derive(Debug, Clone)]
pub enum GenerationRequest {
    /// Derive colors from a seed via a hue rule.
    Harmony { base: Color, kind: HarmonyKind },
    /// Cluster an image into `k` colors. `k` is expected in 2..=10; the caller
    /// enforces that range.
    Image { pixels: PixelBuffer, k: usize },
}

/// Loosely typed request as received from JSON collaborators.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRequest {
    pub kind: String,
    pub base_color: Option<String>,
    pub harmony_kind: Option<String>,
    pub pixels: Option<PixelBuffer>,
    #[serde(alias = "colorCount")]
    pub k: Option<usize>,
}

/// Entry point that routes requests to harmony generation or clustering.
///
/// Owns the random source used for k-means++ seeding so runs can be made
/// reproducible with [`PaletteService::with_seed`].
#[derive(Debug)]
pub struct PaletteService<R = StdRng> {
    clusterer: PixelClusterer,
    rng: R,
}

impl PaletteService<StdRng> {
    /// Service seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for PaletteService<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PaletteService<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            clusterer: PixelClusterer::default(),
            rng,
        }
    }

    #[must_use]
    pub fn with_clusterer(mut self, clusterer: PixelClusterer) -> Self {
        self.clusterer = clusterer;
        self
    }

    pub fn clusterer(&self) -> &PixelClusterer {
        &self.clusterer
    }

    pub fn generate(&mut self, request: GenerationRequest) -> Palette {
        match request {
            GenerationRequest::Harmony { base, kind } => {
                debug!(base = %base, %kind, "generating harmony palette");
                harmony::generate(base, kind).into()
            }
            GenerationRequest::Image { pixels, k } => {
                debug!(
                    width = pixels.width(),
                    height = pixels.height(),
                    k,
                    "extracting palette from image"
                );
                let colors = self.clusterer.generate(&pixels, k, &mut self.rng);
                info!(colors = colors.len(), "extracted image palette");
                colors.into()
            }
        }
    }

    /// Handle a loosely typed request.
    ///
    /// Missing or blank fields for the named kind fail with `InvalidRequest`,
    /// as does a color count outside `MIN_K..=MAX_K` (0 or absent means
    /// [`DEFAULT_K`]). An unknown request kind yields an empty palette; an
    /// unknown harmony name yields the base color alone.
    pub fn generate_raw(&mut self, request: RawRequest) -> Result<Palette> {
        match request.kind.as_str() {
            "harmony" => {
                let base = request.base_color.filter(|s| !s.trim().is_empty());
                let kind = request.harmony_kind.filter(|s| !s.trim().is_empty());
                let (Some(base), Some(kind)) = (base, kind) else {
                    return Err(PaletteError::invalid_request(
                        "base color and harmony kind required for harmony generation",
                    ));
                };
                let base = Color::parse_lossy(&base);
                Ok(harmony::generate_named(base, &kind).into())
            }
            "image" => {
                let Some(pixels) = request.pixels else {
                    return Err(PaletteError::invalid_request(
                        "pixel data required for image generation",
                    ));
                };
                let k = match request.k {
                    None | Some(0) => DEFAULT_K,
                    Some(k) => k,
                };
                if !(MIN_K..=MAX_K).contains(&k) {
                    return Err(PaletteError::invalid_request(format!(
                        "color count {k} outside {MIN_K}..={MAX_K}"
                    )));
                }
                Ok(self.generate(GenerationRequest::Image { pixels, k }))
            }
            other => {
                debug!(kind = other, "unknown request kind, returning empty palette");
                Ok(Palette::default())
            }
        }
    }
}
