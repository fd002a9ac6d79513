use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hueforge::cli::{Args, Command, ReportFormat};
use hueforge::color::Color;
use hueforge::contrast::{validate_against, validate_palette};
use hueforge::ingest::scan_colors;
use hueforge::pipeline::extract::load_pixels;
use hueforge::preview::write_swatches;
use hueforge::report::{render_against, render_pairs};
use hueforge::service::{GenerationRequest, Palette, PaletteService, RawRequest};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    run(&args)
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn service(seed: Option<u64>) -> PaletteService {
    seed.map_or_else(PaletteService::new, PaletteService::with_seed)
}

fn run(args: &Args) -> Result<()> {
    match &args.command {
        Command::Harmony { color, kind } => {
            let base = Color::parse_lossy(color);
            let palette = service(None).generate(GenerationRequest::Harmony {
                base,
                kind: (*kind).into(),
            });
            emit_palette(args, &palette)
        }
        Command::Image {
            image,
            colors,
            seed,
        } => {
            let pixels = load_pixels(image)?;
            let palette = service(*seed).generate(GenerationRequest::Image {
                pixels,
                k: usize::from(*colors),
            });
            if palette.is_empty() {
                warn!(image = %image.display(), "no opaque pixels found, palette is empty");
            }
            emit_palette(args, &palette)
        }
        Command::Contrast {
            colors,
            scan,
            background,
        } => {
            let format = args.format.contrast_report()?;
            let mut list: Vec<Color> = colors.iter().map(|c| Color::parse_lossy(c)).collect();
            if let Some(path) = scan {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                list.extend(scan_colors(&text));
            }
            if list.is_empty() {
                bail!("no colors to check: pass colors as arguments or use --scan");
            }
            let output = match background {
                Some(bg) => {
                    let bg = Color::parse_lossy(bg);
                    let reports = validate_against(&list, bg);
                    match format {
                        ReportFormat::Json => serde_json::to_string_pretty(&reports)? + "\n",
                        ReportFormat::Text => render_against(&list, &reports, bg),
                    }
                }
                None => {
                    let reports = validate_palette(&list);
                    match format {
                        ReportFormat::Json => serde_json::to_string_pretty(&reports)? + "\n",
                        ReportFormat::Text => render_pairs(&reports),
                    }
                }
            };
            if args.preview {
                preview(&Palette::new(list))?;
            }
            emit_text(args.output.as_deref(), &output)
        }
        Command::Request { file, seed } => {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let request: RawRequest = serde_json::from_str(&text)
                .with_context(|| format!("invalid request file: {}", file.display()))?;
            let palette = service(*seed).generate_raw(request)?;
            emit_palette(args, &palette)
        }
    }
}

fn emit_palette(args: &Args, palette: &Palette) -> Result<()> {
    if args.preview {
        preview(palette)?;
    }
    let backend = args.format.backend();
    match &args.output {
        Some(path) => {
            backend.write_to(palette, path)?;
            info!(path = %path.display(), format = backend.name(), "wrote palette");
            Ok(())
        }
        None => emit_text(None, &backend.serialize(palette)),
    }
}

fn emit_text(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write output to {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn preview(palette: &Palette) -> Result<()> {
    write_swatches(&mut io::stderr().lock(), palette).context("failed to print preview")
}
