use camino::{Utf8Path, Utf8PathBuf};
use miette::{Context, IntoDiagnostic, Result, miette};
use rayon::prelude::*;
use std::fs;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vecpaint::surface::Rgba;
use vecpaint::{PixmapSurface, SceneDocument};

const DEFAULT_SIZE: (u32, u32) = (800, 600);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "render" => render_command(&args[2..]),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            usage();
            std::process::exit(1);
        }
    }
}

fn usage() {
    eprintln!("Usage: cargo xtask <command>");
    eprintln!("Commands:");
    eprintln!("  render <scene-dir> <out-dir> [--size WxH]   Render every scene file to PNG");
}

fn render_command(args: &[String]) -> Result<()> {
    let mut positional = Vec::new();
    let mut size = DEFAULT_SIZE;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--size" {
            let value = iter
                .next()
                .ok_or_else(|| miette!("--size needs a value like 800x600"))?;
            size = parse_size(value)?;
        } else {
            positional.push(Utf8PathBuf::from(arg));
        }
    }
    let [scene_dir, out_dir] = positional.as_slice() else {
        usage();
        return Err(miette!("expected <scene-dir> and <out-dir>"));
    };

    fs::create_dir_all(out_dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("creating {out_dir}"))?;

    let mut scenes: Vec<Utf8PathBuf> = scene_dir
        .read_dir_utf8()
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {scene_dir}"))?
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.extension() == Some("json"))
        .collect();
    scenes.sort();

    info!(count = scenes.len(), %scene_dir, "rendering scenes");

    let failures: Vec<_> = scenes
        .par_iter()
        .filter_map(|scene| {
            render_scene(scene, out_dir, size)
                .err()
                .map(|e| (scene.clone(), e))
        })
        .collect();

    for (scene, err) in &failures {
        eprintln!("{scene}: {err:?}");
    }
    if !failures.is_empty() {
        return Err(miette!(
            "{} of {} scenes failed to render",
            failures.len(),
            scenes.len()
        ));
    }
    Ok(())
}

fn parse_size(value: &str) -> Result<(u32, u32)> {
    let (w, h) = value
        .split_once('x')
        .ok_or_else(|| miette!("size must look like 800x600, got {value:?}"))?;
    let w = w.parse::<u32>().into_diagnostic().wrap_err("width")?;
    let h = h.parse::<u32>().into_diagnostic().wrap_err("height")?;
    Ok((w, h))
}

fn render_scene(scene: &Utf8Path, out_dir: &Utf8Path, (width, height): (u32, u32)) -> Result<()> {
    let text = fs::read_to_string(scene)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {scene}"))?;

    let mut doc = SceneDocument::new();
    let report = doc.import_json(scene.as_str(), &text)?;
    if report.skipped > 0 {
        warn!(%scene, skipped = report.skipped, "some records were not recognized");
    }

    let mut surface = PixmapSurface::new(width, height)?.with_background(Rgba::WHITE);
    doc.render(&mut surface);
    let png = surface.encode_png()?;

    let stem = scene.file_stem().unwrap_or("scene");
    let out = out_dir.join(format!("{stem}.png"));
    fs::write(&out, png)
        .into_diagnostic()
        .wrap_err_with(|| format!("writing {out}"))?;
    info!(%scene, %out, shapes = report.loaded, "rendered");
    Ok(())
}
