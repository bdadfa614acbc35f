//! structnav: render section navigation for structurally described media.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use structnav::{config, manifest, render, urls};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "structnav")]
#[command(about = "Navigable timeline rendering for structural media metadata", long_about = None)]
struct Args {
    /// Media object manifests to render
    #[arg(value_name = "MANIFEST", required = true)]
    paths: Vec<PathBuf>,

    /// Load configuration from this file instead of ./structnav.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Section currently being played
    #[arg(long, value_name = "SECTION_ID")]
    current: Option<String>,

    /// Show "add to playlist" controls
    #[arg(long)]
    can_create_playlist: bool,

    /// Reserve room for progress indicators
    #[arg(long)]
    show_progress: bool,

    /// Embed LTI deep links
    #[arg(long)]
    lti: bool,

    /// Render navigation even when it would be hidden (one section without structure)
    #[arg(long)]
    all: bool,

    /// Prefix for generated URLs
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> structnav::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => config::Config::load_from(path)?,
        None => config::Config::load()?,
    };

    // Override config with command line args
    if let Some(base_url) = args.base_url {
        cfg.base_url = base_url;
    }
    cfg.lti_enabled |= args.lti;
    cfg.show_progress |= args.show_progress;

    let routes = urls::Routes::new(&cfg.base_url);
    let renderer = render::StructureRenderer::new(
        &routes,
        cfg.render_context(args.current, args.can_create_playlist),
    );

    for path in &args.paths {
        let manifest = manifest::Manifest::load(path)?;
        let sections = manifest.sections(cfg.max_depth)?;
        tracing::info!(
            media_object = %manifest.id,
            sections = sections.len(),
            "rendering {}",
            path.display()
        );
        if render::hide_sections(&sections) && !args.all {
            tracing::info!(media_object = %manifest.id, "section navigation hidden");
            continue;
        }
        println!("{}", renderer.render_sections(&sections, cfg.show_progress)?);
    }

    Ok(())
}
