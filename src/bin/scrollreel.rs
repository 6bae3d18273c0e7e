use std::{
    io::Write as _,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scrollreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scroll a page top to bottom and print one JSON snapshot per step.
    Simulate(SimulateArgs),
    /// Render one scene at a fixed progress as a PNG.
    Frame(FrameArgs),
    /// Validate a page and every dataset it embeds.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input page JSON.
    #[arg(long)]
    page: PathBuf,

    /// Page options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scroll distance per step, in px.
    #[arg(long, default_value_t = 200.0)]
    step: f64,

    /// Scroll back up to the top after reaching the bottom.
    #[arg(long)]
    reverse: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input page JSON.
    #[arg(long)]
    page: PathBuf,

    /// Id of a scene block.
    #[arg(long)]
    scene: String,

    /// Scroll progress of the block, in [0, 1].
    #[arg(long)]
    progress: f64,

    /// Ambient ticks to run before capturing.
    #[arg(long, default_value_t = 0)]
    ticks: u32,

    /// Integer upscale factor (nearest neighbour).
    #[arg(long, default_value_t = 1)]
    scale: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input page JSON.
    #[arg(long)]
    page: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn read_page(path: &Path) -> anyhow::Result<scrollreel::PageSpec> {
    scrollreel::PageSpec::load(path).with_context(|| format!("load page '{}'", path.display()))
}

fn read_opts(path: Option<&Path>) -> anyhow::Result<scrollreel::PageOpts> {
    let opts = match path {
        Some(p) => scrollreel::PageOpts::load(p)
            .with_context(|| format!("load page options '{}'", p.display()))?,
        None => scrollreel::PageOpts::default(),
    };
    Ok(opts.with_env_overrides())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !args.step.is_finite() || args.step <= 0.0 {
        anyhow::bail!("--step must be a positive number of px");
    }
    let spec = read_page(&args.page)?;
    let opts = read_opts(args.config.as_deref())?;

    // A CLI run stands for a reader who has already acknowledged the warning.
    let store = scrollreel::MemorySessionStore::new();
    let mut gate = scrollreel::ContentGate::open(&store);
    gate.dismiss(&store);
    let token = gate
        .pass()
        .context("content warning gate did not open after dismissal")?;

    let dt = opts.tick_dt();
    let mut page = scrollreel::Page::mount(
        &spec,
        opts,
        token,
        Rc::new(scrollreel::CpuSurfaceFactory::default()),
    )?;

    let mut offsets = Vec::new();
    let mut y = 0.0;
    while y < page.max_scroll() {
        offsets.push(y);
        y += args.step;
    }
    offsets.push(page.max_scroll());
    if args.reverse {
        let back: Vec<f64> = offsets.iter().rev().skip(1).copied().collect();
        offsets.extend(back);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for y in offsets {
        page.scroll_to(y);
        page.frame();
        page.advance(dt);
        let line = serde_json::to_string(&page.snapshot()).context("serialize snapshot")?;
        writeln!(out, "{line}").context("write snapshot")?;
    }
    page.unmount();
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if args.scale == 0 || args.scale > 16 {
        anyhow::bail!("--scale must be in 1..=16");
    }
    let spec = read_page(&args.page)?;
    let kind = spec
        .chapters
        .iter()
        .flat_map(|c| &c.blocks)
        .find(|b| b.id == args.scene)
        .with_context(|| format!("no block with id '{}'", args.scene))
        .and_then(|b| match &b.body {
            scrollreel::BlockBody::Scene { scene } => Ok(*scene),
            other => Err(anyhow::anyhow!(
                "block '{}' is a {} block, not a scene",
                b.id,
                other.kind()
            )),
        })?;

    let opts = scrollreel::PageOpts::default().with_env_overrides();
    let mut renderer = scrollreel::SceneRenderer::new(
        kind.instantiate(opts.reveal),
        Rc::new(scrollreel::CpuSurfaceFactory::default()),
        scrollreel::SceneOpts {
            reduced_motion: opts.reduced_motion,
        },
    );
    renderer.update(scrollreel::ScrollState::new(args.progress, true));
    if let scrollreel::SceneView::Fallback { reason, .. } = renderer.scene_view() {
        anyhow::bail!(
            "scene '{}' shows its static description ({reason:?}); no frame to render",
            args.scene
        );
    }
    for _ in 0..args.ticks {
        renderer.tick(opts.tick_dt());
    }
    let frame = renderer
        .frame()
        .with_context(|| format!("scene '{}' produced no frame", args.scene))?;

    let img = to_straight_rgba(&frame)?;
    let img = if args.scale > 1 {
        image::imageops::resize(
            &img,
            frame.width * args.scale,
            frame.height * args.scale,
            image::imageops::FilterType::Nearest,
        )
    } else {
        img
    };

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn to_straight_rgba(frame: &scrollreel::FrameRGBA) -> anyhow::Result<image::RgbaImage> {
    let mut data = frame.data.clone();
    if frame.premultiplied {
        for px in data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
    }
    image::RgbaImage::from_raw(frame.width, frame.height, data)
        .context("frame buffer does not match its dimensions")
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let spec = read_page(&args.page)?;
    let datasets = spec
        .chapters
        .iter()
        .flat_map(|c| &c.blocks)
        .filter_map(|b| match &b.body {
            scrollreel::BlockBody::Infographic { dataset } => Some(dataset),
            _ => None,
        })
        .collect::<Vec<_>>();
    let records: usize = datasets.iter().map(|d| d.len()).sum();
    println!(
        "ok: '{}' with {} chapters, {} blocks, {} datasets, {} records",
        spec.title,
        spec.chapters.len(),
        spec.block_count(),
        datasets.len(),
        records
    );
    Ok(())
}
