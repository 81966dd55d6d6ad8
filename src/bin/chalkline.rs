use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chalkline::render::surface::paint_frame;
use chalkline::{
    BoardStyle, CpuSurface, CpuSurfaceOpts, Evaluator, Fps, ManualClock, ScenePlayer, Storyboard,
    StoryboardOpts, StoryboardPlayer,
};

#[derive(Parser, Debug)]
#[command(name = "chalkline", version)]
struct Cli {
    /// Board style JSON (background, grid, stroke and font settings).
    #[arg(long, global = true)]
    style: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a storyboard and print a summary.
    Inspect(InspectArgs),
    /// Render one frame of a scene as a PNG.
    Still(StillArgs),
    /// Play a scene or the whole storyboard into a PNG sequence.
    Frames(FramesArgs),
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Args, Debug)]
struct FontArgs {
    /// Extra directory of font files for text elements.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Skip loading system fonts.
    #[arg(long, default_value_t = false)]
    no_system_fonts: bool,
}

#[derive(Args, Debug)]
struct StillArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scene index (0-based).
    #[arg(long, default_value_t = 0)]
    scene: usize,

    /// Elapsed scene time in milliseconds. Without it every element is drawn in full.
    #[arg(long)]
    at_ms: Option<f64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    fonts: FontArgs,
}

#[derive(Args, Debug)]
struct FramesArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Play only this scene (0-based). Without it the whole storyboard plays.
    #[arg(long)]
    scene: Option<usize>,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Pause between scenes in milliseconds.
    #[arg(long, default_value_t = 500.0)]
    advance_delay_ms: f64,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    #[command(flatten)]
    fonts: FontArgs,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let style = load_style(cli.style.as_deref())?;
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Still(args) => cmd_still(args, style),
        Command::Frames(args) => cmd_frames(args, style),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("CHALKLINE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (tests embedding main) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_style(path: Option<&Path>) -> anyhow::Result<BoardStyle> {
    match path {
        Some(p) => BoardStyle::from_path(p).with_context(|| format!("load style '{}'", p.display())),
        None => Ok(BoardStyle::default()),
    }
}

fn load_storyboard(path: &Path) -> anyhow::Result<Storyboard> {
    let storyboard =
        Storyboard::from_path(path).with_context(|| format!("load storyboard '{}'", path.display()))?;
    storyboard.validate()?;
    Ok(storyboard)
}

fn cpu_surface(style: BoardStyle, fonts: &FontArgs) -> anyhow::Result<CpuSurface> {
    let mut opts = CpuSurfaceOpts::default().with_style(style);
    for dir in &fonts.font_dirs {
        opts = opts.with_font_dir(dir.clone());
    }
    if fonts.no_system_fonts {
        opts = opts.without_system_fonts();
    }
    Ok(CpuSurface::new(opts)?)
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let storyboard = load_storyboard(&args.in_path)?;

    println!(
        "{} scene(s), {:.1}s total",
        storyboard.len(),
        storyboard.total_duration_ms() / 1000.0
    );
    for (i, scene) in storyboard.scenes().iter().enumerate() {
        let number = scene
            .scene_number
            .map_or_else(|| "-".to_owned(), |n| n.to_string());
        println!(
            "  [{i}] #{number} {:?}: {:.1}s, {} element(s)",
            scene.title,
            scene.duration_seconds,
            scene.elements.len()
        );
    }

    let cutoffs = storyboard.reveal_cutoffs();
    if !cutoffs.is_empty() {
        println!("reveal cut off by scene end:");
        for c in &cutoffs {
            let note = if c.starts_at_or_after_end() {
                " (starts at or after scene end)"
            } else {
                ""
            };
            println!(
                "  scene {} element {} ({:?}): reveal ends {:.0}ms, scene ends {:.0}ms{note}",
                c.scene_index, c.element_index, c.kind, c.reveal_end_ms, c.scene_duration_ms
            );
        }
    }
    Ok(())
}

fn cmd_still(args: StillArgs, style: BoardStyle) -> anyhow::Result<()> {
    let storyboard = load_storyboard(&args.in_path)?;
    let scene = storyboard.scene(args.scene).with_context(|| {
        format!(
            "scene {} out of range (storyboard has {})",
            args.scene,
            storyboard.len()
        )
    })?;

    let frame = match args.at_ms {
        Some(ms) => Evaluator::eval_frame(scene, ms),
        None => Evaluator::eval_rest_frame(scene),
    };

    let mut surface = cpu_surface(style, &args.fonts)?;
    paint_frame(&mut surface, &frame)?;
    surface
        .save_png(&args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs, style: BoardStyle) -> anyhow::Result<()> {
    let storyboard = load_storyboard(&args.in_path)?;
    let fps = Fps::new(args.fps, 1)?;
    let surface = cpu_surface(style, &args.fonts)?;
    let mut player = ScenePlayer::new(ManualClock::new(), surface);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let out_dir = args.out_dir.clone();
    let write = |frame: &chalkline::DrivenFrame, surface: Option<&CpuSurface>| {
        let Some(surface) = surface else {
            return Ok(());
        };
        surface.save_png(&out_dir.join(format!("frame_{:05}.png", frame.index)))
    };

    let stats = match args.scene {
        Some(index) => {
            let scene = storyboard
                .scene(index)
                .cloned()
                .with_context(|| format!("scene {index} out of range"))?;
            chalkline::drive_scene(&mut player, scene, fps, write)?
        }
        None => {
            let opts = StoryboardOpts {
                advance_delay_ms: args.advance_delay_ms,
            };
            let mut board = StoryboardPlayer::new(player, storyboard, opts)?;
            chalkline::drive_storyboard(&mut board, fps, write)?
        }
    };

    eprintln!(
        "wrote {} frame(s) to {} ({:.0}ms)",
        stats.frames,
        args.out_dir.display(),
        stats.end_ms
    );
    Ok(())
}
