use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "storyreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the frame layout of a project.
    Timeline(InputArgs),
    /// Print the visual tree of one frame.
    Frame(FrameArgs),
    /// Apply measured narration durations and write the updated project.
    Reconcile(ReconcileArgs),
    /// Stream visual trees of a frame range as JSON lines.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input project JSON (a project, or a render request wrapping one).
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ReconcileArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Timesheet JSON: an array of `{id, measuredDurationSeconds, audioRef}`.
    #[arg(long)]
    timesheet: PathBuf,

    /// Output project JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output JSON-lines path.
    #[arg(long)]
    out: PathBuf,

    /// First frame to render.
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// End frame (exclusive); the composition end when omitted.
    #[arg(long)]
    end: Option<u64>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Timeline(args) => cmd_timeline(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Reconcile(args) => cmd_reconcile(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f)).with_context(|| format!("parse {what} JSON"))
}

/// Load a project, substituting fallback durations and reporting each substitution.
fn load_project(args: &InputArgs) -> anyhow::Result<storyreel::Project> {
    let value: serde_json::Value = read_json(&args.in_path, "project")?;
    let project = if value.get("project").is_some() {
        serde_json::from_value::<storyreel::RenderRequest>(value)
            .context("parse render request")?
            .into_project()
    } else {
        serde_json::from_value::<storyreel::Project>(value).context("parse project")?
    };
    let (project, warnings) = project.sanitized();
    for w in &warnings {
        eprintln!("warning: {}", serde_json::to_string(w)?);
    }
    Ok(project)
}

fn create_file(path: &Path) -> anyhow::Result<BufWriter<File>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    Ok(BufWriter::new(f))
}

fn open_out(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(create_file(path)?)),
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}

fn write_pretty<T: serde::Serialize>(out: Option<&Path>, value: &T) -> anyhow::Result<()> {
    let mut w = open_out(out)?;
    serde_json::to_writer_pretty(&mut w, value)?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}

fn cmd_timeline(args: InputArgs) -> anyhow::Result<()> {
    let project = load_project(&args)?;
    project.validate()?;
    let timeline = storyreel::Timeline::for_project(&project)?;
    write_pretty(None, &timeline)?;
    eprintln!(
        "{} scenes, {} frames",
        timeline.windows.len(),
        timeline.total_frames()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let project = load_project(&args.input)?;
    let renderer = storyreel::Renderer::new(project)?;
    let tree = renderer.render(storyreel::FrameIndex(args.frame))?;
    write_pretty(args.out.as_deref(), &tree)?;
    if let Some(out) = &args.out {
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_reconcile(args: ReconcileArgs) -> anyhow::Result<()> {
    let project = load_project(&args.input)?;
    let timesheet: Vec<storyreel::TimesheetEntry> = read_json(&args.timesheet, "timesheet")?;

    let store = storyreel::ProjectStore::new(project)?;
    let outcome = store.apply_timesheet(&timesheet)?;
    let snapshot = store.snapshot()?;
    eprintln!(
        "revision {}: {} scenes changed, {} frames",
        outcome.revision,
        outcome.changed.len(),
        snapshot.timeline.total_frames()
    );

    write_pretty(args.out.as_deref(), &snapshot.project)?;
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let project = load_project(&args.input)?;
    let renderer = storyreel::Renderer::new(project)?;
    let end = args.end.unwrap_or_else(|| renderer.total_frames());
    let range = storyreel::FrameRange::new(
        storyreel::FrameIndex(args.start),
        storyreel::FrameIndex(end),
    )?;

    let opts = storyreel::RenderOpts {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
        ..storyreel::RenderOpts::default()
    };
    let session = storyreel::RenderSession::new(renderer, opts);

    let out = create_file(&args.out)?;
    let mut sink = storyreel::JsonLinesSink::new(out);
    let stats = session.render_range(range, &mut sink)?;

    eprintln!(
        "wrote {} ({} frames, {} static)",
        args.out.display(),
        stats.frames_delivered,
        stats.frames_static
    );
    Ok(())
}
