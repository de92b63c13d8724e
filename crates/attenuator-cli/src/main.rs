mod ops;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use attenuator_core::{
    CurveSession, CurveShape, CurveType, EditorConfig, FixedSelection, JsonCurveStore,
    LoadOutcome, PlotModel, SavedCurve, SelectedObject,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::ops::EditOp;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
        .ok();

    let cli = Cli::parse();
    let config = EditorConfig::discover(cli.config.as_deref()).context("failed to load config")?;
    match cli.command {
        Commands::Shapes => list_shapes(),
        Commands::Show(target) => execute_show(&config, target),
        Commands::Render(args) => execute_render(&config, args),
        Commands::Edit(args) => execute_edit(&config, args),
    }
}

#[derive(Parser)]
#[command(author, version, about = "Batch editor for attenuation curves")]
struct Cli {
    /// Editor settings (JSON). Defaults to the per-user config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List curve shapes and curve types.
    Shapes,
    /// Print the normalized points of an object's curve.
    Show(CurveTarget),
    /// Print the sampled plot of an object's curve.
    Render(RenderArgs),
    /// Edit an object's curve and write it to one or more objects.
    Edit(EditArgs),
}

#[derive(Args)]
struct CurveTarget {
    /// Curve store file. Falls back to `store_path` from the config.
    #[arg(long)]
    store: Option<PathBuf>,
    /// Object whose curve is loaded.
    #[arg(long)]
    object: String,
    /// Curve slot to work on. Defaults to the configured curve type.
    #[arg(long, value_enum)]
    curve_type: Option<CurveTypeArg>,
}

#[derive(Args)]
struct RenderArgs {
    #[command(flatten)]
    target: CurveTarget,
    #[arg(long, value_enum, default_value_t = RenderFormat::Json)]
    format: RenderFormat,
}

#[derive(Args)]
struct EditArgs {
    #[command(flatten)]
    source: CurveTarget,
    /// Objects that receive the edited curve. Defaults to the source object.
    #[arg(long = "target")]
    targets: Vec<String>,
    /// Edits applied in order, e.g. `x:1=45`, `insert:25,-6,SCurve`.
    #[arg(long = "op", required = true)]
    ops: Vec<EditOp>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CurveTypeArg {
    Volume,
    GameAux,
    UserAux,
    LowPass,
    HighPass,
    Spread,
    Focus,
}

impl From<CurveTypeArg> for CurveType {
    fn from(arg: CurveTypeArg) -> Self {
        match arg {
            CurveTypeArg::Volume => CurveType::Volume,
            CurveTypeArg::GameAux => CurveType::GameAuxSend,
            CurveTypeArg::UserAux => CurveType::UserAuxSend,
            CurveTypeArg::LowPass => CurveType::LowPassFilter,
            CurveTypeArg::HighPass => CurveType::HighPassFilter,
            CurveTypeArg::Spread => CurveType::Spread,
            CurveTypeArg::Focus => CurveType::Focus,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RenderFormat {
    Json,
    Csv,
}

type StoreSession = CurveSession<JsonCurveStore, FixedSelection>;

fn open_session(config: &EditorConfig, target: &CurveTarget) -> Result<StoreSession> {
    let path = target
        .store
        .clone()
        .or_else(|| config.store_path.clone())
        .ok_or_else(|| anyhow!("no curve store given; pass --store or set store_path"))?;
    let store = JsonCurveStore::open(&path)
        .with_context(|| format!("failed to open curve store {}", path.display()))?;
    let selection = FixedSelection::new(vec![selected(&target.object)]);
    let mut session = CurveSession::new(store, selection, config.clone());
    if let Some(curve_type) = target.curve_type {
        session.set_curve_type(curve_type.into());
    }
    Ok(session)
}

fn selected(object: &str) -> SelectedObject {
    SelectedObject::new(object, object)
}

fn load(session: &mut StoreSession) -> Result<()> {
    match session.load()? {
        LoadOutcome::Loaded { .. } => Ok(()),
        LoadOutcome::Empty { object } => Err(anyhow!(
            "{} has no {} curve",
            object.id,
            session.editor().curve_type().label()
        )),
        LoadOutcome::NoSelection => Err(anyhow!("no object selected")),
    }
}

fn list_shapes() -> Result<()> {
    println!("Shapes:");
    for shape in CurveShape::ALL {
        println!("  {:<16} {}", shape.wire_name(), shape.label());
    }
    println!("Curve types:");
    for curve_type in CurveType::ALL {
        println!(
            "  {:<22} {} ({:?})",
            curve_type.external_id(),
            curve_type.label(),
            curve_type.domain()
        );
    }
    Ok(())
}

fn execute_show(config: &EditorConfig, target: CurveTarget) -> Result<()> {
    let mut session = open_session(config, &target)?;
    load(&mut session)?;
    let editor = session.editor();
    let curve = editor
        .curve()
        .ok_or_else(|| anyhow!("no curve loaded"))?;
    println!(
        "{} [{}] max x {}",
        curve.source().id,
        editor.curve_type().label(),
        curve.max_x()
    );
    for (index, point) in curve.points().points().iter().enumerate() {
        println!(
            "{index:>3}  x {:>8.3}  y {:>9.3}  {}",
            point.x,
            point.y,
            point.shape.wire_name()
        );
    }
    Ok(())
}

fn execute_render(config: &EditorConfig, args: RenderArgs) -> Result<()> {
    let mut session = open_session(config, &args.target)?;
    load(&mut session)?;
    let plot = session.plot();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        RenderFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &plot)?;
            writeln!(out)?;
        }
        RenderFormat::Csv => write_csv(&mut out, &plot)?,
    }
    Ok(())
}

fn write_csv(out: &mut impl Write, plot: &PlotModel) -> Result<()> {
    let curve = plot.curve().ok_or_else(|| anyhow!("nothing to render"))?;
    writeln!(out, "segment,shape,x,y")?;
    for (index, segment) in curve.segments.iter().enumerate() {
        for sample in &segment.samples {
            writeln!(
                out,
                "{index},{},{},{}",
                segment.shape.wire_name(),
                sample.x,
                sample.y
            )?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct EditReport<'a> {
    applied: usize,
    rejected: Vec<String>,
    saved: &'a [SavedCurve],
}

fn execute_edit(config: &EditorConfig, args: EditArgs) -> Result<()> {
    let mut session = open_session(config, &args.source)?;
    load(&mut session)?;

    let mut rejected = Vec::new();
    for op in &args.ops {
        match op.apply(session.editor_mut()) {
            Ok(()) => info!(%op, "edit applied"),
            Err(err) => {
                warn!(%op, %err, "edit rejected");
                rejected.push(format!("{op}: {err}"));
            }
        }
    }

    let result = if args.targets.is_empty() {
        session.save()
    } else {
        let targets: Vec<_> = args.targets.iter().map(String::as_str).map(selected).collect();
        session.save_to(&targets)
    };
    let saved = result.context("failed to save edited curve")?;
    let report = EditReport {
        applied: args.ops.len() - rejected.len(),
        rejected,
        saved: &saved,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
