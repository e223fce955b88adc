use anyhow::{anyhow, Context, Result};
use clap::Parser;
use curve_charter::chart::{Beat, ChartDoc};
use curve_charter::curve::ControlPoint;
use curve_charter::fraction::{self, SimplifyPolicy};
use curve_charter::session::EditSession;
use curve_charter::{color, normalize, CharterConfig};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Curve-based note charter for .mc charts", long_about = None)]
struct Args {
    /// Existing .mc chart to start from (empty chart if omitted)
    #[arg(short, long)]
    chart: Option<PathBuf>,

    /// Output path for the resulting .mc chart
    #[arg(short, long)]
    output: PathBuf,

    /// JSON file with control points as [[x, y], ...]
    #[arg(short, long)]
    points: Option<PathBuf>,

    /// Beat the sketched notes start at, as measure:numerator:denominator
    #[arg(long, default_value = "0:0:4")]
    start_beat: String,

    /// Curve samples (and notes) per control-point segment
    #[arg(long, default_value = "16")]
    density: usize,

    /// Curve bulge bias in [0, 1]; 0.5 is linear midpoints
    #[arg(long, default_value = "0.5")]
    shape_factor: f64,

    /// Beat grid denominator, e.g. 4 for a 1/4 grid
    #[arg(long, default_value = "4")]
    subdivision: u32,

    /// Target width for x-axis normalization
    #[arg(long, default_value = "512")]
    x_target_range: i64,

    /// Reduce all beat fractions on the way out (strict or floor-two)
    #[arg(long)]
    simplify: Option<String>,

    /// Rescale note x-coordinates onto [0, x_target_range] before writing
    #[arg(long)]
    normalize: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_default_env()
        .filter_level(level.parse()?)
        .init();

    let simplify = args.simplify.as_deref().map(parse_policy).transpose()?;
    let start_beat = parse_start_beat(&args.start_beat)?;

    let config = CharterConfig {
        density: args.density,
        shape_factor: args.shape_factor,
        subdivision: args.subdivision,
        simplify_policy: simplify.unwrap_or(SimplifyPolicy::Strict),
        x_target_range: args.x_target_range,
    };

    let mut session = match &args.chart {
        Some(path) => {
            log::info!("loading chart from {}", path.display());
            EditSession::import(config, ChartDoc::load(path)?)
        }
        None => EditSession::new(config),
    };

    if let Some(path) = &args.points {
        for point in load_control_points(path)? {
            session.push_point(point);
        }
        let placed = session.commit(start_beat)?;
        log::info!("committed sketch: {} notes placed", placed);
    }

    let mut out_chart = ChartDoc::clone(&session.snapshot());
    if let Some(policy) = simplify {
        log::info!("simplifying beat fractions ({:?})", policy);
        fraction::simplify_chart(&mut out_chart, policy);
    }
    if args.normalize {
        log::info!("normalizing x onto [0, {}]", args.x_target_range);
        normalize::normalize(&mut out_chart.note, args.x_target_range);
    }

    out_chart.save(&args.output)?;
    log::info!("saved chart to {}", args.output.display());

    print_summary(&out_chart);
    Ok(())
}

/// Parse a beat given as `measure:numerator:denominator`.
fn parse_start_beat(raw: &str) -> Result<Beat> {
    let parts: Vec<u32> = raw
        .split(':')
        .map(|p| p.trim().parse::<u32>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("invalid start beat: {}", raw))?;
    if parts.len() != 3 {
        return Err(anyhow!("start beat must be measure:numerator:denominator"));
    }
    if parts[2] == 0 {
        return Err(anyhow!("start beat denominator must be positive"));
    }
    Ok(Beat::new(parts[0], parts[1], parts[2]))
}

fn parse_policy(raw: &str) -> Result<SimplifyPolicy> {
    match raw.to_lowercase().as_str() {
        "strict" => Ok(SimplifyPolicy::Strict),
        "floor-two" | "floor-at-two" => Ok(SimplifyPolicy::FloorAtTwo),
        s => Err(anyhow!("unknown simplify policy: {}", s)),
    }
}

fn load_control_points(path: &Path) -> Result<Vec<ControlPoint>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read points file: {}", path.display()))?;
    let pairs: Vec<[f64; 2]> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse points file: {}", path.display()))?;
    Ok(pairs
        .into_iter()
        .map(|[x, y]| ControlPoint::new(x, y))
        .collect())
}

fn print_summary(chart: &ChartDoc) {
    let mut by_color: HashMap<&'static str, usize> = HashMap::new();
    for note in &chart.note {
        *by_color
            .entry(color::classify(&note.beat).name())
            .or_default() += 1;
    }

    println!("\n=== Chart Summary ===");
    println!("{} notes", chart.note.len());
    let mut colors: Vec<_> = by_color.into_iter().collect();
    colors.sort();
    for (name, count) in colors {
        println!("{:<8} | {} notes", name, count);
    }
    println!("=== End Summary ===\n");
}
