use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use digconv::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod points;
mod provenance;

use points::{parse_coords, read_points, to_point, write_points};
use provenance::Payload;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Neighborhood convexity analysis and thinning of digital sets")]
struct Cmd {
    /// Optional run tag; propagated to reports, sidecars and logs
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Evaluate every local convexity query at one center and print a JSON report
    Analyze {
        #[arg(long)]
        input: PathBuf,
        /// Center as x,y[,z]
        #[arg(long, allow_hyphen_values = true)]
        center: String,
        #[arg(long, default_value_t = 1)]
        k: usize,
        /// Lower domain corner; defaults to the bounding box of the points and center, grown by k
        #[arg(long, allow_hyphen_values = true)]
        lo: Option<String>,
        /// Upper domain corner
        #[arg(long, allow_hyphen_values = true)]
        hi: Option<String>,
    },
    /// Thin a point set by removing fully convex collapsible points
    Thin {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 1)]
        k: usize,
        #[arg(long, default_value_t = 64)]
        max_passes: usize,
        /// Point that is never removed (x,y[,z]); repeatable
        #[arg(long, allow_hyphen_values = true)]
        anchor: Vec<String>,
    },
    /// Write a generated point set
    Generate {
        #[arg(long, value_enum)]
        shape: Shape,
        #[arg(long, default_value_t = 2)]
        dim: usize,
        /// Box side length or ball radius
        #[arg(long)]
        size: i32,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Keep probability for `noise`
        #[arg(long, default_value_t = 0.5)]
        density: f64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Shape {
    /// Solid box `[0, size-1]^dim`
    Box,
    /// Euclidean ball of radius `size` around the origin
    Ball,
    /// Random subset of `[0, size-1]^dim`
    Noise,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let tag = cmd.tag;
    match cmd.action {
        Action::Analyze {
            input,
            center,
            k,
            lo,
            hi,
        } => analyze(&input, &center, k, lo.as_deref(), hi.as_deref(), tag),
        Action::Thin {
            input,
            out,
            k,
            max_passes,
            anchor,
        } => thin(&input, &out, k, max_passes, &anchor, tag),
        Action::Generate {
            shape,
            dim,
            size,
            seed,
            density,
            out,
        } => generate(shape, dim, size, seed, density, &out, tag),
        Action::Report => report(tag),
    }
}

#[derive(Debug, Serialize)]
struct QueryResult {
    with_center: bool,
    without_center: bool,
}

#[derive(Debug, Serialize)]
struct AnalyzeReport {
    tag: Option<String>,
    dim: usize,
    k: usize,
    center: Vec<Integer>,
    domain: [Vec<Integer>; 2],
    center_in_x: bool,
    local_x: usize,
    local_comp_x: usize,
    fully_convex: QueryResult,
    complementary_fully_convex: QueryResult,
    zero_convex: QueryResult,
    complementary_zero_convex: QueryResult,
    fully_convex_collapsible: bool,
    elapsed_ms: f64,
}

fn analyze(
    input: &Path,
    center: &str,
    k: usize,
    lo: Option<&str>,
    hi: Option<&str>,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(input = %input.display(), center, k, tag = ?tag, "analyze");
    let table = read_points(input)?;
    let center = parse_coords(center)?;
    let corners = match (lo, hi) {
        (Some(lo), Some(hi)) => Some((parse_coords(lo)?, parse_coords(hi)?)),
        (None, None) => None,
        _ => bail!("--lo and --hi must be given together"),
    };
    let mut report = match (table.dim, k) {
        (2, 1) => analyze_at::<2, 1>(&table, &center, corners)?,
        (2, 2) => analyze_at::<2, 2>(&table, &center, corners)?,
        (3, 1) => analyze_at::<3, 1>(&table, &center, corners)?,
        (3, 2) => analyze_at::<3, 2>(&table, &center, corners)?,
        (d, k) => bail!("unsupported combination dim={d}, k={k} (dim in 2..=3, k in 1..=2)"),
    };
    report.tag = tag;
    tracing::info!(
        collapsible = report.fully_convex_collapsible,
        elapsed_ms = report.elapsed_ms,
        "analyze done"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn analyze_at<const D: usize, const K: usize>(
    table: &points::PointTable,
    center: &[Integer],
    corners: Option<(Vec<Integer>, Vec<Integer>)>,
) -> Result<AnalyzeReport> {
    let pts: BTreeSet<PointVector<D>> = table.points::<D>()?.into_iter().collect();
    let c = to_point::<D>(center).context("--center")?;
    let domain = match corners {
        Some((lo, hi)) => HyperRectDomain::new(to_point(&lo)?, to_point(&hi)?)?,
        None => default_domain(&pts, Some(c), K)?,
    };
    let mut clock = Clock::new();
    clock.start_clock();
    let mut a = NeighborhoodConvexityAnalyzer::<D, K>::new(GridSpace::from_domain(domain));
    a.set_center(c, |q| pts.contains(q));
    let mut query = |prop: LocalProperty| -> QueryResult {
        let mut eval = |with_center| match prop {
            LocalProperty::FullConvexity => a.is_fully_convex(with_center),
            LocalProperty::ComplementFullConvexity => a.is_complementary_fully_convex(with_center),
            LocalProperty::ZeroConvexity => a.is_0_convex(with_center),
            LocalProperty::ComplementZeroConvexity => a.is_complementary_0_convex(with_center),
        };
        QueryResult {
            with_center: eval(true),
            without_center: eval(false),
        }
    };
    let fully_convex = query(LocalProperty::FullConvexity);
    let complementary_fully_convex = query(LocalProperty::ComplementFullConvexity);
    let zero_convex = query(LocalProperty::ZeroConvexity);
    let complementary_zero_convex = query(LocalProperty::ComplementZeroConvexity);
    let fully_convex_collapsible = a.is_fully_convex_collapsible();
    Ok(AnalyzeReport {
        tag: None,
        dim: D,
        k: K,
        center: c.coords().to_vec(),
        domain: [
            domain.lower_bound().coords().to_vec(),
            domain.upper_bound().coords().to_vec(),
        ],
        center_in_x: a.is_center_in_x(),
        local_x: a.local_x().len(),
        local_comp_x: a.local_comp_x().len(),
        fully_convex,
        complementary_fully_convex,
        zero_convex,
        complementary_zero_convex,
        fully_convex_collapsible,
        elapsed_ms: clock.stop_clock(),
    })
}

/// Bounding box of `pts` (and `extra`), grown by `k` so every window fits.
fn default_domain<const D: usize>(
    pts: &BTreeSet<PointVector<D>>,
    extra: Option<PointVector<D>>,
    k: usize,
) -> Result<HyperRectDomain<D>> {
    let all: Vec<PointVector<D>> = pts.iter().copied().chain(extra).collect();
    let bbox = HyperRectDomain::bounding(&all).context("empty point set and no center")?;
    let grown = bbox.dilate(Integer::try_from(k)?);
    grown.context("domain dilation failed")
}

fn thin(
    input: &Path,
    out: &Path,
    k: usize,
    max_passes: usize,
    anchors: &[String],
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), k, max_passes, tag = ?tag, "thin");
    let table = read_points(input)?;
    let anchors = anchors
        .iter()
        .map(|s| parse_coords(s))
        .collect::<Result<Vec<_>>>()?;
    let (before, report, elapsed_ms) = match (table.dim, k) {
        (2, 1) => thin_dim::<2, 1>(&table, out, max_passes, &anchors)?,
        (2, 2) => thin_dim::<2, 2>(&table, out, max_passes, &anchors)?,
        (3, 1) => thin_dim::<3, 1>(&table, out, max_passes, &anchors)?,
        (3, 2) => thin_dim::<3, 2>(&table, out, max_passes, &anchors)?,
        (d, k) => bail!("unsupported combination dim={d}, k={k} (dim in 2..=3, k in 1..=2)"),
    };
    tracing::info!(
        before,
        remaining = report.remaining,
        passes = report.passes(),
        elapsed_ms,
        "thin done"
    );
    let payload = Payload::new(
        "thin",
        serde_json::json!({
            "input": input.to_string_lossy(),
            "dim": table.dim,
            "k": k,
            "max_passes": max_passes,
            "anchors": anchors,
            "before": before,
            "remaining": report.remaining,
            "removed_per_pass": report.removed_per_pass,
            "converged": report.converged(),
            "elapsed_ms": elapsed_ms,
        }),
    )
    .with_tag(tag);
    provenance::write_sidecar(out, payload)?;
    Ok(())
}

fn thin_dim<const D: usize, const K: usize>(
    table: &points::PointTable,
    out: &Path,
    max_passes: usize,
    anchors: &[Vec<Integer>],
) -> Result<(usize, ThinningReport, f64)> {
    let mut set: BTreeSet<PointVector<D>> = table.points::<D>()?.into_iter().collect();
    let before = set.len();
    let cfg = ThinningCfg {
        max_passes,
        anchors: anchors
            .iter()
            .map(|a| to_point::<D>(a))
            .collect::<Result<_>>()
            .context("--anchor")?,
    };
    let mut clock = Clock::new();
    clock.start_clock();
    let report = if set.is_empty() {
        ThinningReport::default()
    } else {
        let domain = default_domain(&set, None, K)?;
        let mut a = NeighborhoodConvexityAnalyzer::<D, K>::new(GridSpace::from_domain(domain));
        collapse_fully_convex(&mut a, &mut set, &cfg)
    };
    let elapsed_ms = clock.stop_clock();
    let kept: Vec<PointVector<D>> = set.into_iter().collect();
    write_points(out, &kept)?;
    Ok((before, report, elapsed_ms))
}

fn generate(
    shape: Shape,
    dim: usize,
    size: i32,
    seed: u64,
    density: f64,
    out: &Path,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(?shape, dim, size, seed, density, out = %out.display(), tag = ?tag, "generate");
    if size < 1 {
        bail!("--size must be at least 1, got {size}");
    }
    let count = match dim {
        2 => generate_dim::<2>(shape, size, seed, density, out)?,
        3 => generate_dim::<3>(shape, size, seed, density, out)?,
        d => bail!("unsupported dimension {d} (expected 2 or 3)"),
    };
    tracing::info!(count, "generate done");
    let payload = Payload::new(
        "generate",
        serde_json::json!({
            "shape": shape,
            "dim": dim,
            "size": size,
            "seed": seed,
            "density": density,
            "count": count,
        }),
    )
    .with_tag(tag);
    provenance::write_sidecar(out, payload)?;
    Ok(())
}

fn generate_dim<const D: usize>(shape: Shape, size: i32, seed: u64, density: f64, out: &Path) -> Result<usize> {
    let cube = HyperRectDomain::new(PointVector::<D>::zero(), PointVector::diagonal(size - 1))?;
    let pts = match shape {
        Shape::Box => solid_box(&cube),
        Shape::Ball => digital_ball(PointVector::<D>::zero(), size),
        Shape::Noise => random_subset(&cube, density, seed),
    };
    write_points(out, &pts)?;
    Ok(pts.len())
}

fn report(tag: Option<String>) -> Result<()> {
    let mut obj = provenance::header(tag.as_deref());
    obj["params"] = serde_json::json!({});
    obj["outputs"] = serde_json::json!([]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
