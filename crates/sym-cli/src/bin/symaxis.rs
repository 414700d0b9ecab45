use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use image::GrayImage;
use log::info;
use serde::{Deserialize, Serialize};
use symmetry_axis::{
    AngleSweep, BorderMode, Histogram, Image, Interpolation, PivotMode, PivotSource,
    SearchConfig, SliceResult, SymmetryScorer, SymmetrySearch, ThresholdConfig, Volume,
    WarpConfig, apply_mask, compute_mask_with, histogram_threshold, resample_at_angle, summarize,
    threshold_mask,
};

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "tif", "tiff", "jpg", "jpeg", "bmp"];

#[derive(Parser, Debug)]
#[command(name = "symaxis")]
#[command(about = "Find the mirror-symmetry axis angle of every slice in an image stack")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the best axis angle per slice and write the results as JSON.
    #[command(name = "search")]
    Search(SearchArgs),
    /// Write the foreground mask of every slice as PNG.
    #[command(name = "mask")]
    Mask(MaskArgs),
    /// Score one slice at one angle and write the score map.
    #[command(name = "score-map")]
    ScoreMap(ScoreMapArgs),
}

#[derive(Args, Debug, Clone)]
struct SliceArgs {
    /// Slice images in stack order.
    #[arg(long, num_args = 1.., conflicts_with = "dir", required_unless_present = "dir")]
    slices: Vec<PathBuf>,
    /// Directory of slice images, stacked in file-name order.
    #[arg(long)]
    dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct SearchArgs {
    #[command(flatten)]
    input: SliceArgs,
    /// Angle step in degrees.
    #[arg(long)]
    step: Option<f32>,
    /// Search `[LOW, HIGH)` instead of the half turn.
    #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"], allow_negative_numbers = true)]
    range: Option<Vec<f32>>,
    /// JSON file with search settings; flags override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    pivot: Option<PivotArg>,
    /// Process slices one after another.
    #[arg(long)]
    serial: bool,
    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
struct MaskArgs {
    #[command(flatten)]
    input: SliceArgs,
    #[arg(long, default_value = "symaxis_mask")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct ScoreMapArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    angle: f32,
    #[arg(long, value_enum, default_value_t = PivotArg::Mask)]
    pivot: PivotArg,
    #[arg(long, default_value = "symaxis_score")]
    out: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PivotArg {
    Mask,
    Slice,
}

impl PivotArg {
    fn to_core(self) -> PivotMode {
        match self {
            Self::Mask => PivotMode::Mask,
            Self::Slice => PivotMode::Slice,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum InterpolationName {
    Nearest,
    Bilinear,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
enum BorderDto {
    Constant { value: f32 },
    Replicate,
    Reflect101,
}

/// Settings file accepted by `search --config`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SearchConfigFile {
    step: Option<f32>,
    range: Option<[f32; 2]>,
    bins: Option<usize>,
    fraction: Option<f64>,
    interpolation: Option<InterpolationName>,
    border: Option<BorderDto>,
    pivot: Option<PivotArg>,
    parallel: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
struct SliceDto {
    index: usize,
    source: String,
    angle_deg: f32,
    pivot: [i32; 2],
    peak_score: f64,
    pivot_fallback: bool,
}

#[derive(Debug, Clone, Serialize)]
struct SummaryDto {
    mean_angle_deg: f32,
    mean_pivot: [f32; 2],
    slices: usize,
}

#[derive(Debug, Clone, Serialize)]
struct SearchReport {
    width: usize,
    height: usize,
    angles: SweepDto,
    slices: Vec<SliceDto>,
    summary: Option<SummaryDto>,
}

#[derive(Debug, Clone, Serialize)]
struct SweepDto {
    low: f32,
    high: f32,
    step: f32,
}

#[derive(Debug, Clone, Serialize)]
struct MetaMask {
    threshold: f64,
    bins: usize,
    fraction: f64,
    /// First and last histogram edge.
    histogram_edges: [f64; 2],
    histogram_counts: Vec<usize>,
    files: Vec<String>,
    foreground_voxels: usize,
}

#[derive(Debug, Clone, Serialize)]
struct MetaScoreMap {
    source: String,
    angle_deg: f32,
    pivot: [i32; 2],
    pivot_fallback: bool,
    threshold: f64,
    peak_score: f64,
    score_range: [f32; 2],
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Search(args) => run_search(args),
        Command::Mask(args) => run_mask(args),
        Command::ScoreMap(args) => run_score_map(args),
    }
}

fn run_search(args: SearchArgs) -> Result<()> {
    let file = match &args.config {
        Some(path) => read_json::<SearchConfigFile>(path)
            .with_context(|| format!("reading search config {}", path.display()))?,
        None => SearchConfigFile::default(),
    };
    let cfg = search_config(&args, &file)?;

    let files = slice_files(&args.input)?;
    let volume = load_volume(&files)?;
    let (width, height, depth) = volume.shape();
    info!("loaded {depth} slices of {width}x{height}");

    let results = SymmetrySearch::new(cfg.clone())
        .run(volume)
        .context("running symmetry search")?;
    let summary = summarize(&results);
    if let Some(s) = &summary {
        info!(
            "mean axis {:.2} deg about ({:.1}, {:.1}) over {} slices",
            s.mean_angle_deg, s.mean_pivot.x, s.mean_pivot.y, s.slices
        );
    }

    let report = SearchReport {
        width,
        height,
        angles: sweep_dto(&cfg.sweep),
        slices: results
            .iter()
            .zip(&files)
            .map(|(r, path)| slice_dto(r, path))
            .collect(),
        summary: summary.map(|s| SummaryDto {
            mean_angle_deg: s.mean_angle_deg,
            mean_pivot: [s.mean_pivot.x, s.mean_pivot.y],
            slices: s.slices,
        }),
    };

    match &args.out {
        Some(path) => {
            write_json(path, &report)?;
            info!("results written to {}", path.display());
        }
        None => {
            let text = serde_json::to_string_pretty(&report).context("serializing json")?;
            println!("{text}");
        }
    }
    Ok(())
}

fn run_mask(args: MaskArgs) -> Result<()> {
    let files = slice_files(&args.input)?;
    let volume = load_volume(&files)?;
    let cfg = ThresholdConfig::default();
    let hist = Histogram::build(volume.voxels().copied(), cfg.bins).context("building histogram")?;
    let threshold = histogram_threshold(&hist, &cfg).context("placing threshold")?;
    let mask = threshold_mask(&volume, threshold);

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;
    for (z, slice) in mask.slices().iter().enumerate() {
        let data = slice.data().iter().map(|&m| if m { 255u8 } else { 0 }).collect();
        save_luma_raw(
            args.out.join(format!("mask_{z:04}.png")),
            slice.width(),
            slice.height(),
            data,
        )?;
    }

    let foreground_voxels = mask.voxels().filter(|&&m| m).count();
    info!(
        "threshold {threshold:.4}: {foreground_voxels} of {} voxels in foreground",
        hist.total()
    );
    write_json(
        &args.out.join("meta.json"),
        &MetaMask {
            threshold,
            bins: hist.bins(),
            fraction: cfg.fraction,
            histogram_edges: [hist.edges()[0], hist.edges()[hist.bins()]],
            histogram_counts: hist.counts().to_vec(),
            files: files.iter().map(|p| p.display().to_string()).collect(),
            foreground_voxels,
        },
    )
}

fn run_score_map(args: ScoreMapArgs) -> Result<()> {
    ensure_file_exists(&args.input, "input")?;
    let volume = load_volume(std::slice::from_ref(&args.input))?;
    let (mask, threshold) =
        compute_mask_with(&volume, &ThresholdConfig::default()).context("computing mask")?;
    let masked = apply_mask(volume, &mask).context("applying mask")?;

    let slice = masked.slices()[0].as_view();
    let mask_slice = mask.slices()[0].as_view();
    let source = match args.pivot {
        PivotArg::Mask => PivotSource::MaskCentroid(mask_slice),
        PivotArg::Slice => PivotSource::SliceCentroid,
    };
    let (rotated, estimate) =
        resample_at_angle(&slice, args.angle, source, &WarpConfig::default());

    let mut scorer = SymmetryScorer::new();
    let peak_score = scorer.score(&rotated.as_view());
    let map = scorer.score_map();

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;
    save_f32_vis(args.out.join("rotated.png"), &rotated)?;
    save_f32_vis(args.out.join("score_map.png"), map)?;

    let (lo, hi) = value_range(map.data());
    info!("peak score {peak_score:.4} at {} deg", args.angle);
    write_json(
        &args.out.join("meta.json"),
        &MetaScoreMap {
            source: args.input.display().to_string(),
            angle_deg: args.angle,
            pivot: [estimate.pivot.x, estimate.pivot.y],
            pivot_fallback: estimate.fallback,
            threshold,
            peak_score,
            score_range: [lo, hi],
        },
    )
}

fn search_config(args: &SearchArgs, file: &SearchConfigFile) -> Result<SearchConfig> {
    let mut cfg = SearchConfig::default();

    let step = args.step.or(file.step).unwrap_or(cfg.sweep.step());
    let range = match &args.range {
        Some(v) => match v.as_slice() {
            [low, high] => Some([*low, *high]),
            _ => bail!("--range takes exactly two values, got {}", v.len()),
        },
        None => file.range,
    };
    cfg.sweep = match range {
        Some([low, high]) => AngleSweep::range(low, high, step),
        None => AngleSweep::half_turn(step),
    };

    if let Some(bins) = file.bins {
        cfg.threshold.bins = bins;
    }
    if let Some(fraction) = file.fraction {
        cfg.threshold.fraction = fraction;
    }
    if let Some(interp) = file.interpolation {
        cfg.warp.interpolation = match interp {
            InterpolationName::Nearest => Interpolation::Nearest,
            InterpolationName::Bilinear => Interpolation::Bilinear,
        };
    }
    if let Some(border) = file.border {
        cfg.warp.border = match border {
            BorderDto::Constant { value } => BorderMode::Constant(value),
            BorderDto::Replicate => BorderMode::Replicate,
            BorderDto::Reflect101 => BorderMode::Reflect101,
        };
    }
    if let Some(pivot) = args.pivot.or(file.pivot) {
        cfg.pivot_mode = pivot.to_core();
    }
    cfg.parallel = !args.serial && file.parallel.unwrap_or(true);

    // Surface bad settings before any image is decoded.
    cfg.sweep
        .angles()
        .with_context(|| format!("invalid angle sweep {:?}", cfg.sweep))?;
    cfg.threshold
        .validate()
        .with_context(|| format!("invalid threshold settings {:?}", cfg.threshold))?;
    Ok(cfg)
}

fn sweep_dto(sweep: &AngleSweep) -> SweepDto {
    match *sweep {
        AngleSweep::HalfTurn { step } => SweepDto {
            low: 0.0,
            high: 180.0,
            step,
        },
        AngleSweep::Range { low, high, step } => SweepDto { low, high, step },
    }
}

fn slice_dto(result: &SliceResult, path: &Path) -> SliceDto {
    SliceDto {
        index: result.index,
        source: path.display().to_string(),
        angle_deg: result.angle_deg,
        pivot: [result.pivot.x, result.pivot.y],
        peak_score: result.peak_score,
        pivot_fallback: result.pivot_fallback,
    }
}

fn slice_files(args: &SliceArgs) -> Result<Vec<PathBuf>> {
    let files = match &args.dir {
        Some(dir) => {
            let mut files = Vec::new();
            for entry in
                fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))?
            {
                let path = entry
                    .with_context(|| format!("listing {}", dir.display()))?
                    .path();
                if path.is_file() && has_image_extension(&path) {
                    files.push(path);
                }
            }
            files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
            files
        }
        None => args.slices.clone(),
    };

    if files.is_empty() {
        bail!("no slice images given");
    }
    for path in &files {
        ensure_file_exists(path, "slice")?;
    }
    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

fn load_slice(path: &Path) -> Result<Image<f32>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening slice image {}", path.display()))?;
    let luma = dyn_img.to_luma32f();
    let (w, h) = luma.dimensions();
    let data = luma.into_raw();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing slice from {}", path.display()))
}

fn load_volume(files: &[PathBuf]) -> Result<Volume<f32>> {
    let slices = files
        .iter()
        .map(|path| load_slice(path))
        .collect::<Result<Vec<_>>>()?;
    Volume::from_slices(slices).context("stacking slices into a volume")
}

fn save_luma_raw(path: PathBuf, width: usize, height: usize, data: Vec<u8>) -> Result<()> {
    let gray = GrayImage::from_raw(width as u32, height as u32, data)
        .context("constructing GrayImage from raw bytes")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn save_f32_vis(path: PathBuf, img: &Image<f32>) -> Result<()> {
    save_luma_raw(path, img.width(), img.height(), f32_to_u8_vis(img.data()))
}

fn value_range(data: &[f32]) -> (f32, f32) {
    data.iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Min-max stretch to `0..=255`; a flat field maps to black.
fn f32_to_u8_vis(data: &[f32]) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }
    let (min_v, max_v) = value_range(data);
    if (max_v - min_v).abs() < 1e-12 {
        return vec![0u8; data.len()];
    }

    let scale = 255.0 / (max_v - min_v);
    data.iter()
        .map(|&v| ((v - min_v) * scale).round().clamp(0.0, 255.0) as u8)
        .collect()
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
