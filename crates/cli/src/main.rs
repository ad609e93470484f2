//! PerilGIS CLI - disaster impact vector analysis

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use perilgis_analysis::postprocessors::{
    AgePostprocessor, GenderPostprocessor, MinimumNeedsPostprocessor, Postprocessor,
    PostprocessorParams,
};
use perilgis_analysis::vector::{
    points_to_rectangles, split_by_polygon, union_geometry, MarkDirective,
};
use perilgis_core::io::{read_geojson, write_geojson};
use perilgis_core::{Feature, GeoEngine, GeometryKind, MemoryLayer, Schema};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "perilgis")]
#[command(author, version, about = "Disaster impact vector analysis", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a vector layer
    Info {
        /// Input GeoJSON file
        input: PathBuf,
    },
    /// Vector analysis operations
    Vector {
        #[command(subcommand)]
        operation: VectorCommands,
    },
    /// Impact indicator postprocessors
    Postprocess {
        #[command(subcommand)]
        postprocessor: PostprocessCommands,
    },
}

// ─── Vector subcommands ─────────────────────────────────────────────────

#[derive(Subcommand)]
enum VectorCommands {
    /// Expand each point into a rectangle with the point as upper-left corner
    Rectangles {
        /// Input point layer (GeoJSON)
        input: PathBuf,
        /// Output polygon layer
        output: PathBuf,
        /// Length of the horizontal sides
        #[arg(long)]
        dx: f64,
        /// Length of the vertical sides
        #[arg(long)]
        dy: f64,
    },
    /// Union all feature geometries into one dissolved outline
    Dissolve {
        /// Input layer (GeoJSON)
        input: PathBuf,
        /// Output layer holding the single dissolved feature
        output: PathBuf,
    },
    /// Split features by a polygon, marking inside/outside parts
    Split {
        /// Input line or polygon layer (GeoJSON)
        input: PathBuf,
        /// Output layer
        output: PathBuf,
        /// Polygon layer used as the splitting mask
        #[arg(long)]
        mask: PathBuf,
        /// Integer field to tag output features with
        #[arg(long)]
        mark_field: Option<String>,
        /// Value written to the mark field for inside parts
        #[arg(long, default_value = "1")]
        mark_value: i64,
    },
}

// ─── Postprocess subcommands ────────────────────────────────────────────

#[derive(Subcommand)]
enum PostprocessCommands {
    /// Gender-specific humanitarian indicators
    Gender {
        #[arg(long)]
        population_total: f64,
        /// Fraction of the population that is female, in [0, 1]
        #[arg(long)]
        female_ratio: f64,
    },
    /// Age-bracket counts
    Age {
        #[arg(long)]
        population_total: f64,
        #[arg(long)]
        youth_ratio: f64,
        #[arg(long)]
        adult_ratio: f64,
        #[arg(long)]
        elderly_ratio: f64,
    },
    /// Weekly minimum relief needs
    MinimumNeeds {
        #[arg(long)]
        population_total: f64,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn read_layer(path: &PathBuf) -> Result<MemoryLayer> {
    let layer = read_geojson(path).context("Failed to read input layer")?;
    info!("Input: {} {} features", layer.len(), layer.kind());
    Ok(layer)
}

fn read_mask(path: &PathBuf) -> Result<geo_types::Geometry<f64>> {
    let layer = read_geojson(path).context("Failed to read mask layer")?;
    if layer.kind() != GeometryKind::Polygon {
        bail!("mask layer must be polygonal, got {}", layer.kind());
    }
    union_geometry(&GeoEngine::new(), &layer, None).context("mask layer holds no usable geometry")
}

fn write_layer(layer: &MemoryLayer, path: &PathBuf) -> Result<()> {
    write_geojson(layer, path).context("Failed to write output layer")?;
    Ok(())
}

fn done(name: &str, path: &PathBuf, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

fn run_postprocessor(pp: &mut dyn Postprocessor, params: &PostprocessorParams) -> Result<()> {
    pp.setup(params)?;
    pp.process()?;

    println!("Postprocessor: {}", pp.name());
    for result in pp.results() {
        match &result.description {
            Some(description) => {
                println!("  {}: {}  ({})", result.name, result.value, description)
            }
            None => println!("  {}: {}", result.name, result.value),
        }
    }
    Ok(())
}

// ─── Entry point ────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input } => {
            let layer = read_geojson(&input).context("Failed to read input layer")?;

            println!("File: {}", input.display());
            println!("Geometry kind: {}", layer.kind());
            println!("CRS: {}", layer.crs());
            println!("Features: {}", layer.len());
            println!("Fields:");
            for field in layer.schema().fields() {
                println!("  {} ({:?})", field.name(), field.field_type());
            }
            if let Some(extent) = layer.extent() {
                println!(
                    "Extent: ({:.6}, {:.6}) - ({:.6}, {:.6})",
                    extent.min_x, extent.min_y, extent.max_x, extent.max_y
                );
            }
        }

        // ── Vector ───────────────────────────────────────────────────
        Commands::Vector { operation } => match operation {
            VectorCommands::Rectangles {
                input,
                output,
                dx,
                dy,
            } => {
                let points = read_layer(&input)?;
                if points.kind() != GeometryKind::Point {
                    bail!("rectangles expects a point layer, got {}", points.kind());
                }
                let start = Instant::now();
                let polygons = points_to_rectangles(&points, dx, dy)?;
                let elapsed = start.elapsed();
                write_layer(&polygons, &output)?;
                done("Rectangles", &output, elapsed);
            }
            VectorCommands::Dissolve { input, output } => {
                let layer = read_layer(&input)?;
                let start = Instant::now();
                let Some(geometry) = union_geometry(&GeoEngine::new(), &layer, None) else {
                    bail!("input layer holds no features to dissolve");
                };
                let elapsed = start.elapsed();

                let kind = GeometryKind::of(&geometry)
                    .context("dissolved geometry has no homogeneous kind")?;
                let mut dissolved = MemoryLayer::new(kind, layer.crs().clone(), Schema::empty());
                dissolved.start_editing()?;
                dissolved.add_features(vec![Feature::from_geometry(geometry)])?;
                dissolved.commit_changes()?;
                dissolved.update_extents();

                write_layer(&dissolved, &output)?;
                done("Dissolve", &output, elapsed);
            }
            VectorCommands::Split {
                input,
                output,
                mask,
                mark_field,
                mark_value,
            } => {
                let layer = read_layer(&input)?;
                let mask = read_mask(&mask)?;
                let mark = mark_field.map(|field| MarkDirective::new(field, mark_value));

                let start = Instant::now();
                let result =
                    split_by_polygon(&GeoEngine::new(), &layer, &mask, None, mark.as_ref())?;
                let elapsed = start.elapsed();

                info!("Output: {} features", result.len());
                write_layer(&result, &output)?;
                done("Split", &output, elapsed);
            }
        },

        // ── Postprocess ──────────────────────────────────────────────
        Commands::Postprocess { postprocessor } => match postprocessor {
            PostprocessCommands::Gender {
                population_total,
                female_ratio,
            } => {
                let params = PostprocessorParams::from([
                    ("population_total".to_string(), population_total),
                    ("female_ratio".to_string(), female_ratio),
                ]);
                run_postprocessor(&mut GenderPostprocessor::new(), &params)?;
            }
            PostprocessCommands::Age {
                population_total,
                youth_ratio,
                adult_ratio,
                elderly_ratio,
            } => {
                let params = PostprocessorParams::from([
                    ("population_total".to_string(), population_total),
                    ("youth_ratio".to_string(), youth_ratio),
                    ("adult_ratio".to_string(), adult_ratio),
                    ("elderly_ratio".to_string(), elderly_ratio),
                ]);
                run_postprocessor(&mut AgePostprocessor::new(), &params)?;
            }
            PostprocessCommands::MinimumNeeds { population_total } => {
                let params = PostprocessorParams::from([(
                    "population_total".to_string(),
                    population_total,
                )]);
                run_postprocessor(&mut MinimumNeedsPostprocessor::new(), &params)?;
            }
        },
    }

    Ok(())
}
