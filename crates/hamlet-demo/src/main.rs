//! Demo binary that generates a settlement on noise terrain.
//!
//! Configuration is loaded from `hamlet.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p hamlet-demo -- --roof gable --chunks 6`.

mod parcels;
mod worker;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use hamlet_bldg::{
    BuildingCache, BuildingFacetProvider, BuildingStyle, ColumnStyle, ModelError, Parcel,
    RectBuildingGenerator, RoofKind, Settlement,
};
use hamlet_config::{CliArgs, Config, ConfigError};
use hamlet_geom::{Border3, IVec2, IVec3, Rect2i};
use hamlet_raster::{BlockTheme, BuildingRasterizer, ThemeError, default_blocks};
use hamlet_terrain::{DiagonalMirror, HeightSurface, HeightmapParams, NoiseSurface};
use hamlet_voxel::{BlockRegistry, BlockType, CHUNK_SIZE, RegistryError};
use thiserror::Error;
use tracing::info;

use crate::parcels::GridParcelSource;
use crate::worker::{RegionPool, World};

#[derive(Debug, Error)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Theme(#[from] ThemeError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("column block {0} is not registered")]
    MissingColumnBlock(&'static str),

    #[error("failed to spawn region workers: {0}")]
    Spawn(#[from] std::io::Error),
}

fn main() {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone() {
        Some(dir) => dir,
        None => match Config::default_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    hamlet_log::init_logging(Some(&config_dir.join("logs")), Some(&config));

    if let Err(e) = run(&config, config_dir) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: &Config, config_dir: PathBuf) -> Result<(), DemoError> {
    config.validate()?;
    info!("config directory: {}", config_dir.display());

    let mut registry = BlockRegistry::new();
    for def in default_blocks() {
        registry.register(def)?;
    }
    let theme = BlockTheme::resolve(
        &registry,
        config.theme.iter().map(|(role, name)| (role.as_str(), name.as_str())),
    )?;

    let generator = RectBuildingGenerator::new(building_style(config, &registry)?);
    let cache = Arc::new(BuildingCache::new(Arc::new(generator)));

    let region = &config.region;
    let settlements = region
        .settlements
        .iter()
        .map(|s| Settlement::new(s.name.clone(), IVec2::new(s.x, s.z), s.radius))
        .collect();

    let world = Arc::new(World {
        provider: BuildingFacetProvider::new(Arc::clone(&cache)),
        rasterizer: BuildingRasterizer::new(&theme),
        parcels: GridParcelSource::new(region.parcel_size, region.street_width, settlements),
        surface: height_surface(config),
        border: Border3::new(region.border_top, region.border_bottom, region.border_sides),
    });

    let threads = match region.worker_threads {
        0 => RegionPool::default_thread_count(),
        n => n,
    };
    let chunks: Vec<IVec3> = (0..region.chunks_y as i32)
        .flat_map(|y| {
            (0..region.chunks_z as i32).flat_map(move |z| {
                (0..region.chunks_x as i32).map(move |x| IVec3::new(x, y, z))
            })
        })
        .collect();
    info!("generating {} chunk(s) on {threads} thread(s)", chunks.len());

    let start = Instant::now();
    let pool = RegionPool::new(Arc::clone(&world), threads, threads * 2)?;
    let results = pool.run(chunks);
    let elapsed = start.elapsed();

    let solid: usize = results.iter().map(|r| r.target.data().count_solid()).sum();
    let writes: u64 = results.iter().map(|r| r.target.write_count()).sum();
    let slowest = results.iter().map(|r| r.generation_time_us).max().unwrap_or(0);
    for result in &results {
        tracing::debug!(
            "chunk {}: {} settlement(s), {} building(s), {} drawn, {} us",
            result.chunk_pos,
            result.settlements,
            result.buildings,
            result.drawn,
            result.generation_time_us
        );
    }

    let parcels = attach_buildings(&world.parcels, &cache, config);
    let houses: usize = parcels.iter().map(|p| p.buildings().len()).sum();

    info!(
        "{} chunk(s) in {:.1} ms (slowest {} us)",
        results.len(),
        elapsed.as_secs_f64() * 1000.0,
        slowest
    );
    info!(
        "{houses} building(s) on {} parcel(s), {} generator run(s)",
        parcels.len(),
        cache.computations()
    );
    info!("{writes} voxel write(s), {solid} solid voxel(s)");
    Ok(())
}

fn building_style(config: &Config, registry: &BlockRegistry) -> Result<BuildingStyle, DemoError> {
    let building = &config.building;
    let corner_columns = if building.corner_columns {
        let lookup = |name: &'static str| -> Result<BlockType, DemoError> {
            registry
                .lookup_by_name(name)
                .ok_or(DemoError::MissingColumnBlock(name))
        };
        Some(ColumnStyle {
            base: lookup("column_base")?,
            shaft: lookup("column_shaft")?,
            capital: lookup("column_capital")?,
        })
    } else {
        None
    };

    Ok(BuildingStyle {
        inset_margin: building.inset_margin,
        wall_height: building.wall_height,
        roof_kind: building.roof_kind.parse::<RoofKind>()?,
        roof_pitch: building.roof_pitch,
        roof_overhang: building.roof_overhang,
        apex_rise: building.apex_rise,
        flat_border_height: building.flat_border_height,
        corner_columns,
    })
}

fn height_surface(config: &Config) -> Box<dyn HeightSurface> {
    let terrain = &config.terrain;
    let params = HeightmapParams {
        seed: terrain.seed,
        octaves: terrain.octaves,
        base_frequency: terrain.base_frequency,
        amplitude: terrain.amplitude,
        ..Default::default()
    };
    let surface = NoiseSurface::new(params, terrain.base_height);
    if terrain.mirror_diagonal {
        Box::new(DiagonalMirror::new(surface))
    } else {
        Box::new(surface)
    }
}

/// Hands every cached building back to the parcel it was generated for.
fn attach_buildings(
    source: &GridParcelSource,
    cache: &BuildingCache,
    config: &Config,
) -> Vec<Parcel> {
    let size = CHUNK_SIZE as i32;
    let region = &config.region;
    let world_area = Rect2i::from_min_max(
        IVec2::ZERO,
        IVec2::new(region.chunks_x as i32 * size - 1, region.chunks_z as i32 * size - 1),
    );

    let mut parcels = source.parcels_in(world_area);
    for parcel in &mut parcels {
        match cache.get(&parcel.key()) {
            Some(Ok(buildings)) => {
                for building in buildings.iter() {
                    parcel.add_building(Arc::clone(building));
                }
            }
            Some(Err(e)) => tracing::warn!("parcel {} has no buildings: {e}", parcel.key()),
            None => {}
        }
    }
    parcels
}
