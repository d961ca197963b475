//! Region generation on a pool of worker threads.
//!
//! Every region is one chunk. Workers build the region's parcel facet, ask the
//! shared provider for its buildings and rasterize them into a fresh chunk.

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, bounded};
use hamlet_bldg::{BuildingFacetProvider, GeneratingRegion};
use hamlet_geom::{Border3, IVec3, Region3i};
use hamlet_raster::BuildingRasterizer;
use hamlet_terrain::HeightSurface;
use hamlet_voxel::{CHUNK_SIZE, ChunkRasterTarget};

use crate::parcels::GridParcelSource;

/// Everything a worker needs, shared read-only between all of them.
pub struct World {
    pub provider: BuildingFacetProvider,
    pub rasterizer: BuildingRasterizer,
    pub parcels: GridParcelSource,
    pub surface: Box<dyn HeightSurface>,
    pub border: Border3,
}

/// A finished chunk.
#[derive(Debug)]
pub struct GeneratedRegion {
    pub chunk_pos: IVec3,
    pub target: ChunkRasterTarget,
    /// Settlements touching the bordered region.
    pub settlements: usize,
    /// Buildings in the region's facet.
    pub buildings: usize,
    /// Buildings that reached into the chunk.
    pub drawn: usize,
    pub generation_time_us: u64,
}

/// Generates one chunk synchronously.
pub fn generate_region(world: &World, chunk_pos: IVec3) -> Option<GeneratedRegion> {
    let start = Instant::now();
    let size = CHUNK_SIZE as i32;
    let region = Region3i::cube(chunk_pos * size, size)?;
    let region = GeneratingRegion::new(region, world.border);

    let settlements = world.parcels.settlement_facet(&region);
    let parcels = world.parcels.parcel_facet(&region);
    let buildings = world.provider.process(&region, &parcels, world.surface.as_ref());

    let mut target = ChunkRasterTarget::new(chunk_pos);
    let drawn = world
        .rasterizer
        .raster_facet(&mut target, &buildings, world.surface.as_ref());

    Some(GeneratedRegion {
        chunk_pos,
        target,
        settlements: settlements.len(),
        buildings: buildings.len(),
        drawn,
        generation_time_us: start.elapsed().as_micros() as u64,
    })
}

/// A fixed-size pool of region workers fed through a bounded channel.
pub struct RegionPool {
    task_sender: Option<Sender<IVec3>>,
    result_receiver: Receiver<GeneratedRegion>,
    workers: Vec<JoinHandle<()>>,
}

impl RegionPool {
    /// Spawns `thread_count` workers (at least one).
    pub fn new(world: Arc<World>, thread_count: usize, capacity: usize) -> std::io::Result<Self> {
        let capacity = capacity.max(1);
        let (task_sender, task_receiver) = bounded::<IVec3>(capacity);
        let (result_sender, result_receiver) = bounded::<GeneratedRegion>(capacity);

        let mut workers = Vec::new();
        for i in 0..thread_count.max(1) {
            let receiver = task_receiver.clone();
            let sender = result_sender.clone();
            let world = Arc::clone(&world);
            let handle = std::thread::Builder::new()
                .name(format!("region-worker-{i}"))
                .spawn(move || {
                    while let Ok(chunk_pos) = receiver.recv() {
                        let Some(result) = generate_region(&world, chunk_pos) else {
                            tracing::warn!("skipping chunk {chunk_pos}: empty region");
                            continue;
                        };
                        if sender.send(result).is_err() {
                            break;
                        }
                    }
                })?;
            workers.push(handle);
        }

        Ok(Self {
            task_sender: Some(task_sender),
            result_receiver,
            workers,
        })
    }

    /// One worker per CPU, minus one for the collecting thread.
    pub fn default_thread_count() -> usize {
        num_cpus::get().saturating_sub(1).max(1)
    }

    /// Generates every chunk in `chunks` and returns the results in
    /// completion order.
    pub fn run(mut self, chunks: Vec<IVec3>) -> Vec<GeneratedRegion> {
        let expected = chunks.len();
        let mut results = Vec::with_capacity(expected);

        if let Some(sender) = self.task_sender.take() {
            let feeder = std::thread::spawn(move || {
                for chunk_pos in chunks {
                    if sender.send(chunk_pos).is_err() {
                        break;
                    }
                }
            });
            while results.len() < expected {
                match self.result_receiver.recv() {
                    Ok(region) => results.push(region),
                    Err(_) => break,
                }
            }
            if feeder.join().is_err() {
                tracing::error!("task feeder panicked");
            }
        }

        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                tracing::error!("region worker panicked");
            }
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hamlet_bldg::{BuildingCache, RectBuildingGenerator, Settlement};
    use hamlet_geom::IVec2;
    use hamlet_raster::BlockTheme;
    use hamlet_terrain::FlatSurface;
    use hamlet_voxel::BlockType;

    fn world() -> Arc<World> {
        let cache = BuildingCache::new(Arc::new(RectBuildingGenerator::default()));
        Arc::new(World {
            provider: BuildingFacetProvider::new(Arc::new(cache)),
            rasterizer: BuildingRasterizer::new(&BlockTheme::uniform(BlockType(1))),
            parcels: GridParcelSource::new(
                12,
                2,
                vec![Settlement::new("Test", IVec2::new(32, 32), 40)],
            ),
            surface: Box::new(FlatSurface::new(8.0)),
            border: Border3::new(0, 0, 16),
        })
    }

    #[test]
    fn test_single_region_has_buildings() {
        let region = generate_region(&world(), IVec3::ZERO).unwrap();
        assert!(region.buildings > 0);
        assert!(region.drawn > 0);
        assert!(region.target.data().count_solid() > 0);
        assert_eq!(region.settlements, 1);
    }

    #[test]
    fn test_pool_generates_every_chunk_once() {
        let world = world();
        let chunks: Vec<_> = (0..3)
            .flat_map(|x| (0..3).map(move |z| IVec3::new(x, 0, z)))
            .collect();
        let pool = RegionPool::new(Arc::clone(&world), 3, 4).unwrap();
        let results = pool.run(chunks.clone());

        assert_eq!(results.len(), chunks.len());
        for chunk in &chunks {
            assert_eq!(results.iter().filter(|r| r.chunk_pos == *chunk).count(), 1);
        }
        // Parcels shared between chunks were generated once.
        let cache = world.provider.cache();
        assert_eq!(cache.computations() as usize, cache.len());
    }

    #[test]
    fn test_pool_matches_sequential_generation() {
        let world = world();
        let pool = RegionPool::new(Arc::clone(&world), 2, 2).unwrap();
        let results = pool.run(vec![IVec3::new(0, 0, 0), IVec3::new(1, 0, 0)]);
        for result in results {
            let sequential = generate_region(&world, result.chunk_pos).unwrap();
            assert_eq!(result.target.write_count(), sequential.target.write_count());
            assert_eq!(
                result.target.data().count_solid(),
                sequential.target.data().count_solid()
            );
        }
    }
}
