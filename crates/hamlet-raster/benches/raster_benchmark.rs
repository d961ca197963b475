use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hamlet_bldg::{BuildingGenerator, BuildingStyle, Parcel, RectBuildingGenerator, RoofKind};
use hamlet_geom::{IVec2, IVec3, Orientation, Rect2i};
use hamlet_raster::{BlockTheme, BuildingRasterizer};
use hamlet_terrain::{HeightmapParams, NoiseSurface};
use hamlet_voxel::{BlockType, ChunkRasterTarget};

fn surface() -> NoiseSurface {
    NoiseSurface::new(
        HeightmapParams {
            seed: 42,
            ..Default::default()
        },
        8.0,
    )
}

fn parcels() -> Vec<Parcel> {
    (0..3)
        .flat_map(|i| (0..3).map(move |j| (i, j)))
        .map(|(i, j)| {
            let min = IVec2::new(i * 10, j * 10);
            Parcel::new(
                Rect2i::from_min_max(min, min + IVec2::splat(9)),
                Orientation::ALL[((i + j) % 4) as usize],
            )
        })
        .collect()
}

fn bench_generate(c: &mut Criterion) {
    let surface = surface();
    let parcels = parcels();
    let generator = RectBuildingGenerator::default();
    c.bench_function("generate_9_parcels", |bencher| {
        bencher.iter(|| {
            for parcel in &parcels {
                black_box(generator.generate(parcel, &surface).ok());
            }
        })
    });
}

fn bench_raster_chunk(c: &mut Criterion) {
    let surface = surface();
    let rasterizer = BuildingRasterizer::new(&BlockTheme::uniform(BlockType(1)));
    for kind in [RoofKind::Hip, RoofKind::Gable, RoofKind::Flat] {
        let generator = RectBuildingGenerator::new(BuildingStyle {
            roof_kind: kind,
            ..Default::default()
        });
        let buildings: Vec<_> = parcels()
            .iter()
            .flat_map(|p| generator.generate(p, &surface).unwrap_or_default())
            .collect();
        c.bench_function(&format!("raster_chunk_{kind}"), |bencher| {
            bencher.iter(|| {
                let mut target = ChunkRasterTarget::new(IVec3::ZERO);
                for building in &buildings {
                    rasterizer.raster_building(&mut target, building, &surface);
                }
                black_box(target.version())
            })
        });
    }
}

criterion_group!(benches, bench_generate, bench_raster_chunk);
criterion_main!(benches);
