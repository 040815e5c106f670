use criterion::{criterion_group, criterion_main, Criterion};
use grid_search::{create_session, Algorithm, CellRole, Coord, Grid};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

fn random_grids(n: i32, count: usize, density: f32) -> Vec<Grid> {
    let mut rng = StdRng::seed_from_u64(0);
    (0..count)
        .map(|_| {
            let mut grid = Grid::new(n, n).unwrap();
            grid.set_role(Coord::new(0, 0), CellRole::Source).unwrap();
            grid.set_role(Coord::new(n - 1, n - 1), CellRole::Destination).unwrap();
            grid.randomize_obstacles((density * (n * n) as f32) as i32, &mut rng).unwrap();
            grid
        })
        .collect()
}

fn strategy_bench(c: &mut Criterion) {
    for n in [32, 64] {
        let grids = random_grids(n, 10, 0.25);
        for algorithm in Algorithm::ALL {
            c.bench_function(format!("{n}x{n}, {algorithm}").as_str(), |b| {
                b.iter(|| {
                    for grid in &grids {
                        let mut session = create_session(grid, algorithm).unwrap();
                        black_box(session.run_to_completion().unwrap().status);
                    }
                })
            });
        }
    }
}

/// Cost of driving a search one step at a time, as a visualizer does.
fn stepping_bench(c: &mut Criterion) {
    let grids = random_grids(64, 10, 0.25);
    c.bench_function("64x64, A* stepwise", |b| {
        b.iter(|| {
            for grid in &grids {
                let mut session = create_session(grid, Algorithm::AStar).unwrap();
                while !session.is_done() {
                    black_box(session.advance().unwrap());
                }
            }
        })
    });
}

criterion_group!(benches, strategy_bench, stepping_bench);
criterion_main!(benches);
