//! Fuzzes the strategies by checking for many random grids that a path is found exactly when the
//! destination shares a connected component with the source, and that the strategies agree on
//! the optimal length or cost.
use grid_search::{search, Algorithm, CellRole, Coord, Grid, SearchResult};
use rand::prelude::*;

fn random_grid(n: i32, rng: &mut StdRng, weighted: bool) -> Grid {
    let mut grid = Grid::new(n, n).unwrap();
    grid.set_role(Coord::new(0, 0), CellRole::Source).unwrap();
    grid.set_role(Coord::new(n - 1, n - 1), CellRole::Destination).unwrap();
    let obstacles = rng.gen_range(0..(n * n / 2));
    grid.randomize_obstacles(obstacles, rng).unwrap();
    if weighted {
        for row in 0..n {
            for col in 0..n {
                grid.set_cost(Coord::new(row, col), rng.gen_range(1..=9)).unwrap();
            }
        }
    }
    grid
}

fn assert_valid_path(grid: &Grid, result: &SearchResult) {
    assert_eq!(result.path.first().copied(), grid.source());
    assert_eq!(result.path.last().copied(), grid.destination());
    for pair in result.path.windows(2) {
        assert_eq!(pair[0].manhattan_distance(&pair[1]), 1);
        assert!(grid.is_passable(pair[1]));
    }
    assert_eq!(result.cost, Some(grid.path_cost(&result.path)));
}

#[test]
fn fuzz() {
    const N: i32 = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let grid = random_grid(N, &mut rng, false);
        let start = Coord::new(0, 0);
        let end = Coord::new(N - 1, N - 1);
        let reachable = grid.reachable(&start, &end);
        let results = Algorithm::ALL.map(|algorithm| search(&grid, algorithm).unwrap());
        for (algorithm, result) in Algorithm::ALL.iter().zip(&results) {
            // Show the grid if the outcome disagrees with the components
            if result.is_found() != reachable {
                println!("{algorithm}\n{grid}");
            }
            assert_eq!(result.is_found(), reachable);
            if reachable {
                assert_valid_path(&grid, result);
                assert!(result.hops().unwrap() >= start.manhattan_distance(&end) as usize);
                assert_eq!(result.hops(), results[0].hops(), "{algorithm}\n{grid}");
            }
        }
    }
}

#[test]
fn fuzz_weighted_cost() {
    const N: i32 = 7;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRIDS {
        let grid = random_grid(N, &mut rng, true);
        let dijkstra = search(&grid, Algorithm::Dijkstra).unwrap();
        let astar = search(&grid, Algorithm::AStar).unwrap();
        let bellman_ford = search(&grid, Algorithm::BellmanFord).unwrap();
        let bfs = search(&grid, Algorithm::BreadthFirst).unwrap();
        assert_eq!(dijkstra.cost, astar.cost, "\n{grid}");
        assert_eq!(dijkstra.cost, bellman_ford.cost, "\n{grid}");
        if dijkstra.is_found() {
            for result in [&dijkstra, &astar, &bellman_ford, &bfs] {
                assert_valid_path(&grid, result);
            }
            assert!(bfs.hops() <= dijkstra.hops());
            assert!(bfs.cost >= dijkstra.cost);
        }
    }
}
