use grid_search::{search, Algorithm, Grid};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  D|
//  ___
// where
// - # marks an obstacle
// - S marks the source
// - D marks the destination
//
// Nodes have a 4-neighborhood

fn main() {
    let grid: Grid = "S..\n.#.\n..D".parse().unwrap();
    println!("{}", grid);
    for algorithm in Algorithm::ALL {
        let result = search(&grid, algorithm).unwrap();
        println!(
            "{}: {:?}, cost {:?}, {} cells explored",
            algorithm,
            result.status,
            result.cost,
            result.explored.len()
        );
        for p in result.path {
            println!("  {}", p);
        }
    }
}
