use grid_search::{create_session, Algorithm, CellRole, Coord, Grid, SessionState};
use rand::{rngs::StdRng, SeedableRng};

// Drives an A* session one step at a time on a randomly obstructed grid, printing the cells a
// visualizer would repaint after each step.

fn main() {
    let mut grid = Grid::new(8, 12).unwrap();
    grid.set_role(Coord::new(0, 0), CellRole::Source).unwrap();
    grid.set_role(Coord::new(7, 11), CellRole::Destination).unwrap();
    grid.randomize_obstacles(25, &mut StdRng::seed_from_u64(4)).unwrap();
    println!("{}", grid);

    let mut session = create_session(&grid, Algorithm::AStar).unwrap();
    while !session.is_done() {
        let progress = session.advance().unwrap();
        let show = |cells: &[Coord]| {
            cells
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        println!(
            "step {:3}: finalized [{}] candidates [{}]",
            session.steps(),
            show(progress.finalized.as_slice()),
            show(progress.candidates.as_slice())
        );
    }
    match session.state() {
        SessionState::Completed => println!("Path: {:?}", session.result().path),
        _ => println!("Destination is unreachable"),
    }
}
