use grid_search::{GridConfig, GridSearchState, MazeConfig, PathingGrid, SearchOutcome, Session};
use rand::{rngs::StdRng, SeedableRng};

// Generates a random maze on a 20x20 grid, then prints every tenth search frame and the
// final route. Pass a seed as the first argument to get a different maze.

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut session = Session::new(GridConfig::new(20)).unwrap();
    let maze = session
        .generate(&mut rng, &MazeConfig::for_size(20))
        .unwrap();
    println!("{}", session.grid);
    println!("Connected: {}", maze.connected);

    let mut frame = 0;
    let mut observer = |grid: &PathingGrid, state: &GridSearchState| {
        frame += 1;
        if frame % 10 == 0 {
            println!("Step {frame}, {} cells on the frontier:", state.frontier_len());
            println!("{grid}");
        }
    };
    let (run, path) = session.run(&mut observer).unwrap();
    match run.outcome {
        SearchOutcome::Found => {
            println!("Route of {} steps:", path.map_or(0, |p| p.len()));
            println!("{}", session.grid);
        }
        outcome => println!("{outcome:?} after {} steps", run.steps),
    }
}
