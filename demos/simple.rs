use grid_search::{search, GridConfig, NoopObserver, PathingGrid, Role};
use grid_util::point::Point;

// In this example a path is found on a 5x5 grid with shape
// .....
// .S#E.
// ..#..
// .....
// .....
// where
// - # marks a barrier
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut pathing_grid: PathingGrid = GridConfig::new(5).border(false).build().unwrap();
    let start = Point::new(1, 1);
    let end = Point::new(1, 3);
    pathing_grid.set_role(start, Role::Start).unwrap();
    pathing_grid.set_role(end, Role::End).unwrap();
    pathing_grid.set_role(Point::new(1, 2), Role::Barrier).unwrap();
    pathing_grid.set_role(Point::new(2, 2), Role::Barrier).unwrap();
    println!("{}", pathing_grid);
    let run = search(&mut pathing_grid, start, end, &mut NoopObserver).unwrap();
    if let Some(path) = run.path(&mut pathing_grid) {
        println!("A path of {} steps has been found:", path.len());
        for p in path {
            println!("{:?}", p);
        }
        println!("{}", pathing_grid);
    }
}
