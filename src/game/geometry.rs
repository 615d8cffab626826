use super::constants::GRID_SIZE;
use super::types::{Cobra, Coordinate, Direction};
use rand::Rng;

/// Moves one cell. `x` is the row axis, `y` the column axis.
pub fn offset(from: Coordinate, direction: Direction) -> Coordinate {
    match direction {
        Direction::Right => Coordinate::new(from.x, from.y + 1),
        Direction::Left => Coordinate::new(from.x, from.y - 1),
        Direction::Up => Coordinate::new(from.x - 1, from.y),
        Direction::Down => Coordinate::new(from.x + 1, from.y),
    }
}

pub fn in_bounds(cell: Coordinate) -> bool {
    (0..GRID_SIZE).contains(&cell.x) && (0..GRID_SIZE).contains(&cell.y)
}

pub fn random_cell<R: Rng + ?Sized>(rng: &mut R) -> Coordinate {
    Coordinate::new(rng.gen_range(0..GRID_SIZE), rng.gen_range(0..GRID_SIZE))
}

/// Rejection-samples a cell the cobra does not occupy. The caller guarantees at
/// least one free cell exists.
pub fn random_free_cell<R: Rng + ?Sized>(rng: &mut R, cobra: &Cobra) -> Coordinate {
    loop {
        let cell = random_cell(rng);
        if !cobra.occupies(cell) {
            return cell;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn offsets_follow_grid_axes() {
        let origin = Coordinate::new(5, 5);
        assert_eq!(offset(origin, Direction::Right), Coordinate::new(5, 6));
        assert_eq!(offset(origin, Direction::Left), Coordinate::new(5, 4));
        assert_eq!(offset(origin, Direction::Up), Coordinate::new(4, 5));
        assert_eq!(offset(origin, Direction::Down), Coordinate::new(6, 5));
    }

    #[test]
    fn bounds_are_inclusive_zero_to_fourteen() {
        assert!(in_bounds(Coordinate::new(0, 0)));
        assert!(in_bounds(Coordinate::new(14, 14)));
        assert!(!in_bounds(Coordinate::new(-1, 0)));
        assert!(!in_bounds(Coordinate::new(0, 15)));
    }

    #[test]
    fn free_cell_finds_the_only_gap() {
        let mut body = Vec::new();
        for x in 0..GRID_SIZE {
            for y in 0..GRID_SIZE {
                body.push(Coordinate::new(x, y));
            }
        }
        let gap = Coordinate::new(7, 3);
        body.retain(|cell| *cell != gap && *cell != Coordinate::new(0, 0));
        let cobra = Cobra {
            head: Coordinate::new(0, 0),
            body,
            facing: Direction::Right,
        };
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(random_free_cell(&mut rng, &cobra), gap);
    }

    #[test]
    fn free_cell_never_lands_on_the_cobra() {
        let cobra = Cobra {
            head: Coordinate::new(2, 2),
            body: vec![Coordinate::new(2, 1), Coordinate::new(2, 0)],
            facing: Direction::Right,
        };
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let cell = random_free_cell(&mut rng, &cobra);
            assert!(in_bounds(cell));
            assert!(!cobra.occupies(cell));
        }
    }
}
