use ndarray::Array2;

use super::*;

/// Seeded generator that places mines by rejection sampling: draw uniform
/// `(row, col)` pairs and skip cells that already hold a mine until the
/// requested count is placed.
///
/// Expected O(mines) for sparse boards; the density cap of `size²−1` keeps
/// the tail bounded even for near-full boards, since at least one free cell
/// always remains.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        use rand::prelude::*;

        let size = config.size.max(GameConfig::MIN_SIZE);
        let max_mines = total_cells(size) - 1;
        let mines = config.mines.clamp(1, max_mines);
        if size != config.size || mines != config.mines {
            log::warn!(
                "unclamped config {:?}, generating {}x{} with {} mines",
                config,
                size,
                size,
                mines
            );
        }

        let side = usize::from(size);
        let mut cells: Array2<Cell> = Array2::default((side, side));
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed = 0;

        while placed < mines {
            let coords: Coord2 = (rng.gen_range(0..size), rng.gen_range(0..size));
            let cell = &mut cells[coords.to_nd_index()];
            if !cell.is_mine {
                cell.is_mine = true;
                placed += 1;
            }
        }

        Board::from_cells(cells)
    }
}
