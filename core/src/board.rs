use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of [`Cell`]s with a cached mine count.
///
/// Mine placement is immutable after construction; the `adjacent` count of
/// every non-mine cell equals the number of mine-holding neighbors, computed
/// once when the board is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Builds a board from cells that have their mines placed but no
    /// adjacency counts yet.
    pub(crate) fn from_cells(mut cells: Array2<Cell>) -> Self {
        let mine_count = cells
            .iter()
            .filter(|cell| cell.is_mine)
            .count()
            .try_into()
            .unwrap();

        compute_adjacency(&mut cells);

        Self { cells, mine_count }
    }

    /// Deterministic constructor placing mines at the given coordinates.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let side = usize::from(size);
        let mut cells: Array2<Cell> = Array2::default((side, side));

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            cells[coords.to_nd_index()].is_mine = true;
        }

        Ok(Self::from_cells(cells))
    }

    pub fn size(&self) -> Coord {
        self.cells.dim().0.try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Win check: true iff every non-mine cell is revealed, regardless of
    /// mine reveal or flag state.
    pub fn all_safe_revealed(&self) -> bool {
        !self.cells.iter().any(|cell| cell.is_hidden_safe())
    }

    /// Turns every mine face-up. Loss handling only; touches no safe cell.
    pub(crate) fn reveal_all_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.is_mine {
                cell.is_revealed = true;
            }
        }
    }
}

fn compute_adjacency(cells: &mut Array2<Cell>) {
    let size: Coord = cells.dim().0.try_into().unwrap();

    for row in 0..size {
        for col in 0..size {
            let coords = (row, col);
            if cells[coords.to_nd_index()].is_mine {
                continue;
            }

            let count = cells
                .iter_neighbors(coords)
                .filter(|&pos| cells[pos.to_nd_index()].is_mine)
                .count();
            cells[coords.to_nd_index()].adjacent = count.try_into().unwrap();
        }
    }
}
