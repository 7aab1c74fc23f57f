use ndarray::Array2;

/// Single coordinate axis, also the side length of a board.
pub type Coord = u8;

/// Count type for mines and totals over a board.
pub type CellCount = u16;

/// `(row, col)` position on a board.
pub type Coord2 = (Coord, Coord);

pub const fn total_cells(size: Coord) -> CellCount {
    let size = size as CellCount;
    size.saturating_mul(size)
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let size = self.dim().0.try_into().unwrap();
        NeighborIter::new(center, size)
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `center`, returning a value only while it stays inside
/// a `size` × `size` board.
fn apply_delta(center: Coord2, delta: (isize, isize), size: Coord) -> Option<Coord2> {
    let (row, col) = center;
    let (d_row, d_col) = delta;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= size {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= size {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterator over the up-to-8 in-bounds neighbors of a cell.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    size: Coord,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, size: Coord) -> Self {
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(
                self.center,
                DISPLACEMENTS[self.index as usize],
                self.size,
            );
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn neighbors(center: Coord2, size: Coord) -> Vec<Coord2> {
        NeighborIter::new(center, size).collect()
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        assert_eq!(neighbors((1, 1), 3).len(), 8);
    }

    #[test]
    fn corner_cell_has_three_neighbors() {
        let mut found = neighbors((0, 0), 4);
        found.sort();

        assert_eq!(found, [(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn edge_cell_has_five_neighbors() {
        assert_eq!(neighbors((0, 2), 5).len(), 5);
    }

    #[test]
    fn neighbors_never_leave_the_board() {
        for row in 0..4 {
            for col in 0..4 {
                for (n_row, n_col) in neighbors((row, col), 4) {
                    assert!(n_row < 4 && n_col < 4);
                }
            }
        }
    }
}
