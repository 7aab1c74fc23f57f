#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use ranking::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod game;
mod generator;
mod ranking;
mod types;

/// Board dimensions as requested by the player: a square of `size` cells per
/// side containing `mines` mines.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    /// Minimum playable side length. Anything smaller cannot hold a mine and
    /// a safe cell at the same time.
    pub const MIN_SIZE: Coord = 2;

    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps instead of rejecting: `size` to at least [`Self::MIN_SIZE`],
    /// `mines` into `1..=size²−1` so every board keeps at least one safe
    /// cell. Out-of-range requests are logged, not surfaced.
    pub fn new(size: Coord, mines: CellCount) -> Self {
        let clamped_size = size.max(Self::MIN_SIZE);
        if clamped_size != size {
            log::warn!("board size {} too small, clamped to {}", size, clamped_size);
        }

        let max_mines = total_cells(clamped_size) - 1;
        let clamped_mines = mines.clamp(1, max_mines);
        if clamped_mines != mines {
            log::warn!("mine count {} out of range, clamped to {}", mines, clamped_mines);
        }

        Self::new_unchecked(clamped_size, clamped_mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        total_cells(self.size)
    }

    pub const fn max_mines(&self) -> CellCount {
        self.total_cells() - 1
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_clamps_undersized_board() {
        let config = GameConfig::new(0, 5);

        assert_eq!(config.size, GameConfig::MIN_SIZE);
        assert_eq!(config.mines, 3);
    }

    #[test]
    fn config_clamps_mines_to_leave_a_safe_cell() {
        let config = GameConfig::new(4, 99);

        assert_eq!(config.mines, 15);
    }

    #[test]
    fn config_requires_at_least_one_mine() {
        let config = GameConfig::new(8, 0);

        assert_eq!(config.mines, 1);
    }

    #[test]
    fn config_in_range_is_untouched() {
        let config = GameConfig::new(8, 10);

        assert_eq!(config, GameConfig::new_unchecked(8, 10));
    }
}
