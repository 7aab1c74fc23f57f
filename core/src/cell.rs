use serde::{Deserialize, Serialize};

/// One grid position. Created at board generation, mutated only by reveal and
/// flag operations, replaced wholesale when a new board is generated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Number of mines among the up-to-8 neighbors. Stays 0 (unused) on mine
    /// cells.
    pub adjacent: u8,
}

impl Cell {
    /// A safe cell still standing between the player and a win.
    pub const fn is_hidden_safe(self) -> bool {
        !self.is_mine && !self.is_revealed
    }
}
