use alloc::collections::VecDeque;
use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Active,
    Won,
    Lost,
}

impl GamePhase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Player-visible inputs, plus the timer tick. Restarting is not an action:
/// a new game is a new [`Game`] built from a freshly generated board.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Reveal(Coord2),
    ToggleFlag(Coord2),
    Tick,
}

/// Full state of one game in progress.
///
/// Mutating operations follow the one-of-won/lost contract: once the phase
/// is finished, every further input is rejected with
/// [`GameError::AlreadyEnded`] until a new `Game` replaces this one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    phase: GamePhase,
    elapsed_secs: u32,
    flagged_count: Saturating<CellCount>,
    pending_name_prompt: bool,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            phase: GamePhase::default(),
            elapsed_secs: 0,
            flagged_count: Saturating(0),
            pending_name_prompt: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// The 1-second interval should be running exactly while this holds.
    pub fn timer_active(&self) -> bool {
        matches!(self.phase, GamePhase::Active)
    }

    pub fn mines_left(&self) -> i32 {
        i32::from(self.board.mine_count()) - i32::from(self.flagged_count.0)
    }

    /// Set when the game is won; the presentation layer observes it, asks
    /// the player for a name, and resolves it via [`Self::resolve_name_prompt`].
    pub fn pending_name_prompt(&self) -> bool {
        self.pending_name_prompt
    }

    /// One-shot: returns whether the prompt was still pending. Guarantees a
    /// win triggers at most one ranking-record attempt.
    pub fn resolve_name_prompt(&mut self) -> bool {
        core::mem::take(&mut self.pending_name_prompt)
    }

    /// Pure step function: the next state from the previous state plus one
    /// action, leaving `self` untouched. Rejected or no-op inputs yield an
    /// unchanged clone, so the caller can always replace its state with the
    /// returned one.
    #[must_use]
    pub fn apply(&self, action: Action) -> Game {
        let mut next = self.clone();
        match action {
            Action::Reveal(coords) => {
                let _ = next.reveal(coords);
            }
            Action::ToggleFlag(coords) => {
                let _ = next.toggle_flag(coords);
            }
            Action::Tick => next.tick(),
        }
        next
    }

    /// Reveals a cell. Revealed and flagged targets are no-ops; a mine ends
    /// the game and turns every mine face-up; a zero-adjacency cell floods
    /// its connected zero region and that region's non-mine border.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = self.board.cell_at(coords);
        if cell.is_revealed || cell.is_flagged {
            return Ok(RevealOutcome::NoChange);
        }

        self.mark_started();

        if cell.is_mine {
            self.board.reveal_all_mines();
            self.phase = GamePhase::Lost;
            return Ok(RevealOutcome::HitMine);
        }

        self.flood_reveal(coords);

        if self.board.all_safe_revealed() {
            self.phase = GamePhase::Won;
            self.pending_name_prompt = true;
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Revealed)
        }
    }

    /// Toggles the flag on an unrevealed cell. Allowed before the first
    /// reveal and while active, never once the game is finished.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = self.board.cell_mut(coords);
        if cell.is_revealed {
            return Ok(MarkOutcome::NoChange);
        }

        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        Ok(MarkOutcome::Changed)
    }

    /// Advances the elapsed-seconds counter. Driven by the presentation
    /// layer's 1-second interval; counts only while the game is active.
    pub fn tick(&mut self) {
        if self.timer_active() {
            self.elapsed_secs += 1;
        }
    }

    /// Iterative flood fill over an explicit work queue. The `is_revealed`
    /// flag doubles as the visited marker, so duplicate queue entries are
    /// dropped on pop.
    fn flood_reveal(&mut self, start: Coord2) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            let cell = self.board.cell_at(coords);
            if cell.is_revealed || cell.is_flagged || cell.is_mine {
                continue;
            }

            self.board.cell_mut(coords).is_revealed = true;

            if cell.adjacent == 0 {
                to_visit.extend(
                    self.board
                        .iter_neighbors(coords)
                        .filter(|&pos| self.board.cell_at(pos).is_hidden_safe()),
                );
            }
        }
    }

    fn mark_started(&mut self) {
        if matches!(self.phase, GamePhase::NotStarted) {
            self.phase = GamePhase::Active;
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.phase.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Coord, mines: &[Coord2]) -> Game {
        Game::new(Board::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn first_reveal_activates_the_game() {
        let mut game = game(4, &[(0, 0)]);
        assert_eq!(game.phase(), GamePhase::NotStarted);

        assert_eq!(game.reveal((2, 2)).unwrap(), RevealOutcome::Won);
        assert!(game.phase().is_finished());
    }

    #[test]
    fn revealing_a_mine_loses_and_reveals_all_mines_only() {
        let mut game = game(4, &[(0, 0), (3, 1)]);

        assert_eq!(game.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);
        assert_eq!(game.phase(), GamePhase::Lost);

        for row in 0..4 {
            for col in 0..4 {
                let cell = game.board().cell_at((row, col));
                assert_eq!(cell.is_revealed, cell.is_mine);
            }
        }
    }

    #[test]
    fn finished_game_rejects_every_input() {
        let mut game = game(3, &[(0, 0)]);
        game.reveal((0, 0)).unwrap();

        assert_eq!(game.reveal((2, 2)), Err(GameError::AlreadyEnded));
        assert_eq!(game.toggle_flag((2, 2)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn corner_click_floods_the_far_zero_region_around_a_single_mine() {
        // size=4, mine at (0,0): everything except the mine's three
        // neighbors has adjacency 0, so one corner click wins the game.
        let mut game = game(4, &[(0, 0)]);

        assert_eq!(game.reveal((3, 3)).unwrap(), RevealOutcome::Won);
        assert!(!game.board().cell_at((0, 0)).is_revealed);
        for row in 0..4 {
            for col in 0..4 {
                if (row, col) != (0, 0) {
                    assert!(game.board().cell_at((row, col)).is_revealed);
                }
            }
        }
    }

    #[test]
    fn flood_reveals_zero_region_plus_numbered_border() {
        // Mines in the (0..2, 0..2) corner; the right side of the board is a
        // zero region bordered by numbered cells.
        let mut game = game(5, &[(0, 0), (1, 1)]);

        assert_eq!(game.reveal((4, 4)).unwrap(), RevealOutcome::Revealed);
        assert!(game.board().cell_at((4, 4)).is_revealed);
        assert!(game.board().cell_at((2, 2)).is_revealed);
        assert_eq!(game.board().cell_at((2, 2)).adjacent, 1);
        assert!(!game.board().cell_at((0, 1)).is_revealed);
        assert!(!game.board().cell_at((0, 0)).is_revealed);
    }

    #[test]
    fn flood_never_crosses_a_flagged_cell() {
        let mut game = game(4, &[(0, 0)]);
        game.toggle_flag((2, 2)).unwrap();

        assert_eq!(game.reveal((3, 3)).unwrap(), RevealOutcome::Revealed);
        assert!(!game.board().cell_at((2, 2)).is_revealed);
        assert!(game.board().cell_at((1, 1)).is_revealed);

        game.toggle_flag((2, 2)).unwrap();
        assert_eq!(game.reveal((2, 2)).unwrap(), RevealOutcome::Won);
    }

    #[test]
    fn revealed_and_flagged_targets_are_no_ops() {
        let mut game = game(5, &[(0, 0), (1, 1)]);
        game.toggle_flag((0, 0)).unwrap();

        assert_eq!(game.reveal((0, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(game.phase(), GamePhase::NotStarted);

        assert_eq!(game.reveal((4, 4)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(game.reveal((4, 4)).unwrap(), RevealOutcome::NoChange);
    }

    #[test]
    fn out_of_bounds_click_is_rejected() {
        let mut game = game(4, &[(0, 0)]);

        assert_eq!(game.reveal((4, 0)), Err(GameError::InvalidCoords));
        assert_eq!(game.toggle_flag((0, 9)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn flags_only_toggle_unrevealed_cells() {
        let mut game = game(3, &[(0, 0), (0, 2)]);
        game.reveal((2, 2)).unwrap();

        assert_eq!(game.toggle_flag((2, 2)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(game.toggle_flag((0, 0)).unwrap(), MarkOutcome::Changed);
        assert_eq!(game.mines_left(), 1);
        assert_eq!(game.toggle_flag((0, 0)).unwrap(), MarkOutcome::Changed);
        assert_eq!(game.mines_left(), 2);
    }

    #[test]
    fn tick_counts_only_while_active() {
        let mut game = game(5, &[(0, 0), (1, 1)]);

        game.tick();
        assert_eq!(game.elapsed_secs(), 0);

        assert_eq!(game.reveal((4, 4)).unwrap(), RevealOutcome::Revealed);
        assert!(game.timer_active());
        game.tick();
        game.tick();
        assert_eq!(game.elapsed_secs(), 2);

        assert_eq!(game.reveal((1, 1)).unwrap(), RevealOutcome::HitMine);
        game.tick();
        assert_eq!(game.elapsed_secs(), 2);
    }

    #[test]
    fn win_raises_the_name_prompt_exactly_once() {
        let mut game = game(2, &[(0, 0)]);
        assert!(!game.pending_name_prompt());

        game.reveal((0, 1)).unwrap();
        game.reveal((1, 0)).unwrap();
        assert_eq!(game.reveal((1, 1)).unwrap(), RevealOutcome::Won);

        assert!(game.pending_name_prompt());
        assert!(game.resolve_name_prompt());
        assert!(!game.resolve_name_prompt());
    }

    #[test]
    fn loss_raises_no_name_prompt() {
        let mut game = game(2, &[(0, 0)]);
        game.reveal((0, 0)).unwrap();

        assert!(!game.pending_name_prompt());
    }

    #[test]
    fn apply_leaves_the_previous_state_untouched() {
        let before = game(4, &[(0, 0)]);

        let after = before.apply(Action::Reveal((3, 3)));

        assert_eq!(before.phase(), GamePhase::NotStarted);
        assert!(!before.board().cell_at((3, 3)).is_revealed);
        assert_eq!(after.phase(), GamePhase::Won);
    }

    #[test]
    fn apply_swallows_rejected_inputs() {
        let mut lost = game(2, &[(0, 0)]);
        lost.reveal((0, 0)).unwrap();

        assert_eq!(lost.apply(Action::Reveal((1, 1))), lost);
        assert_eq!(lost.apply(Action::Reveal((9, 9))), lost);
        assert_eq!(lost.apply(Action::ToggleFlag((1, 1))), lost);
    }
}
