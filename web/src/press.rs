/// Touch devices have no secondary button, so press-and-hold stands in for
/// the flag toggle: a press held at least this long flags instead of
/// revealing, and releasing earlier cancels the pending flag.
pub(crate) const LONG_PRESS_MS: u32 = 500;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum PressAction {
    Reveal,
    Flag,
}

pub(crate) fn classify_press(held_ms: u32) -> PressAction {
    if held_ms >= LONG_PRESS_MS {
        PressAction::Flag
    } else {
        PressAction::Reveal
    }
}
