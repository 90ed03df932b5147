use crate::{CardValue, glyph_for};

/// Client-observed visual state of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CellState {
    #[default]
    Hidden,
    Flipped,
    Matched,
}

impl CellState {
    /// Whether the card currently shows its face, which makes it unclickable.
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Flipped | Self::Matched)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    state: CellState,
    value: Option<CardValue>,
}

impl Cell {
    pub const fn state(&self) -> CellState {
        self.state
    }

    pub const fn value(&self) -> Option<CardValue> {
        self.value
    }

    /// Glyph to display, only once the engine has revealed the card.
    pub fn symbol(&self) -> Option<&'static str> {
        self.value.map(glyph_for)
    }

    pub(crate) fn flip(&mut self) {
        self.state = CellState::Flipped;
    }

    pub(crate) fn reveal(&mut self, value: CardValue) {
        self.value = Some(value);
    }

    pub(crate) fn mark_matched(&mut self) {
        self.state = CellState::Matched;
    }

    pub(crate) fn hide(&mut self) {
        debug_assert!(self.state != CellState::Matched, "matched cells stay face up");
        self.state = CellState::Hidden;
        self.value = None;
    }
}
