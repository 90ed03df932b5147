/// Zero-based index of a cell on the board.
pub type Position = u16;

/// Count type for the server-supplied move counter.
pub type MoveCount = u32;

/// Opaque card value revealed by the engine.
pub type CardValue = i64;

/// Counter bumped on every new game, used to fence continuations from older games.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u32);

impl Generation {
    pub(crate) const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Stamp carried by an in-flight request or a pending timer.
///
/// The controller only honours a ticket issued for its current generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ticket {
    generation: Generation,
}

impl Ticket {
    pub(crate) const fn new(generation: Generation) -> Self {
        Self { generation }
    }

    pub const fn generation(self) -> Generation {
        self.generation
    }
}

/// Presentation delays applied before a resolved pair settles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pacing {
    pub match_delay_ms: u32,
    pub mismatch_delay_ms: u32,
}

impl Pacing {
    pub const MATCH_DELAY_MS: u32 = 500;
    pub const MISMATCH_DELAY_MS: u32 = 1000;
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            match_delay_ms: Self::MATCH_DELAY_MS,
            mismatch_delay_ms: Self::MISMATCH_DELAY_MS,
        }
    }
}
