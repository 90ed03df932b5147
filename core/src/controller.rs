use alloc::string::{String, ToString};
use memory_match_protocol::{EngineError, MoveReply, MoveRequest, StartReply};

use crate::*;

pub const START_ERROR_MESSAGE: &str = "Failed to start new game. Please try again.";
pub const MOVE_ERROR_MESSAGE: &str = "Failed to process move. Please try again.";

/// Where the game as a whole stands, from the client's point of view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Loading,
    Ready,
    Resolving,
    Won,
    /// Holds the message shown to the player; left only by starting a new game.
    Error(String),
}

impl Lifecycle {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn is_playable(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No board, or an overlay (loading, error, win) is up.
    NotPlayable,
    /// A pair is being resolved.
    Locked,
    /// The card is already flipped or matched.
    FaceUp,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored(IgnoreReason),
    /// The card was flipped and waits for a partner.
    Flipped,
    /// The second card was flipped; the pair must be sent to the engine.
    Resolve(Ticket, MoveRequest),
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored(_))
    }
}

/// What the pair turns into once the presentation delay runs out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Settlement {
    Matched { game_won: bool },
    Mismatched,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The reply belongs to an earlier game or arrived out of turn.
    Stale,
    /// Both symbols are revealed; call [`Controller::settle`] after `delay_ms`.
    Revealed {
        ticket: Ticket,
        settlement: Settlement,
        delay_ms: u32,
    },
    /// The pair was turned back face down and the error is showing.
    Failed,
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Stale)
    }
}

/// Client-side state of one memory game, independent of any rendering or transport.
///
/// Every operation returns what the caller has to do next (send a request, arm a timer), and every
/// continuation is handed back with the [`Ticket`] it was issued with so that a reset can fence it.
#[derive(Clone, Debug, Default)]
pub struct Controller {
    pacing: Pacing,
    generation: Generation,
    lifecycle: Lifecycle,
    board: Option<Board>,
    pending: PendingSelection,
    moves: MoveCount,
    locked: bool,
    settlement: Option<Settlement>,
}

impl Controller {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            pacing,
            ..Default::default()
        }
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn moves(&self) -> MoveCount {
        self.moves
    }

    pub fn pending(&self) -> &PendingSelection {
        &self.pending
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Final move count, once the game is won.
    pub fn won_with(&self) -> Option<MoveCount> {
        matches!(self.lifecycle, Lifecycle::Won).then_some(self.moves)
    }

    fn ticket(&self) -> Ticket {
        Ticket::new(self.generation)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation() == self.generation
    }

    /// Discards the current game entirely and waits for a new board.
    ///
    /// Anything still in flight for the previous game is invalidated.
    pub fn start_new_game(&mut self) -> Ticket {
        self.generation = self.generation.next();
        self.board = None;
        self.pending.clear();
        self.moves = 0;
        self.locked = false;
        self.settlement = None;
        self.lifecycle = Lifecycle::Loading;
        log::debug!("new game requested: {:?}", self.generation);
        self.ticket()
    }

    pub fn on_start_result(
        &mut self,
        ticket: Ticket,
        result: core::result::Result<StartReply, EngineError>,
    ) -> bool {
        if !self.is_current(ticket) || !self.lifecycle.is_loading() {
            log::trace!("stale start result for {:?}", ticket);
            return false;
        }

        match result {
            Ok(StartReply { grid_size }) => {
                log::debug!("board ready with {} cells", grid_size);
                self.board = Some(Board::new(grid_size));
                self.lifecycle = Lifecycle::Ready;
            }
            Err(err) => {
                log::error!("Error starting game: {}", err);
                self.board = None;
                self.lifecycle = Lifecycle::Error(START_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    pub fn click(&mut self, position: Position) -> Result<ClickOutcome> {
        use ClickOutcome::*;

        let Some(board) = self.board.as_mut() else {
            return Ok(Ignored(IgnoreReason::NotPlayable));
        };
        if self.locked {
            return Ok(Ignored(IgnoreReason::Locked));
        }
        if !self.lifecycle.is_playable() {
            return Ok(Ignored(IgnoreReason::NotPlayable));
        }

        let cell = board.cell_mut(position)?;
        if cell.state().is_face_up() {
            return Ok(Ignored(IgnoreReason::FaceUp));
        }

        cell.flip();
        self.pending.push(position);
        log::debug!("flipped {}", position);

        let Some((pos1, pos2)) = self.pending.pair() else {
            return Ok(Flipped);
        };

        self.locked = true;
        self.lifecycle = Lifecycle::Resolving;
        log::debug!("resolving pair ({}, {})", pos1, pos2);
        Ok(Resolve(self.ticket(), MoveRequest { pos1, pos2 }))
    }

    pub fn on_move_result(
        &mut self,
        ticket: Ticket,
        result: core::result::Result<MoveReply, EngineError>,
    ) -> MoveOutcome {
        let awaiting_reply =
            matches!(self.lifecycle, Lifecycle::Resolving) && self.settlement.is_none();
        if !self.is_current(ticket) || !awaiting_reply {
            log::trace!("stale move result for {:?}", ticket);
            return MoveOutcome::Stale;
        }
        let (Some(board), Some((pos1, pos2))) = (self.board.as_mut(), self.pending.pair()) else {
            return MoveOutcome::Stale;
        };

        match result {
            Ok(reply) => {
                let (card1, card2) = reply.cards;
                for value in [card1, card2] {
                    if !has_glyph(value) {
                        log::warn!("no glyph for card value {}", value);
                    }
                }
                board[pos1].reveal(card1);
                board[pos2].reveal(card2);
                self.moves = reply.moves;

                let (settlement, delay_ms) = if reply.is_match {
                    let game_won = reply.game_won;
                    (Settlement::Matched { game_won }, self.pacing.match_delay_ms)
                } else {
                    (Settlement::Mismatched, self.pacing.mismatch_delay_ms)
                };
                log::debug!(
                    "move {}: ({}, {}) -> {:?}",
                    self.moves,
                    card1,
                    card2,
                    settlement
                );
                self.settlement = Some(settlement);

                MoveOutcome::Revealed {
                    ticket,
                    settlement,
                    delay_ms,
                }
            }
            Err(err) => {
                log::error!("Error checking match: {}", err);
                board[pos1].hide();
                board[pos2].hide();
                self.release();
                self.lifecycle = Lifecycle::Error(MOVE_ERROR_MESSAGE.to_string());
                MoveOutcome::Failed
            }
        }
    }

    /// Applies the revealed pair once its presentation delay has elapsed.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if !self.is_current(ticket) {
            log::trace!("stale settle for {:?}", ticket);
            return false;
        }
        let (Some(board), Some((pos1, pos2)), Some(settlement)) =
            (self.board.as_mut(), self.pending.pair(), self.settlement)
        else {
            return false;
        };

        match settlement {
            Settlement::Matched { game_won } => {
                board[pos1].mark_matched();
                board[pos2].mark_matched();
                self.lifecycle = if game_won {
                    log::debug!("game won in {} moves", self.moves);
                    Lifecycle::Won
                } else {
                    Lifecycle::Ready
                };
            }
            Settlement::Mismatched => {
                board[pos1].hide();
                board[pos2].hide();
                self.lifecycle = Lifecycle::Ready;
            }
        }
        self.release();
        true
    }

    fn release(&mut self) {
        self.pending.clear();
        self.settlement = None;
        self.locked = false;
    }
}
