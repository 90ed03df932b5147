use crate::engine::EngineClient;
use crate::utils::Modal;
use clap::Args;
use gloo::timers::callback::Timeout;
use memory_match_core as game;
use memory_match_protocol::{self as protocol, MoveReply, MoveRequest, StartReply};
use yew::prelude::*;

/// Blocking layer shown over the board, at most one at a time.
#[derive(Clone, Debug, PartialEq)]
enum Overlay {
    Loading,
    Error(String),
    Won(game::MoveCount),
}

impl Overlay {
    fn for_controller(controller: &game::Controller) -> Option<Self> {
        use game::Lifecycle::*;
        match controller.lifecycle() {
            Loading => Some(Self::Loading),
            Error(message) => Some(Self::Error(message.clone())),
            Won => Some(Self::Won(controller.moves())),
            Uninitialized | Ready | Resolving => None,
        }
    }
}

fn card_classes(state: game::CellState) -> Classes {
    use game::CellState::*;
    classes!(
        "card",
        match state {
            Hidden => classes!(),
            Flipped => classes!("flipped"),
            Matched => classes!("flipped", "matched"),
        }
    )
}

pub(crate) enum Msg {
    NewGame,
    Retry,
    PlayAgain,
    CardClicked(game::Position),
    Started(game::Ticket, protocol::Result<StartReply>),
    Moved(game::Ticket, protocol::Result<MoveReply>),
    Settle(game::Ticket),
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    position: game::Position,
    state: game::CellState,
    #[prop_or_default]
    symbol: Option<&'static str>,
    callback: Callback<game::Position>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        position,
        state,
        symbol,
        callback,
    } = props.clone();

    let class = card_classes(state);
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", position);
        callback.emit(position);
    });

    html! {
        <td {class} {onclick} data-position={position.to_string()}>{symbol.unwrap_or_default()}</td>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct OverlayProps {
    overlay: Option<Overlay>,
    on_retry: Callback<MouseEvent>,
    on_play_again: Callback<MouseEvent>,
}

#[function_component(OverlayView)]
fn overlay_component(props: &OverlayProps) -> Html {
    let OverlayProps {
        overlay,
        on_retry,
        on_play_again,
    } = props.clone();

    match overlay {
        None => html! {},
        Some(Overlay::Loading) => html! {
            <dialog id="loading" open={true} aria-busy="true">{"Loading..."}</dialog>
        },
        Some(Overlay::Error(message)) => html! {
            <dialog id="error-message" open={true}>
                <article>
                    <p id="error-text">{message}</p>
                    <footer>
                        <button id="retry-btn" onclick={on_retry}>{"Try Again"}</button>
                    </footer>
                </article>
            </dialog>
        },
        Some(Overlay::Won(moves)) => html! {
            <dialog id="win-message" open={true}>
                <article>
                    <h2>{"Congratulations!"}</h2>
                    <p>{"You won in "}<strong id="final-moves">{moves.to_string()}</strong>{" moves."}</p>
                    <footer>
                        <button id="play-again-btn" onclick={on_play_again}>{"Play Again"}</button>
                    </footer>
                </article>
            </dialog>
        },
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Base path of the game engine calls
    #[arg(long, default_value = "/game")]
    pub(crate) endpoint: String,

    /// Milliseconds a matched pair stays flipped before it is marked as matched
    #[arg(long, default_value_t = game::Pacing::MATCH_DELAY_MS)]
    pub(crate) match_delay: u32,

    /// Milliseconds a mismatched pair stays visible before it turns back
    #[arg(long, default_value_t = game::Pacing::MISMATCH_DELAY_MS)]
    pub(crate) mismatch_delay: u32,
}

impl GameProps {
    pub(crate) fn pacing(&self) -> game::Pacing {
        game::Pacing {
            match_delay_ms: self.match_delay,
            mismatch_delay_ms: self.mismatch_delay,
        }
    }
}

/// Controller plus the timer that will settle the revealed pair.
///
/// Generic over the timer so the reset rules can be checked without a browser.
#[derive(Debug)]
pub(crate) struct GameSession<T = Timeout> {
    controller: game::Controller,
    settle_timer: Option<T>,
}

impl<T> GameSession<T> {
    fn new(pacing: game::Pacing) -> Self {
        Self {
            controller: game::Controller::new(pacing),
            settle_timer: None,
        }
    }

    fn has_pending_settle(&self) -> bool {
        self.settle_timer.is_some()
    }

    fn start_new_game(&mut self) -> game::Ticket {
        // dropping the timer cancels a settle that belongs to the old board
        self.settle_timer = None;
        self.controller.start_new_game()
    }

    /// `arm` is only called when the pair needs a delayed settle.
    fn on_move_result(
        &mut self,
        ticket: game::Ticket,
        result: protocol::Result<MoveReply>,
        arm: impl FnOnce(game::Ticket, u32) -> T,
    ) -> bool {
        match self.controller.on_move_result(ticket, result) {
            game::MoveOutcome::Revealed {
                ticket, delay_ms, ..
            } => {
                self.settle_timer = Some(arm(ticket, delay_ms));
                true
            }
            outcome => outcome.has_update(),
        }
    }

    fn settle(&mut self, ticket: game::Ticket) -> bool {
        let settled = self.controller.settle(ticket);
        if settled {
            self.settle_timer = None;
        }
        settled
    }
}

pub(crate) struct GameView {
    session: GameSession,
    engine: EngineClient,
}

impl GameView {
    fn start_new_game(&mut self, ctx: &Context<Self>) {
        let ticket = self.session.start_new_game();

        let engine = self.engine.clone();
        ctx.link().send_future(async move {
            let result = engine.start().await;
            Msg::Started(ticket, result)
        });
    }

    fn send_move(&self, ctx: &Context<Self>, ticket: game::Ticket, request: MoveRequest) {
        let engine = self.engine.clone();
        ctx.link().send_future(async move {
            let result = engine.make_move(request).await;
            Msg::Moved(ticket, result)
        });
    }

    fn click(&mut self, ctx: &Context<Self>, position: game::Position) -> bool {
        use game::ClickOutcome::*;

        match self.session.controller.click(position) {
            Ok(Resolve(ticket, request)) => {
                self.send_move(ctx, ticket, request);
                true
            }
            Ok(Ignored(reason)) => {
                log::trace!("click on {} ignored: {:?}", position, reason);
                false
            }
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                log::warn!("click rejected: {}", err);
                false
            }
        }
    }

    fn on_move_result(
        &mut self,
        ctx: &Context<Self>,
        ticket: game::Ticket,
        result: protocol::Result<MoveReply>,
    ) -> bool {
        let link = ctx.link().clone();
        self.session.on_move_result(ticket, result, |ticket, delay_ms| {
            Timeout::new(delay_ms, move || link.send_message(Msg::Settle(ticket)))
        })
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let controller = &self.session.controller;
        let Some(board) = controller.board() else {
            return html! {};
        };
        let playable = controller.lifecycle().is_playable() && !controller.is_locked();

        html! {
            <table id="game-board" class={playable.then_some("playable")}>
                {
                    for board.rows().map(|row| html! {
                        <tr>
                            {
                                for row.map(|position| {
                                    let cell = board[position];
                                    let state = cell.state();
                                    let symbol = cell.symbol();
                                    let callback = ctx.link().callback(Msg::CardClicked);
                                    html! {
                                        <CardView {position} {state} {symbol} {callback}/>
                                    }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        ctx.link().send_message(Msg::NewGame);
        Self {
            session: GameSession::new(props.pacing()),
            engine: EngineClient::new(&props.endpoint),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            NewGame | Retry | PlayAgain => {
                self.start_new_game(ctx);
                true
            }
            CardClicked(position) => self.click(ctx, position),
            Started(ticket, result) => self.session.controller.on_start_result(ticket, result),
            Moved(ticket, result) => self.on_move_result(ctx, ticket, result),
            Settle(ticket) => self.session.settle(ticket),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let moves = self.session.controller.moves();
        let overlay = Overlay::for_controller(&self.session.controller);
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let on_retry = ctx.link().callback(|_: MouseEvent| Retry);
        let on_play_again = ctx.link().callback(|_: MouseEvent| PlayAgain);

        html! {
            <div class="memory-match">
                <nav>
                    <aside>{"Moves: "}<span id="moves">{moves.to_string()}</span></aside>
                    <span><button id="new-game-btn" onclick={cb_new_game}>{"New Game"}</button></span>
                </nav>
                { self.view_board(ctx) }
                <Modal><OverlayView {overlay} {on_retry} {on_play_again}/></Modal>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_match_protocol::EngineError;

    fn started(grid_size: u16) -> game::Controller {
        let mut controller = game::Controller::default();
        let ticket = controller.start_new_game();
        controller.on_start_result(ticket, Ok(StartReply { grid_size }));
        controller
    }

    #[test]
    fn card_classes_follow_cell_state() {
        let hidden = card_classes(game::CellState::Hidden);
        assert!(hidden.contains("card"));
        assert!(!hidden.contains("flipped"));

        assert!(card_classes(game::CellState::Flipped).contains("flipped"));

        let matched = card_classes(game::CellState::Matched);
        assert!(matched.contains("flipped"));
        assert!(matched.contains("matched"));
    }

    #[test]
    fn loading_overlay_while_waiting_for_the_board() {
        let mut controller = game::Controller::default();
        assert_eq!(Overlay::for_controller(&controller), None);
        controller.start_new_game();
        assert_eq!(Overlay::for_controller(&controller), Some(Overlay::Loading));
    }

    #[test]
    fn error_overlay_carries_the_message() {
        let mut controller = game::Controller::default();
        let ticket = controller.start_new_game();
        controller.on_start_result(ticket, Err(EngineError::Transport("offline".to_string())));

        assert_eq!(
            Overlay::for_controller(&controller),
            Some(Overlay::Error(game::START_ERROR_MESSAGE.to_string()))
        );
    }

    #[test]
    fn win_overlay_shows_final_moves() {
        let mut controller = started(2);
        controller.click(0).unwrap();
        let Ok(game::ClickOutcome::Resolve(ticket, _)) = controller.click(1) else {
            panic!("second click should resolve");
        };
        let reply = MoveReply {
            cards: (4, 4),
            is_match: true,
            moves: 3,
            game_won: true,
        };
        controller.on_move_result(ticket, Ok(reply));
        assert_eq!(Overlay::for_controller(&controller), None);

        controller.settle(ticket);
        assert_eq!(Overlay::for_controller(&controller), Some(Overlay::Won(3)));
    }

    /// Stands in for a browser timeout; records when it is dropped.
    struct FakeTimer(std::rc::Rc<std::cell::Cell<bool>>);

    impl Drop for FakeTimer {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    fn session_with_revealed_pair(
        reply: MoveReply,
    ) -> (GameSession<FakeTimer>, game::Ticket, std::rc::Rc<std::cell::Cell<bool>>) {
        let mut session = GameSession::new(game::Pacing::default());
        let ticket = session.start_new_game();
        session
            .controller
            .on_start_result(ticket, Ok(StartReply { grid_size: 16 }));
        session.controller.click(3).unwrap();
        let Ok(game::ClickOutcome::Resolve(ticket, _)) = session.controller.click(7) else {
            panic!("second click should resolve");
        };

        let dropped = std::rc::Rc::new(std::cell::Cell::new(false));
        let mut armed = None;
        let updated = session.on_move_result(ticket, Ok(reply), |ticket, delay_ms| {
            armed = Some((ticket, delay_ms));
            FakeTimer(dropped.clone())
        });
        assert!(updated);
        assert_eq!(armed.map(|(_, delay_ms)| delay_ms), Some(500));
        assert!(session.has_pending_settle());
        (session, ticket, dropped)
    }

    fn matching_reply() -> MoveReply {
        MoveReply {
            cards: (2, 2),
            is_match: true,
            moves: 1,
            game_won: false,
        }
    }

    #[test]
    fn new_game_cancels_a_pending_settle() {
        let (mut session, old, dropped) = session_with_revealed_pair(matching_reply());

        session.start_new_game();

        assert!(!session.has_pending_settle());
        assert!(dropped.get());
        assert!(!session.settle(old));
        assert!(session.controller.board().is_none());
    }

    #[test]
    fn settle_clears_the_timer_slot() {
        let (mut session, ticket, _dropped) = session_with_revealed_pair(matching_reply());

        assert!(session.settle(ticket));

        assert!(!session.has_pending_settle());
        let board = session.controller.board().unwrap();
        assert_eq!(board[3].state(), game::CellState::Matched);
        assert_eq!(board[7].state(), game::CellState::Matched);
    }

    #[test]
    fn failed_move_arms_no_timer() {
        let mut session = GameSession::<FakeTimer>::new(game::Pacing::default());
        let ticket = session.start_new_game();
        session
            .controller
            .on_start_result(ticket, Ok(StartReply { grid_size: 4 }));
        session.controller.click(0).unwrap();
        let Ok(game::ClickOutcome::Resolve(ticket, _)) = session.controller.click(1) else {
            panic!("second click should resolve");
        };

        let updated = session.on_move_result(ticket, Err(EngineError::Status(500)), |_, _| {
            panic!("a failed move settles immediately")
        });

        assert!(updated);
        assert!(!session.has_pending_settle());
        assert!(!session.controller.is_locked());
        assert_eq!(
            Overlay::for_controller(&session.controller),
            Some(Overlay::Error(game::MOVE_ERROR_MESSAGE.to_string()))
        );
    }
}
