use buscaminas_core::{
    Action, BoardGenerator, Cell, Coord, CellCount, Coord2, Game, GameConfig, GamePhase,
    RandomBoardGenerator, RankingEntry, Ranking, RankingStore,
};
use gloo::timers::callback::Interval;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::press::{classify_press, PressAction};
use crate::storage::LocalRankingStore;

const DEFAULT_SIZE: Coord = 8;
const DEFAULT_MINES: CellCount = 10;

/// Helper function to use JavaScript's Math.random
fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum CellMsg {
    Click(Coord2),
    Flag(Coord2),
    TouchStart(Coord2),
    TouchEnd,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CellEvent(CellMsg),
    Tick,
    NewGame,
    SizeChange(Coord),
    MinesChange(CellCount),
    NameInput(String),
    SubmitName,
    SkipName,
}

#[derive(Properties, Clone, Debug, PartialEq)]
pub struct GameProps {
    /// Force a seed instead of random
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: Coord,
    col: Coord,
    cell: Cell,
    callback: Callback<CellMsg>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        row,
        col,
        cell,
        callback,
    } = props.clone();
    let pos = (row, col);

    let class = classes!(
        "cell",
        cell.is_revealed.then_some("open"),
        (cell.is_revealed && cell.is_mine).then_some("mine"),
        (cell.is_revealed && !cell.is_mine && cell.adjacent > 0)
            .then(|| format!("num-{}", cell.adjacent)),
        (!cell.is_revealed && cell.is_flagged).then_some("flag"),
    );

    let content = if cell.is_revealed && cell.is_mine {
        "💣".to_string()
    } else if cell.is_revealed && cell.adjacent > 0 {
        cell.adjacent.to_string()
    } else if !cell.is_revealed && cell.is_flagged {
        "🚩".to_string()
    } else {
        String::new()
    };

    let onclick = {
        let callback = callback.clone();
        Callback::from(move |_: MouseEvent| callback.emit(CellMsg::Click(pos)))
    };
    let oncontextmenu = {
        let callback = callback.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            callback.emit(CellMsg::Flag(pos));
        })
    };
    let ontouchstart = {
        let callback = callback.clone();
        Callback::from(move |_: TouchEvent| callback.emit(CellMsg::TouchStart(pos)))
    };
    let ontouchend = Callback::from(move |_: TouchEvent| callback.emit(CellMsg::TouchEnd));

    html! {
        <td {class} {onclick} {oncontextmenu} {ontouchstart} {ontouchend}>{ content }</td>
    }
}

pub(crate) struct GameView {
    size: Coord,
    mines: CellCount,
    game: Game,
    ranking: Ranking,
    name_input: String,
    /// Touch currently held down: cell and press timestamp in ms.
    press: Option<(Coord2, f64)>,
    /// Set when a hold toggled a flag, to swallow the synthesized click.
    long_press_fired: bool,
    timer: Option<Interval>,
    forced_seed: Option<u64>,
}

impl GameView {
    fn new_game(&mut self) {
        let seed = self.forced_seed.unwrap_or_else(js_random_seed);
        let config = GameConfig::new(self.size, self.mines);
        log::debug!("new game: {:?}, seed {}", config, seed);

        self.game = Game::new(RandomBoardGenerator::new(seed).generate(config));
        self.timer = None;
        self.press = None;
        self.long_press_fired = false;
        self.name_input.clear();
    }

    /// Copy-then-replace: every action produces the next state from the
    /// previous one, so the view only ever observes fully-resolved boards.
    fn apply_action(&mut self, ctx: &Context<Self>, action: Action) -> bool {
        let next = self.game.apply(action);
        let changed = next != self.game;
        self.game = next;
        self.sync_timer(ctx);
        changed
    }

    /// The interval runs exactly while the game is active. Starting is
    /// idempotent: a second start while one is running is a no-op, so two
    /// concurrent timers cannot exist.
    fn sync_timer(&mut self, ctx: &Context<Self>) {
        if self.game.timer_active() {
            if self.timer.is_none() {
                let link = ctx.link().clone();
                self.timer = Some(Interval::new(1000, move || link.send_message(Msg::Tick)));
            }
        } else {
            self.timer = None;
        }
    }

    fn view_result_banner(&self) -> Html {
        match self.game.phase() {
            GamePhase::Lost => html! { <p class={classes!("result", "lose")}>{ "💥 Game Over" }</p> },
            GamePhase::Won => html! { <p class={classes!("result", "win")}>{ "🎉 ¡Has ganado!" }</p> },
            _ => html! {},
        }
    }

    fn view_name_dialog(&self, ctx: &Context<Self>) -> Html {
        if !self.game.pending_name_prompt() {
            return html! {};
        }

        let oninput = ctx.link().callback(|e: InputEvent| {
            Msg::NameInput(e.target_unchecked_into::<HtmlInputElement>().value())
        });

        html! {
            <dialog open={true} class="name-prompt">
                <p>{ format!("¡Has ganado en {}s! Introduce tu nombre:", self.game.elapsed_secs()) }</p>
                <input value={self.name_input.clone()} {oninput} />
                <button onclick={ctx.link().callback(|_| Msg::SubmitName)}>{ "Guardar" }</button>
                <button onclick={ctx.link().callback(|_| Msg::SkipName)}>{ "Omitir" }</button>
            </dialog>
        }
    }

    fn view_ranking(&self) -> Html {
        html! {
            <div class="ranking">
                <h2>{ "🏆 Ranking (Top 10)" }</h2>
                <ol>
                    {
                        for self.ranking.entries().iter().map(|entry| html! {
                            <li>{ format!("{} - {}s", entry.name, entry.time) }</li>
                        })
                    }
                </ol>
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let forced_seed = ctx.props().seed;
        Self {
            size: DEFAULT_SIZE,
            mines: DEFAULT_MINES,
            game: Game::new(
                RandomBoardGenerator::new(forced_seed.unwrap_or_else(js_random_seed))
                    .generate(GameConfig::new(DEFAULT_SIZE, DEFAULT_MINES)),
            ),
            ranking: LocalRankingStore.load(),
            name_input: String::new(),
            press: None,
            long_press_fired: false,
            timer: None,
            forced_seed,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use CellMsg::*;
        use Msg::*;

        match msg {
            CellEvent(Click(pos)) => {
                if core::mem::take(&mut self.long_press_fired) {
                    log::trace!("click after long press swallowed: {:?}", pos);
                    return false;
                }
                log::debug!("reveal cell: {:?}", pos);
                self.apply_action(ctx, Action::Reveal(pos))
            }
            CellEvent(Flag(pos)) => {
                log::debug!("flag cell: {:?}", pos);
                self.apply_action(ctx, Action::ToggleFlag(pos))
            }
            CellEvent(TouchStart(pos)) => {
                self.press = Some((pos, js_sys::Date::now()));
                self.long_press_fired = false;
                false
            }
            CellEvent(TouchEnd) => match self.press.take() {
                Some((pos, pressed_at)) => {
                    let held_ms = (js_sys::Date::now() - pressed_at).max(0.) as u32;
                    match classify_press(held_ms) {
                        PressAction::Flag => {
                            log::debug!("long press ({} ms), flag cell: {:?}", held_ms, pos);
                            self.long_press_fired = true;
                            self.apply_action(ctx, Action::ToggleFlag(pos))
                        }
                        // short tap: the synthesized click will reveal
                        PressAction::Reveal => false,
                    }
                }
                None => false,
            },
            Tick => self.apply_action(ctx, Action::Tick),
            NewGame => {
                self.new_game();
                true
            }
            SizeChange(size) => {
                self.size = size;
                self.new_game();
                true
            }
            MinesChange(mines) => {
                self.mines = mines;
                self.new_game();
                true
            }
            NameInput(value) => {
                self.name_input = value;
                false
            }
            SubmitName => {
                if self.game.resolve_name_prompt() {
                    let name = self.name_input.trim().to_string();
                    if !name.is_empty() {
                        self.ranking.record(RankingEntry {
                            name,
                            time: self.game.elapsed_secs(),
                        });
                        LocalRankingStore.save(&self.ranking);
                    }
                }
                self.name_input.clear();
                true
            }
            SkipName => {
                self.game.resolve_name_prompt();
                self.name_input.clear();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let size = self.game.board().size();
        let callback = ctx.link().callback(Msg::CellEvent);

        let on_size_input = ctx.link().callback(|e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            Msg::SizeChange(value.parse().unwrap_or(DEFAULT_SIZE))
        });
        let on_mines_input = ctx.link().callback(|e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlInputElement>().value();
            Msg::MinesChange(value.parse().unwrap_or(DEFAULT_MINES))
        });

        html! {
            <div class="buscaminas" oncontextmenu={Callback::from(|e: MouseEvent| e.prevent_default())}>
                <h1>{ format!("Buscaminas - ⏱️ {}s", self.game.elapsed_secs()) }</h1>
                <div class="controls">
                    <label>{ format!("Casillas: {}", self.size) }
                        <input type="range" min="4" max="16" step="2"
                            value={self.size.to_string()} oninput={on_size_input} />
                    </label>
                    <label>{ format!("Minas: {}", self.mines) }
                        <input type="range" min="1" max="25"
                            value={self.mines.to_string()} oninput={on_mines_input} />
                    </label>
                    <button onclick={ctx.link().callback(|_| Msg::NewGame)}>{ "Reiniciar" }</button>
                </div>
                { self.view_result_banner() }
                <table class="board">
                    {
                        for (0..size).map(|row| html! {
                            <tr>
                                {
                                    for (0..size).map(|col| {
                                        let cell = self.game.board().cell_at((row, col));
                                        html! {
                                            <CellView {row} {col} {cell} callback={callback.clone()} />
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
                { self.view_name_dialog(ctx) }
                { self.view_ranking() }
            </div>
        }
    }
}
