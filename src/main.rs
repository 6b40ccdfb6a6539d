//! Cat Match entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement,
        HtmlSelectElement, MouseEvent,
    };

    use cat_match::sim::{Card, GameEvent, LossReason, MemoryGame, Presenter, status_line};
    use cat_match::{Confetti, Settings, Theme};

    /// Renders game events into the page
    struct DomPresenter {
        document: Document,
        confetti: Confetti,
    }

    impl DomPresenter {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", hidden);
            }
        }

        fn render_board(&self, cols: u32, cards: &[Card]) {
            let Some(container) = self.document.get_element_by_id("game-container") else {
                log::warn!("No #game-container, board not rendered");
                return;
            };
            container.set_inner_html("");
            if let Some(el) = container.dyn_ref::<HtmlElement>() {
                let _ = el
                    .style()
                    .set_property("grid-template-columns", &format!("repeat({}, 100px)", cols));
            }

            for (index, card) in cards.iter().enumerate() {
                let Ok(el) = self.document.create_element("div") else {
                    continue;
                };
                let _ = el.set_attribute("data-index", &index.to_string());
                // Cycled images are shifted in hue so different pairs look different
                let filter = match card.key.variant() {
                    0 => String::new(),
                    v => format!(r#" style="filter: hue-rotate({}deg)""#, v * 90),
                };
                el.set_inner_html(&format!(
                    r#"<img src="{}" alt="cat"{} />"#,
                    card.key.image_url(),
                    filter
                ));
                apply_card_classes(&el, card);
                let _ = container.append_child(&el);
            }
        }

        fn render_card(&self, index: usize, card: &Card) {
            let selector = format!("#game-container [data-index=\"{}\"]", index);
            if let Some(el) = self.document.query_selector(&selector).ok().flatten() {
                apply_card_classes(&el, card);
            }
        }
    }

    fn apply_card_classes(el: &Element, card: &Card) {
        let classes = el.class_list();
        let _ = classes.add_1("card");
        let _ = classes.toggle_with_force("flipped", card.is_flipped);
        let _ = classes.toggle_with_force("matched", card.is_matched);
    }

    impl Presenter for DomPresenter {
        fn present(&mut self, event: GameEvent) {
            match event {
                GameEvent::BoardDealt { cols, cards } => self.render_board(cols, &cards),
                GameEvent::CardChanged { index, card } => self.render_card(index, &card),
                GameEvent::Status {
                    moves_left,
                    seconds_left,
                } => self.set_text("status", &status_line(moves_left, seconds_left)),
                GameEvent::Progress { streak, high_score } => {
                    self.set_text("streak", &streak.to_string());
                    self.set_text("highscore", &high_score.to_string());
                }
                GameEvent::ResetScreens => {
                    self.set_hidden("win-screen", true);
                    self.set_hidden("lose-screen", true);
                    self.confetti.stop();
                }
                GameEvent::Won => {
                    self.set_hidden("win-screen", false);
                    self.set_hidden("lose-screen", true);
                }
                GameEvent::Lost(reason) => {
                    let icon = match reason {
                        LossReason::OutOfTime => "⏰",
                        LossReason::OutOfMoves => "😵",
                    };
                    self.set_text("lose-message", &format!("{} {}", icon, reason));
                    self.set_hidden("lose-screen", false);
                    self.set_hidden("win-screen", true);
                }
                GameEvent::Celebrate => self.confetti.launch(),
                GameEvent::Notice(message) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message(&message);
                    }
                }
            }
        }
    }

    /// Page instance holding all state
    struct App {
        game: MemoryGame<DomPresenter>,
        settings: Settings,
        canvas: Option<(HtmlCanvasElement, CanvasRenderingContext2d)>,
        last_time: f64,
        /// Sub-millisecond remainder not yet fed to the game clock
        accumulator: f64,
    }

    impl App {
        fn resize(&mut self, width: f64, height: f64) {
            if let Some((canvas, _)) = &self.canvas {
                canvas.set_width(width as u32);
                canvas.set_height(height as u32);
            }
            self.game
                .presenter_mut()
                .confetti
                .resize(width as f32, height as f32);
        }

        /// Feed elapsed wall time into the game clock and the confetti
        fn update(&mut self, dt_ms: f64) {
            self.accumulator += dt_ms;
            let whole_ms = self.accumulator.floor();
            self.accumulator -= whole_ms;
            self.game.advance(whole_ms as u64);
            self.game.presenter_mut().confetti.step(dt_ms as f32);
        }

        fn draw_confetti(&self) {
            let Some((canvas, ctx)) = &self.canvas else {
                return;
            };
            ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
            for piece in self.game.presenter().confetti.pieces() {
                ctx.begin_path();
                let _ = ctx.arc(
                    piece.pos.x as f64,
                    piece.pos.y as f64,
                    piece.radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.set_fill_style_str(&piece.css_color());
                ctx.fill();
            }
        }
    }

    fn window_size(window: &web_sys::Window) -> (f64, f64) {
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (width, height)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cat Match starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas = document
            .get_element_by_id("confetti-canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(|canvas| {
                let ctx = canvas
                    .get_context("2d")
                    .ok()??
                    .dyn_into::<CanvasRenderingContext2d>()
                    .ok()?;
                Some((canvas, ctx))
            });
        if canvas.is_none() {
            log::warn!("No confetti canvas, celebration disabled");
        }

        let seed = js_sys::Date::now() as u64;
        let (width, height) = window_size(&window);
        let presenter = DomPresenter {
            document: document.clone(),
            confetti: Confetti::new(width as f32, height as f32, seed.rotate_left(17)),
        };
        let app = Rc::new(RefCell::new(App {
            game: MemoryGame::new(seed, presenter),
            settings: Settings::default(),
            canvas,
            last_time: 0.0,
            accumulator: 0.0,
        }));
        app.borrow_mut().resize(width, height);

        log::info!("Game initialized with seed: {}", seed);

        setup_start_button(&document, app.clone());
        setup_hint_button(&document, app.clone());
        setup_mode_toggle(&document, app.clone());
        setup_board_clicks(&document, app.clone());
        setup_resize(&window, app.clone());

        request_animation_frame(app);

        log::info!("Cat Match running!");
    }

    fn on_click(document: &Document, id: &str, handler: impl FnMut(MouseEvent) + 'static) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("No #{} element", id);
            return;
        };
        let closure = Closure::<dyn FnMut(MouseEvent)>::new(handler);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_start_button(document: &Document, app: Rc<RefCell<App>>) {
        let select = document
            .get_element_by_id("difficulty")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok());
        on_click(document, "start-btn", move |_event: MouseEvent| {
            let mut a = app.borrow_mut();
            let difficulty = match &select {
                Some(select) => a.settings.select_difficulty(&select.value()),
                None => a.settings.difficulty,
            };
            a.game.start(difficulty);
        });
    }

    fn setup_hint_button(document: &Document, app: Rc<RefCell<App>>) {
        on_click(document, "hint-btn", move |_event: MouseEvent| {
            let outcome = app.borrow_mut().game.request_hint();
            log::debug!("Hint: {:?}", outcome);
        });
    }

    fn setup_mode_toggle(document: &Document, app: Rc<RefCell<App>>) {
        let document_clone = document.clone();
        on_click(document, "mode-toggle", move |_event: MouseEvent| {
            let mut a = app.borrow_mut();
            let label = a.settings.toggle_theme();
            if let Some(body) = document_clone.body() {
                let _ = body
                    .class_list()
                    .toggle_with_force("dark-mode", a.settings.theme == Theme::Dark);
            }
            if let Some(btn) = document_clone.get_element_by_id("mode-toggle") {
                btn.set_text_content(Some(label));
            }
        });
    }

    /// One delegated listener for every card, so re-dealing needs no rebinding
    fn setup_board_clicks(document: &Document, app: Rc<RefCell<App>>) {
        let Some(container) = document.get_element_by_id("game-container") else {
            log::warn!("No #game-container element");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let index = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(".card").ok().flatten())
                .and_then(|card| card.get_attribute("data-index"))
                .and_then(|s| s.parse::<usize>().ok());
            if let Some(index) = index {
                let outcome = app.borrow_mut().game.select_card(index);
                log::debug!("Card {}: {:?}", index, outcome);
            }
        });
        let _ =
            container.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = window_size(&window_clone);
            app.borrow_mut().resize(width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                (time - a.last_time).max(0.0)
            } else {
                0.0
            };
            a.last_time = time;

            a.update(dt);
            a.draw_confetti();
        }

        request_animation_frame(app);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::collections::BTreeMap;

    use cat_match::consts::{HINT_REVEAL_MS, MISMATCH_DELAY_MS};
    use cat_match::sim::{GameEvent, GamePhase, MemoryGame, PairKey};
    use cat_match::Difficulty;

    /// Simulated pause between clicks
    const THINK_MS: u64 = 400;

    /// Plays by remembering every card it has seen face up
    #[derive(Default)]
    struct MemoryBot {
        seen: BTreeMap<usize, PairKey>,
    }

    impl MemoryBot {
        fn observe(&mut self, events: &[GameEvent]) {
            for event in events {
                match event {
                    GameEvent::CardChanged { index, card } if card.is_flipped => {
                        self.seen.insert(*index, card.key);
                    }
                    GameEvent::Won | GameEvent::Lost(_) | GameEvent::Progress { .. } => {
                        log::info!("{:?}", event)
                    }
                    _ => log::debug!("{:?}", event),
                }
            }
        }

        /// A remembered face-down card whose partner is also remembered
        fn known_pair(&self, game: &MemoryGame<Vec<GameEvent>>) -> Option<usize> {
            let cards = game.board().cards();
            self.seen
                .iter()
                .filter(|(i, _)| cards[**i].is_hidden())
                .find(|(i, key)| self.partner(game, **i, **key).is_some())
                .map(|(i, _)| *i)
        }

        fn partner(&self, game: &MemoryGame<Vec<GameEvent>>, index: usize, key: PairKey) -> Option<usize> {
            let cards = game.board().cards();
            self.seen
                .iter()
                .find(|(j, k)| **j != index && **k == key && cards[**j].is_hidden())
                .map(|(j, _)| *j)
        }

        fn pick(&self, game: &MemoryGame<Vec<GameEvent>>) -> Option<usize> {
            let cards = game.board().cards();
            let unseen = (0..cards.len()).find(|i| cards[*i].is_hidden() && !self.seen.contains_key(i));
            let any = || (0..cards.len()).find(|i| cards[*i].is_hidden());

            match game.session().flipped.first() {
                None => self.known_pair(game).or(unseen).or_else(any),
                Some(&first) => self
                    .partner(game, first, cards[first].key)
                    .or(unseen)
                    .or_else(any),
            }
        }
    }

    fn drain(game: &mut MemoryGame<Vec<GameEvent>>) -> Vec<GameEvent> {
        game.presenter_mut().drain(..).collect()
    }

    /// Play a few games in a row so streak and high score carry over
    pub fn play(difficulty: Difficulty, seed: u64, rounds: u32) {
        let mut game = MemoryGame::new(seed, Vec::new());

        for round in 1..=rounds {
            let mut bot = MemoryBot::default();
            game.start(difficulty);

            while game.phase() == GamePhase::Playing {
                bot.observe(&drain(&mut game));

                if game.session().is_locked {
                    game.advance(MISMATCH_DELAY_MS);
                    continue;
                }
                if game.session().flipped.is_empty()
                    && bot.known_pair(&game).is_none()
                    && game.session().hints_left > 0
                {
                    let outcome = game.request_hint();
                    log::info!("Hint: {:?}", outcome);
                    bot.observe(&drain(&mut game));
                    game.advance(HINT_REVEAL_MS);
                    continue;
                }

                let Some(index) = bot.pick(&game) else {
                    break;
                };
                let outcome = game.select_card(index);
                log::debug!("Card {}: {:?}", index, outcome);
                game.advance(THINK_MS);
            }
            bot.observe(&drain(&mut game));

            let session = game.session();
            let progress = game.progress();
            println!(
                "Round {} ({}): {:?} | {} | streak {} | high score {}",
                round,
                difficulty.as_str(),
                game.phase(),
                session.status_text(),
                progress.current_streak,
                progress.high_score
            );
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cat Match (native) starting...");
    log::info!("Native mode runs a bot demo - run with `trunk serve` for the web version");

    // cat-match [easy|medium|hard] [seed]
    let mut args = std::env::args().skip(1);
    let difficulty = args
        .next()
        .and_then(|s| cat_match::Difficulty::from_str(&s))
        .unwrap_or_default();
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);

    demo::play(difficulty, seed, 3);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
