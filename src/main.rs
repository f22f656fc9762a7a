//! Dino Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, HtmlCanvasElement, HtmlImageElement, KeyboardEvent, TouchEvent};

    use dino_dash::assets::AssetId;
    use dino_dash::consts::DEFAULT_PLAYFIELD_WIDTH;
    use dino_dash::highscores::LocalScoreStore;
    use dino_dash::platform::input::{
        KeyEdge, command_for_key, command_for_touch, is_game_key, toggle_for_key,
    };
    use dino_dash::renderer::{CanvasRenderer, Renderer, build_scene};
    use dino_dash::sim::{Command, GamePhase, TickOutcome};
    use dino_dash::{Driver, Leaderboard, PlaceholderLeaderboard, ScoreStore, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        driver: Driver<LocalScoreStore>,
        renderer: Option<CanvasRenderer>,
        settings: Settings,
        leaderboard: PlaceholderLeaderboard,
    }

    impl Game {
        fn new(width: f32, seed: u64) -> Self {
            let store = LocalScoreStore;
            let best = store.get();
            Self {
                driver: Driver::new(Tuning::default(), width, seed, store),
                renderer: None,
                settings: Settings::load(),
                leaderboard: PlaceholderLeaderboard::new(best),
            }
        }

        /// Render the current frame
        fn draw(&mut self) {
            let scene = build_scene(self.driver.state(), self.driver.assets(), &self.settings);
            if let Some(ref mut renderer) = self.renderer {
                renderer.render(&scene);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = get_document() else {
                return;
            };
            let state = self.driver.state();

            set_text(&document, "score", &state.score.to_string());
            set_text(&document, "highScore", &state.best_score.to_string());
            if self.settings.show_fps {
                set_text(&document, "fps", &self.driver.fps().to_string());
            }

            let game_over = state.phase == GamePhase::GameOver;
            set_class(&document, "messageOverlay", "visible", game_over);
            set_class(
                &document,
                "saveScoreButton",
                "hidden",
                !(game_over && self.leaderboard.is_signed_in()),
            );
            if game_over {
                set_text(&document, "guestScore", &state.score.to_string());
                set_text(
                    &document,
                    "messageText",
                    &format!("Game Over! Score: {}", state.score),
                );
            } else if state.phase == GamePhase::Running {
                set_text(&document, "guestScore", &state.score.to_string());
            }
        }

        /// Rebuild the leaderboard list
        fn render_leaderboard(&self) {
            let Some(document) = get_document() else {
                return;
            };
            let Some(list) = document.get_element_by_id("leaderboardList") else {
                return;
            };
            list.set_inner_html("");

            let entries = self.leaderboard.fetch();
            if entries.is_empty() {
                list.set_inner_html("<li>No scores yet!</li>");
                return;
            }
            for entry in entries {
                let Ok(li) = document.create_element("li") else {
                    continue;
                };
                for text in [entry.name, entry.score.to_string()] {
                    if let Ok(span) = document.create_element("span") {
                        span.set_text_content(Some(&text));
                        let _ = li.append_child(&span);
                    }
                }
                let _ = list.append_child(&li);
            }
        }

        fn update_session_buttons(&self) {
            let Some(document) = get_document() else {
                return;
            };
            let signed_in = self.leaderboard.is_signed_in();
            set_text(
                &document,
                "signInButton",
                if signed_in { "Sign Out" } else { "Sign In" },
            );
            set_class(&document, "signUpButton", "hidden", signed_in);
            set_class(&document, "saveScoreButton", "hidden", true);
        }
    }

    fn get_document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(document: &Document, id: &str, class: &str, on: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force(class, on);
        }
    }

    fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn container_width(canvas: &HtmlCanvasElement) -> f32 {
        canvas
            .parent_element()
            .map(|p| p.client_width() as f32)
            .filter(|w| *w > 0.0)
            .unwrap_or(DEFAULT_PLAYFIELD_WIDTH)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Dino Dash starting...");

        let document = get_document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let width = container_width(&canvas);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(width, seed)));
        {
            let mut g = game.borrow_mut();
            g.renderer = Some(CanvasRenderer::new(canvas.clone())?);
            g.draw();
        }
        log::info!("Game initialized with seed: {}", seed);

        // Set up input handlers
        setup_input_handlers(&document, &canvas, game.clone())?;

        // Set up overlay and account buttons
        setup_buttons(&document, game.clone());

        // Re-layout on resize, redraw when the tab comes back
        setup_window_handlers(&document, &canvas, game.clone())?;

        // Preload every sprite; failures settle too
        let promises = js_sys::Array::new();
        for id in AssetId::all() {
            promises.push(&load_image(&game, id)?);
        }
        JsFuture::from(js_sys::Promise::all(&promises)).await?;

        set_class(&document, "loadingMessage", "hidden", true);
        {
            let mut g = game.borrow_mut();
            let best = g.driver.state().best_score;
            g.leaderboard.set_local_best(best);
            g.draw();
            g.update_hud();
            g.render_leaderboard();
        }

        log::info!("Dino Dash ready!");
        Ok(())
    }

    /// Start loading one sprite. The promise resolves on load and on error.
    fn load_image(game: &Rc<RefCell<Game>>, id: AssetId) -> Result<js_sys::Promise, JsValue> {
        let image = HtmlImageElement::new()?;
        let promise = js_sys::Promise::new(&mut |resolve: js_sys::Function, _reject| {
            let on_load = {
                let game = game.clone();
                let image = image.clone();
                let resolve = resolve.clone();
                Closure::once_into_js(move || {
                    {
                        let mut g = game.borrow_mut();
                        g.driver.asset_loaded(id);
                        if let Some(ref mut renderer) = g.renderer {
                            renderer.insert_image(id, image);
                        }
                        g.draw();
                    }
                    let _ = resolve.call0(&JsValue::NULL);
                })
            };
            let on_error = {
                let game = game.clone();
                Closure::once_into_js(move || {
                    {
                        let mut g = game.borrow_mut();
                        g.driver.asset_failed(id);
                        g.draw();
                    }
                    let _ = resolve.call0(&JsValue::NULL);
                })
            };
            image.set_onload(Some(on_load.unchecked_ref()));
            image.set_onerror(Some(on_error.unchecked_ref()));
        });
        image.set_src(id.source());
        Ok(promise)
    }

    /// Route a command and kick the frame loop when a run starts
    fn dispatch(game: &Rc<RefCell<Game>>, command: Command) {
        let kick = {
            let mut g = game.borrow_mut();
            let kick = g.driver.handle(command);
            if kick {
                g.update_hud();
            }
            kick
        };
        if kick {
            request_animation_frame(game.clone());
        }
    }

    fn setup_input_handlers(
        document: &Document,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Keyboard
        for (event_name, edge) in [("keydown", KeyEdge::Down), ("keyup", KeyEdge::Up)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if let Some(which) = toggle_for_key(&code, edge) {
                    if event.repeat() {
                        return;
                    }
                    let mut g = game.borrow_mut();
                    g.settings.toggle(which);
                    g.settings.save();
                    g.draw();
                    g.update_hud();
                    return;
                }
                if !is_game_key(&code) {
                    return;
                }
                event.prevent_default();
                if let Some(command) = command_for_key(&code, edge) {
                    dispatch(&game, command);
                }
            });
            document
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start (jump / start / restart)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                dispatch(&game, command_for_touch());
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        // Restart
        if let Some(btn) = document.get_element_by_id("restartButton") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                dispatch(&game, Command::Restart);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Sign in / sign out
        if let Some(btn) = document.get_element_by_id("signInButton") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                let best = g.driver.state().best_score;
                g.leaderboard.set_local_best(best);
                g.leaderboard.toggle_session();
                g.update_session_buttons();
                g.render_leaderboard();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Sign up
        if let Some(btn) = document.get_element_by_id("signUpButton") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let result = game.borrow_mut().leaderboard.sign_up();
                if let Err(e) = result {
                    alert(&e.to_string());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Save score
        if let Some(btn) = document.get_element_by_id("saveScoreButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                let score = g.driver.state().score;
                match g.leaderboard.submit(score) {
                    Ok(()) => alert(&format!("Score {} would be saved.", score)),
                    Err(e) => alert(&e.to_string()),
                }
                if let Some(document) = get_document() {
                    set_class(&document, "saveScoreButton", "hidden", true);
                }
                g.render_leaderboard();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_window_handlers(
        document: &Document,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Resize: new width, same simulation frame
        {
            let game = game.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.driver.resize(container_width(&canvas));
                g.draw();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Visibility change (tab switch, minimize)
        {
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Visible {
                    game.borrow_mut().draw();
                } else {
                    log::info!("Tab hidden; frames suspended by the browser");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let outcome = g.driver.frame(time);
            g.draw();
            g.update_hud();

            if let TickOutcome::GameOver { new_best, .. } = outcome {
                if new_best {
                    let best = g.driver.state().best_score;
                    g.leaderboard.set_local_best(best);
                    g.render_leaderboard();
                }
            }
            g.driver.loop_active()
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;

    use dino_dash::assets::AssetRegistry;
    use dino_dash::consts::DEFAULT_PLAYFIELD_WIDTH;
    use dino_dash::renderer::{HeadlessRenderer, Renderer, build_scene};
    use dino_dash::sim::TickOutcome;
    use dino_dash::{Driver, MemoryScoreStore, Settings, Tuning};

    /// Command-line options for a batch of bot runs
    pub struct Options {
        pub tuning_path: Option<String>,
        pub runs: u32,
        pub seed: u64,
        pub max_ticks: u64,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                tuning_path: None,
                runs: 5,
                seed: 1,
                max_ticks: 100_000,
            }
        }
    }

    impl Options {
        pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
            let mut options = Self::default();
            let mut args = args.into_iter();
            while let Some(arg) = args.next() {
                let mut value = |name: &str| {
                    args.next()
                        .ok_or_else(|| format!("{} needs a value", name))
                };
                match arg.as_str() {
                    "--runs" => {
                        options.runs = value("--runs")?
                            .parse()
                            .map_err(|e| format!("--runs: {}", e))?
                    }
                    "--seed" => {
                        options.seed = value("--seed")?
                            .parse()
                            .map_err(|e| format!("--seed: {}", e))?
                    }
                    "--max-ticks" => {
                        options.max_ticks = value("--max-ticks")?
                            .parse()
                            .map_err(|e| format!("--max-ticks: {}", e))?
                    }
                    flag if flag.starts_with("--") => {
                        return Err(format!("unknown option {}", flag));
                    }
                    path => options.tuning_path = Some(path.to_string()),
                }
            }
            Ok(options)
        }
    }

    pub fn run(options: Options) -> Result<(), Box<dyn Error>> {
        let tuning = match &options.tuning_path {
            Some(path) => {
                log::info!("Loading tuning from {}", path);
                Tuning::from_json(&std::fs::read_to_string(path)?)?
            }
            None => Tuning::default(),
        };

        let settings = Settings::load();
        let mut renderer = HeadlessRenderer::default();
        let mut driver = Driver::new(
            tuning,
            DEFAULT_PLAYFIELD_WIDTH,
            options.seed,
            MemoryScoreStore::default(),
        )
        .with_assets(AssetRegistry::preloaded());

        for run in 1..=options.runs {
            let outcome = driver.run_autopilot(options.max_ticks);
            renderer.render(&build_scene(driver.state(), driver.assets(), &settings));

            match outcome {
                TickOutcome::GameOver {
                    score,
                    new_best,
                    hit,
                } => log::info!(
                    "Run {}: crashed into {} at score {}{}",
                    run,
                    hit.as_str(),
                    score,
                    if new_best { " (new best)" } else { "" }
                ),
                TickOutcome::Advanced | TickOutcome::Idle => {
                    log::info!("Run {}: survived {} ticks", run, driver.state().score);
                    // A capped run never reaches game over, so the next start would be a jump
                    break;
                }
            }
        }

        println!(
            "best score {} over {} frame(s), last overlay: {:?}",
            driver.state().best_score,
            renderer.frames,
            renderer.last_texts
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dino Dash (native) starting...");
    log::info!(
        "Native mode runs the autopilot headless - run with `trunk serve` for the web version"
    );

    let result = headless::Options::parse(std::env::args().skip(1))
        .map_err(|e| e.into())
        .and_then(headless::run);
    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
