//! Space Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{
        AddEventListenerOptions, Document, HtmlCanvasElement, HtmlElement, HtmlImageElement,
        HtmlSelectElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use space_dodge::assets::DEFAULT_SKINS;
    use space_dodge::audio::{AudioManager, SoundEffect};
    use space_dodge::platform::LocalStore;
    use space_dodge::renderer::{Canvas2d, render};
    use space_dodge::sim::{
        GameEvent, GameState, TickInput, drag_player_to, reset, select_skin, shuffle, tick,
        toggle_pause,
    };
    use space_dodge::{BestScore, Settings, SkinInfo, SkinSet, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        canvas: Canvas2d,
        skins: SkinSet,
        skins_settled: usize,
        settings: Settings,
        store: LocalStore,
        audio: AudioManager,
        input: TickInput,
        last_time: f64,
        dragging: bool,
    }

    impl Game {
        /// Advance the simulation and react to what happened
        fn update(&mut self, dt_ms: f32) {
            let input = self.input;
            tick(&mut self.state, &input, dt_ms);
            self.handle_events();
        }

        /// Apply HUD, audio and persistence side effects for this frame's events
        fn handle_events(&mut self) {
            let Some(document) = document() else { return };
            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                match event {
                    GameEvent::ScoreChanged(score) => {
                        set_text(&document, "score", &score.to_string());
                        let speed = 1.0 + score as f32 * space_dodge::consts::SCORE_SPEEDUP;
                        set_text(&document, "speed", &format!("{speed:.2}x"));
                    }
                    GameEvent::LivesChanged(lives) => {
                        set_text(&document, "lives", &lives.to_string());
                    }
                    GameEvent::BestChanged(best) => {
                        set_text(&document, "best", &best.to_string());
                    }
                    GameEvent::StartScreenShown => show(&document, "startScreen", true),
                    GameEvent::PauseChanged(paused) => {
                        set_text(&document, "pauseBtn", if paused { "Resume" } else { "Pause" });
                    }
                    GameEvent::GameOver { new_best: true, .. } => {
                        self.state.best.save(&mut self.store);
                    }
                    GameEvent::PlayerHit(_) | GameEvent::GameOver { .. } => {}
                }
            }
        }

        fn render(&mut self, time: f64) {
            render(&mut self.canvas, &self.state, &self.skins, &self.settings, time);
        }

        /// Record a finished skin load (success or failure)
        fn skin_loaded(&mut self, index: usize, image: Option<HtmlImageElement>) {
            let info = image
                .as_ref()
                .map(|img| SkinInfo::new(img.natural_width() as f32, img.natural_height() as f32));
            self.skins.set(index, info);
            self.canvas.set_skin_image(index, image);
            self.skins_settled += 1;

            let Some(document) = document() else { return };
            let pct = self.skins_settled * 100 / DEFAULT_SKINS.len();
            if let Some(bar) = query::<HtmlElement>(&document, ".loading-progress") {
                let _ = bar.style().set_property("width", &format!("{pct}%"));
            }
            set_text(&document, "loadingText", &format!("Loading assets... {pct}%"));

            if self.skins_settled == DEFAULT_SKINS.len() {
                log::info!("Skins ready ({} of {} loaded)", self.loaded_skin_count(), DEFAULT_SKINS.len());
                let preferred = self.settings.skin;
                if !select_skin(&mut self.state, preferred, &self.skins) {
                    if let Some(first) = self.skins.first_available() {
                        select_skin(&mut self.state, first, &self.skins);
                    }
                }
                populate_skin_select(&document, self.state.player.skin);
                update_skin_preview(&document, &self.skins, self.state.player.skin);
            }
        }

        fn loaded_skin_count(&self) -> usize {
            (0..self.skins.len()).filter(|i| self.skins.get(*i).is_some()).count()
        }

        fn choose_skin(&mut self, index: usize) {
            if select_skin(&mut self.state, index, &self.skins) {
                self.settings.skin = index;
                self.settings.save(&mut self.store);
                if let Some(document) = document() {
                    update_skin_preview(&document, &self.skins, index);
                }
            }
        }

        fn start_round(&mut self) {
            self.audio.resume();
            if let Some(document) = document() {
                show(&document, "startScreen", false);
            }
            reset(&mut self.state);
            self.handle_events();
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn query<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
        document.query_selector(selector).ok().flatten()?.dyn_into::<T>().ok()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el
                .style()
                .set_property("display", if visible { "flex" } else { "none" });
        }
    }

    fn populate_skin_select(document: &Document, selected: usize) {
        let Some(select) = document
            .get_element_by_id("skinSelect")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        else {
            log::debug!("No skin selector on page");
            return;
        };
        select.set_inner_html("");
        for i in 0..DEFAULT_SKINS.len() {
            if let Ok(option) = document.create_element("option") {
                let _ = option.set_attribute("value", &i.to_string());
                option.set_text_content(Some(&format!("Skin {}", i + 1)));
                let _ = select.append_child(&option);
            }
        }
        select.set_value(&selected.to_string());
    }

    fn update_skin_preview(document: &Document, skins: &SkinSet, index: usize) {
        let Some(preview) = document.get_element_by_id("skinPreview") else {
            return;
        };
        match (skins.get(index), DEFAULT_SKINS.get(index)) {
            (Some(_), Some(src)) => {
                preview.set_inner_html(&format!(r#"<img src="{src}" style="max-height:88px">"#))
            }
            _ => preview.set_text_content(Some("Preview")),
        }
    }

    /// Fit the canvas into its parent keeping the world aspect ratio
    fn resize_canvas(game: &Game, canvas: &HtmlCanvasElement) {
        let Some(window) = web_sys::window() else { return };
        let tuning = &game.state.tuning;
        let world = Vec2::new(tuning.world_width, tuning.world_height);
        let aspect = (world.x / world.y) as f64;

        if let Some(parent) = canvas.parent_element() {
            let (pw, ph) = (parent.client_width() as f64, parent.client_height() as f64);
            let mut draw_w = pw;
            let mut draw_h = (draw_w / aspect).round();
            if draw_h > ph {
                draw_h = ph;
                draw_w = (draw_h * aspect).round();
            }
            let style = canvas.style();
            let _ = style.set_property("width", &format!("{draw_w}px"));
            let _ = style.set_property("height", &format!("{draw_h}px"));
        }

        let dpr = window.device_pixel_ratio().max(1.0);
        game.canvas.configure(canvas, world, dpr);
    }

    /// Attach `handler` to `event` on the element with `id`, if it exists
    fn bind(
        document: &Document,
        id: &str,
        event: &str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) {
        let Some(el) = document.get_element_by_id(id) else {
            log::debug!("No #{id} on page, skipping {event} binding");
            return;
        };
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        let _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn set_direction(input: &mut TickInput, key: &str, held: bool) -> bool {
        match key {
            "ArrowLeft" | "a" => input.left = held,
            "ArrowRight" | "d" => input.right = held,
            "ArrowUp" | "w" => input.up = held,
            "ArrowDown" | "s" => input.down = held,
            _ => return false,
        }
        true
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if key == " " {
                    event.prevent_default();
                    toggle_pause(&mut g.state);
                    g.handle_events();
                } else if set_direction(&mut g.input, &key, true) {
                    event.prevent_default();
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                set_direction(&mut game.borrow_mut().input, &event.key(), false);
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let options = AddEventListenerOptions::new();
        options.set_passive(false);

        for id in ["btnLeft", "btnRight", "btnUp", "btnDown"] {
            let Some(el) = document.get_element_by_id(id) else {
                log::debug!("No #{id} on page, skipping touch binding");
                continue;
            };
            for (event_name, held) in [("touchstart", true), ("touchend", false)] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    match id {
                        "btnLeft" => g.input.left = held,
                        "btnRight" => g.input.right = held,
                        "btnUp" => g.input.up = held,
                        _ => g.input.down = held,
                    }
                });
                let _ = el.add_event_listener_with_callback_and_add_event_listener_options(
                    event_name,
                    closure.as_ref().unchecked_ref(),
                    &options,
                );
                closure.forget();
            }
        }
    }

    fn setup_drag(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().dragging = true;
            });
            let _ = canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        if let Some(window) = web_sys::window() {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().dragging = false;
            });
            let _ = window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if !g.dragging {
                    return;
                }
                let rect = canvas_clone.get_bounding_client_rect();
                if rect.width() <= 0.0 || rect.height() <= 0.0 {
                    return;
                }
                let sx = (event.client_x() as f64 - rect.left()) / rect.width();
                let sy = (event.client_y() as f64 - rect.top()) / rect.height();
                let target = Vec2::new(
                    sx as f32 * g.state.tuning.world_width,
                    sy as f32 * g.state.tuning.world_height,
                );
                drag_player_to(&mut g.state, target);
            });
            let _ = canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["playBtn", "startBtn"] {
            let game = game.clone();
            bind(document, id, "click", move |_event| {
                game.borrow_mut().start_round();
            });
        }
        {
            let game = game.clone();
            bind(document, "pauseBtn", "click", move |_event| {
                let mut g = game.borrow_mut();
                toggle_pause(&mut g.state);
                g.handle_events();
            });
        }
        {
            let game = game.clone();
            bind(document, "shuffleBtn", "click", move |_event| {
                shuffle(&mut game.borrow_mut().state);
            });
        }
        {
            bind(document, "skinSelect", "change", move |event| {
                let index = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
                    .and_then(|select| select.value().parse::<usize>().ok());
                if let Some(index) = index {
                    game.borrow_mut().choose_skin(index);
                }
            });
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            resize_canvas(&game.borrow(), &canvas_clone);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn load_skins(game: Rc<RefCell<Game>>) {
        for (index, src) in DEFAULT_SKINS.iter().enumerate() {
            let Ok(image) = HtmlImageElement::new() else {
                game.borrow_mut().skin_loaded(index, None);
                continue;
            };
            let onload = {
                let game = game.clone();
                let image = image.clone();
                Closure::once(move || game.borrow_mut().skin_loaded(index, Some(image)))
            };
            let onerror = {
                let game = game.clone();
                Closure::once(move || game.borrow_mut().skin_loaded(index, None))
            };
            image.set_onload(Some(onload.as_ref().unchecked_ref()));
            image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onload.forget();
            onerror.forget();
            image.set_src(src);
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            let dt = if g.last_time > 0.0 { time - g.last_time } else { 0.0 };
            g.last_time = time;

            g.update(dt as f32);
            g.render(time);
        }

        request_animation_frame(game);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Space Dodge starting...");

        let Some(document) = document() else {
            log::error!("No document, nothing to draw on");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("game")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #game canvas on page");
            return;
        };
        let Some(canvas2d) = Canvas2d::new(&canvas) else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        show(&document, "startScreen", true);

        let store = LocalStore::new();
        let settings = Settings::load(&store);
        let best = BestScore::load(&store);
        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, Tuning::default(), best);
        set_text(&document, "best", &best.value().to_string());
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            canvas: canvas2d,
            skins: SkinSet::new(),
            skins_settled: 0,
            audio: AudioManager::new(&settings),
            settings,
            store,
            input: TickInput::default(),
            last_time: 0.0,
            dragging: false,
        }));

        resize_canvas(&game.borrow(), &canvas);
        setup_resize(&canvas, game.clone());
        setup_keyboard(game.clone());
        setup_touch_buttons(&document, game.clone());
        setup_drag(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        load_skins(game.clone());

        request_animation_frame(game);

        log::info!("Space Dodge running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use space_dodge::platform::{FileStore, KeyValueStore};
    use space_dodge::renderer::{CommandList, render};
    use space_dodge::sim::{GameEvent, GamePhase, GameState, TickInput, reset, tick};
    use space_dodge::{BestScore, Settings, SkinSet, Tuning};

    /// 60 Hz frames
    const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Steer away from the closest meteor falling toward the player
    fn autopilot(state: &GameState) -> TickInput {
        let player = &state.player;
        let threat = state
            .obstacles
            .iter()
            .filter(|o| o.pos.y < player.pos.y + player.height / 2.0)
            .filter(|o| (o.pos.x - player.pos.x).abs() < player.radius() + o.radius() + 12.0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        let mut input = TickInput::default();
        if let Some(threat) = threat {
            let center = state.tuning.world_width / 2.0;
            // Dodge toward the side with more room
            let go_left = if (threat.pos.x - player.pos.x).abs() < 1.0 {
                player.pos.x > center
            } else {
                threat.pos.x > player.pos.x
            };
            input.left = go_left;
            input.right = !go_left;
        }
        input
    }

    pub fn run() {
        let tuning = match std::env::var("SPACE_DODGE_TUNING") {
            Ok(path) => match std::fs::read_to_string(&path) {
                Ok(json) => Tuning::from_json_or_default(&json),
                Err(e) => {
                    log::warn!("Can't read tuning file {path}: {e}");
                    Tuning::default()
                }
            },
            Err(_) => Tuning::default(),
        };
        let store_path =
            std::env::var("SPACE_DODGE_STORE").unwrap_or_else(|_| "space_dodge.json".to_string());
        let mut store = FileStore::open(&store_path);

        let settings = Settings::load(&store);
        let best = BestScore::load(&store);
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        log::info!("Headless autopilot run, seed {seed}, best so far {}", best.value());

        let mut state = GameState::new(seed, tuning, best);
        reset(&mut state);

        let skins = SkinSet::new();
        let mut frame = CommandList::new();
        let mut frames = 0;
        while state.phase == GamePhase::Running && frames < MAX_FRAMES {
            let input = autopilot(&state);
            tick(&mut state, &input, FRAME_MS);
            for event in state.drain_events() {
                if event.is_new_best() {
                    state.best.save(&mut store);
                }
                match event {
                    GameEvent::LivesChanged(lives) => log::info!("Hit! {lives} lives left"),
                    GameEvent::GameOver { score, new_best } => {
                        log::info!("Game over with {score} points{}", if new_best { " (new best!)" } else { "" })
                    }
                    _ => {}
                }
            }
            if frames % 60 == 0 {
                render(&mut frame, &state, &skins, &settings, frames as f64 * FRAME_MS as f64);
                log::debug!("t={}s score={} draw calls={}", frames / 60, state.score, frame.len());
            }
            frames += 1;
        }

        if state.phase == GamePhase::Running {
            log::info!("Autopilot survived {} minutes with {} points", MAX_FRAMES / 3600, state.score);
        }
        log::info!(
            "Final score {}, best {} (stored in {store_path}: {:?})",
            state.score,
            state.best.value(),
            store.get(BestScore::STORAGE_KEY)
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Space Dodge (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` for the web version");
    headless::run();
}
