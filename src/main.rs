//! Smash Pong entry point
//!
//! Browser builds wire the game into the page; native builds run a headless
//! demo match against the in-memory leaderboard.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, MouseEvent, TouchEvent};

    use smash_pong::audio::{AudioManager, SoundEffect};
    use smash_pong::consts::LEADERBOARD_LIMIT;
    use smash_pong::game_loop::{Clock, FrameHandle, FrameScheduler, GameLoop};
    use smash_pong::input::pointer_to_field_x;
    use smash_pong::leaderboard::{
        GameResultRequest, HttpLeaderboard, LeaderboardEntry, fetch_leaderboard, save_game_result,
    };
    use smash_pong::renderer::RenderState;
    use smash_pong::sim::{RenderSnapshot, Side};
    use smash_pong::app::target_label;
    use smash_pong::{App, FrameSink, MatchController, MatchPhase, Screen, Settings};

    /// `requestAnimationFrame` behind the loop's scheduler seam
    struct RafScheduler {
        window: web_sys::Window,
        callback: Option<Closure<dyn FnMut(f64)>>,
    }

    impl FrameScheduler for RafScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            let Some(callback) = &self.callback else {
                log::error!("Frame requested before the callback was installed");
                return FrameHandle(0);
            };
            match self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())
            {
                Ok(id) => FrameHandle(id),
                Err(e) => {
                    log::error!("requestAnimationFrame failed: {e:?}");
                    FrameHandle(0)
                }
            }
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            let _ = self.window.cancel_animation_frame(handle.0);
        }
    }

    struct PerformanceClock {
        performance: Option<web_sys::Performance>,
    }

    impl Clock for PerformanceClock {
        fn now_ms(&self) -> f64 {
            match &self.performance {
                Some(p) => p.now(),
                None => js_sys::Date::now(),
            }
        }
    }

    /// Everything the page callbacks share
    struct Host {
        app: App,
        game_loop: GameLoop<RafScheduler, PerformanceClock>,
        renderer: Option<RenderState>,
        audio: AudioManager,
        service: HttpLeaderboard,
        canvas: HtmlCanvasElement,
        document: Document,
    }

    type Shared = Rc<RefCell<Host>>;

    // === DOM helpers ===

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn on_click(document: &Document, id: &str, host: &Shared, handler: fn(&Shared)) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing #{id}");
            return;
        };
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler(&host));
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn input_element(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    // === Screens ===

    fn show_screen(host: &Host) {
        let screen = host.app.screen();
        set_visible(&host.document, "menu", screen == Screen::Menu);
        set_visible(&host.document, "game", screen == Screen::Playing);
        set_visible(&host.document, "leaderboard", screen == Screen::Leaderboard);
    }

    fn update_hud(document: &Document, ctrl: &MatchController) {
        let snap = ctrl.snapshot();
        set_text(document, "score-player", &snap.player_score.to_string());
        set_text(document, "score-cpu", &snap.opponent_score.to_string());
        set_text(document, "target", &target_label(snap.target_score));
        set_text(
            document,
            "serve-indicator",
            if snap.server == Side::Player {
                "Your serve"
            } else {
                "CPU serve"
            },
        );
        set_text(
            document,
            "pause-btn",
            if ctrl.phase() == MatchPhase::Paused {
                "Resume"
            } else {
                "Pause"
            },
        );
        set_visible(document, "paused-overlay", snap.paused);

        match snap.outcome {
            Some(outcome) => {
                let text = match outcome.winner {
                    Some(Side::Player) => "You win!",
                    Some(Side::Opponent) => "CPU wins",
                    None => "Draw",
                };
                set_text(document, "game-over-text", text);
                set_visible(document, "game-over-overlay", true);
            }
            None => set_visible(document, "game-over-overlay", false),
        }
    }

    fn render_leaderboard(document: &Document, entries: &[LeaderboardEntry], loading: bool) {
        let Some(list) = document.get_element_by_id("leaderboard-list") else {
            return;
        };
        list.set_text_content(None);

        let status = if loading {
            Some("Loading...")
        } else if entries.is_empty() {
            Some("No games yet")
        } else {
            None
        };
        if let Some(status) = status {
            list.set_text_content(Some(status));
            return;
        }

        for entry in entries {
            let Ok(row) = document.create_element("li") else {
                continue;
            };
            // Text content only: names are user input
            row.set_text_content(Some(&entry.to_string()));
            let _ = list.append_child(&row);
        }
    }

    // === Actions ===

    fn start_game(host: &Shared) {
        let mut guard = host.borrow_mut();
        let h = &mut *guard;
        if let Some(input) = input_element(&h.document, "name-input") {
            h.app.set_player_name(&input.value());
        }
        h.audio.apply_settings(&h.app.settings);
        h.audio.resume();

        h.game_loop.stop();
        let seed = js_sys::Date::now() as u64;
        let ctrl = h.app.start_match(seed);
        update_hud(&h.document, ctrl);
        show_screen(h);
        // The canvas has no layout size while its screen is hidden
        fit_canvas(h);
        h.game_loop.start();
    }

    fn toggle_pause(host: &Shared) {
        let mut guard = host.borrow_mut();
        let h = &mut *guard;
        let Some(ctrl) = h.app.active_mut() else {
            return;
        };
        if !ctrl.toggle_pause() {
            return;
        }
        if ctrl.phase() == MatchPhase::InProgress {
            h.game_loop.start();
        } else {
            h.game_loop.stop();
            if let Some(renderer) = h.renderer.as_mut() {
                renderer.present(&ctrl.snapshot());
            }
        }
        update_hud(&h.document, ctrl);
    }

    fn quit_game(host: &Shared) {
        let mut h = host.borrow_mut();
        h.game_loop.stop();
        h.app.quit_to_menu();
        show_screen(&h);
    }

    fn open_leaderboard(host: &Shared) {
        let service = {
            let mut h = host.borrow_mut();
            h.game_loop.stop();
            h.app.show_leaderboard();
            show_screen(&h);
            render_leaderboard(&h.document, &[], true);
            h.service.clone()
        };

        let host = host.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let entries = fetch_leaderboard(&service, LEADERBOARD_LIMIT).await;
            let mut h = host.borrow_mut();
            if h.app.screen() == Screen::Leaderboard {
                render_leaderboard(&h.document, &entries, false);
                h.app.set_leaderboard(entries);
            }
        });
    }

    fn back_to_menu(host: &Shared) {
        let mut h = host.borrow_mut();
        h.app.back_to_menu();
        show_screen(&h);
    }

    /// Fire-and-forget: the outcome never feeds back into the game
    fn submit_result(service: HttpLeaderboard, report: GameResultRequest) {
        wasm_bindgen_futures::spawn_local(async move {
            save_game_result(&service, &report).await;
        });
    }

    fn on_animation_frame(host: &Shared) {
        let (report, show_leaderboard) = {
            let mut guard = host.borrow_mut();
            let h = &mut *guard;
            let Some(ctrl) = h.app.active_mut() else {
                return;
            };
            let outcome = match h.renderer.as_mut() {
                Some(renderer) => h.game_loop.on_frame(ctrl, renderer),
                None => h.game_loop.on_frame(ctrl, &mut |_: &RenderSnapshot| {}),
            };
            for event in &outcome.events {
                h.audio.play(SoundEffect::for_event(event));
            }
            update_hud(&h.document, ctrl);
            (outcome.report, outcome.show_leaderboard)
        };

        if let Some(report) = report {
            let service = host.borrow().service.clone();
            submit_result(service, report);
        }
        if show_leaderboard {
            open_leaderboard(host);
        }
    }

    // === Wiring ===

    fn install_frame_callback(host: &Shared) {
        let weak: Weak<RefCell<Host>> = Rc::downgrade(host);
        let closure = Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
            if let Some(host) = weak.upgrade() {
                on_animation_frame(&host);
            }
        });
        host.borrow_mut().game_loop.scheduler_mut().callback = Some(closure);
    }

    fn move_paddle(host: &Shared, client_x: f32) {
        let mut guard = host.borrow_mut();
        let h = &mut *guard;
        let rect = h.canvas.get_bounding_client_rect();
        let x = pointer_to_field_x(
            client_x,
            rect.left() as f32,
            rect.width() as f32,
            rect.height() as f32,
        );
        if let Some(ctrl) = h.app.active_mut() {
            ctrl.set_player_center(x);
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, host: &Shared) {
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                move_paddle(&host, event.client_x() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for name in ["touchstart", "touchmove"] {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    move_paddle(&host, touch.client_x() as f32);
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_menu(document: &Document, host: &Shared) {
        {
            let h = host.borrow();
            if let Some(input) = input_element(document, "target-input") {
                input.set_value(&h.app.settings.target_score.to_string());
            }
            if let Some(input) = input_element(document, "name-input") {
                input.set_value(&h.app.settings.player_name);
            }
        }

        // Minimum enforced when the value is committed, not per keystroke
        if let Some(input) = input_element(document, "target-input") {
            let host = host.clone();
            let field = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let value = field.value().trim().parse::<u32>().unwrap_or(0);
                let committed = host.borrow_mut().app.set_target_score(value);
                field.set_value(&committed.to_string());
            });
            let _ =
                input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        on_click(document, "start-btn", host, start_game);
        on_click(document, "leaderboard-btn", host, open_leaderboard);
        on_click(document, "pause-btn", host, toggle_pause);
        on_click(document, "quit-btn", host, quit_game);
        on_click(document, "back-btn", host, back_to_menu);
    }

    fn setup_auto_pause(document: &Document, host: &Shared) {
        let host = host.clone();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() != web_sys::VisibilityState::Hidden {
                return;
            }
            let playing = host
                .borrow()
                .app
                .active()
                .is_some_and(|c| c.phase() == MatchPhase::InProgress);
            if playing {
                toggle_pause(&host);
                log::info!("Auto-paused (tab hidden)");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(window: &web_sys::Window, host: &Shared) {
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            fit_canvas(&mut host.borrow_mut());
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Match the backing store to the displayed size and redraw
    fn fit_canvas(h: &mut Host) {
        let (width, height) = canvas_pixel_size(&h.canvas);
        h.canvas.set_width(width);
        h.canvas.set_height(height);
        if let Some(renderer) = h.renderer.as_mut() {
            renderer.resize(width, height);
            if let Some(ctrl) = h.app.active() {
                renderer.present(&ctrl.snapshot());
            }
        }
    }

    fn canvas_pixel_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    async fn create_renderer(canvas: &HtmlCanvasElement) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {e}");
                return None;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {e}");
                return None;
            }
        };
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (width, height) = canvas_pixel_size(canvas);
        canvas.set_width(width);
        canvas.set_height(height);
        match RenderState::new(surface, &adapter, width, height).await {
            Ok(renderer) => Some(renderer),
            Err(e) => {
                log::error!("{e}");
                None
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Smash Pong starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let renderer = create_renderer(&canvas).await;
        if renderer.is_none() {
            log::warn!("Rendering disabled; the game still runs without a canvas");
        }

        let settings = Settings::load();
        let host = Rc::new(RefCell::new(Host {
            audio: AudioManager::new(&settings),
            service: HttpLeaderboard::new(settings.api_base_url.clone()),
            app: App::new(settings),
            game_loop: GameLoop::new(
                RafScheduler {
                    window: window.clone(),
                    callback: None,
                },
                PerformanceClock {
                    performance: window.performance(),
                },
            ),
            renderer,
            canvas: canvas.clone(),
            document: document.clone(),
        }));

        install_frame_callback(&host);
        setup_input_handlers(&canvas, &host);
        setup_menu(&document, &host);
        setup_auto_pause(&document, &host);
        setup_resize(&window, &host);

        show_screen(&host.borrow());
        log::info!("Smash Pong ready");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {e:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::future::Future;
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    use smash_pong::consts::{LEADERBOARD_LIMIT, SIM_DT_MS};
    use smash_pong::game_loop::{ManualClock, ManualScheduler};
    use smash_pong::leaderboard::{MemoryLeaderboard, fetch_leaderboard, save_game_result};
    use smash_pong::sim::{RenderSnapshot, opponent};
    use smash_pong::{App, GameLoop, MatchController, Settings};

    /// Autopilot paddle speed; a little slower than the CPU so matches end
    const AUTOPILOT_SPEED: f32 = 4.0;
    /// Stop a demo match that refuses to end (ten simulated minutes)
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    const MATCHES: u64 = 3;

    /// Drive a future that completes without waiting (the in-memory leaderboard)
    fn block_on<F: Future>(future: F) -> F::Output {
        let mut future = pin!(future);
        let mut cx = Context::from_waker(Waker::noop());
        loop {
            if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
                return output;
            }
        }
    }

    fn steer(ctrl: &mut MatchController) {
        let state = ctrl.state();
        let mut paddle = state.player.clone();
        opponent::track(&mut paddle, state.ball.pos.x, AUTOPILOT_SPEED);
        ctrl.set_player_x(paddle.pos.x);
    }

    fn play_match(app: &mut App, board: &MemoryLeaderboard, seed: u64) {
        let clock = ManualClock::new(0.0);
        let mut game_loop = GameLoop::new(ManualScheduler::default(), clock.clone());
        let mut frames = 0u32;
        let mut last = None;
        let mut sink =
            |snap: &RenderSnapshot| last = Some((snap.player_score, snap.opponent_score));

        let ctrl = app.start_match(seed);
        game_loop.start();
        while game_loop.scheduler_mut().fire().is_some() {
            frames += 1;
            if frames > MAX_FRAMES {
                log::warn!("Demo match {seed} did not finish, abandoning");
                game_loop.stop();
                app.quit_to_menu();
                return;
            }
            steer(ctrl);
            clock.advance(SIM_DT_MS);
            let outcome = game_loop.on_frame(ctrl, &mut sink);

            if let Some(report) = outcome.report {
                block_on(save_game_result(board, &report));
            }
            if outcome.show_leaderboard {
                break;
            }
        }
        log::info!(
            "Demo match {seed}: {frames} frames, final {:?}",
            last.unwrap_or_default()
        );
    }

    pub fn run() {
        let settings = Settings::load();
        log::info!(
            "Demo: {} playing to {} total points",
            settings.player_name,
            settings.target_score
        );
        let board = MemoryLeaderboard::new();
        let mut app = App::new(settings);

        for seed in 1..=MATCHES {
            play_match(&mut app, &board, seed);
        }

        app.show_leaderboard();
        app.set_leaderboard(block_on(fetch_leaderboard(&board, LEADERBOARD_LIMIT)));
        for (rank, entry) in app.leaderboard().iter().enumerate() {
            log::info!("#{} {entry}", rank + 1);
        }
        app.back_to_menu();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Smash Pong (native) starting headless demo...");
    log::info!("Run with `trunk serve` for the playable web version");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
