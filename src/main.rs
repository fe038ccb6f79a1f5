//! Sky Strike entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::closure::WasmClosure;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use sky_strike::audio::{AudioManager, SoundEffect};
    use sky_strike::platform::{PlatformError, web};
    use sky_strike::renderer::{CanvasRenderer, Hud, build_frame};
    use sky_strike::sim::InputEvent;
    use sky_strike::{Game, Settings};

    const CANVAS_ID: &str = "canvas";

    /// Game instance plus everything the browser side needs
    struct App {
        game: Game,
        renderer: CanvasRenderer,
        audio: AudioManager,
        settings: Settings,
        canvas: HtmlCanvasElement,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        /// Advance the simulation and play whatever it produced
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            for event in self.game.update(dt) {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
            }

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % self.frame_times.len();
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn render(&self) {
            let hud = Hud {
                best_score: self.game.best_score(),
                fps: self.settings.show_fps.then_some(self.fps),
            };
            let state = self.game.state();
            let commands = build_frame(state, &hud);
            self.renderer.draw(&state.viewport, &commands);
        }

        fn resize(&mut self) {
            let ratio = web::device_pixel_ratio();
            let viewport = web::fit_canvas(&self.canvas, ratio);
            self.renderer.set_pixel_ratio(ratio);
            self.game.resize(viewport);
        }

        fn push_pointer(&mut self, client_x: f64, client_y: f64, start: bool) {
            let pos = web::canvas_point(&self.canvas, client_x, client_y);
            let event = if start {
                InputEvent::TouchStart { pos }
            } else {
                InputEvent::TouchMove { pos }
            };
            self.game.push_input(event);
        }
    }

    pub fn run() -> Result<(), PlatformError> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Sky Strike starting...");

        let canvas = web::canvas(CANVAS_ID)?;
        let ctx = web::context_2d(&canvas)?;
        let ratio = web::device_pixel_ratio();
        let viewport = web::fit_canvas(&canvas, ratio);

        let settings = web::load_settings();
        let tuning = web::load_tuning();
        let seed = js_sys::Date::now() as u64;

        let mut game = Game::new(viewport, tuning, seed);
        game.set_autopilot(settings.autopilot);

        let app = Rc::new(RefCell::new(App {
            game,
            renderer: CanvasRenderer::new(ctx, ratio),
            audio: AudioManager::new(&settings),
            settings,
            canvas: canvas.clone(),
            last_time: 0.0,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));

        setup_touch_handlers(&canvas, app.clone())?;
        setup_mouse_handlers(&canvas, app.clone())?;
        setup_keyboard(app.clone())?;
        setup_window_handlers(app.clone())?;

        start_animation_loop(app)?;

        log::info!("Sky Strike running!");
        Ok(())
    }

    /// Register a listener for the lifetime of the page
    fn listen<T>(
        target: &web_sys::EventTarget,
        name: &str,
        closure: Closure<T>,
    ) -> Result<(), PlatformError>
    where
        T: ?Sized + WasmClosure,
    {
        target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_touch_handlers(
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) -> Result<(), PlatformError> {
        // Touch start (grab the plane / tap restart)
        {
            let app = app.clone();
            listen(canvas, "touchstart", Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                a.audio.resume();
                if let Some(touch) = event.touches().get(0) {
                    a.push_pointer(touch.client_x() as f64, touch.client_y() as f64, true);
                }
            }))?;
        }

        // Touch move
        {
            let app = app.clone();
            listen(canvas, "touchmove", Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut().push_pointer(
                        touch.client_x() as f64,
                        touch.client_y() as f64,
                        false,
                    );
                }
            }))?;
        }

        // Touch end / cancel
        for name in ["touchend", "touchcancel"] {
            let app = app.clone();
            listen(canvas, name, Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().game.push_input(InputEvent::TouchEnd);
            }))?;
        }

        Ok(())
    }

    /// Mouse mirrors touch so the game works on desktop
    fn setup_mouse_handlers(
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) -> Result<(), PlatformError> {
        {
            let app = app.clone();
            listen(canvas, "mousedown", Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let mut a = app.borrow_mut();
                a.audio.resume();
                a.push_pointer(event.client_x() as f64, event.client_y() as f64, true);
            }))?;
        }

        {
            let app = app.clone();
            listen(canvas, "mousemove", Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Only while the primary button is held
                if event.buttons() & 1 == 0 {
                    return;
                }
                app.borrow_mut()
                    .push_pointer(event.client_x() as f64, event.client_y() as f64, false);
            }))?;
        }

        let window = web::window()?;
        listen(&window, "mouseup", Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            app.borrow_mut().game.push_input(InputEvent::TouchEnd);
        }))?;

        Ok(())
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) -> Result<(), PlatformError> {
        let window = web::window()?;
        listen(&window, "keydown", Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut a = app.borrow_mut();
            match event.key().as_str() {
                "i" | "I" => {
                    let enabled = !a.game.autopilot_enabled();
                    a.game.set_autopilot(enabled);
                }
                "m" | "M" => {
                    a.settings.muted = !a.settings.muted;
                    let muted = a.settings.muted;
                    a.audio.set_muted(muted);
                    log::info!("Muted: {}", muted);
                }
                "f" | "F" => a.settings.show_fps = !a.settings.show_fps,
                _ => {}
            }
        }))
    }

    fn setup_window_handlers(app: Rc<RefCell<App>>) -> Result<(), PlatformError> {
        let window = web::window()?;

        {
            let app = app.clone();
            listen(&window, "resize", Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().resize();
            }))?;
        }

        // Quiet while the window is in the background
        {
            let app = app.clone();
            listen(&window, "blur", Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                if a.settings.mute_on_blur {
                    a.audio.set_muted(true);
                }
            }))?;
        }

        listen(&window, "focus", Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut a = app.borrow_mut();
            let muted = a.settings.muted;
            a.audio.set_muted(muted);
            // Don't count the time spent away as one huge frame
            a.last_time = 0.0;
        }))
    }

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    fn start_animation_loop(app: Rc<RefCell<App>>) -> Result<(), PlatformError> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let next = callback.clone();

        *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
            {
                let mut a = app.borrow_mut();
                a.update(time);
                a.render();
            }
            if let Err(e) = request_frame(&next) {
                log::error!("Animation loop stopped: {}", e);
            }
        }));

        request_frame(&callback)
    }

    fn request_frame(callback: &FrameCallback) -> Result<(), PlatformError> {
        let window = web::window()?;
        if let Some(closure) = callback.borrow().as_ref() {
            window.request_animation_frame(closure.as_ref().unchecked_ref())?;
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().map_err(|e| {
        log::error!("Startup failed: {}", e);
        JsValue::from(e)
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sky_strike::sim::{GameEvent, Viewport};
    use sky_strike::{Game, Tuning};

    /// One minute of play at 60 FPS
    const DEMO_FRAMES: u32 = 60 * 60;

    env_logger::init();
    log::info!("Sky Strike (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - serve the wasm build to play");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut game = Game::new(Viewport::new(414.0, 736.0), Tuning::default(), seed);
    game.set_autopilot(true);

    let mut kills = 0u32;
    let mut crashes = 0u32;
    for _ in 0..DEMO_FRAMES {
        for event in game.step() {
            match event {
                GameEvent::EnemyDestroyed { .. } => kills += 1,
                GameEvent::GameOver { .. } => crashes += 1,
                _ => {}
            }
        }
    }

    println!(
        "Demo finished: {} frames, {} enemies destroyed, {} crashes, best score {}",
        game.frames_elapsed(),
        kills,
        crashes,
        game.best_score()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
