//! Sky Hop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Event, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use sky_hop::Game;
    use sky_hop::input::{Button, InputEvent, Key};
    use sky_hop::renderer::{Frame, RenderState};
    use sky_hop::sim::Viewport;
    use sky_hop::tuning::Tuning;

    /// Game instance plus everything the browser side needs
    struct App {
        game: Game,
        render_state: Option<RenderState>,
        /// A frame callback is scheduled
        loop_active: bool,
    }

    impl App {
        /// Draw a frame produced by the game
        fn render(&mut self, frame: &Frame) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(frame) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => render_state.reconfigure(),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let classes = el.class_list();
            let result = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
            if let Err(e) = result {
                log::warn!("Failed to toggle #{}: {:?}", id, e);
            }
        } else {
            log::warn!("Element #{} missing", id);
        }
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    /// Seed from `data-seed` on the canvas, else the clock
    fn pick_seed(canvas: &HtmlCanvasElement) -> u64 {
        canvas
            .get_attribute("data-seed")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(|| js_sys::Date::now() as u64)
    }

    /// Register an event listener for the page's lifetime
    fn listen(
        target: &EventTarget,
        event: &str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Sky Hop starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Sized once to the window; the game does not follow resizes
        let width = window.inner_width()?.as_f64().unwrap_or(800.0) as u32;
        let height = window.inner_height()?.as_f64().unwrap_or(600.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = Tuning::from_json_or_default(canvas.get_attribute("data-tuning").as_deref());
        let viewport = Viewport::new(width as f32, height as f32);
        let seed = pick_seed(&canvas);
        let app = Rc::new(RefCell::new(App {
            game: Game::new(seed, viewport, tuning),
            render_state: None,
            loop_active: false,
        }));

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        app.borrow_mut().render_state = Some(render_state);

        setup_control_buttons(&document, app.clone())?;
        setup_canvas_input(&canvas, app.clone())?;
        setup_keyboard(&window, app.clone())?;
        setup_restart_button(&document, app.clone())?;

        set_hidden("game-over", true);
        start_loop(app);

        log::info!("Sky Hop running!");
        Ok(())
    }

    fn setup_control_buttons(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let buttons = [
            ("left-btn", Button::Left),
            ("right-btn", Button::Right),
            ("jump-btn", Button::Jump),
        ];

        for (id, button) in buttons {
            let Some(el) = document.get_element_by_id(id) else {
                log::warn!("Control #{} missing, skipping", id);
                continue;
            };

            for event in ["mousedown", "touchstart"] {
                let app = app.clone();
                listen(&el, event, move |e: Event| {
                    // Keep touches from also firing emulated mouse events
                    e.prevent_default();
                    app.borrow_mut()
                        .game
                        .handle_input(&InputEvent::ButtonDown(button));
                })?;
            }
            for event in ["mouseup", "touchend"] {
                let app = app.clone();
                listen(&el, event, move |_e: Event| {
                    app.borrow_mut()
                        .game
                        .handle_input(&InputEvent::ButtonUp(button));
                })?;
            }
        }
        Ok(())
    }

    fn setup_canvas_input(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        // Mouse down - steer by half, jump in the top half
        {
            let app = app.clone();
            listen(canvas, "mousedown", move |e: Event| {
                if let Some(event) = e.dyn_ref::<MouseEvent>() {
                    let press = InputEvent::PointerDown {
                        x: event.offset_x() as f32,
                        y: event.offset_y() as f32,
                    };
                    app.borrow_mut().game.handle_input(&press);
                }
            })?;
        }

        // Touch start - same as a click at the first touch point
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            listen(canvas, "touchstart", move |e: Event| {
                e.prevent_default();
                let Some(event) = e.dyn_ref::<TouchEvent>() else {
                    return;
                };
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let press = InputEvent::PointerDown {
                        x: touch.client_x() as f32 - rect.left() as f32,
                        y: touch.client_y() as f32 - rect.top() as f32,
                    };
                    app.borrow_mut().game.handle_input(&press);
                }
            })?;
        }

        for event in ["mouseup", "touchend"] {
            let app = app.clone();
            listen(canvas, event, move |_e: Event| {
                app.borrow_mut().game.handle_input(&InputEvent::PointerUp);
            })?;
        }
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        {
            let app = app.clone();
            listen(window, "keydown", move |e: Event| {
                let Some(event) = e.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let Some(key) = Key::from_dom(&event.key()) else {
                    return;
                };
                if event.repeat() {
                    return;
                }
                match key {
                    Key::Restart => {
                        if !app.borrow().game.is_running() {
                            restart(app.clone());
                        }
                    }
                    _ => app.borrow_mut().game.handle_input(&InputEvent::KeyDown(key)),
                }
            })?;
        }

        listen(window, "keyup", move |e: Event| {
            if let Some(key) = e
                .dyn_ref::<KeyboardEvent>()
                .and_then(|event| Key::from_dom(&event.key()))
            {
                app.borrow_mut().game.handle_input(&InputEvent::KeyUp(key));
            }
        })
    }

    fn setup_restart_button(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id("restart-btn") else {
            log::warn!("Restart button missing");
            return Ok(());
        };
        listen(&btn, "click", move |_e: Event| restart(app.clone()))
    }

    /// Fresh run, overlay hidden, loop resumed
    fn restart(app: Rc<RefCell<App>>) {
        let seed = js_sys::Date::now() as u64;
        app.borrow_mut().game.restart(seed);
        set_hidden("game-over", true);
        start_loop(app);
    }

    fn start_loop(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            if a.loop_active {
                return;
            }
            a.loop_active = true;
        }
        request_animation_frame(app);
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let running = {
            let mut a = app.borrow_mut();
            if let Some(frame) = a.game.frame() {
                a.render(&frame);
                set_text("hud-score", &frame.score_label);
            }

            let running = a.game.is_running();
            if !running {
                a.loop_active = false;
                set_text("final-score", &a.game.score().to_string());
                set_hidden("game-over", false);
            }
            running
        };

        if running {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sky_hop::Game;
    use sky_hop::sim::Viewport;
    use sky_hop::tuning::Tuning;

    /// Frames in a headless run (one minute at 60 Hz)
    const MAX_FRAMES: u32 = 60 * 60;

    env_logger::init();
    log::info!("Sky Hop (native) starting...");
    log::info!("Native mode runs the simulation headless - use `trunk serve` for the playable web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    // No input: the player rides the starting platform down until it leaves the screen
    let mut game = Game::new(seed, Viewport::new(800.0, 600.0), Tuning::default());

    let mut frames = 0;
    while frames < MAX_FRAMES && game.frame().is_some() {
        frames += 1;
    }

    println!(
        "Seed {}: score {} after {} frames ({})",
        seed,
        game.score(),
        frames,
        if game.is_running() { "still running" } else { "fell" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
