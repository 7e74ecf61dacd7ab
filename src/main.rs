//! Rendezvous decision wheel entry point
//!
//! On the web: draws the wheel on `#wheel`, spins on `#spin-btn` or
//! Space/Enter, announces the winner in `#wheel-result`.
//! On native: one headless spin over candidates given on the command line.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use rendezvous_wheel::driver::WheelHost;
    use rendezvous_wheel::render::{WheelGeometry, WheelScene, draw_scene};
    use rendezvous_wheel::{Candidate, DecisionHistory, Wheel, WheelSettings};

    /// App instance holding all state
    struct App {
        host: WheelHost,
        ctx: CanvasRenderingContext2d,
        width: f64,
        height: f64,
        settings: WheelSettings,
        history: DecisionHistory,
        /// An animation frame is scheduled
        looping: bool,
    }

    impl App {
        /// Advance the wheel and draw
        fn frame(&mut self, time: f64) {
            if let Some(outcome) = self.host.frame(time) {
                let winner = &self.host.wheel.candidates()[outcome.candidate];
                self.history.record(winner, &outcome, js_sys::Date::now());
                self.history.save();
            }
            self.render();
        }

        fn render(&self) {
            let geometry = WheelGeometry::fit(self.width, self.height);
            let scene = WheelScene::compose(&self.host.wheel, geometry, self.settings.show_labels);
            if let Err(e) = draw_scene(&self.ctx, &scene, self.width, self.height) {
                log::warn!("Render error: {:?}", e);
            }
        }
    }

    fn js_err(msg: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&msg.to_string())
    }

    /// Candidates come from the page, never from shared module state
    fn load_candidates(document: &Document) -> Result<Vec<Candidate>, JsValue> {
        let el = document
            .get_element_by_id("wheel-candidates")
            .ok_or_else(|| js_err("missing #wheel-candidates"))?;
        let json = el.text_content().unwrap_or_default();
        serde_json::from_str(&json).map_err(js_err)
    }

    fn set_result_text(text: &str) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("wheel-result"))
        {
            el.set_text_content(Some(text));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("wheel")
            .ok_or_else(|| js_err("missing #wheel canvas"))?
            .dyn_into()
            .map_err(|_| js_err("#wheel is not a canvas"))?;

        // Size backing store to device pixels
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr).round();
        let height = (canvas.client_height() as f64 * dpr).round();
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| js_err("2d context unavailable"))?
            .dyn_into()
            .map_err(|_| js_err("unexpected context type"))?;

        let settings = WheelSettings::load();
        let candidates = load_candidates(&document)?;
        let seed = js_sys::Date::now() as u64;

        let mut wheel = Wheel::new(candidates, None, settings.spin, seed).map_err(js_err)?;
        wheel.on_winner(|winner| set_result_text(&winner.label));
        log::info!(
            "Wheel ready: {} candidates, preset {}, seed {}",
            wheel.candidates().len(),
            settings.preset.as_str(),
            seed
        );

        let history = DecisionHistory::load(settings.history_size);
        if let Some(last) = history.last() {
            set_result_text(&format!("Last time: {}", last.label));
        }

        let app = Rc::new(RefCell::new(App {
            host: WheelHost::new(wheel),
            ctx,
            width,
            height,
            settings,
            history,
            looping: true,
        }));

        setup_spin_button(&document, app.clone());
        setup_keyboard(app.clone());
        setup_teardown(app.clone());

        request_animation_frame(app);
        Ok(())
    }

    fn setup_spin_button(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("spin-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                if !a.host.wheel.is_spinning() {
                    set_result_text("Spinning...");
                }
                a.host.request_spin();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut a = app.borrow_mut();
            match event.key().as_str() {
                " " | "Enter" => a.host.request_spin(),
                "Escape" => a.host.request_cancel(),
                _ => return,
            }
            // Keep Space from scrolling and from also clicking a focused button
            event.prevent_default();
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Leaving the page abandons any spin and stops the loop; coming back
    /// from the back/forward cache starts it again
    fn setup_teardown(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let hide_app = app.clone();
        let on_hide = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            hide_app.borrow_mut().host.detach();
        });
        let _ = window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref());
        on_hide.forget();

        let on_show = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let restart = {
                let mut a = app.borrow_mut();
                if a.host.is_attached() {
                    return;
                }
                a.host.reattach();
                log::info!("Wheel host reattached");
                // A frame still pending from before the hide keeps the old loop alive
                !std::mem::replace(&mut a.looping, true)
            };
            if restart {
                request_animation_frame(app.clone());
            }
        });
        let _ = window.add_event_listener_with_callback("pageshow", on_show.as_ref().unchecked_ref());
        on_show.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            app_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn app_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            if !a.host.is_attached() {
                a.looping = false;
                log::info!("Animation loop stopped");
                return;
            }
            a.frame(time);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = wasm_app::run() {
        log::error!("Wheel failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;
    use std::time::{SystemTime, UNIX_EPOCH};

    use rendezvous_wheel::driver::run_headless;
    use rendezvous_wheel::{Candidate, Wheel, WheelPreset, WheelSettings};

    env_logger::init();

    let mut settings = WheelSettings::load();
    let mut seed = None;
    let mut candidates = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            "--seed" => match args.next().and_then(|s| s.parse::<u64>().ok()) {
                Some(s) => seed = Some(s),
                None => {
                    eprintln!("--seed needs an unsigned integer");
                    return ExitCode::from(2);
                }
            },
            "--preset" => match args.next().as_deref().and_then(WheelPreset::from_str) {
                Some(preset) => settings.apply_preset(preset),
                None => {
                    eprintln!("--preset must be 'places' or 'activities'");
                    return ExitCode::from(2);
                }
            },
            _ => match Candidate::parse_arg(&arg) {
                Some(candidate) => candidates.push(candidate),
                None => {
                    eprintln!("invalid candidate '{arg}', expected LABEL or LABEL=WEIGHT");
                    return ExitCode::from(2);
                }
            },
        }
    }

    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });

    let mut wheel = match Wheel::new(candidates, None, settings.spin, seed) {
        Ok(wheel) => wheel,
        Err(e) => {
            eprintln!("error: {e}");
            print_usage();
            return ExitCode::from(2);
        }
    };
    log::info!("Spinning {} candidates with seed {}", wheel.candidates().len(), seed);

    let max_ticks = wheel.config().max_ticks_for(wheel.config().max_velocity);
    match run_headless(&mut wheel, max_ticks) {
        Some(outcome) => {
            let winner = &wheel.candidates()[outcome.candidate];
            println!("{}", winner.label);
            log::info!("Decided in {} ticks (seed {})", outcome.ticks, seed);
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("the wheel did not settle");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn print_usage() {
    eprintln!("usage: rendezvous-wheel [--seed N] [--preset places|activities] LABEL[=WEIGHT]...");
}
