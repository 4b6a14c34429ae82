//! Gap Dash entry point
//!
//! Wasm builds drive the simulation from requestAnimationFrame and paint a
//! DOM HUD; native builds run a scripted headless session for smoke-testing.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement};

    use gap_dash::best;
    use gap_dash::sim::{SessionStatus, SimState, TickEvent, tick};

    /// Game instance holding simulation and presentation state
    struct Game {
        state: SimState,
        last_time: f64,
        /// DOM nodes for live waves, keyed by wave id
        wave_nodes: HashMap<u32, HtmlElement>,
    }

    impl Game {
        fn new(seed: u64, best: u32) -> Self {
            Self {
                state: SimState::new(seed, best),
                last_time: 0.0,
                wave_nodes: HashMap::new(),
            }
        }

        /// Advance the simulation by one frame and persist any new best.
        fn update(&mut self, time: f64) {
            let raw_dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            // tick clamps dt itself; a stalled tab costs at most one max step
            for event in tick(&mut self.state, raw_dt) {
                match event {
                    TickEvent::NewBest(best) => best::save(best),
                    TickEvent::Miss => {
                        log::info!("Run over at score {}", self.state.score.score)
                    }
                    TickEvent::Hit { .. } => {}
                }
            }
        }

        /// Push the current snapshot into the DOM.
        fn render(&mut self, document: &Document) {
            let snap = self.state.snapshot();

            set_text(document, "hud-score", &snap.score.to_string());
            set_text(document, "hud-best", &snap.best.to_string());
            set_text(document, "hud-streak", &snap.streak.to_string());

            // Phase message overlay
            if let Some(el) = document.get_element_by_id("message") {
                el.set_text_content(Some(&snap.message));
                let class = if snap.status == SessionStatus::Live {
                    "hidden"
                } else {
                    ""
                };
                let _ = el.set_attribute("class", class);
            }

            // Player marker and arena heat
            if let Some(el) = html_by_id(document, "player") {
                let style = el.style();
                let _ = style.set_property("left", &format!("{}%", snap.player_position * 100.0));
                let _ = style.set_property("--charge", &snap.player_charge.to_string());
                let _ = el.set_attribute(
                    "data-alive",
                    if snap.player_alive { "true" } else { "false" },
                );
            }
            if let Some(el) = html_by_id(document, "arena") {
                let _ = el
                    .style()
                    .set_property("--intensity", &snap.intensity.to_string());
            }

            // Wave barriers: create nodes for new waves, reposition live ones,
            // drop the pruned
            let arena = html_by_id(document, "arena");
            let mut seen: Vec<u32> = Vec::with_capacity(snap.waves.len());
            for wave in &snap.waves {
                seen.push(wave.id);
                let node = match self.wave_nodes.get(&wave.id) {
                    Some(node) => node.clone(),
                    None => {
                        let Some(node) = arena
                            .as_ref()
                            .and_then(|a| create_wave_node(document, a))
                        else {
                            continue;
                        };
                        self.wave_nodes.insert(wave.id, node.clone());
                        node
                    }
                };
                let style = node.style();
                let _ = style.set_property("bottom", &format!("{}%", wave.y * 100.0));
                let _ = style.set_property("--gap-center", &wave.gap_center.to_string());
                let _ = style.set_property("--gap-width", &wave.gap_width.to_string());
            }
            self.wave_nodes.retain(|id, node| {
                let live = seen.contains(id);
                if !live {
                    node.remove();
                }
                live
            });
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn create_wave_node(document: &Document, arena: &HtmlElement) -> Option<HtmlElement> {
        let node: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
        let _ = node.set_attribute("class", "wave");
        arena.append_child(&node).ok()?;
        Some(node)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gap Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let seed = js_sys::Date::now() as u64;
        let stored_best = best::load();
        let game = Rc::new(RefCell::new(Game::new(seed, stored_best)));
        log::info!("Initialized with seed {} (best {})", seed, stored_best);

        // Cleared on pagehide so no tick runs after teardown
        let running = Rc::new(Cell::new(true));

        setup_input_handlers(&document, game.clone());
        setup_teardown(&document, running.clone());
        request_animation_frame(game, running);

        log::info!("Gap Dash running!");
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        // Pointer hold edges; pointercancel counts as a release so a dropped
        // touch never leaves the hold flag stuck
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PointerEvent| {
                event.prevent_default();
                game.borrow_mut().state.hold_start();
            });
            let _ = document
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        for release in ["pointerup", "pointercancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PointerEvent| {
                game.borrow_mut().state.hold_end();
            });
            let _ =
                document.add_event_listener_with_callback(release, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: space doubles as the hold input
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if event.key() == " " && !event.repeat() {
                    game.borrow_mut().state.hold_start();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if event.key() == " " {
                    game.borrow_mut().state.hold_end();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_teardown(document: &Document, running: Rc<Cell<bool>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            running.set(false);
            log::info!("Torn down, stopping the loop");
        });
        let _ =
            document.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, running: Rc<Cell<bool>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, running, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, running: Rc<Cell<bool>>, time: f64) {
        if !running.get() {
            return;
        }
        {
            let mut g = game.borrow_mut();
            g.update(time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.render(&document);
            }
        }
        request_animation_frame(game, running);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Headless demo: charge, release, and ride the field for a few simulated
/// seconds, then dump the final snapshot.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gap_dash::sim::{SimState, TickEvent, tick};

    env_logger::init();
    log::info!("Gap Dash (native) starting headless demo...");

    let mut state = SimState::new(0xC0FFEE, gap_dash::best::load());
    let dt = 1.0 / 60.0;

    state.hold_start();
    for step in 0..600 {
        // Pump the hold every couple of seconds to keep dashing
        match step % 120 {
            0 => state.hold_start(),
            30 => state.hold_end(),
            _ => {}
        }
        for event in tick(&mut state, dt) {
            match event {
                TickEvent::Hit { points, near_miss } => {
                    log::info!("hit +{points} (near miss: {near_miss})")
                }
                TickEvent::Miss => log::info!("miss, run over"),
                TickEvent::NewBest(best) => log::info!("new best {best}"),
            }
        }
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("snapshot serialization failed: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
