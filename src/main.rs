//! Linear Motion entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, HtmlInputElement, HtmlSelectElement};

    use linear_motion::SimConfig;
    use linear_motion::sim::{EntityId, MotionType, ProfilePatch, SimEvent, Simulation, TrackLayout, TrackTarget};
    use linear_motion::ui::{
        Readout, marker_style, parse_non_negative, parse_track_length, toggle_icon, toggle_label,
    };

    /// Page instance holding all state
    struct App {
        sim: Simulation,
        document: Document,
    }

    /// Element id for a per-car control, e.g. `car1-velocity`
    fn car_el(id: EntityId, suffix: &str) -> String {
        format!("{}-{}", id.as_str(), suffix)
    }

    impl App {
        fn new(sim: Simulation, document: Document) -> Self {
            Self { sim, document }
        }

        fn input(&self, id: &str) -> Option<HtmlInputElement> {
            self.document.get_element_by_id(id)?.dyn_into().ok()
        }

        fn select(&self, id: &str) -> Option<HtmlSelectElement> {
            self.document.get_element_by_id(id)?.dyn_into().ok()
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_flag(&self, id: &str, attr: &str, on: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = if on {
                    el.set_attribute(attr, "")
                } else {
                    el.remove_attribute(attr)
                };
            }
        }

        /// Write profile values into the controls (startup only)
        fn fill_controls(&self) {
            for id in EntityId::ALL {
                let profile = self.sim.profile(id);
                self.set_text(&car_el(id, "name"), &profile.label);
                if let Some(sel) = self.select(&car_el(id, "motion")) {
                    sel.set_value(profile.motion.as_str());
                }
                if let Some(input) = self.input(&car_el(id, "velocity")) {
                    input.set_value(&profile.initial_velocity.to_string());
                }
                if let Some(input) = self.input(&car_el(id, "accel")) {
                    input.set_value(&profile.acceleration.to_string());
                }
                if let Some(input) = self.input(&format!("track{}", id.index() + 1)) {
                    let text = self.sim.track(id).meters().map(|m| m.to_string()).unwrap_or_default();
                    input.set_value(&text);
                }
            }
            // A shared finish line only needs the first track input
            self.set_flag("track2-row", "hidden", self.sim.layout() == TrackLayout::Shared);
        }

        /// React to lifecycle transitions since the last frame
        fn handle_events(&mut self) {
            for event in self.sim.drain_events() {
                match event {
                    SimEvent::Finished { entity, time } => {
                        log::info!("{} finished in {:.2}s", self.sim.profile(entity).label, time);
                        if let Some(el) = self.document.get_element_by_id(&car_el(entity, "marker")) {
                            let _ = el.class_list().add_1("finished");
                        }
                    }
                    SimEvent::Reset { .. } => {
                        for id in EntityId::ALL {
                            if let Some(el) = self.document.get_element_by_id(&car_el(id, "marker")) {
                                let _ = el.class_list().remove_1("finished");
                            }
                        }
                    }
                    SimEvent::Started | SimEvent::Paused => {}
                }
            }
        }

        /// Update readouts, markers and control states in the DOM
        fn render(&self) {
            let snap = self.sim.snapshot();

            for entity in &snap.entities {
                let id = entity.id;
                let readout = Readout::from_point(&entity.readout);
                self.set_text(&car_el(id, "time"), &readout.time);
                self.set_text(&car_el(id, "distance"), &readout.distance);
                self.set_text(&car_el(id, "speed"), &readout.velocity);

                if let Some(marker) = self
                    .document
                    .get_element_by_id(&car_el(id, "marker"))
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                {
                    let _ = marker.style().set_property("left", &marker_style(entity.marker));
                }

                self.set_flag(&car_el(id, "accel-row"), "hidden", !entity.profile.motion.uses_acceleration());

                // Editing is locked while running
                for suffix in ["motion", "velocity", "accel"] {
                    self.set_flag(&car_el(id, suffix), "disabled", snap.running);
                }
                self.set_flag(&format!("track{}", id.index() + 1), "disabled", snap.running);
            }

            self.set_text("toggle-icon", toggle_icon(snap.running));
            self.set_text("toggle-label", toggle_label(snap.running));
            self.set_flag("toggle-btn", "disabled", !snap.can_toggle);
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.sim.pump(time);
            a.handle_events();
            a.render();
        }

        request_animation_frame(app);
    }

    /// Attach a listener for `event` on element `id`
    fn listen<F>(document: &Document, id: &str, event: &str, handler: F)
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing element #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        let _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            listen(document, "toggle-btn", "click", move |_event| {
                app.borrow_mut().sim.toggle_running();
            });
        }
        listen(document, "reset-btn", "click", move |_event| {
            app.borrow_mut().sim.reset();
        });
    }

    fn setup_car_controls(document: &Document, app: Rc<RefCell<App>>, id: EntityId) {
        {
            let app = app.clone();
            let el_id = car_el(id, "motion");
            listen(document, &el_id.clone(), "change", move |_event| {
                let mut a = app.borrow_mut();
                let Some(value) = a.select(&el_id).map(|s| s.value()) else {
                    return;
                };
                match MotionType::from_str(&value) {
                    Some(motion) => a.sim.update_profile(
                        id,
                        &ProfilePatch {
                            motion: Some(motion),
                            ..Default::default()
                        },
                    ),
                    None => log::warn!("Unknown motion type '{}'", value),
                }
            });
        }

        for (suffix, is_accel) in [("velocity", false), ("accel", true)] {
            let app = app.clone();
            let el_id = car_el(id, suffix);
            listen(document, &el_id.clone(), "input", move |_event| {
                let mut a = app.borrow_mut();
                let Some(raw) = a.input(&el_id).map(|i| i.value()) else {
                    return;
                };
                match parse_non_negative(&raw) {
                    Ok(value) => {
                        let patch = if is_accel {
                            ProfilePatch {
                                acceleration: Some(value),
                                ..Default::default()
                            }
                        } else {
                            ProfilePatch {
                                initial_velocity: Some(value),
                                ..Default::default()
                            }
                        };
                        a.sim.update_profile(id, &patch);
                    }
                    // Keep the last good value; the box keeps the raw text
                    Err(e) => log::warn!("#{}: {}", el_id, e),
                }
            });
        }

        let el_id = format!("track{}", id.index() + 1);
        listen(document, &el_id.clone(), "input", move |_event| {
            let mut a = app.borrow_mut();
            let Some(raw) = a.input(&el_id).map(|i| i.value()) else {
                return;
            };
            match parse_track_length(&raw) {
                Ok(track) => a.sim.set_track_length(TrackTarget::Entity(id), track),
                Err(e) => log::warn!("#{}: {}", el_id, e),
            }
        });
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }

        log::info!("Linear Motion starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };

        let config = SimConfig::load();
        let app = Rc::new(RefCell::new(App::new(Simulation::from_config(&config), document.clone())));

        app.borrow().fill_controls();
        setup_buttons(&document, app.clone());
        for id in EntityId::ALL {
            setup_car_controls(&document, app.clone(), id);
        }

        request_animation_frame(app);

        log::info!("Linear Motion running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use linear_motion::SimConfig;
    use linear_motion::consts::{HEADLESS_FRAME_MS, HEADLESS_TIME_CAP};
    use linear_motion::headless::run_race;
    use linear_motion::sim::EntityId;
    use linear_motion::sim::kinematics::time_to_reach;
    use linear_motion::ui::Readout;

    env_logger::init();
    log::info!("Linear Motion (native) starting...");
    log::info!("The interactive version runs in the browser - use `trunk serve`");

    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let config = match SimConfig::load_from(path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let cars = [&config.car1, &config.car2];
    for car in cars {
        let expected = config
            .track_length
            .and_then(|len| time_to_reach(len, car.initial_velocity, car.acceleration, car.motion));
        match expected {
            Some(t) => log::info!("{} ({}) should finish at {:.2}s", car.label, car.motion.as_str(), t),
            None => log::info!("{} ({}) will not finish", car.label, car.motion.as_str()),
        }
    }

    let summary = run_race(&config, HEADLESS_FRAME_MS, HEADLESS_TIME_CAP);

    println!("\nRace finished after {} frames", summary.frames);
    for id in EntityId::ALL {
        let car = cars[id.index()];
        let readout = Readout::from_point(&summary.readouts[id.index()]);
        println!(
            "{:<12} time {:>10}  distance {:>12}  velocity {:>12}",
            car.label, readout.time, readout.distance, readout.velocity
        );
    }
    match summary.winner() {
        Some(id) => println!("Winner: {}", cars[id.index()].label),
        None => println!("Nobody crossed the line"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
