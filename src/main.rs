//! Ledge Runner entry point
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
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use ledge_runner::autopilot;
    use ledge_runner::consts::{MAX_SUBSTEPS, SIM_DT};
    use ledge_runner::input::{ControlState, ControlZones};
    use ledge_runner::renderer::RenderState;
    use ledge_runner::sim::{GameEvent, GamePhase, GameState, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        accumulator: f32,
        last_time: f64,
        /// Keyboard signals (held keys + one-shots)
        keys: ControlState,
        /// Active pointers by id, in world coordinates
        pointers: Vec<(i32, Vec2)>,
        zones: ControlZones,
        /// Controls used for the last tick (renderer highlights)
        last_controls: ControlState,
        idle_mode: bool,
        running: bool,
    }

    impl Game {
        fn new(seed: u64, canvas: HtmlCanvasElement) -> Self {
            let state = GameState::new(seed);
            let zones = ControlZones::for_world(state.tuning.world_width, state.tuning.world_height);
            Self {
                state,
                render_state: None,
                canvas,
                accumulator: 0.0,
                last_time: 0.0,
                keys: ControlState::default(),
                pointers: Vec::new(),
                zones,
                last_controls: ControlState::default(),
                idle_mode: false,
                running: true,
            }
        }

        /// Convert a client-space pointer position to world coordinates
        fn client_to_world(&self, client_x: f32, client_y: f32) -> Vec2 {
            let bounds = self.canvas.get_bounding_client_rect();
            let w = bounds.width().max(1.0) as f32;
            let h = bounds.height().max(1.0) as f32;
            Vec2::new(
                (client_x - bounds.left() as f32) / w * self.state.tuning.world_width,
                (client_y - bounds.top() as f32) / h * self.state.tuning.world_height,
            )
        }

        /// Merge keyboard, touch and idle pilot into this tick's controls
        fn controls(&self) -> ControlState {
            let mut controls = if self.idle_mode {
                let mut c = autopilot::pilot(&self.state);
                c.quit_requested = self.keys.quit_requested;
                c
            } else {
                self.keys.clone()
            };
            for &(_, point) in &self.pointers {
                controls.press_point(point, &self.zones);
            }
            controls
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let controls = self.controls();
                if controls.quit_requested {
                    self.running = false;
                    log::info!("Quit requested");
                    return;
                }
                tick(&mut self.state, &controls.intent());
                self.last_controls = controls;
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.keys.clear_one_shots();

                for event in self.state.drain_events() {
                    log_event(event);
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let frame = render_state.draw_frame(
                &self.state,
                &self.last_controls,
                &self.zones,
                time / 1000.0,
            );
            match frame {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.player.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-lives .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.player.lives.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-level .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.level.to_string()));
            }

            if let Some(banner) = document.get_element_by_id("banner") {
                let (text, class) = match self.state.phase {
                    GamePhase::Running => ("", "hidden"),
                    GamePhase::GameOver => ("GAME OVER! Press R to restart", "game-over"),
                    GamePhase::LevelComplete => {
                        ("LEVEL COMPLETE! You reached the exit!", "level-complete")
                    }
                };
                banner.set_text_content(Some(text));
                let _ = banner.set_attribute("class", class);
            }
        }
    }

    fn log_event(event: GameEvent) {
        match event {
            GameEvent::Jumped => log::debug!("Jump"),
            GameEvent::PlayerHit { lives_left } => log::info!("Caught! {} lives left", lives_left),
            GameEvent::GameOver => log::info!("Game over"),
            GameEvent::LevelComplete { score } => log::info!("Level complete, score {}", score),
            GameEvent::Reset => log::info!("Level restarted"),
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ledge Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, canvas.clone())));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let world_size = {
            let g = game.borrow();
            Vec2::new(g.state.tuning.world_width, g.state.tuning.world_height)
        };
        match RenderState::new(surface, &adapter, width, height, world_size).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {e}"),
        }

        setup_key_handlers(game.clone());
        setup_pointer_handlers(&canvas, game.clone());

        // Show HUD
        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Ledge Runner running!");
    }

    fn setup_key_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.keys.move_left = true,
                    "ArrowRight" => g.keys.move_right = true,
                    "ArrowUp" | " " => {
                        if !event.repeat() {
                            g.keys.jump_pressed = true;
                        }
                        g.keys.jump_held = true;
                    }
                    "r" | "R" => g.keys.restart_pressed = true,
                    "Escape" => g.keys.quit_requested = true,
                    "i" | "I" => {
                        g.idle_mode = !g.idle_mode;
                        log::info!("Idle mode: {}", g.idle_mode);
                    }
                    _ => return,
                }
                event.prevent_default();
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.keys.move_left = false,
                    "ArrowRight" => g.keys.move_right = false,
                    "ArrowUp" | " " => g.keys.jump_held = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Down / move: track the pointer while it is pressed
        for name in ["pointerdown", "pointermove"] {
            let game = game.clone();
            let is_down = name == "pointerdown";
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let id = event.pointer_id();
                let tracked = g.pointers.iter().any(|&(p, _)| p == id);
                if !is_down && !tracked {
                    return;
                }
                let point = g.client_to_world(event.client_x() as f32, event.client_y() as f32);
                g.pointers.retain(|&(p, _)| p != id);
                g.pointers.push((id, point));
                event.prevent_default();
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Up / cancel / leave: release the pointer
        for name in ["pointerup", "pointercancel", "pointerleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let id = event.pointer_id();
                game.borrow_mut().pointers.retain(|&(p, _)| p != id);
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            if !g.running {
                return;
            }
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless runner: the demo pilot plays the level at the fixed tick rate
#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use clap::Parser;

    use ledge_runner::Tuning;
    use ledge_runner::autopilot;
    use ledge_runner::sim::{GameEvent, GamePhase, GameState, tick};

    #[derive(Parser, Debug, Clone, PartialEq)]
    #[command(name = "ledge-runner")]
    #[command(about = "Headless Ledge Runner: the demo pilot plays the reference level")]
    pub struct Options {
        /// Seed for agent headings, agent speeds and the outfit colour
        #[arg(long, default_value_t = 0)]
        pub seed: u64,
        /// Quit after this many loop iterations
        #[arg(long = "ticks", default_value_t = 3600)]
        pub max_ticks: u64,
        /// Run flat out instead of holding the tick rate
        #[arg(long)]
        pub unpaced: bool,
        /// JSON tuning file; missing fields keep their defaults
        #[arg(long)]
        pub tuning: Option<PathBuf>,
        /// Write the effective tuning as JSON to this path and exit
        #[arg(long)]
        pub write_tuning: Option<PathBuf>,
    }

    /// How a headless run ended
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct RunSummary {
        pub phase: GamePhase,
        pub ticks: u64,
        pub score: u64,
        pub lives: u32,
    }

    fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed reading {}", path.display()))?;
        Tuning::from_json(&json).with_context(|| format!("bad tuning file {}", path.display()))
    }

    fn write_tuning(tuning: &Tuning, path: &Path) -> Result<()> {
        std::fs::write(path, tuning.to_json()?)
            .with_context(|| format!("failed writing {}", path.display()))?;
        log::info!("Tuning written to {}", path.display());
        Ok(())
    }

    pub fn run(options: &Options) -> Result<()> {
        let tuning = load_tuning(options.tuning.as_deref())?;
        if let Some(path) = &options.write_tuning {
            return write_tuning(&tuning, path);
        }

        let summary = play(options, tuning);
        println!(
            "phase={:?} ticks={} score={} lives={}",
            summary.phase, summary.ticks, summary.score, summary.lives
        );
        Ok(())
    }

    /// Play until the level ends or the tick budget is spent
    pub fn play(options: &Options, tuning: Tuning) -> RunSummary {
        let frame = Duration::from_secs_f32(tuning.tick_seconds());
        let mut state = GameState::with_tuning(options.seed, tuning);
        log::info!(
            "Ledge Runner (native, headless) seed {} for up to {} ticks",
            options.seed,
            options.max_ticks
        );

        let mut iterations = 0u64;
        loop {
            let frame_start = Instant::now();

            let mut controls = autopilot::pilot(&state);
            if iterations >= options.max_ticks {
                controls.quit_requested = true;
            }
            if controls.quit_requested {
                log::info!("Tick budget spent");
                break;
            }

            tick(&mut state, &controls.intent());
            iterations += 1;

            for event in state.drain_events() {
                match event {
                    GameEvent::Jumped => log::debug!("tick {}: jump", state.time_ticks),
                    GameEvent::PlayerHit { lives_left } => {
                        log::info!("tick {}: caught, {} lives left", state.time_ticks, lives_left)
                    }
                    other => log::info!("tick {}: {:?}", state.time_ticks, other),
                }
            }
            if !state.is_running() {
                break;
            }

            if !options.unpaced {
                std::thread::sleep(frame.saturating_sub(frame_start.elapsed()));
            }
        }

        RunSummary {
            phase: state.phase,
            ticks: state.time_ticks,
            score: state.player.score,
            lives: state.player.lives,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn parse(args: &[&str]) -> Result<Options, clap::Error> {
            Options::try_parse_from(std::iter::once("ledge-runner").chain(args.iter().copied()))
        }

        #[test]
        fn test_parse_defaults() {
            let o = parse(&[]).unwrap();
            assert_eq!(o.seed, 0);
            assert_eq!(o.max_ticks, 3600);
            assert!(!o.unpaced);
            assert_eq!(o.tuning, None);
            assert_eq!(o.write_tuning, None);
        }

        #[test]
        fn test_parse_flags() {
            let o = parse(&["--seed", "7", "--ticks", "120", "--unpaced", "--tuning", "t.json"])
                .unwrap();
            assert_eq!(o.seed, 7);
            assert_eq!(o.max_ticks, 120);
            assert!(o.unpaced);
            assert_eq!(o.tuning, Some(PathBuf::from("t.json")));
        }

        #[test]
        fn test_parse_errors() {
            assert!(parse(&["--seed"]).is_err());
            assert!(parse(&["--ticks", "lots"]).is_err());
            assert!(parse(&["--fly"]).is_err());
        }

        #[test]
        fn test_missing_tuning_file_fails() {
            let o = parse(&["--unpaced", "--tuning", "/nonexistent/tuning.json"]).unwrap();
            let err = run(&o).unwrap_err();
            assert!(format!("{err:#}").contains("/nonexistent/tuning.json"));
        }

        #[test]
        fn test_write_tuning_keeps_loaded_values() {
            let dir = tempfile::tempdir().unwrap();
            let input = dir.path().join("in.json");
            let output = dir.path().join("out.json");
            std::fs::write(&input, r#"{ "goal_bonus": 250, "gravity": 0.75 }"#).unwrap();

            let o = Options {
                tuning: Some(input),
                write_tuning: Some(output.clone()),
                ..parse(&[]).unwrap()
            };
            run(&o).unwrap();

            let written = Tuning::from_json(&std::fs::read_to_string(&output).unwrap()).unwrap();
            assert_eq!(written.goal_bonus, 250);
            assert_eq!(written.gravity, 0.75);
            assert_eq!(written.player_speed, Tuning::default().player_speed);
        }

        #[test]
        fn test_unpaced_run_respects_budget() {
            let o = parse(&["--unpaced", "--ticks", "300"]).unwrap();
            let summary = play(&o, Tuning::default());
            assert!(summary.ticks <= 300);
            assert!(summary.ticks > 0);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    native::run(&native::Options::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
