//! Canvas Pong entry point
//!
//! Browser build: WebGPU canvas, keyboard, mute button and narration.
//! Native build: headless autoplay runner that logs the match.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use canvas_pong::audio::{AudioManager, SoundEffect};
    use canvas_pong::consts::*;
    use canvas_pong::platform::WebSpeaker;
    use canvas_pong::renderer::SdfRenderState;
    use canvas_pong::sim::{GamePhase, GameState, PaddleCommand, Side, TickInput, tick};
    use canvas_pong::{Narrator, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<SdfRenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        settings: Settings,
        narrator: Narrator,
        speaker: WebSpeaker,
        audio: AudioManager,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                narrator: Narrator::from_settings(&settings),
                speaker: WebSpeaker::new(),
                audio: AudioManager::new(settings.master_volume, settings.sfx_volume),
                settings,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks and hand their events to sound and narration
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let events = tick(&mut self.state, &self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.commands.clear();
                self.input.pause = false;

                for event in &events {
                    self.audio.play(SoundEffect::for_event(event));
                    self.narrator.observe(event, time);
                }
            }

            self.narrator.update(time, &mut self.speaker);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (59000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state, time) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &web_sys::Document) {
            let language = self.narrator.language();

            if let Some(el) = document.get_element_by_id("score-player") {
                let text = format!(
                    "{}: {}",
                    language.player_label(),
                    self.state.score.get(Side::Player)
                );
                el.set_text_content(Some(&text));
            }

            if let Some(el) = document.get_element_by_id("score-computer") {
                let text = format!(
                    "{}: {}",
                    language.computer_label(),
                    self.state.score.get(Side::Computer)
                );
                el.set_text_content(Some(&text));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&format!("{} FPS", self.fps)));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("pause-banner") {
                let class = if self.state.phase == GamePhase::Paused {
                    ""
                } else {
                    "hidden"
                };
                let _ = el.set_attribute("class", class);
            }
        }

        /// Flip narration mute and persist the choice
        fn toggle_mute(&mut self) -> bool {
            let muted = self.narrator.toggle_mute();
            self.settings.narration_muted = muted;
            self.settings.save();
            muted
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Canvas Pong starting...");

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

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        {
            let g = game.borrow();
            log::info!("Game initialized with seed: {}", g.state.seed);
            if g.speaker.is_available() {
                log::info!("Narration voice available");
            } else {
                log::warn!("Narration voice unavailable, scores will not be spoken");
            }
        }

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

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
                log::error!("No graphics adapter available: {e}");
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match SdfRenderState::new(surface, &adapter, width, height).await {
            Ok(mut render_state) => {
                render_state.set_start_time(window.performance().map_or(0.0, |p| p.now()));
                game.borrow_mut().render_state = Some(render_state);
            }
            Err(e) => {
                log::error!("Failed to create device: {e}");
                return;
            }
        }

        setup_mute_button(&document, game.clone());
        setup_keyboard(game.clone());
        setup_auto_pause(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Canvas Pong running!");
    }

    /// Create the narration mute toggle and append it to the page
    fn setup_mute_button(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        let Ok(button) = document.create_element("button") else {
            log::warn!("Could not create mute button");
            return;
        };
        button.set_id("muteButton");
        {
            let g = game.borrow();
            let label = g.narrator.language().mute_button_label(g.narrator.is_muted());
            button.set_text_content(Some(label));
        }

        let button_clone = button.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            let muted = g.toggle_mute();
            g.audio.resume();
            let label = g.narrator.language().mute_button_label(muted);
            button_clone.set_text_content(Some(label));
        });
        let _ =
            button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();

        match document.body() {
            Some(body) => {
                let _ = body.append_child(&button);
            }
            None => log::warn!("Document has no body, mute button not shown"),
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            g.audio.resume();
            let key = event.key();
            if let Some(command) = PaddleCommand::from_key(&key) {
                // Space would otherwise scroll the page
                event.prevent_default();
                g.input.commands.push(command);
                return;
            }
            match key.as_str() {
                "Escape" => g.input.pause = true,
                "i" | "I" => {
                    g.input.autoplay = !g.input.autoplay;
                    log::info!("Autoplay: {}", g.input.autoplay);
                }
                _ => {}
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
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

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.render(time);
            g.update(dt, time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use canvas_pong::consts::SIM_DT;
    use canvas_pong::sim::{GameEvent, GameState, TickInput, tick};
    use canvas_pong::{LogSpeaker, Narrator, Settings};

    /// Run a computer-vs-computer match without a window and log what happens
    #[derive(Parser, Debug)]
    #[command(name = "canvas-pong", version, about)]
    pub struct Args {
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        pub seed: Option<u64>,

        /// Number of 60 Hz simulation frames to run
        #[arg(long, default_value_t = 60 * 60)]
        pub frames: u64,

        /// Silence score narration
        #[arg(long)]
        pub muted: bool,

        /// Narration language tag (pt-BR or en-US)
        #[arg(long)]
        pub lang: Option<String>,

        /// Settings JSON file
        #[arg(long)]
        pub settings: Option<PathBuf>,
    }

    /// Settings file (if any) with the command-line flags applied on top
    fn settings_for(args: &Args) -> std::io::Result<Settings> {
        let settings = match &args.settings {
            Some(path) => Settings::load_from(path)?,
            None => Settings::default(),
        };
        Ok(settings.with_overrides(args.muted, args.lang.as_deref()))
    }

    pub fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
        let settings = settings_for(&args)?;

        let seed = args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });
        let mut state = GameState::new(seed);
        log::info!("Canvas Pong (headless) starting with seed {}", state.seed);
        let mut narrator = Narrator::from_settings(&settings);
        let mut speaker = LogSpeaker::default();
        let input = TickInput {
            autoplay: true,
            ..Default::default()
        };

        let mut paddle_hits = 0u64;
        for frame in 0..args.frames {
            let now_ms = frame as f64 * SIM_DT as f64 * 1000.0;
            for event in tick(&mut state, &input, SIM_DT) {
                match event {
                    GameEvent::PaddleHit { .. } => paddle_hits += 1,
                    GameEvent::WallBounce { wall } => log::trace!("Bounce off {wall:?} wall"),
                    GameEvent::Scored { .. } => {}
                }
                narrator.observe(&event, now_ms);
            }
            narrator.update(now_ms, &mut speaker);
        }

        // Flush an announcement still waiting on its delay
        if let Some(due) = narrator.pending_due() {
            narrator.update(due, &mut speaker);
        }

        println!(
            "{} frames: player {} - computer {} ({} paddle hits, {} announcements)",
            args.frames,
            state.score.player,
            state.score.computer,
            paddle_hits,
            speaker.spoken.len()
        );
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use clap::Parser;

    env_logger::init();
    headless::run(headless::Args::parse())
}
