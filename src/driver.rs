//! Frame clock and session lifecycle
//!
//! The driver owns the one `SimulationState`, the score store and the asset
//! registry. The host calls [`Driver::frame`] once per display refresh while
//! [`Driver::loop_active`] is true; commands arrive through
//! [`Driver::handle`]. Nothing ticks or reacts until every asset settled.

use crate::assets::{AssetId, AssetRegistry};
use crate::highscores::ScoreStore;
use crate::sim::{
    Command, CommandEffect, SimulationState, TickOutcome, apply_command, autopilot_command, tick,
};
use crate::tuning::Tuning;

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Per-session owner of the simulation
pub struct Driver<S: ScoreStore> {
    state: SimulationState,
    store: S,
    assets: AssetRegistry,
    loop_active: bool,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl<S: ScoreStore> Driver<S> {
    /// New session with every asset still pending
    pub fn new(tuning: Tuning, width: f32, seed: u64, store: S) -> Self {
        let mut state = SimulationState::new(tuning, width, seed);
        state.best_score = store.get();
        log::info!("Session created with seed {} (best {})", seed, state.best_score);
        Self {
            state,
            store,
            assets: AssetRegistry::new(),
            loop_active: false,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Replace the asset registry (e.g. already loaded on native)
    pub fn with_assets(mut self, assets: AssetRegistry) -> Self {
        self.assets = assets;
        self
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct access for tools and scripted scenarios
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn assets(&self) -> &AssetRegistry {
        &self.assets
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// The host must keep requesting frames
    pub fn loop_active(&self) -> bool {
        self.loop_active
    }

    /// Gameplay may begin
    pub fn is_ready(&self) -> bool {
        self.assets.is_settled()
    }

    pub fn asset_loaded(&mut self, id: AssetId) {
        self.assets.mark_loaded(id);
        self.log_if_ready();
    }

    pub fn asset_failed(&mut self, id: AssetId) {
        self.assets.mark_failed(id);
        self.log_if_ready();
    }

    fn log_if_ready(&self) {
        if self.is_ready() {
            let (_, total) = self.assets.progress();
            log::info!(
                "Assets settled ({} of {} failed)",
                self.assets.failed_count(),
                total
            );
        }
    }

    /// Route a command. Returns true when the host must start the frame loop.
    pub fn handle(&mut self, command: Command) -> bool {
        if !self.is_ready() {
            log::debug!("Ignoring {:?}: assets not loaded yet", command);
            return false;
        }
        match apply_command(&mut self.state, command, &self.store) {
            CommandEffect::Started => {
                // Time spent on the start or game-over screen is not a frame
                self.frame_times = [0.0; FPS_WINDOW];
                self.frame_index = 0;
                let kick = !self.loop_active;
                self.loop_active = true;
                kick
            }
            CommandEffect::Applied | CommandEffect::Ignored => false,
        }
    }

    /// One display refresh: exactly one simulation tick while running
    pub fn frame(&mut self, time: f64) -> TickOutcome {
        if !self.loop_active {
            return TickOutcome::Idle;
        }
        self.track_fps(time);

        let outcome = tick(&mut self.state, &mut self.store);
        match outcome {
            TickOutcome::Advanced => {}
            TickOutcome::GameOver { .. } | TickOutcome::Idle => self.loop_active = false,
        }
        outcome
    }

    /// New playfield width. Re-places entities without advancing.
    pub fn resize(&mut self, width: f32) {
        if width <= 0.0 {
            log::warn!("Ignoring resize to width {}", width);
            return;
        }
        self.state.relayout(width);
    }

    /// Drive a full run with the built-in bot, up to `max_ticks` frames
    pub fn run_autopilot(&mut self, max_ticks: u64) -> TickOutcome {
        self.handle(Command::Jump);
        let mut outcome = TickOutcome::Idle;
        for frame in 0..max_ticks {
            if let Some(command) = autopilot_command(&self.state) {
                self.handle(command);
            }
            outcome = self.frame(frame as f64 * 1000.0 / 60.0);
            if !self.loop_active {
                break;
            }
        }
        outcome
    }

    fn track_fps(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Calculate FPS from oldest to newest frame
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}
