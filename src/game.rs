//! Session driver
//!
//! Owns the state, the clock and the input queue. Platform code pushes
//! input whenever it arrives and calls [`Game::update`] once per animation
//! frame.

use crate::clock::FrameClock;
use crate::sim::{Autopilot, GameEvent, GameState, InputEvent, TickInput, Viewport, tick};
use crate::tuning::Tuning;

pub struct Game {
    state: GameState,
    clock: FrameClock,
    /// Input received since the last tick, oldest first
    pending: Vec<InputEvent>,
    autopilot: Option<Autopilot>,
    /// Highest score reached this session
    best_score: u64,
}

impl Game {
    pub fn new(viewport: Viewport, tuning: Tuning, seed: u64) -> Self {
        log::info!(
            "New session {}x{} with seed {}",
            viewport.width,
            viewport.height,
            seed
        );
        Self {
            clock: FrameClock::new(tuning.fps),
            state: GameState::new(viewport, tuning, seed),
            pending: Vec::new(),
            autopilot: None,
            best_score: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn best_score(&self) -> u64 {
        self.best_score.max(self.state.score)
    }

    pub fn frames_elapsed(&self) -> u64 {
        self.clock.frames_elapsed()
    }

    /// Queue an input event for the next tick
    pub fn push_input(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    pub fn autopilot_enabled(&self) -> bool {
        self.autopilot.is_some()
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        if enabled == self.autopilot_enabled() {
            return;
        }
        log::info!("Autopilot: {}", if enabled { "on" } else { "off" });
        if enabled {
            self.autopilot = Some(Autopilot::new());
        } else {
            self.autopilot = None;
            // Let go so a real finger has to grab the plane again
            self.pending.push(InputEvent::TouchEnd);
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.state.resize(viewport);
    }

    /// Feed real elapsed time; runs every tick that is due and returns
    /// what happened, in order
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for frame in self.clock.advance(dt) {
            self.run_tick(frame, &mut events);
        }
        events
    }

    /// Run exactly one tick regardless of elapsed time
    pub fn step(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let frame = self.clock.take_frame();
        self.run_tick(frame, &mut events);
        events
    }

    fn run_tick(&mut self, frame: u64, out: &mut Vec<GameEvent>) {
        let mut input = TickInput {
            frame,
            events: std::mem::take(&mut self.pending),
        };
        if let Some(pilot) = &self.autopilot {
            input.events.extend(pilot.plan(&self.state));
        }

        tick(&mut self.state, &input);

        for event in self.state.drain_events() {
            if let GameEvent::GameOver { score } = event {
                if score > self.best_score {
                    log::info!("New best score: {}", score);
                    self.best_score = score;
                }
            }
            out.push(event);
        }
    }
}
