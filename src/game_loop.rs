//! Loop driver
//!
//! Turns host frame callbacks into fixed-timestep simulation ticks. The host's
//! animation-frame API and clock sit behind [`FrameScheduler`] and [`Clock`], so
//! tests (and the native demo) can step frames by hand.

use std::cell::Cell;
use std::rc::Rc;

use crate::consts::{MAX_FRAME_DELTA_MS, MAX_SUBSTEPS, SIM_DT_MS};
use crate::controller::{MatchController, MatchPhase};
use crate::leaderboard::GameResultRequest;
use crate::sim::{GameEvent, RenderSnapshot};

/// Source of the current time in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Opaque registration id returned by a [`FrameScheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host animation-frame registration (`requestAnimationFrame` in the browser)
pub trait FrameScheduler {
    /// Ask for one callback on the next display refresh
    fn request_frame(&mut self) -> FrameHandle;
    /// Withdraw a registration that has not fired yet
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Consumer of the per-frame snapshot (the render step)
pub trait FrameSink {
    fn present(&mut self, snapshot: &RenderSnapshot);
}

impl<F: FnMut(&RenderSnapshot)> FrameSink for F {
    fn present(&mut self, snapshot: &RenderSnapshot) {
        self(snapshot)
    }
}

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// Number of simulation ticks run
    pub ticks: u32,
    /// Events from all ticks, in order
    pub events: Vec<GameEvent>,
    /// Final result, present on the frame the match concluded
    pub report: Option<GameResultRequest>,
    /// The post-match delay elapsed; show the leaderboard
    pub show_leaderboard: bool,
}

/// Fixed-timestep game loop
pub struct GameLoop<S: FrameScheduler, C: Clock> {
    scheduler: S,
    clock: C,
    pending: Option<FrameHandle>,
    accumulator: f64,
    last_time: Option<f64>,
}

impl<S: FrameScheduler, C: Clock> GameLoop<S, C> {
    pub fn new(scheduler: S, clock: C) -> Self {
        Self {
            scheduler,
            clock,
            pending: None,
            accumulator: 0.0,
            last_time: None,
        }
    }

    /// Register for the next frame (no-op if already registered)
    pub fn start(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    /// Cancel the pending frame so no stray callback runs against stale state
    ///
    /// Resets timing so a later `start` doesn't replay the idle time as ticks.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.accumulator = 0.0;
        self.last_time = None;
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Handle one frame callback: tick, present, and re-register if still needed
    pub fn on_frame(
        &mut self,
        controller: &mut MatchController,
        sink: &mut impl FrameSink,
    ) -> FrameOutcome {
        // The registration that brought us here has fired
        self.pending = None;
        let now = self.clock.now_ms();
        let mut outcome = FrameOutcome::default();

        if controller.phase() == MatchPhase::InProgress {
            let delta = match self.last_time {
                Some(last) => (now - last).clamp(0.0, MAX_FRAME_DELTA_MS),
                // First frame after (re)start runs a single tick
                None => SIM_DT_MS,
            };
            self.accumulator += delta;

            while self.accumulator >= SIM_DT_MS && outcome.ticks < MAX_SUBSTEPS {
                outcome.events.extend(controller.tick(now));
                self.accumulator -= SIM_DT_MS;
                outcome.ticks += 1;
                if controller.phase() != MatchPhase::InProgress {
                    break;
                }
            }
            if outcome.ticks == MAX_SUBSTEPS {
                // Drop the backlog rather than spiral
                self.accumulator = self.accumulator.min(SIM_DT_MS);
            }
        }
        self.last_time = Some(now);

        outcome.report = controller.take_report();
        outcome.show_leaderboard = controller.handoff_due(now);

        sink.present(&controller.snapshot());

        let keep_running = controller.phase() == MatchPhase::InProgress
            || (controller.awaiting_handoff() && !outcome.show_leaderboard);
        if keep_running {
            self.start();
        } else {
            self.accumulator = 0.0;
            self.last_time = None;
        }
        outcome
    }
}

/// Hand-advanced clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Scheduler that only records registrations; the caller fires frames itself
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Vec<FrameHandle>,
    pub requested: u32,
    pub cancelled: u32,
}

impl ManualScheduler {
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    /// Consume the oldest registration, as the host would when the frame fires
    pub fn fire(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        self.requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
        self.cancelled += 1;
    }
}
