use std::time::Duration;

use crate::{
    clock::{Scheduler, TimerToken, VirtualClock},
    foundation::error::FsmResult,
    graph::diagram::DiagramGraph,
    player::{
        config::PlayerConfig,
        surface::{Controls, Mount, Surface},
    },
    timeline::cursor::{Progress, Timeline},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum PlayState {
    Idle,
    Playing,
}

/// Discrete inputs delivered by the page's single event queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerEvent {
    Toggle,
    StepForward,
    StepBackward,
    Tick(TimerToken),
}

/// Playback controller bound to one timeline and one surface.
///
/// Holds at most one live timer. Handlers run to completion; a tick whose token is not the
/// pending one is stale and ignored.
pub struct Player<S, C = VirtualClock> {
    mount: Mount,
    timeline: Timeline,
    surface: S,
    clock: C,
    config: PlayerConfig,
    controls: Controls,
    playing: bool,
    pending: Option<TimerToken>,
}

impl<S, C> std::fmt::Debug for Player<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("mount", &self.mount.selector)
            .field("progress", &self.timeline.progress())
            .field("playing", &self.playing)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl<S: Surface, C: Scheduler> Player<S, C> {
    /// Mount the controls and show the timeline's initial progress.
    ///
    /// The diagram itself is drawn lazily, on the first successful step or tick.
    pub fn new(
        mount: Mount,
        timeline: Timeline,
        mut surface: S,
        clock: C,
        config: PlayerConfig,
    ) -> FsmResult<Self> {
        mount.validate()?;
        config.validate()?;

        let controls = Controls::idle(config.brand.clone());
        surface.mount(&mount, &controls);
        surface.update_progress(timeline.progress().fraction());
        tracing::debug!(mount = %mount.selector, steps = timeline.len(), "player mounted");

        Ok(Self {
            mount,
            timeline,
            surface,
            clock,
            config,
            controls,
            playing: false,
            pending: None,
        })
    }

    pub fn handle(&mut self, event: PlayerEvent) -> FsmResult<()> {
        match event {
            PlayerEvent::Toggle => self.toggle(),
            PlayerEvent::StepForward => self.step_forward(),
            PlayerEvent::StepBackward => self.step_backward(),
            PlayerEvent::Tick(token) => self.on_timer(token),
        }
    }

    /// Idle -> Playing (rewinding a finished timeline first), or Playing -> Idle.
    pub fn toggle(&mut self) -> FsmResult<()> {
        if self.playing {
            self.stop();
            return Ok(());
        }

        if self.timeline.finished() {
            self.timeline.rewind();
        }
        self.playing = true;
        self.controls.set_playing(true);
        self.surface.update_controls(&self.controls);
        tracing::debug!(mount = %self.mount.selector, "playing");
        self.tick()
    }

    /// A failed draw moves the cursor back, so the step can be retried.
    pub fn step_forward(&mut self) -> FsmResult<()> {
        if self.playing || !self.timeline.next() {
            return Ok(());
        }
        self.render_frame().inspect_err(|_| {
            self.timeline.prev();
        })
    }

    /// A failed draw moves the cursor forward again, so the step can be retried.
    pub fn step_backward(&mut self) -> FsmResult<()> {
        if self.playing || !self.timeline.prev() {
            return Ok(());
        }
        self.render_frame().inspect_err(|_| {
            self.timeline.next();
        })
    }

    /// Deliver a fired timer.
    pub fn on_timer(&mut self, token: TimerToken) -> FsmResult<()> {
        if self.pending != Some(token) {
            tracing::trace!(token = token.0, "stale timer ignored");
            return Ok(());
        }
        self.pending = None;
        if !self.playing {
            return Ok(());
        }
        self.tick()
    }

    fn tick(&mut self) -> FsmResult<()> {
        if !self.timeline.next() {
            self.stop();
            return Ok(());
        }
        tracing::trace!(pos = self.timeline.pos(), "tick");
        if let Err(e) = self.render_frame() {
            self.stop();
            return Err(e);
        }
        if self.playing {
            self.schedule_next();
        }
        Ok(())
    }

    fn schedule_next(&mut self) {
        if let Some(old) = self.pending.take() {
            self.clock.cancel(old);
        }
        self.pending = Some(self.clock.schedule(self.config.tick_interval()));
    }

    fn stop(&mut self) {
        if let Some(token) = self.pending.take() {
            self.clock.cancel(token);
        }
        self.playing = false;
        self.controls.set_playing(false);
        self.surface.update_controls(&self.controls);
        tracing::debug!(mount = %self.mount.selector, pos = self.timeline.pos(), "idle");
    }

    #[tracing::instrument(skip(self), fields(pos = self.timeline.pos()))]
    fn render_frame(&mut self) -> FsmResult<()> {
        let mut graph = DiagramGraph::new(self.config.layout.clone());
        self.timeline.frame(&mut graph);
        self.surface.draw(&graph, self.config.transition())?;
        self.surface.update_progress(self.timeline.progress().fraction());
        Ok(())
    }

    pub fn state(&self) -> PlayState {
        if self.playing {
            PlayState::Playing
        } else {
            PlayState::Idle
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn progress(&self) -> Progress {
        self.timeline.progress()
    }

    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.pending
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

impl<S: Surface> Player<S, VirtualClock> {
    /// Advance the clock by `by` and deliver every timer that came due.
    ///
    /// Returns the number of live ticks handled.
    pub fn pump(&mut self, by: Duration) -> FsmResult<usize> {
        let mut handled = 0;
        for token in self.clock.advance(by) {
            if self.pending == Some(token) {
                handled += 1;
            }
            self.on_timer(token)?;
        }
        Ok(handled)
    }

    /// Jump to the next deadline and deliver it. Returns `Ok(0)` when nothing is scheduled.
    pub fn pump_next(&mut self) -> FsmResult<usize> {
        match self.clock.until_next() {
            Some(d) => self.pump(d),
            None => Ok(0),
        }
    }

    /// Deliver ticks until the player stops scheduling; returns how many were handled.
    pub fn run_until_idle(&mut self) -> FsmResult<usize> {
        let mut total = 0;
        while self.pending.is_some() {
            total += self.pump_next()?;
        }
        Ok(total)
    }
}
