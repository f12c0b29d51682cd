use crate::animation::clock::Clock;
use crate::animation::tween::Tween;
use crate::assets::document::Document;
use crate::foundation::core::PointSequence;
use crate::foundation::error::{MorphError, MorphResult};
use crate::geometry::interpolate::interpolate;
use crate::morph::config::MorphConfig;
use crate::morph::frame::{FrameHandle, FrameSlot};
use crate::render::cpu::CpuSurface;
use crate::render::polyline::{PaintStyle, render_points};
use crate::render::surface::DrawSurface;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MorphState {
    Idle,
    /// One-shot run toward 0 or 1, ending at the first frame at or after `end_ms`.
    Transitioning { end_ms: f64 },
    Looping,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Frame rendered and another one requested.
    Scheduled(FrameHandle),
    /// Frame rendered; the controller is now idle.
    Finished,
    /// The handle was cancelled or superseded; nothing happened.
    Stale,
}

/// Animates a surface between two sampled shapes.
///
/// The host drives the animation: whenever [`MorphController::pending_frame`] returns a handle,
/// it calls [`MorphController::on_frame`] with it on its next display tick.
pub struct MorphController<S = CpuSurface> {
    config: MorphConfig,
    style: PaintStyle,
    from: PointSequence,
    to: PointSequence,
    progress: f64,
    tween: Option<Tween>,
    state: MorphState,
    frames: FrameSlot,
    surface: S,
    clock: Box<dyn Clock>,
}

impl<S> std::fmt::Debug for MorphController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MorphController")
            .field("config", &self.config)
            .field("points", &self.from.len())
            .field("progress", &self.progress)
            .field("state", &self.state)
            .field("pending", &self.frames.pending())
            .finish_non_exhaustive()
    }
}

impl<S: DrawSurface> MorphController<S> {
    /// Build a morph from ids in `document`, render the source shape, and start looping if
    /// configured to.
    ///
    /// Missing identifiers are logged, not rejected; the lookup that follows reports the
    /// typed error.
    #[tracing::instrument(
        skip_all,
        fields(
            canvas = %config.canvas_id,
            from = %config.from_path_id,
            to = %config.to_path_id
        )
    )]
    pub fn new(
        config: MorphConfig,
        document: &Document,
        clock: impl Clock + 'static,
    ) -> MorphResult<Self> {
        config.log_diagnostics();
        let canvas = document.canvas(&config.canvas_id)?;
        let surface = S::for_canvas(canvas, config.background)?;
        Self::sample_document(config, document, surface, clock)
    }

    /// Like [`MorphController::new`], rendering into a caller-supplied surface.
    pub fn with_surface(
        config: MorphConfig,
        document: &Document,
        surface: S,
        clock: impl Clock + 'static,
    ) -> MorphResult<Self> {
        config.log_diagnostics();
        Self::sample_document(config, document, surface, clock)
    }

    /// Build a morph from already sampled sequences.
    pub fn from_sequences(
        config: MorphConfig,
        from: PointSequence,
        to: PointSequence,
        surface: S,
        clock: impl Clock + 'static,
    ) -> MorphResult<Self> {
        config.validate()?;
        if from.len() != to.len() {
            return Err(MorphError::interpolation(format!(
                "point sequences differ in length: from has {}, to has {}",
                from.len(),
                to.len()
            )));
        }

        let mut this = Self {
            style: config.paint_style(),
            config,
            from,
            to,
            progress: 0.0,
            tween: None,
            state: MorphState::Idle,
            frames: FrameSlot::default(),
            surface,
            clock: Box::new(clock),
        };
        render_points(&mut this.surface, &this.from, &this.style)?;
        tracing::debug!(points = this.from.len(), "morph ready");

        if this.config.looping {
            this.start_loop();
        }
        Ok(this)
    }

    /// Run toward the target shape from the current progress.
    pub fn forwards(&mut self) -> FrameHandle {
        self.run_towards(1.0)
    }

    /// Run toward the source shape from the current progress.
    pub fn backwards(&mut self) -> FrameHandle {
        self.run_towards(0.0)
    }

    pub fn start_loop(&mut self) -> FrameHandle {
        if self.state != MorphState::Looping {
            tracing::debug!(progress = self.progress, "loop started");
        }
        self.state = MorphState::Looping;
        self.frames.request()
    }

    /// Leave the loop and snap to the nearer shape without animating.
    ///
    /// Does nothing unless the controller is looping.
    pub fn stop_loop(&mut self) -> MorphResult<()> {
        if self.state != MorphState::Looping {
            return Ok(());
        }
        self.frames.cancel();
        self.tween = None;
        self.state = MorphState::Idle;

        let (snap, points) = if self.progress < 0.5 {
            (0.0, &self.from)
        } else {
            (1.0, &self.to)
        };
        tracing::debug!(progress = self.progress, snap, "loop stopped");
        self.progress = snap;
        render_points(&mut self.surface, points, &self.style)
    }

    /// Stop any run immediately, keeping the current progress and pixels.
    pub fn cancel(&mut self) {
        if let Some(h) = self.frames.cancel() {
            tracing::debug!(frame = h.id(), "frame cancelled");
        }
        self.tween = None;
        self.state = MorphState::Idle;
    }

    /// One animation step. `handle` must be the currently pending frame, otherwise the call is
    /// ignored.
    pub fn on_frame(&mut self, handle: FrameHandle) -> MorphResult<FrameOutcome> {
        if !self.frames.take(handle) {
            tracing::trace!(frame = handle.id(), "stale frame ignored");
            return Ok(FrameOutcome::Stale);
        }

        // One clock sample drives both the progress curve and the end-of-run decision.
        let now = self.clock.now_ms();
        self.progress = self.progress_at(now);

        if self.state == MorphState::Looping {
            let settled = self.tween.is_none_or(|t| t.is_complete(now));
            if settled {
                let target = if self.progress >= 1.0 { 0.0 } else { 1.0 };
                self.retarget(target, now);
            }
        }

        let points = interpolate(&self.from, &self.to, self.progress)?;
        render_points(&mut self.surface, &points, &self.style)?;

        match self.state {
            MorphState::Looping => Ok(FrameOutcome::Scheduled(self.frames.request())),
            MorphState::Transitioning { end_ms } if now < end_ms => {
                Ok(FrameOutcome::Scheduled(self.frames.request()))
            }
            MorphState::Transitioning { .. } | MorphState::Idle => {
                self.state = MorphState::Idle;
                self.tween = None;
                tracing::debug!(progress = self.progress, "transition finished");
                Ok(FrameOutcome::Finished)
            }
        }
    }

    pub fn state(&self) -> MorphState {
        self.state
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.frames.pending()
    }

    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    pub fn from_points(&self) -> &PointSequence {
        &self.from
    }

    pub fn to_points(&self) -> &PointSequence {
        &self.to
    }

    /// Interpolated points at the current progress.
    pub fn current_points(&self) -> MorphResult<PointSequence> {
        interpolate(&self.from, &self.to, self.progress)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    fn sample_document(
        config: MorphConfig,
        document: &Document,
        surface: S,
        clock: impl Clock + 'static,
    ) -> MorphResult<Self> {
        config.validate()?;
        let from = document.sample(&config.from_path_id, config.sample_steps)?;
        let to = document.sample(&config.to_path_id, config.sample_steps)?;
        Self::from_sequences(config, from, to, surface, clock)
    }

    fn run_towards(&mut self, target: f64) -> FrameHandle {
        let now = self.clock.now_ms();
        self.progress = self.progress_at(now);
        self.retarget(target, now);

        let end_ms = now + self.config.duration_ms;
        if self.state == MorphState::Looping {
            tracing::debug!("loop replaced by one-shot transition");
        }
        self.state = MorphState::Transitioning { end_ms };
        tracing::debug!(from = self.progress, target, end_ms, "transition started");
        self.frames.request()
    }

    fn retarget(&mut self, target: f64, now: f64) {
        self.tween = Some(Tween::retarget(
            self.progress,
            target,
            now,
            self.config.duration_ms,
            self.config.ease,
        ));
    }

    fn progress_at(&self, now: f64) -> f64 {
        match &self.tween {
            Some(t) => t.value_at(now).clamp(0.0, 1.0),
            None => self.progress,
        }
    }
}
