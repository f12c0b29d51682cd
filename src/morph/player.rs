use crate::animation::clock::ManualClock;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{MorphError, MorphResult};
use crate::morph::controller::{FrameOutcome, MorphController, MorphState};
use crate::render::cpu::CpuSurface;
use crate::render::surface::DrawSurface;

/// Drives a controller at a fixed frame rate on a [`ManualClock`].
#[derive(Clone, Copy, Debug)]
pub struct Player {
    pub fps: Fps,
    /// Upper bound on rendered frames; loops never finish on their own.
    pub max_frames: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackStats {
    pub frames: u64,
    pub final_state: MorphState,
    pub final_progress: f64,
}

impl Player {
    pub fn new(fps: Fps, max_frames: u64) -> MorphResult<Self> {
        if max_frames == 0 {
            return Err(MorphError::validation("max_frames must be > 0"));
        }
        Ok(Self { fps, max_frames })
    }

    /// Service pending frames until the controller goes idle or `max_frames` is reached.
    ///
    /// The clock advances by one frame duration before every frame; `on_frame` sees the surface
    /// after each rendered frame.
    pub fn play<S, F>(
        &self,
        controller: &mut MorphController<S>,
        clock: &ManualClock,
        mut on_frame: F,
    ) -> MorphResult<PlaybackStats>
    where
        S: DrawSurface,
        F: FnMut(FrameIndex, &S) -> MorphResult<()>,
    {
        let step_ms = self.fps.frame_duration_ms();
        let mut frames = 0u64;
        while let Some(handle) = controller.pending_frame() {
            if frames >= self.max_frames {
                tracing::debug!(frames, "frame budget reached");
                break;
            }
            clock.advance(step_ms);
            let outcome = controller.on_frame(handle)?;
            on_frame(FrameIndex(frames), controller.surface())?;
            frames += 1;
            if outcome == FrameOutcome::Finished {
                break;
            }
        }

        Ok(PlaybackStats {
            frames,
            final_state: controller.state(),
            final_progress: controller.progress(),
        })
    }

    /// [`Player::play`] with every frame pushed into `sink`.
    pub fn play_into_sink(
        &self,
        controller: &mut MorphController<CpuSurface>,
        clock: &ManualClock,
        sink: &mut dyn FrameSink,
    ) -> MorphResult<PlaybackStats> {
        let canvas = controller.surface().canvas();
        sink.begin(SinkConfig {
            width: canvas.width,
            height: canvas.height,
            fps: self.fps,
        })?;
        let stats = self.play(controller, clock, |idx, surface| {
            sink.push_frame(idx, &surface.snapshot())
        })?;
        sink.end()?;
        Ok(stats)
    }
}
