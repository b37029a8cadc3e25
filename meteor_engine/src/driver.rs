//! Frame driver: the top-level loop
//!
//! Sequences event polling, module stepping, presentation, and frame-rate
//! pacing, and decides when to stop. Single-threaded and cooperative: the
//! only blocking point is the deliberate pacing sleep at the end of an
//! iteration.

use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::hotload::{HotReloadSession, StepResult};
use crate::{meteor_error, meteor_info};

/// What the driver needs from the window/input layer
///
/// Implemented by [`DesktopSurface`](crate::platform::DesktopSurface);
/// tests substitute their own.
pub trait EventSurface {
    /// Drain queued OS events, dispatching callbacks synchronously
    fn poll_events(&mut self);
    /// The window's close flag (OS close request or bound key action)
    fn is_closing(&self) -> bool;
    /// Present the frame when the backend owns a presentable context
    fn swap_buffers(&mut self);
    fn set_title(&mut self, title: &str);
}

/// Host-owned context block passed into every module callback
///
/// The block must expose the monotonically increasing frame counter the
/// module advances on each step; the driver reads it for reload cadence and
/// display state.
pub trait HostContext {
    fn frame_index(&self) -> u32;
}

/// Frame loop configuration
///
/// Built through [`FrameLoopConfig::new`], which rejects a zero reload
/// divisor (it would otherwise divide by zero every frame).
pub struct FrameLoopConfig {
    reload_check_interval: u32,
    /// Minimum wall-clock duration of one iteration; `None` runs unpaced
    pub min_frame_period: Option<Duration>,
    /// Base window title; the frame counter is appended each iteration
    pub title: String,
}

impl FrameLoopConfig {
    /// Create a configuration with the given reload-check divisor
    ///
    /// # Errors
    ///
    /// Fails if `reload_check_interval` is zero.
    pub fn new(reload_check_interval: u32) -> Result<Self> {
        if reload_check_interval == 0 {
            return Err(Error::InitializationFailed(
                "reload check interval must be non-zero".to_string(),
            ));
        }
        Ok(Self {
            reload_check_interval,
            min_frame_period: None,
            title: "Meteor".to_string(),
        })
    }

    pub fn reload_check_interval(&self) -> u32 {
        self.reload_check_interval
    }

    /// Whether this frame performs the filesystem reload check
    pub fn is_reload_frame(&self, frame_index: u32) -> bool {
        frame_index % self.reload_check_interval == 0
    }
}

/// The three independent stop conditions of the frame loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StopFlags {
    pub window_closing: bool,
    pub engine_closing: bool,
    pub hot_reload_crashing: bool,
}

impl StopFlags {
    pub fn any(&self) -> bool {
        self.window_closing || self.engine_closing || self.hot_reload_crashing
    }

    /// Fold one step result into the stop conditions
    pub fn absorb(&mut self, result: &StepResult) {
        match result {
            StepResult::Continue => {}
            StepResult::UpdateFailed | StepResult::ReloadFailed => {
                self.hot_reload_crashing = true;
            }
            StepResult::RequestShutdown(_) => {
                self.engine_closing = true;
            }
        }
    }
}

/// Remaining sleep for this frame, floored to whole milliseconds
///
/// Zero when the elapsed time already reaches the target period; never
/// negative.
pub fn frame_sleep_duration(min_frame_period: Duration, elapsed: Duration) -> Duration {
    if elapsed >= min_frame_period {
        return Duration::ZERO;
    }
    Duration::from_millis((min_frame_period - elapsed).as_millis() as u64)
}

/// Run the frame loop until a stop condition fires
///
/// Loop body: poll events, refresh the title from the frame counter, step
/// the hot-reload session (with a reload check every
/// `reload_check_interval` frames), swap buffers, re-check the window's
/// close flag, pace. The session is consumed and closed exactly once on
/// every exit path, and a final diagnostic line reports which condition
/// stopped the loop.
pub fn run<S, U>(
    surface: &mut S,
    mut session: HotReloadSession,
    user_context: &mut U,
    config: &FrameLoopConfig,
) -> StopFlags
where
    S: EventSurface + ?Sized,
    U: HostContext,
{
    let mut flags = StopFlags::default();

    loop {
        let frame_started = Instant::now();

        surface.poll_events();

        surface.set_title(&format!("{} | f={}", config.title, user_context.frame_index()));

        let do_reload_check = config.is_reload_frame(user_context.frame_index());
        let result = session.step(user_context, do_reload_check);
        match result {
            StepResult::Continue => {}
            StepResult::UpdateFailed => {
                meteor_error!("meteor::driver", "{}", Error::UpdateFailed);
            }
            StepResult::ReloadFailed => {
                meteor_error!("meteor::driver", "module reload failed");
            }
            StepResult::RequestShutdown(code) => {
                meteor_info!("meteor::driver", "module requested shutdown (code {})", code);
            }
        }
        flags.absorb(&result);

        surface.swap_buffers();

        // The close flag is an independent source of truth: the OS may have
        // queued a close request this frame even if no callback observed it.
        if surface.is_closing() {
            flags.window_closing = true;
        }

        if flags.any() {
            break;
        }

        if let Some(period) = config.min_frame_period {
            let sleep = frame_sleep_duration(period, frame_started.elapsed());
            if !sleep.is_zero() {
                std::thread::sleep(sleep);
            }
        }
    }

    session.close(user_context);

    meteor_info!(
        "meteor::driver",
        "windowClose={} engineClose={} hotReloadCrash={}",
        flags.window_closing,
        flags.engine_closing,
        flags.hot_reload_crashing
    );

    flags
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
