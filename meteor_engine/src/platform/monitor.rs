//! Monitor queries
//!
//! Snapshot view over the monitors the window system reports; used by the
//! fullscreen transitions and available to the host for logging/selection.

use winit::monitor::MonitorHandle;

/// One video mode a monitor supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoMode {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u16,
    pub refresh_rate_millihertz: u32,
}

/// Snapshot of one monitor's properties
#[derive(Debug, Clone)]
pub struct MonitorInfo {
    /// OS-reported name, when available
    pub name: Option<String>,
    /// Position in the virtual screen space
    pub position: (i32, i32),
    /// Size in physical pixels
    pub size: (u32, u32),
    pub scale_factor: f64,
    pub refresh_rate_millihertz: Option<u32>,
    pub video_modes: Vec<VideoMode>,
}

pub(crate) fn monitor_info(handle: &MonitorHandle) -> MonitorInfo {
    let position = handle.position();
    let size = handle.size();
    MonitorInfo {
        name: handle.name(),
        position: (position.x, position.y),
        size: (size.width, size.height),
        scale_factor: handle.scale_factor(),
        refresh_rate_millihertz: handle.refresh_rate_millihertz(),
        video_modes: handle
            .video_modes()
            .map(|mode| VideoMode {
                width: mode.size().width,
                height: mode.size().height,
                bit_depth: mode.bit_depth(),
                refresh_rate_millihertz: mode.refresh_rate_millihertz(),
            })
            .collect(),
    }
}
