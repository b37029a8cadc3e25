//! winit ApplicationHandler adapters for window creation and event polling
//!
//! The event loop is pumped with a zero timeout, so both adapters observe
//! only events that were already queued.

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, DeviceEvents};
use winit::window::{Fullscreen, WindowId, WindowLevel};

use crate::meteor_warn;
use crate::platform::window::{Window, WindowConfig};

/// One-shot handler that creates the window on the resume event
pub(crate) struct WindowCreator<'a> {
    pub config: &'a WindowConfig,
    pub created: Option<Result<winit::window::Window, winit::error::OsError>>,
}

impl ApplicationHandler for WindowCreator<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.created.is_some() {
            return;
        }
        let config = self.config;

        let mut attrs = winit::window::Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_visible(config.visible)
            .with_active(config.focused)
            .with_decorations(config.decorated)
            .with_resizable(config.resizable)
            .with_transparent(config.transparent_framebuffer);
        if let Some((width, height)) = config.min_size {
            attrs = attrs.with_min_inner_size(PhysicalSize::new(width, height));
        }
        if let Some((width, height)) = config.max_size {
            attrs = attrs.with_max_inner_size(PhysicalSize::new(width, height));
        }
        if config.always_on_top {
            attrs = attrs.with_window_level(WindowLevel::AlwaysOnTop);
        }
        if let Some(index) = config.fullscreen_monitor {
            let monitor = event_loop.available_monitors().nth(index);
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(monitor)));
        }
        // Constraints the window system does not expose are accepted but
        // inert; flag them so a host relying on one notices.
        if config.aspect_ratio.is_some() {
            meteor_warn!("meteor::platform", "aspect-ratio constraint is not supported");
        }
        if config.opacity < 1.0 {
            meteor_warn!("meteor::platform", "window opacity is not supported");
        }
        if config.auto_minimize {
            meteor_warn!("meteor::platform", "auto-minimize is not supported");
        }

        event_loop.listen_device_events(if config.raw_mouse_motion {
            DeviceEvents::Always
        } else {
            DeviceEvents::WhenFocused
        });

        self.created = Some(event_loop.create_window(attrs));
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        _event: WindowEvent,
    ) {
        // No window exists yet; nothing to dispatch.
    }
}

/// Per-frame handler forwarding queued events into the window's callbacks
pub(crate) struct EventPump<'a> {
    pub window: &'a mut Window,
}

impl ApplicationHandler for EventPump<'_> {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if window_id != self.window.id() {
            return;
        }
        self.window.handle_event(event);
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if let Some(callback) = &mut self.window.state.callbacks.raw_mouse_motion {
                callback(delta.0, delta.1);
            }
        }
    }
}
