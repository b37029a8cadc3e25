//! Hot-reload host: window + engine module + frame loop
//!
//! Positional arguments:
//! 1. install directory path (absolute)
//! 2. engine module basename (e.g. `meteor_guest`)
//! 3. frequency of hot-reload checks in frames (optional)

use std::process::ExitCode;
use std::time::Duration;

use meteor_engine::driver::{self, FrameLoopConfig, HostContext};
use meteor_engine::hotload::{make_library_filepath, HotReloadSession, NativeLoader};
use meteor_engine::meteor::{Engine, Error, Result};
use meteor_engine::platform::{
    DesktopSurface, GraphicsBackend, KeyCode, KeyCommand, KeyState, Modifiers, WindowConfig,
    WindowSystem,
};
use meteor_engine::{meteor_debug, meteor_error, meteor_info};
use meteor_engine_renderer_vulkan::VulkanBackend;

const DEFAULT_RELOAD_CHECK_INTERVAL: u32 = 100_000;

/// Host-owned context block shared with the engine module
///
/// The module advances `frame_index` on every step; the layout is part of
/// the module ABI.
#[repr(C)]
struct EngineState {
    frame_index: u32,
}

impl HostContext for EngineState {
    fn frame_index(&self) -> u32 {
        self.frame_index
    }
}

fn main() -> ExitCode {
    if Engine::initialize().is_err() {
        return ExitCode::FAILURE;
    }
    match run_host() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            meteor_error!("meteor::editor", "{}", error);
            ExitCode::FAILURE
        }
    }
}

fn run_host() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        let program = args.first().map(String::as_str).unwrap_or("meteor_editor");
        return Err(Error::InitializationFailed(format!(
            "usage: {} <install-dir> <module-basename> [reload-check-frames]",
            program
        )));
    }
    let install_dir = &args[1];
    let basename = &args[2];
    let reload_interval = match args.get(3) {
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            Error::InitializationFailed(format!("invalid reload-check frequency: {}", raw))
        })?,
        None => DEFAULT_RELOAD_CHECK_INTERVAL,
    };

    let mut loop_config = FrameLoopConfig::new(reload_interval)?;
    loop_config.title = "Meteor editor".to_string();
    loop_config.min_frame_period = Some(Duration::from_millis(4));

    Engine::create_backend(VulkanBackend::new())?;

    let mut system = WindowSystem::new()?;
    let mut window_config = WindowConfig {
        width: 800,
        height: 600,
        title: "Meteor editor".to_string(),
        backend: GraphicsBackend::Vulkan { major: 1, minor: 3 },
        ..Default::default()
    };
    window_config.callbacks.window_close = Some(Box::new(|| {
        meteor_info!("meteor::editor", "window close requested");
    }));
    window_config.callbacks.window_resized = Some(Box::new(|width, height| {
        meteor_debug!("meteor::editor", "window resized to {}x{}", width, height);
    }));
    window_config.callbacks.text_input = Some(Box::new(|buffer, ch| {
        meteor_debug!("meteor::editor", "input \"{}\" (+{:?})", buffer, ch);
    }));

    let mut window = system.create_window(window_config)?;

    for monitor in window.available_monitors() {
        meteor_debug!(
            "meteor::editor",
            "monitor {:?}: {}x{} at ({}, {})",
            monitor.name,
            monitor.size.0,
            monitor.size.1,
            monitor.position.0,
            monitor.position.1
        );
    }

    window.bind_key(KeyCode::Q, Modifiers::CTRL, |_, state, _| {
        if state == KeyState::Press {
            KeyCommand::CloseWindow
        } else {
            KeyCommand::None
        }
    });
    window.bind_key(KeyCode::Escape, Modifiers::empty(), |_, state, _| {
        if state == KeyState::Press {
            KeyCommand::ClearInput
        } else {
            KeyCommand::None
        }
    });
    window.bind_key(KeyCode::Backspace, Modifiers::empty(), |_, state, _| {
        if state != KeyState::Release {
            KeyCommand::UndoInput
        } else {
            KeyCommand::None
        }
    });
    window.bind_key(KeyCode::Anything, Modifiers::empty(), |_, state, name| {
        if state == KeyState::Press {
            meteor_debug!("meteor::editor", "key {} pressed", name);
        }
        KeyCommand::None
    });

    let library_path = make_library_filepath(install_dir, basename);
    meteor_info!(
        "meteor::editor",
        "Hot-loadable library: {}",
        library_path.display()
    );
    let session = HotReloadSession::open(Box::new(NativeLoader), library_path)?;

    let mut engine_state = EngineState { frame_index: 0 };
    let mut surface = DesktopSurface::new(system, window);
    driver::run(&mut surface, session, &mut engine_state, &loop_config);

    Engine::destroy_backend()?;
    Engine::shutdown();
    Ok(())
}
