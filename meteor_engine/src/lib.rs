/*!
# Meteor Engine

Core host for a hot-reloadable game engine: window and input event source,
hot-reload session over a dynamically loaded engine module, and the frame
driver that sequences them.

## Architecture

- **platform**: owns the OS window, polls events once per frame, and
  dispatches them into a per-window callback table (modifier-aware key
  bindings, text accumulation, mouse and window lifecycle callbacks)
- **hotload**: loads the engine module, swaps it in place when its file
  changes on disk, and translates its return codes into control decisions
- **driver**: the per-frame loop gluing the two together, with frame pacing
  and the three stop conditions
- **renderer**: the opaque render-backend seam; concrete backends (Vulkan)
  live in their own crates and are registered through the engine singleton
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod renderer;
pub mod platform;
pub mod hotload;
pub mod driver;

// Main meteor namespace module
pub mod meteor {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Render backend seam
    pub use crate::renderer::RenderBackend;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: meteor_* macros are exported at the crate root.
    }

    // Render sub-module
    pub mod render {
        pub use crate::renderer::*;
    }

    // Platform sub-module (window + input)
    pub mod platform {
        pub use crate::platform::*;
    }

    // Hot-reload sub-module
    pub mod hotload {
        pub use crate::hotload::*;
    }

    // Frame driver sub-module
    pub mod driver {
        pub use crate::driver::*;
    }
}
