/*!
# Meteor Guest

Sample hot-loadable engine module. Exports the `meteor_main` entry point the
host resolves, advances the host's frame counter on every step, and probes
the Vulkan backend on load: supported instance extensions, plus each
adapter's verdict against the feature/limit set the renderer will need.

Rebuild this crate while the editor is running to watch the host swap the
module in place.
*/

use meteor_engine::hotload::{PluginContext, PluginOp};
use meteor_engine::renderer::{
    DeviceFeatures, DeviceLimits, DeviceRequirements, InstanceDesc, RenderBackend,
};
use meteor_engine::{meteor_debug, meteor_info, meteor_warn};
use meteor_engine_renderer_vulkan::{enumerate_instance_extensions, VulkanBackend};

/// Layout shared with the host's context block
#[repr(C)]
struct HostState {
    frame_index: u32,
}

fn on_load(ctx: &mut PluginContext) -> i32 {
    meteor_info!("meteor::guest", "OnLoad v{} e{}", ctx.version, ctx.failure);
    probe_render_backend();
    0
}

/// Cold-startup render probe: extensions, adapters, and requirement checks
fn probe_render_backend() {
    match enumerate_instance_extensions() {
        Ok(extensions) => {
            meteor_info!(
                "meteor::guest",
                "{} instance extensions supported",
                extensions.len()
            );
            for extension in &extensions {
                meteor_debug!("meteor::guest", "  {}", extension);
            }
        }
        Err(error) => {
            meteor_warn!("meteor::guest", "Vulkan unavailable: {}", error);
            return;
        }
    }

    let mut backend = VulkanBackend::new();
    let desc = InstanceDesc {
        app_name: "Meteor Guest".to_string(),
        required_extensions: vec![],
        enable_validation: false,
    };
    if let Err(error) = backend.create_instance(&desc) {
        meteor_warn!("meteor::guest", "instance creation failed: {}", error);
        return;
    }

    let required = DeviceRequirements {
        features: DeviceFeatures::IMAGE_CUBE_ARRAY
            | DeviceFeatures::LOGIC_OP
            | DeviceFeatures::FILL_MODE_NON_SOLID
            | DeviceFeatures::SAMPLER_ANISOTROPY,
        limits: DeviceLimits {
            max_image_dimension_2d: 1024,
            max_vertex_input_attributes: 4,
            ..Default::default()
        },
    };
    match backend.enumerate_adapters() {
        Ok(adapters) => {
            for adapter in &adapters {
                meteor_info!(
                    "meteor::guest",
                    "{} ({}, {}) api {}.{}.{} satisfies={}",
                    adapter.name,
                    adapter.vendor(),
                    adapter.kind.as_str(),
                    adapter.api_version.0,
                    adapter.api_version.1,
                    adapter.api_version.2,
                    adapter.satisfies(&required)
                );
            }
        }
        Err(error) => meteor_warn!("meteor::guest", "{}", error),
    }
}

fn on_step(ctx: &mut PluginContext) -> i32 {
    // SAFETY: the host passes its live context block on every call.
    let Some(state) = (unsafe { (ctx.userdata as *mut HostState).as_mut() }) else {
        return -1;
    };
    state.frame_index = state.frame_index.wrapping_add(1);
    if state.frame_index % 50_000 == 0 {
        meteor_info!(
            "meteor::guest",
            "OnStep v{} f={}",
            ctx.version,
            state.frame_index
        );
    }
    0
}

fn on_unload(ctx: &mut PluginContext) -> i32 {
    meteor_info!("meteor::guest", "OnUnload v{} e{}", ctx.version, ctx.failure);
    0
}

fn on_close(ctx: &mut PluginContext) -> i32 {
    meteor_info!("meteor::guest", "OnClose v{}", ctx.version);
    0
}

/// Module entry point resolved by the host
///
/// # Safety
///
/// `ctx` must be null or point at the host's live plugin context.
#[no_mangle]
pub unsafe extern "C" fn meteor_main(ctx: *mut PluginContext, op: PluginOp) -> i32 {
    let Some(ctx) = ctx.as_mut() else {
        return -1;
    };
    match op {
        PluginOp::Load => on_load(ctx),
        PluginOp::Step => on_step(ctx),
        PluginOp::Unload => on_unload(ctx),
        PluginOp::Close => on_close(ctx),
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
