/*!
# Meteor Engine - Vulkan Render Backend

Vulkan implementation of the `meteor_engine` render-backend seam, built on
the Ash bindings.

The backend covers what the host needs from its external renderer: instance
creation, physical-device enumeration into [`AdapterInfo`] records the
engine can match against its requirements, and the instance/window extension
queries a module performs during cold startup.

[`AdapterInfo`]: meteor_engine::renderer::AdapterInfo
*/

mod vulkan_backend;

pub use vulkan_backend::{
    enumerate_instance_extensions, required_window_extensions, VulkanBackend,
};
