//! Integration tests requiring a Vulkan driver
//!
//! Run with: cargo test --test vulkan_backend_integration_tests -- --ignored

use meteor_engine::renderer::{InstanceDesc, RenderBackend};
use meteor_engine_renderer_vulkan::{enumerate_instance_extensions, VulkanBackend};

#[test]
#[ignore] // Requires a Vulkan driver
fn instance_creation_and_adapter_enumeration() {
    let mut backend = VulkanBackend::new();
    backend
        .create_instance(&InstanceDesc {
            app_name: "meteor integration test".to_string(),
            required_extensions: vec![],
            enable_validation: false,
        })
        .expect("instance creation should succeed with a driver present");

    let adapters = backend.enumerate_adapters().expect("at least one adapter");
    assert!(!adapters.is_empty());
    for adapter in &adapters {
        // Every driver reports a non-empty device name and a sane 2D limit.
        assert!(!adapter.name.is_empty());
        assert!(adapter.limits.max_image_dimension_2d >= 1024);
    }
}

#[test]
#[ignore] // Requires a Vulkan driver
fn double_instance_creation_is_rejected() {
    let mut backend = VulkanBackend::new();
    let desc = InstanceDesc {
        enable_validation: false,
        ..Default::default()
    };
    backend.create_instance(&desc).unwrap();
    assert!(backend.create_instance(&desc).is_err());
}

#[test]
#[ignore] // Requires a Vulkan driver
fn instance_extensions_are_reported() {
    let extensions = enumerate_instance_extensions().unwrap();
    assert!(extensions.iter().any(|name| name == "VK_KHR_surface"));
}
