use super::*;
use meteor_engine::renderer::DeviceRequirements;

fn vk_features(set: &[&str]) -> vk::PhysicalDeviceFeatures {
    let mut features = vk::PhysicalDeviceFeatures::default();
    for name in set {
        match *name {
            "image_cube_array" => features.image_cube_array = vk::TRUE,
            "geometry_shader" => features.geometry_shader = vk::TRUE,
            "logic_op" => features.logic_op = vk::TRUE,
            "fill_mode_non_solid" => features.fill_mode_non_solid = vk::TRUE,
            "sampler_anisotropy" => features.sampler_anisotropy = vk::TRUE,
            "shader_float64" => features.shader_float64 = vk::TRUE,
            other => panic!("unknown feature {}", other),
        }
    }
    features
}

// ============================================================================
// Feature conversion
// ============================================================================

#[test]
fn no_vk_features_maps_to_empty_set() {
    let features = features_from_vk(&vk::PhysicalDeviceFeatures::default());
    assert!(features.is_empty());
}

#[test]
fn set_vk_features_map_to_flags() {
    let features = features_from_vk(&vk_features(&[
        "image_cube_array",
        "logic_op",
        "fill_mode_non_solid",
        "sampler_anisotropy",
    ]));

    assert!(features.contains(DeviceFeatures::IMAGE_CUBE_ARRAY));
    assert!(features.contains(DeviceFeatures::LOGIC_OP));
    assert!(features.contains(DeviceFeatures::FILL_MODE_NON_SOLID));
    assert!(features.contains(DeviceFeatures::SAMPLER_ANISOTROPY));
    assert!(!features.contains(DeviceFeatures::GEOMETRY_SHADER));
    assert!(!features.contains(DeviceFeatures::SHADER_FLOAT64));
}

#[test]
fn unset_vk_feature_is_not_reported() {
    let features = features_from_vk(&vk_features(&["geometry_shader"]));
    assert_eq!(features, DeviceFeatures::GEOMETRY_SHADER);
}

// ============================================================================
// Device type conversion
// ============================================================================

#[test]
fn device_types_map_to_adapter_kinds() {
    assert_eq!(
        kind_from_vk(vk::PhysicalDeviceType::INTEGRATED_GPU),
        AdapterKind::IntegratedGpu
    );
    assert_eq!(
        kind_from_vk(vk::PhysicalDeviceType::DISCRETE_GPU),
        AdapterKind::DiscreteGpu
    );
    assert_eq!(
        kind_from_vk(vk::PhysicalDeviceType::VIRTUAL_GPU),
        AdapterKind::VirtualGpu
    );
    assert_eq!(kind_from_vk(vk::PhysicalDeviceType::CPU), AdapterKind::Cpu);
    assert_eq!(
        kind_from_vk(vk::PhysicalDeviceType::OTHER),
        AdapterKind::Other
    );
}

// ============================================================================
// Adapter construction
// ============================================================================

fn sample_properties() -> vk::PhysicalDeviceProperties {
    let mut properties = vk::PhysicalDeviceProperties {
        vendor_id: 0x10DE,
        device_type: vk::PhysicalDeviceType::DISCRETE_GPU,
        api_version: vk::make_api_version(0, 1, 3, 250),
        driver_version: 99,
        ..Default::default()
    };
    properties.limits.max_image_dimension2_d = 16384;
    properties.limits.max_vertex_input_attributes = 32;
    properties.limits.max_framebuffer_width = 16384;
    properties.limits.max_framebuffer_height = 16384;
    for (i, byte) in b"Test GPU\0".iter().enumerate() {
        properties.device_name[i] = *byte as std::ffi::c_char;
    }
    properties
}

#[test]
fn adapter_from_vk_carries_properties_over() {
    let adapter = adapter_from_vk(
        &sample_properties(),
        &vk_features(&["logic_op", "sampler_anisotropy"]),
    );

    assert_eq!(adapter.name, "Test GPU");
    assert_eq!(adapter.vendor_id, 0x10DE);
    assert_eq!(adapter.vendor(), "NVIDIA");
    assert_eq!(adapter.kind, AdapterKind::DiscreteGpu);
    assert_eq!(adapter.api_version, (1, 3, 250));
    assert_eq!(adapter.driver_version, 99);
    assert_eq!(adapter.limits.max_image_dimension_2d, 16384);
}

#[test]
fn converted_adapter_matches_requirements() {
    let adapter = adapter_from_vk(
        &sample_properties(),
        &vk_features(&[
            "image_cube_array",
            "logic_op",
            "fill_mode_non_solid",
            "sampler_anisotropy",
        ]),
    );

    // The feature/limit set the engine cold startup asks for.
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
    assert!(adapter.satisfies(&required));

    let too_demanding = DeviceRequirements {
        features: required.features | DeviceFeatures::GEOMETRY_SHADER,
        ..required
    };
    assert!(!adapter.satisfies(&too_demanding));
}

// ============================================================================
// Backend state machine
// ============================================================================

#[test]
fn enumerate_without_instance_fails() {
    let backend = VulkanBackend::new();
    assert!(backend.enumerate_adapters().is_err());
}
