use super::*;
use crate::renderer::mock_backend::MockBackend;

fn adapter(features: DeviceFeatures, limits: DeviceLimits) -> AdapterInfo {
    AdapterInfo {
        name: "Test Adapter".to_string(),
        vendor_id: 0x8086,
        kind: AdapterKind::IntegratedGpu,
        api_version: (1, 3, 0),
        driver_version: 7,
        features,
        limits,
    }
}

fn roomy_limits() -> DeviceLimits {
    DeviceLimits {
        max_image_dimension_2d: 8192,
        max_vertex_input_attributes: 16,
        max_framebuffer_width: 8192,
        max_framebuffer_height: 8192,
    }
}

// ============================================================================
// satisfies()
// ============================================================================

#[test]
fn empty_requirements_always_satisfied() {
    let info = adapter(DeviceFeatures::empty(), DeviceLimits::default());
    assert!(info.satisfies(&DeviceRequirements::default()));
}

#[test]
fn required_feature_present_is_satisfied() {
    let info = adapter(
        DeviceFeatures::LOGIC_OP | DeviceFeatures::SAMPLER_ANISOTROPY,
        roomy_limits(),
    );
    let required = DeviceRequirements {
        features: DeviceFeatures::LOGIC_OP,
        ..Default::default()
    };
    assert!(info.satisfies(&required));
}

#[test]
fn required_feature_missing_is_not_satisfied() {
    let info = adapter(DeviceFeatures::LOGIC_OP, roomy_limits());
    let required = DeviceRequirements {
        features: DeviceFeatures::GEOMETRY_SHADER,
        ..Default::default()
    };
    assert!(!info.satisfies(&required));
}

#[test]
fn all_required_features_must_be_present() {
    let info = adapter(
        DeviceFeatures::LOGIC_OP | DeviceFeatures::FILL_MODE_NON_SOLID,
        roomy_limits(),
    );
    let required = DeviceRequirements {
        features: DeviceFeatures::LOGIC_OP
            | DeviceFeatures::FILL_MODE_NON_SOLID
            | DeviceFeatures::SAMPLER_ANISOTROPY,
        ..Default::default()
    };
    assert!(!info.satisfies(&required));
}

#[test]
fn limit_equal_to_requirement_is_satisfied() {
    let info = adapter(DeviceFeatures::empty(), roomy_limits());
    let required = DeviceRequirements {
        limits: DeviceLimits {
            max_image_dimension_2d: 8192,
            max_vertex_input_attributes: 16,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(info.satisfies(&required));
}

#[test]
fn limit_below_requirement_is_not_satisfied() {
    let info = adapter(
        DeviceFeatures::empty(),
        DeviceLimits {
            max_image_dimension_2d: 1024,
            ..Default::default()
        },
    );
    let required = DeviceRequirements {
        limits: DeviceLimits {
            max_image_dimension_2d: 2048,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(!info.satisfies(&required));
}

// ============================================================================
// Vendor and kind names
// ============================================================================

#[test]
fn known_vendor_ids_map_to_names() {
    assert_eq!(vendor_name(0x1002), "AMD");
    assert_eq!(vendor_name(0x1010), "ImgTec");
    assert_eq!(vendor_name(0x10DE), "NVIDIA");
    assert_eq!(vendor_name(0x13B5), "ARM");
    assert_eq!(vendor_name(0x5143), "Qualcomm");
    assert_eq!(vendor_name(0x8086), "Intel");
}

#[test]
fn unknown_vendor_id_maps_to_placeholder() {
    assert_eq!(vendor_name(0xDEAD), "VENDOR_UNKNOWN");
}

#[test]
fn adapter_vendor_uses_vendor_id() {
    let info = adapter(DeviceFeatures::empty(), DeviceLimits::default());
    assert_eq!(info.vendor(), "Intel");
}

#[test]
fn adapter_kind_names() {
    assert_eq!(AdapterKind::DiscreteGpu.as_str(), "DEVICE_TYPE_DISCRETE_GPU");
    assert_eq!(AdapterKind::Cpu.as_str(), "DEVICE_TYPE_CPU");
    assert_eq!(AdapterKind::Other.as_str(), "DEVICE_TYPE_OTHER");
}

// ============================================================================
// MockBackend contract
// ============================================================================

#[test]
fn mock_backend_requires_instance_before_enumeration() {
    let backend = MockBackend::new();
    assert!(backend.enumerate_adapters().is_err());
}

#[test]
fn mock_backend_enumerates_after_instance_creation() {
    let mut backend = MockBackend::new();
    backend.create_instance(&InstanceDesc::default()).unwrap();
    let adapters = backend.enumerate_adapters().unwrap();
    assert_eq!(adapters.len(), 2);
    assert_eq!(adapters[0].kind, AdapterKind::DiscreteGpu);
}

#[test]
fn mock_backend_rejects_double_instance_creation() {
    let mut backend = MockBackend::new();
    backend.create_instance(&InstanceDesc::default()).unwrap();
    assert!(backend.create_instance(&InstanceDesc::default()).is_err());
}

#[test]
fn discrete_mock_adapter_satisfies_typical_requirements() {
    let mut backend = MockBackend::new();
    backend.create_instance(&InstanceDesc::default()).unwrap();
    let adapters = backend.enumerate_adapters().unwrap();

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

    assert!(adapters[0].satisfies(&required));
    assert!(!adapters[1].satisfies(&required));
}
