/// RenderBackend trait - instance creation and adapter enumeration
///
/// The engine treats rendering as an external collaborator: create an
/// instance, list the adapters, check whether an adapter satisfies the
/// features and limits the renderer will need. Everything past that point
/// (surfaces, swapchains, presentation) is owned by the backend crate.

use bitflags::bitflags;

use crate::error::Result;

bitflags! {
    /// Device features a renderer may require from an adapter
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct DeviceFeatures: u32 {
        const IMAGE_CUBE_ARRAY     = 1 << 0;
        const GEOMETRY_SHADER      = 1 << 1;
        const TESSELLATION_SHADER  = 1 << 2;
        const SAMPLE_RATE_SHADING  = 1 << 3;
        const DUAL_SRC_BLEND       = 1 << 4;
        const LOGIC_OP             = 1 << 5;
        const FILL_MODE_NON_SOLID  = 1 << 6;
        const SAMPLER_ANISOTROPY   = 1 << 7;
        const WIDE_LINES           = 1 << 8;
        const LARGE_POINTS         = 1 << 9;
        const MULTI_VIEWPORT       = 1 << 10;
        const DEPTH_CLAMP          = 1 << 11;
        const SHADER_FLOAT64       = 1 << 12;
        const SHADER_INT64         = 1 << 13;
    }
}

impl Default for DeviceFeatures {
    /// No required features
    fn default() -> Self {
        DeviceFeatures::empty()
    }
}

/// Device limits a renderer may require from an adapter
///
/// A zero field means "no requirement", mirroring how required limits are
/// usually left defaulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceLimits {
    pub max_image_dimension_2d: u32,
    pub max_vertex_input_attributes: u32,
    pub max_framebuffer_width: u32,
    pub max_framebuffer_height: u32,
}

/// Combined feature + limit requirements for adapter selection
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceRequirements {
    pub features: DeviceFeatures,
    pub limits: DeviceLimits,
}

/// Adapter classification, matching the usual physical device types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    Other,
    IntegratedGpu,
    DiscreteGpu,
    VirtualGpu,
    Cpu,
}

impl AdapterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterKind::Other => "DEVICE_TYPE_OTHER",
            AdapterKind::IntegratedGpu => "DEVICE_TYPE_INTEGRATED_GPU",
            AdapterKind::DiscreteGpu => "DEVICE_TYPE_DISCRETE_GPU",
            AdapterKind::VirtualGpu => "DEVICE_TYPE_VIRTUAL_GPU",
            AdapterKind::Cpu => "DEVICE_TYPE_CPU",
        }
    }
}

/// Map a PCI vendor id to a display name
pub fn vendor_name(vendor_id: u32) -> &'static str {
    match vendor_id {
        0x1002 => "AMD",
        0x1010 => "ImgTec",
        0x10DE => "NVIDIA",
        0x13B5 => "ARM",
        0x5143 => "Qualcomm",
        0x8086 => "Intel",
        _ => "VENDOR_UNKNOWN",
    }
}

/// Properties of one enumerated adapter (physical device)
#[derive(Debug, Clone)]
pub struct AdapterInfo {
    pub name: String,
    pub vendor_id: u32,
    pub kind: AdapterKind,
    /// (major, minor, patch) of the supported graphics API version
    pub api_version: (u32, u32, u32),
    pub driver_version: u32,
    pub features: DeviceFeatures,
    pub limits: DeviceLimits,
}

impl AdapterInfo {
    /// Display name for the adapter's vendor
    pub fn vendor(&self) -> &'static str {
        vendor_name(self.vendor_id)
    }

    /// Whether this adapter satisfies the given requirements
    ///
    /// A required feature is satisfied when the adapter reports it; a
    /// required limit is satisfied when the adapter's value is at least the
    /// required one (zero requirements always pass).
    pub fn satisfies(&self, required: &DeviceRequirements) -> bool {
        self.features.contains(required.features)
            && self.limits.max_image_dimension_2d >= required.limits.max_image_dimension_2d
            && self.limits.max_vertex_input_attributes >= required.limits.max_vertex_input_attributes
            && self.limits.max_framebuffer_width >= required.limits.max_framebuffer_width
            && self.limits.max_framebuffer_height >= required.limits.max_framebuffer_height
    }
}

/// Instance creation parameters
#[derive(Debug, Clone)]
pub struct InstanceDesc {
    /// Application name reported to the backend
    pub app_name: String,
    /// Extensions the host needs (e.g. surface extensions for its window)
    pub required_extensions: Vec<String>,
    /// Enable validation/debug layers
    pub enable_validation: bool,
}

impl Default for InstanceDesc {
    fn default() -> Self {
        Self {
            app_name: "Meteor Application".to_string(),
            required_extensions: Vec::new(),
            enable_validation: cfg!(debug_assertions),
        }
    }
}

// ============================================================================
// RenderBackend trait
// ============================================================================

/// Opaque rendering backend
///
/// Implemented by backend crates; registered as a singleton through
/// [`Engine::create_backend`](crate::meteor::Engine::create_backend).
pub trait RenderBackend: Send + Sync {
    /// Create the backend instance
    ///
    /// # Errors
    ///
    /// Fails if the API is unavailable on this machine or an instance
    /// already exists.
    fn create_instance(&mut self, desc: &InstanceDesc) -> Result<()>;

    /// Enumerate the adapters visible to the created instance
    ///
    /// # Errors
    ///
    /// Fails if no instance was created or no adapter is present.
    fn enumerate_adapters(&self) -> Result<Vec<AdapterInfo>>;
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
