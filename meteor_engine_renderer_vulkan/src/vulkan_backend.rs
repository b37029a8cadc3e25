/// VulkanBackend - Vulkan implementation of the RenderBackend trait

use std::ffi::{c_char, CStr, CString};

use ash::vk;
use raw_window_handle::HasDisplayHandle;

use meteor_engine::meteor::{Error, Result};
use meteor_engine::renderer::{
    AdapterInfo, AdapterKind, DeviceFeatures, DeviceLimits, InstanceDesc, RenderBackend,
};
use meteor_engine::{meteor_error, meteor_info};

const ENGINE_NAME: &CStr = c"Meteor Engine";

/// Vulkan render backend
///
/// Owns the loaded Vulkan entry and the created instance; the instance is
/// destroyed on drop.
pub struct VulkanBackend {
    entry: Option<ash::Entry>,
    instance: Option<ash::Instance>,
}

impl VulkanBackend {
    pub fn new() -> Self {
        Self {
            entry: None,
            instance: None,
        }
    }
}

impl Default for VulkanBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for VulkanBackend {
    fn create_instance(&mut self, desc: &InstanceDesc) -> Result<()> {
        if self.instance.is_some() {
            return Err(Error::BackendError("instance already created".to_string()));
        }

        unsafe {
            let entry = ash::Entry::load().map_err(|e| {
                meteor_error!("meteor::vulkan", "Failed to load Vulkan library: {:?}", e);
                Error::BackendError(format!("Failed to load Vulkan library: {:?}", e))
            })?;

            let app_name = CString::new(desc.app_name.as_str()).map_err(|_| {
                Error::BackendError("application name contains a NUL byte".to_string())
            })?;
            let app_info = vk::ApplicationInfo::default()
                .application_name(&app_name)
                .application_version(vk::make_api_version(0, 1, 0, 0))
                .engine_name(ENGINE_NAME)
                .engine_version(vk::make_api_version(0, 0, 1, 0))
                .api_version(vk::API_VERSION_1_3);

            let mut extension_names: Vec<CString> = Vec::new();
            for extension in &desc.required_extensions {
                extension_names.push(CString::new(extension.as_str()).map_err(|_| {
                    Error::BackendError(format!("invalid extension name: {}", extension))
                })?);
            }
            if desc.enable_validation {
                extension_names.push(CString::from(ash::ext::debug_utils::NAME));
            }
            let extension_pointers: Vec<*const c_char> =
                extension_names.iter().map(|name| name.as_ptr()).collect();

            let layer_names: Vec<*const c_char> = if desc.enable_validation {
                vec![c"VK_LAYER_KHRONOS_validation".as_ptr()]
            } else {
                vec![]
            };

            let create_info = vk::InstanceCreateInfo::default()
                .application_info(&app_info)
                .enabled_layer_names(&layer_names)
                .enabled_extension_names(&extension_pointers);

            let instance = entry.create_instance(&create_info, None).map_err(|e| {
                meteor_error!("meteor::vulkan", "Failed to create Vulkan instance: {:?}", e);
                Error::BackendError(format!("Failed to create instance: {:?}", e))
            })?;

            meteor_info!(
                "meteor::vulkan",
                "Created Vulkan instance for \"{}\" ({} extensions)",
                desc.app_name,
                desc.required_extensions.len()
            );

            self.entry = Some(entry);
            self.instance = Some(instance);
            Ok(())
        }
    }

    fn enumerate_adapters(&self) -> Result<Vec<AdapterInfo>> {
        let instance = self.instance.as_ref().ok_or_else(|| {
            Error::BackendError("instance not created".to_string())
        })?;

        unsafe {
            let devices = instance.enumerate_physical_devices().map_err(|e| {
                meteor_error!("meteor::vulkan", "Failed to enumerate devices: {:?}", e);
                Error::BackendError(format!("Failed to enumerate devices: {:?}", e))
            })?;
            if devices.is_empty() {
                return Err(Error::BackendError(
                    "no Vulkan physical devices".to_string(),
                ));
            }

            Ok(devices
                .iter()
                .map(|&device| {
                    let properties = instance.get_physical_device_properties(device);
                    let features = instance.get_physical_device_features(device);
                    adapter_from_vk(&properties, &features)
                })
                .collect())
        }
    }
}

impl Drop for VulkanBackend {
    fn drop(&mut self) {
        if let Some(instance) = self.instance.take() {
            // SAFETY: no objects derived from this instance outlive the
            // backend; adapters are plain data snapshots.
            unsafe { instance.destroy_instance(None) };
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

fn bool32(value: vk::Bool32) -> bool {
    value == vk::TRUE
}

pub(crate) fn features_from_vk(features: &vk::PhysicalDeviceFeatures) -> DeviceFeatures {
    let mut mapped = DeviceFeatures::empty();
    if bool32(features.image_cube_array) {
        mapped |= DeviceFeatures::IMAGE_CUBE_ARRAY;
    }
    if bool32(features.geometry_shader) {
        mapped |= DeviceFeatures::GEOMETRY_SHADER;
    }
    if bool32(features.tessellation_shader) {
        mapped |= DeviceFeatures::TESSELLATION_SHADER;
    }
    if bool32(features.sample_rate_shading) {
        mapped |= DeviceFeatures::SAMPLE_RATE_SHADING;
    }
    if bool32(features.dual_src_blend) {
        mapped |= DeviceFeatures::DUAL_SRC_BLEND;
    }
    if bool32(features.logic_op) {
        mapped |= DeviceFeatures::LOGIC_OP;
    }
    if bool32(features.fill_mode_non_solid) {
        mapped |= DeviceFeatures::FILL_MODE_NON_SOLID;
    }
    if bool32(features.sampler_anisotropy) {
        mapped |= DeviceFeatures::SAMPLER_ANISOTROPY;
    }
    if bool32(features.wide_lines) {
        mapped |= DeviceFeatures::WIDE_LINES;
    }
    if bool32(features.large_points) {
        mapped |= DeviceFeatures::LARGE_POINTS;
    }
    if bool32(features.multi_viewport) {
        mapped |= DeviceFeatures::MULTI_VIEWPORT;
    }
    if bool32(features.depth_clamp) {
        mapped |= DeviceFeatures::DEPTH_CLAMP;
    }
    if bool32(features.shader_float64) {
        mapped |= DeviceFeatures::SHADER_FLOAT64;
    }
    if bool32(features.shader_int64) {
        mapped |= DeviceFeatures::SHADER_INT64;
    }
    mapped
}

pub(crate) fn kind_from_vk(device_type: vk::PhysicalDeviceType) -> AdapterKind {
    match device_type {
        vk::PhysicalDeviceType::INTEGRATED_GPU => AdapterKind::IntegratedGpu,
        vk::PhysicalDeviceType::DISCRETE_GPU => AdapterKind::DiscreteGpu,
        vk::PhysicalDeviceType::VIRTUAL_GPU => AdapterKind::VirtualGpu,
        vk::PhysicalDeviceType::CPU => AdapterKind::Cpu,
        _ => AdapterKind::Other,
    }
}

pub(crate) fn adapter_from_vk(
    properties: &vk::PhysicalDeviceProperties,
    features: &vk::PhysicalDeviceFeatures,
) -> AdapterInfo {
    // SAFETY: device_name is a NUL-terminated array filled by the driver.
    let name = unsafe { CStr::from_ptr(properties.device_name.as_ptr()) }
        .to_string_lossy()
        .into_owned();

    AdapterInfo {
        name,
        vendor_id: properties.vendor_id,
        kind: kind_from_vk(properties.device_type),
        api_version: (
            vk::api_version_major(properties.api_version),
            vk::api_version_minor(properties.api_version),
            vk::api_version_patch(properties.api_version),
        ),
        driver_version: properties.driver_version,
        features: features_from_vk(features),
        limits: DeviceLimits {
            max_image_dimension_2d: properties.limits.max_image_dimension2_d,
            max_vertex_input_attributes: properties.limits.max_vertex_input_attributes,
            max_framebuffer_width: properties.limits.max_framebuffer_width,
            max_framebuffer_height: properties.limits.max_framebuffer_height,
        },
    }
}

// ============================================================================
// Standalone queries
// ============================================================================

/// Names of the instance extensions supported on this machine
pub fn enumerate_instance_extensions() -> Result<Vec<String>> {
    unsafe {
        let entry = ash::Entry::load().map_err(|e| {
            Error::BackendError(format!("Failed to load Vulkan library: {:?}", e))
        })?;
        let extensions = entry
            .enumerate_instance_extension_properties(None)
            .map_err(|e| {
                Error::BackendError(format!("Failed to enumerate extensions: {:?}", e))
            })?;
        Ok(extensions
            .iter()
            .map(|extension| {
                CStr::from_ptr(extension.extension_name.as_ptr())
                    .to_string_lossy()
                    .into_owned()
            })
            .collect())
    }
}

/// Instance extensions a surface for the given display would require
pub fn required_window_extensions(window: &impl HasDisplayHandle) -> Result<Vec<String>> {
    let display_handle = window.display_handle().map_err(|e| {
        Error::BackendError(format!("Failed to get display handle: {}", e))
    })?;
    let extensions = ash_window::enumerate_required_extensions(display_handle.as_raw())
        .map_err(|e| {
            Error::BackendError(format!("Failed to get required extensions: {:?}", e))
        })?;
    Ok(extensions
        .iter()
        .map(|&pointer| {
            // SAFETY: ash-window returns NUL-terminated static strings.
            unsafe { CStr::from_ptr(pointer) }
                .to_string_lossy()
                .into_owned()
        })
        .collect())
}

#[cfg(test)]
#[path = "vulkan_backend_tests.rs"]
mod tests;
