/// Mock render backend for unit tests (no GPU required)

use crate::error::{Error, Result};
use crate::renderer::{
    AdapterInfo, AdapterKind, DeviceFeatures, DeviceLimits, InstanceDesc, RenderBackend,
};

/// In-memory backend reporting two canned adapters
pub struct MockBackend {
    instance_created: bool,
    adapters: Vec<AdapterInfo>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            instance_created: false,
            adapters: vec![
                AdapterInfo {
                    name: "Mock Discrete GPU".to_string(),
                    vendor_id: 0x10DE,
                    kind: AdapterKind::DiscreteGpu,
                    api_version: (1, 3, 0),
                    driver_version: 1,
                    features: DeviceFeatures::all(),
                    limits: DeviceLimits {
                        max_image_dimension_2d: 16384,
                        max_vertex_input_attributes: 32,
                        max_framebuffer_width: 16384,
                        max_framebuffer_height: 16384,
                    },
                },
                AdapterInfo {
                    name: "Mock Software Rasterizer".to_string(),
                    vendor_id: 0,
                    kind: AdapterKind::Cpu,
                    api_version: (1, 1, 0),
                    driver_version: 1,
                    features: DeviceFeatures::LOGIC_OP,
                    limits: DeviceLimits {
                        max_image_dimension_2d: 2048,
                        max_vertex_input_attributes: 8,
                        max_framebuffer_width: 2048,
                        max_framebuffer_height: 2048,
                    },
                },
            ],
        }
    }

    pub fn instance_created(&self) -> bool {
        self.instance_created
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for MockBackend {
    fn create_instance(&mut self, _desc: &InstanceDesc) -> Result<()> {
        if self.instance_created {
            return Err(Error::BackendError("instance already created".to_string()));
        }
        self.instance_created = true;
        Ok(())
    }

    fn enumerate_adapters(&self) -> Result<Vec<AdapterInfo>> {
        if !self.instance_created {
            return Err(Error::BackendError("instance not created".to_string()));
        }
        Ok(self.adapters.clone())
    }
}
