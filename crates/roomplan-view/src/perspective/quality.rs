//! Render quality tier detection.
//!
//! Device capabilities map through a pure function to a quality tier and
//! its render settings. Consumed by the perspective renderer only; tier
//! selection never leaks into the scene data model.

use serde::{Deserialize, Serialize};

/// What the embedding reports about the device's GPU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceCapabilities {
    /// Renderer string as reported by the graphics API.
    pub renderer_name: String,
    /// Approximate GPU memory in megabytes (0 when unknown).
    pub gpu_memory_mb: u32,
    /// Largest supported texture dimension.
    pub max_texture_size: u32,
    /// Whether the GPU is discrete (vs integrated/software).
    pub discrete_gpu: bool,
}

/// Coarse render quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    Medium,
    High,
}

/// Render settings derived from a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualitySettings {
    pub shadows: bool,
    pub msaa_samples: u32,
    pub texture_size_limit: u32,
    pub anisotropy: u32,
}

impl QualitySettings {
    pub fn for_tier(tier: QualityTier) -> Self {
        match tier {
            QualityTier::Low => Self {
                shadows: false,
                msaa_samples: 0,
                texture_size_limit: 1024,
                anisotropy: 1,
            },
            QualityTier::Medium => Self {
                shadows: true,
                msaa_samples: 2,
                texture_size_limit: 2048,
                anisotropy: 4,
            },
            QualityTier::High => Self {
                shadows: true,
                msaa_samples: 4,
                texture_size_limit: 4096,
                anisotropy: 16,
            },
        }
    }
}

/// Renderer strings that indicate software rasterization.
const SOFTWARE_RENDERERS: [&str; 4] = ["swiftshader", "llvmpipe", "software", "microsoft basic"];

/// Picks a quality tier from reported device capabilities.
pub fn detect_tier(caps: &DeviceCapabilities) -> QualityTier {
    let name = caps.renderer_name.to_lowercase();
    let software = SOFTWARE_RENDERERS.iter().any(|tag| name.contains(tag));

    if software || caps.max_texture_size < 4096 || (caps.gpu_memory_mb > 0 && caps.gpu_memory_mb < 1024)
    {
        return QualityTier::Low;
    }
    if caps.discrete_gpu && caps.gpu_memory_mb >= 4096 && caps.max_texture_size >= 8192 {
        return QualityTier::High;
    }
    QualityTier::Medium
}
