//! Current-schema context initialization parameters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{CacheType, FlashAttnType, UseMmap};

/// Parameters handed to the inference engine when a context is created.
///
/// This is the only shape the engine consumes. Values are immutable
/// snapshots: every settings change builds a new value through the
/// `with_*` methods or the selection helpers rather than mutating in place.
///
/// # Example
///
/// ```
/// use inference_config_core::params::create_default_context_init_params;
/// use inference_config_core::types::{CacheType, Platform};
///
/// let params = create_default_context_init_params(Platform::Android)
///     .with_cache_types(CacheType::Q8_0, CacheType::F16);
/// assert_eq!(params.cache_type_k, CacheType::Q8_0);
/// assert_eq!(params.version, "2.0");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextInitParams {
    /// Schema version tag.
    pub version: String,

    pub n_ctx: u32,
    pub n_batch: u32,
    pub n_ubatch: u32,
    pub n_threads: u32,

    pub cache_type_k: CacheType,
    pub cache_type_v: CacheType,

    /// Layers offloaded to the accelerator. 0 keeps everything on the CPU.
    pub n_gpu_layers: u32,

    pub use_mlock: bool,
    pub use_mmap: UseMmap,

    /// Explicit device identifiers. `None` lets the engine auto-select.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<String>>,

    pub flash_attn_type: FlashAttnType,
    pub kv_unified: bool,
    pub n_parallel: u32,

    /// Deprecated since 2.0, superseded by `devices` / `n_gpu_layers`.
    /// Retained so older builds reading the same blob keep working.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_gpu_devices: Option<bool>,

    /// Deprecated since 2.0, superseded by `flash_attn_type`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flash_attn: Option<bool>,

    /// Fields this schema does not know about, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContextInitParams {
    #[must_use]
    pub fn with_cache_types(mut self, k: CacheType, v: CacheType) -> Self {
        self.cache_type_k = k;
        self.cache_type_v = v;
        self
    }

    #[must_use]
    pub fn with_flash_attn_type(mut self, flash_attn_type: FlashAttnType) -> Self {
        self.flash_attn_type = flash_attn_type;
        self
    }

    #[must_use]
    pub fn with_devices(mut self, devices: Option<Vec<String>>, n_gpu_layers: u32) -> Self {
        self.devices = devices;
        self.n_gpu_layers = n_gpu_layers;
        self
    }

    #[must_use]
    pub fn with_n_ctx(mut self, n_ctx: u32) -> Self {
        self.n_ctx = n_ctx;
        self
    }

    /// True when the engine is left to pick devices itself.
    pub fn is_auto_device(&self) -> bool {
        self.devices.as_ref().map_or(true, |d| d.is_empty())
    }

    /// Serialize to the JSON value the storage collaborator persists.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Caller overrides for [`create_context_init_params`].
///
/// Every field is optional; absent fields take their documented default.
/// `use_mmap` also accepts the boolean form older callers pass.
///
/// [`create_context_init_params`]: crate::params::create_context_init_params
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialContextInitParams {
    #[serde(default)]
    pub n_ctx: Option<u32>,
    #[serde(default)]
    pub n_batch: Option<u32>,
    #[serde(default)]
    pub n_ubatch: Option<u32>,
    #[serde(default)]
    pub n_threads: Option<u32>,
    #[serde(default)]
    pub cache_type_k: Option<CacheType>,
    #[serde(default)]
    pub cache_type_v: Option<CacheType>,
    #[serde(default)]
    pub n_gpu_layers: Option<u32>,
    #[serde(default)]
    pub use_mlock: Option<bool>,
    #[serde(default)]
    pub use_mmap: Option<super::LegacyUseMmap>,
    #[serde(default)]
    pub devices: Option<Vec<String>>,
    #[serde(default)]
    pub flash_attn_type: Option<FlashAttnType>,
    #[serde(default)]
    pub kv_unified: Option<bool>,
    #[serde(default)]
    pub n_parallel: Option<u32>,
    #[serde(default)]
    pub no_gpu_devices: Option<bool>,
    #[serde(default)]
    pub flash_attn: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
