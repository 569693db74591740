//! Centralized constants for context initialization parameters.
//!
//! Schema version tags, field defaults, and the human-readable reasons
//! attached to disabled cache-type options all live here so that the
//! migrator, the factory, and the rule engine agree on one set of values.

/// Schema version tags for persisted `ContextInitParams`.
pub mod schema {
    /// Tag assumed when a blob carries no (or an empty) `version` field.
    pub const UNVERSIONED: &str = "0.0";

    /// First versioned shape: `n_ctx` rename, mmap/mlock defaults.
    pub const V1_0: &str = "1.0";

    /// Device model (`devices` + `n_gpu_layers`), `flash_attn_type`,
    /// `kv_unified`, `n_parallel`.
    pub const V2_0: &str = "2.0";

    /// Version stamped on every value this crate produces.
    pub const CURRENT: &str = V2_0;
}

/// Defaults used by the factory and by the migration steps.
pub mod defaults {
    /// Context window for fresh configurations.
    pub const N_CTX: u32 = 2048;

    /// Context window shipped by pre-2.0 releases; bumped once to [`N_CTX`].
    pub const LEGACY_N_CTX: u32 = 1024;

    pub const N_BATCH: u32 = 512;
    pub const N_UBATCH: u32 = 512;
    pub const N_THREADS: u32 = 4;

    /// Offload every layer. Backends clamp to the model's layer count.
    pub const N_GPU_LAYERS_ALL: u32 = 99;

    pub const N_GPU_LAYERS_NONE: u32 = 0;

    pub const N_PARALLEL: u32 = 1;
    pub const KV_UNIFIED: bool = true;
    pub const USE_MLOCK: bool = false;
}

/// Device identifiers understood by the inference engine.
pub mod devices {
    pub const METAL: &str = "Metal";
    pub const CPU: &str = "CPU";

    /// Prefix of Qualcomm Hexagon NPU device names (`HTP0`, `HTP1`, ...).
    pub const HEXAGON_PREFIX: &str = "HTP";
}

/// Reasons attached to unsafe V-cache combinations.
pub mod reasons {
    pub const V_CACHE_REQUIRES_FLASH_ATTN: &str = "quantized V cache requires flash attention";
    pub const OPENCL_NO_FLASH_ATTN: &str = "OpenCL does not support flash attention";
    pub const OPENCL_AUTO_DISABLES_FLASH_ATTN: &str = "OpenCL auto-disables flash attention";
    pub const HEXAGON_FLASH_ATTN_VARIES: &str =
        "Hexagon flash attention support varies by device";
}
