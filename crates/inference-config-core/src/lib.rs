//! Inference Config Core Library
//!
//! Keeps the parameters used to create an on-device LLM inference context
//! valid across app releases and hardware.
//!
//! # Architecture
//!
//! This crate defines:
//! - Domain types (`ContextInitParams`, `CacheType`, `DeviceOption`, etc.)
//! - A version-chained schema migrator for persisted parameter blobs
//! - The KV-cache compatibility rules (cache type × flash attention × backend)
//! - Backend resolution and the per-platform device catalog
//! - The `CapabilityProbe` trait the host implements, plus a static stub
//! - Error types, configuration, and the `ConfigEngine` orchestrator
//!
//! # Example
//!
//! ```
//! use inference_config_core::compat::is_cache_type_v_safe;
//! use inference_config_core::migration::migrate_context_init_params;
//! use inference_config_core::types::{BackendType, CacheType, FlashAttnType, Platform};
//! use serde_json::json;
//!
//! let params = migrate_context_init_params(
//!     &json!({ "n_context": 1024, "no_gpu_devices": true }),
//!     Platform::Android,
//! );
//! assert_eq!(params.n_ctx, 2048);
//! assert_eq!(params.n_gpu_layers, 0);
//!
//! let verdict = is_cache_type_v_safe(CacheType::Q8_0, FlashAttnType::Auto, BackendType::OpenCl);
//! assert!(!verdict.safe);
//! ```

pub mod catalog;
pub mod compat;
pub mod config;
pub mod engine;
pub mod error;
pub mod migration;
pub mod params;
pub mod probe;
pub mod resolver;
pub mod stubs;
pub mod types;

// Re-exports for convenience
pub use config::EngineConfig;
pub use engine::{CacheTypeOptions, ConfigEngine, SelectionOutcome};
pub use error::{EngineError, EngineResult};
pub use probe::CapabilityProbe;
pub use types::{BackendType, CacheType, ContextInitParams, FlashAttnType, Platform};
