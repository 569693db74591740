//! Settings-flow orchestration.
//!
//! `ConfigEngine` ties the pieces together for one platform and one
//! capability probe:
//!
//! 1. [`load`](ConfigEngine::load) a persisted blob through the migrator
//! 2. list [`device_options`](ConfigEngine::device_options) and
//!    [`select_device`](ConfigEngine::select_device)
//! 3. change [`set_flash_attn`](ConfigEngine::set_flash_attn) or cache types,
//!    reading [`cache_type_options`](ConfigEngine::cache_type_options) for
//!    the UI
//! 4. [`finalize`](ConfigEngine::finalize) before the parameters reach the
//!    inference engine
//!
//! Every step returns a new [`ContextInitParams`]; nothing is mutated in
//! place. The engine holds no state besides the probe, so one instance can
//! serve concurrent callers.


use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::catalog::{apply_device_selection, get_device_options, recommended_device_option};
use crate::compat::{
    enforce_cache_compatibility, get_allowed_cache_type_k_options,
    get_allowed_cache_type_v_options, CacheTypeOption,
};
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::migration::migrate_context_init_params;
use crate::params::create_default_context_init_params;
use crate::probe::{gpu_support_or_unsupported, CapabilityProbe, GpuSupport};
use crate::resolver::infer_backend_type;
use crate::types::{BackendType, ContextInitParams, DeviceOption, FlashAttnType, Platform};

/// Cache-type options for both caches under the current settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheTypeOptions {
    pub backend: BackendType,
    pub k: Vec<CacheTypeOption>,
    pub v: Vec<CacheTypeOption>,
}

/// Result of a device selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionOutcome {
    /// Parameters with the selection applied and the V cache made safe.
    pub params: ContextInitParams,
    /// Backend the selection runs on.
    pub backend: BackendType,
    /// Cache-type options to show for the new selection.
    pub cache_options: CacheTypeOptions,
}

/// Configuration engine for one platform.
pub struct ConfigEngine {
    probe: Arc<dyn CapabilityProbe>,
    platform: Platform,
}

impl ConfigEngine {
    pub fn new(probe: Arc<dyn CapabilityProbe>, platform: Platform) -> Self {
        Self { probe, platform }
    }

    /// Build from a validated [`EngineConfig`].
    ///
    /// # Errors
    /// Returns `EngineError::Config` if the configuration is invalid.
    pub fn from_config(config: &EngineConfig, probe: Arc<dyn CapabilityProbe>) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self::new(probe, config.platform))
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Parameters for first launch, with nothing persisted.
    pub fn defaults(&self) -> ContextInitParams {
        create_default_context_init_params(self.platform)
    }

    /// Migrate a persisted blob (or `None` when nothing was stored).
    pub fn load(&self, blob: Option<&Value>) -> ContextInitParams {
        match blob {
            Some(blob) => migrate_context_init_params(blob, self.platform),
            None => {
                debug!("No persisted context params, using defaults");
                self.defaults()
            }
        }
    }

    pub async fn device_options(&self) -> Vec<DeviceOption> {
        get_device_options(self.platform, self.probe.as_ref()).await
    }

    /// Whether the hardware can run GPU offload at all. A failed check reads
    /// as unsupported.
    pub async fn gpu_support(&self) -> GpuSupport {
        gpu_support_or_unsupported(self.probe.as_ref()).await
    }

    /// The option to preselect when the user has not picked one.
    pub async fn recommended_device(&self) -> Option<DeviceOption> {
        let options = self.device_options().await;
        recommended_device_option(&options).cloned()
    }

    /// Backend the given parameters would run on.
    pub async fn active_backend(&self, params: &ContextInitParams) -> BackendType {
        infer_backend_type(params.devices.as_deref(), self.platform, self.probe.as_ref()).await
    }

    pub async fn cache_type_options(&self, params: &ContextInitParams) -> CacheTypeOptions {
        let backend = self.active_backend(params).await;
        Self::options_for(params.flash_attn_type, backend)
    }

    /// Apply a device selection.
    ///
    /// Flash attention is reset if the option does not support the current
    /// mode, then the V cache is reset to `f16` if it became unsafe on the
    /// new backend.
    pub async fn select_device(
        &self,
        params: &ContextInitParams,
        option: &DeviceOption,
    ) -> SelectionOutcome {
        let selected = apply_device_selection(params, option);
        let backend = self.active_backend(&selected).await;
        let params = enforce_cache_compatibility(selected, backend);
        info!("Selected device option '{}' on backend {}", option.id, backend);
        SelectionOutcome {
            cache_options: Self::options_for(params.flash_attn_type, backend),
            params,
            backend,
        }
    }

    /// Change the flash-attention mode, resetting the V cache if the new
    /// mode makes it unsafe.
    pub async fn set_flash_attn(
        &self,
        params: &ContextInitParams,
        flash_attn_type: FlashAttnType,
    ) -> ContextInitParams {
        let updated = params.clone().with_flash_attn_type(flash_attn_type);
        let backend = self.active_backend(&updated).await;
        enforce_cache_compatibility(updated, backend)
    }

    /// Last check before the parameters are handed to the inference engine.
    pub async fn finalize(&self, params: ContextInitParams) -> ContextInitParams {
        let backend = self.active_backend(&params).await;
        enforce_cache_compatibility(params, backend)
    }

    fn options_for(flash_attn_type: FlashAttnType, backend: BackendType) -> CacheTypeOptions {
        CacheTypeOptions {
            backend,
            k: get_allowed_cache_type_k_options(flash_attn_type, backend),
            v: get_allowed_cache_type_v_options(flash_attn_type, backend),
        }
    }
}
