//! Domain types shared by the migrator, rule engine, and device catalog.

mod backend;
mod cache_type;
mod device_option;
mod flash_attn;
mod mmap;
mod params;
mod platform;


pub use backend::BackendType;
pub use cache_type::CacheType;
pub use device_option::{DeviceOption, DeviceOptionId};
pub use flash_attn::FlashAttnType;
pub use mmap::{LegacyUseMmap, UseMmap};
pub use params::{ContextInitParams, PartialContextInitParams};
pub use platform::Platform;
