//! Stub implementations for testing and for hosts without native probes.

mod static_probe;

pub use static_probe::StaticCapabilityProbe;
