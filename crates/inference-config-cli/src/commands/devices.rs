//! `devices` command
//!
//! Lists the device options a settings screen offers on the configured
//! platform, with the flash-attention modes each one allows, and the
//! hardware's GPU support answer.

use clap::Args;
use serde::Serialize;
use tracing::debug;

use inference_config_core::probe::GpuSupport;
use inference_config_core::types::DeviceOption;
use inference_config_core::Platform;

use super::{build_engine, print_json, GlobalOptions, OutputFormat};
use crate::error::{report, CliError, CliExitCode};

/// Arguments for the `devices` command
#[derive(Args, Debug)]
pub struct DevicesArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// JSON response for the devices command
#[derive(Debug, Serialize)]
pub struct DevicesResponse {
    pub platform: Platform,
    pub gpu_support: GpuSupport,
    pub options: Vec<DeviceOption>,
}

/// Execute the devices command
pub async fn devices_command(args: DevicesArgs, global: &GlobalOptions) -> i32 {
    debug!("devices_command: args={:?}", args);
    match run(&args, global).await {
        Ok(()) => CliExitCode::Success.into(),
        Err(e) => report(&e),
    }
}

async fn run(args: &DevicesArgs, global: &GlobalOptions) -> Result<(), CliError> {
    let engine = build_engine(global)?;
    let options = engine.device_options().await;
    let gpu_support = engine.gpu_support().await;

    if args.format == OutputFormat::Json {
        return print_json(&DevicesResponse {
            platform: engine.platform(),
            gpu_support,
            options,
        });
    }

    match (gpu_support.is_supported, gpu_support.reason) {
        (true, _) => println!("GPU support: yes"),
        (false, Some(reason)) => println!("GPU support: no ({})", reason),
        (false, None) => println!("GPU support: no"),
    }
    println!("Device options ({}):", engine.platform());
    for option in &options {
        let devices = option
            .devices
            .as_ref()
            .map(|d| d.join(", "))
            .unwrap_or_else(|| "auto".to_string());
        let modes: Vec<&str> = option
            .valid_flash_attn_types()
            .iter()
            .map(|m| m.as_str())
            .collect();
        println!(
            "  {:<8} {:<14} devices=[{}] n_gpu_layers={} flash_attn={} (default {}){}",
            option.id.as_str(),
            option.label,
            devices,
            option.n_gpu_layers,
            modes.join("|"),
            option.default_flash_attn_type(),
            if option.recommended { "  *recommended" } else { "" }
        );
    }
    Ok(())
}
