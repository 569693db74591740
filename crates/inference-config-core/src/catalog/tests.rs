//! Tests for the device catalog and selection.

use super::*;
use crate::params::create_default_context_init_params;
use crate::probe::DeviceKind;
use crate::stubs::StaticCapabilityProbe;

fn ids(options: &[DeviceOption]) -> Vec<DeviceOptionId> {
    options.iter().map(|o| o.id).collect()
}

fn snapdragon_probe() -> StaticCapabilityProbe {
    StaticCapabilityProbe::new(vec![
        DeviceInfo::new("CPU", DeviceKind::Cpu),
        DeviceInfo::new("GPUOpenCL", DeviceKind::Gpu),
        DeviceInfo::new("HTP0", DeviceKind::Npu),
        DeviceInfo::new("HTP1", DeviceKind::Npu),
    ])
}

#[tokio::test]
async fn test_ios_has_three_fixed_options() {
    let probe = StaticCapabilityProbe::failing("not consulted on ios");
    let options = get_device_options(Platform::Ios, &probe).await;
    assert_eq!(
        ids(&options),
        vec![DeviceOptionId::Auto, DeviceOptionId::Gpu, DeviceOptionId::Cpu]
    );

    let auto = &options[0];
    assert!(auto.devices.is_none());
    assert_eq!(auto.n_gpu_layers, 99);
    assert_eq!(auto.default_flash_attn_type(), FlashAttnType::Auto);
    assert_eq!(auto.valid_flash_attn_types(), FlashAttnType::ALL.as_slice());

    let gpu = &options[1];
    assert_eq!(gpu.devices, Some(vec!["Metal".to_string()]));
    assert_eq!(gpu.n_gpu_layers, 99);

    let cpu = &options[2];
    assert_eq!(cpu.devices, Some(vec!["CPU".to_string()]));
    assert_eq!(cpu.n_gpu_layers, 0);
    assert_eq!(cpu.default_flash_attn_type(), FlashAttnType::Auto);
    assert_eq!(cpu.valid_flash_attn_types().len(), 3);

    assert!(options.iter().all(|o| o.platform == Platform::Ios));
}

#[tokio::test]
async fn test_android_cpu_only() {
    let options = get_device_options(Platform::Android, &StaticCapabilityProbe::cpu_only()).await;
    assert_eq!(ids(&options), vec![DeviceOptionId::Cpu]);

    let cpu = &options[0];
    assert_eq!(cpu.n_gpu_layers, 0);
    assert_eq!(cpu.default_flash_attn_type(), FlashAttnType::Off);
    assert_eq!(cpu.valid_flash_attn_types().len(), 3);
    assert!(cpu.recommended);
}

#[tokio::test]
async fn test_android_full_soc() {
    let options = get_device_options(Platform::Android, &snapdragon_probe()).await;
    assert_eq!(
        ids(&options),
        vec![DeviceOptionId::Cpu, DeviceOptionId::Gpu, DeviceOptionId::Hexagon]
    );

    let gpu = &options[1];
    assert_eq!(gpu.devices, Some(vec!["GPUOpenCL".to_string()]));
    assert_eq!(gpu.default_flash_attn_type(), FlashAttnType::Off);
    assert_eq!(gpu.valid_flash_attn_types(), &[FlashAttnType::Off]);

    let hexagon = &options[2];
    assert_eq!(
        hexagon.devices,
        Some(vec!["HTP0".to_string(), "HTP1".to_string()])
    );
    assert_eq!(hexagon.valid_flash_attn_types(), &[FlashAttnType::Off]);
}

#[tokio::test]
async fn test_android_never_offers_auto() {
    let options = get_device_options(Platform::Android, &snapdragon_probe()).await;
    assert!(options.iter().all(|o| o.id != DeviceOptionId::Auto));
}

#[tokio::test]
async fn test_android_hexagon_without_gpu() {
    let probe = StaticCapabilityProbe::new(vec![
        DeviceInfo::new("CPU", DeviceKind::Cpu),
        DeviceInfo::new("HTP0", DeviceKind::Npu),
    ]);
    let options = get_device_options(Platform::Android, &probe).await;
    assert_eq!(ids(&options), vec![DeviceOptionId::Cpu, DeviceOptionId::Hexagon]);
}

#[tokio::test]
async fn test_android_probe_failure_leaves_cpu() {
    let probe = StaticCapabilityProbe::failing("JNI not loaded");
    let options = get_device_options(Platform::Android, &probe).await;
    assert_eq!(ids(&options), vec![DeviceOptionId::Cpu]);
}

#[tokio::test]
async fn test_every_option_default_is_valid() {
    for platform in Platform::ALL {
        for option in get_device_options(platform, &snapdragon_probe()).await {
            assert!(!option.valid_flash_attn_types().is_empty());
            assert!(option.supports_flash_attn(option.default_flash_attn_type()));
        }
    }
}

#[test]
fn test_recommended_option() {
    let ios = ios_device_options();
    assert_eq!(recommended_device_option(&ios).map(|o| o.id), Some(DeviceOptionId::Auto));

    let android = android_device_options(&[]);
    assert_eq!(recommended_device_option(&android).map(|o| o.id), Some(DeviceOptionId::Cpu));

    assert!(recommended_device_option(&[]).is_none());
}

#[test]
fn test_selecting_gpu_resets_auto_flash_attention() {
    let gpu = android_device_options(&[DeviceInfo::new("GPUOpenCL", DeviceKind::Gpu)])
        .into_iter()
        .find(|o| o.id == DeviceOptionId::Gpu)
        .unwrap();
    let params = create_default_context_init_params(Platform::Android)
        .with_flash_attn_type(FlashAttnType::Auto);

    let selected = apply_device_selection(&params, &gpu);
    assert_eq!(selected.flash_attn_type, FlashAttnType::Off);
    assert_eq!(selected.devices, Some(vec!["GPUOpenCL".to_string()]));
    assert_eq!(selected.n_gpu_layers, 99);
    // Input value is not modified.
    assert_eq!(params.flash_attn_type, FlashAttnType::Auto);
}

#[test]
fn test_selection_preserves_valid_preference() {
    let cpu = ios_device_options()
        .into_iter()
        .find(|o| o.id == DeviceOptionId::Cpu)
        .unwrap();
    let params = create_default_context_init_params(Platform::Ios)
        .with_flash_attn_type(FlashAttnType::On);

    let selected = apply_device_selection(&params, &cpu);
    assert_eq!(selected.flash_attn_type, FlashAttnType::On);
    assert_eq!(selected.n_gpu_layers, 0);
    assert_eq!(selected.devices, Some(vec!["CPU".to_string()]));
}

#[test]
fn test_reconcile_flash_attn() {
    let android = android_device_options(&[
        DeviceInfo::new("GPUOpenCL", DeviceKind::Gpu),
        DeviceInfo::new("HTP0", DeviceKind::Npu),
    ]);
    for option in &android {
        for mode in FlashAttnType::ALL {
            let reconciled = reconcile_flash_attn(mode, option);
            assert!(option.supports_flash_attn(reconciled));
            if option.supports_flash_attn(mode) {
                assert_eq!(reconciled, mode);
            } else {
                assert_eq!(reconciled, option.default_flash_attn_type());
            }
        }
    }
}
