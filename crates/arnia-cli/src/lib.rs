use arnia_core::{UploadContext, UploaderConfig};
use chrono::Local;

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Prefill an upload context from config defaults and CLI overrides.
pub fn build_context(
    config: &UploaderConfig,
    arnia_id: Option<String>,
    scale: Option<f64>,
    days: u32,
    tipo: arnia_core::MeasurementType,
) -> UploadContext {
    UploadContext {
        arnia_id: arnia_id.or_else(|| config.default_arnia_id.clone()),
        scale_factor: scale.unwrap_or(config.default_scale),
        days_of_stay: days,
        measurement_type: tipo,
        captured_at: Local::now().fixed_offset(),
    }
}
