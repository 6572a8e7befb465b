use crate::error::AppError;
use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of how the debris on the monitoring tray accumulated.
///
/// `as_str()` yields the exact literal the backend expects in `tipo_misura`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementType {
    /// Natural mite fall.
    #[default]
    CadutaNaturale,
    /// Fall induced by a treatment.
    Trattamento,
}

impl MeasurementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementType::CadutaNaturale => "CadutaNaturale",
            MeasurementType::Trattamento => "Trattamento",
        }
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cadutanaturale" => Ok(MeasurementType::CadutaNaturale),
            "trattamento" => Ok(MeasurementType::Trattamento),
            other => Err(AppError::InvalidInput(format!(
                "Unknown measurement type: {} (allowed: CadutaNaturale, Trattamento)",
                other
            ))),
        }
    }
}

/// Metadata accompanying one photo submission.
///
/// Built by the invoking screen/session from the settings provider before
/// each capture; defaults match the backend's expectations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadContext {
    /// Business key of the selected hive. Empty values are normalized to
    /// `None`; absence is tolerated but yields an incomplete record
    /// server-side.
    pub arnia_id: Option<String>,
    /// Multiplier applied server-side to counted debris. Must be positive.
    pub scale_factor: f64,
    /// Days the monitoring tray stayed in place before the photo.
    pub days_of_stay: u32,
    pub measurement_type: MeasurementType,
    /// Capture instant, carrying the device's local offset so the
    /// wall-clock form fields stay stable wherever the form is built.
    pub captured_at: DateTime<FixedOffset>,
}

impl Default for UploadContext {
    fn default() -> Self {
        Self {
            arnia_id: None,
            scale_factor: 1.0,
            days_of_stay: 0,
            measurement_type: MeasurementType::default(),
            captured_at: Local::now().fixed_offset(),
        }
    }
}

impl UploadContext {
    /// Enforce the context invariants, normalizing a blank hive id to `None`.
    pub fn validate(mut self) -> Result<Self, AppError> {
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(AppError::InvalidInput(format!(
                "Scale factor must be a positive finite number, got {}",
                self.scale_factor
            )));
        }
        if let Some(id) = &self.arnia_id {
            if id.trim().is_empty() {
                self.arnia_id = None;
            }
        }
        Ok(self)
    }
}
