use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{
    Deserialize,
    Serialize
};

use crate::momentumerror::MomentumError;

// ─────────────────────────────────────────────────────────────────────────────
// OvershootSettings
// ─────────────────────────────────────────────────────────────────────────────

/// Overshoot 對話框的參數。
///
/// - `timing`：一次擺盪的長度（以 frame 為單位，至少 1）
/// - `decay`：衰減旋鈕，範圍 [0, 1]；實際使用 `decay^3`
/// - `amplitude`：估計速度的縮放倍數
/// - `overwrite_keyframes`：遇到既有 keyframe 時覆寫（true）或停止烘焙（false）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvershootSettings {
    pub timing: u32,
    pub decay: f64,
    pub amplitude: f64,
    pub overwrite_keyframes: bool,
}

impl Default for OvershootSettings {
    fn default() -> Self {
        OvershootSettings {
            timing: 5,
            decay: 0.5,
            amplitude: 1.0,
            overwrite_keyframes: true,
        }
    }
}

impl OvershootSettings {
    pub fn validate(&self) -> Result<(), MomentumError> {
        if self.timing < 1 {
            return Err(MomentumError::invalid_setting("timing", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.decay) {
            return Err(MomentumError::invalid_setting("decay", format!("{} is outside [0, 1]", self.decay)));
        }
        if !self.amplitude.is_finite() {
            return Err(MomentumError::invalid_setting("amplitude", "must be finite"));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EstimatorSettings
// ─────────────────────────────────────────────────────────────────────────────

/// 速度估計的參數。
///
/// `fallback` 同時是「近乎水平」的門檻：中位斜率絕對值不超過它時，
/// 估計值固定回傳 1。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorSettings {
    pub num_samples: usize,
    pub std_threshold: f64,
    pub fallback: f64,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        EstimatorSettings {
            num_samples: 3,
            std_threshold: 0.1,
            fallback: 1e-3,
        }
    }
}

impl EstimatorSettings {
    pub fn validate(&self) -> Result<(), MomentumError> {
        if self.num_samples < 1 {
            return Err(MomentumError::invalid_setting("num_samples", "must be at least 1"));
        }
        if self.std_threshold.is_nan() || self.std_threshold < 0.0 {
            return Err(MomentumError::invalid_setting("std_threshold", "must be non-negative"));
        }
        if self.fallback.is_nan() || self.fallback < 0.0 {
            return Err(MomentumError::invalid_setting("fallback", "must be non-negative"));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub overshoot: OvershootSettings,
    pub estimator: EstimatorSettings,
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration::default()
    }

    /// 由 JSON 檔讀入設定；缺少的欄位使用預設值。
    pub fn from_reader(file_path: impl AsRef<Path>) -> Result<Configuration, MomentumError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration: Configuration = serde_json::from_reader(reader)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn from_json(json_value: serde_json::Value) -> Result<Configuration, MomentumError> {
        let configuration: Configuration = serde_json::from_value(json_value)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn validate(&self) -> Result<(), MomentumError> {
        self.overshoot.validate()?;
        self.estimator.validate()
    }
}
