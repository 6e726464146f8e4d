use crate::configuration::EstimatorSettings;
use crate::math::curve::curve::Curve;
use crate::math::statistics::{
    median,
    population_std_dev,
    signs_consistent
};

/// 近乎水平時回傳的名目速度。刻意不是 0：水平的前段仍要產生看得見的 overshoot。
pub const FLAT_NOMINAL_VELOCITY: f64 = 1.0;

/// 由 anchor 往回取樣，估計曲線在 anchor 的斜率（value / frame）。
///
/// 第 i 個取樣點位於 `anchor_position - i`，斜率為
/// `(current - value_i) / i`，i = 1 ..= num_samples。
pub struct VelocityEstimator {
    settings: EstimatorSettings,
}

impl VelocityEstimator {
    pub fn new(settings: EstimatorSettings) -> VelocityEstimator {
        VelocityEstimator { settings }
    }

    pub fn settings(&self) -> &EstimatorSettings {
        &self.settings
    }

    pub fn estimate<C: Curve + ?Sized>(&self, curve: &C, anchor_position: f64) -> f64 {
        let slopes = self.backward_slopes(curve, anchor_position);
        self.estimate_from_slopes(&slopes)
    }

    /// 斜率依距離 anchor 由近到遠排列；`slopes[0]` 是最新的資料點。
    pub fn backward_slopes<C: Curve + ?Sized>(&self, curve: &C, anchor_position: f64) -> Vec<f64> {
        let Some(current_value) = curve.evaluate(anchor_position) else {
            return Vec::new();
        };
        (1..=self.settings.num_samples)
            .filter_map(|i| {
                let dx = i as f64;
                curve
                    .evaluate(anchor_position - dx)
                    .map(|prev_value| (current_value - prev_value) / dx)
            })
            .collect()
    }

    pub fn estimate_from_slopes(&self, slopes: &[f64]) -> f64 {
        let Some(median_slope) = median(slopes) else {
            return 0.0;
        };

        if median_slope.abs() > self.settings.fallback {
            let consistent_sign = signs_consistent(slopes);
            let slope_std = population_std_dev(slopes);
            if !consistent_sign || slope_std > self.settings.std_threshold {
                log::debug!(
                    "unstable neighbourhood (consistent sign: {}, std: {:.6}), using nearest slope {:.6}",
                    consistent_sign, slope_std, slopes[0]
                );
                slopes[0]
            } else {
                median_slope
            }
        } else {
            log::debug!("near-flat neighbourhood (median {:.6}), using nominal velocity", median_slope);
            FLAT_NOMINAL_VELOCITY
        }
    }
}

impl Default for VelocityEstimator {
    fn default() -> Self {
        VelocityEstimator::new(EstimatorSettings::default())
    }
}

/// 以預設的 num_samples = 3、std_threshold = 0.1、fallback = 1e-3 估計速度。
pub fn estimate_velocity<C: Curve + ?Sized>(curve: &C, anchor_position: f64) -> f64 {
    VelocityEstimator::default().estimate(curve, anchor_position)
}
