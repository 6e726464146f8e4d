use std::f64::consts::PI;

use crate::configuration::OvershootSettings;

pub const SUBSTEPS: usize = 50;

// ─────────────────────────────────────────────
// SpringParameters
// ─────────────────────────────────────────────

/// 由 timing / decay 推得的彈簧常數。
///
///   omega = 2π / (timing + 1)
///   k     = omega²
///   c     = 2 * decay³ * sqrt(k)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParameters {
    stiffness: f64,
    damping: f64,
}

impl SpringParameters {
    pub fn new(timing: u32, decay: f64) -> SpringParameters {
        let omega = 2.0 * PI / (timing as f64 + 1.0);
        let stiffness = omega * omega;
        let decay_remapped = decay.powi(3);
        let damping = if stiffness > 0.0 {
            2.0 * decay_remapped * stiffness.sqrt()
        } else {
            0.0
        };
        SpringParameters { stiffness, damping }
    }

    pub fn from_settings(settings: &OvershootSettings) -> SpringParameters {
        SpringParameters::new(settings.timing, settings.decay)
    }

    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }
}

// ─────────────────────────────────────────────
// DampedSpring
// ─────────────────────────────────────────────

/// 以 semi-implicit Euler 積分的阻尼彈簧。
///
/// 阻尼在第一次速度換號（位移到達第一個峰值）之前關閉；
/// 換號只在每個整數 frame 的邊界檢查，之後阻尼一直開啟。
pub struct DampedSpring {
    parameters: SpringParameters,
    displacement: f64,
    velocity: f64,
    damping_active: bool,
    prev_direction: bool,
}

impl DampedSpring {
    pub fn new(parameters: SpringParameters, initial_velocity: f64) -> DampedSpring {
        DampedSpring {
            parameters,
            displacement: 0.0,
            velocity: initial_velocity,
            damping_active: false,
            prev_direction: initial_velocity >= 0.0,
        }
    }

    pub fn displacement(&self) -> f64 {
        self.displacement
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_damping_active(&self) -> bool {
        self.damping_active
    }

    /// 前進一個 frame（`SUBSTEPS` 個子步驟）。
    pub fn advance(&mut self) {
        let dt = 1.0 / SUBSTEPS as f64;
        let k = self.parameters.stiffness;
        let c = if self.damping_active { self.parameters.damping } else { 0.0 };
        for _ in 0..SUBSTEPS {
            let a = -k * self.displacement - c * self.velocity;
            self.velocity += a * dt;
            self.displacement += self.velocity * dt;
        }

        let direction = self.velocity >= 0.0;
        if !self.damping_active && direction != self.prev_direction {
            self.damping_active = true;
        }
        self.prev_direction = direction;
    }

    /// 位移與速度皆不超過 `epsilon` 時視為靜止。
    pub fn is_settled(&self, epsilon: f64) -> bool {
        self.displacement.abs() <= epsilon && self.velocity.abs() <= epsilon
    }
}

/// 相對於初速大小的收斂門檻；`1e-6` 避免初速為 0 時門檻退化。
pub fn convergence_epsilon(initial_velocity: f64) -> f64 {
    (initial_velocity.abs() + 1e-6) * 1e-2
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn timing_and_decay_map_to_stiffness_and_damping() {
        let parameters = SpringParameters::new(5, 0.5);
        let omega = 2.0 * PI / 6.0;
        assert_relative_eq!(parameters.stiffness(), omega * omega, epsilon = 1e-12);
        assert_relative_eq!(parameters.damping(), 2.0 * 0.125 * omega, epsilon = 1e-12);
    }

    #[test]
    fn damping_stays_off_until_first_peak() {
        let mut spring = DampedSpring::new(SpringParameters::new(5, 1.0), 1.0);
        spring.advance();
        assert!(!spring.is_damping_active());
        assert!(spring.displacement() > 0.0);
        let mut frames = 1;
        while !spring.is_damping_active() {
            spring.advance();
            frames += 1;
        }
        // 週期約 6 frame，速度在四分之一週期後換號
        assert!((1..=3).contains(&frames), "frames = {frames}");
    }

    #[test]
    fn zero_velocity_is_already_settled() {
        let spring = DampedSpring::new(SpringParameters::new(5, 0.5), 0.0);
        assert!(spring.is_settled(convergence_epsilon(0.0)));
    }
}
