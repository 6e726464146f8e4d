use crate::configuration::OvershootSettings;
use crate::math::curve::curve::KeyframeCurve;
use crate::math::curve::keyframe::Interpolation;
use crate::math::curve::point2d::Point2D;
use crate::overshoot::simulationtrace::{
    SimulationTrace,
    StopReason
};
use crate::overshoot::spring::{
    convergence_epsilon,
    DampedSpring,
    SpringParameters
};

pub const MAX_ITERATIONS: usize = 500;

/// 由 anchor 往後逐 frame 模擬阻尼彈簧，並把位移寫成 keyframe。
///
/// 每前進一個 frame：
/// 1. 下一個位置 = 上一個位置 + 1
/// 2. 若該整數格已有 keyframe（anchor 本身不算）：
///    - 不允許覆寫 → 立即停止（這一步與之後都不寫入）
///    - 允許覆寫 → 先刪除既有 keyframe
/// 3. 插入 `anchor.value + displacement`，內插方式為 Bezier
///
/// 迴圈在位移與速度都低於收斂門檻、或前進 `MAX_ITERATIONS` 次後結束。
pub struct OvershootSimulator {
    settings: OvershootSettings,
    parameters: SpringParameters,
}

impl OvershootSimulator {
    pub fn new(settings: OvershootSettings) -> OvershootSimulator {
        let parameters = SpringParameters::from_settings(&settings);
        OvershootSimulator { settings, parameters }
    }

    pub fn settings(&self) -> &OvershootSettings {
        &self.settings
    }

    pub fn parameters(&self) -> SpringParameters {
        self.parameters
    }

    /// `velocity` 為估計速度，尚未乘上 amplitude。
    pub fn simulate<C: KeyframeCurve + ?Sized>(&self, curve: &mut C, anchor: Point2D, velocity: f64) -> SimulationTrace {
        let initial_velocity = velocity * self.settings.amplitude;
        let epsilon = convergence_epsilon(initial_velocity);
        let mut spring = DampedSpring::new(self.parameters, initial_velocity);

        let mut position = anchor.x();
        let mut samples = Vec::new();
        let mut iterations = 0;
        let mut stop_reason = StopReason::Converged;
        let anchor_handle = curve
            .keyframes()
            .iter()
            .find(|kf| kf.position() == anchor.x())
            .map(|kf| kf.handle());

        while !spring.is_settled(epsilon) {
            if iterations >= MAX_ITERATIONS {
                stop_reason = StopReason::IterationCap;
                break;
            }
            spring.advance();
            iterations += 1;

            let next_position = position + 1.0;
            if let Some(existing) = curve.keyframe_at_unit(next_position, anchor_handle).map(|kf| kf.handle()) {
                if !self.settings.overwrite_keyframes {
                    stop_reason = StopReason::Conflict;
                    break;
                }
                curve.remove_keyframe(existing);
            }

            position = next_position;
            let value = anchor.y() + spring.displacement();
            let handle = curve.insert_keyframe(position, value);
            curve.set_interpolation(handle, Interpolation::Bezier);
            samples.push(Point2D::new(position, value));
        }

        SimulationTrace::new(anchor, samples, iterations, stop_reason)
    }
}

/// 單一曲線的便利入口：以 `settings` 建立模擬器並執行一次。
pub fn simulate_overshoot<C: KeyframeCurve + ?Sized>(
    curve: &mut C,
    anchor: Point2D,
    velocity: f64,
    settings: &OvershootSettings,
) -> SimulationTrace {
    OvershootSimulator::new(settings.clone()).simulate(curve, anchor, velocity)
}
