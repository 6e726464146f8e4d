use serde::Serialize;

use crate::math::curve::point2d::Point2D;

/// 模擬結束的原因。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum StopReason {
    /// 位移與速度都低於收斂門檻
    Converged,
    /// 達到迭代上限（非致命，需警告呼叫端）
    IterationCap,
    /// 不允許覆寫且下一個 frame 已有 keyframe
    Conflict,
}

/// 實際寫入曲線的 overshoot keyframe，position 由 anchor + 1 起逐一遞增。
#[derive(Debug, Clone, Serialize)]
pub struct SimulationTrace {
    anchor: Point2D,
    samples: Vec<Point2D>,
    iterations: usize,
    stop_reason: StopReason,
}

impl SimulationTrace {
    pub fn new(anchor: Point2D, samples: Vec<Point2D>, iterations: usize, stop_reason: StopReason) -> SimulationTrace {
        SimulationTrace { anchor, samples, iterations, stop_reason }
    }

    pub fn anchor(&self) -> Point2D {
        self.anchor
    }

    pub fn samples(&self) -> &[Point2D] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 完整前進的 frame 數（含因衝突而未寫入的最後一步）。
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn stop_reason(&self) -> StopReason {
        self.stop_reason
    }

    pub fn hit_iteration_cap(&self) -> bool {
        self.stop_reason == StopReason::IterationCap
    }

    /// 最後一個寫入位置與 anchor 的距離；沒有寫入任何 keyframe 時為 0。
    pub fn duration(&self) -> f64 {
        self.samples
            .last()
            .map_or(0.0, |last| last.x() - self.anchor.x())
    }
}
