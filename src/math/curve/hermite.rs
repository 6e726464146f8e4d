use crate::math::curve::point2d::Point2D;

// ─────────────────────────────────────────────
// HermiteSegment
// ─────────────────────────────────────────────

/// 兩個 keyframe 之間的三次 Hermite 區段。
///
/// 係數以 Horner 形式存成 [d, c, b, a]，對應：
///   S(x) = a + b*(x-x0) + c*(x-x0)^2 + d*(x-x0)^3
pub struct HermiteSegment {
    coefs: [f64; 4],
    lhs_x: f64,
}

impl HermiteSegment {
    pub fn new(lhs_pt: &Point2D, rhs_pt: &Point2D, lhs_tangent: f64, rhs_tangent: f64) -> HermiteSegment {
        let h = rhs_pt.x() - lhs_pt.x();
        let dy = rhs_pt.y() - lhs_pt.y();
        let a = lhs_pt.y();
        let b = lhs_tangent;
        let c = (3.0 * dy / h - 2.0 * lhs_tangent - rhs_tangent) / h;
        let d = (-2.0 * dy / h + lhs_tangent + rhs_tangent) / (h * h);
        HermiteSegment { coefs: [d, c, b, a], lhs_x: lhs_pt.x() }
    }

    pub fn value(&self, x: f64) -> f64 {
        let x_diff = x - self.lhs_x;
        let mut result = self.coefs[0];
        for &beta in &self.coefs[1..] {
            result = f64::mul_add(result, x_diff, beta);
        }
        result
    }
}

// ─────────────────────────────────────────────
// Auto-clamped tangent
// ─────────────────────────────────────────────
//
// 與動畫軟體的 auto-clamped handle 相近：
//   端點：斜率 0（水平）
//   內部節點若為局部極值（左右割線異號或任一為 0）：斜率 0
//   其他：中央差分 (y[i+1]-y[i-1]) / (x[i+1]-x[i-1])，
//         並以 Fritsch-Carlson 上限 3*min(|s[i-1]|, |s[i]|) 截斷，避免區段內 overshoot。

pub fn auto_clamped_tangent(points: &[Point2D], i: usize) -> f64 {
    if i == 0 || i + 1 >= points.len() {
        return 0.0;
    }
    let s_lhs = Point2D::slope(&points[i - 1], &points[i]);
    let s_rhs = Point2D::slope(&points[i], &points[i + 1]);
    if s_lhs * s_rhs <= 0.0 {
        return 0.0;
    }
    let raw = Point2D::slope(&points[i - 1], &points[i + 1]);
    let limit = 3.0 * s_lhs.abs().min(s_rhs.abs());
    raw.clamp(-limit, limit)
}
