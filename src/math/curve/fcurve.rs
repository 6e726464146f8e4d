use serde::{
    Deserialize,
    Serialize
};

use crate::math::curve::curve::{
    Curve,
    KeyframeCurve
};
use crate::math::curve::hermite::{
    auto_clamped_tangent,
    HermiteSegment
};
use crate::math::curve::keyframe::{
    Interpolation,
    Keyframe,
    KeyframeHandle
};
use crate::math::curve::point2d::Point2D;
use crate::objectwithuuid::ObjectWithUUID;

/// 記憶體內的 keyframe 曲線。
///
/// - keyframe 永遠依 position 遞增排序。
/// - 在已存在的 position 插入時只更新 value，維持 position 唯一；
///   由 `from_keyframes`（含反序列化）建立時，重複的 position 也會合併。
/// - 區段內插由左側 keyframe 的 `Interpolation` 決定。
/// - 範圍外採常數外插（取第一個 / 最後一個 keyframe 的值）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct FCurve {
    keyframes: Vec<Keyframe>,
}

impl FCurve {
    pub fn new() -> FCurve {
        FCurve { keyframes: Vec::new() }
    }

    /// 依 position 排序；相同 position 合併成第一個 keyframe，value 取最後出現者，
    /// 與 `insert_keyframe` 在既有 position 上的行為一致。
    pub fn from_keyframes(mut keyframes: Vec<Keyframe>) -> FCurve {
        keyframes.sort_by(|lhs, rhs| lhs.position().total_cmp(&rhs.position()));
        keyframes.dedup_by(|later, kept| {
            if later.position() != kept.position() {
                return false;
            }
            kept.set_value(later.value());
            if later.is_selected() {
                kept.set_selected(true);
            }
            true
        });
        FCurve { keyframes }
    }

    /// 以 (position, value) 建立曲線，所有 keyframe 使用同一種內插方式。
    pub fn from_points(points: &[(f64, f64)], interpolation: Interpolation) -> FCurve {
        let keyframes = points
            .iter()
            .map(|&(x, y)| Keyframe::new(x, y).with_interpolation(interpolation))
            .collect();
        FCurve::from_keyframes(keyframes)
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn keyframe(&self, handle: KeyframeHandle) -> Option<&Keyframe> {
        self.index_of(handle).map(|i| &self.keyframes[i])
    }

    fn index_of(&self, handle: KeyframeHandle) -> Option<usize> {
        self.keyframes
            .iter()
            .position(|kf| kf.uuid() == handle.uuid())
    }

    fn segment_value(&self, i: usize, position: f64) -> f64 {
        let lhs = &self.keyframes[i];
        let rhs = &self.keyframes[i + 1];
        match lhs.interpolation() {
            Interpolation::Constant => lhs.value(),
            Interpolation::Linear => {
                let slope = Point2D::slope(&lhs.point(), &rhs.point());
                f64::mul_add(slope, position - lhs.position(), lhs.value())
            }
            Interpolation::Bezier => {
                let points = self.neighbourhood(i);
                let offset = if i == 0 { 0 } else { 1 };
                let segment = HermiteSegment::new(
                    &points[offset],
                    &points[offset + 1],
                    auto_clamped_tangent(&points, offset),
                    auto_clamped_tangent(&points, offset + 1),
                );
                segment.value(position)
            }
        }
    }

    /// 區段 [i, i+1] 的 tangent 只需要 i-1 ..= i+2 四個點。
    fn neighbourhood(&self, i: usize) -> Vec<Point2D> {
        let lhs = i.saturating_sub(1);
        let rhs = (i + 2).min(self.keyframes.len() - 1);
        self.keyframes[lhs..=rhs]
            .iter()
            .map(|kf| kf.point())
            .collect()
    }
}

impl From<Vec<Keyframe>> for FCurve {
    fn from(keyframes: Vec<Keyframe>) -> Self {
        FCurve::from_keyframes(keyframes)
    }
}

impl From<FCurve> for Vec<Keyframe> {
    fn from(curve: FCurve) -> Self {
        curve.keyframes
    }
}

impl Curve for FCurve {
    fn evaluate(&self, position: f64) -> Option<f64> {
        let first = self.keyframes.first()?;
        let last = self.keyframes.last()?;
        if position <= first.position() {
            return Some(first.value());
        }
        if position >= last.position() {
            return Some(last.value());
        }
        let i = self
            .keyframes
            .partition_point(|kf| kf.position() <= position) - 1;
        Some(self.segment_value(i, position))
    }
}

impl KeyframeCurve for FCurve {
    fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    fn insert_keyframe(&mut self, position: f64, value: f64) -> KeyframeHandle {
        let i = self
            .keyframes
            .partition_point(|kf| kf.position() < position);
        if let Some(existing) = self.keyframes.get_mut(i) {
            if existing.position() == position {
                existing.set_value(value);
                return existing.handle();
            }
        }
        let keyframe = Keyframe::new(position, value);
        let handle = keyframe.handle();
        self.keyframes.insert(i, keyframe);
        handle
    }

    fn remove_keyframe(&mut self, handle: KeyframeHandle) -> Option<Keyframe> {
        self.index_of(handle).map(|i| self.keyframes.remove(i))
    }

    fn set_interpolation(&mut self, handle: KeyframeHandle, interpolation: Interpolation) {
        if let Some(i) = self.index_of(handle) {
            self.keyframes[i].set_interpolation(interpolation);
        }
    }

    fn set_selected(&mut self, handle: KeyframeHandle, selected: bool) {
        if let Some(i) = self.index_of(handle) {
            self.keyframes[i].set_selected(selected);
        }
    }
}
