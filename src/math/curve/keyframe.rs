use serde::{
    Deserialize,
    Serialize
};
use uuid::Uuid;

use crate::math::curve::point2d::Point2D;
use crate::objectwithuuid::ObjectWithUUID;

/// Keyframe 右側區段的內插方式。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub enum Interpolation {
    Constant,
    Linear,
    /// 平滑曲線（auto-clamped tangent 的三次 Hermite）
    #[default]
    Bezier,
}

/// Curve 交給呼叫端的 keyframe 參照；刪除其他 keyframe 後仍然有效。
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct KeyframeHandle(Uuid);

impl KeyframeHandle {
    pub fn new() -> KeyframeHandle {
        KeyframeHandle(Uuid::new_v4())
    }

    pub fn uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for KeyframeHandle {
    fn default() -> Self {
        KeyframeHandle::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyframe {
    #[serde(default, skip_serializing)]
    handle: KeyframeHandle,
    position: f64,
    value: f64,
    #[serde(default)]
    selected: bool,
    #[serde(default)]
    interpolation: Interpolation,
}

impl Keyframe {
    pub fn new(position: f64, value: f64) -> Keyframe {
        Keyframe {
            handle: KeyframeHandle::new(),
            position,
            value,
            selected: false,
            interpolation: Interpolation::default(),
        }
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Keyframe {
        self.interpolation = interpolation;
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Keyframe {
        self.selected = selected;
        self
    }

    pub fn handle(&self) -> KeyframeHandle {
        self.handle
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn point(&self) -> Point2D {
        Point2D::new(self.position, self.value)
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub(crate) fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
    }
}

impl ObjectWithUUID for Keyframe {
    fn uuid(&self) -> &Uuid {
        &self.handle.0
    }
}
