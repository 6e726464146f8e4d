use crate::math::curve::keyframe::{
    Interpolation,
    Keyframe,
    KeyframeHandle
};

/// 可於任意位置內插取值的曲線。沒有任何 keyframe 時回傳 `None`。
pub trait Curve {
    fn evaluate(&self, position: f64) -> Option<f64>;
}

/// 由離散 keyframe 組成、可修改的曲線（動畫軟體中的 F-Curve）。
///
/// `keyframes()` 必須依 position 遞增排序。
pub trait KeyframeCurve: Curve {
    fn keyframes(&self) -> &[Keyframe];

    fn insert_keyframe(&mut self, position: f64, value: f64) -> KeyframeHandle;

    fn remove_keyframe(&mut self, handle: KeyframeHandle) -> Option<Keyframe>;

    fn set_interpolation(&mut self, handle: KeyframeHandle, interpolation: Interpolation);

    fn set_selected(&mut self, handle: KeyframeHandle, selected: bool);

    fn selected_keyframes(&self) -> Vec<&Keyframe> {
        self.keyframes()
            .iter()
            .filter(|kf| kf.is_selected())
            .collect()
    }

    /// 取得與 `position` 落在同一個整數格的 keyframe（兩者皆截去小數後相等），`skip` 除外。
    ///
    /// 截去小數會讓 (-1, 1) 之間的位置都落在 0 格，例如 -0.5 與 0.5。
    fn keyframe_at_unit(&self, position: f64, skip: Option<KeyframeHandle>) -> Option<&Keyframe> {
        let target = position.trunc();
        self.keyframes()
            .iter()
            .filter(|kf| Some(kf.handle()) != skip)
            .find(|kf| kf.position().trunc() == target)
    }

    /// 刪除 position 落在 `(lhs, rhs]` 內的所有 keyframe（`keep` 除外），回傳刪除數量。
    fn remove_keyframes_in(&mut self, lhs: f64, rhs: f64, keep: Option<KeyframeHandle>) -> usize {
        let stale: Vec<KeyframeHandle> = self
            .keyframes()
            .iter()
            .filter(|kf| lhs < kf.position() && kf.position() <= rhs)
            .filter(|kf| Some(kf.handle()) != keep)
            .map(|kf| kf.handle())
            .collect();
        for handle in stale.iter() {
            self.remove_keyframe(*handle);
        }
        stale.len()
    }
}
