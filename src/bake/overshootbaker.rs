use crate::bake::bakerecord::{
    BakeRecord,
    BakeRecordStore
};
use crate::bake::bakereport::{
    BakeReport,
    ChannelOutcome,
    Severity
};
use crate::bake::channel::{
    Channel,
    ChannelKey
};
use crate::configuration::Configuration;
use crate::math::curve::curve::KeyframeCurve;
use crate::momentumerror::MomentumError;
use crate::overshoot::overshootsimulator::OvershootSimulator;
use crate::velocity::velocityestimator::VelocityEstimator;

/// 「Overshoot selected keyframe」操作本身。
///
/// 流程：
/// 1. 驗證：沒有曲線、或任何曲線選取超過一個 keyframe → 整個操作取消，不修改任何曲線
/// 2. 依輸入順序逐條處理；沒有選取 keyframe 的曲線略過
///    - 刪除上一次烘焙留下的 keyframe（依 BakeRecord）
///    - 估計 anchor 速度 → 模擬 overshoot → 寫入 keyframe
///    - 覆寫 BakeRecord
///    - anchor 保持選取、新 keyframe 不選取，可立即重新執行
/// 3. 一條都沒處理 → 錯誤；否則回報處理數量
pub struct OvershootBaker {
    estimator: VelocityEstimator,
    simulator: OvershootSimulator,
}

impl OvershootBaker {
    pub fn new(configuration: &Configuration) -> OvershootBaker {
        OvershootBaker {
            estimator: VelocityEstimator::new(configuration.estimator.clone()),
            simulator: OvershootSimulator::new(configuration.overshoot.clone()),
        }
    }

    pub fn estimator(&self) -> &VelocityEstimator {
        &self.estimator
    }

    pub fn simulator(&self) -> &OvershootSimulator {
        &self.simulator
    }

    pub fn bake<S: BakeRecordStore + ?Sized>(
        &self,
        channels: &mut [Channel],
        records: &mut S,
    ) -> Result<BakeReport, MomentumError> {
        if channels.is_empty() {
            log::error!("No F-Curves found");
            return Err(MomentumError::NoCurves);
        }
        for channel in channels.iter() {
            let count = channel.curve().selected_keyframes().len();
            if count > 1 {
                let error = MomentumError::MultipleAnchors {
                    channel: channel.key().to_string(),
                    count,
                };
                log::error!("{}", error);
                return Err(error);
            }
        }

        let mut report = BakeReport::new();
        for channel in channels.iter_mut() {
            let key = channel.key().clone();
            match self.bake_curve(&key, channel.curve_mut(), records) {
                Some(outcome) => {
                    if outcome.trace().hit_iteration_cap() {
                        report.push(
                            Severity::Warning,
                            format!("Simulation capped on {}, adjust decay or timing", key),
                        );
                    }
                    report.push_outcome(outcome);
                }
                None => log::debug!("skipping {}: no keyframe selected", key),
            }
        }

        if report.processed() == 0 {
            log::error!("{}", MomentumError::NothingProcessed);
            return Err(MomentumError::NothingProcessed);
        }
        report.push(Severity::Info, format!("Processed {} curves", report.processed()));
        Ok(report)
    }

    /// 單條曲線的烘焙；曲線沒有恰好一個選取的 keyframe 時回傳 `None` 且不做任何修改。
    pub fn bake_curve<C, S>(&self, key: &ChannelKey, curve: &mut C, records: &mut S) -> Option<ChannelOutcome>
    where
        C: KeyframeCurve + ?Sized,
        S: BakeRecordStore + ?Sized,
    {
        let (anchor_handle, anchor) = match curve.selected_keyframes().as_slice() {
            [anchor] => (anchor.handle(), anchor.point()),
            _ => return None,
        };

        // 先刪除上一次的尾巴再估計速度：anchor 往前取樣不會受舊 overshoot 影響，
        // 同參數重新烘焙時 keyframe 數量不變。
        let removed_stale = match records.bake_record(key) {
            Some(record) => curve.remove_keyframes_in(record.anchor_position(), record.end_position(), Some(anchor_handle)),
            None => 0,
        };
        if removed_stale > 0 {
            log::debug!("{}: removed {} keyframes from the previous bake", key, removed_stale);
        }

        let velocity = self.estimator.estimate(&*curve, anchor.x());
        let trace = self.simulator.simulate(curve, anchor, velocity);
        log::debug!(
            "{}: velocity {:.6}, {} keyframes emitted ({:?})",
            key, velocity, trace.len(), trace.stop_reason()
        );

        records.set_bake_record(key, BakeRecord::new(anchor.x(), trace.duration()));

        Some(ChannelOutcome::new(key.clone(), velocity, removed_stale, trace))
    }
}
