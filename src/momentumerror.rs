use thiserror::Error;

/// Overshoot 烘焙流程中所有可回報給呼叫端的錯誤。
///
/// - `NoCurves`、`MultipleAnchors`：輸入錯誤，整個操作中止且不修改任何曲線。
/// - `NothingProcessed`：所有曲線都被略過（沒有任何曲線恰好選取一個 keyframe）。
/// - `InvalidSetting`：設定檔或 CLI 參數超出允許範圍。
/// - `IOError`、`JsonParseError`：讀寫 scene / configuration 檔案失敗。
#[derive(Debug, Error)]
pub enum MomentumError {
    #[error("no curves found")]
    NoCurves,

    #[error("select exactly one keyframe per curve ('{channel}' has {count} selected)")]
    MultipleAnchors { channel: String, count: usize },

    #[error("select exactly one keyframe per curve")]
    NothingProcessed,

    #[error("invalid setting '{name}': {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),
}

impl MomentumError {
    pub fn invalid_setting(name: &'static str, reason: impl Into<String>) -> MomentumError {
        MomentumError::InvalidSetting { name, reason: reason.into() }
    }

    /// 輸入錯誤（整個操作取消）與其他錯誤的區分，供 CLI 決定回報方式。
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            MomentumError::NoCurves
                | MomentumError::MultipleAnchors { .. }
                | MomentumError::NothingProcessed
        )
    }
}
