use uuid::Uuid;

/// 具有穩定識別碼的物件。
///
/// Keyframe 在插入、刪除後於 `Vec` 中的索引會改變，
/// 因此 curve 對外交出的 handle 以 `Uuid` 表示，而非索引。
pub trait ObjectWithUUID {
    fn uuid(&self) -> &Uuid;
}
