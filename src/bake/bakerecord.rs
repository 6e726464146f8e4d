use std::collections::HashMap;

use chrono::{
    DateTime,
    Utc
};
use serde::{
    Deserialize,
    Serialize
};

use crate::bake::channel::ChannelKey;

/// 上一次烘焙的範圍：`(anchor_position, anchor_position + duration]`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakeRecord {
    anchor_position: f64,
    duration: f64,
    baked_at: DateTime<Utc>,
}

impl BakeRecord {
    pub fn new(anchor_position: f64, duration: f64) -> BakeRecord {
        BakeRecord {
            anchor_position,
            duration,
            baked_at: Utc::now(),
        }
    }

    pub fn anchor_position(&self) -> f64 {
        self.anchor_position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn end_position(&self) -> f64 {
        self.anchor_position + self.duration
    }

    pub fn baked_at(&self) -> DateTime<Utc> {
        self.baked_at
    }
}

/// 每條曲線的烘焙紀錄存放處（由宿主程式提供）。
///
/// 第一次烘焙時建立、每次重新烘焙時覆寫；刪除與否由宿主決定。
pub trait BakeRecordStore {
    fn bake_record(&self, key: &ChannelKey) -> Option<BakeRecord>;

    fn set_bake_record(&mut self, key: &ChannelKey, record: BakeRecord);
}

/// owner → (`"{data_path}_{array_index}"` → BakeRecord)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BakeRecordMap {
    owners: HashMap<String, HashMap<String, BakeRecord>>,
}

impl BakeRecordMap {
    pub fn new() -> BakeRecordMap {
        BakeRecordMap::default()
    }

    pub fn len(&self) -> usize {
        self.owners.values().map(|records| records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BakeRecordStore for BakeRecordMap {
    fn bake_record(&self, key: &ChannelKey) -> Option<BakeRecord> {
        self.owners
            .get(key.owner())
            .and_then(|records| records.get(&key.property_name()))
            .cloned()
    }

    fn set_bake_record(&mut self, key: &ChannelKey, record: BakeRecord) {
        self.owners
            .entry(key.owner().to_owned())
            .or_default()
            .insert(key.property_name(), record);
    }
}
