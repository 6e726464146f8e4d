use std::fs::File;
use std::io::{
    BufReader,
    BufWriter,
    Write
};
use std::path::Path;

use serde::{
    Deserialize,
    Serialize
};

use crate::bake::bakerecord::BakeRecordMap;
use crate::bake::channel::Channel;
use crate::momentumerror::MomentumError;

/// CLI 讀寫的 JSON 場景：曲線清單與各擁有者的烘焙紀錄。
///
/// ```json
/// {
///   "channels": [
///     { "owner": "Cube", "data_path": "location", "array_index": 2,
///       "keyframes": [ { "position": 1.0, "value": 0.0, "interpolation": "Bezier" },
///                      { "position": 10.0, "value": 4.0, "selected": true } ] }
///   ],
///   "bake_records": { "Cube": { "location_2": { "anchor_position": 10.0, "duration": 9.0,
///                                                "baked_at": "2026-10-19T08:00:00Z" } } }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub bake_records: BakeRecordMap,
}

impl Scene {
    pub fn from_reader(file_path: impl AsRef<Path>) -> Result<Scene, MomentumError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let scene: Scene = serde_json::from_reader(reader)?;
        Ok(scene)
    }

    pub fn to_writer(&self, file_path: impl AsRef<Path>) -> Result<(), MomentumError> {
        let file = File::create(file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
