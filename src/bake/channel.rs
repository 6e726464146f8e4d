use std::fmt;

use serde::{
    Deserialize,
    Serialize
};

use crate::math::curve::fcurve::FCurve;

/// 一條動畫曲線的穩定識別：擁有者 + 屬性路徑 + 陣列索引。
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
pub struct ChannelKey {
    owner: String,
    data_path: String,
    array_index: usize,
}

impl ChannelKey {
    pub fn new(owner: impl Into<String>, data_path: impl Into<String>, array_index: usize) -> ChannelKey {
        ChannelKey {
            owner: owner.into(),
            data_path: data_path.into(),
            array_index,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn data_path(&self) -> &str {
        &self.data_path
    }

    pub fn array_index(&self) -> usize {
        self.array_index
    }

    /// 在擁有者內部使用的屬性名稱，例如 `location_2`。
    pub fn property_name(&self) -> String {
        format!("{}_{}", self.data_path, self.array_index)
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}[{}]", self.owner, self.data_path, self.array_index)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    #[serde(flatten)]
    key: ChannelKey,
    keyframes: FCurve,
}

impl Channel {
    pub fn new(key: ChannelKey, curve: FCurve) -> Channel {
        Channel { key, keyframes: curve }
    }

    pub fn key(&self) -> &ChannelKey {
        &self.key
    }

    pub fn curve(&self) -> &FCurve {
        &self.keyframes
    }

    pub fn curve_mut(&mut self) -> &mut FCurve {
        &mut self.keyframes
    }
}
