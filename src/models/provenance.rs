//! 来源标签
//!
//! 标识一条药物记录来自哪个实验（lab）的哪次测验（quiz），
//! 是去重键的一部分。

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// 来源标签（不可变值类型）
///
/// `is_new` 不单独存储，始终由 `group == 2` 推导。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct ProvenanceTag {
    #[serde(rename = "lab")]
    group: u32,
    #[serde(rename = "quiz")]
    sequence: u32,
    #[serde(rename = "week", default)]
    sub_week: Option<u32>,
}

impl ProvenanceTag {
    /// 被视为"新内容"的实验编号
    pub const NEW_GROUP: u32 = 2;

    pub const fn new(group: u32, sequence: u32) -> Self {
        Self {
            group,
            sequence,
            sub_week: None,
        }
    }

    pub fn group(&self) -> u32 {
        self.group
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn sub_week(&self) -> Option<u32> {
        self.sub_week
    }

    pub fn is_new(&self) -> bool {
        self.group == Self::NEW_GROUP
    }

    /// 返回附带周次的副本，原值不变
    pub fn with_sub_week(self, week: u32) -> Self {
        Self {
            sub_week: Some(week),
            ..self
        }
    }
}

impl Serialize for ProvenanceTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = if self.sub_week.is_some() { 4 } else { 3 };
        let mut state = serializer.serialize_struct("ProvenanceTag", len)?;
        state.serialize_field("lab", &self.group)?;
        state.serialize_field("quiz", &self.sequence)?;
        state.serialize_field("is_new", &self.is_new())?;
        if let Some(week) = self.sub_week {
            state.serialize_field("week", &week)?;
        }
        state.end()
    }
}

impl std::fmt::Display for ProvenanceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.sub_week {
            Some(week) => write!(f, "[Lab {} Quiz {} Week {}]", self.group, self.sequence, week),
            None => write!(f, "[Lab {} Quiz {}]", self.group, self.sequence),
        }
    }
}
