use crate::models::provenance::ProvenanceTag;
use serde::Serialize;

/// 药物记录（主题库的输出单元）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugRecord {
    pub generic: String,
    pub brand: Option<String>,
    #[serde(rename = "class")]
    pub drug_class: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "moa")]
    pub mechanism_of_action: Option<String>,
    #[serde(rename = "metadata")]
    pub provenance: ProvenanceTag,
}

/// 原始候选记录
///
/// 直接从某一行或某一道题中抽取，尚未合并，可能重复。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    pub generic: String,
    pub brand: Option<String>,
    pub drug_class: Option<String>,
    pub category: Option<String>,
    pub mechanism_of_action: Option<String>,
    pub tag: ProvenanceTag,
}

impl RawCandidate {
    /// 创建只有通用名的候选记录，其余字段为空
    pub fn new(generic: impl Into<String>, tag: ProvenanceTag) -> Self {
        Self {
            generic: generic.into().trim().to_string(),
            brand: None,
            drug_class: None,
            category: None,
            mechanism_of_action: None,
            tag,
        }
    }

    pub fn with_brand(mut self, brand: Option<&str>) -> Self {
        self.brand = brand.and_then(non_empty);
        self
    }

    pub fn with_class(mut self, drug_class: Option<&str>) -> Self {
        self.drug_class = drug_class.and_then(non_empty);
        self
    }

    pub fn with_category(mut self, category: Option<&str>) -> Self {
        self.category = category.and_then(non_empty);
        self
    }

    pub fn with_moa(mut self, moa: Option<&str>) -> Self {
        self.mechanism_of_action = moa.and_then(non_empty);
        self
    }
}

impl From<RawCandidate> for DrugRecord {
    fn from(candidate: RawCandidate) -> Self {
        Self {
            generic: candidate.generic,
            brand: candidate.brand,
            drug_class: candidate.drug_class,
            category: candidate.category,
            mechanism_of_action: candidate.mechanism_of_action,
            provenance: candidate.tag,
        }
    }
}

/// 去除首尾空白，空串视为缺失
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
