use serde::{Deserialize, Deserializer};

/// 题库文件（顶层只关心 `pools`）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizBank {
    #[serde(default)]
    pub pools: QuizPools,
}

/// 简单 / 困难两个题池
///
/// 单道题目结构损坏时按空题目处理（之后被抽取阶段跳过），不影响同一文件的其他题目。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizPools {
    #[serde(default, deserialize_with = "deserialize_items")]
    pub easy: Vec<QuizItem>,
    #[serde(default, deserialize_with = "deserialize_items")]
    pub hard: Vec<QuizItem>,
}

impl QuizPools {
    /// 按 easy → hard 的顺序遍历所有题目
    pub fn iter(&self) -> impl Iterator<Item = &QuizItem> {
        self.easy.iter().chain(self.hard.iter())
    }

    pub fn len(&self) -> usize {
        self.easy.len() + self.hard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizItem {
    #[serde(default, deserialize_with = "deserialize_mapping")]
    pub mapping: Option<DrugMapping>,
    /// 缺失、`null` 或非字符串时为空
    #[serde(default, deserialize_with = "deserialize_text")]
    pub prompt: String,
}

/// 题目中嵌入的结构化药物信息
///
/// 每个字段既可能是字符串也可能是字符串数组，数组时取第一个元素。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrugMapping {
    #[serde(default, deserialize_with = "deserialize_first")]
    pub generic: Option<String>,
    #[serde(default, deserialize_with = "deserialize_first")]
    pub brand: Option<String>,
    #[serde(rename = "class", default, deserialize_with = "deserialize_first")]
    pub drug_class: Option<String>,
    #[serde(default, deserialize_with = "deserialize_first")]
    pub category: Option<String>,
}

fn deserialize_items<'de, D>(deserializer: D) -> Result<Vec<QuizItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(|value| QuizItem::deserialize(value).unwrap_or_default())
        .collect())
}

// `mapping` 不是对象时视为没有 mapping
fn deserialize_mapping<'de, D>(deserializer: D) -> Result<Option<DrugMapping>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| DrugMapping::deserialize(value).ok()))
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_first(deserializer)?.unwrap_or_default())
}

/// 任意 JSON 值中尽力取出的文本
struct Lenient(Option<String>);

impl<'de> Deserialize<'de> for Lenient {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_first(deserializer).map(Lenient)
    }
}

// Helper function to deserialize a field that is either a scalar or a list
fn deserialize_first<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{IgnoredAny, MapAccess, SeqAccess, Visitor};
    use std::fmt;

    struct FirstVisitor;

    impl<'de> Visitor<'de> for FirstVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let first = seq.next_element::<Lenient>()?.and_then(|Lenient(first)| first);
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(first)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }

    deserializer.deserialize_any(FirstVisitor)
}
