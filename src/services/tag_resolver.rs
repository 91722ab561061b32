//! 标签推断服务 - 业务能力层
//!
//! 只负责"根据文件名推断来源标签"能力。
//!
//! 规则是一张有序表，从上到下依次匹配，第一条命中的规则生效；
//! 全部未命中时返回 `None`，调用方应跳过该文件。
//! 新的文件命名约定只需要往表里加规则，不需要改匹配逻辑。

use crate::error::AppResult;
use crate::models::ProvenanceTag;
use regex::Regex;

/// 实验测验的主题关键词 → 测验序号
static LAB_QUIZ_TOPICS: phf::OrderedMap<&'static str, u32> = phf::phf_ordered_map! {
    "antihypertensives" => 1,
    "antilipemics" => 2,
    "anticoagulants" => 3,
    "antiarrhythmics" => 4,
};

/// 单条标签规则
#[derive(Debug, Clone)]
pub enum TagRule {
    /// 文件名包含固定片段即映射到固定标签
    Marker {
        token: String,
        tag: ProvenanceTag,
    },
    /// `<前缀><数字>` 形式的文件族
    ///
    /// 文件名中出现已知主题关键词时使用关键词对应的序号，
    /// 否则直接使用解析出的数字作为序号。
    NumberedFamily {
        pattern: Regex,
        group: u32,
        topics: &'static phf::OrderedMap<&'static str, u32>,
    },
}

impl TagRule {
    pub fn marker(token: impl Into<String>, group: u32, sequence: u32) -> Self {
        TagRule::Marker {
            token: token.into(),
            tag: ProvenanceTag::new(group, sequence),
        }
    }

    pub fn numbered_family(
        prefix: &str,
        group: u32,
        topics: &'static phf::OrderedMap<&'static str, u32>,
    ) -> AppResult<Self> {
        let pattern = Regex::new(&format!(r"{}(\d+)", regex::escape(prefix)))?;
        Ok(TagRule::NumberedFamily {
            pattern,
            group,
            topics,
        })
    }

    /// 尝试用本规则匹配文件名
    pub fn apply(&self, filename: &str) -> Option<ProvenanceTag> {
        match self {
            TagRule::Marker { token, tag } => filename.contains(token.as_str()).then_some(*tag),
            TagRule::NumberedFamily {
                pattern,
                group,
                topics,
            } => {
                let digits = pattern.captures(filename)?.get(1)?.as_str();
                let topic = topics
                    .entries()
                    .find(|(keyword, _)| filename.contains(*keyword))
                    .map(|(_, sequence)| *sequence);
                // 数字只在没有主题关键词时才需要
                let sequence = match topic {
                    Some(sequence) => sequence,
                    None => digits.parse().ok()?,
                };
                Some(ProvenanceTag::new(*group, sequence))
            }
        }
    }
}

/// 标签推断服务
#[derive(Debug, Clone)]
pub struct TagResolver {
    rules: Vec<TagRule>,
}

impl TagResolver {
    /// 使用内置规则表创建
    ///
    /// `lab-quiz1` / `lab-quiz2` 两个早期题库都属于第一个实验测验，
    /// 优先于 `lab-quiz<N>` 文件族匹配。
    pub fn new() -> AppResult<Self> {
        let mut rules = vec![
            TagRule::marker("lab-quiz1", 2, 1),
            TagRule::marker("lab-quiz2", 2, 1),
            TagRule::numbered_family("lab-quiz", 2, &LAB_QUIZ_TOPICS)?,
        ];

        for chapter in 1..=5 {
            rules.push(TagRule::marker(format!("chapter{}-review", chapter), 1, chapter));
        }

        rules.push(TagRule::marker("cumulative-quiz1-2", 1, 2));
        rules.push(TagRule::marker("cumulative-quiz1-3", 1, 3));

        Ok(Self { rules })
    }

    /// 追加一条最低优先级的规则
    pub fn push_rule(&mut self, rule: TagRule) {
        self.rules.push(rule);
    }

    /// 插入一条最高优先级的规则
    pub fn prepend_rule(&mut self, rule: TagRule) {
        self.rules.insert(0, rule);
    }

    /// 推断文件名对应的来源标签
    ///
    /// # 参数
    /// - `filename`: 不含路径的文件名
    ///
    /// # 返回
    /// 第一条命中规则给出的标签，全部未命中时为 `None`
    pub fn resolve(&self, filename: &str) -> Option<ProvenanceTag> {
        self.rules.iter().find_map(|rule| rule.apply(filename))
    }
}
