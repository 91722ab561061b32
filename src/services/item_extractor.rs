//! 题目抽取服务 - 业务能力层
//!
//! 只负责"把题库题目变成候选记录"能力。
//!
//! 同一种药往往分散在多道题里，每道题只提供一部分信息，
//! 这里只产出原始候选记录，合并交给 `Consolidator`。

use crate::models::{ProvenanceTag, QuizBank, QuizItem, RawCandidate};
use crate::services::row_extractor::Extraction;
use crate::utils::logging::truncate_text;
use tracing::debug;

/// 题干中标识作用机制题目的标记
const MOA_MARKER: &str = "MOA";

/// 题干本身就在描述作用机制时出现的动词
const ACTION_CUES: [&str; 3] = ["Inhibits", "Blocks", "Competes"];

/// 从题库中抽取候选记录
///
/// 按 easy → hard 的顺序遍历；没有 `mapping` 或无法确定通用名的题目被跳过。
pub fn extract_items(bank: &QuizBank, tag: ProvenanceTag) -> Extraction {
    let mut extraction = Extraction::default();

    for item in bank.pools.iter() {
        match extract_item(item, tag) {
            Some(candidate) => extraction.candidates.push(candidate),
            None => {
                debug!("题目无法识别药物，已跳过: {}", truncate_text(&item.prompt, 60));
                extraction.skipped += 1;
            }
        }
    }

    extraction
}

fn extract_item(item: &QuizItem, tag: ProvenanceTag) -> Option<RawCandidate> {
    let mapping = item.mapping.as_ref()?;
    let generic = mapping.generic.as_deref().map(str::trim).filter(|g| !g.is_empty())?;

    let moa = extract_moa(&item.prompt);

    Some(
        RawCandidate::new(generic, tag)
            .with_brand(mapping.brand.as_deref())
            .with_class(mapping.drug_class.as_deref())
            .with_category(mapping.category.as_deref())
            .with_moa(moa),
    )
}

/// 尽力从题干中恢复作用机制描述
///
/// - 题干不含 `MOA` 或不含冒号时返回 `None`
/// - 题干含有动作动词（Inhibits / Blocks / Competes）时整段题干即为描述
/// - 否则取第一个冒号之后的文字
pub fn extract_moa(prompt: &str) -> Option<&str> {
    if !prompt.contains(MOA_MARKER) {
        return None;
    }

    let (_, after_colon) = prompt.split_once(':')?;

    let text = if ACTION_CUES.iter().any(|cue| prompt.contains(cue)) {
        prompt
    } else {
        after_colon
    };

    let text = text.trim();
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DrugMapping, QuizPools};

    fn mapped(
        generic: Option<&str>,
        brand: Option<&str>,
        class: Option<&str>,
        prompt: &str,
    ) -> QuizItem {
        QuizItem {
            mapping: Some(DrugMapping {
                generic: generic.map(str::to_string),
                brand: brand.map(str::to_string),
                drug_class: class.map(str::to_string),
                category: None,
            }),
            prompt: prompt.to_string(),
        }
    }

    fn bank(easy: Vec<QuizItem>, hard: Vec<QuizItem>) -> QuizBank {
        QuizBank {
            pools: QuizPools { easy, hard },
        }
    }

    #[test]
    fn test_moa_with_action_cue_keeps_whole_prompt() {
        let prompt = "MOA (ACE inhibitors) - Part A: Inhibits conversion of Ang I to Ang II.";
        assert_eq!(extract_moa(prompt), Some(prompt));
    }

    #[test]
    fn test_moa_without_cue_takes_text_after_colon() {
        assert_eq!(
            extract_moa("MOA (Statins): Reduce LDL synthesis in the liver. Choose the drug."),
            Some("Reduce LDL synthesis in the liver. Choose the drug.")
        );
        // 只按第一个冒号切分
        assert_eq!(
            extract_moa("MOA: ratio 1:2 of doses"),
            Some("ratio 1:2 of doses")
        );
    }

    #[test]
    fn test_moa_requires_marker_and_colon() {
        assert_eq!(extract_moa("Inhibits platelet aggregation: which drug?"), None);
        assert_eq!(extract_moa("MOA of clopidogrel"), None);
        assert_eq!(extract_moa("MOA:   "), None);
        assert_eq!(extract_moa(""), None);
    }

    #[test]
    fn test_item_without_mapping_is_dropped() {
        let unmapped = QuizItem {
            mapping: None,
            prompt: "MOA: Inhibits platelet aggregation by blocking ADP receptors".to_string(),
        };

        let extraction = extract_items(&bank(vec![unmapped], vec![]), ProvenanceTag::new(2, 3));

        assert!(extraction.candidates.is_empty());
        assert_eq!(extraction.skipped, 1);
    }

    #[test]
    fn test_mapping_without_generic_is_dropped() {
        let item = mapped(Some("  "), Some("Plavix"), None, "Brand?");

        let extraction = extract_items(&bank(vec![], vec![item]), ProvenanceTag::new(2, 3));

        assert!(extraction.candidates.is_empty());
        assert_eq!(extraction.skipped, 1);
    }

    #[test]
    fn test_items_from_both_pools_in_order() {
        let easy = mapped(Some("Metoprolol"), Some("Lopressor"), None, "Brand for metoprolol?");
        let hard = mapped(
            Some("Clopidogrel"),
            None,
            Some("Antiplatelet"),
            "MOA (P2Y12): Blocks ADP receptors on platelets",
        );
        let tag = ProvenanceTag::new(2, 3);

        let extraction = extract_items(&bank(vec![easy], vec![hard]), tag);

        assert_eq!(extraction.candidates.len(), 2);
        assert_eq!(extraction.candidates[0].generic, "Metoprolol");
        assert_eq!(extraction.candidates[0].mechanism_of_action, None);
        assert_eq!(extraction.candidates[1].generic, "Clopidogrel");
        assert_eq!(
            extraction.candidates[1].mechanism_of_action.as_deref(),
            Some("MOA (P2Y12): Blocks ADP receptors on platelets")
        );
        assert!(extraction.candidates.iter().all(|c| c.tag == tag));
    }
}
