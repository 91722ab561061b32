use drug_pool::config::{Config, TabularSourceConfig};
use drug_pool::{logging, App, AppError, ProvenanceTag, TabularLayout};
use serde_json::Value;
use std::fs;
use std::path::Path;

const LAB1_CSV: &str = "\
Lab 1 Drug List,,,
Generic Name,Brand Name,Class,Category,MOA,Week
Lisinopril, Zestril, ACE Inhibitor, Antihypertensive, Blocks ACE,1
Metoprolol,\"Lopressor; Toprol XL\",Beta blocker,Antihypertensive,,two
Amlodipine,Norvasc,Calcium channel blocker
Generic Name,Brand Name,Class,Category,MOA,Week
lisinopril,Prinivil,ACE Inhibitor,Antihypertensive,Inhibits ACE,3
";

const LAB2_QUIZ2_CSV: &str = "\
Generic Name,Brand Name,Class,MOA
Atorvastatin,Lipitor,Statin,Inhibits HMG-CoA reductase
Ezetimibe,Zetia,Cholesterol absorption inhibitor
";

const ANTIHYPERTENSIVES_JSON: &str = r#"{
  "title": "Lab Quiz 1",
  "pools": {
    "easy": [
      {"prompt": "Brand name?", "mapping": {"generic": "Metoprolol", "brand": "Lopressor"}},
      {"prompt": "MOA: Inhibits platelet aggregation by blocking ADP receptors"}
    ],
    "hard": [
      {"prompt": "Drug class?", "mapping": {"generic": ["Metoprolol", "Metoprolol succinate"], "class": "Beta blocker"}},
      {"prompt": "MOA (ARBs): Prevents angiotensin II binding", "mapping": {"generic": "Losartan", "brand": ["Cozaar"]}}
    ]
  }
}"#;

/// 在临时目录中准备数据源并返回对应配置
fn prepare_workspace(root: &Path) -> Config {
    fs::create_dir_all(root.join("data")).unwrap();
    fs::create_dir_all(root.join("quizzes")).unwrap();

    fs::write(root.join("data/lab1.csv"), LAB1_CSV).unwrap();
    fs::write(root.join("data/lab2_quiz2.csv"), LAB2_QUIZ2_CSV).unwrap();
    fs::write(
        root.join("quizzes/lab-quiz1-antihypertensives.json"),
        ANTIHYPERTENSIVES_JSON,
    )
    .unwrap();
    fs::write(
        root.join("quizzes/practice-e1.json"),
        r#"{"pools": {"easy": [{"prompt": "x", "mapping": {"generic": "Heparin"}}]}}"#,
    )
    .unwrap();
    fs::write(root.join("quizzes/chapter2-review.json"), "{ broken").unwrap();

    let path = |p: &str| root.join(p).to_string_lossy().to_string();

    Config {
        output_path: path("out/master_pool.json"),
        quiz_folder: path("quizzes"),
        verbose_logging: false,
        tabular_sources: vec![
            TabularSourceConfig::new(
                path("data/lab1.csv"),
                ProvenanceTag::new(1, 1),
                TabularLayout::new(true, true),
            ),
            // 文件不存在，应跳过
            TabularSourceConfig::new(
                path("data/lab2_quiz1.csv"),
                ProvenanceTag::new(2, 1),
                TabularLayout::new(true, false),
            ),
            TabularSourceConfig::new(
                path("data/lab2_quiz2.csv"),
                ProvenanceTag::new(2, 2),
                TabularLayout::new(false, false),
            ),
        ],
    }
}

fn read_output(config: &Config) -> (String, Vec<Value>) {
    let content = fs::read_to_string(&config.output_path).unwrap();
    let records: Vec<Value> = serde_json::from_str(&content).unwrap();
    (content, records)
}

fn find<'a>(records: &'a [Value], generic: &str, lab: u64, quiz: u64) -> &'a Value {
    records
        .iter()
        .find(|r| {
            r["generic"].as_str().unwrap().eq_ignore_ascii_case(generic)
                && r["metadata"]["lab"] == lab
                && r["metadata"]["quiz"] == quiz
        })
        .unwrap_or_else(|| panic!("missing {} lab {} quiz {}", generic, lab, quiz))
}

#[test]
fn test_full_run() {
    logging::init(false);
    let dir = tempfile::tempdir().unwrap();
    let config = prepare_workspace(dir.path());

    let stats = App::initialize(config.clone()).unwrap().run().unwrap();

    assert_eq!(stats.merged, 3);
    assert_eq!(stats.untaggable, 1);
    assert_eq!(stats.unreadable, 2);

    let (_, records) = read_output(&config);
    assert_eq!(records.len(), stats.written);
    // lab1: Lisinopril, Metoprolol, Amlodipine | lab2 quiz2: Atorvastatin, Ezetimibe
    // lab2 quiz1: Metoprolol, Losartan
    assert_eq!(records.len(), 7);

    let lisinopril = find(&records, "Lisinopril", 1, 1);
    assert_eq!(lisinopril["generic"], "Lisinopril");
    assert_eq!(lisinopril["brand"], "Zestril");
    assert_eq!(lisinopril["class"], "ACE Inhibitor");
    assert_eq!(lisinopril["category"], "Antihypertensive");
    assert_eq!(lisinopril["moa"], "Blocks ACE");
    assert_eq!(lisinopril["metadata"]["week"], 1);
    assert_eq!(lisinopril["metadata"]["is_new"], false);

    let metoprolol_lab1 = find(&records, "Metoprolol", 1, 1);
    assert_eq!(metoprolol_lab1["brand"], "Lopressor; Toprol XL");
    assert!(metoprolol_lab1["moa"].is_null());
    assert!(metoprolol_lab1["metadata"].get("week").is_none());

    let amlodipine = find(&records, "Amlodipine", 1, 1);
    assert!(amlodipine["category"].is_null());
    assert!(amlodipine["moa"].is_null());

    let ezetimibe = find(&records, "Ezetimibe", 2, 2);
    assert!(ezetimibe["category"].is_null());
    assert!(ezetimibe["moa"].is_null());
    assert_eq!(ezetimibe["metadata"]["is_new"], true);

    let metoprolol_lab2 = find(&records, "Metoprolol", 2, 1);
    assert_eq!(metoprolol_lab2["brand"], "Lopressor");
    assert_eq!(metoprolol_lab2["class"], "Beta blocker");

    let losartan = find(&records, "Losartan", 2, 1);
    assert_eq!(losartan["brand"], "Cozaar");
    assert_eq!(losartan["moa"], "Prevents angiotensin II binding");

    assert!(!records
        .iter()
        .any(|r| r["generic"] == "Heparin" || r["generic"] == "Clopidogrel"));
}

#[test]
fn test_rerun_is_byte_identical() {
    logging::init(false);
    let dir = tempfile::tempdir().unwrap();
    let config = prepare_workspace(dir.path());

    App::initialize(config.clone()).unwrap().run().unwrap();
    let (first, _) = read_output(&config);

    App::initialize(config.clone()).unwrap().run().unwrap();
    let (second, _) = read_output(&config);

    assert_eq!(first, second);
}

#[test]
fn test_output_failure_is_fatal() {
    logging::init(false);
    let dir = tempfile::tempdir().unwrap();
    let mut config = prepare_workspace(dir.path());
    // 输出路径是已存在的目录
    config.output_path = dir.path().join("quizzes").to_string_lossy().to_string();

    let err = App::initialize(config).unwrap().run().unwrap_err();

    assert!(matches!(err, AppError::OutputWriteFailed { .. }));
}

#[test]
fn test_no_sources_writes_empty_pool() {
    logging::init(false);
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        output_path: dir.path().join("master_pool.json").to_string_lossy().to_string(),
        quiz_folder: dir.path().join("missing").to_string_lossy().to_string(),
        verbose_logging: false,
        tabular_sources: Vec::new(),
    };

    let stats = App::initialize(config.clone()).unwrap().run().unwrap();

    assert_eq!(stats.total_sources(), 0);
    let (_, records) = read_output(&config);
    assert!(records.is_empty());
}
