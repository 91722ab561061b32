pub mod drug;
pub mod loaders;
pub mod provenance;
pub mod quiz_bank;
pub mod source;

pub use drug::{DrugRecord, RawCandidate};
pub use loaders::{list_quiz_bank_files, load_csv_rows, load_quiz_bank};
pub use provenance::ProvenanceTag;
pub use quiz_bank::{DrugMapping, QuizBank, QuizItem, QuizPools};
pub use source::{Source, SourceContent, TabularLayout};
