pub mod item_extractor;
pub mod pool_writer;
pub mod row_extractor;
pub mod tag_resolver;

pub use item_extractor::{extract_items, extract_moa};
pub use pool_writer::PoolWriter;
pub use row_extractor::{extract_rows, Extraction};
pub use tag_resolver::{TagResolver, TagRule};
