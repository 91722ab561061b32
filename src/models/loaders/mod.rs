pub mod csv_loader;
pub mod json_loader;
pub mod toml_loader;

pub use csv_loader::load_csv_rows;
pub use json_loader::{list_quiz_bank_files, load_quiz_bank};
pub use toml_loader::load_config_manifest;
