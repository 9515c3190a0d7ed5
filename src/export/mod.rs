//! 絞り込み結果の書き出し

pub mod excel;

pub use excel::{default_file_name, resolve_output_path, write_excel};
