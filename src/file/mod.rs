// src/file/mod.rs
pub mod export;
pub mod upload;

pub use export::{export_cost_table, export_json, export_markdown, pick_save_path, ExportKind};
pub use upload::{pick_text_file, read_text_file};
