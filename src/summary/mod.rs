//! Model response handling
//!
//! Splits a summary into free text and the tasks table, then renders both into
//! a right-to-left Word document.

mod render;
mod table;

pub use render::{compose_document, render_summary, RLM, SUMMARY_HEADING, TARGET_COLUMNS};
pub use table::{free_text, parse_table_block, TableBlock, TABLE_MARKER};
