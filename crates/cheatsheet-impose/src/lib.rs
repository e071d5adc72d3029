mod constants;
mod history;
pub mod impose;
pub mod layout;
mod options;
mod page_range;
mod plan;
mod preview;
pub mod render;
mod sequence;
mod stats;
mod types;

pub use constants::{MAX_INPUT_BYTES, mm_to_pt, pt_to_mm};
pub use history::OptionsHistory;
pub use impose::{
    ImpositionJob, SheetTask, check_pdf_bytes, impose, load_multiple_pdfs, load_pdf,
    load_pdf_bytes, save_pdf, save_pdf_bytes,
};
pub use layout::{GridPosition, NUp, SheetSide};
pub use options::*;
pub use page_range::parse_page_range;
pub use plan::*;
pub use preview::generate_preview;
pub use sequence::*;
pub use stats::{calculate_statistics, statistics_for};
pub use types::*;
