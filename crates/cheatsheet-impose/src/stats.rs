use crate::layout::NUp;
use crate::plan::{ImpositionPlan, plan};
use crate::types::*;

/// Calculate statistics for a computed plan
pub fn calculate_statistics(plan: &ImpositionPlan) -> CheatSheetStatistics {
    let source_pages = plan.total_pages();

    let output_pages = plan.printed_face_count();
    let output_sheets = output_pages.div_ceil(2);

    let blank_cells = plan
        .sheets()
        .iter()
        .flat_map(|sheet| sheet.printed_faces())
        .map(|(_, grid)| grid.blank_cells())
        .sum();

    // A plan always covers at least one page
    let paper_saved_percent =
        ((1.0 - output_sheets as f64 / source_pages as f64) * 100.0).round() as i64;

    CheatSheetStatistics {
        source_pages,
        output_sheets,
        output_pages,
        blank_cells,
        paper_saved_percent,
    }
}

/// Plan and summarize a run over `total_pages` pages
pub fn statistics_for(total_pages: usize, layout: NUp) -> Result<CheatSheetStatistics> {
    if total_pages == 0 {
        return Err(ImposeError::NoPages);
    }
    Ok(calculate_statistics(&plan(total_pages, layout)))
}
