//! A prepared cheat-sheet run
//!
//! [`ImpositionJob`] resolves everything up front (page sequence, plan,
//! output orientation, geometry) and then renders sheets one at a time,
//! in plan order.

use crate::constants::mm_to_pt;
use crate::layout::{SheetGeometry, create_sheet_geometry};
use crate::options::CheatSheetOptions;
use crate::plan::{ImpositionPlan, Sheet, plan};
use crate::render::{FaceContext, get_page_dimensions};
use crate::sequence::{PageSelection, PageSequence};
use crate::types::*;
use lopdf::{Document, ObjectId};

use super::output::OutputBuilder;

/// Rendering work for one sheet of the plan
#[derive(Debug, Clone, Copy)]
pub struct SheetTask<'a> {
    /// 0-based sheet index
    pub index: usize,
    pub sheet: &'a Sheet,
}

#[derive(Debug)]
pub struct ImpositionJob<'a> {
    documents: &'a [Document],
    options: &'a CheatSheetOptions,
    page_ids: Vec<Vec<ObjectId>>,
    sequence: PageSequence,
    plan: ImpositionPlan,
    orientation: Orientation,
    geometry: SheetGeometry,
}

impl<'a> ImpositionJob<'a> {
    /// Prepare a run over `documents`.
    ///
    /// Page ranges are taken from `options.input_files` by position;
    /// documents without an entry contribute every page.
    pub fn new(documents: &'a [Document], options: &'a CheatSheetOptions) -> Result<Self> {
        let page_ids: Vec<Vec<ObjectId>> = documents
            .iter()
            .map(|doc| doc.get_pages().values().copied().collect())
            .collect();

        let selections: Vec<PageSelection<'_>> = page_ids
            .iter()
            .enumerate()
            .map(|(i, ids)| PageSelection {
                page_count: ids.len(),
                range: options.page_range(i),
            })
            .collect();

        let sequence = PageSequence::build(&selections);
        let Some(first) = sequence.get(1) else {
            return Err(ImposeError::NoPages);
        };

        let plan = plan(sequence.len(), options.layout);

        let first_page = get_page_dimensions(
            &documents[first.document],
            page_ids[first.document][first.page - 1],
        )?;
        let orientation = options.orientation.resolve(first_page);

        let (width_mm, height_mm) = options.paper_size.dimensions_with_orientation(orientation);
        let geometry = create_sheet_geometry(
            options.layout,
            mm_to_pt(width_mm),
            mm_to_pt(height_mm),
            options.margin_mm,
            options.spacing_mm,
        );
        if !geometry.has_usable_cells() {
            return Err(ImposeError::Config(format!(
                "Margin and spacing leave no room for a {} grid",
                options.layout
            )));
        }

        log::info!(
            "Planned {} pages as {} sheets ({}, {:?})",
            sequence.len(),
            plan.len(),
            options.layout,
            orientation
        );

        Ok(Self {
            documents,
            options,
            page_ids,
            sequence,
            plan,
            orientation,
            geometry,
        })
    }

    pub fn plan(&self) -> &ImpositionPlan {
        &self.plan
    }

    pub fn sequence(&self) -> &PageSequence {
        &self.sequence
    }

    /// Resolved output orientation
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn geometry(&self) -> &SheetGeometry {
        &self.geometry
    }

    /// Per-sheet work in plan order.
    ///
    /// Lazy and restartable: each call starts again from the first sheet.
    pub fn tasks(&self) -> impl Iterator<Item = SheetTask<'_>> + Clone {
        self.plan
            .sheets()
            .iter()
            .enumerate()
            .map(|(index, sheet)| SheetTask { index, sheet })
    }

    /// Render every sheet.
    ///
    /// `progress(done, total)` is called after each sheet.
    pub fn run(&self, progress: impl FnMut(usize, usize)) -> Result<Document> {
        self.run_limited(self.plan.len(), progress)
    }

    /// Render at most the first `max_sheets` sheets.
    ///
    /// The first error aborts the run and no document is returned.
    pub fn run_limited(
        &self,
        max_sheets: usize,
        mut progress: impl FnMut(usize, usize),
    ) -> Result<Document> {
        let total = self.plan.len().min(max_sheets);
        let ctx = self.face_context();
        let mut output = OutputBuilder::new();

        for task in self.tasks().take(total) {
            output.render_sheet(&ctx, &task)?;
            progress(task.index + 1, total);
        }

        log::info!(
            "Rendered {} sheets into {} output pages",
            total,
            output.page_count()
        );
        Ok(output.finish())
    }

    fn face_context(&self) -> FaceContext<'_> {
        FaceContext {
            documents: self.documents,
            page_ids: &self.page_ids,
            sequence: &self.sequence,
            geometry: &self.geometry,
            options: self.options,
        }
    }
}
