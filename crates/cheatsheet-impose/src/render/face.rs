//! Rendering one sheet face
//!
//! Produces a single output page from a grid: every non-blank cell gets
//! its source page drawn (scaled, centered, optionally turned), an
//! optional border and page-number label. The margin note is drawn once
//! per face.

use crate::constants::{
    BORDER_GRAY, HELVETICA_CHAR_WIDTH_RATIO, MARGIN_NOTE_BASELINE, MARGIN_NOTE_FONT_SIZE,
    MARGIN_NOTE_GRAY, PAGE_NUMBER_FONT_SIZE, PAGE_NUMBER_OFFSET,
};
use crate::layout::{CellPlacement, Rect, SheetGeometry, place_page};
use crate::options::CheatSheetOptions;
use crate::plan::Grid;
use crate::sequence::PageSequence;
use crate::types::{ImposeError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::xobject::{ObjectCopier, get_page_box};

/// Everything a face needs to resolve and draw its cells
#[derive(Debug, Clone, Copy)]
pub struct FaceContext<'a> {
    /// Source documents, in upload order
    pub documents: &'a [Document],
    /// Page object IDs of each source document
    pub page_ids: &'a [Vec<ObjectId>],
    pub sequence: &'a PageSequence,
    pub geometry: &'a SheetGeometry,
    pub options: &'a CheatSheetOptions,
}

impl FaceContext<'_> {
    /// Resolve a 1-based sequence position to its source page
    fn source_page(&self, position: usize) -> Result<(usize, ObjectId)> {
        let entry = self.sequence.get(position).ok_or_else(|| {
            ImposeError::Render(format!("Sequence position {} has no source page", position))
        })?;

        self.page_ids
            .get(entry.document)
            .and_then(|ids| ids.get(entry.page - 1))
            .map(|&id| (entry.document, id))
            .ok_or_else(|| {
                ImposeError::Render(format!(
                    "Document {} has no page {}",
                    entry.document + 1,
                    entry.page
                ))
            })
    }
}

/// Objects shared by all faces of one output document
#[derive(Debug, Default)]
pub struct SharedResources {
    copiers: HashMap<usize, ObjectCopier>,
    forms: HashMap<(usize, ObjectId), ObjectId>,
    font: Option<ObjectId>,
}

impl SharedResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form XObject for a source page, embedding it on first use
    fn form(
        &mut self,
        output: &mut Document,
        documents: &[Document],
        document: usize,
        page_id: ObjectId,
    ) -> Result<ObjectId> {
        if let Some(&id) = self.forms.get(&(document, page_id)) {
            return Ok(id);
        }

        let copier = self.copiers.entry(document).or_default();
        let id = copier.embed_page(output, &documents[document], page_id)?;
        self.forms.insert((document, page_id), id);
        Ok(id)
    }

    fn font(&mut self, output: &mut Document) -> ObjectId {
        *self.font.get_or_insert_with(|| {
            let mut font_dict = Dictionary::new();
            font_dict.set("Type", Object::Name(b"Font".to_vec()));
            font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
            font_dict.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
            font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
            output.add_object(font_dict)
        })
    }
}

/// Render one face of a sheet as a new output page.
///
/// Returns the ID of the page dictionary; the caller links it into the
/// page tree.
pub fn render_face(
    output: &mut Document,
    ctx: &FaceContext<'_>,
    grid: &Grid,
    parent_pages_id: ObjectId,
    shared: &mut SharedResources,
) -> Result<ObjectId> {
    let geometry = ctx.geometry;
    let options = ctx.options;

    let mut content_ops = String::new();
    let mut xobjects = Dictionary::new();
    let mut needs_font = false;

    for (pos, page) in grid.positions() {
        let Some(position) = page else {
            continue;
        };

        let (document, page_id) = ctx.source_page(position)?;
        let page_box = get_page_box(&ctx.documents[document], page_id)?;
        let form_id = shared.form(output, ctx.documents, document, page_id)?;

        let xobject_name = format!("P{}", pos.index(grid.cols()));
        xobjects.set(xobject_name.as_bytes(), Object::Reference(form_id));

        let cell = geometry.cell_bounds(pos);
        let placement = place_page(
            &cell,
            page_box.width,
            page_box.height,
            options.scaling_mode,
            options.auto_rotate,
        );
        content_ops.push_str(&placement_ops(&xobject_name, &placement, page_box.origin()));

        if let Some(width) = options.border.width_pt() {
            content_ops.push_str(&border_ops(&cell, width));
        }

        if options.page_numbers {
            content_ops.push_str(&page_number_ops(&cell, position));
            needs_font = true;
        }
    }

    if !options.margin_note.trim().is_empty() {
        content_ops.push_str(&margin_note_ops(&options.margin_note, geometry.page_width_pt));
        needs_font = true;
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));
    if needs_font {
        let mut fonts = Dictionary::new();
        fonts.set("F1", Object::Reference(shared.font(output)));
        resources.set("Font", Object::Dictionary(fonts));
    }

    let content_id = output.add_object(Stream::new(Dictionary::new(), content_ops.into_bytes()));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(geometry.page_width_pt),
            Object::Real(geometry.page_height_pt),
        ]),
    );
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

// =============================================================================
// Content Stream Helpers
// =============================================================================

/// Draw a form XObject with the placement's transform.
///
/// Pages that spill out of their cell (fill mode) are clipped to it.
fn placement_ops(xobject_name: &str, placement: &CellPlacement, origin: (f32, f32)) -> String {
    let [a, b, c, d, e, f] = placement.transform(origin);
    let clip = if placement.overflows() {
        let cell = &placement.cell;
        format!("{} {} {} {} re W n ", cell.x, cell.y, cell.width, cell.height)
    } else {
        String::new()
    };

    format!(
        "q {}{} {} {} {} {} {} cm /{} Do Q\n",
        clip, a, b, c, d, e, f, xobject_name
    )
}

fn border_ops(cell: &Rect, width: f32) -> String {
    format!(
        "q {} G {} w {} {} {} {} re S Q\n",
        BORDER_GRAY, width, cell.x, cell.y, cell.width, cell.height
    )
}

fn page_number_ops(cell: &Rect, position: usize) -> String {
    let text = position.to_string();
    let x = cell.center_x() - text_width(&text, PAGE_NUMBER_FONT_SIZE) / 2.0;
    let y = cell.y + PAGE_NUMBER_OFFSET;
    format!(
        "BT /F1 {} Tf {} {} Td ({}) Tj ET\n",
        PAGE_NUMBER_FONT_SIZE, x, y, text
    )
}

fn margin_note_ops(note: &str, page_width: f32) -> String {
    let x = (page_width - text_width(note, MARGIN_NOTE_FONT_SIZE)) / 2.0;
    format!(
        "q {} g BT /F1 {} Tf {} {} Td ({}) Tj ET Q\n",
        MARGIN_NOTE_GRAY,
        MARGIN_NOTE_FONT_SIZE,
        x,
        MARGIN_NOTE_BASELINE,
        encode_pdf_text(note)
    )
}

/// Approximate Helvetica text width
fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * HELVETICA_CHAR_WIDTH_RATIO
}

/// Encode text for a literal string in a WinAnsi-encoded font.
///
/// Delimiters are escaped, Latin-1 characters are written as octal
/// escapes, anything else becomes `?`.
pub(crate) fn encode_pdf_text(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                encoded.push('\\');
                encoded.push(ch);
            }
            ' '..='~' => encoded.push(ch),
            '\u{80}'..='\u{ff}' => encoded.push_str(&format!("\\{:03o}", ch as u32)),
            _ => encoded.push('?'),
        }
    }
    encoded
}
