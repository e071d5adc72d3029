//! Output document assembly

use crate::layout::SheetSide;
use crate::render::{FaceContext, SharedResources, render_face};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};

use super::job::SheetTask;

/// Collects rendered faces into a new document
pub(crate) struct OutputBuilder {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    shared: SharedResources,
}

impl OutputBuilder {
    pub(crate) fn new() -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            kids: Vec::new(),
            shared: SharedResources::new(),
        }
    }

    /// Render the printed faces of one sheet: front, then back
    pub(crate) fn render_sheet(&mut self, ctx: &FaceContext<'_>, task: &SheetTask<'_>) -> Result<()> {
        for (side, grid) in task.sheet.printed_faces() {
            log::debug!(
                "Rendering sheet {} {}",
                task.index + 1,
                match side {
                    SheetSide::Front => "front",
                    SheetSide::Back => "back",
                }
            );
            let page_id = render_face(&mut self.document, ctx, grid, self.pages_id, &mut self.shared)?;
            self.kids.push(Object::Reference(page_id));
        }
        Ok(())
    }

    pub(crate) fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Link the page tree and catalog
    pub(crate) fn finish(mut self) -> Document {
        let count = self.kids.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.kids)),
            ("Count", Object::Integer(count)),
        ]);
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.document.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));
        self.document.trailer.set("Root", catalog_id);

        self.document
    }
}
