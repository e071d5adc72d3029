//! Embedding source pages as Form XObjects
//!
//! Each source page is wrapped in a Form XObject whose resources are
//! deep-copied from the source document, then drawn into its cell with a
//! transformation matrix.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

// =============================================================================
// Page Boxes
// =============================================================================

/// A source page's MediaBox in its own user space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PageBox {
    pub fn origin(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn to_array(self) -> Vec<Object> {
        vec![
            Object::Real(self.x),
            Object::Real(self.y),
            Object::Real(self.x + self.width),
            Object::Real(self.y + self.height),
        ]
    }
}

impl Default for PageBox {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: DEFAULT_PAGE_DIMENSIONS.0,
            height: DEFAULT_PAGE_DIMENSIONS.1,
        }
    }
}

/// Get the MediaBox of a source page, falling back to US Letter.
///
/// MediaBox is inheritable, so the page tree is searched upwards.
pub fn get_page_box(doc: &Document, page_id: ObjectId) -> Result<PageBox> {
    let page_dict = doc.get_dictionary(page_id)?;

    let Some(Object::Array(values)) = inherited_attribute(doc, page_dict, b"MediaBox") else {
        return Ok(PageBox::default());
    };

    let numbers: Vec<f32> = values
        .iter()
        .filter_map(|obj| extract_number(resolve(doc, obj)))
        .collect();

    match numbers[..] {
        [x0, y0, x1, y1] if x1 != x0 && y1 != y0 => Ok(PageBox {
            x: x0.min(x1),
            y: y0.min(y1),
            width: (x1 - x0).abs(),
            height: (y1 - y0).abs(),
        }),
        _ => Ok(PageBox::default()),
    }
}

/// Get source page dimensions (width, height) in points
pub fn get_page_dimensions(doc: &Document, page_id: ObjectId) -> Result<(f32, f32)> {
    Ok(get_page_box(doc, page_id)?.dimensions())
}

/// Look up a page attribute, following `/Parent` links for inherited keys.
fn inherited_attribute<'a>(
    doc: &'a Document,
    page_dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    let mut current = page_dict;
    // Bounded walk; malformed files can contain parent cycles
    for _ in 0..32 {
        if let Ok(value) = current.get(key) {
            return Some(resolve(doc, value));
        }
        let parent_id = current.get(b"Parent").ok()?.as_reference().ok()?;
        current = doc.get_dictionary(parent_id).ok()?;
    }
    None
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

// =============================================================================
// XObject Creation
// =============================================================================

/// Copies objects from one source document into the output.
///
/// Keeps a map of already-copied object IDs, so shared resources such as
/// fonts are copied once per source document.
#[derive(Debug, Default)]
pub struct ObjectCopier {
    copied: HashMap<ObjectId, ObjectId>,
}

impl ObjectCopier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a source page in a Form XObject inside `output`.
    pub fn embed_page(
        &mut self,
        output: &mut Document,
        source: &Document,
        page_id: ObjectId,
    ) -> Result<ObjectId> {
        let page_dict = source.get_dictionary(page_id)?;
        let page_box = get_page_box(source, page_id)?;
        let content = get_page_content(source, page_dict)?;

        let mut form = Dictionary::new();
        form.set("Type", Object::Name(b"XObject".to_vec()));
        form.set("Subtype", Object::Name(b"Form".to_vec()));
        form.set("FormType", Object::Integer(1));
        form.set("BBox", Object::Array(page_box.to_array()));

        if let Some(resources) = inherited_attribute(source, page_dict, b"Resources") {
            form.set("Resources", self.copy(output, source, resources)?);
        }

        Ok(output.add_object(Stream::new(form, content)))
    }

    /// Deep copy `obj` into `output`, following references.
    pub fn copy(&mut self, output: &mut Document, source: &Document, obj: &Object) -> Result<Object> {
        match obj {
            Object::Reference(id) => {
                if let Some(&new_id) = self.copied.get(id) {
                    return Ok(Object::Reference(new_id));
                }

                // Reserve the ID first so reference cycles terminate
                let new_id = output.new_object_id();
                self.copied.insert(*id, new_id);

                let copied = self.copy(output, source, source.get_object(*id)?)?;
                output.objects.insert(new_id, copied);
                Ok(Object::Reference(new_id))
            }
            Object::Dictionary(dict) => Ok(Object::Dictionary(self.copy_dictionary(
                output, source, dict,
            )?)),
            Object::Array(items) => {
                let items: Result<Vec<_>> = items
                    .iter()
                    .map(|item| self.copy(output, source, item))
                    .collect();
                Ok(Object::Array(items?))
            }
            Object::Stream(stream) => {
                let mut copy = Stream::new(
                    self.copy_dictionary(output, source, &stream.dict)?,
                    stream.content.clone(),
                );
                copy.allows_compression = stream.allows_compression;
                Ok(Object::Stream(copy))
            }
            _ => Ok(obj.clone()),
        }
    }

    fn copy_dictionary(
        &mut self,
        output: &mut Document,
        source: &Document,
        dict: &Dictionary,
    ) -> Result<Dictionary> {
        let mut copy = Dictionary::new();
        for (key, value) in dict.iter() {
            // Back-links into the page tree would drag in every page
            if key.as_slice() == b"Parent" {
                continue;
            }
            copy.set(key.clone(), self.copy(output, source, value)?);
        }
        Ok(copy)
    }
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Get the decoded content stream data of a page.
fn get_page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(Vec::new()), // No content = blank page
    };

    match resolve(doc, contents) {
        Object::Stream(stream) => Ok(stream_bytes(stream)),
        Object::Array(parts) => {
            let mut result = Vec::new();
            for part in parts {
                if let Object::Stream(stream) = resolve(doc, part) {
                    result.extend_from_slice(&stream_bytes(stream));
                    result.push(b'\n');
                }
            }
            Ok(result)
        }
        _ => Ok(Vec::new()),
    }
}

fn stream_bytes(stream: &Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}
