#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// In-memory PDF with `num_pages` US Letter pages.
///
/// Every page's content stream carries a `% page N` marker so tests can
/// tell which source page ended up in which output cell.
pub fn create_test_pdf(num_pages: usize) -> Document {
    create_sized_pdf(num_pages, 612, 792)
}

pub fn create_sized_pdf(num_pages: usize, width: i64, height: i64) -> Document {
    create_marked_pdf(num_pages, 1, width, height)
}

/// Like [`create_sized_pdf`], numbering markers from `first_marker`
pub fn create_marked_pdf(num_pages: usize, first_marker: usize, width: i64, height: i64) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for n in 0..num_pages {
        let content = format!("% page {}\nq Q", first_marker + n);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

pub fn to_bytes(doc: &mut Document) -> Vec<u8> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    writer
}

/// Output page IDs in page order
pub fn output_pages(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

pub fn page_size(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let media_box = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap();
    let number = |obj: &Object| match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        _ => panic!("MediaBox entry is not a number"),
    };
    (number(&media_box[2]), number(&media_box[3]))
}

/// Source page markers drawn on an output page, keyed by XObject name
pub fn drawn_pages(doc: &Document, page_id: ObjectId) -> Vec<(String, usize)> {
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();

    let mut drawn: Vec<(String, usize)> = xobjects
        .iter()
        .map(|(name, obj)| {
            let id = obj.as_reference().unwrap();
            let stream = doc.get_object(id).unwrap().as_stream().unwrap();
            let content = String::from_utf8_lossy(&stream.content);
            let marker = content
                .lines()
                .find_map(|line| line.strip_prefix("% page "))
                .expect("page marker");
            (
                String::from_utf8_lossy(name).into_owned(),
                marker.trim().parse().unwrap(),
            )
        })
        .collect();
    drawn.sort();
    drawn
}

pub fn content_of(doc: &Document, page_id: ObjectId) -> String {
    let page = doc.get_dictionary(page_id).unwrap();
    let content_id = page.get(b"Contents").unwrap().as_reference().unwrap();
    let stream = doc.get_object(content_id).unwrap().as_stream().unwrap();
    String::from_utf8_lossy(&stream.content).into_owned()
}

/// Point `page`'s resources (1-based) at an object the document lacks
pub fn break_resources(doc: &mut Document, page: u32) {
    let page_id = doc.get_pages()[&page];
    let missing = (doc.max_id + 100, 0);
    doc.get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .unwrap()
        .set("Resources", Object::Reference(missing));
}
