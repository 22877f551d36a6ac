use lopdf::{Dictionary, Document, Object, Stream};
use pdf_merge::*;

fn content_for(tag: &str, index: usize) -> Vec<u8> {
    format!("BT /F1 12 Tf 72 720 Td ({}{}) Tj ET", tag, index).into_bytes()
}

/// Document whose pages draw `tag0`, `tag1`, ... in order. The media box is
/// inherited from the page tree root.
fn create_test_pdf(tag: &str, num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    let resources_id = doc.add_object(Dictionary::from_iter(vec![(
        "Font",
        Object::Dictionary(Dictionary::from_iter(vec![("F1", Object::Reference(font_id))])),
    )]));

    let mut kids = Vec::new();
    for i in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content_for(tag, i)));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
        ("Resources", Object::Reference(resources_id)),
        (
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(595),
                Object::Integer(842),
            ]),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

fn serialize(mut doc: Document) -> Vec<u8> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    writer
}

fn page_contents(doc: &Document) -> Vec<Vec<u8>> {
    doc.get_pages()
        .into_values()
        .map(|id| doc.get_page_content(id).unwrap())
        .collect()
}

#[test]
fn test_merge_preserves_order() {
    let generated = create_test_pdf("G", 2);
    let manuscript = create_test_pdf("M", 5);

    let merged = merge_documents(&generated, &manuscript).unwrap();

    let mut expected: Vec<Vec<u8>> = (0..2).map(|i| content_for("G", i)).collect();
    expected.extend((0..5).map(|i| content_for("M", i)));

    assert_eq!(merged.get_pages().len(), 7);
    assert_eq!(page_contents(&merged), expected);
}

#[test]
fn test_inherited_attributes_resolved() {
    let merged = merge_documents(&create_test_pdf("G", 1), &create_test_pdf("M", 1)).unwrap();

    for page_id in merged.get_pages().into_values() {
        let page = merged.get_dictionary(page_id).unwrap();
        assert!(page.has(b"MediaBox"));
        assert!(page.has(b"Resources"));

        let parent = page.get(b"Parent").unwrap().as_reference().unwrap();
        let kids = merged
            .get_dictionary(parent)
            .unwrap()
            .get(b"Kids")
            .unwrap()
            .as_array()
            .unwrap();
        assert!(kids.iter().any(|k| k.as_reference().ok() == Some(page_id)));
    }
}

#[test]
fn test_merge_bytes_counts_pages() {
    let generated = serialize(create_test_pdf("G", 3));
    let manuscript = serialize(create_test_pdf("M", 5));

    let merged = merge_bytes(&generated, &manuscript).unwrap();
    assert_eq!(merged.generated_pages, 3);
    assert_eq!(merged.manuscript_pages, 5);
    assert_eq!(merged.total_pages(), 8);

    let reloaded = Document::load_mem(&merged.bytes).unwrap();
    let contents = page_contents(&reloaded);
    assert_eq!(contents[0], content_for("G", 0));
    assert_eq!(contents[3], content_for("M", 0));
    assert_eq!(contents[7], content_for("M", 4));
}

#[test]
fn test_corrupt_manuscript_is_malformed_input() {
    let generated = serialize(create_test_pdf("G", 2));

    let result = merge_bytes(&generated, b"this is not a pdf");
    assert!(matches!(result, Err(MergeError::MalformedInput(_))));
}

#[test]
fn test_corrupt_generated_document() {
    let manuscript = serialize(create_test_pdf("M", 2));

    let result = merge_bytes(b"%PDF-1.7 truncated", &manuscript);
    assert!(matches!(result, Err(MergeError::Generated(_))));
}

#[test]
fn test_empty_manuscript_rejected() {
    let result = merge_documents(&create_test_pdf("G", 2), &create_test_pdf("M", 0));
    assert!(matches!(result, Err(MergeError::NoPages("manuscript"))));
}

#[test]
fn test_cyclic_annotation_reference() {
    let mut manuscript = create_test_pdf("M", 1);
    let page_id = *manuscript.get_pages().values().next().unwrap();

    // Annotations point back at their page
    let annot_id = manuscript.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Annot".to_vec())),
        ("Subtype", Object::Name(b"Text".to_vec())),
        ("P", Object::Reference(page_id)),
    ]));
    manuscript
        .get_object_mut(page_id)
        .unwrap()
        .as_dict_mut()
        .unwrap()
        .set("Annots", Object::Array(vec![Object::Reference(annot_id)]));

    let merged = merge_documents(&create_test_pdf("G", 1), &manuscript).unwrap();
    let new_page_id = *merged.get_pages().get(&2).unwrap();

    let annots = merged
        .get_dictionary(new_page_id)
        .unwrap()
        .get(b"Annots")
        .unwrap()
        .as_array()
        .unwrap();
    let annot = merged
        .get_dictionary(annots[0].as_reference().unwrap())
        .unwrap();
    assert_eq!(
        annot.get(b"P").unwrap().as_reference().unwrap(),
        new_page_id
    );
}

#[tokio::test]
async fn test_async_merge() {
    let generated = serialize(create_test_pdf("G", 2));
    let manuscript = serialize(create_test_pdf("M", 5));

    let merged = merge(generated, manuscript).await.unwrap();
    assert_eq!(merged.total_pages(), 7);
}

#[tokio::test]
async fn test_merge_files() {
    use tempfile::NamedTempFile;

    let generated = NamedTempFile::new().unwrap();
    let manuscript = NamedTempFile::new().unwrap();
    let output = NamedTempFile::new().unwrap();

    std::fs::write(generated.path(), serialize(create_test_pdf("G", 2))).unwrap();
    std::fs::write(manuscript.path(), serialize(create_test_pdf("M", 4))).unwrap();

    let pages = merge_files(generated.path(), manuscript.path(), output.path())
        .await
        .unwrap();
    assert_eq!(pages, 6);

    let loaded = load_pdf(output.path()).await.unwrap();
    assert_eq!(loaded.get_pages().len(), 6);
}

#[tokio::test]
async fn test_merge_files_rejects_corrupt_manuscript() {
    use tempfile::NamedTempFile;

    let generated = NamedTempFile::new().unwrap();
    let manuscript = NamedTempFile::new().unwrap();
    let output = NamedTempFile::new().unwrap();

    std::fs::write(generated.path(), serialize(create_test_pdf("G", 2))).unwrap();
    std::fs::write(manuscript.path(), b"garbage").unwrap();

    let result = merge_files(generated.path(), manuscript.path(), output.path()).await;
    assert!(matches!(result, Err(MergeError::MalformedInput(_))));
    assert_eq!(std::fs::metadata(output.path()).unwrap().len(), 0);
}
