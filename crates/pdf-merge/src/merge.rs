//! Page-level concatenation of a generated document and a manuscript

use crate::copy::{IdMap, copy_page, register_pages};
use crate::io::{load_pdf, parse_generated, parse_manuscript, save_pdf, to_bytes};
use crate::types::*;
use lopdf::{Dictionary, Document, Object};
use std::path::Path;

/// Build a new document holding every page of `generated` followed by every
/// page of `manuscript`, each in its original order.
///
/// Page contents and resources are copied as they are; the outline, forms
/// and other catalog-level structures of both inputs are not carried over.
pub fn merge_documents(generated: &Document, manuscript: &Document) -> Result<Document> {
    let version = if manuscript.version > generated.version {
        manuscript.version.clone()
    } else {
        generated.version.clone()
    };
    let mut output = Document::with_version(version);
    let pages_id = output.new_object_id();

    let mut kids = Vec::new();
    for (label, source) in [("generated", generated), ("manuscript", manuscript)] {
        // Ids are only meaningful within one source document
        let mut cache = IdMap::new();
        let pages = register_pages(&mut output, source, pages_id, &mut cache)?;
        if pages.is_empty() {
            return Err(MergeError::NoPages(label));
        }

        for (page_id, new_id) in pages {
            copy_page(&mut output, source, page_id, new_id, pages_id, &mut cache)?;
            kids.push(Object::Reference(new_id));
        }
        log::debug!("Copied {} document pages", label);
    }

    let count = kids.len();
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(count as i64)),
    ]);
    output.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    Ok(output)
}

/// Merge two serialized documents.
///
/// The manuscript is parsed first so an unreadable upload is reported as
/// such before any other work is done.
pub fn merge_bytes(generated: &[u8], manuscript: &[u8]) -> Result<MergedPdf> {
    let manuscript = parse_manuscript(manuscript)?;
    let generated = parse_generated(generated)?;

    let generated_pages = generated.get_pages().len();
    let manuscript_pages = manuscript.get_pages().len();

    let mut merged = merge_documents(&generated, &manuscript)?;
    let bytes = to_bytes(&mut merged)?;

    log::info!(
        "Merged {} generated and {} manuscript pages",
        generated_pages,
        manuscript_pages
    );

    Ok(MergedPdf {
        bytes,
        generated_pages,
        manuscript_pages,
    })
}

/// Merge two serialized documents off the async runtime
pub async fn merge(generated: Vec<u8>, manuscript: Vec<u8>) -> Result<MergedPdf> {
    // Parsing and copying are CPU-bound, spawn blocking
    let merged =
        tokio::task::spawn_blocking(move || merge_bytes(&generated, &manuscript)).await??;
    Ok(merged)
}

/// Merge two PDF files into `output_path`, returning the merged page count
pub async fn merge_files(
    generated_path: impl AsRef<Path>,
    manuscript_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<usize> {
    let generated = load_pdf(generated_path).await?;
    let manuscript_bytes = tokio::fs::read(manuscript_path).await?;

    let merged = tokio::task::spawn_blocking(move || {
        let manuscript = parse_manuscript(&manuscript_bytes)?;
        merge_documents(&generated, &manuscript)
    })
    .await??;

    let pages = merged.get_pages().len();
    save_pdf(merged, output_path).await?;
    Ok(pages)
}
