//! Object copying between documents

use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Maps object ids of one source document to ids in the output
pub type IdMap = HashMap<ObjectId, ObjectId>;

/// Deep copy an object from `source` into `output`.
///
/// References are followed and every referenced object is copied once. The
/// target id is registered before the referenced object is copied, so cyclic
/// references resolve to the same new object.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut IdMap,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let copied = match source.get_object(*id) {
                Ok(referenced) => copy_object_deep(output, source, referenced, cache)?,
                Err(e) => {
                    log::warn!("Dangling reference {:?} replaced with null: {}", id, e);
                    Object::Null
                }
            };
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dictionary(
            output, source, dict, cache,
        )?)),
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => Ok(Object::Stream(Stream {
            dict: copy_dictionary(output, source, &stream.dict, cache)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        })),
        _ => Ok(obj.clone()),
    }
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut IdMap,
) -> Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    Ok(new_dict)
}

/// Reserve output ids for every page of `source`, and point its page tree
/// nodes at `pages_id`, so cross-page links land on the copies instead of
/// dragging the old tree along.
pub fn register_pages(
    output: &mut Document,
    source: &Document,
    pages_id: ObjectId,
    cache: &mut IdMap,
) -> Result<Vec<(ObjectId, ObjectId)>> {
    let mut mapping = Vec::new();

    for page_id in source.get_pages().into_values() {
        let new_id = output.new_object_id();
        cache.insert(page_id, new_id);
        mapping.push((page_id, new_id));

        for node in ancestors(source, page_id)? {
            cache.insert(node, pages_id);
        }
    }

    Ok(mapping)
}

/// Copy one page under `pages_id`, resolving inherited attributes so the
/// page renders the same outside its original tree.
pub fn copy_page(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    new_id: ObjectId,
    pages_id: ObjectId,
    cache: &mut IdMap,
) -> Result<()> {
    let page = source.get_dictionary(page_id)?;
    let mut new_page = Dictionary::new();

    for (key, value) in page.iter() {
        if key.as_slice() == b"Parent" {
            continue;
        }
        new_page.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }

    for key in INHERITABLE {
        if new_page.has(key) {
            continue;
        }
        if let Some(value) = inherited(source, page_id, key)? {
            new_page.set(key, copy_object_deep(output, source, &value, cache)?);
        }
    }

    new_page.set("Parent", Object::Reference(pages_id));
    output.objects.insert(new_id, Object::Dictionary(new_page));
    Ok(())
}

/// Page tree nodes above a page, nearest first
fn ancestors(source: &Document, page_id: ObjectId) -> Result<Vec<ObjectId>> {
    let mut nodes = Vec::new();
    let mut current = source.get_dictionary(page_id)?;

    while let Ok(parent) = current.get(b"Parent").and_then(Object::as_reference) {
        // Malformed trees can loop
        if nodes.contains(&parent) {
            break;
        }
        nodes.push(parent);
        current = source.get_dictionary(parent)?;
    }

    Ok(nodes)
}

fn inherited(source: &Document, page_id: ObjectId, key: &[u8]) -> Result<Option<Object>> {
    for node in ancestors(source, page_id)? {
        let dict = source.get_dictionary(node)?;
        if let Ok(value) = dict.get(key) {
            return Ok(Some(value.clone()));
        }
    }
    Ok(None)
}
