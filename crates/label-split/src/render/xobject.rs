//! Source pages as Form XObjects
//!
//! Each source page becomes one Form XObject in the output document. Every
//! label cut from that page draws the same XObject under its own clip, so
//! page content and resources are stored once per source page.

use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::page_tree::{PageBox, page_resources};

/// Wrap a source page as a Form XObject in `output`.
///
/// The XObject's BBox is the visible page box, so content outside the
/// CropBox never shows. `cache` maps source object IDs to their copies and
/// should be shared across pages of one run: fonts and images used on
/// several pages are then copied once.
pub fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    page_box: &PageBox,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let mut dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Form".to_vec())),
        ("FormType", Object::Integer(1)),
        ("BBox", Object::Array(page_box.to_array())),
    ]);

    if let Some(resources) = page_resources(source, page_id)? {
        let mut copier = ObjectCopier {
            output: &mut *output,
            source,
            cache,
        };
        dict.set("Resources", copier.copy(resources)?);
    }

    let mut stream = Stream::new(dict, page_content(source, page_id));
    // Not fatal: the stream is valid uncompressed
    let _ = stream.compress();

    Ok(output.add_object(stream))
}

/// Decoded content of every content stream of a page, in order.
///
/// Streams are joined with a newline so an operator at the end of one
/// cannot run into the operand at the start of the next. Unfiltered
/// streams are taken as stored; a filtered stream that fails to decode is
/// left out, since its encoded bytes would be read as operators.
fn page_content(source: &Document, page_id: ObjectId) -> Vec<u8> {
    let mut content = Vec::new();
    for stream_id in source.get_page_contents(page_id) {
        let Ok(stream) = source.get_object(stream_id).and_then(Object::as_stream) else {
            log::debug!("Content {:?} of page {:?} is not a stream", stream_id, page_id);
            continue;
        };
        match stream.decompressed_content() {
            Ok(data) => content.extend_from_slice(&data),
            Err(_) if stream.dict.has(b"Filter") => {
                log::warn!(
                    "Skipping content {:?} of page {:?}: filter could not be decoded",
                    stream_id,
                    page_id
                );
                continue;
            }
            Err(_) => content.extend_from_slice(&stream.content),
        }
        content.push(b'\n');
    }
    content
}

/// Deep copy an object from `source` into `output`, following references.
///
/// `/Parent` entries are dropped: they lead back into the source page tree.
/// Dangling references become `null`.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    ObjectCopier {
        output,
        source,
        cache,
    }
    .copy(obj)
}

struct ObjectCopier<'a> {
    output: &'a mut Document,
    source: &'a Document,
    cache: &'a mut HashMap<ObjectId, ObjectId>,
}

impl ObjectCopier<'_> {
    fn copy(&mut self, obj: &Object) -> Result<Object> {
        Ok(match obj {
            Object::Reference(id) => Object::Reference(self.copy_indirect(*id)?),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(dict)?),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.copy(item))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Object::Stream(stream) => {
                let mut copy = Stream::new(
                    self.copy_dictionary(&stream.dict)?,
                    stream.content.clone(),
                );
                copy.allows_compression = stream.allows_compression;
                Object::Stream(copy)
            }
            _ => obj.clone(),
        })
    }

    /// Copy an indirect object once and return its ID in the output.
    ///
    /// The output ID is reserved before the object body is copied, so a
    /// reference cycle ends at the reserved ID.
    fn copy_indirect(&mut self, id: ObjectId) -> Result<ObjectId> {
        if let Some(&new_id) = self.cache.get(&id) {
            return Ok(new_id);
        }

        let new_id = self.output.new_object_id();
        self.cache.insert(id, new_id);

        let source = self.source;
        let copied = match source.get_object(id) {
            Ok(object) => self.copy(object)?,
            Err(e) => {
                log::debug!("Dangling reference {:?} replaced with null: {}", id, e);
                Object::Null
            }
        };
        self.output.objects.insert(new_id, copied);

        Ok(new_id)
    }

    fn copy_dictionary(&mut self, dict: &Dictionary) -> Result<Dictionary> {
        let mut copy = Dictionary::new();
        for (key, value) in dict.iter() {
            if key.as_slice() != b"Parent" {
                copy.set(key.clone(), self.copy(value)?);
            }
        }
        Ok(copy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_breaks_reference_cycles() {
        let mut source = Document::with_version("1.7");
        let a = source.new_object_id();
        let b = source.new_object_id();
        source.objects.insert(
            a,
            Object::Dictionary(Dictionary::from_iter(vec![("Next", Object::Reference(b))])),
        );
        source.objects.insert(
            b,
            Object::Dictionary(Dictionary::from_iter(vec![("Next", Object::Reference(a))])),
        );

        let mut output = Document::with_version("1.7");
        let mut cache = HashMap::new();
        let copied = copy_object_deep(&mut output, &source, &Object::Reference(a), &mut cache)
            .unwrap();

        assert_eq!(output.objects.len(), 2);
        let new_a = copied.as_reference().unwrap();
        let new_b = output
            .get_dictionary(new_a)
            .unwrap()
            .get(b"Next")
            .unwrap()
            .as_reference()
            .unwrap();
        let back = output
            .get_dictionary(new_b)
            .unwrap()
            .get(b"Next")
            .unwrap()
            .as_reference()
            .unwrap();
        assert_eq!(back, new_a);
    }

    #[test]
    fn test_page_content_skips_undecodable_streams() {
        let mut source = Document::with_version("1.7");
        let plain = source.add_object(Stream::new(Dictionary::new(), b"0 0 m 10 10 l S".to_vec()));
        let broken = source.add_object(Stream::new(
            Dictionary::from_iter(vec![("Filter", Object::Name(b"UnknownDecode".to_vec()))]),
            b"encoded bytes".to_vec(),
        ));
        let page_id = source.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            (
                "Contents",
                Object::Array(vec![Object::Reference(broken), Object::Reference(plain)]),
            ),
        ]));

        let content = String::from_utf8(page_content(&source, page_id)).unwrap();
        assert!(!content.contains("encoded"));
        assert!(content.contains("0 0 m 10 10 l S"));
    }

    #[test]
    fn test_copy_drops_parent_and_dangling_references() {
        let source = Document::with_version("1.7");
        let dict = Object::Dictionary(Dictionary::from_iter(vec![
            ("Parent", Object::Reference((7, 0))),
            ("Font", Object::Reference((9, 0))),
        ]));

        let mut output = Document::with_version("1.7");
        let mut cache = HashMap::new();
        let copied = copy_object_deep(&mut output, &source, &dict, &mut cache).unwrap();
        let copied = copied.as_dict().unwrap();

        assert!(copied.get(b"Parent").is_err());
        let font_id = copied.get(b"Font").unwrap().as_reference().unwrap();
        assert_eq!(output.get_object(font_id).unwrap(), &Object::Null);
    }
}
