use lopdf::{Dictionary, Document, Object, ObjectId};

/// An output document under construction.
///
/// Pages are appended in order; `finish` writes the page tree and catalog.
pub struct OutputDocument {
    doc: Document,
    pages_id: ObjectId,
    page_refs: Vec<Object>,
}

impl OutputDocument {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_refs: Vec::new(),
        }
    }

    /// ID reserved for the page tree root, to use as each page's `/Parent`
    pub fn pages_id(&self) -> ObjectId {
        self.pages_id
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn push_page(&mut self, page_id: ObjectId) {
        self.page_refs.push(Object::Reference(page_id));
    }

    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    /// Write the page tree and catalog and return the finished document
    pub fn finish(mut self) -> Document {
        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_id)),
        ]));

        self.doc.trailer.set("Root", catalog_id);

        self.doc
    }
}

impl Default for OutputDocument {
    fn default() -> Self {
        Self::new()
    }
}
