//! In-memory PDF fixtures built with lopdf.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// Content of one fixture page.
#[derive(Debug, Clone)]
pub enum PageSpec {
    /// One text line per entry
    Text(Vec<String>),
    /// Vector drawing only, no text operators
    Graphics,
    /// No content stream at all
    Blank,
    /// `/Contents` is a plain integer instead of a stream
    BrokenContents,
}

impl PageSpec {
    pub fn text<S: AsRef<str>>(lines: &[S]) -> Self {
        PageSpec::Text(lines.iter().map(|l| l.as_ref().to_string()).collect())
    }
}

/// Builder for small, valid PDF documents.
#[derive(Debug, Clone, Default)]
pub struct PdfBuilder {
    pages: Vec<PageSpec>,
    info: Vec<(String, String)>,
    bookmarks: Vec<(String, usize)>,
    tagged: bool,
    media_box: Option<(i64, i64)>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: PageSpec) -> Self {
        self.pages.push(page);
        self
    }

    /// Add a string entry to the trailer Info dictionary.
    pub fn info(mut self, key: &str, value: &str) -> Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a top-level bookmark pointing at a 0-based page index.
    pub fn bookmark(mut self, title: &str, page_index: usize) -> Self {
        self.bookmarks.push((title.to_string(), page_index));
        self
    }

    pub fn tagged(mut self) -> Self {
        self.tagged = true;
        self
    }

    pub fn media_box(mut self, width: i64, height: i64) -> Self {
        self.media_box = Some((width, height));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut page_ids: Vec<ObjectId> = Vec::new();
        for spec in &self.pages {
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Resources" => resources_id,
            };
            if let PageSpec::BrokenContents = spec {
                page.set("Contents", 42_i64);
            }
            if let Some(operations) = page_operations(spec) {
                let content = Content { operations };
                let stream = Stream::new(Dictionary::new(), content.encode().unwrap());
                page.set("Contents", doc.add_object(stream));
            }
            page_ids.push(doc.add_object(page));
        }

        let (width, height) = self.media_box.unwrap_or((612, 792));
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
            "Count" => page_ids.len() as i64,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        };
        if self.tagged {
            catalog.set("MarkInfo", dictionary! { "Marked" => true });
        }
        if !self.bookmarks.is_empty() {
            let outlines_id = add_outline(&mut doc, &self.bookmarks, &page_ids);
            catalog.set("Outlines", outlines_id);
        }
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", catalog_id);

        if !self.info.is_empty() {
            let mut info = Dictionary::new();
            for (key, value) in &self.info {
                info.set(key.as_bytes().to_vec(), Object::string_literal(value.as_str()));
            }
            let info_id = doc.add_object(info);
            doc.trailer.set("Info", info_id);
        }

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }
}

fn page_operations(spec: &PageSpec) -> Option<Vec<Operation>> {
    match spec {
        PageSpec::Blank | PageSpec::BrokenContents => None,
        PageSpec::Graphics => Some(vec![
            Operation::new("m", vec![0.into(), 0.into()]),
            Operation::new("l", vec![100.into(), 100.into()]),
            Operation::new("S", vec![]),
        ]),
        PageSpec::Text(lines) => {
            let mut ops = vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
            ];
            for (i, line) in lines.iter().enumerate() {
                if i > 0 {
                    ops.push(Operation::new("Td", vec![0.into(), (-14).into()]));
                }
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(line.as_str())],
                ));
            }
            ops.push(Operation::new("ET", vec![]));
            Some(ops)
        }
    }
}

fn add_outline(doc: &mut Document, bookmarks: &[(String, usize)], page_ids: &[ObjectId]) -> ObjectId {
    let outlines_id = doc.new_object_id();
    let item_ids: Vec<ObjectId> = bookmarks.iter().map(|_| doc.new_object_id()).collect();

    for (i, (title, page_index)) in bookmarks.iter().enumerate() {
        let mut item = dictionary! {
            "Title" => Object::string_literal(title.as_str()),
            "Parent" => outlines_id,
            "Dest" => vec![Object::Reference(page_ids[*page_index]), "Fit".into()],
        };
        if i + 1 < item_ids.len() {
            item.set("Next", item_ids[i + 1]);
        }
        if i > 0 {
            item.set("Prev", item_ids[i - 1]);
        }
        doc.objects.insert(item_ids[i], Object::Dictionary(item));
    }

    doc.objects.insert(
        outlines_id,
        Object::Dictionary(dictionary! {
            "Type" => "Outlines",
            "First" => item_ids[0],
            "Last" => item_ids[item_ids.len() - 1],
            "Count" => item_ids.len() as i64,
        }),
    );
    outlines_id
}

/// "Hello world" on `lines` separate lines.
pub fn hello_lines(lines: usize) -> PageSpec {
    PageSpec::Text(vec!["Hello world".to_string(); lines])
}
