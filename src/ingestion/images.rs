//! Image extraction from PDF page resources

use lopdf::{Dictionary, Document, Object};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// An image written to disk during extraction
#[derive(Debug, Clone)]
pub struct SavedImage {
    /// 1-based page the image came from
    pub page: u32,
    /// Path of the saved file
    pub path: PathBuf,
}

/// Extract embedded images and save them under `output_dir`
///
/// Walks each page's XObject resources and dumps `Image` streams as
/// `page_{p}_img_{i}.{ext}`. Streams that are not plain JPEG/JPEG2000
/// are written with their raw content; decoding filters is the PDF
/// library's concern, not ours.
pub fn extract_images(data: &[u8], output_dir: &Path) -> Result<Vec<SavedImage>> {
    let doc = Document::load_mem(data).map_err(|e| Error::pdf(e.to_string()))?;
    std::fs::create_dir_all(output_dir)?;

    let mut saved = Vec::new();

    for (page_number, page_id) in doc.get_pages() {
        let Ok(page_dict) = doc.get_dictionary(page_id) else {
            continue;
        };
        let Some(resources) = resolve_dict(&doc, page_dict, b"Resources") else {
            continue;
        };
        let Some(xobjects) = resolve_dict(&doc, resources, b"XObject") else {
            continue;
        };

        let mut index = 0u32;
        for (_name, object) in xobjects.iter() {
            let Object::Reference(id) = object else {
                continue;
            };
            let Ok(Object::Stream(stream)) = doc.get_object(*id) else {
                continue;
            };

            let subtype = stream
                .dict
                .get(b"Subtype")
                .and_then(|o| o.as_name())
                .unwrap_or_default();
            if subtype != b"Image".as_slice() {
                continue;
            }

            index += 1;
            let ext = image_extension(&stream.dict);
            let filename = format!("page_{}_img_{}.{}", page_number, index, ext);
            let path = output_dir.join(filename);
            std::fs::write(&path, &stream.content)?;

            tracing::debug!(page = page_number, path = %path.display(), "saved image");
            saved.push(SavedImage {
                page: page_number,
                path,
            });
        }
    }

    if saved.is_empty() {
        tracing::info!("no images found in the PDF");
    } else {
        tracing::info!(count = saved.len(), "extracted images");
    }

    Ok(saved)
}

/// Resolve a dictionary entry that may be inline or a reference
fn resolve_dict<'a>(doc: &'a Document, dict: &'a Dictionary, key: &[u8]) -> Option<&'a Dictionary> {
    match dict.get(key).ok()? {
        Object::Dictionary(inner) => Some(inner),
        Object::Reference(id) => doc.get_dictionary(*id).ok(),
        _ => None,
    }
}

/// Pick a file extension from the stream's filter
fn image_extension(dict: &Dictionary) -> &'static str {
    let filter = match dict.get(b"Filter") {
        Ok(Object::Name(name)) => name.as_slice(),
        Ok(Object::Array(filters)) => filters
            .last()
            .and_then(|o| o.as_name().ok())
            .unwrap_or_default(),
        _ => &[],
    };

    if filter == b"DCTDecode".as_slice() {
        "jpg"
    } else if filter == b"JPXDecode".as_slice() {
        "jp2"
    } else {
        "bin"
    }
}
