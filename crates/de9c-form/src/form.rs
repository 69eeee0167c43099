//! Fillable form pages
//!
//! [`FormFields`] is the one capability the filler needs: address a field by
//! name and set its value. [`FormPage`] implements it over a clone of the
//! template's first page; a plain `BTreeMap` implements it for dry runs.

use crate::types::*;
use lopdf::{Document, Object, ObjectId, StringFormat};
use std::collections::BTreeMap;

/// Named, fillable fields of one page
pub trait FormFields {
    /// Names of every field on the page
    fn field_names(&self) -> Vec<String>;

    fn has_field(&self, name: &str) -> bool;

    /// Write `value` into the field. Returns `false` (and writes nothing) when
    /// the page has no field of that name.
    fn set_field(&mut self, name: &str, value: &str) -> bool;
}

impl FormFields for BTreeMap<String, String> {
    fn field_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn has_field(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn set_field(&mut self, name: &str, value: &str) -> bool {
        match self.get_mut(name) {
            Some(slot) => {
                *slot = value.to_string();
                true
            }
            None => false,
        }
    }
}

/// One clone of the template's first page with its widgets indexed by name
#[derive(Debug, Clone)]
pub struct FormPage {
    doc: Document,
    /// Field name -> widget annotations carrying that name
    fields: BTreeMap<String, Vec<ObjectId>>,
}

impl FormPage {
    /// Clone `template` and index the named widgets on its first page
    pub fn from_template(template: &Document) -> Result<Self> {
        let mut doc = template.clone();
        let page_id = first_page_id(&doc)?;
        let widgets = normalize_annotations(&mut doc, page_id)?;

        let mut fields: BTreeMap<String, Vec<ObjectId>> = BTreeMap::new();
        for id in widgets {
            let Ok(dict) = doc.get_dictionary(id) else {
                continue;
            };
            if let Ok(Object::String(bytes, _)) = dict.get(b"T") {
                fields.entry(decode_text_string(bytes)).or_default().push(id);
            }
        }

        Ok(Self { doc, fields })
    }

    /// Current value of a field, if the field exists and has one
    pub fn field_value(&self, name: &str) -> Option<String> {
        let id = *self.fields.get(name)?.first()?;
        match self.doc.get_dictionary(id).ok()?.get(b"V").ok()? {
            Object::String(bytes, _) => Some(decode_text_string(bytes)),
            _ => None,
        }
    }

    /// Append `suffix` to every field name on the page
    pub fn rename_fields(&mut self, suffix: &str) {
        let fields = std::mem::take(&mut self.fields);
        for (name, ids) in fields {
            let renamed = format!("{name}{suffix}");
            for &id in &ids {
                if let Ok(dict) = self.doc.get_dictionary_mut(id) {
                    dict.set("T", text_string(&renamed));
                }
            }
            self.fields.insert(renamed, ids);
        }
    }

    pub(crate) fn into_document(self) -> Document {
        self.doc
    }
}

impl FormFields for FormPage {
    fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn set_field(&mut self, name: &str, value: &str) -> bool {
        let Some(ids) = self.fields.get(name) else {
            return false;
        };
        for &id in ids {
            if let Ok(dict) = self.doc.get_dictionary_mut(id) {
                dict.set("V", text_string(value));
                // Stale appearance; viewers regenerate it from /V
                dict.remove(b"AP");
            }
        }
        true
    }
}

pub(crate) fn first_page_id(doc: &Document) -> Result<ObjectId> {
    doc.get_pages()
        .values()
        .next()
        .copied()
        .ok_or_else(|| De9cError::Template("template has no pages".to_string()))
}

/// Make every annotation on the page an indirect object so widgets can be
/// addressed by id. Returns the annotation ids in page order.
fn normalize_annotations(doc: &mut Document, page_id: ObjectId) -> Result<Vec<ObjectId>> {
    let annots = match doc.get_dictionary(page_id)?.get(b"Annots") {
        Ok(obj) => obj.clone(),
        Err(_) => return Ok(Vec::new()),
    };

    let (array_id, items) = match annots {
        Object::Array(items) => (None, items),
        Object::Reference(id) => (Some(id), doc.get_object(id)?.as_array()?.clone()),
        _ => return Ok(Vec::new()),
    };

    let mut ids = Vec::with_capacity(items.len());
    let mut normalized = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Object::Reference(id) => {
                ids.push(id);
                normalized.push(Object::Reference(id));
            }
            Object::Dictionary(dict) => {
                let id = doc.add_object(dict);
                ids.push(id);
                normalized.push(Object::Reference(id));
            }
            other => normalized.push(other),
        }
    }

    match array_id {
        Some(id) => {
            doc.objects.insert(id, Object::Array(normalized));
        }
        None => {
            doc.get_dictionary_mut(page_id)?
                .set("Annots", Object::Array(normalized));
        }
    }

    Ok(ids)
}

/// PDF text string: plain bytes for ASCII, UTF-16BE with BOM otherwise
pub(crate) fn text_string(text: &str) -> Object {
    let bytes = if text.is_ascii() {
        text.as_bytes().to_vec()
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        bytes
    };
    Object::String(bytes, StringFormat::Literal)
}

pub(crate) fn decode_text_string(bytes: &[u8]) -> String {
    match bytes.strip_prefix(&[0xFE, 0xFF]) {
        Some(utf16) => {
            let units: Vec<u16> = utf16
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        // PDFDocEncoding matches Latin-1 for everything a field name uses
        None => bytes.iter().map(|&b| b as char).collect(),
    }
}
