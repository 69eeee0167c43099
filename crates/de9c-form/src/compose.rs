//! Building the multi-page return from the one-page template
//!
//! 1. Clone the template page once per output page and fill each clone
//! 2. Tag field names on pages after the first so no two pages share a field
//! 3. Write grand totals and the signature on page 1
//! 4. Merge the clones under one page tree and AcroForm

use crate::fields::{self, page_tag};
use crate::fill::{fill_grand_totals, fill_page};
use crate::form::{FormFields, FormPage, first_page_id};
use crate::loader::load_employees;
use crate::options::FillOptions;
use crate::paginate::{grand_totals, paginate};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::Path;

/// Page attributes a page may inherit from its page tree parents
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Load the blank template
pub fn load_template(path: impl AsRef<Path>) -> Result<Document> {
    let bytes = std::fs::read(path)?;
    let doc = Document::load_mem(&bytes)?;
    Ok(doc)
}

/// Save the filled return
pub fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer)?;
    std::fs::write(path, writer)?;
    Ok(())
}

/// Fill one template clone per page and merge them into the final document
pub fn build_return(
    template: &Document,
    employees: &[EmployeeRecord],
    options: &FillOptions,
) -> Result<(Document, FillSummary)> {
    options.validate()?;

    let pages = paginate(employees);
    let page_count = pages.len();
    let totals = grand_totals(&pages);

    let blank = FormPage::from_template(template)?;
    if blank.field_names().is_empty() {
        return Err(De9cError::Template(
            "first page has no named form fields".to_string(),
        ));
    }
    let missing_fields = missing_contract_fields(&blank);

    let mut filled = Vec::with_capacity(page_count);
    for page in &pages {
        log::debug!(
            "Filling page {} of {} ({} employees)",
            page.number(),
            page_count,
            page.employees.len()
        );
        let mut form = blank.clone();
        fill_page(&mut form, &options.header, page, page_count);
        if page.index == 0 {
            fill_grand_totals(&mut form, &totals, &options.signer);
        }
        if let Some(tag) = page_tag(page.number()) {
            form.rename_fields(&tag);
        }
        filled.push(form);
    }

    let doc = merge_pages(filled, &template.version)?;
    let summary = FillSummary {
        employees: employees.len(),
        pages: page_count,
        page_totals: pages.iter().map(|page| page.totals).collect(),
        grand_totals: totals,
        missing_fields,
    };

    Ok((doc, summary))
}

/// Load the CSV and template, fill the return and write it to `output_path`
pub fn fill_return(
    csv_path: impl AsRef<Path>,
    template_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    options: &FillOptions,
) -> Result<FillSummary> {
    options.validate()?;

    let employees = load_employees(csv_path)?;
    let template = load_template(template_path)?;
    let (doc, summary) = build_return(&template, &employees, options)?;

    let output_path = output_path.as_ref();
    save_pdf(doc, output_path)?;
    log::info!(
        "Wrote {} page(s) for {} employees to {}",
        summary.pages,
        summary.employees,
        output_path.display()
    );

    Ok(summary)
}

/// Contract fields the template page does not carry
pub fn missing_contract_fields(form: &impl FormFields) -> Vec<String> {
    fields::contract_fields()
        .into_iter()
        .filter(|name| !form.has_field(name))
        .collect()
}

/// Concatenate the first page of every form under a fresh page tree
fn merge_pages(forms: Vec<FormPage>, version: &str) -> Result<Document> {
    let mut output = Document::with_version(version);
    let pages_tree_id = output.new_object_id();

    let mut kids = Vec::with_capacity(forms.len());
    let mut form_fields = Vec::new();
    let mut acroform: Option<Dictionary> = None;

    for form in forms {
        let mut doc = form.into_document();
        doc.renumber_objects_with(output.max_id + 1);
        let doc_max_id = doc.objects.keys().map(|id| id.0).max().unwrap_or(0);

        let page_id = first_page_id(&doc)?;
        inherit_page_attributes(&mut doc, page_id)?;

        let template_form = acroform_dictionary(&doc)?;
        match &template_form {
            Some(dict) => form_fields.extend(acroform_fields(&doc, dict)?),
            None => form_fields.extend(named_widgets(&doc, page_id)?),
        }
        if acroform.is_none() {
            acroform = template_form;
        }

        doc.get_dictionary_mut(page_id)?
            .set("Parent", Object::Reference(pages_tree_id));

        let root_id = doc.trailer.get(b"Root")?.as_reference()?;
        output.max_id = output.max_id.max(doc_max_id);
        for (id, object) in doc.objects {
            if id != root_id {
                output.objects.insert(id, object);
            }
        }
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let mut acroform = acroform.unwrap_or_else(Dictionary::new);
    acroform.set("Fields", Object::Array(form_fields));
    acroform.set("NeedAppearances", Object::Boolean(true));
    let acroform_id = output.add_object(acroform);

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
        ("AcroForm", Object::Reference(acroform_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    // Drop the template's old page trees and any pages beyond the first
    output.prune_objects();
    output.renumber_objects();

    Ok(output)
}

/// Copy attributes the page inherits from its ancestors onto the page itself,
/// since the ancestors are not carried into the merged document.
fn inherit_page_attributes(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let mut inherited = Dictionary::new();
    let mut parent = doc
        .get_dictionary(page_id)?
        .get(b"Parent")
        .and_then(Object::as_reference)
        .ok();

    let mut depth = 0;
    while let Some(parent_id) = parent {
        depth += 1;
        if depth > 32 {
            break;
        }
        let Ok(node) = doc.get_dictionary(parent_id) else {
            break;
        };
        for key in INHERITABLE_ATTRIBUTES {
            if !inherited.has(key) {
                if let Ok(value) = node.get(key) {
                    inherited.set(key, value.clone());
                }
            }
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    let page = doc.get_dictionary_mut(page_id)?;
    for (key, value) in inherited.iter() {
        if !page.has(key) {
            page.set(key.clone(), value.clone());
        }
    }
    Ok(())
}

/// References to the page's widgets that carry a field name
fn named_widgets(doc: &Document, page_id: ObjectId) -> Result<Vec<Object>> {
    let annots = match doc.get_dictionary(page_id)?.get(b"Annots") {
        Ok(Object::Array(items)) => items.clone(),
        Ok(Object::Reference(id)) => doc.get_object(*id)?.as_array()?.clone(),
        _ => return Ok(Vec::new()),
    };

    let named = annots
        .into_iter()
        .filter(|item| {
            item.as_reference()
                .ok()
                .and_then(|id| doc.get_dictionary(id).ok())
                .is_some_and(|dict| dict.has(b"T"))
        })
        .collect();
    Ok(named)
}

fn acroform_dictionary(doc: &Document) -> Result<Option<Dictionary>> {
    let root_id = doc.trailer.get(b"Root")?.as_reference()?;
    let catalog = doc.get_dictionary(root_id)?;
    let dict = match catalog.get(b"AcroForm") {
        Ok(Object::Reference(id)) => doc.get_dictionary(*id)?.clone(),
        Ok(Object::Dictionary(dict)) => dict.clone(),
        _ => return Ok(None),
    };
    Ok(Some(dict))
}

fn acroform_fields(doc: &Document, acroform: &Dictionary) -> Result<Vec<Object>> {
    let fields = match acroform.get(b"Fields") {
        Ok(Object::Array(items)) => items.clone(),
        Ok(Object::Reference(id)) => doc.get_object(*id)?.as_array()?.clone(),
        _ => Vec::new(),
    };
    Ok(fields)
}
