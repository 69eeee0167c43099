//! Writing return data into one page's fields
//!
//! Every writer skips fields the page does not have; templates vary in which
//! boxes they carry.

use crate::fields::{self, RowField};
use crate::form::FormFields;
use crate::options::{ReturnHeader, Signer};
use crate::paginate::ROWS_PER_PAGE;
use crate::totals::ColumnTotals;
use crate::types::Page;

fn set_if_present(form: &mut impl FormFields, name: &str, value: &str) {
    if !form.set_field(name, value) {
        log::debug!("Template has no field '{name}', skipping");
    }
}

/// Year, quarter, account, dates, month boxes and page numbering
pub fn fill_header(
    form: &mut impl FormFields,
    header: &ReturnHeader,
    page_number: usize,
    page_count: usize,
) {
    let [m1, m2, m3] = header.month_boxes();
    let entries = [
        (fields::YEAR, header.short_year()),
        (fields::QUARTER, header.quarter.number().to_string()),
        (fields::EMPLOYER_ACCOUNT, header.employer_account.clone()),
        (fields::QUARTER_ENDED, header.quarter_end.clone()),
        (fields::DUE_DATE, header.quarter_end.clone()),
        (fields::FIRST_MONTH, m1),
        (fields::SECOND_MONTH, m2),
        (fields::THIRD_MONTH, m3),
        (fields::PAGE_NUMBER, page_number.to_string()),
        (fields::PAGE_COUNT, page_count.to_string()),
    ];

    for (name, value) in &entries {
        set_if_present(form, name, value);
    }
}

/// Employee rows of the page; unused rows are cleared
pub fn fill_rows(form: &mut impl FormFields, page: &Page) {
    for (i, employee) in page.employees.iter().enumerate() {
        let row = i + 1;
        for field in RowField::ALL {
            set_if_present(form, &field.field_name(row), field.value(employee));
        }
    }

    for row in page.employees.len() + 1..=ROWS_PER_PAGE {
        for field in RowField::ALL {
            set_if_present(form, &field.field_name(row), "");
        }
    }
}

pub fn fill_page_totals(form: &mut impl FormFields, totals: &ColumnTotals) {
    for (name, value) in fields::PAGE_TOTAL_FIELDS.iter().zip(totals.formatted()) {
        set_if_present(form, name, &value);
    }
}

/// Grand totals and the signature block; only page 1 gets these
pub fn fill_grand_totals(form: &mut impl FormFields, totals: &ColumnTotals, signer: &Signer) {
    for (name, value) in fields::GRAND_TOTAL_FIELDS.iter().zip(totals.formatted()) {
        set_if_present(form, name, &value);
    }

    let signature = [
        (fields::SIGNER_NAME, &signer.name),
        (fields::SIGNER_TITLE, &signer.title),
        (fields::SIGNER_PHONE, &signer.phone),
        (fields::SIGNATURE_DATE, &signer.date),
    ];
    for (name, value) in signature {
        set_if_present(form, name, value);
    }
}

/// Header, rows and page totals for one page
pub fn fill_page(form: &mut impl FormFields, header: &ReturnHeader, page: &Page, page_count: usize) {
    fill_header(form, header, page.number(), page_count);
    fill_rows(form, page);
    fill_page_totals(form, &page.totals);
}
