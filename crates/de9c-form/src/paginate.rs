use crate::totals::ColumnTotals;
use crate::types::{EmployeeRecord, Page};

/// Employee rows printed on one form page
pub const ROWS_PER_PAGE: usize = 7;

/// Number of output pages for `employees` rows. An empty roster still
/// produces one (blank) page.
pub fn page_count(employees: usize) -> usize {
    employees.div_ceil(ROWS_PER_PAGE).max(1)
}

/// Split employees into pages of at most [`ROWS_PER_PAGE`] rows, each with
/// its own subtotal.
pub fn paginate(employees: &[EmployeeRecord]) -> Vec<Page> {
    if employees.is_empty() {
        return vec![Page {
            index: 0,
            employees: Vec::new(),
            totals: ColumnTotals::default(),
        }];
    }

    employees
        .chunks(ROWS_PER_PAGE)
        .enumerate()
        .map(|(index, chunk)| Page {
            index,
            employees: chunk.to_vec(),
            totals: ColumnTotals::from_records(chunk),
        })
        .collect()
}

/// Grand totals across pages, computed from the page subtotals
pub fn grand_totals(pages: &[Page]) -> ColumnTotals {
    pages.iter().map(|page| page.totals).sum()
}
