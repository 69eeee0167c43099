//! Field names of the DE 9C template
//!
//! The template is a single page whose fillable fields are addressed by name.
//! Employee rows repeat the same base names with a numeric suffix; everything
//! else appears once per page.

use crate::paginate::ROWS_PER_PAGE;
use crate::types::EmployeeRecord;

// =============================================================================
// Header (every page)
// =============================================================================

pub const YEAR: &str = "Year";
pub const QUARTER: &str = "Quarter";
pub const EMPLOYER_ACCOUNT: &str = "Employer Account No";
/// Quarter ended
pub const QUARTER_ENDED: &str = "Date1";
/// Due date
pub const DUE_DATE: &str = "Date2";
pub const FIRST_MONTH: &str = "1st Month";
pub const SECOND_MONTH: &str = "2nd Month";
pub const THIRD_MONTH: &str = "3rd Month";
pub const PAGE_NUMBER: &str = "Page number";
pub const PAGE_COUNT: &str = "Of Page number";

pub const HEADER_FIELDS: [&str; 10] = [
    YEAR,
    QUARTER,
    EMPLOYER_ACCOUNT,
    QUARTER_ENDED,
    DUE_DATE,
    FIRST_MONTH,
    SECOND_MONTH,
    THIRD_MONTH,
    PAGE_NUMBER,
    PAGE_COUNT,
];

// =============================================================================
// Totals
// =============================================================================

pub const PAGE_TOTAL_SUBJECT_WAGES: &str = "Total Subject Wages This Page";
pub const PAGE_TOTAL_PIT_WAGES: &str = "Total PIT Wages This Page";
pub const PAGE_TOTAL_PIT_WITHHELD: &str = "Total PIT Withheld This Page";

/// Page subtotal fields in column order
pub const PAGE_TOTAL_FIELDS: [&str; 3] = [
    PAGE_TOTAL_SUBJECT_WAGES,
    PAGE_TOTAL_PIT_WAGES,
    PAGE_TOTAL_PIT_WITHHELD,
];

pub const GRAND_TOTAL_SUBJECT_WAGES: &str = "Grand Total Subject Wages";
pub const GRAND_TOTAL_PIT_WAGES: &str = "Grand Total PIT Wages";
pub const GRAND_TOTAL_PIT_WITHHELD: &str = "Grand Total PIT Withheld";

/// Grand total fields in column order (page 1 only)
pub const GRAND_TOTAL_FIELDS: [&str; 3] = [
    GRAND_TOTAL_SUBJECT_WAGES,
    GRAND_TOTAL_PIT_WAGES,
    GRAND_TOTAL_PIT_WITHHELD,
];

// =============================================================================
// Signature block (page 1 only)
// =============================================================================

pub const SIGNER_NAME: &str = "Signature1";
pub const SIGNER_TITLE: &str = "0";
pub const SIGNER_PHONE: &str = "Phone Number";
pub const SIGNATURE_DATE: &str = "Date5";

pub const SIGNATURE_FIELDS: [&str; 4] = [SIGNER_NAME, SIGNER_TITLE, SIGNER_PHONE, SIGNATURE_DATE];

// =============================================================================
// Employee rows
// =============================================================================

/// Tag appended to every field name on page `page_number` (1-based) so cloned
/// pages never share a field. Page 1 keeps its names.
pub fn page_tag(page_number: usize) -> Option<String> {
    (page_number > 1).then(|| format!("__p{page_number}"))
}

/// Row 1 has no suffix, row k > 1 uses `k - 1`.
pub fn row_suffix(row: usize) -> String {
    if row <= 1 {
        String::new()
    } else {
        (row - 1).to_string()
    }
}

/// One column of an employee row on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowField {
    Ssn,
    FirstName,
    MiddleInitial,
    LastName,
    SubjectWages,
    PitWages,
    PitWithheld,
}

impl RowField {
    pub const ALL: [RowField; 7] = [
        RowField::Ssn,
        RowField::FirstName,
        RowField::MiddleInitial,
        RowField::LastName,
        RowField::SubjectWages,
        RowField::PitWages,
        RowField::PitWithheld,
    ];

    /// Field name for row 1; later rows append [`row_suffix`]
    pub fn base_name(self) -> &'static str {
        match self {
            RowField::Ssn => "SSN",
            RowField::FirstName => "First Name",
            RowField::MiddleInitial => "MI",
            RowField::LastName => "Last Name",
            RowField::SubjectWages => "Total Subject Wages",
            RowField::PitWages => "PIT Wages",
            RowField::PitWithheld => "PIT Withheld",
        }
    }

    /// Physical field name for this column at 1-based `row`
    pub fn field_name(self, row: usize) -> String {
        format!("{}{}", self.base_name(), row_suffix(row))
    }

    /// The record value written into this column
    pub fn value(self, record: &EmployeeRecord) -> &str {
        match self {
            RowField::Ssn => &record.ssn,
            RowField::FirstName => &record.first_name,
            RowField::MiddleInitial => &record.middle_name,
            RowField::LastName => &record.last_name,
            RowField::SubjectWages => &record.subject_wages,
            RowField::PitWages => &record.pit_wages,
            RowField::PitWithheld => &record.pit_withheld,
        }
    }
}

/// Every field name the filler may write, in a stable order
pub fn contract_fields() -> Vec<String> {
    let mut names: Vec<String> = HEADER_FIELDS.iter().map(|s| s.to_string()).collect();
    for row in 1..=ROWS_PER_PAGE {
        names.extend(RowField::ALL.iter().map(|field| field.field_name(row)));
    }
    names.extend(PAGE_TOTAL_FIELDS.iter().map(|s| s.to_string()));
    names.extend(GRAND_TOTAL_FIELDS.iter().map(|s| s.to_string()));
    names.extend(SIGNATURE_FIELDS.iter().map(|s| s.to_string()));
    names
}
