//! Payroll CSV loading.
//!
//! Columns are matched by header name (surrounding whitespace ignored), so
//! their order does not matter:
//!
//! | Column                | Required |
//! |-----------------------|----------|
//! | `SSN`                 | yes      |
//! | `First Name`          | yes      |
//! | `Middle Name`         | no       |
//! | `Last Name`           | yes      |
//! | `Total Subject Wages` | yes      |
//! | `PIT Wages`           | yes      |
//! | `PIT Withheld`        | yes      |
//!
//! A missing required column is logged and read as empty rather than failing
//! the run. Monetary columns are normalized with [`clean_money`].

use crate::totals::clean_money;
use crate::types::{EmployeeRecord, Result};
use std::io::Read;
use std::path::Path;

pub const SSN_COLUMN: &str = "SSN";
pub const FIRST_NAME_COLUMN: &str = "First Name";
pub const MIDDLE_NAME_COLUMN: &str = "Middle Name";
pub const LAST_NAME_COLUMN: &str = "Last Name";
pub const SUBJECT_WAGES_COLUMN: &str = "Total Subject Wages";
pub const PIT_WAGES_COLUMN: &str = "PIT Wages";
pub const PIT_WITHHELD_COLUMN: &str = "PIT Withheld";

const REQUIRED_COLUMNS: [&str; 6] = [
    SSN_COLUMN,
    FIRST_NAME_COLUMN,
    LAST_NAME_COLUMN,
    SUBJECT_WAGES_COLUMN,
    PIT_WAGES_COLUMN,
    PIT_WITHHELD_COLUMN,
];

/// Positions of the known columns in the header row
struct ColumnIndex {
    ssn: Option<usize>,
    first_name: Option<usize>,
    middle_name: Option<usize>,
    last_name: Option<usize>,
    subject_wages: Option<usize>,
    pit_wages: Option<usize>,
    pit_withheld: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &[String]) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);

        for name in REQUIRED_COLUMNS {
            if find(name).is_none() {
                log::warn!("CSV is missing column '{name}'; its values will be blank");
            }
        }

        Self {
            ssn: find(SSN_COLUMN),
            first_name: find(FIRST_NAME_COLUMN),
            middle_name: find(MIDDLE_NAME_COLUMN),
            last_name: find(LAST_NAME_COLUMN),
            subject_wages: find(SUBJECT_WAGES_COLUMN),
            pit_wages: find(PIT_WAGES_COLUMN),
            pit_withheld: find(PIT_WITHHELD_COLUMN),
        }
    }
}

/// Load employee records from a CSV file
pub fn load_employees(path: impl AsRef<Path>) -> Result<Vec<EmployeeRecord>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let employees = read_employees(file)?;
    log::info!("Loaded {} employees from {}", employees.len(), path.display());
    Ok(employees)
}

/// Read employee records from any CSV source with a header row
pub fn read_employees(source: impl Read) -> Result<Vec<EmployeeRecord>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect();
    let columns = ColumnIndex::from_headers(&headers);

    let mut employees = Vec::new();
    for result in reader.byte_records() {
        let record = result?;
        let cell = |index: Option<usize>| {
            index
                .and_then(|i| record.get(i))
                .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
                .unwrap_or_default()
        };

        employees.push(EmployeeRecord {
            ssn: cell(columns.ssn),
            first_name: cell(columns.first_name),
            middle_name: cell(columns.middle_name),
            last_name: cell(columns.last_name),
            subject_wages: clean_money(&cell(columns.subject_wages)),
            pit_wages: clean_money(&cell(columns.pit_wages)),
            pit_withheld: clean_money(&cell(columns.pit_withheld)),
        });
    }

    Ok(employees)
}
