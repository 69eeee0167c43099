pub mod compose;
pub mod fields;
pub mod fill;
mod form;
mod loader;
mod options;
mod paginate;
mod settings;
mod totals;
mod types;

pub use compose::{build_return, fill_return, load_template, missing_contract_fields, save_pdf};
pub use fields::RowField;
pub use form::{FormFields, FormPage};
pub use loader::{load_employees, read_employees};
pub use options::*;
pub use paginate::{ROWS_PER_PAGE, grand_totals, page_count, paginate};
pub use settings::{DEFAULT_SETTINGS_FILE, Settings};
pub use totals::{ColumnTotals, clean_money, format_amount, parse_amount};
pub use types::*;
