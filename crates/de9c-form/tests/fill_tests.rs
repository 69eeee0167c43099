use de9c_form::fields::{self, RowField, contract_fields, page_tag, row_suffix};
use de9c_form::fill::{fill_grand_totals, fill_header, fill_page, fill_rows};
use de9c_form::*;
use std::collections::BTreeMap;

/// In-memory form carrying every contract field, pre-filled with junk
fn blank_form() -> BTreeMap<String, String> {
    contract_fields()
        .into_iter()
        .map(|name| (name, "stale".to_string()))
        .collect()
}

fn employee(n: usize) -> EmployeeRecord {
    EmployeeRecord {
        ssn: format!("000-00-{n:04}"),
        first_name: format!("First{n}"),
        middle_name: "M".to_string(),
        last_name: format!("Last{n}"),
        subject_wages: "1000.00".to_string(),
        pit_wages: "900.00".to_string(),
        pit_withheld: "25.50".to_string(),
    }
}

fn header() -> ReturnHeader {
    ReturnHeader::new(2024, Quarter::new(2).unwrap(), "123-4567-8").unwrap()
}

#[test]
fn test_row_suffix() {
    assert_eq!(row_suffix(1), "");
    assert_eq!(row_suffix(2), "1");
    assert_eq!(row_suffix(7), "6");
}

#[test]
fn test_row_field_names() {
    assert_eq!(RowField::Ssn.field_name(1), "SSN");
    assert_eq!(RowField::FirstName.field_name(2), "First Name1");
    assert_eq!(RowField::MiddleInitial.field_name(3), "MI2");
    assert_eq!(RowField::LastName.field_name(4), "Last Name3");
    assert_eq!(RowField::SubjectWages.field_name(5), "Total Subject Wages4");
    assert_eq!(RowField::PitWages.field_name(6), "PIT Wages5");
    assert_eq!(RowField::PitWithheld.field_name(7), "PIT Withheld6");
}

#[test]
fn test_page_tag() {
    assert_eq!(page_tag(1), None);
    assert_eq!(page_tag(2).as_deref(), Some("__p2"));
    assert_eq!(page_tag(10).as_deref(), Some("__p10"));
}

#[test]
fn test_contract_fields_are_unique() {
    let names = contract_fields();
    let unique: std::collections::BTreeSet<_> = names.iter().collect();
    assert_eq!(unique.len(), names.len());
    assert_eq!(names.len(), 10 + 7 * ROWS_PER_PAGE + 3 + 3 + 4);
}

#[test]
fn test_fill_header() {
    let mut form = blank_form();
    fill_header(&mut form, &header(), 2, 3);

    assert_eq!(form[fields::YEAR], "24");
    assert_eq!(form[fields::QUARTER], "2");
    assert_eq!(form[fields::EMPLOYER_ACCOUNT], "123-4567-8");
    assert_eq!(form[fields::QUARTER_ENDED], "06/30/24");
    assert_eq!(form[fields::DUE_DATE], "06/30/24");
    assert_eq!(form[fields::FIRST_MONTH], "04");
    assert_eq!(form[fields::SECOND_MONTH], "05");
    assert_eq!(form[fields::THIRD_MONTH], "06");
    assert_eq!(form[fields::PAGE_NUMBER], "2");
    assert_eq!(form[fields::PAGE_COUNT], "3");
}

#[test]
fn test_fill_rows_clears_unused_rows() {
    let employees: Vec<EmployeeRecord> = (1..=3).map(employee).collect();
    let pages = paginate(&employees);
    let mut form = blank_form();
    fill_rows(&mut form, &pages[0]);

    assert_eq!(form["SSN"], "000-00-0001");
    assert_eq!(form["First Name1"], "First2");
    assert_eq!(form["MI1"], "M");
    assert_eq!(form["Last Name2"], "Last3");
    assert_eq!(form["PIT Withheld2"], "25.50");

    for row in 4..=ROWS_PER_PAGE {
        for field in RowField::ALL {
            assert_eq!(form[&field.field_name(row)], "", "row {row} {field:?}");
        }
    }
}

#[test]
fn test_fill_page_totals_and_grand_totals() {
    let employees: Vec<EmployeeRecord> = (1..=9).map(employee).collect();
    let pages = paginate(&employees);

    let mut second = blank_form();
    fill_page(&mut second, &header(), &pages[1], pages.len());
    assert_eq!(second[fields::PAGE_TOTAL_SUBJECT_WAGES], "2000.00");
    assert_eq!(second[fields::PAGE_TOTAL_PIT_WAGES], "1800.00");
    assert_eq!(second[fields::PAGE_TOTAL_PIT_WITHHELD], "51.00");
    assert_eq!(second[fields::GRAND_TOTAL_SUBJECT_WAGES], "stale");

    let signer = Signer {
        name: "Pat Doe".to_string(),
        title: "Owner".to_string(),
        phone: "555-0100".to_string(),
        date: "07/15/24".to_string(),
    };
    let mut first = blank_form();
    fill_page(&mut first, &header(), &pages[0], pages.len());
    fill_grand_totals(&mut first, &grand_totals(&pages), &signer);

    assert_eq!(first[fields::PAGE_TOTAL_SUBJECT_WAGES], "7000.00");
    assert_eq!(first[fields::GRAND_TOTAL_SUBJECT_WAGES], "9000.00");
    assert_eq!(first[fields::GRAND_TOTAL_PIT_WAGES], "8100.00");
    assert_eq!(first[fields::GRAND_TOTAL_PIT_WITHHELD], "229.50");
    assert_eq!(first[fields::SIGNER_NAME], "Pat Doe");
    assert_eq!(first[fields::SIGNER_TITLE], "Owner");
    assert_eq!(first[fields::SIGNER_PHONE], "555-0100");
    assert_eq!(first[fields::SIGNATURE_DATE], "07/15/24");
}

#[test]
fn test_fill_skips_absent_fields() {
    let mut form: BTreeMap<String, String> =
        BTreeMap::from([("SSN".to_string(), String::new())]);
    let pages = paginate(&[employee(1)]);
    fill_page(&mut form, &header(), &pages[0], 1);

    assert_eq!(form.len(), 1);
    assert_eq!(form["SSN"], "000-00-0001");
}

#[test]
fn test_missing_contract_fields() {
    let mut form = blank_form();
    form.remove(fields::SIGNER_PHONE);
    form.remove("SSN6");

    let missing = missing_contract_fields(&form);
    assert_eq!(missing, vec!["SSN6".to_string(), fields::SIGNER_PHONE.to_string()]);
}
