use de9c_form::*;
use std::io::Write;

const HEADER: &str =
    "SSN,First Name,Middle Name,Last Name,Total Subject Wages,PIT Wages,PIT Withheld\n";

#[test]
fn test_read_employees_normalizes_money() {
    let csv = format!("{HEADER}123-45-6789,Ana,B,Lopez,\"$1,234.56\",\"$1,000.00\",$12.50\n");
    let employees = read_employees(csv.as_bytes()).unwrap();

    assert_eq!(employees.len(), 1);
    let ana = &employees[0];
    assert_eq!(ana.ssn, "123-45-6789");
    assert_eq!(ana.first_name, "Ana");
    assert_eq!(ana.middle_name, "B");
    assert_eq!(ana.last_name, "Lopez");
    assert_eq!(ana.subject_wages, "1234.56");
    assert_eq!(ana.pit_wages, "1000.00");
    assert_eq!(ana.pit_withheld, "12.50");
}

#[test]
fn test_clean_money() {
    assert_eq!(clean_money("$1,234.56"), "1234.56");
    assert_eq!(clean_money(" 42 "), "42");
    assert_eq!(clean_money(""), "");
}

#[test]
fn test_columns_matched_by_name() {
    let csv = "PIT Withheld, Last Name ,SSN,First Name,PIT Wages,Total Subject Wages\n\
               5.00,Kim,111-22-3333,Joe,100.00,200.00\n";
    let employees = read_employees(csv.as_bytes()).unwrap();

    assert_eq!(employees[0].last_name, "Kim");
    assert_eq!(employees[0].ssn, "111-22-3333");
    assert_eq!(employees[0].subject_wages, "200.00");
    assert_eq!(employees[0].pit_withheld, "5.00");
    // Middle Name is optional
    assert_eq!(employees[0].middle_name, "");
}

#[test]
fn test_empty_middle_name_is_blank() {
    let csv = format!("{HEADER}111-22-3333,Joe,,Kim,1,2,3\n");
    let employees = read_employees(csv.as_bytes()).unwrap();
    assert_eq!(employees[0].middle_name, "");
}

#[test]
fn test_missing_required_column_reads_blank() {
    let csv = "SSN,First Name,Last Name,Total Subject Wages,PIT Wages\n\
               111-22-3333,Joe,Kim,100.00,90.00\n";
    let employees = read_employees(csv.as_bytes()).unwrap();

    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].pit_withheld, "");
    assert_eq!(employees[0].pit_wages, "90.00");
}

#[test]
fn test_short_rows_are_tolerated() {
    let csv = format!("{HEADER}111-22-3333,Joe\n");
    let employees = read_employees(csv.as_bytes()).unwrap();

    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].first_name, "Joe");
    assert_eq!(employees[0].last_name, "");
    assert_eq!(employees[0].subject_wages, "");
}

#[test]
fn test_header_only_csv_has_no_employees() {
    let employees = read_employees(HEADER.as_bytes()).unwrap();
    assert!(employees.is_empty());
}

#[test]
fn test_load_employees_from_file() {
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{HEADER}").unwrap();
    writeln!(file, "111-22-3333,Joe,Q,Kim,\"$2,000.00\",\"$2,000.00\",$80.00").unwrap();
    writeln!(file, "444-55-6666,Sue,,Park,$500.00,$500.00,$0.00").unwrap();
    file.flush().unwrap();

    let employees = load_employees(file.path()).unwrap();
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[1].first_name, "Sue");
    assert_eq!(employees[0].subject_wages, "2000.00");
}

#[test]
fn test_load_employees_missing_file() {
    let result = load_employees("does/not/exist.csv");
    match result {
        Err(De9cError::Io(_)) => {}
        _ => panic!("Expected Io error"),
    }
}
