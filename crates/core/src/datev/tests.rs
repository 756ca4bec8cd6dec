use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_entry() -> DatevEntry {
    DatevEntry {
        entry_number: "BEL-2026-000042".to_string(),
        booking_date: date(2026, 3, 15),
        debit_account: "1200".to_string(),
        credit_account: "4200".to_string(),
        amount: dec!(500.00),
        vat_key: None,
        description: "Erlöse Dienstleistung".to_string(),
    }
}

fn export_lines(entries: &[DatevEntry], start: NaiveDate, end: NaiveDate) -> Vec<String> {
    let export = generate(entries, start, end).unwrap();
    assert_eq!(&export.bytes[..3], &[0xEF, 0xBB, 0xBF], "missing UTF-8 BOM");
    let text = String::from_utf8(export.bytes[3..].to_vec()).unwrap();
    text.split("\r\n").map(str::to_string).collect()
}

#[test]
fn format_header_record() {
    let lines = export_lines(&[sample_entry()], date(2026, 3, 1), date(2026, 3, 31));
    assert_eq!(lines[0], r#""EXTF";"510";"21";"Buchungsstapel";"7.00""#);
}

#[test]
fn period_header_record() {
    let lines = export_lines(&[sample_entry()], date(2026, 3, 1), date(2026, 3, 31));
    assert_eq!(
        lines[1],
        r#""1000";"1";"2026";"4";"010326";"310326";"Belegwerk Export";"RE";"1";"0""#
    );
}

#[test]
fn column_header_has_116_columns() {
    let lines = export_lines(&[sample_entry()], date(2026, 3, 1), date(2026, 3, 31));
    let columns: Vec<&str> = lines[2].split(';').collect();
    assert_eq!(columns.len(), 116);
    assert_eq!(columns[0], r#""Umsatz (ohne Soll/Haben-Kz)""#);
    assert_eq!(columns[13], r#""Buchungstext""#);
    assert_eq!(columns[115], r#""Datum Zuord. Steuerperiode""#);
}

#[test]
fn data_record_field_order() {
    let lines = export_lines(&[sample_entry()], date(2026, 3, 1), date(2026, 3, 31));
    let columns: Vec<&str> = lines[3].split(';').collect();
    assert_eq!(columns.len(), 116);
    assert_eq!(columns[0], r#""500.00""#);
    assert_eq!(columns[1], r#""S""#);
    assert_eq!(columns[2], r#""EUR""#);
    assert_eq!(columns[6], r#""1200""#);
    assert_eq!(columns[7], r#""4200""#);
    assert_eq!(columns[8], r#""""#);
    assert_eq!(columns[9], r#""150326""#);
    assert_eq!(columns[10], r#""BEL-2026-000042""#);
    assert_eq!(columns[13], r#""Erlöse Dienstleistung""#);
    assert_eq!(columns[115], r#""""#);
}

#[test]
fn amount_always_two_decimals() {
    let mut entry = sample_entry();
    entry.amount = dec!(1234.5);
    let lines = export_lines(&[entry], date(2026, 3, 1), date(2026, 3, 31));
    assert!(lines[3].starts_with(r#""1234.50";"#));
}

#[test]
fn vat_key_passed_through() {
    let mut entry = sample_entry();
    entry.vat_key = Some("9".to_string());
    let lines = export_lines(&[entry], date(2026, 3, 1), date(2026, 3, 31));
    let columns: Vec<&str> = lines[3].split(';').collect();
    assert_eq!(columns[8], r#""9""#);
}

#[test]
fn short_account_numbers_are_padded() {
    let mut entry = sample_entry();
    entry.debit_account = "27".to_string();
    let lines = export_lines(&[entry], date(2026, 3, 1), date(2026, 3, 31));
    let columns: Vec<&str> = lines[3].split(';').collect();
    assert_eq!(columns[6], r#""0027""#);
}

#[test]
fn buchungstext_is_cleaned_and_capped() {
    let mut entry = sample_entry();
    entry.description = format!("Miete; \"Halle 3\"\nMärz {}", "x".repeat(80));
    let lines = export_lines(&[entry], date(2026, 3, 1), date(2026, 3, 31));
    let columns: Vec<&str> = lines[3].split(';').collect();
    let text = columns[13].trim_matches('"');
    assert!(!text.contains(';'));
    assert!(!text.contains('"'));
    assert!(!text.contains('\n'));
    assert!(text.chars().count() <= 60);
    assert!(text.starts_with("Miete Halle 3 März"));
}

#[test]
fn one_data_record_per_entry() {
    let entries = vec![sample_entry(), sample_entry(), sample_entry()];
    let lines = export_lines(&entries, date(2026, 3, 1), date(2026, 3, 31));
    // 3 header records, 3 data records, trailing empty line from final CRLF
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[6], "");
}

#[test]
fn filename_and_mime() {
    let export = generate(&[sample_entry()], date(2026, 3, 1), date(2026, 3, 31)).unwrap();
    assert_eq!(export.filename, "DATEV_Export_2026-03-01_2026-03-31.csv");
    assert_eq!(export.mime_type, "text/csv; charset=utf-8");
}

#[test]
fn empty_range_is_rejected() {
    let err = generate(&[], date(2026, 3, 1), date(2026, 3, 31)).unwrap_err();
    assert!(matches!(err, DatevError::EmptyRange { .. }));
}
