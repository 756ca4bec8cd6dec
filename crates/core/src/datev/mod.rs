//! DATEV EXTF export generation (Buchungsstapel, format 510 / version 7.00).
//!
//! The output is bit-significant for third-party accounting software: three
//! header records followed by one 116-column record per entry, every field
//! quoted, semicolon-separated, CRLF line endings, UTF-8 with BOM. Dates are
//! `DDMMYY`, amounts fixed two decimals, booking texts stripped of `;`/`"`
//! and capped at 60 characters.

pub mod types;

#[cfg(test)]
mod tests;

use chrono::{Datelike, NaiveDate};
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub use types::{DatevEntry, DatevError, DatevExport};

/// UTF-8 byte order mark expected by DATEV import tools.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// MIME type of the generated file.
pub const DATEV_MIME_TYPE: &str = "text/csv; charset=utf-8";

/// Maximum booking text length accepted by DATEV.
const MAX_BUCHUNGSTEXT_LEN: usize = 60;

/// Total column count of an EXTF 510 data record.
const COLUMN_COUNT: usize = 116;

/// Generates the DATEV export for `entries` over the given range.
///
/// The caller is responsible for having filtered the entries (date range,
/// locked-only); this function only formats.
///
/// # Errors
///
/// Returns [`DatevError::EmptyRange`] when there are no entries: DATEV
/// explicitly must not receive a header-only file.
pub fn generate(
    entries: &[DatevEntry],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<DatevExport, DatevError> {
    if entries.is_empty() {
        return Err(DatevError::EmptyRange {
            start_date,
            end_date,
        });
    }

    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .flexible(true)
        .from_writer(Vec::new());

    // Record 1: format definition
    writer.write_record(["EXTF", "510", "21", "Buchungsstapel", "7.00"])?;

    // Record 2: consultant, client, fiscal year, account-number length, period
    let fiscal_year = start_date.year().to_string();
    let date_from = format_datev_date(start_date);
    let date_to = format_datev_date(end_date);
    writer.write_record([
        "1000",            // Beraternummer (placeholder)
        "1",               // Mandantennummer (placeholder)
        fiscal_year.as_str(),
        "4",               // Sachkontenlänge
        date_from.as_str(),
        date_to.as_str(),
        "Belegwerk Export",
        "RE",              // Diktatkürzel
        "1",               // Buchungstyp (1 = Finanzbuchhaltung)
        "0",               // Rechnungslegungszweck
    ])?;

    // Record 3: column headers
    writer.write_record(COLUMN_HEADERS)?;

    // Data records
    for entry in entries {
        let mut row: Vec<String> = Vec::with_capacity(COLUMN_COUNT);
        row.push(format!("{:.2}", entry.amount.abs())); // Umsatz
        row.push("S".to_string()); // Soll/Haben-Kennzeichen
        row.push("EUR".to_string()); // WKZ Umsatz
        row.push(String::new()); // Kurs
        row.push(String::new()); // Basis-Umsatz
        row.push(String::new()); // WKZ Basis-Umsatz
        row.push(pad_account_number(&entry.debit_account)); // Konto
        row.push(pad_account_number(&entry.credit_account)); // Gegenkonto
        row.push(entry.vat_key.clone().unwrap_or_default()); // BU-Schlüssel
        row.push(format_datev_date(entry.booking_date)); // Belegdatum
        row.push(entry.entry_number.clone()); // Belegfeld 1
        row.push(String::new()); // Belegfeld 2
        row.push(String::new()); // Skonto
        row.push(clean_buchungstext(&entry.description)); // Buchungstext
        row.resize(COLUMN_COUNT, String::new());
        writer.write_record(&row)?;
    }

    let csv_bytes = writer
        .into_inner()
        .map_err(|e| DatevError::Io(e.into_error()))?;

    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + csv_bytes.len());
    bytes.extend_from_slice(UTF8_BOM);
    bytes.extend_from_slice(&csv_bytes);

    Ok(DatevExport {
        bytes,
        filename: format!("DATEV_Export_{start_date}_{end_date}.csv"),
        mime_type: DATEV_MIME_TYPE,
    })
}

/// Formats a date as `DDMMYY`.
fn format_datev_date(date: NaiveDate) -> String {
    format!(
        "{:02}{:02}{:02}",
        date.day(),
        date.month(),
        date.year() % 100
    )
}

/// Strips characters DATEV rejects and caps the text at 60 characters.
fn clean_buchungstext(text: &str) -> String {
    let cleaned: String = text
        .replace(['\r', '\n'], " ")
        .chars()
        .filter(|c| *c != ';' && *c != '"')
        .take(MAX_BUCHUNGSTEXT_LEN)
        .collect();
    cleaned.trim().to_string()
}

/// Pads an account number to 4 digits.
fn pad_account_number(number: &str) -> String {
    format!("{number:0>4}")
}

/// The 116 column names of an EXTF 510 record, in wire order.
const COLUMN_HEADERS: [&str; 116] = [
    "Umsatz (ohne Soll/Haben-Kz)",
    "Soll/Haben-Kennzeichen",
    "WKZ Umsatz",
    "Kurs",
    "Basis-Umsatz",
    "WKZ Basis-Umsatz",
    "Konto",
    "Gegenkonto (ohne BU-Schlüssel)",
    "BU-Schlüssel",
    "Belegdatum",
    "Belegfeld 1",
    "Belegfeld 2",
    "Skonto",
    "Buchungstext",
    "Postensperre",
    "Diverse Adressnummer",
    "Geschäftspartnerbank",
    "Sachverhalt",
    "Zinssperre",
    "Beleglink",
    "Beleginfo - Art 1",
    "Beleginfo - Inhalt 1",
    "Beleginfo - Art 2",
    "Beleginfo - Inhalt 2",
    "Beleginfo - Art 3",
    "Beleginfo - Inhalt 3",
    "Beleginfo - Art 4",
    "Beleginfo - Inhalt 4",
    "Beleginfo - Art 5",
    "Beleginfo - Inhalt 5",
    "Beleginfo - Art 6",
    "Beleginfo - Inhalt 6",
    "Beleginfo - Art 7",
    "Beleginfo - Inhalt 7",
    "Beleginfo - Art 8",
    "Beleginfo - Inhalt 8",
    "KOST1 - Kostenstelle",
    "KOST2 - Kostenstelle",
    "Kost-Menge",
    "EU-Land u. UStID",
    "EU-Steuersatz",
    "Abw. Versteuerungsart",
    "Sachverhalt L+L",
    "Funktionsergänzung L+L",
    "BU 49 Hauptfunktionstyp",
    "BU 49 Hauptfunktionsnummer",
    "BU 49 Funktionsergänzung",
    "Zusatzinformation - Art 1",
    "Zusatzinformation - Inhalt 1",
    "Zusatzinformation - Art 2",
    "Zusatzinformation - Inhalt 2",
    "Zusatzinformation - Art 3",
    "Zusatzinformation - Inhalt 3",
    "Zusatzinformation - Art 4",
    "Zusatzinformation - Inhalt 4",
    "Zusatzinformation - Art 5",
    "Zusatzinformation - Inhalt 5",
    "Zusatzinformation - Art 6",
    "Zusatzinformation - Inhalt 6",
    "Zusatzinformation - Art 7",
    "Zusatzinformation - Inhalt 7",
    "Zusatzinformation - Art 8",
    "Zusatzinformation - Inhalt 8",
    "Zusatzinformation - Art 9",
    "Zusatzinformation - Inhalt 9",
    "Zusatzinformation - Art 10",
    "Zusatzinformation - Inhalt 10",
    "Zusatzinformation - Art 11",
    "Zusatzinformation - Inhalt 11",
    "Zusatzinformation - Art 12",
    "Zusatzinformation - Inhalt 12",
    "Zusatzinformation - Art 13",
    "Zusatzinformation - Inhalt 13",
    "Zusatzinformation - Art 14",
    "Zusatzinformation - Inhalt 14",
    "Zusatzinformation - Art 15",
    "Zusatzinformation - Inhalt 15",
    "Zusatzinformation - Art 16",
    "Zusatzinformation - Inhalt 16",
    "Zusatzinformation - Art 17",
    "Zusatzinformation - Inhalt 17",
    "Zusatzinformation - Art 18",
    "Zusatzinformation - Inhalt 18",
    "Zusatzinformation - Art 19",
    "Zusatzinformation - Inhalt 19",
    "Zusatzinformation - Art 20",
    "Zusatzinformation - Inhalt 20",
    "Stück",
    "Gewicht",
    "Zahlweise",
    "Forderungsart",
    "Veranlagungsjahr",
    "Zugeordnete Fälligkeit",
    "Skontotyp",
    "Auftragsnummer",
    "Buchungstyp",
    "Ust-Schlüssel (Anzahlungen)",
    "EU-Land (Anzahlungen)",
    "Sachverhalt L+L (Anzahlungen)",
    "EU-Steuersatz (Anzahlungen)",
    "Erlöskonto (Anzahlungen)",
    "Herkunft-Kz",
    "Buchungs-GUID",
    "KOST-Datum",
    "SEPA-Mandatsreferenz",
    "Skontosperre",
    "Gesellschaftername",
    "Beteiligtennummer",
    "Identifikationsnummer",
    "Zeichnernummer",
    "Postensperre bis",
    "Bezeichnung SoBil-Sachverhalt",
    "Kennzeichen SoBil-Buchung",
    "Festschreibung",
    "Leistungsdatum",
    "Datum Zuord. Steuerperiode",
];
