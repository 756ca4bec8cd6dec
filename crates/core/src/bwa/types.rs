//! BWA report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// A single BWA line: an amount plus its share of revenue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BwaLine {
    /// Line amount.
    pub amount: Decimal,
    /// `amount / revenue.total` in percent, rounded to two places.
    /// Zero when the period has no revenue.
    pub percent_of_revenue: Decimal,
}

/// Operating expense buckets.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OperatingExpenses {
    /// Personalkosten (62xx).
    pub personnel: BwaLine,
    /// Raumkosten (63xx).
    pub room_costs: BwaLine,
    /// Fahrzeugkosten (64xx).
    pub vehicle: BwaLine,
    /// Werbekosten (66xx).
    pub marketing: BwaLine,
    /// Versicherungen (65xx).
    pub insurance: BwaLine,
    /// Reisekosten (67xx).
    pub travel: BwaLine,
    /// Büro, Porto, Telefon (68xx).
    pub office: BwaLine,
    /// Sonstige betriebliche Aufwendungen (69xx).
    pub other: BwaLine,
    /// Sum of all operating expense buckets.
    pub total: BwaLine,
}

/// One aggregated BWA period.
#[derive(Debug, Clone, Serialize)]
pub struct BwaPeriod {
    /// Period start (inclusive).
    pub start_date: NaiveDate,
    /// Period end (inclusive).
    pub end_date: NaiveDate,
    /// Erlöse.
    pub revenue: BwaLine,
    /// Wareneinsatz / Provisionsaufwand.
    pub cost_of_sales: BwaLine,
    /// Rohertrag: revenue - cost of sales.
    pub gross_profit: BwaLine,
    /// Operating expense buckets with subtotal.
    pub operating_expenses: OperatingExpenses,
    /// Betriebsergebnis: gross profit - operating expenses.
    pub operating_result: BwaLine,
    /// Finanzergebnis (credit-normal).
    pub financial_result: BwaLine,
    /// Ergebnis vor Steuern: operating result + financial result.
    pub earnings_before_tax: BwaLine,
    /// Steuern.
    pub taxes: BwaLine,
    /// Jahresüberschuss: operating result + financial result - taxes.
    pub net_income: BwaLine,
}

/// BWA report for a period, optionally next to a comparison period.
///
/// The two periods are aggregated independently; entries are never mixed
/// across ranges.
#[derive(Debug, Clone, Serialize)]
pub struct BwaReport {
    /// The requested period.
    pub current: BwaPeriod,
    /// The optional comparison period.
    pub comparison: Option<BwaPeriod>,
}
