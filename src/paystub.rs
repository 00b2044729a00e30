//! Paystub input model - CSV loading, validation, and template writing

use crate::error::EstimateError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Required columns, in template order
pub const COLUMNS: [&str; 7] = [
    "spouse",
    "pay_frequency",
    "ytd_pay_periods",
    "ytd_gross",
    "ytd_pretax_deductions",
    "ytd_posttax_deductions",
    "ytd_federal_withheld",
];

/// How often a spouse is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayFrequency {
    Weekly,
    Biweekly,
    SemiMonthly,
    Monthly,
}

impl PayFrequency {
    pub fn from_str(s: &str) -> Option<PayFrequency> {
        match s.to_lowercase().as_str() {
            "weekly" => Some(PayFrequency::Weekly),
            "biweekly" => Some(PayFrequency::Biweekly),
            "semi-monthly" => Some(PayFrequency::SemiMonthly),
            "monthly" => Some(PayFrequency::Monthly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayFrequency::Weekly => "weekly",
            PayFrequency::Biweekly => "biweekly",
            PayFrequency::SemiMonthly => "semi-monthly",
            PayFrequency::Monthly => "monthly",
        }
    }

    /// Pay periods in a full year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PayFrequency::Weekly => 52,
            PayFrequency::Biweekly => 26,
            PayFrequency::SemiMonthly => 24,
            PayFrequency::Monthly => 12,
        }
    }
}

/// One spouse's year-to-date paystub figures
#[derive(Debug, Clone, PartialEq)]
pub struct PaystubRecord {
    pub spouse: String,
    pub pay_frequency: PayFrequency,
    pub ytd_pay_periods: u32,
    pub ytd_gross: Decimal,
    pub ytd_pretax_deductions: Decimal,
    pub ytd_posttax_deductions: Decimal,
    pub ytd_federal_withheld: Decimal,
}

/// CSV row format for paystub input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaystubCsvRecord {
    pub spouse: String,
    pub pay_frequency: String,
    pub ytd_pay_periods: u32,
    pub ytd_gross: Decimal,
    pub ytd_pretax_deductions: Decimal,
    pub ytd_posttax_deductions: Decimal,
    pub ytd_federal_withheld: Decimal,
}

impl TryFrom<PaystubCsvRecord> for PaystubRecord {
    type Error = EstimateError;

    fn try_from(record: PaystubCsvRecord) -> Result<Self, Self::Error> {
        let spouse = record.spouse.trim().to_string();
        let raw_frequency = record.pay_frequency.trim();
        let pay_frequency = PayFrequency::from_str(raw_frequency).ok_or_else(|| {
            EstimateError::UnsupportedFrequency {
                spouse: spouse.clone(),
                value: raw_frequency.to_string(),
            }
        })?;

        Ok(PaystubRecord {
            spouse,
            pay_frequency,
            ytd_pay_periods: record.ytd_pay_periods,
            ytd_gross: record.ytd_gross,
            ytd_pretax_deductions: record.ytd_pretax_deductions,
            ytd_posttax_deductions: record.ytd_posttax_deductions,
            ytd_federal_withheld: record.ytd_federal_withheld,
        })
    }
}

/// Read and validate paystub records from CSV.
///
/// Rows with a blank spouse cell are skipped. Validation runs before any
/// computation: the schema must carry all required columns, exactly two
/// spouse rows must remain, and every row needs a positive period count.
pub fn read_records<R: Read>(reader: R) -> anyhow::Result<Vec<PaystubRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<&str> = COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(EstimateError::MissingColumns(missing.join(", ")).into());
    }

    let mut records: Vec<PaystubRecord> = Vec::new();
    for row in rdr.deserialize::<PaystubCsvRecord>() {
        let row = row?;
        if row.spouse.trim().is_empty() {
            continue;
        }
        records.push(row.try_into()?);
    }
    log::debug!("parsed {} paystub rows", records.len());

    if records.len() != 2 {
        return Err(EstimateError::SpouseRowCount(records.len()).into());
    }
    if records.iter().any(|r| r.ytd_pay_periods == 0) {
        return Err(EstimateError::NonPositivePeriods.into());
    }

    Ok(records)
}

/// Write a CSV input template with two placeholder spouse rows
pub fn write_template(path: &Path) -> anyhow::Result<()> {
    let rows = [
        PaystubCsvRecord {
            spouse: "spouse_a".to_string(),
            pay_frequency: PayFrequency::Weekly.as_str().to_string(),
            ytd_pay_periods: 0,
            ytd_gross: Decimal::ZERO,
            ytd_pretax_deductions: Decimal::ZERO,
            ytd_posttax_deductions: Decimal::ZERO,
            ytd_federal_withheld: Decimal::ZERO,
        },
        PaystubCsvRecord {
            spouse: "spouse_b".to_string(),
            pay_frequency: PayFrequency::Biweekly.as_str().to_string(),
            ytd_pay_periods: 0,
            ytd_gross: Decimal::ZERO,
            ytd_pretax_deductions: Decimal::ZERO,
            ytd_posttax_deductions: Decimal::ZERO,
            ytd_federal_withheld: Decimal::ZERO,
        },
    ];

    let mut wtr = csv::Writer::from_path(path)?;
    for row in &rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const VALID_CSV: &str = "\
spouse,pay_frequency,ytd_pay_periods,ytd_gross,ytd_pretax_deductions,ytd_posttax_deductions,ytd_federal_withheld
alex,biweekly,10,25000,2000,500,3200
sam,monthly,6,30000,1500,0,2800";

    #[test]
    fn parse_two_spouse_rows() {
        let records = read_records(VALID_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].spouse, "alex");
        assert_eq!(records[0].pay_frequency, PayFrequency::Biweekly);
        assert_eq!(records[0].ytd_pay_periods, 10);
        assert_eq!(records[0].ytd_gross, dec!(25000));
        assert_eq!(records[0].ytd_pretax_deductions, dec!(2000));
        assert_eq!(records[0].ytd_posttax_deductions, dec!(500));
        assert_eq!(records[0].ytd_federal_withheld, dec!(3200));

        assert_eq!(records[1].spouse, "sam");
        assert_eq!(records[1].pay_frequency, PayFrequency::Monthly);
    }

    #[test]
    fn blank_spouse_rows_skipped() {
        let csv_data = "\
spouse,pay_frequency,ytd_pay_periods,ytd_gross,ytd_pretax_deductions,ytd_posttax_deductions,ytd_federal_withheld
alex,biweekly,10,25000,2000,500,3200
,weekly,0,0,0,0,0
sam,monthly,6,30000,1500,0,2800";

        let records = read_records(csv_data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].spouse, "alex");
        assert_eq!(records[1].spouse, "sam");
    }

    #[test]
    fn single_row_rejected() {
        let csv_data = "\
spouse,pay_frequency,ytd_pay_periods,ytd_gross,ytd_pretax_deductions,ytd_posttax_deductions,ytd_federal_withheld
alex,biweekly,10,25000,2000,500,3200";

        let err = read_records(csv_data.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EstimateError>(),
            Some(&EstimateError::SpouseRowCount(1))
        );
    }

    #[test]
    fn unknown_frequency_rejected() {
        let csv_data = "\
spouse,pay_frequency,ytd_pay_periods,ytd_gross,ytd_pretax_deductions,ytd_posttax_deductions,ytd_federal_withheld
alex,daily,10,25000,2000,500,3200
sam,monthly,6,30000,1500,0,2800";

        let err = read_records(csv_data.as_bytes()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("daily"));
        assert!(message.contains("weekly"));
        assert!(message.contains("biweekly"));
        assert!(message.contains("semi-monthly"));
        assert!(message.contains("monthly"));
    }

    #[test]
    fn zero_periods_rejected() {
        let csv_data = "\
spouse,pay_frequency,ytd_pay_periods,ytd_gross,ytd_pretax_deductions,ytd_posttax_deductions,ytd_federal_withheld
alex,biweekly,0,25000,2000,500,3200
sam,monthly,6,30000,1500,0,2800";

        let err = read_records(csv_data.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EstimateError>(),
            Some(&EstimateError::NonPositivePeriods)
        );
    }

    #[test]
    fn missing_columns_rejected() {
        let csv_data = "\
spouse,pay_frequency,ytd_pay_periods,ytd_gross
alex,biweekly,10,25000
sam,monthly,6,30000";

        let err = read_records(csv_data.as_bytes()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("missing columns"));
        assert!(message.contains("ytd_pretax_deductions"));
        assert!(message.contains("ytd_federal_withheld"));
    }

    #[test]
    fn frequency_parse_case_insensitive() {
        assert_eq!(PayFrequency::from_str("Weekly"), Some(PayFrequency::Weekly));
        assert_eq!(
            PayFrequency::from_str("SEMI-MONTHLY"),
            Some(PayFrequency::SemiMonthly)
        );
        assert_eq!(PayFrequency::from_str("daily"), None);
    }

    #[test]
    fn periods_per_year_mapping() {
        assert_eq!(PayFrequency::Weekly.periods_per_year(), 52);
        assert_eq!(PayFrequency::Biweekly.periods_per_year(), 26);
        assert_eq!(PayFrequency::SemiMonthly.periods_per_year(), 24);
        assert_eq!(PayFrequency::Monthly.periods_per_year(), 12);
    }

    #[test]
    fn template_round_trip() {
        let path = std::env::temp_dir().join("withhold_template_test.csv");
        write_template(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let mut lines = contents.lines();
        assert_eq!(lines.next().unwrap(), COLUMNS.join(","));
        assert_eq!(lines.next().unwrap(), "spouse_a,weekly,0,0,0,0,0");
        assert_eq!(lines.next().unwrap(), "spouse_b,biweekly,0,0,0,0,0");
    }
}
