#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EstimateError {
    #[error("missing columns in CSV: {0}")]
    MissingColumns(String),
    #[error("unsupported pay_frequency '{value}' for {spouse}. Use one of weekly, biweekly, semi-monthly, monthly.")]
    UnsupportedFrequency { spouse: String, value: String },
    #[error("expected exactly two spouse rows in the CSV, found {0}")]
    SpouseRowCount(usize),
    #[error("ytd_pay_periods must be greater than zero")]
    NonPositivePeriods,
    #[error("unsupported tax year {year}. Available: {available}")]
    UnsupportedTaxYear { year: i32, available: String },
    #[error("either --input or --create-template must be supplied")]
    MissingInput,
}
