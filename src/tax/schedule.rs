use crate::error::EstimateError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One marginal bracket: the slice of income between the previous bound and
/// `upper` is taxed at `rate`. The top bracket is unbounded (`upper: None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

/// Married-filing-jointly bracket schedule for one tax year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketSchedule {
    pub year: i32,
    pub standard_deduction: Decimal,
    pub brackets: Vec<Bracket>,
}

pub const SUPPORTED_YEARS: [i32; 1] = [2024];

/// Look up the bracket schedule for a tax year
pub fn for_year(year: i32) -> Result<BracketSchedule, EstimateError> {
    match year {
        2024 => Ok(mfj_2024()),
        _ => Err(EstimateError::UnsupportedTaxYear {
            year,
            available: SUPPORTED_YEARS
                .iter()
                .map(|y| y.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

fn mfj_2024() -> BracketSchedule {
    BracketSchedule {
        year: 2024,
        standard_deduction: dec!(29200),
        brackets: vec![
            Bracket { upper: Some(dec!(22000)), rate: dec!(0.10) },
            Bracket { upper: Some(dec!(89450)), rate: dec!(0.12) },
            Bracket { upper: Some(dec!(190750)), rate: dec!(0.22) },
            Bracket { upper: Some(dec!(364200)), rate: dec!(0.24) },
            Bracket { upper: Some(dec!(462500)), rate: dec!(0.32) },
            Bracket { upper: Some(dec!(693750)), rate: dec!(0.35) },
            Bracket { upper: None, rate: dec!(0.37) },
        ],
    }
}

impl BracketSchedule {
    /// Federal tax due on annualized taxable income.
    ///
    /// Subtracts the standard deduction (floored at zero), then walks the
    /// brackets from the bottom, taxing only the slice of income that falls
    /// within each bracket.
    pub fn tax_due(&self, taxable_income: Decimal) -> Decimal {
        let mut remaining = (taxable_income - self.standard_deduction).max(Decimal::ZERO);
        let mut tax = Decimal::ZERO;
        let mut lower = Decimal::ZERO;

        for bracket in &self.brackets {
            if remaining <= Decimal::ZERO {
                break;
            }
            let at_rate = match bracket.upper {
                Some(upper) => (upper - lower).min(remaining),
                None => remaining,
            };
            tax += at_rate * bracket.rate;
            remaining -= at_rate;
            if let Some(upper) = bracket.upper {
                lower = upper;
            }
        }

        tax
    }
}
