//! Annualization, apportionment, and per-period withholding targets

use crate::error::EstimateError;
use crate::paystub::PaystubRecord;
use crate::tax::schedule::BracketSchedule;
use rust_decimal::Decimal;

/// Per-spouse withholding guidance from one estimation run
#[derive(Debug, Clone, PartialEq)]
pub struct WithholdingResult {
    pub spouse: String,
    pub annualized_gross: Decimal,
    pub annualized_pretax: Decimal,
    pub annualized_taxable: Decimal,
    /// This spouse's share of the joint tax, proportional to taxable income
    pub tax_share: Decimal,
    pub remaining_periods: u32,
    /// Suggested withholding per remaining pay period (negative means
    /// withholding already covers the share)
    pub target_withholding_per_period: Decimal,
    /// Target as a fraction of per-period gross pay
    pub target_withholding_rate: Decimal,
    pub ytd_federal_withheld: Decimal,
}

/// Straight-line projection of a YTD amount to a full year
pub fn annualize(
    amount: Decimal,
    ytd_periods: u32,
    periods_per_year: u32,
) -> Result<Decimal, EstimateError> {
    if ytd_periods == 0 {
        return Err(EstimateError::NonPositivePeriods);
    }
    Ok(amount / Decimal::from(ytd_periods) * Decimal::from(periods_per_year))
}

/// Annualized taxable income per spouse, order-preserving.
///
/// Gross and pretax deductions annualize independently; taxable income is
/// floored at zero.
pub fn compute_taxable_income(
    records: &[PaystubRecord],
) -> Result<Vec<(String, Decimal)>, EstimateError> {
    records
        .iter()
        .map(|record| {
            let periods_per_year = record.pay_frequency.periods_per_year();
            let gross = annualize(record.ytd_gross, record.ytd_pay_periods, periods_per_year)?;
            let pretax = annualize(
                record.ytd_pretax_deductions,
                record.ytd_pay_periods,
                periods_per_year,
            )?;
            let taxable = (gross - pretax).max(Decimal::ZERO);
            Ok((record.spouse.clone(), taxable))
        })
        .collect()
}

/// Full estimation pipeline: joint tax, proportional apportionment, and
/// per-remaining-period withholding targets. Results preserve input order.
pub fn compute_results(
    records: &[PaystubRecord],
    schedule: &BracketSchedule,
) -> Result<Vec<WithholdingResult>, EstimateError> {
    let taxable_by_spouse = compute_taxable_income(records)?;
    let joint_taxable: Decimal = taxable_by_spouse.iter().map(|(_, t)| *t).sum();
    let joint_tax = schedule.tax_due(joint_taxable);
    log::debug!("joint taxable income {joint_taxable}, joint tax {joint_tax}");

    let mut results = Vec::with_capacity(records.len());
    for (record, (_, spouse_taxable)) in records.iter().zip(&taxable_by_spouse) {
        let periods_per_year = record.pay_frequency.periods_per_year();
        let annualized_gross =
            annualize(record.ytd_gross, record.ytd_pay_periods, periods_per_year)?;
        let annualized_pretax = annualize(
            record.ytd_pretax_deductions,
            record.ytd_pay_periods,
            periods_per_year,
        )?;

        // Zero joint income means no tax to apportion
        let share = if joint_taxable > Decimal::ZERO {
            *spouse_taxable / joint_taxable
        } else {
            Decimal::ZERO
        };
        let tax_share = joint_tax * share;

        let remaining_periods = periods_per_year.saturating_sub(record.ytd_pay_periods);
        let remaining_tax = tax_share - record.ytd_federal_withheld;
        let target_withholding_per_period = if remaining_periods > 0 {
            remaining_tax / Decimal::from(remaining_periods)
        } else {
            Decimal::ZERO
        };

        let gross_per_period = annualized_gross / Decimal::from(periods_per_year);
        let target_withholding_rate = if gross_per_period > Decimal::ZERO {
            target_withholding_per_period / gross_per_period
        } else {
            Decimal::ZERO
        };

        results.push(WithholdingResult {
            spouse: record.spouse.clone(),
            annualized_gross,
            annualized_pretax,
            annualized_taxable: *spouse_taxable,
            tax_share,
            remaining_periods,
            target_withholding_per_period,
            target_withholding_rate,
            ytd_federal_withheld: record.ytd_federal_withheld,
        });
    }

    Ok(results)
}
