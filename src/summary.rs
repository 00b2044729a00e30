//! Console and JSON rendering of an estimation run

use crate::tax::schedule::BracketSchedule;
use crate::tax::WithholdingResult;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

/// Summary data for JSON output
#[derive(Debug, Serialize)]
struct SummaryData {
    tax_year: i32,
    standard_deduction: String,
    joint_taxable_income: String,
    estimated_federal_tax: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_year_tax: Option<String>,
    spouses: Vec<SpouseSummary>,
}

#[derive(Debug, Serialize)]
struct SpouseSummary {
    spouse: String,
    annualized_gross: String,
    annualized_pretax: String,
    annualized_taxable: String,
    tax_share: String,
    remaining_periods: u32,
    target_withholding_per_period: String,
    target_withholding_rate_pct: String,
    ytd_federal_withheld: String,
}

/// Row for the per-spouse breakdown table
#[derive(Debug, Clone, Tabled)]
struct SpouseRow {
    #[tabled(rename = "Spouse")]
    spouse: String,

    #[tabled(rename = "Ann. Gross")]
    gross: String,

    #[tabled(rename = "Ann. Pretax")]
    pretax: String,

    #[tabled(rename = "Ann. Taxable")]
    taxable: String,

    #[tabled(rename = "Tax Share")]
    tax_share: String,

    #[tabled(rename = "Periods Left")]
    remaining: String,

    #[tabled(rename = "Target/Period")]
    target: String,

    #[tabled(rename = "Target Rate")]
    rate: String,

    #[tabled(rename = "YTD Withheld")]
    withheld: String,
}

pub fn print_summary(
    results: &[WithholdingResult],
    schedule: &BracketSchedule,
    last_year_tax: Option<Decimal>,
) {
    let joint_taxable: Decimal = results.iter().map(|r| r.annualized_taxable).sum();
    let joint_tax = schedule.tax_due(joint_taxable);

    println!();
    println!("JOINT FEDERAL TAX ESTIMATE ({})", schedule.year);
    println!();
    println!("  Standard deduction (MFJ): {}", format_usd(schedule.standard_deduction));
    println!("  Annualized taxable income: {}", format_usd(joint_taxable));
    println!("  Estimated federal tax: {}", format_usd(joint_tax));
    if let Some(reference) = last_year_tax {
        println!("  Last year total tax (reference): {}", format_usd(reference));
    }
    println!();

    let rows: Vec<SpouseRow> = results
        .iter()
        .map(|r| SpouseRow {
            spouse: r.spouse.clone(),
            gross: format_usd(r.annualized_gross),
            pretax: format_usd(r.annualized_pretax),
            taxable: format_usd(r.annualized_taxable),
            tax_share: format_usd(r.tax_share),
            remaining: r.remaining_periods.to_string(),
            target: format_usd_signed(r.target_withholding_per_period),
            rate: format_pct(r.target_withholding_rate),
            withheld: format_usd(r.ytd_federal_withheld),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();
}

pub fn print_json(
    results: &[WithholdingResult],
    schedule: &BracketSchedule,
    last_year_tax: Option<Decimal>,
) -> anyhow::Result<()> {
    let joint_taxable: Decimal = results.iter().map(|r| r.annualized_taxable).sum();
    let joint_tax = schedule.tax_due(joint_taxable);

    let data = SummaryData {
        tax_year: schedule.year,
        standard_deduction: format!("{:.2}", schedule.standard_deduction),
        joint_taxable_income: format!("{:.2}", joint_taxable),
        estimated_federal_tax: format!("{:.2}", joint_tax),
        last_year_tax: last_year_tax.map(|t| format!("{:.2}", t)),
        spouses: results
            .iter()
            .map(|r| SpouseSummary {
                spouse: r.spouse.clone(),
                annualized_gross: format!("{:.2}", r.annualized_gross),
                annualized_pretax: format!("{:.2}", r.annualized_pretax),
                annualized_taxable: format!("{:.2}", r.annualized_taxable),
                tax_share: format!("{:.2}", r.tax_share.round_dp(2)),
                remaining_periods: r.remaining_periods,
                target_withholding_per_period: format!(
                    "{:.2}",
                    r.target_withholding_per_period.round_dp(2)
                ),
                target_withholding_rate_pct: format!(
                    "{:.2}",
                    (r.target_withholding_rate * dec!(100)).round_dp(2)
                ),
                ytd_federal_withheld: format!("{:.2}", r.ytd_federal_withheld),
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

fn format_usd_signed(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-${:.2}", amount.abs().round_dp(2))
    } else {
        format!("${:.2}", amount.round_dp(2))
    }
}

fn format_pct(rate: Decimal) -> String {
    format!("{:.2}%", (rate * dec!(100)).round_dp(2))
}
