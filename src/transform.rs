use crate::error::{EtlError, Result};
use crate::types::{BankRecord, ConvertedRecord, ExchangeRateTable};

/// Rounds to two decimal places. `f64::round` rounds half away from zero;
/// the same rule applies to every derived column.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derives the GBP, EUR, and INR capitalization columns from the USD base.
/// Pure: borrows both inputs and returns a new table. Fails before any row
/// is converted if a target currency is missing from the rate table.
pub fn transform(
    records: &[BankRecord],
    rates: &ExchangeRateTable,
) -> Result<Vec<ConvertedRecord>> {
    let rate = |code: &str| -> Result<f64> {
        rates
            .get(code)
            .copied()
            .ok_or_else(|| EtlError::MissingRate(code.to_string()))
    };
    let gbp = rate("GBP")?;
    let eur = rate("EUR")?;
    let inr = rate("INR")?;

    Ok(records
        .iter()
        .map(|r| ConvertedRecord {
            rank: r.rank,
            name: r.name.clone(),
            mc_usd_billion: r.mc_usd_billion,
            mc_gbp_billion: round2(r.mc_usd_billion * gbp),
            mc_eur_billion: round2(r.mc_usd_billion * eur),
            mc_inr_billion: round2(r.mc_usd_billion * inr),
        })
        .collect())
}
