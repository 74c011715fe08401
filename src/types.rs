use std::collections::HashMap;

/// One row of the banks table as extracted from the source page.
/// Rank is the 1-based sequence position of the row.
#[derive(Debug, Clone, PartialEq)]
pub struct BankRecord {
    pub rank: u32,
    pub name: String,
    pub mc_usd_billion: f64,
}

/// A bank row after currency conversion. Derived values are rounded
/// to two decimal places.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedRecord {
    pub rank: u32,
    pub name: String,
    pub mc_usd_billion: f64,
    pub mc_gbp_billion: f64,
    pub mc_eur_billion: f64,
    pub mc_inr_billion: f64,
}

/// Currency code to rate multiplier, built once per run and immutable
/// afterward.
pub type ExchangeRateTable = HashMap<String, f64>;
