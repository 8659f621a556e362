use std::fmt;

use serde::Serialize;

/// Deterministic price model used to project the asset forward.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GrowthModel {
    Cagr {
        rate: f64,
        decay: CagrDecay,
    },
    PowerLaw {
        slope: f64,
    },
    SCurve {
        years_to_half_remaining: f64,
        ceiling_price: f64,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CagrDecay {
    None,
    Auto,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VolatilityDecay {
    None,
    Auto,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ContributionFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ContributionFrequency {
    pub fn contributions_per_year(self) -> f64 {
        match self {
            ContributionFrequency::Daily => 365.0,
            ContributionFrequency::Weekly => 52.0,
            ContributionFrequency::Monthly => 12.0,
            ContributionFrequency::Yearly => 1.0,
        }
    }
}

/// Consumer-price inflation model applied when converting nominal future
/// amounts into today's money.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InflationModel {
    Linear {
        rate: f64,
    },
    Cyclical {
        base_rate: f64,
        amplitude: f64,
        period_years: f64,
    },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InflationParams {
    pub enabled: bool,
    pub model: InflationModel,
}

#[derive(Debug, Clone)]
pub struct AccumulationInput {
    pub starting_balance: f64,
    pub starting_price: f64,
    pub years: u32,
    pub contribution_amount: f64,
    pub frequency: ContributionFrequency,
    pub growth_model: GrowthModel,
    pub yield_enabled: bool,
    pub yield_rate: f64,
}

/// One projected year. `year` is 1-based for projected years; a zero-horizon
/// projection emits a single `year = 0` point describing current state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyProjectionPoint {
    pub year: u32,
    pub asset_balance: f64,
    pub asset_price: f64,
    pub portfolio_value_usd: f64,
    pub total_invested_usd: f64,
    pub gain_usd: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccumulationResult {
    pub yearly_points: Vec<YearlyProjectionPoint>,
    pub final_balance: f64,
    pub final_price: f64,
    pub final_value_usd: f64,
    pub total_invested_usd: f64,
    pub total_gain_usd: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct MonteCarloParams {
    pub volatility: f64,
    pub decay: VolatilityDecay,
    pub simulations: u32,
    pub seed: u64,
}

/// Cross-simulation order statistics for one projected year or month.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentileBand {
    pub period: u32,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentileSummary {
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonteCarloResult {
    pub yearly_bands: Vec<PercentileBand>,
    pub final_value: PercentileSummary,
    pub final_balance: PercentileSummary,
}

#[derive(Debug, Clone)]
pub struct DrawdownInput {
    pub starting_balance: f64,
    pub starting_price: f64,
    pub monthly_withdrawal: f64,
    pub years: u32,
    pub annual_volatility: f64,
    pub real_growth_rate: f64,
    pub inflation_rate: f64,
    pub simulations: u32,
    pub seed: u64,
}

/// One full monthly trajectory, retained only for a bounded sample of paths.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationPath {
    pub months: Vec<u32>,
    pub values: Vec<f64>,
    pub balances: Vec<f64>,
    pub prices: Vec<f64>,
    pub failed: bool,
    pub failure_month: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawdownResult {
    pub success_rate: f64,
    pub median_ending_value: Option<f64>,
    pub median_failure_month: Option<u32>,
    pub monthly_bands: Vec<PercentileBand>,
    pub sample_failed_paths: Vec<SimulationPath>,
    pub sample_successful_paths: Vec<SimulationPath>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A numeric input is outside its valid domain (non-positive price,
    /// negative balance, zero simulation count, ...).
    InvalidInput(String),
    /// A model parameter set is not usable (non-positive S-curve ceiling,
    /// zero half-life, non-positive power-law slope, ...).
    Configuration(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            EngineError::Configuration(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
