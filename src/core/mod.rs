mod drawdown;
mod engine;
mod growth;
mod inflation;
mod rng;
mod stats;
mod types;

pub use drawdown::run_drawdown_monte_carlo;
pub use engine::{project, run_accumulation_monte_carlo};
pub use growth::{DEFAULT_POWER_LAW_SLOPE, future_price};
pub use inflation::{cumulative_inflation_factor, debasement_factor, to_present_value};
pub use types::{
    AccumulationInput, AccumulationResult, CagrDecay, ContributionFrequency, DrawdownInput,
    DrawdownResult, EngineError, GrowthModel, InflationModel, InflationParams, MonteCarloParams,
    MonteCarloResult, PercentileBand, PercentileSummary, SimulationPath, VolatilityDecay,
    YearlyProjectionPoint,
};
