//! Impact indicator postprocessors
//!
//! A postprocessor turns scalars of an impact assessment (population totals,
//! demographic ratios) into named integer indicators. All postprocessors
//! follow the same lifecycle:
//!
//! 1. `setup(params)`: store the input scalars (requires a cleared state)
//! 2. `process()`: append the calculated indicators to the result log
//! 3. `clear()`: reset scalars and results before the next `setup`
//!
//! Calling these out of order is a lifecycle error. Indicator names go
//! through an injectable translation function so callers can localize
//! output without ambient locale state.

mod age;
mod gender;
mod minimum_needs;

pub use age::AgePostprocessor;
pub use gender::GenderPostprocessor;
pub use minimum_needs::MinimumNeedsPostprocessor;

use perilgis_core::{Error, Result};
use std::collections::HashMap;

/// Configuration mapping consumed by `setup`
pub type PostprocessorParams = HashMap<String, f64>;

/// Translation function applied to indicator names. Defaults to identity.
pub type Translate = fn(&str) -> String;

pub(crate) fn no_translation(name: &str) -> String {
    name.to_string()
}

/// One named indicator value
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorResult {
    pub name: String,
    pub value: i64,
    /// Human-readable description of what the indicator means
    pub description: Option<String>,
}

/// Accumulates indicator results in calculation order.
///
/// Concrete postprocessors own one and delegate their appends to it.
#[derive(Debug, Clone, Default)]
pub struct ResultLog {
    results: Vec<IndicatorResult>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: impl Into<String>, value: i64) {
        self.results.push(IndicatorResult {
            name: name.into(),
            value,
            description: None,
        });
    }

    pub fn append_with_description(
        &mut self,
        name: impl Into<String>,
        value: i64,
        description: impl Into<String>,
    ) {
        self.results.push(IndicatorResult {
            name: name.into(),
            value,
            description: Some(description.into()),
        });
    }

    pub fn results(&self) -> &[IndicatorResult] {
        &self.results
    }

    pub fn reset(&mut self) {
        self.results.clear();
    }
}

/// Lifecycle contract shared by all indicator postprocessors
pub trait Postprocessor {
    /// Short identifier used in output headers
    fn name(&self) -> &'static str;

    /// Store the input scalars. Requires a cleared state.
    fn setup(&mut self, params: &PostprocessorParams) -> Result<()>;

    /// Calculate the indicators and append them to the result log
    fn process(&mut self) -> Result<()>;

    /// Reset scalars and results
    fn clear(&mut self);

    /// Indicators accumulated by `process`, in calculation order
    fn results(&self) -> &[IndicatorResult];
}

pub(crate) fn require(params: &PostprocessorParams, key: &'static str) -> Result<f64> {
    params.get(key).copied().ok_or(Error::MissingParameter(key))
}

pub(crate) fn require_non_negative(params: &PostprocessorParams, key: &'static str) -> Result<f64> {
    let value = require(params, key)?;
    if value < 0.0 {
        return Err(Error::InvalidParameter {
            name: key,
            value: value.to_string(),
            reason: "must be non-negative".to_string(),
        });
    }
    Ok(value)
}

pub(crate) fn require_ratio(params: &PostprocessorParams, key: &'static str) -> Result<f64> {
    let value = require(params, key)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidParameter {
            name: key,
            value: value.to_string(),
            reason: "must be a fraction in [0, 1]".to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_log_keeps_order() {
        let mut log = ResultLog::new();
        log.append("Total", 100);
        log.append_with_description("Female population", 50, "half");

        let results = log.results();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Total");
        assert_eq!(results[1].value, 50);
        assert_eq!(results[1].description.as_deref(), Some("half"));

        log.reset();
        assert!(log.results().is_empty());
    }

    #[test]
    fn test_require_helpers() {
        let mut params = PostprocessorParams::new();
        params.insert("population_total".to_string(), 1000.0);
        params.insert("female_ratio".to_string(), 1.5);

        assert!(require(&params, "population_total").is_ok());
        assert!(matches!(
            require(&params, "absent"),
            Err(Error::MissingParameter("absent"))
        ));
        assert!(matches!(
            require_ratio(&params, "female_ratio"),
            Err(Error::InvalidParameter { .. })
        ));
    }
}
