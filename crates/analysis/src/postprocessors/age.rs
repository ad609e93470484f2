//! Age-bracket indicator postprocessor

use super::{
    no_translation, require_non_negative, require_ratio, Postprocessor, PostprocessorParams,
    ResultLog, Translate,
};
use perilgis_core::{Error, Result};

/// Derives age-bracket counts from a population total and three
/// demographic ratios (`youth_ratio`, `adult_ratio`, `elderly_ratio`).
///
/// Indicators, in order: total population, youth, adult, elderly counts.
#[derive(Debug, Clone)]
pub struct AgePostprocessor {
    population_total: Option<f64>,
    youth_ratio: Option<f64>,
    adult_ratio: Option<f64>,
    elderly_ratio: Option<f64>,
    log: ResultLog,
    translate: Translate,
}

impl AgePostprocessor {
    pub fn new() -> Self {
        Self::with_translator(no_translation)
    }

    pub fn with_translator(translate: Translate) -> Self {
        Self {
            population_total: None,
            youth_ratio: None,
            adult_ratio: None,
            elderly_ratio: None,
            log: ResultLog::new(),
            translate,
        }
    }

    fn calculate_bracket(&mut self, name: &str, population: f64, ratio: f64) {
        self.log
            .append((self.translate)(name), (population * ratio).round() as i64);
    }
}

impl Default for AgePostprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Postprocessor for AgePostprocessor {
    fn name(&self) -> &'static str {
        "age"
    }

    fn setup(&mut self, params: &PostprocessorParams) -> Result<()> {
        if self.population_total.is_some() {
            return Err(Error::Lifecycle("clear needs to be called before setup"));
        }
        let population = require_non_negative(params, "population_total")?;
        let youth = require_ratio(params, "youth_ratio")?;
        let adult = require_ratio(params, "adult_ratio")?;
        let elderly = require_ratio(params, "elderly_ratio")?;
        self.population_total = Some(population);
        self.youth_ratio = Some(youth);
        self.adult_ratio = Some(adult);
        self.elderly_ratio = Some(elderly);
        Ok(())
    }

    fn process(&mut self) -> Result<()> {
        let (population, youth, adult, elderly) = match (
            self.population_total,
            self.youth_ratio,
            self.adult_ratio,
            self.elderly_ratio,
        ) {
            (Some(p), Some(y), Some(a), Some(e)) => (p, y, a, e),
            _ => return Err(Error::Lifecycle("setup needs to be called before process")),
        };

        self.log
            .append((self.translate)("Total"), population.round() as i64);
        self.calculate_bracket("Youth count", population, youth);
        self.calculate_bracket("Adult count", population, adult);
        self.calculate_bracket("Elderly count", population, elderly);
        Ok(())
    }

    fn clear(&mut self) {
        self.population_total = None;
        self.youth_ratio = None;
        self.adult_ratio = None;
        self.elderly_ratio = None;
        self.log.reset();
    }

    fn results(&self) -> &[super::IndicatorResult] {
        self.log.results()
    }
}
