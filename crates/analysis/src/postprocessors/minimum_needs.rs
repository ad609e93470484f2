//! Minimum-needs indicator postprocessor

use super::{
    no_translation, require_non_negative, Postprocessor, PostprocessorParams, ResultLog, Translate,
};
use perilgis_core::{Error, Result};

/// Weekly per-capita relief allocations
const RICE_KG: f64 = 2.8;
const DRINKING_WATER_L: f64 = 17.5;
const CLEAN_WATER_L: f64 = 67.0;
const FAMILY_KITS: f64 = 0.2;
const TOILETS: f64 = 0.05;

/// Derives weekly relief-supply needs from a population total.
///
/// Indicators, in order: total population, rice, drinking water, clean
/// water, family kits, toilets. Each amount is the population times a fixed
/// weekly per-capita allocation, rounded once.
#[derive(Debug, Clone)]
pub struct MinimumNeedsPostprocessor {
    population_total: Option<f64>,
    log: ResultLog,
    translate: Translate,
}

impl MinimumNeedsPostprocessor {
    pub fn new() -> Self {
        Self::with_translator(no_translation)
    }

    pub fn with_translator(translate: Translate) -> Self {
        Self {
            population_total: None,
            log: ResultLog::new(),
            translate,
        }
    }

    fn calculate_need(&mut self, name: &str, population: f64, rate: f64, description: &str) {
        self.log.append_with_description(
            (self.translate)(name),
            (population * rate).round() as i64,
            description,
        );
    }
}

impl Default for MinimumNeedsPostprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Postprocessor for MinimumNeedsPostprocessor {
    fn name(&self) -> &'static str {
        "minimum-needs"
    }

    fn setup(&mut self, params: &PostprocessorParams) -> Result<()> {
        if self.population_total.is_some() {
            return Err(Error::Lifecycle("clear needs to be called before setup"));
        }
        self.population_total = Some(require_non_negative(params, "population_total")?);
        Ok(())
    }

    fn process(&mut self) -> Result<()> {
        let Some(population) = self.population_total else {
            return Err(Error::Lifecycle("setup needs to be called before process"));
        };

        self.log
            .append((self.translate)("Total"), population.round() as i64);
        self.calculate_need("Rice kg", population, RICE_KG, "Weekly 2.8 kg rice per person");
        self.calculate_need(
            "Drinking water litres",
            population,
            DRINKING_WATER_L,
            "Weekly 17.5 litres drinking water per person",
        );
        self.calculate_need(
            "Clean water litres",
            population,
            CLEAN_WATER_L,
            "Weekly 67 litres clean water per person",
        );
        self.calculate_need(
            "Family kits",
            population,
            FAMILY_KITS,
            "One family kit per five people per week",
        );
        self.calculate_need("Toilets", population, TOILETS, "One toilet per twenty people");
        Ok(())
    }

    fn clear(&mut self) {
        self.population_total = None;
        self.log.reset();
    }

    fn results(&self) -> &[super::IndicatorResult] {
        self.log.results()
    }
}
