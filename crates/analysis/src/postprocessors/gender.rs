//! Gender indicator postprocessor

use super::{
    no_translation, require_non_negative, require_ratio, Postprocessor, PostprocessorParams,
    ResultLog, Translate,
};
use perilgis_core::{Error, Result};

/// Hygiene packs per affected female per week
const HYGIENE_PACKS_PER_FEMALE: f64 = 0.7937;
/// Additional rice, kg per week, for the lactating share of affected females
const LACTATING_RICE_KG: f64 = 0.033782;
/// Additional rice, kg per week, for the pregnant share of affected females
const PREGNANT_RICE_KG: f64 = 0.01281;

/// Derives gender-specific humanitarian indicators from a population total
/// and a female-population ratio.
///
/// Indicators, in order: total population, female population, weekly
/// hygiene packs, additional weekly rice for pregnant and lactating women.
/// Each value is rounded once at the end of its formula.
#[derive(Debug, Clone)]
pub struct GenderPostprocessor {
    population_total: Option<f64>,
    female_ratio: Option<f64>,
    log: ResultLog,
    translate: Translate,
}

impl GenderPostprocessor {
    pub fn new() -> Self {
        Self::with_translator(no_translation)
    }

    pub fn with_translator(translate: Translate) -> Self {
        Self {
            population_total: None,
            female_ratio: None,
            log: ResultLog::new(),
            translate,
        }
    }

    fn calculate_total(&mut self, population: f64) {
        self.log
            .append((self.translate)("Total"), population.round() as i64);
    }

    fn calculate_females(&mut self, females: f64) {
        self.log
            .append((self.translate)("Female population"), females.round() as i64);
    }

    fn calculate_weekly_hygiene_packs(&mut self, females: f64) {
        let packs = females * HYGIENE_PACKS_PER_FEMALE;
        self.log.append_with_description(
            (self.translate)("Weekly hygiene packs"),
            packs.round() as i64,
            "Females hygiene packs for weekly use",
        );
    }

    fn calculate_weekly_increased_calories(&mut self, females: f64) {
        let lactating_kg = females * 2.0 * LACTATING_RICE_KG;
        let pregnant_kg = females * 2.0 * PREGNANT_RICE_KG;
        // Summed as reals, rounded once
        let rice_kg = lactating_kg + pregnant_kg;
        self.log.append_with_description(
            (self.translate)("Additional weekly rice kg for pregnant and lactating women"),
            rice_kg.round() as i64,
            "Additional rice kg per week for pregnant and lactating women",
        );
    }
}

impl Default for GenderPostprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Postprocessor for GenderPostprocessor {
    fn name(&self) -> &'static str {
        "gender"
    }

    fn setup(&mut self, params: &PostprocessorParams) -> Result<()> {
        if self.population_total.is_some() || self.female_ratio.is_some() {
            return Err(Error::Lifecycle("clear needs to be called before setup"));
        }
        let population = require_non_negative(params, "population_total")?;
        let ratio = require_ratio(params, "female_ratio")?;
        self.population_total = Some(population);
        self.female_ratio = Some(ratio);
        Ok(())
    }

    fn process(&mut self) -> Result<()> {
        let (population, ratio) = match (self.population_total, self.female_ratio) {
            (Some(population), Some(ratio)) => (population, ratio),
            _ => return Err(Error::Lifecycle("setup needs to be called before process")),
        };

        let females = population * ratio;
        self.calculate_total(population);
        self.calculate_females(females);
        self.calculate_weekly_hygiene_packs(females);
        self.calculate_weekly_increased_calories(females);
        Ok(())
    }

    fn clear(&mut self) {
        self.population_total = None;
        self.female_ratio = None;
        self.log.reset();
    }

    fn results(&self) -> &[super::IndicatorResult] {
        self.log.results()
    }
}
