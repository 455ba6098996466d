// SPDX-License-Identifier: Apache-2.0

use islandguard_model::{Category, ScoredRegion};
use std::fmt::Write as _;

/// Scoring context handed to the generative service. Everything the prompt
/// carries comes from the scored table; the service never sees raw inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryContext {
    pub region_id: String,
    pub region_name: String,
    pub category: Category,
    pub exposure: f64,
    pub vulnerability: f64,
    pub adaptation: f64,
    pub resilience_index: f64,
    pub population: Option<u64>,
    /// Cyclone intensity the caller simulated before asking for advice, if
    /// any. Zero means current conditions.
    pub cyclone_intensity: f64,
}

impl AdvisoryContext {
    #[must_use]
    pub fn from_scored(scored: &ScoredRegion, cyclone_intensity: f64) -> Self {
        Self {
            region_id: scored.region.region_id.as_str().to_string(),
            region_name: scored.region.region_name.as_str().to_string(),
            category: scored.score.category,
            exposure: scored.region.exposure,
            vulnerability: scored.region.vulnerability,
            adaptation: scored.region.adaptation,
            resilience_index: scored.score.resilience_index,
            population: scored.region.population,
            cyclone_intensity,
        }
    }
}

/// Deterministic prompt text: same context, same prompt, byte for byte.
#[must_use]
pub fn build_prompt(context: &AdvisoryContext) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You are a disaster-preparedness advisor for Mauritius."
    );
    let _ = writeln!(
        prompt,
        "Region {} ({}) is classified {}.",
        context.region_name, context.region_id, context.category
    );
    let _ = writeln!(
        prompt,
        "Resilience index: {:.2} (exposure {:.1}, vulnerability {:.1}, adaptation {:.1}).",
        context.resilience_index, context.exposure, context.vulnerability, context.adaptation
    );
    if let Some(population) = context.population {
        let _ = writeln!(prompt, "Approximately {population} residents are affected.");
    }
    if context.cyclone_intensity > 0.0 {
        let _ = writeln!(
            prompt,
            "A cyclone of intensity {:.0} is being simulated; the figures above already include its impact.",
            context.cyclone_intensity
        );
    }
    let _ = writeln!(
        prompt,
        "Give concise, practical safety advice for residents of this region."
    );
    prompt
}
