// SPDX-License-Identifier: Apache-2.0

use crate::prompt::AdvisoryContext;

/// Deterministic advisory used when the generative service is unreachable
/// or unconfigured. Level and action follow the resilience bands, so the
/// degraded path still reflects the region's actual standing.
#[must_use]
pub fn offline_advisory(context: &AdvisoryContext) -> String {
    let (level, action) = if context.resilience_index >= 70.0 {
        ("SECURE", "No action necessary.")
    } else if context.resilience_index >= 50.0 {
        ("VIGILANCE", "Monitoring recommended.")
    } else if context.resilience_index >= 30.0 {
        ("WARNING", "Preparation recommended.")
    } else {
        ("CRITICAL ALERT", "Evacuation recommended.")
    };

    let mut message = format!(
        "{level}: {} (resilience {:.1}/100). ",
        context.region_name, context.resilience_index
    );
    if let Some(population) = context.population {
        message.push_str(&format!("{population} people affected. "));
    }
    message.push_str(action);
    message
}
