//! Environmental and economic impact of a set of manifests.
//!
//! Only settled manifests (completed or verified) count towards the
//! totals: material still pending or in transit has not been diverted yet.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::quantity::{
    format_grouped, parse_quantity_label, round_cents, saturating_mul, saturating_sum, to_kg,
};
use crate::types::Manifest;

/// Totals over a manifest slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactSummary {
    pub manifest_count: usize,
    pub settled_count: usize,
    /// Settled material in kg; labels that cannot be converted are skipped
    pub waste_diverted_kg: Decimal,
    pub carbon_saved_kg: Decimal,
    /// `waste_diverted_kg * savings_rate_per_kg`
    pub estimated_savings: Decimal,
}

impl ImpactSummary {
    pub fn from_manifests(manifests: &[Manifest], savings_rate_per_kg: Decimal) -> Self {
        let settled: Vec<&Manifest> = manifests.iter().filter(|m| m.status.is_settled()).collect();

        let waste_diverted_kg = saturating_sum(
            settled
                .iter()
                .filter_map(|m| parse_quantity_label(&m.quantity_label))
                .filter_map(|(amount, unit)| to_kg(amount, &unit)),
        );
        let carbon_saved_kg = saturating_sum(settled.iter().map(|m| m.carbon_saved_kg));

        Self {
            manifest_count: manifests.len(),
            settled_count: settled.len(),
            waste_diverted_kg,
            carbon_saved_kg,
            estimated_savings: round_cents(saturating_mul(waste_diverted_kg, savings_rate_per_kg)),
        }
    }

    /// Two-sentence summary for dashboards
    pub fn narrative(&self, currency_symbol: &str) -> String {
        if self.settled_count == 0 {
            return "No exchanges have been completed yet. \
                    Completed manifests will be reflected in your circular economy impact."
                .to_string();
        }
        let exchanges = if self.settled_count == 1 { "exchange" } else { "exchanges" };
        format!(
            "You have diverted {} kg of material from landfill across {} completed {}, \
             avoiding {} kg of CO2 emissions. Estimated cost savings stand at {}{}.",
            format_grouped(self.waste_diverted_kg),
            self.settled_count,
            exchanges,
            format_grouped(self.carbon_saved_kg),
            currency_symbol,
            format_grouped(self.estimated_savings),
        )
    }
}
