use serde::{Deserialize, Serialize};

use super::common::{component_sum, ComponentMap};

/// Snapshot of credit/debit maps with their derived net amount.
///
/// `net_amount` always equals `Σcredits − Σdebits` of the maps it was built
/// from; construction goes through [`Totals::from_maps`] so a stale net is
/// unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Totals {
    pub credits: ComponentMap,
    pub debits: ComponentMap,
    pub net_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Totals {
    pub fn from_maps(credits: ComponentMap, debits: ComponentMap) -> Self {
        let net_amount = component_sum(&credits) - component_sum(&debits);
        Self {
            credits,
            debits,
            net_amount,
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Externally supplied expected totals, all optional.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExpectedTotals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debits: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net: Option<f64>,
}

impl ExpectedTotals {
    pub fn is_empty(&self) -> bool {
        self.credits.is_none() && self.debits.is_none() && self.net.is_none()
    }
}
