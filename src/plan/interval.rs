use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PlanError;

/// Billing cadence of a recurring expense. The set is closed: anything outside
/// these four tags is rejected when the record is built or deserialized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BillingInterval {
    #[serde(rename = "monthly")]
    Monthly,
    #[serde(rename = "quarterly")]
    Quarterly,
    #[serde(rename = "semiAnnual")]
    SemiAnnual,
    #[serde(rename = "annual")]
    Annual,
}

impl BillingInterval {
    pub const ALL: [BillingInterval; 4] = [
        BillingInterval::Monthly,
        BillingInterval::Quarterly,
        BillingInterval::SemiAnnual,
        BillingInterval::Annual,
    ];

    /// Number of months between successive billings.
    pub fn period_months(&self) -> i32 {
        match self {
            BillingInterval::Monthly => 1,
            BillingInterval::Quarterly => 3,
            BillingInterval::SemiAnnual => 6,
            BillingInterval::Annual => 12,
        }
    }

    /// Wire tag used in stored payloads.
    pub fn tag(&self) -> &'static str {
        match self {
            BillingInterval::Monthly => "monthly",
            BillingInterval::Quarterly => "quarterly",
            BillingInterval::SemiAnnual => "semiAnnual",
            BillingInterval::Annual => "annual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BillingInterval::Monthly => "Monthly",
            BillingInterval::Quarterly => "Quarterly",
            BillingInterval::SemiAnnual => "Every 6 Months",
            BillingInterval::Annual => "Yearly",
        }
    }
}

impl fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BillingInterval {
    type Err = PlanError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        BillingInterval::ALL
            .into_iter()
            .find(|interval| interval.tag() == value)
            .ok_or_else(|| PlanError::UnknownInterval(value.to_string()))
    }
}
