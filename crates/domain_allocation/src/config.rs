//! Allocation settings

use serde::{Deserialize, Serialize};

/// What to do with a payable's amount that no payment could cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainingOpenAmountPolicy {
    /// Leave the amount open on the payable
    #[default]
    LeaveOpen,
    /// Write the amount off
    WriteOff,
    /// Grant the amount as discount
    Discount,
}

/// Policy flags for one allocation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationSettings {
    /// Reject runs with more than one vendor document of a kind
    pub allow_only_one_vendor_doc: bool,
    /// Accept documents that end the run with an open amount
    pub allow_partial_allocations: bool,
    /// Let purchase invoices settle sales invoices
    pub allow_purchase_sales_invoice_compensation: bool,
    pub remaining_open_amount_policy: RemainingOpenAmountPolicy,
}

impl Default for AllocationSettings {
    fn default() -> Self {
        Self {
            allow_only_one_vendor_doc: true,
            allow_partial_allocations: false,
            allow_purchase_sales_invoice_compensation: false,
            remaining_open_amount_policy: RemainingOpenAmountPolicy::LeaveOpen,
        }
    }
}

impl AllocationSettings {
    /// Loads settings from `ALLOCATION_*` environment variables
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("ALLOCATION").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AllocationSettings::default();

        assert!(settings.allow_only_one_vendor_doc);
        assert!(!settings.allow_partial_allocations);
        assert!(!settings.allow_purchase_sales_invoice_compensation);
        assert_eq!(settings.remaining_open_amount_policy, RemainingOpenAmountPolicy::LeaveOpen);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: AllocationSettings = serde_json::from_str(
            r#"{"allow_partial_allocations": true, "remaining_open_amount_policy": "write_off"}"#,
        )
        .unwrap();

        assert!(settings.allow_partial_allocations);
        assert!(settings.allow_only_one_vendor_doc);
        assert_eq!(settings.remaining_open_amount_policy, RemainingOpenAmountPolicy::WriteOff);
    }

    #[test]
    fn test_from_env_without_variables_uses_defaults() {
        let settings = AllocationSettings::from_env().unwrap();
        assert_eq!(settings.remaining_open_amount_policy, RemainingOpenAmountPolicy::LeaveOpen);
    }
}
