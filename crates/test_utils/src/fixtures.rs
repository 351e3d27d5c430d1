//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the allocation domain.
//! These fixtures are designed to be consistent and predictable for unit tests.

use chrono::NaiveDate;
use core_kernel::{OrgId, PartyId, InvoiceId, PaymentId, OrderId};
use uuid::Uuid;

/// Fixture for allocation dates
pub struct DateFixtures;

impl DateFixtures {
    /// Standard transaction date (Mar 15, 2024)
    pub fn date_trx() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    /// Standard accounting date (Mar 31, 2024)
    pub fn date_acct() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }
}

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    /// The organization all fixture documents belong to
    pub fn org_id() -> OrgId {
        OrgId::from_uuid(Uuid::from_u128(0x0192_0000_0000_7000_8000_0000_0000_0001))
    }

    /// Business partner used by fixture documents
    pub fn bpartner_id() -> PartyId {
        PartyId::from_uuid(Uuid::from_u128(0x0192_0000_0000_7000_8000_0000_0000_0002))
    }

    /// Creates a fresh invoice ID
    pub fn invoice_id() -> InvoiceId {
        InvoiceId::new_v7()
    }

    /// Creates a fresh payment ID
    pub fn payment_id() -> PaymentId {
        PaymentId::new_v7()
    }

    /// Creates a fresh order ID
    pub fn order_id() -> OrderId {
        OrderId::new_v7()
    }
}

/// Fixture for document numbers
pub struct StringFixtures;

impl StringFixtures {
    /// Sample sales invoice number
    pub fn invoice_no() -> &'static str {
        "ARI-2024-000123"
    }

    /// Sample payment number
    pub fn payment_no() -> &'static str {
        "PAY-2024-000456"
    }
}
