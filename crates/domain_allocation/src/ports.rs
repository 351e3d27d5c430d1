//! Allocation Domain Ports
//!
//! The engine never writes to storage itself. It describes each allocation
//! as an [`AllocationHeaderDraft`] and hands the drafts to an
//! [`AllocationStore`] inside one unit of work opened by a
//! [`TransactionManager`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_allocation::ports::mock::InMemoryTransactionManager;
//!
//! let mut tx = InMemoryTransactionManager::new();
//! let result = PaymentAllocationBuilder::new()
//!     .date_trx(today)
//!     .date_acct(today)
//!     .payables(invoices)
//!     .payments(payments)
//!     .transaction_manager(&mut tx)
//!     .build()?;
//!
//! assert_eq!(tx.store().headers().len(), result.allocation_ids().len());
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{
    AllocationId, AllocationLineId, Currency, DomainPort, InvoiceId, Money, OrgId, PartyId,
    PaymentId, PortError,
};

use crate::error::AllocationError;

/// One line of an allocation header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationLineDraft {
    pub org_id: OrgId,
    pub bpartner_id: Option<PartyId>,
    pub invoice_id: Option<InvoiceId>,
    pub payment_id: Option<PaymentId>,
    /// Settled amount
    pub amount: Money,
    pub discount_amt: Money,
    pub write_off_amt: Money,
    pub over_under_amt: Money,
}

impl AllocationLineDraft {
    /// Creates a line with zero amounts
    pub fn new(org_id: OrgId, bpartner_id: Option<PartyId>, currency: Currency) -> Self {
        Self {
            org_id,
            bpartner_id,
            invoice_id: None,
            payment_id: None,
            amount: Money::zero(currency),
            discount_amt: Money::zero(currency),
            write_off_amt: Money::zero(currency),
            over_under_amt: Money::zero(currency),
        }
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn discount_amt(mut self, discount_amt: Money) -> Self {
        self.discount_amt = discount_amt;
        self
    }

    pub fn write_off_amt(mut self, write_off_amt: Money) -> Self {
        self.write_off_amt = write_off_amt;
        self
    }

    pub fn over_under_amt(mut self, over_under_amt: Money) -> Self {
        self.over_under_amt = over_under_amt;
        self
    }

    pub fn invoice_id(mut self, invoice_id: InvoiceId) -> Self {
        self.invoice_id = Some(invoice_id);
        self
    }

    pub fn payment_id(mut self, payment_id: PaymentId) -> Self {
        self.payment_id = Some(payment_id);
        self
    }

    /// True when amount, discount, write-off and over/under are all zero
    pub fn is_all_zero(&self) -> bool {
        self.amount.is_zero()
            && self.discount_amt.is_zero()
            && self.write_off_amt.is_zero()
            && self.over_under_amt.is_zero()
    }
}

/// An allocation header ready to be created and completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationHeaderDraft {
    pub org_id: OrgId,
    pub currency: Currency,
    pub date_trx: NaiveDate,
    pub date_acct: NaiveDate,
    /// Flagged as created by a user rather than by a background process
    pub manual: bool,
    pub lines: Vec<AllocationLineDraft>,
}

impl AllocationHeaderDraft {
    pub fn new(org_id: OrgId, currency: Currency, date_trx: NaiveDate, date_acct: NaiveDate) -> Self {
        Self {
            org_id,
            currency,
            date_trx,
            date_acct,
            manual: true,
            lines: Vec::new(),
        }
    }

    /// Adds a line unless all its amounts are zero
    pub fn line(mut self, line: AllocationLineDraft) -> Self {
        if !line.is_all_zero() {
            self.lines.push(line);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Identifiers assigned to a created allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedAllocation {
    pub allocation_id: AllocationId,
    /// Line ids in the order of the draft's lines
    pub line_ids: Vec<AllocationLineId>,
}

/// Port for writing allocation headers and lines
pub trait AllocationStore: DomainPort {
    /// Creates and completes an allocation header with its lines
    ///
    /// Returns `None` when the draft has no lines and nothing was created.
    fn create_and_complete(
        &mut self,
        header: &AllocationHeaderDraft,
    ) -> Result<Option<CompletedAllocation>, PortError>;

    /// Points `line` at its matching `counter` line
    fn set_counter_line(
        &mut self,
        line: AllocationLineId,
        counter: AllocationLineId,
    ) -> Result<(), PortError>;
}

/// Port for running a unit of work atomically
///
/// Implementations hand a transactional store to `work`, commit when it
/// returns `Ok` and roll back everything when it returns `Err`.
pub trait TransactionManager: DomainPort {
    fn run_atomically(
        &mut self,
        work: &mut dyn FnMut(&mut dyn AllocationStore) -> Result<(), AllocationError>,
    ) -> Result<(), AllocationError>;
}

/// Mock implementations of the allocation ports for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;

    /// A header as recorded by [`InMemoryAllocationStore`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct StoredAllocation {
        pub allocation_id: AllocationId,
        pub header: AllocationHeaderDraft,
        pub line_ids: Vec<AllocationLineId>,
    }

    /// In-memory allocation store
    #[derive(Debug, Clone, Default)]
    pub struct InMemoryAllocationStore {
        headers: Vec<StoredAllocation>,
        counter_lines: HashMap<AllocationLineId, AllocationLineId>,
        fail_after_headers: Option<usize>,
    }

    impl InMemoryAllocationStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes `create_and_complete` fail once `count` headers exist
        pub fn fail_after_headers(mut self, count: usize) -> Self {
            self.fail_after_headers = Some(count);
            self
        }

        pub fn headers(&self) -> &[StoredAllocation] {
            &self.headers
        }

        pub fn counter_line(&self, line: AllocationLineId) -> Option<AllocationLineId> {
            self.counter_lines.get(&line).copied()
        }

        pub fn line_count(&self) -> usize {
            self.headers.iter().map(|h| h.line_ids.len()).sum()
        }
    }

    impl DomainPort for InMemoryAllocationStore {}

    impl AllocationStore for InMemoryAllocationStore {
        fn create_and_complete(
            &mut self,
            header: &AllocationHeaderDraft,
        ) -> Result<Option<CompletedAllocation>, PortError> {
            if let Some(limit) = self.fail_after_headers {
                if self.headers.len() >= limit {
                    return Err(PortError::internal(format!(
                        "injected failure after {} allocation headers",
                        limit
                    )));
                }
            }

            if header.is_empty() {
                return Ok(None);
            }

            let completed = CompletedAllocation {
                allocation_id: AllocationId::new_v7(),
                line_ids: header.lines.iter().map(|_| AllocationLineId::new_v7()).collect(),
            };
            self.headers.push(StoredAllocation {
                allocation_id: completed.allocation_id,
                header: header.clone(),
                line_ids: completed.line_ids.clone(),
            });

            Ok(Some(completed))
        }

        fn set_counter_line(
            &mut self,
            line: AllocationLineId,
            counter: AllocationLineId,
        ) -> Result<(), PortError> {
            let known = self.headers.iter().any(|h| h.line_ids.contains(&line));
            if !known {
                return Err(PortError::not_found("AllocationLine", line));
            }
            self.counter_lines.insert(line, counter);
            Ok(())
        }
    }

    /// In-memory transaction manager
    ///
    /// Snapshots the store before each unit of work and restores it when the
    /// work fails.
    #[derive(Debug, Clone, Default)]
    pub struct InMemoryTransactionManager {
        store: InMemoryAllocationStore,
        commits: usize,
        rollbacks: usize,
    }

    impl InMemoryTransactionManager {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_store(store: InMemoryAllocationStore) -> Self {
            Self {
                store,
                ..Self::default()
            }
        }

        pub fn store(&self) -> &InMemoryAllocationStore {
            &self.store
        }

        pub fn commits(&self) -> usize {
            self.commits
        }

        pub fn rollbacks(&self) -> usize {
            self.rollbacks
        }
    }

    impl DomainPort for InMemoryTransactionManager {}

    impl TransactionManager for InMemoryTransactionManager {
        fn run_atomically(
            &mut self,
            work: &mut dyn FnMut(&mut dyn AllocationStore) -> Result<(), AllocationError>,
        ) -> Result<(), AllocationError> {
            let snapshot = self.store.clone();
            match work(&mut self.store) {
                Ok(()) => {
                    self.commits += 1;
                    Ok(())
                }
                Err(err) => {
                    self.store = snapshot;
                    self.rollbacks += 1;
                    Err(err)
                }
            }
        }
    }
}
