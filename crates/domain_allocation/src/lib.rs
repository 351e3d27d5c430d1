//! Allocation Domain - Payment Allocation Engine
//!
//! This crate matches outstanding payable documents against the documents
//! that can pay them and describes the resulting allocations.
//!
//! # Documents
//!
//! - **Payables**: invoices, credit memos and prepay orders
//! - **Payments**: native payments, plus credit memos and purchase invoices
//!   acting as payments through a [`PaymentCapability`]
//!
//! Every document carries signed amounts and a running remaining balance.
//! Sales invoices and inbound payments are positive; vendor invoices and
//! outbound payments are negative.
//!
//! # Passes
//!
//! A build runs, in order: the vendor single-document guard, credit memos
//! against invoices, purchase invoices against sales invoices, payments
//! against payables, inbound against outbound payments, and finally the
//! leftover discount and write-off amounts. Each pass produces
//! [`AllocationLineCandidate`]s.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_allocation::{PaymentAllocationBuilder, RemainingOpenAmountPolicy};
//!
//! let mut builder = PaymentAllocationBuilder::new()
//!     .date_trx(today)
//!     .date_acct(today)
//!     .payables(vec![invoice])
//!     .payments(vec![payment])
//!     .remaining_open_amount_policy(RemainingOpenAmountPolicy::WriteOff)
//!     .transaction_manager(&mut tx);
//!
//! let result = builder.build()?;
//! for candidate in result.candidates() {
//!     println!("{}", candidate);
//! }
//! ```

pub mod amounts;
pub mod builder;
pub mod candidate;
pub mod capability;
pub mod config;
pub mod document;
pub mod error;
pub mod payable;
pub mod payment;
pub mod ports;
pub mod result;

pub use amounts::AllocationAmounts;
pub use builder::PaymentAllocationBuilder;
pub use candidate::{AllocationLineCandidate, AllocationLineCandidateBuilder, CandidateType};
pub use capability::{AllocationDocuments, PaymentCapability, PaymentView};
pub use config::{AllocationSettings, RemainingOpenAmountPolicy};
pub use document::{
    DocumentRef, InvoiceDocBaseType, PayableDocumentType, PaymentDirection, PaymentDocumentType, SoTrx,
};
pub use error::AllocationError;
pub use payable::{PayableDocument, PayableDocumentBuilder};
pub use payment::{PaymentDocument, PaymentDocumentBuilder};
pub use ports::{
    AllocationHeaderDraft, AllocationLineDraft, AllocationStore, CompletedAllocation, TransactionManager,
};
pub use result::{FullyAllocatedCheck, NotFullyAllocated, PaymentAllocationResult};

#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{InMemoryAllocationStore, InMemoryTransactionManager, StoredAllocation};
