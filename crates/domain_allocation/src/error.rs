//! Allocation domain errors

use thiserror::Error;

use core_kernel::{Currency, MoneyError, PortError};
use crate::document::DocumentRef;

/// Errors that can occur in the allocation domain
#[derive(Debug, Error)]
pub enum AllocationError {
    /// The builder was asked to build a second time
    #[error("Allocation builder was already built")]
    AlreadyBuilt,

    /// A required setting or collaborator is missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A candidate would allocate a document against itself
    #[error("Payable and payment shall not be the same document: {0}")]
    SameDocumentReference(DocumentRef),

    /// A candidate settles an amount without a payment side
    #[error("Payment document is required when the pay amount is not zero (payable {payable})")]
    MissingPaymentReference { payable: DocumentRef },

    /// An over/under amount does not share the candidate currency
    #[error("Over/under amount shall be in {expected} but was in {actual}")]
    OverUnderCurrencyMismatch {
        expected: Currency,
        actual: Currency,
    },

    /// A document could not be constructed from the given data
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Nothing was given to allocate
    #[error("No payable or payment documents to allocate")]
    NoDocuments,

    /// More than one vendor document of a kind takes part in the allocation
    #[error(
        "Allocating more than one vendor document of a kind is not allowed (payments: {}; payables: {})",
        format_refs(.payments),
        format_refs(.payables)
    )]
    MultipleVendorDocuments {
        payments: Vec<DocumentRef>,
        payables: Vec<DocumentRef>,
    },

    /// The payable/payment combination cannot be turned into allocation lines
    #[error("Unsupported document pair for allocation: payable {payable}, payment {}", format_optional_ref(.payment))]
    UnsupportedDocumentPair {
        payable: DocumentRef,
        payment: Option<DocumentRef>,
    },

    /// Payable documents were left with an open pay amount
    #[error("Payable documents not fully allocated: {}", format_refs(.0))]
    PayableDocumentsNotAllocated(Vec<DocumentRef>),

    /// Payment documents were left with an open amount
    #[error("Payment documents not fully allocated: {}", format_refs(.0))]
    PaymentDocumentsNotAllocated(Vec<DocumentRef>),

    /// Money arithmetic failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Persisting the allocations failed
    #[error("Failed to persist allocations: {0}")]
    Persistence(#[from] PortError),
}

impl AllocationError {
    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        AllocationError::Configuration(message.into())
    }

    /// Creates an invalid document error
    pub fn invalid_document(message: impl Into<String>) -> Self {
        AllocationError::InvalidDocument(message.into())
    }

    /// Returns true for the deferred "not fully allocated" failures
    pub fn is_not_fully_allocated(&self) -> bool {
        matches!(
            self,
            AllocationError::PayableDocumentsNotAllocated(_)
                | AllocationError::PaymentDocumentsNotAllocated(_)
        )
    }
}

fn format_refs(refs: &[DocumentRef]) -> String {
    refs.iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_optional_ref(reference: &Option<DocumentRef>) -> String {
    match reference {
        Some(reference) => reference.to_string(),
        None => "<none>".to_string(),
    }
}
