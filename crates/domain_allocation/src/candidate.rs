//! Allocation line candidates
//!
//! A candidate describes one pairing the engine decided on. Candidates are
//! immutable and validated on construction; persistence turns each one into
//! an allocation header with one or two lines.

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Currency, Money, OrgId, PartyId};

use crate::amounts::AllocationAmounts;
use crate::document::DocumentRef;
use crate::error::AllocationError;

/// Which pass produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateType {
    InvoiceToPayment,
    SalesInvoiceToPurchaseInvoice,
    InvoiceToCreditMemo,
    InvoiceDiscountOrWriteOff,
    InboundPaymentToOutboundPayment,
}

impl fmt::Display for CandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CandidateType::InvoiceToPayment => "InvoiceToPayment",
            CandidateType::SalesInvoiceToPurchaseInvoice => "SalesInvoiceToPurchaseInvoice",
            CandidateType::InvoiceToCreditMemo => "InvoiceToCreditMemo",
            CandidateType::InvoiceDiscountOrWriteOff => "InvoiceDiscountOrWriteOff",
            CandidateType::InboundPaymentToOutboundPayment => "InboundPaymentToOutboundPayment",
        };
        write!(f, "{}", name)
    }
}

/// One proposed allocation between a payable and (optionally) a payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationLineCandidate {
    candidate_type: CandidateType,
    org_id: OrgId,
    bpartner_id: Option<PartyId>,
    payable_ref: DocumentRef,
    payment_ref: Option<DocumentRef>,
    amounts: AllocationAmounts,
    payable_over_under_amt: Money,
    payment_over_under_amt: Money,
}

impl AllocationLineCandidate {
    pub fn builder(candidate_type: CandidateType) -> AllocationLineCandidateBuilder {
        AllocationLineCandidateBuilder::new(candidate_type)
    }

    pub fn candidate_type(&self) -> CandidateType {
        self.candidate_type
    }

    pub fn org_id(&self) -> OrgId {
        self.org_id
    }

    pub fn bpartner_id(&self) -> Option<PartyId> {
        self.bpartner_id
    }

    pub fn payable_ref(&self) -> DocumentRef {
        self.payable_ref
    }

    pub fn payment_ref(&self) -> Option<DocumentRef> {
        self.payment_ref
    }

    pub fn currency(&self) -> Currency {
        self.amounts.currency()
    }

    pub fn amounts(&self) -> AllocationAmounts {
        self.amounts
    }

    pub fn pay_amt(&self) -> Money {
        self.amounts.pay_amt()
    }

    pub fn payable_over_under_amt(&self) -> Money {
        self.payable_over_under_amt
    }

    pub fn payment_over_under_amt(&self) -> Money {
        self.payment_over_under_amt
    }
}

impl fmt::Display for AllocationLineCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.payment_ref {
            Some(payment_ref) => write!(
                f,
                "{} {} <- {} ({})",
                self.candidate_type, self.payable_ref, payment_ref, self.amounts
            ),
            None => write!(f, "{} {} ({})", self.candidate_type, self.payable_ref, self.amounts),
        }
    }
}

/// Builder for allocation line candidates
#[derive(Debug, Clone)]
pub struct AllocationLineCandidateBuilder {
    candidate_type: CandidateType,
    org_id: Option<OrgId>,
    bpartner_id: Option<PartyId>,
    payable_ref: Option<DocumentRef>,
    payment_ref: Option<DocumentRef>,
    amounts: Option<AllocationAmounts>,
    payable_over_under_amt: Option<Money>,
    payment_over_under_amt: Option<Money>,
}

impl AllocationLineCandidateBuilder {
    pub fn new(candidate_type: CandidateType) -> Self {
        Self {
            candidate_type,
            org_id: None,
            bpartner_id: None,
            payable_ref: None,
            payment_ref: None,
            amounts: None,
            payable_over_under_amt: None,
            payment_over_under_amt: None,
        }
    }

    pub fn org_id(mut self, org_id: OrgId) -> Self {
        self.org_id = Some(org_id);
        self
    }

    pub fn bpartner_id(mut self, bpartner_id: Option<PartyId>) -> Self {
        self.bpartner_id = bpartner_id;
        self
    }

    pub fn payable_ref(mut self, payable_ref: DocumentRef) -> Self {
        self.payable_ref = Some(payable_ref);
        self
    }

    pub fn payment_ref(mut self, payment_ref: DocumentRef) -> Self {
        self.payment_ref = Some(payment_ref);
        self
    }

    pub fn amounts(mut self, amounts: AllocationAmounts) -> Self {
        self.amounts = Some(amounts);
        self
    }

    pub fn payable_over_under_amt(mut self, amount: Money) -> Self {
        self.payable_over_under_amt = Some(amount);
        self
    }

    pub fn payment_over_under_amt(mut self, amount: Money) -> Self {
        self.payment_over_under_amt = Some(amount);
        self
    }

    /// Builds the candidate
    ///
    /// # Errors
    ///
    /// - `SameDocumentReference` if payable and payment are the same document
    /// - `MissingPaymentReference` if a non-zero pay amount has no payment
    /// - `OverUnderCurrencyMismatch` if an over/under amount uses another currency
    pub fn build(self) -> Result<AllocationLineCandidate, AllocationError> {
        let org_id = self
            .org_id
            .ok_or_else(|| AllocationError::invalid_document("allocation candidate requires org_id"))?;
        let payable_ref = self
            .payable_ref
            .ok_or_else(|| AllocationError::invalid_document("allocation candidate requires a payable"))?;
        let amounts = self
            .amounts
            .ok_or_else(|| AllocationError::invalid_document("allocation candidate requires amounts"))?;
        let currency = amounts.currency();

        match self.payment_ref {
            Some(payment_ref) if payment_ref == payable_ref => {
                return Err(AllocationError::SameDocumentReference(payable_ref));
            }
            None if !amounts.pay_amt().is_zero() => {
                return Err(AllocationError::MissingPaymentReference { payable: payable_ref });
            }
            _ => {}
        }

        let payable_over_under_amt = self.payable_over_under_amt.unwrap_or(Money::zero(currency));
        let payment_over_under_amt = self.payment_over_under_amt.unwrap_or(Money::zero(currency));
        for over_under in [payable_over_under_amt, payment_over_under_amt] {
            if over_under.currency() != currency {
                return Err(AllocationError::OverUnderCurrencyMismatch {
                    expected: currency,
                    actual: over_under.currency(),
                });
            }
        }

        Ok(AllocationLineCandidate {
            candidate_type: self.candidate_type,
            org_id,
            bpartner_id: self.bpartner_id,
            payable_ref,
            payment_ref: self.payment_ref,
            amounts,
            payable_over_under_amt,
            payment_over_under_amt,
        })
    }
}
