//! Payable documents
//!
//! A payable is anything that represents money owed: an invoice, a credit
//! memo or a prepay order. Each payable carries the amounts it started with
//! and a running remaining balance that the matching passes draw down.
//!
//! Amounts are signed. Sales invoices and vendor credit memos carry positive
//! pay amounts; customer credit memos and vendor invoices carry negative
//! ones, mirroring the sign of the payment that settles them.

use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, OrgId, PartyId};

use crate::amounts::AllocationAmounts;
use crate::document::{DocumentRef, InvoiceDocBaseType, PayableDocumentType, SoTrx};
use crate::error::AllocationError;

/// A document that can be paid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayableDocument {
    doc_type: PayableDocumentType,
    org_id: OrgId,
    bpartner_id: Option<PartyId>,
    document_no: String,
    so_trx: SoTrx,
    credit_memo: bool,
    reference: DocumentRef,
    open_amt: Money,
    initial: AllocationAmounts,
    remaining: AllocationAmounts,
    allocated: AllocationAmounts,
}

impl PayableDocument {
    /// Starts building a payable document
    pub fn builder() -> PayableDocumentBuilder {
        PayableDocumentBuilder::new()
    }

    pub fn doc_type(&self) -> PayableDocumentType {
        self.doc_type
    }

    pub fn org_id(&self) -> OrgId {
        self.org_id
    }

    pub fn bpartner_id(&self) -> Option<PartyId> {
        self.bpartner_id
    }

    pub fn document_no(&self) -> &str {
        &self.document_no
    }

    pub fn so_trx(&self) -> SoTrx {
        self.so_trx
    }

    pub fn is_credit_memo(&self) -> bool {
        self.credit_memo
    }

    /// Invoice base type, for invoices only
    pub fn invoice_base_type(&self) -> Option<InvoiceDocBaseType> {
        match self.doc_type {
            PayableDocumentType::Invoice => Some(InvoiceDocBaseType::of_so_trx_and_credit_memo(
                self.so_trx,
                self.credit_memo,
            )),
            PayableDocumentType::PrepayOrder => None,
        }
    }

    pub fn currency(&self) -> Currency {
        self.initial.currency()
    }

    pub fn reference(&self) -> DocumentRef {
        self.reference
    }

    pub fn open_amt(&self) -> Money {
        self.open_amt
    }

    /// Amounts the document started with
    pub fn amounts_to_allocate_initial(&self) -> AllocationAmounts {
        self.initial
    }

    /// Amounts still left to allocate
    pub fn amounts_to_allocate(&self) -> AllocationAmounts {
        self.remaining
    }

    /// Sum of everything allocated so far
    pub fn allocated_amounts(&self) -> AllocationAmounts {
        self.allocated
    }

    /// Records an allocation against this document
    pub fn add_allocated_amounts(&mut self, amounts: AllocationAmounts) {
        self.allocated = self.allocated + amounts;
        self.remaining = self.remaining - amounts;
    }

    /// True once nothing is left to pay
    ///
    /// Discount and write-off leftovers do not count; they are consumed by
    /// a later pass without a payment.
    pub fn is_fully_allocated(&self) -> bool {
        self.remaining.pay_amt().is_zero()
    }

    /// Over/under amount this document would show after allocating `amounts`
    pub fn compute_projected_over_under_amt(&self, amounts: AllocationAmounts) -> Money {
        self.open_amt - self.allocated.total_amt() - amounts.total_amt()
    }

    /// Moves whatever is left to pay into the discount bucket
    pub fn move_remaining_open_amt_to_discount(&mut self) {
        self.remaining = self.remaining.move_pay_amt_to_discount();
    }

    /// Moves whatever is left to pay into the write-off bucket
    pub fn move_remaining_open_amt_to_write_off(&mut self) {
        self.remaining = self.remaining.move_pay_amt_to_write_off();
    }
}

/// Builder for payable documents
///
/// # Example
///
/// ```rust,ignore
/// let invoice = PayableDocument::builder()
///     .org_id(org_id)
///     .so_trx(SoTrx::Sales)
///     .reference(DocumentRef::Invoice(invoice_id))
///     .amounts(AllocationAmounts::of_pay_amt(Money::new(dec!(100), Currency::USD)))
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct PayableDocumentBuilder {
    doc_type: PayableDocumentType,
    org_id: Option<OrgId>,
    bpartner_id: Option<PartyId>,
    document_no: String,
    so_trx: Option<SoTrx>,
    credit_memo: bool,
    reference: Option<DocumentRef>,
    open_amt: Option<Money>,
    amounts: Option<AllocationAmounts>,
}

impl PayableDocumentBuilder {
    /// Creates a builder for an invoice
    pub fn new() -> Self {
        Self {
            doc_type: PayableDocumentType::Invoice,
            org_id: None,
            bpartner_id: None,
            document_no: String::new(),
            so_trx: None,
            credit_memo: false,
            reference: None,
            open_amt: None,
            amounts: None,
        }
    }

    pub fn doc_type(mut self, doc_type: PayableDocumentType) -> Self {
        self.doc_type = doc_type;
        self
    }

    pub fn org_id(mut self, org_id: OrgId) -> Self {
        self.org_id = Some(org_id);
        self
    }

    pub fn bpartner_id(mut self, bpartner_id: PartyId) -> Self {
        self.bpartner_id = Some(bpartner_id);
        self
    }

    pub fn document_no(mut self, document_no: impl Into<String>) -> Self {
        self.document_no = document_no.into();
        self
    }

    pub fn so_trx(mut self, so_trx: SoTrx) -> Self {
        self.so_trx = Some(so_trx);
        self
    }

    pub fn credit_memo(mut self, credit_memo: bool) -> Self {
        self.credit_memo = credit_memo;
        self
    }

    /// Sets sales side and credit memo flag from an invoice base type
    pub fn invoice_base_type(mut self, base_type: InvoiceDocBaseType) -> Self {
        self.doc_type = PayableDocumentType::Invoice;
        self.so_trx = Some(base_type.so_trx());
        self.credit_memo = base_type.is_credit_memo();
        self
    }

    pub fn reference(mut self, reference: DocumentRef) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Sets the open amount used for over/under projection
    ///
    /// Defaults to the total of the amounts to allocate.
    pub fn open_amt(mut self, open_amt: Money) -> Self {
        self.open_amt = Some(open_amt);
        self
    }

    /// Sets the amounts to allocate
    pub fn amounts(mut self, amounts: AllocationAmounts) -> Self {
        self.amounts = Some(amounts);
        self
    }

    /// Builds the payable document
    ///
    /// # Errors
    ///
    /// Returns `InvalidDocument` when a required field is missing, when the
    /// reference does not match the document type, or when the open amount
    /// is in another currency than the amounts to allocate.
    pub fn build(self) -> Result<PayableDocument, AllocationError> {
        let org_id = self.org_id.ok_or_else(|| missing_field("org_id"))?;
        let so_trx = self.so_trx.ok_or_else(|| missing_field("so_trx"))?;
        let reference = self.reference.ok_or_else(|| missing_field("reference"))?;
        let amounts = self.amounts.ok_or_else(|| missing_field("amounts"))?;

        match (self.doc_type, reference) {
            (PayableDocumentType::Invoice, DocumentRef::Invoice(_)) => {}
            (PayableDocumentType::PrepayOrder, DocumentRef::Order(_)) => {
                if self.credit_memo {
                    return Err(AllocationError::invalid_document(format!(
                        "prepay order {} cannot be a credit memo",
                        reference
                    )));
                }
            }
            (doc_type, reference) => {
                return Err(AllocationError::invalid_document(format!(
                    "{:?} document cannot reference {} record {}",
                    doc_type,
                    reference.table_name(),
                    reference
                )));
            }
        }

        let open_amt = self.open_amt.unwrap_or_else(|| amounts.total_amt());
        if open_amt.currency() != amounts.currency() {
            return Err(AllocationError::invalid_document(format!(
                "open amount of {} is in {} but amounts are in {}",
                reference,
                open_amt.currency(),
                amounts.currency()
            )));
        }

        Ok(PayableDocument {
            doc_type: self.doc_type,
            org_id,
            bpartner_id: self.bpartner_id,
            document_no: self.document_no,
            so_trx,
            credit_memo: self.credit_memo,
            reference,
            open_amt,
            initial: amounts,
            remaining: amounts,
            allocated: AllocationAmounts::zero(amounts.currency()),
        })
    }
}

impl Default for PayableDocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn missing_field(field: &str) -> AllocationError {
    AllocationError::invalid_document(format!("missing required field: {}", field))
}
