//! Payment capability
//!
//! During a build every document lives exactly once in [`AllocationDocuments`].
//! Anything that can act as a payment is addressed by a [`PaymentCapability`]:
//! a native payment, a credit memo paying an invoice, or a purchase invoice
//! compensating a sales invoice as if it were an inbound payment. The last
//! two are views over a payable, so allocating through them draws down the
//! payable's own balance.

use core_kernel::{Currency, Money, OrgId, PartyId};

use crate::amounts::AllocationAmounts;
use crate::document::{DocumentRef, PayableDocumentType, PaymentDirection, PaymentDocumentType};
use crate::payable::PayableDocument;
use crate::payment::PaymentDocument;

/// Documents taking part in one build
#[derive(Debug, Clone, Default)]
pub struct AllocationDocuments {
    pub payables: Vec<PayableDocument>,
    pub payments: Vec<PaymentDocument>,
}

impl AllocationDocuments {
    pub fn is_empty(&self) -> bool {
        self.payables.is_empty() && self.payments.is_empty()
    }

    /// Read-only view of whatever the capability points at
    pub fn view(&self, capability: PaymentCapability) -> PaymentView<'_> {
        match capability {
            PaymentCapability::Payment(index) => PaymentView::Payment(&self.payments[index]),
            PaymentCapability::CreditMemo(index) => PaymentView::CreditMemo(&self.payables[index]),
            PaymentCapability::PurchaseInvoice(index) => {
                PaymentView::PurchaseInvoice(&self.payables[index])
            }
        }
    }

    /// Records `amount` as allocated through the capability
    ///
    /// Payable-backed capabilities forward the negated amount to the payable.
    pub fn add_allocated_amt(&mut self, capability: PaymentCapability, amount: Money) {
        match capability {
            PaymentCapability::Payment(index) => self.payments[index].add_allocated_amt(amount),
            PaymentCapability::CreditMemo(index) | PaymentCapability::PurchaseInvoice(index) => {
                self.payables[index].add_allocated_amounts(AllocationAmounts::of_pay_amt(-amount))
            }
        }
    }

    /// Capabilities for all native payments, in input order
    pub fn native_payments(&self) -> Vec<PaymentCapability> {
        (0..self.payments.len()).map(PaymentCapability::Payment).collect()
    }
}

/// Index of a document acting as a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentCapability {
    /// Index into the native payments
    Payment(usize),
    /// Index of a credit memo among the payables
    CreditMemo(usize),
    /// Index of a purchase invoice among the payables, received like an inbound payment
    PurchaseInvoice(usize),
}

/// Borrowed view of a document acting as a payment
#[derive(Debug, Clone, Copy)]
pub enum PaymentView<'a> {
    Payment(&'a PaymentDocument),
    CreditMemo(&'a PayableDocument),
    PurchaseInvoice(&'a PayableDocument),
}

impl<'a> PaymentView<'a> {
    pub fn document_type(&self) -> PaymentDocumentType {
        match self {
            PaymentView::Payment(_) => PaymentDocumentType::DirectPayment,
            PaymentView::CreditMemo(_) => PaymentDocumentType::CreditMemo,
            PaymentView::PurchaseInvoice(_) => PaymentDocumentType::PurchaseInvoice,
        }
    }

    pub fn org_id(&self) -> OrgId {
        match self {
            PaymentView::Payment(payment) => payment.org_id(),
            PaymentView::CreditMemo(payable) | PaymentView::PurchaseInvoice(payable) => payable.org_id(),
        }
    }

    pub fn bpartner_id(&self) -> Option<PartyId> {
        match self {
            PaymentView::Payment(payment) => payment.bpartner_id(),
            PaymentView::CreditMemo(payable) | PaymentView::PurchaseInvoice(payable) => {
                payable.bpartner_id()
            }
        }
    }

    pub fn document_no(&self) -> &'a str {
        match self {
            PaymentView::Payment(payment) => payment.document_no(),
            PaymentView::CreditMemo(payable) | PaymentView::PurchaseInvoice(payable) => {
                payable.document_no()
            }
        }
    }

    pub fn reference(&self) -> DocumentRef {
        match self {
            PaymentView::Payment(payment) => payment.reference(),
            PaymentView::CreditMemo(payable) | PaymentView::PurchaseInvoice(payable) => payable.reference(),
        }
    }

    pub fn currency(&self) -> Currency {
        match self {
            PaymentView::Payment(payment) => payment.currency(),
            PaymentView::CreditMemo(payable) | PaymentView::PurchaseInvoice(payable) => payable.currency(),
        }
    }

    pub fn amount_to_allocate_initial(&self) -> Money {
        match self {
            PaymentView::Payment(payment) => payment.amount_to_allocate_initial(),
            PaymentView::CreditMemo(payable) | PaymentView::PurchaseInvoice(payable) => {
                -payable.amounts_to_allocate_initial().pay_amt()
            }
        }
    }

    pub fn amount_to_allocate(&self) -> Money {
        match self {
            PaymentView::Payment(payment) => payment.amount_to_allocate(),
            PaymentView::CreditMemo(payable) | PaymentView::PurchaseInvoice(payable) => {
                -payable.amounts_to_allocate().pay_amt()
            }
        }
    }

    pub fn is_fully_allocated(&self) -> bool {
        match self {
            PaymentView::Payment(payment) => payment.is_fully_allocated(),
            PaymentView::CreditMemo(payable) | PaymentView::PurchaseInvoice(payable) => {
                payable.is_fully_allocated()
            }
        }
    }

    pub fn compute_projected_over_under_amt(&self, amount: Money) -> Money {
        match self {
            PaymentView::Payment(payment) => payment.compute_projected_over_under_amt(amount),
            PaymentView::CreditMemo(payable) | PaymentView::PurchaseInvoice(payable) => {
                payable.compute_projected_over_under_amt(AllocationAmounts::of_pay_amt(-amount))
            }
        }
    }

    /// Whether this document may settle `payable`
    pub fn can_pay(&self, payable: &PayableDocument) -> bool {
        match self {
            PaymentView::Payment(payment) => payment.can_pay(payable),
            PaymentView::CreditMemo(credit_memo) => {
                payable.doc_type() == PayableDocumentType::Invoice
                    && payable.so_trx() == credit_memo.so_trx()
                    && payable.currency() == credit_memo.currency()
            }
            PaymentView::PurchaseInvoice(purchase_invoice) => {
                payable.doc_type() == PayableDocumentType::Invoice
                    && payable.so_trx().is_sales()
                    && payable.currency() == purchase_invoice.currency()
            }
        }
    }

    pub fn payment_direction(&self) -> PaymentDirection {
        match self {
            PaymentView::Payment(payment) => payment.payment_direction(),
            PaymentView::CreditMemo(payable) => PaymentDirection::of_so_trx(payable.so_trx()),
            PaymentView::PurchaseInvoice(_) => PaymentDirection::Inbound,
        }
    }
}
