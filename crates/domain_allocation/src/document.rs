//! Document kinds and references
//!
//! Shared vocabulary for the documents that take part in an allocation:
//! which table a document lives in, whether it is a sales or purchase
//! transaction, and which way its money flows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{InvoiceId, OrderId, PaymentId};
use crate::error::AllocationError;

/// Table and record identity of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "table", content = "id", rename_all = "snake_case")]
pub enum DocumentRef {
    /// An invoice or credit memo
    Invoice(InvoiceId),
    /// A payment
    Payment(PaymentId),
    /// An order (prepay orders are payable documents)
    Order(OrderId),
}

impl DocumentRef {
    /// Returns the table name the record lives in
    pub fn table_name(&self) -> &'static str {
        match self {
            DocumentRef::Invoice(_) => "C_Invoice",
            DocumentRef::Payment(_) => "C_Payment",
            DocumentRef::Order(_) => "C_Order",
        }
    }

    /// Returns the invoice id if this references an invoice
    pub fn invoice_id(&self) -> Option<InvoiceId> {
        match self {
            DocumentRef::Invoice(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the payment id if this references a payment
    pub fn payment_id(&self) -> Option<PaymentId> {
        match self {
            DocumentRef::Payment(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRef::Invoice(id) => write!(f, "{}", id),
            DocumentRef::Payment(id) => write!(f, "{}", id),
            DocumentRef::Order(id) => write!(f, "{}", id),
        }
    }
}

/// Sales or purchase side of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoTrx {
    /// Customer side
    Sales,
    /// Vendor side
    Purchase,
}

impl SoTrx {
    pub fn is_sales(&self) -> bool {
        matches!(self, SoTrx::Sales)
    }

    pub fn is_purchase(&self) -> bool {
        matches!(self, SoTrx::Purchase)
    }
}

/// Direction of money flow for a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentDirection {
    /// Money received
    Inbound,
    /// Money paid out
    Outbound,
}

impl PaymentDirection {
    /// Sales documents are settled by inbound money, purchase documents by outbound money
    pub fn of_so_trx(so_trx: SoTrx) -> Self {
        match so_trx {
            SoTrx::Sales => PaymentDirection::Inbound,
            SoTrx::Purchase => PaymentDirection::Outbound,
        }
    }

    pub fn is_inbound(&self) -> bool {
        matches!(self, PaymentDirection::Inbound)
    }

    pub fn is_outbound(&self) -> bool {
        matches!(self, PaymentDirection::Outbound)
    }
}

/// Kind of payable document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayableDocumentType {
    /// Invoice or credit memo
    Invoice,
    /// Order that has to be paid before delivery
    PrepayOrder,
}

/// Kind of document acting as a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentDocumentType {
    /// A real payment
    DirectPayment,
    /// A credit memo used to pay an invoice
    CreditMemo,
    /// A purchase invoice used to compensate a sales invoice
    PurchaseInvoice,
}

/// Base type of an invoice document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceDocBaseType {
    VendorInvoice,
    VendorCreditMemo,
    CustomerInvoice,
    CustomerCreditMemo,
}

impl InvoiceDocBaseType {
    /// Returns the document base type code
    pub fn code(&self) -> &'static str {
        match self {
            InvoiceDocBaseType::VendorInvoice => "API",
            InvoiceDocBaseType::VendorCreditMemo => "APC",
            InvoiceDocBaseType::CustomerInvoice => "ARI",
            InvoiceDocBaseType::CustomerCreditMemo => "ARC",
        }
    }

    pub fn so_trx(&self) -> SoTrx {
        match self {
            InvoiceDocBaseType::VendorInvoice | InvoiceDocBaseType::VendorCreditMemo => SoTrx::Purchase,
            InvoiceDocBaseType::CustomerInvoice | InvoiceDocBaseType::CustomerCreditMemo => SoTrx::Sales,
        }
    }

    pub fn is_credit_memo(&self) -> bool {
        matches!(
            self,
            InvoiceDocBaseType::VendorCreditMemo | InvoiceDocBaseType::CustomerCreditMemo
        )
    }

    pub fn of_so_trx_and_credit_memo(so_trx: SoTrx, credit_memo: bool) -> Self {
        match (so_trx, credit_memo) {
            (SoTrx::Sales, false) => InvoiceDocBaseType::CustomerInvoice,
            (SoTrx::Sales, true) => InvoiceDocBaseType::CustomerCreditMemo,
            (SoTrx::Purchase, false) => InvoiceDocBaseType::VendorInvoice,
            (SoTrx::Purchase, true) => InvoiceDocBaseType::VendorCreditMemo,
        }
    }
}

impl FromStr for InvoiceDocBaseType {
    type Err = AllocationError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "API" => Ok(InvoiceDocBaseType::VendorInvoice),
            "APC" => Ok(InvoiceDocBaseType::VendorCreditMemo),
            "ARI" => Ok(InvoiceDocBaseType::CustomerInvoice),
            "ARC" => Ok(InvoiceDocBaseType::CustomerCreditMemo),
            other => Err(AllocationError::invalid_document(format!(
                "unknown invoice base type code: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for InvoiceDocBaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
