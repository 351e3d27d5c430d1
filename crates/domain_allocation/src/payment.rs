//! Payment documents
//!
//! A native payment with a signed running balance. Inbound payments carry
//! positive amounts, outbound payments negative ones.

use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, OrgId, PartyId, PaymentId};

use crate::document::{DocumentRef, PaymentDirection};
use crate::error::AllocationError;
use crate::payable::PayableDocument;

/// A payment that can settle payables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDocument {
    org_id: OrgId,
    bpartner_id: Option<PartyId>,
    document_no: String,
    direction: PaymentDirection,
    payment_id: PaymentId,
    open_amt: Money,
    initial: Money,
    remaining: Money,
    allocated: Money,
}

impl PaymentDocument {
    /// Starts building a payment document
    pub fn builder() -> PaymentDocumentBuilder {
        PaymentDocumentBuilder::new()
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

    pub fn payment_direction(&self) -> PaymentDirection {
        self.direction
    }

    pub fn payment_id(&self) -> PaymentId {
        self.payment_id
    }

    pub fn reference(&self) -> DocumentRef {
        DocumentRef::Payment(self.payment_id)
    }

    pub fn currency(&self) -> Currency {
        self.initial.currency()
    }

    pub fn open_amt(&self) -> Money {
        self.open_amt
    }

    /// Signed amount the payment started with
    pub fn amount_to_allocate_initial(&self) -> Money {
        self.initial
    }

    /// Signed amount still available
    pub fn amount_to_allocate(&self) -> Money {
        self.remaining
    }

    pub fn allocated_amt(&self) -> Money {
        self.allocated
    }

    /// Records an allocation against this payment
    pub fn add_allocated_amt(&mut self, amount: Money) {
        self.allocated = self.allocated + amount;
        self.remaining = self.remaining - amount;
    }

    pub fn is_fully_allocated(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Over/under amount this payment would show after allocating `amount`
    pub fn compute_projected_over_under_amt(&self, amount: Money) -> Money {
        self.open_amt - self.allocated - amount
    }

    /// A payment can settle any payable in its own currency
    pub fn can_pay(&self, payable: &PayableDocument) -> bool {
        payable.currency() == self.currency()
    }
}

/// Builder for payment documents
///
/// Amounts are given unsigned and signed by the payment direction.
#[derive(Debug, Clone)]
pub struct PaymentDocumentBuilder {
    org_id: Option<OrgId>,
    bpartner_id: Option<PartyId>,
    document_no: String,
    direction: Option<PaymentDirection>,
    payment_id: Option<PaymentId>,
    open_amt: Option<Money>,
    amount: Option<Money>,
}

impl PaymentDocumentBuilder {
    pub fn new() -> Self {
        Self {
            org_id: None,
            bpartner_id: None,
            document_no: String::new(),
            direction: None,
            payment_id: None,
            open_amt: None,
            amount: None,
        }
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

    pub fn direction(mut self, direction: PaymentDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn payment_id(mut self, payment_id: PaymentId) -> Self {
        self.payment_id = Some(payment_id);
        self
    }

    /// Unsigned open amount; defaults to the amount to allocate
    pub fn open_amt(mut self, open_amt: Money) -> Self {
        self.open_amt = Some(open_amt);
        self
    }

    /// Unsigned amount to allocate
    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Builds the payment document
    ///
    /// # Errors
    ///
    /// Returns `InvalidDocument` when a required field is missing, an amount
    /// is negative, or the open amount is in another currency.
    pub fn build(self) -> Result<PaymentDocument, AllocationError> {
        let org_id = self.org_id.ok_or_else(|| missing_field("org_id"))?;
        let direction = self.direction.ok_or_else(|| missing_field("direction"))?;
        let payment_id = self.payment_id.ok_or_else(|| missing_field("payment_id"))?;
        let amount = self.amount.ok_or_else(|| missing_field("amount"))?;
        let open_amt = self.open_amt.unwrap_or(amount);

        if amount.is_negative() || open_amt.is_negative() {
            return Err(AllocationError::invalid_document(format!(
                "payment {} amounts must be given unsigned",
                payment_id
            )));
        }
        if !open_amt.is_same_currency(&amount) {
            return Err(AllocationError::invalid_document(format!(
                "open amount of payment {} is in {} but amount is in {}",
                payment_id,
                open_amt.currency(),
                amount.currency()
            )));
        }

        let sign = |money: Money| match direction {
            PaymentDirection::Inbound => money,
            PaymentDirection::Outbound => -money,
        };
        let initial = sign(amount);

        Ok(PaymentDocument {
            org_id,
            bpartner_id: self.bpartner_id,
            document_no: self.document_no,
            direction,
            payment_id,
            open_amt: sign(open_amt),
            initial,
            remaining: initial,
            allocated: Money::zero(initial.currency()),
        })
    }
}

impl Default for PaymentDocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn missing_field(field: &str) -> AllocationError {
    AllocationError::invalid_document(format!("missing required field: {}", field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payment(direction: PaymentDirection, amount: rust_decimal::Decimal) -> PaymentDocument {
        PaymentDocument::builder()
            .org_id(OrgId::new())
            .direction(direction)
            .payment_id(PaymentId::new())
            .amount(Money::new(amount, Currency::USD))
            .build()
            .unwrap()
    }

    #[test]
    fn test_inbound_amount_is_positive() {
        let p = payment(PaymentDirection::Inbound, dec!(60));
        assert_eq!(p.amount_to_allocate().amount(), dec!(60));
        assert_eq!(p.open_amt().amount(), dec!(60));
    }

    #[test]
    fn test_outbound_amount_is_negative() {
        let p = payment(PaymentDirection::Outbound, dec!(60));
        assert_eq!(p.amount_to_allocate_initial().amount(), dec!(-60));
        assert_eq!(p.open_amt().amount(), dec!(-60));
    }

    #[test]
    fn test_add_allocated_amt() {
        let mut p = payment(PaymentDirection::Inbound, dec!(60));
        assert_eq!(
            p.compute_projected_over_under_amt(Money::new(dec!(25), Currency::USD)).amount(),
            dec!(35)
        );

        p.add_allocated_amt(Money::new(dec!(60), Currency::USD));
        assert!(p.is_fully_allocated());
        assert_eq!(p.allocated_amt().amount(), dec!(60));
        assert_eq!(p.amount_to_allocate_initial().amount(), dec!(60));
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let result = PaymentDocument::builder()
            .org_id(OrgId::new())
            .direction(PaymentDirection::Inbound)
            .payment_id(PaymentId::new())
            .amount(Money::new(dec!(-5), Currency::USD))
            .build();

        assert!(matches!(result, Err(AllocationError::InvalidDocument(_))));
    }

    #[test]
    fn test_missing_direction_is_rejected() {
        let result = PaymentDocument::builder()
            .org_id(OrgId::new())
            .payment_id(PaymentId::new())
            .amount(Money::new(dec!(5), Currency::USD))
            .build();

        assert!(matches!(result, Err(AllocationError::InvalidDocument(msg)) if msg.contains("direction")));
    }
}
