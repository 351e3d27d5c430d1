//! Test Data Builders
//!
//! Provides builder patterns for constructing allocation documents with
//! sensible defaults. Tests give amounts unsigned and pick the document kind;
//! the builders apply the sign convention of the allocation domain.

use core_kernel::{Money, Currency, OrgId, PartyId, InvoiceId, PaymentId, OrderId};
use domain_allocation::{
    AllocationAmounts, DocumentRef, InvoiceDocBaseType, PayableDocument, PayableDocumentType,
    PaymentDirection, PaymentDocument, SoTrx,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{IdFixtures, StringFixtures};

/// Builder for constructing test payables
pub struct TestPayableBuilder {
    base_type: InvoiceDocBaseType,
    prepay_order: Option<OrderId>,
    invoice_id: InvoiceId,
    org_id: OrgId,
    bpartner_id: PartyId,
    document_no: String,
    currency: Currency,
    pay_amt: Decimal,
    discount_amt: Decimal,
    write_off_amt: Decimal,
    open_amt: Option<Decimal>,
}

impl TestPayableBuilder {
    fn new(base_type: InvoiceDocBaseType, pay_amt: Decimal) -> Self {
        Self {
            base_type,
            prepay_order: None,
            invoice_id: IdFixtures::invoice_id(),
            org_id: IdFixtures::org_id(),
            bpartner_id: IdFixtures::bpartner_id(),
            document_no: StringFixtures::invoice_no().to_string(),
            currency: Currency::USD,
            pay_amt,
            discount_amt: dec!(0),
            write_off_amt: dec!(0),
            open_amt: None,
        }
    }

    /// Customer invoice; positive amounts
    pub fn sales_invoice(amount: Decimal) -> Self {
        Self::new(InvoiceDocBaseType::CustomerInvoice, amount)
    }

    /// Customer credit memo; negative amounts
    pub fn sales_credit_memo(amount: Decimal) -> Self {
        Self::new(InvoiceDocBaseType::CustomerCreditMemo, amount)
    }

    /// Vendor invoice; negative amounts
    pub fn purchase_invoice(amount: Decimal) -> Self {
        Self::new(InvoiceDocBaseType::VendorInvoice, amount)
    }

    /// Vendor credit memo; positive amounts
    pub fn purchase_credit_memo(amount: Decimal) -> Self {
        Self::new(InvoiceDocBaseType::VendorCreditMemo, amount)
    }

    /// Sales prepay order
    pub fn prepay_order(amount: Decimal) -> Self {
        let mut builder = Self::new(InvoiceDocBaseType::CustomerInvoice, amount);
        builder.prepay_order = Some(IdFixtures::order_id());
        builder
    }

    /// Sets the organization
    pub fn with_org_id(mut self, id: OrgId) -> Self {
        self.org_id = id;
        self
    }

    /// Sets the business partner
    pub fn with_bpartner_id(mut self, id: PartyId) -> Self {
        self.bpartner_id = id;
        self
    }

    /// Sets the currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Sets an unsigned discount amount
    pub fn with_discount(mut self, amount: Decimal) -> Self {
        self.discount_amt = amount;
        self
    }

    /// Sets an unsigned write-off amount
    pub fn with_write_off(mut self, amount: Decimal) -> Self {
        self.write_off_amt = amount;
        self
    }

    /// Sets an unsigned open amount
    pub fn with_open_amt(mut self, amount: Decimal) -> Self {
        self.open_amt = Some(amount);
        self
    }

    fn signed(&self, amount: Decimal) -> Money {
        let negative = match self.base_type.so_trx() {
            SoTrx::Sales => self.base_type.is_credit_memo(),
            SoTrx::Purchase => !self.base_type.is_credit_memo(),
        };
        Money::new(if negative { -amount } else { amount }, self.currency)
    }

    /// Builds the payable document
    pub fn build(self) -> PayableDocument {
        let amounts = AllocationAmounts::new(
            self.signed(self.pay_amt),
            self.signed(self.discount_amt),
            self.signed(self.write_off_amt),
        )
        .expect("amounts share the builder currency");

        let builder = PayableDocument::builder()
            .org_id(self.org_id)
            .bpartner_id(self.bpartner_id)
            .document_no(self.document_no.clone())
            .invoice_base_type(self.base_type)
            .amounts(amounts);

        let builder = match self.prepay_order {
            Some(order_id) => builder
                .doc_type(PayableDocumentType::PrepayOrder)
                .reference(DocumentRef::Order(order_id)),
            None => builder.reference(DocumentRef::Invoice(self.invoice_id)),
        };

        let builder = match self.open_amt {
            Some(open_amt) => builder.open_amt(self.signed(open_amt)),
            None => builder,
        };

        builder.build().expect("test payable should be valid")
    }
}

/// Builder for constructing test payments
pub struct TestPaymentBuilder {
    direction: PaymentDirection,
    payment_id: PaymentId,
    org_id: OrgId,
    bpartner_id: PartyId,
    document_no: String,
    currency: Currency,
    amount: Decimal,
    open_amt: Option<Decimal>,
}

impl TestPaymentBuilder {
    fn new(direction: PaymentDirection, amount: Decimal) -> Self {
        Self {
            direction,
            payment_id: IdFixtures::payment_id(),
            org_id: IdFixtures::org_id(),
            bpartner_id: IdFixtures::bpartner_id(),
            document_no: StringFixtures::payment_no().to_string(),
            currency: Currency::USD,
            amount,
            open_amt: None,
        }
    }

    /// Money received from a customer
    pub fn inbound(amount: Decimal) -> Self {
        Self::new(PaymentDirection::Inbound, amount)
    }

    /// Money paid to a vendor
    pub fn outbound(amount: Decimal) -> Self {
        Self::new(PaymentDirection::Outbound, amount)
    }

    /// Sets the organization
    pub fn with_org_id(mut self, id: OrgId) -> Self {
        self.org_id = id;
        self
    }

    /// Sets the business partner
    pub fn with_bpartner_id(mut self, id: PartyId) -> Self {
        self.bpartner_id = id;
        self
    }

    /// Sets the currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Sets an unsigned open amount
    pub fn with_open_amt(mut self, amount: Decimal) -> Self {
        self.open_amt = Some(amount);
        self
    }

    /// Builds the payment document
    pub fn build(self) -> PaymentDocument {
        let builder = PaymentDocument::builder()
            .org_id(self.org_id)
            .bpartner_id(self.bpartner_id)
            .document_no(self.document_no)
            .direction(self.direction)
            .payment_id(self.payment_id)
            .amount(Money::new(self.amount, self.currency));

        let builder = match self.open_amt {
            Some(open_amt) => builder.open_amt(Money::new(open_amt, self.currency)),
            None => builder,
        };

        builder.build().expect("test payment should be valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_convention() {
        let pay = |p: PayableDocument| p.amounts_to_allocate().pay_amt().amount();

        assert_eq!(pay(TestPayableBuilder::sales_invoice(dec!(100)).build()), dec!(100));
        assert_eq!(pay(TestPayableBuilder::sales_credit_memo(dec!(30)).build()), dec!(-30));
        assert_eq!(pay(TestPayableBuilder::purchase_invoice(dec!(80)).build()), dec!(-80));
        assert_eq!(pay(TestPayableBuilder::purchase_credit_memo(dec!(5)).build()), dec!(5));
    }

    #[test]
    fn test_prepay_order_references_order() {
        let order = TestPayableBuilder::prepay_order(dec!(50)).build();
        assert_eq!(order.doc_type(), PayableDocumentType::PrepayOrder);
        assert!(matches!(order.reference(), DocumentRef::Order(_)));
    }

    #[test]
    fn test_outbound_payment_is_negative() {
        let payment = TestPaymentBuilder::outbound(dec!(40)).build();
        assert_eq!(payment.amount_to_allocate().amount(), dec!(-40));
    }
}
