//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating allocation documents
//! that maintain domain invariants.

use core_kernel::Currency;
use domain_allocation::{PayableDocument, PaymentDocument, RemainingOpenAmountPolicy};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::builders::{TestPayableBuilder, TestPaymentBuilder};

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::JPY),
        Just(Currency::CHF),
        Just(Currency::INR),
        Just(Currency::AUD),
        Just(Currency::CAD),
        Just(Currency::SGD),
        Just(Currency::HKD),
    ]
}

/// Strategy for generating positive document amounts with two decimals
pub fn document_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for generating the leftover policy
pub fn remaining_open_amount_policy_strategy() -> impl Strategy<Value = RemainingOpenAmountPolicy> {
    prop_oneof![
        Just(RemainingOpenAmountPolicy::LeaveOpen),
        Just(RemainingOpenAmountPolicy::WriteOff),
        Just(RemainingOpenAmountPolicy::Discount),
    ]
}

/// Kind of payable produced by [`payable_strategy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayableKind {
    SalesInvoice,
    SalesCreditMemo,
    PurchaseInvoice,
    PurchaseCreditMemo,
}

/// Strategy for generating the kind of a payable
pub fn payable_kind_strategy() -> impl Strategy<Value = PayableKind> {
    prop_oneof![
        Just(PayableKind::SalesInvoice),
        Just(PayableKind::SalesCreditMemo),
        Just(PayableKind::PurchaseInvoice),
        Just(PayableKind::PurchaseCreditMemo),
    ]
}

/// Strategy for generating a USD payable of any kind, with an optional write-off
pub fn payable_strategy() -> impl Strategy<Value = PayableDocument> {
    (
        payable_kind_strategy(),
        document_amount_strategy(),
        prop::option::weighted(0.2, document_amount_strategy()),
    )
        .prop_map(|(kind, amount, write_off)| {
            let builder = match kind {
                PayableKind::SalesInvoice => TestPayableBuilder::sales_invoice(amount),
                PayableKind::SalesCreditMemo => TestPayableBuilder::sales_credit_memo(amount),
                PayableKind::PurchaseInvoice => TestPayableBuilder::purchase_invoice(amount),
                PayableKind::PurchaseCreditMemo => TestPayableBuilder::purchase_credit_memo(amount),
            };
            match write_off {
                Some(write_off) => builder.with_write_off(write_off).build(),
                None => builder.build(),
            }
        })
}

/// Strategy for generating a USD sales invoice
pub fn sales_invoice_strategy() -> impl Strategy<Value = PayableDocument> {
    document_amount_strategy().prop_map(|amount| TestPayableBuilder::sales_invoice(amount).build())
}

/// Strategy for generating a USD payment in either direction
pub fn payment_strategy() -> impl Strategy<Value = PaymentDocument> {
    (any::<bool>(), document_amount_strategy()).prop_map(|(inbound, amount)| {
        if inbound {
            TestPaymentBuilder::inbound(amount).build()
        } else {
            TestPaymentBuilder::outbound(amount).build()
        }
    })
}

/// Strategy for generating a USD inbound payment
pub fn inbound_payment_strategy() -> impl Strategy<Value = PaymentDocument> {
    document_amount_strategy().prop_map(|amount| TestPaymentBuilder::inbound(amount).build())
}
