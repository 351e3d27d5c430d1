//! Property-based tests for the payment allocation engine

use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_allocation::{
    PayableDocument, PaymentAllocationBuilder, PaymentAllocationResult, PaymentDocument,
    RemainingOpenAmountPolicy,
};
use test_utils::{
    applied_pay_amt, assert_candidate_invariants, assert_payable_balanced, assert_payment_balanced,
    currency_strategy, document_amount_strategy, inbound_payment_strategy, payable_strategy,
    payment_strategy, remaining_open_amount_policy_strategy, sales_invoice_strategy, DateFixtures,
    TestPayableBuilder, TestPaymentBuilder,
};

struct Run {
    result: PaymentAllocationResult,
    payables: Vec<PayableDocument>,
    payments: Vec<PaymentDocument>,
}

fn dry_run(
    payables: Vec<PayableDocument>,
    payments: Vec<PaymentDocument>,
    policy: RemainingOpenAmountPolicy,
    compensation: bool,
    allow_partial: bool,
) -> Run {
    let mut builder = PaymentAllocationBuilder::new()
        .date_trx(DateFixtures::date_trx())
        .date_acct(DateFixtures::date_acct())
        .payables(payables)
        .payments(payments)
        .allow_only_one_vendor_doc(false)
        .allow_partial_allocations(allow_partial)
        .allow_purchase_sales_invoice_compensation(compensation)
        .remaining_open_amount_policy(policy)
        .dry_run(true);

    let result = builder.build().unwrap();

    Run {
        result,
        payables: builder.payable_documents().to_vec(),
        payments: builder.payment_documents().to_vec(),
    }
}

fn multi_currency_documents_strategy() -> impl Strategy<Value = (Vec<PayableDocument>, Vec<PaymentDocument>)> {
    let invoice = (currency_strategy(), document_amount_strategy())
        .prop_map(|(currency, amount)| TestPayableBuilder::sales_invoice(amount).with_currency(currency).build());
    let payment = (currency_strategy(), any::<bool>(), document_amount_strategy()).prop_map(
        |(currency, inbound, amount)| {
            let builder = if inbound {
                TestPaymentBuilder::inbound(amount)
            } else {
                TestPaymentBuilder::outbound(amount)
            };
            builder.with_currency(currency).build()
        },
    );

    (
        prop::collection::vec(invoice, 0..4),
        prop::collection::vec(payment, 1..5),
    )
}

fn documents_strategy() -> impl Strategy<Value = (Vec<PayableDocument>, Vec<PaymentDocument>)> {
    (
        prop::collection::vec(payable_strategy(), 0..6),
        prop::collection::vec(payment_strategy(), 0..6),
    )
        .prop_filter("at least one document", |(payables, payments)| {
            !payables.is_empty() || !payments.is_empty()
        })
}

proptest! {
    #[test]
    fn prop_candidates_are_well_formed(
        (payables, payments) in documents_strategy(),
        policy in remaining_open_amount_policy_strategy(),
        compensation in any::<bool>(),
    ) {
        let run = dry_run(payables, payments, policy, compensation, true);

        assert_candidate_invariants(run.result.candidates());
    }

    #[test]
    fn prop_document_balances_hold(
        (payables, payments) in documents_strategy(),
        policy in remaining_open_amount_policy_strategy(),
    ) {
        let run = dry_run(payables, payments, policy, false, true);

        for payable in &run.payables {
            assert_payable_balanced(payable);
        }
        for payment in &run.payments {
            assert_payment_balanced(payment);
        }
    }

    #[test]
    fn prop_never_pays_more_than_initial(
        (payables, payments) in documents_strategy(),
        policy in remaining_open_amount_policy_strategy(),
    ) {
        let run = dry_run(payables, payments, policy, false, true);

        for payable in &run.payables {
            let initial = payable.amounts_to_allocate_initial().pay_amt().amount();
            let applied = applied_pay_amt(run.result.candidates(), payable.reference());

            prop_assert!(applied.abs() <= initial.abs(), "{} applied on {} of {}", applied, payable.reference(), initial);
            prop_assert!(applied.is_zero() || applied.is_sign_negative() == initial.is_sign_negative());
        }
        for payment in &run.payments {
            let initial = payment.amount_to_allocate_initial().amount();
            let allocated = payment.allocated_amt().amount();

            prop_assert!(allocated.abs() <= initial.abs());
            prop_assert!(allocated.is_zero() || allocated.is_sign_negative() == initial.is_sign_negative());
        }
    }

    #[test]
    fn prop_customer_receipts_settle_greedily(
        invoices in prop::collection::vec(sales_invoice_strategy(), 1..6),
        receipts in prop::collection::vec(inbound_payment_strategy(), 1..6),
    ) {
        let invoiced: Decimal = invoices.iter().map(|i| i.amounts_to_allocate().pay_amt().amount()).sum();
        let received: Decimal = receipts.iter().map(|p| p.amount_to_allocate().amount()).sum();

        let run = dry_run(invoices, receipts, RemainingOpenAmountPolicy::LeaveOpen, false, true);

        let paid: Decimal = run.result.candidates().iter().map(|c| c.pay_amt().amount()).sum();
        prop_assert_eq!(paid, invoiced.min(received));
    }

    #[test]
    fn prop_dry_run_never_persists(
        (payables, payments) in documents_strategy(),
        policy in remaining_open_amount_policy_strategy(),
    ) {
        let run = dry_run(payables, payments, policy, false, false);

        prop_assert!(run.result.allocation_ids().is_empty());
    }

    #[test]
    fn prop_check_matches_document_state(
        (payables, payments) in documents_strategy(),
        policy in remaining_open_amount_policy_strategy(),
    ) {
        let run = dry_run(payables, payments, policy, false, false);

        let all_settled = run.payables.iter().all(PayableDocument::is_fully_allocated)
            && run.payments.iter().all(PaymentDocument::is_fully_allocated);
        prop_assert_eq!(run.result.is_fully_allocated(), all_settled);
    }

    #[test]
    fn prop_matches_stay_within_one_currency(
        (payables, payments) in multi_currency_documents_strategy(),
    ) {
        let run = dry_run(payables, payments, RemainingOpenAmountPolicy::LeaveOpen, false, true);

        for candidate in run.result.candidates() {
            let currencies = run
                .payables
                .iter()
                .map(|p| (p.reference(), p.currency()))
                .chain(run.payments.iter().map(|p| (p.reference(), p.currency())));
            for (reference, currency) in currencies {
                if reference == candidate.payable_ref() || Some(reference) == candidate.payment_ref() {
                    prop_assert_eq!(currency, candidate.currency());
                }
            }
        }
    }

    #[test]
    fn prop_allocation_is_deterministic(
        (payables, payments) in documents_strategy(),
        policy in remaining_open_amount_policy_strategy(),
        compensation in any::<bool>(),
    ) {
        let first = dry_run(payables.clone(), payments.clone(), policy, compensation, true);
        let second = dry_run(payables, payments, policy, compensation, true);

        prop_assert_eq!(first.result.candidates(), second.result.candidates());
        prop_assert_eq!(first.payables, second.payables);
    }
}
