//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for allocation types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_allocation::{
    AllocationLineCandidate, CandidateType, DocumentRef, PayableDocument, PaymentDocument,
};
use rust_decimal::Decimal;

/// Asserts that a Money value has the expected amount
pub fn assert_money_eq(actual: Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        expected,
        "Expected {} {}, got {}",
        actual.currency().symbol(),
        expected,
        actual
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts the construction invariants on every candidate
///
/// # Panics
///
/// Panics if a candidate pays without a payment, references the same
/// document on both sides, or mixes currencies.
pub fn assert_candidate_invariants(candidates: &[AllocationLineCandidate]) {
    for candidate in candidates {
        if !candidate.pay_amt().is_zero() {
            assert!(
                candidate.payment_ref().is_some(),
                "Candidate pays without a payment document: {}",
                candidate
            );
        }
        assert_ne!(
            Some(candidate.payable_ref()),
            candidate.payment_ref(),
            "Candidate references the same document twice: {}",
            candidate
        );
        assert_eq!(candidate.payable_over_under_amt().currency(), candidate.currency());
        assert_eq!(candidate.payment_over_under_amt().currency(), candidate.currency());
    }
}

/// Asserts that a payable's remaining amounts equal initial minus allocated
pub fn assert_payable_balanced(payable: &PayableDocument) {
    let initial = payable.amounts_to_allocate_initial();
    let remaining = payable.amounts_to_allocate();
    let allocated = payable.allocated_amounts();

    assert_eq!(
        remaining.total_amt(),
        initial.total_amt() - allocated.total_amt(),
        "Payable {} is out of balance: initial {}, allocated {}, remaining {}",
        payable.reference(),
        initial,
        allocated,
        remaining
    );
}

/// Asserts that a payment's remaining amount equals initial minus allocated
pub fn assert_payment_balanced(payment: &PaymentDocument) {
    assert_eq!(
        payment.amount_to_allocate(),
        payment.amount_to_allocate_initial() - payment.allocated_amt(),
        "Payment {} is out of balance",
        payment.reference()
    );
}

/// Asserts the remaining pay amount of a payable
pub fn assert_remaining_pay_amt(payable: &PayableDocument, expected: Decimal) {
    assert_eq!(
        payable.amounts_to_allocate().pay_amt().amount(),
        expected,
        "Unexpected remaining pay amount on {}",
        payable.reference()
    );
}

/// Asserts the candidate types in order
pub fn assert_candidate_types(candidates: &[AllocationLineCandidate], expected: &[CandidateType]) {
    let actual: Vec<CandidateType> = candidates.iter().map(|c| c.candidate_type()).collect();
    assert_eq!(actual, expected, "Unexpected candidate types");
}

/// Sums the pay amounts applied to `payable` across all candidates
///
/// Amounts on the payment side of a candidate are counted negated, since
/// credit memos and purchase invoices are drawn down from that side.
pub fn applied_pay_amt(candidates: &[AllocationLineCandidate], payable: DocumentRef) -> Decimal {
    candidates
        .iter()
        .map(|candidate| {
            if candidate.payable_ref() == payable {
                candidate.pay_amt().amount()
            } else if candidate.payment_ref() == Some(payable) {
                -candidate.pay_amt().amount()
            } else {
                Decimal::ZERO
            }
        })
        .sum()
}
