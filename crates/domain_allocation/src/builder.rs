//! Payment allocation engine
//!
//! [`PaymentAllocationBuilder`] collects documents and policy flags, then
//! matches payables against payments in a fixed sequence of passes:
//!
//! 1. vendor single-document guard
//! 2. credit memos against invoices
//! 3. purchase invoices against sales invoices (when enabled)
//! 4. payments against payables
//! 5. inbound payments against outbound payments
//! 6. leftover discount and write-off amounts
//!
//! Balances are carried on the documents, so every pass sees what the
//! previous ones consumed. A builder performs exactly one build.

use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use core_kernel::{AllocationId, Money};

use crate::amounts::AllocationAmounts;
use crate::candidate::{AllocationLineCandidate, CandidateType};
use crate::capability::{AllocationDocuments, PaymentCapability, PaymentView};
use crate::config::{AllocationSettings, RemainingOpenAmountPolicy};
use crate::document::DocumentRef;
use crate::error::AllocationError;
use crate::payable::PayableDocument;
use crate::payment::PaymentDocument;
use crate::ports::{AllocationHeaderDraft, AllocationLineDraft, AllocationStore, TransactionManager};
use crate::result::{FullyAllocatedCheck, NotFullyAllocated, PaymentAllocationResult};

/// Matches payable documents against payment documents
///
/// # Example
///
/// ```rust,ignore
/// let mut builder = PaymentAllocationBuilder::new()
///     .date_trx(today)
///     .date_acct(today)
///     .payables(vec![invoice])
///     .payments(vec![payment])
///     .transaction_manager(&mut tx);
///
/// let result = builder.build()?;
/// ```
pub struct PaymentAllocationBuilder<'a> {
    date_trx: Option<NaiveDate>,
    date_acct: Option<NaiveDate>,
    documents: AllocationDocuments,
    settings: AllocationSettings,
    dry_run: bool,
    transaction_manager: Option<&'a mut dyn TransactionManager>,
    built: bool,
}

impl<'a> PaymentAllocationBuilder<'a> {
    /// Creates a builder with default settings and no documents
    pub fn new() -> Self {
        Self {
            date_trx: None,
            date_acct: None,
            documents: AllocationDocuments::default(),
            settings: AllocationSettings::default(),
            dry_run: false,
            transaction_manager: None,
            built: false,
        }
    }

    pub fn date_trx(mut self, date_trx: NaiveDate) -> Self {
        self.date_trx = Some(date_trx);
        self
    }

    pub fn date_acct(mut self, date_acct: NaiveDate) -> Self {
        self.date_acct = Some(date_acct);
        self
    }

    /// Sets the payable documents; order decides matching order
    pub fn payables(mut self, payables: Vec<PayableDocument>) -> Self {
        self.documents.payables = payables;
        self
    }

    /// Sets the payment documents; order decides matching order
    pub fn payments(mut self, payments: Vec<PaymentDocument>) -> Self {
        self.documents.payments = payments;
        self
    }

    /// Applies a whole settings block
    pub fn with_settings(mut self, settings: AllocationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn remaining_open_amount_policy(mut self, policy: RemainingOpenAmountPolicy) -> Self {
        self.settings.remaining_open_amount_policy = policy;
        self
    }

    pub fn allow_partial_allocations(mut self, allow: bool) -> Self {
        self.settings.allow_partial_allocations = allow;
        self
    }

    pub fn allow_only_one_vendor_doc(mut self, allow: bool) -> Self {
        self.settings.allow_only_one_vendor_doc = allow;
        self
    }

    pub fn allow_purchase_sales_invoice_compensation(mut self, allow: bool) -> Self {
        self.settings.allow_purchase_sales_invoice_compensation = allow;
        self
    }

    /// Computes candidates without persisting or raising the full-allocation check
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn transaction_manager(mut self, transaction_manager: &'a mut dyn TransactionManager) -> Self {
        self.transaction_manager = Some(transaction_manager);
        self
    }

    pub fn settings(&self) -> &AllocationSettings {
        &self.settings
    }

    /// Payables, with balances as left by the build
    pub fn payable_documents(&self) -> &[PayableDocument] {
        &self.documents.payables
    }

    /// Payments, with balances as left by the build
    pub fn payment_documents(&self) -> &[PaymentDocument] {
        &self.documents.payments
    }

    /// Runs the allocation
    ///
    /// # Errors
    ///
    /// - `AlreadyBuilt` on a second call
    /// - `NoDocuments`, `MultipleVendorDocuments` before any matching
    /// - `PayableDocumentsNotAllocated` / `PaymentDocumentsNotAllocated` when
    ///   partial allocations are disallowed and this is not a dry run
    /// - `Configuration`, `UnsupportedDocumentPair`, `Persistence` while persisting
    #[instrument(
        skip(self),
        fields(
            payables = self.documents.payables.len(),
            payments = self.documents.payments.len(),
            dry_run = self.dry_run
        )
    )]
    pub fn build(&mut self) -> Result<PaymentAllocationResult, AllocationError> {
        self.mark_as_built()?;

        let candidates = self.create_allocation_line_candidates()?;

        let fully_allocated_check = if self.settings.allow_partial_allocations {
            FullyAllocatedCheck::Passed
        } else {
            self.check_fully_allocated()
        };
        if self.dry_run {
            if let Some(failure) = fully_allocated_check.failure() {
                warn!(?failure, "Dry run left documents not fully allocated");
            }
        } else {
            fully_allocated_check.raise_if_failed()?;
        }

        let allocation_ids = if !candidates.is_empty() && !self.dry_run {
            self.create_and_complete_allocations(&candidates)?
        } else {
            Vec::new()
        };

        info!(
            candidates = candidates.len(),
            allocations = allocation_ids.len(),
            fully_allocated = fully_allocated_check.is_passed(),
            "Payment allocation built"
        );

        Ok(PaymentAllocationResult::new(
            candidates,
            fully_allocated_check,
            allocation_ids,
        ))
    }

    fn mark_as_built(&mut self) -> Result<(), AllocationError> {
        if self.built {
            return Err(AllocationError::AlreadyBuilt);
        }
        self.built = true;
        Ok(())
    }

    fn create_allocation_line_candidates(&mut self) -> Result<Vec<AllocationLineCandidate>, AllocationError> {
        if self.documents.is_empty() {
            return Err(AllocationError::NoDocuments);
        }

        self.assert_only_one_vendor_doc()?;

        let mut candidates = Vec::new();

        candidates.extend(self.allocate_credit_memos_to_invoices()?);

        if self.settings.allow_purchase_sales_invoice_compensation {
            candidates.extend(self.allocate_purchase_invoices_to_sales_invoices()?);
        }

        let payables: Vec<usize> = (0..self.documents.payables.len()).collect();
        let payments = self.documents.native_payments();
        let invoice_to_payment = self.allocate(CandidateType::InvoiceToPayment, &payables, &payments)?;
        debug!(count = invoice_to_payment.len(), "Allocated payments to payables");
        candidates.extend(invoice_to_payment);

        candidates.extend(self.allocate_payments_to_payments()?);

        candidates.extend(self.allocate_discounts_and_write_offs()?);

        Ok(candidates)
    }

    /// Rejects more than one vendor document of a kind
    fn assert_only_one_vendor_doc(&self) -> Result<(), AllocationError> {
        if !self.settings.allow_only_one_vendor_doc {
            return Ok(());
        }

        let outbound_payments: Vec<DocumentRef> = self
            .documents
            .payments
            .iter()
            .filter(|payment| payment.payment_direction().is_outbound())
            .map(PaymentDocument::reference)
            .collect();

        let (vendor_credit_memos, vendor_payables): (Vec<&PayableDocument>, Vec<&PayableDocument>) = self
            .documents
            .payables
            .iter()
            .filter(|payable| payable.so_trx().is_purchase())
            .partition(|payable| payable.is_credit_memo());

        if outbound_payments.len() > 1 || vendor_payables.len() > 1 || vendor_credit_memos.len() > 1 {
            let payments = outbound_payments
                .into_iter()
                .chain(vendor_credit_memos.iter().map(|payable| payable.reference()))
                .collect();
            let payables = vendor_payables.iter().map(|payable| payable.reference()).collect();

            return Err(AllocationError::MultipleVendorDocuments { payments, payables });
        }

        Ok(())
    }

    fn allocate_credit_memos_to_invoices(&mut self) -> Result<Vec<AllocationLineCandidate>, AllocationError> {
        let mut invoices = Vec::new();
        let mut credit_memos = Vec::new();
        for (index, payable) in self.documents.payables.iter().enumerate() {
            if payable.is_credit_memo() {
                credit_memos.push(PaymentCapability::CreditMemo(index));
            } else {
                invoices.push(index);
            }
        }

        let candidates = self.allocate(CandidateType::InvoiceToCreditMemo, &invoices, &credit_memos)?;
        debug!(count = candidates.len(), "Allocated credit memos to invoices");
        Ok(candidates)
    }

    fn allocate_purchase_invoices_to_sales_invoices(
        &mut self,
    ) -> Result<Vec<AllocationLineCandidate>, AllocationError> {
        let mut sales_invoices = Vec::new();
        let mut purchase_invoices = Vec::new();
        for (index, payable) in self.documents.payables.iter().enumerate() {
            if payable.is_credit_memo() {
                continue;
            }
            if payable.so_trx().is_sales() {
                sales_invoices.push(index);
            } else {
                purchase_invoices.push(PaymentCapability::PurchaseInvoice(index));
            }
        }

        let candidates = self.allocate(
            CandidateType::SalesInvoiceToPurchaseInvoice,
            &sales_invoices,
            &purchase_invoices,
        )?;
        debug!(count = candidates.len(), "Allocated purchase invoices to sales invoices");
        Ok(candidates)
    }

    /// Matches each payable against the payments, in input order
    fn allocate(
        &mut self,
        candidate_type: CandidateType,
        payables: &[usize],
        payments: &[PaymentCapability],
    ) -> Result<Vec<AllocationLineCandidate>, AllocationError> {
        if payables.is_empty() || payments.is_empty() {
            return Ok(Vec::new());
        }

        let mut candidates = Vec::new();

        for &payable_index in payables {
            for &payment in payments {
                let payable = &self.documents.payables[payable_index];
                if payable.is_fully_allocated() {
                    break;
                }

                let view = self.documents.view(payment);
                if view.is_fully_allocated() || !is_compatible(payable, &view) {
                    continue;
                }

                let amounts = compute_amounts_to_allocate(payable, &view);
                let candidate = AllocationLineCandidate::builder(candidate_type)
                    .org_id(payable.org_id())
                    .bpartner_id(payable.bpartner_id())
                    .payable_ref(payable.reference())
                    .payment_ref(view.reference())
                    .amounts(amounts)
                    .payable_over_under_amt(payable.compute_projected_over_under_amt(amounts))
                    .payment_over_under_amt(view.compute_projected_over_under_amt(amounts.pay_amt()))
                    .build()?;
                debug!(
                    %candidate,
                    payable_no = payable.document_no(),
                    payment_type = ?view.document_type(),
                    payment_no = view.document_no(),
                    "Allocation candidate"
                );
                candidates.push(candidate);

                self.documents.payables[payable_index].add_allocated_amounts(amounts);
                self.documents.add_allocated_amt(payment, amounts.pay_amt());
            }

            if let Some(candidate) = self.allocate_remaining_open_amt(payable_index)? {
                candidates.push(candidate);
            }
        }

        Ok(candidates)
    }

    /// Applies the leftover policy to a payable that is still open
    fn allocate_remaining_open_amt(
        &mut self,
        payable_index: usize,
    ) -> Result<Option<AllocationLineCandidate>, AllocationError> {
        let payable = &mut self.documents.payables[payable_index];
        if payable.is_fully_allocated() {
            return Ok(None);
        }

        match self.settings.remaining_open_amount_policy {
            RemainingOpenAmountPolicy::LeaveOpen => return Ok(None),
            RemainingOpenAmountPolicy::Discount => payable.move_remaining_open_amt_to_discount(),
            RemainingOpenAmountPolicy::WriteOff => payable.move_remaining_open_amt_to_write_off(),
        }

        let amounts = payable.amounts_to_allocate();
        self.allocate_discount_and_write_off(payable_index, amounts).map(Some)
    }

    /// Reverses inbound payments against outbound payments
    fn allocate_payments_to_payments(&mut self) -> Result<Vec<AllocationLineCandidate>, AllocationError> {
        let mut inbound = Vec::new();
        let mut outbound = Vec::new();
        for (index, payment) in self.documents.payments.iter().enumerate() {
            if payment.is_fully_allocated() {
                continue;
            }
            if payment.amount_to_allocate().is_positive() {
                inbound.push(index);
            } else {
                outbound.push(index);
            }
        }

        if inbound.is_empty() || outbound.is_empty() {
            return Ok(Vec::new());
        }

        let mut candidates = Vec::new();

        for &inbound_index in &inbound {
            for &outbound_index in &outbound {
                let payments = &self.documents.payments;
                let payment_in = &payments[inbound_index];
                let payment_out = &payments[outbound_index];
                if payment_in.is_fully_allocated() {
                    break;
                }
                if payment_out.is_fully_allocated() || payment_out.currency() != payment_in.currency() {
                    continue;
                }

                // both sides negative: the smaller magnitude wins
                let amt = (-payment_in.amount_to_allocate()).max(payment_out.amount_to_allocate());

                let candidate = AllocationLineCandidate::builder(CandidateType::InboundPaymentToOutboundPayment)
                    .org_id(payment_out.org_id())
                    .bpartner_id(payment_out.bpartner_id())
                    .payable_ref(payment_out.reference())
                    .payment_ref(payment_in.reference())
                    .amounts(AllocationAmounts::of_pay_amt(amt))
                    .payable_over_under_amt(payment_out.compute_projected_over_under_amt(amt))
                    .payment_over_under_amt(-payment_in.compute_projected_over_under_amt(-amt))
                    .build()?;
                debug!(%candidate, "Allocation candidate");
                candidates.push(candidate);

                self.documents.payments[outbound_index].add_allocated_amt(amt);
                self.documents.payments[inbound_index].add_allocated_amt(-amt);
            }
        }

        debug!(count = candidates.len(), "Allocated inbound payments to outbound payments");
        Ok(candidates)
    }

    /// Emits the discount and write-off amounts payables still carry
    fn allocate_discounts_and_write_offs(&mut self) -> Result<Vec<AllocationLineCandidate>, AllocationError> {
        let mut candidates = Vec::new();

        for payable_index in 0..self.documents.payables.len() {
            let amounts = self.documents.payables[payable_index]
                .amounts_to_allocate()
                .with_zero_pay_amt();
            if amounts.is_zero() {
                continue;
            }

            candidates.push(self.allocate_discount_and_write_off(payable_index, amounts)?);
        }

        debug!(count = candidates.len(), "Allocated discounts and write-offs");
        Ok(candidates)
    }

    fn allocate_discount_and_write_off(
        &mut self,
        payable_index: usize,
        amounts: AllocationAmounts,
    ) -> Result<AllocationLineCandidate, AllocationError> {
        let payable = &mut self.documents.payables[payable_index];

        let candidate = AllocationLineCandidate::builder(CandidateType::InvoiceDiscountOrWriteOff)
            .org_id(payable.org_id())
            .bpartner_id(payable.bpartner_id())
            .payable_ref(payable.reference())
            .amounts(amounts)
            .payable_over_under_amt(payable.compute_projected_over_under_amt(amounts))
            .build()?;
        debug!(%candidate, "Allocation candidate");

        payable.add_allocated_amounts(amounts);

        Ok(candidate)
    }

    fn check_fully_allocated(&self) -> FullyAllocatedCheck {
        let payables: Vec<DocumentRef> = self
            .documents
            .payables
            .iter()
            .filter(|payable| !payable.is_fully_allocated())
            .map(PayableDocument::reference)
            .collect();
        if !payables.is_empty() {
            return FullyAllocatedCheck::Failed(NotFullyAllocated::Payables(payables));
        }

        let payments: Vec<DocumentRef> = self
            .documents
            .payments
            .iter()
            .filter(|payment| !payment.is_fully_allocated())
            .map(PaymentDocument::reference)
            .collect();
        if !payments.is_empty() {
            return FullyAllocatedCheck::Failed(NotFullyAllocated::Payments(payments));
        }

        FullyAllocatedCheck::Passed
    }

    /// Persists one allocation header per candidate in a single unit of work
    fn create_and_complete_allocations(
        &mut self,
        candidates: &[AllocationLineCandidate],
    ) -> Result<Vec<AllocationId>, AllocationError> {
        let date_trx = self
            .date_trx
            .ok_or_else(|| AllocationError::configuration("transaction date is not set"))?;
        let date_acct = self
            .date_acct
            .ok_or_else(|| AllocationError::configuration("accounting date is not set"))?;

        let headers = candidates
            .iter()
            .map(|candidate| allocation_header(candidate, date_trx, date_acct))
            .collect::<Result<Vec<_>, _>>()?;

        let transaction_manager = self
            .transaction_manager
            .as_deref_mut()
            .ok_or_else(|| AllocationError::configuration("no transaction manager configured"))?;

        let mut allocation_ids = Vec::new();
        transaction_manager.run_atomically(
            &mut |store: &mut dyn AllocationStore| -> Result<(), AllocationError> {
                allocation_ids.clear();
                for header in &headers {
                    let Some(completed) = store.create_and_complete(header)? else {
                        continue;
                    };
                    if let &[first, second] = completed.line_ids.as_slice() {
                        store.set_counter_line(first, second)?;
                        store.set_counter_line(second, first)?;
                    }
                    allocation_ids.push(completed.allocation_id);
                }
                Ok(())
            },
        )?;

        Ok(allocation_ids)
    }
}

impl Default for PaymentAllocationBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// A payment fits a payable when it may pay it and both started on the same side of zero
fn is_compatible(payable: &PayableDocument, payment: &PaymentView<'_>) -> bool {
    if !payment.can_pay(payable) {
        return false;
    }

    let payable_positive = !payable.amounts_to_allocate_initial().pay_amt().is_negative();
    let payment_positive = !payment.amount_to_allocate_initial().is_negative();
    payable_positive == payment_positive
}

/// How much of the payable's remaining amounts a payment can take
fn compute_amounts_to_allocate(payable: &PayableDocument, payment: &PaymentView<'_>) -> AllocationAmounts {
    let remaining = payable.amounts_to_allocate();
    let payable_pay_amt = remaining.pay_amt();
    let payment_amt = payment.amount_to_allocate();

    match (payable_pay_amt.is_negative(), payment_amt.is_negative()) {
        (false, false) => remaining.with_pay_amt(payable_pay_amt.min(payment_amt)),
        (true, true) => remaining.with_pay_amt(payable_pay_amt.max(payment_amt)),
        _ => remaining.with_zero_pay_amt(),
    }
}

/// Describes the allocation header for one candidate
fn allocation_header(
    candidate: &AllocationLineCandidate,
    date_trx: NaiveDate,
    date_acct: NaiveDate,
) -> Result<AllocationHeaderDraft, AllocationError> {
    let currency = candidate.currency();
    let amounts = candidate.amounts();
    let header = AllocationHeaderDraft::new(candidate.org_id(), currency, date_trx, date_acct);

    let payable_line = AllocationLineDraft::new(candidate.org_id(), candidate.bpartner_id(), currency)
        .amount(amounts.pay_amt())
        .discount_amt(amounts.discount_amt())
        .write_off_amt(amounts.write_off_amt())
        .over_under_amt(candidate.payable_over_under_amt());
    let counter_line = |pay_amt: Money| {
        AllocationLineDraft::new(candidate.org_id(), candidate.bpartner_id(), currency)
            .amount(-pay_amt)
            .over_under_amt(candidate.payment_over_under_amt())
    };

    let header = match (candidate.payable_ref(), candidate.payment_ref()) {
        (DocumentRef::Invoice(invoice_id), Some(DocumentRef::Payment(payment_id))) => {
            header.line(payable_line.invoice_id(invoice_id).payment_id(payment_id))
        }
        // credit memo or purchase invoice on the payment side
        (DocumentRef::Invoice(invoice_id), Some(DocumentRef::Invoice(counter_invoice_id))) => header
            .line(payable_line.invoice_id(invoice_id))
            .line(counter_line(amounts.pay_amt()).invoice_id(counter_invoice_id)),
        (DocumentRef::Invoice(invoice_id), None) => header.line(payable_line.invoice_id(invoice_id)),
        (DocumentRef::Payment(outbound_id), Some(DocumentRef::Payment(inbound_id))) => header
            .line(payable_line.payment_id(outbound_id))
            .line(counter_line(amounts.pay_amt()).payment_id(inbound_id)),
        (payable, payment) => {
            return Err(AllocationError::UnsupportedDocumentPair { payable, payment });
        }
    };

    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Currency, InvoiceId, OrderId, OrgId, PaymentId};
    use rust_decimal_macros::dec;

    use crate::document::{PaymentDirection, SoTrx};

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn sales_invoice(amount: rust_decimal::Decimal) -> PayableDocument {
        PayableDocument::builder()
            .org_id(OrgId::new())
            .so_trx(SoTrx::Sales)
            .reference(DocumentRef::Invoice(InvoiceId::new()))
            .amounts(AllocationAmounts::of_pay_amt(usd(amount)))
            .build()
            .unwrap()
    }

    fn inbound(amount: rust_decimal::Decimal) -> PaymentDocument {
        PaymentDocument::builder()
            .org_id(OrgId::new())
            .direction(PaymentDirection::Inbound)
            .payment_id(PaymentId::new())
            .amount(usd(amount))
            .build()
            .unwrap()
    }

    #[test]
    fn test_second_build_is_rejected() {
        let mut builder = PaymentAllocationBuilder::new()
            .payables(vec![sales_invoice(dec!(100))])
            .payments(vec![inbound(dec!(100))])
            .dry_run(true);

        assert!(builder.build().is_ok());
        assert!(matches!(builder.build(), Err(AllocationError::AlreadyBuilt)));
    }

    #[test]
    fn test_no_documents() {
        let mut builder = PaymentAllocationBuilder::new();
        assert!(matches!(builder.build(), Err(AllocationError::NoDocuments)));
    }

    #[test]
    fn test_compute_amounts_mixed_signs_gives_zero_pay() {
        let payable = sales_invoice(dec!(100));
        let outbound = PaymentDocument::builder()
            .org_id(OrgId::new())
            .direction(PaymentDirection::Outbound)
            .payment_id(PaymentId::new())
            .amount(usd(dec!(20)))
            .build()
            .unwrap();

        let amounts = compute_amounts_to_allocate(&payable, &PaymentView::Payment(&outbound));
        assert!(amounts.pay_amt().is_zero());
        assert!(!is_compatible(&payable, &PaymentView::Payment(&outbound)));
    }

    #[test]
    fn test_compute_amounts_both_negative_takes_max() {
        let credit_memo = PayableDocument::builder()
            .org_id(OrgId::new())
            .so_trx(SoTrx::Sales)
            .credit_memo(true)
            .reference(DocumentRef::Invoice(InvoiceId::new()))
            .amounts(AllocationAmounts::of_pay_amt(usd(dec!(-50))))
            .build()
            .unwrap();
        let refund = PaymentDocument::builder()
            .org_id(OrgId::new())
            .direction(PaymentDirection::Outbound)
            .payment_id(PaymentId::new())
            .amount(usd(dec!(20)))
            .build()
            .unwrap();

        let amounts = compute_amounts_to_allocate(&credit_memo, &PaymentView::Payment(&refund));
        assert_eq!(amounts.pay_amt(), usd(dec!(-20)));
    }

    #[test]
    fn test_header_for_prepay_order_is_unsupported() {
        let order = DocumentRef::Order(OrderId::new());
        let candidate = AllocationLineCandidate::builder(CandidateType::InvoiceToPayment)
            .org_id(OrgId::new())
            .payable_ref(order)
            .payment_ref(DocumentRef::Payment(PaymentId::new()))
            .amounts(AllocationAmounts::of_pay_amt(usd(dec!(10))))
            .build()
            .unwrap();

        let result = allocation_header(&candidate, date(), date());
        assert!(matches!(
            result,
            Err(AllocationError::UnsupportedDocumentPair { payable, .. }) if payable == order
        ));
    }

    #[test]
    fn test_header_for_credit_memo_has_counter_line() {
        let invoice = InvoiceId::new();
        let credit_memo = InvoiceId::new();
        let candidate = AllocationLineCandidate::builder(CandidateType::InvoiceToCreditMemo)
            .org_id(OrgId::new())
            .payable_ref(DocumentRef::Invoice(invoice))
            .payment_ref(DocumentRef::Invoice(credit_memo))
            .amounts(AllocationAmounts::of_pay_amt(usd(dec!(30))))
            .payable_over_under_amt(usd(dec!(70)))
            .build()
            .unwrap();

        let header = allocation_header(&candidate, date(), date()).unwrap();
        assert_eq!(header.lines.len(), 2);
        assert_eq!(header.lines[0].invoice_id, Some(invoice));
        assert_eq!(header.lines[0].amount, usd(dec!(30)));
        assert_eq!(header.lines[0].over_under_amt, usd(dec!(70)));
        assert_eq!(header.lines[1].invoice_id, Some(credit_memo));
        assert_eq!(header.lines[1].amount, usd(dec!(-30)));
    }
}
