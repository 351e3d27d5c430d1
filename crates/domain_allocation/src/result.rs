//! Allocation result

use core_kernel::AllocationId;

use crate::candidate::AllocationLineCandidate;
use crate::document::DocumentRef;
use crate::error::AllocationError;

/// Documents left with an open amount after a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFullyAllocated {
    Payables(Vec<DocumentRef>),
    Payments(Vec<DocumentRef>),
}

impl From<NotFullyAllocated> for AllocationError {
    fn from(failure: NotFullyAllocated) -> Self {
        match failure {
            NotFullyAllocated::Payables(refs) => AllocationError::PayableDocumentsNotAllocated(refs),
            NotFullyAllocated::Payments(refs) => AllocationError::PaymentDocumentsNotAllocated(refs),
        }
    }
}

/// Outcome of the full-allocation check, kept until someone asks for it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FullyAllocatedCheck {
    #[default]
    Passed,
    Failed(NotFullyAllocated),
}

impl FullyAllocatedCheck {
    pub fn is_passed(&self) -> bool {
        matches!(self, FullyAllocatedCheck::Passed)
    }

    pub fn failure(&self) -> Option<&NotFullyAllocated> {
        match self {
            FullyAllocatedCheck::Passed => None,
            FullyAllocatedCheck::Failed(failure) => Some(failure),
        }
    }

    /// Turns a failed check into an error
    pub fn raise_if_failed(&self) -> Result<(), AllocationError> {
        match self {
            FullyAllocatedCheck::Passed => Ok(()),
            FullyAllocatedCheck::Failed(failure) => Err(failure.clone().into()),
        }
    }
}

/// Everything a build produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentAllocationResult {
    candidates: Vec<AllocationLineCandidate>,
    fully_allocated_check: FullyAllocatedCheck,
    allocation_ids: Vec<AllocationId>,
}

impl PaymentAllocationResult {
    pub fn new(
        candidates: Vec<AllocationLineCandidate>,
        fully_allocated_check: FullyAllocatedCheck,
        allocation_ids: Vec<AllocationId>,
    ) -> Self {
        Self {
            candidates,
            fully_allocated_check,
            allocation_ids,
        }
    }

    pub fn candidates(&self) -> &[AllocationLineCandidate] {
        &self.candidates
    }

    pub fn fully_allocated_check(&self) -> &FullyAllocatedCheck {
        &self.fully_allocated_check
    }

    /// Persisted allocation headers, in candidate order
    pub fn allocation_ids(&self) -> &[AllocationId] {
        &self.allocation_ids
    }

    pub fn is_fully_allocated(&self) -> bool {
        self.fully_allocated_check.is_passed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::InvoiceId;

    #[test]
    fn test_passed_check_does_not_raise() {
        assert!(FullyAllocatedCheck::Passed.raise_if_failed().is_ok());
        assert!(FullyAllocatedCheck::default().is_passed());
    }

    #[test]
    fn test_failed_check_raises_payable_error() {
        let invoice = DocumentRef::Invoice(InvoiceId::new());
        let check = FullyAllocatedCheck::Failed(NotFullyAllocated::Payables(vec![invoice]));

        let err = check.raise_if_failed().unwrap_err();
        assert!(err.is_not_fully_allocated());
        assert!(matches!(err, AllocationError::PayableDocumentsNotAllocated(refs) if refs == vec![invoice]));
        // raising does not consume the check
        assert!(check.failure().is_some());
    }

    #[test]
    fn test_empty_result() {
        let result = PaymentAllocationResult::new(Vec::new(), FullyAllocatedCheck::Passed, Vec::new());
        assert!(result.is_fully_allocated());
        assert!(result.candidates().is_empty());
        assert!(result.allocation_ids().is_empty());
    }
}
