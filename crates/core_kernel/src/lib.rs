//! Core Kernel - Foundational types shared by the allocation crates
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers for documents, parties and allocations
//! - Port error type and marker trait for adapters

pub mod money;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{
    InvoiceId, PaymentId, OrderId, PartyId, OrgId,
    AllocationId, AllocationLineId,
};
pub use ports::{PortError, DomainPort};
