//! Unit tests for the Identifiers module
//!
//! Tests cover identifier creation, parsing, conversion,
//! and display formatting.

use core_kernel::{
    InvoiceId, PaymentId, OrderId, PartyId, OrgId,
    AllocationId, AllocationLineId,
};
use uuid::Uuid;

mod invoice_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = InvoiceId::new();
        let id2 = InvoiceId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = InvoiceId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = InvoiceId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = InvoiceId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_from_str_with_prefix() {
        let original = InvoiceId::new();
        let parsed: InvoiceId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_from_str_without_prefix() {
        let uuid = Uuid::new_v4();
        let parsed: InvoiceId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_json_serialization_is_transparent() {
        let id = InvoiceId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
        let deserialized: InvoiceId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}

mod prefixes {
    use super::*;

    #[test]
    fn test_all_prefixes() {
        assert_eq!(InvoiceId::prefix(), "INV");
        assert_eq!(PaymentId::prefix(), "PAY");
        assert_eq!(OrderId::prefix(), "ORD");
        assert_eq!(PartyId::prefix(), "PTY");
        assert_eq!(OrgId::prefix(), "ORG");
        assert_eq!(AllocationId::prefix(), "ALC");
        assert_eq!(AllocationLineId::prefix(), "ALCL");
    }

    #[test]
    fn test_display_starts_with_prefix() {
        assert!(PaymentId::new().to_string().starts_with("PAY-"));
        assert!(AllocationLineId::new().to_string().starts_with("ALCL-"));
    }

    #[test]
    fn test_same_uuid_in_different_types_displays_differently() {
        let uuid = Uuid::new_v4();
        let invoice = InvoiceId::from_uuid(uuid);
        let payment = PaymentId::from_uuid(uuid);
        assert_ne!(invoice.to_string(), payment.to_string());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("PAY-not-a-uuid".parse::<PaymentId>().is_err());
    }
}
