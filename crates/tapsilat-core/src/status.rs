//! # Order Status
//!
//! The fixed table of order lifecycle codes reported by the API.

use std::fmt;

/// Order lifecycle state. Discriminants are the API's integer codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OrderStatus {
    Received = 1,
    Unpaid = 2,
    Paid = 3,
    Processing = 4,
    Shipped = 5,
    OnHold = 6,
    WaitingForPayment = 7,
    Cancelled = 8,
    Completed = 9,
    Refunded = 10,
    Fraud = 11,
    Rejected = 12,
    Failure = 13,
    Retrying = 14,
    PartiallyRefunded = 15,
    SubMerchantPaymentApproved = 16,
    SubMerchantPaymentDisapproved = 17,
    SubMerchantPaymentErrored = 18,
    UnpaidInstallments = 19,
    UnpaidTerms = 20,
    Expired = 21,
    UnpaidSubMerchantPayments = 22,
    PartiallyPaid = 23,
    Terminated = 24,
}

/// Label returned for codes outside the table.
pub const UNKNOWN_STATUS: &str = "Unknown";

impl OrderStatus {
    /// All statuses, ordered by code.
    pub const ALL: [OrderStatus; 24] = [
        OrderStatus::Received,
        OrderStatus::Unpaid,
        OrderStatus::Paid,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::OnHold,
        OrderStatus::WaitingForPayment,
        OrderStatus::Cancelled,
        OrderStatus::Completed,
        OrderStatus::Refunded,
        OrderStatus::Fraud,
        OrderStatus::Rejected,
        OrderStatus::Failure,
        OrderStatus::Retrying,
        OrderStatus::PartiallyRefunded,
        OrderStatus::SubMerchantPaymentApproved,
        OrderStatus::SubMerchantPaymentDisapproved,
        OrderStatus::SubMerchantPaymentErrored,
        OrderStatus::UnpaidInstallments,
        OrderStatus::UnpaidTerms,
        OrderStatus::Expired,
        OrderStatus::UnpaidSubMerchantPayments,
        OrderStatus::PartiallyPaid,
        OrderStatus::Terminated,
    ];

    /// Look up a status by its integer code.
    pub fn from_code(code: i64) -> Option<Self> {
        if (1..=24).contains(&code) {
            Self::ALL.get((code - 1) as usize).copied()
        } else {
            None
        }
    }

    pub fn code(&self) -> i64 {
        *self as i64
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Received => "Received",
            OrderStatus::Unpaid => "Unpaid",
            OrderStatus::Paid => "Paid",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::OnHold => "On hold",
            OrderStatus::WaitingForPayment => "Waiting for payment",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Completed => "Completed",
            OrderStatus::Refunded => "Refunded",
            OrderStatus::Fraud => "Fraud",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::Failure => "Failure",
            OrderStatus::Retrying => "Retrying",
            OrderStatus::PartiallyRefunded => "Partially refunded",
            OrderStatus::SubMerchantPaymentApproved => "Sub merchant payment approved",
            OrderStatus::SubMerchantPaymentDisapproved => "Sub merchant payment disapproved",
            OrderStatus::SubMerchantPaymentErrored => "Sub merchant payment errored",
            OrderStatus::UnpaidInstallments => "Still has unpaid installments",
            OrderStatus::UnpaidTerms => "Still has unpaid terms",
            OrderStatus::Expired => "Expired",
            OrderStatus::UnpaidSubMerchantPayments => "Still has unpaid sub merchant payments",
            OrderStatus::PartiallyPaid => "Partially Paid",
            OrderStatus::Terminated => "Terminated",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label for a status code, or `"Unknown"`.
pub fn status_text(code: i64) -> &'static str {
    OrderStatus::from_code(code).map_or(UNKNOWN_STATUS, |s| s.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(status_text(1), "Received");
        assert_eq!(status_text(3), "Paid");
        assert_eq!(status_text(8), "Cancelled");
        assert_eq!(status_text(9), "Completed");
        assert_eq!(status_text(24), "Terminated");
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(status_text(999), "Unknown");
        assert_eq!(status_text(0), "Unknown");
        assert_eq!(status_text(-3), "Unknown");
        assert_eq!(status_text(25), "Unknown");
    }

    #[test]
    fn test_codes_match_table_positions() {
        for (i, status) in OrderStatus::ALL.iter().enumerate() {
            assert_eq!(status.code(), i as i64 + 1);
            assert_eq!(OrderStatus::from_code(status.code()), Some(*status));
        }
    }
}
