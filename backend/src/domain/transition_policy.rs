//! Status transition rules.
//!
//! All transition decisions go through [`TransitionPolicy::permits`]. The
//! default is permissive: any status may follow any other, including itself.

use super::OrderStatus;

/// Rule set applied when an order's status changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionPolicy {
    /// Every transition is allowed.
    #[default]
    Permissive,
    /// Orders only move forward through the lifecycle.
    ///
    /// `pending -> processing -> shipped -> delivered`, with `cancelled`
    /// reachable from `pending` and `processing`. `delivered` and
    /// `cancelled` are terminal. Re-applying the current status is allowed.
    ForwardOnly,
}

impl TransitionPolicy {
    /// Select the policy from the `strict` configuration flag.
    #[must_use]
    pub const fn from_strict(strict: bool) -> Self {
        if strict {
            Self::ForwardOnly
        } else {
            Self::Permissive
        }
    }

    /// Whether an order in `from` may move to `to`.
    ///
    /// # Examples
    /// ```
    /// use orders_service::domain::{OrderStatus, TransitionPolicy};
    ///
    /// let policy = TransitionPolicy::ForwardOnly;
    /// assert!(policy.permits(OrderStatus::Pending, OrderStatus::Processing));
    /// assert!(!policy.permits(OrderStatus::Delivered, OrderStatus::Pending));
    /// assert!(TransitionPolicy::Permissive.permits(OrderStatus::Delivered, OrderStatus::Pending));
    /// ```
    #[must_use]
    pub fn permits(self, from: OrderStatus, to: OrderStatus) -> bool {
        match self {
            Self::Permissive => true,
            Self::ForwardOnly => from == to || forward_step(from, to),
        }
    }
}

fn forward_step(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::{Cancelled, Delivered, Pending, Processing, Shipped};
    matches!(
        (from, to),
        (Pending, Processing)
            | (Processing, Shipped)
            | (Shipped, Delivered)
            | (Pending | Processing, Cancelled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn permissive_allows_every_pair() {
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                assert!(TransitionPolicy::Permissive.permits(from, to), "{from} -> {to}");
            }
        }
    }

    #[rstest]
    #[case(OrderStatus::Pending, OrderStatus::Processing, true)]
    #[case(OrderStatus::Processing, OrderStatus::Shipped, true)]
    #[case(OrderStatus::Shipped, OrderStatus::Delivered, true)]
    #[case(OrderStatus::Pending, OrderStatus::Cancelled, true)]
    #[case(OrderStatus::Processing, OrderStatus::Cancelled, true)]
    #[case(OrderStatus::Shipped, OrderStatus::Shipped, true)]
    #[case(OrderStatus::Pending, OrderStatus::Shipped, false)]
    #[case(OrderStatus::Shipped, OrderStatus::Cancelled, false)]
    #[case(OrderStatus::Delivered, OrderStatus::Pending, false)]
    #[case(OrderStatus::Cancelled, OrderStatus::Processing, false)]
    fn forward_only_follows_lifecycle(
        #[case] from: OrderStatus,
        #[case] to: OrderStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(TransitionPolicy::ForwardOnly.permits(from, to), allowed);
    }

    #[rstest]
    #[case(false, TransitionPolicy::Permissive)]
    #[case(true, TransitionPolicy::ForwardOnly)]
    fn strict_flag_selects_policy(#[case] strict: bool, #[case] expected: TransitionPolicy) {
        assert_eq!(TransitionPolicy::from_strict(strict), expected);
    }
}
