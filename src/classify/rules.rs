//! Thresholds and decision rules that turn a sponsor's transaction history into a `Category`.

use crate::model::{Category, Transaction};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// A recurring sponsor paying monthly is active if their last payment is at most this old.
pub(super) const MONTHLY_ACTIVE_DAYS: i64 = 45;

/// A recurring sponsor paying yearly is active if their last payment is at most this old.
pub(super) const YEARLY_ACTIVE_DAYS: i64 = 400;

/// A one-time-only sponsor counts as current if their last payment is at most this old.
pub(super) const ONE_TIME_CURRENT_DAYS: i64 = 30;

/// Each full multiple of this amount in a single one-time payment buys one special window.
pub(super) const SPECIAL_AMOUNT: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// The number of days of special status bought by each `SPECIAL_AMOUNT`.
pub(super) const SPECIAL_WINDOW_DAYS: i64 = 30;

/// The minimum amount for `Current` or `Past`; below it a paying sponsor is a `Backer`.
pub(super) const CURRENT_AMOUNT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

pub(super) fn active_threshold_days(is_yearly: bool) -> i64 {
    if is_yearly {
        YEARLY_ACTIVE_DAYS
    } else {
        MONTHLY_ACTIVE_DAYS
    }
}

/// The number of days a one-time payment of `amount` keeps a sponsor special:
/// `max(1, floor(amount / 100)) * 30`.
pub(super) fn special_window_days(amount: Decimal) -> i64 {
    let multiples = (amount / SPECIAL_AMOUNT).floor().to_i64().unwrap_or(i64::MAX);
    multiples.max(1).saturating_mul(SPECIAL_WINDOW_DAYS)
}

/// The facts about a history that the category decision depends on.
#[derive(Debug, Clone, Copy)]
pub(super) struct Facts<'a> {
    pub(super) latest_recurring: Option<&'a Transaction>,
    pub(super) latest_one_time: Option<&'a Transaction>,
    pub(super) days_since_last_one_time: Option<i64>,
    pub(super) current_monthly_amount: Decimal,
    pub(super) is_currently_active: bool,
    /// The large one-time payment whose special window is still open, if any.
    pub(super) special_one_time: Option<&'a Transaction>,
}

/// Decides the category. The first matching rule wins.
pub(super) fn categorize(facts: &Facts<'_>) -> Category {
    let monthly = facts.current_monthly_amount;
    if (facts.is_currently_active && monthly >= SPECIAL_AMOUNT) || facts.special_one_time.is_some()
    {
        return Category::Special;
    }

    if facts.latest_recurring.is_some() {
        return if facts.is_currently_active && monthly >= CURRENT_AMOUNT {
            Category::Current
        } else {
            by_amount(monthly, false)
        };
    }

    let amount = facts
        .latest_one_time
        .map(Transaction::tier_monthly_amount)
        .unwrap_or_default();
    let recent = facts
        .days_since_last_one_time
        .is_some_and(|days| days <= ONE_TIME_CURRENT_DAYS);
    by_amount(amount, recent)
}

fn by_amount(amount: Decimal, recent: bool) -> Category {
    if amount >= CURRENT_AMOUNT {
        if recent {
            Category::Current
        } else {
            Category::Past
        }
    } else if amount > Decimal::ZERO {
        Category::Backer
    } else {
        Category::Past
    }
}

/// Picks the transaction whose tier name is shown for the sponsor.
pub(super) fn primary_tier<'a>(
    facts: &Facts<'a>,
    transactions: &'a [Transaction],
) -> Option<&'a Transaction> {
    if let Some(special) = facts.special_one_time {
        return Some(special);
    }
    if facts.is_currently_active {
        if let Some(recurring) = facts.latest_recurring {
            return Some(recurring);
        }
    }
    if let Some(one_time) = facts.latest_one_time {
        return Some(one_time);
    }
    transactions
        .iter()
        .max_by_key(|t| t.tier_monthly_amount())
}
