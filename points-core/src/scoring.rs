//! Points Scoring Rules
//!
//! Each rule is scored independently and the contributions are summed:
//!
//! | Rule           | Points                                                  |
//! |----------------|---------------------------------------------------------|
//! | Retailer       | 1 per ASCII letter or digit in the retailer name        |
//! | Round total    | 50 if the total has no fractional part                  |
//! | Quarter total  | 25 if the total is a multiple of 0.25                   |
//! | Item pairs     | 5 per complete pair of items                            |
//! | Descriptions   | ceil(price * 0.2) per item whose trimmed description length is a multiple of 3 |
//! | Odd day        | 6 if the purchase day of month is odd                   |
//! | Afternoon      | 10 if the purchase hour is in [14, 16)                  |
//!
//! Scoring never fails. A field that does not parse contributes nothing to its
//! rule and leaves every other rule untouched.

use chrono::{NaiveTime, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

use crate::types::{Item, Receipt};

const ROUND_TOTAL_POINTS: u64 = 50;
const QUARTER_TOTAL_POINTS: u64 = 25;
const ITEM_PAIR_POINTS: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

/// Afternoon window, start hour inclusive, end hour exclusive
const AFTERNOON_HOURS: std::ops::Range<u32> = 14..16;

/// Per-rule point contributions for one receipt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub retailer: u64,
    pub round_total: u64,
    pub quarter_total: u64,
    pub item_pairs: u64,
    pub descriptions: u64,
    pub odd_day: u64,
    pub afternoon: u64,
}

impl PointsBreakdown {
    /// Sum of all rules, saturating at `u64::MAX`
    pub fn total(&self) -> u64 {
        [
            self.retailer,
            self.round_total,
            self.quarter_total,
            self.item_pairs,
            self.descriptions,
            self.odd_day,
            self.afternoon,
        ]
        .into_iter()
        .fold(0, u64::saturating_add)
    }
}

/// Score a receipt rule by rule
pub fn score(receipt: &Receipt) -> PointsBreakdown {
    let total = parse_decimal(&receipt.total);

    let breakdown = PointsBreakdown {
        retailer: retailer_points(&receipt.retailer),
        round_total: total.map_or(0, round_total_points),
        quarter_total: total.map_or(0, quarter_total_points),
        item_pairs: item_pair_points(receipt.items.len()),
        descriptions: receipt
            .items
            .iter()
            .map(description_points)
            .fold(0, u64::saturating_add),
        odd_day: odd_day_points(&receipt.purchase_date),
        afternoon: afternoon_points(&receipt.purchase_time),
    };

    tracing::debug!(
        retailer = %receipt.retailer,
        breakdown = ?breakdown,
        points = breakdown.total(),
        "Receipt scored"
    );

    breakdown
}

/// Total points for a receipt
pub fn compute_points(receipt: &Receipt) -> u64 {
    score(receipt).total()
}

/// Digit separators are not part of a decimal number
fn parse_decimal(value: &str) -> Option<Decimal> {
    if value.contains('_') {
        return None;
    }
    Decimal::from_str(value).ok()
}

/// One point per ASCII alphanumeric character
pub fn retailer_points(retailer: &str) -> u64 {
    retailer.chars().filter(char::is_ascii_alphanumeric).count() as u64
}

pub fn round_total_points(total: Decimal) -> u64 {
    if total.fract().is_zero() {
        ROUND_TOTAL_POINTS
    } else {
        0
    }
}

pub fn quarter_total_points(total: Decimal) -> u64 {
    match total.checked_rem(Decimal::new(25, 2)) {
        Some(rem) if rem.is_zero() => QUARTER_TOTAL_POINTS,
        _ => 0,
    }
}

pub fn item_pair_points(item_count: usize) -> u64 {
    (item_count / 2) as u64 * ITEM_PAIR_POINTS
}

/// ceil(price * 0.2) when the trimmed description length is a multiple of 3
///
/// Length is measured in bytes. A negative price contributes nothing and a
/// contribution beyond `u64::MAX` saturates.
pub fn description_points(item: &Item) -> u64 {
    if item.short_description.trim().len() % 3 != 0 {
        return 0;
    }

    let Some(scaled) = parse_decimal(&item.price)
        .and_then(|price| price.checked_mul(Decimal::new(2, 1)))
        .map(|scaled| scaled.ceil())
    else {
        return 0;
    };

    if scaled.is_sign_negative() {
        return 0;
    }
    scaled.to_u64().unwrap_or(u64::MAX)
}

/// Date must have exactly three dash-separated parts; the third is the day
pub fn odd_day_points(purchase_date: &str) -> u64 {
    let parts: Vec<&str> = purchase_date.split('-').collect();
    if parts.len() != 3 {
        return 0;
    }

    match parts[2].parse::<i64>() {
        Ok(day) if day % 2 == 1 => ODD_DAY_POINTS,
        _ => 0,
    }
}

pub fn afternoon_points(purchase_time: &str) -> u64 {
    if !is_clock_shape(purchase_time) {
        return 0;
    }

    match NaiveTime::parse_from_str(purchase_time, "%H:%M") {
        Ok(time) if AFTERNOON_HOURS.contains(&time.hour()) => AFTERNOON_POINTS,
        _ => 0,
    }
}

/// One or two hour digits, a colon, exactly two minute digits
fn is_clock_shape(value: &str) -> bool {
    match value.split_once(':') {
        Some((hour, minute)) => {
            (1..=2).contains(&hour.len())
                && minute.len() == 2
                && hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
