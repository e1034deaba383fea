//! Core entities: debts, payments and milestones.
//!
//! These mirror the shapes the persistence layer stores and the simulators
//! consume. All monetary fields are `Decimal`, dates are UTC timestamps.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtStatus {
    Active,
    PaidOff,
    Archived,
}

/// A single liability being paid down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: Uuid,
    pub name: String,
    /// Current amount owed. Never negative; payments are clamped so a payoff
    /// lands on exactly zero.
    pub balance: Decimal,
    /// Balance at creation, the 100% baseline for progress tracking.
    pub original_balance: Decimal,
    /// Annual interest rate as a percentage (18.99 means 18.99%/yr).
    pub interest_rate: Decimal,
    /// Required monthly payment floor.
    pub minimum_payment: Decimal,
    pub due_date: Option<DateTime<Utc>>,
    /// Running total of interest paid over the debt's lifetime.
    pub total_interest_paid: Decimal,
    /// Running total of all payment amounts recorded.
    pub total_payments_made: Decimal,
    pub status: DebtStatus,
}

impl Debt {
    /// Creates an active debt with the opening balance as its progress
    /// baseline and zeroed accumulators.
    pub fn new(
        name: impl Into<String>,
        balance: Decimal,
        interest_rate: Decimal,
        minimum_payment: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            balance,
            original_balance: balance,
            interest_rate,
            minimum_payment,
            due_date: None,
            total_interest_paid: Decimal::ZERO,
            total_payments_made: Decimal::ZERO,
            status: DebtStatus::Active,
        }
    }
}

/// Classification of a payment.
///
/// The three well-known kinds serialize as `minimum` / `extra` / `full`; any
/// other string round-trips as a free-form manual tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Minimum,
    Extra,
    Full,
    #[serde(untagged)]
    Manual(String),
}

/// A single payment event against one debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub debt_id: Uuid,
    pub amount: Decimal,
    pub payment_date: DateTime<Utc>,
    pub payment_type: PaymentType,
    /// Portion of `amount` covering accrued interest.
    pub interest_portion: Decimal,
    /// Portion of `amount` reducing the balance. The two portions sum to
    /// `amount` within rounding tolerance.
    pub principal_portion: Decimal,
    /// Debt balance snapshot after this payment was applied, once computed.
    pub balance_after_payment: Option<Decimal>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

/// Kind of milestone event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneType {
    #[serde(rename = "25_percent_paid")]
    TwentyFivePercentPaid,
    #[serde(rename = "50_percent_paid")]
    FiftyPercentPaid,
    #[serde(rename = "75_percent_paid")]
    SeventyFivePercentPaid,
    PaidOff,
    Created,
    FirstPayment,
    Custom,
}

/// A detected progress event on a debt.
///
/// Milestones are append-only: once recorded they are never mutated or
/// deleted. Detection itself is stateless, so suppressing re-emission of a
/// threshold that was already crossed is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: Uuid,
    pub debt_id: Uuid,
    pub milestone_type: MilestoneType,
    pub achieved_date: DateTime<Utc>,
    /// Debt balance at the moment of detection.
    pub milestone_value: Decimal,
    pub description: String,
}
