//! `debt_payoff` is a Rust library for simulating debt repayment and
//! comparing payoff strategies.
//!
//! Given a set of debts (balances, annual interest rates, minimum payments)
//! and a monthly budget, it projects month-by-month amortization under the
//! two classic prioritization policies:
//! - **Avalanche**: the entire budget surplus targets the highest interest
//!   rate first, minimizing total interest.
//! - **Snowball**: the surplus targets the smallest balance first, trading
//!   some interest for early eliminations.
//!
//! It also keeps the day-to-day books: recording, editing and reversing
//! individual payments, tracking progress percentages and detecting payoff
//! milestones. All functions are synchronous and pure — inputs are value
//! snapshots, outputs are new values, and nothing is persisted here.
//!
//! ## Usage
//!
//! Add `debt_payoff` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! debt_payoff = "0.4.0"
//! rust_decimal = "1.39.0"
//! rust_decimal_macros = "1.39.0"
//! ```
//!
//! Then run both strategies against your debts and compare:
//!
//! ```rust
//! use debt_payoff::{Debt, compare_strategies};
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     let debts = vec![
//!         Debt::new("Visa", dec!(4500), dec!(19.99), dec!(90)),
//!         Debt::new("Car loan", dec!(12000), dec!(6.5), dec!(250)),
//!     ];
//!
//!     match compare_strategies(&debts, dec!(600)) {
//!         Ok(comparison) => {
//!             println!(
//!                 "Avalanche: debt free in {} months",
//!                 comparison.avalanche.plan.total_months_to_debt_free
//!             );
//!             println!(
//!                 "Snowball:  debt free in {} months, {} debts gone in year one",
//!                 comparison.snowball.plan.total_months_to_debt_free,
//!                 comparison.motivational_benefit_of_snowball
//!             );
//!         }
//!         Err(e) => {
//!             eprintln!("Error comparing strategies: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod breakdown;
pub mod comparator;
pub mod currency;
pub mod model;
pub mod progress;
pub mod recommend;
pub mod recorder;
pub mod simulator;

pub use breakdown::{PaymentBreakdown, split_payment};
pub use comparator::{
    BudgetImpact, MinimumPaymentBaseline, StrategyComparison, calculate_budget_impact,
    compare_strategies, estimate_minimum_payment_timeline, weighted_average_rate,
};
pub use model::{Debt, DebtStatus, Milestone, MilestoneType, Payment, PaymentType};
pub use progress::{DebtProgress, calculate_progress, detect_milestones};
pub use recommend::{DebtPaymentSuggestion, generate_recommendations};
pub use recorder::{
    AppliedPayment, PaymentInput, PaymentUpdate, RecordedPayment, apply_payment, edit_payment,
    record_payment, reverse_payment,
};
pub use simulator::{
    AvalanchePlan, DebtMonthEntry, EliminationEvent, MAX_SIMULATION_MONTHS, MonthlyBreakdown,
    PaymentRecommendation, PayoffPlan, SnowballPlan, Strategy, simulate_avalanche,
    simulate_avalanche_with_cap, simulate_snowball, simulate_snowball_with_cap,
};
