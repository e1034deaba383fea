//! Month-by-month payoff simulation under the avalanche and snowball
//! prioritization strategies.
//!
//! Both strategies share one engine: sort working copies by a priority key,
//! then fold a month-state accumulator through the accrue / pay-minimums /
//! direct-surplus loop until every balance reaches zero or the safety cap is
//! hit. They differ only in the sort key and in what the result decorates on
//! top of the shared plan.

use std::cmp::Reverse;

use anyhow::bail;
use chrono::{DateTime, Months, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::breakdown::monthly_rate;
use crate::comparator::estimate_minimum_payment_timeline;
use crate::currency;
use crate::model::Debt;

/// Safety cap on simulated months (50 years). Guarantees termination for
/// configurations whose minimum payments never cover the accruing interest;
/// the `*_with_cap` entry points accept an explicit override.
pub const MAX_SIMULATION_MONTHS: u32 = 600;

/// Debt prioritization strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Surplus budget targets the highest interest rate first.
    Avalanche,
    /// Surplus budget targets the smallest balance first.
    Snowball,
}

/// Recommended payment for one debt in the next payment cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecommendation {
    pub debt_id: Uuid,
    pub debt_name: String,
    /// Minimum payment, plus the whole budget surplus for the top-priority
    /// debt.
    pub recommended_amount: Decimal,
    /// 1-based position in the strategy's sort order.
    pub priority: u32,
}

/// One debt's share of a simulated month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtMonthEntry {
    pub debt_id: Uuid,
    pub payment: Decimal,
    pub remaining_balance: Decimal,
}

/// Snapshot of one simulated month across all debts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    /// 1-based month index from the start of the simulation.
    pub month: u32,
    pub entries: Vec<DebtMonthEntry>,
    pub total_payment: Decimal,
}

/// The first month a debt's balance reached zero. Emitted at most once per
/// debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EliminationEvent {
    pub debt_id: Uuid,
    pub debt_name: String,
    pub month: u32,
}

/// Projection shared by both strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffPlan {
    pub strategy: Strategy,
    pub payment_recommendations: Vec<PaymentRecommendation>,
    pub monthly_breakdowns: Vec<MonthlyBreakdown>,
    pub total_months_to_debt_free: u32,
    pub debt_free_date: DateTime<Utc>,
    pub total_interest_paid: Decimal,
}

/// Avalanche projection: the shared plan plus interest saved against the
/// minimum-payments-only baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvalanchePlan {
    #[serde(flatten)]
    pub plan: PayoffPlan,
    pub total_interest_saved: Decimal,
}

/// Snowball projection: the shared plan plus the elimination log. The
/// headline metric is the plan's actual `total_interest_paid`, reflecting the
/// snowball method's motivational rather than purely financial framing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowballPlan {
    #[serde(flatten)]
    pub plan: PayoffPlan,
    pub debts_eliminated_by_month: Vec<EliminationEvent>,
}

/// Projects an avalanche payoff plan for `debts` under `monthly_budget`.
///
/// # Errors
///
/// Fails when the budget does not cover the sum of minimum payments.
pub fn simulate_avalanche(debts: &[Debt], monthly_budget: Decimal) -> anyhow::Result<AvalanchePlan> {
    simulate_avalanche_with_cap(debts, monthly_budget, MAX_SIMULATION_MONTHS)
}

/// [`simulate_avalanche`] with an explicit month cap.
pub fn simulate_avalanche_with_cap(
    debts: &[Debt],
    monthly_budget: Decimal,
    cap: u32,
) -> anyhow::Result<AvalanchePlan> {
    let run = run_simulation(debts, monthly_budget, cap, Strategy::Avalanche, |d| {
        Reverse(d.interest_rate)
    })?;
    let baseline = estimate_minimum_payment_timeline(debts);
    let total_interest_saved = currency::sub(baseline.total_interest, run.interest_paid);
    Ok(AvalanchePlan {
        plan: run.into_plan(Strategy::Avalanche),
        total_interest_saved,
    })
}

/// Projects a snowball payoff plan for `debts` under `monthly_budget`.
///
/// # Errors
///
/// Fails when the budget does not cover the sum of minimum payments.
pub fn simulate_snowball(debts: &[Debt], monthly_budget: Decimal) -> anyhow::Result<SnowballPlan> {
    simulate_snowball_with_cap(debts, monthly_budget, MAX_SIMULATION_MONTHS)
}

/// [`simulate_snowball`] with an explicit month cap.
pub fn simulate_snowball_with_cap(
    debts: &[Debt],
    monthly_budget: Decimal,
    cap: u32,
) -> anyhow::Result<SnowballPlan> {
    let run = run_simulation(debts, monthly_budget, cap, Strategy::Snowball, |d| d.balance)?;
    let debts_eliminated_by_month = run.eliminations.clone();
    Ok(SnowballPlan {
        plan: run.into_plan(Strategy::Snowball),
        debts_eliminated_by_month,
    })
}

/// Accumulated output of the month loop.
struct SimulationRun {
    recommendations: Vec<PaymentRecommendation>,
    months: Vec<MonthlyBreakdown>,
    eliminations: Vec<EliminationEvent>,
    interest_paid: Decimal,
}

impl SimulationRun {
    fn into_plan(self, strategy: Strategy) -> PayoffPlan {
        let total_months = self.months.len() as u32;
        let now = Utc::now();
        let debt_free_date = now
            .checked_add_months(Months::new(total_months))
            .unwrap_or(now);
        PayoffPlan {
            strategy,
            payment_recommendations: self.recommendations,
            monthly_breakdowns: self.months,
            total_months_to_debt_free: total_months,
            debt_free_date,
            total_interest_paid: self.interest_paid,
        }
    }
}

/// Month-state accumulator threaded through [`advance_month`]. Balances are
/// parallel to the sorted debt slice; the input debts are never touched.
struct MonthState {
    balances: Vec<Decimal>,
    months: Vec<MonthlyBreakdown>,
    eliminations: Vec<EliminationEvent>,
    interest_paid: Decimal,
}

impl MonthState {
    fn opening(debts: &[Debt]) -> Self {
        Self {
            balances: debts.iter().map(|d| d.balance).collect(),
            months: Vec::new(),
            eliminations: Vec::new(),
            interest_paid: Decimal::ZERO,
        }
    }

    fn outstanding(&self) -> bool {
        self.balances.iter().any(|b| *b > Decimal::ZERO)
    }
}

fn run_simulation<K, F>(
    debts: &[Debt],
    monthly_budget: Decimal,
    cap: u32,
    strategy: Strategy,
    priority: F,
) -> anyhow::Result<SimulationRun>
where
    K: Ord,
    F: Fn(&Debt) -> K,
{
    let total_minimums = currency::sum(debts.iter().map(|d| d.minimum_payment));
    if monthly_budget < total_minimums {
        bail!(
            "monthly budget {} does not cover the {} required in minimum payments",
            currency::format(monthly_budget),
            currency::format(total_minimums),
        );
    }

    debug!(
        ?strategy,
        debts = debts.len(),
        budget = %monthly_budget,
        "starting payoff simulation"
    );

    // Stable sort: ties keep their original order.
    let mut ordered: Vec<Debt> = debts.to_vec();
    ordered.sort_by_key(|d| priority(d));

    let recommendations = build_recommendations(&ordered, monthly_budget, total_minimums);

    let mut state = MonthState::opening(&ordered);
    while state.outstanding() && (state.months.len() as u32) < cap {
        state = advance_month(state, &ordered, monthly_budget);
    }

    debug!(
        ?strategy,
        months = state.months.len(),
        interest = %state.interest_paid,
        "payoff simulation finished"
    );

    Ok(SimulationRun {
        recommendations,
        months: state.months,
        eliminations: state.eliminations,
        interest_paid: state.interest_paid,
    })
}

/// Minimum payment for everyone; the first unpaid debt in sort order also
/// receives the entire budget surplus.
fn build_recommendations(
    ordered: &[Debt],
    monthly_budget: Decimal,
    total_minimums: Decimal,
) -> Vec<PaymentRecommendation> {
    let surplus = currency::sub(monthly_budget, total_minimums);
    let target = ordered.iter().position(|d| d.balance > Decimal::ZERO);

    ordered
        .iter()
        .enumerate()
        .map(|(i, debt)| {
            let recommended_amount = if Some(i) == target {
                currency::add(debt.minimum_payment, surplus)
            } else {
                debt.minimum_payment
            };
            PaymentRecommendation {
                debt_id: debt.id,
                debt_name: debt.name.clone(),
                recommended_amount,
                priority: i as u32 + 1,
            }
        })
        .collect()
}

/// Runs one month: accrue interest on every open balance, pay each debt its
/// clamped minimum, then direct the leftover budget at the first debt in sort
/// order that still owes anything. Consumes and returns the state value.
fn advance_month(state: MonthState, ordered: &[Debt], monthly_budget: Decimal) -> MonthState {
    let MonthState {
        mut balances,
        mut months,
        mut eliminations,
        mut interest_paid,
    } = state;

    let month = months.len() as u32 + 1;
    let open_at_start: Vec<bool> = balances.iter().map(|b| *b > Decimal::ZERO).collect();
    let mut payments = vec![Decimal::ZERO; ordered.len()];

    for (i, debt) in ordered.iter().enumerate() {
        if balances[i] > Decimal::ZERO {
            let accrued = currency::mul(balances[i], monthly_rate(debt.interest_rate));
            balances[i] = currency::add(balances[i], accrued);
            interest_paid = currency::add(interest_paid, accrued);
        }
    }

    let mut leftover = monthly_budget;
    for (i, debt) in ordered.iter().enumerate() {
        if balances[i] > Decimal::ZERO {
            let pay = currency::min(debt.minimum_payment, balances[i]);
            balances[i] = currency::sub(balances[i], pay);
            payments[i] = pay;
            leftover = currency::sub(leftover, pay);
        }
    }

    if leftover > Decimal::ZERO {
        if let Some(i) = balances.iter().position(|b| *b > Decimal::ZERO) {
            let extra = currency::min(leftover, balances[i]);
            balances[i] = currency::sub(balances[i], extra);
            payments[i] = currency::add(payments[i], extra);
        }
    }

    let entries = ordered
        .iter()
        .enumerate()
        .map(|(i, debt)| DebtMonthEntry {
            debt_id: debt.id,
            payment: payments[i],
            remaining_balance: balances[i],
        })
        .collect();

    for (i, debt) in ordered.iter().enumerate() {
        if open_at_start[i] && balances[i].is_zero() {
            eliminations.push(EliminationEvent {
                debt_id: debt.id,
                debt_name: debt.name.clone(),
                month,
            });
        }
    }

    months.push(MonthlyBreakdown {
        month,
        entries,
        total_payment: currency::sum(payments),
    });

    MonthState {
        balances,
        months,
        eliminations,
        interest_paid,
    }
}
