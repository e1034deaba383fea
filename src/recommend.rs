//! Thin adapter turning a strategy's recommendations into a flat list.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Debt;
use crate::simulator::{Strategy, simulate_avalanche, simulate_snowball};

/// A per-debt suggested payment for the next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebtPaymentSuggestion {
    pub debt_id: Uuid,
    pub amount: Decimal,
}

/// Runs the chosen strategy and flattens its recommendation list. No logic of
/// its own beyond the delegation.
///
/// # Errors
///
/// Fails when the budget does not cover the sum of minimum payments.
pub fn generate_recommendations(
    debts: &[Debt],
    monthly_budget: Decimal,
    strategy: Strategy,
) -> anyhow::Result<Vec<DebtPaymentSuggestion>> {
    let recommendations = match strategy {
        Strategy::Avalanche => {
            simulate_avalanche(debts, monthly_budget)?
                .plan
                .payment_recommendations
        }
        Strategy::Snowball => {
            simulate_snowball(debts, monthly_budget)?
                .plan
                .payment_recommendations
        }
    };

    Ok(recommendations
        .into_iter()
        .map(|rec| DebtPaymentSuggestion {
            debt_id: rec.debt_id,
            amount: rec.recommended_amount,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_flattens_strategy_recommendations() {
        let debts = vec![
            Debt::new("Card A", dec!(500), dec!(20), dec!(50)),
            Debt::new("Loan B", dec!(1000), dec!(5), dec!(75)),
        ];

        let suggestions =
            generate_recommendations(&debts, dec!(200), Strategy::Avalanche).unwrap();

        assert_eq!(suggestions.len(), 2);
        // Highest rate first: minimum plus the whole 75 surplus.
        assert_eq!(suggestions[0].debt_id, debts[0].id);
        assert_eq!(suggestions[0].amount, dec!(125.00));
        assert_eq!(suggestions[1].amount, dec!(75));
    }

    #[test]
    fn test_propagates_budget_precondition() {
        let debts = vec![Debt::new("Card", dec!(500), dec!(20), dec!(50))];
        assert!(generate_recommendations(&debts, dec!(10), Strategy::Snowball).is_err());
    }
}
