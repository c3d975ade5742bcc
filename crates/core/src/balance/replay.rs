//! Pure balance replay helpers.
//!
//! All functions here operate on immutable, chronologically ordered slices
//! and carry the running balance as fold state. `None` means the running
//! balance overflowed `Decimal`.

use log::warn;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::balance_model::ProfitLossRecord;

/// Expresses `profit_loss` as a percentage of `balance`, rounded to
/// `precision` decimal places.
///
/// A non-positive balance yields zero: a percentage of an empty or negative
/// account is undefined, not an error.
pub fn balance_relative_percentage(profit_loss: Decimal, balance: Decimal, precision: u32) -> Decimal {
    if balance <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    match profit_loss
        .checked_div(balance)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
    {
        Some(percentage) => percentage
            .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
            .normalize(),
        None => {
            warn!(
                "Percentage of {} over balance {} is out of range, using 0",
                profit_loss, balance
            );
            Decimal::ZERO
        }
    }
}

/// Balance after applying every trade in `history` to `initial_balance`.
pub fn seed_balance<T: ProfitLossRecord>(initial_balance: Decimal, history: &[T]) -> Option<Decimal> {
    history
        .iter()
        .try_fold(initial_balance, |balance, trade| {
            balance.checked_add(trade.profit_loss())
        })
}

/// Percentage of each trade relative to the balance just before it,
/// starting from `seed`.
///
/// The running balance advances by every trade's profit/loss, including
/// trades evaluated while the balance was non-positive.
pub fn replay_percentages<T: ProfitLossRecord>(
    seed: Decimal,
    trades: &[T],
    precision: u32,
) -> Option<Vec<Decimal>> {
    trades
        .iter()
        .try_fold(
            (seed, Vec::with_capacity(trades.len())),
            |(balance, mut percentages), trade| {
                let profit_loss = trade.profit_loss();
                percentages.push(balance_relative_percentage(profit_loss, balance, precision));
                Some((balance.checked_add(profit_loss)?, percentages))
            },
        )
        .map(|(_, percentages)| percentages)
}

/// Balance after each trade, starting from `initial_balance`.
pub fn running_balances<T: ProfitLossRecord>(
    initial_balance: Decimal,
    trades: &[T],
) -> Option<Vec<Decimal>> {
    trades
        .iter()
        .try_fold(
            (initial_balance, Vec::with_capacity(trades.len())),
            |(balance, mut balances), trade| {
                let next = balance.checked_add(trade.profit_loss())?;
                balances.push(next);
                Some((next, balances))
            },
        )
        .map(|(_, balances)| balances)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_of_positive_balance() {
        assert_eq!(balance_relative_percentage(dec!(500), dec!(10000), 4), dec!(5));
        assert_eq!(
            balance_relative_percentage(dec!(-200), dec!(10500), 4),
            dec!(-1.9048)
        );
    }

    #[test]
    fn test_percentage_of_non_positive_balance_is_zero() {
        assert_eq!(balance_relative_percentage(dec!(300), dec!(-50), 4), Decimal::ZERO);
        assert_eq!(balance_relative_percentage(dec!(300), Decimal::ZERO, 4), Decimal::ZERO);
    }

    #[test]
    fn test_percentage_rounds_midpoint_away_from_zero() {
        // 1 / 80000 * 100 = 0.00125
        assert_eq!(balance_relative_percentage(dec!(1), dec!(80000), 4), dec!(0.0013));
        assert_eq!(balance_relative_percentage(dec!(-1), dec!(80000), 4), dec!(-0.0013));
    }

    #[test]
    fn test_percentage_overflow_is_zero() {
        assert_eq!(
            balance_relative_percentage(Decimal::MAX, dec!(0.0001), 4),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_seed_balance_sums_history() {
        let history = vec![dec!(100), dec!(-250), dec!(40)];
        assert_eq!(seed_balance(dec!(1000), &history), Some(dec!(890)));
        assert_eq!(seed_balance::<Decimal>(dec!(1000), &[]), Some(dec!(1000)));
    }

    #[test]
    fn test_seed_balance_overflow() {
        assert_eq!(seed_balance(Decimal::MAX, &[dec!(1)]), None);
    }

    #[test]
    fn test_replay_advances_through_non_positive_balance() {
        // 100 -> -50 (pct 0 on next) -> 250 -> ...
        let trades = vec![dec!(-150), dec!(300), dec!(25)];
        let percentages = replay_percentages(dec!(100), &trades, 4).unwrap();
        assert_eq!(percentages, vec![dec!(-150), Decimal::ZERO, dec!(10)]);
    }

    #[test]
    fn test_running_balances() {
        let trades = vec![dec!(500), dec!(-200)];
        assert_eq!(
            running_balances(dec!(10000), &trades),
            Some(vec![dec!(10500), dec!(10300)])
        );
    }
}
