use rust_decimal::{Decimal, RoundingStrategy};

use super::summary_model::TradeSummary;
use crate::balance::{balance_relative_percentage, running_balances, ProfitLossRecord};
use crate::constants::{DISPLAY_DECIMAL_PRECISION, PERCENTAGE_DECIMAL_PRECISION};
use crate::errors::{Error, Result};

/// Summarizes a chronologically ordered trade history that started from
/// `initial_balance`.
pub fn summarize_trades<T: ProfitLossRecord>(
    initial_balance: Decimal,
    trades: &[T],
) -> Result<TradeSummary> {
    let balances = running_balances(initial_balance, trades).ok_or_else(|| {
        Error::Unexpected(format!(
            "running balance overflowed over {} trades",
            trades.len()
        ))
    })?;

    let mut summary = TradeSummary {
        total_trades: trades.len(),
        initial_balance,
        final_balance: balances.last().copied().unwrap_or(initial_balance),
        ..Default::default()
    };

    for profit_loss in trades.iter().map(ProfitLossRecord::profit_loss) {
        if profit_loss > Decimal::ZERO {
            summary.winning_trades += 1;
            summary.gross_profit =
                checked(summary.gross_profit.checked_add(profit_loss), "gross profit")?;
            summary.largest_win = summary.largest_win.max(profit_loss);
        } else if profit_loss < Decimal::ZERO {
            summary.losing_trades += 1;
            summary.gross_loss =
                checked(summary.gross_loss.checked_add(profit_loss.abs()), "gross loss")?;
            summary.largest_loss = summary.largest_loss.min(profit_loss);
        } else {
            summary.breakeven_trades += 1;
        }
    }

    summary.net_profit_loss = checked(
        summary.gross_profit.checked_sub(summary.gross_loss),
        "net profit/loss",
    )?;
    summary.win_rate = ratio_percent(
        Decimal::from(summary.winning_trades),
        Decimal::from(summary.total_trades),
    );
    summary.average_win = average(summary.gross_profit, summary.winning_trades);
    summary.average_loss = average(summary.gross_loss, summary.losing_trades);
    if summary.gross_loss > Decimal::ZERO {
        let profit_factor = checked(
            summary.gross_profit.checked_div(summary.gross_loss),
            "profit factor",
        )?;
        summary.profit_factor = Some(profit_factor.round_dp_with_strategy(
            PERCENTAGE_DECIMAL_PRECISION,
            RoundingStrategy::MidpointAwayFromZero,
        ));
    }
    summary.total_return = balance_relative_percentage(
        summary.net_profit_loss,
        initial_balance,
        PERCENTAGE_DECIMAL_PRECISION,
    );
    summary.max_drawdown = checked(max_drawdown(initial_balance, &balances), "max drawdown")?;

    Ok(summary)
}

fn checked(value: Option<Decimal>, metric: &str) -> Result<Decimal> {
    value.ok_or_else(|| Error::Unexpected(format!("{} overflowed", metric)))
}

fn ratio_percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(PERCENTAGE_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    (total / Decimal::from(count))
        .round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

fn max_drawdown(initial_balance: Decimal, balances: &[Decimal]) -> Option<Decimal> {
    balances
        .iter()
        .try_fold(
            (initial_balance, Decimal::ZERO),
            |(peak, worst), &balance| {
                let peak = peak.max(balance);
                let drawdown = balance_relative_percentage(
                    peak.checked_sub(balance)?,
                    peak,
                    PERCENTAGE_DECIMAL_PRECISION,
                );
                Some((peak, worst.max(drawdown)))
            },
        )
        .map(|(_, worst)| worst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_history() {
        let summary = summarize_trades::<Decimal>(dec!(10000), &[]).unwrap();
        assert_eq!(summary.total_trades, 0);
        assert_eq!(summary.win_rate, Decimal::ZERO);
        assert_eq!(summary.final_balance, dec!(10000));
        assert_eq!(summary.profit_factor, None);
        assert_eq!(summary.max_drawdown, Decimal::ZERO);
    }

    #[test]
    fn test_mixed_history() {
        let trades = vec![dec!(500), dec!(-200), dec!(0), dec!(300), dec!(-400)];
        let summary = summarize_trades(dec!(10000), &trades).unwrap();

        assert_eq!(summary.total_trades, 5);
        assert_eq!(summary.winning_trades, 2);
        assert_eq!(summary.losing_trades, 2);
        assert_eq!(summary.breakeven_trades, 1);
        assert_eq!(summary.win_rate, dec!(40));
        assert_eq!(summary.gross_profit, dec!(800));
        assert_eq!(summary.gross_loss, dec!(600));
        assert_eq!(summary.net_profit_loss, dec!(200));
        assert_eq!(summary.average_win, dec!(400));
        assert_eq!(summary.average_loss, dec!(300));
        assert_eq!(summary.profit_factor, Some(dec!(1.3333)));
        assert_eq!(summary.largest_win, dec!(500));
        assert_eq!(summary.largest_loss, dec!(-400));
        assert_eq!(summary.final_balance, dec!(10200));
        assert_eq!(summary.total_return, dec!(2));
    }

    #[test]
    fn test_max_drawdown_tracks_running_peak() {
        // 10000 -> 12000 (peak) -> 9000 -> 11000 -> 10450
        let trades = vec![dec!(2000), dec!(-3000), dec!(2000), dec!(-550)];
        let summary = summarize_trades(dec!(10000), &trades).unwrap();
        assert_eq!(summary.max_drawdown, dec!(25));
    }

    #[test]
    fn test_drawdown_from_initial_balance() {
        let trades = vec![dec!(-1000)];
        let summary = summarize_trades(dec!(10000), &trades).unwrap();
        assert_eq!(summary.max_drawdown, dec!(10));
        assert_eq!(summary.total_return, dec!(-10));
    }

    #[test]
    fn test_unrepresentable_profit_factor_is_an_error() {
        let trades = vec![dec!(100000000000000000000), dec!(-0.0000000001)];
        let err = summarize_trades(dec!(10000), &trades).unwrap_err();
        assert!(matches!(err, Error::Unexpected(_)));
    }

    #[test]
    fn test_overflowing_gross_profit_is_an_error() {
        let trades = vec![Decimal::MAX, Decimal::MIN, Decimal::MAX];
        assert!(summarize_trades(Decimal::ZERO, &trades).is_err());
    }
}
