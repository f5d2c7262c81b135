//! End-to-end tests of the exchange core.
//!
//! Tests cover:
//! - The TEA and GIN walkthroughs from trade entry to metrics
//! - Trailing-window VWAP as the clock moves
//! - The all share index across the sample exchange
//! - Error propagation through the exchange

mod common;

use approx::assert_relative_eq;
use chrono::TimeDelta;
use common::*;
use gbce::domain::error::GbceError;
use gbce::domain::stock::{Stock, StockType};
use gbce::domain::summary::MarketSummary;
use gbce::domain::trade::TradeIndicator;
use gbce::ports::clock_port::ClockPort;

mod walkthroughs {
    use super::*;

    #[test]
    fn tea_single_trade() {
        let mut exchange = sample_at_open();
        exchange
            .record_trade("TEA", 100, TradeIndicator::Buy, 150.0)
            .unwrap();

        let tea = exchange.get_stock("TEA").unwrap();
        assert_eq!(tea.calculate_dividend_yield(150.0).unwrap(), 0.0);
        assert_eq!(tea.calculate_pe_ratio(150.0).unwrap(), None);
        assert_relative_eq!(
            tea.calculate_volume_weighted_price(5, exchange.clock().now()),
            150.0
        );
        assert_relative_eq!(exchange.calculate_all_share_index(), 150.0, max_relative = 1e-12);
    }

    #[test]
    fn gin_preferred_yield() {
        let exchange = sample_at_open();
        let gin = exchange.get_stock("GIN").unwrap();
        assert_eq!(gin.stock_type(), StockType::Preferred);
        assert_relative_eq!(gin.calculate_dividend_yield(100.0).unwrap(), 0.02);
    }

    #[test]
    fn ale_metrics_at_quoted_price() {
        let exchange = sample_at_open();
        let ale = exchange.get_stock("ALE").unwrap();
        assert_relative_eq!(ale.calculate_dividend_yield(230.0).unwrap(), 0.1);
        assert_relative_eq!(ale.calculate_pe_ratio(230.0).unwrap().unwrap(), 10.0);
    }
}

mod windowing {
    use super::*;

    #[test]
    fn vwap_follows_the_trailing_window() {
        let mut exchange = sample_at_open();
        exchange
            .record_trade("POP", 100, TradeIndicator::Buy, 100.0)
            .unwrap();
        exchange.clock().advance(TimeDelta::minutes(3));
        exchange
            .record_trade("POP", 100, TradeIndicator::Sell, 110.0)
            .unwrap();

        assert_relative_eq!(exchange.calculate_volume_weighted_price("POP").unwrap(), 105.0);

        // First trade sits exactly on the boundary at +5.
        exchange.clock().advance(TimeDelta::minutes(2));
        assert_relative_eq!(exchange.calculate_volume_weighted_price("POP").unwrap(), 105.0);

        exchange.clock().advance(TimeDelta::seconds(1));
        assert_relative_eq!(exchange.calculate_volume_weighted_price("POP").unwrap(), 110.0);

        exchange.clock().advance(TimeDelta::minutes(3));
        assert_eq!(exchange.calculate_volume_weighted_price("POP").unwrap(), 0.0);
        assert_eq!(exchange.get_stock("POP").unwrap().trades().len(), 2);
    }

    #[test]
    fn explicit_window_on_stock_ignores_exchange_window() {
        let mut exchange = sample_at_open();
        exchange
            .record_trade("JOE", 10, TradeIndicator::Buy, 250.0)
            .unwrap();
        exchange.clock().advance(TimeDelta::minutes(30));
        let now = exchange.clock().now();
        let joe = exchange.get_stock("JOE").unwrap();
        assert_eq!(joe.calculate_volume_weighted_price(5, now), 0.0);
        assert_relative_eq!(joe.calculate_volume_weighted_price(60, now), 250.0);
    }
}

mod all_share_index {
    use super::*;

    #[test]
    fn index_over_sample_exchange() {
        let mut exchange = sample_at_open();
        exchange
            .record_trade("TEA", 10, TradeIndicator::Buy, 100.0)
            .unwrap();
        exchange
            .record_trade("POP", 10, TradeIndicator::Buy, 200.0)
            .unwrap();
        exchange
            .record_trade("GIN", 10, TradeIndicator::Sell, 300.0)
            .unwrap();

        assert_relative_eq!(
            exchange.calculate_all_share_index(),
            181.712_059_283_213_97,
            max_relative = 1e-12
        );
    }

    #[test]
    fn index_is_zero_before_any_trading() {
        assert_eq!(sample_at_open().calculate_all_share_index(), 0.0);
    }

    #[test]
    fn replacing_a_stock_removes_it_from_the_index() {
        let mut exchange = sample_at_open();
        exchange
            .record_trade("TEA", 10, TradeIndicator::Buy, 400.0)
            .unwrap();
        exchange
            .record_trade("POP", 10, TradeIndicator::Buy, 100.0)
            .unwrap();
        assert_relative_eq!(exchange.calculate_all_share_index(), 200.0, max_relative = 1e-12);

        exchange.add_stock(Stock::common("TEA", 1, 100));
        assert_relative_eq!(exchange.calculate_all_share_index(), 100.0, max_relative = 1e-12);
        assert_eq!(exchange.len(), 5);
    }

    #[test]
    fn summary_matches_exchange_index() {
        let mut exchange = sample_at_open();
        exchange
            .record_trade("ALE", 40, TradeIndicator::Buy, 60.0)
            .unwrap();
        exchange
            .record_trade("JOE", 10, TradeIndicator::Sell, 240.0)
            .unwrap();

        let summary = MarketSummary::compute(&exchange).unwrap();
        assert_relative_eq!(summary.all_share_index, 120.0, max_relative = 1e-12);
        assert_eq!(summary.traded_count(), 2);
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_symbol_is_not_found() {
        let mut exchange = sample_at_open();
        let err = exchange.get_stock("BEER").unwrap_err();
        assert!(err.is_not_found());
        let err = exchange
            .record_trade("BEER", 1, TradeIndicator::Buy, 1.0)
            .unwrap_err();
        assert!(matches!(err, GbceError::StockNotFound { ref symbol } if symbol == "BEER"));
    }

    #[test]
    fn invalid_trades_leave_history_untouched() {
        let mut exchange = sample_at_open();
        assert!(exchange
            .record_trade("GIN", 0, TradeIndicator::Buy, 100.0)
            .unwrap_err()
            .is_invalid_argument());
        assert!(exchange
            .record_trade("GIN", 10, TradeIndicator::Buy, 0.0)
            .unwrap_err()
            .is_invalid_argument());
        assert!(exchange.get_stock("GIN").unwrap().trades().is_empty());
    }

    #[test]
    fn dividend_yield_rejects_zero_and_negative_price_for_both_types() {
        let exchange = sample_at_open();
        for symbol in ["POP", "GIN"] {
            let stock = exchange.get_stock(symbol).unwrap();
            assert!(stock.calculate_dividend_yield(0.0).is_err());
            assert!(stock.calculate_dividend_yield(-1.0).is_err());
        }
    }
}
