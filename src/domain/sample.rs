//! Sample exchange with the five reference stocks.

use super::exchange::Exchange;
use super::stock::Stock;
use crate::ports::clock_port::ClockPort;

pub fn sample_stocks() -> Vec<Stock> {
    vec![
        Stock::common("TEA", 0, 100),
        Stock::common("POP", 8, 100),
        Stock::common("ALE", 23, 60),
        Stock::preferred("GIN", 8, 0.02, 100),
        Stock::common("JOE", 13, 250),
    ]
}

pub fn sample_exchange<C: ClockPort>(clock: C) -> Exchange<C> {
    let mut exchange = Exchange::new(clock);
    for stock in sample_stocks() {
        exchange.add_stock(stock);
    }
    exchange
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::system_clock::SystemClock;
    use crate::domain::stock::StockType;

    #[test]
    fn sample_has_five_stocks_in_order() {
        let exchange = sample_exchange(SystemClock);
        let symbols: Vec<&str> = exchange.get_all_stocks().iter().map(|s| s.symbol()).collect();
        assert_eq!(symbols, vec!["TEA", "POP", "ALE", "GIN", "JOE"]);
    }

    #[test]
    fn gin_is_the_only_preferred_stock() {
        let exchange = sample_exchange(SystemClock);
        let gin = exchange.get_stock("GIN").unwrap();
        assert_eq!(gin.stock_type(), StockType::Preferred);
        assert_eq!(gin.fixed_dividend(), Some(0.02));
        assert_eq!(gin.par_value(), 100);
        let preferred = exchange
            .get_all_stocks()
            .iter()
            .filter(|s| s.stock_type() == StockType::Preferred)
            .count();
        assert_eq!(preferred, 1);
    }

    #[test]
    fn ale_dividend_and_par() {
        let exchange = sample_exchange(SystemClock);
        let ale = exchange.get_stock("ALE").unwrap();
        assert_eq!(ale.last_dividend(), 23);
        assert_eq!(ale.par_value(), 60);
        assert_eq!(ale.fixed_dividend(), None);
    }

    #[test]
    fn sample_stocks_start_without_trades() {
        assert!(sample_stocks().iter().all(|s| s.trades().is_empty()));
    }
}
