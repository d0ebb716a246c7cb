use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tradeledger::prelude::*;

fn benchmark_trade_loop(c: &mut Criterion) {
    c.bench_function("buy_sell_1000", |b| {
        let prices = StaticPriceOracle::new().with_price("AAPL", 150.0);

        b.iter(|| {
            let mut account = AccountLedger::open("bench", 1_000_000.0).unwrap();

            for _ in 0..1000 {
                account
                    .buy_shares(black_box("AAPL"), black_box(1), &prices)
                    .unwrap();
                account
                    .sell_shares(black_box("AAPL"), black_box(1), &prices)
                    .unwrap();
            }
        });
    });
}

fn benchmark_summarize(c: &mut Criterion) {
    c.bench_function("summarize_50_holdings", |b| {
        let mut prices = StaticPriceOracle::new();
        let mut account = AccountLedger::open("bench", 10_000_000.0).unwrap();

        for i in 0..50 {
            let symbol = format!("SYM{}", i);
            prices.set_price(&symbol, 10.0 + i as f64);
            account.buy_shares(&symbol, 100, &prices).unwrap();
        }

        b.iter(|| {
            let summary = summarize(black_box(&account), &prices).unwrap();
            black_box(summary.total_portfolio_value)
        });
    });
}

fn benchmark_history(c: &mut Criterion) {
    c.bench_function("history_10000", |b| {
        let mut account = AccountLedger::open("bench", 1.0).unwrap();
        for _ in 0..9_999 {
            account.deposit(1.0).unwrap();
        }

        b.iter(|| black_box(account.history()).len());
    });
}

criterion_group!(
    benches,
    benchmark_trade_loop,
    benchmark_summarize,
    benchmark_history
);
criterion_main!(benches);
