use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vending_eng::model::{Category, Temperature};
use vending_eng::{BeverageType, Catalog, CatalogIndex, Command, Engine, Money};

fn catalog(size: usize) -> Catalog {
    let manufactured = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    Catalog::new((0..size).map(|i| BeverageType {
        name: format!("beverage-{i}"),
        brand: "bench".to_string(),
        price: Money::new(500 + 100 * i as u64),
        capacity: 250,
        manufactured,
        expires: manufactured.checked_add_days(chrono::Days::new(i as u64 * 30)),
        category: if i % 2 == 0 {
            Category::Coffee {
                temperature: Temperature::Hot,
            }
        } else {
            Category::Soda { glycemic_index: 60 }
        },
    }))
}

/// Generates valid command sequences for benchmarking.
///
/// Pattern per round, cycling through the catalog:
/// 1. Supply 10 units
/// 2. Insert enough coins for 5 units
/// 3. Buy 5 units
///
/// Stock grows by 5 units per round and no purchase is ever rejected.
pub struct CommandGenerator {
    catalog_size: usize,
    rounds: u32,
    round: u32,
    step: u32,
}

impl CommandGenerator {
    const SUPPLY: u64 = 10;
    const BUYS: u32 = 5;

    pub fn new(catalog_size: usize, rounds: u32) -> Self {
        Self {
            catalog_size,
            rounds,
            round: 0,
            step: 0,
        }
    }

    fn index(&self) -> CatalogIndex {
        self.round as usize % self.catalog_size
    }
}

impl Iterator for CommandGenerator {
    type Item = Command;

    fn next(&mut self) -> Option<Self::Item> {
        if self.round >= self.rounds {
            return None;
        }

        let index = self.index();
        let command = match self.step {
            0 => Command::Supply {
                index,
                amount: Self::SUPPLY,
            },
            1 => Command::InsertCoin {
                amount: (500 + 100 * index as u64) * Self::BUYS as u64,
            },
            _ => Command::Buy { index },
        };

        self.step += 1;
        if self.step >= 2 + Self::BUYS {
            self.step = 0;
            self.round += 1;
        }

        Some(command)
    }
}

fn bench_supply_and_buy(c: &mut Criterion) {
    let mut group = c.benchmark_group("supply_and_buy");

    for rounds in [100u32, 1_000, 5_000] {
        group.bench_with_input(BenchmarkId::from_parameter(rounds), &rounds, |b, &rounds| {
            b.iter(|| {
                let mut engine = Engine::new(catalog(8));
                for command in CommandGenerator::new(8, rounds) {
                    let _ = black_box(engine.apply(command));
                }
                engine
            });
        });
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    let mut engine = Engine::new(catalog(16));
    for command in CommandGenerator::new(16, 2_000) {
        let _ = engine.apply(command);
    }
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    group.bench_function("stock_counts", |b| b.iter(|| black_box(engine.stock_counts())));
    group.bench_function("expired_types", |b| {
        b.iter(|| black_box(engine.expired_types_at(today)))
    });
    group.bench_function("hot_types", |b| b.iter(|| black_box(engine.hot_types())));
    group.bench_function("buyable_types", |b| {
        b.iter(|| black_box(engine.buyable_types()))
    });

    group.finish();
}

criterion_group!(benches, bench_supply_and_buy, bench_queries);
criterion_main!(benches);
