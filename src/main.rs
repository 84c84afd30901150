use chrono::{Days, NaiveDate, Utc};
use std::env;
use std::process;

use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use vending_eng::csv::{read_commands, write_report};
use vending_eng::model::{BananaColor, Category, Flavor, MilkKind, Temperature};
use vending_eng::{BeverageType, Catalog, Engine, EventKind, Money};

fn beverage(
    name: &str,
    brand: &str,
    price: u64,
    capacity: u32,
    today: NaiveDate,
    shelf_days: Option<u64>,
    category: Category,
) -> BeverageType {
    BeverageType {
        name: name.to_string(),
        brand: brand.to_string(),
        price: Money::new(price),
        capacity,
        manufactured: today,
        expires: shelf_days.and_then(|days| today.checked_add_days(Days::new(days))),
        category,
    }
}

/// Beverages the machine is stocked from, in button order.
fn machine_catalog(today: NaiveDate) -> Catalog {
    Catalog::new([
        beverage(
            "Cola",
            "Coca-Cola",
            1000,
            350,
            today,
            Some(365),
            Category::Soda { glycemic_index: 63 },
        ),
        beverage(
            "TOP Americano",
            "Maxim",
            1500,
            275,
            today,
            Some(180),
            Category::Coffee {
                temperature: Temperature::Hot,
            },
        ),
        beverage(
            "Organic Strawberry Milk",
            "Maeil",
            1200,
            125,
            today,
            Some(10),
            Category::Milk {
                fat_permille: 2,
                kind: MilkKind::Strawberry {
                    flavor: Flavor::Light,
                },
            },
        ),
        beverage(
            "Choco Milk",
            "Seoul Milk",
            900,
            200,
            today,
            Some(10),
            Category::Milk {
                fat_permille: 7,
                kind: MilkKind::Chocolate {
                    concentration_permille: 1,
                },
            },
        ),
        beverage(
            "Bananas Are Naturally White",
            "Maeil",
            1500,
            240,
            today,
            Some(10),
            Category::Milk {
                fat_permille: 4,
                kind: MilkKind::Banana {
                    color: BananaColor::White,
                },
            },
        ),
        beverage("Mineral Water", "Jeju", 600, 500, today, None, Category::Water),
    ])
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let path = env::args()
        .nth(1)
        .expect("usage: vending-eng <commands.csv>");

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let commands = match read_commands(path.clone()) {
        Ok(commands) => commands,
        Err(e) => {
            error!(path, "cannot open command file: {e}");
            process::exit(1);
        }
    };

    let mut engine = Engine::new(machine_catalog(Utc::now().date_naive()));
    engine.subscribe(EventKind::StockChanged, |event| {
        debug!(?event, "stock display refreshed");
        Ok(())
    });
    engine.subscribe(EventKind::BalanceChanged, |event| {
        debug!(?event, "balance display refreshed");
        Ok(())
    });

    let (cmd_sender, cmd_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in commands {
            match result {
                Ok(command) => {
                    if cmd_sender.send(command).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    engine.run(ReceiverStream::new(cmd_receiver)).await;

    info!(balance = %engine.balance(), sold = engine.sale_history().len(), "machine closed");
    write_report(&engine, std::io::stdout().lock()).expect("failed to write report");
}
