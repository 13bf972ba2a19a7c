//! Seed a demo exchange with a realistic order history: deposits for two
//! users, one cancelled order, three filled orders, and a batch of open
//! orders on both sides of the book.
//!
//! Run with `cargo run --example seed`.

use exchange::{Exchange, Token};
use types::ids::{AccountId, OrderId};

const DECIMALS: u8 = 18;

/// Whole tokens in smallest units.
fn tokens(n: u128) -> u128 {
    n * 10u128.pow(DECIMALS as u32)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let deployer = AccountId::new();
    let fee_account = AccountId::new();
    let user1 = AccountId::new();
    let user2 = AccountId::new();

    let mut dapp = Token::new("Dapp Token", "DAPP", DECIMALS, tokens(1_000_000), deployer);
    let mut meth = Token::new("Mock Ether", "mETH", DECIMALS, tokens(1_000_000), deployer);

    dapp.transfer(deployer, user1, tokens(100_000)).unwrap();
    meth.transfer(deployer, user2, tokens(100_000)).unwrap();

    let mut engine = Exchange::new(fee_account, 10);
    let mut now = 1_708_123_456i64;

    // Both users escrow their holdings
    dapp.approve(user1, engine.account(), tokens(10_000)).unwrap();
    engine.deposit(&mut dapp, user1, tokens(10_000)).unwrap();
    meth.approve(user2, engine.account(), tokens(10_000)).unwrap();
    engine.deposit(&mut meth, user2, tokens(10_000)).unwrap();

    // A cancelled order
    engine
        .make_order("mETH", tokens(100), "DAPP", tokens(5), user1, now)
        .unwrap();
    engine.cancel_order(OrderId::new(1), user1, now).unwrap();
    now += 1;

    // Three filled orders
    for (get, give) in [(100, 10), (50, 15), (200, 20)] {
        let event = engine
            .make_order("mETH", tokens(get), "DAPP", tokens(give), user1, now)
            .unwrap();
        let id = match event {
            exchange::events::ExchangeEvent::OrderCreated(o) => o.id,
            _ => unreachable!(),
        };
        engine.fill_order(id, user2, now).unwrap();
        now += 1;
    }

    // Ten open orders on each side of the book
    for i in 1..=10u128 {
        engine
            .make_order("mETH", tokens(10 * i), "DAPP", tokens(10), user1, now)
            .unwrap();
        now += 1;
    }
    for i in 1..=10u128 {
        engine
            .make_order("DAPP", tokens(10), "mETH", tokens(10 * i), user2, now)
            .unwrap();
        now += 1;
    }

    println!("orders created: {}", engine.order_count());
    println!(
        "fee account holds {} mETH units",
        engine.balance_of("mETH", &fee_account)
    );
    for event in engine.drain_events() {
        println!("{}", serde_json::to_string(&event).unwrap());
    }
}
