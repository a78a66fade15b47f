//! Property tests for the market engine
//!
//! These tests run mixed populations for many rounds and check the
//! invariants that must hold for every interaction: non-negative holdings,
//! positive price, the price-step law, unit conservation and determinism.

use abm::{
    Action, Agent, AgentId, AgentKind, Contrarian, Holdings, Market, MarketConfig, NullReporter,
    OptimizingPolicy, Policy, RandomPolicy, RoundRecord, RoundReport, SimError, TrendFollower,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const SEED: u64 = 42;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn mixed_population(rounds: u64) -> Vec<Agent> {
    let mut agents = Vec::new();
    let mut push = |policy: Policy| {
        let id = AgentId(agents.len());
        agents.push(Agent::new(id, Holdings::new(dec!(1000), 0).unwrap(), policy));
    };

    for _ in 0..10 {
        push(RandomPolicy::default().into());
    }
    for _ in 0..5 {
        push(TrendFollower::default().into());
    }
    for _ in 0..5 {
        push(Contrarian::default().into());
    }
    push(OptimizingPolicy::with_defaults(rounds).into());
    agents
}

fn mixed_market(rounds: i64, stock: i64, seed: u64) -> Market {
    let config = MarketConfig {
        initial_price: dec!(200),
        rounds,
        stock,
        seed: Some(seed),
    };
    Market::new(config)
        .unwrap()
        .with_agents(mixed_population(rounds as u64))
}

#[test]
fn test_holdings_and_price_stay_valid() {
    init_logging();
    let mut market = mixed_market(200, 50, SEED);
    market.run(&mut NullReporter).unwrap();

    for record in market.history() {
        assert!(record.capital >= Decimal::ZERO);
        assert!(record.price > Decimal::ZERO);
    }
}

#[test]
fn test_price_step_law() {
    let mut market = mixed_market(150, 30, SEED);
    market.run(&mut NullReporter).unwrap();

    let mut previous = (dec!(200), 30u64);
    for record in market.history() {
        let (old_price, old_stock) = previous;
        match (record.action, record.success) {
            (Action::Buy, true) => {
                assert_eq!(record.price, old_price * dec!(1.005));
                assert_eq!(record.stock, old_stock - 1);
            }
            (Action::Sell, true) => {
                assert_eq!(record.price, old_price * dec!(0.995));
                assert_eq!(record.stock, old_stock + 1);
            }
            _ => {
                assert_eq!(record.price, old_price);
                assert_eq!(record.stock, old_stock);
            }
        }
        previous = (record.price, record.stock);
    }
}

#[test]
fn test_units_are_conserved() {
    let mut market = mixed_market(100, 25, SEED);
    let initial = market.total_units();
    assert_eq!(initial, 25);

    while !market.is_finished() {
        market.run_round().unwrap();
        assert_eq!(market.total_units(), initial);
    }
}

#[test]
fn test_same_seed_same_history() {
    let mut market1 = mixed_market(100, 40, 999);
    let mut market2 = mixed_market(100, 40, 999);

    let mut reports1: Vec<RoundReport> = Vec::new();
    let mut reports2: Vec<RoundReport> = Vec::new();
    let summary1 = market1.run(&mut reports1).unwrap();
    let summary2 = market2.run(&mut reports2).unwrap();

    assert_eq!(reports1, reports2);
    assert_eq!(market1.history(), market2.history());
    assert_eq!(summary1, summary2);
}

#[test]
fn test_different_seeds_diverge() {
    let mut market1 = mixed_market(100, 40, 1);
    let mut market2 = mixed_market(100, 40, 2);
    market1.run(&mut NullReporter).unwrap();
    market2.run(&mut NullReporter).unwrap();

    let order1: Vec<AgentId> = market1.history().iter().map(|r| r.agent_id).collect();
    let order2: Vec<AgentId> = market2.history().iter().map(|r| r.agent_id).collect();
    assert_ne!(order1, order2);
}

#[test]
fn test_optimizing_agent_ends_flat() {
    let mut market = mixed_market(300, 1000, SEED);
    market.run(&mut NullReporter).unwrap();

    let optimizer = market
        .agents()
        .iter()
        .find(|a| a.kind() == AgentKind::Optimizing)
        .unwrap();
    assert_eq!(optimizer.inventory(), 0);
}

#[test]
fn test_optimizing_agent_unwinds_starting_inventory() {
    let agent = Agent::new(
        AgentId(0),
        Holdings::new(dec!(1000), 3).unwrap(),
        OptimizingPolicy::with_defaults(10),
    );
    let config = MarketConfig {
        initial_price: dec!(100),
        rounds: 10,
        stock: 0,
        seed: Some(SEED),
    };
    let mut market = Market::new(config).unwrap().with_agents([agent]);
    market.run(&mut NullReporter).unwrap();

    let actions: Vec<Action> = market.history().iter().map(|r| r.action).collect();
    assert_eq!(
        actions,
        vec![
            Action::DoNothing,
            Action::DoNothing,
            Action::DoNothing,
            Action::DoNothing,
            Action::DoNothing,
            Action::DoNothing,
            Action::Sell,
            Action::Sell,
            Action::Sell,
            Action::DoNothing,
        ]
    );
    assert_eq!(market.agents()[0].inventory(), 0);
    assert_eq!(market.stock(), 3);
}

#[test]
fn test_single_forced_buy_scenario() {
    let buyer = Agent::new(
        AgentId(0),
        Holdings::new(dec!(1000), 0).unwrap(),
        RandomPolicy::always(Action::Buy),
    );
    let config = MarketConfig {
        initial_price: dec!(200),
        rounds: 2,
        stock: 1,
        seed: Some(SEED),
    };
    let mut market = Market::new(config).unwrap().with_agents([buyer]);

    let first = market.run_round().unwrap();
    assert_eq!(
        first.records[0],
        RoundRecord {
            round: 0,
            interaction: 1,
            agent_id: AgentId(0),
            kind: AgentKind::Random,
            capital: dec!(800),
            inventory: 1,
            action: Action::Buy,
            success: true,
            stock: 0,
            price: dec!(201.00),
        }
    );

    // Stock exhausted: recorded as a failed buy, nothing moves
    let second = market.run_round().unwrap();
    let record = &second.records[0];
    assert_eq!(record.action, Action::Buy);
    assert!(!record.success);
    assert_eq!(record.capital, dec!(800));
    assert_eq!(record.inventory, 1);
    assert_eq!(record.stock, 0);
    assert_eq!(record.price, dec!(201));
}

#[test]
fn test_zero_round_market_is_untouched() {
    let mut market = mixed_market(0, 10, SEED);
    let summary = market.run(&mut NullReporter).unwrap();

    assert!(market.history().is_empty());
    assert_eq!(market.price(), dec!(200));
    assert_eq!(market.stock(), 10);
    assert_eq!(summary.total_fills, 0);
}

#[test]
fn test_rejecting_reporter_aborts_run() {
    struct Failing;

    impl abm::RoundReporter for Failing {
        fn report(&mut self, report: &RoundReport) -> abm::SimResult<()> {
            if report.round == 2 {
                return Err(SimError::Report("sink closed".to_string()));
            }
            Ok(())
        }
    }

    let mut market = mixed_market(10, 10, SEED);
    let err = market.run(&mut Failing).unwrap_err();

    assert_eq!(err, SimError::Report("sink closed".to_string()));
    assert_eq!(market.current_round(), 3);
}
