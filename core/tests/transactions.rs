//! Transaction processor gates: balance conservation, cooldown
//! spacing, probability, conditions, insufficient-balance skips.

mod common;

use common::*;
use econsim_core::system::{ComparisonOp, TransactionCondition};

#[test]
fn executed_transfer_conserves_the_resource() {
    let sys = system(
        vec![resource("gold", 100.0, 0.0, 1000.0)],
        vec![
            actor("alice", &[("gold", 20.0)]),
            actor("bob", &[("gold", 0.0)]),
        ],
        vec![transfer("gift", "alice", "bob", &[("gold", 10.0)], 1.0, 0)],
    );
    let result = run(sys, scenario(1, vec![]), 1, 1);

    let alice = &result.summary.actor_stats["alice"];
    let bob = &result.summary.actor_stats["bob"];
    assert_eq!(alice.wealth_change, 10.0, "source loses the bundle");
    assert_eq!(bob.wealth_change, 10.0, "target gains the bundle");
    assert_eq!(
        alice.wealth_change + bob.wealth_change,
        20.0,
        "total across both actors is unchanged"
    );
    assert_eq!(alice.transaction_count, 1);
    assert_eq!(bob.transaction_count, 1);
    assert_eq!(result.summary.transaction_stats["gift"].count, 1);
}

#[test]
fn insufficient_balance_skips_instead_of_clamping() {
    // Alice starts with 20 gold and gives 10 per tick. Tick 1: 20->10,
    // tick 2: 10->0, tick 3: 0 < 10 so the transfer is skipped, not
    // partially applied.
    let sys = system(
        vec![resource("gold", 100.0, 0.0, 1000.0)],
        vec![
            actor("alice", &[("gold", 20.0)]),
            actor("bob", &[("gold", 0.0)]),
        ],
        vec![transfer("gift", "alice", "bob", &[("gold", 10.0)], 1.0, 0)],
    );
    let result = run(sys, scenario(3, vec![]), 1, 1);

    assert_eq!(result.summary.transaction_stats["gift"].count, 2);
    assert_eq!(result.summary.actor_stats["alice"].wealth_change, 0.0);
    assert_eq!(result.summary.actor_stats["bob"].wealth_change, 20.0);
}

#[test]
fn cooldown_spaces_out_executions() {
    // Cooldown 2 over 6 ticks: executions land on ticks 1, 3, 5.
    let sys = system(
        vec![resource("gold", 100.0, 0.0, 1000.0)],
        vec![
            actor("alice", &[("gold", 100.0)]),
            actor("bob", &[("gold", 0.0)]),
        ],
        vec![transfer("gift", "alice", "bob", &[("gold", 10.0)], 1.0, 2)],
    );
    let result = run(sys, scenario(6, vec![]), 1, 1);

    assert_eq!(result.summary.transaction_stats["gift"].count, 3);
    assert_eq!(result.summary.actor_stats["alice"].wealth_change, 70.0);
    assert_eq!(result.summary.actor_stats["bob"].wealth_change, 30.0);
}

#[test]
fn zero_probability_never_executes() {
    let sys = system(
        vec![resource("gold", 100.0, 0.0, 1000.0)],
        vec![
            actor("alice", &[("gold", 100.0)]),
            actor("bob", &[("gold", 0.0)]),
        ],
        vec![transfer("gift", "alice", "bob", &[("gold", 10.0)], 0.0, 0)],
    );
    let result = run(sys, scenario(5, vec![]), 1, 1);

    assert_eq!(result.summary.transaction_stats["gift"].count, 0);
    assert_eq!(result.summary.actor_stats["alice"].wealth_change, 100.0);
}

#[test]
fn time_elapsed_condition_gates_early_ticks() {
    let mut txn = transfer("gift", "alice", "bob", &[("gold", 10.0)], 1.0, 0);
    txn.conditions.push(TransactionCondition::TimeElapsed {
        operator: ComparisonOp::GreaterOrEqual,
        value: 3,
    });
    let sys = system(
        vec![resource("gold", 100.0, 0.0, 1000.0)],
        vec![
            actor("alice", &[("gold", 100.0)]),
            actor("bob", &[("gold", 0.0)]),
        ],
        vec![txn],
    );
    let result = run(sys, scenario(5, vec![]), 1, 1);

    // Eligible on ticks 3, 4, 5 only.
    assert_eq!(result.summary.transaction_stats["gift"].count, 3);
}

#[test]
fn resource_amount_condition_reads_the_system_pool() {
    // The pool starts at 10 and never reaches the 50 the condition
    // demands, so the transfer never fires even though the source
    // actor is flush.
    let mut txn = transfer("gift", "alice", "bob", &[("gold", 10.0)], 1.0, 0);
    txn.conditions.push(TransactionCondition::ResourceAmount {
        resource_id: "mana".into(),
        operator: ComparisonOp::Greater,
        value: 50.0,
    });
    let sys = system(
        vec![
            resource("gold", 100.0, 0.0, 1000.0),
            resource("mana", 10.0, 0.0, 1000.0),
        ],
        vec![
            actor("alice", &[("gold", 100.0)]),
            actor("bob", &[("gold", 0.0)]),
        ],
        vec![txn],
    );
    let result = run(sys, scenario(5, vec![]), 1, 1);

    assert_eq!(result.summary.transaction_stats["gift"].count, 0);
}

#[test]
fn negative_bundle_amounts_are_checked_against_the_target() {
    // A negative amount means the target gives to the source. Bob has
    // only 5 gold, the reverse flow wants 10, so nothing happens and
    // nobody goes negative.
    let sys = system(
        vec![resource("gold", 100.0, 0.0, 1000.0)],
        vec![
            actor("alice", &[("gold", 100.0)]),
            actor("bob", &[("gold", 5.0)]),
        ],
        vec![transfer("claw", "alice", "bob", &[("gold", -10.0)], 1.0, 0)],
    );
    let result = run(sys, scenario(3, vec![]), 1, 1);

    assert_eq!(result.summary.transaction_stats["claw"].count, 0);
    assert_eq!(result.summary.actor_stats["bob"].wealth_change, 5.0);
    assert_eq!(result.summary.actor_stats["alice"].wealth_change, 100.0);
}

#[test]
fn unknown_transaction_reference_fails_validation() {
    let sys = system(
        vec![resource("gold", 100.0, 0.0, 1000.0)],
        vec![actor("alice", &[("gold", 100.0)])],
        vec![transfer("gift", "alice", "ghost", &[("gold", 10.0)], 1.0, 0)],
    );
    let err = econsim_core::engine::SimEngine::new(
        sys,
        scenario(5, vec![]),
        econsim_core::config::RunSettings::default(),
    )
    .err()
    .expect("validation should fail");

    let message = err.to_string();
    assert!(
        message.contains("ghost"),
        "error should name the missing actor: {message}"
    );
}
