//! Builders shared by the integration tests.

use econsim_core::{
    config::RunSettings,
    engine::SimEngine,
    result::SimulationResult,
    scenario::{ScenarioEvent, SimulationScenario},
    system::{ActorBehavior, ActorDef, ActorType, EconomySystem, ResourceDef, TransactionDef},
    types::Tick,
};

pub fn resource(id: &str, initial: f64, regen: f64, max: f64) -> ResourceDef {
    ResourceDef {
        id: id.into(),
        name: id.into(),
        initial_amount: initial,
        regeneration_rate: regen,
        max_amount: max,
    }
}

pub fn actor(id: &str, holdings: &[(&str, f64)]) -> ActorDef {
    ActorDef {
        id: id.into(),
        name: id.into(),
        actor_type: ActorType::Npc,
        resources: holdings.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        behavior: ActorBehavior::default(),
    }
}

pub fn transfer(
    id: &str,
    source: &str,
    target: &str,
    bundle: &[(&str, f64)],
    probability: f64,
    cooldown: Tick,
) -> TransactionDef {
    TransactionDef {
        id: id.into(),
        source_actor_id: source.into(),
        target_actor_id: target.into(),
        resources: bundle.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        conditions: vec![],
        probability,
        cooldown,
    }
}

pub fn system(
    resources: Vec<ResourceDef>,
    actors: Vec<ActorDef>,
    transactions: Vec<TransactionDef>,
) -> EconomySystem {
    EconomySystem {
        id: "sys".into(),
        name: "test system".into(),
        resources,
        actors,
        transactions,
    }
}

pub fn scenario(duration: Tick, events: Vec<ScenarioEvent>) -> SimulationScenario {
    SimulationScenario {
        id: "scn".into(),
        name: "test scenario".into(),
        system_id: "sys".into(),
        duration,
        events,
    }
}

pub fn run(
    system: EconomySystem,
    scenario: SimulationScenario,
    seed: u64,
    iterations: u32,
) -> SimulationResult {
    let _ = env_logger::builder().is_test(true).try_init();
    SimEngine::new(system, scenario, RunSettings { seed, iterations })
        .expect("engine construction")
        .run()
        .expect("run")
}
