use hakoniwa::{
    engine::{EngineBuilder, EngineSettings},
    scenario::ScenarioLoader,
    systems::{CombatSystem, MovementSystem, SettlementSystem, TerritorySystem},
};

#[test]
fn engine_runs_hook_each_day() {
    let loader = ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"));
    let scenario = loader
        .load("scenarios/toybox.yaml")
        .expect("scenario should load");
    let mut world = scenario.build_world();
    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: scenario.seed,
        speed: scenario.speed,
        day_duration: scenario.day_duration,
    };
    let mut engine = EngineBuilder::new(settings)
        .with_system(MovementSystem::new())
        .with_system(SettlementSystem::new())
        .with_system(CombatSystem::new())
        .with_system(TerritorySystem::new())
        .build();

    let mut years = Vec::new();
    engine
        .run_days_with_hook(&mut world, 6, |frame| years.push(frame.year))
        .expect("run succeeds");

    assert_eq!(years.len(), 6);
    assert_eq!(years.first().copied(), Some(2));
    assert_eq!(years.last().copied(), Some(7));
}
