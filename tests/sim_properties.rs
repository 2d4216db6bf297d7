use hakoniwa::{
    engine::{Engine, EngineBuilder, EngineSettings},
    grid::{MapBounds, Vec2},
    scenario::ScenarioLoader,
    systems::{CombatSystem, MovementSystem, SettlementSystem, TerritorySystem},
    world::{Item, World},
};

fn scenario_loader() -> ScenarioLoader {
    ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"))
}

fn scenario_path() -> std::path::PathBuf {
    std::path::PathBuf::from("scenarios/toybox.yaml")
}

fn settings(seed: u64, speed: f64) -> EngineSettings {
    EngineSettings {
        scenario_name: "toybox".into(),
        seed,
        speed,
        day_duration: 0.8,
    }
}

fn full_engine(seed: u64, speed: f64) -> Engine {
    EngineBuilder::new(settings(seed, speed))
        .with_system(MovementSystem::new())
        .with_system(SettlementSystem::new())
        .with_system(CombatSystem::new())
        .with_system(TerritorySystem::new())
        .build()
}

fn combat_engine(seed: u64) -> Engine {
    EngineBuilder::new(settings(seed, 0.1))
        .with_system(CombatSystem::new())
        .build()
}

#[test]
fn sub_threshold_steps_change_nothing_but_the_clock() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();
    let mut world = scenario.build_world();
    let before = world.data();

    // 0.25 per step against a 0.8 day: three quiet steps, then a day.
    let mut engine = full_engine(scenario.seed, 0.25);
    for _ in 0..3 {
        let outcome = engine.step(&mut world).unwrap();
        assert!(!outcome.day_elapsed);
    }
    assert_eq!(world.data(), before, "no entity may move before the day fires");
    assert_eq!(world.year, 1);

    let outcome = engine.step(&mut world).unwrap();
    assert!(outcome.day_elapsed);
    assert_eq!(world.year, 2);
}

#[test]
fn positions_stay_inside_the_map() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();
    let mut world = scenario.build_world();
    let mut engine = full_engine(scenario.seed, scenario.speed);
    engine.run_days(&mut world, 200).unwrap();

    let bounds = world.bounds();
    for person in &world.people {
        assert!(
            bounds.contains(person.pos),
            "person escaped the map at {:?}",
            person.pos
        );
    }
    for enemy in &world.enemies {
        assert!(
            bounds.contains(enemy.pos),
            "enemy escaped the map at {:?}",
            enemy.pos
        );
    }
}

#[test]
fn same_seed_runs_are_identical() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();

    let mut world_a = scenario.build_world();
    let mut engine_a = full_engine(scenario.seed, scenario.speed);
    engine_a.run_days(&mut world_a, 50).unwrap();

    let mut world_b = scenario.build_world();
    let mut engine_b = full_engine(scenario.seed, scenario.speed);
    engine_b.run_days(&mut world_b, 50).unwrap();

    assert_eq!(world_a.data(), world_b.data());
}

#[test]
fn stronger_person_wears_an_enemy_down_and_recruits_it() {
    let mut world = World::new(MapBounds::new(800.0, 800.0));
    let country = world.found_country("山川".into(), "あいうえおかきくけこ".into(), 5, Vec::new());
    world.spawn_person(Vec2::new(100.0, 100.0), country);
    world.spawn_enemy(Vec2::new(110.0, 100.0));

    let mut engine = combat_engine(1);
    engine.run_days(&mut world, 1).unwrap();
    assert_eq!(world.enemies[0].hp, 40, "one exchange strikes for exactly 10");
    assert_eq!(world.people.len(), 1);

    engine.run_days(&mut world, 4).unwrap();
    assert!(world.enemies.is_empty(), "enemy should fall on the fifth exchange");
    assert_eq!(world.people.len(), 2, "a defeated enemy joins as a person");

    let recruit = &world.people[1];
    assert_eq!(recruit.pos, Vec2::new(110.0, 100.0));
    assert_eq!(recruit.hp, 100);
    assert_eq!(recruit.country, country);
}

#[test]
fn weaker_person_flees_and_pays_one_hp() {
    let mut world = World::new(MapBounds::new(800.0, 800.0));
    let country = world.found_country("海風".into(), "さしすせそたちつてと".into(), 5, Vec::new());
    world.spawn_person(Vec2::new(100.0, 100.0), country);
    world.people[0].hp = 30;
    world.spawn_enemy(Vec2::new(110.0, 100.0));

    let mut engine = combat_engine(1);
    engine.run_days(&mut world, 1).unwrap();

    assert_eq!(world.people[0].hp, 29);
    assert_eq!(world.people[0].pos, Vec2::new(99.0, 100.0), "flees 10% of the delta");
    assert_eq!(world.enemies[0].hp, 50, "a fleeing person deals no damage");
}

#[test]
fn hp_keeps_falling_below_zero_with_no_death() {
    let mut world = World::new(MapBounds::new(800.0, 800.0));
    let country = world.found_country("森星".into(), "なにぬねのはひふへほ".into(), 5, Vec::new());
    world.spawn_person(Vec2::new(100.0, 100.0), country);
    world.people[0].hp = 1;
    world.spawn_enemy(Vec2::new(110.0, 100.0));

    let mut engine = combat_engine(1);
    engine.run_days(&mut world, 3).unwrap();

    assert!(world.people[0].hp < 0, "hp is allowed to go negative");
    assert_eq!(world.people.len(), 1, "people are never removed");
}

#[test]
fn settlement_consumes_wood_into_houses() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();
    let mut world = scenario.build_world();
    for person in &mut world.people {
        person.inventory.push(Item::Wood);
    }

    let mut engine = EngineBuilder::new(settings(scenario.seed, scenario.speed))
        .with_system(SettlementSystem::new())
        .build();
    engine.run_days(&mut world, 200).unwrap();

    assert!(!world.structures.is_empty(), "200 days of 1% rolls should build");
    let wood_left: usize = world
        .people
        .iter()
        .map(|p| p.inventory.iter().filter(|i| **i == Item::Wood).count())
        .sum();
    assert_eq!(
        world.structures.len() + wood_left,
        50,
        "each house consumes exactly one wood"
    );
}

#[test]
fn settlement_spends_gold_on_new_countries() {
    let scenario = scenario_loader().load(scenario_path()).unwrap();
    let mut world = scenario.build_world();
    for person in &mut world.people {
        person.inventory.push(Item::Gold);
    }

    let mut engine = EngineBuilder::new(settings(scenario.seed, scenario.speed))
        .with_system(SettlementSystem::new())
        .build();
    engine.run_days(&mut world, 200).unwrap();

    assert!(world.countries.len() > 10, "200 days of 1% rolls should found");
    let gold_left: usize = world
        .people
        .iter()
        .map(|p| p.inventory.iter().filter(|i| **i == Item::Gold).count())
        .sum();
    assert_eq!(
        world.countries.len() - 10 + gold_left,
        50,
        "each founding consumes exactly one gold"
    );

    for (index, country) in world.countries.iter().enumerate() {
        assert_eq!(country.flag as usize, index + 1, "flag ids stay sequential");
    }
    for country in world.countries.iter().skip(10) {
        assert_eq!(country.population, 1);
        assert_eq!(country.territory.len(), 1, "new countries start on one tile");
        assert_eq!(country.name.chars().count(), 2);
        assert_eq!(country.culture.chars().count(), 10);
    }
}
