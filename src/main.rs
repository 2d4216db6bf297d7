use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use hakoniwa::{
    assets::AssetCatalog,
    engine::{EngineBuilder, EngineSettings},
    scenario::ScenarioLoader,
    snapshot::SaveStore,
    systems::{CombatSystem, MovementSystem, SettlementSystem, TerritorySystem},
    web,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "hakoniwa toy world runner")]
struct Cli {
    /// Path to the scenario YAML file
    #[arg(long, default_value = "scenarios/toybox.yaml")]
    scenario: PathBuf,

    /// Override the number of simulated days (uses scenario default when omitted)
    #[arg(long)]
    days: Option<u64>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding saved games
    #[arg(long, default_value = "saves")]
    save_dir: PathBuf,

    /// Load the saved game before running
    #[arg(long)]
    load: bool,

    /// Save the game after running
    #[arg(long)]
    save: bool,

    /// Texture directory; when set, the run is gated on the full sprite set
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Serve the web host instead of running headless
    #[arg(long)]
    serve: bool,

    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 8080)]
    port: u16,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ScenarioLoader::new(".");
    let mut scenario = loader.load(&cli.scenario)?;
    if let Some(seed) = cli.seed {
        scenario.seed = seed;
    }

    if cli.serve {
        let config = web::WebServerConfig {
            scenario,
            save_dir: cli.save_dir,
            assets_dir: cli.assets,
            host: cli.host,
            port: cli.port,
        };
        return tokio::runtime::Runtime::new()?.block_on(web::run(config));
    }

    if let Some(assets) = &cli.assets {
        AssetCatalog::new(assets).verify()?;
    }

    let mut world = scenario.build_world();
    let store = SaveStore::new(&cli.save_dir);
    if cli.load {
        store.load_into(&mut world)?;
    }

    let days = scenario.days(cli.days);
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

    engine.run_days(&mut world, days)?;

    if cli.save {
        store.save(&world)?;
    }

    println!(
        "Scenario '{}' ran for {} days. Year {}, season {}: {} countries, {} people, {} enemies left.",
        scenario.name,
        days,
        world.year,
        world.season.label(),
        world.countries.len(),
        world.people.len(),
        world.enemies.len()
    );
    Ok(())
}
