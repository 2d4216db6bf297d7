use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::grid::{MapBounds, Vec2, TILE_SIZE};
use crate::names;
use crate::rng::RngManager;
use crate::world::{Resource, ResourceKind, World};

fn default_map_width() -> f32 {
    800.0
}

fn default_map_height() -> f32 {
    800.0
}

fn default_countries() -> u32 {
    10
}

fn default_people() -> u32 {
    50
}

fn default_resources() -> u32 {
    100
}

fn default_enemies() -> u32 {
    20
}

fn default_day_duration() -> f64 {
    0.8
}

fn default_speed() -> f64 {
    0.1
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub seed: u64,
    #[serde(default = "default_map_width")]
    pub map_width: f32,
    #[serde(default = "default_map_height")]
    pub map_height: f32,
    #[serde(default = "default_countries")]
    pub countries: u32,
    #[serde(default = "default_people")]
    pub people: u32,
    #[serde(default = "default_resources")]
    pub resources: u32,
    #[serde(default = "default_enemies")]
    pub enemies: u32,
    /// Accumulated speed needed before one simulated day elapses.
    #[serde(default = "default_day_duration")]
    pub day_duration: f64,
    /// Speed added to the day clock per host step.
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default)]
    pub days: Option<u64>,
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    /// Populate a fresh world: countries, people, resources, enemies, all
    /// drawn from the scenario seed's "worldgen" stream.
    pub fn build_world(&self) -> World {
        let mut manager = RngManager::new(self.seed);
        let mut rng = manager.stream("worldgen");
        let mut world = World::new(MapBounds::new(self.map_width, self.map_height));

        for _ in 0..self.countries {
            let name = names::country_name(&mut rng);
            let culture = names::culture(&mut rng);
            let population = rng.gen_range(50..150);
            let territory = random_territory(&mut rng);
            world.found_country(name, culture, population, territory);
        }

        let country_ids = world.country_ids();
        if !country_ids.is_empty() {
            for _ in 0..self.people {
                let pos = Vec2::new(
                    rng.gen_range(0.0..self.map_width),
                    rng.gen_range(0.0..self.map_height),
                );
                let country = *country_ids
                    .choose(&mut rng)
                    .expect("country list is non-empty");
                world.spawn_person(pos, country);
            }
        }

        for _ in 0..self.resources {
            let kind = *ResourceKind::ALL
                .choose(&mut rng)
                .expect("resource kinds are non-empty");
            // Procedural placement is continuous; only user edits snap.
            let pos = Vec2::new(
                rng.gen_range(0.0..self.map_width),
                rng.gen_range(0.0..self.map_height),
            );
            world.resources.push(Resource { kind, pos });
        }

        for _ in 0..self.enemies {
            let pos = Vec2::new(
                rng.gen_range(0.0..self.map_width),
                rng.gen_range(0.0..self.map_height),
            );
            world.spawn_enemy(pos);
        }

        world
    }

    pub fn days(&self, override_days: Option<u64>) -> u64 {
        override_days.or(self.days).unwrap_or(100)
    }
}

/// A cluster of 5..15 tiles scattered over the 3x3 tile neighborhood of a
/// random grid-aligned center. Duplicate tiles are expected.
fn random_territory(rng: &mut impl Rng) -> Vec<Vec2> {
    let center_x = rng.gen_range(0..50) as f32 * TILE_SIZE;
    let center_y = rng.gen_range(0..50) as f32 * TILE_SIZE;
    let size = rng.gen_range(5..15);
    (0..size)
        .map(|_| {
            Vec2::new(
                center_x + (rng.gen_range(0..3) - 1) as f32 * TILE_SIZE,
                center_y + (rng.gen_range(0..3) - 1) as f32 * TILE_SIZE,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Scenario {
        Scenario {
            name: "unit".into(),
            description: None,
            seed: 42,
            map_width: default_map_width(),
            map_height: default_map_height(),
            countries: default_countries(),
            people: default_people(),
            resources: default_resources(),
            enemies: default_enemies(),
            day_duration: default_day_duration(),
            speed: default_speed(),
            days: None,
        }
    }

    #[test]
    fn build_world_matches_configured_counts() {
        let world = scenario().build_world();
        assert_eq!(world.countries.len(), 10);
        assert_eq!(world.people.len(), 50);
        assert_eq!(world.resources.len(), 100);
        assert_eq!(world.enemies.len(), 20);
        assert_eq!(world.year, 1);
    }

    #[test]
    fn build_world_is_deterministic_per_seed() {
        let a = scenario().build_world();
        let b = scenario().build_world();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn territories_start_within_the_spawn_field() {
        let world = scenario().build_world();
        for country in &world.countries {
            assert!(!country.territory.is_empty());
            for tile in &country.territory {
                assert!(tile.x >= -TILE_SIZE && tile.x <= 50.0 * TILE_SIZE);
                assert!(tile.y >= -TILE_SIZE && tile.y <= 50.0 * TILE_SIZE);
            }
        }
    }
}
