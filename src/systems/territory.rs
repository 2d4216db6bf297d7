use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::{
    engine::{System, SystemContext},
    rng::SystemRng,
    world::{CountryId, World},
};

const WAR_CHANCE: f64 = 0.01;

/// Territory growth and war. Every person claims their current position
/// for their country each day; afterwards each country has a small chance
/// of losing its newest claim to a random rival.
pub struct TerritorySystem;

impl TerritorySystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerritorySystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for TerritorySystem {
    fn name(&self) -> &str {
        "territory"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        for i in 0..world.people.len() {
            let pos = world.people[i].pos;
            let id = world.people[i].country;
            if let Some(country) = world.country_mut(id) {
                country.territory.push(pos);
            }
        }

        let ids = world.country_ids();
        for attacker in &ids {
            if !rng.gen_bool(WAR_CHANCE) {
                continue;
            }
            let Some(target) = ids.choose(rng) else {
                continue;
            };
            transfer_tile(world, *attacker, *target);
        }
        Ok(())
    }
}

/// Move the attacker's most recent territory claim to the target. No-op
/// when the two are the same country or the attacker holds no territory.
pub fn transfer_tile(world: &mut World, from: CountryId, to: CountryId) {
    if from == to || world.country(to).is_none() {
        return;
    }
    let Some(tile) = world.country_mut(from).and_then(|c| c.territory.pop()) else {
        return;
    };
    if let Some(target) = world.country_mut(to) {
        target.territory.push(tile);
    }
}
