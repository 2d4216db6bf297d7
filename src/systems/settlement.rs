use anyhow::Result;
use rand::Rng;

use crate::{
    engine::{System, SystemContext},
    names,
    rng::SystemRng,
    world::{Item, Structure, StructureKind, World},
};

const BUILD_CHANCE: f64 = 0.01;
const FOUND_CHANCE: f64 = 0.01;

/// Houses and new countries. Each day every person rolls both chances;
/// the roll comes before the inventory check, so the draw count per person
/// is fixed regardless of what they carry.
pub struct SettlementSystem;

impl SettlementSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SettlementSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for SettlementSystem {
    fn name(&self) -> &str {
        "settlement"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        for i in 0..world.people.len() {
            if rng.gen_bool(BUILD_CHANCE) {
                let person = &mut world.people[i];
                if let Some(slot) = person.inventory.iter().position(|item| *item == Item::Wood) {
                    person.inventory.remove(slot);
                    let pos = person.pos;
                    world.structures.push(Structure {
                        kind: StructureKind::House,
                        pos,
                    });
                }
            }

            if rng.gen_bool(FOUND_CHANCE) {
                let person = &world.people[i];
                if let Some(slot) = person.inventory.iter().position(|item| *item == Item::Gold) {
                    let pos = person.pos;
                    let name = names::country_name(rng);
                    let culture = names::culture(rng);
                    let id = world.found_country(name, culture, 1, vec![pos]);
                    let person = &mut world.people[i];
                    person.inventory.remove(slot);
                    person.country = id;
                }
            }
        }
        Ok(())
    }
}
