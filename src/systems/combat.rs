use anyhow::Result;

use crate::{
    engine::{System, SystemContext},
    grid::SpatialIndex,
    rng::SystemRng,
    world::World,
};

const ENGAGE_RADIUS: f32 = 20.0;
const STRIKE_DAMAGE: i32 = 10;
const FLEE_STEP: f32 = 0.1;
const FLEE_HP_COST: i32 = 1;

/// Person/enemy engagements. The exchange itself is deterministic: the
/// higher-hp side wins, so this system draws no randomness.
pub struct CombatSystem;

impl CombatSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CombatSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for CombatSystem {
    fn name(&self) -> &str {
        "combat"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        _rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let bounds = world.bounds();
        let mut index = SpatialIndex::new(ENGAGE_RADIUS);
        for enemy in &world.enemies {
            index.insert(enemy.pos, enemy.id);
        }

        // People converted from defeated enemies join mid-pass and first
        // act the next day.
        let present = world.people.len();
        for i in 0..present {
            let mut pos = world.people[i].pos;
            let mut hp = world.people[i].hp;
            let country = world.people[i].country;

            for id in index.query_circle(pos, ENGAGE_RADIUS) {
                // Already defeated by an earlier person this pass.
                let Some(enemy) = world.enemy_mut(id) else {
                    continue;
                };
                let delta = enemy.pos - pos;
                if delta.length() >= ENGAGE_RADIUS {
                    continue;
                }
                if hp > enemy.hp {
                    enemy.hp -= STRIKE_DAMAGE;
                    if enemy.hp <= 0 {
                        let spawn_at = enemy.pos;
                        world.remove_enemy(id);
                        world.spawn_person(spawn_at, country);
                    }
                } else {
                    pos = bounds.clamp(pos - delta * FLEE_STEP);
                    hp -= FLEE_HP_COST;
                }
            }

            let person = &mut world.people[i];
            person.pos = pos;
            person.hp = hp;
        }
        Ok(())
    }
}
