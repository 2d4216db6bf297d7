use anyhow::Result;
use rand::Rng;

use crate::{
    engine::{System, SystemContext},
    grid::Vec2,
    rng::SystemRng,
    world::World,
};

const WALK_RANGE: f32 = 5.0;

pub struct MovementSystem;

impl MovementSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MovementSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }

    fn run(
        &mut self,
        _ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()> {
        let bounds = world.bounds();
        for person in &mut world.people {
            let step = Vec2::new(
                rng.gen_range(-WALK_RANGE..WALK_RANGE),
                rng.gen_range(-WALK_RANGE..WALK_RANGE),
            );
            person.pos = bounds.clamp(person.pos + step);
        }
        Ok(())
    }
}
