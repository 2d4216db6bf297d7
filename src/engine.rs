use anyhow::Result;

use crate::rng::{RngManager, SystemRng};
use crate::world::{RenderFrame, World};

pub struct EngineSettings {
    pub scenario_name: String,
    pub seed: u64,
    /// Day-clock advance per host step.
    pub speed: f64,
    /// Accumulated speed at which one simulated day elapses.
    pub day_duration: f64,
}

pub struct EngineBuilder {
    settings: EngineSettings,
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            systems: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn push_system(&mut self, system: impl System + 'static) {
        self.systems.push(Box::new(system));
    }

    pub fn build(self) -> Engine {
        Engine {
            rng: RngManager::new(self.settings.seed),
            systems: self.systems,
            settings: self.settings,
            clock: 0.0,
        }
    }
}

pub struct Engine {
    rng: RngManager,
    systems: Vec<Box<dyn System>>,
    settings: EngineSettings,
    clock: f64,
}

impl Engine {
    /// One host callback. Accumulates `speed` on the day clock; when it
    /// crosses the day duration, resets the clock and runs one simulated
    /// day. Sub-threshold steps touch nothing but the clock.
    pub fn step(&mut self, world: &mut World) -> Result<StepOutcome> {
        self.clock += self.settings.speed;
        let mut day_elapsed = false;
        if self.clock >= self.settings.day_duration {
            self.clock = 0.0;
            self.advance_day(world)?;
            day_elapsed = true;
        }
        Ok(StepOutcome {
            day_elapsed,
            year: world.year,
        })
    }

    /// Force `days` simulated days, ignoring the clock. Headless runs and
    /// tests drive the world through this.
    pub fn run_days(&mut self, world: &mut World, days: u64) -> Result<()> {
        for _ in 0..days {
            self.advance_day(world)?;
        }
        Ok(())
    }

    pub fn run_days_with_hook(
        &mut self,
        world: &mut World,
        days: u64,
        mut hook: impl FnMut(RenderFrame),
    ) -> Result<()> {
        for _ in 0..days {
            self.advance_day(world)?;
            hook(world.frame());
        }
        Ok(())
    }

    fn advance_day(&mut self, world: &mut World) -> Result<()> {
        let year = world.year;
        for system in &mut self.systems {
            let ctx = SystemContext {
                year,
                scenario_name: &self.settings.scenario_name,
            };
            let mut rng_stream = self.rng.stream(system.name());
            system.run(&ctx, world, &mut rng_stream)?;
        }
        world.advance_year();
        Ok(())
    }

    pub fn speed(&self) -> f64 {
        self.settings.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.settings.speed = speed;
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Stream backing host-driven edits (random country assignment on
    /// character placement), kept apart from the system streams.
    pub fn edit_rng(&mut self) -> SystemRng<'_> {
        self.rng.stream("edit")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StepOutcome {
    pub day_elapsed: bool,
    pub year: u64,
}

pub struct SystemContext<'a> {
    pub year: u64,
    pub scenario_name: &'a str,
}

pub trait System: Send {
    fn name(&self) -> &str;
    fn run(
        &mut self,
        ctx: &SystemContext,
        world: &mut World,
        rng: &mut SystemRng<'_>,
    ) -> Result<()>;
}
