mod combat;
mod movement;
mod settlement;
mod territory;

pub use combat::CombatSystem;
pub use movement::MovementSystem;
pub use settlement::SettlementSystem;
pub use territory::{transfer_tile, TerritorySystem};
