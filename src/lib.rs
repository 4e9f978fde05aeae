//! ceelo - Cee-lo dice combat engine
//!
//! A roguelike run of dice duels: the player and an enemy trade Cee-lo
//! rolls each round, and gold from victories buys powerups that bias the
//! dice and the fight.

pub mod combat;
pub mod config;
pub mod dice;
pub mod economy;
pub mod engine;
pub mod error;
pub mod events;
pub mod state;
pub mod turn;

pub use config::EngineConfig;
pub use engine::{Engine, Step};
pub use error::EngineError;
pub use events::{Actor, EventLog, GameEvent};
pub use state::RunState;
pub use turn::Phase;
