//! Tapedeck console - headless stand-in for the player and capture screens

pub mod config;
pub mod engine;
pub mod error;
pub mod platform;
pub mod player;

pub use config::ConsoleConfig;
pub use engine::SimulatedEngine;
pub use error::{ConsoleError, Result};
pub use platform::{ArgumentPicker, ConfiguredGate};
pub use player::{run_player, PlayerCommand};
