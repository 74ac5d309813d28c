/// Resolving selected upgrades into the active module of every slot
pub mod configuration;
/// Derived combat statistics for a ship build
pub mod derive;
/// Shell dispersion ellipse model
pub mod dispersion;
/// Error definitions
pub mod error;
/// Ship, module and ammunition records as read from game data
pub mod game_data;
/// Modifier effects and how they stack
pub mod modifiers;
/// Generic wrapper for values that may or may not match a known variant.
pub mod recognized;
/// Rate of fire, damage per minute and turret arrangement helpers
pub mod salvo;
/// Distance newtypes
pub mod units;
