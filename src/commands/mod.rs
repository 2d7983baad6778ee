//! Command handlers for the pitchstats CLI.

pub mod common;
pub mod index;
pub mod player_stats;
pub mod regenerate;

pub use index::handle_index;
pub use player_stats::handle_player_stats;
pub use regenerate::handle_regenerate;
