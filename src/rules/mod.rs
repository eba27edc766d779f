//! Rules services consumed by the turn resolver.
//!
//! - [`WordRules`]: checks submitted words and searches for best moves
//! - [`RackDrawer`]: supplies racks and signals the end of the game
//! - [`RandomDrawer`]: the bundled drawer, drawing from the bag
//!
//! The engine calls into these traits but never interprets words, squares
//! or scores directly.

pub mod drawer;
pub mod engine;

pub use drawer::RandomDrawer;
pub use engine::{EndOfGame, RackDrawer, WordRules};
