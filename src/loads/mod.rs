//! Deck loads and force vector assembly

mod deck_load;

pub use deck_load::{assign_deck_loads, DeckLoad, UniformDeckLoad};
