//! Grid Defender - game core
//!
//! A base at the bottom of an 8x16 field shoots at falling obstacles. The
//! core is hardware-agnostic: it draws through [`render::Output`], takes
//! randomness from [`rng::RandomSource`] and time from [`clock::Clock`].
//! The RP2040 firmware in `main.rs` wires those to the Pico Display Pack.

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod config;
pub mod difficulty;
pub mod driver;
pub mod game;
pub mod input;
pub mod position;
pub mod render;
pub mod rng;
pub mod score;
pub mod store;

pub use clock::{Clock, TickCounter};
pub use config::Timing;
pub use driver::{GameLoop, Step};
pub use game::{Direction, Game, GameState, Outcome};
pub use input::{Button, Command, InputSource};
pub use position::{Cell, PackedPosition};
pub use render::{Colour, Output};
pub use rng::{RandomSource, Xorshift32};
