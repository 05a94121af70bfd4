//! A CHIP-8 virtual machine.
//!
//! [`Chip8`] owns memory, registers, timers, the framebuffer and the keypad.
//! Something outside it calls [`Chip8::step`] to run instructions and
//! [`Chip8::tick_timers`] at 60 Hz; [`driver::Chip8Driver`] does both for a
//! [`frontend::Chip8Frontend`].

pub mod config;
pub mod display;
pub mod driver;
pub mod emulator;
pub mod errors;
pub mod frontend;
pub mod input;
pub mod instructions;
pub mod keymap;
pub mod memory;
pub mod registers;
pub mod timers;

pub use config::{Config, Quirks, ShiftSource, SpriteEdges, UnknownOpcodePolicy};
pub use display::{Framebuffer, PixelGrid, DISPLAY_COLUMNS, DISPLAY_ROWS};
pub use emulator::{Chip8, StepResult};
pub use errors::{Chip8Error, LoadError};
pub use input::InputEvent;
pub use instructions::Instruction;
