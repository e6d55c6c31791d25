//! Grid snake hunting frogs: tick engine, scheduler and a ratatui front end.

pub mod config;
pub mod driver;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod scheduler;
pub mod sink;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
