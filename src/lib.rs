// Canopy Calendar Library
// Exports all modules for the terminal client and tests

pub mod cli;
pub mod models;
pub mod services;
pub mod utils;
