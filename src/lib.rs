#[macro_use]
extern crate log;

pub mod config;
pub mod env;
pub mod formula;
pub mod generator;
pub mod output;
pub mod parser;
pub mod prelude;
pub mod report;
pub mod solver;

pub use solver::solve;

#[cfg(test)]
mod brute_force;
