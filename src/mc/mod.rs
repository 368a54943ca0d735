pub mod payoffs;
pub mod simulator;
