// src/services/mod.rs

pub mod acquirer;
pub mod backtest;
pub mod cache;
pub mod chain;
pub mod demo;
pub mod indicators;
pub mod sources;
