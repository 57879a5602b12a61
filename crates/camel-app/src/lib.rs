//! Application service layer - ledger manager, config, store wiring

pub mod app;
pub mod config;
pub mod repository;
