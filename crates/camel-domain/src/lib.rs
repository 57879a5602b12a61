//! Domain layer for the camel weigh-station ledger
//!
//! Holds the persisted record type, the transient entry form, the traits the
//! ledger consumes from its collaborators, and the pure calculation, alarm and
//! search services.

pub mod model;
pub mod provider;
pub mod repository;
pub mod service;
