//! Core types and definitions for the COGFRONT simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! health, commands, state snapshots, events, collaborator services,
//! configuration and constants. It has no dependency on the ECS or any
//! runtime framework.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod health;
pub mod services;
pub mod state;
pub mod types;

pub use health::{DamageResult, Health};

#[cfg(test)]
mod tests;
