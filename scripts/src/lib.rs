//! Scripts for deploying and wiring together the Zecrey Legend smart contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;
pub mod solidity;
pub mod types;
pub mod utils;
pub mod zns;
