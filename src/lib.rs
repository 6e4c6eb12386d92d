//! Relay that lets game servers change a player's role in a cloud-hosted group.

pub mod cloud;
pub mod commons;
pub mod config;
pub mod dto;
pub mod http;
pub mod logic;
