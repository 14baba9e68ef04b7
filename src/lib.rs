//! VitaTrack Library
//!
//! Supplement intake tracking and nutrient reference analysis.

pub mod analysis;
pub mod build_info;
pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod reference;
pub mod sources;
pub mod tools;
