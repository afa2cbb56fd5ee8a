//! Core types, errors, and configuration shared by every battle component

pub mod config;
pub mod error;
pub mod types;
