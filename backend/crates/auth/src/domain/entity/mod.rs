//! Domain Entities

pub mod principal;
