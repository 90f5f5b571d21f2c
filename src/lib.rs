//! Research profile dashboard: a typed table filter/aggregation engine, the
//! pure view pipeline over it, and the profile/configuration types the
//! desktop application renders.

pub mod config;
pub mod data;
pub mod profile;
pub mod view;
