//! # IO Module
//!
//! Adapters between external data shapes and the domain.
//!
//! The remote dashboard arrives as the JSON DTOs defined in the `shared`
//! crate; [`DashboardRemoteMapper`] turns them into domain entities without
//! ever failing on malformed optional data.

pub mod remote_mapper;

pub use remote_mapper::DashboardRemoteMapper;
