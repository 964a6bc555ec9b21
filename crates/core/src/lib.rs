//! Domain logic for the learning management service.
//!
//! Everything in this crate is pure: no database access and no HTTP types.
//! The `db` crate persists these types and the `api` crate wires them to
//! requests.

pub mod assessment;
pub mod course;
pub mod enrollment;
pub mod error;
pub mod material;
pub mod pagination;
pub mod policy;
pub mod roles;
pub mod types;
pub mod viewer;
