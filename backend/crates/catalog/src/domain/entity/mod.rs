//! Domain Entities

pub mod identity;
pub mod order;
pub mod session;
pub mod user;
