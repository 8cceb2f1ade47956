//! Common types used across the application.

pub mod money;

pub use money::Dollars;
