//! SWIFT/BIC registry engine.
//!
//! Code classification, record validation, cross-record consistency checks,
//! the registry operations built on top of them, and the bulk loader. Storage
//! is reached only through [`store::SwiftCodeStore`].

pub mod bulk_loader;
pub mod classifier;
pub mod consistency;
pub mod error;
pub mod import;
pub mod memory;
pub mod model;
pub mod service;
pub mod store;
pub mod validation;
