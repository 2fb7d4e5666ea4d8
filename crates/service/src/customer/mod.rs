//! Customer module: three-layer architecture (domain, repository, service).
//!
//! The service validates and normalizes input, enforces email uniqueness and
//! delegates persistence to a [`repository::CustomerRepository`].

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::{CreateCustomerInput, Customer, NewCustomer};
pub use errors::CustomerError;
pub use repository::CustomerRepository;
pub use service::CustomerService;
