//! Credential store seam, the in-memory store, and account lifecycle
//! operations (registration and self-service updates).

pub mod memory;
pub mod repository;
pub mod service;

pub use memory::MemoryAccountRepository;
pub use repository::AccountRepository;
pub use service::AccountService;
