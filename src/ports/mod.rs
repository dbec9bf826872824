//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) the bridge use cases require from the
//! outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `RemoteEndpoint`: the five VPS operations the bridge invokes

pub mod remote;

pub use remote::RemoteEndpoint;
