//! Port traits separating the application from protocol and infrastructure.

pub mod inbound;
pub mod outbound;
