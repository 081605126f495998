pub mod anonymous;
pub mod client;

pub use anonymous::AnonymousAuth;
pub use client::{AuthProvider, HostedAuthClient};

#[cfg(test)]
pub use client::MockAuthProvider;
