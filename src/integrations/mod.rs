// src/integrations/mod.rs
//
// External Integrations Module
//
// - auth: hosted password-auth service
// - oembed: embed availability probe

pub mod auth;
pub mod oembed;

pub use auth::{AnonymousAuth, AuthProvider, HostedAuthClient};
pub use oembed::{OEmbedClient, PlaybackProbe};
