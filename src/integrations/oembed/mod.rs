pub mod client;

pub use client::{OEmbedClient, PlaybackProbe};

#[cfg(test)]
pub use client::MockPlaybackProbe;
