//! Subcommand implementations.
//!
//! Each command owns its CLI args and execution logic.

mod digest;
mod inspect_profile;
mod verify;

pub use digest::Digest;
pub use inspect_profile::InspectProfile;
pub use verify::Verify;
