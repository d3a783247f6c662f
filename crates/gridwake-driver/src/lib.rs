//! gridwake-driver — periodic policy evaluation.
//!
//! Owns the invocation contract the policy core is specified against:
//! every tick, each managed offline candidate is checked under the
//! queue's exclusive lock, and operator-initiated activations are gated
//! through the same policies.
//!
//! Policies are assembled from TOML configuration; an unresolvable label
//! fails assembly rather than producing a silent no-op policy.

pub mod config;
pub mod driver;
pub mod error;

pub use config::{DriverConfig, PolicyConfig};
pub use driver::RetentionDriver;
pub use error::{DriverError, DriverResult};
