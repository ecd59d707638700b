//! Connection health tracking for the database gateway.
//!
//! - [`HealthTracker`] - Rate-limited, cached view of gateway reachability
//! - [`HealthProbe`] - The request used to test reachability ([`PgHealthProbe`] in production)

mod probe;
mod tracker;

pub use probe::{HealthProbe, PgHealthProbe};
pub use tracker::{ConnectionStatus, HealthTracker};

#[cfg(test)]
pub use probe::MockHealthProbe;
