pub mod identity;
pub mod metrics;

pub use identity::{CurrentIdentity, IdentityExt, IdentityMiddleware};
pub use metrics::MetricsMiddleware;
