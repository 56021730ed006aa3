pub mod error;

pub use error::{ConfigError, ProbeError, ProbeResult, StoreError, StoreResult};
