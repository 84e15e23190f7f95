// wallet-core/src/logging.rs
//
// tracing subscriber setup for hosts that embed the core.

use crate::error::{WalletError, WalletResult};
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber. `RUST_LOG` takes precedence over `default_filter`.
///
/// A subscriber that is already installed (by the host or an earlier call)
/// is left in place.
pub fn init(default_filter: &str) -> WalletResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .map_err(|e| WalletError::Config(format!("Invalid log filter '{}': {}", default_filter, e)))?,
    };

    // Err here only means a global subscriber exists already.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
    Ok(())
}
