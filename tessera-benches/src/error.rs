//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of `.expect()`.

use tessera_core::ContactError;

use crate::scene::SceneError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic assembly generation failed.
    #[error("synthetic scene generation failed: {0}")]
    Scene(#[from] SceneError),
    /// Configuring or computing the contact matrix failed.
    #[error("contact computation failed: {0}")]
    Contact(#[from] ContactError),
}
