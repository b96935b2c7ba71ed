//! Installation verification.
//!
//! This module decides whether a component is actually present, using
//! several strategies with fallbacks.
//!
//! # Modules
//!
//! - [`provider`] - Pluggable external verification providers
//! - [`paths`] - Well-known install path checks with wildcard support
//! - [`result`] - Verification result types
//! - [`verifier`] - The strategy chain
//!
//! # Example
//!
//! ```
//! use devsetup::components::ComponentSpec;
//! use devsetup::verify::Verifier;
//!
//! let spec = ComponentSpec::new("echo").verify_command("echo ok");
//! let result = Verifier::default().verify(&spec);
//! assert!(result.installed);
//! ```

pub mod paths;
pub mod provider;
pub mod result;
pub mod verifier;

pub use paths::{find_installed_path, PathCheck};
pub use provider::{
    provider_from_settings, CommandProvider, NoProvider, ProviderReport, ProviderStatus,
    VerificationProvider,
};
pub use result::{VerificationMethod, VerificationResult};
pub use verifier::Verifier;
