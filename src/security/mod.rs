//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Response leaving the guard on the continue path:
//!     → headers.rs (nosniff, frame deny, XSS filter)
//!     → client
//! ```

pub mod headers;

pub use headers::{apply_security_headers, SECURITY_HEADERS};
