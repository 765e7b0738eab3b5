//! Address geocoding.
//!
//! # Data Flow
//! ```text
//! RequestContext {streetAddress, city, state}
//!     → stage.rs (validate, compose "street, city, state")
//!     → provider.rs (GeocodingProvider port)
//!     → http.rs (GET endpoint?address=..&key=..)
//!     → stage.rs (status OK + first result → Coordinates attached)
//! ```
//!
//! # Design Decisions
//! - One provider call per request, no retries
//! - Zero results is NotFound; everything else that goes wrong is Upstream

pub mod http;
pub mod provider;
pub mod stage;

pub use http::HttpGeocoder;
pub use provider::{Coordinates, GeocodeError, GeocodeResponse, GeocodingProvider};
pub use stage::{compose_address, GeocodeStage};
