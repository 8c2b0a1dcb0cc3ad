//! Outbound ports - contracts the client core needs from the outside world
//!
//! Application services depend only on these traits; the reqwest client and
//! the system clock/RNG live in `infrastructure`.

pub mod api_port;
pub mod platform;

pub use api_port::{ApiError, GameApiPort};
pub use platform::{RandomProvider, TimeProvider};

#[cfg(any(test, feature = "testing"))]
pub use api_port::MockGameApiPort;
#[cfg(any(test, feature = "testing"))]
pub use platform::{MockRandomProvider, MockTimeProvider};
