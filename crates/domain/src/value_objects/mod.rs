//! Value objects - Immutable objects defined by their attributes

mod hex;
mod outcome;
mod resource_pool;
mod viewport;

pub use hex::{axial_to_pixel, pixel_to_axial, AxialBounds, AxialCoord, HexLayout, HexSize, PixelPoint};
pub use outcome::{ActionOutcome, Rewards, StatsUpdate};
pub use resource_pool::ResourcePool;
pub use viewport::{
    hex_size_for_width, ViewportController, ViewportSize, LARGE_BREAKPOINT, LARGE_HEX, MEDIUM_HEX,
    SMALL_BREAKPOINT, SMALL_HEX,
};
