//! Axial hex coordinates and pointy-top pixel projection
//!
//! The grid is unbounded: every `(q, r)` pair is a valid cell. Projection is
//! pure and parameterized entirely by the layout (origin + hex size), so the
//! same tile set can be laid out at any viewport size.

use serde::{Deserialize, Serialize};

use crate::DomainError;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Axial coordinate identifying a single hex cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

impl AxialCoord {
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    /// Unit offsets of the six neighbours, starting east and turning counter-clockwise.
    const DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Third cube coordinate (q + r + s = 0).
    pub fn s(&self) -> i32 {
        -self.q - self.r
    }

    pub fn neighbors(&self) -> [AxialCoord; 6] {
        Self::DIRECTIONS.map(|(dq, dr)| AxialCoord::new(self.q + dq, self.r + dr))
    }

    /// Number of steps between two cells.
    pub fn distance(&self, other: &AxialCoord) -> u32 {
        let dq = (self.q - other.q).unsigned_abs();
        let dr = (self.r - other.r).unsigned_abs();
        let ds = (self.s() - other.s()).unsigned_abs();
        (dq + dr + ds) / 2
    }

    /// Round fractional axial coordinates to the containing cell.
    fn round(q: f64, r: f64) -> Self {
        let s = -q - r;
        let mut rq = q.round();
        let mut rr = r.round();
        let rs = s.round();

        let q_diff = (rq - q).abs();
        let r_diff = (rr - r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        }

        Self::new(rq as i32, rr as i32)
    }
}

impl std::fmt::Display for AxialCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Integer screen position of a hex centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

/// Rendered size of one hex. Width and height are independent so that
/// non-regular layouts can be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HexSize {
    pub width: f64,
    pub height: f64,
}

impl HexSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Regular pointy-top hex: height is `(√3/2)·width`.
    pub fn regular(width: f64) -> Self {
        Self {
            width,
            height: SQRT_3 / 2.0 * width,
        }
    }
}

/// Projection parameters: where `(0, 0)` lands and how large each hex is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HexLayout {
    pub origin_x: f64,
    pub origin_y: f64,
    pub size: HexSize,
}

impl HexLayout {
    pub fn new(origin_x: f64, origin_y: f64, size: HexSize) -> Self {
        Self {
            origin_x,
            origin_y,
            size,
        }
    }

    pub fn project(&self, coord: AxialCoord) -> PixelPoint {
        axial_to_pixel(
            coord,
            self.origin_x,
            self.origin_y,
            self.size.width,
            self.size.height,
        )
    }

    pub fn unproject(&self, point: PixelPoint) -> AxialCoord {
        pixel_to_axial(
            point,
            self.origin_x,
            self.origin_y,
            self.size.width,
            self.size.height,
        )
    }
}

/// Pointy-top axial → pixel projection.
///
/// Rounds half away from zero (`f64::round`), so `0.5 → 1` and `-0.5 → -1`.
pub fn axial_to_pixel(
    coord: AxialCoord,
    origin_x: f64,
    origin_y: f64,
    hex_width: f64,
    hex_height: f64,
) -> PixelPoint {
    let q = f64::from(coord.q);
    let r = f64::from(coord.r);
    let x = hex_width * (SQRT_3 * q + SQRT_3 / 2.0 * r) / 2.0;
    let y = hex_height * (3.0 / 2.0 * r) / 2.0;
    PixelPoint {
        x: (origin_x + x).round() as i64,
        y: (origin_y + y).round() as i64,
    }
}

/// Inverse of [`axial_to_pixel`]: the cell containing a screen point.
pub fn pixel_to_axial(
    point: PixelPoint,
    origin_x: f64,
    origin_y: f64,
    hex_width: f64,
    hex_height: f64,
) -> AxialCoord {
    let dx = point.x as f64 - origin_x;
    let dy = point.y as f64 - origin_y;
    let r = dy / (hex_height * 0.75);
    let q = 2.0 * dx / (hex_width * SQRT_3) - r / 2.0;
    AxialCoord::round(q, r)
}

/// Inclusive axial rectangle used for bounded tile queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxialBounds {
    q_min: i32,
    q_max: i32,
    r_min: i32,
    r_max: i32,
}

impl AxialBounds {
    /// Map window the client asks for when nothing else is configured.
    pub const DEFAULT_VIEW: Self = Self {
        q_min: -20,
        q_max: 20,
        r_min: -20,
        r_max: 20,
    };

    pub fn new(q_min: i32, q_max: i32, r_min: i32, r_max: i32) -> Result<Self, DomainError> {
        if q_min > q_max {
            return Err(DomainError::validation(format!(
                "qMin ({q_min}) must not exceed qMax ({q_max})"
            )));
        }
        if r_min > r_max {
            return Err(DomainError::validation(format!(
                "rMin ({r_min}) must not exceed rMax ({r_max})"
            )));
        }
        Ok(Self {
            q_min,
            q_max,
            r_min,
            r_max,
        })
    }

    /// Square window of `radius` cells on each side of `center`.
    pub fn around(center: AxialCoord, radius: u16) -> Self {
        let radius = i32::from(radius);
        Self {
            q_min: center.q.saturating_sub(radius),
            q_max: center.q.saturating_add(radius),
            r_min: center.r.saturating_sub(radius),
            r_max: center.r.saturating_add(radius),
        }
    }

    pub fn q_min(&self) -> i32 {
        self.q_min
    }

    pub fn q_max(&self) -> i32 {
        self.q_max
    }

    pub fn r_min(&self) -> i32 {
        self.r_min
    }

    pub fn r_max(&self) -> i32 {
        self.r_max
    }

    pub fn contains(&self, coord: AxialCoord) -> bool {
        (self.q_min..=self.q_max).contains(&coord.q) && (self.r_min..=self.r_max).contains(&coord.r)
    }
}

impl Default for AxialBounds {
    fn default() -> Self {
        Self::DEFAULT_VIEW
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_projects_to_origin() {
        let p = axial_to_pixel(AxialCoord::ORIGIN, 400.0, 200.0, 55.0, 63.0);
        assert_eq!(p, PixelPoint { x: 400, y: 200 });
    }

    #[test]
    fn projection_is_deterministic() {
        for q in -30..=30 {
            for r in -30..=30 {
                let c = AxialCoord::new(q, r);
                assert_eq!(
                    axial_to_pixel(c, 12.5, -7.25, 40.0, 46.0),
                    axial_to_pixel(c, 12.5, -7.25, 40.0, 46.0)
                );
            }
        }
    }

    #[test]
    fn projects_unit_steps_with_desktop_size() {
        // x = 55·√3/2 ≈ 47.63
        let east = axial_to_pixel(AxialCoord::new(1, 0), 0.0, 0.0, 55.0, 63.0);
        assert_eq!(east, PixelPoint { x: 48, y: 0 });

        // x = 55·(√3/2)/2 ≈ 23.82, y = 63·1.5/2 = 47.25
        let south_east = axial_to_pixel(AxialCoord::new(0, 1), 0.0, 0.0, 55.0, 63.0);
        assert_eq!(south_east, PixelPoint { x: 24, y: 47 });
    }

    #[test]
    fn rounds_half_away_from_zero() {
        let p = axial_to_pixel(AxialCoord::ORIGIN, 10.5, -2.5, 55.0, 63.0);
        assert_eq!(p, PixelPoint { x: 11, y: -3 });
    }

    #[test]
    fn accepts_far_out_coordinates() {
        let p = axial_to_pixel(AxialCoord::new(i32::MAX, i32::MIN), 0.0, 0.0, 25.0, 28.0);
        assert!(p.y < 0);
    }

    #[test]
    fn regular_size_uses_sqrt3_over_two() {
        let size = HexSize::regular(96.0);
        assert!((size.height - 83.138).abs() < 0.001);
    }

    #[test]
    fn unproject_recovers_cell_centres() {
        let layout = HexLayout::new(512.0, 384.0, HexSize::new(55.0, 63.0));
        for q in -8..=8 {
            for r in -8..=8 {
                let c = AxialCoord::new(q, r);
                assert_eq!(layout.unproject(layout.project(c)), c);
            }
        }
    }

    #[test]
    fn neighbors_are_one_step_away() {
        let c = AxialCoord::new(3, -2);
        for n in c.neighbors() {
            assert_eq!(c.distance(&n), 1);
        }
        assert_eq!(c.distance(&AxialCoord::new(-1, 2)), 4);
    }

    #[test]
    fn bounds_reject_inverted_ranges() {
        assert!(AxialBounds::new(5, 4, 0, 0).is_err());
        assert!(AxialBounds::new(0, 0, 1, -1).is_err());
        let b = AxialBounds::new(-1, 1, -2, 2).unwrap();
        assert!(b.contains(AxialCoord::new(1, -2)));
        assert!(!b.contains(AxialCoord::new(2, 0)));
    }

    #[test]
    fn bounds_around_center() {
        let b = AxialBounds::around(AxialCoord::new(2, -3), 4);
        assert_eq!((b.q_min(), b.q_max(), b.r_min(), b.r_max()), (-2, 6, -7, 1));
    }
}
