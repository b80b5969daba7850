//! Core units, constants, and shared primitives for the Dormand-Prince physics workspace.

/// Reference model constants, in simulation units unless stated otherwise.
pub mod constants {
    /// Gravitational constant scaled to simulation units.
    pub const G_SIM: f64 = 6.67430e-23;
    /// Squared separation below which an attracting body is ignored.
    pub const MIN_DISTANCE_SQ: f64 = 1e-20;
    /// Cap on the gravitational acceleration contributed by a single body.
    pub const MAX_ACCELERATION: f64 = 1.0;
    /// Kilometres per simulation length unit.
    pub const UNIT_TO_KM: f64 = 10.0;
    /// Equatorial radius of the primary body (km).
    pub const EARTH_RADIUS_KM: f64 = 637.8 * 10.0;
    /// Rotation rate of the primary body about its polar axis (rad/s).
    pub const OMEGA_EARTH: f64 = 7.2921150e-5;
    /// Global multiplier applied to densities above the low-altitude band.
    pub const DENSITY_SCALE: f64 = 1.0;
    /// Hard capacity of the attracting-body list for a single step.
    pub const MAX_BODIES: usize = 256;
    /// Bodies at or below this mass are treated as immovable.
    pub const MIN_STEP_MASS: f64 = 1e-6;
}

/// Conversions between simulation units and kilometres.
pub mod units {
    use super::vector::Vector3D;

    /// Convert a simulation length to kilometres.
    #[inline]
    pub fn sim_to_km(v: f64, unit_to_km: f64) -> f64 {
        v * unit_to_km
    }

    /// Convert kilometres to a simulation length.
    #[inline]
    pub fn km_to_sim(v: f64, unit_to_km: f64) -> f64 {
        v / unit_to_km
    }

    /// Convert a simulation-unit area to km².
    #[inline]
    pub fn area_sim_to_km2(area: f64, unit_to_km: f64) -> f64 {
        area * unit_to_km * unit_to_km
    }

    /// Convert a simulation-unit vector (position, velocity, acceleration) to km-based units.
    #[inline]
    pub fn vector_sim_to_km(v: Vector3D, unit_to_km: f64) -> Vector3D {
        v * unit_to_km
    }

    /// Convert a km-based vector back to simulation units.
    #[inline]
    pub fn vector_km_to_sim(v: Vector3D, unit_to_km: f64) -> Vector3D {
        v / unit_to_km
    }
}

/// Minimal double-precision 3-vector.
pub mod vector {
    use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

    /// Cartesian 3-vector in simulation units unless stated otherwise.
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    pub struct Vector3D {
        pub x: f64,
        pub y: f64,
        pub z: f64,
    }

    impl Vector3D {
        pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

        #[inline]
        pub const fn new(x: f64, y: f64, z: f64) -> Self {
            Self { x, y, z }
        }

        /// Dot product of two vectors.
        #[inline]
        pub fn dot(&self, other: &Self) -> f64 {
            self.x * other.x + self.y * other.y + self.z * other.z
        }

        /// Cross product `self × other`.
        #[inline]
        pub fn cross(&self, other: &Self) -> Self {
            Self::new(
                self.y * other.z - self.z * other.y,
                self.z * other.x - self.x * other.z,
                self.x * other.y - self.y * other.x,
            )
        }

        #[inline]
        pub fn norm_squared(&self) -> f64 {
            self.dot(self)
        }

        /// Euclidean norm of a vector.
        #[inline]
        pub fn norm(&self) -> f64 {
            self.norm_squared().sqrt()
        }

        #[inline]
        pub fn is_finite(&self) -> bool {
            self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
        }

        #[inline]
        pub fn to_array(self) -> [f64; 3] {
            [self.x, self.y, self.z]
        }
    }

    impl From<[f64; 3]> for Vector3D {
        #[inline]
        fn from(v: [f64; 3]) -> Self {
            Self::new(v[0], v[1], v[2])
        }
    }

    impl From<Vector3D> for [f64; 3] {
        #[inline]
        fn from(v: Vector3D) -> Self {
            v.to_array()
        }
    }

    impl Add for Vector3D {
        type Output = Self;

        #[inline]
        fn add(self, rhs: Self) -> Self {
            Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
        }
    }

    impl AddAssign for Vector3D {
        #[inline]
        fn add_assign(&mut self, rhs: Self) {
            self.x += rhs.x;
            self.y += rhs.y;
            self.z += rhs.z;
        }
    }

    impl Sub for Vector3D {
        type Output = Self;

        #[inline]
        fn sub(self, rhs: Self) -> Self {
            Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
        }
    }

    impl SubAssign for Vector3D {
        #[inline]
        fn sub_assign(&mut self, rhs: Self) {
            self.x -= rhs.x;
            self.y -= rhs.y;
            self.z -= rhs.z;
        }
    }

    impl Mul<f64> for Vector3D {
        type Output = Self;

        #[inline]
        fn mul(self, s: f64) -> Self {
            Self::new(self.x * s, self.y * s, self.z * s)
        }
    }

    impl Mul<Vector3D> for f64 {
        type Output = Vector3D;

        #[inline]
        fn mul(self, v: Vector3D) -> Vector3D {
            v * self
        }
    }

    impl Div<f64> for Vector3D {
        type Output = Self;

        #[inline]
        fn div(self, s: f64) -> Self {
            Self::new(self.x / s, self.y / s, self.z / s)
        }
    }

    impl Neg for Vector3D {
        type Output = Self;

        #[inline]
        fn neg(self) -> Self {
            Self::new(-self.x, -self.y, -self.z)
        }
    }
}
