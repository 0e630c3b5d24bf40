use auto_ops::{impl_op_ex, impl_op_ex_commutative};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::iter::Sum;

/// A three-vector of `f64` components.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Promote to a four-momentum with the given invariant mass.
    pub fn with_mass(&self, mass: f64) -> Vec4 {
        let e = (mass * mass + self.mag2()).sqrt();
        Vec4::new(self.x, self.y, self.z, e)
    }

    /// Promote to a four-momentum with the given energy.
    pub fn with_energy(&self, energy: f64) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, energy)
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn mag2(&self) -> f64 {
        self.dot(self)
    }

    pub fn mag(&self) -> f64 {
        self.mag2().sqrt()
    }

    /// Cosine of the polar angle with respect to the z-axis.
    pub fn costheta(&self) -> f64 {
        self.z / self.mag()
    }

    pub fn theta(&self) -> f64 {
        self.costheta().acos()
    }

    /// Azimuthal angle in `(-π, π]`.
    pub fn phi(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn unit(&self) -> Self {
        let m = self.mag();
        Self::new(self.x / m, self.y / m, self.z / m)
    }
}

impl_op_ex!(+ |a: &Vec3, b: &Vec3| -> Vec3 { Vec3::new(a.x + b.x, a.y + b.y, a.z + b.z) });
impl_op_ex!(-|a: &Vec3, b: &Vec3| -> Vec3 { Vec3::new(a.x - b.x, a.y - b.y, a.z - b.z) });
impl_op_ex!(-|a: &Vec3| -> Vec3 { Vec3::new(-a.x, -a.y, -a.z) });
impl_op_ex_commutative!(*|a: &Vec3, b: &f64| -> Vec3 { Vec3::new(a.x * b, a.y * b, a.z * b) });
impl_op_ex!(/ |a: &Vec3, b: &f64| -> Vec3 { Vec3::new(a.x / b, a.y / b, a.z / b) });

impl Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A four-momentum with momentum components `x`, `y`, `z` and energy `t`.
///
/// The metric is `(+, -, -, -)`, so [`Vec4::mag`] is the invariant mass for
/// time-like vectors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: f64,
}

impl Vec4 {
    /// Build a four-momentum from `(px, py, pz, e)`.
    pub const fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self {
            x: px,
            y: py,
            z: pz,
            t: e,
        }
    }

    pub fn px(&self) -> f64 {
        self.x
    }
    pub fn py(&self) -> f64 {
        self.y
    }
    pub fn pz(&self) -> f64 {
        self.z
    }
    pub fn e(&self) -> f64 {
        self.t
    }

    /// The momentum three-vector.
    pub fn vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// The velocity three-vector `p/E`.
    pub fn beta(&self) -> Vec3 {
        self.vec3() / self.t
    }

    pub fn gamma(&self) -> f64 {
        let e2 = self.t * self.t;
        let p2 = self.vec3().mag2();
        self.t / (e2 - p2).sqrt()
    }

    /// The squared invariant mass `E² - |p|²`.
    pub fn mag2(&self) -> f64 {
        self.t * self.t - self.vec3().mag2()
    }

    /// The invariant mass.
    pub fn mag(&self) -> f64 {
        self.mag2().sqrt()
    }

    /// Boost by the given velocity vector.
    ///
    /// Boosting by `-p.beta()` takes any four-momentum into the rest frame
    /// of `p`.
    pub fn boost(&self, beta: &Vec3) -> Self {
        let b2 = beta.dot(beta);
        if b2 == 0.0 {
            return *self;
        }
        let gamma = 1.0 / (1.0 - b2).sqrt();
        let bp = self.vec3().dot(beta);
        let p3 = self.vec3() + beta * ((gamma - 1.0) * bp / b2 + gamma * self.t);
        Self::new(p3.x, p3.y, p3.z, gamma * (self.t + bp))
    }

    pub fn to_p4_string(&self) -> String {
        format!("[e = {}; p = ({}, {}, {})]", self.t, self.x, self.y, self.z)
    }
}

impl_op_ex!(+ |a: &Vec4, b: &Vec4| -> Vec4 { Vec4::new(a.x + b.x, a.y + b.y, a.z + b.z, a.t + b.t) });
impl_op_ex!(-|a: &Vec4, b: &Vec4| -> Vec4 {
    Vec4::new(a.x - b.x, a.y - b.y, a.z - b.z, a.t - b.t)
});
impl_op_ex!(-|a: &Vec4| -> Vec4 { Vec4::new(-a.x, -a.y, -a.z, -a.t) });

impl Sum for Vec4 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, p| acc + p)
    }
}

impl Display for Vec4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_p4_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_vec_sums() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        let pa = Vec4::new(1.0, 2.0, 3.0, 10.0);
        let pb = Vec4::new(4.0, 5.0, 6.0, 11.0);
        let total: Vec4 = [pa, pb].into_iter().sum();
        assert_eq!(total, Vec4::new(5.0, 7.0, 9.0, 21.0));
    }

    #[test]
    fn test_three_to_four_momentum_conversion() {
        let target = Vec4::new(1.0, 2.0, 3.0, 10.0);
        let p3 = target.vec3();
        let from_mass = p3.with_mass(target.mag());
        let from_energy = p3.with_energy(target.e());
        assert_relative_eq!(from_mass.e(), target.e());
        assert_eq!(from_mass.vec3(), target.vec3());
        assert_eq!(from_energy, target);
    }

    #[test]
    fn test_four_momentum_basics() {
        let p = Vec4::new(3.0, 4.0, 5.0, 10.0);
        assert_eq!(p.px(), 3.0);
        assert_eq!(p.py(), 4.0);
        assert_eq!(p.pz(), 5.0);
        assert_eq!(p.e(), 10.0);
        assert_relative_eq!(p.beta().x, 0.3);
        assert_relative_eq!(p.beta().y, 0.4);
        assert_relative_eq!(p.beta().z, 0.5);
        assert_relative_eq!(p.mag2(), 50.0);
        assert_relative_eq!(p.mag(), 50.0_f64.sqrt());
        assert_relative_eq!(p.gamma(), 2.0_f64.sqrt());
    }

    #[test]
    fn test_three_momentum_basics() {
        let p3 = Vec4::new(3.0, 4.0, 5.0, 10.0).vec3();
        let q3 = Vec4::new(1.2, -3.4, 7.6, 0.0).vec3();
        assert_relative_eq!(p3.mag2(), 50.0);
        assert_relative_eq!(p3.mag(), 50.0_f64.sqrt());
        assert_relative_eq!(p3.costheta(), 5.0 / 50.0_f64.sqrt());
        assert_relative_eq!(p3.theta(), (5.0 / 50.0_f64.sqrt()).acos());
        assert_relative_eq!(p3.phi(), 4.0_f64.atan2(3.0));
        let u = p3.unit();
        assert_relative_eq!(u.x, 3.0 / 50.0_f64.sqrt());
        assert_relative_eq!(u.y, 4.0 / 50.0_f64.sqrt());
        assert_relative_eq!(u.z, 5.0 / 50.0_f64.sqrt());
        let c = p3.cross(&q3);
        assert_relative_eq!(c.x, 47.4);
        assert_relative_eq!(c.y, -16.8);
        assert_relative_eq!(c.z, -15.0);
    }

    #[test]
    fn test_boost_com() {
        let p = Vec4::new(3.0, 4.0, 5.0, 10.0);
        let rest = p.boost(&-p.beta());
        assert_relative_eq!(rest.px(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(rest.py(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(rest.pz(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(rest.e(), p.mag(), epsilon = 1e-12);
    }

    #[test]
    fn test_boost() {
        let pa = Vec4::new(3.0, 4.0, 5.0, 10.0);
        let pb = Vec4::new(3.4, 2.3, 1.2, 9.0);
        let boosted = pa.boost(&-pb.beta());
        assert_relative_eq!(boosted.e(), 8.157632144622882);
        assert_relative_eq!(boosted.px(), -0.6489200627053444);
        assert_relative_eq!(boosted.py(), 1.5316128987581492);
        assert_relative_eq!(boosted.pz(), 3.712145860221643);
    }

    #[test]
    fn test_invariant_mass_preserved_under_boost() {
        let pa = Vec4::new(3.0, 4.0, 5.0, 10.0);
        let pb = Vec4::new(3.4, 2.3, 1.2, 9.0);
        assert_relative_eq!(pa.boost(&-pb.beta()).mag(), pa.mag(), epsilon = 1e-12);
    }
}
