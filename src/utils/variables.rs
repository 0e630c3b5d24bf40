//! Kinematic variables as polars expressions over four-momentum columns.
//!
//! Particles are stored column-wise as `{name}_px`, `{name}_py`,
//! `{name}_pz`, and `{name}_e`, and every builder returns an aliased
//! [`Expr`] which can be attached to a [`LazyFrame`](polars::prelude::LazyFrame)
//! with `with_column(s)`. Momenta are assumed to be given in the parent rest
//! frame, which is where AmpGen generates its events.

use std::f64::consts::PI;

use polars::prelude::*;

use crate::utils::list_to_name;

#[derive(Clone)]
struct P3([Expr; 3]);

impl P3 {
    fn x(&self) -> Expr {
        self.0[0].clone()
    }
    fn y(&self) -> Expr {
        self.0[1].clone()
    }
    fn z(&self) -> Expr {
        self.0[2].clone()
    }

    fn dot(&self, other: &Self) -> Expr {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    fn cross(&self, other: &Self) -> Self {
        Self([
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        ])
    }

    fn mag(&self) -> Expr {
        self.dot(self).sqrt()
    }

    fn unit(&self) -> Self {
        let m = self.mag();
        Self([self.x() / m.clone(), self.y() / m.clone(), self.z() / m])
    }

    fn scale(&self, factor: &Expr) -> Self {
        Self([
            self.x() * factor.clone(),
            self.y() * factor.clone(),
            self.z() * factor.clone(),
        ])
    }

    fn add(&self, other: &Self) -> Self {
        Self([
            self.x() + other.x(),
            self.y() + other.y(),
            self.z() + other.z(),
        ])
    }

    fn neg(&self) -> Self {
        Self([-self.x(), -self.y(), -self.z()])
    }
}

#[derive(Clone)]
struct P4([Expr; 4]);

impl P4 {
    fn new<S: Into<PlSmallStr>>(name: S) -> Self {
        let name: PlSmallStr = name.into();
        Self([
            col(format!("{}_px", name)).cast(DataType::Float64),
            col(format!("{}_py", name)).cast(DataType::Float64),
            col(format!("{}_pz", name)).cast(DataType::Float64),
            col(format!("{}_e", name)).cast(DataType::Float64),
        ])
    }

    fn sum<I, S>(constituents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PlSmallStr>,
    {
        let mut it = constituents.into_iter();
        let mut total = if let Some(first) = it.next() {
            Self::new(first)
        } else {
            Self([lit(0.0), lit(0.0), lit(0.0), lit(0.0)])
        };
        for name in it {
            total = total.add(&Self::new(name));
        }
        total
    }

    fn e(&self) -> Expr {
        self.0[3].clone()
    }

    fn p3(&self) -> P3 {
        P3([self.0[0].clone(), self.0[1].clone(), self.0[2].clone()])
    }

    fn beta(&self) -> P3 {
        let e = self.e();
        P3([
            self.0[0].clone() / e.clone(),
            self.0[1].clone() / e.clone(),
            self.0[2].clone() / e,
        ])
    }

    fn mag(&self) -> Expr {
        (self.e() * self.e() - self.p3().dot(&self.p3())).sqrt()
    }

    fn boost(&self, beta: &P3) -> Self {
        let b2 = beta.dot(beta);
        let gamma = lit(1.0) / (lit(1.0) - b2.clone()).sqrt();
        let factor = (gamma.clone() - lit(1.0)) * self.p3().dot(beta) / b2
            + gamma.clone() * self.e();
        let p3 = self.p3().add(&beta.scale(&factor));
        Self([
            p3.x(),
            p3.y(),
            p3.z(),
            gamma * (self.e() + beta.dot(&self.p3())),
        ])
    }

    fn add(&self, other: &Self) -> Self {
        Self([
            self.0[0].clone() + other.0[0].clone(),
            self.0[1].clone() + other.0[1].clone(),
            self.0[2].clone() + other.0[2].clone(),
            self.0[3].clone() + other.0[3].clone(),
        ])
    }
}

/// Invariant mass of the four-momentum sum of the named particles.
pub fn mass<I, S>(constituents: I) -> Expr
where
    I: IntoIterator<Item = S> + Clone,
    S: Into<PlSmallStr>,
{
    P4::sum(constituents.clone())
        .mag()
        .alias(format!("mass({})", list_to_name(&constituents)))
}

/// Helicity cosine of `daughter` within the rest frame of `pair`, measured
/// against the pair flight direction.
pub fn pair_costheta<Id, Ip, Sd, Sp>(daughter: Id, pair: Ip) -> Expr
where
    Id: IntoIterator<Item = Sd> + Clone,
    Sd: Into<PlSmallStr>,
    Ip: IntoIterator<Item = Sp> + Clone,
    Sp: Into<PlSmallStr>,
{
    let name = format!(
        "costheta([{}], [{}])",
        list_to_name(&daughter),
        list_to_name(&pair)
    );
    let daughter = P4::sum(daughter);
    let pair = P4::sum(pair);
    let daughter_in_pair = daughter.boost(&pair.beta().neg());
    daughter_in_pair
        .p3()
        .unit()
        .dot(&pair.p3().unit())
        .alias(name)
}

/// Angle between the decay planes of the two pairs, in `[0, 2π)`, signed by
/// the flight direction of `pair_a`.
pub fn plane_angle<Sa, Sb>(pair_a: [Sa; 2], pair_b: [Sb; 2]) -> Expr
where
    Sa: Into<PlSmallStr> + Clone,
    Sb: Into<PlSmallStr> + Clone,
{
    let name = format!(
        "plane_angle([{}], [{}])",
        list_to_name(&pair_a),
        list_to_name(&pair_b)
    );
    let [a1, a2] = pair_a;
    let [b1, b2] = pair_b;
    let (a1, a2) = (P4::new(a1), P4::new(a2));
    let (b1, b2) = (P4::new(b1), P4::new(b2));
    let n_a = a1.p3().cross(&a2.p3()).unit();
    let n_b = b1.p3().cross(&b2.p3()).unit();
    let z = a1.add(&a2).p3().unit();
    let phi = n_a.cross(&n_b).dot(&z).arctan2(n_a.dot(&n_b));
    when(phi.clone().lt(lit(0.0)))
        .then(phi.clone() + lit(2.0 * PI))
        .otherwise(phi)
        .alias(name)
}

/// The full five-variable phase-space point as columns `m12`, `m34`,
/// `cos12`, `cos34`, and `phi`, consistent with
/// [`phsp_point`](crate::phase_space::phsp_point) for events stored in the
/// parent rest frame.
pub fn phsp_columns<Sk, S1, Ss, S2>(k: Sk, os_pi1: S1, ss_pi: Ss, os_pi2: S2) -> [Expr; 5]
where
    Sk: Into<PlSmallStr>,
    S1: Into<PlSmallStr>,
    Ss: Into<PlSmallStr>,
    S2: Into<PlSmallStr>,
{
    let k: PlSmallStr = k.into();
    let os_pi1: PlSmallStr = os_pi1.into();
    let ss_pi: PlSmallStr = ss_pi.into();
    let os_pi2: PlSmallStr = os_pi2.into();
    [
        mass([k.clone(), os_pi1.clone()]).alias("m12"),
        mass([ss_pi.clone(), os_pi2.clone()]).alias("m34"),
        pair_costheta([k.clone()], [k.clone(), os_pi1.clone()]).alias("cos12"),
        pair_costheta([ss_pi.clone()], [ss_pi.clone(), os_pi2.clone()]).alias("cos34"),
        plane_angle([k, os_pi1], [ss_pi, os_pi2]).alias("phi"),
    ]
}
