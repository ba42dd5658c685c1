//! Linkage geometry and the closed-form position solver.
use crate::grashof::{GrashofClass, Mobility};

/// Error for geometrically meaningless solver inputs.
#[derive(Debug, PartialEq, Eq, Copy, Clone, thiserror::Error)]
pub enum DomainError {
    /// A link length is exactly zero.
    #[error("degenerate linkage: link length zero")]
    ZeroLength,
    /// A length or angle is NaN or infinite.
    #[error("non-finite parameter")]
    NonFinite,
}

/// Map an angle in degrees into `[0, 360)`.
pub fn normalize_deg(angle: f64) -> f64 {
    let r = angle.rem_euclid(360.);
    // Tiny negative angles round up to exactly 360
    if r >= 360. {
        0.
    } else {
        r
    }
}

/// The two roots of a closure quadratic, in degrees within `[0, 360)`.
///
/// `None` marks a circuit that cannot be assembled at the requested crank
/// angle. This is a legitimate kinematic outcome, not an error.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Copy, Clone, Default)]
pub struct CircuitPair {
    /// Open-circuit root (minus branch of the discriminant)
    pub open: Option<f64>,
    /// Crossed-circuit root (plus branch of the discriminant)
    pub crossed: Option<f64>,
}

impl CircuitPair {
    const NONE: Self = Self { open: None, crossed: None };

    /// Check if at least one circuit closes.
    pub const fn is_some(&self) -> bool {
        self.open.is_some() || self.crossed.is_some()
    }
}

/// Position solution of the coupler and follower links.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Copy, Clone, Default)]
pub struct Position {
    /// Coupler angle solutions (theta3)
    pub theta3: CircuitPair,
    /// Follower angle solutions (theta4)
    pub theta4: CircuitPair,
}

/// Admissible crank angle set, degrees in `[0, 360)`.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum CrankRange {
    /// The crank can rotate fully.
    Full,
    /// One contiguous arc `[from, to]`, wrapping through zero when
    /// `from > to`.
    Arc([f64; 2]),
    /// Two arcs mirrored about zero: `[from, to]` and
    /// `[360 - to, 360 - from]`.
    Mirrored([f64; 2]),
    /// The loop cannot close at any crank angle.
    Empty,
}

impl CrankRange {
    /// Check whether a crank angle in degrees admits a closed assembly.
    pub fn contains(&self, theta2_deg: f64) -> bool {
        let t = normalize_deg(theta2_deg);
        match *self {
            Self::Full => true,
            Self::Empty => false,
            Self::Arc([from, to]) => {
                if from <= to {
                    (from..=to).contains(&t)
                } else {
                    t >= from || t <= to
                }
            }
            Self::Mirrored([from, to]) => {
                (from..=to).contains(&t) || (360. - to..=360. - from).contains(&t)
            }
        }
    }
}

/// Planar four-bar linkage defined by its four link lengths.
///
/// # Parameters
///
/// + Ground link `a`
/// + Crank (input) link `b`
/// + Coupler link `c`
/// + Follower (output) link `d`
///
/// The ground pivots lie on the x-axis, crank pivot at the origin, and all
/// angles are measured counterclockwise from the positive x-axis. The crank
/// angle `theta2` is the driving input; `theta3`/`theta4` are the coupler and
/// follower angles solved by [`Self::solve`].
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Linkage {
    /// Length of the ground link
    pub a: f64,
    /// Length of the crank link
    pub b: f64,
    /// Length of the coupler link
    pub c: f64,
    /// Length of the follower link
    pub d: f64,
}

impl Linkage {
    /// Create a new linkage from its link lengths.
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// The four-bar loop `[a, b, c, d]`.
    pub const fn planar_loop(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Grashof condition of the loop.
    pub fn grashof(&self) -> GrashofClass {
        GrashofClass::from_loop(self.planar_loop())
    }

    /// Linkage type, refined from the Grashof condition.
    pub fn mobility(&self) -> Mobility {
        Mobility::from_loop(self.planar_loop())
    }

    fn validate(&self) -> Result<(), DomainError> {
        let fb_loop = self.planar_loop();
        if fb_loop.iter().any(|l| !l.is_finite()) {
            Err(DomainError::NonFinite)
        } else if fb_loop.contains(&0.) {
            Err(DomainError::ZeroLength)
        } else {
            Ok(())
        }
    }

    /// Crank angles at which the loop closes, from the triangle inequality
    /// on the coupler-follower dyad:
    /// `(c - d)^2 <= a^2 + b^2 - 2ab*cos(theta2) <= (c + d)^2`.
    pub fn crank_range(&self) -> Result<CrankRange, DomainError> {
        self.validate()?;
        let Self { a, b, c, d } = *self;
        let lo = (a * a + b * b - (c + d) * (c + d)) / (2. * a * b);
        let hi = (a * a + b * b - (c - d) * (c - d)) / (2. * a * b);
        if lo > 1. || hi < -1. {
            return Ok(CrankRange::Empty);
        }
        let from = if hi >= 1. { 0. } else { hi.acos().to_degrees() };
        let to = if lo <= -1. {
            180.
        } else {
            lo.acos().to_degrees()
        };
        Ok(match (from == 0., to == 180.) {
            (true, true) => CrankRange::Full,
            (true, false) => CrankRange::Arc([normalize_deg(360. - to), to]),
            (false, true) => CrankRange::Arc([from, 360. - from]),
            (false, false) => CrankRange::Mirrored([from, to]),
        })
    }

    /// Solve the coupler and follower angles at a crank angle in degrees.
    ///
    /// The closure equation `b*e^{i theta2} + c*e^{i theta3} = a + d*e^{i
    /// theta4}` is reduced with Freudenstein's coefficients to a quadratic in
    /// the tangent half-angle of each unknown. Both circuit roots are
    /// returned in degrees within `[0, 360)`; `None` marks a circuit that
    /// does not close at this crank angle.
    pub fn solve(&self, theta2_deg: f64) -> Result<Position, DomainError> {
        self.validate()?;
        if !theta2_deg.is_finite() {
            return Err(DomainError::NonFinite);
        }
        let Self { a, b, c, d } = *self;
        // Normalizing in degrees first makes periodicity exact
        let theta2 = normalize_deg(theta2_deg).to_radians();
        let (sin2, cos2) = theta2.sin_cos();
        let k1 = a / b;
        // Follower angle (theta4)
        let k2 = a / d;
        let k3 = (a * a + b * b - c * c + d * d) / (2. * b * d);
        let qa = cos2 - k1 - k2 * cos2 + k3;
        let qb = -2. * sin2;
        let qc = k1 - (k2 + 1.) * cos2 + k3;
        tracing::trace!(k1, k2, k3, qa, qb, qc, "follower closure");
        let theta4 = closure_roots(qa, qb, qc);
        // Coupler angle (theta3)
        let k4 = a / c;
        let k5 = (d * d - a * a - b * b - c * c) / (2. * b * c);
        let qd = cos2 - k1 + k4 * cos2 + k5;
        let qf = k1 + (k4 - 1.) * cos2 + k5;
        tracing::trace!(k4, k5, qd, qe = qb, qf, "coupler closure");
        let theta3 = closure_roots(qd, qb, qf);
        Ok(Position { theta3, theta4 })
    }
}

/// Roots of the closure quadratic `A t^2 + B t + C = 0` in `t =
/// tan(theta/2)`, doubled back to degrees in `[0, 360)`.
///
/// The `2 atan2(-B -+ root, 2A)` form keeps the correct branch when `A` is
/// negative: any half-angle off by pi doubles to a full turn and is absorbed
/// by normalization.
fn closure_roots(qa: f64, qb: f64, qc: f64) -> CircuitPair {
    if qa == 0. {
        // Degenerate linear equation; one root escapes to tan(theta/2) ->
        // inf, i.e. theta = 180. The branch labels follow continuity of the
        // quadratic roots as A -> 0.
        if qb == 0. {
            // A == B == 0 leaves a double root at infinity: both circuits
            // fold through theta = 180. All three coefficients zero is the
            // indeterminate change-point fold.
            if qc == 0. {
                return CircuitPair::NONE;
            }
            return CircuitPair { open: Some(180.), crossed: Some(180.) };
        }
        let finite = normalize_deg((2. * (-qc / qb).atan()).to_degrees());
        if qb > 0. {
            CircuitPair { open: Some(180.), crossed: Some(finite) }
        } else {
            CircuitPair { open: Some(finite), crossed: Some(180.) }
        }
    } else {
        let disc = qb * qb - 4. * qa * qc;
        tracing::trace!(disc, "closure discriminant");
        if disc < 0. {
            // The loop cannot close at this crank angle
            return CircuitPair::NONE;
        }
        let root = disc.sqrt();
        let open = 2. * (-qb - root).atan2(2. * qa);
        let crossed = 2. * (-qb + root).atan2(2. * qa);
        CircuitPair {
            open: Some(normalize_deg(open.to_degrees())),
            crossed: Some(normalize_deg(crossed.to_degrees())),
        }
    }
}
