//! Mobility classification of a four-bar loop from its link lengths.

/// Tolerance absorbing floating-point error in the change-point test.
pub(crate) const CHANGE_POINT_TOL: f64 = 1e-9;

/// Grashof condition of a four-bar loop.
///
/// With `s`/`l` the shortest/longest link and `p`, `q` the other two, the
/// loop is Grashof when `s + l < p + q`.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GrashofClass {
    /// At least one link can fully rotate.
    Grashof,
    /// Change-point mechanism (`s + l == p + q` within tolerance).
    SpecialGrashof,
    /// No link can fully rotate.
    NonGrashof,
}

impl GrashofClass {
    /// Detect from a four-bar loop `[a, b, c, d]`.
    ///
    /// Depends only on the multiset of lengths. Total for any four finite
    /// reals; a NaN length falls through to [`Self::NonGrashof`].
    pub fn from_loop(fb_loop: [f64; 4]) -> Self {
        let s = fb_loop.iter().copied().fold(f64::INFINITY, f64::min);
        let l = fb_loop.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let pq = fb_loop.iter().sum::<f64>() - s - l;
        if (s + l - pq).abs() < CHANGE_POINT_TOL {
            Self::SpecialGrashof
        } else if s + l < pq {
            Self::Grashof
        } else {
            Self::NonGrashof
        }
    }

    /// Name of the class.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Grashof => "Grashof",
            Self::SpecialGrashof => "SpecialGrashof",
            Self::NonGrashof => "NonGrashof",
        }
    }

    /// Return true if at least one link can fully rotate.
    pub const fn is_grashof(&self) -> bool {
        matches!(self, Self::Grashof)
    }
}

impl std::fmt::Display for GrashofClass {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Type of the four-bar linkage, refining [`GrashofClass`] by which link is
/// the shortest.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Mobility {
    /// Grashof, ground link shortest (drag-link)
    DoubleCrank,
    /// Grashof, crank shortest
    CrankRocker,
    /// Grashof, coupler shortest
    DoubleRocker,
    /// Grashof, follower shortest
    RockerCrank,
    /// Change-point mechanism, all links collinear at the fold
    ChangePoint,
    /// Non-Grashof, no link fully rotates
    TripleRocker,
    /// The longest link exceeds the sum of the other three
    NonAssemblable,
}

impl Mobility {
    /// Detect from a four-bar loop `[a, b, c, d]`.
    pub fn from_loop(fb_loop: [f64; 4]) -> Self {
        let [a, b, c, _] = fb_loop;
        let mut sorted = fb_loop;
        sorted.sort_unstable_by(f64::total_cmp);
        let [s, p, q, l] = sorted;
        if l > s + p + q {
            return Self::NonAssemblable;
        }
        if (s + l - (p + q)).abs() < CHANGE_POINT_TOL {
            Self::ChangePoint
        } else if s + l < p + q {
            match s {
                s if s == a => Self::DoubleCrank,
                s if s == b => Self::CrankRocker,
                s if s == c => Self::DoubleRocker,
                _ => Self::RockerCrank,
            }
        } else {
            Self::TripleRocker
        }
    }

    /// Name of the type.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DoubleCrank => "Grashof double crank (drag-link)",
            Self::CrankRocker => "Grashof crank rocker",
            Self::DoubleRocker => "Grashof double rocker",
            Self::RockerCrank => "Grashof rocker crank",
            Self::ChangePoint => "Change-point mechanism",
            Self::TripleRocker => "Non-Grashof triple rocker",
            Self::NonAssemblable => "Non-assemblable",
        }
    }

    /// Return true if the type is a Grashof linkage.
    pub const fn is_grashof(&self) -> bool {
        matches!(
            self,
            Self::DoubleCrank | Self::CrankRocker | Self::DoubleRocker | Self::RockerCrank
        )
    }

    /// Return true if the crank can fully rotate.
    pub const fn is_crank_driven(&self) -> bool {
        matches!(self, Self::DoubleCrank | Self::CrankRocker)
    }
}

impl std::fmt::Display for Mobility {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
