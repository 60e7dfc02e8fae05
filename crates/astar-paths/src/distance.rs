use std::fmt;
use std::str::FromStr;

use astar_core::Coord;

/// Manhattan (L1) distance between two coordinates.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two coordinates.
#[inline]
pub fn chebyshev(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Euclidean (L2) distance between two coordinates.
#[inline]
pub fn euclidean(a: Coord, b: Coord) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    dx.hypot(dy)
}

/// The distance function a search uses for both step costs (g) and the
/// remaining-distance estimate (h).
///
/// [`Metric::Euclidean`] is admissible for both movement models. With
/// [`Metric::Manhattan`] a diagonal step costs 2, so diagonal moves never
/// shorten a path.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Metric {
    #[default]
    Euclidean,
    Manhattan,
}

impl Metric {
    #[inline]
    pub fn distance(self, a: Coord, b: Coord) -> f64 {
        match self {
            Metric::Euclidean => euclidean(a, b),
            Metric::Manhattan => f64::from(manhattan(a, b)),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Euclidean => f.write_str("euclidean"),
            Metric::Manhattan => f.write_str("manhattan"),
        }
    }
}

/// Error returned when parsing an unknown metric name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownMetric(pub String);

impl fmt::Display for UnknownMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown metric '{}' (expected euclidean or manhattan)",
            self.0
        )
    }
}

impl std::error::Error for UnknownMetric {}

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Ok(Metric::Euclidean),
            "manhattan" | "l1" => Ok(Metric::Manhattan),
            _ => Err(UnknownMetric(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Coord::new(1, 1);
        let b = Coord::new(4, 5);
        assert_eq!(manhattan(a, b), 7);
        assert_eq!(chebyshev(a, b), 4);
        assert_eq!(euclidean(a, b), 5.0);
        assert_eq!(Metric::Manhattan.distance(a, b), 7.0);
        assert_eq!(Metric::Euclidean.distance(a, a), 0.0);
    }

    #[test]
    fn euclidean_never_exceeds_manhattan() {
        let o = Coord::ZERO;
        for x in -3..=3 {
            for y in -3..=3 {
                let c = Coord::new(x, y);
                assert!(euclidean(o, c) <= f64::from(manhattan(o, c)));
                assert!(euclidean(o, c) >= f64::from(chebyshev(o, c)));
            }
        }
    }

    #[test]
    fn parse_metric_names() {
        assert_eq!("Euclidean".parse(), Ok(Metric::Euclidean));
        assert_eq!(" l1 ".parse(), Ok(Metric::Manhattan));
        let err = "octile".parse::<Metric>().unwrap_err();
        assert_eq!(err, UnknownMetric("octile".into()));
        assert_eq!(
            err.to_string(),
            "unknown metric 'octile' (expected euclidean or manhattan)"
        );
        assert_eq!(Metric::Manhattan.to_string(), "manhattan");
    }
}
