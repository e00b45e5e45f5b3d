use crate::geom::{validate_coordinates, LatLng};

/// Configured maximum region size in km². The gate is strict: an area equal
/// to the limit is allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaLimit(pub f64);

impl AreaLimit {
    #[inline] pub fn km2(&self) -> f64 { self.0 }

    #[inline] pub fn is_exceeded(&self, area_km2: f64) -> bool { area_km2 > self.0 }

    /// Progress-bar view of `area_km2` against the limit.
    pub fn gauge(&self, area_km2: f64) -> AreaGauge {
        let percent = if self.0 > 0.0 { area_km2 / self.0 * 100.0 } else { f64::INFINITY };
        AreaGauge {
            percent,
            text: format!("{}/{} km²", area_km2.floor(), self.0),
            over_limit: self.is_exceeded(area_km2),
        }
    }
}

/// Size feedback shown while a region is being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaGauge {
    /// Share of the limit used, may exceed 100
    pub percent: f64,
    /// e.g. "12/50 km²"
    pub text: String,
    pub over_limit: bool,
}

/// Why a pending region may not be saved. All flags false means it may.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validation {
    pub empty_name: bool,
    pub too_few_points: bool,
    pub over_area_limit: bool,
}

impl Validation {
    /// Check a candidate region. `limit` is `None` for programmatic adds,
    /// which are not size-gated.
    pub fn check(name: &str, coordinates: &[LatLng], area_km2: f64, limit: Option<AreaLimit>) -> Self {
        Self {
            empty_name: name.trim().is_empty(),
            too_few_points: validate_coordinates(coordinates).len() < 3,
            over_area_limit: limit.is_some_and(|l| l.is_exceeded(area_km2)),
        }
    }

    #[inline]
    pub fn is_ok(&self) -> bool { !(self.empty_name || self.too_few_points || self.over_area_limit) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<LatLng> {
        vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 0.01), LatLng::new(0.01, 0.0)]
    }

    #[test]
    fn limit_boundary_is_strict() {
        let limit = AreaLimit(50.0);
        assert!(limit.is_exceeded(51.0));
        assert!(limit.is_exceeded(50.000001));
        assert!(!limit.is_exceeded(50.0));
    }

    #[test]
    fn gauge_text_and_percent() {
        let gauge = AreaLimit(50.0).gauge(12.7);
        assert_eq!(gauge.text, "12/50 km²");
        assert!((gauge.percent - 25.4).abs() < 1e-9);
        assert!(!gauge.over_limit);
        assert!(AreaLimit(50.0).gauge(75.0).over_limit);
    }

    #[test]
    fn each_flag_is_reported() {
        assert!(Validation::check("Field", &triangle(), 1.0, Some(AreaLimit(50.0))).is_ok());

        let v = Validation::check("   ", &triangle(), 1.0, None);
        assert!(v.empty_name && !v.is_ok());

        let v = Validation::check("Field", &triangle()[..2], 0.0, None);
        assert!(v.too_few_points && !v.is_ok());

        let v = Validation::check("Field", &triangle(), 51.0, Some(AreaLimit(50.0)));
        assert!(v.over_area_limit && !v.is_ok());

        assert!(Validation::check("Field", &triangle(), 51.0, None).is_ok());
    }
}
