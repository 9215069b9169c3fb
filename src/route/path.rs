//! Plan-view route geometry
//!
//! # Internal units
//!
//! Points are stored as `Point2<f64>` in **metres** on a local planar grid
//! (easting, northing). Public APIs return UOM lengths.

use crate::route::hazard::Hazard;
use crate::types::*;
use nalgebra as na;
use serde::{Deserialize, Serialize};

/// A route as a polyline of plan-view points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    points: Vec<na::Point2<f64>>,
}

impl RoutePath {
    pub fn new(points: Vec<na::Point2<f64>>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[na::Point2<f64>] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total length along the polyline
    pub fn length(&self) -> Length {
        let total: f64 = self
            .points
            .windows(2)
            .map(|w| na::distance(&w[0], &w[1]))
            .sum();
        from_coord(total)
    }

    /// Chainage of the point on the route nearest to `point`.
    ///
    /// Returns `None` for an empty path. A single-point path has chainage 0.
    pub fn chainage_of(&self, point: &na::Point2<f64>) -> Option<Length> {
        let first = self.points.first()?;
        let mut best_distance = na::distance(first, point);
        let mut best_chainage = 0.0;
        let mut travelled = 0.0;

        for w in self.points.windows(2) {
            let (start, end) = (w[0], w[1]);
            let segment: na::Vector2<f64> = end - start;
            let segment_length = segment.norm();

            // degenerate segments add nothing and the start point was already checked
            if segment_length > 0.0 {
                let t = ((*point - start).dot(&segment) / (segment_length * segment_length))
                    .clamp(0.0, 1.0);
                let projected = start + segment * t;
                let distance = na::distance(&projected, point);

                if distance < best_distance {
                    best_distance = distance;
                    best_chainage = travelled + t * segment_length;
                }
            }
            travelled += segment_length;
        }

        Some(from_coord(best_chainage))
    }

    /// Set a hazard's chainage from its plan position
    pub fn locate(&self, hazard: &mut Hazard, position: &na::Point2<f64>) {
        hazard.chainage = self.chainage_of(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::hazard::{HazardType, Severity};
    use approx::assert_relative_eq;

    fn l_shaped() -> RoutePath {
        RoutePath::new(vec![
            na::Point2::new(0.0, 0.0),
            na::Point2::new(100.0, 0.0),
            na::Point2::new(100.0, 50.0),
        ])
    }

    #[test]
    fn test_length() {
        assert_relative_eq!(l_shaped().length().get::<meter>(), 150.0);
        assert_relative_eq!(RoutePath::default().length().get::<meter>(), 0.0);
    }

    #[test]
    fn test_chainage_projects_onto_nearest_segment() {
        let path = l_shaped();

        let on_first = path.chainage_of(&na::Point2::new(40.0, 3.0)).unwrap();
        assert_relative_eq!(on_first.get::<meter>(), 40.0);

        let on_second = path.chainage_of(&na::Point2::new(104.0, 30.0)).unwrap();
        assert_relative_eq!(on_second.get::<meter>(), 130.0);

        let before_start = path.chainage_of(&na::Point2::new(-20.0, 0.0)).unwrap();
        assert_relative_eq!(before_start.get::<meter>(), 0.0);

        let past_end = path.chainage_of(&na::Point2::new(100.0, 80.0)).unwrap();
        assert_relative_eq!(past_end.get::<meter>(), 150.0);
    }

    #[test]
    fn test_chainage_of_degenerate_paths() {
        assert!(RoutePath::default().chainage_of(&na::Point2::new(1.0, 1.0)).is_none());

        let single = RoutePath::new(vec![na::Point2::new(5.0, 5.0)]);
        assert_relative_eq!(
            single.chainage_of(&na::Point2::new(1.0, 1.0)).unwrap().get::<meter>(),
            0.0
        );
    }

    #[test]
    fn test_locate_sets_hazard_chainage() {
        let mut hazard = Hazard::new(HazardType::Bridge, Severity::Safe);
        l_shaped().locate(&mut hazard, &na::Point2::new(60.0, -2.0));
        assert_relative_eq!(hazard.chainage.unwrap().get::<meter>(), 60.0);
    }
}
