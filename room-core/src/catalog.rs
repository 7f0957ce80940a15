//! The compiled hotspot set and the navigation view derived from it.

use std::collections::{BTreeMap, HashMap};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::types::{Position, ProgressRange};

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("hotspot {id:?} has invalid range {start}..{end}")]
    InvalidRange { id: String, start: f64, end: f64 },
    #[error("duplicate hotspot id {0:?}")]
    DuplicateId(String),
}

/// Jump targets pinned away from their range midpoint, by hotspot id.
pub type TargetMap = BTreeMap<String, f64>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HighlightPoint {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub range: ProgressRange,
    /// Compiled default position; the working position lives in the overlay manager.
    pub position: Position,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavigationPoint {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub range: ProgressRange,
    /// Progress the jump navigation scrolls to.
    pub target: f64,
}

fn point(id: &str, name: &str, icon: &str, range: (f64, f64), pos: (f64, f64), description: &str) -> HighlightPoint {
    HighlightPoint {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        range: ProgressRange::new(range.0, range.1),
        position: Position::new(pos.0, pos.1),
        description: description.to_string(),
    }
}

/// Hotspots of the living-room scene.
pub fn default_points() -> Vec<HighlightPoint> {
    vec![
        point("sofa", "Sofa", "🛋️", (0.01, 0.05), (25.0, 70.0), "Comfort zone"),
        point("fireplace", "Fireplace", "🔥", (0.15, 0.20), (75.0, 60.0), "Warm and cozy"),
        point("tv", "TV", "📺", (0.30, 0.40), (50.0, 30.0), "Entertainment hub"),
        point("bookshelf", "Bookshelf", "📚", (0.60, 0.65), (20.0, 40.0), "Knowledge corner"),
    ]
}

#[derive(Clone, Debug)]
pub struct Catalog {
    points: Vec<HighlightPoint>,
    index: HashMap<String, usize>,
    target_overrides: TargetMap,
}

impl Catalog {
    pub fn new(points: Vec<HighlightPoint>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            if !p.range.is_valid() {
                return Err(CatalogError::InvalidRange {
                    id: p.id.clone(),
                    start: p.range.start,
                    end: p.range.end,
                });
            }
            if index.insert(p.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(p.id.clone()));
            }
        }
        Ok(Self { points, index, target_overrides: TargetMap::new() })
    }

    /// The built-in scene catalog.
    pub fn compiled() -> Self {
        let points = default_points();
        let index = points.iter().enumerate().map(|(i, p)| (p.id.clone(), i)).collect();
        Self { points, index, target_overrides: TargetMap::new() }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[HighlightPoint] {
        &self.points
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&HighlightPoint> {
        self.index_of(id).map(|i| &self.points[i])
    }

    /// Pins the jump target of `id` to `target` instead of its range midpoint.
    pub fn set_target_override(&mut self, id: &str, target: f64) -> bool {
        if !self.index.contains_key(id) || !(0.0..=1.0).contains(&target) {
            return false;
        }
        self.target_overrides.insert(id.to_string(), target);
        true
    }

    pub fn clear_target_overrides(&mut self) {
        self.target_overrides.clear();
    }

    pub fn target_overrides(&self) -> &TargetMap {
        &self.target_overrides
    }

    fn navigation_view(&self, p: &HighlightPoint) -> NavigationPoint {
        let target = self
            .target_overrides
            .get(&p.id)
            .copied()
            .unwrap_or_else(|| p.range.midpoint());
        NavigationPoint {
            id: p.id.clone(),
            name: p.name.clone(),
            icon: p.icon.clone(),
            description: p.description.clone(),
            range: p.range,
            target,
        }
    }

    pub fn navigation_point(&self, id: &str) -> Option<NavigationPoint> {
        self.get(id).map(|p| self.navigation_view(p))
    }

    pub fn navigation_point_at(&self, index: usize) -> Option<NavigationPoint> {
        self.points.get(index).map(|p| self.navigation_view(p))
    }

    pub fn navigation_points(&self) -> Vec<NavigationPoint> {
        self.points.iter().map(|p| self.navigation_view(p)).collect()
    }

    /// Hotspot considered "active" at `progress`.
    ///
    /// Among all hotspots whose range contains `progress`, the one whose range
    /// midpoint is closest wins; equal distances go to the earlier catalog entry.
    pub fn active_index(&self, progress: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, p) in self.points.iter().enumerate() {
            if !p.range.contains(progress) {
                continue;
            }
            let dist = (p.range.midpoint() - progress).abs();
            match best {
                Some((_, d)) if d <= dist => {}
                _ => best = Some((i, dist)),
            }
        }
        best.map(|(i, _)| i)
    }

    pub fn active_point(&self, progress: f64) -> Option<&HighlightPoint> {
        self.active_index(progress).map(|i| &self.points[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiled_catalog_is_valid() {
        let compiled = Catalog::compiled();
        let validated = Catalog::new(default_points()).unwrap();
        assert_eq!(compiled.points(), validated.points());
        assert_eq!(compiled.index_of("tv"), Some(2));
    }

    #[test]
    fn test_navigation_targets_default_to_midpoint() {
        let catalog = Catalog::compiled();
        let targets: Vec<f64> = catalog.navigation_points().iter().map(|p| p.target).collect();
        let expected = [0.03, 0.175, 0.35, 0.625];
        for (t, e) in targets.iter().zip(expected) {
            assert!((t - e).abs() < 1e-9, "{t} != {e}");
        }
    }

    #[test]
    fn test_target_override() {
        let mut catalog = Catalog::compiled();
        assert!(catalog.set_target_override("tv", 0.32));
        assert!(!catalog.set_target_override("tv", 1.5));
        assert!(!catalog.set_target_override("lamp", 0.5));
        assert_eq!(catalog.navigation_point("tv").unwrap().target, 0.32);
        assert_eq!(catalog.target_overrides().len(), 1);
        catalog.clear_target_overrides();
        assert!((catalog.navigation_point("tv").unwrap().target - 0.35).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_ranges_and_duplicates() {
        let mut pts = default_points();
        pts[1].range = ProgressRange::new(0.3, 0.2);
        assert!(matches!(Catalog::new(pts), Err(CatalogError::InvalidRange { .. })));

        let mut pts = default_points();
        pts[3].id = "sofa".into();
        assert_eq!(Catalog::new(pts).unwrap_err(), CatalogError::DuplicateId("sofa".into()));
    }

    #[test]
    fn test_active_point_prefers_nearest_midpoint() {
        let mut pts = default_points();
        // a: 0.125..0.375 (mid 0.25), b: 0.25..0.5 (mid 0.375)
        pts[0].range = ProgressRange::new(0.125, 0.375);
        pts[1].range = ProgressRange::new(0.25, 0.5);
        pts[2].range = ProgressRange::new(0.75, 0.8);
        pts[3].range = ProgressRange::new(0.85, 0.9);
        let catalog = Catalog::new(pts).unwrap();
        assert_eq!(catalog.active_index(0.26), Some(0));
        assert_eq!(catalog.active_index(0.36), Some(1));
        // equidistant: earlier entry wins
        assert_eq!(catalog.active_index(0.3125), Some(0));
        assert_eq!(catalog.active_index(0.6), None);
    }
}
