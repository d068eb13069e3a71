//! # Hazard Geometry
//!
//! Distance from the drifting ship to the nearest thing it can ground on.
//! Coordinates are local NED metres; `geo` geometries store east as `x`
//! and north as `y`.

use std::fmt;

use geo::{Coord, EuclideanDistance, LineString, MultiPolygon, Point, Polygon};
use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, GroundingRiskError, Result};
use crate::types::Position;

/// Kind of hazard, ordered by cost of a grounding on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardClass {
    /// Natural shoreline or shallow water
    Shore,
    /// Aquaculture installation
    FishFarm,
    /// Bridges, quays, offshore structures
    Infrastructure,
}

impl HazardClass {
    /// Relative cost multiplier of an impact
    pub fn cost_factor(&self) -> f64 {
        match self {
            HazardClass::Shore => 1.0,
            HazardClass::FishFarm => 2.5,
            HazardClass::Infrastructure => 5.0,
        }
    }

    pub fn lowest_cost() -> Self {
        HazardClass::Shore
    }
}

impl fmt::Display for HazardClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HazardClass::Shore => write!(f, "shore"),
            HazardClass::FishFarm => write!(f, "fish farm"),
            HazardClass::Infrastructure => write!(f, "infrastructure"),
        }
    }
}

/// Nearest hazard seen from a position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardProximity {
    /// Distance to the hazard boundary (m), 0 inside it
    pub distance: f64,
    pub class: HazardClass,
}

impl HazardProximity {
    /// Nothing in range
    pub fn none() -> Self {
        Self {
            distance: f64::INFINITY,
            class: HazardClass::lowest_cost(),
        }
    }

    /// The closer of two proximities; ties go to the costlier hazard
    pub fn closest(self, other: Self) -> Self {
        if other.distance < self.distance
            || (other.distance == self.distance && other.class > self.class)
        {
            other
        } else {
            self
        }
    }
}

/// Obstacle/shore provider queried by the drift simulator
pub trait HazardMap {
    fn nearest_hazard(&self, position: Position) -> HazardProximity;

    /// Distance to the nearest hazard (m)
    fn distance(&self, position: Position) -> f64 {
        self.nearest_hazard(position).distance
    }
}

impl<T: HazardMap + ?Sized> HazardMap for &T {
    fn nearest_hazard(&self, position: Position) -> HazardProximity {
        (**self).nearest_hazard(position)
    }
}

// ============================================================================
// GEOMETRIES
// ============================================================================

/// Circular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticObstacle {
    pub north: f64,
    pub east: f64,
    pub radius: f64,
    pub class: HazardClass,
}

impl StaticObstacle {
    pub fn new(north: f64, east: f64, radius: f64, class: HazardClass) -> Result<Self> {
        ensure_non_negative("radius", radius)?;
        if !north.is_finite() || !east.is_finite() {
            return Err(GroundingRiskError::invalid("obstacle centre", "must be finite"));
        }
        Ok(Self {
            north,
            east,
            radius,
            class,
        })
    }

    pub fn centre(&self) -> Position {
        Position::new(self.north, self.east)
    }

    /// Distance from `position` to the rim, 0 inside
    pub fn distance(&self, position: Position) -> f64 {
        (self.centre().distance_to(&position) - self.radius).max(0.0)
    }
}

impl HazardMap for StaticObstacle {
    fn nearest_hazard(&self, position: Position) -> HazardProximity {
        HazardProximity {
            distance: self.distance(position),
            class: self.class,
        }
    }
}

/// Land area bounded by polygons
#[derive(Debug, Clone, PartialEq)]
pub struct ShoreLine {
    land: MultiPolygon<f64>,
    class: HazardClass,
}

impl ShoreLine {
    pub fn new(land: MultiPolygon<f64>) -> Self {
        Self {
            land,
            class: HazardClass::Shore,
        }
    }

    /// Single land polygon from (north, east) vertices
    pub fn from_outline(outline: &[Position]) -> Result<Self> {
        if outline.len() < 3 {
            return Err(GroundingRiskError::EmptyCollection {
                entity: "ShoreLine",
                item: "triangle of vertices",
            });
        }
        let ring: Vec<Coord<f64>> = outline.iter().map(|p| to_coord(*p)).collect();
        let polygon = Polygon::new(LineString::from(ring), vec![]);
        Ok(Self::new(MultiPolygon::new(vec![polygon])))
    }

    /// Half-plane of land north of `north_limit`, spanning `east_range`
    pub fn straight(north_limit: f64, east_range: (f64, f64), depth: f64) -> Result<Self> {
        let depth = ensure_non_negative("depth", depth)?;
        let (west, east) = east_range;
        Self::from_outline(&[
            Position::new(north_limit, west),
            Position::new(north_limit, east),
            Position::new(north_limit + depth, east),
            Position::new(north_limit + depth, west),
        ])
    }

    pub fn with_class(mut self, class: HazardClass) -> Self {
        self.class = class;
        self
    }

    pub fn land(&self) -> &MultiPolygon<f64> {
        &self.land
    }
}

impl HazardMap for ShoreLine {
    fn nearest_hazard(&self, position: Position) -> HazardProximity {
        if self.land.0.is_empty() {
            return HazardProximity::none();
        }
        let point = Point::from(to_coord(position));
        HazardProximity {
            distance: point.euclidean_distance(&self.land),
            class: self.class,
        }
    }
}

fn to_coord(position: Position) -> Coord<f64> {
    Coord {
        x: position.east,
        y: position.north,
    }
}

/// Shorelines and obstacles queried together
#[derive(Debug, Clone, Default)]
pub struct HazardCollection {
    shorelines: Vec<ShoreLine>,
    obstacles: Vec<StaticObstacle>,
}

impl HazardCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shoreline(mut self, shoreline: ShoreLine) -> Self {
        self.shorelines.push(shoreline);
        self
    }

    pub fn with_obstacle(mut self, obstacle: StaticObstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn obstacles(&self) -> &[StaticObstacle] {
        &self.obstacles
    }

    pub fn shorelines(&self) -> &[ShoreLine] {
        &self.shorelines
    }

    pub fn is_empty(&self) -> bool {
        self.shorelines.is_empty() && self.obstacles.is_empty()
    }
}

impl HazardMap for HazardCollection {
    fn nearest_hazard(&self, position: Position) -> HazardProximity {
        let shore = self
            .shorelines
            .iter()
            .map(|s| s.nearest_hazard(position));
        let obstacles = self.obstacles.iter().map(|o| o.nearest_hazard(position));
        shore
            .chain(obstacles)
            .fold(HazardProximity::none(), HazardProximity::closest)
    }
}
