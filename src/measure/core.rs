use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::geometry::{Point, angle, raw_distance, rectangle_area, round_to};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    Distance,
    Area,
    Angle,
}

impl MeasurementKind {
    /// Clicks needed to complete one measurement.
    pub fn required_points(&self) -> usize {
        match self {
            MeasurementKind::Distance | MeasurementKind::Area => 2,
            MeasurementKind::Angle => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasureMode {
    #[default]
    None,
    Active(MeasurementKind),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(rename = "type")]
    pub kind: MeasurementKind,
    pub points: Vec<Point>,
    pub value: f64,
    pub unit: String,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct MeasurementSession {
    mode: MeasureMode,
    points: Vec<Point>,
    history: Vec<Measurement>,
    grid_size: f64,
    unit: String,
}

impl MeasurementSession {
    /// `grid_size` converts grid units into `unit`.
    pub fn new(grid_size: f64, unit: impl Into<String>) -> Self {
        Self {
            mode: MeasureMode::None,
            points: Vec::new(),
            history: Vec::new(),
            grid_size,
            unit: unit.into(),
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.grid_size, config.unit.clone())
    }

    pub fn mode(&self) -> MeasureMode {
        self.mode
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn history(&self) -> &[Measurement] {
        &self.history
    }

    /// Switching mode discards any partial measurement.
    pub fn set_mode(&mut self, kind: MeasurementKind) {
        self.mode = MeasureMode::Active(kind);
        self.points.clear();
    }

    /// Record a click. Returns the measurement completed by this click, if any.
    pub fn add_point(&mut self, point: Point) -> Option<Measurement> {
        let MeasureMode::Active(kind) = self.mode else {
            return None;
        };

        self.points.push(point);
        if self.points.len() < kind.required_points() {
            return None;
        }

        let points = std::mem::take(&mut self.points);
        let measurement = self.measure(kind, points);
        self.history.push(measurement.clone());
        Some(measurement)
    }

    fn measure(&self, kind: MeasurementKind, points: Vec<Point>) -> Measurement {
        let (value, unit) = match kind {
            MeasurementKind::Distance => (
                round_to(raw_distance(points[0], points[1]) * self.grid_size, 2),
                self.unit.clone(),
            ),
            MeasurementKind::Area => {
                let width = (points[1].x - points[0].x).abs() * self.grid_size;
                let height = (points[1].y - points[0].y).abs() * self.grid_size;
                (rectangle_area(width, height), format!("{}²", self.unit))
            }
            // second click is the vertex
            MeasurementKind::Angle => (angle(points[0], points[1], points[2]), "°".to_string()),
        };

        let label = match kind {
            MeasurementKind::Angle => format!("{value:.1}{unit}"),
            _ => format!("{value:.2} {unit}"),
        };

        Measurement {
            kind,
            points,
            value,
            unit,
            label,
        }
    }

    /// Leave measuring mode. History is untouched.
    pub fn cancel(&mut self) {
        self.mode = MeasureMode::None;
        self.points.clear();
    }

    pub fn remove(&mut self, index: usize) -> Option<Measurement> {
        (index < self.history.len()).then(|| self.history.remove(index))
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl Default for MeasurementSession {
    fn default() -> Self {
        Self::new(1.0, "m")
    }
}
