use crate::types::WorkoutType;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown workout type: {0:?} (expected running or cycling)")]
pub struct UnknownWorkoutType(pub String);

impl FromStr for WorkoutType {
    type Err = UnknownWorkoutType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "running" => Ok(Self::Running),
            "cycling" => Ok(Self::Cycling),
            other => Err(UnknownWorkoutType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

impl FromStr for Field {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distance" => Ok(Self::Distance),
            "duration" => Ok(Self::Duration),
            "cadence" => Ok(Self::Cadence),
            "elevation" => Ok(Self::Elevation),
            _ => Err(()),
        }
    }
}

/// The workout entry form: a type select, four text inputs, and the
/// visibility of the form and of the cadence/elevation rows.
#[derive(Debug, Clone)]
pub struct Form {
    kind: WorkoutType,
    distance: String,
    duration: String,
    cadence: String,
    elevation: String,
    hidden: bool,
    cadence_row_hidden: bool,
    elevation_row_hidden: bool,
    focused: Option<Field>,
}

impl Default for Form {
    fn default() -> Self {
        Self {
            kind: WorkoutType::Running,
            distance: String::new(),
            duration: String::new(),
            cadence: String::new(),
            elevation: String::new(),
            hidden: true,
            cadence_row_hidden: false,
            elevation_row_hidden: true,
            focused: None,
        }
    }
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn kind(&self) -> WorkoutType {
        self.kind
    }

    /// Selecting a different type also swaps the cadence and elevation rows.
    pub fn set_type(&mut self, kind: WorkoutType) {
        if kind != self.kind {
            self.kind = kind;
            self.toggle_elevation_field();
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    pub fn raw(&self, field: Field) -> &str {
        match field {
            Field::Distance => &self.distance,
            Field::Duration => &self.duration,
            Field::Cadence => &self.cadence,
            Field::Elevation => &self.elevation,
        }
    }

    /// Field value as a number; NaN when empty or not a number.
    pub fn number(&self, field: Field) -> f64 {
        parse_number(self.raw(field))
    }

    pub fn show(&mut self) {
        self.hidden = false;
        self.focused = Some(Field::Distance);
    }

    pub fn hide(&mut self) {
        self.hidden = true;
        self.focused = None;
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub const fn focused(&self) -> Option<Field> {
        self.focused
    }

    fn toggle_elevation_field(&mut self) {
        self.elevation_row_hidden = !self.elevation_row_hidden;
        self.cadence_row_hidden = !self.cadence_row_hidden;
    }

    pub const fn is_row_hidden(&self, field: Field) -> bool {
        match field {
            Field::Cadence => self.cadence_row_hidden,
            Field::Elevation => self.elevation_row_hidden,
            Field::Distance | Field::Duration => false,
        }
    }

    pub fn clear_inputs(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.cadence.clear();
        self.elevation.clear();
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Distance => &mut self.distance,
            Field::Duration => &mut self.duration,
            Field::Cadence => &mut self.cadence,
            Field::Elevation => &mut self.elevation,
        }
    }
}

pub fn parse_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}
