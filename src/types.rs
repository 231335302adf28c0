use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::fmt;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A point on the map, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Running,
    Cycling,
}

impl WorkoutType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Activity {
    /// `pace` is minutes per kilometre.
    Running { cadence: f64, pace: f64 },
    /// `speed` is distance over duration, as entered.
    Cycling { elevation_gain: f64, speed: f64 },
}

/// A single logged activity.
///
/// `id` and `date` are fixed at construction. The id is the last 10 digits
/// of the creation time in epoch milliseconds, so two workouts created in the
/// same millisecond share an id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workout {
    id: String,
    date: DateTime<Utc>,
    coords: Coords,
    duration: f64,
    distance: f64,
    #[serde(flatten)]
    activity: Activity,
}

impl Workout {
    pub fn running(coords: Coords, duration: f64, distance: f64, cadence: f64) -> Self {
        Self::running_at(Utc::now(), coords, duration, distance, cadence)
    }

    pub fn running_at(
        date: DateTime<Utc>,
        coords: Coords,
        duration: f64,
        distance: f64,
        cadence: f64,
    ) -> Self {
        let pace = calc_pace(duration, distance);
        Self::new(
            date,
            coords,
            duration,
            distance,
            Activity::Running { cadence, pace },
        )
    }

    pub fn cycling(coords: Coords, duration: f64, distance: f64, elevation_gain: f64) -> Self {
        Self::cycling_at(Utc::now(), coords, duration, distance, elevation_gain)
    }

    pub fn cycling_at(
        date: DateTime<Utc>,
        coords: Coords,
        duration: f64,
        distance: f64,
        elevation_gain: f64,
    ) -> Self {
        let speed = calc_speed(distance, duration);
        Self::new(
            date,
            coords,
            duration,
            distance,
            Activity::Cycling {
                elevation_gain,
                speed,
            },
        )
    }

    fn new(
        date: DateTime<Utc>,
        coords: Coords,
        duration: f64,
        distance: f64,
        activity: Activity,
    ) -> Self {
        Self {
            id: id_from_timestamp(date),
            date,
            coords,
            duration,
            distance,
            activity,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub const fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub const fn coords(&self) -> Coords {
        self.coords
    }

    /// Minutes.
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    /// Kilometres.
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    pub const fn activity(&self) -> &Activity {
        &self.activity
    }

    pub const fn kind(&self) -> WorkoutType {
        match self.activity {
            Activity::Running { .. } => WorkoutType::Running,
            Activity::Cycling { .. } => WorkoutType::Cycling,
        }
    }

    pub const fn pace(&self) -> Option<f64> {
        match self.activity {
            Activity::Running { pace, .. } => Some(pace),
            Activity::Cycling { .. } => None,
        }
    }

    pub const fn speed(&self) -> Option<f64> {
        match self.activity {
            Activity::Cycling { speed, .. } => Some(speed),
            Activity::Running { .. } => None,
        }
    }

    /// e.g. `Running on October 15`.
    pub fn description(&self) -> String {
        let name = match self.kind() {
            WorkoutType::Running => "Running",
            WorkoutType::Cycling => "Cycling",
        };
        let month = MONTHS[self.date.month0() as usize];
        format!("{name} on {month} {}", self.date.day())
    }
}

/// Minutes per kilometre.
pub fn calc_pace(duration: f64, distance: f64) -> f64 {
    duration / distance
}

pub fn calc_speed(distance: f64, duration: f64) -> f64 {
    distance / duration
}

fn id_from_timestamp(date: DateTime<Utc>) -> String {
    let ms = date.timestamp_millis().to_string();
    let start = ms.len().saturating_sub(10);
    ms[start..].to_string()
}
