use crate::types::Coords;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Position> for Coords {
    fn from(p: Position) -> Self {
        Self::new(p.latitude, p.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("position unavailable")]
    Unavailable,
}

/// One-shot position lookup. No retry, no timeout.
pub trait Geolocation {
    fn current_position(&mut self) -> Result<Position, GeolocationError>;
}

/// Position supplied up front, e.g. from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition(pub Option<Position>);

impl FixedPosition {
    pub fn from_args(lat: Option<f64>, lng: Option<f64>) -> Self {
        let position = lat
            .zip(lng)
            .filter(|(lat, lng)| lat.is_finite() && lng.is_finite())
            .map(|(latitude, longitude)| Position {
                latitude,
                longitude,
            });
        Self(position)
    }
}

impl Geolocation for FixedPosition {
    fn current_position(&mut self) -> Result<Position, GeolocationError> {
        self.0.ok_or(GeolocationError::Unavailable)
    }
}
