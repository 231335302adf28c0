use crate::types::WorkoutType;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Inputs have to be positive numbers")]
    NotFinite(WorkoutType),
    #[error("Inputs have to be positive numbers")]
    NotPositive(WorkoutType),
}

pub fn valid_inputs(inputs: &[f64]) -> bool {
    inputs.iter().all(|v| v.is_finite())
}

pub fn all_positive(inputs: &[f64]) -> bool {
    inputs.iter().all(|&v| v > 0.0)
}

/// All three must be finite and strictly positive.
pub fn check_running(distance: f64, duration: f64, cadence: f64) -> Result<(), ValidationError> {
    let inputs = [distance, duration, cadence];
    if !valid_inputs(&inputs) {
        return Err(ValidationError::NotFinite(WorkoutType::Running));
    }
    if !all_positive(&inputs) {
        return Err(ValidationError::NotPositive(WorkoutType::Running));
    }
    Ok(())
}

/// Elevation only has to be finite; it may be zero or negative.
pub fn check_cycling(distance: f64, duration: f64, elevation: f64) -> Result<(), ValidationError> {
    if !valid_inputs(&[distance, elevation, duration]) {
        return Err(ValidationError::NotFinite(WorkoutType::Cycling));
    }
    if !all_positive(&[distance, duration]) {
        return Err(ValidationError::NotPositive(WorkoutType::Cycling));
    }
    Ok(())
}
