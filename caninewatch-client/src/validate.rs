//! Request validation.
//!
//! These checks run before a request is built. A failure is reported as
//! [`FeedError::InputInvalid`] and nothing reaches the network.

use caninewatch_types::{DogProfile, FertilityRequest, HealthCheckRequest};

use crate::FeedError;

/// A dog name must contain something other than whitespace.
pub fn dog_name(name: &str) -> Result<&str, FeedError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FeedError::invalid("dog name is required"));
    }
    Ok(trimmed)
}

/// Validate a health check sample.
pub fn health_check(request: &HealthCheckRequest) -> Result<(), FeedError> {
    dog_name(&request.dog_name)?;
    if !request.temperature.is_finite() {
        return Err(FeedError::invalid("temperature must be a number"));
    }
    if !(0..=100).contains(&request.activity_percent) {
        return Err(FeedError::invalid(format!(
            "activity must be between 0 and 100, got {}",
            request.activity_percent
        )));
    }
    Ok(())
}

/// Validate a fertility prediction request.
pub fn fertility(request: &FertilityRequest) -> Result<(), FeedError> {
    dog_name(&request.dog_name)?;
    breed_age_weight(&request.breed, request.age_months, request.weight_kg)
}

/// Validate a profile before it is written.
pub fn profile(profile: &DogProfile) -> Result<(), FeedError> {
    dog_name(&profile.name)?;
    breed_age_weight(&profile.breed, profile.age_months, profile.weight_kg)
}

fn breed_age_weight(breed: &str, age_months: u32, weight_kg: f64) -> Result<(), FeedError> {
    if breed.trim().is_empty() {
        return Err(FeedError::invalid("breed is required"));
    }
    if age_months == 0 {
        return Err(FeedError::invalid("age in months must be greater than zero"));
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(FeedError::invalid("weight must be a positive number of kilograms"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(temperature: f64, activity_percent: i32) -> HealthCheckRequest {
        HealthCheckRequest {
            dog_name: "Max".to_string(),
            temperature,
            activity_percent,
        }
    }

    #[test]
    fn test_dog_name_is_trimmed() {
        assert_eq!(dog_name("  Max ").unwrap(), "Max");
        assert!(matches!(dog_name("   "), Err(FeedError::InputInvalid(_))));
    }

    #[test]
    fn test_health_check_bounds() {
        assert!(health_check(&sample(38.5, 0)).is_ok());
        assert!(health_check(&sample(38.5, 100)).is_ok());
        assert!(health_check(&sample(38.5, 101)).is_err());
        assert!(health_check(&sample(38.5, -1)).is_err());
        assert!(health_check(&sample(f64::NAN, 50)).is_err());
    }

    #[test]
    fn test_fertility_requires_fields() {
        let mut request = FertilityRequest {
            dog_name: "Bella".to_string(),
            breed: "Beagle".to_string(),
            age_months: 18,
            weight_kg: 11.5,
            last_heat_days: Some(120),
        };
        assert!(fertility(&request).is_ok());

        request.breed = " ".to_string();
        assert!(fertility(&request).is_err());

        request.breed = "Beagle".to_string();
        request.weight_kg = 0.0;
        assert!(fertility(&request).is_err());

        request.weight_kg = 11.5;
        request.age_months = 0;
        assert!(fertility(&request).is_err());
    }

    #[test]
    fn test_profile_requires_name() {
        let profile = DogProfile::new("", "Poodle", 24, 20.0);
        assert_eq!(
            super::profile(&profile),
            Err(FeedError::InputInvalid("dog name is required".to_string()))
        );
    }
}
