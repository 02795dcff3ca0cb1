//! Dog profile and breed list presentation.

use caninewatch_client::{FeedError, SensorFeed};
use caninewatch_types::DogProfile;
use tracing::warn;

/// Breeds offered when the backend cannot supply its own list.
pub const DEFAULT_BREEDS: [&str; 7] = [
    "Golden Retriever",
    "Labrador Retriever",
    "German Shepherd",
    "Beagle",
    "Poodle",
    "Bulldog",
    "Mixed Breed",
];

/// The fixed fallback list as owned strings.
pub fn default_breeds() -> Vec<String> {
    DEFAULT_BREEDS.iter().map(|b| b.to_string()).collect()
}

/// Fetch the breed list, falling back to [`DEFAULT_BREEDS`] on any failure
/// or when the backend returns nothing. Never fails.
pub async fn breeds_or_default(feed: &dyn SensorFeed) -> Vec<String> {
    match feed.fetch_breeds().await {
        Ok(breeds) if !breeds.is_empty() => breeds,
        Ok(_) => default_breeds(),
        Err(err) => {
            warn!(error = %err, "breed list unavailable, using defaults");
            default_breeds()
        }
    }
}

/// Outcome line for a profile load.
pub fn profile_loaded_text(result: &Result<DogProfile, FeedError>) -> String {
    match result {
        Ok(_) => "✅ Profile loaded from server".to_string(),
        Err(FeedError::Server { status: 404, .. }) => "❌ Profile not found".to_string(),
        Err(err) => format!("❌ {}", err),
    }
}

/// Outcome line for a profile save.
pub fn profile_saved_text(result: &Result<DogProfile, FeedError>) -> String {
    match result {
        Ok(_) => "✅ Profile saved successfully!".to_string(),
        Err(err) => format!("❌ {}", err),
    }
}

/// Multi-line summary of a profile.
pub fn profile_text(profile: &DogProfile) -> String {
    let mut text = format!(
        "Name: {}\nBreed: {}\nAge: {} months\nWeight: {} kg",
        profile.name, profile.breed, profile.age_months, profile.weight_kg
    );
    if let Some(updated) = &profile.last_updated {
        text.push_str(&format!(
            "\nLast updated: {}",
            super::timestamp::format_timestamp(updated)
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_outcomes() {
        let not_found = Err(FeedError::Server {
            status: 404,
            message: Some("Dog profile not found".to_string()),
        });
        assert_eq!(profile_loaded_text(&not_found), "❌ Profile not found");

        let ok = Ok(DogProfile::new("Max", "Beagle", 24, 12.0));
        assert_eq!(profile_loaded_text(&ok), "✅ Profile loaded from server");
        assert_eq!(profile_saved_text(&ok), "✅ Profile saved successfully!");

        let rejected = Err(FeedError::Rejected("Dog name is required".to_string()));
        assert_eq!(
            profile_saved_text(&rejected),
            "❌ Request rejected: Dog name is required"
        );
    }

    #[test]
    fn test_profile_text() {
        let mut profile = DogProfile::new("Max", "Beagle", 24, 12.5);
        profile.last_updated = Some("2025-10-21T18:30:15.123456".to_string());
        assert_eq!(
            profile_text(&profile),
            "Name: Max\nBreed: Beagle\nAge: 24 months\nWeight: 12.5 kg\nLast updated: 21 Oct 2025, 18:30"
        );
    }

    #[test]
    fn test_default_breeds() {
        let breeds = default_breeds();
        assert_eq!(breeds.len(), 7);
        assert_eq!(breeds[0], "Golden Retriever");
        assert_eq!(breeds[6], "Mixed Breed");
    }
}
