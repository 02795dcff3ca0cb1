//! Dog profiles owned by the backend.

/// A dog profile. `name` is the identity key.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DogProfile {
    pub name: String,
    pub breed: String,
    pub age_months: u32,
    pub weight_kg: f64,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub last_updated: Option<String>,
}

impl DogProfile {
    /// Create a profile that has not been stored yet.
    pub fn new(
        name: impl Into<String>,
        breed: impl Into<String>,
        age_months: u32,
        weight_kg: f64,
    ) -> Self {
        Self {
            name: name.into(),
            breed: breed.into(),
            age_months,
            weight_kg,
            last_updated: None,
        }
    }
}

/// Answer to a profile write.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProfileWriteResponse {
    pub success: bool,
    pub profile: Option<DogProfile>,
    pub error: Option<String>,
}

/// Backend liveness and model status.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ApiHealth {
    pub status: String,
    pub models_loaded: bool,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_profile_roundtrip_field_names() {
        let profile = DogProfile::new("Bella", "Beagle", 18, 11.5);
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["age_months"], 18);
        assert_eq!(json["weight_kg"], 11.5);
        assert!(json.get("last_updated").is_none());
    }

    #[test]
    fn test_write_response_failure() {
        let json = r#"{"error": "Dog name is required"}"#;
        let response: ProfileWriteResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert!(response.profile.is_none());
        assert_eq!(response.error.as_deref(), Some("Dog name is required"));
    }
}
