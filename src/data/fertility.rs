//! Fertility request preparation.

use chrono::NaiveDate;

use caninewatch_client::FeedError;
use caninewatch_types::{DogProfile, FertilityRequest};

/// Days between the last observed heat and `today`.
///
/// A date in the future is rejected as invalid input.
pub fn days_since_last_heat(last_heat: NaiveDate, today: NaiveDate) -> Result<u32, FeedError> {
    let days = (today - last_heat).num_days();
    if days < 0 {
        return Err(FeedError::InputInvalid(format!(
            "last heat date {} is in the future",
            last_heat
        )));
    }
    u32::try_from(days)
        .map_err(|_| FeedError::InputInvalid(format!("last heat date {} is too old", last_heat)))
}

/// Parse a `YYYY-MM-DD` or `DD/MM/YYYY` date as typed by a user.
pub fn parse_heat_date(input: &str) -> Result<NaiveDate, FeedError> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%d/%m/%Y"))
        .map_err(|_| {
            FeedError::InputInvalid(format!(
                "'{}' is not a date (expected YYYY-MM-DD or DD/MM/YYYY)",
                input
            ))
        })
}

/// Build a prediction request for a profile.
pub fn request_for(
    profile: &DogProfile,
    last_heat: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<FertilityRequest, FeedError> {
    let last_heat_days = last_heat
        .map(|date| days_since_last_heat(date, today))
        .transpose()?;

    Ok(FertilityRequest {
        dog_name: profile.name.trim().to_string(),
        breed: profile.breed.trim().to_string(),
        age_months: profile.age_months,
        weight_kg: profile.weight_kg,
        last_heat_days,
    })
}
