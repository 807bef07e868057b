use serde::{Deserialize, Serialize};

use super::repo::Profile;

/// Request body for the one-time registration completion step.
#[derive(Debug, Deserialize)]
pub struct CompleteRegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub gender: String,
    pub diagnosis: String,
    pub medicine: String,
    pub recommended_activities: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Profile,
}
