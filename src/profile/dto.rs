use serde::Deserialize;

/// Request body for a profile update.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
}
