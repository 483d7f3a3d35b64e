use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration_in_minutes: u32,
}

impl Movie {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        duration_in_minutes: u32,
    ) -> Self {
        Movie {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            duration_in_minutes,
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct MovieRegistrationRequest {
    #[validate(length(min = 1, message = "movie id must not be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 1, message = "duration must be at least one minute"))]
    pub duration_in_minutes: u32,
}

impl From<MovieRegistrationRequest> for Movie {
    fn from(request: MovieRegistrationRequest) -> Self {
        Movie::new(
            request.id,
            request.title,
            request.description,
            request.duration_in_minutes,
        )
    }
}
