use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Theater {
    pub id: String,
    pub name: String,
    pub location: String,
    // Ids of hosted shows, in the order they were added to the ledger
    pub shows: Vec<String>,
}

impl Theater {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: impl Into<String>) -> Self {
        Theater {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            shows: Vec::new(),
        }
    }

    pub fn hosts(&self, show_id: &str) -> bool {
        self.shows.iter().any(|id| id == show_id)
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct TheaterRegistrationRequest {
    #[validate(length(min = 1, message = "theater id must not be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub location: String,
}

impl From<TheaterRegistrationRequest> for Theater {
    fn from(request: TheaterRegistrationRequest) -> Self {
        Theater::new(request.id, request.name, request.location)
    }
}
