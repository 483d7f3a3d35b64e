use crate::utils::error::AppError;
use rocket_okapi::okapi::openapi3::{Response, Responses, MediaType};
use rocket_okapi::okapi::Map;
use rocket_okapi::response::OpenApiResponderInner;
use rocket_okapi::gen::OpenApiGenerator;
use rocket_okapi::okapi::openapi3::RefOr;
use okapi::openapi3::SchemaObject;
use serde_json::json;

impl<'r> OpenApiResponderInner for AppError {
    fn responses(_gen: &mut OpenApiGenerator) -> rocket_okapi::Result<Responses> {
        let mut responses = Responses::default();

        // Seat and transition conflicts share 409, so document one example each status
        let error_responses = [
            ("Bad Request", AppError::ValidationError("seat_ids: at least one seat must be selected".to_string())),
            ("Not Found", AppError::NotFound("Show S1".to_string())),
            ("Conflict", AppError::SeatUnavailable("seat A1 is already booked".to_string())),
        ];

        for (description, error) in error_responses {
            responses.responses.insert(
                error.status().code.to_string(),
                RefOr::Object(Response {
                    description: description.to_string(),
                    content: {
                        let mut content = Map::new();
                        content.insert(
                            "application/json".to_string(),
                            MediaType {
                                schema: Some(SchemaObject::default()),
                                example: Some(json!({
                                    "error": error.to_string()
                                })),
                                ..Default::default()
                            },
                        );
                        content
                    },
                    ..Default::default()
                }),
            );
        }

        Ok(responses)
    }
}
