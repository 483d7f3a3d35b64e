use crate::utils::error::AppError;
use rocket::Request;

// Bodies that fail to parse never reach a handler; answer them in the same JSON shape
#[catch(400)]
pub fn bad_request(req: &Request) -> AppError {
    AppError::BadRequest(format!("malformed request to {}", req.uri()))
}

#[catch(422)]
pub fn unprocessable(req: &Request) -> AppError {
    AppError::BadRequest(format!("request body to {} does not match the expected shape", req.uri()))
}
