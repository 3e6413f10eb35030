//! Canned error responses referenced from route documentation

use crate::routing_utils::BasicErrorResponse;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Submitted data was invalid",
    example = json!({
        "error_code": "invalid_input",
        "error_description": "Submitted data was invalid.",
        "extra_info": {
            "title": [
                {
                    "code": "length",
                    "message": null,
                    "params": {
                        "value": "",
                        "min": 1
                    }
                }
            ]
        }
    })
)]
pub struct BasicError400Validation(#[to_schema] BasicErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "The requested entity could not be found",
    example = json!({
        "error_code": "not_found",
        "error_description": "The requested entity could not be found.",
        "extra_info": "todo 12 does not exist"
    })
)]
pub struct BasicError404(#[to_schema] BasicErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Something unexpected went wrong inside the server",
    example = json!({
        "error_code": "internal_error",
        "error_description": "Could not access data to complete your request",
        "extra_info": "fetch household todos"
    })
)]
pub struct BasicError500(#[to_schema] BasicErrorResponse);
