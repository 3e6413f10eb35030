use crate::routing_utils::{BasicErrorResponse, ExtraInfo, ValidationErrorSchema};
pub use assignment::*;
pub use todo::*;
use utoipa::OpenApi;

mod assignment;
pub mod err_resps;
mod todo;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(
            TodoView,
            NewTodo,
            UpdateTodo,
            Assignee,
            ActorKind,
            ActorRef,
            Category,
            BasicErrorResponse,
            ExtraInfo,
            ValidationErrorSchema,
        ),
        responses(
            err_resps::BasicError400Validation,
            err_resps::BasicError404,
            err_resps::BasicError500,
        ),
    )
)]
/// Captures OpenAPI schemas and canned responses defined in the DTO module
pub struct OpenApiSchemas;
