use super::report_failure;
use crate::domain::assignment::driven_ports::{AssigneeReader, AssigneeWriter, DetectActor};
use crate::domain::assignment::driving_ports::AssignmentPort;
use crate::domain::todo::driven_ports::TodoReader;
use crate::external_connections::ExternalConnectivity;
use crate::persistence::db_assignee_driven_ports::{
    DbAssigneeReader, DbAssigneeWriter, DbDetectActor,
};
use crate::persistence::db_todo_driven_ports::DbTodoReader;
use crate::routing_utils::Json;
use crate::{AppState, SharedData, domain, dto};
use axum::Router;
use axum::extract::{Path, State};
use axum::response::ErrorResponse;
use axum::routing::{get, post};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(assign_actor, unassign_actor, assignees_for_todo))]
/// Defines the OpenAPI documentation for the todo assignment API
pub struct AssignmentApi;
/// Constant used to group assignment endpoints in OpenAPI documentation
pub const ASSIGNMENT_API_GROUP: &str = "Assignment";

/// Adds the assignment routes under "/todos/{todo_id}" to the application router
pub fn assignment_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/todos/:todo_id/assign",
            post(
                async |State(app_state): AppState,
                       Path(todo_id): Path<i32>,
                       Json(actor): Json<dto::ActorRef>| {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let assignment_service = domain::assignment::AssignmentService {};

                    assign_actor(
                        todo_id,
                        actor,
                        &mut ext_cxn,
                        &assignment_service,
                        &DbTodoReader,
                        &DbDetectActor,
                        &DbAssigneeReader,
                        &DbAssigneeWriter,
                    )
                    .await
                },
            ),
        )
        .route(
            "/todos/:todo_id/unassign",
            post(
                async |State(app_state): AppState,
                       Path(todo_id): Path<i32>,
                       Json(actor): Json<dto::ActorRef>| {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let assignment_service = domain::assignment::AssignmentService {};

                    unassign_actor(
                        todo_id,
                        actor,
                        &mut ext_cxn,
                        &assignment_service,
                        &DbAssigneeReader,
                        &DbAssigneeWriter,
                    )
                    .await
                },
            ),
        )
        .route(
            "/todos/:todo_id/assigned",
            get(async |State(app_state): AppState, Path(todo_id): Path<i32>| {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let assignment_service = domain::assignment::AssignmentService {};

                assignees_for_todo(
                    todo_id,
                    &mut ext_cxn,
                    &assignment_service,
                    &DbAssigneeReader,
                )
                .await
            }),
        )
}

fn to_dtos(assigned: Vec<domain::assignment::Assignee>) -> Vec<dto::Assignee> {
    assigned.into_iter().map(dto::Assignee::from).collect()
}

#[utoipa::path(
    post,
    path = "/todos/{todo_id}/assign",
    tag = ASSIGNMENT_API_GROUP,
    params(
        ("todo_id" = i32, Path, description = "The todo to assign"),
    ),
    request_body = dto::ActorRef,
    responses(
        (status = 200, description = "Everyone now assigned to the todo, members first", body = [dto::Assignee]),
        (status = 404, response = dto::err_resps::BasicError404),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Assigns a member or child to a todo. Assigning someone who is already assigned succeeds
/// without changing anything.
async fn assign_actor(
    todo_id: i32,
    actor: dto::ActorRef,
    ext_cxn: &mut impl ExternalConnectivity,
    assignment_service: &impl AssignmentPort,
    todo_read: &impl TodoReader,
    actor_detect: &impl DetectActor,
    assignee_read: &impl AssigneeReader,
    assignee_write: &impl AssigneeWriter,
) -> Result<Json<Vec<dto::Assignee>>, ErrorResponse> {
    let actor = domain::assignment::ActorRef::from(actor);
    info!("Assigning {actor} to todo {todo_id}");

    let assigned = assignment_service
        .assign_actor(
            todo_id,
            actor,
            ext_cxn,
            todo_read,
            actor_detect,
            assignee_read,
            assignee_write,
        )
        .await
        .map_err(|err| report_failure(err, "assign a todo"))?;

    Ok(Json(to_dtos(assigned)))
}

#[utoipa::path(
    post,
    path = "/todos/{todo_id}/unassign",
    tag = ASSIGNMENT_API_GROUP,
    params(
        ("todo_id" = i32, Path, description = "The todo to unassign"),
    ),
    request_body = dto::ActorRef,
    responses(
        (status = 200, description = "Everyone still assigned to the todo, members first. Empty if the todo doesn't exist.", body = [dto::Assignee]),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Removes a member or child from a todo. Removing someone who was never assigned succeeds
/// without changing anything.
///
/// Unlike assigning, this never checks that the todo or the actor exist: unassigning from a
/// missing todo responds with 200 and an empty list rather than 404.
async fn unassign_actor(
    todo_id: i32,
    actor: dto::ActorRef,
    ext_cxn: &mut impl ExternalConnectivity,
    assignment_service: &impl AssignmentPort,
    assignee_read: &impl AssigneeReader,
    assignee_write: &impl AssigneeWriter,
) -> Result<Json<Vec<dto::Assignee>>, ErrorResponse> {
    let actor = domain::assignment::ActorRef::from(actor);
    info!("Unassigning {actor} from todo {todo_id}");

    let assigned = assignment_service
        .unassign_actor(todo_id, actor, ext_cxn, assignee_read, assignee_write)
        .await
        .map_err(|err| report_failure(err, "unassign a todo"))?;

    Ok(Json(to_dtos(assigned)))
}

#[utoipa::path(
    get,
    path = "/todos/{todo_id}/assigned",
    tag = ASSIGNMENT_API_GROUP,
    params(
        ("todo_id" = i32, Path, description = "The todo whose assignees should be listed"),
    ),
    responses(
        (status = 200, description = "Everyone assigned to the todo, members first", body = [dto::Assignee]),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Lists the members and children assigned to a todo
async fn assignees_for_todo(
    todo_id: i32,
    ext_cxn: &mut impl ExternalConnectivity,
    assignment_service: &impl AssignmentPort,
    assignee_read: &impl AssigneeReader,
) -> Result<Json<Vec<dto::Assignee>>, ErrorResponse> {
    info!("Requested assignees for todo {todo_id}");
    let assigned = assignment_service
        .assignees_for_todo(todo_id, ext_cxn, assignee_read)
        .await
        .map_err(|err| report_failure(err, "list a todo's assignees"))?;

    Ok(Json(to_dtos(assigned)))
}
