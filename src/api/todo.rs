use super::report_failure;
use crate::domain::assignment::driven_ports::AssigneeReader;
use crate::domain::category::driven_ports::CategoryReader;
use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::domain::todo::driving_ports::TodoPort;
use crate::external_connections::{ExternalConnectivity, Transactable};
use crate::persistence::db_assignee_driven_ports::DbAssigneeReader;
use crate::persistence::db_category_driven_ports::DbCategoryReader;
use crate::persistence::db_todo_driven_ports::{DbTodoReader, DbTodoWriter};
use crate::routing_utils::{Json, Query, ValidationErrorResponse};
use crate::{AppState, SharedData, domain, dto};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::ErrorResponse;
use axum::routing::{get, patch};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;
use validator::Validate;

#[derive(OpenApi)]
#[openapi(paths(
    household_todos,
    member_todos,
    child_todos,
    create_todo,
    update_todo,
    delete_todo
))]
/// Defines the OpenAPI documentation for the household todo API
pub struct TodoApi;
/// Constant used to group household todo endpoints in OpenAPI documentation
pub const TODO_API_GROUP: &str = "Todos";

/// Adds routes under "/households/{household_id}" to the application router
pub fn todo_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/households/:household_id/todos",
            get(
                async |State(app_state): AppState, Path(household_id): Path<String>| {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    household_todos(
                        &household_id,
                        &mut ext_cxn,
                        &todo_service,
                        &DbTodoReader,
                        &DbAssigneeReader,
                        &DbCategoryReader,
                    )
                    .await
                },
            )
            .post(
                async |State(app_state): AppState,
                       Path(household_id): Path<String>,
                       Json(new_todo): Json<dto::NewTodo>| {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    create_todo(
                        household_id,
                        new_todo,
                        &mut ext_cxn,
                        &todo_service,
                        &DbTodoWriter,
                        &DbAssigneeReader,
                        &DbCategoryReader,
                    )
                    .await
                },
            ),
        )
        .route(
            "/households/:household_id/members/:member_id/todos",
            get(
                async |State(app_state): AppState,
                       Path((household_id, member_id)): Path<(String, i32)>| {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    member_todos(
                        &household_id,
                        member_id,
                        &mut ext_cxn,
                        &todo_service,
                        &DbTodoReader,
                        &DbAssigneeReader,
                        &DbCategoryReader,
                    )
                    .await
                },
            ),
        )
        .route(
            "/households/:household_id/todos/child",
            get(
                async |State(app_state): AppState,
                       Path(household_id): Path<String>,
                       Query(query): Query<dto::ChildTodosQuery>| {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    child_todos(
                        &household_id,
                        query,
                        &mut ext_cxn,
                        &todo_service,
                        &DbTodoReader,
                        &DbAssigneeReader,
                        &DbCategoryReader,
                    )
                    .await
                },
            ),
        )
        .route(
            "/households/:household_id/todos/:todo_id",
            patch(
                async |State(app_state): AppState,
                       Path((household_id, todo_id)): Path<(String, i32)>,
                       Json(update): Json<dto::UpdateTodo>| {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    update_todo(
                        &household_id,
                        todo_id,
                        update,
                        &mut ext_cxn,
                        &todo_service,
                        &DbTodoWriter,
                        &DbAssigneeReader,
                        &DbCategoryReader,
                    )
                    .await
                },
            )
            .delete(
                async |State(app_state): AppState,
                       Path((household_id, todo_id)): Path<(String, i32)>| {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let todo_service = domain::todo::TodoService {};

                    delete_todo(
                        &household_id,
                        todo_id,
                        &mut ext_cxn,
                        &todo_service,
                        &DbTodoReader,
                        &DbTodoWriter,
                        &DbAssigneeReader,
                        &DbCategoryReader,
                    )
                    .await
                },
            ),
        )
}

fn to_dtos(views: Vec<domain::todo::TodoView>) -> Vec<dto::TodoView> {
    views.into_iter().map(dto::TodoView::from).collect()
}

#[utoipa::path(
    get,
    path = "/households/{household_id}/todos",
    tag = TODO_API_GROUP,
    params(
        ("household_id" = String, Path, description = "The household whose todos should be listed"),
    ),
    responses(
        (status = 200, description = "Every todo in the household", body = [dto::TodoView]),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Lists every todo in a household along with its assignees and categories
async fn household_todos(
    household_id: &str,
    ext_cxn: &mut (impl ExternalConnectivity + Clone),
    todo_service: &impl TodoPort,
    todo_read: &impl TodoReader,
    assignee_read: &impl AssigneeReader,
    category_read: &impl CategoryReader,
) -> Result<Json<Vec<dto::TodoView>>, ErrorResponse> {
    info!("Requested todos for household {household_id}");
    let views = todo_service
        .household_todos(household_id, ext_cxn, todo_read, assignee_read, category_read)
        .await
        .map_err(|err| report_failure(err, "list household todos"))?;

    Ok(Json(to_dtos(views)))
}

#[utoipa::path(
    get,
    path = "/households/{household_id}/members/{member_id}/todos",
    tag = TODO_API_GROUP,
    params(
        ("household_id" = String, Path, description = "The household the member belongs to"),
        ("member_id" = i32, Path, description = "The member whose assigned todos should be listed"),
    ),
    responses(
        (status = 200, description = "Todos assigned to the member", body = [dto::TodoView]),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Lists the household todos assigned to a member
async fn member_todos(
    household_id: &str,
    member_id: i32,
    ext_cxn: &mut (impl ExternalConnectivity + Clone),
    todo_service: &impl TodoPort,
    todo_read: &impl TodoReader,
    assignee_read: &impl AssigneeReader,
    category_read: &impl CategoryReader,
) -> Result<Json<Vec<dto::TodoView>>, ErrorResponse> {
    info!("Requested todos for member {member_id} in household {household_id}");
    let views = todo_service
        .member_todos(household_id, member_id, ext_cxn, todo_read, assignee_read, category_read)
        .await
        .map_err(|err| report_failure(err, "list a member's todos"))?;

    Ok(Json(to_dtos(views)))
}

#[utoipa::path(
    get,
    path = "/households/{household_id}/todos/child",
    tag = TODO_API_GROUP,
    params(
        ("household_id" = String, Path, description = "The household the child belongs to"),
        dto::ChildTodosQuery,
    ),
    responses(
        (status = 200, description = "Todos assigned to the child", body = [dto::TodoView]),
        (status = 400, response = dto::err_resps::BasicError400Validation),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Lists the household todos assigned to a child. The child is required.
async fn child_todos(
    household_id: &str,
    query: dto::ChildTodosQuery,
    ext_cxn: &mut (impl ExternalConnectivity + Clone),
    todo_service: &impl TodoPort,
    todo_read: &impl TodoReader,
    assignee_read: &impl AssigneeReader,
    category_read: &impl CategoryReader,
) -> Result<Json<Vec<dto::TodoView>>, ErrorResponse> {
    let child_id = query
        .required_child_id()
        .map_err(ValidationErrorResponse::from)?;

    info!("Requested todos for child {child_id} in household {household_id}");
    let views = todo_service
        .child_todos(household_id, child_id, ext_cxn, todo_read, assignee_read, category_read)
        .await
        .map_err(|err| report_failure(err, "list a child's todos"))?;

    Ok(Json(to_dtos(views)))
}

#[utoipa::path(
    post,
    path = "/households/{household_id}/todos",
    tag = TODO_API_GROUP,
    params(
        ("household_id" = String, Path, description = "The household the todo belongs to"),
    ),
    request_body = dto::NewTodo,
    responses(
        (status = 201, description = "Todo created", body = dto::TodoView),
        (status = 400, response = dto::err_resps::BasicError400Validation),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Creates a todo in a household. New todos start with nobody assigned and no categories.
async fn create_todo(
    household_id: String,
    new_todo: dto::NewTodo,
    ext_cxn: &mut (impl ExternalConnectivity + Clone),
    todo_service: &impl TodoPort,
    todo_write: &impl TodoWriter,
    assignee_read: &impl AssigneeReader,
    category_read: &impl CategoryReader,
) -> Result<(StatusCode, Json<dto::TodoView>), ErrorResponse> {
    info!("Creating todo in household {household_id}");
    new_todo.validate().map_err(ValidationErrorResponse::from)?;

    let domain_todo = new_todo.into_domain(household_id);
    let created = todo_service
        .create_todo(&domain_todo, ext_cxn, todo_write, assignee_read, category_read)
        .await
        .map_err(|err| report_failure(err, "create a todo"))?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    patch,
    path = "/households/{household_id}/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(
        ("household_id" = String, Path, description = "The household the todo belongs to"),
        ("todo_id" = i32, Path, description = "The todo to update"),
    ),
    request_body = dto::UpdateTodo,
    responses(
        (status = 200, description = "The updated todo", body = dto::TodoView),
        (status = 400, response = dto::err_resps::BasicError400Validation),
        (status = 404, response = dto::err_resps::BasicError404),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Updates some of a todo's fields
async fn update_todo(
    household_id: &str,
    todo_id: i32,
    update: dto::UpdateTodo,
    ext_cxn: &mut (impl ExternalConnectivity + Clone),
    todo_service: &impl TodoPort,
    todo_write: &impl TodoWriter,
    assignee_read: &impl AssigneeReader,
    category_read: &impl CategoryReader,
) -> Result<Json<dto::TodoView>, ErrorResponse> {
    info!("Updating todo {todo_id} in household {household_id}");
    update.validate().map_err(ValidationErrorResponse::from)?;

    let domain_update = domain::todo::TodoUpdate::from(update);
    let updated = todo_service
        .update_todo(
            todo_id,
            household_id,
            &domain_update,
            ext_cxn,
            todo_write,
            assignee_read,
            category_read,
        )
        .await
        .map_err(|err| report_failure(err, "update a todo"))?;

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/households/{household_id}/todos/{todo_id}",
    tag = TODO_API_GROUP,
    params(
        ("household_id" = String, Path, description = "The household the todo belongs to"),
        ("todo_id" = i32, Path, description = "The todo to delete"),
    ),
    responses(
        (status = 200, description = "The household's remaining todos", body = [dto::TodoView]),
        (status = 404, response = dto::err_resps::BasicError404),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Deletes a todo and responds with the household's remaining todos
async fn delete_todo(
    household_id: &str,
    todo_id: i32,
    ext_cxn: &mut (impl Transactable + Clone),
    todo_service: &impl TodoPort,
    todo_read: &impl TodoReader,
    todo_write: &impl TodoWriter,
    assignee_read: &impl AssigneeReader,
    category_read: &impl CategoryReader,
) -> Result<Json<Vec<dto::TodoView>>, ErrorResponse> {
    info!("Deleting todo {todo_id} from household {household_id}");
    let remaining = todo_service
        .delete_todo(
            todo_id,
            household_id,
            ext_cxn,
            todo_read,
            todo_write,
            assignee_read,
            category_read,
        )
        .await
        .map_err(|err| report_failure(err, "delete a todo"))?;

    Ok(Json(to_dtos(remaining)))
}
