use super::report_failure;
use crate::domain::category::driven_ports::{CategoryReader, CategoryWriter};
use crate::domain::category::driving_ports::CategoryPort;
use crate::domain::todo::driven_ports::TodoReader;
use crate::external_connections::ExternalConnectivity;
use crate::persistence::db_category_driven_ports::{DbCategoryReader, DbCategoryWriter};
use crate::persistence::db_todo_driven_ports::DbTodoReader;
use crate::routing_utils::Json;
use crate::{AppState, SharedData, domain, dto};
use axum::Router;
use axum::extract::{Path, State};
use axum::response::ErrorResponse;
use axum::routing::post;
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(categorize, uncategorize))]
/// Defines the OpenAPI documentation for the todo category API
pub struct CategoryApi;
/// Constant used to group category endpoints in OpenAPI documentation
pub const CATEGORY_API_GROUP: &str = "Categories";

pub fn category_routes() -> Router<Arc<SharedData>> {
    Router::new().route(
        "/todos/:todo_id/categories/:category_id",
        post(
            async |State(app_state): AppState, Path((todo_id, category_id)): Path<(i32, i32)>| {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let category_service = domain::category::CategoryService {};

                categorize(
                    todo_id,
                    category_id,
                    &mut ext_cxn,
                    &category_service,
                    &DbTodoReader,
                    &DbCategoryReader,
                    &DbCategoryWriter,
                )
                .await
            },
        )
        .delete(
            async |State(app_state): AppState, Path((todo_id, category_id)): Path<(i32, i32)>| {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let category_service = domain::category::CategoryService {};

                uncategorize(
                    todo_id,
                    category_id,
                    &mut ext_cxn,
                    &category_service,
                    &DbCategoryReader,
                    &DbCategoryWriter,
                )
                .await
            },
        ),
    )
}

#[utoipa::path(
    post,
    path = "/todos/{todo_id}/categories/{category_id}",
    tag = CATEGORY_API_GROUP,
    params(
        ("todo_id" = i32, Path, description = "The todo to tag"),
        ("category_id" = i32, Path, description = "A category from the todo's household"),
    ),
    responses(
        (status = 200, description = "The todo's categories after tagging", body = [dto::Category]),
        (status = 404, response = dto::err_resps::BasicError404),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Tags a todo with a category
async fn categorize(
    todo_id: i32,
    category_id: i32,
    ext_cxn: &mut impl ExternalConnectivity,
    category_service: &impl CategoryPort,
    todo_read: &impl TodoReader,
    category_read: &impl CategoryReader,
    category_write: &impl CategoryWriter,
) -> Result<Json<Vec<dto::Category>>, ErrorResponse> {
    info!("Adding category {category_id} to todo {todo_id}");
    let categories = category_service
        .categorize(
            todo_id,
            category_id,
            ext_cxn,
            todo_read,
            category_read,
            category_write,
        )
        .await
        .map_err(|err| report_failure(err, "categorize a todo"))?;

    Ok(Json(categories.into_iter().map(dto::Category::from).collect()))
}

#[utoipa::path(
    delete,
    path = "/todos/{todo_id}/categories/{category_id}",
    tag = CATEGORY_API_GROUP,
    params(
        ("todo_id" = i32, Path, description = "The todo to untag"),
        ("category_id" = i32, Path, description = "The category to remove"),
    ),
    responses(
        (status = 200, description = "The todo's remaining categories", body = [dto::Category]),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Removes a category from a todo
async fn uncategorize(
    todo_id: i32,
    category_id: i32,
    ext_cxn: &mut impl ExternalConnectivity,
    category_service: &impl CategoryPort,
    category_read: &impl CategoryReader,
    category_write: &impl CategoryWriter,
) -> Result<Json<Vec<dto::Category>>, ErrorResponse> {
    info!("Removing category {category_id} from todo {todo_id}");
    let categories = category_service
        .uncategorize(todo_id, category_id, ext_cxn, category_read, category_write)
        .await
        .map_err(|err| report_failure(err, "uncategorize a todo"))?;

    Ok(Json(categories.into_iter().map(dto::Category::from).collect()))
}
