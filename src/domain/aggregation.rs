//! Assembles [TodoView]s out of base todos, their assignees, and their categories.
//!
//! Every lookup runs on its own clone of the caller's connectivity so the lookups for one
//! todo, and the lookups across several todos, can be in flight at once. At most
//! [MAX_CONCURRENT_VIEWS] todos resolve at a time.

use crate::domain::assignment::driven_ports::AssigneeReader;
use crate::domain::assignment::resolve_assignees;
use crate::domain::category::driven_ports::CategoryReader;
use crate::domain::todo::{Todo, TodoView};
use crate::external_connections::ExternalConnectivity;
use futures::{StreamExt, TryStreamExt, stream, try_join};

/// Upper bound on todos resolved at once. Each one holds two connections while resolving.
pub const MAX_CONCURRENT_VIEWS: usize = 8;

/// Builds the view for a single todo, resolving assignees and categories concurrently
pub async fn build_view(
    todo: Todo,
    ext_cxn: impl ExternalConnectivity + Clone,
    assignee_read: &impl AssigneeReader,
    category_read: &impl CategoryReader,
) -> Result<TodoView, anyhow::Error> {
    let mut assignee_cxn = ext_cxn.clone();
    let mut category_cxn = ext_cxn;

    let (assigned, categories) = try_join!(
        resolve_assignees(todo.id, &mut assignee_cxn, assignee_read),
        category_read.categories_for_todo(todo.id, &mut category_cxn),
    )?;

    Ok(TodoView {
        todo,
        assigned,
        categories,
    })
}

/// Builds views for a list of todos. Output order always matches input order no matter
/// which todo finishes resolving first. The first failed lookup fails the whole list.
pub async fn build_views(
    todos: Vec<Todo>,
    ext_cxn: &(impl ExternalConnectivity + Clone),
    assignee_read: &impl AssigneeReader,
    category_read: &impl CategoryReader,
) -> Result<Vec<TodoView>, anyhow::Error> {
    stream::iter(todos)
        .map(|todo| build_view(todo, ext_cxn.clone(), assignee_read, category_read))
        .buffered(MAX_CONCURRENT_VIEWS)
        .try_collect()
        .await
}
