use crate::domain::aggregation::{build_view, build_views};
use crate::domain::assignment::Assignee;
use crate::domain::assignment::driven_ports::AssigneeReader;
use crate::domain::category::Category;
use crate::domain::category::driven_ports::CategoryReader;
use crate::domain::todo::driven_ports::{TodoReader, TodoWriter};
use crate::domain::todo::driving_ports::TodoPort;
use crate::domain::{Error, PortResultExt};
use crate::external_connections::{ExternalConnectivity, Transactable, TransactionHandle};
use tracing::info;
use validator::Validate;

#[derive(PartialEq, Eq, Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct Todo {
    pub id: i32,
    pub household: String,
    pub title: String,
    pub description: Option<String>,
    pub point_value: i32,
    pub completed: bool,
}

#[derive(Debug, Validate)]
#[cfg_attr(test, derive(Clone))]
pub struct NewTodo {
    #[validate(length(min = 1))]
    pub household: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub point_value: i32,
    pub completed: bool,
}

/// Partial update to a todo. Absent fields are left alone.
#[derive(Debug, Default, Validate)]
#[cfg_attr(test, derive(Clone))]
pub struct TodoUpdate {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub point_value: Option<i32>,
    pub completed: Option<bool>,
}

/// A todo along with everyone assigned to it and the categories it carries. Rebuilt from
/// the store on every read.
#[derive(PartialEq, Eq, Debug)]
#[cfg_attr(test, derive(Clone))]
pub struct TodoView {
    pub todo: Todo,
    pub assigned: Vec<Assignee>,
    pub categories: Vec<Category>,
}

pub mod driven_ports {
    use super::*;

    pub trait TodoReader {
        async fn todos_for_household(
            &self,
            household_id: &str,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Todo>, anyhow::Error>;
        /// Household todos which are assigned to the given member
        async fn todos_for_member(
            &self,
            household_id: &str,
            member_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Todo>, anyhow::Error>;
        /// Household todos which are assigned to the given child
        async fn todos_for_child(
            &self,
            household_id: &str,
            child_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Todo>, anyhow::Error>;
        async fn todo_by_id(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<Todo>, anyhow::Error>;
    }

    pub trait TodoWriter {
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Todo, anyhow::Error>;
        /// Applies a partial update, returning [None] if the household has no such todo
        async fn update_todo(
            &self,
            todo_id: i32,
            household_id: &str,
            update: &TodoUpdate,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<Todo>, anyhow::Error>;
        /// Deletes a todo along with its assignee and category links. Returns false if the
        /// household has no such todo.
        async fn delete_todo(
            &self,
            todo_id: i32,
            household_id: &str,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<bool, anyhow::Error>;
    }
}

pub(super) async fn verify_todo_exists(
    todo_id: i32,
    ext_cxn: &mut impl ExternalConnectivity,
    todo_read: &impl TodoReader,
) -> Result<Todo, Error> {
    todo_read
        .todo_by_id(todo_id, ext_cxn)
        .await
        .trying_to("look up a todo")?
        .ok_or_else(|| Error::DoesNotExist(format!("todo {todo_id}")))
}

pub mod driving_ports {
    use super::*;

    pub trait TodoPort {
        async fn household_todos(
            &self,
            household_id: &str,
            ext_cxn: &mut (impl ExternalConnectivity + Clone),
            todo_read: &impl TodoReader,
            assignee_read: &impl AssigneeReader,
            category_read: &impl CategoryReader,
        ) -> Result<Vec<TodoView>, Error>;
        async fn member_todos(
            &self,
            household_id: &str,
            member_id: i32,
            ext_cxn: &mut (impl ExternalConnectivity + Clone),
            todo_read: &impl TodoReader,
            assignee_read: &impl AssigneeReader,
            category_read: &impl CategoryReader,
        ) -> Result<Vec<TodoView>, Error>;
        async fn child_todos(
            &self,
            household_id: &str,
            child_id: i32,
            ext_cxn: &mut (impl ExternalConnectivity + Clone),
            todo_read: &impl TodoReader,
            assignee_read: &impl AssigneeReader,
            category_read: &impl CategoryReader,
        ) -> Result<Vec<TodoView>, Error>;
        async fn create_todo(
            &self,
            new_todo: &NewTodo,
            ext_cxn: &mut (impl ExternalConnectivity + Clone),
            todo_write: &impl TodoWriter,
            assignee_read: &impl AssigneeReader,
            category_read: &impl CategoryReader,
        ) -> Result<TodoView, Error>;
        async fn update_todo(
            &self,
            todo_id: i32,
            household_id: &str,
            update: &TodoUpdate,
            ext_cxn: &mut (impl ExternalConnectivity + Clone),
            todo_write: &impl TodoWriter,
            assignee_read: &impl AssigneeReader,
            category_read: &impl CategoryReader,
        ) -> Result<TodoView, Error>;
        /// Deletes a todo and hands back what remains in its household
        async fn delete_todo(
            &self,
            todo_id: i32,
            household_id: &str,
            ext_cxn: &mut (impl Transactable + Clone),
            todo_read: &impl TodoReader,
            todo_write: &impl TodoWriter,
            assignee_read: &impl AssigneeReader,
            category_read: &impl CategoryReader,
        ) -> Result<Vec<TodoView>, Error>;
    }
}

pub struct TodoService {}

impl TodoPort for TodoService {
    async fn household_todos(
        &self,
        household_id: &str,
        ext_cxn: &mut (impl ExternalConnectivity + Clone),
        todo_read: &impl TodoReader,
        assignee_read: &impl AssigneeReader,
        category_read: &impl CategoryReader,
    ) -> Result<Vec<TodoView>, Error> {
        let todos = todo_read
            .todos_for_household(household_id, &mut *ext_cxn)
            .await
            .trying_to("fetch household todos")?;

        build_views(todos, ext_cxn, assignee_read, category_read)
            .await
            .trying_to("assemble household todos")
    }

    async fn member_todos(
        &self,
        household_id: &str,
        member_id: i32,
        ext_cxn: &mut (impl ExternalConnectivity + Clone),
        todo_read: &impl TodoReader,
        assignee_read: &impl AssigneeReader,
        category_read: &impl CategoryReader,
    ) -> Result<Vec<TodoView>, Error> {
        let todos = todo_read
            .todos_for_member(household_id, member_id, &mut *ext_cxn)
            .await
            .trying_to("fetch a member's todos")?;

        build_views(todos, ext_cxn, assignee_read, category_read)
            .await
            .trying_to("assemble a member's todos")
    }

    async fn child_todos(
        &self,
        household_id: &str,
        child_id: i32,
        ext_cxn: &mut (impl ExternalConnectivity + Clone),
        todo_read: &impl TodoReader,
        assignee_read: &impl AssigneeReader,
        category_read: &impl CategoryReader,
    ) -> Result<Vec<TodoView>, Error> {
        let todos = todo_read
            .todos_for_child(household_id, child_id, &mut *ext_cxn)
            .await
            .trying_to("fetch a child's todos")?;

        build_views(todos, ext_cxn, assignee_read, category_read)
            .await
            .trying_to("assemble a child's todos")
    }

    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut (impl ExternalConnectivity + Clone),
        todo_write: &impl TodoWriter,
        assignee_read: &impl AssigneeReader,
        category_read: &impl CategoryReader,
    ) -> Result<TodoView, Error> {
        new_todo.validate()?;

        let todo = todo_write
            .create_todo(new_todo, &mut *ext_cxn)
            .await
            .trying_to("create a todo")?;
        info!("Created todo {} in household {}", todo.id, todo.household);

        build_view(todo, ext_cxn.clone(), assignee_read, category_read)
            .await
            .trying_to("assemble a new todo")
    }

    async fn update_todo(
        &self,
        todo_id: i32,
        household_id: &str,
        update: &TodoUpdate,
        ext_cxn: &mut (impl ExternalConnectivity + Clone),
        todo_write: &impl TodoWriter,
        assignee_read: &impl AssigneeReader,
        category_read: &impl CategoryReader,
    ) -> Result<TodoView, Error> {
        update.validate()?;

        let todo = todo_write
            .update_todo(todo_id, household_id, update, &mut *ext_cxn)
            .await
            .trying_to("update a todo")?
            .ok_or_else(|| Error::DoesNotExist(format!("todo {todo_id}")))?;

        build_view(todo, ext_cxn.clone(), assignee_read, category_read)
            .await
            .trying_to("assemble an updated todo")
    }

    async fn delete_todo(
        &self,
        todo_id: i32,
        household_id: &str,
        ext_cxn: &mut (impl Transactable + Clone),
        todo_read: &impl TodoReader,
        todo_write: &impl TodoWriter,
        assignee_read: &impl AssigneeReader,
        category_read: &impl CategoryReader,
    ) -> Result<Vec<TodoView>, Error> {
        let mut txn = ext_cxn
            .start_transaction()
            .await
            .trying_to("start deleting a todo")?;
        let deleted = todo_write
            .delete_todo(todo_id, household_id, &mut txn)
            .await
            .trying_to("delete a todo")?;
        if !deleted {
            return Err(Error::DoesNotExist(format!("todo {todo_id}")));
        }
        txn.commit().await.trying_to("finish deleting a todo")?;
        info!("Deleted todo {todo_id} from household {household_id}");

        self.household_todos(household_id, ext_cxn, todo_read, assignee_read, category_read)
            .await
    }
}
