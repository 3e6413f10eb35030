use crate::domain;
use crate::domain::todo::{NewTodo, Todo, TodoUpdate};
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use sqlx::{FromRow, query, query_as};

pub struct DbTodoReader;

#[derive(FromRow)]
struct TodoRow {
    id: i32,
    household: String,
    title: String,
    description: Option<String>,
    point_value: i32,
    completed: bool,
}

impl From<TodoRow> for domain::todo::Todo {
    fn from(value: TodoRow) -> Self {
        Todo {
            id: value.id,
            household: value.household,
            title: value.title,
            description: value.description,
            point_value: value.point_value,
            completed: value.completed,
        }
    }
}

impl domain::todo::driven_ports::TodoReader for DbTodoReader {
    async fn todos_for_household(
        &self,
        household_id: &str,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Todo>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todos = query_as::<_, TodoRow>(
            "SELECT t.* FROM todos t WHERE t.household = $1 ORDER BY t.id",
        )
        .bind(household_id)
        .fetch_all(cxn.borrow_connection())
        .await
        .context("trying to fetch todos for a household")?
        .into_iter()
        .map(Todo::from)
        .collect();

        Ok(todos)
    }

    async fn todos_for_member(
        &self,
        household_id: &str,
        member_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Todo>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todos = query_as::<_, TodoRow>(
            "SELECT t.* FROM todos t \
             JOIN todos_members tm ON tm.todo_id = t.id \
             WHERE t.household = $1 AND tm.member_id = $2 \
             ORDER BY t.id",
        )
        .bind(household_id)
        .bind(member_id)
        .fetch_all(cxn.borrow_connection())
        .await
        .context("trying to fetch todos assigned to a member")?
        .into_iter()
        .map(Todo::from)
        .collect();

        Ok(todos)
    }

    async fn todos_for_child(
        &self,
        household_id: &str,
        child_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Todo>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todos = query_as::<_, TodoRow>(
            "SELECT t.* FROM todos t \
             JOIN todos_children tc ON tc.todo_id = t.id \
             WHERE t.household = $1 AND tc.child_id = $2 \
             ORDER BY t.id",
        )
        .bind(household_id)
        .bind(child_id)
        .fetch_all(cxn.borrow_connection())
        .await
        .context("trying to fetch todos assigned to a child")?
        .into_iter()
        .map(Todo::from)
        .collect();

        Ok(todos)
    }

    async fn todo_by_id(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<Todo>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let todo = query_as::<_, TodoRow>("SELECT t.* FROM todos t WHERE t.id = $1")
            .bind(todo_id)
            .fetch_optional(cxn.borrow_connection())
            .await
            .context("trying to fetch a todo by ID")?
            .map(Todo::from);

        Ok(todo)
    }
}

pub struct DbTodoWriter;

impl domain::todo::driven_ports::TodoWriter for DbTodoWriter {
    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Todo, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let created = query_as::<_, TodoRow>(
            "INSERT INTO todos(household, title, description, point_value, completed) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&new_todo.household)
        .bind(&new_todo.title)
        .bind(&new_todo.description)
        .bind(new_todo.point_value)
        .bind(new_todo.completed)
        .fetch_one(cxn.borrow_connection())
        .await
        .context("trying to insert a new todo into the database")?;

        Ok(created.into())
    }

    async fn update_todo(
        &self,
        todo_id: i32,
        household_id: &str,
        update: &TodoUpdate,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<Todo>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let updated = query_as::<_, TodoRow>(
            "UPDATE todos SET \
                title = COALESCE($3, title), \
                description = COALESCE($4, description), \
                point_value = COALESCE($5, point_value), \
                completed = COALESCE($6, completed) \
             WHERE id = $1 AND household = $2 \
             RETURNING *",
        )
        .bind(todo_id)
        .bind(household_id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.point_value)
        .bind(update.completed)
        .fetch_optional(cxn.borrow_connection())
        .await
        .context("trying to update a todo in the database")?
        .map(Todo::from);

        Ok(updated)
    }

    async fn delete_todo(
        &self,
        todo_id: i32,
        household_id: &str,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<bool, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        // Link rows go with the todo through ON DELETE CASCADE
        let deleted = query("DELETE FROM todos WHERE id = $1 AND household = $2")
            .bind(todo_id)
            .bind(household_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to remove a todo from the database")?;

        Ok(deleted.rows_affected() > 0)
    }
}
