use super::link_change;
use crate::domain;
use crate::domain::LinkChange;
use crate::domain::category::Category;
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use sqlx::{FromRow, query, query_as};

#[derive(FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
    household: String,
}

impl From<CategoryRow> for Category {
    fn from(value: CategoryRow) -> Self {
        Category {
            id: value.id,
            name: value.name,
            household: value.household,
        }
    }
}

pub struct DbCategoryReader;

impl domain::category::driven_ports::CategoryReader for DbCategoryReader {
    async fn categories_for_todo(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Category>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let categories = query_as::<_, CategoryRow>(
            "SELECT c.id, c.name, c.household \
             FROM categories c JOIN todos_categories tc ON tc.category_id = c.id \
             WHERE tc.todo_id = $1",
        )
        .bind(todo_id)
        .fetch_all(cxn.borrow_connection())
        .await
        .context("trying to fetch a todo's categories")?
        .into_iter()
        .map(Category::from)
        .collect();

        Ok(categories)
    }

    async fn category_by_id(
        &self,
        category_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<Category>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let category = query_as::<_, CategoryRow>(
            "SELECT c.id, c.name, c.household FROM categories c WHERE c.id = $1",
        )
        .bind(category_id)
        .fetch_optional(cxn.borrow_connection())
        .await
        .context("trying to fetch a category by ID")?
        .map(Category::from);

        Ok(category)
    }
}

pub struct DbCategoryWriter;

impl domain::category::driven_ports::CategoryWriter for DbCategoryWriter {
    async fn link_category(
        &self,
        todo_id: i32,
        category_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<LinkChange, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let result = query(
            "INSERT INTO todos_categories(todo_id, category_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(todo_id)
        .bind(category_id)
        .execute(cxn.borrow_connection())
        .await
        .context("trying to add a category to a todo")?;

        Ok(link_change(result, LinkChange::Added))
    }

    async fn unlink_category(
        &self,
        todo_id: i32,
        category_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<LinkChange, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let result = query("DELETE FROM todos_categories WHERE todo_id = $1 AND category_id = $2")
            .bind(todo_id)
            .bind(category_id)
            .execute(cxn.borrow_connection())
            .await
            .context("trying to remove a category from a todo")?;

        Ok(link_change(result, LinkChange::Removed))
    }
}
