use crate::domain::category::driven_ports::{CategoryReader, CategoryWriter};
use crate::domain::todo::driven_ports::TodoReader;
use crate::domain::{Error, LinkChange, PortResultExt};
use crate::external_connections::ExternalConnectivity;
use tracing::info;

/// A named tag which todos can carry any number of
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(test, derive(Clone))]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub household: String,
}

pub mod driven_ports {
    use super::*;

    pub trait CategoryReader {
        /// All categories linked to a todo, in the store's order
        async fn categories_for_todo(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Category>, anyhow::Error>;
        async fn category_by_id(
            &self,
            category_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Option<Category>, anyhow::Error>;
    }

    pub trait CategoryWriter {
        async fn link_category(
            &self,
            todo_id: i32,
            category_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<LinkChange, anyhow::Error>;
        async fn unlink_category(
            &self,
            todo_id: i32,
            category_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<LinkChange, anyhow::Error>;
    }
}

pub mod driving_ports {
    use super::*;

    pub trait CategoryPort {
        /// Tags a todo with a category and returns the todo's categories afterward
        async fn categorize(
            &self,
            todo_id: i32,
            category_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl TodoReader,
            category_read: &impl CategoryReader,
            category_write: &impl CategoryWriter,
        ) -> Result<Vec<Category>, Error>;
        /// Removes a category from a todo and returns the todo's categories afterward
        async fn uncategorize(
            &self,
            todo_id: i32,
            category_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
            category_read: &impl CategoryReader,
            category_write: &impl CategoryWriter,
        ) -> Result<Vec<Category>, Error>;
    }
}

pub struct CategoryService {}

impl driving_ports::CategoryPort for CategoryService {
    async fn categorize(
        &self,
        todo_id: i32,
        category_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
        category_read: &impl CategoryReader,
        category_write: &impl CategoryWriter,
    ) -> Result<Vec<Category>, Error> {
        let todo =
            crate::domain::todo::verify_todo_exists(todo_id, &mut *ext_cxn, todo_read).await?;
        let category = category_read
            .category_by_id(category_id, &mut *ext_cxn)
            .await
            .trying_to("look up a category")?
            .ok_or_else(|| Error::DoesNotExist(format!("category {category_id}")))?;
        // Categories are household-scoped, so a foreign one looks the same as a missing one
        if category.household != todo.household {
            return Err(Error::DoesNotExist(format!("category {category_id}")));
        }

        let change = category_write
            .link_category(todo_id, category_id, &mut *ext_cxn)
            .await
            .trying_to("add a category to a todo")?;
        if change == LinkChange::Unchanged {
            info!("todo {todo_id} already had category {category_id}");
        }

        category_read
            .categories_for_todo(todo_id, &mut *ext_cxn)
            .await
            .trying_to("resolve categories after categorizing")
    }

    async fn uncategorize(
        &self,
        todo_id: i32,
        category_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
        category_read: &impl CategoryReader,
        category_write: &impl CategoryWriter,
    ) -> Result<Vec<Category>, Error> {
        let change = category_write
            .unlink_category(todo_id, category_id, &mut *ext_cxn)
            .await
            .trying_to("remove a category from a todo")?;
        if change == LinkChange::Unchanged {
            info!("todo {todo_id} did not have category {category_id}, nothing to remove");
        }

        category_read
            .categories_for_todo(todo_id, &mut *ext_cxn)
            .await
            .trying_to("resolve categories after uncategorizing")
    }
}
