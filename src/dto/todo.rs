use super::Assignee;
use crate::domain;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

/// DTO for a todo along with its assignees and categories
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug, PartialEq, Eq))]
pub struct TodoView {
    #[schema(example = 12)]
    pub id: i32,
    #[schema(example = "a12345")]
    pub household: String,
    #[schema(example = "Clean room")]
    pub title: String,
    #[schema(example = "Vacuum too")]
    pub description: Option<String>,
    #[schema(example = 5)]
    pub point_value: i32,
    pub completed: bool,
    pub assigned: Vec<Assignee>,
    pub categories: Vec<Category>,
}

impl From<domain::todo::TodoView> for TodoView {
    fn from(value: domain::todo::TodoView) -> Self {
        let todo = value.todo;
        TodoView {
            id: todo.id,
            household: todo.household,
            title: todo.title,
            description: todo.description,
            point_value: todo.point_value,
            completed: todo.completed,
            assigned: value.assigned.into_iter().map(Assignee::from).collect(),
            categories: value.categories.into_iter().map(Category::from).collect(),
        }
    }
}

/// DTO for creating a todo. The household comes from the request path.
#[derive(Deserialize, Validate, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct NewTodo {
    #[validate(length(min = 1))]
    #[serde(default)]
    #[schema(example = "Clean room")]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    #[serde(default)]
    #[schema(example = 5)]
    pub point_value: i32,
    #[serde(default)]
    pub completed: bool,
}

impl NewTodo {
    pub fn into_domain(self, household: String) -> domain::todo::NewTodo {
        domain::todo::NewTodo {
            household,
            title: self.title,
            description: self.description,
            point_value: self.point_value,
            completed: self.completed,
        }
    }
}

/// DTO for partially updating a todo. Omitted fields are left as they are.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct UpdateTodo {
    #[validate(length(min = 1))]
    #[schema(example = "Clean room and closet")]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub point_value: Option<i32>,
    #[schema(example = true)]
    pub completed: Option<bool>,
}

impl From<UpdateTodo> for domain::todo::TodoUpdate {
    fn from(value: UpdateTodo) -> Self {
        domain::todo::TodoUpdate {
            title: value.title,
            description: value.description,
            point_value: value.point_value,
            completed: value.completed,
        }
    }
}

/// DTO for a category attached to a todo
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug, PartialEq, Eq))]
pub struct Category {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "Chores")]
    pub name: String,
    #[schema(example = "a12345")]
    pub household: String,
}

impl From<domain::category::Category> for Category {
    fn from(value: domain::category::Category) -> Self {
        Category {
            id: value.id,
            name: value.name,
            household: value.household,
        }
    }
}

/// Query string for listing a child's todos
#[derive(Deserialize, Validate, IntoParams)]
pub struct ChildTodosQuery {
    /// ID of the child whose todos should be listed
    #[validate(required)]
    pub child_id: Option<i32>,
}

impl ChildTodosQuery {
    /// Validates the query and returns the child it names
    pub fn required_child_id(&self) -> Result<i32, ValidationErrors> {
        self.validate()?;
        self.child_id.ok_or_else(|| {
            let mut errors = ValidationErrors::new();
            errors.add("child_id", ValidationError::new("required"));
            errors
        })
    }
}
