use crate::domain;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which kind of household account an assignment refers to
#[derive(Deserialize, Serialize, ToSchema, Clone, Copy)]
#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Member,
    Child,
}

impl From<ActorKind> for domain::assignment::ActorKind {
    fn from(value: ActorKind) -> Self {
        match value {
            ActorKind::Member => domain::assignment::ActorKind::Member,
            ActorKind::Child => domain::assignment::ActorKind::Child,
        }
    }
}

/// DTO naming the member or child to assign to, or unassign from, a todo
#[derive(Deserialize, ToSchema)]
#[cfg_attr(test, derive(Serialize))]
pub struct ActorRef {
    #[schema(example = 7)]
    pub id: i32,
    #[serde(rename = "type")]
    pub kind: ActorKind,
}

impl From<ActorRef> for domain::assignment::ActorRef {
    fn from(value: ActorRef) -> Self {
        domain::assignment::ActorRef {
            id: value.id,
            kind: value.kind.into(),
        }
    }
}

/// DTO for a member or child a todo is assigned to. `type` tells the two apart; only members
/// carry an email.
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize, Debug, PartialEq, Eq))]
pub struct Assignee {
    #[serde(rename = "type")]
    pub kind: ActorKind,
    #[schema(example = 7)]
    pub id: i32,
    #[schema(example = "kiddo")]
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "mom@example.com")]
    pub email: Option<String>,
    #[schema(example = "a12345")]
    pub current_household: String,
    #[schema(example = 25)]
    pub points: i32,
}

impl From<domain::assignment::Assignee> for Assignee {
    fn from(value: domain::assignment::Assignee) -> Self {
        match value {
            domain::assignment::Assignee::Member(member) => Assignee {
                kind: ActorKind::Member,
                id: member.id,
                username: member.username,
                email: Some(member.email),
                current_household: member.current_household,
                points: member.points,
            },
            domain::assignment::Assignee::Child(child) => Assignee {
                kind: ActorKind::Child,
                id: child.id,
                username: child.username,
                email: None,
                current_household: child.current_household,
                points: child.points,
            },
        }
    }
}
