use crate::domain::assignment::driven_ports::{AssigneeReader, AssigneeWriter, DetectActor};
use crate::domain::todo::driven_ports::TodoReader;
use crate::domain::{Error, LinkChange, PortResultExt};
use crate::external_connections::ExternalConnectivity;
use derive_more::Display;
use tracing::info;

/// The two kinds of household account a todo can be assigned to
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    #[display("member")]
    Member,
    #[display("child")]
    Child,
}

/// Identifies a single assignable account
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[display("{kind} {id}")]
pub struct ActorRef {
    pub id: i32,
    pub kind: ActorKind,
}

/// An adult household account
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(test, derive(Clone))]
pub struct Member {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub current_household: String,
    pub points: i32,
}

/// A child household account. Children can be assigned todos but cannot sign in.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(test, derive(Clone))]
pub struct Child {
    pub id: i32,
    pub username: String,
    pub current_household: String,
    pub points: i32,
}

/// Anything a todo is assigned to
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(test, derive(Clone))]
pub enum Assignee {
    Member(Member),
    Child(Child),
}

impl Assignee {
    pub fn actor(&self) -> ActorRef {
        match self {
            Self::Member(member) => ActorRef {
                id: member.id,
                kind: ActorKind::Member,
            },
            Self::Child(child) => ActorRef {
                id: child.id,
                kind: ActorKind::Child,
            },
        }
    }
}

pub mod driven_ports {
    use super::*;

    /// Reads the member and child link relations for a todo
    pub trait AssigneeReader {
        async fn members_assigned(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Member>, anyhow::Error>;
        async fn children_assigned(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<Vec<Child>, anyhow::Error>;
    }

    /// Writes to the member and child link relations. Both operations are set-membership
    /// writes: linking an existing pair or unlinking a missing one reports
    /// [LinkChange::Unchanged] instead of failing.
    pub trait AssigneeWriter {
        async fn link_actor(
            &self,
            actor: ActorRef,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<LinkChange, anyhow::Error>;
        async fn unlink_actor(
            &self,
            actor: ActorRef,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<LinkChange, anyhow::Error>;
    }

    pub trait DetectActor {
        async fn actor_exists(
            &self,
            actor: ActorRef,
            ext_cxn: &mut impl ExternalConnectivity,
        ) -> Result<bool, anyhow::Error>;
    }
}

/// Resolves everyone assigned to a todo. Members always come before children; within each
/// group the store's order is kept.
pub async fn resolve_assignees(
    todo_id: i32,
    ext_cxn: &mut impl ExternalConnectivity,
    assignee_read: &impl AssigneeReader,
) -> Result<Vec<Assignee>, anyhow::Error> {
    let members = assignee_read.members_assigned(todo_id, &mut *ext_cxn).await?;
    let children = assignee_read.children_assigned(todo_id, &mut *ext_cxn).await?;

    let assigned = members
        .into_iter()
        .map(Assignee::Member)
        .chain(children.into_iter().map(Assignee::Child))
        .collect();

    Ok(assigned)
}

pub(super) async fn verify_actor_exists(
    actor: ActorRef,
    ext_cxn: &mut impl ExternalConnectivity,
    actor_detect: &impl DetectActor,
) -> Result<(), Error> {
    let does_actor_exist = actor_detect
        .actor_exists(actor, ext_cxn)
        .await
        .trying_to("look up the actor being assigned")?;

    if does_actor_exist {
        Ok(())
    } else {
        Err(Error::DoesNotExist(actor.to_string()))
    }
}

pub mod driving_ports {
    use super::*;
    use crate::domain::todo;

    pub trait AssignmentPort {
        /// Links an actor to a todo, then returns the todo's full assignee list. Assigning an
        /// actor who is already assigned is not an error.
        async fn assign_actor(
            &self,
            todo_id: i32,
            actor: ActorRef,
            ext_cxn: &mut impl ExternalConnectivity,
            todo_read: &impl todo::driven_ports::TodoReader,
            actor_detect: &impl DetectActor,
            assignee_read: &impl AssigneeReader,
            assignee_write: &impl AssigneeWriter,
        ) -> Result<Vec<Assignee>, Error>;
        /// Removes an actor from a todo, then returns the todo's full assignee list. Removing
        /// an actor who was never assigned is not an error.
        async fn unassign_actor(
            &self,
            todo_id: i32,
            actor: ActorRef,
            ext_cxn: &mut impl ExternalConnectivity,
            assignee_read: &impl AssigneeReader,
            assignee_write: &impl AssigneeWriter,
        ) -> Result<Vec<Assignee>, Error>;
        async fn assignees_for_todo(
            &self,
            todo_id: i32,
            ext_cxn: &mut impl ExternalConnectivity,
            assignee_read: &impl AssigneeReader,
        ) -> Result<Vec<Assignee>, Error>;
    }
}

pub struct AssignmentService {}

impl driving_ports::AssignmentPort for AssignmentService {
    async fn assign_actor(
        &self,
        todo_id: i32,
        actor: ActorRef,
        ext_cxn: &mut impl ExternalConnectivity,
        todo_read: &impl TodoReader,
        actor_detect: &impl DetectActor,
        assignee_read: &impl AssigneeReader,
        assignee_write: &impl AssigneeWriter,
    ) -> Result<Vec<Assignee>, Error> {
        crate::domain::todo::verify_todo_exists(todo_id, &mut *ext_cxn, todo_read).await?;
        verify_actor_exists(actor, &mut *ext_cxn, actor_detect).await?;

        let change = assignee_write
            .link_actor(actor, todo_id, &mut *ext_cxn)
            .await
            .trying_to("assign an actor to a todo")?;
        if change == LinkChange::Unchanged {
            info!("{actor} was already assigned to todo {todo_id}");
        }

        resolve_assignees(todo_id, &mut *ext_cxn, assignee_read)
            .await
            .trying_to("resolve assignees after assigning")
    }

    async fn unassign_actor(
        &self,
        todo_id: i32,
        actor: ActorRef,
        ext_cxn: &mut impl ExternalConnectivity,
        assignee_read: &impl AssigneeReader,
        assignee_write: &impl AssigneeWriter,
    ) -> Result<Vec<Assignee>, Error> {
        let change = assignee_write
            .unlink_actor(actor, todo_id, &mut *ext_cxn)
            .await
            .trying_to("unassign an actor from a todo")?;
        if change == LinkChange::Unchanged {
            info!("{actor} was not assigned to todo {todo_id}, nothing to remove");
        }

        resolve_assignees(todo_id, &mut *ext_cxn, assignee_read)
            .await
            .trying_to("resolve assignees after unassigning")
    }

    async fn assignees_for_todo(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
        assignee_read: &impl AssigneeReader,
    ) -> Result<Vec<Assignee>, Error> {
        resolve_assignees(todo_id, ext_cxn, assignee_read)
            .await
            .trying_to("resolve assignees")
    }
}
