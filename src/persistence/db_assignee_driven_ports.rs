use super::{Count, link_change};
use crate::domain;
use crate::domain::LinkChange;
use crate::domain::assignment::{ActorKind, ActorRef, Child, Member};
use crate::external_connections::{ConnectionHandle, ExternalConnectivity};
use anyhow::{Context, Error};
use sqlx::{FromRow, query, query_as};

#[derive(FromRow)]
struct MemberRow {
    id: i32,
    username: String,
    email: String,
    current_household: String,
    points: i32,
}

impl From<MemberRow> for Member {
    fn from(value: MemberRow) -> Self {
        Member {
            id: value.id,
            username: value.username,
            email: value.email,
            current_household: value.current_household,
            points: value.points,
        }
    }
}

#[derive(FromRow)]
struct ChildRow {
    id: i32,
    username: String,
    current_household: String,
    points: i32,
}

impl From<ChildRow> for Child {
    fn from(value: ChildRow) -> Self {
        Child {
            id: value.id,
            username: value.username,
            current_household: value.current_household,
            points: value.points,
        }
    }
}

pub struct DbAssigneeReader;

impl domain::assignment::driven_ports::AssigneeReader for DbAssigneeReader {
    async fn members_assigned(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Member>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let members = query_as::<_, MemberRow>(
            "SELECT m.id, m.username, m.email, m.current_household, m.points \
             FROM members m JOIN todos_members tm ON tm.member_id = m.id \
             WHERE tm.todo_id = $1",
        )
        .bind(todo_id)
        .fetch_all(cxn.borrow_connection())
        .await
        .context("trying to fetch members assigned to a todo")?
        .into_iter()
        .map(Member::from)
        .collect();

        Ok(members)
    }

    async fn children_assigned(
        &self,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Child>, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let children = query_as::<_, ChildRow>(
            "SELECT c.id, c.username, c.current_household, c.points \
             FROM children c JOIN todos_children tc ON tc.child_id = c.id \
             WHERE tc.todo_id = $1",
        )
        .bind(todo_id)
        .fetch_all(cxn.borrow_connection())
        .await
        .context("trying to fetch children assigned to a todo")?
        .into_iter()
        .map(Child::from)
        .collect();

        Ok(children)
    }
}

pub struct DbAssigneeWriter;

impl domain::assignment::driven_ports::AssigneeWriter for DbAssigneeWriter {
    async fn link_actor(
        &self,
        actor: ActorRef,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<LinkChange, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let insert = match actor.kind {
            ActorKind::Member => {
                "INSERT INTO todos_members(todo_id, member_id) VALUES ($1, $2) ON CONFLICT DO NOTHING"
            }
            ActorKind::Child => {
                "INSERT INTO todos_children(todo_id, child_id) VALUES ($1, $2) ON CONFLICT DO NOTHING"
            }
        };
        let result = query(insert)
            .bind(todo_id)
            .bind(actor.id)
            .execute(cxn.borrow_connection())
            .await
            .with_context(|| format!("trying to assign {actor} to todo {todo_id}"))?;

        Ok(link_change(result, LinkChange::Added))
    }

    async fn unlink_actor(
        &self,
        actor: ActorRef,
        todo_id: i32,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<LinkChange, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let delete = match actor.kind {
            ActorKind::Member => "DELETE FROM todos_members WHERE todo_id = $1 AND member_id = $2",
            ActorKind::Child => "DELETE FROM todos_children WHERE todo_id = $1 AND child_id = $2",
        };
        let result = query(delete)
            .bind(todo_id)
            .bind(actor.id)
            .execute(cxn.borrow_connection())
            .await
            .with_context(|| format!("trying to unassign {actor} from todo {todo_id}"))?;

        Ok(link_change(result, LinkChange::Removed))
    }
}

pub struct DbDetectActor;

impl domain::assignment::driven_ports::DetectActor for DbDetectActor {
    async fn actor_exists(
        &self,
        actor: ActorRef,
        ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<bool, Error> {
        let mut cxn = ext_cxn.database_cxn().await?;

        let count_query = match actor.kind {
            ActorKind::Member => "SELECT count(*) AS count FROM members m WHERE m.id = $1",
            ActorKind::Child => "SELECT count(*) AS count FROM children c WHERE c.id = $1",
        };
        let actor_count = query_as::<_, Count>(count_query)
            .bind(actor.id)
            .fetch_one(cxn.borrow_connection())
            .await
            .context("Detecting actor with ID")?;

        Ok(actor_count.exists())
    }
}
