use crate::domain::LinkChange;
use crate::domain::assignment::{
    ActorKind, ActorRef, Child, Member, driven_ports as assignment_ports,
};
use crate::domain::category::{Category, driven_ports as category_ports};
use crate::domain::todo::{NewTodo, Todo, TodoUpdate, driven_ports as todo_ports};
use crate::external_connections::ExternalConnectivity;
use anyhow::anyhow;
use std::sync::RwLock;

pub const HOUSEHOLD: &str = "a12345";
pub const OTHER_HOUSEHOLD: &str = "b67890";
pub const MOM: i32 = 1;
pub const DAD: i32 = 2;
pub const CHILD_SEVEN: i32 = 7;
pub const CHORES: i32 = 1;
pub const HOMEWORK: i32 = 2;

/// Connectivity represents the "connected" state of a mocked driven port and provides
/// common behavior for returning an error if the port is configured to be in a disconnected state.
pub enum Connectivity {
    Connected,
    Disconnected,
}

impl Connectivity {
    /// Return an error if connectivity is in a "disconnected" state
    pub fn blow_up_if_disconnected(&self) -> Result<(), anyhow::Error> {
        match self {
            Self::Connected => Ok(()),
            Self::Disconnected => Err(anyhow!("could not connect to service!")),
        }
    }
}

/// FakeImplementation helps mock a function and capture the arguments it's called with.
/// Mocking crates don't cope well with async functions on traits, so mocked ports hold one
/// of these per method and are wrapped in a [std::sync::Mutex].
///
/// * [Args] represents the arguments passed to the function that should be captured on a call
/// * [Ret] represents the type of the function's return value
pub struct FakeImplementation<Args, Ret> {
    saved_arguments: Vec<Args>,
    return_value: Option<Ret>,
}

impl<Args, Ret> FakeImplementation<Args, Ret> {
    pub fn new() -> FakeImplementation<Args, Ret> {
        FakeImplementation {
            saved_arguments: Vec::new(),
            return_value: None,
        }
    }

    /// Saves arguments from a single invocation of the FakeImplementation
    pub fn save_arguments(&mut self, arguments: Args) {
        self.saved_arguments.push(arguments)
    }

    /// Returns the list of arguments passed on every call to this FakeImplementation
    pub fn calls(&self) -> &[Args] {
        self.saved_arguments.as_slice()
    }
}

impl<Args, Success, Fail> FakeImplementation<Args, Result<Success, Fail>>
where
    Success: Clone,
    Fail: Clone,
{
    /// Set the result that should be returned when this FakeImplementation is invoked
    pub fn set_returned_result(&mut self, return_value: Result<Success, Fail>) {
        self.return_value = Some(return_value);
    }

    /// Retrieve the result that should be returned when this FakeImplementation is invoked
    pub fn return_value_result(&self) -> Result<Success, Fail> {
        match self.return_value {
            Some(Ok(ref ok_result)) => Ok(ok_result.clone()),
            Some(Err(ref err)) => Err(err.clone()),
            None => panic!("Tried to return from a function where the return value wasn't set!"),
        }
    }
}

/// In-memory stand-in for every table the household todo ports touch. Link relations are
/// kept as `(todo_id, other_id)` pairs in insertion order.
pub struct InMemoryHousehold {
    pub todos: Vec<Todo>,
    pub members: Vec<Member>,
    pub children: Vec<Child>,
    pub categories: Vec<Category>,
    pub member_links: Vec<(i32, i32)>,
    pub child_links: Vec<(i32, i32)>,
    pub category_links: Vec<(i32, i32)>,
    pub connectivity: Connectivity,
    highest_todo_id: i32,
}

/// Describes the todos and links an [InMemoryHousehold] should start with. Todo ids are
/// assigned from 1 in the order todos are added.
#[derive(Default)]
pub struct HouseholdSeed {
    todos: Vec<(String, String)>,
    member_links: Vec<(i32, i32)>,
    child_links: Vec<(i32, i32)>,
    category_links: Vec<(i32, i32)>,
}

impl HouseholdSeed {
    pub fn todo(self, title: &str) -> Self {
        self.todo_in(HOUSEHOLD, title)
    }

    pub fn todo_in(mut self, household: &str, title: &str) -> Self {
        self.todos.push((household.to_owned(), title.to_owned()));
        self
    }

    pub fn member_link(mut self, todo_id: i32, member_id: i32) -> Self {
        self.member_links.push((todo_id, member_id));
        self
    }

    pub fn child_link(mut self, todo_id: i32, child_id: i32) -> Self {
        self.child_links.push((todo_id, child_id));
        self
    }

    pub fn category_link(mut self, todo_id: i32, category_id: i32) -> Self {
        self.category_links.push((todo_id, category_id));
        self
    }
}

impl InMemoryHousehold {
    /// A household with mom, dad, child 7, and the "Chores" and "Homework" categories but no todos
    pub fn new() -> InMemoryHousehold {
        InMemoryHousehold {
            todos: Vec::new(),
            members: vec![member(MOM, "mom"), member(DAD, "dad")],
            children: vec![Child {
                id: CHILD_SEVEN,
                username: "kiddo".to_owned(),
                current_household: HOUSEHOLD.to_owned(),
                points: 5,
            }],
            categories: vec![
                Category {
                    id: CHORES,
                    name: "Chores".to_owned(),
                    household: HOUSEHOLD.to_owned(),
                },
                Category {
                    id: HOMEWORK,
                    name: "Homework".to_owned(),
                    household: HOUSEHOLD.to_owned(),
                },
            ],
            member_links: Vec::new(),
            child_links: Vec::new(),
            category_links: Vec::new(),
            connectivity: Connectivity::Connected,
            highest_todo_id: 0,
        }
    }

    pub fn new_locked() -> RwLock<InMemoryHousehold> {
        RwLock::new(Self::new())
    }

    pub fn seeded(seed: HouseholdSeed) -> RwLock<InMemoryHousehold> {
        let mut household = Self::new();
        household.todos = seed
            .todos
            .into_iter()
            .enumerate()
            .map(|(index, (household_id, title))| Todo {
                id: index as i32 + 1,
                household: household_id,
                title,
                description: None,
                point_value: 0,
                completed: false,
            })
            .collect();
        household.highest_todo_id = household.todos.len() as i32;
        household.member_links = seed.member_links;
        household.child_links = seed.child_links;
        household.category_links = seed.category_links;

        RwLock::new(household)
    }

    fn links_for_mut(&mut self, kind: ActorKind) -> &mut Vec<(i32, i32)> {
        match kind {
            ActorKind::Member => &mut self.member_links,
            ActorKind::Child => &mut self.child_links,
        }
    }

    fn household_todos_where(&self, household_id: &str, keep: impl Fn(&Todo) -> bool) -> Vec<Todo> {
        self.todos
            .iter()
            .filter(|todo| todo.household == household_id && keep(todo))
            .cloned()
            .collect()
    }
}

fn member(id: i32, username: &str) -> Member {
    Member {
        id,
        username: username.to_owned(),
        email: format!("{username}@test.com"),
        current_household: HOUSEHOLD.to_owned(),
        points: 25,
    }
}

/// Adds a pair to a link relation unless it is already present
fn insert_link(links: &mut Vec<(i32, i32)>, link: (i32, i32)) -> LinkChange {
    if links.contains(&link) {
        LinkChange::Unchanged
    } else {
        links.push(link);
        LinkChange::Added
    }
}

fn remove_link(links: &mut Vec<(i32, i32)>, link: (i32, i32)) -> LinkChange {
    let count_before = links.len();
    links.retain(|existing| *existing != link);
    if links.len() < count_before {
        LinkChange::Removed
    } else {
        LinkChange::Unchanged
    }
}

impl todo_ports::TodoReader for RwLock<InMemoryHousehold> {
    async fn todos_for_household(
        &self,
        household_id: &str,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Todo>, anyhow::Error> {
        let household = self.read().expect("household rw lock poisoned");
        household.connectivity.blow_up_if_disconnected()?;

        Ok(household.household_todos_where(household_id, |_| true))
    }

    async fn todos_for_member(
        &self,
        household_id: &str,
        member_id: i32,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Todo>, anyhow::Error> {
        let household = self.read().expect("household rw lock poisoned");
        household.connectivity.blow_up_if_disconnected()?;

        Ok(household.household_todos_where(household_id, |todo| {
            household.member_links.contains(&(todo.id, member_id))
        }))
    }

    async fn todos_for_child(
        &self,
        household_id: &str,
        child_id: i32,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Todo>, anyhow::Error> {
        let household = self.read().expect("household rw lock poisoned");
        household.connectivity.blow_up_if_disconnected()?;

        Ok(household.household_todos_where(household_id, |todo| {
            household.child_links.contains(&(todo.id, child_id))
        }))
    }

    async fn todo_by_id(
        &self,
        todo_id: i32,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<Todo>, anyhow::Error> {
        let household = self.read().expect("household rw lock poisoned");
        household.connectivity.blow_up_if_disconnected()?;

        Ok(household.todos.iter().find(|todo| todo.id == todo_id).cloned())
    }
}

impl todo_ports::TodoWriter for RwLock<InMemoryHousehold> {
    async fn create_todo(
        &self,
        new_todo: &NewTodo,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Todo, anyhow::Error> {
        let mut household = self.write().expect("household rw lock poisoned");
        household.connectivity.blow_up_if_disconnected()?;

        household.highest_todo_id += 1;
        let todo = Todo {
            id: household.highest_todo_id,
            household: new_todo.household.clone(),
            title: new_todo.title.clone(),
            description: new_todo.description.clone(),
            point_value: new_todo.point_value,
            completed: new_todo.completed,
        };
        household.todos.push(todo.clone());

        Ok(todo)
    }

    async fn update_todo(
        &self,
        todo_id: i32,
        household_id: &str,
        update: &TodoUpdate,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<Todo>, anyhow::Error> {
        let mut household = self.write().expect("household rw lock poisoned");
        household.connectivity.blow_up_if_disconnected()?;

        let Some(todo) = household
            .todos
            .iter_mut()
            .find(|todo| todo.id == todo_id && todo.household == household_id)
        else {
            return Ok(None);
        };
        if let Some(ref title) = update.title {
            todo.title = title.clone();
        }
        if let Some(ref description) = update.description {
            todo.description = Some(description.clone());
        }
        if let Some(point_value) = update.point_value {
            todo.point_value = point_value;
        }
        if let Some(completed) = update.completed {
            todo.completed = completed;
        }

        Ok(Some(todo.clone()))
    }

    async fn delete_todo(
        &self,
        todo_id: i32,
        household_id: &str,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<bool, anyhow::Error> {
        let mut household = self.write().expect("household rw lock poisoned");
        household.connectivity.blow_up_if_disconnected()?;

        let todo_index = household
            .todos
            .iter()
            .position(|todo| todo.id == todo_id && todo.household == household_id);
        let Some(idx) = todo_index else {
            return Ok(false);
        };

        household.todos.remove(idx);
        household.member_links.retain(|(linked_todo, _)| *linked_todo != todo_id);
        household.child_links.retain(|(linked_todo, _)| *linked_todo != todo_id);
        household.category_links.retain(|(linked_todo, _)| *linked_todo != todo_id);

        Ok(true)
    }
}

impl assignment_ports::AssigneeReader for RwLock<InMemoryHousehold> {
    async fn members_assigned(
        &self,
        todo_id: i32,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Member>, anyhow::Error> {
        let household = self.read().expect("household rw lock poisoned");
        household.connectivity.blow_up_if_disconnected()?;

        Ok(household
            .member_links
            .iter()
            .filter(|(linked_todo, _)| *linked_todo == todo_id)
            .filter_map(|(_, member_id)| {
                household.members.iter().find(|member| member.id == *member_id)
            })
            .cloned()
            .collect())
    }

    async fn children_assigned(
        &self,
        todo_id: i32,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Child>, anyhow::Error> {
        let household = self.read().expect("household rw lock poisoned");
        household.connectivity.blow_up_if_disconnected()?;

        Ok(household
            .child_links
            .iter()
            .filter(|(linked_todo, _)| *linked_todo == todo_id)
            .filter_map(|(_, child_id)| {
                household.children.iter().find(|child| child.id == *child_id)
            })
            .cloned()
            .collect())
    }
}

impl assignment_ports::AssigneeWriter for RwLock<InMemoryHousehold> {
    async fn link_actor(
        &self,
        actor: ActorRef,
        todo_id: i32,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<LinkChange, anyhow::Error> {
        let mut household = self.write().expect("household rw lock poisoned");
        household.connectivity.blow_up_if_disconnected()?;

        Ok(insert_link(household.links_for_mut(actor.kind), (todo_id, actor.id)))
    }

    async fn unlink_actor(
        &self,
        actor: ActorRef,
        todo_id: i32,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<LinkChange, anyhow::Error> {
        let mut household = self.write().expect("household rw lock poisoned");
        household.connectivity.blow_up_if_disconnected()?;

        Ok(remove_link(household.links_for_mut(actor.kind), (todo_id, actor.id)))
    }
}

impl assignment_ports::DetectActor for RwLock<InMemoryHousehold> {
    async fn actor_exists(
        &self,
        actor: ActorRef,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<bool, anyhow::Error> {
        let household = self.read().expect("household rw lock poisoned");
        household.connectivity.blow_up_if_disconnected()?;

        let exists = match actor.kind {
            ActorKind::Member => household.members.iter().any(|member| member.id == actor.id),
            ActorKind::Child => household.children.iter().any(|child| child.id == actor.id),
        };
        Ok(exists)
    }
}

impl category_ports::CategoryReader for RwLock<InMemoryHousehold> {
    async fn categories_for_todo(
        &self,
        todo_id: i32,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Vec<Category>, anyhow::Error> {
        let household = self.read().expect("household rw lock poisoned");
        household.connectivity.blow_up_if_disconnected()?;

        Ok(household
            .category_links
            .iter()
            .filter(|(linked_todo, _)| *linked_todo == todo_id)
            .filter_map(|(_, category_id)| {
                household.categories.iter().find(|category| category.id == *category_id)
            })
            .cloned()
            .collect())
    }

    async fn category_by_id(
        &self,
        category_id: i32,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<Option<Category>, anyhow::Error> {
        let household = self.read().expect("household rw lock poisoned");
        household.connectivity.blow_up_if_disconnected()?;

        Ok(household
            .categories
            .iter()
            .find(|category| category.id == category_id)
            .cloned())
    }
}

impl category_ports::CategoryWriter for RwLock<InMemoryHousehold> {
    async fn link_category(
        &self,
        todo_id: i32,
        category_id: i32,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<LinkChange, anyhow::Error> {
        let mut household = self.write().expect("household rw lock poisoned");
        household.connectivity.blow_up_if_disconnected()?;

        Ok(insert_link(&mut household.category_links, (todo_id, category_id)))
    }

    async fn unlink_category(
        &self,
        todo_id: i32,
        category_id: i32,
        _ext_cxn: &mut impl ExternalConnectivity,
    ) -> Result<LinkChange, anyhow::Error> {
        let mut household = self.write().expect("household rw lock poisoned");
        household.connectivity.blow_up_if_disconnected()?;

        Ok(remove_link(&mut household.category_links, (todo_id, category_id)))
    }
}
