use std::sync::Arc;

use juniper::{EmptySubscription, RootNode};

use crate::model::User;
use crate::store::Store;

pub mod resolvers;
mod objects;

pub use objects::{Mutation, Query};

/// Per-request data handed to every resolver. Resolvers only read it.
pub struct Context {
    pub store: Arc<dyn Store>,
    pub user: Option<User>,
}

impl Context {
    pub fn anonymous(store: Arc<dyn Store>) -> Self {
        Context { store, user: None }
    }

    pub fn authenticated(store: Arc<dyn Store>, user: User) -> Self {
        Context {
            store,
            user: Some(user),
        }
    }
}

// To make our context usable by Juniper, we have to implement a marker trait.
impl juniper::Context for Context {}

// A root schema consists of a query and a mutation.
// Request queries can be executed against a RootNode.
pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

pub fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::<Context>::new())
}
