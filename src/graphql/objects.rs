use juniper::{graphql_object, ID};

use super::resolvers;
use super::Context;
use crate::error::ResolverError;
use crate::model::{College, NewStudent, Student};

pub struct Query;

#[graphql_object(context = Context)]
impl Query {
    fn greeting() -> &'static str {
        resolvers::greeting()
    }

    /// Greets the signed-in student. Fails with `Unauthorized` for anonymous
    /// requests.
    fn greeting_with_auth(context: &Context) -> Result<String, ResolverError> {
        resolvers::greeting_with_auth(context)
    }

    fn student_by_id(context: &Context, id: ID) -> Result<Option<Student>, ResolverError> {
        resolvers::student_by_id(context, &id.to_string())
    }
}

pub struct Mutation;

#[graphql_object(context = Context)]
impl Mutation {
    /// Stores a new student exactly as given and returns the created record.
    fn create_student(
        context: &Context,
        college_id: Option<ID>,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<Student, ResolverError> {
        let fields = NewStudent {
            college_id: college_id.map(|id| id.to_string()),
            first_name,
            last_name,
        };

        resolvers::create_student(context, fields)
    }
}

#[graphql_object(context = Context, description = "A student enrolled at one of the colleges")]
impl Student {
    fn id(&self) -> ID {
        ID::from(self.id.clone())
    }

    fn college_id(&self) -> Option<ID> {
        self.college_id.clone().map(ID::from)
    }

    fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Looked up once per student; lookups are not batched.
    fn college(&self, context: &Context) -> Result<Option<College>, ResolverError> {
        resolvers::student_college(context, self)
    }
}

#[graphql_object(context = Context)]
impl College {
    fn id(&self) -> ID {
        ID::from(self.id.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn rating(&self) -> f64 {
        self.rating
    }
}
