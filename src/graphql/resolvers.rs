//! Field handlers behind the schema objects.
//!
//! Each function takes the request [`Context`] plus whatever the field needs
//! (typed arguments, or the parent record for nested fields). Store failures
//! are returned unchanged as [`ResolverError::Store`].

use super::Context;
use crate::auth;
use crate::error::ResolverError;
use crate::model::{College, NewStudent, Student};

pub const GREETING: &str = "hello";
pub const WELCOME_BACK: &str = "Hello from Fenago, welcome back : ";

pub fn greeting() -> &'static str {
    GREETING
}

pub fn greeting_with_auth(context: &Context) -> Result<String, ResolverError> {
    let user = auth::require_user(context)?;
    Ok(format!("{}{}", WELCOME_BACK, user.first_name))
}

pub fn create_student(context: &Context, fields: NewStudent) -> Result<Student, ResolverError> {
    let student = context.store.create_student(fields)?;
    log::debug!("Created student {}", student.id);
    Ok(student)
}

pub fn student_by_id(context: &Context, id: &str) -> Result<Option<Student>, ResolverError> {
    Ok(context.store.get_student(id)?)
}

pub fn student_college(
    context: &Context,
    student: &Student,
) -> Result<Option<College>, ResolverError> {
    match &student.college_id {
        Some(college_id) => Ok(context.store.get_college(college_id)?),
        None => Ok(None),
    }
}
