use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use campus_server::model::{College, NewStudent, Student, User};
use campus_server::store::Collection;
use campus_server::{schema, Context, MemoryStore, Store, StoreError};
use juniper::{execute_sync, Variables};
use serde_json::{json, Value};

fn store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore {
        colleges: Collection::from_records(vec![College {
            id: "1".to_owned(),
            name: "AMU".to_owned(),
            location: "Uttar Pradesh".to_owned(),
            rating: 5.0,
        }]),
        ..MemoryStore::default()
    })
}

/// Forwards to a seeded store and counts college lookups.
struct CountingStore {
    inner: MemoryStore,
    college_lookups: AtomicUsize,
}

impl Store for CountingStore {
    fn create_student(&self, fields: NewStudent) -> Result<Student, StoreError> {
        self.inner.create_student(fields)
    }

    fn get_student(&self, id: &str) -> Result<Option<Student>, StoreError> {
        self.inner.get_student(id)
    }

    fn get_college(&self, id: &str) -> Result<Option<College>, StoreError> {
        self.college_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.get_college(id)
    }
}

fn student(id: &str, college_id: &str) -> Student {
    Student {
        id: id.to_owned(),
        college_id: Some(college_id.to_owned()),
        first_name: Some("Sam".to_owned()),
        last_name: None,
        email: None,
    }
}

fn ada() -> User {
    User {
        id: "S1".to_owned(),
        first_name: "Ada".to_owned(),
    }
}

/// Runs a document and returns the data as JSON plus the error messages.
fn run(query: &str, context: &Context) -> (Value, Vec<String>) {
    let schema = schema();
    let (data, errors) = execute_sync(query, None, &schema, &Variables::new(), context).unwrap();

    let messages = errors
        .iter()
        .map(|e| e.error().message().to_owned())
        .collect();

    (serde_json::to_value(&data).unwrap(), messages)
}

#[test]
fn greeting_is_public() {
    let (data, errors) = run("{ greeting }", &Context::anonymous(store()));

    assert!(errors.is_empty());
    assert_eq!(data, json!({ "greeting": "hello" }));
}

#[test]
fn greeting_with_auth_without_user_is_unauthorized() {
    let (data, errors) = run("{ greetingWithAuth }", &Context::anonymous(store()));

    assert_eq!(errors, vec!["Unauthorized".to_owned()]);
    assert_eq!(data, Value::Null);
}

#[test]
fn greeting_with_auth_welcomes_the_user() {
    let (data, errors) = run("{ greetingWithAuth }", &Context::authenticated(store(), ada()));

    assert!(errors.is_empty());
    assert_eq!(
        data,
        json!({ "greetingWithAuth": "Hello from Fenago, welcome back : Ada" })
    );
}

#[test]
fn missing_student_is_null() {
    let (data, errors) = run(
        "{ greeting studentById(id: \"missing\") { id } }",
        &Context::anonymous(store()),
    );

    assert!(errors.is_empty());
    assert_eq!(data, json!({ "greeting": "hello", "studentById": null }));
}

#[test]
fn create_student_then_read_it_back() {
    let store = store();
    let context = Context::anonymous(store.clone());

    let (data, errors) = run(
        r#"mutation {
            createStudent(collegeId: 1, firstName: "Sam", lastName: "Lee") {
                id
                collegeId
                firstName
                lastName
                college { id name }
            }
        }"#,
        &context,
    );

    assert!(errors.is_empty(), "{:?}", errors);
    let created = &data["createStudent"];
    assert_eq!(created["collegeId"], json!("1"));
    assert_eq!(created["firstName"], json!("Sam"));
    assert_eq!(created["lastName"], json!("Lee"));
    assert_eq!(created["college"], json!({ "id": "1", "name": "AMU" }));

    let id = created["id"].as_str().unwrap();
    let stored = store.get_student(id).unwrap().unwrap();
    assert_eq!(stored.first_name.as_deref(), Some("Sam"));
    assert_eq!(stored.college_id.as_deref(), Some("1"));

    let (data, errors) = run(
        &format!("{{ studentById(id: \"{}\") {{ lastName college {{ location }} }} }}", id),
        &context,
    );

    assert!(errors.is_empty());
    assert_eq!(
        data,
        json!({ "studentById": { "lastName": "Lee", "college": { "location": "Uttar Pradesh" } } })
    );
}

#[test]
fn unknown_college_resolves_to_null() {
    let (data, errors) = run(
        r#"mutation { createStudent(collegeId: "nowhere", firstName: "Sam") { lastName college { id } } }"#,
        &Context::anonymous(store()),
    );

    assert!(errors.is_empty());
    assert_eq!(
        data,
        json!({ "createStudent": { "lastName": null, "college": null } })
    );
}

#[test]
fn college_is_looked_up_once_per_student() {
    let store = Arc::new(CountingStore {
        inner: MemoryStore {
            students: Collection::from_records(vec![student("S1", "1"), student("S2", "1")]),
            colleges: Collection::from_records(vec![College {
                id: "1".to_owned(),
                name: "AMU".to_owned(),
                location: "Uttar Pradesh".to_owned(),
                rating: 5.0,
            }]),
        },
        college_lookups: AtomicUsize::new(0),
    });

    let (data, errors) = run(
        r#"{
            first: studentById(id: "S1") { college { id } }
            second: studentById(id: "S2") { college { id } }
        }"#,
        &Context::anonymous(store.clone()),
    );

    assert!(errors.is_empty());
    assert_eq!(
        data,
        json!({
            "first": { "college": { "id": "1" } },
            "second": { "college": { "id": "1" } }
        })
    );
    assert_eq!(store.college_lookups.load(Ordering::SeqCst), 2);
}
