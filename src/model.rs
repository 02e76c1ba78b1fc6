use serde::{Deserialize, Serialize};

/// A record kept in one of the store's tables.
pub trait Record: Clone + Send + Sync {
    fn id(&self) -> &str;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    #[serde(default)]
    pub college_id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Record for Student {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub rating: f64,
}

impl Record for College {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields handed to the store when a student is created. Nothing here is
/// checked; whatever the caller sent is stored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub college_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NewStudent {
    pub(crate) fn into_student(self, id: String) -> Student {
        Student {
            id,
            college_id: self.college_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: None,
        }
    }
}

/// The authenticated principal attached to a request.
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub id: String,
    pub first_name: String,
}

impl From<Student> for User {
    fn from(student: Student) -> Self {
        if student.first_name.is_none() {
            log::debug!("Student {} has no first name, greeting them without one", student.id);
        }

        User {
            id: student.id,
            first_name: student.first_name.unwrap_or_default(),
        }
    }
}
