use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::model::{College, NewStudent, Record, Student};

pub const COLLEGES_FILE: &str = "colleges.json";
pub const STUDENTS_FILE: &str = "students.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store table lock was poisoned")]
    Poisoned,
    #[error("failed to read seed file {path:?}: {source}")]
    Seed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse seed file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Data the resolvers read and write. Every call stands on its own; callers
/// never get more than one operation done atomically.
pub trait Store: Send + Sync {
    fn create_student(&self, fields: NewStudent) -> Result<Student, StoreError>;
    fn get_student(&self, id: &str) -> Result<Option<Student>, StoreError>;
    fn get_college(&self, id: &str) -> Result<Option<College>, StoreError>;
}

/// One table of records keyed by id.
pub struct Collection<T> {
    records: RwLock<HashMap<String, T>>,
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Collection {
            records: RwLock::new(HashMap::new()),
        }
    }

    pub fn from_records(records: Vec<T>) -> Self {
        let records = records
            .into_iter()
            .map(|r| (r.id().to_owned(), r))
            .collect();

        Collection {
            records: RwLock::new(records),
        }
    }

    pub fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.get(id).cloned())
    }

    /// Inserts the record built from a freshly assigned id and returns it.
    pub fn create(&self, build: impl FnOnce(String) -> T) -> Result<T, StoreError> {
        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        let record = build(Uuid::new_v4().to_string());
        records.insert(record.id().to_owned(), record.clone());
        Ok(record)
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory store, optionally seeded from JSON files. Changes are never
/// written back.
#[derive(Default)]
pub struct MemoryStore {
    pub students: Collection<Student>,
    pub colleges: Collection<College>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the tables from `colleges.json` and `students.json` in `data_dir`.
    pub fn load(data_dir: &Path) -> Result<Self, StoreError> {
        let colleges: Vec<College> = read_table(&data_dir.join(COLLEGES_FILE))?;
        let students: Vec<Student> = read_table(&data_dir.join(STUDENTS_FILE))?;

        log::info!(
            "Loaded {} colleges and {} students from {:?}",
            colleges.len(),
            students.len(),
            data_dir
        );

        Ok(MemoryStore {
            students: Collection::from_records(students),
            colleges: Collection::from_records(colleges),
        })
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Seed file {:?} not found, starting with an empty table", path);
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Seed {
                path: path.to_owned(),
                source,
            })
        }
    };

    serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
        path: path.to_owned(),
        source,
    })
}

impl Store for MemoryStore {
    fn create_student(&self, fields: NewStudent) -> Result<Student, StoreError> {
        self.students.create(|id| fields.into_student(id))
    }

    fn get_student(&self, id: &str) -> Result<Option<Student>, StoreError> {
        self.students.get(id)
    }

    fn get_college(&self, id: &str) -> Result<Option<College>, StoreError> {
        self.colleges.get(id)
    }
}
