//! In-memory phonebook storage

use std::collections::HashSet;
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::types::{NewPerson, Person};

/// In-memory entry storage with collision-checked id generation
pub struct PersonStore {
    inner: RwLock<Inner>,
}

struct Inner {
    persons: Vec<Person>,
    next_id: u64,
}

impl Inner {
    /// Next counter value not already used as an id
    fn allocate_id(&mut self) -> String {
        loop {
            let candidate = self.next_id.to_string();
            self.next_id += 1;
            if !self.persons.iter().any(|p| p.id == candidate) {
                return candidate;
            }
        }
    }
}

impl Default for PersonStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                persons: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a store holding `persons` in the given order.
    ///
    /// Fails with [`Error::DuplicateId`] if two entries share an id. The id
    /// counter starts above the largest numeric id present.
    pub fn with_persons(persons: Vec<Person>) -> Result<Self> {
        let mut seen = HashSet::new();
        for person in &persons {
            if !seen.insert(person.id.as_str()) {
                return Err(Error::DuplicateId(person.id.clone()));
            }
        }

        let next_id = persons
            .iter()
            .filter_map(|p| p.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max.saturating_add(1));

        Ok(Self {
            inner: RwLock::new(Inner { persons, next_id }),
        })
    }

    /// All entries in storage order
    pub async fn list(&self) -> Vec<Person> {
        let inner = self.inner.read().await;
        inner.persons.clone()
    }

    /// Number of entries currently held
    pub async fn len(&self) -> usize {
        self.inner.read().await.persons.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Get an entry by exact id
    pub async fn get(&self, id: &str) -> Option<Person> {
        let inner = self.inner.read().await;
        inner.persons.iter().find(|p| p.id == id).cloned()
    }

    /// Append a new entry with a freshly generated id
    pub async fn create(&self, new_person: NewPerson) -> Result<Person> {
        let mut inner = self.inner.write().await;

        if inner.persons.iter().any(|p| p.name == new_person.name) {
            return Err(Error::DuplicateName(new_person.name));
        }

        let id = inner.allocate_id();
        let person = new_person.into_person(id);
        inner.persons.push(person.clone());

        tracing::debug!("Created person {} ({})", person.id, person.name);
        Ok(person)
    }

    /// Remove every entry with the given id, returning how many were removed
    pub async fn delete(&self, id: &str) -> usize {
        let mut inner = self.inner.write().await;
        let before = inner.persons.len();
        inner.persons.retain(|p| p.id != id);
        let removed = before - inner.persons.len();

        if removed > 0 {
            tracing::debug!("Deleted person {}", id);
        }
        removed
    }
}
