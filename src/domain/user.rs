//! Comment authors

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq, Hash)]
struct UserInfo {
    id: u64,
    name: Option<String>,
}

/// Opaque handle to the author of a comment.
///
/// Handles are cheap to clone and compare by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    inner: Arc<UserInfo>,
}

impl User {
    pub fn new(id: u64, name: Option<&str>) -> Self {
        User {
            inner: Arc::new(UserInfo {
                id,
                name: name.map(str::to_string),
            }),
        }
    }

    /// An author the upstream service does not identify
    pub fn anonymous() -> Self {
        User::new(0, None)
    }

    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.inner.id == 0 && self.inner.name.is_none()
    }

    /// True when both handles point at the same interned record
    pub fn ptr_eq(&self, other: &User) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({})", name, self.id()),
            None if self.is_anonymous() => write!(f, "anonymous"),
            None => write!(f, "#{}", self.id()),
        }
    }
}

/// Builds author handles for the reader
pub trait UserFactory {
    /// Must return an equal handle for repeated identical inputs
    fn create_user(&mut self, id: u64, name: Option<&str>) -> User;
}

/// Default factory: interns handles so one author maps to one allocation
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: HashMap<(u64, Option<String>), User>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserFactory for UserRegistry {
    fn create_user(&mut self, id: u64, name: Option<&str>) -> User {
        if id == 0 && name.is_none() {
            return User::anonymous();
        }
        self.users
            .entry((id, name.map(str::to_string)))
            .or_insert_with(|| User::new(id, name))
            .clone()
    }
}
