use std::collections::HashMap;

use crate::model::User;

/// Shown where a record has no user reference at all.
pub const UNASSIGNED: &str = "Unassigned";
/// Shown where a user reference does not resolve.
pub const UNKNOWN: &str = "Unknown";

/// Id → user lookup over a borrowed user collection.
///
/// When ids repeat, the first user wins, matching a linear `find` over the
/// collection.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory<'a> {
    by_id: HashMap<&'a str, &'a User>,
}

impl<'a> UserDirectory<'a> {
    #[must_use]
    pub fn new(users: &'a [User]) -> Self {
        let mut by_id = HashMap::with_capacity(users.len());
        for user in users.iter().filter(|u| !u.id.is_empty()) {
            by_id.entry(user.id.as_str()).or_insert(user);
        }
        Self { by_id }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&'a User> {
        self.by_id.get(id).copied()
    }

    /// Name for display; never fails.
    #[must_use]
    pub fn display_name(&self, id: &str) -> &'a str {
        if id.is_empty() {
            return UNASSIGNED;
        }
        match self.get(id) {
            Some(user) if !user.name.is_empty() => user.name.as_str(),
            Some(_) | None => UNKNOWN,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            ..User::default()
        }
    }

    #[test]
    fn first_user_with_an_id_wins() {
        let users = vec![user("u-1", "Dana"), user("u-1", "Impostor"), user("u-2", "Sam")];
        let directory = UserDirectory::new(&users);
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.display_name("u-1"), "Dana");
    }

    #[test]
    fn placeholders_for_missing_references() {
        let users = vec![user("u-1", "Dana"), user("", "Ghost"), user("u-3", "")];
        let directory = UserDirectory::new(&users);
        assert_eq!(directory.display_name(""), UNASSIGNED);
        assert_eq!(directory.display_name("u-404"), UNKNOWN);
        assert_eq!(directory.display_name("u-3"), UNKNOWN);
        assert!(directory.get("").is_none());
    }
}
