//! User records loaded from the user information file

use std::fmt;

/// A bank customer
///
/// Immutable after load. Accounts reference a user through `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub surname: String,
    pub mobile: String,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        surname: impl Into<String>,
        mobile: impl Into<String>,
    ) -> Self {
        User {
            id: id.into(),
            first_name: first_name.into(),
            surname: surname.into(),
            mobile: mobile.into(),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.surname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_full_name() {
        let user = User::new("A1", "Ada", "Lovelace", "0400000000");
        assert_eq!(user.to_string(), "Ada Lovelace");
    }
}
