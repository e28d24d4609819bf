//! Seed identities the bundled transactions belong to.
//!
//! These are display-only users, unrelated to the `accounts` table.

use serde::{Deserialize, Serialize};

/// Identity used when a record points to an unknown `user_id`.
pub const DEFAULT_USER_ID: &str = "user_001";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

struct Seed {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    avatar: &'static str,
}

const SEEDS: [Seed; 4] = [
    Seed {
        id: "user_001",
        name: "Alex Johnson",
        email: "alex.johnson@example.com",
        avatar: "https://images.pexels.com/photos/220453/pexels-photo-220453.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=1",
    },
    Seed {
        id: "user_002",
        name: "Sarah Chen",
        email: "sarah.chen@example.com",
        avatar: "https://images.pexels.com/photos/415829/pexels-photo-415829.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=1",
    },
    Seed {
        id: "user_003",
        name: "Michael Rodriguez",
        email: "michael.rodriguez@example.com",
        avatar: "https://images.pexels.com/photos/91227/pexels-photo-91227.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=1",
    },
    Seed {
        id: "user_004",
        name: "Emily Davis",
        email: "emily.davis@example.com",
        avatar: "https://images.pexels.com/photos/1040881/pexels-photo-1040881.jpeg?auto=compress&cs=tinysrgb&w=150&h=150&dpr=1",
    },
];

impl From<&Seed> for User {
    fn from(seed: &Seed) -> Self {
        Self {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            email: seed.email.to_string(),
            avatar: Some(seed.avatar.to_string()),
        }
    }
}

/// Looks up a seed identity, falling back to [`DEFAULT_USER_ID`].
#[must_use]
pub fn seed_user(user_id: &str) -> User {
    // SEEDS[0] is DEFAULT_USER_ID.
    let seed = SEEDS
        .iter()
        .find(|seed| seed.id == user_id)
        .unwrap_or(&SEEDS[0]);
    User::from(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_resolve() {
        assert_eq!(seed_user("user_003").name, "Michael Rodriguez");
    }

    #[test]
    fn unknown_ids_fall_back_to_default() {
        let user = seed_user("user_999");
        assert_eq!(user.id, DEFAULT_USER_ID);
        assert_eq!(user.name, "Alex Johnson");
    }
}
