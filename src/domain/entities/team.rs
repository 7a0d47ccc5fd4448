//! Team and membership entities.

use chrono::{DateTime, Utc};

/// A team owning workspaces and sharing link management.
#[derive(Debug, Clone)]
pub struct Team {
    pub id: i64,
    pub name: String,
    /// Set once at creation; the owner role is never reassigned through
    /// the invite path.
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

/// Member role, ordered by authority: `Member < Admin < Owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    Member,
    Admin,
    Owner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Admin => "admin",
            Role::Owner => "owner",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "member" => Some(Role::Member),
            "admin" => Some(Role::Admin),
            "owner" => Some(Role::Owner),
            _ => None,
        }
    }

    /// Returns true if this role may invite new members.
    pub fn can_invite(&self) -> bool {
        *self >= Role::Admin
    }

    /// Only a strictly higher role may change a lower one.
    pub fn can_change(&self, target: Role) -> bool {
        *self > target
    }
}

/// Membership state: exactly one of the two identities is authoritative.
///
/// A record transitions `Invited -> Active` exactly once, when a user whose
/// verified e-mail matches the invitation signs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership {
    Invited { invited_email: String },
    Active { user_id: String },
}

impl Membership {
    pub fn is_active(&self) -> bool {
        matches!(self, Membership::Active { .. })
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Membership::Active { user_id } => Some(user_id),
            Membership::Invited { .. } => None,
        }
    }

    pub fn invited_email(&self) -> Option<&str> {
        match self {
            Membership::Invited { invited_email } => Some(invited_email),
            Membership::Active { .. } => None,
        }
    }
}

/// A team member row, pending or joined.
#[derive(Debug, Clone)]
pub struct TeamMember {
    pub id: i64,
    pub team_id: i64,
    pub membership: Membership,
    pub role: Role,
    pub invited_by: Option<String>,
    pub invited_at: DateTime<Utc>,
    pub joined_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::Owner > Role::Admin);
        assert!(Role::Admin > Role::Member);
        assert!(Role::Owner.can_invite());
        assert!(Role::Admin.can_invite());
        assert!(!Role::Member.can_invite());
    }

    #[test]
    fn test_only_higher_role_changes_lower() {
        assert!(Role::Owner.can_change(Role::Admin));
        assert!(Role::Admin.can_change(Role::Member));
        assert!(!Role::Admin.can_change(Role::Admin));
        assert!(!Role::Admin.can_change(Role::Owner));
        assert!(!Role::Member.can_change(Role::Member));
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Member, Role::Admin, Role::Owner] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("editor"), None);
    }

    #[test]
    fn test_membership_identity_is_exclusive() {
        let pending = Membership::Invited {
            invited_email: "new@example.com".to_string(),
        };
        assert!(!pending.is_active());
        assert_eq!(pending.invited_email(), Some("new@example.com"));
        assert_eq!(pending.user_id(), None);

        let joined = Membership::Active {
            user_id: "user_9".to_string(),
        };
        assert!(joined.is_active());
        assert_eq!(joined.user_id(), Some("user_9"));
        assert_eq!(joined.invited_email(), None);
    }
}
