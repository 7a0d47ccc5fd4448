//! Lifecycle guard: validation applied before mutations reach the store.
//!
//! Pure functions over already-loaded state. Plan ceilings, expiry ranges
//! and team transitions are all rejected here, synchronously, before any
//! write is attempted.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{PlanLimits, Role};
use crate::error::AppError;

/// Upper bound for `max_clicks`, mirroring the dashboard input range.
pub const MAX_CLICKS_CEILING: i32 = 10_000;

/// Checks the owner's link-count ceiling before a create.
pub fn validate_link_ceiling(current_links: i64, limits: &PlanLimits) -> Result<(), AppError> {
    if current_links >= limits.short_links {
        return Err(AppError::limit_exceeded(
            format!(
                "Link limit reached ({}). Upgrade your plan to create more links.",
                limits.short_links
            ),
            json!({ "limit": limits.short_links, "plan": limits.plan.as_str() }),
        ));
    }
    Ok(())
}

/// Checks that the owner's plan includes password protection.
pub fn validate_password_feature(limits: &PlanLimits) -> Result<(), AppError> {
    if !limits.password_protection {
        return Err(AppError::limit_exceeded(
            "Password protection is not available on your plan",
            json!({ "plan": limits.plan.as_str() }),
        ));
    }
    Ok(())
}

/// Checks the owner's custom-domain ceiling before registering one.
pub fn validate_domain_ceiling(current_domains: i64, limits: &PlanLimits) -> Result<(), AppError> {
    if current_domains >= limits.custom_domains {
        return Err(AppError::limit_exceeded(
            format!(
                "Custom domain limit reached ({}). Upgrade your plan to add more domains.",
                limits.custom_domains
            ),
            json!({ "limit": limits.custom_domains, "plan": limits.plan.as_str() }),
        ));
    }
    Ok(())
}

/// Validates expiry settings at the time they are applied.
///
/// `expires_at` must lie strictly in the future; `max_clicks` must be a
/// positive integer no greater than [`MAX_CLICKS_CEILING`].
pub fn validate_expiration(
    expires_at: Option<DateTime<Utc>>,
    max_clicks: Option<i32>,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    if let Some(at) = expires_at {
        if at <= now {
            return Err(AppError::bad_request(
                "Expiration time must be in the future",
                json!({ "expires_at": at.to_rfc3339() }),
            ));
        }
    }

    if let Some(max) = max_clicks {
        if max < 1 || max > MAX_CLICKS_CEILING {
            return Err(AppError::bad_request(
                format!("Click limit must be between 1 and {MAX_CLICKS_CEILING}"),
                json!({ "max_clicks": max }),
            ));
        }
    }

    Ok(())
}

/// Validates an invitation before any member row is created.
///
/// Only owners and admins may invite; the owner role is never grantable
/// through this path; the member ceiling comes from the *team owner's*
/// plan, not the inviter's.
pub fn validate_invite(
    inviter_role: Role,
    requested_role: Role,
    current_member_count: i64,
    owner_limits: &PlanLimits,
) -> Result<(), AppError> {
    if !inviter_role.can_invite() {
        return Err(AppError::forbidden(
            "Only owners and admins can invite members",
            json!({ "role": inviter_role.as_str() }),
        ));
    }

    if requested_role == Role::Owner {
        return Err(AppError::forbidden(
            "The owner role cannot be granted through invitations",
            json!({}),
        ));
    }

    if current_member_count >= owner_limits.team_members {
        return Err(AppError::limit_exceeded(
            format!(
                "Team member limit reached ({}). Please upgrade the team owner's plan.",
                owner_limits.team_members
            ),
            json!({ "limit": owner_limits.team_members, "plan": owner_limits.plan.as_str() }),
        ));
    }

    Ok(())
}

/// Validates a role change on an existing member.
pub fn validate_role_change(
    changer_role: Role,
    current_role: Role,
    new_role: Role,
) -> Result<(), AppError> {
    if current_role == Role::Owner || new_role == Role::Owner {
        return Err(AppError::forbidden(
            "The owner role cannot be reassigned",
            json!({}),
        ));
    }

    if !changer_role.can_change(current_role) {
        return Err(AppError::forbidden(
            "Only a higher role can change this member",
            json!({ "role": changer_role.as_str(), "target": current_role.as_str() }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Plan;
    use chrono::Duration;

    #[test]
    fn test_link_ceiling() {
        let limits = Plan::Free.limits();
        assert!(validate_link_ceiling(99, &limits).is_ok());
        assert!(matches!(
            validate_link_ceiling(100, &limits),
            Err(AppError::LimitExceeded { .. })
        ));
    }

    #[test]
    fn test_password_feature_gated_on_free() {
        assert!(matches!(
            validate_password_feature(&Plan::Free.limits()),
            Err(AppError::LimitExceeded { .. })
        ));
        assert!(validate_password_feature(&Plan::Starter.limits()).is_ok());
    }

    #[test]
    fn test_expiration_must_be_future() {
        let now = Utc::now();
        assert!(validate_expiration(Some(now + Duration::hours(1)), None, now).is_ok());
        assert!(validate_expiration(Some(now), None, now).is_err());
        assert!(validate_expiration(Some(now - Duration::hours(1)), None, now).is_err());
    }

    #[test]
    fn test_max_clicks_range() {
        let now = Utc::now();
        assert!(validate_expiration(None, Some(1), now).is_ok());
        assert!(validate_expiration(None, Some(10_000), now).is_ok());
        assert!(validate_expiration(None, Some(0), now).is_err());
        assert!(validate_expiration(None, Some(10_001), now).is_err());
        assert!(validate_expiration(None, Some(-5), now).is_err());
    }

    #[test]
    fn test_invite_requires_admin() {
        let limits = Plan::Professional.limits();
        assert!(validate_invite(Role::Member, Role::Member, 0, &limits).is_err());
        assert!(validate_invite(Role::Admin, Role::Member, 0, &limits).is_ok());
        assert!(validate_invite(Role::Owner, Role::Admin, 0, &limits).is_ok());
    }

    #[test]
    fn test_invite_never_grants_owner() {
        let limits = Plan::Professional.limits();
        assert!(matches!(
            validate_invite(Role::Owner, Role::Owner, 0, &limits),
            Err(AppError::Forbidden { .. })
        ));
    }

    #[test]
    fn test_member_ceiling_uses_owner_plan() {
        let limits = Plan::Free.limits(); // team_members = 2
        assert!(validate_invite(Role::Owner, Role::Member, 1, &limits).is_ok());
        assert!(matches!(
            validate_invite(Role::Owner, Role::Member, 2, &limits),
            Err(AppError::LimitExceeded { .. })
        ));
    }

    #[test]
    fn test_owner_role_is_immutable() {
        assert!(validate_role_change(Role::Owner, Role::Owner, Role::Admin).is_err());
        assert!(validate_role_change(Role::Owner, Role::Admin, Role::Owner).is_err());
        assert!(validate_role_change(Role::Owner, Role::Admin, Role::Member).is_ok());
        assert!(validate_role_change(Role::Admin, Role::Admin, Role::Member).is_err());
    }
}
