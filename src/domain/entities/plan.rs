//! Subscription plan catalog and the numeric ceilings it gates.

use chrono::{DateTime, Utc};

/// Plan tiers, from free to paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Free,
    Starter,
    Professional,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Starter => "starter",
            Plan::Professional => "professional",
        }
    }

    pub fn parse(s: &str) -> Option<Plan> {
        match s {
            "free" => Some(Plan::Free),
            "starter" => Some(Plan::Starter),
            "professional" => Some(Plan::Professional),
            _ => None,
        }
    }

    /// Numeric ceilings and feature flags for the tier.
    pub fn limits(&self) -> PlanLimits {
        match self {
            Plan::Free => PlanLimits {
                plan: *self,
                short_links: 100,
                custom_domains: 0,
                team_members: 2,
                password_protection: false,
            },
            Plan::Starter => PlanLimits {
                plan: *self,
                short_links: 2_000,
                custom_domains: 2,
                team_members: 3,
                password_protection: true,
            },
            Plan::Professional => PlanLimits {
                plan: *self,
                short_links: 5_000,
                custom_domains: 10,
                team_members: 10,
                password_protection: true,
            },
        }
    }
}

/// Ceilings consulted by the lifecycle guard before mutations.
#[derive(Debug, Clone, Copy)]
pub struct PlanLimits {
    pub plan: Plan,
    pub short_links: i64,
    pub custom_domains: i64,
    pub team_members: i64,
    pub password_protection: bool,
}

/// An owner's subscription row.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub id: i64,
    pub owner_id: String,
    pub plan: Plan,
    pub active: bool,
    pub current_period_end: Option<DateTime<Utc>>,
}

impl Subscription {
    /// A subscription counts only while active and within its paid period.
    pub fn is_current_at(&self, now: DateTime<Utc>) -> bool {
        self.active && self.current_period_end.is_none_or(|end| end > now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_free_plan_has_no_password_protection() {
        assert!(!Plan::Free.limits().password_protection);
        assert!(Plan::Starter.limits().password_protection);
    }

    #[test]
    fn test_limits_grow_with_tier() {
        assert!(Plan::Starter.limits().short_links > Plan::Free.limits().short_links);
        assert!(Plan::Professional.limits().team_members > Plan::Starter.limits().team_members);
    }

    #[test]
    fn test_lapsed_subscription_is_not_current() {
        let sub = Subscription {
            id: 1,
            owner_id: "user_1".to_string(),
            plan: Plan::Starter,
            active: true,
            current_period_end: Some(Utc::now() - Duration::days(1)),
        };
        assert!(!sub.is_current_at(Utc::now()));
    }

    #[test]
    fn test_plan_round_trip() {
        for plan in [Plan::Free, Plan::Starter, Plan::Professional] {
            assert_eq!(Plan::parse(plan.as_str()), Some(plan));
        }
    }
}
