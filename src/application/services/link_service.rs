//! Link creation, mutation and deletion.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::domain::entities::{Link, LinkPatch, NewLink, Role};
use crate::domain::lifecycle;
use crate::domain::ports::PlanProvider;
use crate::domain::repositories::{
    DomainRepository, LinkRepository, TeamRepository, WorkspaceRepository,
};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::password::hash_password;
use crate::utils::url_normalizer::normalize_destination;

/// Lifetime of anonymous guest links.
const GUEST_LINK_TTL_HOURS: i64 = 24;

/// Collision retries before giving up on code allocation.
const MAX_ALLOCATION_ATTEMPTS: usize = 10;

/// Input for creating a link.
#[derive(Debug, Clone, Default)]
pub struct CreateLinkInput {
    pub destination: String,
    /// Serving hostname; the platform default when absent.
    pub hostname: Option<String>,
    pub custom_code: Option<String>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub workspace_id: Option<i64>,
    pub campaign_id: Option<i64>,
    pub password: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_clicks: Option<i32>,
}

/// Input for patching a link. Outer `None` leaves the field unchanged;
/// inner `None` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateLinkInput {
    pub destination: Option<String>,
    pub active: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<Option<String>>,
    pub password: Option<Option<String>>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
    pub max_clicks: Option<Option<i32>>,
    pub campaign_id: Option<Option<i64>>,
}

/// Service for managing link records.
///
/// Owns the code allocator (validation, random generation, bounded
/// collision retry) and applies the lifecycle guard before every write.
/// The repository's uniqueness constraint remains the source of truth for
/// `(domain, code)`; the allocator's existence checks are advisory.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    domains: Arc<dyn DomainRepository>,
    teams: Arc<dyn TeamRepository>,
    workspaces: Arc<dyn WorkspaceRepository>,
    plans: Arc<dyn PlanProvider>,
    signing_secret: String,
}

impl LinkService {
    pub fn new(
        links: Arc<dyn LinkRepository>,
        domains: Arc<dyn DomainRepository>,
        teams: Arc<dyn TeamRepository>,
        workspaces: Arc<dyn WorkspaceRepository>,
        plans: Arc<dyn PlanProvider>,
        signing_secret: String,
    ) -> Self {
        Self {
            links,
            domains,
            teams,
            workspaces,
            plans,
            signing_secret,
        }
    }

    /// Creates a link for an authenticated owner.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] — bad destination, bad custom code,
    ///   out-of-range expiry settings
    /// - [`AppError::CodeTaken`] — requested code already in use
    /// - [`AppError::LimitExceeded`] — plan link ceiling reached, or
    ///   password protection not included in the plan
    pub async fn create_link(
        &self,
        owner_id: &str,
        input: CreateLinkInput,
    ) -> Result<Link, AppError> {
        let limits = self.plans.get_plan_limits(owner_id).await?;

        let current = self.links.count_for_owner(owner_id).await?;
        lifecycle::validate_link_ceiling(current, &limits)?;

        if input.password.is_some() {
            lifecycle::validate_password_feature(&limits)?;
        }

        if let Some(workspace_id) = input.workspace_id {
            self.require_workspace_access(workspace_id, owner_id, Role::Member)
                .await?;
        }

        self.create_inner(Some(owner_id.to_string()), input).await
    }

    /// Creates an anonymous guest link with a forced 24h expiry.
    ///
    /// Guest links cannot carry a password, workspace or campaign; they
    /// exist so visitors can try the service before signing up.
    pub async fn create_guest_link(&self, input: CreateLinkInput) -> Result<Link, AppError> {
        if input.password.is_some() || input.workspace_id.is_some() || input.campaign_id.is_some() {
            return Err(AppError::bad_request(
                "Guest links cannot use passwords, workspaces or campaigns",
                json!({}),
            ));
        }

        let mut input = input;
        input.expires_at = Some(Utc::now() + Duration::hours(GUEST_LINK_TTL_HOURS));
        input.max_clicks = None;

        self.create_inner(None, input).await
    }

    async fn create_inner(
        &self,
        owner_id: Option<String>,
        input: CreateLinkInput,
    ) -> Result<Link, AppError> {
        let destination = normalize_destination(&input.destination).map_err(|e| {
            AppError::bad_request("Invalid destination URL", json!({ "reason": e.to_string() }))
        })?;

        lifecycle::validate_expiration(input.expires_at, input.max_clicks, Utc::now())?;

        let domain = match &input.hostname {
            Some(hostname) => {
                let domain = self
                    .domains
                    .find_by_hostname(hostname)
                    .await?
                    .ok_or_else(|| {
                        AppError::not_found("Unknown domain", json!({ "hostname": hostname }))
                    })?;
                if !domain.is_usable() {
                    return Err(AppError::bad_request(
                        "Domain is not verified yet",
                        json!({ "hostname": hostname }),
                    ));
                }
                domain
            }
            None => self.domains.get_default().await?,
        };

        let code = self.allocate(domain.id, input.custom_code).await?;

        let password_hash = input
            .password
            .as_deref()
            .map(|pw| hash_password(&self.signing_secret, pw));

        let link = self
            .links
            .create(NewLink {
                code,
                domain_id: domain.id,
                destination,
                owner_id,
                workspace_id: input.workspace_id,
                campaign_id: input.campaign_id,
                tags: input.tags,
                notes: input.notes,
                password_hash,
                expires_at: input.expires_at,
                max_clicks: input.max_clicks,
            })
            .await?;

        metrics::counter!("links_created_total").increment(1);
        tracing::info!(link_id = link.id, code = %link.code, "link created");

        Ok(link)
    }

    /// Allocates a short code within a domain.
    ///
    /// Custom codes are validated and pre-checked; generated codes retry
    /// on collision a bounded number of times. Both pre-checks are
    /// advisory — the insert's constraint decides the race.
    async fn allocate(
        &self,
        domain_id: i64,
        requested_code: Option<String>,
    ) -> Result<String, AppError> {
        if let Some(custom) = requested_code {
            validate_custom_code(&custom)?;

            if self.links.find_by_code(domain_id, &custom).await?.is_some() {
                return Err(AppError::code_taken(
                    "This code is already taken",
                    json!({ "code": custom }),
                ));
            }

            return Ok(custom);
        }

        for _ in 0..MAX_ALLOCATION_ATTEMPTS {
            let code = generate_code();
            if self.links.find_by_code(domain_id, &code).await?.is_none() {
                return Ok(code);
            }
        }

        Err(AppError::internal(
            "Failed to allocate a unique code",
            json!({ "reason": "too many collisions" }),
        ))
    }

    /// Fetches a link the requester is allowed to see.
    ///
    /// Permission failures surface as `NotFound` so strangers cannot
    /// distinguish "absent" from "not yours".
    pub async fn get_link(&self, id: i64, requester_id: &str) -> Result<Link, AppError> {
        let link = self.find_managed(id, requester_id).await?;
        Ok(link)
    }

    /// Lists an owner's live links, newest first.
    pub async fn list_links(&self, owner_id: &str) -> Result<Vec<Link>, AppError> {
        self.links.list_for_owner(owner_id).await
    }

    /// Applies a partial update.
    ///
    /// The short code is immutable; there is deliberately no way to patch
    /// it. Expiry settings are validated at patch time.
    pub async fn update_link(
        &self,
        id: i64,
        requester_id: &str,
        input: UpdateLinkInput,
    ) -> Result<Link, AppError> {
        let link = self.find_managed(id, requester_id).await?;

        let destination = match input.destination {
            Some(d) => Some(normalize_destination(&d).map_err(|e| {
                AppError::bad_request("Invalid destination URL", json!({ "reason": e.to_string() }))
            })?),
            None => None,
        };

        lifecycle::validate_expiration(
            input.expires_at.flatten(),
            input.max_clicks.flatten(),
            Utc::now(),
        )?;

        if matches!(input.password, Some(Some(_))) {
            if let Some(owner) = &link.owner_id {
                let limits = self.plans.get_plan_limits(owner).await?;
                lifecycle::validate_password_feature(&limits)?;
            }
        }

        let patch = LinkPatch {
            destination,
            active: input.active,
            tags: input.tags,
            notes: input.notes,
            password_hash: input
                .password
                .map(|pw| pw.map(|pw| hash_password(&self.signing_secret, &pw))),
            expires_at: input.expires_at,
            max_clicks: input.max_clicks,
            campaign_id: input.campaign_id,
        };

        if patch.is_empty() {
            return Ok(link);
        }

        self.links.update(id, patch).await
    }

    /// Deletes a link. Idempotent: deleting an absent or already-deleted
    /// link succeeds silently.
    pub async fn delete_link(&self, id: i64, requester_id: &str) -> Result<(), AppError> {
        let link = match self.links.find_by_id(id).await? {
            Some(link) => link,
            None => return Ok(()),
        };

        self.require_manage_permission(&link, requester_id).await?;

        let _ = self.links.soft_delete(id).await?;
        tracing::info!(link_id = id, "link deleted");
        Ok(())
    }

    /// Checks whether a code could be allocated right now.
    ///
    /// Advisory only — a concurrent create can still win between this
    /// check and a later insert.
    pub async fn check_availability(
        &self,
        hostname: Option<&str>,
        code: &str,
    ) -> Result<bool, AppError> {
        validate_custom_code(code)?;

        let domain = match hostname {
            Some(hostname) => self
                .domains
                .find_by_hostname(hostname)
                .await?
                .ok_or_else(|| {
                    AppError::not_found("Unknown domain", json!({ "hostname": hostname }))
                })?,
            None => self.domains.get_default().await?,
        };

        Ok(self.links.find_by_code(domain.id, code).await?.is_none())
    }

    async fn find_managed(&self, id: i64, requester_id: &str) -> Result<Link, AppError> {
        let link = self
            .links
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))?;

        self.require_manage_permission(&link, requester_id).await?;
        Ok(link)
    }

    /// Owner, or admin/owner of the workspace's team for workspace-scoped
    /// links. Reported as `NotFound` to requesters with no relationship.
    async fn require_manage_permission(
        &self,
        link: &Link,
        requester_id: &str,
    ) -> Result<(), AppError> {
        if link.owner_id.as_deref() == Some(requester_id) {
            return Ok(());
        }

        if let Some(workspace_id) = link.workspace_id {
            if self
                .require_workspace_access(workspace_id, requester_id, Role::Admin)
                .await
                .is_ok()
            {
                return Ok(());
            }
        }

        Err(AppError::not_found(
            "Link not found",
            json!({ "id": link.id }),
        ))
    }

    async fn require_workspace_access(
        &self,
        workspace_id: i64,
        user_id: &str,
        min_role: Role,
    ) -> Result<(), AppError> {
        let workspace = self
            .workspaces
            .find_by_id(workspace_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Workspace not found", json!({ "id": workspace_id }))
            })?;

        let team = self
            .teams
            .find_team(workspace.team_id)
            .await?
            .ok_or_else(|| AppError::internal("Workspace without team", json!({})))?;

        if team.owner_id == user_id {
            return Ok(());
        }

        let member = self.teams.find_member(team.id, user_id).await?;
        match member {
            Some(member) if member.membership.is_active() && member.role >= min_role => Ok(()),
            _ => Err(AppError::forbidden(
                "Insufficient role in this workspace",
                json!({ "workspace_id": workspace_id }),
            )),
        }
    }
}
