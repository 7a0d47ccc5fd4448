#![allow(dead_code)]

//! In-memory repository implementations for integration tests.
//!
//! Each repository guards its state with a single mutex, so the
//! operations the real database performs atomically (insert-if-absent,
//! conditional increment, compare-and-swap claim) are atomic here too.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::mpsc;

use link_registry::application::services::{
    CampaignService, DomainService, LinkService, ResolutionService, StatsService, TeamService,
    WorkspaceService,
};
use link_registry::domain::click_event::ClickEvent;
use link_registry::domain::entities::{
    Campaign, Click, Domain, Link, LinkPatch, Membership, NewCampaign, NewClick, NewDomain,
    NewLink, NewWorkspace, Plan, PlanLimits, Role, Team, TeamMember, Workspace,
};
use link_registry::domain::ports::{Mailer, MailerError, PlanProvider};
use link_registry::domain::repositories::{
    CampaignRepository, ClickRepository, DomainRepository, LinkRepository, TeamRepository,
    WorkspaceRepository,
};
use link_registry::error::AppError;
use link_registry::state::AppState;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const DEFAULT_HOSTNAME: &str = "go.example.com";
pub const BASE_URL: &str = "https://app.example.com";

// ── Links ───────────────────────────────────────────────────────────────

#[derive(Default)]
struct LinkStore {
    next_id: i64,
    rows: HashMap<i64, Link>,
}

#[derive(Default)]
pub struct InMemoryLinkRepository {
    inner: Mutex<LinkStore>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct row access for assertions.
    pub fn get(&self, id: i64) -> Option<Link> {
        self.inner.lock().unwrap().rows.get(&id).cloned()
    }

    /// Seeds a link row directly, bypassing the service layer.
    pub fn seed(&self, mut link: Link) -> Link {
        let mut store = self.inner.lock().unwrap();
        store.next_id += 1;
        link.id = store.next_id;
        store.rows.insert(link.id, link.clone());
        link
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut store = self.inner.lock().unwrap();

        // The partial unique index: live (domain_id, code) pairs only.
        let taken = store.rows.values().any(|l| {
            l.deleted_at.is_none() && l.domain_id == new_link.domain_id && l.code == new_link.code
        });
        if taken {
            return Err(AppError::code_taken(
                "Unique constraint violation",
                json!({ "code": new_link.code }),
            ));
        }

        store.next_id += 1;
        let now = Utc::now();
        let link = Link {
            id: store.next_id,
            code: new_link.code,
            domain_id: new_link.domain_id,
            destination: new_link.destination,
            owner_id: new_link.owner_id,
            workspace_id: new_link.workspace_id,
            campaign_id: new_link.campaign_id,
            tags: new_link.tags,
            notes: new_link.notes,
            password_hash: new_link.password_hash,
            active: true,
            expires_at: new_link.expires_at,
            max_clicks: new_link.max_clicks,
            clicks: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        store.rows.insert(link.id, link.clone());
        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let store = self.inner.lock().unwrap();
        Ok(store
            .rows
            .get(&id)
            .filter(|l| l.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_code(&self, domain_id: i64, code: &str) -> Result<Option<Link>, AppError> {
        let store = self.inner.lock().unwrap();
        Ok(store
            .rows
            .values()
            .find(|l| l.deleted_at.is_none() && l.domain_id == domain_id && l.code == code)
            .cloned())
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Link>, AppError> {
        let store = self.inner.lock().unwrap();
        let mut links: Vec<Link> = store
            .rows
            .values()
            .filter(|l| l.deleted_at.is_none() && l.owner_id.as_deref() == Some(owner_id))
            .cloned()
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(links)
    }

    async fn count_for_owner(&self, owner_id: &str) -> Result<i64, AppError> {
        let store = self.inner.lock().unwrap();
        Ok(store
            .rows
            .values()
            .filter(|l| l.deleted_at.is_none() && l.owner_id.as_deref() == Some(owner_id))
            .count() as i64)
    }

    async fn update(&self, id: i64, patch: LinkPatch) -> Result<Link, AppError> {
        let mut store = self.inner.lock().unwrap();
        let link = store
            .rows
            .get_mut(&id)
            .filter(|l| l.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))?;

        if let Some(destination) = patch.destination {
            link.destination = destination;
        }
        if let Some(active) = patch.active {
            link.active = active;
        }
        if let Some(tags) = patch.tags {
            link.tags = tags;
        }
        if let Some(notes) = patch.notes {
            link.notes = notes;
        }
        if let Some(password_hash) = patch.password_hash {
            link.password_hash = password_hash;
        }
        if let Some(expires_at) = patch.expires_at {
            link.expires_at = expires_at;
        }
        if let Some(max_clicks) = patch.max_clicks {
            link.max_clicks = max_clicks;
        }
        if let Some(campaign_id) = patch.campaign_id {
            link.campaign_id = campaign_id;
        }
        link.updated_at = Utc::now();

        Ok(link.clone())
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let mut store = self.inner.lock().unwrap();
        match store.rows.get_mut(&id) {
            Some(link) if link.deleted_at.is_none() => {
                link.deleted_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn increment_clicks(&self, id: i64) -> Result<Option<i64>, AppError> {
        let mut store = self.inner.lock().unwrap();
        let Some(link) = store.rows.get_mut(&id).filter(|l| l.deleted_at.is_none()) else {
            return Ok(None);
        };

        if link
            .max_clicks
            .is_some_and(|max| link.clicks >= i64::from(max))
        {
            return Ok(None);
        }

        link.clicks += 1;
        Ok(Some(link.clicks))
    }

    async fn delete_by_workspace(&self, workspace_id: i64) -> Result<u64, AppError> {
        let mut store = self.inner.lock().unwrap();
        let ids: Vec<i64> = store
            .rows
            .values()
            .filter(|l| l.workspace_id == Some(workspace_id))
            .map(|l| l.id)
            .collect();
        let removed = ids.len() as u64;
        for id in ids {
            store.rows.remove(&id);
        }
        Ok(removed)
    }

    async fn unlink_campaign(&self, campaign_id: i64) -> Result<u64, AppError> {
        let mut store = self.inner.lock().unwrap();
        let mut unlinked = 0;
        for link in store.rows.values_mut() {
            if link.campaign_id == Some(campaign_id) {
                link.campaign_id = None;
                unlinked += 1;
            }
        }
        Ok(unlinked)
    }
}

// ── Teams ───────────────────────────────────────────────────────────────

#[derive(Default)]
struct TeamStore {
    next_team_id: i64,
    next_member_id: i64,
    teams: HashMap<i64, Team>,
    members: HashMap<i64, TeamMember>,
}

#[derive(Default)]
pub struct InMemoryTeamRepository {
    inner: Mutex<TeamStore>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_member(&self, member_id: i64) -> Option<TeamMember> {
        self.inner.lock().unwrap().members.get(&member_id).cloned()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn create(&self, name: &str, owner_id: &str) -> Result<Team, AppError> {
        let mut store = self.inner.lock().unwrap();
        store.next_team_id += 1;
        let team = Team {
            id: store.next_team_id,
            name: name.to_string(),
            owner_id: owner_id.to_string(),
            created_at: Utc::now(),
        };
        store.teams.insert(team.id, team.clone());

        store.next_member_id += 1;
        let member = TeamMember {
            id: store.next_member_id,
            team_id: team.id,
            membership: Membership::Active {
                user_id: owner_id.to_string(),
            },
            role: Role::Owner,
            invited_by: None,
            invited_at: Utc::now(),
            joined_at: Some(Utc::now()),
        };
        store.members.insert(member.id, member);

        Ok(team)
    }

    async fn find_team(&self, id: i64) -> Result<Option<Team>, AppError> {
        Ok(self.inner.lock().unwrap().teams.get(&id).cloned())
    }

    async fn find_member(
        &self,
        team_id: i64,
        user_id: &str,
    ) -> Result<Option<TeamMember>, AppError> {
        let store = self.inner.lock().unwrap();
        Ok(store
            .members
            .values()
            .find(|m| m.team_id == team_id && m.membership.user_id() == Some(user_id))
            .cloned())
    }

    async fn find_member_by_id(
        &self,
        team_id: i64,
        member_id: i64,
    ) -> Result<Option<TeamMember>, AppError> {
        let store = self.inner.lock().unwrap();
        Ok(store
            .members
            .get(&member_id)
            .filter(|m| m.team_id == team_id)
            .cloned())
    }

    async fn find_invited(
        &self,
        team_id: i64,
        email: &str,
    ) -> Result<Option<TeamMember>, AppError> {
        let store = self.inner.lock().unwrap();
        Ok(store
            .members
            .values()
            .find(|m| m.team_id == team_id && m.membership.invited_email() == Some(email))
            .cloned())
    }

    async fn count_members(&self, team_id: i64) -> Result<i64, AppError> {
        let store = self.inner.lock().unwrap();
        Ok(store
            .members
            .values()
            .filter(|m| m.team_id == team_id)
            .count() as i64)
    }

    async fn list_members(&self, team_id: i64) -> Result<Vec<TeamMember>, AppError> {
        let store = self.inner.lock().unwrap();
        let mut members: Vec<TeamMember> = store
            .members
            .values()
            .filter(|m| m.team_id == team_id)
            .cloned()
            .collect();
        members.sort_by_key(|m| m.id);
        Ok(members)
    }

    async fn invite(
        &self,
        team_id: i64,
        email: &str,
        role: Role,
        invited_by: &str,
    ) -> Result<TeamMember, AppError> {
        let mut store = self.inner.lock().unwrap();

        let duplicate = store
            .members
            .values()
            .any(|m| m.team_id == team_id && m.membership.invited_email() == Some(email));
        if duplicate {
            return Err(AppError::conflict(
                "This e-mail is already invited",
                json!({ "email": email }),
            ));
        }

        store.next_member_id += 1;
        let member = TeamMember {
            id: store.next_member_id,
            team_id,
            membership: Membership::Invited {
                invited_email: email.to_string(),
            },
            role,
            invited_by: Some(invited_by.to_string()),
            invited_at: Utc::now(),
            joined_at: None,
        };
        store.members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn claim_invitation(&self, member_id: i64, user_id: &str) -> Result<bool, AppError> {
        let mut store = self.inner.lock().unwrap();
        let Some(member) = store.members.get_mut(&member_id) else {
            return Ok(false);
        };

        // Compare-and-swap: only an invited row transitions.
        if member.membership.is_active() {
            return Ok(false);
        }

        member.membership = Membership::Active {
            user_id: user_id.to_string(),
        };
        member.joined_at = Some(Utc::now());
        Ok(true)
    }

    async fn list_invited_by_email(&self, email: &str) -> Result<Vec<TeamMember>, AppError> {
        let store = self.inner.lock().unwrap();
        Ok(store
            .members
            .values()
            .filter(|m| m.membership.invited_email() == Some(email))
            .cloned()
            .collect())
    }

    async fn update_role(&self, member_id: i64, role: Role) -> Result<TeamMember, AppError> {
        let mut store = self.inner.lock().unwrap();
        let member = store.members.get_mut(&member_id).ok_or_else(|| {
            AppError::not_found("Member not found", json!({ "member_id": member_id }))
        })?;
        member.role = role;
        Ok(member.clone())
    }

    async fn remove_member(&self, member_id: i64) -> Result<bool, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .members
            .remove(&member_id)
            .is_some())
    }
}

// ── Workspaces ──────────────────────────────────────────────────────────

#[derive(Default)]
struct WorkspaceStore {
    next_id: i64,
    rows: HashMap<i64, Workspace>,
}

#[derive(Default)]
pub struct InMemoryWorkspaceRepository {
    inner: Mutex<WorkspaceStore>,
}

impl InMemoryWorkspaceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkspaceRepository for InMemoryWorkspaceRepository {
    async fn create(&self, new_workspace: NewWorkspace) -> Result<Workspace, AppError> {
        let mut store = self.inner.lock().unwrap();
        store.next_id += 1;
        let workspace = Workspace {
            id: store.next_id,
            team_id: new_workspace.team_id,
            name: new_workspace.name,
            created_at: Utc::now(),
        };
        store.rows.insert(workspace.id, workspace.clone());
        Ok(workspace)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Workspace>, AppError> {
        Ok(self.inner.lock().unwrap().rows.get(&id).cloned())
    }

    async fn list_for_team(&self, team_id: i64) -> Result<Vec<Workspace>, AppError> {
        let store = self.inner.lock().unwrap();
        let mut rows: Vec<Workspace> = store
            .rows
            .values()
            .filter(|w| w.team_id == team_id)
            .cloned()
            .collect();
        rows.sort_by_key(|w| w.id);
        Ok(rows)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.inner.lock().unwrap().rows.remove(&id).is_some())
    }
}

// ── Campaigns ───────────────────────────────────────────────────────────

#[derive(Default)]
struct CampaignStore {
    next_id: i64,
    rows: HashMap<i64, Campaign>,
}

#[derive(Default)]
pub struct InMemoryCampaignRepository {
    inner: Mutex<CampaignStore>,
}

impl InMemoryCampaignRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CampaignRepository for InMemoryCampaignRepository {
    async fn create(&self, new_campaign: NewCampaign) -> Result<Campaign, AppError> {
        let mut store = self.inner.lock().unwrap();
        store.next_id += 1;
        let campaign = Campaign {
            id: store.next_id,
            owner_id: new_campaign.owner_id,
            team_id: new_campaign.team_id,
            name: new_campaign.name,
            created_at: Utc::now(),
        };
        store.rows.insert(campaign.id, campaign.clone());
        Ok(campaign)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Campaign>, AppError> {
        Ok(self.inner.lock().unwrap().rows.get(&id).cloned())
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Campaign>, AppError> {
        let store = self.inner.lock().unwrap();
        let mut rows: Vec<Campaign> = store
            .rows
            .values()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.id);
        Ok(rows)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.inner.lock().unwrap().rows.remove(&id).is_some())
    }
}

// ── Domains ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct DomainStore {
    next_id: i64,
    rows: HashMap<i64, Domain>,
}

pub struct InMemoryDomainRepository {
    inner: Mutex<DomainStore>,
}

impl InMemoryDomainRepository {
    /// Creates the repository with the platform default domain seeded and
    /// verified, as the initial migration does.
    pub fn new() -> Self {
        let repo = Self {
            inner: Mutex::new(DomainStore::default()),
        };
        {
            let mut store = repo.inner.lock().unwrap();
            store.next_id += 1;
            let next_id = store.next_id;
            store.rows.insert(
                next_id,
                Domain {
                    id: next_id,
                    hostname: DEFAULT_HOSTNAME.to_string(),
                    owner_id: None,
                    team_id: None,
                    is_default: true,
                    verified: true,
                    verified_at: Some(Utc::now()),
                    created_at: Utc::now(),
                },
            );
        }
        repo
    }

    /// Flips verification state, standing in for the external DNS checker.
    pub fn set_verified(&self, id: i64, verified: bool) {
        let mut store = self.inner.lock().unwrap();
        if let Some(domain) = store.rows.get_mut(&id) {
            domain.verified = verified;
            domain.verified_at = verified.then(Utc::now);
        }
    }
}

impl Default for InMemoryDomainRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainRepository for InMemoryDomainRepository {
    async fn create(&self, new_domain: NewDomain) -> Result<Domain, AppError> {
        let mut store = self.inner.lock().unwrap();

        if store.rows.values().any(|d| d.hostname == new_domain.hostname) {
            return Err(AppError::conflict(
                "This hostname is already registered",
                json!({ "hostname": new_domain.hostname }),
            ));
        }

        store.next_id += 1;
        let domain = Domain {
            id: store.next_id,
            hostname: new_domain.hostname,
            owner_id: Some(new_domain.owner_id),
            team_id: new_domain.team_id,
            is_default: false,
            verified: false,
            verified_at: None,
            created_at: Utc::now(),
        };
        store.rows.insert(domain.id, domain.clone());
        Ok(domain)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Domain>, AppError> {
        Ok(self.inner.lock().unwrap().rows.get(&id).cloned())
    }

    async fn find_by_hostname(&self, hostname: &str) -> Result<Option<Domain>, AppError> {
        let store = self.inner.lock().unwrap();
        Ok(store
            .rows
            .values()
            .find(|d| d.hostname == hostname)
            .cloned())
    }

    async fn get_default(&self) -> Result<Domain, AppError> {
        let store = self.inner.lock().unwrap();
        store
            .rows
            .values()
            .find(|d| d.is_default)
            .cloned()
            .ok_or_else(|| AppError::internal("No default domain configured", json!({})))
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Domain>, AppError> {
        let store = self.inner.lock().unwrap();
        let mut rows: Vec<Domain> = store
            .rows
            .values()
            .filter(|d| d.owner_id.as_deref() == Some(owner_id))
            .cloned()
            .collect();
        rows.sort_by_key(|d| d.id);
        Ok(rows)
    }

    async fn count_for_owner(&self, owner_id: &str) -> Result<i64, AppError> {
        let store = self.inner.lock().unwrap();
        Ok(store
            .rows
            .values()
            .filter(|d| d.owner_id.as_deref() == Some(owner_id))
            .count() as i64)
    }
}

// ── Clicks ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryClickRepository {
    rows: Mutex<Vec<Click>>,
}

impl InMemoryClickRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl ClickRepository for InMemoryClickRepository {
    async fn insert(&self, new_click: NewClick) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        rows.push(Click {
            id,
            link_id: new_click.link_id,
            clicked_at: Utc::now(),
            referrer: new_click.referrer,
            device: new_click.device,
            country: new_click.country,
            city: new_click.city,
        });
        Ok(())
    }

    async fn count_for_link(&self, link_id: i64) -> Result<i64, AppError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|c| c.link_id == link_id).count() as i64)
    }

    async fn recent_for_link(&self, link_id: i64, limit: i64) -> Result<Vec<Click>, AppError> {
        let rows = self.rows.lock().unwrap();
        let mut clicks: Vec<Click> = rows
            .iter()
            .filter(|c| c.link_id == link_id)
            .cloned()
            .collect();
        clicks.sort_by(|a, b| b.clicked_at.cmp(&a.clicked_at));
        clicks.truncate(limit as usize);
        Ok(clicks)
    }
}

// ── Ports ───────────────────────────────────────────────────────────────

/// Plan provider with per-owner overrides over a free-tier default.
pub struct StaticPlanProvider {
    plans: Mutex<HashMap<String, Plan>>,
}

impl StaticPlanProvider {
    pub fn new() -> Self {
        Self {
            plans: Mutex::new(HashMap::new()),
        }
    }

    pub fn set_plan(&self, owner_id: &str, plan: Plan) {
        self.plans
            .lock()
            .unwrap()
            .insert(owner_id.to_string(), plan);
    }
}

impl Default for StaticPlanProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlanProvider for StaticPlanProvider {
    async fn get_plan_limits(&self, owner_id: &str) -> Result<PlanLimits, AppError> {
        let plans = self.plans.lock().unwrap();
        Ok(plans.get(owner_id).copied().unwrap_or(Plan::Free).limits())
    }
}

/// Mailer that records messages; optionally failing to exercise the
/// invite-link fallback.
pub struct RecordingMailer {
    pub fail: bool,
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    pub fn working() -> Self {
        Self {
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, _html: &str) -> Result<(), MailerError> {
        if self.fail {
            return Err(MailerError::Unconfigured);
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string()));
        Ok(())
    }
}

// ── Wiring ──────────────────────────────────────────────────────────────

/// Fully wired services over in-memory repositories, with handles to the
/// repositories themselves for direct inspection.
pub struct TestEnv {
    pub links_repo: Arc<InMemoryLinkRepository>,
    pub domains_repo: Arc<InMemoryDomainRepository>,
    pub teams_repo: Arc<InMemoryTeamRepository>,
    pub workspaces_repo: Arc<InMemoryWorkspaceRepository>,
    pub campaigns_repo: Arc<InMemoryCampaignRepository>,
    pub clicks_repo: Arc<InMemoryClickRepository>,
    pub plans: Arc<StaticPlanProvider>,
    pub mailer: Arc<RecordingMailer>,

    pub links: Arc<LinkService>,
    pub resolution: Arc<ResolutionService>,
    pub teams: Arc<TeamService>,
    pub workspaces: Arc<WorkspaceService>,
    pub campaigns: Arc<CampaignService>,
    pub domains: Arc<DomainService>,
    pub stats: Arc<StatsService>,

    pub click_tx: mpsc::Sender<ClickEvent>,
    pub click_rx: mpsc::Receiver<ClickEvent>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_mailer(RecordingMailer::working())
    }

    pub fn with_mailer(mailer: RecordingMailer) -> Self {
        let links_repo = Arc::new(InMemoryLinkRepository::new());
        let domains_repo = Arc::new(InMemoryDomainRepository::new());
        let teams_repo = Arc::new(InMemoryTeamRepository::new());
        let workspaces_repo = Arc::new(InMemoryWorkspaceRepository::new());
        let campaigns_repo = Arc::new(InMemoryCampaignRepository::new());
        let clicks_repo = Arc::new(InMemoryClickRepository::new());
        let plans = Arc::new(StaticPlanProvider::new());
        let mailer = Arc::new(mailer);

        let (click_tx, click_rx) = mpsc::channel(1024);

        let links = Arc::new(LinkService::new(
            links_repo.clone(),
            domains_repo.clone(),
            teams_repo.clone(),
            workspaces_repo.clone(),
            plans.clone(),
            SIGNING_SECRET.to_string(),
        ));

        Self {
            resolution: Arc::new(ResolutionService::new(
                domains_repo.clone(),
                links_repo.clone(),
                click_tx.clone(),
                SIGNING_SECRET.to_string(),
            )),
            teams: Arc::new(TeamService::new(
                teams_repo.clone(),
                plans.clone(),
                mailer.clone(),
                BASE_URL.to_string(),
            )),
            workspaces: Arc::new(WorkspaceService::new(
                workspaces_repo.clone(),
                teams_repo.clone(),
                links_repo.clone(),
            )),
            campaigns: Arc::new(CampaignService::new(
                campaigns_repo.clone(),
                links_repo.clone(),
            )),
            domains: Arc::new(DomainService::new(domains_repo.clone(), plans.clone())),
            stats: Arc::new(StatsService::new(links.clone(), clicks_repo.clone())),
            links,
            links_repo,
            domains_repo,
            teams_repo,
            workspaces_repo,
            campaigns_repo,
            clicks_repo,
            plans,
            mailer,
            click_tx,
            click_rx,
        }
    }

    /// Application state for handler-level tests.
    pub fn app_state(&self) -> AppState {
        AppState {
            links: self.links.clone(),
            resolution: self.resolution.clone(),
            teams: self.teams.clone(),
            workspaces: self.workspaces.clone(),
            campaigns: self.campaigns.clone(),
            domains: self.domains.clone(),
            stats: self.stats.clone(),
            click_tx: self.click_tx.clone(),
        }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
