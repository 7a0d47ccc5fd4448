//! HTTP server initialization and runtime setup.
//!
//! Connects the database, applies migrations, wires repositories into
//! services, spawns the click worker and runs the Axum server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::mpsc;

use crate::application::services::{
    CampaignService, DomainService, LinkService, ResolutionService, StatsService, TeamService,
    WorkspaceService,
};
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::infrastructure::billing::PgPlanProvider;
use crate::infrastructure::email::LogMailer;
use crate::infrastructure::persistence::{
    PgCampaignRepository, PgClickRepository, PgDomainRepository, PgLinkRepository,
    PgTeamRepository, PgWorkspaceRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations applied");

    let pool = Arc::new(pool);

    let link_repo = Arc::new(PgLinkRepository::new(pool.clone()));
    let domain_repo = Arc::new(PgDomainRepository::new(pool.clone()));
    let team_repo = Arc::new(PgTeamRepository::new(pool.clone()));
    let workspace_repo = Arc::new(PgWorkspaceRepository::new(pool.clone()));
    let campaign_repo = Arc::new(PgCampaignRepository::new(pool.clone()));
    let click_repo = Arc::new(PgClickRepository::new(pool.clone()));
    let plan_provider = Arc::new(PgPlanProvider::new(pool.clone()));
    let mailer = Arc::new(LogMailer::new());

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    tokio::spawn(run_click_worker(click_rx, click_repo.clone()));
    tracing::info!("Click worker started");

    let links = Arc::new(LinkService::new(
        link_repo.clone(),
        domain_repo.clone(),
        team_repo.clone(),
        workspace_repo.clone(),
        plan_provider.clone(),
        config.signing_secret.clone(),
    ));

    let state = AppState {
        resolution: Arc::new(ResolutionService::new(
            domain_repo.clone(),
            link_repo.clone(),
            click_tx.clone(),
            config.signing_secret.clone(),
        )),
        teams: Arc::new(TeamService::new(
            team_repo.clone(),
            plan_provider.clone(),
            mailer,
            config.base_url.clone(),
        )),
        workspaces: Arc::new(WorkspaceService::new(
            workspace_repo,
            team_repo,
            link_repo.clone(),
        )),
        campaigns: Arc::new(CampaignService::new(campaign_repo, link_repo)),
        domains: Arc::new(DomainService::new(domain_repo, plan_provider)),
        stats: Arc::new(StatsService::new(links.clone(), click_repo)),
        links,
        click_tx,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
