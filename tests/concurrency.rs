mod common;

use common::{DEFAULT_HOSTNAME, TestEnv};
use link_registry::application::services::{CreateLinkInput, Resolution, UpdateLinkInput, VisitorMeta};
use link_registry::domain::entities::{Plan, Role};
use link_registry::error::AppError;

#[tokio::test]
async fn test_concurrent_creates_allocate_exactly_one() {
    let env = TestEnv::new();

    let mut handles = Vec::new();
    for i in 0..16 {
        let links = env.links.clone();
        handles.push(tokio::spawn(async move {
            links
                .create_link(
                    &format!("user_{i}"),
                    CreateLinkInput {
                        destination: format!("https://example.com/{i}"),
                        custom_code: Some("promo".to_string()),
                        ..Default::default()
                    },
                )
                .await
        }));
    }

    let mut created = 0;
    let mut taken = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(link) => {
                created += 1;
                assert_eq!(link.code, "promo");
            }
            Err(AppError::CodeTaken { .. }) => taken += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(taken, 15);
}

#[tokio::test]
async fn test_concurrent_claims_transition_exactly_once() {
    let env = TestEnv::new();
    env.plans.set_plan("user_owner", Plan::Professional);

    let team = env.teams.create_team("user_owner", "Acme").await.unwrap();
    let outcome = env
        .teams
        .invite_member(team.id, "user_owner", "new@example.com", Role::Member)
        .await
        .unwrap();
    let member_id = outcome.member.id;

    let mut handles = Vec::new();
    for i in 0..8 {
        let teams = env.teams.clone();
        handles.push(tokio::spawn(async move {
            teams
                .claim_invitations(&format!("claimer_{i}"), "new@example.com")
                .await
        }));
    }

    let mut total_claimed = 0;
    for handle in handles {
        total_claimed += handle.await.unwrap().unwrap();
    }

    // Exactly one claimer won; everyone else observed the row already
    // active and changed nothing.
    assert_eq!(total_claimed, 1);
    assert!(env.teams_repo.get_member(member_id).unwrap().membership.is_active());
}

#[tokio::test]
async fn test_concurrent_resolves_never_exceed_click_cap() {
    let env = TestEnv::new();

    let link = env
        .links
        .create_link(
            "user_1",
            CreateLinkInput {
                destination: "https://example.com".to_string(),
                custom_code: Some("limited".to_string()),
                max_clicks: Some(5),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..20 {
        let resolution = env.resolution.clone();
        handles.push(tokio::spawn(async move {
            resolution
                .resolve(DEFAULT_HOSTNAME, "limited", None, VisitorMeta::default())
                .await
        }));
    }

    let mut redirects = 0;
    let mut expired = 0;
    for handle in handles {
        match handle.await.unwrap().unwrap() {
            Resolution::Redirect { .. } => redirects += 1,
            Resolution::Expired => expired += 1,
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    assert_eq!(redirects, 5);
    assert_eq!(expired, 15);
    assert_eq!(env.links_repo.get(link.id).unwrap().clicks, 5);
}

#[tokio::test]
async fn test_edits_never_clobber_click_increments() {
    let env = TestEnv::new();

    let link = env
        .links
        .create_link(
            "user_1",
            CreateLinkInput {
                destination: "https://example.com".to_string(),
                custom_code: Some("busy".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Interleave resolves with metadata edits of the same row.
    let mut handles = Vec::new();
    for i in 0..10 {
        let resolution = env.resolution.clone();
        handles.push(tokio::spawn(async move {
            resolution
                .resolve(DEFAULT_HOSTNAME, "busy", None, VisitorMeta::default())
                .await
                .unwrap()
        }));

        let links = env.links.clone();
        let link_id = link.id;
        tokio::spawn(async move {
            let _ = links
                .update_link(
                    link_id,
                    "user_1",
                    UpdateLinkInput {
                        notes: Some(Some(format!("edit {i}"))),
                        ..Default::default()
                    },
                )
                .await;
        });
    }

    let mut redirects = 0;
    for handle in handles {
        if matches!(handle.await.unwrap(), Resolution::Redirect { .. }) {
            redirects += 1;
        }
    }

    // Every successful redirect landed on the counter; edits to other
    // columns lost none of the increments.
    assert_eq!(env.links_repo.get(link.id).unwrap().clicks, redirects);
    assert_eq!(redirects, 10);
}
