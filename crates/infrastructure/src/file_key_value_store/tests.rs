use std::sync::Arc;

use auditdesk_application::{
    CollectionKey, CreateModuleInput, CreateWebsiteInput, DomainStore, LoginOutcome,
    ModuleAuditSubmission,
};
use auditdesk_domain::AuditStatus;

use super::*;
use crate::{Argon2PasswordHasher, SystemClock};

fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn open_creates_missing_directory() -> AppResult<()> {
    let dir = temp_dir();
    let root = dir.path().join("nested").join(".auditdesk");

    let store = FileKeyValueStore::open(&root).await?;

    assert!(root.is_dir());
    assert_eq!(store.root(), root.as_path());
    Ok(())
}

#[tokio::test]
async fn values_live_in_one_file_per_key() -> AppResult<()> {
    let dir = temp_dir();
    let store = FileKeyValueStore::open(dir.path()).await?;

    assert_eq!(store.get("audit_websites").await?, None);
    store.set("audit_websites", "[]".to_owned()).await?;

    assert_eq!(store.get("audit_websites").await?.as_deref(), Some("[]"));
    let on_disk = tokio::fs::read_to_string(dir.path().join("audit_websites.json")).await;
    assert_eq!(on_disk.ok().as_deref(), Some("[]"));
    assert!(!dir.path().join("audit_websites.json.tmp").exists());
    Ok(())
}

#[tokio::test]
async fn remove_is_idempotent() -> AppResult<()> {
    let dir = temp_dir();
    let store = FileKeyValueStore::open(dir.path()).await?;
    store.set("audit_current_user", "{}".to_owned()).await?;

    store.remove("audit_current_user").await?;
    store.remove("audit_current_user").await?;

    assert_eq!(store.get("audit_current_user").await?, None);
    Ok(())
}

#[tokio::test]
async fn path_like_keys_are_rejected() -> AppResult<()> {
    let dir = temp_dir();
    let store = FileKeyValueStore::open(dir.path()).await?;

    assert!(matches!(
        store.get("../outside").await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        store.set("", String::new()).await,
        Err(AppError::Validation(_))
    ));
    Ok(())
}

#[tokio::test]
async fn store_survives_reopen_with_real_adapters() -> AppResult<()> {
    let dir = temp_dir();

    let first = DomainStore::open(
        Arc::new(FileKeyValueStore::open(dir.path()).await?),
        Arc::new(SystemClock),
        Arc::new(Argon2PasswordHasher::new()),
    )
    .await?;
    let LoginOutcome::Authenticated { session, .. } =
        first.auth().login("admin", "admin123").await?
    else {
        panic!("expected the seeded admin to authenticate");
    };
    let website = first
        .websites()
        .create_website(
            &session,
            CreateWebsiteInput {
                name: "Shop".to_owned(),
                url: "https://shop.example".to_owned(),
            },
        )
        .await?;
    let module = first
        .modules()
        .create_module(
            &session,
            CreateModuleInput {
                website_id: website.id().to_owned(),
                name: "Checkout".to_owned(),
                description: Some("Payment flow".to_owned()),
            },
        )
        .await?;
    first
        .audits()
        .submit_website_audit(
            &session,
            website.id(),
            vec![ModuleAuditSubmission {
                module_id: module.id().to_owned(),
                status: AuditStatus::Working,
                remarks: None,
            }],
        )
        .await?;

    let reopened_kv = Arc::new(FileKeyValueStore::open(dir.path()).await?);
    let second = DomainStore::open(
        reopened_kv.clone(),
        Arc::new(SystemClock),
        Arc::new(Argon2PasswordHasher::new()),
    )
    .await?;

    assert_eq!(second.users().list_users().await?.len(), 1);
    assert_eq!(second.auth().current_session().await?, session);
    assert_eq!(second.audits().today_audits_by_website(website.id()).await?.len(), 1);
    assert_eq!(second.activity().list().await?.len(), 4);
    assert!(
        reopened_kv
            .get(CollectionKey::Users.as_str())
            .await?
            .is_some_and(|raw| !raw.contains("admin123"))
    );
    Ok(())
}
