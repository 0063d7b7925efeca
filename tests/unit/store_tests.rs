/*!
 * Tests for the project store
 */

use myasub::store::{ProjectRepository, StoreConnection};

use crate::common::{self, project_from_pairs};

#[tokio::test]
async fn test_store_saveListDelete_fullLifecycle() {
    common::init_test_logging();
    let repo = ProjectRepository::new_in_memory().unwrap();

    let project = project_from_pairs(
        "episode1.srt",
        &[("a translated dialogue line", Some("ဘာသာပြန်ပြီး"))],
        false,
    );

    repo.save_project(&project).await.unwrap();

    let listed = repo.list_projects().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], project);

    repo.delete_project(&project.id).await.unwrap();
    assert!(repo.list_projects().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_store_listProjects_feedsSamplerNewestFirst() {
    let repo = ProjectRepository::new_in_memory().unwrap();

    let mut old = project_from_pairs(
        "old.srt",
        &[("an old translated dialogue line", Some("အဟောင်း"))],
        false,
    );
    old.created_at = "2026-01-01T00:00:00Z".to_string();
    let mut new = project_from_pairs(
        "new.srt",
        &[("a new translated dialogue line", Some("အသစ်"))],
        false,
    );
    new.created_at = "2026-06-01T00:00:00Z".to_string();

    repo.save_project(&old).await.unwrap();
    repo.save_project(&new).await.unwrap();

    let history = repo.list_projects().await.unwrap();
    let examples = myasub::sampler::sample_training_examples(&history, 30);

    // Newest project's example comes first.
    assert_eq!(examples[0].translated, "အသစ်");
    assert_eq!(examples[1].translated, "အဟောင်း");
}

#[tokio::test]
async fn test_store_externalImportFlag_roundTrips() {
    let repo = ProjectRepository::new_in_memory().unwrap();

    let imported = project_from_pairs(
        "glossary-pack.srt",
        &[("an imported reference line", Some("သင်ကြားရေး"))],
        true,
    );
    repo.save_project(&imported).await.unwrap();

    let loaded = repo.get_project(&imported.id).await.unwrap().unwrap();
    assert!(loaded.is_external_import);
}

#[tokio::test]
async fn test_store_onDisk_persistsAcrossConnections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("projects.db");

    let project = project_from_pairs(
        "episode1.srt",
        &[("a line that must survive reopen", Some("တည်မြဲသည်"))],
        false,
    );

    {
        let repo = ProjectRepository::new(StoreConnection::new(&path).unwrap());
        repo.save_project(&project).await.unwrap();
    }

    let repo = ProjectRepository::new(StoreConnection::new(&path).unwrap());
    let loaded = repo.get_project(&project.id).await.unwrap().unwrap();
    assert_eq!(loaded, project);
}
