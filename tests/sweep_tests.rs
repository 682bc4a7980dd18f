use access_manager::{Sweeper, TokenStore};
use std::time::Duration;

fn make_artifact(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"ID3\x03mp3 bytes").unwrap();
    path
}

#[tokio::test]
async fn test_sweep_deletes_expired_file_and_record() {
    access_manager::log::setup();
    let dir = tempfile::tempdir().unwrap();
    let path = make_artifact(&dir, "song_ab12cd34.mp3");

    // zero TTL: the record is expired the moment it is registered
    let store = TokenStore::new(32, Duration::from_secs(0));
    let token = store.register(&path).unwrap();
    assert_eq!(store.redeem(&token), None);
    assert_eq!(store.live_count(), 1);

    let sweeper = Sweeper::new(store.clone(), Duration::from_secs(60));
    assert_eq!(sweeper.sweep_once().await, 1);

    assert_eq!(store.live_count(), 0);
    assert_eq!(store.redeem(&token), None);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_sweep_leaves_unexpired_artifacts_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = make_artifact(&dir, "keep.mp3");

    let store = TokenStore::new(32, Duration::from_secs(60));
    let token = store.register(&path).unwrap();

    let sweeper = Sweeper::new(store.clone(), Duration::from_secs(60));
    assert_eq!(sweeper.sweep_once().await, 0);

    assert!(path.exists());
    assert_eq!(store.redeem(&token), Some(path));
}

#[tokio::test]
async fn test_sweep_tolerates_missing_file() {
    access_manager::log::setup();
    let store = TokenStore::new(32, Duration::from_secs(0));
    store.register("/nonexistent/dir/gone.mp3").unwrap();

    let sweeper = Sweeper::new(store.clone(), Duration::from_secs(60));
    // deletion fails, the pass still completes and the record stays removed
    assert_eq!(sweeper.sweep_once().await, 1);
    assert_eq!(store.live_count(), 0);

    // the failure must not poison later passes
    assert_eq!(sweeper.sweep_once().await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sweeps_drain_each_record_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::new(32, Duration::from_secs(0));
    for i in 0..100 {
        store
            .register(make_artifact(&dir, &format!("t{}.mp3", i)))
            .unwrap();
    }

    let a = Sweeper::new(store.clone(), Duration::from_secs(60));
    let b = Sweeper::new(store.clone(), Duration::from_secs(60));
    let (drained_a, drained_b) = tokio::join!(a.sweep_once(), b.sweep_once());

    assert_eq!(drained_a + drained_b, 100);
    assert_eq!(store.live_count(), 0);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
