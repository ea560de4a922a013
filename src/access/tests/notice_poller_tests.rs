//! Unread-notices badge poller

mod support;

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use support::{record, ScriptedDirectory, ScriptedProvider};
use tokio::sync::oneshot;
use tokio::time::{timeout, Duration};
use volunteerverse_access::{NoticeItem, NoticePoller, NoticeSource, SessionStore};
use volunteerverse_core::{CoreError, Identity, Role};

/// Notice source answering per user id; unknown users fail
#[derive(Default)]
struct ScriptedNotices {
    unread: Mutex<HashMap<String, bool>>,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    fetches: AtomicUsize,
}

impl ScriptedNotices {
    /// Hold the next fetch until the returned sender fires
    fn hold(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock() = Some(rx);
        tx
    }

    fn set(&self, uid: &str, unread: bool) {
        self.unread.lock().insert(uid.to_string(), unread);
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NoticeSource for ScriptedNotices {
    async fn fetch(&self, user_id: &str) -> volunteerverse_core::Result<Vec<NoticeItem>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let gate = self.gate.lock().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let unread = self.unread.lock().get(user_id).copied();
        match unread {
            Some(unread) => Ok(vec![
                NoticeItem {
                    id: Some("n1".to_string()),
                    is_read: true,
                },
                NoticeItem {
                    id: Some("n2".to_string()),
                    is_read: !unread,
                },
            ]),
            None => Err(CoreError::transport("notices unavailable")),
        }
    }
}

struct Fixture {
    directory: Arc<ScriptedDirectory>,
    store: SessionStore,
    notices: Arc<ScriptedNotices>,
    poller: NoticePoller,
}

fn setup(interval: Duration) -> Fixture {
    let provider = Arc::new(ScriptedProvider::new());
    let directory = Arc::new(ScriptedDirectory::new());
    let store = SessionStore::new(provider, directory.clone());
    let notices = Arc::new(ScriptedNotices::default());
    let poller = NoticePoller::new(notices.clone(), store.subscribe(), interval);
    Fixture {
        directory,
        store,
        notices,
        poller,
    }
}

async fn sign_in(fixture: &Fixture, uid: &str) {
    fixture
        .directory
        .respond(&format!("token-{}", uid), record(Role::Volunteer));
    fixture.store.present(Identity::new(uid)).await.unwrap();
}

#[tokio::test]
async fn test_signed_out_has_no_badge() {
    let fixture = setup(Duration::from_secs(60));

    assert!(!fixture.poller.check().await);
    assert_eq!(fixture.notices.fetches(), 0);
}

#[tokio::test]
async fn test_check_publishes_unread_flag() {
    let fixture = setup(Duration::from_secs(60));
    sign_in(&fixture, "vol-1").await;
    fixture.notices.set("vol-1", true);

    let mut flag = fixture.poller.subscribe();
    assert!(fixture.poller.check().await);
    assert!(*flag.borrow_and_update());
    assert!(fixture.poller.has_unread());

    fixture.notices.set("vol-1", false);
    assert!(!fixture.poller.check().await);
    assert!(!fixture.poller.has_unread());
}

#[tokio::test]
async fn test_fetch_error_keeps_flag() {
    let fixture = setup(Duration::from_secs(60));
    sign_in(&fixture, "vol-1").await;
    fixture.notices.set("vol-1", true);
    fixture.poller.check().await;

    fixture.notices.unread.lock().clear();
    assert!(fixture.poller.check().await);
    assert!(fixture.poller.has_unread());
}

#[tokio::test]
async fn test_notices_page_skips_recheck() {
    let fixture = setup(Duration::from_secs(60));
    sign_in(&fixture, "vol-1").await;
    fixture.notices.set("vol-1", true);
    fixture.poller.check().await;
    let fetches = fixture.notices.fetches();

    fixture.poller.navigated("/volunteer/notices/").await;
    assert!(fixture.poller.has_unread(), "badge stays until the page marks notices viewed");
    assert_eq!(fixture.notices.fetches(), fetches);

    fixture.poller.mark_viewed();
    assert!(!fixture.poller.has_unread());

    fixture.poller.navigated("/volunteer/gallery").await;
    assert!(fixture.poller.has_unread());
    assert_eq!(fixture.notices.fetches(), fetches + 1);
}

async fn wait_for_fetches(notices: &ScriptedNotices, count: usize) {
    timeout(Duration::from_secs(1), async {
        while notices.fetches() < count {
            tokio::task::yield_now().await;
        }
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_late_notices_after_sign_out_are_discarded() {
    let fixture = setup(Duration::from_secs(60));
    sign_in(&fixture, "vol-1").await;
    fixture.notices.set("vol-1", true);

    let release = fixture.notices.hold();
    let poller = fixture.poller.clone();
    let pending = tokio::spawn(async move { poller.check().await });
    wait_for_fetches(&fixture.notices, 1).await;

    fixture.store.absent();
    release.send(()).unwrap();

    assert!(!pending.await.unwrap());
    assert!(!fixture.poller.has_unread());
}

#[tokio::test]
async fn test_late_notices_for_previous_principal_are_discarded() {
    let fixture = setup(Duration::from_secs(60));
    sign_in(&fixture, "vol-1").await;
    fixture.notices.set("vol-1", true);
    fixture.notices.set("vol-2", false);

    let release = fixture.notices.hold();
    let poller = fixture.poller.clone();
    let pending = tokio::spawn(async move { poller.check().await });
    wait_for_fetches(&fixture.notices, 1).await;

    sign_in(&fixture, "vol-2").await;
    release.send(()).unwrap();

    assert!(!pending.await.unwrap());
    assert!(!fixture.poller.has_unread());

    assert!(!fixture.poller.check().await);
    assert_eq!(fixture.notices.fetches(), 2);
}

#[tokio::test]
async fn test_mark_viewed_clears_badge() {
    let fixture = setup(Duration::from_secs(60));
    sign_in(&fixture, "vol-1").await;
    fixture.notices.set("vol-1", true);
    fixture.poller.check().await;

    fixture.poller.mark_viewed();
    assert!(!fixture.poller.has_unread());
}

#[tokio::test]
async fn test_background_loop_follows_session() {
    let fixture = setup(Duration::from_secs(3600));
    fixture.notices.set("vol-1", true);
    let mut flag = fixture.poller.subscribe();

    let handle = fixture.poller.spawn();

    sign_in(&fixture, "vol-1").await;
    timeout(Duration::from_secs(1), flag.wait_for(|unread| *unread))
        .await
        .unwrap()
        .unwrap();

    fixture.store.absent();
    timeout(Duration::from_secs(1), flag.wait_for(|unread| !*unread))
        .await
        .unwrap()
        .unwrap();

    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn test_background_loop_polls_on_interval() {
    let fixture = setup(Duration::from_secs(60));
    sign_in(&fixture, "vol-1").await;
    fixture.notices.set("vol-1", false);

    let handle = fixture.poller.spawn();
    tokio::time::sleep(Duration::from_secs(1)).await;
    let after_first_tick = fixture.notices.fetches();
    assert!(after_first_tick >= 1);
    assert!(!fixture.poller.has_unread());

    fixture.notices.set("vol-1", true);
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(fixture.notices.fetches() > after_first_tick);
    assert!(fixture.poller.has_unread());

    handle.abort();
}
