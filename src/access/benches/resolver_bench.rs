//! Access resolver and navigator benchmarks
//!
//! Decisions run on every navigation and re-render, so both paths should stay
//! allocation-light (only redirects allocate).

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use tokio::runtime::Runtime;
use volunteerverse_access::{decide, routes, Gate, SessionStore, StaticIdentityProvider};
use volunteerverse_core::{DirectoryRecord, DirectoryService, Identity, Profile, Role, Session};

fn session(role: Role, is_banned: bool) -> Session {
    Session {
        identity: Some(Identity::new("bench-user")),
        profile: Profile {
            role: Some(role),
            username: Some("bench".to_string()),
            display_name: None,
            is_banned,
        },
        loading: false,
        version: 1,
    }
}

fn bench_decide(c: &mut Criterion) {
    let mut group = c.benchmark_group("decide");

    let cases = [
        ("admit", session(Role::Organizer, false)),
        ("banned", session(Role::Organizer, true)),
        ("role_mismatch", session(Role::Volunteer, false)),
    ];

    for (name, session) in cases.iter() {
        group.bench_with_input(BenchmarkId::new("organizer_route", name), session, |b, s| {
            b.iter(|| decide(black_box(s), black_box(Some(&[Role::Organizer]))));
        });
    }

    group.finish();
}

fn bench_navigate(c: &mut Criterion) {
    let session = session(Role::Admin, false);
    let paths = ["/", "/admin/users", "/admin/users/", "/volunteer/gallery", "/missing"];

    c.bench_function("navigate_all_paths", |b| {
        b.iter(|| {
            for path in paths.iter() {
                black_box(routes::resolve(black_box(path), &session));
            }
        });
    });
}

struct FixedDirectory;

#[async_trait]
impl DirectoryService for FixedDirectory {
    async fn lookup(&self, _token: &str) -> volunteerverse_core::Result<DirectoryRecord> {
        Ok(DirectoryRecord::with_role("organizer"))
    }
}

fn bench_store_cycle(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let identity = Identity::new("bench-user");
    let store = SessionStore::new(
        Arc::new(StaticIdentityProvider::signed_in(identity.clone(), "bench-token")),
        Arc::new(FixedDirectory),
    );
    let gate = Gate::new(&store);

    c.bench_function("present_lookup_and_admit", |b| {
        b.to_async(&rt).iter(|| async {
            store.present(identity.clone()).await.unwrap();
            black_box(gate.decide(Some(&[Role::Organizer])).await)
        });
    });
}

criterion_group!(benches, bench_decide, bench_navigate, bench_store_cycle);
criterion_main!(benches);
