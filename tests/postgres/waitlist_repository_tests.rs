//! `PostgreSQL` tests for the waitlist repository.

use super::helpers::{test_database, test_runtime};
use chrono::{DateTime, TimeZone, Utc};
use ibwt::waitlist::{
    adapters::postgres::PostgresWaitlistRepository,
    domain::{
        EmailAddress, MAX_EMAIL_LENGTH, PersistedWaitlistEntryData, WaitlistEntry, WaitlistRole,
    },
    ports::WaitlistRepository,
};
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 10, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn entry(email: &str, role: WaitlistRole, signed_up: DateTime<Utc>) -> WaitlistEntry {
    WaitlistEntry::from_persisted(PersistedWaitlistEntryData {
        email: EmailAddress::new(email).expect("valid email"),
        role,
        created_at: signed_up,
        updated_at: signed_up,
    })
}

#[rstest]
fn repeat_signup_updates_role_and_keeps_first_timestamp(
    shared_test_cluster: &'static TestCluster,
) {
    let db = test_database(shared_test_cluster, "waitlist_upsert");
    let repo = PostgresWaitlistRepository::new(db.pool());
    let rt = test_runtime();

    let first = rt
        .block_on(repo.upsert(&entry("ada@example.com", WaitlistRole::User, at(9))))
        .expect("first upsert should succeed");
    let second = rt
        .block_on(repo.upsert(&entry(
            "ada@example.com",
            WaitlistRole::McpProvider,
            at(11),
        )))
        .expect("repeat upsert should succeed");

    assert_eq!(first.role(), WaitlistRole::User);
    assert_eq!(second.role(), WaitlistRole::McpProvider);
    assert_eq!(second.created_at(), at(9));
    assert_eq!(second.updated_at(), at(11));
    assert_eq!(rt.block_on(repo.count()).expect("count should succeed"), 1);
}

#[rstest]
fn find_by_email_returns_stored_entry(shared_test_cluster: &'static TestCluster) {
    let db = test_database(shared_test_cluster, "waitlist_find");
    let repo = PostgresWaitlistRepository::new(db.pool());
    let rt = test_runtime();
    rt.block_on(repo.upsert(&entry(
        "grace@example.com",
        WaitlistRole::AgentProvider,
        at(8),
    )))
    .expect("upsert should succeed");

    let found = rt
        .block_on(repo.find_by_email(&EmailAddress::new("grace@example.com").expect("valid")))
        .expect("lookup should succeed")
        .expect("entry should exist");
    let missing = rt
        .block_on(repo.find_by_email(&EmailAddress::new("nobody@example.com").expect("valid")))
        .expect("lookup should succeed");

    assert_eq!(found.role(), WaitlistRole::AgentProvider);
    assert_eq!(found.created_at(), at(8));
    assert!(missing.is_none());
}

#[rstest]
fn emails_differing_in_case_are_separate_entries(shared_test_cluster: &'static TestCluster) {
    let db = test_database(shared_test_cluster, "waitlist_case");
    let repo = PostgresWaitlistRepository::new(db.pool());
    let rt = test_runtime();

    for email in ["Ada@Example.com", "ada@example.com"] {
        rt.block_on(repo.upsert(&entry(email, WaitlistRole::User, at(9))))
            .expect("upsert should succeed");
    }

    assert_eq!(rt.block_on(repo.count()).expect("count should succeed"), 2);
}

#[rstest]
fn address_at_length_limit_fits_the_column(shared_test_cluster: &'static TestCluster) {
    let db = test_database(shared_test_cluster, "waitlist_long_email");
    let repo = PostgresWaitlistRepository::new(db.pool());
    let rt = test_runtime();
    let domain = "@example.com";
    let address = format!("{}{domain}", "a".repeat(MAX_EMAIL_LENGTH - domain.len()));

    let stored = rt
        .block_on(repo.upsert(&entry(&address, WaitlistRole::Other, at(9))))
        .expect("upsert should succeed");

    assert_eq!(stored.email().as_str(), address);
}
