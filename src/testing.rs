//! In-memory provider fakes shared by unit tests

use std::cmp::Ordering as CmpOrdering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::provider::{
    AuthBackend, DataBackend, ProviderError, Result, SelectQuery, SignUpOutcome, SignUpRequest,
};
use crate::session::{Session, User, UserMetadata};

fn user(id: Uuid, email: &str, full_name: Option<&str>) -> User {
    User {
        id,
        email: Some(email.to_string()),
        user_metadata: UserMetadata {
            full_name: full_name.map(str::to_string),
            ..Default::default()
        },
    }
}

fn session_with_expiry(id: Uuid, email: &str, expires_at: DateTime<Utc>) -> Session {
    Session {
        access_token: format!("access-{}", id),
        refresh_token: format!("refresh-{}", id),
        token_type: "bearer".to_string(),
        expires_at,
        user: user(id, email, None),
    }
}

pub fn session_for(id: Uuid, email: &str) -> Session {
    session_with_expiry(id, email, Utc::now() + Duration::hours(1))
}

pub fn expired_session_for(id: Uuid, email: &str) -> Session {
    session_with_expiry(id, email, Utc::now() - Duration::minutes(5))
}

fn api_error(status: u16, message: &str) -> ProviderError {
    ProviderError::Api {
        status,
        message: message.to_string(),
    }
}

/// Fake identity provider with password accounts
#[derive(Default)]
pub struct FakeAuth {
    accounts: Mutex<HashMap<String, (String, Uuid)>>,
    sign_ups: Mutex<Vec<SignUpRequest>>,
    sign_out_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
    refresh_fails: AtomicBool,
    auto_confirm: AtomicBool,
    issue_expired: AtomicBool,
}

impl FakeAuth {
    pub fn with_user(email: &str, password: &str) -> Self {
        let auth = Self::default();
        auth.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), Uuid::new_v4()));
        auth
    }

    pub fn sign_ups(&self) -> Vec<SignUpRequest> {
        self.sign_ups.lock().unwrap().clone()
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn fail_refresh(&self) {
        self.refresh_fails.store(true, Ordering::SeqCst);
    }

    pub fn auto_confirm(&self) {
        self.auto_confirm.store(true, Ordering::SeqCst);
    }

    /// Hand out sessions that are already past their expiry on sign-in
    pub fn issue_expired(&self) {
        self.issue_expired.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl AuthBackend for FakeAuth {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email) {
            Some((stored, id)) if stored == password => {
                if self.issue_expired.load(Ordering::SeqCst) {
                    Ok(expired_session_for(*id, email))
                } else {
                    Ok(session_for(*id, email))
                }
            }
            _ => Err(api_error(400, "Invalid login credentials")),
        }
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<SignUpOutcome> {
        self.sign_ups.lock().unwrap().push(request.clone());

        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&request.email) {
            return Err(api_error(422, "User already registered"));
        }
        let id = Uuid::new_v4();
        accounts.insert(request.email.clone(), (request.password.clone(), id));

        if self.auto_confirm.load(Ordering::SeqCst) {
            let mut session = session_for(id, &request.email);
            session.user.user_metadata.full_name = Some(request.full_name.clone());
            Ok(SignUpOutcome::SignedIn(session))
        } else {
            Ok(SignUpOutcome::ConfirmationPending(user(
                id,
                &request.email,
                Some(&request.full_name),
            )))
        }
    }

    async fn sign_out(&self, _access_token: &str) -> Result<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        if self.refresh_fails.load(Ordering::SeqCst) {
            return Err(api_error(400, "Invalid Refresh Token: Refresh Token Not Found"));
        }

        let id = refresh_token
            .strip_prefix("refresh-")
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| api_error(400, "Invalid Refresh Token"))?;
        Ok(session_for(id, "refreshed@x.com"))
    }

    async fn get_user(&self, access_token: &str) -> Result<User> {
        let id = access_token
            .strip_prefix("access-")
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| api_error(401, "invalid JWT"))?;
        let email = self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|(_, (_, uid))| *uid == id)
            .map(|(email, _)| email.clone())
            .ok_or_else(|| api_error(404, "User not found"))?;
        let full_name = self
            .sign_ups
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| r.email == email)
            .map(|r| r.full_name.clone());
        Ok(user(id, &email, full_name.as_deref()))
    }
}

/// Fake table API with auto-increment keys and a monotonic clock
#[derive(Default)]
pub struct FakeData {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    next_id: AtomicI64,
    insert_calls: AtomicUsize,
    fail_next: Mutex<Option<String>>,
}

fn key_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn compare_values(a: &Value, b: &Value) -> CmpOrdering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(CmpOrdering::Equal),
        _ => key_text(a).cmp(&key_text(b)),
    }
}

impl FakeData {
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// Make the next select or insert fail with `message`
    pub fn fail_next(&self, message: &str) {
        *self.fail_next.lock().unwrap() = Some(message.to_string());
    }

    fn take_failure(&self) -> Result<()> {
        match self.fail_next.lock().unwrap().take() {
            Some(message) => Err(api_error(500, &message)),
            None => Ok(()),
        }
    }

    fn timestamp(n: i64) -> String {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (base + Duration::seconds(n)).to_rfc3339()
    }
}

#[async_trait]
impl DataBackend for FakeData {
    async fn select(&self, query: &SelectQuery, _access_token: &str) -> Result<Vec<Value>> {
        self.take_failure()?;

        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<Value> = tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| {
                        query.filters.iter().all(|f| {
                            row.get(&f.column).map(key_text).as_deref() == Some(f.value.as_str())
                        })
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        rows.sort_by(|a, b| {
            for term in &query.order {
                let ord = compare_values(&a[&term.column], &b[&term.column]);
                let ord = if term.descending { ord.reverse() } else { ord };
                if ord != CmpOrdering::Equal {
                    return ord;
                }
            }
            CmpOrdering::Equal
        });

        if query.single && rows.len() != 1 {
            return Err(api_error(
                406,
                "JSON object requested, multiple (or no) rows returned",
            ));
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Value>, access_token: &str) -> Result<()> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;

        let mut tables = self.tables.lock().unwrap();
        for row in &rows {
            if table == "topics" {
                let owner = row.get("user_id").map(key_text).unwrap_or_default();
                if access_token != format!("access-{}", owner) {
                    return Err(api_error(
                        403,
                        "new row violates row-level security policy for table \"topics\"",
                    ));
                }
            }
            if table == "cards" {
                let topic_id = row.get("topic_id").map(key_text).unwrap_or_default();
                let exists = tables
                    .get("topics")
                    .map(|topics| topics.iter().any(|t| key_text(&t["id"]) == topic_id))
                    .unwrap_or(false);
                if !exists {
                    return Err(api_error(
                        409,
                        "insert or update on table \"cards\" violates foreign key constraint \"cards_topic_id_fkey\"",
                    ));
                }
            }
        }

        let target = tables.entry(table.to_string()).or_default();
        for mut row in rows {
            let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            if let Value::Object(ref mut map) = row {
                map.insert("id".to_string(), Value::from(n));
                map.insert("created_at".to_string(), Value::from(Self::timestamp(n)));
            }
            target.push(row);
        }
        Ok(())
    }
}
