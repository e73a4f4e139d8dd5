// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use reqwest::blocking::Response;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::{self, Config};
use crate::models::{EventSchedule, Expense, NewExpense, OptimizedDebt};
use crate::utils::http_client;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("connection error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },
    #[error("session expired; run `splitplan remote login` again")]
    SessionExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefreshState {
    Idle,
    Refreshing,
    Failed,
}

struct GateInner {
    state: RefreshState,
    generation: u64,
}

/// Single-flight gate for token refresh. At most one refresh runs at a time;
/// callers that hit an expired session while one is in flight block until it
/// resolves. A failed refresh is terminal for the process: every later
/// caller gets `SessionExpired` without another attempt.
pub struct AuthGate {
    inner: Mutex<GateInner>,
    cond: Condvar,
}

impl Default for AuthGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthGate {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(GateInner {
                state: RefreshState::Idle,
                generation: 0,
            }),
            cond: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GateInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Refresh generation observed before the caller's failed request.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Ensure a refresh newer than `seen` has completed, running `op` if
    /// this caller is the one to perform it. Callers arriving while a
    /// refresh is in flight wait for its outcome instead of starting
    /// another; callers arriving after a newer refresh already succeeded
    /// skip the work entirely.
    pub fn refresh<F>(&self, seen: u64, op: F) -> Result<(), ApiError>
    where
        F: FnOnce() -> Result<(), ApiError>,
    {
        let mut inner = self.lock();
        loop {
            match inner.state {
                RefreshState::Failed => return Err(ApiError::SessionExpired),
                RefreshState::Refreshing => {
                    inner = self
                        .cond
                        .wait(inner)
                        .unwrap_or_else(PoisonError::into_inner);
                }
                RefreshState::Idle => {
                    if inner.generation > seen {
                        return Ok(());
                    }
                    inner.state = RefreshState::Refreshing;
                    break;
                }
            }
        }
        drop(inner);

        let outcome = op();
        let mut inner = self.lock();
        match outcome {
            Ok(()) => {
                inner.state = RefreshState::Idle;
                inner.generation += 1;
                self.cond.notify_all();
                Ok(())
            }
            Err(e) => {
                inner.state = RefreshState::Failed;
                self.cond.notify_all();
                Err(e)
            }
        }
    }
}

#[derive(Debug, Default)]
struct SessionTokens {
    access: Option<String>,
    refresh: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Blocking HTTP client for the backend service. Requests carry the current
/// access token; a 401 triggers one single-flight refresh and one replay of
/// the original request.
pub struct BackendClient {
    http: reqwest::blocking::Client,
    base_url: String,
    tokens: Mutex<SessionTokens>,
    gate: AuthGate,
}

impl BackendClient {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let base_url = cfg
            .base_url
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No backend URL set; run `splitplan remote set-url`"))?;
        Ok(Self {
            http: http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens: Mutex::new(SessionTokens {
                access: cfg.access_token.clone(),
                refresh: cfg.refresh_token.clone(),
            }),
            gate: AuthGate::new(),
        })
    }

    pub fn list_expenses(&self, group_id: &str) -> Result<Vec<Expense>, ApiError> {
        self.request(Method::GET, &format!("/groups/{group_id}/expenses"), None)
    }

    pub fn create_expense(
        &self,
        group_id: &str,
        expense: &NewExpense,
    ) -> Result<Expense, ApiError> {
        let body = serde_json::to_value(expense).ok();
        self.request(Method::POST, &format!("/groups/{group_id}/expenses"), body)
    }

    pub fn delete_expense(&self, group_id: &str, expense_id: &str) -> Result<(), ApiError> {
        self.request_no_content(
            Method::DELETE,
            &format!("/groups/{group_id}/expenses/{expense_id}"),
            None,
        )
    }

    pub fn mark_debt_paid(&self, group_id: &str, debt: &OptimizedDebt) -> Result<(), ApiError> {
        let body = json!({
            "fromUserId": debt.from_user_id,
            "toUserId": debt.to_user_id,
            "amount": debt.amount,
            "relatedExpenseIds": debt.related_expense_ids,
        });
        self.request_no_content(
            Method::POST,
            &format!("/groups/{group_id}/settlements"),
            Some(body),
        )
    }

    pub fn event_schedule(&self, event_id: &str) -> Result<EventSchedule, ApiError> {
        self.request(Method::GET, &format!("/events/{event_id}/schedule"), None)
    }

    pub fn confirm_slot(
        &self,
        event_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        let body = json!({
            "startTime": start,
            "endTime": end,
        });
        self.request_no_content(
            Method::POST,
            &format!("/events/{event_id}/chosen-slot"),
            Some(body),
        )
    }

    pub fn health(&self) -> Result<(), ApiError> {
        self.request_no_content(Method::GET, "/health", None)
    }

    fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let resp = self.send_with_retry(method, path, body)?;
        Ok(resp.json()?)
    }

    fn request_no_content(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<(), ApiError> {
        self.send_with_retry(method, path, body).map(|_| ())
    }

    fn send_with_retry(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Response, ApiError> {
        let seen = self.gate.generation();
        let resp = self.dispatch(&method, path, body.as_ref())?;
        if resp.status() != StatusCode::UNAUTHORIZED {
            return Self::check(resp);
        }

        tracing::debug!(path, "request unauthorized; refreshing session");
        self.gate.refresh(seen, || self.refresh_session())?;
        tracing::debug!(path, "replaying request after refresh");
        let resp = self.dispatch(&method, path, body.as_ref())?;
        Self::check(resp)
    }

    fn dispatch(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let access = self
            .tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .access
            .clone();
        let mut req = self.http.request(method.clone(), url);
        if let Some(token) = access {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        Ok(req.send()?)
    }

    fn check(resp: Response) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        // Surface the backend's message verbatim when it sends one.
        let text = resp.text().unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|b| b.message)
            .unwrap_or(text);
        Err(ApiError::Backend {
            status: status.as_u16(),
            message,
        })
    }

    /// Exchange the stored refresh token for a new token pair, persisting
    /// the rotation. A missing token or a rejected exchange ends the
    /// session: stored tokens are cleared so the next run starts logged out.
    fn refresh_session(&self) -> Result<(), ApiError> {
        let refresh = self
            .tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .refresh
            .clone();
        let Some(refresh) = refresh else {
            self.end_session();
            return Err(ApiError::SessionExpired);
        };

        let url = format!("{}/auth/refresh", self.base_url);
        let resp = self
            .http
            .post(url)
            .json(&json!({ "refreshToken": refresh }))
            .send()?;
        if !resp.status().is_success() {
            tracing::debug!(status = resp.status().as_u16(), "token refresh rejected");
            self.end_session();
            return Err(ApiError::SessionExpired);
        }
        let rotated: RefreshResponse = resp.json()?;

        let mut tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);
        tokens.access = Some(rotated.access_token.clone());
        tokens.refresh = Some(rotated.refresh_token.clone());
        drop(tokens);

        if let Ok(mut cfg) = config::load() {
            cfg.access_token = Some(rotated.access_token);
            cfg.refresh_token = Some(rotated.refresh_token);
            if let Err(e) = config::save(&cfg) {
                tracing::debug!(error = %e, "could not persist rotated tokens");
            }
        }
        Ok(())
    }

    fn end_session(&self) {
        let mut tokens = self.tokens.lock().unwrap_or_else(PoisonError::into_inner);
        tokens.access = None;
        tokens.refresh = None;
        drop(tokens);

        if let Ok(mut cfg) = config::load() {
            cfg.clear_session();
            if let Err(e) = config::save(&cfg) {
                tracing::debug!(error = %e, "could not clear stored session");
            }
        }
    }
}
