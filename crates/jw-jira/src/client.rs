//! Blocking Jira REST v2 client.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::blocking::Response;
use serde::Deserialize;

use jw_core::{IssueRef, IssueTracker, TrackerError, User, WorklogEntry};

use crate::creds::Credentials;

/// Request timeout for all Jira calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timestamp format Jira accepts for worklog fields: millisecond
/// precision, numeric offset without a colon.
const JIRA_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Jira REST client bound to one instance and one user.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct JiraClient {
    http: reqwest::blocking::Client,
    base_url: reqwest::Url,
    username: String,
    password: String,
}

impl fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraClient")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl JiraClient {
    /// Builds a client from stored credentials.
    pub fn new(creds: &Credentials) -> Result<Self, TrackerError> {
        if creds.url.trim().is_empty() {
            return Err(TrackerError::new("jira url cannot be empty"));
        }
        // A trailing slash keeps Url::join from eating the last path
        // segment of instances served under a subpath.
        let mut url = creds.url.trim().to_string();
        if !url.ends_with('/') {
            url.push('/');
        }
        let base_url = reqwest::Url::parse(&url)
            .map_err(|err| TrackerError::new(format!("invalid jira url '{url}': {err}")))?;

        let http = reqwest::blocking::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|err| TrackerError::new(format!("failed to build http client: {err}")))?;

        Ok(Self {
            http,
            base_url,
            username: creds.username.clone(),
            password: creds.password.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, TrackerError> {
        self.base_url
            .join(path)
            .map_err(|err| TrackerError::new(format!("invalid endpoint '{path}': {err}")))
    }

    fn get(&self, path: &str) -> Result<Response, TrackerError> {
        let response = self
            .http
            .get(self.endpoint(path)?)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .map_err(|err| TrackerError::new(err.to_string()))?;
        check_status(response)
    }
}

/// Turns a non-success response into a [`TrackerError`] carrying the
/// remote status and Jira's error messages when present.
fn check_status(response: Response) -> Result<Response, TrackerError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(TrackerError::with_status(
        status.as_u16(),
        parse_error_messages(&body).unwrap_or_else(|| reason(status)),
    ))
}

fn reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("unexpected response")
        .to_string()
}

fn parse_error_messages(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct ErrorPayload {
        #[serde(default)]
        error_messages: Vec<String>,
    }

    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .filter(|payload| !payload.error_messages.is_empty())
        .map(|payload| payload.error_messages.join("; "))
}

fn jira_time(time: DateTime<Utc>) -> String {
    time.format(JIRA_TIME_FORMAT).to_string()
}

// ---- wire types ----

#[derive(Debug, Deserialize)]
struct IssueResponse {
    id: String,
    key: String,
    fields: IssueFields,
}

#[derive(Debug, Deserialize)]
struct IssueFields {
    #[serde(default)]
    summary: String,
    status: IssueStatus,
}

#[derive(Debug, Deserialize)]
struct IssueStatus {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyselfResponse {
    name: String,
    #[serde(default)]
    display_name: String,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthorPayload<'a> {
    name: &'a str,
}

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct WorklogPayload<'a> {
    author: AuthorPayload<'a>,
    update_author: AuthorPayload<'a>,
    created: String,
    updated: String,
    started: String,
    time_spent_seconds: i64,
    issue_id: &'a str,
    comment: &'a str,
}

impl IssueTracker for JiraClient {
    fn issue(&self, id: &str) -> Result<IssueRef, TrackerError> {
        let response = self.get(&format!("rest/api/2/issue/{id}?fields=summary,status"))?;
        let issue: IssueResponse = response
            .json()
            .map_err(|err| TrackerError::new(format!("invalid issue response: {err}")))?;
        Ok(IssueRef {
            id: issue.id,
            key: issue.key,
            summary: issue.fields.summary,
            status: issue.fields.status.name,
        })
    }

    fn current_user(&self) -> Result<User, TrackerError> {
        let response = self.get("rest/api/2/myself")?;
        let myself: MyselfResponse = response
            .json()
            .map_err(|err| TrackerError::new(format!("invalid identity response: {err}")))?;
        Ok(User {
            name: myself.name,
            display_name: myself.display_name,
        })
    }

    fn add_worklog(&self, issue: &IssueRef, entry: &WorklogEntry) -> Result<(), TrackerError> {
        let now = jira_time(Utc::now());
        let payload = WorklogPayload {
            author: AuthorPayload {
                name: &entry.author.name,
            },
            update_author: AuthorPayload {
                name: &entry.author.name,
            },
            created: now.clone(),
            updated: now,
            started: jira_time(entry.started),
            time_spent_seconds: entry.time_spent_seconds,
            issue_id: &issue.id,
            comment: &entry.comment,
        };

        let response = self
            .http
            .post(self.endpoint(&format!("rest/api/2/issue/{}/worklog", issue.key))?)
            .basic_auth(&self.username, Some(&self.password))
            .json(&payload)
            .send()
            .map_err(|err| TrackerError::new(err.to_string()))?;
        check_status(response).map(drop)
    }
}
