//! HTTP client for the Clarity backend. Every call goes through [`request`],
//! which attaches the stored bearer token and survives exactly one token
//! expiry: on a 401 it exchanges the refresh token for a new access token and
//! re-issues the original request once. A 401 on the retried request is
//! final. Simultaneous failing requests refresh independently; there is no
//! single-flight dedup of refresh calls.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde_json::Value;

use crate::session;

pub const API_BASE_URL: &str = "http://localhost:8000/api";

#[derive(Clone, PartialEq, Debug)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    Network(String),
    /// Non-success HTTP response, with the parsed JSON body if any.
    Status { status: u16, body: Value },
}

impl ApiError {
    /// Message for the screen that triggered the call: the first field-error
    /// message the backend reported, otherwise the screen's fallback text.
    pub fn message(&self, fallback: &str) -> String {
        match self {
            ApiError::Network(_) => fallback.to_string(),
            ApiError::Status { status, body } => first_field_error(body).unwrap_or_else(|| {
                log::debug!("HTTP {} carried no field errors", status);
                fallback.to_string()
            }),
        }
    }
}

// Field precedence mirrors the forms: the offending input's message wins.
const ERROR_FIELDS: [&str; 8] = [
    "name",
    "category",
    "amount",
    "date",
    "description",
    "email",
    "password",
    "detail",
];

fn first_field_error(body: &Value) -> Option<String> {
    let map = body.as_object()?;
    for field in ERROR_FIELDS {
        if let Some(message) = map.get(field).and_then(error_text) {
            return Some(message);
        }
    }
    map.get("non_field_errors").and_then(error_text)
}

fn error_text(entry: &Value) -> Option<String> {
    match entry {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(|v| v.as_str().map(str::to_string)),
        _ => None,
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

fn builder(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    }
}

async fn dispatch(
    method: Method,
    url: &str,
    body: Option<&Value>,
    params: &[(&str, String)],
    token: Option<&str>,
) -> Result<Response, ApiError> {
    let mut req = builder(method, url);
    if !params.is_empty() {
        req = req.query(params.iter().map(|(key, value)| (*key, value.as_str())));
    }
    if let Some(token) = token {
        req = req.header("Authorization", &format!("Bearer {}", token));
    }
    let sent = match body {
        Some(json) => req
            .json(json)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await,
        None => req.send().await,
    };
    sent.map_err(|e| ApiError::Network(e.to_string()))
}

async fn status_error(resp: Response) -> ApiError {
    let status = resp.status();
    let body = resp.json::<Value>().await.unwrap_or(Value::Null);
    ApiError::Status { status, body }
}

async fn check(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        Ok(resp)
    } else {
        Err(status_error(resp).await)
    }
}

/// Decision core of the 401 recovery in [`request`]: at most one refresh and
/// one retried send per request, everything after that is final.
#[derive(Debug, Default)]
struct AuthFlow {
    retried: bool,
}

#[derive(Debug, PartialEq)]
enum AuthStep {
    /// Hand the response to the caller as-is.
    Settle,
    /// Exchange this refresh token, then re-issue the request.
    Refresh(String),
    /// Unrecoverable 401; the error stands and the store is left alone.
    GiveUp,
}

impl AuthFlow {
    fn on_status(&mut self, status: u16, refresh_token: Option<String>) -> AuthStep {
        if status != 401 {
            return AuthStep::Settle;
        }
        if self.retried {
            // The retried request came back 401 as well; no second refresh.
            return AuthStep::GiveUp;
        }
        match refresh_token {
            Some(token) => {
                self.retried = true;
                AuthStep::Refresh(token)
            }
            None => AuthStep::GiveUp,
        }
    }
}

/// One authenticated request, with at most one refresh-and-retry on 401.
pub async fn request(
    method: Method,
    path: &str,
    body: Option<Value>,
    params: &[(&str, String)],
) -> Result<Response, ApiError> {
    let url = format!("{}{}", API_BASE_URL, path);
    let mut flow = AuthFlow::default();
    let mut token = session::access_token();

    loop {
        let resp = dispatch(method, &url, body.as_ref(), params, token.as_deref()).await?;
        match flow.on_status(resp.status(), session::refresh_token()) {
            AuthStep::Settle | AuthStep::GiveUp => return check(resp).await,
            AuthStep::Refresh(refresh) => {
                // Kept aside so a failed refresh reports the 401 that
                // triggered it, not the refresh call's own error.
                let original = status_error(resp).await;
                match refresh_access(&refresh).await {
                    Ok(access) => {
                        session::store_access(&access);
                        token = Some(access);
                    }
                    Err(_) => {
                        log::warn!("token refresh failed, clearing session");
                        session::clear();
                        redirect_to_login();
                        return Err(original);
                    }
                }
            }
        }
    }
}

async fn refresh_access(refresh: &str) -> Result<String, ApiError> {
    let url = format!("{}/token/refresh/", API_BASE_URL);
    let resp = Request::post(&url)
        .json(&serde_json::json!({ "refresh": refresh }))
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !resp.ok() {
        return Err(status_error(resp).await);
    }
    let token: crate::models::AccessToken = resp
        .json()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    Ok(token.access)
}

fn redirect_to_login() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href("/login");
    }
}

async fn into_json<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))
}

pub mod auth {
    use super::*;
    use crate::models::TokenPair;

    pub async fn login(username: &str, password: &str) -> Result<TokenPair, ApiError> {
        let body = serde_json::json!({ "username": username, "password": password });
        let resp = request(Method::Post, "/token/", Some(body), &[]).await?;
        into_json(resp).await
    }

    pub async fn register(email: &str, password: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        request(Method::Post, "/user/register/", Some(body), &[]).await?;
        Ok(())
    }
}

pub mod categories {
    use super::*;
    use crate::models::{Category, TxKind};

    pub async fn list() -> Result<Vec<Category>, ApiError> {
        let resp = request(Method::Get, "/categories/", None, &[]).await?;
        into_json(resp).await
    }

    pub async fn create(name: &str, kind: TxKind) -> Result<Category, ApiError> {
        let body = serde_json::json!({ "name": name, "category_type": kind.as_str() });
        let resp = request(Method::Post, "/categories/", Some(body), &[]).await?;
        into_json(resp).await
    }

    pub async fn delete(id: i64) -> Result<(), ApiError> {
        request(Method::Delete, &format!("/categories/{}/", id), None, &[]).await?;
        Ok(())
    }
}

/// Incomes and expenses share one shape; only the resource path differs.
mod records {
    use super::*;
    use crate::models::{Transaction, TransactionPayload};

    pub async fn create(base: &str, payload: &TransactionPayload) -> Result<Transaction, ApiError> {
        let body = serde_json::to_value(payload).map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = request(Method::Post, &format!("{}/", base), Some(body), &[]).await?;
        into_json(resp).await
    }

    pub async fn update(
        base: &str,
        id: i64,
        payload: &TransactionPayload,
    ) -> Result<Transaction, ApiError> {
        let body = serde_json::to_value(payload).map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = request(Method::Put, &format!("{}/{}/", base, id), Some(body), &[]).await?;
        into_json(resp).await
    }

    pub async fn delete(base: &str, id: i64) -> Result<(), ApiError> {
        request(Method::Delete, &format!("{}/{}/", base, id), None, &[]).await?;
        Ok(())
    }
}

pub mod incomes {
    use super::*;
    use crate::models::{Transaction, TransactionPayload};

    pub async fn create(payload: &TransactionPayload) -> Result<Transaction, ApiError> {
        records::create("/incomes", payload).await
    }

    pub async fn update(id: i64, payload: &TransactionPayload) -> Result<Transaction, ApiError> {
        records::update("/incomes", id, payload).await
    }

    pub async fn delete(id: i64) -> Result<(), ApiError> {
        records::delete("/incomes", id).await
    }
}

pub mod expenses {
    use super::*;
    use crate::models::{Transaction, TransactionPayload};

    pub async fn create(payload: &TransactionPayload) -> Result<Transaction, ApiError> {
        records::create("/expenses", payload).await
    }

    pub async fn update(id: i64, payload: &TransactionPayload) -> Result<Transaction, ApiError> {
        records::update("/expenses", id, payload).await
    }

    pub async fn delete(id: i64) -> Result<(), ApiError> {
        records::delete("/expenses", id).await
    }
}

pub mod transactions {
    use super::*;
    use crate::models::{Transaction, TransactionFilter};

    /// Merged income/expense view, date-descending, filterable by category
    /// name, type and date range.
    pub async fn list(filter: &TransactionFilter) -> Result<Vec<Transaction>, ApiError> {
        let resp = request(Method::Get, "/transactions/", None, &filter.to_query()).await?;
        into_json(resp).await
    }
}

pub mod dashboard {
    use super::*;
    use crate::models::DashboardData;

    /// Aggregate for the given period; the backend defaults to the current
    /// month when no dates are passed.
    pub async fn get(start_date: &str, end_date: &str) -> Result<DashboardData, ApiError> {
        let mut params = Vec::new();
        if !start_date.is_empty() {
            params.push(("start_date", start_date.to_string()));
        }
        if !end_date.is_empty() {
            params.push(("end_date", end_date.to_string()));
        }
        let resp = request(Method::Get, "/dashboard/", None, &params).await?;
        into_json(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expired_token_refreshes_exactly_once() {
        let mut flow = AuthFlow::default();
        assert_eq!(
            flow.on_status(401, Some("r1".into())),
            AuthStep::Refresh("r1".into())
        );
        // The retried request coming back 401 is final.
        assert_eq!(flow.on_status(401, Some("r1".into())), AuthStep::GiveUp);
    }

    #[test]
    fn successful_retry_settles() {
        let mut flow = AuthFlow::default();
        assert!(matches!(
            flow.on_status(401, Some("r1".into())),
            AuthStep::Refresh(_)
        ));
        assert_eq!(flow.on_status(200, Some("r1".into())), AuthStep::Settle);
    }

    #[test]
    fn missing_refresh_token_gives_up_immediately() {
        let mut flow = AuthFlow::default();
        assert_eq!(flow.on_status(401, None), AuthStep::GiveUp);
    }

    #[test]
    fn other_statuses_pass_through_unrecovered() {
        let mut flow = AuthFlow::default();
        assert_eq!(flow.on_status(200, Some("r1".into())), AuthStep::Settle);
        assert_eq!(flow.on_status(400, Some("r1".into())), AuthStep::Settle);
        assert_eq!(flow.on_status(500, Some("r1".into())), AuthStep::Settle);
    }

    #[test]
    fn field_error_wins_over_fallback() {
        let err = ApiError::Status {
            status: 400,
            body: json!({ "name": ["A category with this name already exists."] }),
        };
        assert_eq!(
            err.message("Failed to create category"),
            "A category with this name already exists."
        );
    }

    #[test]
    fn first_field_in_precedence_order_wins() {
        let body = json!({
            "amount": ["Ensure this value is greater than or equal to 0.01."],
            "category": ["Category 'Fod' not found for expense"]
        });
        assert_eq!(
            first_field_error(&body).as_deref(),
            Some("Category 'Fod' not found for expense")
        );
    }

    #[test]
    fn detail_message_is_surfaced() {
        let body = json!({ "detail": "No active account found with the given credentials" });
        assert_eq!(
            first_field_error(&body).as_deref(),
            Some("No active account found with the given credentials")
        );
    }

    #[test]
    fn plain_string_entries_are_accepted() {
        let body = json!({ "email": "A user with this email already exists." });
        assert_eq!(
            first_field_error(&body).as_deref(),
            Some("A user with this email already exists.")
        );
    }

    #[test]
    fn non_field_errors_are_the_last_resort() {
        let body = json!({ "non_field_errors": ["Something else went wrong"] });
        assert_eq!(
            first_field_error(&body).as_deref(),
            Some("Something else went wrong")
        );
    }

    #[test]
    fn unparseable_bodies_fall_back() {
        let err = ApiError::Status {
            status: 500,
            body: Value::Null,
        };
        assert_eq!(err.message("Failed to load dashboard"), "Failed to load dashboard");

        let err = ApiError::Network("fetch failed".into());
        assert_eq!(err.message("Failed to load dashboard"), "Failed to load dashboard");
    }
}
