//! Gateway functions over the bookkeeping REST API. One group per resource;
//! every authenticated call derives its bearer header from a token that the
//! caller passes in (no ambient cookie reads at this layer).

use gloo_net::http::{Request, Response};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::{
    Announcement, Client, DashboardStats, ProofOfTransaction, Service, ServiceForm, TaxForm,
    TransactProgress, Transaction, TransactionStatus,
};

pub const API_BASE_URL: &str = "http://localhost:8000";

/// Builds the Authorization header value, or fails fast before any network
/// activity when no token is available.
pub fn bearer(token: Option<&str>) -> Result<String, ApiError> {
    match token {
        Some(t) if !t.trim().is_empty() => Ok(format!("Bearer {}", t)),
        _ => Err(ApiError::NotAuthenticated),
    }
}

async fn into_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    if !resp.ok() {
        let status = resp.status();
        let message = resp.text().await.unwrap_or_default();
        return Err(ApiError::Http { status, message });
    }
    Ok(resp.json::<T>().await?)
}

async fn ensure_ok(resp: Response) -> Result<(), ApiError> {
    if !resp.ok() {
        let status = resp.status();
        let message = resp.text().await.unwrap_or_default();
        return Err(ApiError::Http { status, message });
    }
    Ok(())
}

// ---- auth ----

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub async fn login(email: &str, password: &str) -> Result<String, ApiError> {
    let resp = Request::post(&format!("{}/api/login", API_BASE_URL))
        .json(&serde_json::json!({ "email": email, "password": password }))?
        .send()
        .await?;

    if !resp.ok() {
        let status = resp.status();
        let message = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| "Login failed. Please check your credentials.".to_string());
        return Err(ApiError::Http { status, message });
    }

    let body: LoginResponse = resp.json().await?;
    Ok(body.token)
}

// ---- clients ----

pub async fn fetch_clients(token: Option<&str>) -> Result<Vec<Client>, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::get(&format!("{}/api/clients", API_BASE_URL))
        .header("Authorization", &auth)
        .send()
        .await?;
    into_json(resp).await
}

pub async fn get_client(token: Option<&str>, id: i32) -> Result<Client, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::get(&format!("{}/api/clients/{}", API_BASE_URL, id))
        .header("Authorization", &auth)
        .send()
        .await?;
    into_json(resp).await
}

pub async fn add_client(token: Option<&str>, client: &Client) -> Result<Client, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::post(&format!("{}/api/clients", API_BASE_URL))
        .header("Authorization", &auth)
        .json(client)?
        .send()
        .await?;
    into_json(resp).await
}

pub async fn update_client(token: Option<&str>, client: &Client) -> Result<Client, ApiError> {
    let auth = bearer(token)?;
    let id = client.id.ok_or_else(|| ApiError::Decode("client has no id".to_string()))?;
    let resp = Request::put(&format!("{}/api/clients/{}", API_BASE_URL, id))
        .header("Authorization", &auth)
        .json(client)?
        .send()
        .await?;
    into_json(resp).await
}

pub async fn delete_client(token: Option<&str>, id: i32) -> Result<i32, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::delete(&format!("{}/api/clients/{}", API_BASE_URL, id))
        .header("Authorization", &auth)
        .send()
        .await?;
    ensure_ok(resp).await?;
    Ok(id)
}

// ---- services ----

#[derive(Clone, PartialEq, Serialize, Default)]
pub struct NewService {
    pub service: String,
    pub forms: Vec<ServiceForm>,
}

pub async fn fetch_services(token: Option<&str>) -> Result<Vec<Service>, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::get(&format!("{}/api/services", API_BASE_URL))
        .header("Authorization", &auth)
        .send()
        .await?;
    into_json(resp).await
}

/// Public catalog read for the marketing site; no token attached.
pub async fn fetch_services_public() -> Result<Vec<Service>, ApiError> {
    let resp = Request::get(&format!("{}/api/services", API_BASE_URL))
        .send()
        .await?;
    into_json(resp).await
}

pub async fn add_service(token: Option<&str>, service: &NewService) -> Result<Service, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::post(&format!("{}/api/services", API_BASE_URL))
        .header("Authorization", &auth)
        .json(service)?
        .send()
        .await?;
    into_json(resp).await
}

pub async fn update_service_name(
    token: Option<&str>,
    id: i32,
    name: &str,
) -> Result<Service, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::put(&format!("{}/api/services/{}", API_BASE_URL, id))
        .header("Authorization", &auth)
        .json(&serde_json::json!({ "service": name }))?
        .send()
        .await?;
    into_json(resp).await
}

pub async fn delete_service(token: Option<&str>, id: i32) -> Result<i32, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::delete(&format!("{}/api/services/{}", API_BASE_URL, id))
        .header("Authorization", &auth)
        .send()
        .await?;
    ensure_ok(resp).await?;
    Ok(id)
}

/// Removes a single uploaded form from a service by its position.
pub async fn delete_form(
    token: Option<&str>,
    service_id: i32,
    form_index: usize,
) -> Result<(), ApiError> {
    let auth = bearer(token)?;
    let resp = Request::delete(&format!(
        "{}/api/services/{}/forms/{}",
        API_BASE_URL, service_id, form_index
    ))
    .header("Authorization", &auth)
    .send()
    .await?;
    ensure_ok(resp).await
}

// ---- transactions ----

#[derive(Clone, PartialEq, Debug, Default)]
pub struct TransactionFilter {
    pub name: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

pub fn filter_query(filter: &TransactionFilter) -> String {
    let mut params = Vec::new();
    let mut push = |key: &str, value: &Option<String>| {
        if let Some(v) = value {
            if !v.is_empty() {
                params.push(format!(
                    "{}={}",
                    key,
                    utf8_percent_encode(v, NON_ALPHANUMERIC)
                ));
            }
        }
    };
    push("name", &filter.name);
    push("dateFrom", &filter.date_from);
    push("dateTo", &filter.date_to);
    params.join("&")
}

pub async fn fetch_transactions(token: Option<&str>) -> Result<Vec<Transaction>, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::get(&format!("{}/api/transactions", API_BASE_URL))
        .header("Authorization", &auth)
        .send()
        .await?;
    into_json(resp).await
}

pub async fn get_transaction(token: Option<&str>, id: i32) -> Result<Transaction, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::get(&format!("{}/api/transactions/{}", API_BASE_URL, id))
        .header("Authorization", &auth)
        .send()
        .await?;
    into_json(resp).await
}

/// Intentionally public: the appointment form on the marketing site submits
/// transactions without a session.
pub async fn add_transaction(transaction: &Transaction) -> Result<Transaction, ApiError> {
    let resp = Request::post(&format!("{}/api/transactions", API_BASE_URL))
        .json(transaction)?
        .send()
        .await?;
    into_json(resp).await
}

pub async fn delete_transaction(token: Option<&str>, id: i32) -> Result<i32, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::delete(&format!("{}/api/transactions/{}", API_BASE_URL, id))
        .header("Authorization", &auth)
        .send()
        .await?;
    ensure_ok(resp).await?;
    Ok(id)
}

pub async fn update_status(
    token: Option<&str>,
    id: i32,
    status: TransactionStatus,
) -> Result<Transaction, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::put(&format!(
        "{}/api/transactions/updateStatus/{}",
        API_BASE_URL, id
    ))
    .header("Authorization", &auth)
    .json(&serde_json::json!({ "status": status }))?
    .send()
    .await?;
    into_json(resp).await
}

pub async fn update_transact(
    token: Option<&str>,
    id: i32,
    transact: TransactProgress,
) -> Result<Transaction, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::put(&format!(
        "{}/api/transactions/updateTransact/{}",
        API_BASE_URL, id
    ))
    .header("Authorization", &auth)
    .json(&serde_json::json!({ "transact": transact }))?
    .send()
    .await?;
    into_json(resp).await
}

pub async fn filter_transactions(
    token: Option<&str>,
    filter: &TransactionFilter,
) -> Result<Vec<Transaction>, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::get(&format!(
        "{}/api/transactions/filter?{}",
        API_BASE_URL,
        filter_query(filter)
    ))
    .header("Authorization", &auth)
    .send()
    .await?;
    into_json(resp).await
}

// ---- tax calendar ----

pub async fn fetch_tax_forms(token: Option<&str>) -> Result<Vec<TaxForm>, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::get(&format!("{}/api/taxcalendar", API_BASE_URL))
        .header("Authorization", &auth)
        .send()
        .await?;
    into_json(resp).await
}

pub async fn add_tax_form(token: Option<&str>, form: &TaxForm) -> Result<TaxForm, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::post(&format!("{}/api/taxcalendar", API_BASE_URL))
        .header("Authorization", &auth)
        .json(&serde_json::json!({
            "form_no": form.form_no,
            "due_date": form.due_date,
            "frequency": form.frequency,
        }))?
        .send()
        .await?;
    into_json(resp).await
}

pub async fn update_tax_form(token: Option<&str>, form: &TaxForm) -> Result<TaxForm, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::put(&format!("{}/api/taxcalendar/{}", API_BASE_URL, form.id))
        .header("Authorization", &auth)
        .json(form)?
        .send()
        .await?;
    into_json(resp).await
}

pub async fn delete_tax_form(token: Option<&str>, id: i32) -> Result<i32, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::delete(&format!("{}/api/taxcalendar/{}", API_BASE_URL, id))
        .header("Authorization", &auth)
        .send()
        .await?;
    ensure_ok(resp).await?;
    Ok(id)
}

// ---- announcements ----

/// Public read; the landing page shows announcements without a session.
pub async fn fetch_announcements() -> Result<Vec<Announcement>, ApiError> {
    let resp = Request::get(&format!("{}/api/announcements", API_BASE_URL))
        .send()
        .await?;
    into_json(resp).await
}

pub async fn add_announcement(
    token: Option<&str>,
    announcement: &Announcement,
) -> Result<Announcement, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::post(&format!("{}/api/announcements", API_BASE_URL))
        .header("Authorization", &auth)
        .json(&serde_json::json!({
            "title": announcement.title,
            "description": announcement.description,
            "date": announcement.date,
        }))?
        .send()
        .await?;
    into_json(resp).await
}

pub async fn update_announcement(
    token: Option<&str>,
    announcement: &Announcement,
) -> Result<Announcement, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::put(&format!(
        "{}/api/announcements/{}",
        API_BASE_URL, announcement.id
    ))
    .header("Authorization", &auth)
    .json(announcement)?
    .send()
    .await?;
    into_json(resp).await
}

pub async fn delete_announcement(token: Option<&str>, id: i32) -> Result<i32, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::delete(&format!("{}/api/announcements/{}", API_BASE_URL, id))
        .header("Authorization", &auth)
        .send()
        .await?;
    ensure_ok(resp).await?;
    Ok(id)
}

// ---- proof of transactions ----

/// Public read; the gallery on the marketing site has no session.
pub async fn fetch_proofs() -> Result<Vec<ProofOfTransaction>, ApiError> {
    let resp = Request::get(&format!("{}/api/proofoftransactions", API_BASE_URL))
        .send()
        .await?;
    into_json(resp).await
}

pub async fn add_proof(
    token: Option<&str>,
    proof: &ProofOfTransaction,
) -> Result<ProofOfTransaction, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::post(&format!("{}/api/proofoftransactions", API_BASE_URL))
        .header("Authorization", &auth)
        .json(&serde_json::json!({
            "title": proof.title,
            "description": proof.description,
            "type": proof.kind,
            "content": proof.content,
        }))?
        .send()
        .await?;
    into_json(resp).await
}

pub async fn update_proof(
    token: Option<&str>,
    proof: &ProofOfTransaction,
) -> Result<ProofOfTransaction, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::put(&format!(
        "{}/api/proofoftransactions/{}",
        API_BASE_URL, proof.id
    ))
    .header("Authorization", &auth)
    .json(proof)?
    .send()
    .await?;
    into_json(resp).await
}

pub async fn delete_proof(token: Option<&str>, id: i32) -> Result<i32, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::delete(&format!("{}/api/proofoftransactions/{}", API_BASE_URL, id))
        .header("Authorization", &auth)
        .send()
        .await?;
    ensure_ok(resp).await?;
    Ok(id)
}

// ---- dashboard ----

pub async fn fetch_dashboard(token: Option<&str>) -> Result<DashboardStats, ApiError> {
    let auth = bearer(token)?;
    let resp = Request::get(&format!("{}/api/dashboard", API_BASE_URL))
        .header("Authorization", &auth)
        .send()
        .await?;
    into_json(resp).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_fails_fast_without_token() {
        assert_eq!(bearer(None), Err(ApiError::NotAuthenticated));
        assert_eq!(bearer(Some("")), Err(ApiError::NotAuthenticated));
        assert_eq!(bearer(Some("  ")), Err(ApiError::NotAuthenticated));
        assert_eq!(bearer(Some("abc")), Ok("Bearer abc".to_string()));
    }

    #[test]
    fn test_filter_query_skips_empty_fields() {
        let filter = TransactionFilter {
            name: Some("Juan Dela Cruz".to_string()),
            date_from: Some("2025-01-01".to_string()),
            date_to: None,
        };
        assert_eq!(
            filter_query(&filter),
            "name=Juan%20Dela%20Cruz&dateFrom=2025%2D01%2D01"
        );
        assert_eq!(filter_query(&TransactionFilter::default()), "");
    }
}
