//! The Fi$h remote API client.
//!
//! All requests go to a fixed base URL under `/api/v1`, authenticated with a
//! bearer token and a client ID header. The organisation is selected per call
//! through the `X-Org-Id` header; there is no ambient default.

pub mod credentials;
pub mod model;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use credentials::Credentials;
use model::{
    Account, Business, Contact, Created, Envelope, FiscalYear, NewPaymentApplication, OrgId,
    PaymentApplication, PaymentApplicationId, ReportType, Transaction, TransactionId,
    TransactionPayload,
};

use crate::error::AppError as Error;

const API_ROOT: &str = "/api/v1";

/// The slice of the remote API the posting and reconciliation workflow
/// consumes. Kept as a trait so the workflow can be exercised against an
/// in-memory fake.
#[allow(async_fn_in_trait)]
pub trait FishApi {
    async fn create_transaction(
        &self,
        org: OrgId,
        payload: &TransactionPayload,
    ) -> Result<TransactionId, Error>;

    async fn create_payment_application(
        &self,
        org: OrgId,
        application: &NewPaymentApplication,
    ) -> Result<PaymentApplicationId, Error>;

    /// Payment applications touching the given transactions. An empty slice
    /// returns every application.
    async fn payment_applications(
        &self,
        org: OrgId,
        transaction_ids: &[TransactionId],
    ) -> Result<Vec<PaymentApplication>, Error>;

    async fn transaction(&self, org: OrgId, id: TransactionId) -> Result<Transaction, Error>;
}

pub struct FishClient {
    http: reqwest::Client,
    credentials: Credentials,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl FishClient {
    pub fn new(credentials: Credentials) -> Self {
        FishClient {
            http: reqwest::Client::new(),
            credentials,
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.credentials.base_url.trim_end_matches('/'),
            API_ROOT,
            path
        )
    }

    fn auth(&self, request: RequestBuilder, org: Option<OrgId>) -> RequestBuilder {
        let request = request
            .bearer_auth(&self.credentials.api_token)
            .header("X-Client-Id", &self.credentials.client_id);

        match org {
            Some(org) => request.header("X-Org-Id", org.to_string()),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        org: Option<OrgId>,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let request = self.auth(self.http.get(self.url(path)).query(params), org);
        Self::decode(request.send().await?).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        org: OrgId,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let request = self.auth(self.http.post(self.url(path)), Some(org)).json(body);
        Self::decode(request.send().await?).await
    }

    /// Deserialize a success body, or surface the remote's error message
    /// unchanged for a non-2xx response.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => parsed.message,
            Err(_) => body,
        };

        Err(Error::RemoteRejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// Listing and report endpoints.
impl FishClient {
    pub async fn businesses(&self) -> Result<Vec<Business>, Error> {
        let envelope: Envelope<Vec<Business>> = self.get(None, "/businesses", &[]).await?;
        Ok(envelope.data)
    }

    pub async fn accounts(&self, org: OrgId) -> Result<Vec<Account>, Error> {
        let envelope: Envelope<Vec<Account>> = self.get(Some(org), "/accounts", &[]).await?;
        Ok(envelope.data)
    }

    pub async fn vendors(&self, org: OrgId) -> Result<Vec<Contact>, Error> {
        let envelope: Envelope<Vec<Contact>> = self.get(Some(org), "/vendors", &[]).await?;
        Ok(envelope.data)
    }

    pub async fn customers(&self, org: OrgId) -> Result<Vec<Contact>, Error> {
        let envelope: Envelope<Vec<Contact>> = self.get(Some(org), "/customers", &[]).await?;
        Ok(envelope.data)
    }

    pub async fn fiscal_years(&self, org: OrgId) -> Result<Vec<FiscalYear>, Error> {
        let envelope: Envelope<Vec<FiscalYear>> = self.get(Some(org), "/fiscal-years", &[]).await?;
        Ok(envelope.data)
    }

    pub async fn transactions(
        &self,
        org: OrgId,
        fiscal_year: Option<&str>,
    ) -> Result<(Vec<Transaction>, Option<u64>), Error> {
        let mut params = Vec::new();
        if let Some(fy) = fiscal_year {
            params.push(("fiscalYear", fy.to_string()));
        }

        let envelope: Envelope<Vec<Transaction>> =
            self.get(Some(org), "/transactions", &params).await?;
        Ok((envelope.data, envelope.count))
    }

    pub async fn report(
        &self,
        org: OrgId,
        report_type: ReportType,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value, Error> {
        self.get(Some(org), &format!("/reports/{}", report_type), params)
            .await
    }

    pub async fn dashboard(&self, org: OrgId) -> Result<serde_json::Value, Error> {
        self.get(Some(org), "/dashboard", &[]).await
    }
}

impl FishApi for FishClient {
    async fn create_transaction(
        &self,
        org: OrgId,
        payload: &TransactionPayload,
    ) -> Result<TransactionId, Error> {
        let envelope: Envelope<Created> = self.post(org, "/transactions", payload).await?;
        Ok(envelope.data.id)
    }

    async fn create_payment_application(
        &self,
        org: OrgId,
        application: &NewPaymentApplication,
    ) -> Result<PaymentApplicationId, Error> {
        let envelope: Envelope<Created> =
            self.post(org, "/payment-applications", application).await?;
        Ok(envelope.data.id)
    }

    async fn payment_applications(
        &self,
        org: OrgId,
        transaction_ids: &[TransactionId],
    ) -> Result<Vec<PaymentApplication>, Error> {
        let mut params = Vec::new();
        if !transaction_ids.is_empty() {
            let ids = transaction_ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            params.push(("transactionIds", ids));
        }

        let envelope: Envelope<Vec<PaymentApplication>> = self
            .get(Some(org), "/payment-applications", &params)
            .await?;
        Ok(envelope.data)
    }

    async fn transaction(&self, org: OrgId, id: TransactionId) -> Result<Transaction, Error> {
        let envelope: Envelope<Transaction> = self
            .get(Some(org), &format!("/transactions/{}", id), &[])
            .await?;
        Ok(envelope.data)
    }
}

// -- Tests ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(status: u16, body: &str) -> Response {
        http::Response::builder()
            .status(status)
            .body(body.to_string())
            .unwrap()
            .into()
    }

    #[tokio::test]
    async fn rejection_message_passes_through_unchanged() {
        let response = remote(422, r#"{"message": "Debits must equal credits"}"#);

        let err = FishClient::decode::<Envelope<Created>>(response)
            .await
            .unwrap_err();

        match err {
            Error::RemoteRejected { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "Debits must equal credits");
            }
            other => panic!("expected RemoteRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_json_rejection_body_is_kept_verbatim() {
        let response = remote(502, "upstream timed out");

        let err = FishClient::decode::<Envelope<Created>>(response)
            .await
            .unwrap_err();

        match err {
            Error::RemoteRejected { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream timed out");
            }
            other => panic!("expected RemoteRejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn success_body_decodes_through_the_envelope() {
        let response = remote(201, r#"{"data": {"id": 77}}"#);

        let envelope: Envelope<Created> = FishClient::decode(response).await.unwrap();
        assert_eq!(envelope.data.id, 77);
    }
}
