//! Ledgerbook HTTP client implementation.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use ledgerbook_core::{Bank, File, User};

use crate::error::ClientError;
use crate::types::{
    ApiErrorResponse, HealthResponse, InvokeRequest, NewTransaction, TransactionReceipt,
};

/// Ledgerbook API client.
///
/// Operations that change records go through `/v1/submit`; existence checks
/// go through `/v1/evaluate`; single-record and list reads use the record
/// routes.
#[derive(Debug, Clone)]
pub struct LedgerClient {
    client: Client,
    base_url: Url,
}

impl LedgerClient {
    /// Create a new ledgerbook client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the ledgerbook service (e.g., `"http://ledgerbook:8080"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new ledgerbook client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn with_options(base_url: &str, options: ClientOptions) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()?;

        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ClientError::Configuration(format!("invalid base URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Configuration(format!(
                "base URL cannot carry a path: {base_url}"
            )));
        }

        Ok(Self { client, base_url })
    }

    /// Check service health.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self.client.get(self.url(&["health"])?).send().await?;
        let body = Self::handle_response(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // =========================================================================
    // Invocations
    // =========================================================================

    /// Run a named operation and commit its writes. Returns the raw payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn submit(&self, function: &str, args: &[String]) -> Result<Vec<u8>, ClientError> {
        self.invoke("submit", function, args).await
    }

    /// Run a named operation without committing. Returns the raw payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn evaluate(&self, function: &str, args: &[String]) -> Result<Vec<u8>, ClientError> {
        self.invoke("evaluate", function, args).await
    }

    async fn invoke(
        &self,
        mode: &str,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, ClientError> {
        tracing::debug!(mode, function, args = args.len(), "Invoking");

        let response = self
            .client
            .post(self.url(&["v1", mode])?)
            .json(&InvokeRequest { function, args })
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn submit_json<T: DeserializeOwned>(
        &self,
        function: &str,
        args: &[String],
    ) -> Result<T, ClientError> {
        let payload = self.submit(function, args).await?;
        Ok(serde_json::from_slice(&payload)?)
    }

    async fn evaluate_json<T: DeserializeOwned>(
        &self,
        function: &str,
        args: &[String],
    ) -> Result<T, ClientError> {
        let payload = self.evaluate(function, args).await?;
        Ok(serde_json::from_slice(&payload)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let response = self.client.get(self.url(segments)?).send().await?;
        let body = Self::handle_response(response).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // =========================================================================
    // Ledger
    // =========================================================================

    /// Seed the fixed banks that are not yet present.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn init_ledger(&self) -> Result<(), ClientError> {
        self.submit("InitLedger", &[]).await.map(drop)
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Whether a user exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn user_exists(&self, id: &str) -> Result<bool, ClientError> {
        self.evaluate_json("UserExists", &[id.to_string()]).await
    }

    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::AlreadyExists` if the id is taken.
    pub async fn create_user(&self, id: &str, name: &str, email: &str) -> Result<User, ClientError> {
        self.submit_json("CreateUser", &[id.into(), name.into(), email.into()])
            .await
    }

    /// Get a user.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the user does not exist.
    pub async fn get_user(&self, id: &str) -> Result<User, ClientError> {
        self.get_json(&["v1", "users", id]).await
    }

    /// Replace a user's name and email.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the user does not exist.
    pub async fn update_user(&self, id: &str, name: &str, email: &str) -> Result<User, ClientError> {
        self.submit_json("UpdateUser", &[id.into(), name.into(), email.into()])
            .await
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the user does not exist.
    pub async fn delete_user(&self, id: &str) -> Result<(), ClientError> {
        self.submit("DeleteUser", &[id.to_string()]).await.map(drop)
    }

    /// List every user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_all_users(&self) -> Result<Vec<User>, ClientError> {
        self.get_json(&["v1", "users"]).await
    }

    // =========================================================================
    // Banks
    // =========================================================================

    /// Whether a bank exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn bank_exists(&self, id: &str) -> Result<bool, ClientError> {
        self.evaluate_json("BankExists", &[id.to_string()]).await
    }

    /// Create a bank.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::AlreadyExists` if the id is taken.
    pub async fn create_bank(&self, id: &str, name: &str) -> Result<Bank, ClientError> {
        self.submit_json("CreateBank", &[id.into(), name.into()]).await
    }

    /// Get a bank.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the bank does not exist.
    pub async fn get_bank(&self, id: &str) -> Result<Bank, ClientError> {
        self.get_json(&["v1", "banks", id]).await
    }

    /// List every bank.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_all_banks(&self) -> Result<Vec<Bank>, ClientError> {
        self.get_json(&["v1", "banks"]).await
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Record a transaction.
    ///
    /// Not idempotent: retrying after an ambiguous failure may record twice.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the user does not exist.
    pub async fn create_transaction(
        &self,
        transaction: NewTransaction,
    ) -> Result<TransactionReceipt, ClientError> {
        self.submit_json("CreateTransaction", &transaction.into_args())
            .await
    }

    /// Get the user owning a transaction.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the hash is not indexed or its user is gone.
    pub async fn get_user_by_transaction_hash(&self, hash: &str) -> Result<User, ClientError> {
        self.get_json(&["v1", "transactions", hash, "user"]).await
    }

    // =========================================================================
    // Files
    // =========================================================================

    /// Whether a file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn file_exists(&self, id: &str) -> Result<bool, ClientError> {
        self.evaluate_json("FileExists", &[id.to_string()]).await
    }

    /// Register a file.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::AlreadyExists` if the id is taken.
    pub async fn create_file(
        &self,
        id: &str,
        file_name: &str,
        hash: &str,
        time: &str,
    ) -> Result<File, ClientError> {
        self.submit_json(
            "CreateFile",
            &[id.into(), file_name.into(), hash.into(), time.into()],
        )
        .await
    }

    /// Get a file.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the file does not exist.
    pub async fn get_file(&self, id: &str) -> Result<File, ClientError> {
        self.get_json(&["v1", "files", id]).await
    }

    /// List every file.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn get_all_files(&self) -> Result<Vec<File>, ClientError> {
        self.get_json(&["v1", "files"]).await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    /// Build a URL under the base, percent-encoding each segment.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::Configuration("base URL cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Handle API response and convert errors.
    async fn handle_response(response: reqwest::Response) -> Result<Vec<u8>, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.bytes().await?.to_vec());
        }

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let detail = |field: &str| {
                    api_error
                        .error
                        .details
                        .as_ref()
                        .and_then(|d| d.get(field))
                        .and_then(serde_json::Value::as_str)
                        .unwrap_or_default()
                        .to_string()
                };

                // Map specific error codes to typed errors
                match api_error.error.code.as_str() {
                    "not_found" => Err(ClientError::NotFound {
                        entity: detail("entity"),
                        id: detail("id"),
                    }),
                    "already_exists" => Err(ClientError::AlreadyExists {
                        entity: detail("entity"),
                        id: detail("id"),
                    }),
                    code => Err(ClientError::Api {
                        code: code.to_string(),
                        message: api_error.error.message.clone(),
                        status: status.as_u16(),
                    }),
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

impl ClientOptions {
    /// Create options with a request timeout.
    #[must_use]
    pub fn with_timeout(timeout_seconds: u64) -> Self {
        Self { timeout_seconds }
    }
}
