//! Plaid API interactions for account balances.
//!
//! The fetch runs three calls against a Plaid environment (sandbox by default):
//! - `POST /sandbox/public_token/create`: mint a public token for a test institution
//! - `POST /item/public_token/exchange`: exchange it for an access token
//! - `POST /accounts/get`: list accounts and balances for that access token
//!
//! The access token is returned to the caller and never kept in global state.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{Error, Result};

/// Default Plaid environment
pub const DEFAULT_ENV_URL: &str = "https://sandbox.plaid.com";

/// API version pinned for every request
const PLAID_VERSION: &str = "2020-09-14";

/// Product requested when `PLAID_PRODUCTS` is unset
const DEFAULT_PRODUCT: &str = "transactions";

/// Credentials and target for the Plaid API.
#[derive(Debug, Clone)]
pub struct BankCredentials {
    pub client_id: String,
    pub secret: String,
    pub institution_id: String,
    pub products: Vec<String>,
    pub base_url: String,
}

impl BankCredentials {
    /// Read credentials from `PLAID_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through `lookup`, treating blank values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &str| {
            get(name).ok_or_else(|| Error::Config(format!("{} is not set", name)))
        };

        let products = get("PLAID_PRODUCTS")
            .map(|raw| crate::storage::split_list(&raw))
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_PRODUCT.to_string()]);

        Ok(Self {
            client_id: require("PLAID_CLIENT_ID")?,
            secret: require("PLAID_SECRET")?,
            institution_id: require("PLAID_INSTITUTION_ID")?,
            products,
            base_url: get("PLAID_ENV_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_ENV_URL.to_string()),
        })
    }
}

/// One account with its preferred balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSummary {
    pub name: String,
    pub subtype: Option<String>,
    /// Available balance, falling back to the current balance
    pub balance: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PublicTokenResponse {
    public_token: String,
}

#[derive(Debug, Deserialize)]
struct ExchangeResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct AccountsResponse {
    accounts: Vec<Account>,
}

#[derive(Debug, Deserialize)]
struct Account {
    name: String,
    subtype: Option<String>,
    balances: Balances,
}

#[derive(Debug, Deserialize)]
struct Balances {
    available: Option<f64>,
    current: Option<f64>,
    iso_currency_code: Option<String>,
}

/// Error body returned by Plaid on non-2xx responses (only fields we care about).
#[derive(Debug, Deserialize)]
struct PlaidError {
    error_code: String,
    error_message: String,
}

impl From<Account> for AccountSummary {
    fn from(account: Account) -> Self {
        Self {
            name: account.name,
            subtype: account.subtype,
            balance: account.balances.available.or(account.balances.current),
            currency: account.balances.iso_currency_code,
        }
    }
}

/// POST a JSON body and decode the JSON response.
fn post<T: serde::de::DeserializeOwned>(
    creds: &BankCredentials,
    path: &str,
    body: serde_json::Value,
) -> Result<T> {
    let url = format!("{}{}", creds.base_url, path);
    tracing::debug!(%url, "plaid request");

    let response = ureq::post(&url)
        .set("Plaid-Version", PLAID_VERSION)
        .send_json(body);

    match response {
        Ok(resp) => resp
            .into_json()
            .map_err(|e| Error::Http(format!("Failed to parse response from {}: {}", path, e))),
        Err(ureq::Error::Status(code, resp)) => {
            let body = resp.into_string().unwrap_or_default();
            Err(Error::Http(describe_status(code, &body)))
        }
        Err(e) => Err(Error::Http(e.to_string())),
    }
}

fn describe_status(code: u16, body: &str) -> String {
    match serde_json::from_str::<PlaidError>(body) {
        Ok(err) => format!("HTTP {}: {} ({})", code, err.error_message, err.error_code),
        Err(_) => format!("HTTP {}: {}", code, body),
    }
}

/// Create a sandbox item and return its access token.
pub fn create_access_token(creds: &BankCredentials) -> Result<String> {
    let public: PublicTokenResponse = post(
        creds,
        "/sandbox/public_token/create",
        json!({
            "client_id": creds.client_id,
            "secret": creds.secret,
            "institution_id": creds.institution_id,
            "initial_products": creds.products,
        }),
    )?;

    let exchanged: ExchangeResponse = post(
        creds,
        "/item/public_token/exchange",
        json!({
            "client_id": creds.client_id,
            "secret": creds.secret,
            "public_token": public.public_token,
        }),
    )?;

    tracing::debug!("access token created");
    Ok(exchanged.access_token)
}

/// Fetch accounts and balances for an access token.
pub fn fetch_accounts(creds: &BankCredentials, access_token: &str) -> Result<Vec<AccountSummary>> {
    let response: AccountsResponse = post(
        creds,
        "/accounts/get",
        json!({
            "client_id": creds.client_id,
            "secret": creds.secret,
            "access_token": access_token,
        }),
    )?;

    tracing::debug!(accounts = response.accounts.len(), "accounts fetched");
    Ok(response.accounts.into_iter().map(AccountSummary::from).collect())
}
