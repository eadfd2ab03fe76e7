use serde::Serialize;

use super::{Output, json};
use crate::Result;
use crate::bank::{self, AccountSummary, BankCredentials};

#[derive(Serialize)]
#[serde(transparent)]
pub struct AccountList {
    pub accounts: Vec<AccountSummary>,
}

impl Output for AccountList {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.accounts.is_empty() {
            return "No accounts found.".to_string();
        }
        let mut lines = vec![format!("Found {} account(s):", self.accounts.len())];
        for account in &self.accounts {
            let balance = account
                .balance
                .map(|b| format!("{:.2}", b))
                .unwrap_or_else(|| "n/a".to_string());
            lines.push(format!(
                "- {} ({}): {} {}",
                account.name,
                account.subtype.as_deref().unwrap_or("unknown"),
                balance,
                account.currency.as_deref().unwrap_or("")
            ));
        }
        lines.join("\n")
    }
}

/// Create a sandbox access token and fetch account balances with it.
pub fn bank_accounts() -> Result<AccountList> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "no .env loaded");
    }
    let creds = BankCredentials::from_env()?;
    let access_token = bank::create_access_token(&creds)?;
    let accounts = bank::fetch_accounts(&creds, &access_token)?;
    Ok(AccountList { accounts })
}
