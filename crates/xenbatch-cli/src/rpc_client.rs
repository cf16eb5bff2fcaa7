use alloy_sol_types::SolCall;
use anyhow::{bail, Context};

use xenbatch_core::types::{Address, Balance, U256};
use xenbatch_plan::contracts::{createCountCall, minDonateCall, userMintsCall};
use xenbatch_plan::UserMint;

/// Read-only JSON-RPC client for the factory and mint contracts.
///
/// Every read is a plain `eth_call` against the latest block; the plan
/// builder only ever sees the decoded values.
pub struct ChainReader {
    url: String,
    client: reqwest::Client,
}

impl ChainReader {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Call a JSON-RPC method and return the `result` field.
    async fn call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> anyhow::Result<serde_json::Value> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("connecting to node at {}", self.url))?;

        let json: serde_json::Value = resp.json().await.context("parsing RPC response")?;

        if let Some(err) = json.get("error") {
            bail!("RPC error: {}", err);
        }

        Ok(json["result"].clone())
    }

    /// `eth_call` returning the raw return data.
    async fn eth_call<C: SolCall>(&self, to: &Address, call: &C) -> anyhow::Result<Vec<u8>> {
        let result = self
            .call(
                "eth_call",
                serde_json::json!([
                    { "to": to.to_string(), "data": format!("0x{}", hex::encode(call.abi_encode())) },
                    "latest"
                ]),
            )
            .await?;

        let hex_str = result.as_str().context("expected hex string from eth_call")?;
        let digits = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        hex::decode(digits).context("decoding eth_call return data")
    }

    /// Number of sub-accounts the factory has created for `owner`.
    pub async fn create_count(&self, factory: &Address, owner: &Address) -> anyhow::Result<u64> {
        let ret = self.eth_call(factory, &createCountCall { owner: *owner }).await?;
        let count = createCountCall::abi_decode_returns(&ret, true)
            .context("decoding createCount result")?
            .count;
        if count > U256::from(u64::MAX) {
            bail!("create count {count} does not fit in u64");
        }
        Ok(count.to::<u64>())
    }

    /// Minimum donation for one batch, in wei.
    pub async fn min_donate(&self, factory: &Address) -> anyhow::Result<Balance> {
        let ret = self.eth_call(factory, &minDonateCall {}).await?;
        let amount = minDonateCall::abi_decode_returns(&ret, true)
            .context("decoding minDonate result")?
            .amount;
        Ok(amount)
    }

    /// Mint record for `account`; `None` when the node returns no data.
    pub async fn user_mints(
        &self,
        mint_contract: &Address,
        account: &Address,
    ) -> anyhow::Result<Option<UserMint>> {
        let ret = self.eth_call(mint_contract, &userMintsCall { account: *account }).await?;
        if ret.is_empty() {
            return Ok(None);
        }
        Ok(Some(UserMint::decode(&ret)?))
    }
}
