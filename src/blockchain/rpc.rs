//! NEAR JSON-RPC client with timeout and endpoint failover.
//!
//! # Responsibilities
//! - POST JSON-RPC 2.0 requests to the configured endpoint
//! - Fall back to failover endpoints on transport errors
//! - Classify RPC error objects into the chain error taxonomy

use std::time::Duration;

use base64::Engine;
use serde_json::{json, Value};
use tokio::time::timeout;
use url::Url;

use crate::blockchain::types::{ChainError, ChainResult, ClaimOutcome, NearAmount};
use crate::config::RpcConfig;

/// JSON-RPC client for a NEAR node.
///
/// Endpoints are tried in order; a transport failure or timeout moves on to
/// the next endpoint, while an error object returned by a node is final and
/// classified immediately.
#[derive(Clone)]
pub struct NearRpcClient {
    endpoints: Vec<Url>,
    http: reqwest::Client,
    timeout_duration: Duration,
    timeout_secs: u64,
}

impl NearRpcClient {
    /// Build a client from the RPC section of the configuration.
    pub fn new(config: &RpcConfig) -> ChainResult<Self> {
        let mut endpoints = Vec::new();

        let primary: Url = config
            .url
            .parse()
            .map_err(|e| ChainError::Rpc(format!("invalid RPC URL '{}': {}", config.url, e)))?;
        endpoints.push(primary);

        for url_str in &config.failover_urls {
            if let Ok(url) = url_str.parse() {
                endpoints.push(url);
            } else {
                tracing::warn!(url = %url_str, "ignoring invalid failover RPC URL");
            }
        }

        Ok(Self {
            endpoints,
            http: reqwest::Client::new(),
            timeout_duration: Duration::from_secs(config.timeout_secs),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Account balance in yoctoNEAR via a `view_account` query.
    pub async fn view_account_balance(&self, account_id: &str) -> ChainResult<NearAmount> {
        let result = self
            .call(
                "query",
                json!({
                    "request_type": "view_account",
                    "finality": "optimistic",
                    "account_id": account_id,
                }),
            )
            .await?;
        parse_balance(&result)
    }

    /// Current nonce of the account's access key.
    pub async fn access_key_nonce(&self, account_id: &str, public_key: &str) -> ChainResult<u64> {
        let result = self
            .call(
                "query",
                json!({
                    "request_type": "view_access_key",
                    "finality": "optimistic",
                    "account_id": account_id,
                    "public_key": public_key,
                }),
            )
            .await?;
        result
            .get("nonce")
            .and_then(Value::as_u64)
            .ok_or_else(|| ChainError::Auth(format!("no access key found for {}", account_id)))
    }

    /// Hash of a recent final block, required in every transaction.
    pub async fn latest_block_hash(&self) -> ChainResult<[u8; 32]> {
        let result = self.call("block", json!({ "finality": "final" })).await?;
        let hash_str = result
            .pointer("/header/hash")
            .and_then(Value::as_str)
            .ok_or_else(|| ChainError::Rpc("block response missing header hash".into()))?;
        let bytes = bs58::decode(hash_str)
            .into_vec()
            .map_err(|e| ChainError::Rpc(format!("block hash is not valid base58: {}", e)))?;
        bytes
            .try_into()
            .map_err(|_| ChainError::Rpc("block hash is not 32 bytes".into()))
    }

    /// Broadcast a signed transaction and wait for its outcome.
    pub async fn broadcast_tx(&self, signed_tx: &[u8]) -> ChainResult<ClaimOutcome> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(signed_tx);
        let result = self.call("broadcast_tx_commit", json!([encoded])).await?;
        parse_outcome(&result)
    }

    async fn call(&self, method: &str, params: Value) -> ChainResult<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": "hot-claimer",
            "method": method,
            "params": params,
        });

        let mut timed_out = false;
        for (i, endpoint) in self.endpoints.iter().enumerate() {
            let fut = self.http.post(endpoint.clone()).json(&body).send();
            let response = match timeout(self.timeout_duration, fut).await {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    tracing::warn!(endpoint_idx = i, error = %e, "RPC transport error, trying next endpoint");
                    continue;
                }
                Err(_) => {
                    tracing::warn!(endpoint_idx = i, "RPC timeout, trying next endpoint");
                    timed_out = true;
                    continue;
                }
            };

            let payload: Value = match response.json().await {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::warn!(endpoint_idx = i, error = %e, "RPC response was not JSON");
                    continue;
                }
            };

            if let Some(error) = payload.get("error") {
                return Err(classify_rpc_error(error));
            }
            if let Some(result) = payload.get("result") {
                return Ok(result.clone());
            }
            tracing::warn!(endpoint_idx = i, "RPC response had neither result nor error");
        }

        if timed_out {
            Err(ChainError::Timeout(self.timeout_secs))
        } else {
            Err(ChainError::Rpc("all RPC endpoints failed".to_string()))
        }
    }
}

impl std::fmt::Debug for NearRpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NearRpcClient")
            .field("endpoints", &self.endpoints)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Map a JSON-RPC error object onto the chain error taxonomy.
///
/// NEAR tags contract-side rejections with `name: "HANDLER_ERROR"`; anything
/// else is a node or request problem.
fn classify_rpc_error(error: &Value) -> ChainError {
    let name = error.get("name").and_then(Value::as_str).unwrap_or("");
    let cause = error
        .pointer("/cause/name")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown RPC error");

    let text = format!("{} ({})", message, cause);
    if name == "HANDLER_ERROR" {
        ChainError::Contract(text)
    } else {
        ChainError::Rpc(text)
    }
}

fn parse_balance(result: &Value) -> ChainResult<NearAmount> {
    let amount = result
        .get("amount")
        .and_then(Value::as_str)
        .ok_or_else(|| ChainError::Rpc("view_account response missing amount".into()))?;
    let yocto: u128 = amount
        .parse()
        .map_err(|e| ChainError::Rpc(format!("unparseable balance '{}': {}", amount, e)))?;
    Ok(NearAmount(yocto))
}

fn parse_outcome(result: &Value) -> ChainResult<ClaimOutcome> {
    if let Some(failure) = result.pointer("/status/Failure") {
        return Err(ChainError::Contract(failure.to_string()));
    }
    let tx_hash = result
        .pointer("/transaction/hash")
        .and_then(Value::as_str)
        .ok_or_else(|| ChainError::Rpc("broadcast response missing transaction hash".into()))?;
    Ok(ClaimOutcome {
        tx_hash: tx_hash.to_string(),
    })
}
