//! Node client: the capabilities the wallet needs from a ledger node.

use crate::errors::NetworkError;
use crate::types::{AccountState, TransactionState, TransactionStateMsg};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use wallet_core::types::Address;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// What the wallet asks of a ledger node.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Submits an encoded signed transaction.
    async fn submit_transaction(&self, signed: &[u8]) -> Result<TransactionState, NetworkError>;

    /// Gets the balances and nonces the node reports for `address`.
    async fn account_state(&self, address: &Address) -> Result<AccountState, NetworkError>;

    /// Gets the state of a previously submitted transaction.
    async fn transaction_state(&self, id: &[u8; 32]) -> Result<TransactionState, NetworkError>;
}

/// A node client speaking JSON-RPC over HTTP.
#[derive(Debug, Clone)]
pub struct RpcNodeClient {
    rpc_url: String,
    client: reqwest::Client,
}

impl RpcNodeClient {
    /// Creates a client for `node_url`; `/rpc` is appended when missing.
    pub fn new(node_url: &str, timeout: Duration) -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            rpc_url: rpc_url(node_url),
            client,
        })
    }

    /// Gets the endpoint requests are posted to.
    pub fn url(&self) -> &str {
        &self.rpc_url
    }

    async fn call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, NetworkError> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        debug!("Calling {} on {}", method, self.rpc_url);
        let response = self.client.post(&self.rpc_url).json(&request).send().await?;
        let response_text = response.text().await?;

        parse_response(method, &response_text)
    }
}

#[async_trait]
impl NodeClient for RpcNodeClient {
    async fn submit_transaction(&self, signed: &[u8]) -> Result<TransactionState, NetworkError> {
        let result = self
            .call("submitTransaction", serde_json::json!([hex::encode(signed)]))
            .await?;
        let msg: TransactionStateMsg = serde_json::from_value(result)
            .map_err(|e| NetworkError::InvalidResponse(e.to_string()))?;
        TransactionState::try_from(msg)
    }

    async fn account_state(&self, address: &Address) -> Result<AccountState, NetworkError> {
        let result = self
            .call("getAccountState", serde_json::json!([hex::encode(address.as_bytes())]))
            .await?;
        serde_json::from_value(result).map_err(|e| NetworkError::InvalidResponse(e.to_string()))
    }

    async fn transaction_state(&self, id: &[u8; 32]) -> Result<TransactionState, NetworkError> {
        let result = self
            .call("getTransactionState", serde_json::json!([hex::encode(id)]))
            .await?;
        let msg: TransactionStateMsg = serde_json::from_value(result)
            .map_err(|e| NetworkError::InvalidResponse(e.to_string()))?;
        TransactionState::try_from(msg)
    }
}

fn rpc_url(node_url: &str) -> String {
    let trimmed = node_url.trim_end_matches('/');
    if trimmed.ends_with("/rpc") {
        trimmed.to_string()
    } else {
        format!("{}/rpc", trimmed)
    }
}

/// Extracts `result` from a JSON-RPC response body.
fn parse_response(method: &str, response_text: &str) -> Result<serde_json::Value, NetworkError> {
    if response_text.is_empty() {
        return Err(NetworkError::InvalidResponse(format!(
            "empty response to {}",
            method
        )));
    }

    let mut response: serde_json::Value = serde_json::from_str(response_text)
        .map_err(|e| NetworkError::InvalidResponse(format!("{}: {}", method, e)))?;

    if let Some(error) = response.get("error") {
        if !error.is_null() {
            return Err(NetworkError::NodeRequestFailed(format!("{}: {}", method, error)));
        }
    }

    match response.get_mut("result") {
        Some(result) if !result.is_null() => Ok(result.take()),
        _ => Err(NetworkError::InvalidResponse(format!(
            "no result in response to {}: {}",
            method, response_text
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one HTTP request with `body` and returns the request body it received.
    async fn serve_once(body: String) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];

            // Read the headers, then as much body as Content-Length announces
            let body_start = loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let headers = String::from_utf8_lossy(&request[..body_start]).to_lowercase();
            let length: usize = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .map(|v| v.trim().parse().unwrap())
                .unwrap_or(0);
            while request.len() < body_start + length {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&request[body_start..]).to_string()
        });

        (url, handle)
    }

    #[test]
    fn test_rpc_url() {
        assert_eq!(rpc_url("http://localhost:9092"), "http://localhost:9092/rpc");
        assert_eq!(rpc_url("http://localhost:9092/"), "http://localhost:9092/rpc");
        assert_eq!(rpc_url("http://localhost:9092/rpc"), "http://localhost:9092/rpc");
    }

    #[test]
    fn test_parse_response() {
        let ok = parse_response("m", r#"{"jsonrpc":"2.0","id":1,"result":{"a":1},"error":null}"#).unwrap();
        assert_eq!(ok["a"], 1);

        assert!(matches!(
            parse_response("m", r#"{"jsonrpc":"2.0","id":1,"error":{"code":-1}}"#),
            Err(NetworkError::NodeRequestFailed(_))
        ));
        assert!(matches!(parse_response("m", ""), Err(NetworkError::InvalidResponse(_))));
        assert!(matches!(parse_response("m", "{}"), Err(NetworkError::InvalidResponse(_))));
        assert!(matches!(parse_response("m", "<html>"), Err(NetworkError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_submit_transaction() {
        let id = "0x0101010101010101010101010101010101010101010101010101010101010101";
        let body = format!(
            r#"{{"jsonrpc":"2.0","id":1,"result":{{"id":"{}","state":"pending"}}}}"#,
            id
        );
        let (url, server) = serve_once(body).await;

        let client = RpcNodeClient::new(&url, DEFAULT_TIMEOUT).unwrap();
        let state = client.submit_transaction(&[0xde, 0xad]).await.unwrap();
        assert_eq!(state.id, [1u8; 32]);
        assert_eq!(state.state, "pending");

        let request: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();
        assert_eq!(request["method"], "submitTransaction");
        assert_eq!(request["params"][0], "dead");
    }

    #[tokio::test]
    async fn test_account_state() {
        let body = r#"{"jsonrpc":"2.0","id":1,"result":{"currentBalance":7,"currentNonce":1,"projectedBalance":5,"projectedNonce":2}}"#;
        let (url, server) = serve_once(body.to_string()).await;

        let client = RpcNodeClient::new(&url, DEFAULT_TIMEOUT).unwrap();
        let address = Address([0xab; 20]);
        let state = client.account_state(&address).await.unwrap();
        assert_eq!(state.projected_nonce, 2);
        assert_eq!(state.current_balance, 7);

        let request: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();
        assert_eq!(request["method"], "getAccountState");
        assert_eq!(request["params"][0], hex::encode([0xab; 20]));
    }

    #[tokio::test]
    async fn test_request_timeout() {
        // Accepts the connection but never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let client = RpcNodeClient::new(&url, Duration::from_millis(200)).unwrap();
        let result = client.submit_transaction(&[1, 2, 3]).await;
        assert!(matches!(result, Err(NetworkError::Timeout(_))));
    }
}
