use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use tracing::{debug, trace};
use url::Url;
use xmlrpc_codec::{MethodCall, MethodResponse, Value};

use super::config::ClientConfig;
use crate::{
    account::RemoteAccount,
    credentials::Credential,
    error::{ReportError, Result},
};

const LIST_METHOD: &str = "wp.getUsers";
/// Blog id sent as the first parameter of every call.
const BLOG_ID: i64 = 1;

/// One page of the account listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub number: usize,
}

/// Remote account-listing protocol.
#[async_trait]
pub trait AccountListing: Send + Sync {
    /// Fetch one page of accounts from `endpoint`.
    async fn list_accounts(
        &self,
        endpoint: &str,
        credential: &Credential,
        page: PageRequest,
    ) -> Result<Vec<RemoteAccount>>;
}

/// `wp.getUsers` over HTTP.
#[derive(Debug, Clone)]
pub struct XmlRpcClient {
    client: Client,
    config: ClientConfig,
}

impl XmlRpcClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// The RPC url for an endpoint: `{endpoint}/{rpc_path}`.
    pub fn rpc_url(&self, endpoint: &str) -> Result<Url> {
        let raw = format!(
            "{}/{}",
            endpoint.trim_end_matches('/'),
            self.config.rpc_path.trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|e| ReportError::transport(endpoint, format!("invalid url: {e}")))
    }

    fn build_call(credential: &Credential, page: PageRequest) -> MethodCall {
        let filter: Value = [
            ("number", Value::from(page.number)),
            ("offset", Value::from(page.offset)),
        ]
        .into_iter()
        .collect();

        MethodCall::new(
            LIST_METHOD,
            vec![
                Value::Int(BLOG_ID),
                Value::from(credential.username.as_str()),
                Value::from(credential.password.as_str()),
                filter,
            ],
        )
    }
}

/// Convert the decoded success value into accounts.
fn accounts_from_value(value: &Value) -> std::result::Result<Vec<RemoteAccount>, String> {
    let items = value
        .as_array()
        .ok_or_else(|| "expected an array of users".to_owned())?;

    items
        .iter()
        .map(|item| {
            if item.as_struct().is_none() {
                return Err("expected a user struct".to_owned());
            }
            let email = item.get("email").and_then(Value::as_str).map(str::to_owned);
            let roles = item
                .get("roles")
                .and_then(Value::as_array)
                .map(|roles| {
                    roles
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default();
            Ok(RemoteAccount { email, roles })
        })
        .collect()
}

#[async_trait]
impl AccountListing for XmlRpcClient {
    async fn list_accounts(
        &self,
        endpoint: &str,
        credential: &Credential,
        page: PageRequest,
    ) -> Result<Vec<RemoteAccount>> {
        let url = self.rpc_url(endpoint)?;
        let body = xmlrpc_codec::encode_call(&Self::build_call(credential, page));

        debug!(%url, offset = page.offset, number = page.number, "Requesting account page");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "text/xml")
            .body(body)
            .send()
            .await
            .map_err(|e| ReportError::transport(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::transport(endpoint, format!("HTTP status {status}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ReportError::transport(endpoint, e))?;
        trace!(len = text.len(), "Received response body");

        match xmlrpc_codec::decode_response(&text) {
            Ok(MethodResponse::Success(value)) => {
                accounts_from_value(&value).map_err(|e| ReportError::protocol(endpoint, e))
            }
            Ok(MethodResponse::Fault { code, message }) => Err(ReportError::protocol(
                endpoint,
                format!("fault {code}: {message}"),
            )),
            Err(e) => Err(ReportError::protocol(
                endpoint,
                format!("cannot decode response: {e}"),
            )),
        }
    }
}
