use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Frontend origin allowed to call the registry.
const ALLOWED_ORIGIN: &str = "https://staging.d3k3ygxgvu5ype.amplifyapp.com";

/// The subset of an API Gateway proxy event the registry reads.
///
/// Everything is optional so that both payload formats parse: the REST
/// format carries `httpMethod`/`path` at the top level, the HTTP API v2
/// format nests the method under `requestContext.http`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayRequest {
    pub http_method: Option<String>,
    pub path: Option<String>,
    pub body: Option<String>,
    pub request_context: Option<RequestContext>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestContext {
    pub http: Option<HttpContext>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HttpContext {
    pub method: Option<String>,
}

impl ApiGatewayRequest {
    /// The HTTP method, from whichever payload format carried it.
    pub fn method(&self) -> &str {
        self.http_method
            .as_deref()
            .or_else(|| {
                self.request_context
                    .as_ref()
                    .and_then(|ctx| ctx.http.as_ref())
                    .and_then(|http| http.method.as_deref())
            })
            .unwrap_or("")
    }

    /// The request path, empty if absent.
    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or("")
    }
}

/// The proxy response shape API Gateway expects back.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// The fixed header set attached to every response, all branches included,
/// so the browser accepts preflight and error responses alike.
pub fn cors_headers() -> Value {
    json!({
        "Access-Control-Allow-Origin": ALLOWED_ORIGIN,
        "Access-Control-Allow-Headers": "Content-Type",
        "Access-Control-Allow-Methods": "OPTIONS,GET,POST",
        "Access-Control-Allow-Credentials": "true",
    })
}
