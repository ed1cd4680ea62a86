use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct PutRequest {
    pub value: String,
    /// 0 (or absent) defers to the backend's configured default TTL.
    #[serde(default)]
    pub ttl_seconds: u32,
}

#[derive(Serialize)]
pub struct PutResponse {
    pub uuid: String,
}

#[derive(Serialize)]
pub struct GetResponse {
    pub value: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub message: String,
}
