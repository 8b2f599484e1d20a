use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::docai::DocAiClient;
use crate::email::EmailClient;
use crate::embedding::Embedder;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub llm: LlmClient,
    pub docai: DocAiClient,
    pub email: EmailClient,
    /// Pluggable embedder. Default: LlmEmbedder. Swap via USE_HASH_EMBEDDER env.
    pub embedder: Arc<dyn Embedder>,
    pub config: Config,
}
