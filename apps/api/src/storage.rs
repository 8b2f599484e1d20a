use aws_sdk_s3::primitives::ByteStream;
use tracing::info;
use uuid::Uuid;

use crate::docai::mime_for;
use crate::errors::AppError;

/// Uploads a resume file under `resumes/<uuid>.<ext>` and returns its
/// publicly resolvable URL.
pub async fn upload_resume_file(
    s3: &aws_sdk_s3::Client,
    endpoint: &str,
    bucket: &str,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<String, AppError> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_else(|| "pdf".to_string());
    let content_type = mime_for(&format!("f.{ext}")).unwrap_or("application/octet-stream");
    let key = format!("resumes/{}.{ext}", Uuid::new_v4());

    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(bytes))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

    let url = format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key);
    info!("Uploaded resume to {url}");
    Ok(url)
}
