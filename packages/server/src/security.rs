//! Response security headers.

use crate::config::AppConfig;

/// `Content-Security-Policy` value for the configured storage.
///
/// Media may load from this server, the S3 bucket and the CDN. Insecure
/// requests are not upgraded, so plain-http deployments and CDNs keep working.
pub fn content_security_policy(config: &AppConfig) -> String {
    let mut media_sources = vec!["'self'".to_string(), "data:".into(), "blob:".into()];
    if let Some(host) = config.storage.s3.bucket_host() {
        media_sources.push(host);
    }
    if let Some(cdn) = config.storage.cdn.as_deref().and_then(common::CdnBase::parse) {
        media_sources.push(cdn.domain().to_string());
    }
    let media = media_sources.join(" ");

    [
        "default-src 'self'".to_string(),
        "connect-src 'self' https:".into(),
        format!("img-src {media}"),
        format!("media-src {media}"),
        "script-src 'self' 'unsafe-inline' https:".into(),
        "style-src 'self' 'unsafe-inline' https:".into(),
        "font-src 'self' data: https:".into(),
        "frame-ancestors 'self'".into(),
        "object-src 'none'".into(),
    ]
    .join("; ")
}
