//! Best-effort forwarding of local writes to an optional upstream backend.
//! Failures are logged and never surface to the caller; the system keeps
//! running on its local state.

use anyhow::Result;
use serde::Serialize;

use crate::config::Config;

/// Fire-and-forget POST of `payload` to `<UPSTREAM_URL><path>`. No-op when
/// no upstream is configured; never blocks the calling handler.
pub fn forward<T>(config: &Config, path: &str, payload: T)
where
    T: Serialize + 'static,
{
    let Some(base) = config.upstream_url.clone() else {
        return;
    };
    let url = format!("{}{}", base.trim_end_matches('/'), path);

    actix_web::rt::spawn(async move {
        if let Err(e) = post_json(&url, &payload).await {
            tracing::warn!(error = %e, %url, "upstream sync failed, keeping local state");
        }
    });
}

async fn post_json<T: Serialize>(url: &str, payload: &T) -> Result<()> {
    let response = reqwest::Client::new().post(url).json(payload).send().await?;
    response.error_for_status()?;
    Ok(())
}
