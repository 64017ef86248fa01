pub mod analytics;
pub mod dashboard;
pub mod innovation;
pub mod onboarding;
pub mod products;
pub mod settings;

#[cfg(test)]
pub(crate) mod testing;

use crate::error::Result;
use crate::notify::Notifier;
use std::future::Future;
use tracing::error;

/// Runs one page load: raises `loading`, awaits `fetch`, always lowers
/// `loading` again. On failure the error is logged, a single destructive
/// toast is raised and `None` is returned so the caller keeps its old state.
pub async fn guarded_load<T, F>(
    loading: &mut bool,
    notifier: &mut Notifier,
    what: &str,
    fetch: F,
) -> Option<T>
where
    F: Future<Output = Result<T>>,
{
    guarded_fetch(loading, notifier, &format!("Failed to load {what}"), fetch).await
}

/// [`guarded_load`] with the toast text spelled out in full.
pub async fn guarded_fetch<T, F>(
    loading: &mut bool,
    notifier: &mut Notifier,
    failure: &str,
    fetch: F,
) -> Option<T>
where
    F: Future<Output = Result<T>>,
{
    *loading = true;
    let result = fetch.await;
    *loading = false;

    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!(error = %e, "{failure}");
            notifier.error("Error", failure);
            None
        }
    }
}
