//! Panic containment for resource and middleware calls.

use futures_util::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use crate::error::DispatchError;

/// Await `fut`, turning a panic into [`DispatchError::Panicked`].
pub(crate) async fn guarded<T, F>(fut: F) -> Result<T, DispatchError>
where
    F: Future<Output = Result<T, DispatchError>>,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(DispatchError::Panicked {
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
