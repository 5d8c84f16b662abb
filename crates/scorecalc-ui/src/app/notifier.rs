//! Error notifier that logs to the console and raises a toast.

use crate::core::api::ApiError;
use crate::core::errors::Notifier;
use crate::core::toast::{ToastKind, ToastStore};
use gloo::console;
use scorecalc_api_models::ErrorResponse;
use yewdux::prelude::Dispatch;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ToastNotifier;

impl Notifier for ToastNotifier {
    fn notify_error(&self, error: &ErrorResponse, source: &ApiError) {
        console::error!(
            "request failed",
            error.name.clone(),
            error.message.clone(),
            source.to_string()
        );
        let message = error.message.clone();
        Dispatch::<ToastStore>::new().reduce_mut(move |store| {
            store.push(ToastKind::Error, message);
        });
    }
}
