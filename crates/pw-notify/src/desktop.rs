// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A `notify-rust`-backed channel for the CLI's `notify test` command and
//! for local/dev deployments without a push-provider account configured.

use crate::channel::{Channel, Dispatch};
use crate::error::ChannelError;
use async_trait::async_trait;

/// Desktop notification channel using notify-rust.
///
/// On macOS, `notify-rust` uses `mac-notification-sys` (Cocoa bindings) to
/// send notifications via the Notification Center. The first notification
/// triggers `ensure_application_set()`, which runs an AppleScript to look up
/// a bundle identifier. In a daemon context without Automation permissions,
/// that AppleScript blocks forever. We pre-set the bundle identifier at
/// construction time to bypass the lookup entirely.
#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopChannel;

impl DesktopChannel {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self
    }

    async fn show(&self, title: &str, message: &str) -> Result<(), ChannelError> {
        let title = title.to_string();
        let message = message.to_string();
        // notify_rust::Notification::show() is synchronous on macOS.
        // Fire-and-forget on tokio's bounded blocking thread pool to avoid
        // blocking the async runtime while capping OS thread count.
        let result = tokio::task::spawn_blocking(move || {
            notify_rust::Notification::new().summary(&title).body(&message).show().map(|_| ())
        })
        .await;

        match result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(ChannelError::Transient(e.to_string())),
            Err(e) => Err(ChannelError::Transient(format!("notification task panicked: {e}"))),
        }
    }
}

#[async_trait]
impl Channel for DesktopChannel {
    fn name(&self) -> &str {
        "desktop"
    }

    async fn send(&self, dispatch: &Dispatch) -> Result<(), ChannelError> {
        tracing::info!(title = %dispatch.title, "sending desktop notification");
        self.show(&dispatch.title, &dispatch.message).await
    }

    async fn test(&self, message: &str) -> Result<(), ChannelError> {
        self.show("pulsewatch test", message).await
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use crate::channel::{Channel, Dispatch};
    use crate::error::ChannelError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    pub struct ChannelCall {
        pub title: String,
        pub message: String,
    }

    struct FakeChannelState {
        calls: Vec<ChannelCall>,
        fail_next: Option<ChannelError>,
    }

    /// Records every send/test call; test code configures `fail_next` to
    /// exercise retry and error-handling paths.
    #[derive(Clone)]
    pub struct FakeChannel {
        inner: Arc<Mutex<FakeChannelState>>,
    }

    impl Default for FakeChannel {
        fn default() -> Self {
            Self { inner: Arc::new(Mutex::new(FakeChannelState { calls: Vec::new(), fail_next: None })) }
        }
    }

    impl FakeChannel {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<ChannelCall> {
            self.inner.lock().calls.clone()
        }

        pub fn fail_next(&self, err: ChannelError) {
            self.inner.lock().fail_next = Some(err);
        }
    }

    #[async_trait]
    impl Channel for FakeChannel {
        fn name(&self) -> &str {
            "fake"
        }

        async fn send(&self, dispatch: &Dispatch) -> Result<(), ChannelError> {
            let mut inner = self.inner.lock();
            inner.calls.push(ChannelCall { title: dispatch.title.clone(), message: dispatch.message.clone() });
            if let Some(err) = inner.fail_next.take() {
                return Err(err);
            }
            Ok(())
        }

        async fn test(&self, message: &str) -> Result<(), ChannelError> {
            self.inner.lock().calls.push(ChannelCall { title: "test".to_string(), message: message.to_string() });
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "desktop_tests.rs"]
mod tests;
