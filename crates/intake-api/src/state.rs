use std::sync::Arc;

use intake_core::Config;
use intake_notify::{ChatNotifier, EmailNotifier};
use intake_storage::Storage;

/// Application state: the loaded configuration plus the three collaborators
/// the pipeline talks to. Built once at startup; handlers never read the
/// environment or construct clients themselves, so tests can inject mocks.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub chat: Arc<dyn ChatNotifier>,
    pub email: Arc<dyn EmailNotifier>,
}

#[allow(dead_code)]
fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    assert_send::<AppState>();
    assert_sync::<AppState>();
}
