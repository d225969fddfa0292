use std::sync::Arc;

use slotbook_domain::{CalendarConfig, Config, DatabaseConfig};
use slotbook_lib::context::AppContext;
use tempfile::TempDir;

/// Shared context for integration tests that drive the full router.
pub struct TestContext {
    /// Application context wired against a scratch database.
    pub context: Arc<AppContext>,
    /// Keep temporary directory alive for the lifetime of the context.
    _temp_dir: TempDir,
}

/// Create a new test context with fresh database state and the calendar
/// endpoints pointed at a local mock server.
pub async fn setup_test_context(api_base: &str, token_endpoint: &str) -> TestContext {
    let temp_dir = TempDir::new().expect("failed to create temporary database directory");
    let db_path = temp_dir.path().join("slotbook.db");

    let config = Config {
        database: DatabaseConfig {
            path: db_path.to_str().expect("utf-8 database path").to_string(),
            pool_size: 4,
        },
        calendar: CalendarConfig {
            client_id: "test-client-id".to_string(),
            client_secret: Some("test-client-secret".to_string()),
            redirect_uri: "http://localhost:8080/api/auth/google/callback".to_string(),
            api_base: Some(api_base.to_string()),
            token_endpoint: Some(token_endpoint.to_string()),
        },
        ..Config::default()
    };

    let context =
        Arc::new(AppContext::new_with_config(config).await.expect("failed to build app context"));

    TestContext { context, _temp_dir: temp_dir }
}
