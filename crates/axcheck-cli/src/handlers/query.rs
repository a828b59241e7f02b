//! Query command handler.
//!
//! Sends one method name through the session and prints the response.

use anyhow::Result;
use axcheck_core::{Channel, QueryRequest, QueryResponse};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Resolve the channel for a method.
///
/// An explicit channel is used as given, even when the method does not
/// belong to it. Without one, the method's own channel is used; unknown
/// methods fall back to the accessibility channel and are answered as not
/// implemented.
pub fn resolve_channel(method: &str, channel: Option<&str>) -> Result<Channel, CliError> {
    match channel {
        Some(name) => name.parse().map_err(CliError::Arguments),
        None => Ok(QueryRequest::from_method(method)
            .map_or(Channel::Accessibility, QueryRequest::channel)),
    }
}

/// Dispatch a method and wait for its response.
///
/// # Errors
///
/// Fails when the channel name is unknown or the session closes first.
pub async fn run(ctx: &CliContext, method: &str, channel: Option<&str>) -> Result<QueryResponse> {
    let channel = resolve_channel(method, channel)?;
    let response = ctx
        .session()
        .call(channel, method)
        .await
        .map_err(CliError::from)?;
    Ok(response)
}

/// Execute the query command.
///
/// Prints the response as JSON. An error or not-implemented response is
/// printed first and then reported as a failure.
///
/// # Errors
///
/// Returns [`CliError::Query`] for an error response and
/// [`CliError::Arguments`] for a method not served on the channel.
pub async fn execute(ctx: &CliContext, method: &str, channel: Option<&str>) -> Result<()> {
    let response = run(ctx, method, channel).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    match response {
        QueryResponse::Success { .. } => Ok(()),
        QueryResponse::Error { message, .. } => Err(CliError::Query(message).into()),
        QueryResponse::NotImplemented => {
            Err(CliError::Arguments(format!("method '{method}' is not implemented")).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{CliConfig, bootstrap};
    use std::io::Write;

    fn context(json: &str) -> (CliContext, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let ctx = bootstrap(CliConfig {
            device: Some(file.path().to_path_buf()),
            api_level: None,
        })
        .unwrap();
        (ctx, file)
    }

    #[test]
    fn test_resolve_channel() {
        assert_eq!(
            resolve_channel("getAllInstalledApps", None).unwrap(),
            Channel::InstalledApps
        );
        assert_eq!(
            resolve_channel("isAccessibilityEnabled", None).unwrap(),
            Channel::Accessibility
        );
        assert_eq!(
            resolve_channel("getAllInstalledApps", Some("accessibility_checker")).unwrap(),
            Channel::Accessibility
        );
        assert!(matches!(
            resolve_channel("getAllInstalledApps", Some("battery")),
            Err(CliError::Arguments(_))
        ));
    }

    #[test]
    fn test_enabled_check_answered_on_current_thread_runtime() {
        let (ctx, _file) = context(
            r#"{
                "apiLevel": 29,
                "accessibilityServices": [
                    { "packageName": "com.a", "serviceName": "com.a.ReaderService" }
                ]
            }"#,
        );

        let response = tokio_test::block_on(run(&ctx, "isAccessibilityEnabled", None));
        let response = tokio_test::assert_ok!(response);
        assert_eq!(response, QueryResponse::success(serde_json::Value::Bool(true)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_run_returns_service_names() {
        let (ctx, _file) = context(
            r#"{
                "apiLevel": 33,
                "secureSettings": {
                    "enabled_accessibility_services": "com.a/com.a.ReaderService"
                }
            }"#,
        );

        let response = run(&ctx, "getEnabledAccessibilityServices", None)
            .await
            .unwrap();
        assert_eq!(response.value(), Some(&serde_json::json!(["ReaderService"])));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_execute_reports_misrouted_method() {
        let (ctx, _file) = context(r#"{"apiLevel": 33}"#);

        let err = execute(&ctx, "getAllInstalledApps", Some("accessibility_checker"))
            .await
            .unwrap_err();
        let cli_err = err.downcast_ref::<CliError>().unwrap();
        assert!(matches!(cli_err, CliError::Arguments(_)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_execute_reports_query_error() {
        let (ctx, _file) = context(
            r#"{"apiLevel": 33, "packagesFault": {"kind": "security", "message": "denied"}}"#,
        );

        let err = execute(&ctx, "getAllInstalledApps", None).await.unwrap_err();
        assert_eq!(err.downcast_ref::<CliError>().unwrap().exit_code(), 1);
    }
}
