//! Report command handler.
//!
//! Runs all four queries concurrently through the session and prints a
//! summary. A failed section is shown in place; it does not hide the others.

use anyhow::Result;
use axcheck_core::contracts::keyed::from_keyed;
use axcheck_core::{AppRecord, QueryRequest, QueryResponse, ServiceRecord};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_flag, print_separator, truncate_string};

/// One report section: decoded payload or the failure message.
pub type Section<T> = Result<T, String>;

/// Everything a report shows.
#[derive(Debug)]
pub struct DeviceReport {
    pub enabled: Section<bool>,
    pub service_names: Section<Vec<String>>,
    pub services: Section<Vec<ServiceRecord>>,
    pub apps: Section<Vec<AppRecord>>,
}

impl DeviceReport {
    /// Whether any section failed.
    pub const fn has_failures(&self) -> bool {
        self.enabled.is_err()
            || self.service_names.is_err()
            || self.services.is_err()
            || self.apps.is_err()
    }
}

/// Collect the report.
///
/// # Errors
///
/// Fails only when the session closes before replying.
pub async fn collect(ctx: &CliContext) -> Result<DeviceReport, CliError> {
    let session = ctx.session();
    let (enabled, names, services, apps) = tokio::join!(
        session.call_request(QueryRequest::IsAccessibilityEnabled),
        session.call_request(QueryRequest::GetEnabledAccessibilityServices),
        session.call_request(QueryRequest::GetDetailedAccessibilityServices),
        session.call_request(QueryRequest::GetAllInstalledApps),
    );

    Ok(DeviceReport {
        enabled: decode(enabled?),
        service_names: decode(names?),
        services: decode_records(services?),
        apps: decode_records(apps?),
    })
}

fn success_value(response: QueryResponse) -> Section<Value> {
    match response {
        QueryResponse::Success { value } => Ok(value),
        QueryResponse::Error { message, .. } => Err(message),
        QueryResponse::NotImplemented => Err("not implemented".to_string()),
    }
}

fn decode<T: DeserializeOwned>(response: QueryResponse) -> Section<T> {
    success_value(response)
        .and_then(|value| serde_json::from_value(value).map_err(|e| e.to_string()))
}

fn decode_records<T: DeserializeOwned>(response: QueryResponse) -> Section<Vec<T>> {
    let Value::Array(entries) = success_value(response)? else {
        return Err("expected a list".to_string());
    };
    entries
        .into_iter()
        .map(|entry| match entry {
            Value::Object(map) => from_keyed(map).map_err(|e| e.to_string()),
            _ => Err("expected a keyed record".to_string()),
        })
        .collect()
}

/// Execute the report command.
///
/// # Errors
///
/// Returns [`CliError::Query`] after printing when any section failed.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let report = collect(ctx).await?;
    let tier = ctx.session().facade().packages().tier();

    println!("Device: {} (tier {tier})\n", ctx.device().display());

    match &report.enabled {
        Ok(enabled) => println!("Accessibility enabled: {}", format_flag(*enabled)),
        Err(message) => println!("Accessibility enabled: error ({message})"),
    }

    match &report.service_names {
        Ok(names) if names.is_empty() => println!("Enabled services (settings): none"),
        Ok(names) => println!("Enabled services (settings): {}", names.join(", ")),
        Err(message) => println!("Enabled services (settings): error ({message})"),
    }

    println!();
    match &report.services {
        Ok(services) => print_services(services),
        Err(message) => println!("Accessibility services: error ({message})"),
    }

    println!();
    match &report.apps {
        Ok(apps) => print_apps(apps),
        Err(message) => println!("Installed apps: error ({message})"),
    }

    if report.has_failures() {
        return Err(CliError::Query("one or more report sections failed".to_string()).into());
    }
    Ok(())
}

fn print_services(services: &[ServiceRecord]) {
    println!("Accessibility services ({}):", services.len());
    println!(
        "{:<28} {:<24} {:<7} {:<7} {:<7}",
        "Package", "Label", "Window", "Touch", "Web"
    );
    print_separator(77);
    for service in services {
        println!(
            "{:<28} {:<24} {:<7} {:<7} {:<7}",
            truncate_string(&service.package_name, 27),
            truncate_string(&service.label, 23),
            format_flag(service.can_retrieve_window_content),
            format_flag(service.can_request_touch_exploration),
            format_flag(service.can_request_enhanced_web_access),
        );
    }
}

/// Number of apps whose installer could not be resolved to a package.
pub fn unresolved_installers(apps: &[AppRecord]) -> usize {
    apps.iter().filter(|app| app.has_installer_sentinel()).count()
}

fn print_apps(apps: &[AppRecord]) {
    println!("Installed apps ({}):", apps.len());
    println!(
        "{:<32} {:<20} {:<12} {:<10} {:<6} Installer",
        "Package", "Name", "Version", "Code", "System"
    );
    print_separator(110);
    for app in apps {
        println!(
            "{:<32} {:<20} {:<12} {:<10} {:<6} {}",
            truncate_string(&app.package_name, 31),
            truncate_string(&app.app_name, 19),
            truncate_string(&app.version_name, 11),
            app.version_code,
            format_flag(app.is_system_app),
            app.installer_package_name,
        );
    }

    let unresolved = unresolved_installers(apps);
    if unresolved > 0 {
        println!("\n{unresolved} app(s) without a resolvable installer");
    }
}
