//! Command implementations

use crate::output::{to_json, OutputFormat};
use anyhow::{Context, Result};
use livetv_core::{
    build, resolve, ControllerState, EngineConfig, HeadlessEngineFactory, ProtocolTag, ViewFactory,
    ViewId,
};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ResolveReport {
    url: String,
    protocol: ProtocolTag,
    mime_type: Option<&'static str>,
    request: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct OpenReport {
    view_id: ViewId,
    url: Option<String>,
    protocol: Option<ProtocolTag>,
    state: ControllerState,
    request: Option<String>,
    has_active_item: bool,
    auto_start: bool,
}

/// Resolve each URL and show the playback request it would produce
pub fn resolve_urls(urls: &[String], format: &str) -> Result<()> {
    let reports: Vec<ResolveReport> = urls
        .iter()
        .map(|url| {
            let protocol = resolve(url);
            let (request, error) = match build(url, protocol) {
                Ok(request) => (Some(request.uri().to_string()), None),
                Err(e) => (None, Some(e.to_string())),
            };
            ResolveReport {
                url: url.clone(),
                protocol,
                mime_type: protocol.mime_type(),
                request,
                error,
            }
        })
        .collect();

    match OutputFormat::from(format) {
        OutputFormat::Json => println!("{}", to_json(&reports)?),
        OutputFormat::Text => {
            for report in &reports {
                println!("URL:       {}", report.url);
                println!("Protocol:  {}", report.protocol);
                println!("MIME type: {}", report.mime_type.unwrap_or("(engine probes)"));
                match (&report.request, &report.error) {
                    (Some(uri), _) => println!("Request:   {}", uri),
                    (None, Some(error)) => println!("Rejected:  {}", error),
                    (None, None) => {}
                }
                println!();
            }
        }
    }

    Ok(())
}

/// Open a view on the headless engine, print its state and close it
pub fn open(args: &str, engine: Option<&str>, view_id: i64, format: &str) -> Result<()> {
    let payload: serde_json::Value =
        serde_json::from_str(args).context("Creation payload is not valid JSON")?;
    let engine_config = match engine {
        Some(json) => serde_json::from_str::<EngineConfig>(json)
            .context("Engine configuration is not valid JSON")?,
        None => EngineConfig::default(),
    };
    debug!(?engine_config, "Opening view");

    let view_id = ViewId(view_id);
    let mut views = ViewFactory::new(HeadlessEngineFactory).with_engine_config(engine_config);
    let view = views.create(view_id, &payload)?;
    let controller = view.controller();

    let report = OpenReport {
        view_id,
        url: view.config().url().map(str::to_string),
        protocol: view.protocol(),
        state: controller.state(),
        request: controller.active_request().map(|r| r.uri().to_string()),
        has_active_item: controller.has_active_item(),
        auto_start: controller.auto_start(),
    };

    match OutputFormat::from(format) {
        OutputFormat::Json => println!("{}", to_json(&report)?),
        OutputFormat::Text => {
            println!("View:      {}", report.view_id);
            println!("URL:       {}", report.url.as_deref().unwrap_or("(none)"));
            match report.protocol {
                Some(protocol) => println!("Protocol:  {}", protocol),
                None => println!("Protocol:  (none)"),
            }
            println!("State:     {}", report.state);
            println!("Request:   {}", report.request.as_deref().unwrap_or("(none)"));
            println!("Autostart: {}", report.auto_start);
        }
    }

    views.dispose(view_id)?;
    Ok(())
}
