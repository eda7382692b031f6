use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use campus_client_core::api::decode_json_response;
use campus_client_core::config::resolve_auth_token;
use campus_client_core::csv_export::export_json_rows;
use campus_client_core::endpoints::PROBE_PATHS;
use campus_client_core::{ApiClient, ApiRequest, ApiTransport, ClientConfig, Session};
use clap::{Parser, Subcommand};
use serde_json::Value;

pub const ENV_LOG_FILTER: &str = "CAMPUS_LOG";
const API_BASE_SOURCE_FLAG: &str = "flag";

#[derive(Parser, Debug)]
#[command(name = "campus")]
#[command(about = "Campus dashboard API utilities")]
pub struct CampusCli {
    /// API base URL. Falls back to CAMPUS_API_BASE_URL, then the local default.
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Bearer token. Falls back to CAMPUS_AUTH_TOKEN.
    #[arg(long, global = true)]
    pub token: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// GET every read-only dashboard endpoint and report which ones answer
    Probe,
    /// Fetch a JSON array of flat records and write it to <out>.csv
    Export {
        /// Endpoint relative to the base URL, e.g. /students/attendance
        #[arg(long)]
        endpoint: String,
        /// Output path without the .csv extension
        #[arg(long)]
        out: String,
    },
}

impl CampusCli {
    pub fn client_config(&self) -> Result<(ClientConfig, &'static str)> {
        match self.base_url.as_deref() {
            Some(base_url) => Ok((ClientConfig::new(base_url)?, API_BASE_SOURCE_FLAG)),
            None => Ok(ClientConfig::from_env()?),
        }
    }

    pub fn session(&self) -> Session {
        self.token
            .clone()
            .or_else(resolve_auth_token)
            .map_or_else(Session::anonymous, Session::new)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    /// 2xx with a JSON body.
    Ok(u16),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub endpoint: &'static str,
    pub status: ProbeStatus,
}

pub async fn probe<T: ApiTransport>(client: &ApiClient<T>) -> Vec<ProbeResult> {
    let mut results = Vec::with_capacity(PROBE_PATHS.len());
    for endpoint in PROBE_PATHS {
        let outcome = match client.send_raw(&ApiRequest::get(endpoint)).await {
            Ok(response) => decode_json_response::<Value>(&response).map(|_| response.status),
            Err(error) => Err(error),
        };
        let status = match outcome {
            Ok(status) => ProbeStatus::Ok(status),
            Err(error) => {
                tracing::warn!(endpoint, kind = error.kind().as_str(), %error, "probe failed");
                ProbeStatus::Failed(error.to_string())
            }
        };
        results.push(ProbeResult { endpoint, status });
    }
    results
}

pub async fn export<T: ApiTransport>(
    client: &ApiClient<T>,
    endpoint: &str,
    out: &str,
) -> Result<PathBuf> {
    let rows: Value = client
        .get_json(endpoint)
        .await
        .with_context(|| format!("fetch {endpoint}"))?;
    let export = export_json_rows(&rows, out).with_context(|| format!("export {endpoint}"))?;
    let path = PathBuf::from(&export.file_name);
    std::fs::write(&path, export.content.as_bytes())
        .with_context(|| format!("write {}", path.display()))?;
    tracing::info!(endpoint, path = %path.display(), "csv written");
    Ok(path)
}

/// Runs a parsed command, writing its report to `out`. Returns false when
/// the command completed but found failures.
pub async fn run<T: ApiTransport>(
    command: &Commands,
    client: &ApiClient<T>,
    out: &mut impl Write,
) -> Result<bool> {
    match command {
        Commands::Probe => {
            let results = probe(client).await;
            let mut all_ok = true;
            for result in &results {
                match &result.status {
                    ProbeStatus::Ok(status) => {
                        writeln!(out, "ok      {} ({status})", result.endpoint)?;
                    }
                    ProbeStatus::Failed(error) => {
                        all_ok = false;
                        writeln!(out, "failed  {}: {error}", result.endpoint)?;
                    }
                }
            }
            Ok(all_ok)
        }
        Commands::Export { endpoint, out: target } => {
            let path = export(client, endpoint, target).await?;
            writeln!(out, "wrote {}", path.display())?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use campus_client_core::{PreparedRequest, RawResponse, RequestError};
    use clap::Parser;
    use clap::error::ErrorKind;

    use super::*;

    #[derive(Default)]
    struct FixedTransport {
        responses: HashMap<String, RawResponse>,
        sent: RefCell<Vec<String>>,
    }

    impl FixedTransport {
        fn with(mut self, path: &str, status: u16, body: &str) -> Self {
            self.responses.insert(
                format!("http://campus.test/api{path}"),
                RawResponse {
                    status,
                    body: body.to_string(),
                },
            );
            self
        }
    }

    #[async_trait(?Send)]
    impl ApiTransport for FixedTransport {
        async fn send(&self, request: PreparedRequest) -> Result<RawResponse, RequestError> {
            self.sent.borrow_mut().push(request.url.clone());
            self.responses
                .get(&request.url)
                .cloned()
                .ok_or_else(|| RequestError::transport("connection refused"))
        }
    }

    fn client(transport: FixedTransport) -> ApiClient<FixedTransport> {
        ApiClient::new(
            ClientConfig::new("http://campus.test/api").expect("config"),
            Session::new("tok_cli"),
            transport,
        )
    }

    #[test]
    fn cli_requires_subcommand() {
        let err = match CampusCli::try_parse_from(["campus"]) {
            Ok(_) => panic!("expected missing subcommand parse error"),
            Err(err) => err,
        };
        assert_eq!(
            err.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }

    #[test]
    fn export_requires_endpoint_and_output() {
        let err = match CampusCli::try_parse_from(["campus", "export", "--endpoint", "/x"]) {
            Ok(_) => panic!("expected missing --out"),
            Err(err) => err,
        };
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let cli = CampusCli::try_parse_from([
            "campus",
            "export",
            "--endpoint",
            "/students/results",
            "--out",
            "results",
            "--base-url",
            "https://campus.example.edu/api/",
        ])
        .expect("parses");
        assert_eq!(
            cli.command,
            Commands::Export {
                endpoint: "/students/results".to_string(),
                out: "results".to_string(),
            }
        );
        let (config, source) = cli.client_config().expect("config");
        assert_eq!(config.base_url, "https://campus.example.edu/api");
        assert_eq!(source, "flag");
    }

    #[test]
    fn token_flag_becomes_the_session() {
        let cli = CampusCli::try_parse_from(["campus", "probe", "--token", "tok_flag"])
            .expect("parses");
        assert_eq!(cli.session().authorization_header(), "Bearer tok_flag");
    }

    #[tokio::test]
    async fn probe_reports_every_endpoint_and_flags_failures() {
        let client = client(
            FixedTransport::default()
                .with("/students/dashboard", 200, r#"{"attendancePercentage":87}"#)
                .with("/hod/dashboard", 401, "unauthorized")
                .with("/principal/dashboard", 200, "<html>"),
        );
        let mut report = Vec::new();

        let all_ok = run(&Commands::Probe, &client, &mut report).await.expect("runs");

        assert!(!all_ok);
        assert_eq!(client.transport().sent.borrow().len(), PROBE_PATHS.len());
        let report = String::from_utf8(report).expect("utf8");
        assert!(report.contains("ok      /students/dashboard (200)"));
        assert!(report.contains("failed  /hod/dashboard: campus_http_401:unauthorized"));
        assert!(report.contains("failed  /principal/dashboard: campus_json_decode_failed"));
        assert!(report.contains("failed  /faculty/students: campus_request_failed:connection refused"));
        assert_eq!(report.lines().count(), PROBE_PATHS.len());
    }

    #[tokio::test]
    async fn export_writes_quoted_csv() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("attendance");
        let client = client(FixedTransport::default().with(
            "/students/attendance",
            200,
            r#"[{"name":"Data Structures","percentage":90},{"name":"Algorithms, II","percentage":null}]"#,
        ));

        let path = export(&client, "/students/attendance", out.to_str().expect("utf8 path"))
            .await
            .expect("exported");

        assert_eq!(path, dir.path().join("attendance.csv"));
        let content = std::fs::read_to_string(&path).expect("written");
        assert_eq!(
            content,
            "name,percentage\n\"Data Structures\",\"90\"\n\"Algorithms, II\",\"\""
        );
    }

    #[tokio::test]
    async fn exporting_an_empty_list_fails_without_writing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("results");
        let client = client(FixedTransport::default().with("/students/results", 200, "[]"));

        let error = export(&client, "/students/results", out.to_str().expect("utf8 path"))
            .await
            .expect_err("no rows");

        assert!(format!("{error:#}").contains("No data to export"));
        assert!(!dir.path().join("results.csv").exists());
    }
}
