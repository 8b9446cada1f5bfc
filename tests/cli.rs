//! End-to-end tests for the `weather` binary.

use std::{
    fs,
    io::{Read, Write},
    net::TcpListener,
    path::Path,
    process::{Command, Output},
    sync::mpsc::{self, Receiver},
    thread,
};

use tempfile::TempDir;

fn weather(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_weather"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run the weather binary")
}

/// Answers a single request and hands its request line back to the test.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = [0u8; 4096];
            let read = stream.read(&mut request).unwrap_or(0);
            let request = String::from_utf8_lossy(&request[..read]);
            let _ = sender.send(request.lines().next().unwrap_or_default().to_owned());

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    (format!("http://{}/data/2.5/weather", address), receiver)
}

fn workspace_with_secrets(endpoint: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("secrets.toml"),
        format!("[openweather]\napi_key = \"KEY\"\nendpoint = \"{}\"\n", endpoint),
    )
    .unwrap();
    dir
}

/// Fatal errors print exactly one line to stderr at the default verbosity.
fn sole_stderr_line(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "stderr: {:?}", stderr);
    lines.concat()
}

const NEW_YORK: &str = r#"{"name":"New York","weather":[{"id":803,"description":"broken clouds"}],"main":{"temp":12.4}}"#;

#[test]
fn help_exits_successfully() {
    let dir = tempfile::tempdir().unwrap();
    let output = weather(dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--imperial"));
    assert!(stdout.contains("Fahrenheit"));
}

#[test]
fn missing_city_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = weather(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = weather(dir.path(), &["--fahrenheit", "Paris"]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_secrets_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = weather(dir.path(), &["Paris"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = sole_stderr_line(&output);
    assert!(stderr.contains("configuration error"));
    assert!(stderr.contains("secrets.toml"));
    assert!(output.stdout.is_empty());
}

#[test]
fn prints_weather_line() {
    let (endpoint, requests) = serve_once("200 OK", NEW_YORK);
    let dir = workspace_with_secrets(&endpoint);

    let output = weather(dir.path(), &["New", "York"]);

    assert!(output.status.success(), "{:?}", output);
    let request_line = requests.recv().unwrap();
    assert!(request_line.contains("?q=New+York&units=metric&appid=KEY "));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("New York"));
    assert!(stdout.contains("☁"));
    assert!(stdout.contains("Broken clouds"));
    assert!(stdout.ends_with("(12.4°C)\n"));
}

#[test]
fn imperial_flag_changes_units() {
    let (endpoint, requests) = serve_once("200 OK", NEW_YORK);
    let dir = workspace_with_secrets(&endpoint);

    let output = weather(dir.path(), &["-i", "New", "York"]);

    assert!(output.status.success(), "{:?}", output);
    assert!(requests.recv().unwrap().contains("units=imperial"));
    assert!(String::from_utf8_lossy(&output.stdout).ends_with("°F)\n"));
}

#[test]
fn json_output() {
    let (endpoint, _requests) = serve_once("200 OK", NEW_YORK);
    let dir = workspace_with_secrets(&endpoint);

    let output = weather(dir.path(), &["--output", "json", "New", "York"]);

    assert!(output.status.success(), "{:?}", output);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["city_name"], "New York");
    assert_eq!(json["condition_code"], 803);
    assert_eq!(json["units"], "metric");
}

#[test]
fn secrets_path_can_be_overridden() {
    let (endpoint, _requests) = serve_once("200 OK", NEW_YORK);
    let secrets_dir = workspace_with_secrets(&endpoint);
    let secrets = secrets_dir.path().join("secrets.toml");
    let cwd = tempfile::tempdir().unwrap();

    let output = weather(
        cwd.path(),
        &["--secrets", secrets.to_str().unwrap(), "New", "York"],
    );

    assert!(output.status.success(), "{:?}", output);
}

#[test]
fn unauthorized_response() {
    let (endpoint, _requests) = serve_once("401 Unauthorized", r#"{"cod":401}"#);
    let dir = workspace_with_secrets(&endpoint);

    let output = weather(dir.path(), &["Paris"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(sole_stderr_line(&output), "access denied, check your API key");
}

#[test]
fn not_found_response() {
    let (endpoint, _requests) = serve_once("404 Not Found", r#"{"cod":"404"}"#);
    let dir = workspace_with_secrets(&endpoint);

    let output = weather(dir.path(), &["Atlantis"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        sole_stderr_line(&output),
        "could not find weather data for this city"
    );
}

#[test]
fn server_error_reports_status() {
    let (endpoint, _requests) = serve_once("500 Internal Server Error", "{}");
    let dir = workspace_with_secrets(&endpoint);

    let output = weather(dir.path(), &["Paris"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(sole_stderr_line(&output), "something went wrong (500)");
}

#[test]
fn malformed_body_is_a_decode_error() {
    let (endpoint, _requests) = serve_once("200 OK", "not-json");
    let dir = workspace_with_secrets(&endpoint);

    let output = weather(dir.path(), &["Paris"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(sole_stderr_line(&output).starts_with("could not parse the server response"));
}

#[test]
fn verbose_flag_logs_the_rejection() {
    let (endpoint, _requests) = serve_once("401 Unauthorized", r#"{"cod":401}"#);
    let dir = workspace_with_secrets(&endpoint);

    let output = weather(dir.path(), &["-v", "Paris"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("weather request rejected"));
    assert!(!stderr.contains("KEY"));
    assert_eq!(
        stderr.lines().last(),
        Some("access denied, check your API key")
    );
}

#[test]
fn unquoted_secrets_value_is_one_line_with_a_hint() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("secrets.toml"),
        "[openweather]\napi_key=abc123\n",
    )
    .unwrap();

    let output = weather(dir.path(), &["Paris"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = sole_stderr_line(&output);
    assert!(stderr.contains("values must be quoted"));
    assert!(stderr.contains("secrets.toml"));
}
