use std::fs::OpenOptions;
use std::io::Write;
use chrono::Utc;

// One line per /api/chat call, appended to the request ledger
pub fn log_request(
    log_path: &str,
    outcome: &str,
    model: &str,
    history_turns: usize,
    latency_ms: u128,
) {
    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
    let log_entry = format!(
        "{} | {:18} | {:30} | {:2} turns | {:6} ms\n",
        timestamp, outcome, model, history_turns, latency_ms
    );

    match OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    {
        Ok(mut file) => {
            if let Err(e) = file.write_all(log_entry.as_bytes()) {
                tracing::warn!(error = %e, log_path, "failed to write request log");
            }
        }
        Err(e) => tracing::warn!(error = %e, log_path, "failed to open request log"),
    }
}

// Same as log_request, but the file append runs on the blocking pool
pub async fn record_request(
    log_path: String,
    outcome: &'static str,
    model: String,
    history_turns: usize,
    latency_ms: u128,
) {
    let written = tokio::task::spawn_blocking(move || {
        log_request(&log_path, outcome, &model, history_turns, latency_ms)
    })
    .await;

    if let Err(e) = written {
        tracing::warn!(error = %e, "request log task failed");
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_appends_one_line_per_call() {

        let path = std::env::temp_dir().join(format!("pq_agent_log_{}.log", std::process::id()));
        let path_str = path.to_str().unwrap();
        let _ = std::fs::remove_file(&path);

        log_request(path_str, "ok", "llama3.2", 3, 1520);
        log_request(path_str, "backend_timeout", "llama3.2", 0, 120000);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("| ok "));
        assert!(lines[0].contains(" 3 turns"));
        assert!(lines[1].contains("backend_timeout"));

        let _ = std::fs::remove_file(&path);

    }

    #[test]
    fn test_unwritable_path_does_not_panic() {

        log_request("/nonexistent-dir/requests.log", "ok", "llama3.2", 0, 1);

    }

    #[tokio::test]
    async fn test_record_request_appends_from_async_context() {

        let path = std::env::temp_dir().join(format!("pq_agent_async_log_{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        record_request(path.display().to_string(), "backend_unreachable", "llama3.2".to_string(), 10, 4).await;

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("backend_unreachable"));
        assert!(contents.contains("10 turns"));

        let _ = std::fs::remove_file(&path);

    }

}
