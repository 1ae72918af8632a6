use gloo::net::http::Request;
use shared::LogEntry;
use wasm_bindgen_futures::spawn_local;

const LOG_ENDPOINT: &str = "http://localhost:3000/api/logs";

/// Forwards frontend log lines to the backend's tracing output
pub struct Logger;

impl Logger {
    pub fn info_with_component(component: &str, message: &str) {
        Self::log("info", message, Some(component.to_string()));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log("warn", message, Some(component.to_string()));
    }

    pub fn error_with_component(component: &str, message: &str) {
        gloo::console::error!(format!("[{}] {}", component, message));
        Self::log("error", message, Some(component.to_string()));
    }

    fn log(level: &str, message: &str, component: Option<String>) {
        let entry = LogEntry {
            level: level.to_string(),
            message: message.to_string(),
            component,
        };

        // fire and forget
        spawn_local(async move {
            let request = match Request::post(LOG_ENDPOINT).json(&entry) {
                Ok(request) => request,
                Err(e) => {
                    gloo::console::warn!(format!("Failed to serialize log entry: {}", e));
                    return;
                }
            };
            if let Err(e) = request.send().await {
                gloo::console::warn!(format!("Failed to forward log entry: {}", e));
            }
        });
    }
}
