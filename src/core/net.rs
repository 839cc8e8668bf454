use reqwest::Response;
use serde_json::Value;

use crate::core::SvError;

/// Pulls a human-readable message out of an error body (`{"message": ..}` or `{"error": ..}`).
fn body_message(body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(body).ok()?;
    ["message", "error", "msg"]
        .iter()
        .find_map(|k| v.get(*k).and_then(Value::as_str))
        .map(str::to_string)
}

/// Reads a response body as JSON and maps unsuccessful outcomes onto `SvError`.
///
/// When `client_errors_are_final` is set, a 4xx other than 408/429 becomes `SvError::Api`
/// carrying the backend's message, so it is shown to the user rather than masked. A
/// successful status whose body says `"success": false` is always `SvError::Api`.
pub(crate) async fn read_json(
    resp: Response,
    client_errors_are_final: bool,
) -> Result<Value, SvError> {
    let status = resp.status();
    let code = status.as_u16();
    let url = resp.url().to_string();
    let body = resp.text().await?;

    if std::env::var("SV_DEBUG").ok().as_deref() == Some("1") {
        eprintln!("SV_DEBUG: {code} {url} ({} bytes)", body.len());
    }

    if status.is_success() {
        let value: Value = if body.trim().is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(&body)?
        };
        if value.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(SvError::Api {
                status: code,
                message: body_message(&body).unwrap_or_else(|| "request was not successful".into()),
            });
        }
        return Ok(value);
    }

    if client_errors_are_final && status.is_client_error() && code != 408 && code != 429 {
        return Err(SvError::Api {
            status: code,
            message: body_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request rejected").into()),
        });
    }

    Err(match code {
        401 => SvError::Unauthorized { url },
        429 => SvError::RateLimited { url },
        _ => SvError::Status { status: code, url },
    })
}
