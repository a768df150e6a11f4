//! Provider error code → HTTP status

use axum::http::StatusCode;

/// Map an AudD `error_code` to the status reported to the caller
///
/// Unknown codes (including 100) are 500.
pub fn status_for_provider_code(code: i64) -> StatusCode {
    match code {
        // token invalid, missing, or over quota
        900 | 901 | 902 => StatusCode::UNAUTHORIZED,
        // bad audio URL / no audio supplied
        600 | 700 => StatusCode::BAD_REQUEST,
        // malformed audio file
        500 => StatusCode::UNPROCESSABLE_ENTITY,
        // audio file too large
        400 => StatusCode::PAYLOAD_TOO_LARGE,
        // fingerprinting failed
        300 => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
