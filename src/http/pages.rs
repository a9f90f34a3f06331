//! # Respuestas estándar
//! src/http/pages.rs
//!
//! Páginas HTML cortas para los códigos de estado que usan el servidor y los
//! handlers incluidos. Todo texto dinámico se escapa antes de insertarlo.

use super::{Response, StatusCode};

/// Escapa los caracteres con significado en HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Plantilla común: título, encabezado y un párrafo ya escapado
fn page(status: StatusCode, message: &str) -> Response {
    let body = format!(
        "<html><head><title>{status}</title></head>\
         <body><h2>{status}</h2><p>{message}</p></body></html>",
        status = status,
        message = message
    );
    Response::html(status, &body)
}

fn redirect(status: StatusCode, message: &str, location: &str) -> Response {
    let message = format!("{} {}", message, escape_html(location));
    page(status, &message).with_header("Location", location)
}

/// 301 con header `Location`
pub fn moved_permanently(location: &str) -> Response {
    redirect(
        StatusCode::MovedPermanently,
        "This resource has been moved permanently to",
        location,
    )
}

/// 302 con header `Location`
pub fn found(location: &str) -> Response {
    redirect(StatusCode::Found, "This resource can be found at", location)
}

/// 303 con header `Location`
pub fn see_other(location: &str) -> Response {
    redirect(StatusCode::SeeOther, "This resource can be found at", location)
}

/// 400 con la razón del rechazo
pub fn bad_request(reason: &str) -> Response {
    page(
        StatusCode::BadRequest,
        &format!("Additional Reason: {}", escape_html(reason)),
    )
}

/// 401, opcionalmente con el desafío `WWW-Authenticate`
pub fn unauthorized(challenge: Option<&str>) -> Response {
    let response = page(
        StatusCode::Unauthorized,
        "You are not authorized to access this page",
    );
    match challenge {
        Some(challenge) => response.with_header("WWW-Authenticate", challenge),
        None => response,
    }
}

/// 403 con la razón del rechazo
pub fn forbidden(reason: &str) -> Response {
    page(
        StatusCode::Forbidden,
        &format!(
            "You are forbidden from accessing this page: {}",
            escape_html(reason)
        ),
    )
}

pub fn not_found() -> Response {
    page(
        StatusCode::NotFound,
        "The page you were trying to access was not found",
    )
}

pub fn method_not_allowed() -> Response {
    page(
        StatusCode::MethodNotAllowed,
        "The method you used for accessing this page is not allowed",
    )
}

pub fn not_acceptable() -> Response {
    page(
        StatusCode::NotAcceptable,
        "The requested resource can only generate content that is not acceptable \
         according to the Accept headers sent in the request",
    )
}

pub fn im_a_teapot() -> Response {
    page(
        StatusCode::ImATeapot,
        "You tried brewing coffee, but I'm a teapot. I make tea, only tea and nothing else.",
    )
}

pub fn internal_server_error() -> Response {
    page(
        StatusCode::InternalServerError,
        "There was an error processing your request.",
    )
}

/// 501 para un path que ningún patrón registrado reconoce
pub fn handler_missing(path: &str) -> Response {
    page(
        StatusCode::NotImplemented,
        &format!(
            "The server is not configured to handle this request.<br>\
             No handler matches the URL ({})",
            escape_html(path)
        ),
    )
}
