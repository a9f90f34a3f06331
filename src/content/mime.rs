//! Detección de MIME type por extensión de archivo.

use std::path::Path;

/// MIME type según la extensión, o `None` si no se reconoce
///
/// # Ejemplo
/// ```
/// use simple_http::content::mime;
/// use std::path::Path;
///
/// assert_eq!(mime::from_path(Path::new("www/index.HTML")), Some("text/html"));
/// assert_eq!(mime::from_path(Path::new("data.bin")), None);
/// ```
pub fn from_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();

    let mime = match extension.as_str() {
        "html" | "htm" | "shtml" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "txt" => "text/plain",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "zip" => "application/zip",
        "pdf" => "application/pdf",
        "mp3" => "audio/mpeg",
        _ => return None,
    };

    Some(mime)
}
