//! Route handlers.
//!
//! One function per route. Every handler returns a fully-populated
//! [`Response`]; error branches stay local — nothing propagates past the
//! dispatcher, and every failure becomes a 4xx/5xx body.

use crate::context::{Context, IMAGES};
use crate::files::FileStore;
use crate::http::{QueryError, QueryParams, Response, StatusCode};

mod github;
mod weather;

pub use github::github;
pub use weather::weather;

/// Placeholder token in the root template replaced by the directory listing.
const LINKS_TOKEN: &str = "${links}";

/// Root directory page: the `www/root.html` template with `${links}`
/// substituted by a listing of the `www` directory.
pub async fn root(ctx: &Context) -> Response {
    let template = match ctx.files.read("www/root.html") {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            return Response::plain(
                StatusCode::InternalServerError,
                format!("Error reading root page: {e}"),
            );
        }
    };

    let page = template.replace(LINKS_TOKEN, &file_list_html(ctx.files.as_ref()));
    Response::html(StatusCode::Ok, page)
}

// Listing failure is reported as "no files", not as an error.
fn file_list_html(files: &dyn FileStore) -> String {
    let names = files.list("www");
    if names.is_empty() {
        return "No files in directory".to_owned();
    }

    let mut html = String::from("<ul>\n");
    for name in &names {
        html.push_str(&format!("<li>{name}</li>"));
    }
    html.push_str("</ul>\n");
    html
}

/// `json` route: one of the demo images, picked uniformly at random,
/// rendered as JSON.
pub fn json_image() -> Response {
    let (header, image) = IMAGES[fastrand::usize(..IMAGES.len())];
    let body = serde_json::json!({ "header": header, "image": image });
    Response::json(StatusCode::Ok, body.to_string())
}

/// `random` route: a random index is drawn but the static `www/index.html`
/// page is served regardless. The unused draw is historical behavior,
/// preserved on purpose.
pub fn random_image(ctx: &Context) -> Response {
    let _ = fastrand::usize(..IMAGES.len());

    match ctx.files.read("www/index.html") {
        Ok(bytes) => Response::html(StatusCode::Ok, String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => Response::plain(
            StatusCode::InternalServerError,
            format!("Error reading image page: {e}"),
        ),
    }
}

/// `file/` route: existence check only; content transfer is stubbed.
pub fn file_lookup(ctx: &Context, name: &str) -> Response {
    if ctx.files.exists(name) {
        Response::html(
            StatusCode::Ok,
            "File exists. Content transfer is stubbed in this server.",
        )
    } else {
        Response::html(StatusCode::NotFound, format!("File not found: {name}"))
    }
}

/// `multiply?` route: multiplies the `num1` and `num2` query parameters.
///
/// The product is an `i64` with wrapping multiplication; wraparound on
/// overflow is accepted behavior.
pub fn multiply(query: &str) -> Response {
    let params = match QueryParams::decode(query) {
        Ok(params) => params,
        Err(e) => return bad_query(e),
    };

    let (Some(num1), Some(num2)) = (params.get("num1"), params.get("num2")) else {
        return Response::plain(
            StatusCode::BadRequest,
            "Missing parameters. Please provide both num1 and num2.",
        );
    };

    let (Ok(num1), Ok(num2)) = (num1.parse::<i64>(), num2.parse::<i64>()) else {
        return Response::plain(
            StatusCode::BadRequest,
            "Invalid input. Both num1 and num2 must be valid integers.",
        );
    };

    Response::plain(
        StatusCode::Ok,
        format!("Result is: {}", num1.wrapping_mul(num2)),
    )
}

/// `greet?` route: a localized greeting for `name` in language `lang`.
///
/// The language set is closed; anything unrecognized falls back to English
/// rather than erroring.
pub fn greet(query: &str) -> Response {
    let params = match QueryParams::decode(query) {
        Ok(params) => params,
        Err(e) => return bad_query(e),
    };

    let (Some(name), Some(lang)) = (params.get("name"), params.get("lang")) else {
        return Response::plain(
            StatusCode::BadRequest,
            "Missing parameters. Usage: /greet?name=Alice&lang=en",
        );
    };

    let greeting = match lang.to_lowercase().as_str() {
        "fr" => "Bonjour",
        "es" => "Hola",
        "de" => "Hallo",
        _ => "Hello",
    };

    Response::plain(StatusCode::Ok, format!("{greeting}, {name}!"))
}

// A query decode fault is a client error.
pub(crate) fn bad_query(err: QueryError) -> Response {
    Response::plain(StatusCode::BadRequest, format!("Invalid query string: {err}"))
}
