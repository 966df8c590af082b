//! GitHub proxy route: fetch a GitHub API path and reformat it as HTML.

use serde::Deserialize;
use thiserror::Error;

use crate::context::Context;
use crate::fetch::FetchError;
use crate::http::{QueryParams, Response, StatusCode};

use super::bad_query;

#[derive(Debug, Deserialize)]
struct Repo {
    full_name: String,
    id: i64,
    owner: Owner,
}

#[derive(Debug, Deserialize)]
struct Owner {
    login: String,
}

#[derive(Debug, Error)]
enum GithubError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("unexpected GitHub payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// `github?` route: fetches `https://api.github.com/{query}` and renders an
/// HTML list of each repository's full name, id, and owner login.
///
/// Any fetch or payload failure becomes a 500 whose body carries the error
/// message.
pub async fn github(ctx: &Context, query: &str) -> Response {
    let params = match QueryParams::decode(query) {
        Ok(params) => params,
        Err(e) => return bad_query(e),
    };

    let Some(api_path) = params.get("query") else {
        return Response::plain(StatusCode::BadRequest, "Missing 'query' parameter.");
    };

    let url = format!("https://api.github.com/{api_path}");
    match fetch_repos(ctx, &url).await {
        Ok(repos) => Response::html(StatusCode::Ok, render_repos(&repos)),
        Err(e) => Response::plain(
            StatusCode::InternalServerError,
            format!("Error fetching or parsing GitHub response: {e}"),
        ),
    }
}

// The response must be a JSON array of repository objects; anything else is
// a payload error.
async fn fetch_repos(ctx: &Context, url: &str) -> Result<Vec<Repo>, GithubError> {
    let body = ctx.fetcher.fetch(url).await?;
    let repos = serde_json::from_str(&body)?;
    Ok(repos)
}

fn render_repos(repos: &[Repo]) -> String {
    let mut html = String::from("<html><body><h2>GitHub Repositories:</h2><ul>");
    for repo in repos {
        html.push_str(&format!(
            "<li>Full Name: {}<br>ID: {}<br>Owner: {}</li><br>",
            repo.full_name, repo.id, repo.owner.login
        ));
    }
    html.push_str("</ul></body></html>");
    html
}
