//! Blocking HTTP plumbing shared by the TAP, Sesame and formatter clients.

use log::debug;
use reqwest::blocking::{Client, Response};
use reqwest::redirect::Policy;

use crate::config::ClientConfig;
use crate::error::{TapError, TapResult};

/// Build the blocking HTTP client used for ordinary requests.
///
/// Idle connections are not kept: every request opens its own connection.
pub fn build_client(config: &ClientConfig) -> TapResult<Client> {
    build_client_with(config, Policy::default())
}

/// Build a client that does not follow redirects.
///
/// An async TAP submission answers with a `303 See Other` whose `Location`
/// header names the new job, so the redirect must stay visible.
pub fn build_submit_client(config: &ClientConfig) -> TapResult<Client> {
    build_client_with(config, Policy::none())
}

fn build_client_with(config: &ClientConfig, redirect: Policy) -> TapResult<Client> {
    let client = Client::builder()
        .timeout(config.timeout())
        .user_agent(config.http.user_agent.as_str())
        .redirect(redirect)
        .pool_max_idle_per_host(0)
        .build()?;
    Ok(client)
}

/// Form parameters of a TAP `doQuery` request in ADQL returning a VOTable.
pub fn query_form(adql: &str) -> [(&'static str, &str); 5] {
    [
        ("query", adql),
        ("request", "doQuery"),
        ("lang", "adql"),
        ("format", "votable"),
        ("phase", "run"),
    ]
}

/// GET `url` and return the body of a successful response.
pub fn get_text(client: &Client, url: &str) -> TapResult<String> {
    debug!("GET {}", url);
    let response = client.get(url).send()?;
    success_body(response)
}

/// Return the body of `response`, or an `HttpStatus` error if it is not 2xx.
pub fn success_body(response: Response) -> TapResult<String> {
    let status = response.status();
    let body = response
        .text()
        .unwrap_or_else(|_| "<empty response>".to_string());

    if !status.is_success() {
        return Err(TapError::HttpStatus {
            status: status.as_u16(),
            body: body.trim().to_string(),
        });
    }

    Ok(body)
}
