use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::{HeaderMap, Method, Request, Uri, body::Incoming};
use std::collections::HashMap;
use std::{convert::Infallible, sync::Arc};
use tracing::{debug, error, warn};

use crate::command::handlers::StreamHandler;
use crate::command::parser::parse_request;
use crate::engine::errors::StreamError;
use crate::engine::store::TargetResolver;
use crate::frontend::context::FrontendContext;
use crate::shared::response::{JsonRenderer, Renderer, Response, StatusCode};

/// Header carrying the guid of the user the stream is computed for.
pub const USER_GUID_HEADER: &str = "x-user-guid";

pub async fn handle_request(
    req: Request<Incoming>,
    ctx: Arc<FrontendContext>,
) -> Result<hyper::Response<String>, Infallible> {
    let (parts, _body) = req.into_parts();
    Ok(route(&parts.method, &parts.uri, &parts.headers, ctx).await)
}

/// Dispatches on method and path. Split from [`handle_request`] so it can be
/// driven without a socket.
pub async fn route(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    ctx: Arc<FrontendContext>,
) -> hyper::Response<String> {
    debug!(target: "wall_stream::http", %method, %uri, "HTTP request");

    match (method, uri.path()) {
        (&Method::GET, "/stream") => {
            let response = serve_stream(uri, headers, ctx).await;
            render(&response)
        }
        (_, "/stream") => plain(hyper::StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed"),
        _ => plain(hyper::StatusCode::NOT_FOUND, "Not Found"),
    }
}

async fn serve_stream(uri: &Uri, headers: &HeaderMap, ctx: Arc<FrontendContext>) -> Response {
    let params: HashMap<String, String> = match uri.query() {
        Some(query) => match serde_urlencoded::from_str(query) {
            Ok(params) => params,
            Err(e) => {
                warn!(target: "wall_stream::http", error = %e, "Undecodable query string");
                return Response::error(StatusCode::BadRequest, format!("Invalid query string: {e}"));
            }
        },
        None => HashMap::new(),
    };

    let Some(guid) = headers
        .get(USER_GUID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|guid| !guid.is_empty())
        .map(str::to_string)
    else {
        return Response::error(StatusCode::Unauthorized, "Missing X-User-Guid header");
    };

    match tokio::task::spawn_blocking(move || run_stream(&ctx, &guid, &params)).await {
        Ok(response) => response,
        Err(e) => {
            error!(target: "wall_stream::http", error = %e, "Stream task failed");
            Response::error(StatusCode::InternalError, StatusCode::InternalError.message())
        }
    }
}

/// Blocking part of a stream request: identity lookup, parsing, query and rendering.
fn run_stream(ctx: &FrontendContext, guid: &str, params: &HashMap<String, String>) -> Response {
    let user = match ctx.store.find_user(guid) {
        Ok(Some(user)) if user.enabled => user,
        Ok(_) => {
            warn!(target: "wall_stream::http", guid, "Unknown or disabled acting user");
            return Response::error(StatusCode::Unauthorized, "Unknown user");
        }
        Err(e) => return stream_error(StreamError::from(e)),
    };

    let request = match parse_request(params, user.into(), &ctx.defaults) {
        Ok(request) => request,
        Err(e) => return stream_error(StreamError::from(e)),
    };

    let handler = StreamHandler::new(ctx.store.as_ref(), &ctx.registry, &ctx.renderer);
    match handler.run(&request) {
        Ok(page) => Response::Stream(page),
        Err(e) => stream_error(e),
    }
}

fn stream_error(e: StreamError) -> Response {
    e.log_error();
    let status = e.status();
    // Store details stay in the log.
    if status == StatusCode::InternalError {
        return Response::error(status, status.message());
    }
    Response::error(status, e)
}

fn render(response: &Response) -> hyper::Response<String> {
    let renderer = JsonRenderer;
    let body = renderer.render(response);
    let mut http = hyper::Response::new(String::from_utf8_lossy(&body).into_owned());
    *http.status_mut() = response.status().into();
    http.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(renderer.content_type()));
    http
}

fn plain(status: hyper::StatusCode, text: &str) -> hyper::Response<String> {
    let mut http = hyper::Response::new(text.to_string());
    *http.status_mut() = status;
    http.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    http
}
