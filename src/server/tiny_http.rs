//! tiny_http server adapter
//!
//! Handles routing, owner extraction, body parsing, and response
//! conversion for tiny_http. Requests are served by a fixed pool of
//! worker threads sharing one tracker.

use std::io::{Cursor, Read as _};
use std::sync::Arc;
use std::thread;

use log::{debug, info, warn};
use serde::{Serialize, de::DeserializeOwned};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use sprintboard::api::{
    self, ApiError, ApiResponse, CreateBoardRequest, CreateTaskRequest, IdListRequest,
    MoveBoardRequest, MoveTaskRequest, UpdateBoardRequest, UpdateTaskRequest,
};
use sprintboard::config::ServerConfig;
use sprintboard::core::models::OwnerId;
use sprintboard::core::ports::Store;
use sprintboard::service::Tracker;

/// Header carrying the authenticated owner id
pub const OWNER_HEADER: &str = "X-Owner-Id";

type HttpResponse = Response<Cursor<Vec<u8>>>;

// =============================================================================
// SERVER LOOP
// =============================================================================

/// Serve the API until the process is stopped
pub fn serve<S>(tracker: Arc<Tracker<S>>, config: &ServerConfig) -> anyhow::Result<()>
where
    S: Store + 'static,
{
    let addr = format!("{}:{}", config.host, config.port);
    let server = Arc::new(
        Server::http(&addr).map_err(|e| anyhow::anyhow!("Failed to start server on {addr}: {e}"))?,
    );
    info!("Listening on http://{addr} with {} worker(s)", config.workers.max(1));

    let handles = (0..config.workers.max(1))
        .map(|i| {
            let server = Arc::clone(&server);
            let tracker = Arc::clone(&tracker);
            thread::Builder::new()
                .name(format!("http-worker-{i}"))
                .spawn(move || worker_loop(&server, &tracker))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for handle in handles {
        if handle.join().is_err() {
            warn!("HTTP worker panicked");
        }
    }
    Ok(())
}

fn worker_loop<S: Store>(server: &Server, tracker: &Tracker<S>) {
    loop {
        let mut request = match server.recv() {
            Ok(request) => request,
            Err(e) => {
                warn!("Failed to receive request: {e}");
                break;
            },
        };

        debug!("{} {}", request.method(), request.url());
        let response = handle_api_request(tracker, &mut request);
        if let Err(e) = request.respond(response) {
            warn!("Failed to send response: {e}");
        }
    }
}

// =============================================================================
// REQUEST HANDLING
// =============================================================================

/// Handle an API request and return a response
///
/// This is the main routing function that maps URL paths to handlers.
pub fn handle_api_request<S: Store>(tracker: &Tracker<S>, request: &mut Request) -> HttpResponse {
    let url = request.url().to_string();
    let method = request.method().clone();

    let path = url.split('?').next().unwrap_or_default();
    // Supports both /api/v1/... (versioned) and /api/... (unversioned)
    let Some(api_path) = path.strip_prefix("/api/v1").or_else(|| path.strip_prefix("/api")) else {
        return not_found_response(&format!("Not found: {method} {path}"));
    };
    let segments: Vec<&str> = api_path.split('/').filter(|s| !s.is_empty()).collect();

    let owner = match owner_from(request) {
        Ok(owner) => owner,
        Err(e) => return error_response(&e),
    };

    match (method.clone(), segments.as_slice()) {
        // Boards
        (Method::Get, ["boards"]) => handle_result(api::list_boards(tracker, &owner)),
        (Method::Post, ["boards"]) => match read_json_body::<CreateBoardRequest>(request) {
            Ok(req) => handle_result(api::create_board(tracker, &owner, req)),
            Err(e) => error_response(&e),
        },
        (Method::Patch, ["boards", "order"]) => match read_json_body::<IdListRequest>(request) {
            Ok(req) => handle_result(api::reorder_boards(tracker, &owner, &req)),
            Err(e) => error_response(&e),
        },
        (Method::Get, ["boards", id]) => handle_result(api::get_board(tracker, &owner, id)),
        (Method::Put, ["boards", id]) => match read_json_body::<UpdateBoardRequest>(request) {
            Ok(req) => handle_result(api::update_board(tracker, &owner, id, req)),
            Err(e) => error_response(&e),
        },
        (Method::Delete, ["boards", id]) => handle_result(api::delete_board(tracker, &owner, id)),
        (Method::Get, ["boards", id, "check"]) => {
            handle_result(api::check_board(tracker, &owner, id))
        },
        (Method::Post, ["boards", id, "move"]) => match read_json_body::<MoveBoardRequest>(request) {
            Ok(req) => handle_result(api::move_board(tracker, &owner, id, &req)),
            Err(e) => error_response(&e),
        },
        (Method::Post, ["boards", id, "repair"]) => {
            handle_result(api::repair_board(tracker, &owner, id))
        },
        (Method::Put, ["boards", id, "columns", status]) => {
            match read_json_body::<IdListRequest>(request) {
                Ok(req) => handle_result(api::reorder_column(tracker, &owner, id, status, &req)),
                Err(e) => error_response(&e),
            }
        },

        // Tasks
        (Method::Post, ["tasks"]) => match read_json_body::<CreateTaskRequest>(request) {
            Ok(req) => handle_result(api::create_task(tracker, &owner, req)),
            Err(e) => error_response(&e),
        },
        (Method::Post, ["tasks", "delete"]) => match read_json_body::<IdListRequest>(request) {
            Ok(req) => handle_result(api::delete_tasks(tracker, &owner, &req)),
            Err(e) => error_response(&e),
        },
        (Method::Get, ["tasks", id]) => handle_result(api::get_task(tracker, &owner, id)),
        (Method::Patch, ["tasks", id]) => match read_json_body::<UpdateTaskRequest>(request) {
            Ok(req) => handle_result(api::update_task(tracker, &owner, id, req)),
            Err(e) => error_response(&e),
        },
        (Method::Delete, ["tasks", id]) => handle_result(api::delete_task(tracker, &owner, id)),
        (Method::Post, ["tasks", id, "move"]) => match read_json_body::<MoveTaskRequest>(request) {
            Ok(req) => handle_result(api::move_task(tracker, &owner, id, &req)),
            Err(e) => error_response(&e),
        },

        // Stats
        (Method::Get, ["stats"]) => handle_result(api::get_stats(tracker, &owner)),

        _ => not_found_response(&format!("API endpoint not found: {method} {api_path}")),
    }
}

/// Owner id from the request header
fn owner_from(request: &Request) -> Result<OwnerId, ApiError> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(OWNER_HEADER))
        .map(|h| h.value.as_str().trim())
        .filter(|owner| !owner.is_empty())
        .map(OwnerId::new)
        .ok_or_else(|| ApiError::unauthorized(format!("Missing {OWNER_HEADER} header")))
}

// =============================================================================
// BODY PARSING
// =============================================================================

/// Read and parse JSON body from request
fn read_json_body<T: DeserializeOwned>(request: &mut Request) -> Result<T, ApiError> {
    let mut body = String::new();
    request
        .as_reader()
        .read_to_string(&mut body)
        .map_err(|e| ApiError::bad_request(format!("Failed to read request body: {e}")))?;

    serde_json::from_str(&body).map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Convert a handler result to an HTTP response
fn handle_result<T: Serialize>(result: Result<T, ApiError>) -> HttpResponse {
    match result {
        Ok(data) => json_response(&ApiResponse::success(data), 200),
        Err(e) => error_response(&e),
    }
}

/// Create an error JSON response with appropriate status code
fn error_response(error: &ApiError) -> HttpResponse {
    let response = ApiResponse::<()>::error(error.code.as_str(), &error.message);
    json_response(&response, error.status_code())
}

/// Create a 404 not found response
fn not_found_response(message: &str) -> HttpResponse {
    error_response(&ApiError::not_found(message))
}

/// Serialize data to JSON response with status code
fn json_response<T: Serialize>(data: &T, status: u16) -> HttpResponse {
    let json = serde_json::to_string(data).unwrap_or_else(|_| r#"{"success":false}"#.to_string());
    let response = Response::from_data(json.into_bytes()).with_status_code(StatusCode(status));
    match Header::from_bytes("Content-Type", "application/json") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
