mod extract;

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{CreateNoteRequest, MarkdownResponse, NoteDetailView, NoteListView, UpdateNoteRequest},
    service::NoteService,
};

use extract::ValidatedJson;

#[derive(OpenApi)]
#[openapi(
    paths(
        get_all_notes,
        get_note,
        get_note_markdown,
        check_note_grammar,
        create_note,
        update_note,
        delete_note,
        upload_file_markdown,
        upload_file_checker
    ),
    components(schemas(
        NoteListView,
        NoteDetailView,
        CreateNoteRequest,
        UpdateNoteRequest,
        MarkdownResponse
    )),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<Arc<NoteService>> {
    Router::new()
        .route("/", post(create_note))
        .route("/all", get(get_all_notes))
        .route(
            "/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/markdown/{id}", get(get_note_markdown))
        .route("/checker/{id}", get(check_note_grammar))
        .route("/Upload-file-Markdown", post(upload_file_markdown))
        .route("/Upload-file-Checker", post(upload_file_checker))
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Note not found").into_response()
}

#[utoipa::path(
    get,
    path = "/note/all",
    responses(
        (status = 200, description = "List of all notes without their content", body = Vec<NoteListView>)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(service): State<Arc<NoteService>>) -> Response {
    (StatusCode::OK, Json(service.list_all().await)).into_response()
}

#[utoipa::path(
    get,
    path = "/note/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteDetailView),
        (status = 404, description = "Note not found")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_note(State(service): State<Arc<NoteService>>, Path(id): Path<i64>) -> Response {
    match service.get_by_id(id).await {
        Some(note) => (StatusCode::OK, Json(note)).into_response(),
        None => not_found(),
    }
}

#[utoipa::path(
    get,
    path = "/note/markdown/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note content rendered as HTML", body = MarkdownResponse),
        (status = 404, description = "Note not found")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_note_markdown(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<i64>,
) -> Response {
    match service.render_markdown(id).await {
        Some(html) => (StatusCode::OK, Json(MarkdownResponse { html })).into_response(),
        None => not_found(),
    }
}

#[utoipa::path(
    get,
    path = "/note/checker/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Grammar check result from LanguageTool"),
        (status = 404, description = "Note not found"),
        (status = 502, description = "Grammar checker failed")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn check_note_grammar(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<i64>,
) -> Response {
    grammar_response(service.check_grammar(id).await)
}

#[utoipa::path(
    post,
    path = "/note",
    request_body = CreateNoteRequest,
    responses(
        (status = 200, description = "Note created successfully"),
        (status = 400, description = "Invalid note payload"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    ValidatedJson(payload): ValidatedJson<CreateNoteRequest>,
) -> Response {
    if !service.create(payload).await {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create note").into_response();
    }

    (StatusCode::OK, "Note created successfully").into_response()
}

#[utoipa::path(
    put,
    path = "/note/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully"),
        (status = 400, description = "Invalid note payload"),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateNoteRequest>,
) -> Response {
    let failed = || (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update note").into_response();

    match service.exists(id).await {
        Some(true) => {}
        Some(false) => return not_found(),
        None => return failed(),
    }

    if !service.update(id, payload).await {
        return failed();
    }

    (StatusCode::OK, "Note updated successfully").into_response()
}

#[utoipa::path(
    delete,
    path = "/note/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully"),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(State(service): State<Arc<NoteService>>, Path(id): Path<i64>) -> Response {
    let failed = || (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete note").into_response();

    match service.exists(id).await {
        Some(true) => {}
        Some(false) => return not_found(),
        None => return failed(),
    }

    if !service.delete(id).await {
        return failed();
    }

    (StatusCode::OK, "Note deleted successfully").into_response()
}

#[utoipa::path(
    post,
    path = "/note/Upload-file-Markdown",
    request_body(content = String, content_type = "multipart/form-data", description = "Form with a `file` field holding markdown text"),
    responses(
        (status = 200, description = "Uploaded markdown rendered as HTML", content_type = "text/html", body = String),
        (status = 400, description = "No file uploaded")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn upload_file_markdown(multipart: Multipart) -> Response {
    let content = match read_upload(multipart).await {
        Ok(content) => content,
        Err(response) => return response,
    };

    Html(NoteService::render_markdown_content(&content)).into_response()
}

#[utoipa::path(
    post,
    path = "/note/Upload-file-Checker",
    request_body(content = String, content_type = "multipart/form-data", description = "Form with a `file` field holding the text to check"),
    responses(
        (status = 200, description = "Grammar check result from LanguageTool"),
        (status = 400, description = "No file uploaded"),
        (status = 404, description = "Grammar checker returned nothing"),
        (status = 502, description = "Grammar checker failed")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn upload_file_checker(
    State(service): State<Arc<NoteService>>,
    multipart: Multipart,
) -> Response {
    let content = match read_upload(multipart).await {
        Ok(content) => content,
        Err(response) => return response,
    };

    grammar_response(service.check_grammar_content(&content).await)
}

/// Reads the `file` field of a multipart form as UTF-8 text.
async fn read_upload(mut multipart: Multipart) -> Result<String, Response> {
    let no_file = || (StatusCode::BAD_REQUEST, "No file uploaded.").into_response();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(no_file()),
            Err(e) => {
                tracing::warn!("malformed multipart body: {e}");
                return Err((StatusCode::BAD_REQUEST, "Malformed multipart body").into_response());
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let bytes = field.bytes().await.map_err(|e| {
            tracing::warn!("failed to read uploaded file: {e}");
            (StatusCode::BAD_REQUEST, "Failed to read uploaded file").into_response()
        })?;

        if bytes.is_empty() {
            return Err(no_file());
        }

        return String::from_utf8(bytes.to_vec()).map_err(|_| {
            (StatusCode::BAD_REQUEST, "Uploaded file is not valid UTF-8 text").into_response()
        });
    }
}

/// Relays a grammar check result. Anything that is not JSON is a failure
/// description from the service and is reported as a bad gateway.
fn grammar_response(result: String) -> Response {
    if result.is_empty() {
        return not_found();
    }

    match serde_json::from_str::<serde_json::Value>(&result) {
        Ok(json) => (StatusCode::OK, Json(json)).into_response(),
        Err(e) => {
            tracing::error!("grammar checker did not return JSON: {e}");
            (StatusCode::BAD_GATEWAY, result).into_response()
        }
    }
}
