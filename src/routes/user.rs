use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::path::Path as StdPath;
use tokio::fs;
use validator::Validate;

use crate::{
    dto::{
        user_dto::{CvResponse, ProfileData, UpdateProfilePayload},
        ApiResponse, MessageResponse,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    utils::token::generate_file_token,
    AppState,
};

pub const MAX_CV_BYTES: usize = 5 * 1024 * 1024;

#[utoipa::path(
    get,
    path = "/api/user/applications",
    responses(
        (status = 200, description = "The caller's applications"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<impl IntoResponse> {
    let applications = state
        .user_service
        .list_applications(claims.user_id()?)
        .await?;
    Ok(Json(ApiResponse::new(applications)))
}

#[utoipa::path(
    get,
    path = "/api/user/profile",
    responses(
        (status = 200, description = "Profile with active CV"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let user = state.user_service.get_by_id(user_id).await?;
    let cv = state.user_service.latest_cv(user_id).await?;
    let data = ProfileData {
        user: user.into(),
        cv: cv.map(CvResponse::from),
    };
    Ok(Json(ApiResponse::new(data)))
}

#[utoipa::path(
    put,
    path = "/api/user/profile",
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Profile updated"),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    claims: Claims,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .user_service
        .update_profile(claims.user_id()?, payload)
        .await?;
    let data = crate::dto::auth_dto::UserProfile::from(user);
    Ok(Json(ApiResponse::with_message("Profile updated", data)))
}

fn validate_cv_file(original_name: &str, data: &bytes::Bytes) -> Result<String> {
    let ext = StdPath::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let allowed_exts = ["pdf", "doc", "docx"];
    if !allowed_exts.contains(&ext.as_str()) {
        return Err(Error::BadRequest(format!(
            "File type .{} is not allowed; upload .pdf, .doc or .docx",
            ext
        )));
    }

    if data.len() > MAX_CV_BYTES {
        return Err(Error::BadRequest("CV file exceeds the 5MB limit".to_string()));
    }

    if ext == "pdf" && !data.starts_with(b"%PDF") {
        return Err(Error::BadRequest("Invalid PDF file content".to_string()));
    }

    Ok(ext)
}

#[utoipa::path(
    post,
    path = "/user/upload-cv",
    responses(
        (status = 201, description = "CV stored"),
        (status = 400, description = "Missing file or unsupported type"),
        (status = 401, description = "Missing or invalid token"),
        (status = 413, description = "File too large")
    )
)]
#[axum::debug_handler]
pub async fn upload_cv(
    State(state): State<AppState>,
    claims: Claims,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;

    let mut uploaded = None;
    while let Some(field) = multipart.next_field().await? {
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field.bytes().await?;
        uploaded = Some((original_name, mime_type, data));
        break;
    }

    let Some((original_name, mime_type, data)) = uploaded else {
        return Err(Error::BadRequest("No CV file provided".to_string()));
    };

    let ext = validate_cv_file(&original_name, &data)?;

    let upload_dir = format!("{}/cv", crate::config::get_config().uploads_dir);
    fs::create_dir_all(&upload_dir).await?;

    let filename = format!("{}.{}", generate_file_token(32), ext);
    let file_path = format!("{}/{}", upload_dir, filename);
    fs::write(&file_path, &data).await.map_err(|e| {
        tracing::error!(error = %e, "failed to write CV file");
        Error::Internal(format!("Failed to save file: {}", e))
    })?;

    let cv = state
        .user_service
        .insert_cv(user_id, &filename, &original_name, &file_path, &mime_type)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "CV uploaded successfully",
            CvResponse::from(cv),
        )),
    ))
}

#[utoipa::path(
    delete,
    path = "/user/remove-cv",
    responses(
        (status = 200, description = "CV removed"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler]
pub async fn remove_cv(
    State(state): State<AppState>,
    claims: Claims,
) -> Result<impl IntoResponse> {
    let removed = state.user_service.remove_cvs(claims.user_id()?).await?;
    for cv in &removed {
        if let Err(e) = fs::remove_file(&cv.file_path).await {
            tracing::warn!(path = %cv.file_path, error = %e, "could not delete stored CV file");
        }
    }
    Ok(Json(MessageResponse::new("CV removed")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_disallowed_extension() {
        let data = bytes::Bytes::from_static(b"MZ");
        assert!(validate_cv_file("resume.exe", &data).is_err());
    }

    #[test]
    fn rejects_pdf_without_magic_bytes() {
        let data = bytes::Bytes::from_static(b"not a pdf");
        assert!(validate_cv_file("resume.pdf", &data).is_err());
    }

    #[test]
    fn accepts_valid_pdf() {
        let data = bytes::Bytes::from_static(b"%PDF-1.7 ...");
        assert_eq!(validate_cv_file("resume.pdf", &data).unwrap(), "pdf");
    }

    #[test]
    fn rejects_oversized_file() {
        let data = bytes::Bytes::from(vec![b'a'; MAX_CV_BYTES + 1]);
        assert!(validate_cv_file("resume.doc", &data).is_err());
    }
}
