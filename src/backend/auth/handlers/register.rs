/**
 * Registration Handler
 *
 * POST /auth/register, `multipart/form-data` with the text fields `email`,
 * `password`, `name`, `firstName` and an optional file field `photo`.
 *
 * # Validation
 *
 * - every text field present and non-blank, e-mail containing '@'
 * - e-mail (normalised) not already registered
 * - photo extension one of jpg, jpeg, png
 *
 * The photo is written to `UPLOAD_DIR/<uuid>.<ext>` only after validation
 * passed; the stored URL is `/uploads/<file>`.
 */

use std::path::Path;

use axum::{
    extract::{multipart::Field, Multipart, State},
    body::Bytes,
};

use crate::backend::auth::users::{create_user, email_taken, NewUser, PublicUser};
use crate::backend::error::BackendError;
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;
use crate::shared::normalize_email;

const PHOTO_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Default)]
struct RegisterForm {
    email: Option<String>,
    password: Option<String>,
    name: Option<String>,
    first_name: Option<String>,
    photo: Option<(String, Bytes)>,
}

pub async fn register(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<ApiResponse<PublicUser>, BackendError> {
    let mut form = RegisterForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Malformed registration form: {}", e);
        BackendError::validation("malformed multipart body")
    })? {
        let Some(field_name) = field.name().map(str::to_owned) else {
            continue;
        };
        match field_name.as_str() {
            "email" => form.email = Some(read_text(field).await?),
            "password" => form.password = Some(read_text(field).await?),
            "name" => form.name = Some(read_text(field).await?),
            "firstName" => form.first_name = Some(read_text(field).await?),
            "photo" => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                if file_name.is_empty() {
                    continue;
                }
                let extension = photo_extension(&file_name).ok_or_else(|| {
                    BackendError::validation("photo must be a .jpg, .jpeg or .png file")
                })?;
                let bytes = field.bytes().await.map_err(|e| {
                    tracing::warn!("Failed to read photo upload: {}", e);
                    BackendError::validation("unreadable photo upload")
                })?;
                form.photo = Some((extension, bytes));
            }
            other => tracing::debug!("Ignoring registration field {}", other),
        }
    }

    let email = normalize_email(&required(form.email, "email")?);
    if !email.contains('@') {
        return Err(BackendError::validation("email is not a valid address"));
    }
    let password = required(form.password, "password")?;
    let name = required(form.name, "name")?;
    let first_name = required(form.first_name, "firstName")?;

    if email_taken(&app_state.pool, &email, None).await? {
        tracing::warn!("Registration with an e-mail already in use");
        return Err(BackendError::conflict("email already in use"));
    }

    let password_hash = bcrypt::hash(&password, app_state.config.bcrypt_cost)?;

    let photo = match form.photo {
        Some((extension, bytes)) => {
            Some(save_photo(&app_state.config.upload_dir, &extension, &bytes).await?)
        }
        None => None,
    };

    let user = create_user(
        &app_state.pool,
        NewUser {
            email,
            password_hash,
            name,
            first_name,
            photo,
        },
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            BackendError::conflict("email already in use")
        }
        other => other.into(),
    })?;

    tracing::info!("Registered user {}", user.id);
    Ok(ApiResponse::created(user.into()))
}

async fn read_text(field: Field<'_>) -> Result<String, BackendError> {
    field.text().await.map_err(|e| {
        tracing::warn!("Unreadable form field: {}", e);
        BackendError::validation("unreadable form field")
    })
}

fn required(value: Option<String>, field: &str) -> Result<String, BackendError> {
    match value.map(|v| v.trim().to_owned()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(BackendError::validation(format!("{field} is required"))),
    }
}

/// Lower-cased extension of an accepted photo file name
fn photo_extension(file_name: &str) -> Option<String> {
    let extension = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    PHOTO_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

/// Write the photo under a fresh name and return its public URL
async fn save_photo(dir: &Path, extension: &str, bytes: &[u8]) -> Result<String, BackendError> {
    tokio::fs::create_dir_all(dir).await?;
    let file_name = format!("{}.{}", uuid::Uuid::new_v4(), extension);
    tokio::fs::write(dir.join(&file_name), bytes).await?;
    Ok(format!("/uploads/{file_name}"))
}
