//! Middleware de autenticación JWT
//!
//! La emisión de tokens vive fuera de este servicio; aquí solo se
//! decodifica el bearer token, se carga el usuario y se inyecta el
//! actor autenticado en las extensions de la request. Los guards de
//! rol se aplican encima como middlewares adicionales.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    models::user::{User, UserRole},
    state::AppState,
    utils::errors::AppError,
};

/// Claims del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

/// Actor autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: UserRole,
    pub is_approved_host: bool,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Authorization token required.".to_string()))?;

    // Decodificar y validar JWT
    let token_data = decode::<Claims>(
        auth_header,
        &DecodingKey::from_secret(state.config.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid token.".to_string()))?;

    let user_id = Uuid::parse_str(&token_data.claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user id in token.".to_string()))?;

    // Verificar que el usuario existe en la base de datos
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&state.pool)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| AppError::Unauthorized("User not found.".to_string()))?;

    // Las cuentas bloqueadas por el administrador no pueden operar
    if !user.is_active {
        return Err(AppError::Unauthorized(
            "Your account has been temporarily blocked by the Administrator. Please contact support."
                .to_string(),
        ));
    }

    let authenticated_user = AuthenticatedUser {
        user_id: user.id,
        role: user.role,
        is_approved_host: user.is_approved_host,
    };

    // Inyectar usuario autenticado en las extensions
    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

/// Guard: solo hosts aprobados
pub async fn host_guard(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user.role != UserRole::Host || !user.is_approved_host {
        return Err(AppError::Forbidden(
            "You must be an approved host to access this resource.".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

/// Guard: solo el super admin
pub async fn admin_guard(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user.role != UserRole::SuperAdmin {
        return Err(AppError::Forbidden(
            "You must be a Super Admin to access this resource.".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
