use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::AppError;
use crate::server::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // 用户 ID
    pub exp: usize,
    pub iat: usize,
}

/// 校验通过的调用者身份，写入请求扩展供处理器提取
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i32);

/// 令牌签发在会话服务侧完成，这里只做校验
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Auth("Invalid authorization header format".to_string()))?;

    let secret = state.config.auth.jwt_secret.as_bytes();
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map_err(|_| AppError::Auth("Invalid token".to_string()))?;

    let user_id: i32 = token_data
        .claims
        .sub
        .parse()
        .map_err(|_| AppError::Auth("Invalid token subject".to_string()))?;

    request.extensions_mut().insert(AuthUser(user_id));

    Ok(next.run(request).await)
}
