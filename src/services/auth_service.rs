use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::auth_dto::RegisterPayload;
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::user::User;
use crate::utils::crypto::{hash_password, verify_password};

const TOKEN_TTL_SECS: i64 = 3600;

const USER_COLUMNS: &str = "id, email, password_hash, username, dob, role, created_at";

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, payload: RegisterPayload) -> Result<(User, String)> {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(Error::Conflict("User already exists".to_string()));
        }

        let password_hash = hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, username, dob) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&payload.email)
        .bind(&password_hash)
        .bind(&payload.username)
        .bind(payload.dob)
        .fetch_one(&self.pool)
        .await?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Both unknown email and wrong password report the same invalid
    /// credentials message. A correct password against the wrong login
    /// surface (user vs admin) is a role mismatch, not a credential failure.
    pub async fn login(&self, email: &str, password: &str, expected_role: &str) -> Result<(User, String)> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        let Some(user) = user else {
            return Err(Error::Unauthorized("Invalid credentials".to_string()));
        };

        let password_ok = verify_password(password, &user.password_hash)
            .map_err(|_| Error::Unauthorized("Invalid credentials".to_string()))?;
        if !password_ok {
            return Err(Error::Unauthorized("Invalid credentials".to_string()));
        }

        if !user.role.eq_ignore_ascii_case(expected_role) {
            return Err(Error::Forbidden(
                "Account is not permitted on this login".to_string(),
            ));
        }

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    fn issue_token(&self, user: &User) -> Result<String> {
        let config = crate::config::get_config();
        sign_token(user, &config.jwt_secret)
    }
}

fn sign_token(user: &User, secret: &str) -> Result<String> {
    let exp = (Utc::now().timestamp() + TOKEN_TTL_SECS) as usize;
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        username: user.username.clone(),
        role: user.role.clone(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Token signing failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            password_hash: "unused".to_string(),
            username: "a".to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            role: "user".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trips_identity_and_role() {
        let user = sample_user();
        let token = sign_token(&user, "test-secret").expect("sign");

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &validation,
        )
        .expect("decode");

        assert_eq!(decoded.claims.sub, user.id.to_string());
        assert_eq!(decoded.claims.email, user.email);
        assert_eq!(decoded.claims.role, "user");
        assert_eq!(decoded.claims.user_id().unwrap(), user.id);
    }

    #[test]
    fn token_rejects_wrong_secret() {
        let user = sample_user();
        let token = sign_token(&user, "test-secret").expect("sign");

        let validation = Validation::new(Algorithm::HS256);
        let result = decode::<Claims>(&token, &DecodingKey::from_secret(b"other"), &validation);
        assert!(result.is_err());
    }
}
