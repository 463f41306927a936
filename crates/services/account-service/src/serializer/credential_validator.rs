//! Login credential validation.

use std::sync::Arc;

use tracing::{debug, warn};
use validator::Validate;

use common::{AppError, AppResult};
use domain::{CredentialAttempt, Credentials, MSG_UNABLE_TO_AUTHENTICATE};

use super::fields::{check_field, require_not_blank};
use crate::auth::{AuthBackend, RequestContext};

/// Validates an email/password pair for the token endpoint.
pub struct CredentialValidator {
    backend: Arc<dyn AuthBackend>,
}

impl CredentialValidator {
    pub fn new(backend: Arc<dyn AuthBackend>) -> Self {
        Self { backend }
    }

    /// Authenticate `credentials` and attach the resolved account.
    ///
    /// The email is trimmed; the password is passed to the backend exactly as
    /// given. Every rejection by the backend produces the same authorization
    /// error. Backend errors are returned unchanged and never retried.
    pub async fn validate(
        &self,
        credentials: Credentials,
        context: &RequestContext,
    ) -> AppResult<CredentialAttempt> {
        let credentials = Credentials {
            email: credentials.email.trim().to_string(),
            password: credentials.password,
        };

        let errors = credentials.validate().err();
        require_not_blank(&credentials.email)?;
        check_field(errors.as_ref(), "email")?;
        require_not_blank(&credentials.password)?;

        debug!("Authenticating {}", credentials.email);
        let account = self
            .backend
            .authenticate(&credentials.email, &credentials.password, context)
            .await?;

        match account {
            Some(account) => Ok(CredentialAttempt {
                email: credentials.email,
                password: credentials.password,
                account,
            }),
            None => {
                warn!(
                    email = %credentials.email,
                    remote_addr = ?context.remote_addr,
                    request_id = context.request_id.as_deref().unwrap_or("-"),
                    "Authentication failed"
                );
                Err(AppError::authorization(MSG_UNABLE_TO_AUTHENTICATE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MockAuthBackend;
    use domain::AccountRecord;
    use uuid::Uuid;

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn account() -> AccountRecord {
        AccountRecord::new(
            Uuid::new_v4(),
            "a@b.com".to_string(),
            "hash".to_string(),
            "A".to_string(),
        )
    }

    #[tokio::test]
    async fn test_success_attaches_account() {
        let expected = account();
        let returned = expected.clone();

        let mut backend = MockAuthBackend::new();
        backend
            .expect_authenticate()
            .withf(|email, password, _| email == "a@b.com" && password == "Abc123!@")
            .times(1)
            .returning(move |_, _, _| Ok(Some(returned.clone())));

        let validator = CredentialValidator::new(Arc::new(backend));
        let attempt = validator
            .validate(credentials("a@b.com", "Abc123!@"), &RequestContext::new())
            .await
            .unwrap();

        assert_eq!(attempt.email, "a@b.com");
        assert_eq!(attempt.password, "Abc123!@");
        assert_eq!(attempt.account, expected);
    }

    #[tokio::test]
    async fn test_rejection_is_authorization_error() {
        let mut backend = MockAuthBackend::new();
        backend
            .expect_authenticate()
            .returning(|_, _, _| Ok(None));

        let validator = CredentialValidator::new(Arc::new(backend));
        let err = validator
            .validate(credentials("a@b.com", "wrong"), &RequestContext::new())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AppError::Authorization("Unable to authenticate with provided credentials.".into())
        );
        assert_eq!(err.code(), "authorization");
    }

    #[tokio::test]
    async fn test_password_whitespace_reaches_backend() {
        let mut backend = MockAuthBackend::new();
        backend
            .expect_authenticate()
            .withf(|email, password, _| email == "a@b.com" && password == "  Abc123!@ ")
            .times(1)
            .returning(|_, _, _| Ok(Some(account())));

        let validator = CredentialValidator::new(Arc::new(backend));
        let attempt = validator
            .validate(credentials(" a@b.com ", "  Abc123!@ "), &RequestContext::new())
            .await
            .unwrap();

        assert_eq!(attempt.password, "  Abc123!@ ");
        assert_eq!(attempt.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_context_is_passed_through() {
        let ctx = RequestContext::new().with_request_id("req-42");

        let mut backend = MockAuthBackend::new();
        backend
            .expect_authenticate()
            .withf(|_, _, ctx| ctx.request_id.as_deref() == Some("req-42"))
            .times(1)
            .returning(|_, _, _| Ok(Some(account())));

        let validator = CredentialValidator::new(Arc::new(backend));
        assert!(validator
            .validate(credentials("a@b.com", "Abc123!@"), &ctx)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_blank_fields_skip_backend() {
        let mut backend = MockAuthBackend::new();
        backend.expect_authenticate().never();

        let validator = CredentialValidator::new(Arc::new(backend));
        let ctx = RequestContext::new();

        assert_eq!(
            validator
                .validate(credentials("", "Abc123!@"), &ctx)
                .await
                .unwrap_err(),
            AppError::validation("This field may not be blank.")
        );
        assert_eq!(
            validator
                .validate(credentials("a@b.com", ""), &ctx)
                .await
                .unwrap_err(),
            AppError::validation("This field may not be blank.")
        );
    }

    #[tokio::test]
    async fn test_whitespace_only_password_is_not_blank() {
        let mut backend = MockAuthBackend::new();
        backend
            .expect_authenticate()
            .withf(|_, password, _| password == "   ")
            .times(1)
            .returning(|_, _, _| Ok(None));

        let validator = CredentialValidator::new(Arc::new(backend));
        let err = validator
            .validate(credentials("a@b.com", "   "), &RequestContext::new())
            .await
            .unwrap_err();

        assert_eq!(err.code(), "authorization");
    }

    #[tokio::test]
    async fn test_malformed_email() {
        let mut backend = MockAuthBackend::new();
        backend.expect_authenticate().never();

        let validator = CredentialValidator::new(Arc::new(backend));
        let err = validator
            .validate(credentials("not-an-email", "Abc123!@"), &RequestContext::new())
            .await
            .unwrap_err();

        assert_eq!(err, AppError::validation("Enter a valid email address."));
        assert_eq!(err.code(), "invalid");
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let mut backend = MockAuthBackend::new();
        backend
            .expect_authenticate()
            .times(1)
            .returning(|_, _, _| Err(AppError::internal("backend down")));

        let validator = CredentialValidator::new(Arc::new(backend));
        let err = validator
            .validate(credentials("a@b.com", "Abc123!@"), &RequestContext::new())
            .await
            .unwrap_err();

        assert_eq!(err, AppError::internal("backend down"));
    }
}
