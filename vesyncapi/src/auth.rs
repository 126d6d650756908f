// Login handshake
//
// Exchanges username and md5-hashed password for a token and account id.
// The session only changes when the server answered with code 0 and a result
// holding both values.

use tracing::{debug, error};

use crate::api::{request_body, Method, LOGIN_PATH};
use crate::client::{ApiResponse, VeSyncClient};
use crate::error::{Result, VeSyncError};
use crate::http::Transport;
use crate::responses::{ApiEnvelope, LoginResult};
use crate::session::{AuthToken, Session};

impl<T: Transport> VeSyncClient<T> {
    /// Logs `session` in.
    ///
    /// Fails without contacting the server if username or password is empty.
    /// A server answering with a non-zero code yields
    /// [`VeSyncError::LoginRejected`]; use [`VeSyncError::is_transport`] to
    /// tell an unreachable server apart.
    pub fn login(&self, session: &mut Session) -> Result<()> {
        if session.username().is_empty() {
            error!("username invalid");
            return Err(VeSyncError::InvalidUsername);
        }
        if session.password().is_empty() {
            error!("password invalid");
            return Err(VeSyncError::InvalidPassword);
        }

        debug!(username = session.username(), "logging in");
        let body = request_body(session, self.config(), Method::Login);
        let response: ApiResponse<ApiEnvelope<LoginResult>> =
            self.call(LOGIN_PATH, "post", None, Some(&body))?;
        let envelope = response.body;

        if !envelope.is_success() {
            debug!(code = envelope.code, "login rejected");
            return Err(VeSyncError::LoginRejected {
                code: envelope.code,
                msg: envelope.msg,
            });
        }

        let result = envelope
            .result
            .ok_or_else(|| VeSyncError::LoginError("response has no result".to_string()))?;
        if result.token.is_empty() || result.account_id.is_empty() {
            return Err(VeSyncError::LoginError(
                "token or account id is empty".to_string(),
            ));
        }

        session.authenticate(AuthToken {
            token: result.token,
            account_id: result.account_id,
        });
        debug!("login successful");
        Ok(())
    }
}
