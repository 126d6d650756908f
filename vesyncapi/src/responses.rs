use serde::Deserialize;
use serde_json::Value;

/// Top level object of every api response. `code` 0 means success; anything
/// else is an application error even though the HTTP exchange worked.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ApiEnvelope<R> {
    pub code: i64,
    pub msg: Option<String>,
    #[serde(rename = "traceId")]
    pub trace_id: Option<Value>,
    pub result: Option<R>,
}

impl<R> ApiEnvelope<R> {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

// response of /cloud/v1/user/login

/// Only `token` and `accountID` are used; the rest is declared so the strict
/// decoder accepts what the server sends along.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct LoginResult {
    pub token: String,
    #[serde(rename = "accountID")]
    pub account_id: String,
    pub nick_name: Option<Value>,
    pub avatar_icon: Option<Value>,
    pub accept_language: Option<Value>,
    pub country_code: Option<Value>,
    pub user_type: Option<Value>,
    pub terms_status: Option<Value>,
    pub gdpr_status: Option<Value>,
    pub birthday: Option<Value>,
    pub gender: Option<Value>,
    pub mail_confirmation: Option<Value>,
    pub register_time: Option<Value>,
    pub register_app_version: Option<Value>,
    pub user_region: Option<Value>,
}
