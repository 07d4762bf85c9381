use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::RegistrationDraft;

pub const REGISTER_ROUTE: &str = "/api/auth/register";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub referrer: String,
    pub country: String,
    pub password: String,
    pub phone: String,
    pub coupon_code: String,
    pub package_type: String,
    pub terms: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp_code: Option<String>,
}

impl RegisterRequest {
    pub fn from_draft(draft: RegistrationDraft) -> Self {
        Self {
            full_name: draft.full_name,
            email: draft.email,
            username: draft.username,
            referrer: draft.referrer,
            country: draft.country,
            password: draft.password,
            phone: draft.phone,
            coupon_code: draft.coupon_code,
            package_type: draft.package_type,
            terms: draft.terms_accepted,
            otp_code: None,
        }
    }

    pub fn with_otp_code(mut self, code: impl Into<String>) -> Self {
        self.otp_code = Some(code.into());
        self
    }
}

/// Body returned by the registration endpoint for both success and failure statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl RegisterResponse {
    /// Reads whatever JSON the endpoint answered with. Any value is accepted;
    /// `message` and `token` are only picked up when they are strings.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            message: text("message"),
            token: text("token"),
        }
    }
}
