use serde_derive::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of the authentication "finish" call.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoginFinishResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LoginFinishResponse {
    /// Returns the location to navigate to, only if the sign-in succeeded and the relying party
    /// provided a non-empty redirect URL.
    pub fn redirect_target(&self) -> Option<&str> {
        if !self.success {
            return None;
        }

        self.redirect_url.as_deref().filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::LoginFinishResponse;
    use serde_json::json;

    #[test]
    fn resolves_redirect_target() -> anyhow::Result<()> {
        for (response, target) in [
            (json!({ "success": true, "redirectUrl": "/home" }), Some("/home")),
            (json!({ "success": true }), None),
            (json!({ "success": true, "redirectUrl": "" }), None),
            (json!({ "success": false, "redirectUrl": "/home" }), None),
            (json!({ "success": false }), None),
            (json!({}), None),
        ] {
            let response: LoginFinishResponse = serde_json::from_value(response)?;
            assert_eq!(response.redirect_target(), target);
        }

        Ok(())
    }

    #[test]
    fn keeps_unknown_fields() -> anyhow::Result<()> {
        let response: LoginFinishResponse =
            serde_json::from_value(json!({ "success": true, "username": "jane" }))?;
        assert!(response.success);
        assert_eq!(response.extra.get("username"), Some(&json!("jane")));

        Ok(())
    }
}
