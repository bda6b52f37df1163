use crate::webauthn::RequestId;
use anyhow::Context;
use serde::Serialize;
use url::form_urlencoded;

/// Body of the "finish" calls: the request id from "begin" echoed back verbatim and the
/// ceremony result serialized to a JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishRequest {
    pub request_id: RequestId,
    pub credential: String,
}

impl FinishRequest {
    /// Serializes the credential and binds it to the request id of the ceremony.
    pub fn new<C: Serialize>(request_id: RequestId, credential: &C) -> anyhow::Result<Self> {
        Ok(Self {
            request_id,
            credential: serde_json::to_string(credential)
                .context("Cannot serialize ceremony credential.")?,
        })
    }

    /// Returns `application/x-www-form-urlencoded` representation of the request.
    pub fn to_form_body(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("requestId", self.request_id.as_str())
            .append_pair("credential", &self.credential)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::FinishRequest;
    use crate::webauthn::RequestId;
    use serde_json::json;

    #[test]
    fn builds_form_body() -> anyhow::Result<()> {
        let request = FinishRequest::new(
            RequestId::from("req+1/="),
            &json!({ "id": "AQ", "type": "public-key" }),
        )?;

        assert_eq!(request.credential, r#"{"id":"AQ","type":"public-key"}"#);
        assert_eq!(
            request.to_form_body(),
            "requestId=req%2B1%2F%3D&credential=%7B%22id%22%3A%22AQ%22%2C%22type%22%3A%22public-key%22%7D"
        );

        Ok(())
    }
}
