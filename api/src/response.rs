use compact_str::CompactString;
use serde::{de, Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::{
    error::Error,
    fmt::{Display, Formatter},
};

/// Envelope of every Bot API reply: `{"ok": true, "result": ..}` or an error description.
#[derive(Debug)]
pub enum CommonResponse<R> {
    Ok(R),
    Err(ErrorResponse),
}

impl<R> From<CommonResponse<R>> for Result<R, ErrorResponse> {
    fn from(response: CommonResponse<R>) -> Self {
        match response {
            CommonResponse::Ok(result) => Ok(result),
            CommonResponse::Err(error) => Err(error),
        }
    }
}

impl<R> CommonResponse<R> {
    pub fn into_result(self) -> Result<R, ErrorResponse> {
        self.into()
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub description: CompactString,
    pub error_code: i64,
    pub parameters: Option<ResponseParameters>,
}

/// https://core.telegram.org/bots/api#responseparameters
#[derive(Debug, Deserialize)]
pub struct ResponseParameters {
    pub migrate_to_chat_id: Option<i64>,
    pub retry_after: Option<i64>,
}

impl Display for ErrorResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "response error: {}, code: {}",
            self.description, self.error_code
        )
    }
}

impl Error for ErrorResponse {}

impl<'de, R: Deserialize<'de>> Deserialize<'de> for CommonResponse<R> {
    fn deserialize<D>(deserializer: D) -> Result<CommonResponse<R>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = Map::deserialize(deserializer)?;

        let ok = map
            .remove("ok")
            .ok_or_else(|| de::Error::missing_field("ok"))
            .map(Deserialize::deserialize)?
            .map_err(de::Error::custom)?;
        if ok {
            let result = map
                .remove("result")
                .ok_or_else(|| de::Error::missing_field("result"))
                .map(R::deserialize)?
                .map_err(de::Error::custom)?;
            Ok(CommonResponse::Ok(result))
        } else {
            ErrorResponse::deserialize(Value::Object(map))
                .map(CommonResponse::Err)
                .map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{proto::Message, response::CommonResponse};
    use assert2::{check, let_assert};
    use serde_json::json;

    #[test]
    fn deserialize_ok_response() {
        let message = json!({
            "ok": true,
            "result": {
                "message_id": 123,
                "date": 2345,
                "chat": {
                    "id": 1,
                    "type": "group",
                },
                "text": "halo"
            }
        });
        let response = serde_json::from_value::<CommonResponse<Message>>(message).unwrap();
        let_assert!(Ok(message) = response.into_result());
        check!(message.message_id == 123);
        check!(message.text.as_deref() == Some("halo"));

        let message = json!({"ok":true,"result":true,"description":"Webhook was deleted"});
        let response = serde_json::from_value::<CommonResponse<bool>>(message).unwrap();
        check!(matches!(response, CommonResponse::Ok(true)));
    }

    #[test]
    fn deserialize_error_response() {
        let message = json!({
            "ok": false,
            "error_code": 429,
            "description": "Too Many Requests: retry after 5",
            "parameters": { "retry_after": 5 }
        });
        let response = serde_json::from_value::<CommonResponse<Message>>(message).unwrap();
        let_assert!(Err(err) = response.into_result());
        check!(err.error_code == 429);
        check!(err.parameters.and_then(|p| p.retry_after) == Some(5));
    }
}
