//! Review submission endpoint
//!
//! The request body is decoded into `SubmitRequest` and validated exactly
//! once by `SubmitRequest::validate`; the handler only sees a `NewReview`.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use review_common::db::NewReview;
use review_common::time;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::db;
use crate::error::{Error, Result};
use crate::AppState;

/// Column id as sent by clients: JSON number or a string of digits
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColumnIdInput {
    Number(i64),
    Text(String),
}

/// POST /api/submit body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub column_id: Option<ColumnIdInput>,
    pub name: Option<String>,
    pub script: Option<String>,
    pub broadcast: Option<String>,
    pub padding: Option<String>,
}

/// Treat absent and empty the same way
fn required(value: Option<String>, field: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::Validation(field)),
    }
}

impl SubmitRequest {
    /// Check presence of all five fields and normalize the column id
    ///
    /// A zero or empty column id counts as missing. Presence of every field
    /// is checked before the column id is parsed; existence of the column is
    /// checked later, by the insert statement itself.
    pub fn validate(self) -> Result<NewReview> {
        let name = required(self.name, "name")?;
        let script = required(self.script, "script")?;
        let broadcast = required(self.broadcast, "broadcast")?;
        let padding = required(self.padding, "padding")?;

        let column_id = match self.column_id {
            None | Some(ColumnIdInput::Number(0)) => return Err(Error::Validation("columnId")),
            Some(ColumnIdInput::Number(id)) => id,
            Some(ColumnIdInput::Text(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(Error::Validation("columnId"));
                }
                match text.parse::<i64>() {
                    Ok(0) => return Err(Error::Validation("columnId")),
                    Ok(id) => id,
                    Err(_) => return Err(Error::InvalidReference(text.to_string())),
                }
            }
        };

        Ok(NewReview {
            column_id,
            name,
            script,
            broadcast,
            padding,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// POST /api/submit
///
/// Returns `{status: "success"}`; every failure becomes the error envelope.
pub async fn submit_review(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>> {
    let Json(request) = payload.map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
    let review = request.validate()?;

    let mut tx = state.db.begin().await?;

    let Some(id) = db::insert_review(&mut tx, &review, time::now()).await? else {
        debug!("Rejected review for unknown column {}", review.column_id);
        return Err(Error::InvalidReference(review.column_id.to_string()));
    };
    tx.commit().await?;

    info!("Stored review {} for column {}", id, review.column_id);
    Ok(Json(StatusResponse { status: "success" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> SubmitRequest {
        SubmitRequest {
            column_id: Some(ColumnIdInput::Number(1)),
            name: Some("张三".to_string()),
            script: Some("新闻稿".to_string()),
            broadcast: Some("李四".to_string()),
            padding: Some("轻音乐".to_string()),
        }
    }

    #[test]
    fn test_validate_complete_request() {
        let review = full_request().validate().unwrap();
        assert_eq!(review.column_id, 1);
        assert_eq!(review.name, "张三");
        assert_eq!(review.padding, "轻音乐");
    }

    #[test]
    fn test_validate_column_id_as_string() {
        let request = SubmitRequest {
            column_id: Some(ColumnIdInput::Text("12".to_string())),
            ..full_request()
        };
        assert_eq!(request.validate().unwrap().column_id, 12);
    }

    #[test]
    fn test_validate_zero_or_empty_column_id_is_missing() {
        for column_id in [
            None,
            Some(ColumnIdInput::Number(0)),
            Some(ColumnIdInput::Text(String::new())),
            Some(ColumnIdInput::Text("0".to_string())),
        ] {
            let request = SubmitRequest {
                column_id,
                ..full_request()
            };
            assert!(matches!(request.validate(), Err(Error::Validation("columnId"))));
        }
    }

    #[test]
    fn test_validate_non_numeric_column_id() {
        let request = SubmitRequest {
            column_id: Some(ColumnIdInput::Text("morning".to_string())),
            ..full_request()
        };
        assert!(matches!(request.validate(), Err(Error::InvalidReference(_))));
    }

    #[test]
    fn test_validate_empty_text_field_is_missing() {
        let request = SubmitRequest {
            script: Some(String::new()),
            ..full_request()
        };
        assert!(matches!(request.validate(), Err(Error::Validation("script"))));

        let request = SubmitRequest {
            padding: None,
            ..full_request()
        };
        assert!(matches!(request.validate(), Err(Error::Validation("padding"))));
    }

    #[test]
    fn test_deserialize_camel_case_body() {
        let request: SubmitRequest = serde_json::from_str(
            r#"{"columnId": "3", "name": "a", "script": "b", "broadcast": "c", "padding": "d"}"#,
        )
        .unwrap();
        assert_eq!(request.column_id, Some(ColumnIdInput::Text("3".to_string())));
        assert_eq!(request.validate().unwrap().column_id, 3);
    }

    #[test]
    fn test_deserialize_null_fields() {
        let request: SubmitRequest =
            serde_json::from_str(r#"{"columnId": 1, "name": null}"#).unwrap();
        assert!(matches!(request.validate(), Err(Error::Validation("name"))));
    }
}
