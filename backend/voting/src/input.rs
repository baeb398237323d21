use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::Deserialize;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
pub struct ChoicePayload {
    pub choice: Option<String>,
}

/// Body of a `POST /vote`, resolved once by content type.
#[derive(Debug)]
pub enum VoteInput {
    Form(ChoicePayload),
    Json(ChoicePayload),
    /// Body that could not be read as either. Always an invalid choice.
    Unreadable,
}

impl VoteInput {
    pub fn into_choice(self) -> Option<String> {
        match self {
            VoteInput::Form(payload) | VoteInput::Json(payload) => payload.choice,
            VoteInput::Unreadable => None,
        }
    }
}

fn is_json(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().starts_with("application/json"))
}

impl<S> FromRequest<S> for VoteInput
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&request) {
            return Ok(match Json::<ChoicePayload>::from_request(request, state).await {
                Ok(Json(payload)) => VoteInput::Json(payload),
                Err(e) => {
                    debug!("Unreadable JSON vote: {e}");
                    VoteInput::Unreadable
                }
            });
        }

        Ok(match Form::<ChoicePayload>::from_request(request, state).await {
            Ok(Form(payload)) => VoteInput::Form(payload),
            Err(e) => {
                debug!("Unreadable form vote: {e}");
                VoteInput::Unreadable
            }
        })
    }
}
