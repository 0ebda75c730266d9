//! HTTP handlers for reply generation, prompt improvement, and training data.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;
use crate::application::handlers::{
    GenerateReplyCommand, ImproveFromFeedbackCommand, ImproveManuallyCommand,
    LoadTrainingDataCommand, ParseConversationsQuery,
};

use super::dto::{
    ConversationsRequest, GenerateReplyRequest, GenerateReplyResponse, HealthResponse,
    ImproveAiRequest, ImproveAiResponse, ImproveManuallyRequest, ImproveManuallyResponse,
    LoadTrainingDataResponse, ParseConversationsResponse,
};

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}

/// POST /generate-reply - Predict the consultant's reply
pub async fn generate_reply(
    State(state): State<AppState>,
    payload: Result<Json<GenerateReplyRequest>, JsonRejection>,
) -> Result<Json<GenerateReplyResponse>, ApiError> {
    let Json(request) = payload?;
    let cmd = GenerateReplyCommand {
        client_sequence: request.client_sequence,
        chat_history: request.chat_history,
    };

    let result = state
        .generate_reply_handler()
        .handle(cmd)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(GenerateReplyResponse {
        ai_reply: result.reply,
    }))
}

/// POST /improve-ai - Learn from a real consultant reply
pub async fn improve_ai(
    State(state): State<AppState>,
    payload: Result<Json<ImproveAiRequest>, JsonRejection>,
) -> Result<Json<ImproveAiResponse>, ApiError> {
    let Json(request) = payload?;
    let cmd = ImproveFromFeedbackCommand::new(
        request.client_sequence,
        request.chat_history,
        request.consultant_reply,
    );

    let result = state
        .improve_from_feedback_handler()
        .handle(cmd)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(ImproveAiResponse {
        predicted_reply: result.predicted_reply,
        updated_prompt: result.updated_prompt.content().to_string(),
    }))
}

/// POST /improve-ai-manually - Apply developer instructions to the system prompt
pub async fn improve_ai_manually(
    State(state): State<AppState>,
    payload: Result<Json<ImproveManuallyRequest>, JsonRejection>,
) -> Result<Json<ImproveManuallyResponse>, ApiError> {
    let Json(request) = payload?;
    let cmd = ImproveManuallyCommand {
        instructions: request.instructions,
    };

    let result = state
        .improve_manually_handler()
        .handle(cmd)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(ImproveManuallyResponse {
        updated_prompt: result.updated_prompt.content().to_string(),
    }))
}

/// POST /parse-conversations - Segment transcripts without touching the model
pub async fn parse_conversations(
    State(state): State<AppState>,
    payload: Result<Json<ConversationsRequest>, JsonRejection>,
) -> Result<Json<ParseConversationsResponse>, ApiError> {
    let Json(request) = payload?;
    let query = ParseConversationsQuery {
        conversations: request.conversations,
    };

    let batch = state
        .parse_conversations_handler()
        .handle(&query)
        .map_err(|e| state.api_error(e))?;

    Ok(Json(ParseConversationsResponse::from(batch)))
}

/// POST /load-training-data - Segment transcripts and learn from every example
pub async fn load_training_data(
    State(state): State<AppState>,
    payload: Result<Json<ConversationsRequest>, JsonRejection>,
) -> Result<Json<LoadTrainingDataResponse>, ApiError> {
    let Json(request) = payload?;
    let cmd = LoadTrainingDataCommand {
        conversations: request.conversations,
    };

    let result = state
        .load_training_data_handler()
        .handle(cmd)
        .await
        .map_err(|e| state.api_error(e))?;

    Ok(Json(LoadTrainingDataResponse::from(result)))
}
