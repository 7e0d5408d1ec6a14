use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::get,
    routing::post,
    Json, Router,
};
use folio_core::games::{stack, tictactoe, trivia, typing, GameError};
use folio_schema::{
    ErrorBody, MoveRequest, MoveResponse, StackGuessRequest, StackGuessResponse,
    TriviaAnswerRequest, TriviaAnswerResponse, TriviaQuestionView, TriviaScoreRequest,
    TriviaScoreResponse, TypingScoreRequest, TypingScoreResponse,
};

use super::settings::{settings_error, visitor_settings};
use crate::state::AppState;

type GameResult<T> = Result<Json<T>, (StatusCode, Json<ErrorBody>)>;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/typing/prompts", get(typing_prompts))
        .route("/typing/score", post(typing_score))
        .route("/trivia", get(trivia_questions))
        .route("/trivia/answer", post(trivia_answer))
        .route("/trivia/score", post(trivia_score))
        .route("/tictactoe/move", post(tictactoe_move))
        .route("/stack/guess", post(stack_guess))
}

fn game_error(err: GameError) -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::BAD_REQUEST, Json(ErrorBody::new(err.to_string())))
}

pub async fn typing_prompts() -> Json<&'static [&'static str]> {
    Json(typing::PROMPTS)
}

/// Scores an attempt. Finished prompts update the visitor's stored best
/// WPM; anonymous attempts store nothing and report no best. A settings
/// failure is logged and leaves `best_wpm` empty.
pub async fn typing_score(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<TypingScoreRequest>,
) -> GameResult<TypingScoreResponse> {
    let score = typing::score(body.prompt, &body.typed, Duration::from_millis(body.elapsed_ms))
        .map_err(game_error)?;
    let store = visitor_settings(&state.settings, &headers).map_err(settings_error)?;

    let best_wpm = match store {
        Some(store) => {
            let best = if score.done {
                store.record_typing_score(score.wpm).map(Some)
            } else {
                store.load().map(|s| s.typing_best_wpm)
            };
            best.unwrap_or_else(|e| {
                tracing::warn!("Could not read or record typing best: {e}");
                None
            })
        }
        None => None,
    };

    Ok(Json(TypingScoreResponse {
        wpm: score.wpm,
        accuracy: score.accuracy,
        done: score.done,
        best_wpm,
    }))
}

pub async fn trivia_questions() -> Json<Vec<TriviaQuestionView>> {
    Json(trivia::questions())
}

pub async fn trivia_answer(Json(body): Json<TriviaAnswerRequest>) -> GameResult<TriviaAnswerResponse> {
    trivia::check(body.question, body.choice)
        .map(Json)
        .map_err(game_error)
}

pub async fn trivia_score(Json(body): Json<TriviaScoreRequest>) -> Json<TriviaScoreResponse> {
    Json(TriviaScoreResponse {
        score: trivia::score(&body.picks),
        total: trivia::QUESTIONS.len(),
    })
}

pub async fn tictactoe_move(Json(body): Json<MoveRequest>) -> GameResult<MoveResponse> {
    tictactoe::play(&body.cells, body.cell)
        .map(Json)
        .map_err(game_error)
}

pub async fn stack_guess(Json(body): Json<StackGuessRequest>) -> Json<StackGuessResponse> {
    Json(stack::guess(&body.guess, &body.found))
}
