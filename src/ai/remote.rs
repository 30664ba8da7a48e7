//! Remote move inference over a JSON completion endpoint.
//!
//! The client posts a natural-language board description and expects a
//! single direction word back. Every request carries a hard timeout; a
//! reply that misses it is dropped by the transport and the caller
//! falls back to the local move sources.

use std::error::Error;
use std::time::Duration;

use serde::Deserialize;

use crate::ai::AiGameView;
use crate::constants::{REMOTE_MAX_TOKENS, REMOTE_TIMEOUT_MS};
use crate::grid::{Direction, Position};

/// Client for a Bearer-authenticated JSON completion endpoint.
pub struct RemoteMoveClient {
    endpoint: String,
    api_key: String,
    agent: ureq::Agent,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    completion: String,
}

impl RemoteMoveClient {
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(REMOTE_TIMEOUT_MS))
            .build();
        RemoteMoveClient {
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            agent,
        }
    }

    /// Ask the endpoint for the AI snake's next move.
    pub fn request_move(
        &self,
        view: &AiGameView,
        temperature: f64,
    ) -> Result<Direction, Box<dyn Error>> {
        let prompt = build_move_prompt(view);
        let text = self.complete(&prompt, temperature, REMOTE_MAX_TOKENS)?;
        parse_move_response(&text)
            .ok_or_else(|| format!("no direction in reply: {:?}", text).into())
    }

    /// Run one completion request. Shared with the commentary engine,
    /// which passes its own prompt and token budget.
    pub fn complete(
        &self,
        prompt: &str,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<String, Box<dyn Error>> {
        let response: CompletionResponse = self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(serde_json::json!({
                "prompt": prompt,
                "temperature": temperature,
                "max_tokens": max_tokens,
            }))?
            .into_json()?;
        Ok(response.completion)
    }
}

/// Board description the endpoint answers with a move word.
pub fn build_move_prompt(view: &AiGameView) -> String {
    let ai_head = view.ai_head().unwrap_or(Position::new(0, 0));
    let player_head = view.player_head().unwrap_or(Position::new(0, 0));
    format!(
        "You are playing Snake. Grid is {size}x{size} (0-{max} valid).\n\
         \n\
         Your head: ({}, {})\n\
         Your body: [{}]\n\
         Current direction: {}\n\
         Food at: ({}, {})\n\
         Enemy head: ({}, {})\n\
         Enemy body: [{}]\n\
         \n\
         Rules:\n\
         - Cannot reverse direction\n\
         - Must avoid walls (x<0, x>{max}, y<0, y>{max})\n\
         - Must avoid your body\n\
         - Should avoid enemy snake\n\
         - Goal: reach food before enemy\n\
         \n\
         Reply with exactly one word: UP, DOWN, LEFT, or RIGHT",
        ai_head.x,
        ai_head.y,
        format_body(view.ai_body.iter()),
        view.ai_direction.as_str(),
        view.food.x,
        view.food.y,
        player_head.x,
        player_head.y,
        format_body(view.player_body.iter()),
        size = view.grid_size,
        max = view.grid_size - 1,
    )
}

fn format_body<'a, I: Iterator<Item = &'a Position>>(segments: I) -> String {
    segments
        .map(|p| format!("({},{})", p.x, p.y))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Tolerant reply parsing: exact token first, then substring search in
/// the fixed direction order.
pub fn parse_move_response(text: &str) -> Option<Direction> {
    let cleaned = text.trim().to_uppercase();
    for dir in Direction::ALL {
        if cleaned == dir.as_str() {
            return Some(dir);
        }
    }
    for dir in Direction::ALL {
        if cleaned.contains(dir.as_str()) {
            return Some(dir);
        }
    }
    None
}
