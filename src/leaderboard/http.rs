//! Hosted leaderboard over HTTP
//!
//! `POST {base}/api/games` stores a result, `GET {base}/api/games/leaderboard`
//! returns the top records. Requests go through the browser's `fetch`; native
//! builds have no transport and report [`LeaderboardError::Unsupported`].

use super::{GameRecord, GameResultRequest, LeaderboardError, LeaderboardService};

pub const SUBMIT_PATH: &str = "/api/games";
pub const LEADERBOARD_PATH: &str = "/api/games/leaderboard";

/// Client for the leaderboard REST service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpLeaderboard {
    base_url: String,
}

impl HttpLeaderboard {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the base URL and an absolute path without doubling the slash
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(target_arch = "wasm32")]
mod transport {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    use super::LeaderboardError;

    fn js_message(value: &JsValue) -> String {
        value.as_string().unwrap_or_else(|| format!("{value:?}"))
    }

    /// Send a request and return the JSON body text of a 2xx response
    pub async fn fetch_text(
        url: &str,
        method: &str,
        body: Option<&str>,
    ) -> Result<String, LeaderboardError> {
        let window = web_sys::window()
            .ok_or_else(|| LeaderboardError::Network("no window".into()))?;

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        if let Some(body) = body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|e| LeaderboardError::Network(js_message(&e)))?;
        if body.is_some() {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(|e| LeaderboardError::Network(js_message(&e)))?;
        }

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| LeaderboardError::Network(js_message(&e)))?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| LeaderboardError::Decode("fetch did not return a Response".into()))?;
        if !resp.ok() {
            return Err(LeaderboardError::Status(resp.status()));
        }

        let text_promise = resp
            .text()
            .map_err(|e| LeaderboardError::Decode(js_message(&e)))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|e| LeaderboardError::Decode(js_message(&e)))?;
        text.as_string()
            .ok_or_else(|| LeaderboardError::Decode("response body is not text".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl LeaderboardService for HttpLeaderboard {
    async fn submit(&self, request: &GameResultRequest) -> Result<GameRecord, LeaderboardError> {
        let body =
            serde_json::to_string(request).map_err(|e| LeaderboardError::Decode(e.to_string()))?;
        let text = transport::fetch_text(&self.endpoint(SUBMIT_PATH), "POST", Some(&body)).await?;
        serde_json::from_str(&text).map_err(|e| LeaderboardError::Decode(e.to_string()))
    }

    async fn top(&self, limit: usize) -> Result<Vec<GameRecord>, LeaderboardError> {
        let text = transport::fetch_text(&self.endpoint(LEADERBOARD_PATH), "GET", None).await?;
        let mut records: Vec<GameRecord> =
            serde_json::from_str(&text).map_err(|e| LeaderboardError::Decode(e.to_string()))?;
        records.truncate(limit);
        Ok(records)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl LeaderboardService for HttpLeaderboard {
    async fn submit(&self, _request: &GameResultRequest) -> Result<GameRecord, LeaderboardError> {
        Err(LeaderboardError::Unsupported)
    }

    async fn top(&self, _limit: usize) -> Result<Vec<GameRecord>, LeaderboardError> {
        Err(LeaderboardError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::tests::block_on;
    use crate::leaderboard::{fetch_leaderboard, save_game_result};

    #[test]
    fn test_endpoint_joins_cleanly() {
        let client = HttpLeaderboard::new("http://localhost:8000/");
        assert_eq!(client.endpoint(SUBMIT_PATH), "http://localhost:8000/api/games");
        let client = HttpLeaderboard::new("https://pong.example");
        assert_eq!(
            client.endpoint(LEADERBOARD_PATH),
            "https://pong.example/api/games/leaderboard"
        );
    }

    #[test]
    fn test_native_transport_degrades() {
        let client = HttpLeaderboard::new("http://localhost:8000");
        let request = GameResultRequest {
            player_name: "Ada".into(),
            player_score: 3,
            cpu_score: 2,
            target_score: 5,
        };
        assert_eq!(
            block_on(client.submit(&request)),
            Err(LeaderboardError::Unsupported)
        );
        assert_eq!(block_on(save_game_result(&client, &request)), None);
        assert!(block_on(fetch_leaderboard(&client, 20)).is_empty());
    }
}
