//! Routes one chat message to the greeting or reply path of its session

use tracing::{info, warn};
use vacay_core::session::validate_session_id;
use vacay_core::utils::preview;

use crate::models::{ChatRequest, ChatResponse};
use crate::state::AgentCache;

/// Resolve the request's session and produce the agent's answer.
///
/// A session created by this request is greeted and the message content is
/// not forwarded; the client sends it again on the next turn. The session's
/// own lock is held for the whole turn, and a new session is locked by its
/// creator before anyone else can see it, so the greeting always comes first
/// and later turns run in lock order while other sessions proceed.
pub async fn dispatch(
    sessions: &AgentCache,
    request: &ChatRequest,
) -> vacay_core::Result<ChatResponse> {
    validate_session_id(&request.session_id)?;
    let session_label = preview(&request.session_id, 64);

    let lookup = sessions.lookup(&request.session_id)?;

    let text = match lookup.first_turn {
        Some(mut agent) => {
            if !request.message_content.trim().is_empty() {
                warn!(
                    session = %session_label,
                    "First message of a new session is not processed: {}",
                    preview(&request.message_content, 80)
                );
            }
            agent.greet().await
        }
        None => {
            let mut agent = lookup.session.lock().await;
            info!(session = %session_label, "Replying to {:?} message", request.message_type);
            agent.reply(&request.message_content).await
        }
    };

    Ok(ChatResponse::final_answer(request.message_type, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentType, ResponseCategory};
    use crate::testing::{fake_cache, GREETING};
    use std::sync::Arc;
    use std::time::Duration;

    fn request(session_id: &str, content: &str) -> ChatRequest {
        ChatRequest {
            message_type: ContentType::Text,
            message_content: content.to_string(),
            session_id: session_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_request_greets_then_replies() {
        let cache = fake_cache();

        let first = dispatch(&cache, &request("S1", "I want to book")).await.unwrap();
        assert_eq!(first.response_content, GREETING);
        assert_eq!(first.response_category, ResponseCategory::AgentResponse);

        let second = dispatch(&cache, &request("S1", "hello")).await.unwrap();
        assert_eq!(second.response_content, "You said: hello");

        let session = cache.get_or_create("S1").unwrap();
        let agent = session.lock().await;
        let turns: Vec<(&str, &str)> = agent
            .transcript()
            .iter()
            .map(|m| (m.role.as_str(), m.content.as_str()))
            .collect();
        assert_eq!(turns, vec![("assistant", GREETING), ("user", "hello")]);
    }

    #[tokio::test]
    async fn test_response_echoes_content_type() {
        let cache = fake_cache();
        let mut req = request("S2", "");
        req.message_type = ContentType::Audio;

        let response = dispatch(&cache, &req).await.unwrap();
        assert_eq!(response.response_type, ContentType::Audio);
    }

    #[tokio::test]
    async fn test_invalid_session_id_rejected() {
        let cache = fake_cache();
        let err = dispatch(&cache, &request("  ", "hi")).await.unwrap_err();
        assert!(matches!(err, vacay_core::Error::Validation(_)));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_agent_construction_failure_propagates() {
        let cache = vacay_core::session::SessionCache::new(
            vacay_core::session::SessionStore::new(Duration::from_secs(60), || {
                Err(vacay_core::Error::Provider("no endpoint".to_string()))
            }),
            Duration::from_secs(60),
        );
        let err = dispatch(&cache, &request("S3", "hi")).await.unwrap_err();
        assert!(matches!(err, vacay_core::Error::Provider(_)));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_turns_on_one_session_are_serialized() {
        let cache = Arc::new(fake_cache());
        dispatch(&cache, &request("S4", "")).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..8 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                dispatch(&cache, &request("S4", &format!("m{i}"))).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let session = cache.get_or_create("S4").unwrap();
        let agent = session.lock().await;
        // greeting plus exactly one user turn per request, none lost
        assert_eq!(agent.transcript().len(), 9);
        assert_eq!(
            agent.transcript().iter().filter(|m| m.is_role("user")).count(),
            8
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_first_requests_greet_before_reply() {
        let cache = Arc::new(fake_cache());

        let mut pairs = Vec::new();
        for i in 0..500 {
            let id = format!("race-{i}");
            let first = tokio::spawn({
                let (cache, id) = (cache.clone(), id.clone());
                async move { dispatch(&cache, &request(&id, "x")).await.unwrap() }
            });
            let second = tokio::spawn({
                let (cache, id) = (cache.clone(), id.clone());
                async move { dispatch(&cache, &request(&id, "y")).await.unwrap() }
            });
            pairs.push((id, first, second));
        }

        for (id, first, second) in pairs {
            let answers = [first.await.unwrap(), second.await.unwrap()];
            let greetings = answers
                .iter()
                .filter(|a| a.response_content == GREETING)
                .count();
            assert_eq!(greetings, 1, "session {id}");

            let session = cache.get_or_create(&id).unwrap();
            let agent = session.lock().await;
            let transcript = agent.transcript();
            assert_eq!(transcript.len(), 2, "session {id}");
            assert_eq!(transcript[0].content, GREETING, "session {id}");
            assert!(transcript[1].is_role("user"), "session {id}");
        }
    }
}
