use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use folio_schema::{ContactRequest, ContactResponse};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/contact", post(contact))
}

pub async fn contact(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> (StatusCode, Json<ContactResponse>) {
    let outcome = state.contact.submit(body).await;
    let status = StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(outcome.body))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use tower::ServiceExt;
    use wiremock::matchers::{any, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::router;
    use crate::state::test_support::{
        body_json, config, json_request, setup_state_with, DEAD_UPSTREAM,
    };

    fn submission() -> serde_json::Value {
        serde_json::json!({
            "name": "Riley",
            "email": "riley@example.dev",
            "message": "<b>hi</b>\nthere"
        })
    }

    #[tokio::test]
    async fn no_provider_is_500_without_outbound_call() {
        let upstream = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&upstream)
            .await;

        let mut cfg = config();
        cfg.openai.api_base = upstream.uri();
        cfg.github.api_base = upstream.uri();
        cfg.mail.resend_api_base = upstream.uri();
        let (state, _tmp) = setup_state_with(cfg);
        let response = router()
            .with_state(state)
            .oneshot(json_request("POST", "/contact", submission()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"ok": false, "error": "No email provider configured."})
        );
    }

    #[tokio::test]
    async fn resend_delivery_escapes_html() {
        let resend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emails"))
            .and(header("authorization", "Bearer re_test"))
            .and(body_partial_json(serde_json::json!({
                "to": ["aayushkumar2004@gmail.com"],
                "subject": "Portfolio Contact: Riley"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "em_42"})))
            .expect(1)
            .mount(&resend)
            .await;

        let mut cfg = config();
        cfg.mail.resend_api_key = "re_test".into();
        cfg.mail.resend_api_base = resend.uri();
        let (state, _tmp) = setup_state_with(cfg);

        let response = router()
            .with_state(state)
            .oneshot(json_request("POST", "/contact", submission()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"ok": true, "provider": "resend", "id": "em_42"})
        );

        let requests = resend.received_requests().await.unwrap();
        let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let html = sent["html"].as_str().unwrap();
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;<br/>there"));
    }

    #[tokio::test]
    async fn form_relay_failure_is_500() {
        let relay = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/f/xyz"))
            .respond_with(ResponseTemplate::new(422))
            .expect(1)
            .mount(&relay)
            .await;

        let mut cfg = config();
        cfg.mail.form_endpoint = format!("{}/f/xyz", relay.uri());
        let (state, _tmp) = setup_state_with(cfg);

        let response = router()
            .with_state(state)
            .oneshot(json_request("POST", "/contact", submission()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"ok": false, "provider": "formspree"})
        );
    }

    #[tokio::test]
    async fn unreachable_form_relay_reports_error() {
        let mut cfg = config();
        cfg.mail.form_endpoint = format!("{DEAD_UPSTREAM}/f/xyz");
        let (state, _tmp) = setup_state_with(cfg);

        let response = router()
            .with_state(state)
            .oneshot(json_request("POST", "/contact", submission()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["provider"], "formspree");
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("formspree request failed"));
    }
}
