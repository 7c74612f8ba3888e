//! HTTP API tests against a demo provider on in-memory storage.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use famox_core::config::ProviderConfig;
use famox_core::provider::{self, DataProvider};
use famox_server::routes;
use famox_server::state::AppState;

fn demo_provider() -> Arc<dyn DataProvider> {
    provider::connect(&ProviderConfig::default()).unwrap()
}

fn app() -> Router {
    routes::app(AppState::new(demo_provider()))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn login(app: &Router) {
    let (status, body) = call(
        app,
        Method::POST,
        "/v1/admin/login",
        Some(json!({ "password": "famoxadmin123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "authed": true }));
}

#[tokio::test]
async fn health_reports_provider() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["provider"], "demo");
}

#[tokio::test]
async fn settings_are_public_but_updates_need_admin() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/v1/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["companyName"], "Famox Group of Companies");

    let patch = json!({ "companyName": "Famox Sdn Bhd" });
    let (status, body) = call(&app, Method::PATCH, "/v1/settings", Some(patch.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    login(&app).await;
    let (status, body) = call(&app, Method::PATCH, "/v1/settings", Some(patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["companyName"], "Famox Sdn Bhd");
    assert_eq!(body["whatsapp"], "60125882911");
}

#[tokio::test]
async fn invalid_settings_patch_is_bad_request() {
    let app = app();
    login(&app).await;
    let (status, body) = call(
        &app,
        Method::PATCH,
        "/v1/settings",
        Some(json!({ "email": "not-an-email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn catalogue_lists_filters_and_looks_up_by_slug() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/v1/catalogue", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);

    let (_, body) = call(&app, Method::GET, "/v1/catalogue?search=dryer", None).await;
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["slug"], "famox-grain-corn-mobile-dryer");

    let (_, body) = call(
        &app,
        Method::GET,
        "/v1/catalogue?category=processing&brand=famox",
        None,
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = call(&app, Method::GET, "/v1/catalogue/grain-corn-desheller", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "grain-corn-desheller");

    let (status, body) = call(&app, Method::GET, "/v1/catalogue/no-such-thing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn content_families_list_and_resolve_slugs() {
    let app = app();
    for (list, slug) in [
        ("/v1/projects", "grain-corn-plantation-kedah"),
        ("/v1/media", "pengering-mudah-alih"),
        ("/v1/solutions", "incubation-programs"),
    ] {
        let (status, body) = call(&app, Method::GET, list, None).await;
        assert_eq!(status, StatusCode::OK, "{list}");
        assert!(!body.as_array().unwrap().is_empty(), "{list}");

        let (status, body) = call(&app, Method::GET, &format!("{list}/{slug}"), None).await;
        assert_eq!(status, StatusCode::OK, "{list}/{slug}");
        assert_eq!(body["slug"], slug);

        let (status, _) = call(&app, Method::GET, &format!("{list}/missing"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{list}/missing");
    }
}

#[tokio::test]
async fn media_posts_serialize_kind_as_type() {
    let app = app();
    let (_, body) = call(&app, Method::GET, "/v1/media/pengering-mudah-alih", None).await;
    assert!(body.get("type").is_some());
    assert!(body.get("kind").is_none());
}

#[tokio::test]
async fn public_submit_then_admin_inbox() {
    let app = app();
    let input = json!({
        "name": "Farid",
        "email": "farid@example.com",
        "phone": "+60 13-000 0000",
        "enquiryType": "quote_request",
        "message": "Quote for the desheller please.",
        "itemSlug": "grain-corn-desheller"
    });
    let (status, created) = call(&app, Method::POST, "/v1/enquiries", Some(input)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "New");
    let id = created["id"].as_str().unwrap().to_owned();
    assert!(id.starts_with("e_"));

    let (status, _) = call(&app, Method::GET, "/v1/enquiries", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = call(&app, Method::GET, &format!("/v1/enquiries/{id}"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    login(&app).await;
    let (status, body) = call(&app, Method::GET, "/v1/enquiries", None).await;
    assert_eq!(status, StatusCode::OK);
    let all = body.as_array().unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0]["id"], id.as_str());

    let (_, body) = call(&app, Method::GET, "/v1/enquiries?status=Contacted", None).await;
    let contacted = body.as_array().unwrap();
    assert_eq!(contacted.len(), 1);
    assert_eq!(contacted[0]["id"], "e2");

    let (status, body) = call(&app, Method::GET, &format!("/v1/enquiries/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
}

#[tokio::test]
async fn incomplete_enquiry_is_rejected() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/v1/enquiries",
        Some(json!({ "name": "", "email": "x@example.com", "message": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn admin_updates_enquiry_status_and_notes() {
    let app = app();
    login(&app).await;

    let (status, body) = call(
        &app,
        Method::PATCH,
        "/v1/enquiries/e1",
        Some(json!({ "status": "Won", "notes": "Deposit received." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Won");
    assert_eq!(body["notes"], "Deposit received.");
    assert_eq!(body["name"], "Aiman Hakim");

    let (status, _) = call(
        &app,
        Method::PATCH,
        "/v1/enquiries/e404",
        Some(json!({ "status": "Lost" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, Method::PATCH, "/v1/enquiries/e1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn all_filter_values_mean_no_filter() {
    let app = app();
    login(&app).await;

    let (status, body) = call(&app, Method::GET, "/v1/enquiries?status=all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) = call(&app, Method::GET, "/v1/enquiries?status=new", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["status"], "New");

    let uri = "/v1/catalogue?category=all&condition=all&brand=all";
    let (status, body) = call(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn bad_query_is_json_bad_request() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/v1/catalogue?condition=broken", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].as_str().unwrap().contains("broken"));

    login(&app).await;
    let (status, body) = call(&app, Method::GET, "/v1/enquiries?status=pending", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn lowercase_status_patch_is_accepted() {
    let app = app();
    login(&app).await;
    let (status, body) = call(
        &app,
        Method::PATCH,
        "/v1/enquiries/e1",
        Some(json!({ "status": "won" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Won");
}

#[tokio::test]
async fn malformed_body_is_json_bad_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/enquiries")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let resp = app.clone().oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "bad_request");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/admin/login")
        .body(Body::from(r#"{"password":"famoxadmin123"}"#))
        .unwrap();
    let resp = app.clone().oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    login(&app).await;
    let (status, body) = call(
        &app,
        Method::PATCH,
        "/v1/enquiries/e1",
        Some(json!({ "status": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn login_logout_session_cycle() {
    let app = app();
    let (_, body) = call(&app, Method::GET, "/v1/admin/session", None).await;
    assert_eq!(body, json!({ "authed": false }));

    let (status, body) = call(
        &app,
        Method::POST,
        "/v1/admin/login",
        Some(json!({ "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    login(&app).await;
    let (_, body) = call(&app, Method::GET, "/v1/admin/session", None).await;
    assert_eq!(body, json!({ "authed": true }));

    let (status, _) = call(&app, Method::POST, "/v1/admin/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = call(&app, Method::GET, "/v1/admin/session", None).await;
    assert_eq!(body, json!({ "authed": false }));
}

#[tokio::test]
async fn dashboard_counts_seeded_data() {
    let app = app();
    let (status, _) = call(&app, Method::GET, "/v1/admin/dashboard", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    login(&app).await;
    let (status, body) = call(&app, Method::GET, "/v1/admin/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["new_enquiries"], 1);
    assert_eq!(body["enquiries_this_week"], 3);
    assert_eq!(body["catalogue_items"], 5);
    assert_eq!(body["projects"], 2);
    assert_eq!(body["published_media"], 2);
}

#[tokio::test]
async fn closed_provider_is_service_unavailable() {
    let provider = demo_provider();
    let app = routes::app(AppState::new(Arc::clone(&provider)));
    provider.close().await.unwrap();

    let (status, body) = call(&app, Method::GET, "/v1/settings", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "unavailable");
}

#[cfg(feature = "remote")]
mod remote {
    use std::time::Duration;

    use famox_core::model::{EnquiryCreateInput, EnquiryPatch, EnquiryStatus};
    use famox_core::provider::RemoteProvider;
    use tokio::net::TcpListener;

    use super::*;

    async fn serve() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app()).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn remote_provider_round_trips_through_server() {
        let url = serve().await;
        let remote = RemoteProvider::new(&url, Duration::from_secs(5)).unwrap();

        assert_eq!(remote.list_catalogue().await.unwrap().len(), 5);
        assert!(remote.project("missing").await.unwrap().is_none());
        assert!(remote.solution("incubation-programs").await.unwrap().is_some());

        assert!(!remote.is_admin_authed().await.unwrap());
        assert!(!remote.admin_login("wrong").await.unwrap());
        assert!(remote.admin_login("famoxadmin123").await.unwrap());

        let created = remote
            .create_enquiry(EnquiryCreateInput {
                name: "Remote".to_owned(),
                email: "remote@example.com".to_owned(),
                message: "Over the wire.".to_owned(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(remote.enquiry(&created.id).await.unwrap(), Some(created.clone()));

        let patch = EnquiryPatch {
            status: Some(EnquiryStatus::Contacted),
            notes: None,
        };
        let updated = remote.update_enquiry(&created.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.status, EnquiryStatus::Contacted);
        assert!(remote.update_enquiry("e404", &patch).await.unwrap().is_none());

        let stats = remote.dashboard(chrono::Utc::now()).await.unwrap();
        assert_eq!(stats.catalogue_items, 5);

        remote.admin_logout().await.unwrap();
        assert!(!remote.is_admin_authed().await.unwrap());
    }

    #[tokio::test]
    async fn remote_admin_calls_without_session_fail_with_status() {
        let url = serve().await;
        let remote = RemoteProvider::new(&url, Duration::from_secs(5)).unwrap();
        let err = remote.list_enquiries().await.unwrap_err();
        assert!(matches!(
            err,
            famox_core::error::ProviderError::Remote { status: 401, .. }
        ));
    }
}
