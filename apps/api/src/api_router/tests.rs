use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Request, StatusCode};
use rolegate_application::SeedMembership;
use rolegate_domain::{AuditAction, RoleName};
use rolegate_infrastructure::{InMemoryAuditRepository, InMemoryRbacRepository};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::build_router;
use crate::api_config::DEFAULT_AUTH_SUBJECT_HEADER;
use crate::api_services::{RepositorySet, build_app_state};
use crate::provisioning::run_seed;

struct TestApp {
    router: Router,
    audit_repository: Arc<InMemoryAuditRepository>,
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(error) => match error {},
        };
        let status = response.status();
        let body = match to_bytes(response.into_body(), usize::MAX).await {
            Ok(body) => body,
            Err(error) => panic!("failed to read response body: {error}"),
        };
        match serde_json::from_slice(&body) {
            Ok(value) => (status, value),
            Err(error) => panic!("response body is not json: {error}"),
        }
    }

    async fn roles(&self) -> Value {
        let (status, body) = self.send(get("/admin/roles", Some("alice"))).await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    async fn audit_count(&self) -> usize {
        self.audit_repository.entries().await.len()
    }
}

// alice=Admin, bob=User, carol=Admin+User, dave holds nothing.
async fn test_app() -> TestApp {
    let rbac_repository = Arc::new(InMemoryRbacRepository::new());
    let audit_repository = Arc::new(InMemoryAuditRepository::new());
    let repositories = RepositorySet {
        security_admin_repository: rbac_repository.clone(),
        authorization_repository: rbac_repository,
        audit_repository: audit_repository.clone(),
    };

    let state = match build_app_state(
        &repositories,
        HeaderName::from_static(DEFAULT_AUTH_SUBJECT_HEADER),
    ) {
        Ok(state) => state,
        Err(error) => panic!("failed to build app state: {error}"),
    };

    let memberships = [
        ("alice", "Admin"),
        ("bob", "User"),
        ("carol", "Admin"),
        ("carol", "User"),
    ]
    .into_iter()
    .map(|(subject, role)| match RoleName::new(role) {
        Ok(role) => SeedMembership {
            subject: subject.to_owned(),
            role,
        },
        Err(error) => panic!("invalid seed role: {error}"),
    })
    .collect::<Vec<_>>();

    if let Err(error) = run_seed(&state.seed_service, &memberships).await {
        panic!("failed to seed test catalog: {error}");
    }

    TestApp {
        router: build_router(state),
        audit_repository,
    }
}

fn get(uri: &str, subject: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(subject) = subject {
        builder = builder.header(DEFAULT_AUTH_SUBJECT_HEADER, subject);
    }
    match builder.body(Body::empty()) {
        Ok(request) => request,
        Err(error) => panic!("invalid request: {error}"),
    }
}

fn assign(subject: &str, body: Value) -> Request<Body> {
    let request = Request::builder()
        .method("POST")
        .uri("/admin/assign-permission")
        .header(CONTENT_TYPE, "application/json")
        .header(DEFAULT_AUTH_SUBJECT_HEADER, subject)
        .body(Body::from(body.to_string()));
    match request {
        Ok(request) => request,
        Err(error) => panic!("invalid request: {error}"),
    }
}

fn seeded_roles() -> Value {
    json!([
        {"name": "Admin", "permissions": ["view_admin_data", "view_user_data"]},
        {"name": "User", "permissions": ["view_user_data"]}
    ])
}

#[tokio::test]
async fn check_is_public() {
    let app = test_app().await;

    let (status, body) = app.send(get("/check", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "API WORKING"}));
}

#[tokio::test]
async fn protected_routes_require_subject_header() {
    let app = test_app().await;
    let expected = json!({"message": "unauthorized: authentication required"});

    for uri in ["/admin/roles", "/role-wise-data"] {
        let (status, body) = app.send(get(uri, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body, expected);

        let (status, _) = app.send(get(uri, Some("   "))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
    }

    let request = match Request::builder()
        .method("POST")
        .uri("/admin/assign-permission")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"role": "User", "permissions": ["view_admin_data"]}).to_string(),
        )) {
        Ok(request) => request,
        Err(error) => panic!("invalid request: {error}"),
    };
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.roles().await, seeded_roles());
}

#[tokio::test]
async fn list_roles_returns_seeded_catalog() {
    let app = test_app().await;

    assert_eq!(app.roles().await, seeded_roles());
}

#[tokio::test]
async fn role_wise_data_prefers_admin_view() {
    let app = test_app().await;

    let cases = [
        ("alice", "This is ADMIN data"),
        ("bob", "This is USER data"),
        ("carol", "This is ADMIN data"),
    ];
    for (subject, expected) in cases {
        let (status, body) = app.send(get("/role-wise-data", Some(subject))).await;
        assert_eq!(status, StatusCode::OK, "{subject}");
        assert_eq!(body, json!({"data": expected}), "{subject}");
    }
}

#[tokio::test]
async fn subject_without_permissions_is_denied() {
    let app = test_app().await;

    let (status, body) = app.send(get("/role-wise-data", Some("dave"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"message": "Unauthorized"}));
}

#[tokio::test]
async fn assign_permission_replaces_role_set() {
    let app = test_app().await;
    let audit_before = app.audit_count().await;

    let (status, body) = app
        .send(assign(
            "alice",
            json!({"role": "User", "permissions": ["view_admin_data"]}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Permissions assigned successfully"}));

    assert_eq!(
        app.roles().await,
        json!([
            {"name": "Admin", "permissions": ["view_admin_data", "view_user_data"]},
            {"name": "User", "permissions": ["view_admin_data"]}
        ])
    );

    let (_, body) = app.send(get("/role-wise-data", Some("bob"))).await;
    assert_eq!(body, json!({"data": "This is ADMIN data"}));

    let entries = app.audit_repository.entries().await;
    assert_eq!(entries.len(), audit_before + 1);
    let Some(last) = entries.last() else {
        panic!("expected an audit event");
    };
    assert_eq!(last.event.action, AuditAction::SecurityRolePermissionsSynced);
    assert_eq!(last.event.subject, "alice");
    assert_eq!(last.event.resource_id, "User");
}

#[tokio::test]
async fn narrowing_admin_role_downgrades_its_holders() {
    let app = test_app().await;

    let (status, _) = app
        .send(assign(
            "alice",
            json!({"role": "Admin", "permissions": ["view_user_data"]}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.send(get("/role-wise-data", Some("alice"))).await;
    assert_eq!(body, json!({"data": "This is USER data"}));
}

#[tokio::test]
async fn duplicate_permission_names_collapse() {
    let app = test_app().await;

    let (status, _) = app
        .send(assign(
            "alice",
            json!({"role": "Admin", "permissions": ["view_user_data", "view_user_data"]}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        app.roles().await,
        json!([
            {"name": "Admin", "permissions": ["view_user_data"]},
            {"name": "User", "permissions": ["view_user_data"]}
        ])
    );
}

#[tokio::test]
async fn unknown_role_is_not_found() {
    let app = test_app().await;
    let audit_before = app.audit_count().await;

    let (status, body) = app
        .send(assign(
            "alice",
            json!({"role": "Ghost", "permissions": ["view_user_data"]}),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "not found: role 'Ghost' was not found"}));
    assert_eq!(app.roles().await, seeded_roles());
    assert_eq!(app.audit_count().await, audit_before);
}

#[tokio::test]
async fn unknown_permission_fails_the_whole_request() {
    let app = test_app().await;

    let (status, body) = app
        .send(assign(
            "alice",
            json!({"role": "Admin", "permissions": ["view_user_data", "export_data"]}),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains("'export_data'"), "{message}");
    assert!(!message.contains("'view_user_data'"), "{message}");

    assert_eq!(app.roles().await, seeded_roles());
}

#[tokio::test]
async fn empty_permission_list_is_unprocessable() {
    let app = test_app().await;
    let audit_before = app.audit_count().await;

    let (status, body) = app
        .send(assign("alice", json!({"role": "Admin", "permissions": []})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"].is_string());
    assert_eq!(app.roles().await, seeded_roles());
    assert_eq!(app.audit_count().await, audit_before);
}

#[tokio::test]
async fn malformed_payload_is_unprocessable() {
    let app = test_app().await;

    let (status, body) = app.send(assign("alice", json!({"role": "Admin"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"].is_string());

    let (status, _) = app
        .send(assign(
            "alice",
            json!({"role": "Admin", "permissions": "view_user_data"}),
        ))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.roles().await, seeded_roles());
}
