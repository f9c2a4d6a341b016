// Integration tests for the operations layer using wiremock.
#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cfops_api::{CloudControllerClient, StaticToken};
use cfops_core::{
    AuthCredentials, BindRouteServiceRequest, BindServiceRequest, ClientConfig, Context,
    ContextScope, CoreError, DeleteApplicationRequest, ErrorKind, MapRouteRequest, NameResolution,
    OperationSettings, Operations, PollConfig, RouteRef, UnbindServiceRequest,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn client(server: &MockServer) -> Arc<CloudControllerClient> {
    let tokens = Arc::new(StaticToken::new(SecretString::from("t0ken")));
    Arc::new(
        CloudControllerClient::with_client(&server.uri(), reqwest::Client::new(), tokens).unwrap(),
    )
}

fn settings() -> OperationSettings {
    OperationSettings {
        poll: PollConfig {
            interval: Duration::from_millis(1),
            timeout: None,
        },
        name_resolution: NameResolution::FirstMatch,
    }
}

fn operations(server: &MockServer, org: Option<&str>, space: Option<&str>) -> Operations {
    let client = client(server);
    let context = Context::new(
        Arc::clone(&client),
        org.map(str::to_owned),
        space.map(str::to_owned),
        NameResolution::FirstMatch,
    );
    Operations::new(client, context, settings())
}

fn resource(guid: &str, entity: Value) -> Value {
    json!({ "metadata": { "guid": guid, "url": "" }, "entity": entity })
}

fn list(total_pages: u32, resources: Vec<Value>) -> Value {
    json!({
        "total_results": resources.len(),
        "total_pages": total_pages,
        "resources": resources,
    })
}

fn job(status: &str) -> Value {
    resource("job-1", json!({ "guid": "job-1", "status": status }))
}

async fn mount_context(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .and(query_param("q", "name:my-org"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(
            1,
            vec![resource("org-1", json!({ "name": "my-org" }))],
        )))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/spaces"))
        .and(query_param("q", "name:dev"))
        .and(query_param("q", "organization_guid:org-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(
            1,
            vec![resource(
                "space-1",
                json!({ "name": "dev", "organization_guid": "org-1" }),
            )],
        )))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_app(server: &MockServer, name: &str, guid: &str) {
    Mock::given(method("GET"))
        .and(path("/v2/spaces/space-1/apps"))
        .and(query_param("q", format!("name:{name}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(
            1,
            vec![resource(
                guid,
                json!({ "name": name, "space_guid": "space-1", "state": "STOPPED" }),
            )],
        )))
        .mount(server)
        .await;
}

async fn mount_service_instance(server: &MockServer, name: &str, guid: &str) {
    Mock::given(method("GET"))
        .and(path("/v2/spaces/space-1/service_instances"))
        .and(query_param("q", format!("name:{name}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(
            1,
            vec![resource(
                guid,
                json!({ "name": name, "type": "managed_service_instance" }),
            )],
        )))
        .mount(server)
        .await;
}

async fn mount_shared_domain_and_route(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v2/organizations/org-1/private_domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(0, vec![])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/shared_domains"))
        .and(query_param("q", "name:apps.io"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(
            1,
            vec![resource("dom-1", json!({ "name": "apps.io" }))],
        )))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/routes"))
        .and(query_param("q", "domain_guid:dom-1"))
        .and(query_param("q", "host:web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(
            1,
            vec![resource(
                "route-1",
                json!({ "host": "web", "domain_guid": "dom-1", "space_guid": "space-1", "path": "" }),
            )],
        )))
        .mount(server)
        .await;
}

fn web_route() -> RouteRef {
    RouteRef {
        domain: "apps.io".into(),
        host: "web".into(),
        ..RouteRef::default()
    }
}

// ── Pagination & name resolution ────────────────────────────────────

#[tokio::test]
async fn test_list_organizations_two_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(
            2,
            vec![resource("test-id-1", json!({ "name": "test-name-1" }))],
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(
            2,
            vec![resource("test-id-2", json!({ "name": "test-name-2" }))],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let ops = operations(&server, None, None);
    let orgs = ops.organizations().list().await.unwrap();

    let pairs: Vec<(&str, &str)> = orgs
        .iter()
        .map(|o| (o.id.as_str(), o.name.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("test-id-1", "test-name-1"), ("test-id-2", "test-name-2")]
    );
}

#[tokio::test]
async fn test_get_organization_matches_on_second_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(
            2,
            vec![resource("test-id-1", json!({ "name": "test-name-1" }))],
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(
            2,
            vec![resource("test-id-2", json!({ "name": "test-name-2" }))],
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/spaces"))
        .and(query_param("q", "organization_guid:test-id-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(
            1,
            vec![resource(
                "s-1",
                json!({ "name": "prod", "organization_guid": "test-id-2" }),
            )],
        )))
        .mount(&server)
        .await;

    let ops = operations(&server, None, None);
    let org = ops.organizations().get("test-name-2").await.unwrap();

    assert_eq!(org.id, "test-id-2");
    assert_eq!(org.spaces, vec!["prod".to_owned()]);
}

#[tokio::test]
async fn test_unknown_application_is_invalid_argument() {
    let server = MockServer::start().await;
    mount_context(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/spaces/space-1/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(0, vec![])))
        .mount(&server)
        .await;

    let ops = operations(&server, Some("my-org"), Some("dev"));
    let err = ops.applications().get("ghost").await.unwrap_err();

    assert_eq!(err.to_string(), "Application ghost does not exist");
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

// ── Context ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_organization_makes_no_requests() {
    let server = MockServer::start().await;
    let ops = operations(&server, None, Some("dev"));

    let err = ops.spaces().list().await.unwrap_err();

    assert!(matches!(
        err,
        CoreError::MissingContext {
            scope: ContextScope::Organization
        }
    ));
    assert_eq!(err.kind(), ErrorKind::IllegalState);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_space_makes_no_requests() {
    let server = MockServer::start().await;
    let ops = operations(&server, Some("my-org"), None);

    for err in [
        ops.applications().list().await.unwrap_err(),
        ops.services().list_instances().await.unwrap_err(),
        ops.routes().list().await.unwrap_err(),
        ops.services().delete_instance("db").await.unwrap_err(),
    ] {
        assert_eq!(err.to_string(), "No space targeted");
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_context_is_resolved_once() {
    let server = MockServer::start().await;
    mount_context(&server).await;

    Mock::given(method("GET"))
        .and(path("/v2/spaces/space-1/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(1, vec![])))
        .expect(2)
        .mount(&server)
        .await;

    let ops = operations(&server, Some("my-org"), Some("dev"));
    ops.applications().list().await.unwrap();
    ops.applications().list().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_first_use_resolves_once() {
    let server = MockServer::start().await;
    mount_context(&server).await;

    let client = client(&server);
    let context = Context::new(
        client,
        Some("my-org".into()),
        Some("dev".into()),
        NameResolution::FirstMatch,
    );

    let (a, b, c) = tokio::join!(context.space_id(), context.space_id(), context.organization_id());

    assert_eq!(a.unwrap(), "space-1");
    assert_eq!(b.unwrap(), "space-1");
    assert_eq!(c.unwrap(), "org-1");
}

#[tokio::test]
async fn test_pre_resolved_context_skips_lookups() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/spaces/space-9/apps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(
            1,
            vec![resource(
                "app-1",
                json!({ "name": "web", "space_guid": "space-9", "state": "STARTED" }),
            )],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let context = Context::resolved(Arc::clone(&client), Some("org-9".into()), Some("space-9".into()));
    let ops = Operations::new(client, context, settings());

    let apps = ops.applications().list().await.unwrap();
    assert_eq!(apps[0].name, "web");
}

// ── Jobs ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_instance_polls_job_to_finished() {
    let server = MockServer::start().await;
    mount_context(&server).await;
    mount_service_instance(&server, "db", "si-1").await;

    Mock::given(method("DELETE"))
        .and(path("/v2/service_instances/si-1"))
        .and(query_param("async", "true"))
        .respond_with(ResponseTemplate::new(202).set_body_json(job("queued")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/jobs/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job("running")))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/jobs/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job("finished")))
        .expect(1)
        .mount(&server)
        .await;

    let ops = operations(&server, Some("my-org"), Some("dev"));
    ops.services().delete_instance("db").await.unwrap();
}

#[tokio::test]
async fn test_failed_job_surfaces_platform_error() {
    let server = MockServer::start().await;
    mount_context(&server).await;
    mount_service_instance(&server, "db", "si-1").await;

    Mock::given(method("DELETE"))
        .and(path("/v2/service_instances/si-1"))
        .respond_with(ResponseTemplate::new(202).set_body_json(job("queued")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/jobs/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(resource(
            "job-1",
            json!({
                "guid": "job-1",
                "status": "failed",
                "error_details": {
                    "code": 10_001,
                    "description": "Service broker failed to delete service instance",
                    "error_code": "CF-ServiceBrokerBadResponse"
                }
            }),
        )))
        .mount(&server)
        .await;

    let ops = operations(&server, Some("my-org"), Some("dev"));
    let err = ops.services().delete_instance("db").await.unwrap_err();

    match err {
        CoreError::JobFailed {
            job_id,
            code,
            error_code,
            description,
        } => {
            assert_eq!(job_id, "job-1");
            assert_eq!(code, Some(10_001));
            assert_eq!(error_code.as_deref(), Some("CF-ServiceBrokerBadResponse"));
            assert_eq!(
                description,
                "Service broker failed to delete service instance"
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_cancelled_polling_stops_requests() {
    let server = MockServer::start().await;
    mount_context(&server).await;
    mount_service_instance(&server, "db", "si-1").await;

    Mock::given(method("DELETE"))
        .and(path("/v2/service_instances/si-1"))
        .respond_with(ResponseTemplate::new(202).set_body_json(job("queued")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/jobs/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(job("running")))
        .expect(0)
        .mount(&server)
        .await;

    let ops = operations(&server, Some("my-org"), Some("dev"));
    ops.cancellation_token().cancel();
    let err = ops.services().delete_instance("db").await.unwrap_err();

    assert!(matches!(err, CoreError::Cancelled { .. }));
    assert_eq!(err.kind(), ErrorKind::Cancelled);
}

#[tokio::test]
async fn test_poll_timeout_is_reported() {
    let server = MockServer::start().await;
    mount_context(&server).await;
    mount_service_instance(&server, "db", "si-1").await;

    Mock::given(method("DELETE"))
        .and(path("/v2/service_instances/si-1"))
        .respond_with(ResponseTemplate::new(202).set_body_json(job("running")))
        .mount(&server)
        .await;

    let client = client(&server);
    let context = Context::new(
        Arc::clone(&client),
        Some("my-org".into()),
        Some("dev".into()),
        NameResolution::FirstMatch,
    );
    let ops = Operations::new(
        client,
        context,
        OperationSettings {
            poll: PollConfig {
                interval: Duration::from_millis(1),
                timeout: Some(Duration::ZERO),
            },
            name_resolution: NameResolution::FirstMatch,
        },
    );

    let err = ops.services().delete_instance("db").await.unwrap_err();
    assert!(matches!(err, CoreError::PollTimeout { .. }));
}

// ── Idempotent bindings ─────────────────────────────────────────────

#[tokio::test]
async fn test_bind_route_already_bound_is_success() {
    let server = MockServer::start().await;
    mount_context(&server).await;
    mount_service_instance(&server, "route-svc", "si-1").await;
    mount_shared_domain_and_route(&server).await;

    Mock::given(method("PUT"))
        .and(path("/v2/service_instances/si-1/routes/route-1"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 130_008,
            "description": "The route and service instance are already bound.",
            "error_code": "CF-ServiceInstanceAlreadyBoundToSameRoute"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ops = operations(&server, Some("my-org"), Some("dev"));
    ops.services()
        .bind_route(&BindRouteServiceRequest {
            service_instance: "route-svc".into(),
            route: web_route(),
            parameters: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_bind_service_already_bound_is_success() {
    let server = MockServer::start().await;
    mount_context(&server).await;
    mount_app(&server, "web", "app-1").await;
    mount_service_instance(&server, "db", "si-1").await;

    Mock::given(method("POST"))
        .and(path("/v2/service_bindings"))
        .and(body_json(json!({ "app_guid": "app-1", "service_instance_guid": "si-1" })))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 90_003,
            "description": "The app is already bound to the service.",
            "error_code": "CF-ServiceBindingAppServiceTaken"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ops = operations(&server, Some("my-org"), Some("dev"));
    ops.services()
        .bind(&BindServiceRequest {
            application: "web".into(),
            service_instance: "db".into(),
            parameters: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_other_binding_errors_propagate() {
    let server = MockServer::start().await;
    mount_context(&server).await;
    mount_app(&server, "web", "app-1").await;
    mount_service_instance(&server, "db", "si-1").await;

    Mock::given(method("POST"))
        .and(path("/v2/service_bindings"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 130_008,
            "description": "wrong code for an app binding",
            "error_code": "CF-Other"
        })))
        .mount(&server)
        .await;

    let ops = operations(&server, Some("my-org"), Some("dev"));
    let err = ops
        .services()
        .bind(&BindServiceRequest {
            application: "web".into(),
            service_instance: "db".into(),
            parameters: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.platform_code(), Some(130_008));
    assert_eq!(err.kind(), ErrorKind::Platform);
}

#[tokio::test]
async fn test_unbind_stops_at_first_binding() {
    let server = MockServer::start().await;
    mount_context(&server).await;
    mount_app(&server, "web", "app-1").await;
    mount_service_instance(&server, "db", "si-1").await;

    Mock::given(method("GET"))
        .and(path("/v2/apps/app-1/service_bindings"))
        .and(query_param("q", "service_instance_guid:si-1"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(
            2,
            vec![resource(
                "binding-1",
                json!({ "app_guid": "app-1", "service_instance_guid": "si-1" }),
            )],
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/apps/app-1/service_bindings"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(2, Vec::new())))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v2/service_bindings/binding-1"))
        .and(query_param("async", "true"))
        .respond_with(ResponseTemplate::new(202).set_body_json(job("finished")))
        .expect(1)
        .mount(&server)
        .await;

    let ops = operations(&server, Some("my-org"), Some("dev"));
    ops.services()
        .unbind(&UnbindServiceRequest {
            application: "web".into(),
            service_instance: "db".into(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unbind_without_binding_is_not_found() {
    let server = MockServer::start().await;
    mount_context(&server).await;
    mount_app(&server, "web", "app-1").await;
    mount_service_instance(&server, "db", "si-1").await;

    Mock::given(method("GET"))
        .and(path("/v2/apps/app-1/service_bindings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(1, Vec::new())))
        .mount(&server)
        .await;

    let ops = operations(&server, Some("my-org"), Some("dev"));
    let err = ops
        .services()
        .unbind(&UnbindServiceRequest {
            application: "web".into(),
            service_instance: "db".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Service binding web/db does not exist");
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

// ── Routes & applications ───────────────────────────────────────────

#[tokio::test]
async fn test_map_creates_missing_route() {
    let server = MockServer::start().await;
    mount_context(&server).await;
    mount_app(&server, "web", "app-1").await;

    Mock::given(method("GET"))
        .and(path("/v2/organizations/org-1/private_domains"))
        .and(query_param("q", "name:apps.io"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(
            1,
            vec![resource(
                "dom-9",
                json!({ "name": "apps.io", "owning_organization_guid": "org-1" }),
            )],
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/routes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(0, vec![])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v2/routes"))
        .and(body_json(json!({ "domain_guid": "dom-9", "space_guid": "space-1", "host": "web" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(resource(
            "route-new",
            json!({ "host": "web", "domain_guid": "dom-9", "space_guid": "space-1" }),
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v2/routes/route-new/apps/app-1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(resource(
            "route-new",
            json!({ "host": "web", "domain_guid": "dom-9", "space_guid": "space-1" }),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let ops = operations(&server, Some("my-org"), Some("dev"));
    ops.routes()
        .map(&MapRouteRequest {
            application: "web".into(),
            route: web_route(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_application_with_routes() {
    let server = MockServer::start().await;
    mount_context(&server).await;
    mount_app(&server, "web", "app-1").await;

    Mock::given(method("GET"))
        .and(path("/v2/apps/app-1/routes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(
            1,
            vec![resource(
                "route-1",
                json!({ "host": "web", "domain_guid": "dom-1", "space_guid": "space-1" }),
            )],
        )))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v2/routes/route-1"))
        .respond_with(ResponseTemplate::new(202).set_body_json(job("finished")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v2/apps/app-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let ops = operations(&server, Some("my-org"), Some("dev"));
    ops.applications()
        .delete(&DeleteApplicationRequest {
            name: "web".into(),
            delete_routes: true,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_application_renders_urls() {
    let server = MockServer::start().await;
    mount_context(&server).await;
    mount_app(&server, "web", "app-1").await;

    Mock::given(method("GET"))
        .and(path("/v2/apps/app-1/routes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(
            1,
            vec![
                resource(
                    "route-1",
                    json!({ "host": "web", "domain_guid": "dom-1", "space_guid": "space-1" }),
                ),
                resource(
                    "route-2",
                    json!({ "host": "api", "domain_guid": "dom-1", "space_guid": "space-1", "path": "/v1" }),
                ),
            ],
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/domains/dom-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(resource("dom-1", json!({ "name": "apps.io" }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ops = operations(&server, Some("my-org"), Some("dev"));
    let app = ops.applications().get("web").await.unwrap();

    assert_eq!(
        app.urls,
        vec!["web.apps.io".to_owned(), "api.apps.io/v1".to_owned()]
    );
}

// ── Connect ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_connect_with_password_discovers_uaa() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "api_version": "2.164.0",
            "token_endpoint": server.uri(),
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "from-uaa",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .and(header("authorization", "Bearer from-uaa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list(1, vec![])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(
        server.uri().parse().unwrap(),
        AuthCredentials::Password {
            username: "admin".into(),
            password: SecretString::from("pw"),
            client_id: None,
            client_secret: None,
        },
    );
    let ops = Operations::connect(&config).await.unwrap();

    assert!(ops.organizations().list().await.unwrap().is_empty());
}
