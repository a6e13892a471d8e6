use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use prequal::directory::{
    directory_router, CapabilityProfile, CompanyType, DirectoryService, NewCapability, NewCompany,
    NewProject, NewRequirement,
};
use prequal::prequalification::{
    prequalification_router, Decision, PrequalificationService, PrequalificationStatus,
};
use prequal::{CompanyId, MemoryStore};
use serde_json::{json, Value};
use tower::ServiceExt;

struct Fixture {
    directory: Arc<DirectoryService<MemoryStore>>,
    prequalification: Arc<PrequalificationService<MemoryStore, MemoryStore>>,
}

fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    Fixture {
        directory: Arc::new(DirectoryService::new(store.clone())),
        prequalification: Arc::new(PrequalificationService::new(store.clone(), store)),
    }
}

fn contractor(fixture: &Fixture, name: &str, capabilities: &[prequal::CapabilityId]) -> CompanyId {
    let company = fixture
        .directory
        .create_company(NewCompany::new(name, CompanyType::Contractor))
        .expect("contractor created");
    for capability in capabilities {
        fixture
            .directory
            .save_company_capability(company.id, *capability, CapabilityProfile::default())
            .expect("capability linked");
    }
    company.id
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("route executes");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json payload")
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[test]
fn matching_then_decisions_end_to_end() {
    let fixture = fixture();
    let high_rise = fixture
        .directory
        .create_capability(NewCapability {
            name: "Residential High-Rise".to_string(),
            description: None,
        })
        .expect("capability created");
    let hospitals = fixture
        .directory
        .create_capability(NewCapability {
            name: "Hospitals".to_string(),
            description: None,
        })
        .expect("capability created");
    let marine = fixture
        .directory
        .create_capability(NewCapability {
            name: "Marine Works".to_string(),
            description: None,
        })
        .expect("capability created");

    let developer = fixture
        .directory
        .create_company(NewCompany::new("Mountain View", CompanyType::Developer))
        .expect("developer created");
    let project = fixture
        .directory
        .create_project(NewProject::new(developer.id, "iCity"))
        .expect("project created");
    for capability in [high_rise.id, hospitals.id] {
        fixture
            .directory
            .add_requirement(project.id, NewRequirement::new(capability))
            .expect("requirement added");
    }

    let x = contractor(&fixture, "Xenon Builders", &[high_rise.id]);
    let y = contractor(&fixture, "Yasmin Contracting", &[high_rise.id, hospitals.id]);
    let z = contractor(&fixture, "Zed Marine", &[marine.id]);

    let ranked: Vec<(CompanyId, f64, usize)> = fixture
        .prequalification
        .match_contractors(project.id)
        .expect("matching succeeds")
        .into_iter()
        .map(|candidate| (candidate.company.id, candidate.score, candidate.matched_count))
        .collect();
    assert_eq!(ranked, vec![(y, 2.0, 2), (x, 1.0, 1)]);
    assert!(ranked.iter().all(|(id, _, _)| *id != z));

    let first = fixture
        .prequalification
        .upsert(project.id, x, Decision::new(PrequalificationStatus::Interested))
        .expect("first decision");
    let second = fixture
        .prequalification
        .upsert(project.id, x, Decision::new(PrequalificationStatus::Rejected))
        .expect("second decision");
    assert_eq!(first.id, second.id);
    assert!(second.updated_at >= first.updated_at);

    let responses = fixture
        .prequalification
        .list_for_project(project.id)
        .expect("responses listed");
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].status, PrequalificationStatus::Rejected);
}

#[tokio::test]
async fn merged_routers_cover_the_workflow() {
    let fixture = fixture();
    let app = directory_router(fixture.directory.clone())
        .merge(prequalification_router(fixture.prequalification.clone()));

    let (status, capability) = send(
        &app,
        json_request("POST", "/api/v1/capabilities", json!({ "name": "Hospitals" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, developer) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/companies",
            json!({ "name": "Emaar Misr", "company_type": "Developer" }),
        ),
    )
    .await;
    let (_, builder) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/companies",
            json!({ "name": "Orascom", "company_type": "Contractor" }),
        ),
    )
    .await;

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!(
                "/api/v1/companies/{}/capabilities/{}",
                builder["id"], capability["id"]
            ),
            json!({ "experience_years": 20.0 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, project) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/projects",
            json!({ "developer_company_id": developer["id"], "name": "Marassi" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(project["status"], json!("Open"));

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/v1/projects/{}/requirements", project["id"]),
            json!({ "capability_id": capability["id"], "min_experience_years": 10.0 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, matches) = send(
        &app,
        Request::get(format!("/api/v1/projects/{}/matches", project["id"]))
            .body(Body::empty())
            .expect("request builds"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(matches[0]["company"]["name"], json!("Orascom"));
    assert_eq!(matches[0]["score"], json!(1.0));

    let (status, decision) = send(
        &app,
        json_request(
            "PUT",
            &format!(
                "/api/v1/projects/{}/prequalification/{}",
                project["id"], builder["id"]
            ),
            json!({ "status": "Shortlisted", "notes": "ok" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decision["status"], json!("Shortlisted"));

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!(
                "/api/v1/projects/{}/prequalification/{}",
                project["id"], 9_999
            ),
            json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/v1/projects",
            json!({ "developer_company_id": builder["id"], "name": "Not Allowed" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
