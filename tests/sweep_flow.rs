//! End-to-end sweep tests against a mock GitHub API server.

use rstest::rstest;
use serde_json::json;
use unstamp::{
    ApprovalSweep, DismissalReason, ExclusionSet, OctocrabGateway, PersonalAccessToken,
    PullRequestLocator, SweepOutcome, SweepSettings,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REVIEWS_PATH: &str = "/repos/owner/repo/pulls/4/reviews";
const COMMENTS_PATH: &str = "/repos/owner/repo/issues/4/comments";

fn sweep_target(server: &MockServer) -> (OctocrabGateway, PullRequestLocator) {
    let locator = PullRequestLocator::from_trigger(&server.uri(), "owner/repo", 4)
        .expect("should create locator");
    let token = PersonalAccessToken::new("valid-token").expect("token should be valid");
    let gateway = OctocrabGateway::for_token(&token, &locator).expect("should create gateway");
    (gateway, locator)
}

fn settings(reason: &str, exclusions: &str, dry_run: bool) -> SweepSettings {
    SweepSettings {
        reason: DismissalReason::new(reason).expect("reason should be valid"),
        exclusions: ExclusionSet::parse(exclusions),
        dry_run,
    }
}

async fn mount_review_pages(server: &MockServer) {
    let next_url = format!("{uri}{REVIEWS_PATH}?page=2&per_page=100", uri = server.uri());
    let first_page = ResponseTemplate::new(200)
        .set_body_json(json!([
            { "id": 1, "state": "APPROVED", "commit_id": "aaa" },
            { "id": 2, "state": "APPROVED", "commit_id": "bbb" }
        ]))
        .insert_header("Link", format!("<{next_url}>; rel=\"next\""));

    Mock::given(method("GET"))
        .and(path(REVIEWS_PATH))
        .and(query_param("page", "1"))
        .respond_with(first_page)
        .expect(1)
        .mount(server)
        .await;

    let second_page = ResponseTemplate::new(200).set_body_json(json!([
        { "id": 3, "state": "APPROVED", "commit_id": "ccc" },
        { "id": 4, "state": "CHANGES_REQUESTED", "commit_id": "ddd" }
    ]));

    Mock::given(method("GET"))
        .and(path(REVIEWS_PATH))
        .and(query_param("page", "2"))
        .respond_with(second_page)
        .expect(1)
        .mount(server)
        .await;
}

#[rstest]
#[tokio::test]
async fn live_sweep_dismisses_non_excluded_approvals_across_pages() {
    let server = MockServer::start().await;
    let (gateway, locator) = sweep_target(&server);

    mount_review_pages(&server).await;

    for review_id in [1_u64, 3] {
        Mock::given(method("PUT"))
            .and(path(format!(
                "/repos/owner/repo/pulls/4/reviews/{review_id}/dismissals"
            )))
            .and(body_json(json!({ "message": "Stale approval" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": review_id })))
            .expect(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("POST"))
        .and(path(COMMENTS_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })))
        .expect(0)
        .mount(&server)
        .await;

    let sweep = ApprovalSweep::new(&gateway);
    let outcome = sweep
        .run(&locator, &settings("Stale approval", "bbb", false))
        .await
        .expect("sweep should succeed");

    assert_eq!(
        outcome,
        SweepOutcome::Dismissed { count: 2 },
        "approvals 1 and 3 should be dismissed; bbb is excluded and 4 is \
         not approved"
    );
}

#[rstest]
#[tokio::test]
async fn dry_run_posts_single_report_comment() {
    let server = MockServer::start().await;
    let (gateway, locator) = sweep_target(&server);

    mount_review_pages(&server).await;

    Mock::given(method("POST"))
        .and(path(COMMENTS_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let sweep = ApprovalSweep::new(&gateway);
    let outcome = sweep
        .run(&locator, &settings("Stale approval", "", true))
        .await
        .expect("sweep should succeed");

    assert_eq!(
        outcome,
        SweepOutcome::DryRun { would_dismiss: 3 },
        "dry run should count all three approvals"
    );

    let requests = server
        .received_requests()
        .await
        .expect("request recording should be enabled");
    let comment_bodies: Vec<String> = requests
        .iter()
        .filter(|request| request.url.path() == COMMENTS_PATH)
        .map(|request| String::from_utf8_lossy(&request.body).into_owned())
        .collect();
    assert_eq!(comment_bodies.len(), 1, "exactly one comment expected");
    let body = comment_bodies.first().expect("comment body should exist");
    assert!(body.contains('3'), "comment should state the count: {body}");
    assert!(
        body.contains("Stale approval"),
        "comment should state the reason: {body}"
    );
    assert!(
        !requests
            .iter()
            .any(|request| request.url.path().ends_with("/dismissals")),
        "dry run must never call the dismissal endpoint"
    );
}

#[rstest]
#[tokio::test]
async fn fully_excluded_sweep_makes_no_mutating_calls() {
    let server = MockServer::start().await;
    let (gateway, locator) = sweep_target(&server);

    let single_page = ResponseTemplate::new(200).set_body_json(json!([
        { "id": 1, "state": "APPROVED", "commit_id": "aaa" }
    ]));
    Mock::given(method("GET"))
        .and(path(REVIEWS_PATH))
        .respond_with(single_page)
        .expect(1)
        .mount(&server)
        .await;

    let sweep = ApprovalSweep::new(&gateway);
    let outcome = sweep
        .run(&locator, &settings("Stale approval", "aaa", false))
        .await
        .expect("sweep should succeed");

    assert_eq!(outcome, SweepOutcome::NothingToDismiss, "no-op expected");

    let requests = server
        .received_requests()
        .await
        .expect("request recording should be enabled");
    assert!(
        requests.iter().all(|request| request.method == "GET"),
        "only the read-only listing call may happen"
    );
}

#[rstest]
#[tokio::test]
async fn failed_dismissal_fails_the_run() {
    let server = MockServer::start().await;
    let (gateway, locator) = sweep_target(&server);

    let single_page = ResponseTemplate::new(200).set_body_json(json!([
        { "id": 1, "state": "APPROVED", "commit_id": "aaa" }
    ]));
    Mock::given(method("GET"))
        .and(path(REVIEWS_PATH))
        .respond_with(single_page)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/repos/owner/repo/pulls/4/reviews/1/dismissals"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })),
        )
        .mount(&server)
        .await;

    let sweep = ApprovalSweep::new(&gateway);
    let error = sweep
        .run(&locator, &settings("Stale approval", "", false))
        .await
        .expect_err("sweep should fail");

    assert!(
        error.suggests_missing_permissions(),
        "Not Found failures should carry the permissions hint: {error}"
    );
}
