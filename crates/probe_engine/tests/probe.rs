use std::time::Duration;

use probe_core::{ProbeOutcome, UrlTemplate};
use probe_engine::{probe, probe_detailed, FailureKind, ProbeSettings, Prober, ReqwestProber};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn prober(settings: ProbeSettings) -> ReqwestProber {
    ReqwestProber::new(&settings).expect("client builds")
}

#[tokio::test]
async fn existing_resource_is_present() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/players/p158023.eaz"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let template = UrlTemplate::new(format!("{}/players/p???.eaz", server.uri()));
    let outcome = probe(&prober(ProbeSettings::default()), 158023, &template).await;

    assert_eq!(outcome, ProbeOutcome::Present);
}

#[tokio::test]
async fn missing_resource_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/players/p1.eaz"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let template = UrlTemplate::new(format!("{}/players/p???.eaz", server.uri()));
    let prober = prober(ProbeSettings::default());

    let err = probe_detailed(&prober, 1, &template).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert_eq!(probe(&prober, 1, &template).await, ProbeOutcome::Absent);
}

#[tokio::test]
async fn no_content_answer_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/players/p204.eaz"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let template = UrlTemplate::new(format!("{}/players/p???.eaz", server.uri()));
    let prober = prober(ProbeSettings::default());

    let err = probe_detailed(&prober, 204, &template).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(204));
    assert_eq!(probe(&prober, 204, &template).await, ProbeOutcome::Absent);
}

#[tokio::test]
async fn redirects_are_not_followed() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/moved"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/ok", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = prober(ProbeSettings::default())
        .check(&format!("{}/moved", server.uri()))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(302));
}

#[tokio::test]
async fn slow_resource_times_out_as_absent() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/p5.eaz"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;

    let settings = ProbeSettings {
        request_timeout: Duration::from_millis(50),
        ..ProbeSettings::default()
    };
    let template = UrlTemplate::new(format!("{}/p???.eaz", server.uri()));
    let prober = prober(settings);

    let err = probe_detailed(&prober, 5, &template).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unparseable_url_is_absent() {
    let template = UrlTemplate::new("not a url ???");
    let prober = prober(ProbeSettings::default());

    let err = probe_detailed(&prober, 9, &template).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
    assert_eq!(probe(&prober, 9, &template).await, ProbeOutcome::Absent);
}

#[tokio::test]
async fn refused_connection_is_absent() {
    // Port 1 (tcpmux) is closed on any ordinary host.
    let template = UrlTemplate::new("http://127.0.0.1:1/p???.eaz");

    let outcome = probe(&prober(ProbeSettings::default()), 3, &template).await;
    assert_eq!(outcome, ProbeOutcome::Absent);
}

#[tokio::test]
async fn template_without_placeholder_probes_the_literal_url() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/fixed.eaz"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let template = UrlTemplate::new(format!("{}/fixed.eaz", server.uri()));
    let prober = prober(ProbeSettings::default());

    assert_eq!(probe(&prober, 1, &template).await, ProbeOutcome::Present);
    assert_eq!(probe(&prober, 2, &template).await, ProbeOutcome::Present);
}
