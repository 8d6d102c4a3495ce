//! HTTP collaborator tests against a wiremock server.

use docstat_analysis::{
    ContentClientConfig, ContentSource, Error, HttpContentSource, HttpWordCloudRenderer,
    WordCloudOptions, WordCloudRenderer,
};
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn content_client(server: &MockServer) -> HttpContentSource {
    HttpContentSource::new(ContentClientConfig {
        base_url: server.uri(),
        timeout_secs: 5,
    })
    .expect("Failed to create client")
}

#[tokio::test]
async fn test_fetch_text_reads_body() {
    let server = MockServer::start().await;
    let file_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/api/files/{}", file_id)))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/plain; charset=utf-8")
                .set_body_string("Привет, мир"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let text = content_client(&server).fetch_text(file_id).await.unwrap();
    assert_eq!(text, "Привет, мир");
}

#[tokio::test]
async fn test_fetch_text_maps_404_to_file_not_found() {
    let server = MockServer::start().await;
    let file_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/api/files/{}", file_id)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = content_client(&server).fetch_text(file_id).await.unwrap_err();
    assert!(matches!(err, Error::FileNotFound(id) if id == file_id));
}

#[tokio::test]
async fn test_fetch_text_maps_5xx_to_upstream_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = content_client(&server)
        .fetch_text(Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UpstreamUnavailable(_)));
}

#[tokio::test]
async fn test_fetch_text_unreachable_store() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = HttpContentSource::new(ContentClientConfig {
        base_url: uri,
        timeout_secs: 2,
    })
    .unwrap();
    let err = client.fetch_text(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, Error::UpstreamUnavailable(_)));
}

#[tokio::test]
async fn test_fetch_text_rejects_non_utf8() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xFE, 0x00]))
        .mount(&server)
        .await;

    let err = content_client(&server)
        .fetch_text(Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn test_render_sends_text_and_options() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/wordcloud"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(serde_json::json!({
            "text": "alpha beta gamma",
            "maxNumWords": 100,
            "minWordLength": 3,
            "removeStopwords": true,
            "language": "en"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "url": "https://cdn.test/w.png" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let renderer = HttpWordCloudRenderer::new(format!("{}/wordcloud", server.uri()), 5).unwrap();
    let url = renderer
        .render("alpha beta gamma", &WordCloudOptions::default())
        .await
        .unwrap();
    assert_eq!(url, "https://cdn.test/w.png");
}

#[tokio::test]
async fn test_render_image_body_becomes_data_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"<svg/>".to_vec(), "image/svg+xml"))
        .mount(&server)
        .await;

    let renderer = HttpWordCloudRenderer::new(server.uri(), 5).unwrap();
    let reference = renderer
        .render("words words", &WordCloudOptions::default())
        .await
        .unwrap();
    assert_eq!(reference, "data:image/svg+xml;base64,PHN2Zy8+");
}

#[tokio::test]
async fn test_render_error_status_is_rendering_failed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("renderer exploded"))
        .mount(&server)
        .await;

    let renderer = HttpWordCloudRenderer::new(server.uri(), 5).unwrap();
    let err = renderer
        .render("text", &WordCloudOptions::default())
        .await
        .unwrap_err();
    match err {
        Error::RenderingFailed(msg) => assert!(msg.contains("500")),
        other => panic!("Expected RenderingFailed, got {:?}", other),
    }
}
