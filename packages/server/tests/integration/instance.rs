use serde_json::json;

use crate::common::{MAX_UPLOAD, TestApp, routes, sample_pdf};

mod instance_view {
    use super::*;

    #[tokio::test]
    async fn new_instance_has_defaults_and_no_url() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::instance("block-1")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], "block-1");
        assert_eq!(res.body["configured"], false);
        assert!(res.body["url"].is_null());
        assert_eq!(res.body["settings"]["display_name"], "PDF Document");
        assert_eq!(res.body["settings"]["width"], "100%");
        assert_eq!(res.body["settings"]["height"], "600px");
        assert_eq!(res.body["settings"]["show_download_button"], true);
    }

    #[tokio::test]
    async fn invalid_instance_id_is_rejected() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::instance("bad%20id")).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod pdf_upload {
    use super::*;

    #[tokio::test]
    async fn upload_stores_and_selects() {
        let app = TestApp::spawn().await;
        let data = sample_pdf("syllabus");

        let name = app.upload_ok("block-1", "syllabus.pdf", &data).await;
        assert_eq!(name, "syllabus.pdf");
        assert_eq!(std::fs::read(app.stored_path("syllabus.pdf")).unwrap(), data);

        let view = app.get(&routes::instance("block-1")).await;
        assert_eq!(view.body["configured"], true);
        assert_eq!(view.body["local_file"], "syllabus.pdf");
        assert!(view.body["external_url"].is_null());
        assert_eq!(view.body["url"], "/api/v1/assets/serve?file=syllabus.pdf");
    }

    #[tokio::test]
    async fn reupload_gets_a_suffix() {
        let app = TestApp::spawn().await;
        let data = sample_pdf("report");

        let first = app.upload_ok("block-1", "report.pdf", &data).await;
        let second = app.upload_ok("block-1", "report.pdf", &data).await;

        assert_eq!(first, "report.pdf");
        assert_eq!(second, "report_1.pdf");
        assert!(app.stored_path("report.pdf").exists());
        assert!(app.stored_path("report_1.pdf").exists());

        let view = app.get(&routes::instance("block-1")).await;
        assert_eq!(view.body["local_file"], "report_1.pdf");
    }

    #[tokio::test]
    async fn client_directories_are_dropped() {
        let app = TestApp::spawn().await;

        let name = app
            .upload_ok("block-1", "../../handouts/week 2.pdf", &sample_pdf("w2"))
            .await;

        assert_eq!(name, "week 2.pdf");
        assert!(app.stored_path("week 2.pdf").exists());
    }

    #[tokio::test]
    async fn wrong_extension_is_rejected() {
        let app = TestApp::spawn().await;
        let res = app
            .upload("block-1", "notes.docx", b"PK".to_vec(), None)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "bad extension");
        assert!(!app.stored_path("notes.docx").exists());
    }

    #[tokio::test]
    async fn declared_size_over_limit_is_rejected_before_writing() {
        let app = TestApp::spawn().await;
        let res = app
            .upload(
                "block-1",
                "huge.pdf",
                sample_pdf("huge"),
                Some(15 * 1024 * 1024),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "too large");
        assert!(!app.stored_path("huge.pdf").exists());

        let view = app.get(&routes::instance("block-1")).await;
        assert_eq!(view.body["configured"], false);
    }

    #[tokio::test]
    async fn actual_size_over_limit_is_rejected() {
        let app = TestApp::spawn().await;
        let data = vec![b'x'; MAX_UPLOAD as usize + 1];

        let res = app.upload("block-1", "big.pdf", data, None).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "too large");
        assert!(!app.stored_path("big.pdf").exists());
    }

    #[tokio::test]
    async fn failed_upload_keeps_previous_selection() {
        let app = TestApp::spawn().await;
        app.upload_ok("block-1", "keep.pdf", &sample_pdf("keep")).await;

        let res = app
            .upload("block-1", "other.txt", b"text".to_vec(), None)
            .await;
        assert_eq!(res.status, 400);

        let view = app.get(&routes::instance("block-1")).await;
        assert_eq!(view.body["local_file"], "keep.pdf");
    }
}

mod pdf_select {
    use super::*;

    #[tokio::test]
    async fn external_url_replaces_local_file() {
        let app = TestApp::spawn().await;
        app.upload_ok("block-1", "a.pdf", &sample_pdf("a")).await;

        let res = app
            .post(
                &routes::select("block-1"),
                &json!({ "file": "https://example.com/a.pdf" }),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["url"], "https://example.com/a.pdf");

        let view = app.get(&routes::instance("block-1")).await;
        assert_eq!(view.body["external_url"], "https://example.com/a.pdf");
        assert!(view.body["local_file"].is_null());
        assert_eq!(view.body["url"], "https://example.com/a.pdf");
    }

    #[tokio::test]
    async fn existing_asset_can_be_shared_between_instances() {
        let app = TestApp::spawn().await;
        app.upload_ok("block-1", "shared notes.pdf", &sample_pdf("s")).await;

        let res = app
            .post(&routes::select("block-2"), &json!({ "file": "shared notes.pdf" }))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["url"], "/api/v1/assets/serve?file=shared+notes.pdf");

        let view = app.get(&routes::instance("block-2")).await;
        assert_eq!(view.body["local_file"], "shared notes.pdf");

        let served = app.get(view.body["url"].as_str().unwrap()).await;
        assert_eq!(served.status, 200);
        assert_eq!(served.bytes, sample_pdf("s"));
    }

    #[tokio::test]
    async fn unknown_asset_is_not_found_and_state_unchanged() {
        let app = TestApp::spawn().await;
        app.post(
            &routes::select("block-1"),
            &json!({ "file": "https://example.com/keep.pdf" }),
        )
        .await;

        let res = app
            .post(&routes::select("block-1"), &json!({ "file": "nonexistent.pdf" }))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");

        let view = app.get(&routes::instance("block-1")).await;
        assert_eq!(view.body["external_url"], "https://example.com/keep.pdf");
    }

    #[tokio::test]
    async fn empty_file_is_validation_error() {
        let app = TestApp::spawn().await;
        let res = app
            .post(&routes::select("block-1"), &json!({ "file": "" }))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "missing file parameter");
    }

    #[tokio::test]
    async fn malformed_body_is_validation_error() {
        let app = TestApp::spawn().await;
        let res = app
            .post(&routes::select("block-1"), &json!({ "url": "x" }))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod editor_settings {
    use super::*;

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                &routes::settings("block-1"),
                &json!({ "pdf_title": "Week 3 Reading", "height": "80vh" }),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["settings"]["pdf_title"], "Week 3 Reading");
        assert_eq!(res.body["settings"]["height"], "80vh");
        assert_eq!(res.body["settings"]["width"], "100%");
        assert_eq!(res.body["configured"], false);
    }

    #[tokio::test]
    async fn pdf_url_drives_selection() {
        let app = TestApp::spawn().await;
        app.upload_ok("block-1", "a.pdf", &sample_pdf("a")).await;

        let res = app
            .put(
                &routes::settings("block-1"),
                &json!({ "pdf_url": "/static/handouts/intro.pdf" }),
            )
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["external_url"], "/static/handouts/intro.pdf");
        assert!(res.body["local_file"].is_null());

        let res = app
            .put(&routes::settings("block-1"), &json!({ "pdf_url": "a.pdf" }))
            .await;
        assert_eq!(res.body["local_file"], "a.pdf");

        let res = app
            .put(&routes::settings("block-1"), &json!({ "pdf_url": "" }))
            .await;
        assert_eq!(res.body["configured"], false);
        assert!(res.body["url"].is_null());
    }

    #[tokio::test]
    async fn invalid_field_saves_nothing() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                &routes::settings("block-1"),
                &json!({ "pdf_title": "New title", "width": "wide" }),
            )
            .await;
        assert_eq!(res.status, 400);

        let res = app
            .put(
                &routes::settings("block-1"),
                &json!({ "pdf_title": "New title", "pdf_url": "missing.pdf" }),
            )
            .await;
        assert_eq!(res.status, 404);

        let view = app.get(&routes::instance("block-1")).await;
        assert_eq!(view.body["settings"]["pdf_title"], "PDF Document");
    }
}
