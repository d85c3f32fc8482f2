use crate::common::{TestApp, routes, sample_pdf};

mod asset_list {
    use super::*;

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let app = TestApp::spawn().await;
        let res = app.get(routes::ASSETS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["total"].as_u64().unwrap(), 0);
        assert!(res.body["assets"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn lists_only_pdfs_sorted_by_name() {
        let app = TestApp::spawn().await;
        app.upload_ok("b1", "zeta.pdf", &sample_pdf("z")).await;
        app.upload_ok("b1", "alpha.pdf", &sample_pdf("alpha")).await;
        std::fs::write(app.stored_path("notes.txt"), b"not a pdf").unwrap();

        let res = app.get(routes::ASSETS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["total"].as_u64().unwrap(), 2);
        let assets = res.body["assets"].as_array().unwrap();
        assert_eq!(assets[0]["name"], "alpha.pdf");
        assert_eq!(assets[1]["name"], "zeta.pdf");
        assert_eq!(
            assets[0]["size"].as_u64().unwrap(),
            sample_pdf("alpha").len() as u64
        );
    }

    #[tokio::test]
    async fn unreadable_store_still_returns_200() {
        let app = TestApp::spawn().await;
        app.upload_ok("b1", "a.pdf", &sample_pdf("a")).await;
        std::fs::remove_dir_all(app.data_dir.path().join("pdf")).unwrap();

        let res = app.get(routes::ASSETS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["total"].as_u64().unwrap(), 0);
    }
}

mod asset_serve {
    use super::*;

    #[tokio::test]
    async fn serves_pdf_inline_with_cache_headers() {
        let app = TestApp::spawn().await;
        let data = sample_pdf("lecture");
        app.upload_ok("b1", "Lecture 1.pdf", &data).await;

        let res = app.get(&routes::serve("Lecture 1.pdf")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.bytes, data);
        assert_eq!(res.header("content-type"), Some("application/pdf"));
        assert_eq!(res.header("cache-control"), Some("private, max-age=3600"));
        let disposition = res.header("content-disposition").unwrap();
        assert!(disposition.starts_with("inline;"));
        assert!(disposition.contains("Lecture%201.pdf"));
        assert!(res.header("etag").is_some());
    }

    #[tokio::test]
    async fn serve_is_idempotent() {
        let app = TestApp::spawn().await;
        app.upload_ok("b1", "notes.pdf", &sample_pdf("n")).await;

        let first = app.get(&routes::serve("notes.pdf")).await;
        let second = app.get(&routes::serve("notes.pdf")).await;

        assert_eq!(first.status, 200);
        assert_eq!(first.bytes, second.bytes);
        assert_eq!(first.header("content-type"), second.header("content-type"));
        assert_eq!(first.header("etag"), second.header("etag"));
    }

    #[tokio::test]
    async fn matching_etag_returns_304() {
        let app = TestApp::spawn().await;
        app.upload_ok("b1", "notes.pdf", &sample_pdf("n")).await;

        let first = app.get(&routes::serve("notes.pdf")).await;
        let etag = first.header("etag").unwrap().to_string();

        let cached = app.get_with_etag(&routes::serve("notes.pdf"), &etag).await;
        assert_eq!(cached.status, 304);
        assert!(cached.bytes.is_empty());

        let stale = app
            .get_with_etag(&routes::serve("notes.pdf"), "\"deadbeef\"")
            .await;
        assert_eq!(stale.status, 200);
    }

    #[tokio::test]
    async fn traversal_is_rejected_as_validation() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::serve("../../etc/passwd")).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["message"], "invalid type");
    }

    #[tokio::test]
    async fn directory_components_are_stripped() {
        let app = TestApp::spawn().await;
        let data = sample_pdf("inner");
        app.upload_ok("b1", "inner.pdf", &data).await;
        std::fs::write(app.data_dir.path().join("outer.pdf"), b"%PDF outside").unwrap();

        let res = app.get(&routes::serve("../../pdf/inner.pdf")).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.bytes, data);

        let escaped = app.get(&routes::serve("../outer.pdf")).await;
        assert_eq!(escaped.status, 404);
        assert_eq!(escaped.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn missing_parameter_and_missing_file() {
        let app = TestApp::spawn().await;

        let res = app.get("/api/v1/assets/serve").await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "missing file parameter");

        let res = app.get(&routes::serve("ghost.pdf")).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn extension_check_is_case_insensitive() {
        let app = TestApp::spawn().await;
        app.upload_ok("b1", "SCAN.PDF", &sample_pdf("scan")).await;

        let res = app.get(&routes::serve("SCAN.PDF")).await;
        assert_eq!(res.status, 200);

        let res = app.get(&routes::serve("scan.docx")).await;
        assert_eq!(res.status, 400);
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn health_is_ok() {
        let app = TestApp::spawn().await;
        let res = app.get(routes::HEALTH).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.text(), "ok");
    }

    #[tokio::test]
    async fn openapi_document_lists_routes() {
        let app = TestApp::spawn().await;
        let res = app.get("/api-docs/openapi.json").await;

        assert_eq!(res.status, 200);
        let paths = res.body["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/v1/assets/serve"));
        assert!(paths.contains_key("/api/v1/instances/{id}/upload"));
    }
}
