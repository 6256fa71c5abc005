#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use shelter::test_utils::TestContext;
    use tower::util::ServiceExt;

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_crud_round_trip_over_http() {
        let ctx = TestContext::new().await;
        let app = ctx.app();

        let (status, _) = send(&app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);

        for (name, animal_type) in [("Rex", "Dog"), ("Max", "Dog"), ("Bella", "Cat")] {
            let (status, _) = send(
                &app,
                "POST",
                "/api/animals",
                Some(json!({ "name": name, "animal_type": animal_type })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, all) = send(&app, "GET", "/api/animals", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.as_array().unwrap().len(), 3);
        assert!(all[0]["_id"]["$oid"].is_string());

        let filter = urlencoding::encode(r#"{"animal_type":"Dog"}"#);
        let (_, dogs) = send(&app, "GET", &format!("/api/animals?filter={}", filter), None).await;
        assert_eq!(dogs.as_array().unwrap().len(), 2);

        let (status, body) = send(
            &app,
            "PATCH",
            "/api/animals",
            Some(json!({
                "query": { "animal_type": "Dog" },
                "patch": { "outcome_type": "Adoption" }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "modified": 2 }));

        let (status, body) = send(
            &app,
            "DELETE",
            "/api/animals",
            Some(json!({ "query": { "outcome_type": "Adoption" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "deleted": 2 }));

        let (_, remaining) = send(&app, "GET", "/api/animals", None).await;
        assert_eq!(remaining.as_array().unwrap().len(), 1);
        assert_eq!(remaining[0]["name"], "Bella");

        ctx.cleanup().await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_arguments_do_not_reach_the_store() {
        let ctx = TestContext::new().await;
        let app = ctx.app();

        let (status, _) = send(&app, "POST", "/api/animals", Some(Value::Null)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "DELETE", "/api/animals", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert_eq!(ctx.count().await, 0);

        ctx.cleanup().await.unwrap();
    }

    #[tokio::test]
    async fn test_store_rejection_is_internal_error() {
        let ctx = TestContext::new().await;
        let app = ctx.app();

        let filter = urlencoding::encode(r#"{"$bogus":1}"#);
        let uri = format!("/api/animals?filter={}", filter);
        let (status, body) = send(&app, "GET", &uri, None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "STORE_ERROR");

        ctx.cleanup().await.unwrap();
    }
}
