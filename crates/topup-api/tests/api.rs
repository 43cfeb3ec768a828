use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use topup_api::handlers::{BANNER, CONNECTION_FAILED, CONNECTION_OK};
use topup_api::{create_router, AppConfig, AppState};
use topup_core::{
    AccessToken, CatalogItem, CheckoutRequest, CheckoutSession, OrderRequest, OrderResult,
    PaymentStrategy, RelayError, RelayResult, SkuAllowList, VendorClient,
};

/// Vendor double: hands out a distinct token per authentication and
/// records what each dependent call received.
#[derive(Default)]
struct FakeVendor {
    omit_token: bool,
    catalog: Vec<CatalogItem>,
    catalog_failure: Option<(u16, &'static str)>,
    order_failure: Option<(u16, &'static str)>,
    bodyless_order_reply: bool,
    auth_calls: AtomicUsize,
    catalog_calls: AtomicUsize,
    tokens_used: Mutex<Vec<String>>,
    orders: Mutex<Vec<OrderRequest>>,
}

#[async_trait]
impl VendorClient for FakeVendor {
    async fn authenticate(&self) -> RelayResult<AccessToken> {
        let n = self.auth_calls.fetch_add(1, Ordering::SeqCst);
        if self.omit_token {
            return Err(RelayError::Auth("No access token returned.".to_string()));
        }
        Ok(AccessToken::new(format!("token-{}", n)))
    }

    async fn list_catalog(&self, token: &AccessToken) -> RelayResult<Vec<CatalogItem>> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        self.tokens_used.lock().unwrap().push(token.as_str().to_string());
        if let Some((status, body)) = self.catalog_failure {
            return Err(RelayError::upstream(status, body));
        }
        Ok(self.catalog.clone())
    }

    async fn create_order(
        &self,
        token: &AccessToken,
        order: &OrderRequest,
    ) -> RelayResult<OrderResult> {
        self.tokens_used.lock().unwrap().push(token.as_str().to_string());
        self.orders.lock().unwrap().push(order.clone());
        if let Some((status, body)) = self.order_failure {
            return Err(RelayError::upstream(status, body));
        }
        if self.bodyless_order_reply {
            return Ok(Value::Null);
        }
        Ok(json!({"status": "accepted", "reference_code": order.reference_code}))
    }

    fn vendor_name(&self) -> &'static str {
        "fake"
    }
}

#[derive(Default)]
struct FakePayments {
    reject_with: Option<&'static str>,
    requests: Mutex<Vec<CheckoutRequest>>,
}

#[async_trait]
impl PaymentStrategy for FakePayments {
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> RelayResult<CheckoutSession> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(message) = self.reject_with {
            return Err(RelayError::Payment(message.to_string()));
        }
        Ok(CheckoutSession {
            session_id: "cs_test_1".to_string(),
            url: "https://checkout.stripe.com/c/pay/cs_test_1".to_string(),
            expires_at: None,
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

fn catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new(1320).with_detail("title", "Card C"),
        CatalogItem::new(5).with_detail("title", "Not curated"),
        CatalogItem::new(1148).with_detail("title", "Card A"),
        CatalogItem::new(1201).with_detail("title", "Card B"),
        CatalogItem::new(777).with_detail("title", "Also not curated"),
    ]
}

fn server(vendor: Arc<FakeVendor>, payments: Arc<FakePayments>) -> TestServer {
    let state = AppState::from_parts(
        AppConfig::default(),
        vendor,
        payments,
        SkuAllowList::default(),
    );
    TestServer::new(create_router(state)).unwrap()
}

fn vendor_with_catalog() -> Arc<FakeVendor> {
    Arc::new(FakeVendor {
        catalog: catalog(),
        ..FakeVendor::default()
    })
}

#[tokio::test]
async fn banner_needs_no_upstream() {
    let vendor = vendor_with_catalog();
    let server = server(vendor.clone(), Arc::default());

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), BANNER);
    assert!(BANNER.starts_with("✅ EZPIN backend is live!"));
    assert_eq!(vendor.auth_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn health_reports_service() {
    let server = server(vendor_with_catalog(), Arc::default());

    let body: Value = server.get("/health").await.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "ezpin-relay");
}

#[tokio::test]
async fn connection_check_reports_count_and_sample() {
    let server = server(vendor_with_catalog(), Arc::default());

    let response = server.get("/api/test").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["total_products"], 5);
    assert_eq!(body["sample_product"], json!({"sku": 1320, "title": "Card C"}));
    assert_eq!(body["message"], CONNECTION_OK);
    assert_eq!(CONNECTION_OK, "🎉 EZPIN Sandbox connection successful!");
}

#[tokio::test]
async fn connection_check_with_empty_catalog() {
    let server = server(Arc::default(), Arc::default());

    let body: Value = server.get("/api/test").await.json();
    assert_eq!(body["total_products"], 0);
    assert_eq!(body["sample_product"], Value::Null);
}

#[tokio::test]
async fn catalog_returns_only_curated_skus_in_vendor_order() {
    let server = server(vendor_with_catalog(), Arc::default());

    let response = server.get("/api/catalog").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let items: Vec<CatalogItem> = response.json();
    let skus: Vec<i64> = items.iter().map(|i| i.sku).collect();
    assert_eq!(skus, vec![1320, 1148, 1201]);
}

#[tokio::test]
async fn catalog_upstream_error_body_is_propagated() {
    let vendor = Arc::new(FakeVendor {
        catalog_failure: Some((403, r#"{"detail":"Given token not valid"}"#)),
        ..FakeVendor::default()
    });
    let server = server(vendor, Arc::default());

    let response = server.get("/api/catalog").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert_eq!(body["error"], json!({"detail": "Given token not valid"}));
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn catalog_upstream_error_without_body_uses_generic_message() {
    let vendor = Arc::new(FakeVendor {
        catalog_failure: Some((502, "")),
        ..FakeVendor::default()
    });
    let server = server(vendor, Arc::default());

    let body: Value = server.get("/api/test").await.json();
    assert_eq!(body["message"], CONNECTION_FAILED);
    assert_eq!(CONNECTION_FAILED, "❌ Connection failed");
    assert_eq!(body["error"], "Vendor request failed with status 502");
}

#[tokio::test]
async fn missing_access_token_fails_before_dependent_calls() {
    let vendor = Arc::new(FakeVendor {
        omit_token: true,
        catalog: catalog(),
        ..FakeVendor::default()
    });
    let server = server(vendor.clone(), Arc::default());

    for response in [
        server.get("/api/test").await,
        server.get("/api/catalog").await,
        server
            .post("/api/order")
            .json(&json!({"sku": 1148, "price": 9.99, "destination": "+15555550123"}))
            .await,
    ] {
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], "No access token returned.");
    }

    assert_eq!(vendor.auth_calls.load(Ordering::SeqCst), 3);
    assert_eq!(vendor.catalog_calls.load(Ordering::SeqCst), 0);
    assert!(vendor.orders.lock().unwrap().is_empty());
}

#[tokio::test]
async fn order_with_missing_fields_is_rejected_without_upstream_calls() {
    let vendor = vendor_with_catalog();
    let server = server(vendor.clone(), Arc::default());

    for body in [
        json!({}),
        json!({"price": 9.99, "destination": "+15555550123"}),
        json!({"sku": 1148, "destination": "+15555550123"}),
        json!({"sku": 1148, "price": 9.99}),
        json!({"sku": 1148, "price": 9.99, "destination": ""}),
    ] {
        let response = server.post("/api/order").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let error: Value = response.json();
        assert!(error["error"]
            .as_str()
            .unwrap()
            .starts_with("Missing required fields:"));
        assert!(error.get("message").is_none());
    }

    assert_eq!(vendor.auth_calls.load(Ordering::SeqCst), 0);
    assert!(vendor.orders.lock().unwrap().is_empty());
}

#[tokio::test]
async fn order_returns_reference_code_and_vendor_data() {
    let vendor = vendor_with_catalog();
    let server = server(vendor.clone(), Arc::default());

    let response = server
        .post("/api/order")
        .json(&json!({"sku": 1148, "price": 9.99, "destination": "+15555550123"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let reference_code = body["reference_code"].as_str().unwrap().to_string();
    assert!(uuid::Uuid::parse_str(&reference_code).is_ok());
    assert_eq!(body["data"]["status"], "accepted");
    assert_eq!(body["data"]["reference_code"], reference_code.as_str());

    let orders = vendor.orders.lock().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].reference_code, reference_code);
    assert_eq!(orders[0].sku, 1148);
    assert_eq!(orders[0].quantity, 1);
    assert!(!orders[0].pre_order);
    assert_eq!(orders[0].delivery_type, 1);
    assert_eq!(orders[0].destination, "+15555550123");
}

#[tokio::test]
async fn order_honors_delivery_type() {
    let vendor = vendor_with_catalog();
    let server = server(vendor.clone(), Arc::default());

    server
        .post("/api/order")
        .json(&json!({"sku": 1201, "price": 20, "destination": "a@b.test", "delivery_type": 2}))
        .await;

    assert_eq!(vendor.orders.lock().unwrap()[0].delivery_type, 2);
}

#[tokio::test]
async fn reference_codes_never_repeat_and_tokens_are_per_request() {
    let vendor = vendor_with_catalog();
    let server = server(vendor.clone(), Arc::default());

    let mut codes = HashSet::new();
    for _ in 0..10 {
        let body: Value = server
            .post("/api/order")
            .json(&json!({"sku": 1148, "price": 9.99, "destination": "+15555550123"}))
            .await
            .json();
        codes.insert(body["reference_code"].as_str().unwrap().to_string());
    }
    assert_eq!(codes.len(), 10);

    assert_eq!(vendor.auth_calls.load(Ordering::SeqCst), 10);
    let tokens: HashSet<String> = vendor.tokens_used.lock().unwrap().iter().cloned().collect();
    assert_eq!(tokens.len(), 10);
}

#[tokio::test]
async fn order_upstream_failure_is_reported() {
    let vendor = Arc::new(FakeVendor {
        order_failure: Some((400, r#"{"detail":"Insufficient balance"}"#)),
        ..FakeVendor::default()
    });
    let server = server(vendor, Arc::default());

    let response = server
        .post("/api/order")
        .json(&json!({"sku": 1148, "price": 9.99, "destination": "+15555550123"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Order creation failed");
    assert_eq!(body["error"], json!({"detail": "Insufficient balance"}));
}

#[tokio::test]
async fn checkout_returns_redirect_url() {
    let payments = Arc::new(FakePayments::default());
    let vendor = vendor_with_catalog();
    let server = server(vendor.clone(), payments.clone());

    let response = server
        .post("/api/checkout")
        .json(&json!({"sku": 1148, "price": 19.99, "destination": "+15555550123"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, json!({"url": "https://checkout.stripe.com/c/pay/cs_test_1"}));

    let requests = payments.requests.lock().unwrap();
    assert_eq!(requests[0], CheckoutRequest::new(1148, 19.99, "+15555550123"));
    assert_eq!(vendor.auth_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn checkout_with_missing_fields_is_rejected() {
    let payments = Arc::new(FakePayments::default());
    let server = server(vendor_with_catalog(), payments.clone());

    let response = server
        .post("/api/checkout")
        .json(&json!({"sku": 1148}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Missing required fields: price, destination");
    assert!(payments.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn checkout_provider_rejection_is_reported() {
    let payments = Arc::new(FakePayments {
        reject_with: Some("Invalid API Key provided"),
        ..FakePayments::default()
    });
    let server = server(vendor_with_catalog(), payments);

    let response = server
        .post("/api/checkout")
        .json(&json!({"sku": 1148, "price": 5, "destination": "+15555550123"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Checkout session creation failed");
    assert_eq!(body["error"], "Invalid API Key provided");
}

#[tokio::test]
async fn order_accepted_without_vendor_body_still_returns_reference_code() {
    let vendor = Arc::new(FakeVendor {
        bodyless_order_reply: true,
        ..FakeVendor::default()
    });
    let server = server(vendor.clone(), Arc::default());

    let response = server
        .post("/api/order")
        .json(&json!({"sku": 1148, "price": 9.99, "destination": "+15555550123"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"], Value::Null);
    assert_eq!(
        body["reference_code"],
        vendor.orders.lock().unwrap()[0].reference_code.as_str()
    );
}

#[tokio::test]
async fn unreadable_purchase_bodies_get_json_400() {
    let vendor = vendor_with_catalog();
    let payments = Arc::new(FakePayments::default());
    let server = server(vendor.clone(), payments.clone());

    for path in ["/api/order", "/api/checkout"] {
        let bodyless = server.post(path).await;
        assert_eq!(bodyless.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = bodyless.json();
        assert_eq!(
            body,
            json!({"error": "Missing required fields: sku, price, destination"})
        );

        let not_json = server.post(path).text("sku=1148&price=9.99").await;
        assert_eq!(not_json.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = not_json.json();
        assert_eq!(
            body["error"],
            "Missing required fields: sku, price, destination"
        );

        let null_body = server.post(path).json(&Value::Null).await;
        assert_eq!(null_body.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = null_body.json();
        assert_eq!(
            body["error"],
            "Missing required fields: sku, price, destination"
        );
    }

    assert_eq!(vendor.auth_calls.load(Ordering::SeqCst), 0);
    assert!(payments.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn wrong_typed_purchase_field_is_named_in_400() {
    let vendor = vendor_with_catalog();
    let payments = Arc::new(FakePayments::default());
    let server = server(vendor.clone(), payments.clone());

    for path in ["/api/order", "/api/checkout"] {
        let response = server
            .post(path)
            .json(&json!({"sku": "1148", "price": 9.99, "destination": "+15555550123"}))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body, json!({"error": "Invalid field sku: expected an integer"}));
    }

    assert_eq!(vendor.auth_calls.load(Ordering::SeqCst), 0);
    assert!(vendor.orders.lock().unwrap().is_empty());
    assert!(payments.requests.lock().unwrap().is_empty());
}
