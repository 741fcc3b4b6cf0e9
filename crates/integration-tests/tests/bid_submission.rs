//! End-to-end tests for the bid form.
//!
//! These drive the real site router against a stub bidding backend and
//! check what the visitor sees plus what the backend receives.

#![allow(clippy::unwrap_used)]

use runner_bids_core::BidField;
use runner_bids_integration_tests::{
    CreateBidReply, StubOptions, TestContext, VALID_BID, bid_with,
};
use serde_json::json;

const FALLBACK: &str = "Something went wrong. Please try again.";

fn other_messages(field: BidField) -> impl Iterator<Item = &'static str> {
    BidField::ALL
        .into_iter()
        .filter(move |f| *f != field)
        .map(BidField::error_message)
}

async fn assert_rejected_without_backend(ctx: &TestContext, fields: &[(&str, &str)], field: BidField) {
    let resp = ctx.post_bid(fields).await;
    assert_eq!(resp.status(), 422, "field {field}");

    let body = resp.text().await.unwrap();
    assert!(body.contains(field.error_message()), "missing message for {field}");
    for message in other_messages(field) {
        assert!(!body.contains(message), "unexpected '{message}' for {field}");
    }
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_each_blank_field_reports_its_own_message() {
    let ctx = TestContext::with_defaults().await;

    for field in BidField::ALL {
        let fields = bid_with(field.form_name(), "");
        assert_rejected_without_backend(&ctx, &fields, field).await;
    }

    assert_eq!(ctx.backend.create_calls(), 0);
}

#[tokio::test]
async fn test_whitespace_only_counts_as_blank() {
    let ctx = TestContext::with_defaults().await;

    let fields = bid_with("delivery_address", "   ");
    assert_rejected_without_backend(&ctx, &fields, BidField::DeliveryAddress).await;
    assert_eq!(ctx.backend.create_calls(), 0);
}

#[tokio::test]
async fn test_malformed_values_are_rejected() {
    let ctx = TestContext::with_defaults().await;

    assert_rejected_without_backend(&ctx, &bid_with("name", "A"), BidField::Name).await;
    assert_rejected_without_backend(&ctx, &bid_with("email", "ada@example"), BidField::Email)
        .await;
    assert_rejected_without_backend(&ctx, &bid_with("email", "ada example.com"), BidField::Email)
        .await;
    assert_rejected_without_backend(
        &ctx,
        &bid_with("price_willing_to_pay", "12.345"),
        BidField::Price,
    )
    .await;
    assert_rejected_without_backend(
        &ctx,
        &bid_with("payment_type", "Cash"),
        BidField::PaymentType,
    )
    .await;

    assert_eq!(ctx.backend.create_calls(), 0);
}

#[tokio::test]
async fn test_first_invalid_field_wins() {
    let ctx = TestContext::with_defaults().await;

    let mut fields = bid_with("email", "");
    for pair in &mut fields {
        if pair.0 == "payment_type" {
            pair.1 = "";
        }
    }

    assert_rejected_without_backend(&ctx, &fields, BidField::Email).await;
}

#[tokio::test]
async fn test_failed_validation_keeps_entered_values() {
    let ctx = TestContext::with_defaults().await;

    let resp = ctx.post_bid(&bid_with("city", "")).await;
    let body = resp.text().await.unwrap();

    assert!(body.contains(r#"value="Ada Obi""#));
    assert!(body.contains(r#"value="2500.50""#));
    assert!(body.contains(r#"<option value="Credit Card" selected>"#));
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test]
async fn test_created_redirects_to_confirmation_with_toast() {
    let ctx = TestContext::with_defaults().await;

    let resp = ctx.post_bid(&VALID_BID).await;
    assert_eq!(resp.status(), 303);
    assert_eq!(
        resp.headers().get("location").unwrap().to_str().unwrap(),
        "/order/success"
    );
    assert_eq!(ctx.backend.create_calls(), 1);

    let page = ctx.get("/order/success").await;
    assert_eq!(page.status(), 200);
    let body = page.text().await.unwrap();
    assert!(body.contains("Bid has been created successfully"));
    assert!(body.contains("toast--success"));

    // The toast is shown once
    let body = ctx.get("/order/success").await.text().await.unwrap();
    assert!(!body.contains("Bid has been created successfully"));
}

#[tokio::test]
async fn test_backend_receives_all_fields() {
    let ctx = TestContext::with_defaults().await;

    ctx.post_bid(&VALID_BID).await;

    assert_eq!(
        ctx.backend.last_bid().unwrap(),
        json!({
            "name": "Ada Obi",
            "email": "ada@example.com",
            "city": "Lagos",
            "delivery_address": "12 Marina Road",
            "price_willing_to_pay": "2500.50",
            "special_instructions": "Leave at the gate",
            "payment_type": "Credit Card",
        })
    );
}

#[tokio::test]
async fn test_rejection_shows_backend_message() {
    let ctx = TestContext::start(StubOptions {
        create_bid: CreateBidReply::Json(
            409,
            json!({ "message": "You already have an open bid", "statusCode": 409 }),
        ),
        ..StubOptions::default()
    })
    .await;

    let resp = ctx.post_bid(&VALID_BID).await;
    assert_eq!(resp.status(), 422);

    let body = resp.text().await.unwrap();
    assert!(body.contains("You already have an open bid"));
    assert!(body.contains("toast--error"));
    assert!(body.contains("data-submit-bid>"));
    assert!(!body.contains("disabled"));
    assert!(body.contains(r#"value="Ada Obi""#));
    assert_eq!(ctx.backend.create_calls(), 1);
}

#[tokio::test]
async fn test_rejection_with_message_list_shows_first() {
    let ctx = TestContext::start(StubOptions {
        create_bid: CreateBidReply::Json(
            400,
            json!({ "message": ["city is not served yet", "price is too low"] }),
        ),
        ..StubOptions::default()
    })
    .await;

    let body = ctx.post_bid(&VALID_BID).await.text().await.unwrap();
    assert!(body.contains("city is not served yet"));
    assert!(!body.contains("price is too low"));
}

#[tokio::test]
async fn test_rejection_without_message_uses_fallback() {
    let ctx = TestContext::start(StubOptions {
        create_bid: CreateBidReply::Text(502, "<html>Bad Gateway</html>"),
        ..StubOptions::default()
    })
    .await;

    let resp = ctx.post_bid(&VALID_BID).await;
    assert_eq!(resp.status(), 422);
    assert!(resp.text().await.unwrap().contains(FALLBACK));
}

#[tokio::test]
async fn test_success_other_than_created_is_a_failure() {
    let ctx = TestContext::start(StubOptions {
        create_bid: CreateBidReply::Json(200, json!({})),
        ..StubOptions::default()
    })
    .await;

    let resp = ctx.post_bid(&VALID_BID).await;
    assert_eq!(resp.status(), 422);
    assert!(resp.text().await.unwrap().contains(FALLBACK));
}

#[tokio::test]
async fn test_unreachable_backend_uses_fallback() {
    let ctx = TestContext::with_unreachable_backend().await;

    assert_eq!(ctx.get("/").await.status(), 200);

    let resp = ctx.post_bid(&VALID_BID).await;
    assert_eq!(resp.status(), 422);

    let body = resp.text().await.unwrap();
    assert!(body.contains(FALLBACK));
    assert!(body.contains("toast--error"));
    assert!(body.contains("data-submit-bid>"));
    assert!(!body.contains("disabled"));
    assert!(body.contains(r#"value="Ada Obi""#));
    assert_eq!(ctx.backend.create_calls(), 0);
}

#[tokio::test]
async fn test_backend_receives_trimmed_values() {
    let ctx = TestContext::with_defaults().await;

    let mut fields = bid_with("email", " ada@example.com ");
    for pair in &mut fields {
        if pair.0 == "name" {
            pair.1 = "  Ada Obi  ";
        }
    }

    let resp = ctx.post_bid(&fields).await;
    assert_eq!(resp.status(), 303);

    let bid = ctx.backend.last_bid().unwrap();
    assert_eq!(bid["name"], "Ada Obi");
    assert_eq!(bid["email"], "ada@example.com");
}

#[tokio::test]
async fn test_submissions_are_rate_limited_per_client() {
    let ctx = TestContext::with_defaults().await;

    let mut statuses = Vec::new();
    for _ in 0..6 {
        let resp = ctx
            .client
            .post(ctx.url("/bids"))
            .header("x-forwarded-for", "203.0.113.7")
            .form(&bid_with("name", ""))
            .send()
            .await
            .unwrap();
        statuses.push(resp.status().as_u16());
    }

    assert_eq!(&statuses[..5], &[422; 5]);
    assert_eq!(statuses[5], 429);
}
