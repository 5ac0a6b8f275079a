//! Live integration tests for shopintel-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/shopintel-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use shopintel_core::{BrandContext, ContactDetail, Faq, Platform, Product, SocialHandle};
use shopintel_db::{
    get_brand, get_brand_context, insert_brand_context, list_brands, list_competitors, DbError,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn product(title: &str, id: Option<&str>) -> Product {
    Product {
        id: id.map(str::to_owned),
        title: title.to_string(),
        price: Some("12.99".to_string()),
        description: Some("<p>Soft</p>".to_string()),
        url: Some(format!("https://memy.co.in/products/{}", title.to_lowercase())),
    }
}

fn full_brand(store_url: &str) -> BrandContext {
    let mut brand = BrandContext::empty(store_url);
    brand.product_catalog = vec![product("Shirt", Some("1")), product("Tote", None)];
    brand.hero_products = vec![Product {
        id: None,
        title: "Shirt".to_string(),
        price: Some(String::new()),
        description: None,
        url: None,
    }];
    brand.privacy_policy = Some("We never sell your data.".to_string());
    brand.faqs = vec![
        Faq {
            question: "COD?".to_string(),
            answer: "Yes.".to_string(),
        },
        Faq {
            question: "Returns?".to_string(),
            answer: "14 days.".to_string(),
        },
    ];
    brand.social_handles = vec![
        SocialHandle {
            platform: Platform::Tiktok,
            url: "https://www.tiktok.com/@memy".to_string(),
        },
        SocialHandle {
            platform: Platform::Instagram,
            url: "https://instagram.com/memy".to_string(),
        },
    ];
    brand.contact_details = ContactDetail {
        emails: vec!["b@memy.co.in".to_string(), "a@memy.co.in".to_string()],
        phone_numbers: vec!["9876543210".to_string(), "9876543210".to_string()],
    };
    brand.brand_description = Some("Handmade in Jaipur.".to_string());
    brand.important_links.insert(
        "contact us".to_string(),
        "https://memy.co.in/pages/contact".to_string(),
    );
    brand
}

// ---------------------------------------------------------------------------
// insert_brand_context / get_brand_context
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn stored_brand_context_reads_back_identically(pool: sqlx::PgPool) {
    let brand = full_brand("https://memy.co.in");

    let id = insert_brand_context(&pool, &brand, None)
        .await
        .expect("insert failed");
    let restored = get_brand_context(&pool, id).await.expect("read failed");

    assert_eq!(restored, brand);
}

#[sqlx::test(migrations = "../../migrations")]
async fn empty_brand_context_round_trips(pool: sqlx::PgPool) {
    let brand = BrandContext::empty("https://empty.example.com");

    let id = insert_brand_context(&pool, &brand, None)
        .await
        .expect("insert failed");

    assert_eq!(get_brand_context(&pool, id).await.expect("read failed"), brand);
}

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_store_url_is_rejected_and_writes_nothing(pool: sqlx::PgPool) {
    let brand = full_brand("https://memy.co.in");
    insert_brand_context(&pool, &brand, None)
        .await
        .expect("first insert failed");

    let err = insert_brand_context(&pool, &brand, None)
        .await
        .expect_err("second insert must fail");

    assert!(
        matches!(err, DbError::Duplicate { ref store_url } if store_url == "https://memy.co.in"),
        "got {err:?}"
    );
    let products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await
        .expect("count failed");
    assert_eq!(products, 2, "failed insert must not leave child rows");
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_brand_context_missing_id_is_not_found(pool: sqlx::PgPool) {
    let err = get_brand_context(&pool, 9_999)
        .await
        .expect_err("missing brand must fail");
    assert!(matches!(err, DbError::NotFound), "got {err:?}");
}

// ---------------------------------------------------------------------------
// Competitors and listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn competitors_link_back_to_primary_brand(pool: sqlx::PgPool) {
    let primary = insert_brand_context(&pool, &full_brand("https://memy.co.in"), None)
        .await
        .expect("primary insert failed");
    let rival = insert_brand_context(
        &pool,
        &BrandContext::empty("https://rival.myshopify.com"),
        Some(primary),
    )
    .await
    .expect("competitor insert failed");

    let primary_row = get_brand(&pool, primary)
        .await
        .expect("query failed")
        .expect("primary should exist");
    assert!(!primary_row.is_competitor);
    assert_eq!(primary_row.discovered_from, None);

    let competitors = list_competitors(&pool, primary).await.expect("query failed");
    assert_eq!(competitors.len(), 1);
    assert_eq!(competitors[0].id, rival);
    assert!(competitors[0].is_competitor);
    assert_eq!(competitors[0].discovered_from, Some(primary));

    let all = list_brands(&pool).await.expect("query failed");
    let urls: Vec<&str> = all.iter().map(|b| b.store_url.as_str()).collect();
    assert_eq!(urls, ["https://memy.co.in", "https://rival.myshopify.com"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_brand_missing_id_returns_none(pool: sqlx::PgPool) {
    assert!(get_brand(&pool, 1).await.expect("query failed").is_none());
}
