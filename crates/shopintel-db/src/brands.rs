//! Database operations for `brands` and their child tables.
//!
//! A [`BrandContext`] is written once, as a single transaction, and read back
//! by rebuilding it from the child rows in `position` order.

use chrono::{DateTime, Utc};
use shopintel_core::{BrandContext, ContactDetail, Faq, Platform, Product, SocialHandle};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::DbError;

const UNIQUE_VIOLATION: &str = "23505";

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `brands` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BrandRow {
    pub id: i64,
    pub public_id: Uuid,
    pub store_url: String,
    pub brand_description: Option<String>,
    pub privacy_policy: Option<String>,
    pub return_policy: Option<String>,
    pub is_competitor: bool,
    pub discovered_from: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    source_product_id: Option<String>,
    title: String,
    price: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.source_product_id,
            title: row.title,
            price: row.price,
            description: row.description,
            url: row.url,
        }
    }
}

#[derive(Clone, Copy)]
enum ProductTable {
    Catalog,
    Hero,
}

impl ProductTable {
    fn name(self) -> &'static str {
        match self {
            ProductTable::Catalog => "products",
            ProductTable::Hero => "hero_products",
        }
    }
}

const BRAND_COLUMNS: &str = "id, public_id, store_url, brand_description, privacy_policy, \
     return_policy, is_competitor, discovered_from, created_at, updated_at";

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Persists `brand` and every child record, returning the new brand id.
///
/// Pass `discovered_from` to store the brand as a competitor of an existing
/// brand. Either everything is written or nothing is.
///
/// # Errors
///
/// Returns [`DbError::Duplicate`] if a brand with the same `store_url` is
/// already stored, or [`DbError::Sqlx`] on any other database failure.
pub async fn insert_brand_context(
    pool: &PgPool,
    brand: &BrandContext,
    discovered_from: Option<i64>,
) -> Result<i64, DbError> {
    let mut tx = pool.begin().await?;

    let brand_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO brands \
           (store_url, brand_description, privacy_policy, return_policy, is_competitor, discovered_from) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id",
    )
    .bind(&brand.store_url)
    .bind(&brand.brand_description)
    .bind(&brand.privacy_policy)
    .bind(&brand.return_policy)
    .bind(discovered_from.is_some())
    .bind(discovered_from)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| map_unique_violation(e, &brand.store_url))?;

    insert_products(&mut tx, ProductTable::Catalog, brand_id, &brand.product_catalog).await?;
    insert_products(&mut tx, ProductTable::Hero, brand_id, &brand.hero_products).await?;

    for (i, faq) in brand.faqs.iter().enumerate() {
        sqlx::query(
            "INSERT INTO faqs (brand_id, position, question, answer) VALUES ($1, $2, $3, $4)",
        )
        .bind(brand_id)
        .bind(position(i))
        .bind(&faq.question)
        .bind(&faq.answer)
        .execute(&mut *tx)
        .await?;
    }

    for (i, handle) in brand.social_handles.iter().enumerate() {
        sqlx::query(
            "INSERT INTO social_handles (brand_id, position, platform, url) VALUES ($1, $2, $3, $4)",
        )
        .bind(brand_id)
        .bind(position(i))
        .bind(handle.platform.as_str())
        .bind(&handle.url)
        .execute(&mut *tx)
        .await?;
    }

    let contacts = &brand.contact_details;
    for (kind, values) in [("email", &contacts.emails), ("phone", &contacts.phone_numbers)] {
        for (i, value) in values.iter().enumerate() {
            sqlx::query(
                "INSERT INTO contact_details (brand_id, kind, position, value) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(brand_id)
            .bind(kind)
            .bind(position(i))
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }
    }

    for (label, url) in &brand.important_links {
        sqlx::query("INSERT INTO important_links (brand_id, label, url) VALUES ($1, $2, $3)")
            .bind(brand_id)
            .bind(label)
            .bind(url)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(brand_id)
}

async fn insert_products(
    tx: &mut Transaction<'_, Postgres>,
    table: ProductTable,
    brand_id: i64,
    products: &[Product],
) -> Result<(), DbError> {
    let sql = format!(
        "INSERT INTO {} (brand_id, position, source_product_id, title, price, description, url) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
        table.name()
    );
    for (i, product) in products.iter().enumerate() {
        sqlx::query(&sql)
            .bind(brand_id)
            .bind(position(i))
            .bind(&product.id)
            .bind(&product.title)
            .bind(&product.price)
            .bind(&product.description)
            .bind(&product.url)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

fn map_unique_violation(e: sqlx::Error, store_url: &str) -> DbError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return DbError::Duplicate {
                store_url: store_url.to_owned(),
            };
        }
    }
    DbError::Sqlx(e)
}

fn position(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Returns every stored brand, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_brands(pool: &PgPool) -> Result<Vec<BrandRow>, DbError> {
    let rows = sqlx::query_as::<_, BrandRow>(&format!(
        "SELECT {BRAND_COLUMNS} FROM brands ORDER BY id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the competitors discovered for `brand_id`, in insertion order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_competitors(pool: &PgPool, brand_id: i64) -> Result<Vec<BrandRow>, DbError> {
    let rows = sqlx::query_as::<_, BrandRow>(&format!(
        "SELECT {BRAND_COLUMNS} FROM brands WHERE discovered_from = $1 ORDER BY id"
    ))
    .bind(brand_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns a single brand row by id, or `None` if not found.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_brand(pool: &PgPool, id: i64) -> Result<Option<BrandRow>, DbError> {
    let row = sqlx::query_as::<_, BrandRow>(&format!(
        "SELECT {BRAND_COLUMNS} FROM brands WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Rebuilds the stored [`BrandContext`] for brand `id`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no such brand exists,
/// [`DbError::InvalidStoredValue`] if a social handle row carries an unknown
/// platform, or [`DbError::Sqlx`] if a query fails.
pub async fn get_brand_context(pool: &PgPool, id: i64) -> Result<BrandContext, DbError> {
    let row = get_brand(pool, id).await?.ok_or(DbError::NotFound)?;

    let product_catalog = load_products(pool, ProductTable::Catalog, id).await?;
    let hero_products = load_products(pool, ProductTable::Hero, id).await?;

    let faqs = sqlx::query_as::<_, (String, String)>(
        "SELECT question, answer FROM faqs WHERE brand_id = $1 ORDER BY position",
    )
    .bind(id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|(question, answer)| Faq { question, answer })
    .collect();

    let social_handles = sqlx::query_as::<_, (String, String)>(
        "SELECT platform, url FROM social_handles WHERE brand_id = $1 ORDER BY position",
    )
    .bind(id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|(platform, url)| {
        let platform = platform
            .parse::<Platform>()
            .map_err(DbError::InvalidStoredValue)?;
        Ok(SocialHandle { platform, url })
    })
    .collect::<Result<Vec<_>, DbError>>()?;

    let mut contact_details = ContactDetail::default();
    let contacts = sqlx::query_as::<_, (String, String)>(
        "SELECT kind, value FROM contact_details WHERE brand_id = $1 ORDER BY kind, position",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;
    for (kind, value) in contacts {
        match kind.as_str() {
            "email" => contact_details.emails.push(value),
            "phone" => contact_details.phone_numbers.push(value),
            other => {
                return Err(DbError::InvalidStoredValue(format!(
                    "unknown contact kind '{other}'"
                )))
            }
        }
    }

    let important_links = sqlx::query_as::<_, (String, String)>(
        "SELECT label, url FROM important_links WHERE brand_id = $1",
    )
    .bind(id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .collect();

    Ok(BrandContext {
        store_url: row.store_url,
        product_catalog,
        hero_products,
        privacy_policy: row.privacy_policy,
        return_policy: row.return_policy,
        faqs,
        social_handles,
        contact_details,
        brand_description: row.brand_description,
        important_links,
    })
}

async fn load_products(
    pool: &PgPool,
    table: ProductTable,
    brand_id: i64,
) -> Result<Vec<Product>, DbError> {
    let rows = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT source_product_id, title, price, description, url FROM {} \
         WHERE brand_id = $1 ORDER BY position",
        table.name()
    ))
    .bind(brand_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Product::from).collect())
}
