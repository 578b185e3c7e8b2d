//! Seed the catalog with demo data.
//!
//! Inserts a small set of products, suppliers, and offers so the search
//! API has something to answer with in a fresh environment. Inserts use
//! explicit ids with `ON CONFLICT DO NOTHING`, so the command is
//! idempotent and safe to re-run.

use tracing::info;

const PRODUCTS: &[(i64, &str, &str, &str)] = &[
    (1, "HB-M8-200", "Hex bolt M8 x 200", "Zinc-plated steel, DIN 931"),
    (2, "HB-M10-100", "Hex bolt M10 x 100", "Zinc-plated steel, DIN 931"),
    (3, "BRG-6204", "Ball bearing 6204-2RS", "Sealed, 20x47x14 mm"),
    (4, "GSK-120", "Flange gasket DN120", "Graphite-reinforced"),
    (5, "VLV-050", "Ball valve 1/2\"", "Brass body, PTFE seat"),
];

const SUPPLIERS: &[(i64, &str, &str)] = &[
    (1, "Fastenco", "Hamburg"),
    (2, "BoltMaster", "Rotterdam"),
    (3, "Industrial Parts Co", "Warsaw"),
];

#[allow(clippy::type_complexity)]
const OFFERS: &[(i64, i64, i64, i32, i32, &str, &str)] = &[
    // (id, product_id, supplier_id, stock, lead_time_days, price_no_vat, vat_rate)
    (1, 1, 1, 40, 3, "0.85", "20"),
    (2, 1, 2, 500, 7, "0.79", "20"),
    (3, 1, 3, 0, 2, "0.70", "20"),
    (4, 2, 1, 120, 3, "1.10", "20"),
    (5, 3, 2, 35, 5, "4.50", "20"),
    (6, 3, 3, 60, 10, "4.10", "20"),
    (7, 4, 3, 15, 4, "12.00", "20"),
    (8, 5, 1, 8, 6, "9.30", "20"),
];

/// Seed the catalog with demo data.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Connecting to catalog database...");
    let pool = super::connect().await?;

    info!(products = PRODUCTS.len(), "Seeding products");
    for &(id, sku, name, specs) in PRODUCTS {
        sqlx::query(
            "INSERT INTO products (id, sku, name, specs) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(sku)
        .bind(name)
        .bind(specs)
        .execute(&pool)
        .await?;
    }

    info!(suppliers = SUPPLIERS.len(), "Seeding suppliers");
    for &(id, name, city) in SUPPLIERS {
        sqlx::query(
            "INSERT INTO suppliers (id, name, city) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(name)
        .bind(city)
        .execute(&pool)
        .await?;
    }

    info!(offers = OFFERS.len(), "Seeding offers");
    for &(id, product_id, supplier_id, stock, lead_time, price, vat) in OFFERS {
        sqlx::query(
            "INSERT INTO offers \
             (id, product_id, supplier_id, stock, lead_time_days, price_no_vat, vat_rate) \
             VALUES ($1, $2, $3, $4, $5, $6::numeric, $7::numeric) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(product_id)
        .bind(supplier_id)
        .bind(stock)
        .bind(lead_time)
        .bind(price)
        .bind(vat)
        .execute(&pool)
        .await?;
    }

    info!("Catalog seeded");
    Ok(())
}
