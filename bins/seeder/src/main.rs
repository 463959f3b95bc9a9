//! Database seeder for Mizan development and testing.
//!
//! Seeds a test company with subscription, staff users, partners,
//! categories, and products for local development.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use mizan_db::entities::{
    categories, companies, company_subscriptions, products,
    sea_orm_active_enums::{SubscriptionStatus, UserRole},
    subscription_plans, users,
};

/// Test company ID (consistent for all seeds)
const TEST_COMPANY_ID: &str = "00000000-0000-0000-0000-000000000001";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = mizan_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding test company...");
    seed_company(&db).await;

    println!("Seeding subscription...");
    seed_subscription(&db).await;

    println!("Seeding users...");
    seed_users(&db).await;

    println!("Seeding catalog...");
    seed_catalog(&db).await;

    println!("Seeding complete!");
}

fn company_id() -> Uuid {
    Uuid::parse_str(TEST_COMPANY_ID).unwrap()
}

async fn seed_company(db: &DatabaseConnection) {
    if companies::Entity::find_by_id(company_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Test company already exists, skipping...");
        return;
    }

    let now = Utc::now().into();
    let company = companies::ActiveModel {
        id: Set(company_id()),
        name: Set("Demo Trading Co".to_string()),
        email: Set("demo@mizan.dev".to_string()),
        phone: Set("+100000000".to_string()),
        address: Set(Some("1 Demo Street".to_string())),
        tax_rate: Set(Decimal::new(10, 0)),
        tax_name: Set("VAT".to_string()),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };
    company.insert(db).await.expect("Failed to seed company");
}

async fn seed_subscription(db: &DatabaseConnection) {
    let existing = company_subscriptions::Entity::find()
        .filter(company_subscriptions::Column::CompanyId.eq(company_id()))
        .one(db)
        .await
        .expect("Failed to query subscriptions");
    if existing.is_some() {
        println!("  Subscription already exists, skipping...");
        return;
    }

    let plan = subscription_plans::Entity::find()
        .filter(subscription_plans::Column::Name.eq("Business"))
        .one(db)
        .await
        .expect("Failed to query plans")
        .expect("Business plan missing; run the migrator first");

    let today = Utc::now().date_naive();
    let now = Utc::now().into();
    let subscription = company_subscriptions::ActiveModel {
        id: Set(Uuid::new_v4()),
        company_id: Set(company_id()),
        plan_id: Set(plan.id),
        status: Set(SubscriptionStatus::Active),
        start_date: Set(Some(today)),
        end_date: Set(Some(today + chrono::Duration::days(365))),
        trial_end_date: Set(None),
        payment_verified: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };
    subscription
        .insert(db)
        .await
        .expect("Failed to seed subscription");
}

async fn seed_users(db: &DatabaseConnection) {
    let staff = [
        ("demo.manager", "Demo Manager", UserRole::Manager),
        ("demo.accountant", "Demo Accountant", UserRole::Accountant),
        ("demo.cashier", "Demo Cashier", UserRole::Cashier),
        ("demo.rep", "Demo Representative", UserRole::Representative),
        ("demo.merchant", "Demo Merchant", UserRole::Merchant),
    ];

    let now = Utc::now().into();
    for (username, full_name, role) in staff {
        let existing = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(db)
            .await
            .expect("Failed to query users");
        if existing.is_some() {
            println!("  User {username} already exists, skipping...");
            continue;
        }

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(Some(company_id())),
            username: Set(username.to_string()),
            full_name: Set(Some(full_name.to_string())),
            role: Set(role),
            phone: Set(None),
            debt: Set(Decimal::ZERO),
            products_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };
        user.insert(db).await.expect("Failed to seed user");
    }
}

async fn seed_catalog(db: &DatabaseConnection) {
    let existing = categories::Entity::find()
        .filter(categories::Column::CompanyId.eq(company_id()))
        .one(db)
        .await
        .expect("Failed to query categories");
    if existing.is_some() {
        println!("  Catalog already exists, skipping...");
        return;
    }

    let now = Utc::now().into();
    let category = categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        company_id: Set(company_id()),
        name: Set("General".to_string()),
        description: Set(Some("Default category".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let category = category.insert(db).await.expect("Failed to seed category");

    let demo_products = [
        ("Bottled Water 500ml", "8690000000017", 50, 500),
        ("Espresso Beans 1kg", "8690000000024", 1850, 40),
        ("Paper Cups (100)", "8690000000031", 320, 120),
    ];

    for (name, barcode, price_cents, stock) in demo_products {
        let product = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(company_id()),
            category_id: Set(Some(category.id)),
            name: Set(name.to_string()),
            description: Set(None),
            price: Set(Decimal::new(price_cents, 2)),
            cost: Set(Decimal::new(price_cents * 6 / 10, 2)),
            stock: Set(stock),
            low_stock_threshold: Set(10),
            sku: Set(None),
            barcode: Set(Some(barcode.to_string())),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        product.insert(db).await.expect("Failed to seed product");
    }
}
