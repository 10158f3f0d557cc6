//! Startup seed data
//!
//! Inserts the well-known dev users plus a small sample catalog and
//! customer list, each only when its table is empty. Gated by the
//! `SEED_DATA` flag (on by default in development).

use rust_decimal::Decimal;
use shared::models::{Customer, Product};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::auth::store::User;
use crate::auth::{ROLE_ADMIN, ROLE_CUSTOMER};
use crate::db;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub async fn run(pool: &PgPool) -> Result<(), BoxError> {
    seed_users(pool).await?;
    seed_customers(pool).await?;
    seed_products(pool).await?;
    Ok(())
}

async fn seed_users(pool: &PgPool) -> Result<(), BoxError> {
    if db::users::count(pool).await? > 0 {
        return Ok(());
    }

    let defaults = [
        ("admin", "Admin123*", ROLE_ADMIN),
        ("customer", "Customer123*", ROLE_CUSTOMER),
    ];
    for (username, password, role) in defaults {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            hashed_password: hash_password(password)?,
            role: role.to_string(),
        };
        db::users::insert(pool, &user).await?;
    }
    tracing::info!(count = defaults.len(), "seeded default users");
    Ok(())
}

async fn seed_customers(pool: &PgPool) -> Result<(), BoxError> {
    if db::customers::count(pool).await? > 0 {
        return Ok(());
    }

    let samples = [
        ("Ana Torres", "ana.torres@example.com", Some("+54 11 4000 0001")),
        ("Bruno Díaz", "bruno.diaz@example.com", Some("+54 11 4000 0002")),
        ("Carla Gómez", "carla.gomez@example.com", None),
    ];
    for (name, email, phone) in samples {
        let customer = Customer {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            phone_number: phone.map(|p| p.to_string()),
        };
        db::customers::insert(pool, &customer).await?;
    }
    tracing::info!(count = samples.len(), "seeded sample customers");
    Ok(())
}

async fn seed_products(pool: &PgPool) -> Result<(), BoxError> {
    if db::products::count(pool).await? > 0 {
        return Ok(());
    }

    // (sku, internal code, name, description, unit price in cents, stock)
    let samples: [(&str, &str, &str, &str, i64, i32); 6] = [
        (
            "KB-0001",
            "ELEC-KB-01",
            "Mechanical Keyboard",
            "Tenkeyless mechanical keyboard, brown switches",
            5999,
            25,
        ),
        (
            "MS-0001",
            "ELEC-MS-01",
            "Wireless Mouse",
            "2.4 GHz wireless mouse with USB receiver",
            2450,
            40,
        ),
        (
            "MN-0001",
            "ELEC-MN-01",
            "27\" Monitor",
            "27 inch 1440p IPS monitor",
            27999,
            12,
        ),
        (
            "HS-0001",
            "ELEC-HS-01",
            "USB Headset",
            "Stereo headset with boom microphone",
            3475,
            30,
        ),
        (
            "HUB-0001",
            "ELEC-HUB-01",
            "USB-C Hub",
            "7-in-1 USB-C hub with HDMI and card reader",
            4150,
            18,
        ),
        (
            "CAM-0001",
            "ELEC-CAM-01",
            "Webcam",
            "1080p webcam with privacy shutter",
            5200,
            15,
        ),
    ];
    for (sku, internal_code, name, description, price_cents, stock) in samples {
        let product = Product {
            id: Uuid::new_v4(),
            sku: sku.to_string(),
            internal_code: Some(internal_code.to_string()),
            name: name.to_string(),
            description: Some(description.to_string()),
            current_unit_price: Decimal::new(price_cents, 2),
            stock_quantity: stock,
            is_active: true,
        };
        db::products::insert(pool, &product).await?;
    }
    tracing::info!(count = samples.len(), "seeded sample products");
    Ok(())
}
