//! Bootstrap the first admin account outside the normal signup flow.
//!
//! Usage: bootstrap_admin <EMAIL> [DEPARTMENT]
//!
//! Promotes an existing account (created via signup or seed) to admin of the
//! given department. Reads DATABASE_URL from the environment or a .env file.

use std::env;
use std::process::exit;

use anyhow::{Context, Result, bail};
use sqlx::MySqlPool;

const ALLOWED_DEPARTMENTS: [&str; 6] = ["CSE", "CSE_AIML", "CSE_AIDS", "CSE_DS", "ECE", "HS"];

#[actix_web::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error setting initial admin: {err:#}");
        exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    let mut args = env::args().skip(1);
    let email = match args.next() {
        Some(e) => e.to_lowercase(),
        None => {
            eprintln!("Usage: bootstrap_admin <EMAIL> [DEPARTMENT]");
            exit(1);
        }
    };
    let department = args.next().unwrap_or_else(|| "CSE".to_string());

    if !ALLOWED_DEPARTMENTS.contains(&department.as_str()) {
        bail!(
            "Invalid department {department}. Must be one of: {}",
            ALLOWED_DEPARTMENTS.join(", ")
        );
    }

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = MySqlPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let result = sqlx::query(
        "UPDATE users SET role = 'admin', department = ?, approved = TRUE WHERE email = ?",
    )
    .bind(&department)
    .bind(&email)
    .execute(&pool)
    .await?;

    if result.rows_affected() == 0 {
        bail!("No account with email {email}; sign it up first, then re-run");
    }

    println!("Successfully set {email} as admin in department {department}");
    Ok(())
}
