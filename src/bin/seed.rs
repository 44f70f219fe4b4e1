//! Seed the database with the demo admin & faculty accounts.
//!
//! Usage: seed
//!
//! Safe to re-run: accounts whose email already exists are skipped.

use std::env;
use std::process::exit;

use anyhow::{Context, Result};
use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sqlx::MySqlPool;

struct SeedUser {
    email: &'static str,
    password: &'static str,
    name: &'static str,
    phone: &'static str,
    erp_id: &'static str,
    role: &'static str,
    department: &'static str,
}

const SEED_USERS: &[SeedUser] = &[
    // ── Admins (one HOD per department) ──────────────────────
    SeedUser {
        email: "hod.cse@edusync.com",
        password: "Admin@cse123",
        name: "HOD CSE",
        phone: "+919876543210",
        erp_id: "HOD_CSE",
        role: "admin",
        department: "CSE",
    },
    SeedUser {
        email: "hod.cse_aiml@edusync.com",
        password: "Admin@csm123",
        name: "HOD CSE (AIML)",
        phone: "+919876543211",
        erp_id: "HOD_CSE_AIML",
        role: "admin",
        department: "CSE_AIML",
    },
    SeedUser {
        email: "hod.cse_aids@edusync.com",
        password: "Admin@aids123",
        name: "HOD CSE (AIDS)",
        phone: "+919876543212",
        erp_id: "HOD_CSE_AIDS",
        role: "admin",
        department: "CSE_AIDS",
    },
    SeedUser {
        email: "hod.cse_ds@edusync.com",
        password: "Admin@ds123",
        name: "HOD CSE (DS)",
        phone: "+919876543213",
        erp_id: "HOD_CSE_DS",
        role: "admin",
        department: "CSE_DS",
    },
    SeedUser {
        email: "hod.ece@edusync.com",
        password: "Admin@ece123",
        name: "HOD ECE",
        phone: "+919876543214",
        erp_id: "HOD_ECE",
        role: "admin",
        department: "ECE",
    },
    SeedUser {
        email: "hod.hs@edusync.com",
        password: "Admin@hs123",
        name: "HOD HS",
        phone: "+919876543215",
        erp_id: "HOD_HS",
        role: "admin",
        department: "HS",
    },
    // ── Faculty samples ──────────────────────────────────────
    SeedUser {
        email: "faculty1@edusync.com",
        password: "Faculty@cse123",
        name: "Dr. Ramesh Kumar",
        phone: "+919876543301",
        erp_id: "ERP001",
        role: "faculty",
        department: "CSE",
    },
    SeedUser {
        email: "faculty2@edusync.com",
        password: "Faculty@csm123",
        name: "Dr. Priya Sharma",
        phone: "+919876543302",
        erp_id: "ERP002",
        role: "faculty",
        department: "CSE_AIML",
    },
    SeedUser {
        email: "faculty3@edusync.com",
        password: "Faculty@aids123",
        name: "Prof. Suresh Reddy",
        phone: "+919876543303",
        erp_id: "ERP003",
        role: "faculty",
        department: "CSE_AIDS",
    },
    SeedUser {
        email: "faculty4@edusync.com",
        password: "Faculty@ece123",
        name: "Dr. Anitha Rao",
        phone: "+919876543304",
        erp_id: "ERP004",
        role: "faculty",
        department: "ECE",
    },
];

fn hash_password(password: &str) -> String {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
}

async fn seed_user(pool: &MySqlPool, user: &SeedUser) -> Result<()> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = ? LIMIT 1)",
    )
    .bind(user.email)
    .fetch_one(pool)
    .await?;

    if exists {
        println!("  - account already exists: {}", user.email);
        return Ok(());
    }

    // seeded accounts are usable immediately
    sqlx::query(
        r#"
        INSERT INTO users (name, email, phone, password, role, department, erp_id, approved)
        VALUES (?, ?, ?, ?, ?, ?, ?, TRUE)
        "#,
    )
    .bind(user.name)
    .bind(user.email)
    .bind(user.phone)
    .bind(hash_password(user.password))
    .bind(user.role)
    .bind(user.department)
    .bind(user.erp_id)
    .execute(pool)
    .await?;

    println!(
        "  + created {} -> role: {}, dept: {}",
        user.email, user.role, user.department
    );
    Ok(())
}

#[actix_web::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Fatal error: {err:#}");
        exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = MySqlPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    println!("EduSync — database seeder");
    println!("Seeding {} users...\n", SEED_USERS.len());

    for user in SEED_USERS {
        seed_user(&pool, user).await?;
    }

    println!("\nSeed credentials summary");
    println!("------------------------\n");
    println!("  ADMIN ACCOUNTS:");
    for u in SEED_USERS.iter().filter(|u| u.role == "admin") {
        println!("    {:<30} {:<16} {:<10}", u.email, u.password, u.department);
    }
    println!("\n  FACULTY ACCOUNTS:");
    for u in SEED_USERS.iter().filter(|u| u.role == "faculty") {
        println!(
            "    {:<30} {:<16} {:<10} {}",
            u.email, u.password, u.department, u.erp_id
        );
    }
    println!("\nDone! You can now log in.");
    Ok(())
}
