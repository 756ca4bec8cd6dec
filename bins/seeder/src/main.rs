//! Chart of accounts seeder for Belegwerk development and testing.
//!
//! Seeds a compact SKR04 chart covering the accounts the BWA report and
//! DATEV export need. Re-running is safe; existing numbers are skipped.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use belegwerk_db::entities::{chart_of_accounts, sea_orm_active_enums::AccountType};

struct SeedAccount {
    number: i32,
    name: &'static str,
    account_type: AccountType,
    vat_key: Option<&'static str>,
}

fn skr04_chart() -> Vec<SeedAccount> {
    use AccountType::{Asset, Expense, Liability, Revenue};

    vec![
        // Bestandskonten
        SeedAccount { number: 650, name: "Betriebsausstattung", account_type: Asset, vat_key: None },
        SeedAccount { number: 1200, name: "Bank", account_type: Asset, vat_key: None },
        SeedAccount { number: 1400, name: "Forderungen aus Lieferungen und Leistungen", account_type: Asset, vat_key: None },
        SeedAccount { number: 1600, name: "Kasse", account_type: Asset, vat_key: None },
        SeedAccount { number: 3300, name: "Verbindlichkeiten aus Lieferungen und Leistungen", account_type: Liability, vat_key: None },
        SeedAccount { number: 3806, name: "Umsatzsteuer 19 %", account_type: Liability, vat_key: None },
        // Erlöskonten
        SeedAccount { number: 4200, name: "Erlöse Dienstleistungen 19 % USt", account_type: Revenue, vat_key: Some("3") },
        SeedAccount { number: 4300, name: "Erlöse 7 % USt", account_type: Revenue, vat_key: Some("2") },
        // Aufwandskonten
        SeedAccount { number: 5200, name: "Wareneingang", account_type: Expense, vat_key: Some("9") },
        SeedAccount { number: 5900, name: "Fremdleistungen", account_type: Expense, vat_key: Some("9") },
        SeedAccount { number: 6200, name: "Löhne und Gehälter", account_type: Expense, vat_key: None },
        SeedAccount { number: 6310, name: "Miete", account_type: Expense, vat_key: None },
        SeedAccount { number: 6420, name: "Kfz-Kosten", account_type: Expense, vat_key: Some("9") },
        SeedAccount { number: 6520, name: "Versicherungen", account_type: Expense, vat_key: None },
        SeedAccount { number: 6600, name: "Werbekosten", account_type: Expense, vat_key: Some("9") },
        SeedAccount { number: 6730, name: "Reisekosten", account_type: Expense, vat_key: Some("9") },
        SeedAccount { number: 6815, name: "Bürobedarf", account_type: Expense, vat_key: Some("9") },
        SeedAccount { number: 6950, name: "Sonstige betriebliche Aufwendungen", account_type: Expense, vat_key: None },
        SeedAccount { number: 7300, name: "Zinsaufwendungen", account_type: Expense, vat_key: None },
        SeedAccount { number: 7610, name: "Gewerbesteuer", account_type: Expense, vat_key: None },
    ]
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = belegwerk_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding SKR04 chart of accounts...");
    seed_chart(&db).await;

    println!("Seeding complete!");
}

async fn seed_chart(db: &DatabaseConnection) {
    for account in skr04_chart() {
        let exists = chart_of_accounts::Entity::find()
            .filter(chart_of_accounts::Column::AccountNumber.eq(account.number))
            .one(db)
            .await
            .expect("Failed to query chart of accounts")
            .is_some();
        if exists {
            println!("  {:04} already exists, skipping...", account.number);
            continue;
        }

        let now = Utc::now().into();
        chart_of_accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_number: Set(account.number),
            name: Set(account.name.to_string()),
            account_type: Set(account.account_type),
            vat_key: Set(account.vat_key.map(str::to_string)),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .expect("Failed to insert account");

        println!("  {:04} {}", account.number, account.name);
    }
}
