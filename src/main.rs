use debt_ledger::{
    config::{database, reference},
    core::Ledger,
    errors::Result,
    shell,
};
use dotenvy::dotenv;
use tokio::io::{BufReader, stdin, stdout};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible), on stderr so stdout stays for responses
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file, non-fatal: env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load reference data
    let reference_data = reference::load_default_config()
        .inspect_err(|e| error!("Failed to load reference data: {}", e))?;

    // 4. Connect, ensure tables and seed reference data
    let database_url = database::get_database_url();
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;
    reference::seed_reference_data(&db, &reference_data)
        .await
        .inspect_err(|e| error!("Failed to seed reference data: {}", e))?;
    info!("Database initialized successfully.");

    // 5. Serve commands from stdin
    let ledger = Ledger::new(db);
    shell::run(&ledger, BufReader::new(stdin()), stdout()).await
}
