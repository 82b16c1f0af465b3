use envfill::Record;

#[derive(Debug, Default, Record)]
struct Config {
    #[envfill(rename = "DATABASE_URL")]
    database_url: String,
    #[envfill(rename = "LOG_LEVEL")]
    log_level: String,
}

fn main() -> envfill::Result<()> {
    let mut config = Config::default();

    // Reads ./.env if present, otherwise DATABASE_URL and LOG_LEVEL from the environment
    envfill::load(&mut config, None)?;

    println!("database: {}", config.database_url);
    println!("log level: {}", config.log_level);

    Ok(())
}
