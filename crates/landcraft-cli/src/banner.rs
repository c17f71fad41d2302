use landcraft_config::AppConfig;

/// Print the startup banner with a short config summary.
pub fn print_banner(config: &AppConfig) {
    let version = env!("CARGO_PKG_VERSION");
    let url = format!("http://{}:{}", config.gateway.host, config.gateway.port);

    println!();
    println!("  Landcraft server v{version}");
    println!("  listening : {url}");
    println!("  database  : {}", config.database.path.display());
    println!(
        "  admin api : {}",
        if config.admin_token.is_some() {
            "token set"
        } else {
            "no token"
        }
    );
    println!();
}
