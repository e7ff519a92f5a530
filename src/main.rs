use eduguide::advisor::{Advisor, CatalogSources};
use eduguide::catalog::Catalog;
use eduguide::config::load_config;
use eduguide::console;
use eduguide::suggester::build_suggester;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Local .env for development only
    dotenv::dotenv().ok();

    // Logs go to stderr so console replies stay readable
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("😱 Panic occurred: {}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let catalog = Catalog::load(&config.colleges_path, &config.faq_path);
    let suggester = build_suggester(&config.assistant);
    let advisor = Advisor::new(catalog, suggester)
        .with_sources(CatalogSources {
            colleges_path: config.colleges_path.clone(),
            faq_path: config.faq_path.clone(),
        })
        .with_top_limit(config.top_limit);

    let health = advisor.health();
    info!(
        "🚀 EduGuide started: {} colleges, {} FAQs, assistant configured: {}",
        health.colleges_loaded, health.faqs_loaded, health.assistant_configured
    );

    console::run(&advisor).await;
}
