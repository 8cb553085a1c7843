use clap::Parser;
use schools_scraper::config::Config;
use schools_scraper::export::ExportFormat;
use schools_scraper::logging;
use schools_scraper::orchestrator::{scrape, ScrapeOptions};
use std::path::PathBuf;

/// Scrape school names, overviews and contact details
#[derive(Parser, Debug)]
#[command(name = "schools_scraper", version, about)]
struct Cli {
    /// Outbound proxy server, e.g. http://10.0.0.1:3128
    #[arg(long)]
    proxy: Option<String>,

    /// Run the browser without a visible window
    #[arg(long)]
    headless: bool,

    /// Retries after the first attempt, per navigation and per school [default: 10]
    #[arg(long)]
    retries: Option<u32>,

    /// File to export to; nothing is written when omitted
    #[arg(long)]
    output: Option<PathBuf>,

    /// Export format [default: csv]
    #[arg(long, value_enum)]
    format: Option<ExportFormat>,

    /// Seconds to wait for a page to render before retrying [default: 30]
    #[arg(long)]
    timeout: Option<u64>,

    /// Configuration file [default: ./config.toml when present]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug logging (ignored when log4rs.yml is present)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Command-line flags take precedence over the configuration file
    fn apply(&self, config: &mut Config) {
        if let Some(proxy) = &self.proxy {
            config.browser.proxy_server = Some(proxy.clone());
        }
        if self.headless {
            config.browser.headless = true;
        }
        if let Some(retries) = self.retries {
            config.scrape.retries = retries;
        }
        if let Some(output) = &self.output {
            config.scrape.output = Some(output.clone());
        }
        if let Some(format) = self.format {
            config.scrape.format = format;
        }
        if let Some(timeout) = self.timeout {
            config.browser.wait_timeout_secs = timeout;
        }
    }

    fn load_config(&self) -> Result<Config, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::load(),
        };
        self.apply(&mut config);
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = cli.load_config()?;
    log::info!("Retries: {}", config.scrape.retries);
    log::info!("Wait timeout: {}s", config.browser.wait_timeout_secs);
    log::info!("Headless: {}", config.browser.headless);

    let options = ScrapeOptions::from_config(&config);
    let batch = scrape(&options).await?;

    if options.output.is_none() {
        log::info!(
            "No --output given, {} records were not written",
            batch.successes().count()
        );
    }

    Ok(())
}
