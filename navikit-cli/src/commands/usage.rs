//! Usage command - monthly usage and cost report.

use anyhow::{Result, bail};
use clap::Args;
use navikit_maps::BillingClient;

use crate::config::Config;
use crate::output::format::{current_month, to_yyyymm};
use crate::output::report;

/// Arguments for the usage command.
#[derive(Args)]
pub struct UsageArgs {
    /// Month to report in YYYY-MM form (default: current month).
    #[arg(long)]
    pub month: Option<String>,
}

/// Runs the usage command.
pub async fn run(args: &UsageArgs, config: &Config) -> Result<()> {
    let Some(keys) = &config.ncloud else {
        bail!(
            "usage lookup requires the NCLOUD_ACCESS_KEY and NCLOUD_SECRET_KEY \
             environment variables"
        );
    };

    let month = match &args.month {
        Some(month) => {
            // Reject malformed or impossible months up front.
            if chrono::NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").is_err() {
                bail!("invalid month '{month}', expected YYYY-MM");
            }
            month.clone()
        }
        None => current_month(),
    };

    let client = BillingClient::new(
        keys.access_key.clone(),
        keys.secret_key.clone(),
        config.retry_policy(),
    )?;

    let usage = client.monthly_usage_report(&to_yyyymm(&month)).await?;
    println!("{}", report::render_usage(&usage, &month));
    Ok(())
}
