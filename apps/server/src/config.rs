use rust_decimal::Decimal;
use std::{net::SocketAddr, time::Duration};

use courtfund_core::constants::DEFAULT_SPONSOR_THRESHOLD;
use courtfund_core::webhooks::DEFAULT_TOLERANCE_SECS;

#[derive(Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub stripe_webhook_secret: String,
    pub signature_tolerance_secs: i64,
    pub sponsor_threshold: Decimal,
    /// Zero disables the background sweep.
    pub reconcile_interval: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("CF_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid CF_LISTEN_ADDR");
        let db_path = std::env::var("CF_DB_PATH").unwrap_or_else(|_| "./db/courtfund.db".into());
        let cors_allow = std::env::var("CF_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("CF_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let stripe_webhook_secret =
            std::env::var("CF_STRIPE_WEBHOOK_SECRET").expect("CF_STRIPE_WEBHOOK_SECRET must be set");
        let signature_tolerance_secs: i64 = std::env::var("CF_SIGNATURE_TOLERANCE_SECS")
            .unwrap_or_else(|_| DEFAULT_TOLERANCE_SECS.to_string())
            .parse()
            .unwrap_or(DEFAULT_TOLERANCE_SECS);
        let sponsor_threshold: Decimal = std::env::var("CF_SPONSOR_THRESHOLD")
            .unwrap_or_else(|_| DEFAULT_SPONSOR_THRESHOLD.to_string())
            .parse()
            .expect("Invalid CF_SPONSOR_THRESHOLD");
        let reconcile_secs: u64 = std::env::var("CF_RECONCILE_INTERVAL_SECS")
            .unwrap_or_else(|_| "21600".into())
            .parse()
            .unwrap_or(21600);
        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            stripe_webhook_secret,
            signature_tolerance_secs,
            sponsor_threshold,
            reconcile_interval: Duration::from_secs(reconcile_secs),
        }
    }
}
