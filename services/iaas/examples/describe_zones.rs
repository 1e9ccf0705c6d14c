use std::time::Duration;

use anyhow::Result;
use http::Method;
use qingsign_core::Context;
use qingsign_http_send_reqwest::ReqwestHttpSend;
use qingsign_iaas::{require, Config, Requester, ResponseEnvelope};
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DescribeZones {
    zone_set: Option<Vec<Zone>>,
}

#[derive(Debug, Deserialize)]
struct Zone {
    zone_id: String,
    status: String,
}

fn zones(env: ResponseEnvelope<DescribeZones>) -> qingsign_core::Result<Vec<Zone>> {
    require(env.payload.zone_set, "zone_set")
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Timeouts and pooling are configured on the client, not the requester.
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .user_agent("qingsign-example/0.1")
        .build()?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));
    // Reads QY_ACCESS_KEY_ID, QY_SECRET_ACCESS_KEY and the optional endpoint overrides.
    let config = Config::new().from_env(&ctx);
    println!("Using endpoint {}{}", config.endpoint(), config.uri());

    let requester = Requester::new(ctx, config);

    match requester
        .call(Method::GET, "DescribeZones", |b| b, zones)
        .await
    {
        Ok(zones) => {
            for zone in zones {
                println!("{:<12} {}", zone.zone_id, zone.status);
            }
        }
        Err(e) => {
            eprintln!("DescribeZones failed: {e}");
            if let Some(category) = e.category() {
                eprintln!("  category: {category}, ret_code: {:?}", e.code());
            }
        }
    }

    Ok(())
}
