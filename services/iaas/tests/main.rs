mod signing;

use std::env;

use anyhow::Result;
use http::Method;
use log::{debug, warn};
use qingsign_core::{Context, ErrorCategory, ErrorKind};
use qingsign_http_send_reqwest::ReqwestHttpSend;
use qingsign_iaas::{mapper, require, Config, NoPayload, Requester, ResponseEnvelope};
use serde::Deserialize;

fn init_requester() -> Option<Requester> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("QINGSIGN_IAAS_TEST").is_err() || env::var("QINGSIGN_IAAS_TEST").unwrap() != "on"
    {
        return None;
    }

    let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
    let config = Config::new().from_env(&ctx);
    assert!(
        config.access_key_id.is_some() && config.secret_access_key.is_some(),
        "env QY_ACCESS_KEY_ID and QY_SECRET_ACCESS_KEY must set"
    );

    Some(Requester::new(ctx, config))
}

#[derive(Debug, Deserialize)]
struct DescribeZones {
    total_count: Option<u32>,
    zone_set: Option<Vec<Zone>>,
}

#[derive(Debug, Deserialize)]
struct Zone {
    zone_id: String,
    status: String,
}

#[tokio::test]
async fn test_describe_zones() -> Result<()> {
    let Some(requester) = init_requester() else {
        warn!("QINGSIGN_IAAS_TEST is not set, skipped");
        return Ok(());
    };

    let zones = requester
        .call(
            Method::GET,
            "DescribeZones",
            |b| b,
            |env: ResponseEnvelope<DescribeZones>| -> qingsign_core::Result<Vec<Zone>> {
                debug!("total zones: {:?}", env.payload.total_count);
                require(env.payload.zone_set, "zone_set")
            },
        )
        .await?;

    debug!("got zones: {zones:?}");
    assert!(!zones.is_empty());
    assert!(zones.iter().all(|z| !z.zone_id.is_empty() && !z.status.is_empty()));
    Ok(())
}

#[tokio::test]
async fn test_describe_zones_post() -> Result<()> {
    let Some(requester) = init_requester() else {
        warn!("QINGSIGN_IAAS_TEST is not set, skipped");
        return Ok(());
    };

    let req = requester
        .request(Method::POST, "DescribeZones")
        .await?
        .build()?;
    let env = requester.send(&req, mapper::envelope::<NoPayload>).await?;

    assert_eq!(env.action, "DescribeZonesResponse");
    assert_eq!(env.ret_code, 0);
    Ok(())
}

#[tokio::test]
async fn test_bad_secret_is_authentication_error() -> Result<()> {
    let Some(requester) = init_requester() else {
        warn!("QINGSIGN_IAAS_TEST is not set, skipped");
        return Ok(());
    };

    let config = requester
        .config()
        .clone()
        .with_secret_access_key("definitely-not-the-secret");
    let requester = Requester::new(requester.context().clone(), config);

    let err = requester
        .call(Method::GET, "DescribeZones", |b| b, mapper::payload::<NoPayload>)
        .await
        .unwrap_err();

    debug!("got error: {err:?}");
    assert_eq!(err.kind(), ErrorKind::Provider(ErrorCategory::Authentication));
    assert!(err.code().is_some());
    Ok(())
}
