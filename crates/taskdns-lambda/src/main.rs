// # taskdns-lambda
//
// Lambda function that publishes the public address of a starting ECS task
// as an A record named after its service.
//
// This binary is a thin integration layer: it reads configuration, sets up
// logging, builds the AWS clients once per cold start and hands every
// incoming event to `taskdns_core::TaskDnsUpdater`. No DNS logic lives here.
//
// ## Trigger
//
// An EventBridge rule forwarding "ECS Task State Change" events, typically
// filtered on `lastStatus = RUNNING`.
//
// ## Configuration
//
// All configuration is optional and done via environment variables:
//
// - `TASKDNS_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
// - `TASKDNS_RECORD_TTL`: TTL of the published record in seconds (default: 180)
// - `TASKDNS_DOMAIN_TAG`: Cluster tag holding the domain (default: domain)
// - `TASKDNS_HOSTED_ZONE_TAG`: Cluster tag holding the hosted zone id (default: hostedZoneId)
// - `TASKDNS_DRY_RUN`: Log Route 53 changes instead of submitting them (default: false)
//
// AWS region and credentials come from the standard Lambda environment.

mod config;

use anyhow::Result;
use aws_config::BehaviorVersion;
use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::Value;
use std::process::ExitCode;
use taskdns_core::{TaskDnsUpdater, TaskStateChange, UpdateOutcome};
use taskdns_ip_ec2::Ec2InterfaceResolver;
use taskdns_provider_route53::Route53Provider;
use taskdns_tags_ecs::EcsTagSource;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::config::Config;

/// Exit codes for cold start failures
#[derive(Debug, Clone, Copy)]
enum TaskDnsExitCode {
    /// The runtime loop ended cleanly
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<TaskDnsExitCode> for ExitCode {
    fn from(code: TaskDnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return TaskDnsExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return TaskDnsExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // CloudWatch stamps every line itself
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return TaskDnsExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return TaskDnsExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_function(config).await {
            error!("Function error: {}", e);
            TaskDnsExitCode::RuntimeError
        } else {
            TaskDnsExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Build the updater and serve events until the runtime stops
async fn run_function(config: Config) -> Result<()> {
    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;

    let provider = Route53Provider::new(
        aws_sdk_route53::Client::new(&aws_config),
        config.dry_run,
    );
    if provider.is_dry_run() {
        warn!("Route 53 provider running in DRY-RUN mode - no records will be changed");
    }

    let updater = TaskDnsUpdater::new(
        Box::new(EcsTagSource::new(aws_sdk_ecs::Client::new(&aws_config))),
        Box::new(Ec2InterfaceResolver::new(aws_sdk_ec2::Client::new(&aws_config))),
        Box::new(provider),
        config.updater_config(),
    )?;

    info!(
        "Starting taskdns function (ttl: {}s, tags: {}/{})",
        updater.config().record_ttl,
        updater.config().domain_tag,
        updater.config().hosted_zone_tag
    );

    let updater = &updater;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        handle_request(updater, event)
    }))
    .await
    .map_err(|e| anyhow::anyhow!("Lambda runtime error: {}", e))
}

/// Handle one invocation
async fn handle_request(
    updater: &TaskDnsUpdater,
    event: LambdaEvent<Value>,
) -> Result<UpdateOutcome, lambda_runtime::Error> {
    info!("Received event: {}", event.payload);

    let task_event = TaskStateChange::from_value(event.payload)?;
    let outcome = updater.handle(&task_event).await?;

    Ok(outcome)
}
