//! # 示例应用程序
//!
//! 演示如何通过 `#[service]` 注册校验规则，并使用流式校验管道校验订单

mod rules;

use anyhow::Context;
use clap::Parser;
use di_abstractions::ServiceLocator;
use di_impl::ServiceCollection;
use infrastructure_common::{global_type_catalog, RegistrationOptions};
use rules::{CustomerNameRule, QuantityRule};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use validation_abstractions::ValidationRunError;
use validation_impl::Validator;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Keel 服务注册与校验示例")]
struct Args {
    /// 注册配置文件路径
    #[arg(short, long, default_value = "config/app.toml")]
    config: String,

    /// 客户名称
    #[arg(long, default_value = "Keel Trading")]
    customer: String,

    /// 订购数量
    #[arg(long, default_value_t = 1)]
    quantity: u32,

    /// 日志级别，`RUST_LOG` 优先
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 以 JSON 格式输出日志
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(&args);

    info!("启动 Keel 示例应用");

    let options = load_options(&args.config)?;
    let validator = build_validator(&options)?;

    let result = validator
        .require::<CustomerNameRule>()
        .with_data(args.customer.clone())
        .require::<QuantityRule>()
        .with_data(args.quantity)
        .ensure_valid()
        .await;

    match result {
        Ok(()) => {
            info!("订单校验通过: {} x {}", args.customer, args.quantity);
            Ok(())
        }
        Err(ValidationRunError::Failed(failure)) => {
            warn!("订单校验失败: {}", failure);
            println!("{}", serde_json::to_string_pretty(failure.errors())?);
            std::process::exit(2);
        }
        Err(e) => {
            error!("校验规则配置错误: {}", e);
            Err(e).context("无法执行订单校验")
        }
    }
}

/// 初始化日志
fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    if args.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// 加载注册配置，文件不存在时扫描本程序的规则模块
fn load_options(path: &str) -> anyhow::Result<RegistrationOptions> {
    if Path::new(path).exists() {
        let options = RegistrationOptions::from_file(path)
            .with_context(|| format!("无法加载注册配置: {}", path))?;
        info!("加载注册配置: {}", path);
        Ok(options)
    } else {
        info!("配置文件不存在，使用默认注册配置");
        Ok(RegistrationOptions::default()
            .with_module(format!("{}::rules", module_path!()))
            .with_attribute_group("orders"))
    }
}

/// 构建服务提供者和校验入口
fn build_validator(options: &RegistrationOptions) -> anyhow::Result<Validator> {
    let mut services = ServiceCollection::new();
    let count = services
        .apply_options(options, global_type_catalog())
        .context("服务注册失败")?;
    info!("注册完成: {} 条记录", count);

    let provider: Arc<dyn ServiceLocator> = Arc::new(services.build_provider());
    Ok(Validator::new(provider))
}
