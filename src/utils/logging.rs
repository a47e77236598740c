use std::env;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEBUG_ENV: &str = "AGENTPARSE_DEBUG";

/// 日志配置
pub struct LoggingConfig;

impl LoggingConfig {
    /// 初始化日志系统
    ///
    /// - RUST_LOG: 日志过滤规则，优先使用
    /// - AGENTPARSE_DEBUG: 未设置 RUST_LOG 时启用 debug 级别并输出文件与行号
    ///
    /// 重复初始化不会报错。
    ///
    /// ```no_run
    /// use agentparse::utils::LoggingConfig;
    ///
    /// LoggingConfig::init();
    /// tracing::info!("ready");
    /// ```
    pub fn init() {
        let is_debug = Self::is_debug();

        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if is_debug {
                EnvFilter::new("agentparse=debug,info")
            } else {
                EnvFilter::new("agentparse=info,warn")
            }
        });

        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(is_debug)
            .with_file(is_debug)
            .with_line_number(is_debug);

        let installed = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .is_ok();

        if installed && is_debug {
            tracing::debug!("debug logging enabled");
        }
    }

    /// 使用自定义过滤器初始化
    pub fn init_with_filter(filter: &str) {
        let _ = tracing_subscriber::registry()
            .with(EnvFilter::new(filter))
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init();
    }

    pub fn is_debug() -> bool {
        env::var(DEBUG_ENV).is_ok()
    }
}
