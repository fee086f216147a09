mod config;
mod console;
mod i18n;
mod package_manager;
mod resolver;
mod sysinfo;
#[cfg(test)]
mod testing;
mod update_check;
mod version;

use anyhow::Result;
use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use config::Config;
use console::Console;
use i18n::{MessageKey, Messages};
use package_manager::{PackageBackend, PackageManager};
use resolver::{LineSource, ResolveError, Resolver, StdinLines};
use std::io::Write;
use tokio::signal::unix::{signal, Signal, SignalKind};
use update_check::GateOutcome;

/// Arch Linux 包安装助手：pacman 找不到时回退到 AUR 搜索
#[derive(Debug, Parser)]
#[command(name = "kinstaller", version, about)]
struct Cli {
    /// -S 安装，-R 卸载
    #[arg(allow_hyphen_values = true)]
    action: String,

    /// 包名
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    package: String,

    /// 消息语言 (pl, en, de, ru, uk)，未知代码回退到 pl
    language: Option<String>,

    /// 跳过启动时的版本检查
    #[arg(long)]
    no_version_check: bool,

    /// 不输出颜色
    #[arg(long)]
    no_color: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // 立即注册 SIGINT，配置加载期间的 Ctrl+C 也按取消处理
    let interrupt = signal(SignalKind::interrupt());
    env_logger::init();
    let mut interrupt = interrupt
        .map_err(|e| log::warn!("无法注册 SIGINT 处理: {}", e))
        .ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help / --version 走 stdout，退出码 0；参数错误退出码 1
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            let lang = cli.language.as_deref().unwrap_or(i18n::DEFAULT_LANGUAGE);
            let text = i18n::messages(lang).format(
                MessageKey::UnexpectedError,
                &[("reason", &format!("{:#}", e))],
            );
            let _ = Console::stdout(!cli.no_color).error(&text);
            std::process::exit(1);
        }
    };

    let language = cli
        .language
        .clone()
        .unwrap_or_else(|| config.language.clone());
    let messages = i18n::messages(&language);
    let color = config.color && !cli.no_color;
    if !i18n::languages().contains(&language.as_str()) {
        log::debug!("未知语言 '{}'，使用 {}", language, messages.code());
    }

    let mut console = Console::stdout(color);
    let code = tokio::select! {
        result = run(&cli, &config, messages, &mut console) => match result {
            Ok(code) => code,
            Err(e) => {
                log::error!("{:?}", e);
                let text = messages.format(
                    MessageKey::UnexpectedError,
                    &[("reason", &format!("{:#}", e))],
                );
                let _ = Console::stdout(color).error(&text);
                1
            }
        },
        _ = wait_for_interrupt(interrupt.as_mut()) => {
            let mut console = Console::stdout(color);
            let _ = console.blank();
            let _ = console.warn(messages.get(MessageKey::Cancelled));
            1
        }
    };

    // 直接退出：阻塞中的 stdin 读取不会让运行时正常关闭
    std::process::exit(code);
}

/// 注册失败时永不返回
async fn wait_for_interrupt(interrupt: Option<&mut Signal>) {
    match interrupt {
        Some(signal) => {
            signal.recv().await;
        }
        None => std::future::pending().await,
    }
}

fn version_check_enabled(cli: &Cli, config: &Config) -> bool {
    config.check_version && !cli.no_version_check
}

async fn run<W: Write>(
    cli: &Cli,
    config: &Config,
    messages: &'static Messages,
    console: &mut Console<W>,
) -> Result<i32> {
    let fetched = if version_check_enabled(cli, config) {
        Some(update_check::fetch_latest_version(config).await)
    } else {
        None
    };

    let backend = PackageManager::from_config(config);
    let distro = sysinfo::distro_name();
    log::debug!("发行版: '{}'", distro);

    let mut input = StdinLines::new();
    run_with(cli, fetched, &backend, &mut input, distro, console, messages).await
}

/// 版本闸门 + 解析流程，返回进程退出码；`fetched` 为 None 表示跳过版本检查
async fn run_with<B, I, W>(
    cli: &Cli,
    fetched: Option<Result<String>>,
    backend: &B,
    input: &mut I,
    distro: String,
    console: &mut Console<W>,
    messages: &'static Messages,
) -> Result<i32>
where
    B: PackageBackend,
    I: LineSource,
    W: Write,
{
    if let Some(fetched) = fetched {
        let outcome =
            update_check::evaluate(update_check::LOCAL_VERSION, fetched, console, messages)?;
        if outcome == GateOutcome::Outdated {
            return Ok(1);
        }
    }

    let result = Resolver::new(backend, input, console, messages, distro)
        .resolve(&cli.action, &cli.package)
        .await;

    match result {
        Ok(outcome) => {
            log::debug!("结果: {:?}", outcome);
            Ok(outcome.exit_code())
        }
        Err(ResolveError::InputClosed) => {
            console.blank()?;
            console.warn(messages.get(MessageKey::Cancelled))?;
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}
