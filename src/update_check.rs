//! 启动时的版本检查
//!
//! 确认本地版本落后时终止运行；网络失败只提示，不阻止使用。

use crate::config::Config;
use crate::console::Console;
use crate::i18n::{MessageKey, Messages};
use crate::version;
use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use std::cmp::Ordering;
use std::io::{self, Write};

/// 编译进程序的本地版本
pub const LOCAL_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// 可以继续（已是最新、比远端新，或检查失败）
    Continue,
    /// 本地版本已过期，必须终止
    Outdated,
}

pub struct VersionClient {
    client: Client,
    url: String,
}

impl VersionClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("kinstaller/{}", LOCAL_VERSION))
            .timeout(config.version_timeout())
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self {
            client,
            url: config.version_url.clone(),
        })
    }

    /// 获取远端最新版本号（去除首尾空白）
    pub async fn fetch_latest(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow!("{} returned status {}", self.url, response.status()));
        }

        let body = response.text().await?;
        Ok(body.trim().to_string())
    }
}

/// 根据取得的远端版本（或取得失败的原因）输出提示并给出结论
pub fn evaluate<W: Write>(
    local: &str,
    fetched: Result<String>,
    console: &mut Console<W>,
    messages: &Messages,
) -> io::Result<GateOutcome> {
    let latest = match fetched {
        Ok(latest) => latest,
        Err(e) => {
            log::warn!("版本检查失败: {:#}", e);
            return report_failure(console, messages, &format!("{:#}", e));
        }
    };

    let ordering = match version::compare(local, &latest) {
        Ok(ordering) => ordering,
        Err(e) => {
            log::warn!("无法解析版本号: {}", e);
            return report_failure(console, messages, &e.to_string());
        }
    };
    log::debug!("本地版本 {}，最新版本 {}: {:?}", local, latest, ordering);

    match ordering {
        Ordering::Less => {
            console.error(messages.get(MessageKey::OutdatedVersion))?;
            Ok(GateOutcome::Outdated)
        }
        Ordering::Greater => {
            let text = messages.format(
                MessageKey::NewerVersion,
                &[("current", local), ("latest", &latest)],
            );
            console.warn(&text)?;
            Ok(GateOutcome::Continue)
        }
        Ordering::Equal => {
            console.success(messages.get(MessageKey::UpToDate))?;
            Ok(GateOutcome::Continue)
        }
    }
}

fn report_failure<W: Write>(
    console: &mut Console<W>,
    messages: &Messages,
    reason: &str,
) -> io::Result<GateOutcome> {
    let text = messages.format(MessageKey::UpdateCheckFailed, &[("reason", reason)]);
    console.error(&text)?;
    Ok(GateOutcome::Continue)
}

/// 按配置获取远端最新版本号，结果交给 `evaluate` 判断
pub async fn fetch_latest_version(config: &Config) -> Result<String> {
    VersionClient::new(config)?.fetch_latest().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::messages;

    fn gate(local: &str, fetched: Result<String>) -> (GateOutcome, String) {
        let mut console = Console::new(Vec::new(), false);
        let outcome = evaluate(local, fetched, &mut console, messages("en")).unwrap();
        (outcome, String::from_utf8(console.into_inner()).unwrap())
    }

    #[test]
    fn outdated_version_is_fatal() {
        let (outcome, out) = gate("1.0.1", Ok("1.0.2".to_string()));
        assert_eq!(outcome, GateOutcome::Outdated);
        assert!(out.contains("Your version is outdated"));
    }

    #[test]
    fn equal_version_is_confirmed() {
        let (outcome, out) = gate("1.0.1", Ok("1.0.1.0".to_string()));
        assert_eq!(outcome, GateOutcome::Continue);
        assert!(out.contains("You are using the latest version."));
    }

    #[test]
    fn newer_local_version_only_warns() {
        let (outcome, out) = gate("1.1", Ok("1.0.9".to_string()));
        assert_eq!(outcome, GateOutcome::Continue);
        assert!(out.contains("your version 1.1 is newer than the latest version 1.0.9"));
    }

    #[test]
    fn transport_failure_continues() {
        let (outcome, out) = gate("1.0.1", Err(anyhow!("connection refused")));
        assert_eq!(outcome, GateOutcome::Continue);
        assert!(out.contains("Failed to check for updates: connection refused"));
    }

    #[test]
    fn unparseable_remote_version_continues() {
        let (outcome, out) = gate("1.0.1", Ok("<html>".to_string()));
        assert_eq!(outcome, GateOutcome::Continue);
        assert!(out.contains("Failed to check for updates"));
    }

    #[test]
    fn embedded_version_parses() {
        assert!(version::Version::parse(LOCAL_VERSION).is_ok());
    }
}
