//! 带超时的外部命令执行
//!
//! 命令按参数向量直接启动，不经过 shell，包名里的 `;`、`$()` 等不会被解释。
//! 执行本身从不返回错误：超时、启动失败都折算成 stderr 文本。

use super::types::{CommandLine, CommandResult};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

pub const TIMEOUT_MESSAGE: &str = "Command timed out";

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}

/// 执行命令并收集 stdout / stderr（均已去除首尾空白）
///
/// 超时时子进程被杀死，返回 `("", "Command timed out")`。
pub async fn run(command: &CommandLine, timeout: Duration) -> CommandResult {
    log::debug!("执行命令: {} (超时 {:?})", command, timeout);

    let child = Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn();

    let child = match child {
        Ok(child) => child,
        Err(e) => {
            log::warn!("无法启动 {}: {}", command.program, e);
            return CommandResult::new("", format!("{}: {}", command.program, e));
        }
    };

    // 超时后 wait_with_output 被丢弃，kill_on_drop 负责杀掉子进程
    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => {
            let result = CommandResult {
                stdout: decode(&output.stdout),
                stderr: decode(&output.stderr),
                exit_code: output.status.code(),
            };
            if !output.status.success() {
                log::debug!(
                    "{} 退出码 {:?}，stderr {} 字节",
                    command,
                    result.exit_code,
                    result.stderr.len()
                );
            }
            result
        }
        Ok(Err(e)) => {
            log::warn!("等待 {} 失败: {}", command, e);
            CommandResult::new("", format!("{}: {}", command.program, e))
        }
        Err(_) => {
            log::warn!("{} 超时 ({:?})", command, timeout);
            CommandResult::new("", TIMEOUT_MESSAGE)
        }
    }
}
