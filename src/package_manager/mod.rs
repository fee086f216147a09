//! 包管理器模块 — 对 pacman 与 yay / paru 的封装

pub mod parser;
pub mod runner;
pub mod types;

// 重新导出常用类型和函数
pub use parser::{format_candidates, parse_search_candidates};
pub use types::{Action, CommandLine, CommandResult};

use crate::config::Config;
use std::ffi::OsStr;
use std::time::Duration;

/// 解析流程依赖的四个外部操作
#[allow(async_fn_in_trait)]
pub trait PackageBackend {
    /// 精确安装 (pacman -S)
    async fn install(&self, package: &str) -> CommandResult;
    /// 卸载 (pacman -R)
    async fn remove(&self, package: &str) -> CommandResult;
    /// AUR 搜索 (yay -Ss)
    async fn search(&self, query: &str) -> CommandResult;
    /// 通过 AUR 助手安装 (yay -S)
    async fn install_from_helper(&self, package: &str) -> CommandResult;
}

#[derive(Debug, Clone)]
pub struct PackageManager {
    pub command: String,
    pub helper: String,
    pub use_sudo: bool,
    pub timeout: Duration,
}

impl PackageManager {
    pub fn from_config(config: &Config) -> Self {
        let helper = if config.aur_helper == "auto" {
            Self::detect_helper().unwrap_or_else(|| {
                log::warn!("未找到 AUR 助手 (yay/paru)，默认使用 yay");
                "yay".to_string()
            })
        } else {
            config.aur_helper.clone()
        };
        log::debug!("包管理器: {}，AUR 助手: {}", config.package_manager, helper);

        Self {
            command: config.package_manager.clone(),
            helper,
            use_sudo: config.use_sudo,
            timeout: config.command_timeout(),
        }
    }

    /// 按 yay → paru 顺序检测 PATH 上的 AUR 助手
    pub fn detect_helper() -> Option<String> {
        let path = std::env::var_os("PATH")?;
        Self::detect_helper_in(&path)
    }

    fn detect_helper_in(path: &OsStr) -> Option<String> {
        ["yay", "paru"]
            .into_iter()
            .find(|helper| which::which_in(helper, Some(path), "/").is_ok())
            .map(str::to_string)
    }

    fn system_command(&self, flag: &str, package: &str) -> CommandLine {
        let base = if self.use_sudo {
            CommandLine::new("sudo").arg(&self.command)
        } else {
            CommandLine::new(&self.command)
        };
        base.args([flag, package, "--noconfirm"])
    }

    pub fn install_command(&self, package: &str) -> CommandLine {
        self.system_command("-S", package)
    }

    pub fn remove_command(&self, package: &str) -> CommandLine {
        self.system_command("-R", package)
    }

    pub fn search_command(&self, query: &str) -> CommandLine {
        CommandLine::new(&self.helper).args(["-Ss", query])
    }

    pub fn helper_install_command(&self, package: &str) -> CommandLine {
        CommandLine::new(&self.helper).args(["-S", package, "--noconfirm"])
    }
}

impl PackageBackend for PackageManager {
    async fn install(&self, package: &str) -> CommandResult {
        runner::run(&self.install_command(package), self.timeout).await
    }

    async fn remove(&self, package: &str) -> CommandResult {
        runner::run(&self.remove_command(package), self.timeout).await
    }

    async fn search(&self, query: &str) -> CommandResult {
        runner::run(&self.search_command(query), self.timeout).await
    }

    async fn install_from_helper(&self, package: &str) -> CommandResult {
        runner::run(&self.helper_install_command(package), self.timeout).await
    }
}
