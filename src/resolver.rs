//! 安装 / 卸载流程
//!
//! 精确安装失败后转入 AUR 搜索，列出候选并让用户按序号选择，
//! 再用 AUR 助手安装选中的包。Ctrl+C 由 main 在最外层处理。

use crate::console::{Console, Tone};
use crate::i18n::{MessageKey, Messages};
use crate::package_manager::{
    format_candidates, parse_search_candidates, Action, CommandResult, PackageBackend,
};
use crate::sysinfo;
use std::io::{self, Write};
use std::num::IntErrorKind;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("input closed before a package was selected")]
    InputClosed,
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// 一次解析流程的结局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 发行版不在支持列表中，没有执行任何命令
    Unsupported,
    UnknownAction,
    Completed,
    /// 命令执行了但报告了错误
    Failed,
    NotFound,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Unsupported => 1,
            _ => 0,
        }
    }
}

/// 逐行读取用户输入，`None` 表示输入已关闭
#[allow(async_fn_in_trait)]
pub trait LineSource {
    async fn read_line(&mut self) -> io::Result<Option<String>>;
}

pub struct StdinLines {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinLines {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinLines {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for StdinLines {
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        self.lines.next_line().await
    }
}

pub struct Resolver<'a, B, I, W: Write> {
    backend: &'a B,
    input: &'a mut I,
    console: &'a mut Console<W>,
    messages: &'static Messages,
    distro: String,
}

impl<'a, B, I, W> Resolver<'a, B, I, W>
where
    B: PackageBackend,
    I: LineSource,
    W: Write,
{
    pub fn new(
        backend: &'a B,
        input: &'a mut I,
        console: &'a mut Console<W>,
        messages: &'static Messages,
        distro: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            input,
            console,
            messages,
            distro: distro.into(),
        }
    }

    pub async fn resolve(&mut self, action: &str, package: &str) -> Result<Outcome, ResolveError> {
        if !sysinfo::is_supported(&self.distro) {
            log::debug!("不支持的发行版: '{}'", self.distro);
            self.console.error(self.messages.get(MessageKey::NotArch))?;
            return Ok(Outcome::Unsupported);
        }
        if sysinfo::needs_caution(&self.distro) {
            self.console.warn(self.messages.get(MessageKey::ManjaroWarning))?;
        }

        match Action::from_flag(action) {
            Some(Action::Install) => self.install(package).await,
            Some(Action::Remove) => self.remove(package).await,
            None => {
                log::warn!("未知操作: {}", action);
                let text = format!(
                    "{}: {}",
                    self.messages.get(MessageKey::Error),
                    self.messages
                        .format(MessageKey::UnknownAction, &[("action", action)])
                );
                self.console.error(&text)?;
                Ok(Outcome::UnknownAction)
            }
        }
    }

    async fn install(&mut self, package: &str) -> Result<Outcome, ResolveError> {
        self.announce(MessageKey::Installing, package)?;
        let result = self.backend.install(package).await;
        if result.succeeded() {
            self.print_stdout(&result)?;
            return Ok(Outcome::Completed);
        }
        self.console.error(&result.stderr)?;

        let Some(selected) = self.search_and_select(package).await? else {
            return Ok(Outcome::NotFound);
        };

        self.announce(MessageKey::Installing, &selected)?;
        let result = self.backend.install_from_helper(&selected).await;
        if result.succeeded() {
            self.print_stdout(&result)?;
            Ok(Outcome::Completed)
        } else {
            self.console.error(&result.stderr)?;
            self.console
                .error(self.messages.get(MessageKey::PackageNotFound))?;
            Ok(Outcome::Failed)
        }
    }

    async fn remove(&mut self, package: &str) -> Result<Outcome, ResolveError> {
        self.announce(MessageKey::Removing, package)?;
        let result = self.backend.remove(package).await;
        if result.succeeded() {
            self.print_stdout(&result)?;
            Ok(Outcome::Completed)
        } else {
            self.console.error(&result.stderr)?;
            Ok(Outcome::Failed)
        }
    }

    /// 搜索 AUR 并让用户选择，返回选中包名；没有候选时返回 None
    async fn search_and_select(&mut self, package: &str) -> Result<Option<String>, ResolveError> {
        let searching = self
            .messages
            .format(MessageKey::Searching, &[("package", package)]);
        self.console.warn(&searching)?;

        let result = self.backend.search(package).await;
        if !result.succeeded() {
            self.console.error(&result.stderr)?;
            self.console
                .error(self.messages.get(MessageKey::PackageNotFound))?;
            return Ok(None);
        }

        let candidates = parse_search_candidates(&result.stdout);
        if candidates.is_empty() {
            self.console
                .error(self.messages.get(MessageKey::PackageNotFound))?;
            return Ok(None);
        }
        log::debug!("{} 个候选包", candidates.len());

        self.console.blank()?;
        for line in format_candidates(&candidates) {
            self.console.line(Tone::Plain, &line)?;
        }
        self.console
            .line(Tone::Prompt, self.messages.get(MessageKey::SelectPackage))?;

        let index = self.select(candidates.len()).await?;
        Ok(candidates.into_iter().nth(index - 1).map(|c| c.name))
    }

    /// 反复提示直到输入 1..=count 之间的序号
    async fn select(&mut self, count: usize) -> Result<usize, ResolveError> {
        let max = count.to_string();
        let prompt = self
            .messages
            .format(MessageKey::SelectPrompt, &[("max", &max)]);

        loop {
            self.console.prompt(&prompt)?;
            let Some(line) = self.input.read_line().await? else {
                return Err(ResolveError::InputClosed);
            };
            let key = match line.trim().parse::<i64>() {
                Ok(n) if (1..=count as i64).contains(&n) => return Ok(n as usize),
                Ok(_) => MessageKey::InvalidSelection,
                // 超出 i64 范围的数字同样算作越界序号
                Err(e)
                    if matches!(
                        e.kind(),
                        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
                    ) =>
                {
                    MessageKey::InvalidSelection
                }
                Err(_) => MessageKey::InvalidInput,
            };
            self.console.error(self.messages.get(key))?;
        }
    }

    fn announce(&mut self, key: MessageKey, package: &str) -> io::Result<()> {
        let text = self.messages.format(key, &[("package", package)]);
        self.console.info(&text)
    }

    fn print_stdout(&mut self, result: &CommandResult) -> io::Result<()> {
        if result.stdout.is_empty() {
            return Ok(());
        }
        self.console.success(&result.stdout)
    }
}
