//! PackageManager 相关数据类型定义

use std::fmt;

/// 外部命令的输出结果
///
/// 成功与否只看 stderr 是否为空：非零退出但没写 stderr 的命令也算成功。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    /// 仅用于日志，超时或无法启动时为 None
    pub exit_code: Option<i32>,
}

impl CommandResult {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code: None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.stderr.is_empty()
    }
}

/// 待执行的命令行（程序 + 参数向量，不经过 shell）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// 安装 / 卸载
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Install,
    Remove,
}

impl Action {
    /// 解析 `-S` / `-R`，其他值返回 None
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "-S" => Some(Action::Install),
            "-R" => Some(Action::Remove),
            _ => None,
        }
    }
}

/// AUR 搜索结果条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCandidate {
    pub name: String,
    pub description: String,
}
