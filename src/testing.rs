//! 测试用的假后端与脚本化输入

use crate::package_manager::{CommandResult, PackageBackend};
use crate::resolver::LineSource;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

/// 返回预设结果并记录每次调用
#[derive(Default)]
pub struct FakeBackend {
    pub install: CommandResult,
    pub remove: CommandResult,
    pub search: CommandResult,
    pub helper_install: CommandResult,
    pub(crate) calls: RefCell<Vec<String>>,
}

impl FakeBackend {
    fn record(&self, call: String, result: &CommandResult) -> CommandResult {
        self.calls.borrow_mut().push(call);
        result.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl PackageBackend for FakeBackend {
    async fn install(&self, package: &str) -> CommandResult {
        self.record(format!("install {}", package), &self.install)
    }

    async fn remove(&self, package: &str) -> CommandResult {
        self.record(format!("remove {}", package), &self.remove)
    }

    async fn search(&self, query: &str) -> CommandResult {
        self.record(format!("search {}", query), &self.search)
    }

    async fn install_from_helper(&self, package: &str) -> CommandResult {
        self.record(format!("helper-install {}", package), &self.helper_install)
    }
}

/// 按顺序吐出预设行，用完后表现为输入关闭
pub struct ScriptedInput {
    lines: VecDeque<String>,
    pub reads: usize,
}

impl ScriptedInput {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            reads: 0,
        }
    }
}

impl LineSource for ScriptedInput {
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        self.reads += 1;
        Ok(self.lines.pop_front())
    }
}

pub const THREE_CANDIDATES: &str = "\
aur/foo-git 1.0.r12-1 (+10 0.50)
    Foo from git
aur/foo-bin 1.0-1 (+3 0.01)
    Foo prebuilt
extra/foo 1.0-2 (1.2 MiB 3.4 MiB)
    Foo";

pub fn failed(stderr: &str) -> CommandResult {
    CommandResult::new("", stderr)
}
