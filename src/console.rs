//! 终端输出：按语气着色的逐行文本

use crossterm::style::Stylize;
use std::io::{self, Write};

/// 输出语气，对应不同的前景色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Info,
    Success,
    Warning,
    Error,
    Prompt,
}

pub struct Console<W: Write> {
    out: W,
    color: bool,
}

impl Console<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    fn paint(&self, tone: Tone, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        match tone {
            Tone::Plain => text.to_string(),
            Tone::Info => text.blue().to_string(),
            Tone::Success => text.green().to_string(),
            Tone::Warning => text.yellow().to_string(),
            Tone::Error => text.red().to_string(),
            Tone::Prompt => text.cyan().to_string(),
        }
    }

    pub fn line(&mut self, tone: Tone, text: &str) -> io::Result<()> {
        let painted = self.paint(tone, text);
        writeln!(self.out, "{}", painted)
    }

    /// 输出不换行的提示并立即刷新，等待用户输入
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn info(&mut self, text: &str) -> io::Result<()> {
        self.line(Tone::Info, text)
    }

    pub fn success(&mut self, text: &str) -> io::Result<()> {
        self.line(Tone::Success, text)
    }

    pub fn warn(&mut self, text: &str) -> io::Result<()> {
        self.line(Tone::Warning, text)
    }

    pub fn error(&mut self, text: &str) -> io::Result<()> {
        self.line(Tone::Error, text)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_output_without_color() {
        let mut console = Console::new(Vec::new(), false);
        console.error("boom").unwrap();
        console.prompt("pick: ").unwrap();
        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(out, "boom\npick: ");
    }

    #[test]
    fn colored_output_keeps_text_on_one_line() {
        // NO_COLOR 环境下 crossterm 不输出转义序列，这里只检查文本本身
        let mut console = Console::new(Vec::new(), true);
        console.success("done").unwrap();
        let out = String::from_utf8(console.into_inner()).unwrap();
        assert!(out.contains("done"));
        assert_eq!(out.lines().count(), 1);
        assert!(out.ends_with('\n'));
    }
}
