//! 发行版检测与支持列表

use std::fs;

const OS_RELEASE: &str = "/etc/os-release";

/// 允许运行的 Arch 系发行版（精确匹配，区分大小写）
pub const ARCH_BASED_DISTROS: [&str; 14] = [
    "Arch Linux",
    "Manjaro",
    "ArcoLinux",
    "Artix Linux",
    "EndeavourOS",
    "Garuda Linux",
    "BlackArch",
    "ArchLabs",
    "Archman",
    "RebornOS",
    "Bluestar Linux",
    "Chakra",
    "Parabola",
    "Hyperbola",
];

/// 可以运行但需要提示用户注意的发行版
pub const CAUTION_DISTRO: &str = "Manjaro";

/// 当前发行版名称，读取失败时返回空字符串
pub fn distro_name() -> String {
    match fs::read_to_string(OS_RELEASE) {
        Ok(content) => parse_os_release_name(&content).unwrap_or_default(),
        Err(e) => {
            log::warn!("读取 {} 失败: {}", OS_RELEASE, e);
            String::new()
        }
    }
}

/// 解析 NAME="Arch Linux"，没有 NAME 时退回 PRETTY_NAME
pub fn parse_os_release_name(content: &str) -> Option<String> {
    let field = |key: &str| {
        content.lines().find_map(|line| {
            let (k, v) = line.trim().split_once('=')?;
            if k == key {
                Some(v.trim().trim_matches('"').trim_matches('\'').to_string())
            } else {
                None
            }
        })
    };
    field("NAME")
        .filter(|name| !name.is_empty())
        .or_else(|| field("PRETTY_NAME"))
}

pub fn is_supported(distro: &str) -> bool {
    ARCH_BASED_DISTROS.contains(&distro)
}

pub fn needs_caution(distro: &str) -> bool {
    distro == CAUTION_DISTRO
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_name_field() {
        let content = r#"NAME="Arch Linux"
PRETTY_NAME="Arch Linux"
ID=arch
BUILD_ID=rolling
"#;
        assert_eq!(parse_os_release_name(content).as_deref(), Some("Arch Linux"));
    }

    #[test]
    fn falls_back_to_pretty_name() {
        let content = "ID=endeavouros\nPRETTY_NAME='EndeavourOS'\n";
        assert_eq!(parse_os_release_name(content).as_deref(), Some("EndeavourOS"));
        assert_eq!(parse_os_release_name("ID=x\n"), None);
    }

    #[test]
    fn allow_list_is_exact() {
        assert!(is_supported("Arch Linux"));
        assert!(is_supported("Manjaro"));
        assert!(!is_supported("arch linux"));
        assert!(!is_supported("Ubuntu"));
        assert!(!is_supported("Manjaro Linux"));
        assert!(!is_supported(""));
    }

    #[test]
    fn only_manjaro_needs_caution() {
        assert!(needs_caution("Manjaro"));
        assert!(!needs_caution("Arch Linux"));
        assert!(!needs_caution("Manjaro Linux"));
    }
}
