//! 多语言消息表
//!
//! 语言代码 → (消息键 → 文本)，进程启动时构建一次，之后只读。
//! 未知语言代码统一回退到 [`DEFAULT_LANGUAGE`]。

use std::collections::HashMap;
use std::sync::OnceLock;

/// 回退语言
pub const DEFAULT_LANGUAGE: &str = "pl";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    NotArch,
    Installing,
    Removing,
    Searching,
    PackageNotFound,
    Error,
    UnknownAction,
    SelectPackage,
    SelectPrompt,
    InvalidSelection,
    InvalidInput,
    ManjaroWarning,
    UpToDate,
    OutdatedVersion,
    NewerVersion,
    UpdateCheckFailed,
    Cancelled,
    UnexpectedError,
}

impl MessageKey {
    #[cfg(test)]
    pub const ALL: [MessageKey; 18] = [
        MessageKey::NotArch,
        MessageKey::Installing,
        MessageKey::Removing,
        MessageKey::Searching,
        MessageKey::PackageNotFound,
        MessageKey::Error,
        MessageKey::UnknownAction,
        MessageKey::SelectPackage,
        MessageKey::SelectPrompt,
        MessageKey::InvalidSelection,
        MessageKey::InvalidInput,
        MessageKey::ManjaroWarning,
        MessageKey::UpToDate,
        MessageKey::OutdatedVersion,
        MessageKey::NewerVersion,
        MessageKey::UpdateCheckFailed,
        MessageKey::Cancelled,
        MessageKey::UnexpectedError,
    ];

    fn name(self) -> &'static str {
        match self {
            MessageKey::NotArch => "not_arch",
            MessageKey::Installing => "installing",
            MessageKey::Removing => "removing",
            MessageKey::Searching => "searching",
            MessageKey::PackageNotFound => "package_not_found",
            MessageKey::Error => "error",
            MessageKey::UnknownAction => "unknown_action",
            MessageKey::SelectPackage => "select_package",
            MessageKey::SelectPrompt => "select_prompt",
            MessageKey::InvalidSelection => "invalid_selection",
            MessageKey::InvalidInput => "invalid_input",
            MessageKey::ManjaroWarning => "manjaro_warning",
            MessageKey::UpToDate => "up_to_date",
            MessageKey::OutdatedVersion => "outdated_version",
            MessageKey::NewerVersion => "newer_version",
            MessageKey::UpdateCheckFailed => "update_check_failed",
            MessageKey::Cancelled => "cancelled",
            MessageKey::UnexpectedError => "unexpected_error",
        }
    }
}

/// 单一语言的消息集合
#[derive(Debug)]
pub struct Messages {
    code: &'static str,
    entries: HashMap<MessageKey, &'static str>,
}

impl Messages {
    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn get(&self, key: MessageKey) -> &'static str {
        // 每种语言都定义了全部键，这里的回退只防御表格被改坏的情况
        self.entries
            .get(&key)
            .copied()
            .or_else(|| catalog().fallback.entries.get(&key).copied())
            .unwrap_or_else(|| key.name())
    }

    /// 取出消息并替换 `{name}` 形式的占位符
    pub fn format(&self, key: MessageKey, args: &[(&str, &str)]) -> String {
        let mut text = self.get(key).to_string();
        for (name, value) in args {
            text = text.replace(&format!("{{{}}}", name), value);
        }
        text
    }
}

struct Catalog {
    fallback: Messages,
    others: HashMap<&'static str, Messages>,
}

static CATALOG: OnceLock<Catalog> = OnceLock::new();

fn catalog() -> &'static Catalog {
    CATALOG.get_or_init(build_catalog)
}

/// 按语言代码查找消息集合，未知代码回退到波兰语
pub fn messages(lang: &str) -> &'static Messages {
    let catalog = catalog();
    catalog.others.get(lang).unwrap_or(&catalog.fallback)
}

/// 已收录的语言代码
pub fn languages() -> Vec<&'static str> {
    let catalog = catalog();
    let mut codes: Vec<&'static str> = catalog.others.keys().copied().collect();
    codes.push(catalog.fallback.code);
    codes.sort_unstable();
    codes
}

fn table(code: &'static str, rows: &[(MessageKey, &'static str)]) -> (&'static str, Messages) {
    (
        code,
        Messages {
            code,
            entries: rows.iter().copied().collect(),
        },
    )
}

fn build_catalog() -> Catalog {
    use MessageKey::*;

    let en = table(
        "en",
        &[
            (NotArch, "This program can only be run on an Arch-based Linux distribution."),
            (Installing, "Installing {package}..."),
            (Removing, "Removing {package}..."),
            (Searching, "Searching for {package} in AUR..."),
            (PackageNotFound, "Package not found in pacman or AUR."),
            (Error, "An error occurred"),
            (UnknownAction, "Unknown action '{action}'"),
            (SelectPackage, "Please select a package from the list:"),
            (SelectPrompt, "Select a package number [1-{max}]: "),
            (InvalidSelection, "Invalid selection. Please try again."),
            (InvalidInput, "Invalid input. Please enter a number."),
            (ManjaroWarning, "You are using Manjaro. This program might cause issues on Manjaro."),
            (UpToDate, "You are using the latest version."),
            (
                OutdatedVersion,
                "Your version is outdated and cannot be used. Please update to the latest version.",
            ),
            (
                NewerVersion,
                "Warning: your version {current} is newer than the latest version {latest}. This is unusual.",
            ),
            (UpdateCheckFailed, "Failed to check for updates: {reason}"),
            (Cancelled, "Operation cancelled by user."),
            (UnexpectedError, "Unexpected error: {reason}"),
        ],
    );

    let pl = table(
        DEFAULT_LANGUAGE,
        &[
            (NotArch, "Ten program można uruchomić tylko na dystrybucji Linuksa opartej na Arch."),
            (Installing, "Instalowanie {package}..."),
            (Removing, "Usuwanie {package}..."),
            (Searching, "Wyszukiwanie {package} w AUR..."),
            (PackageNotFound, "Pakiet nie znaleziony w pacman lub AUR."),
            (Error, "Wystąpił błąd"),
            (UnknownAction, "Nieznana akcja '{action}'"),
            (SelectPackage, "Proszę wybrać pakiet z listy:"),
            (SelectPrompt, "Wybierz numer pakietu [1-{max}]: "),
            (InvalidSelection, "Niepoprawny wybór. Proszę spróbować ponownie."),
            (InvalidInput, "Niepoprawne dane wejściowe. Proszę podać liczbę."),
            (ManjaroWarning, "Używasz Manjaro. Ten program może powodować problemy na Manjaro."),
            (UpToDate, "Używasz najnowszej wersji."),
            (
                OutdatedVersion,
                "Twoja wersja jest nieaktualna i nie może być używana. Zaktualizuj do najnowszej wersji.",
            ),
            (
                NewerVersion,
                "Uwaga: twoja wersja {current} jest nowsza niż najnowsza wersja {latest}. To nietypowe.",
            ),
            (UpdateCheckFailed, "Nie udało się sprawdzić aktualizacji: {reason}"),
            (Cancelled, "Operacja anulowana przez użytkownika."),
            (UnexpectedError, "Nieoczekiwany błąd: {reason}"),
        ],
    );

    let ru = table(
        "ru",
        &[
            (NotArch, "Эту программу можно запускать только в дистрибутивах Linux, основанных на Arch."),
            (Installing, "Установка {package}..."),
            (Removing, "Удаление {package}..."),
            (Searching, "Поиск {package} в AUR..."),
            (PackageNotFound, "Пакет не найден в pacman или AUR."),
            (Error, "Произошла ошибка"),
            (UnknownAction, "Неизвестное действие '{action}'"),
            (SelectPackage, "Пожалуйста, выберите пакет из списка:"),
            (SelectPrompt, "Выберите номер пакета [1-{max}]: "),
            (InvalidSelection, "Неверный выбор. Пожалуйста, попробуйте снова."),
            (InvalidInput, "Неверный ввод. Введите число."),
            (ManjaroWarning, "Вы используете Manjaro. Эта программа может вызвать проблемы на Manjaro."),
            (UpToDate, "Вы используете последнюю версию."),
            (
                OutdatedVersion,
                "Ваша версия устарела и не может быть использована. Обновитесь до последней версии.",
            ),
            (
                NewerVersion,
                "Внимание: ваша версия {current} новее последней версии {latest}. Это необычно.",
            ),
            (UpdateCheckFailed, "Не удалось проверить обновления: {reason}"),
            (Cancelled, "Операция отменена пользователем."),
            (UnexpectedError, "Непредвиденная ошибка: {reason}"),
        ],
    );

    let uk = table(
        "uk",
        &[
            (NotArch, "Цю програму можна запускати лише на дистрибутивах Linux, що базуються на Arch."),
            (Installing, "Встановлення {package}..."),
            (Removing, "Видалення {package}..."),
            (Searching, "Пошук {package} в AUR..."),
            (PackageNotFound, "Пакет не знайдено у pacman або AUR."),
            (Error, "Сталася помилка"),
            (UnknownAction, "Невідома дія '{action}'"),
            (SelectPackage, "Будь ласка, виберіть пакет зі списку:"),
            (SelectPrompt, "Виберіть номер пакета [1-{max}]: "),
            (InvalidSelection, "Невірний вибір. Будь ласка, спробуйте ще раз."),
            (InvalidInput, "Неправильний ввід. Введіть число."),
            (ManjaroWarning, "Ви використовуєте Manjaro. Ця програма може викликати проблеми на Manjaro."),
            (UpToDate, "Ви використовуєте останню версію."),
            (
                OutdatedVersion,
                "Ваша версія застаріла і не може використовуватися. Оновіться до останньої версії.",
            ),
            (
                NewerVersion,
                "Увага: ваша версія {current} новіша за останню версію {latest}. Це незвично.",
            ),
            (UpdateCheckFailed, "Не вдалося перевірити оновлення: {reason}"),
            (Cancelled, "Операцію скасовано користувачем."),
            (UnexpectedError, "Неочікувана помилка: {reason}"),
        ],
    );

    let de = table(
        "de",
        &[
            (
                NotArch,
                "Dieses Programm kann nur auf einer Arch-basierten Linux-Distribution ausgeführt werden.",
            ),
            (Installing, "Installiere {package}..."),
            (Removing, "Entferne {package}..."),
            (Searching, "Suche nach {package} im AUR..."),
            (PackageNotFound, "Paket nicht in pacman oder AUR gefunden."),
            (Error, "Ein Fehler ist aufgetreten"),
            (UnknownAction, "Unbekannte Aktion '{action}'"),
            (SelectPackage, "Bitte wählen Sie ein Paket aus der Liste aus:"),
            (SelectPrompt, "Paketnummer wählen [1-{max}]: "),
            (InvalidSelection, "Ungültige Auswahl. Bitte versuchen Sie es erneut."),
            (InvalidInput, "Ungültige Eingabe. Bitte geben Sie eine Zahl ein."),
            (
                ManjaroWarning,
                "Sie verwenden Manjaro. Dieses Programm kann auf Manjaro Probleme verursachen.",
            ),
            (UpToDate, "Sie verwenden die neueste Version."),
            (
                OutdatedVersion,
                "Ihre Version ist veraltet und kann nicht verwendet werden. Bitte aktualisieren Sie auf die neueste Version.",
            ),
            (
                NewerVersion,
                "Warnung: Ihre Version {current} ist neuer als die neueste Version {latest}. Das ist ungewöhnlich.",
            ),
            (UpdateCheckFailed, "Suche nach Aktualisierungen fehlgeschlagen: {reason}"),
            (Cancelled, "Vorgang vom Benutzer abgebrochen."),
            (UnexpectedError, "Unerwarteter Fehler: {reason}"),
        ],
    );

    Catalog {
        fallback: pl.1,
        others: [en, ru, uk, de].into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_polish() {
        let unknown = messages("xx");
        let polish = messages("pl");
        assert!(std::ptr::eq(unknown, polish));
        assert_eq!(unknown.code(), "pl");
        for key in MessageKey::ALL {
            assert_eq!(unknown.get(key), polish.get(key));
        }
    }

    #[test]
    fn every_language_defines_every_key() {
        for code in languages() {
            let table = messages(code);
            assert_eq!(table.code(), code);
            for key in MessageKey::ALL {
                assert!(
                    table.entries.contains_key(&key),
                    "{} is missing {:?}",
                    code,
                    key
                );
            }
        }
    }

    #[test]
    fn known_languages() {
        assert_eq!(languages(), vec!["de", "en", "pl", "ru", "uk"]);
        assert_eq!(
            messages("en").format(MessageKey::Installing, &[("package", "vim")]),
            "Installing vim..."
        );
        assert_eq!(
            messages("de").format(MessageKey::Removing, &[("package", "vim")]),
            "Entferne vim..."
        );
    }

    #[test]
    fn format_substitutes_placeholders() {
        let text = messages("en").format(
            MessageKey::NewerVersion,
            &[("current", "1.0.2"), ("latest", "1.0.1")],
        );
        assert_eq!(
            text,
            "Warning: your version 1.0.2 is newer than the latest version 1.0.1. This is unusual."
        );

        let prompt = messages("en").format(MessageKey::SelectPrompt, &[("max", "3")]);
        assert_eq!(prompt, "Select a package number [1-3]: ");
    }
}
