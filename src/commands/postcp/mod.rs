use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::notifications::{self, CopySummary};

pub mod args;

/// 1 ファイル分のコピー結果。レポートの 1 行に対応する。
#[derive(Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied { source: String, new_name: String },
    Failed { source: String, message: String },
}

impl CopyOutcome {
    /// レポート 1 行分のテキストへ整形する。
    pub fn render(&self) -> String {
        match self {
            Self::Copied { source, new_name } => format!("{source} → {new_name}"),
            Self::Failed { source, message } => format!("ERROR: {source}: {message}"),
        }
    }

    fn is_copied(&self) -> bool {
        matches!(self, Self::Copied { .. })
    }
}

/// postcp コマンド全体を実行し、入力順のレポートを標準出力へ出す。
///
/// 個別ファイルの失敗はレポート行として記録するだけで、終了コードには
/// 影響しない。致命的なのは引数不足と設定エラーのみ（main 側で処理）。
pub fn run(files: Vec<String>, postfix: String, no_clobber: bool, config: Config) -> i32 {
    let mut outcomes = Vec::with_capacity(files.len());

    for file in &files {
        outcomes.push(copy_one(file, &postfix, no_clobber, &config));
    }

    let report = outcomes
        .iter()
        .map(CopyOutcome::render)
        .collect::<Vec<_>>()
        .join("\n");
    println!("{}", report.trim());

    let copied = outcomes.iter().filter(|o| o.is_copied()).count();
    if config.notify.macos_notify {
        notifications::notify_run_result(&CopySummary {
            copied,
            failed: outcomes.len() - copied,
        });
    }

    0
}

/// 単一ファイルをコピーし、成否を CopyOutcome として返す。
pub fn copy_one(source: &str, postfix: &str, no_clobber: bool, config: &Config) -> CopyOutcome {
    match try_copy(source, postfix, no_clobber, config) {
        Ok(new_name) => CopyOutcome::Copied {
            source: source.to_string(),
            new_name,
        },
        Err(message) => CopyOutcome::Failed {
            source: source.to_string(),
            message,
        },
    }
}

fn try_copy(
    source: &str,
    postfix: &str,
    no_clobber: bool,
    config: &Config,
) -> Result<String, String> {
    let (new_name, new_path) = derive_new_name(Path::new(source), postfix);

    if new_path.exists() {
        if no_clobber || !config.copy.clobber {
            return Err(format!("'{}' already exists", new_path.display()));
        }
        if config.copy.trash_clobbered {
            trash::delete(&new_path)
                .map_err(|e| format!("failed to move existing file to trash: {e}"))?;
        }
    }

    fs::copy(source, &new_path).map_err(|e| e.to_string())?;

    Ok(new_name)
}

/// 新しいファイル名とコピー先パスを導出する。
///
/// 拡張子はベース名の最後のドット以降（`archive.tar.gz` → `.gz`）。
/// 先頭ドットのみのドットファイル（`.gitignore` など）は拡張子なしとして
/// 扱い、末尾に postfix を付ける。ディレクトリ成分のない入力はそのまま
/// ベアなファイル名を返す。
pub fn derive_new_name(source: &Path, postfix: &str) -> (String, PathBuf) {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let new_name = match source.extension() {
        Some(ext) => format!("{stem}{postfix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{postfix}"),
    };

    let dir = source.parent().unwrap_or_else(|| Path::new(""));
    let new_path = dir.join(&new_name);

    (new_name, new_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_name(path: &str, postfix: &str) -> String {
        derive_new_name(Path::new(path), postfix).0
    }

    fn new_path(path: &str, postfix: &str) -> PathBuf {
        derive_new_name(Path::new(path), postfix).1
    }

    #[test]
    fn inserts_postfix_before_extension() {
        assert_eq!(new_name("report.txt", "_v2"), "report_v2.txt");
        assert_eq!(new_path("report.txt", "_v2"), PathBuf::from("report_v2.txt"));
    }

    #[test]
    fn appends_postfix_when_no_extension() {
        assert_eq!(new_name("data", "_bak"), "data_bak");
        assert_eq!(new_path("data", "_bak"), PathBuf::from("data_bak"));
    }

    #[test]
    fn extension_is_taken_from_last_dot_only() {
        assert_eq!(new_name("archive.tar.gz", "_old"), "archive.tar_old.gz");
    }

    #[test]
    fn leading_dot_only_name_has_no_extension() {
        assert_eq!(new_name(".gitignore", "_bak"), ".gitignore_bak");
    }

    #[test]
    fn dotfile_with_extension_splits_at_last_dot() {
        assert_eq!(new_name(".config.toml", "_bak"), ".config_bak.toml");
    }

    #[test]
    fn directory_component_is_preserved_in_path_only() {
        let (name, path) = derive_new_name(Path::new("nested/dir/photo.png"), "_old");
        assert_eq!(name, "photo_old.png");
        assert_eq!(path, PathBuf::from("nested/dir/photo_old.png"));
    }

    #[test]
    fn absolute_path_stays_absolute() {
        let (name, path) = derive_new_name(Path::new("/tmp/report.txt"), "_v2");
        assert_eq!(name, "report_v2.txt");
        assert_eq!(path, PathBuf::from("/tmp/report_v2.txt"));
    }

    #[test]
    fn empty_postfix_reproduces_original_name() {
        assert_eq!(new_name("report.txt", ""), "report.txt");
        assert_eq!(new_name("data", ""), "data");
        assert_eq!(new_name(".gitignore", ""), ".gitignore");
    }

    #[test]
    fn derivation_is_deterministic() {
        let first = derive_new_name(Path::new("a/b.c"), "_x");
        let second = derive_new_name(Path::new("a/b.c"), "_x");
        assert_eq!(first, second);
    }

    #[test]
    fn copy_one_returns_the_new_name_on_success() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let source = temp_dir.path().join("report.txt");
        std::fs::write(&source, b"content").unwrap();

        let config = Config::default();
        let outcome = copy_one(source.to_str().unwrap(), "_v2", false, &config);

        match outcome {
            CopyOutcome::Copied { new_name, .. } => assert_eq!(new_name, "report_v2.txt"),
            CopyOutcome::Failed { message, .. } => panic!("copy failed: {message}"),
        }
        assert!(temp_dir.path().join("report_v2.txt").exists());
    }

    #[test]
    fn copy_one_turns_missing_source_into_failed_outcome() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let source = temp_dir.path().join("missing.txt");

        let config = Config::default();
        let outcome = copy_one(source.to_str().unwrap(), "_v2", false, &config);

        match outcome {
            CopyOutcome::Failed { source: s, message } => {
                assert_eq!(s, source.to_str().unwrap());
                assert!(!message.is_empty());
            }
            CopyOutcome::Copied { .. } => panic!("copy of a missing file must fail"),
        }
    }

    #[test]
    fn copy_one_respects_no_clobber() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let source = temp_dir.path().join("report.txt");
        std::fs::write(&source, b"new").unwrap();
        let existing = temp_dir.path().join("report_v2.txt");
        std::fs::write(&existing, b"old").unwrap();

        let config = Config::default();
        let outcome = copy_one(source.to_str().unwrap(), "_v2", true, &config);

        match outcome {
            CopyOutcome::Failed { message, .. } => assert!(message.contains("already exists")),
            CopyOutcome::Copied { .. } => panic!("no-clobber must refuse to overwrite"),
        }
        assert_eq!(std::fs::read(&existing).unwrap(), b"old");
    }

    #[test]
    fn render_success_line() {
        let outcome = CopyOutcome::Copied {
            source: "report.txt".into(),
            new_name: "report_v2.txt".into(),
        };
        assert_eq!(outcome.render(), "report.txt → report_v2.txt");
    }

    #[test]
    fn render_error_line() {
        let outcome = CopyOutcome::Failed {
            source: "missing.txt".into(),
            message: "No such file or directory (os error 2)".into(),
        };
        assert_eq!(
            outcome.render(),
            "ERROR: missing.txt: No such file or directory (os error 2)"
        );
    }
}
