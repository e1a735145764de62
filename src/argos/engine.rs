use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::config::Settings;
use crate::translation::{LanguagePair, TranslateError, TranslationEngine};

/// Translates by running the `argos-translate` command-line tool.
///
/// The text is passed on stdin and the translation read from stdout. The
/// tool is pointed at the same packages directory the registry installs into.
pub struct ArgosCliEngine {
    program: String,
    packages_dir: PathBuf,
}

impl ArgosCliEngine {
    pub const fn new(program: String, packages_dir: PathBuf) -> Self {
        Self {
            program,
            packages_dir,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.argos_bin.clone(), settings.packages_dir.clone())
    }
}

impl TranslationEngine for ArgosCliEngine {
    fn translate(&self, pair: &LanguagePair, text: &str) -> Result<String, TranslateError> {
        let mut child = Command::new(&self.program)
            .args(["--from-lang", &pair.src, "--to-lang", &pair.dst])
            .env("ARGOS_PACKAGES_DIR", &self.packages_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TranslateError::engine(format!("failed to run {}: {e}", self.program)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| TranslateError::engine(format!("failed to send text: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| TranslateError::engine(format!("failed to read translation: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TranslateError::engine(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(strip_line_ending(&stdout).to_string())
    }
}

/// Drops the single newline the tool prints after the translation.
fn strip_line_ending(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_ending_only_once() {
        assert_eq!(strip_line_ending("hola\n"), "hola");
        assert_eq!(strip_line_ending("hola\r\n"), "hola");
        assert_eq!(strip_line_ending("hola\n\n"), "hola\n");
        assert_eq!(strip_line_ending("hola"), "hola");
    }

    #[test]
    fn test_missing_program_is_engine_error() {
        let engine = ArgosCliEngine::new(
            "tl-relay-test-no-such-binary".to_string(),
            PathBuf::from("/nonexistent"),
        );

        let err = engine
            .translate(&LanguagePair::new("en", "es"), "hello")
            .unwrap_err();

        assert!(matches!(err, TranslateError::Engine(_)));
        assert!(err.to_string().contains("failed to run"));
    }

    #[cfg(unix)]
    fn script(dir: &tempfile::TempDir, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("fake-argos");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_tool_with_pair_and_stdin() {
        let dir = tempfile::TempDir::new().unwrap();
        let program = script(&dir, r#"printf '%s>%s@%s:' "$2" "$4" "$ARGOS_PACKAGES_DIR"; cat; echo"#);
        let engine = ArgosCliEngine::new(program, PathBuf::from("/srv/packages"));

        let out = engine
            .translate(&LanguagePair::new("es", "en"), "¿qué tal?")
            .unwrap();

        assert_eq!(out, "es>en@/srv/packages:¿qué tal?");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_reports_stderr() {
        let dir = tempfile::TempDir::new().unwrap();
        let program = script(&dir, "cat >/dev/null; echo 'model missing' >&2; exit 3");
        let engine = ArgosCliEngine::new(program, PathBuf::from("/srv/packages"));

        let err = engine
            .translate(&LanguagePair::new("es", "en"), "hola")
            .unwrap_err();

        assert!(err.to_string().contains("model missing"));
    }
}
