use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default export path for a company's narrative report, in the current
/// directory: `<company-slug>-exit-narrative.md`.
pub fn default_report_path(company: &str) -> PathBuf {
    PathBuf::from(format!("{}-exit-narrative.md", slugify(company)))
}

/// Lowercase, alphanumerics kept, everything else collapsed to single
/// hyphens.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true;
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    let trimmed = slug.trim_end_matches('-');
    if trimmed.is_empty() {
        "report".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Save a rendered report atomically.
///
/// Uses atomic-write-file so a crash mid-write never leaves a truncated
/// report behind.
pub fn save_report(path: &Path, report: &str) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    file.write_all(report.as_bytes())
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    file.commit()
        .with_context(|| format!("Failed to save report to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_slugify_company_names() {
        assert_eq!(slugify("InnovateTech"), "innovatetech");
        assert_eq!(slugify("Acme AI, Inc."), "acme-ai-inc");
        assert_eq!(slugify("  "), "report");
    }

    #[test]
    fn test_default_report_path() {
        assert_eq!(
            default_report_path("Acme AI"),
            PathBuf::from("acme-ai-exit-narrative.md")
        );
    }

    #[test]
    fn test_save_and_read_back() {
        let path = env::temp_dir().join("airval_test_report.md");
        let _ = fs::remove_file(&path);

        save_report(&path, "# Report\nbody\n").unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "# Report\nbody\n");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_overwrites_existing() {
        let path = env::temp_dir().join("airval_test_report_overwrite.md");
        save_report(&path, "old").unwrap();
        save_report(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        let _ = fs::remove_file(&path);
    }
}
