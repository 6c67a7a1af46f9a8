//! `mandi doctor` — check that the environment can drive a headless browser.

use std::path::Path;
use std::process::Command;

use anyhow::Result;

use crate::cli::output::{self, Styled};
use crate::renderer::chromium::find_chromium;

/// Run the doctor diagnostic.
pub fn run(json: bool) -> Result<()> {
    if json {
        return run_json();
    }

    let s = Styled::new();
    let mut ready = true;

    output::print_header(&s);

    output::print_section(&s, "System");
    output::print_check(
        s.ok_sym(),
        "OS:",
        &format!("{} ({})", std::env::consts::OS, std::env::consts::ARCH),
    );
    eprintln!();

    output::print_section(&s, "Browser");
    match find_chromium() {
        Some(path) => {
            let version = chromium_version(&path);
            output::print_check(
                s.ok_sym(),
                "Chromium:",
                &format!(
                    "{} at {}",
                    version.as_deref().unwrap_or("unknown version"),
                    path.display()
                ),
            );

            match headless_smoke_test(&path) {
                Ok(ms) => {
                    output::print_check(
                        s.ok_sym(),
                        "Headless test:",
                        &format!("launched and closed in {ms}ms"),
                    );
                }
                Err(e) => {
                    output::print_check(s.fail_sym(), "Headless test:", &format!("FAILED — {e}"));
                    output::print_detail(
                        "Missing shared libraries are the usual cause in containers.",
                    );
                    output::print_detail(
                        "Fix (Ubuntu/Debian): sudo apt install libnss3 libatk1.0-0 libatk-bridge2.0-0",
                    );
                    ready = false;
                }
            }
        }
        None => {
            output::print_check(s.fail_sym(), "Chromium:", "NOT FOUND");
            output::print_detail("Install chromium or google-chrome,");
            output::print_detail("or point fetch at a binary with --chromium <PATH>.");
            ready = false;
        }
    }

    if ready {
        output::print_status(
            &s,
            &s.green("READY"),
            "fetch prices with 'mandi fetch <crop> <state>'",
        );
    } else {
        output::print_status(&s, &s.red("NOT READY"), "fix issues above");
    }

    Ok(())
}

/// JSON output mode for doctor.
fn run_json() -> Result<()> {
    let chromium_path = find_chromium();
    let chromium_version = chromium_path.as_deref().and_then(chromium_version);
    let headless_ok = chromium_path
        .as_deref()
        .map(|p| headless_smoke_test(p).is_ok())
        .unwrap_or(false);

    output::print_json(&serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "os": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
        "chromium_path": chromium_path.map(|p| p.display().to_string()),
        "chromium_version": chromium_version,
        "headless_ok": headless_ok,
    }));
    Ok(())
}

/// Get the browser version string, without the product-name prefix.
fn chromium_version(path: &Path) -> Option<String> {
    let output = Command::new(path).arg("--version").output().ok()?;
    if output.status.success() {
        Some(clean_version(&String::from_utf8_lossy(&output.stdout)))
    } else {
        None
    }
}

fn clean_version(raw: &str) -> String {
    raw.trim()
        .replace("Google Chrome ", "")
        .replace("Chromium ", "")
}

/// Launch the browser headless against about:blank, with the same flags
/// the scraper uses, and report how long the round trip took.
fn headless_smoke_test(path: &Path) -> Result<u64> {
    let start = std::time::Instant::now();
    let output = Command::new(path)
        .args([
            "--headless",
            "--no-sandbox",
            "--disable-dev-shm-usage",
            "--disable-gpu",
            "--dump-dom",
            "about:blank",
        ])
        .output()
        .map_err(|e| anyhow::anyhow!("failed to launch: {e}"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow::anyhow!(
            "{}",
            stderr.lines().next().unwrap_or("unknown error")
        ));
    }

    Ok(start.elapsed().as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_version_strips_product_prefix() {
        assert_eq!(clean_version("Chromium 126.0.6478.55\n"), "126.0.6478.55");
        assert_eq!(
            clean_version("Google Chrome 127.0.6533.72"),
            "127.0.6533.72"
        );
    }
}
