use assert_cmd::prelude::*;
use chrono::{Datelike, Local};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const EMAIL: &str = "you@example.com";

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn init_git_repo(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    // init and basic identity
    assert!(Command::new("git")
        .args(["init"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "user.email", EMAIL])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    assert!(Command::new("git")
        .args(["config", "user.name", "Your Name"])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn commit_file(dir: &Path, name: &str, content: &str, author: Option<&str>) {
    let path = dir.join(name);
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
    assert!(Command::new("git")
        .args(["add", "."])
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
    let mut commit = Command::new("git");
    commit.current_dir(dir);
    if let Some(author) = author {
        commit.args(["-c", &format!("user.email={author}")]);
    }
    assert!(commit
        .args(["commit", "-m", &format!("add {name}")])
        .status()
        .unwrap()
        .success());
}

fn gitcal(store: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gitcal").unwrap();
    cmd.arg("--store").arg(store);
    cmd
}

#[test]
fn scan_remembers_repositories_once() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("state").join("repos.db");
    fs::create_dir_all(dir.path().join("code/a/.git")).unwrap();
    fs::create_dir_all(dir.path().join("code/node_modules/b/.git")).unwrap();

    let out = gitcal(&store)
        .arg("scan")
        .arg(dir.path().join("code"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8(out).unwrap();
    assert!(out.lines().any(|l| Path::new(l).ends_with("code/a")), "{out}");
    assert!(!out.contains("node_modules"));

    gitcal(&store).arg("scan").arg(dir.path().join("code")).assert().success();

    let listed = gitcal(&store).arg("repos").assert().success().get_output().stdout.clone();
    assert_eq!(String::from_utf8(listed).unwrap().lines().count(), 1);
}

#[test]
fn stats_json_counts_todays_commits() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    let repo = dir.path().join("code/project");
    let store = dir.path().join("repos.db");
    init_git_repo(&repo);
    commit_file(&repo, "a.rs", "fn a(){}\n", None);
    commit_file(&repo, "b.rs", "fn b(){}\n", None);
    commit_file(&repo, "c.rs", "fn c(){}\n", Some("someone@else.org"));

    gitcal(&store).arg("scan").arg(dir.path().join("code")).assert().success();

    let out = gitcal(&store)
        .args(["stats", "--email", EMAIL, "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["total_commits"].as_u64(), Some(2));
    assert_eq!(v["repositories_scanned"].as_u64(), Some(1));
    let days = v["days"].as_array().unwrap();
    assert_eq!(days.len(), 183);
    let today = days.last().unwrap();
    assert_eq!(today["days_ago"].as_u64(), Some(0));
    assert_eq!(today["commits"].as_u64(), Some(2));
}

#[test]
fn stats_draws_calendar_and_reports_skipped() {
    if !has_git() {
        return;
    }
    let dir = tempdir().unwrap();
    let repo = dir.path().join("code/project");
    let store = dir.path().join("repos.db");
    init_git_repo(&repo);
    commit_file(&repo, "a.rs", "fn a(){}\n", None);
    // looks like a repository to the scanner but has no history
    fs::create_dir_all(dir.path().join("code/broken/.git")).unwrap();

    gitcal(&store).arg("scan").arg(dir.path().join("code")).assert().success();

    let output = gitcal(&store)
        .args(["stats", "--email", EMAIL, "--no-color"])
        .assert()
        .success()
        .get_output()
        .clone();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 8);
    let today_row = Local::now().weekday().num_days_from_sunday() as usize;
    assert!(lines[1 + today_row].ends_with("  1 "), "{stdout}");

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("broken"), "{stderr}");
}
