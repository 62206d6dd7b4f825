use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

// Keep config and cache lookups inside the temp dir.
fn filetrek(home: &assert_fs::TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("filetrek");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_CACHE_HOME", home.path().join("cache"))
        .env_remove("FILETREK_LOG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn ls_lists_directories_first() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("work/zeta.txt").touch().unwrap();
    temp.child("work/alpha").create_dir_all().unwrap();
    temp.child("work/.dot").touch().unwrap();

    filetrek(&temp)
        .args(["--dir", temp.child("work").path().to_str().unwrap(), "ls"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha/\nzeta.txt\n"))
        .stdout(predicate::str::contains("Total items: 2"))
        .stdout(predicate::str::contains(".dot").not());

    filetrek(&temp)
        .args(["--dir", temp.path().to_str().unwrap(), "ls", "-la", "work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Permissions"))
        .stdout(predicate::str::contains(".dot"))
        .stdout(predicate::str::contains("Total items: 3"));
}

#[test]
fn cp_search_rm_round() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("root/a.txt").write_str("hello").unwrap();
    temp.child("root/sub/b.txt").write_str("world").unwrap();
    let dir = temp.path().to_str().unwrap();

    filetrek(&temp).args(["-d", dir, "cp", "root", "root2"]).assert().success();
    temp.child("root2/sub/b.txt").assert("world");

    filetrek(&temp)
        .args(["-d", dir, "cp", "root", "root2"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    filetrek(&temp)
        .args(["-d", temp.child("root").path().to_str().unwrap(), "search", "B"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("root/sub/b.txt\n"));

    filetrek(&temp)
        .args(["-d", dir, "rm", "root2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not empty"));
    filetrek(&temp).args(["-d", dir, "rm", "-r", "root2"]).assert().success();
    temp.child("root2").assert(predicate::path::missing());
}

#[test]
fn mv_mkdir_chmod() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("f.txt").write_str("x").unwrap();
    let dir = temp.path().to_str().unwrap();

    filetrek(&temp).args(["-d", dir, "mkdir", "box"]).assert().success();
    filetrek(&temp)
        .args(["-d", dir, "mv", "f.txt", "box"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("box/f.txt\n"));
    filetrek(&temp)
        .args(["-d", dir, "chmod", "600", "box/f.txt"])
        .assert()
        .success()
        .stdout("600 box/f.txt\n");
    filetrek(&temp)
        .args(["-d", dir, "chmod", "8", "box/f.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid permission mode"));
}

#[test]
fn bad_theme_is_a_usage_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    filetrek(&temp)
        .args(["--theme", "neon", "ls"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown theme"));
}

#[test]
fn config_file_is_honoured() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("settings.toml").write_str("show_hidden = true\n").unwrap();
    temp.child("d/.hidden").touch().unwrap();

    filetrek(&temp)
        .args([
            "--config",
            temp.child("settings.toml").path().to_str().unwrap(),
            "-d",
            temp.child("d").path().to_str().unwrap(),
            "ls",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(".hidden"));
}
