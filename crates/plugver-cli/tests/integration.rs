//! Integration tests for create-plugins-versions and plugin-hash-updater

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use plugver_manifest::checksum::bytes_hash;
use predicates::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const BASE_URL: &str =
    "https://raw.githubusercontent.com/MateriaMagicaLLC/mm-mushclient-scripts/master/";

const MAPPER_ID: &str = "f973af093e715dece34dc25f";
const AFFECTS_ID: &str = "6010f6bda5ebf2210998613d";

/// A scratch copy of the scripts repository: `src/`, `res/` and `tools/`,
/// with the tools run from `tools/` like the maintainers do.
struct RepoHarness {
    root: TempDir,
}

impl RepoHarness {
    fn new() -> io::Result<Self> {
        let root = TempDir::new()?;
        let harness = RepoHarness { root };
        fs::create_dir_all(harness.path("src"))?;
        fs::create_dir_all(harness.path("res"))?;
        fs::create_dir_all(harness.path("tools"))?;
        fs::create_dir_all(harness.path("home"))?;

        harness.write("src/MM_GMCP_Mapper.xml", &mapper_definition())?;
        harness.write("src/affects_by_name.xml", &affects_definition())?;
        harness.write("src/mm_mapper.lua", "-- mapper module\n")?;
        harness.write("res/buttons.png", "\u{89}PNG fake")?;
        harness.write("res/spells.db", "SQLite format 3")?;
        Ok(harness)
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    fn write(&self, relative: &str, content: &str) -> io::Result<()> {
        fs::write(self.path(relative), content)
    }

    fn create(&self) -> Command {
        self.isolate(cargo_bin_cmd!("create-plugins-versions"))
    }

    fn updater(&self) -> Command {
        self.isolate(cargo_bin_cmd!("plugin-hash-updater"))
    }

    fn isolate(&self, mut cmd: Command) -> Command {
        cmd.current_dir(self.path("tools"))
            .env("HOME", self.path("home"))
            .env_remove("PLUGVER_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn mapper_definition() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"iso-8859-1\"?>\n\
         <muclient>\n\
         <plugin\n\
         \x20  name=\"MM_GMCP_Mapper\"\n\
         \x20  id=\"{MAPPER_ID}\"\n\
         \x20  >\n\
         </plugin>\n\
         <script>\n\
         function plugin_update_aux_url()\n\
         \x20 local t = {{\n\
         \x20   \"{BASE_URL}src/mm_mapper.lua,MUSH/lua\",\n\
         \x20   \"{BASE_URL}res/buttons.png\",\n\
         \x20 }}\n\
         \x20 return (table.concat(t, \";\"))\n\
         end\n\
         </script>\n\
         </muclient>\n"
    )
}

fn affects_definition() -> String {
    format!("<plugin\n   name=\"affects_by_name\"\n   id=\"{AFFECTS_ID}\"\n   >\n</plugin>\n")
}

fn file_hash(path: &Path) -> String {
    bytes_hash(&fs::read(path).unwrap_or_default())
}

#[test]
fn test_create_help() {
    cargo_bin_cmd!("create-plugins-versions")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plugins_versions.txt"));
}

#[test]
fn test_create_with_default_layout() {
    let repo = RepoHarness::new().expect("repo harness");

    let expected = format!(
        "id = {MAPPER_ID}  hash = {}  aux_files = {{   [1] = {{     name = \"mm_mapper.lua\",     dest = \"MUSH/lua\",     }},   [2] = {{     name = \"buttons.png\",     }},   }}\n\
         id = {AFFECTS_ID}  hash = {}\n\
         name = mm_mapper.lua  hash = {}\n\
         name = buttons.png  hash = {}\n\
         name = spells.db  hash = {}\n",
        file_hash(&repo.path("src/MM_GMCP_Mapper.xml")),
        file_hash(&repo.path("src/affects_by_name.xml")),
        file_hash(&repo.path("src/mm_mapper.lua")),
        file_hash(&repo.path("res/buttons.png")),
        file_hash(&repo.path("res/spells.db")),
    );

    repo.create()
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_create_without_res_directory_lists_remaining_files() {
    let repo = RepoHarness::new().expect("repo harness");
    fs::remove_dir_all(repo.path("res")).expect("remove res");

    let output = repo.create().assert().success().get_output().stdout.clone();
    let text = String::from_utf8_lossy(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with(&format!("id = {MAPPER_ID}  hash = ")));
    assert!(lines[1].starts_with(&format!("id = {AFFECTS_ID}  hash = ")));
    assert!(lines[2].starts_with("name = mm_mapper.lua  hash = "));
}

#[cfg(unix)]
#[test]
fn test_create_fails_on_dangling_definition_link() {
    let repo = RepoHarness::new().expect("repo harness");
    std::os::unix::fs::symlink(repo.path("elsewhere/gone.xml"), repo.path("src/gone.xml"))
        .expect("symlink");

    repo.create()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_create_reads_config_file() {
    let repo = RepoHarness::new().expect("repo harness");
    repo.write(
        "tools/plugver.toml",
        "[generate]\nassets = [{ dir = \"../res\", suffix = \"db\" }]\n",
    )
    .expect("write config");

    let output = repo
        .create()
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&output);
    let names: Vec<&str> = text.lines().filter(|l| l.starts_with("name = ")).collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("name = spells.db  hash = "));
}

#[test]
fn test_update_hashes_refreshes_plugin_lines() {
    let repo = RepoHarness::new().expect("repo harness");
    repo.write(
        "tools/plugins_id_to_name.txt",
        &format!("{MAPPER_ID} MM_GMCP_Mapper.xml\n{AFFECTS_ID} affects_by_name.xml\n"),
    )
    .expect("write index");

    let stale = "00000000000000000000000000000000";
    let aux = "aux_files = {   [1] = {     name = \"mm_mapper.lua\",     dest = \"MUSH/lua\",     },   }";
    repo.write(
        "tools/plugins_versions.txt",
        &format!(
            "id = {MAPPER_ID}  hash = {stale}  {aux}\n\
             id = {AFFECTS_ID}  hash = {stale}\n\
             name = spells.db  hash = {stale}\n"
        ),
    )
    .expect("write manifest");

    let expected = format!(
        "id = {MAPPER_ID}  hash = {}  {aux}\n\
         id = {AFFECTS_ID}  hash = {}\n\
         name = spells.db  hash = {stale}\n",
        file_hash(&repo.path("src/MM_GMCP_Mapper.xml")),
        file_hash(&repo.path("src/affects_by_name.xml")),
    );

    repo.updater()
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn test_update_hashes_verbose_reports_summary_once() {
    let repo = RepoHarness::new().expect("repo harness");
    repo.write(
        "tools/plugins_id_to_name.txt",
        &format!("{AFFECTS_ID} affects_by_name.xml\n"),
    )
    .expect("write index");
    repo.write(
        "tools/plugins_versions.txt",
        &format!("id = {AFFECTS_ID}  hash = ABC\n"),
    )
    .expect("write manifest");

    let output = repo
        .updater()
        .arg("-v")
        .assert()
        .success()
        .get_output()
        .stderr
        .clone();
    let text = String::from_utf8_lossy(&output);
    assert_eq!(text.matches("Refreshed").count(), 1, "stderr was: {text}");
}

#[test]
fn test_update_hashes_drops_unrecognised_lines() {
    let repo = RepoHarness::new().expect("repo harness");
    repo.write(
        "tools/plugins_id_to_name.txt",
        &format!("{AFFECTS_ID} affects_by_name.xml\n"),
    )
    .expect("write index");
    repo.write(
        "tools/plugins_versions.txt",
        &format!("-- generated\n\nid = {AFFECTS_ID}  hash = ABC\n"),
    )
    .expect("write manifest");

    repo.updater()
        .assert()
        .success()
        .stdout(format!(
            "id = {AFFECTS_ID}  hash = {}\n",
            file_hash(&repo.path("src/affects_by_name.xml"))
        ));
}

#[test]
fn test_update_hashes_unknown_id_fails() {
    let repo = RepoHarness::new().expect("repo harness");
    repo.write(
        "tools/plugins_id_to_name.txt",
        &format!("{AFFECTS_ID} affects_by_name.xml\n"),
    )
    .expect("write index");
    repo.write(
        "tools/plugins_versions.txt",
        &format!("id = {MAPPER_ID}  hash = ABC\n"),
    )
    .expect("write manifest");

    repo.updater()
        .assert()
        .failure()
        .stderr(predicate::str::contains(MAPPER_ID));
}

#[test]
fn test_update_hashes_malformed_index_fails() {
    let repo = RepoHarness::new().expect("repo harness");
    repo.write("tools/plugins_id_to_name.txt", "just-one-token\n")
        .expect("write index");
    repo.write("tools/plugins_versions.txt", "").expect("write manifest");

    repo.updater()
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Malformed index line 1"));
}

#[test]
fn test_update_hashes_explicit_paths() {
    let repo = RepoHarness::new().expect("repo harness");
    repo.write(
        "index.txt",
        &format!("{AFFECTS_ID} affects_by_name.xml\n"),
    )
    .expect("write index");
    repo.write("old.txt", &format!("id = {AFFECTS_ID}  hash = ABC\n"))
        .expect("write manifest");

    repo.updater()
        .arg("--index")
        .arg(repo.path("index.txt"))
        .arg("--manifest")
        .arg(repo.path("old.txt"))
        .arg("--plugins-dir")
        .arg(repo.path("src"))
        .assert()
        .success()
        .stdout(predicate::str::contains(file_hash(
            &repo.path("src/affects_by_name.xml"),
        )));
}

#[test]
fn test_missing_explicit_config_fails() {
    let repo = RepoHarness::new().expect("repo harness");
    repo.create()
        .arg("--config")
        .arg(repo.path("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}
