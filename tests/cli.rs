use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SOURCE: &str = "\ninterface TestInterface {\n  prop: string;\n}\n\nconst test: TestInterface = { prop: 'test' };\n";

fn relocate(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("relocate").unwrap();
    cmd.current_dir(dir).env_remove("RELOCATE_LOG");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

#[test]
fn test_moves_interface_and_adds_import() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "source.ts", SOURCE);
    write(dir.path(), "target.ts", "");

    relocate(dir.path())
        .args(["move", "source.ts", "--line", "2", "--to", "target.ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TestInterface"));

    let source = read(dir.path(), "source.ts");
    assert!(source.contains("import { TestInterface } from './target';"));
    assert!(!source.contains("interface TestInterface {"));
    assert!(read(dir.path(), "target.ts").contains("interface TestInterface {\n  prop: string;\n}"));
}

#[test]
fn test_conflict_leaves_both_files_untouched() {
    let dir = TempDir::new().unwrap();
    let target = "\ninterface TestInterface {\n  otherProp: number;\n}";
    write(dir.path(), "source.ts", SOURCE);
    write(dir.path(), "target.ts", target);

    relocate(dir.path())
        .args([
            "move",
            "source.ts",
            "--symbol",
            "TestInterface",
            "--to",
            "target.ts",
            "--on-conflict",
            "abort",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already declared"));

    assert_eq!(read(dir.path(), "source.ts"), SOURCE);
    assert_eq!(read(dir.path(), "target.ts"), target);
}

#[test]
fn test_ask_without_terminal_declines() {
    let dir = TempDir::new().unwrap();
    let target = "interface TestInterface {}\n";
    write(dir.path(), "source.ts", SOURCE);
    write(dir.path(), "target.ts", target);

    relocate(dir.path())
        .args(["move", "source.ts", "-s", "TestInterface", "--to", "target.ts", "--on-conflict", "ask"])
        .assert()
        .failure();
    assert_eq!(read(dir.path(), "target.ts"), target);

    relocate(dir.path())
        .args([
            "move",
            "source.ts",
            "-s",
            "TestInterface",
            "--to",
            "target.ts",
            "--on-conflict",
            "ask",
            "--yes",
        ])
        .assert()
        .success();
    assert!(read(dir.path(), "target.ts").contains("// WARNING: Duplicate symbol \"TestInterface\" below"));
}

#[test]
fn test_exported_symbol_is_forwarded() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "src/models.ts",
        "export interface User {\n  id: string;\n}\n\nexport const guest: User = { id: '' };\n",
    );

    relocate(dir.path())
        .args(["move", "src/models.ts", "-s", "User", "--to", "types/user.ts"])
        .assert()
        .success();

    let source = read(dir.path(), "src/models.ts");
    assert!(source.contains("import { User } from './types/user';"));
    assert!(source.contains("export { User } from './types/user';"));
    assert_eq!(
        read(dir.path(), "src/types/user.ts"),
        "export interface User {\n  id: string;\n}\n"
    );
}

#[test]
fn test_cross_directory_import_path() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/components/source.ts", SOURCE);

    relocate(dir.path())
        .args([
            "move",
            "src/components/source.ts",
            "-l",
            "3",
            "--to",
            "../utils/target.ts",
        ])
        .assert()
        .success();

    assert!(read(dir.path(), "src/components/source.ts")
        .contains("import { TestInterface } from '../utils/target';"));
    assert!(dir.path().join("src/utils/target.ts").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "source.ts", SOURCE);

    relocate(dir.path())
        .args(["move", "source.ts", "-s", "TestInterface", "--to", "target.ts", "--dry-run", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"symbol\": \"TestInterface\""))
        .stdout(predicate::str::contains("\"dry_run\": true"));

    assert_eq!(read(dir.path(), "source.ts"), SOURCE);
    assert!(!dir.path().join("target.ts").exists());
}

#[test]
fn test_default_target_from_config() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "source.ts", SOURCE);
    write(dir.path(), ".relocate.toml", "default_target = \"models.ts\"\n");

    relocate(dir.path())
        .args(["move", "source.ts", "-s", "TestInterface"])
        .assert()
        .success();

    assert!(read(dir.path(), "models.ts").contains("interface TestInterface"));
    assert!(read(dir.path(), "source.ts").contains("from './models';"));
}

#[test]
fn test_unknown_symbol_fails() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "source.ts", SOURCE);

    relocate(dir.path())
        .args(["move", "source.ts", "-s", "Missing", "--to", "target.ts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing"));
}

#[test]
fn test_path_command() {
    let dir = TempDir::new().unwrap();
    relocate(dir.path())
        .args(["path", "src/components/source.ts", "src/utils/target.ts"])
        .assert()
        .success()
        .stdout("../utils/target\n");
}

#[test]
fn test_candidates_json() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/source.ts", SOURCE);
    write(dir.path(), "src/helpers.ts", "");
    write(dir.path(), "src/lib/index.ts", "");

    relocate(dir.path())
        .args(["candidates", "src/source.ts", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"relative_path\": \"lib\""))
        .stdout(predicate::str::contains("\"relative_path\": \"helpers.ts\""))
        .stdout(predicate::str::contains("\"relative_path\": \"types.ts\""))
        .stdout(predicate::str::contains("source.ts\"").count(1));
}
